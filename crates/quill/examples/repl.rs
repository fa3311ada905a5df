//! Line-based host: every stdin line is dispatched, replies go to stdout.
//!
//! ```text
//! cargo run -p quill --example repl -- --prefix '!'
//! !add 1 2 3
//! !math mul 2 2.5
//! !say hello   "big world"
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use clap::Parser;
use quill::Args;
use quill::BoxError;
use quill::Command;
use quill::CommandError;
use quill::Context;
use quill::DispatchConfig;
use quill::Dispatcher;
use quill::ErrorHandler;
use quill::Handler;
use quill::Outcome;
use quill::ParamSpec;
use quill::Session;
use quill::TypeSpec;
use telemetry::LogOptions;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
	/// Command prefix; overrides the config file
	#[arg(short, long)]
	prefix: Option<String>,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,

	/// TOML file with dispatcher settings
	#[arg(short, long)]
	config: Option<PathBuf>,
}

struct StdoutSession;

#[async_trait]
impl Session for StdoutSession {
	fn author(&self) -> &str {
		"stdin"
	}

	async fn reply(&self, content: &str) -> Result<(), BoxError> {
		println!("{content}");
		Ok(())
	}
}

/// Reports every failure back to the user.
struct ReplyOnError;

#[async_trait]
impl ErrorHandler for ReplyOnError {
	async fn on_error(&self, ctx: &Context, err: &CommandError) {
		let _ = ctx.reply(&format!("error: {err}")).await;
	}
}

async fn say(ctx: Context, args: Args) -> Result<(), BoxError> {
	let text: String = args.extract("text").unwrap_or_default();
	ctx.reply(&text).await
}

async fn add(ctx: Context, args: Args) -> Result<(), BoxError> {
	let nums: Vec<i64> = args.extract("nums").unwrap_or_default();
	ctx.reply(&nums.iter().sum::<i64>().to_string()).await
}

async fn mul(ctx: Context, args: Args) -> Result<(), BoxError> {
	let nums: Vec<f64> = args.extract("nums").unwrap_or_default();
	ctx.reply(&nums.iter().product::<f64>().to_string()).await
}

async fn roll(ctx: Context, args: Args) -> Result<(), BoxError> {
	let sides: i64 = args
		.extract::<Option<String>>("sides")
		.flatten()
		.and_then(|s| s.parse().ok())
		.unwrap_or(6);
	ctx.reply(&format!("rolled a d{sides}")).await
}

async fn math(ctx: Context, _args: Args) -> Result<(), BoxError> {
	ctx.reply("subcommands: add, mul").await
}

async fn log_level(ctx: Context, args: Args) -> Result<(), BoxError> {
	let level: String = args.extract("level").unwrap_or_default();
	telemetry::reload_log_level(&level)?;
	ctx.reply(&format!("log level set to {level}")).await
}

/// Lists the commands registered before it.
struct Help {
	lines: Vec<String>,
}

#[async_trait]
impl Handler for Help {
	async fn call(&self, ctx: Context, _args: Args) -> Result<(), BoxError> {
		ctx.reply(&self.lines.join("\n")).await
	}
}

fn register(dispatcher: &Dispatcher) -> Result<(), BoxError> {
	dispatcher.register_command(
		None,
		Command::builder("say")
			.alias("echo")
			.help("Repeat the text back.")
			.param(ParamSpec::untyped("text").consume_rest())
			.handler(say),
	)?;
	dispatcher.register_command(
		None,
		Command::builder("add")
			.help("Sum whole numbers.")
			.param(ParamSpec::new("nums", TypeSpec::greedy(TypeSpec::Int)))
			.handler(add),
	)?;
	dispatcher.register_command(
		None,
		Command::builder("roll")
			.help("Roll a die.")
			.param(ParamSpec::new(
				"sides",
				TypeSpec::optional(TypeSpec::literal([4, 6, 8, 20])),
			))
			.handler(roll),
	)?;
	dispatcher.register_command(
		None,
		Command::builder("log")
			.help("Change the log level.")
			.param(ParamSpec::new(
				"level",
				TypeSpec::literal(["trace", "debug", "info", "warn", "error"]),
			))
			.handler(log_level),
	)?;

	let group = dispatcher.register_command(
		None,
		Command::builder("math")
			.help("Arithmetic.\nUse a subcommand.")
			.handler(math),
	)?;
	dispatcher.register_command(
		Some(&group),
		Command::builder("add")
			.alias("+")
			.param(ParamSpec::new("nums", TypeSpec::greedy(TypeSpec::Int)))
			.handler(add),
	)?;
	dispatcher.register_command(
		Some(&group),
		Command::builder("mul")
			.alias("*")
			.param(ParamSpec::new("nums", TypeSpec::greedy(TypeSpec::Float)))
			.handler(mul),
	)?;

	let lines = dispatcher
		.commands()
		.iter()
		.filter(|c| !c.is_hidden())
		.map(|c| {
			format!(
				"{} {}  {}",
				c.name(),
				c.usage(),
				c.brief().unwrap_or_default()
			)
		})
		.collect();
	dispatcher.register_command(
		None,
		Command::builder("help")
			.help("List commands.")
			.handler(Help { lines }),
	)?;
	Ok(())
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
	let cli = Cli::parse();
	telemetry::init(&LogOptions::with_level(cli.log_level.as_str()))?;

	let mut config = match &cli.config {
		Some(path) => DispatchConfig::from_file(path)?,
		None => DispatchConfig::default(),
	};
	if let Some(prefix) = cli.prefix {
		config.prefixes = vec![prefix];
	}

	let mut dispatcher = Dispatcher::new(config);
	dispatcher.set_error_handler(ReplyOnError);
	register(&dispatcher)?;
	info!(commands = dispatcher.commands().len(), "ready");

	let session: Arc<dyn Session> = Arc::new(StdoutSession);
	let mut lines = BufReader::new(tokio::io::stdin()).lines();
	while let Some(line) = lines.next_line().await? {
		// Errors were already reported by ReplyOnError.
		if let Ok(Outcome::NotFound) = dispatcher.dispatch(Arc::clone(&session), &line).await {
			session.reply("unknown command, try help").await?;
		}
	}
	Ok(())
}
