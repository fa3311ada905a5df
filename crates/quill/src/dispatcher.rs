//! Entry point: raw text in, a command invocation out.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::debug;
use tracing::trace;
use tracing::warn;

use crate::Command;
use crate::CommandBuilder;
use crate::CommandError;
use crate::CommandTable;
use crate::Context;
use crate::Converter;
use crate::ConverterRegistry;
use crate::DispatchConfig;
use crate::ErrorHandler;
use crate::RegistrationError;
use crate::Session;

/// What happened to a piece of text.
#[derive(Debug, Clone)]
pub enum Outcome {
	/// The text did not start with a configured prefix.
	Ignored,
	/// No enabled command matched the first word.
	NotFound,
	/// The command ran to completion.
	Invoked(Arc<Command>),
}

impl Outcome {
	pub fn command(&self) -> Option<&Arc<Command>> {
		match self {
			Outcome::Invoked(command) => Some(command),
			_ => None,
		}
	}
}

/// Owns the converter registry and the root commands, and routes text to
/// them.
///
/// Registration (`&mut self` for converters and the global error handler)
/// is expected to happen before dispatching starts. Commands can be added
/// and removed through `&self` at any time.
pub struct Dispatcher {
	registry: ConverterRegistry,
	commands: CommandTable,
	config: ArcSwap<DispatchConfig>,
	error_handler: Option<Arc<dyn ErrorHandler>>,
}

impl Default for Dispatcher {
	fn default() -> Self {
		Self::new(DispatchConfig::default())
	}
}

impl Dispatcher {
	pub fn new(config: DispatchConfig) -> Self {
		Self {
			registry: ConverterRegistry::new(),
			commands: CommandTable::new(),
			config: ArcSwap::from_pointee(config),
			error_handler: None,
		}
	}

	pub fn config(&self) -> Arc<DispatchConfig> {
		self.config.load_full()
	}

	/// Swap the configuration. In-flight dispatches keep the one they
	/// started with.
	pub fn update_config(&self, config: DispatchConfig) {
		debug!(?config, "dispatch config updated");
		self.config.store(Arc::new(config));
	}

	pub fn registry(&self) -> &ConverterRegistry {
		&self.registry
	}

	/// Register a converter for every command registered from now on.
	pub fn register_global_converter(&mut self, key: impl Into<String>, converter: impl Converter + 'static) {
		let key = key.into();
		debug!(key = key.as_str(), "registered global converter");
		self.registry.register(key, Arc::new(converter));
	}

	/// Handler for errors no command or group handles itself.
	pub fn set_error_handler(&mut self, handler: impl ErrorHandler + 'static) {
		self.error_handler = Some(Arc::new(handler));
	}

	/// Build `builder` and attach it under `parent`, or at the root.
	pub fn register_command(
		&self,
		parent: Option<&Arc<Command>>,
		mut builder: CommandBuilder,
	) -> Result<Arc<Command>, RegistrationError> {
		if builder.ignore_extra.is_none() {
			builder.ignore_extra = Some(self.config.load().ignore_extra);
		}
		let command = builder.build(&self.registry)?;

		match parent {
			Some(parent) => parent.add_command(command),
			None => {
				let command = Arc::new(command);
				self.commands.insert(&command)?;
				debug!(command = command.name(), "registered command");
				Ok(command)
			}
		}
	}

	/// Look a command up by its space separated path.
	pub fn get_command(&self, qualified: &str) -> Option<Arc<Command>> {
		self.commands.resolve(qualified)
	}

	/// Remove a root command. By primary name this drops every alias too.
	pub fn remove_command(&self, name: &str) -> Option<Arc<Command>> {
		self.commands.remove(name)
	}

	/// Root commands, each once.
	pub fn commands(&self) -> Vec<Arc<Command>> {
		self.commands.unique()
	}

	/// Find the deepest enabled command named by the leading words of
	/// `content`. Returns it with the words used and the text after them.
	fn walk<'a>(&self, content: &'a str, case_insensitive: bool) -> Option<(Arc<Command>, Vec<&'a str>, &'a str)> {
		let mut remaining = content.trim_start();
		let mut words = Vec::new();
		let mut current: Option<Arc<Command>> = None;

		loop {
			let (word, after) = remaining
				.split_once(char::is_whitespace)
				.unwrap_or((remaining, ""));
			if word.is_empty() {
				break;
			}

			let table = current.as_ref().map_or(&self.commands, |c| &c.children);
			let Some(next) = table
				.find(word, case_insensitive)
				.filter(|c| c.is_enabled())
			else {
				break;
			};

			words.push(word);
			current = Some(next);
			remaining = after.trim_start();
		}

		current.map(|command| (command, words, remaining))
	}

	/// Run the command named by `content`.
	///
	/// Every dispatch-time error is offered to the nearest error handler
	/// (command, then enclosing groups, then this dispatcher) and returned.
	pub async fn dispatch(&self, session: Arc<dyn Session>, content: &str) -> Result<Outcome, CommandError> {
		let config = self.config.load_full();

		let Some((prefix, rest)) = config.strip_prefix(content) else {
			trace!("no prefix matched, ignoring");
			return Ok(Outcome::Ignored);
		};

		let Some((command, words, remaining)) = self.walk(rest, config.case_insensitive) else {
			trace!("no command matched");
			return Ok(Outcome::NotFound);
		};

		let ctx = Context::invocation(
			session,
			prefix,
			words.join(" "),
			remaining.trim(),
			Arc::clone(&command),
		);
		debug!(
			command = %command.qualified_name(),
			author = ctx.author(),
			"invoking"
		);

		match command.invoke(&ctx).await {
			Ok(()) => Ok(Outcome::Invoked(command)),
			Err(err) => {
				self.handle_error(&command, &ctx, &err).await;
				Err(err)
			}
		}
	}

	async fn handle_error(&self, command: &Command, ctx: &Context, err: &CommandError) {
		let handler = command
			.scoped_error_handler()
			.or_else(|| self.error_handler.clone());

		match handler {
			Some(handler) => handler.on_error(ctx, err).await,
			None => warn!(
				command = %command.qualified_name(),
				error = %err,
				"unhandled command error"
			),
		}
	}
}

impl fmt::Debug for Dispatcher {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Dispatcher")
			.field("config", &self.config.load_full())
			.field("commands", &self.commands.len())
			.field("converters", &self.registry.len())
			.finish_non_exhaustive()
	}
}
