//! Typed text-command dispatch.
//!
//! Text such as `!ban @bob 7 being rude` is split into tokens, matched to a
//! registered [`Command`], checked, and bound onto the command's declared
//! parameters through a chain of [`Converter`]s before its handler runs.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use quill::Args;
//! use quill::BoxError;
//! use quill::Command;
//! use quill::Context;
//! use quill::DispatchConfig;
//! use quill::Dispatcher;
//! use quill::ParamSpec;
//! use quill::TypeSpec;
//!
//! async fn add(ctx: Context, args: Args) -> Result<(), BoxError> {
//! 	let nums: Vec<i64> = args.extract("nums").unwrap_or_default();
//! 	ctx.reply(&nums.iter().sum::<i64>().to_string()).await
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dispatcher = Dispatcher::new(DispatchConfig::with_prefix("!"));
//! dispatcher.register_command(
//! 	None,
//! 	Command::builder("add")
//! 		.param(ParamSpec::new("nums", TypeSpec::greedy(TypeSpec::Int)))
//! 		.handler(add),
//! )?;
//! # Ok(())
//! # }
//! ```

mod binder;
mod check;
mod command;
mod config;
mod context;
mod converter;
mod dispatcher;
mod error;
mod handler;
mod param;
mod value;

#[cfg(test)]
mod testing;

pub use binder::Args;
pub use check::Check;
pub use command::Command;
pub use command::CommandBuilder;
pub use command::CommandTable;
pub use config::ConfigError;
pub use config::DispatchConfig;
pub use context::Context;
pub use context::Session;
pub use converter::ConvertFn;
pub use converter::Converter;
pub use converter::ConverterMap;
pub use converter::ConverterRegistry;
pub use converter::LiteralConverter;
pub use converter::parse_bool;
pub use converter::parse_float;
pub use converter::parse_int;
pub use dispatcher::Dispatcher;
pub use dispatcher::Outcome;
pub use error::BadArgument;
pub use error::BoxError;
pub use error::CheckFailure;
pub use error::CommandError;
pub use error::RegistrationError;
pub use handler::ErrorHandler;
pub use handler::Handler;
pub use param::ParamKind;
pub use param::ParamMode;
pub use param::ParamSpec;
pub use param::Parameter;
pub use param::TypeSpec;
pub use value::FromValue;
pub use value::Value;
