//! Conversion of raw tokens into [`Value`]s.
//!
//! A parameter's declared [`TypeSpec`](crate::TypeSpec) is resolved into a
//! chain of [`Converter`]s once, when its command is registered. The
//! resolution order lives in [`registry`].

mod builtin;
mod literal;
mod registry;

use std::sync::Arc;

use async_trait::async_trait;

pub use builtin::parse_bool;
pub use builtin::parse_float;
pub use builtin::parse_int;
pub use literal::LiteralConverter;
pub use registry::ConverterMap;
pub use registry::ConverterRegistry;
pub(crate) use registry::resolve;

use crate::BoxError;
use crate::Context;
use crate::Value;

/// Turns one token into a value.
///
/// Implementations may await I/O, e.g. to look an entity up by name. Any
/// error returned is reported to the user as a
/// [`BadArgument`](crate::BadArgument) carrying the error's message.
#[async_trait]
pub trait Converter: Send + Sync {
	async fn convert(&self, ctx: &Context, token: &str) -> Result<Value, BoxError>;
}

/// A plain synchronous conversion function, classified by what it takes.
#[derive(Clone)]
pub enum ConvertFn {
	/// Ignores the token; produces a fixed value.
	Static(Arc<dyn Fn() -> Value + Send + Sync>),
	/// Receives the token only.
	Token(Arc<dyn Fn(&str) -> Result<Value, BoxError> + Send + Sync>),
	/// Receives the context and the token.
	Contextual(Arc<dyn Fn(&Context, &str) -> Result<Value, BoxError> + Send + Sync>),
}

pub(crate) struct FnConverter(pub(crate) ConvertFn);

#[async_trait]
impl Converter for FnConverter {
	async fn convert(&self, ctx: &Context, token: &str) -> Result<Value, BoxError> {
		match &self.0 {
			ConvertFn::Static(f) => Ok(f()),
			ConvertFn::Token(f) => f(token),
			ConvertFn::Contextual(f) => f(ctx, token),
		}
	}
}

/// "a", "a, or b", "a, b, or c"
pub(crate) fn or_list(items: &[String]) -> String {
	match items.split_last() {
		None => String::new(),
		Some((last, [])) => last.clone(),
		Some((last, rest)) => format!("{}, or {}", rest.join(", "), last),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_or_list() {
		let items = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect::<Vec<_>>();
		assert_eq!(or_list(&items(&[])), "");
		assert_eq!(or_list(&items(&["int"])), "int");
		assert_eq!(or_list(&items(&["int", "str"])), "int, or str");
		assert_eq!(or_list(&items(&["a", "b", "c"])), "a, b, or c");
	}
}
