use async_trait::async_trait;

use super::Converter;
use super::or_list;
use super::parse_bool;
use super::parse_float;
use super::parse_int;
use crate::BadArgument;
use crate::BoxError;
use crate::Context;
use crate::Value;

/// Accepts a token only if it equals one of a fixed set of values.
///
/// The token is coerced into each choice's own type in declaration order;
/// the first equal choice wins and the token text is returned unchanged.
pub struct LiteralConverter {
	choices: Vec<Value>,
}

impl LiteralConverter {
	pub fn new(choices: Vec<Value>) -> Self {
		Self { choices }
	}

	fn matches(choice: &Value, token: &str) -> bool {
		match choice {
			Value::Str(s) => s == token,
			Value::Int(i) => parse_int::<i64>(token).is_ok_and(|n| n == *i),
			Value::Float(x) => parse_float(token).is_ok_and(|n| n == *x),
			Value::Bool(b) => parse_bool(token).is_ok_and(|n| n == *b),
			Value::None | Value::List(_) | Value::Custom(_) => false,
		}
	}
}

#[async_trait]
impl Converter for LiteralConverter {
	async fn convert(&self, _ctx: &Context, token: &str) -> Result<Value, BoxError> {
		if self
			.choices
			.iter()
			.any(|choice| Self::matches(choice, token))
		{
			return Ok(Value::Str(token.to_string()));
		}

		let names: Vec<String> = self.choices.iter().map(ToString::to_string).collect();
		Err(BadArgument::new(format!(
			"Could not convert \"{token}\" into one of {}.",
			or_list(&names)
		))
		.into())
	}
}
