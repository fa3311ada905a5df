use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;

use super::Converter;
use crate::BadArgument;
use crate::BoxError;
use crate::Context;
use crate::Value;

const TRUTHY: &[&str] = &["yes", "y", "true", "t", "1", "enable", "on"];
const FALSY: &[&str] = &["no", "n", "false", "f", "0", "disable", "off"];

/// Case-insensitive yes/no parsing.
pub fn parse_bool(token: &str) -> Result<bool, BadArgument> {
	let lowered = token.to_lowercase();
	if TRUTHY.contains(&lowered.as_str()) {
		Ok(true)
	} else if FALSY.contains(&lowered.as_str()) {
		Ok(false)
	} else {
		Err(BadArgument::new(format!(
			"{token} is not a recognised boolean option."
		)))
	}
}

pub fn parse_int<T: FromStr>(token: &str) -> Result<T, BadArgument> {
	token
		.parse::<T>()
		.map_err(|_| BadArgument::new(format!("\"{token}\" is not a valid integer.")))
}

pub fn parse_float(token: &str) -> Result<f64, BadArgument> {
	token
		.parse::<f64>()
		.map_err(|_| BadArgument::new(format!("\"{token}\" is not a valid number.")))
}

/// Used when a parameter declares no type: the token itself.
pub(crate) struct IdentityConverter;

#[async_trait]
impl Converter for IdentityConverter {
	async fn convert(&self, _ctx: &Context, token: &str) -> Result<Value, BoxError> {
		Ok(Value::Str(token.to_string()))
	}
}

pub(crate) struct BoolConverter;

#[async_trait]
impl Converter for BoolConverter {
	async fn convert(&self, _ctx: &Context, token: &str) -> Result<Value, BoxError> {
		Ok(Value::Bool(parse_bool(token)?))
	}
}

pub(crate) struct IntConverter;

#[async_trait]
impl Converter for IntConverter {
	async fn convert(&self, _ctx: &Context, token: &str) -> Result<Value, BoxError> {
		Ok(Value::Int(parse_int(token)?))
	}
}

pub(crate) struct FloatConverter;

#[async_trait]
impl Converter for FloatConverter {
	async fn convert(&self, _ctx: &Context, token: &str) -> Result<Value, BoxError> {
		Ok(Value::Float(parse_float(token)?))
	}
}

pub(crate) type ParseFn = Arc<dyn Fn(&str) -> Result<Value, BoxError> + Send + Sync>;

/// Falls back to the declared type's own parser.
pub(crate) struct ParseConverter(pub(crate) ParseFn);

#[async_trait]
impl Converter for ParseConverter {
	async fn convert(&self, _ctx: &Context, token: &str) -> Result<Value, BoxError> {
		(self.0)(token)
	}
}
