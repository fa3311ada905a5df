//! Binding of a token sequence onto a command's parameter descriptors.

use lexer::TokenStream;
use tracing::trace;

use crate::BadArgument;
use crate::Context;
use crate::FromValue;
use crate::ParamKind;
use crate::Parameter;
use crate::TypeSpec;
use crate::Value;
use crate::converter::or_list;

/// Arguments bound for one invocation.
///
/// Positional values are kept in declaration order; a consume-rest
/// parameter is kept apart and passed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
	values: Vec<(String, Value)>,
	rest: Option<(String, Value)>,
}

impl Args {
	/// Positional values in declaration order.
	pub fn positional(&self) -> impl Iterator<Item = &Value> {
		self.values.iter().map(|(_, value)| value)
	}

	pub fn get(&self, name: &str) -> Option<&Value> {
		self.values
			.iter()
			.chain(self.rest.iter())
			.find(|(n, _)| n == name)
			.map(|(_, value)| value)
	}

	/// The consume-rest value, if the command declares one.
	pub fn rest(&self) -> Option<&Value> {
		self.rest.as_ref().map(|(_, value)| value)
	}

	/// Typed access by parameter name.
	pub fn extract<T: FromValue>(&self, name: &str) -> Option<T> {
		self.get(name).and_then(T::from_value)
	}

	/// Number of positional values.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty() && self.rest.is_none()
	}
}

/// Run one parameter's converter chain over `token`.
///
/// A single converter reports its own message; a union that exhausts
/// every candidate names all of them.
async fn convert(param: &Parameter, ctx: &Context, token: &str) -> Result<Value, BadArgument> {
	trace!(param = %param.name, token, "converting");

	if !param.union {
		let converter = param
			.converters
			.first()
			.ok_or_else(|| BadArgument::new(format!("{} has no converter.", param.name)))?;
		return converter
			.convert(ctx, token)
			.await
			.map_err(BadArgument::from_conversion);
	}

	for converter in &param.converters {
		if let Ok(value) = converter.convert(ctx, token).await {
			return Ok(value);
		}
	}
	Err(BadArgument::new(format!(
		"Could not convert \"{token}\" into {}.",
		or_list(&param.candidate_names())
	)))
}

fn greedy_name(param: &Parameter) -> String {
	match &param.ty {
		TypeSpec::Greedy(inner) => inner.name(),
		other => other.name(),
	}
}

/// Bind `tokens` onto `params`.
pub(crate) async fn bind(
	params: &[Parameter],
	ctx: &Context,
	tokens: &[String],
	ignore_extra: bool,
	command_name: &str,
) -> Result<Args, BadArgument> {
	let mut stream = TokenStream::new(tokens);
	let mut args = Args::default();
	let mut index = 0;

	while let Some(token) = stream.next() {
		let Some(param) = params.get(index) else {
			stream.back(1);
			break;
		};

		match param.kind {
			ParamKind::Plain | ParamKind::Union => match convert(param, ctx, token).await {
				Ok(value) => args.values.push((param.name.clone(), value)),
				Err(err) => {
					let Some(default) = &param.default else {
						return Err(err);
					};
					args.values.push((param.name.clone(), default.clone()));
					stream.back(1);
				}
			},
			ParamKind::Greedy => {
				stream.back(1);
				let mut items = Vec::new();
				while let Some(token) = stream.next() {
					match convert(param, ctx, token).await {
						Ok(value) => items.push(value),
						Err(_) => {
							stream.back(1);
							break;
						}
					}
				}

				let value = if !items.is_empty() {
					Value::List(items)
				} else if let Some(default) = &param.default {
					default.clone()
				} else {
					return Err(BadArgument::new(format!(
						"Failed to find any arguments for {}.",
						greedy_name(param)
					)));
				};
				args.values.push((param.name.clone(), value));
			}
			ParamKind::Variadic => {
				stream.back(1);
				let mut items = Vec::with_capacity(stream.remaining());
				for token in stream.by_ref() {
					items.push(convert(param, ctx, token).await?);
				}
				args.values.push((param.name.clone(), Value::List(items)));
			}
			ParamKind::ConsumeRest => {
				let joined = stream.consume_rest_joined();
				let value = match convert(param, ctx, &joined).await {
					Ok(value) => value,
					Err(err) => match &param.default {
						Some(default) => default.clone(),
						None => return Err(err),
					},
				};
				args.rest = Some((param.name.clone(), value));
			}
		}
		index += 1;
	}

	for param in &params[index.min(params.len())..] {
		let Some(default) = &param.default else {
			return Err(BadArgument::new(format!(
				"{} is a required argument that is missing.",
				param.name
			)));
		};
		let entry = (param.name.clone(), default.clone());
		if param.kind == ParamKind::ConsumeRest {
			args.rest = Some(entry);
		} else {
			args.values.push(entry);
		}
	}

	if !ignore_extra && !stream.is_finished() {
		return Err(BadArgument::new(format!(
			"Too many arguments passed to {command_name}."
		)));
	}

	Ok(args)
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use super::*;
	use crate::ParamSpec;
	use crate::converter::ConverterMap;
	use crate::param::build_params;
	use crate::testing::NullSession;

	fn params(specs: Vec<ParamSpec>) -> Vec<Parameter> {
		build_params(specs, &ConverterMap::new()).unwrap()
	}

	fn tokens(input: &str) -> Vec<String> {
		lexer::tokenize(input)
			.into_iter()
			.map(str::to_string)
			.collect()
	}

	async fn run(specs: Vec<ParamSpec>, input: &str, ignore_extra: bool) -> Result<Args, BadArgument> {
		let ctx = Context::new(Arc::new(NullSession));
		bind(&params(specs), &ctx, &tokens(input), ignore_extra, "cmd").await
	}

	#[tokio::test]
	async fn test_plain_int() {
		let spec = || vec![ParamSpec::new("n", TypeSpec::Int)];

		let args = run(spec(), "42", true).await.unwrap();
		assert_eq!(args.extract::<i64>("n"), Some(42));

		let err = run(spec(), "x", true).await.unwrap_err();
		assert_eq!(err.message(), "\"x\" is not a valid integer.");
	}

	#[tokio::test]
	async fn test_greedy_leaves_failing_token() {
		let args = run(
			vec![
				ParamSpec::new("nums", TypeSpec::greedy(TypeSpec::Int)),
				ParamSpec::new("word", TypeSpec::Str),
			],
			"1 2 x",
			true,
		)
		.await
		.unwrap();

		assert_eq!(args.extract::<Vec<i64>>("nums"), Some(vec![1, 2]));
		assert_eq!(args.extract::<String>("word").as_deref(), Some("x"));
	}

	#[tokio::test]
	async fn test_greedy_without_matches() {
		let specs = || {
			vec![
				ParamSpec::new("nums", TypeSpec::greedy(TypeSpec::Int)),
				ParamSpec::new("word", TypeSpec::Str),
			]
		};
		let err = run(specs(), "x", true).await.unwrap_err();
		assert_eq!(err.message(), "Failed to find any arguments for int.");

		let mut with_default = specs();
		with_default[0] = with_default[0].clone().with_default(vec![0i64]);
		let args = run(with_default, "x", true).await.unwrap();
		assert_eq!(args.extract::<Vec<i64>>("nums"), Some(vec![0]));
		assert_eq!(args.extract::<String>("word").as_deref(), Some("x"));
	}

	#[tokio::test]
	async fn test_union_falls_through_to_str() {
		let args = run(
			vec![ParamSpec::new(
				"v",
				TypeSpec::union([TypeSpec::Int, TypeSpec::Str]),
			)],
			"abc",
			true,
		)
		.await
		.unwrap();
		assert_eq!(args.get("v"), Some(&Value::from("abc")));
	}

	#[tokio::test]
	async fn test_union_failure_names_every_candidate() {
		let err = run(
			vec![ParamSpec::new(
				"v",
				TypeSpec::union([TypeSpec::Int, TypeSpec::Float]),
			)],
			"abc",
			true,
		)
		.await
		.unwrap_err();
		assert_eq!(err.message(), "Could not convert \"abc\" into int, or float.");
	}

	#[tokio::test]
	async fn test_optional_failure_offers_token_to_next() {
		let args = run(
			vec![
				ParamSpec::new("n", TypeSpec::optional(TypeSpec::Int)),
				ParamSpec::new("word", TypeSpec::Str),
			],
			"hello",
			true,
		)
		.await
		.unwrap();
		assert_eq!(args.get("n"), Some(&Value::None));
		assert_eq!(args.extract::<String>("word").as_deref(), Some("hello"));
	}

	#[tokio::test]
	async fn test_missing_and_trailing_defaults() {
		let err = run(
			vec![ParamSpec::untyped("a"), ParamSpec::untyped("b")],
			"one",
			true,
		)
		.await
		.unwrap_err();
		assert_eq!(err.message(), "b is a required argument that is missing.");

		let args = run(
			vec![
				ParamSpec::untyped("a"),
				ParamSpec::new("b", TypeSpec::Int).with_default(3),
			],
			"one",
			true,
		)
		.await
		.unwrap();
		assert_eq!(args.extract::<i64>("b"), Some(3));
	}

	#[tokio::test]
	async fn test_too_many_arguments() {
		let specs = || vec![ParamSpec::untyped("a"), ParamSpec::untyped("b")];

		let err = run(specs(), "1 2 3", false).await.unwrap_err();
		assert_eq!(err.message(), "Too many arguments passed to cmd.");

		let args = run(specs(), "1 2 3", true).await.unwrap();
		assert_eq!(args.len(), 2);

		let err = run(Vec::new(), "1", false).await.unwrap_err();
		assert_eq!(err.message(), "Too many arguments passed to cmd.");
	}

	#[tokio::test]
	async fn test_variadic_converts_each_token() {
		let args = run(
			vec![
				ParamSpec::untyped("first"),
				ParamSpec::new("rest", TypeSpec::Int).variadic(),
			],
			"a 1 2 3",
			false,
		)
		.await
		.unwrap();
		assert_eq!(args.extract::<Vec<i64>>("rest"), Some(vec![1, 2, 3]));

		let err = run(
			vec![ParamSpec::new("rest", TypeSpec::Int).variadic()],
			"1 two",
			true,
		)
		.await
		.unwrap_err();
		assert_eq!(err.message(), "\"two\" is not a valid integer.");
	}

	#[tokio::test]
	async fn test_consume_rest_joins_with_single_spaces() {
		let args = run(
			vec![
				ParamSpec::untyped("target"),
				ParamSpec::untyped("text").consume_rest(),
			],
			"bob  hello   \"big world\"",
			false,
		)
		.await
		.unwrap();
		assert_eq!(args.len(), 1);
		assert_eq!(args.rest(), Some(&Value::from("hello big world")));
		assert_eq!(args.extract::<String>("text").as_deref(), Some("hello big world"));
	}

	#[tokio::test]
	async fn test_consume_rest_failure_uses_default() {
		let args = run(
			vec![ParamSpec::new("n", TypeSpec::optional(TypeSpec::Int))
				.with_default(5)
				.consume_rest()],
			"abc def",
			false,
		)
		.await
		.unwrap();
		assert_eq!(args.rest(), Some(&Value::Int(5)));

		let args = run(
			vec![ParamSpec::new("n", TypeSpec::Int).with_default(1).consume_rest()],
			"not a number",
			false,
		)
		.await
		.unwrap();
		assert_eq!(args.extract::<i64>("n"), Some(1));

		let err = run(
			vec![ParamSpec::new("n", TypeSpec::Int).consume_rest()],
			"abc def",
			false,
		)
		.await
		.unwrap_err();
		assert_eq!(err.message(), "\"abc def\" is not a valid integer.");
	}

	#[tokio::test]
	async fn test_literal_returns_token_text() {
		let spec = || vec![ParamSpec::new("side", TypeSpec::literal([1, 2]))];

		let args = run(spec(), "2", true).await.unwrap();
		assert_eq!(args.get("side"), Some(&Value::from("2")));

		let err = run(spec(), "3", true).await.unwrap_err();
		assert_eq!(err.message(), "Could not convert \"3\" into one of 1, or 2.");
	}
}
