//! Declared parameter shapes and the descriptors built from them.

mod builder;

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub(crate) use builder::build_params;

use crate::BoxError;
use crate::Context;
use crate::Converter;
use crate::Value;
use crate::converter::ConvertFn;

/// The declared type of a parameter.
#[derive(Clone)]
pub enum TypeSpec {
	/// No declared type; the token is passed through.
	Any,
	Str,
	Int,
	Float,
	Bool,
	/// The "no value" member of an optional union.
	NoneType,
	/// A host type, resolved through the converter registry.
	Named(Cow<'static, str>),
	/// A host type with its own parser used when no converter is registered.
	Parsed {
		name: Cow<'static, str>,
		parse: Arc<dyn Fn(&str) -> Result<Value, BoxError> + Send + Sync>,
	},
	/// One of a fixed set of values.
	Literal(Vec<Value>),
	/// Candidates tried in order; the first that converts wins.
	Union(Vec<TypeSpec>),
	/// Consume tokens for as long as they convert.
	Greedy(Box<TypeSpec>),
	/// Display type plus metadata; a single metadata entry is the converter.
	Annotated(Box<TypeSpec>, Vec<TypeSpec>),
	/// Use this converter as is.
	Converter(Arc<dyn Converter>),
	/// Build a converter when the command is registered.
	Factory(fn() -> Arc<dyn Converter>),
	/// A plain function.
	Function(ConvertFn),
}

fn make_default<C: Converter + Default + 'static>() -> Arc<dyn Converter> {
	Arc::new(C::default())
}

impl TypeSpec {
	pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
		TypeSpec::Named(name.into())
	}

	/// A host type parsed with its `FromStr` impl, stored as
	/// [`Value::Custom`].
	pub fn parsed<T>(name: impl Into<Cow<'static, str>>) -> Self
	where
		T: FromStr + Send + Sync + 'static,
		T::Err: fmt::Display,
	{
		let parse = |token: &str| -> Result<Value, BoxError> {
			token
				.parse::<T>()
				.map(Value::custom)
				.map_err(|e| e.to_string().into())
		};
		TypeSpec::Parsed {
			name: name.into(),
			parse: Arc::new(parse),
		}
	}

	pub fn literal<I, V>(choices: I) -> Self
	where
		I: IntoIterator<Item = V>,
		V: Into<Value>,
	{
		TypeSpec::Literal(choices.into_iter().map(Into::into).collect())
	}

	pub fn union(members: impl IntoIterator<Item = TypeSpec>) -> Self {
		TypeSpec::Union(members.into_iter().collect())
	}

	/// `Union[inner, None]`
	pub fn optional(inner: TypeSpec) -> Self {
		TypeSpec::Union(vec![inner, TypeSpec::NoneType])
	}

	pub fn greedy(inner: TypeSpec) -> Self {
		TypeSpec::Greedy(Box::new(inner))
	}

	pub fn annotated(display: TypeSpec, converter: TypeSpec) -> Self {
		TypeSpec::Annotated(Box::new(display), vec![converter])
	}

	pub fn converter(converter: impl Converter + 'static) -> Self {
		TypeSpec::Converter(Arc::new(converter))
	}

	/// A converter type instantiated with `Default` at registration.
	pub fn converter_type<C: Converter + Default + 'static>() -> Self {
		TypeSpec::Factory(make_default::<C>)
	}

	pub fn from_fn0(f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
		TypeSpec::Function(ConvertFn::Static(Arc::new(f)))
	}

	pub fn from_fn1(
		f: impl Fn(&str) -> Result<Value, BoxError> + Send + Sync + 'static,
	) -> Self {
		TypeSpec::Function(ConvertFn::Token(Arc::new(f)))
	}

	pub fn from_fn2(
		f: impl Fn(&Context, &str) -> Result<Value, BoxError> + Send + Sync + 'static,
	) -> Self {
		TypeSpec::Function(ConvertFn::Contextual(Arc::new(f)))
	}

	/// Key under which converters for this type are registered.
	pub fn key(&self) -> Option<&str> {
		match self {
			TypeSpec::Str => Some("str"),
			TypeSpec::Int => Some("int"),
			TypeSpec::Float => Some("float"),
			TypeSpec::Bool => Some("bool"),
			TypeSpec::Named(name) | TypeSpec::Parsed { name, .. } => Some(name.as_ref()),
			_ => None,
		}
	}

	/// Human readable name used in error messages.
	pub fn name(&self) -> String {
		match self {
			TypeSpec::Any => "str".to_string(),
			TypeSpec::NoneType => "None".to_string(),
			TypeSpec::Literal(choices) => {
				let choices: Vec<String> = choices.iter().map(ToString::to_string).collect();
				format!("Literal[{}]", choices.join(", "))
			}
			TypeSpec::Union(members) => {
				let members: Vec<String> = members.iter().map(TypeSpec::name).collect();
				format!("Union[{}]", members.join(", "))
			}
			TypeSpec::Greedy(inner) => format!("Greedy[{}]", inner.name()),
			TypeSpec::Annotated(display, _) => display.name(),
			TypeSpec::Converter(_) | TypeSpec::Factory(_) => "converter".to_string(),
			TypeSpec::Function(_) => "function".to_string(),
			other => other.key().unwrap_or_default().to_string(),
		}
	}

	pub(crate) fn contains_none(&self) -> bool {
		match self {
			TypeSpec::Union(members) => members.iter().any(|m| matches!(m, TypeSpec::NoneType)),
			_ => false,
		}
	}
}

impl fmt::Debug for TypeSpec {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.name())
	}
}

/// How a declared parameter takes its tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamMode {
	/// One token, or several for a greedy type.
	#[default]
	Positional,
	/// Every remaining token, each converted on its own.
	Variadic,
	/// The remaining text joined into one string; passed by name.
	ConsumeRest,
}

/// A parameter as declared by the command author.
#[derive(Debug, Clone)]
pub struct ParamSpec {
	pub(crate) name: String,
	pub(crate) ty: TypeSpec,
	pub(crate) default: Option<Value>,
	pub(crate) mode: ParamMode,
}

impl ParamSpec {
	pub fn new(name: impl Into<String>, ty: TypeSpec) -> Self {
		Self {
			name: name.into(),
			ty,
			default: None,
			mode: ParamMode::Positional,
		}
	}

	/// A parameter without a declared type.
	pub fn untyped(name: impl Into<String>) -> Self {
		Self::new(name, TypeSpec::Any)
	}

	pub fn with_default(mut self, default: impl Into<Value>) -> Self {
		self.default = Some(default.into());
		self
	}

	pub fn variadic(mut self) -> Self {
		self.mode = ParamMode::Variadic;
		self
	}

	pub fn consume_rest(mut self) -> Self {
		self.mode = ParamMode::ConsumeRest;
		self
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
	Plain,
	Union,
	Greedy,
	Variadic,
	ConsumeRest,
}

/// A parameter with its converter chain resolved.
#[derive(Clone)]
pub struct Parameter {
	pub(crate) name: String,
	pub(crate) ty: TypeSpec,
	pub(crate) default: Option<Value>,
	pub(crate) converters: Vec<Arc<dyn Converter>>,
	pub(crate) kind: ParamKind,
	pub(crate) union: bool,
}

impl Parameter {
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn type_spec(&self) -> &TypeSpec {
		&self.ty
	}

	pub fn default(&self) -> Option<&Value> {
		self.default.as_ref()
	}

	pub fn kind(&self) -> ParamKind {
		self.kind
	}

	pub fn is_optional(&self) -> bool {
		self.default.is_some()
	}

	/// Whether the declared type is a union, even if it is greedy.
	pub fn is_union(&self) -> bool {
		self.union
	}

	pub fn converter_count(&self) -> usize {
		self.converters.len()
	}

	/// Names of the union candidates, excluding `None`.
	pub(crate) fn candidate_names(&self) -> Vec<String> {
		let ty = match &self.ty {
			TypeSpec::Greedy(inner) => inner,
			other => other,
		};
		match ty {
			TypeSpec::Union(members) => members
				.iter()
				.filter(|m| !matches!(m, TypeSpec::NoneType))
				.map(TypeSpec::name)
				.collect(),
			other => vec![other.name()],
		}
	}
}

impl fmt::Debug for Parameter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Parameter")
			.field("name", &self.name)
			.field("ty", &self.ty)
			.field("default", &self.default)
			.field("kind", &self.kind)
			.field("converters", &self.converters.len())
			.finish()
	}
}
