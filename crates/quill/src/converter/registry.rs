use std::collections::HashMap;
use std::sync::Arc;

use super::Converter;
use super::FnConverter;
use super::LiteralConverter;
use super::builtin::BoolConverter;
use super::builtin::FloatConverter;
use super::builtin::IdentityConverter;
use super::builtin::IntConverter;
use super::builtin::ParseConverter;
use crate::RegistrationError;
use crate::TypeSpec;

/// Type key to converter.
pub type ConverterMap = HashMap<String, Arc<dyn Converter>>;

/// Converters registered by type name, shared by every command of a
/// dispatcher. Per-command overrides are layered on top with
/// [`ConverterRegistry::merged`].
#[derive(Clone, Default)]
pub struct ConverterRegistry {
	converters: ConverterMap,
}

impl ConverterRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register `converter` for `key`, replacing any previous entry.
	pub fn register(&mut self, key: impl Into<String>, converter: Arc<dyn Converter>) {
		self.converters.insert(key.into(), converter);
	}

	pub fn get(&self, key: &str) -> Option<&Arc<dyn Converter>> {
		self.converters.get(key)
	}

	pub fn contains(&self, key: &str) -> bool {
		self.converters.contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.converters.len()
	}

	pub fn is_empty(&self) -> bool {
		self.converters.is_empty()
	}

	/// Global entries overlaid with `overrides`; overrides win.
	pub fn merged(&self, overrides: &ConverterMap) -> ConverterMap {
		let mut map = self.converters.clone();
		map.extend(overrides.iter().map(|(k, v)| (k.clone(), Arc::clone(v))));
		map
	}
}

/// Resolve a single (non-union, non-greedy) type into its converter.
pub(crate) fn resolve(
	spec: &TypeSpec,
	param: &str,
	converters: &ConverterMap,
) -> Result<Arc<dyn Converter>, RegistrationError> {
	let spec = match spec {
		TypeSpec::Annotated(_, metadata) => match metadata.as_slice() {
			[converter] => converter,
			_ => return Err(RegistrationError::AnnotationArity(param.to_string())),
		},
		other => other,
	};

	match spec {
		TypeSpec::Converter(converter) => return Ok(Arc::clone(converter)),
		TypeSpec::Factory(make) => return Ok(make()),
		_ => {}
	}

	if let Some(converter) = spec.key().and_then(|key| converters.get(key)) {
		return Ok(Arc::clone(converter));
	}

	let converter: Arc<dyn Converter> = match spec {
		TypeSpec::Literal(choices) => Arc::new(LiteralConverter::new(choices.clone())),
		TypeSpec::Function(f) => Arc::new(FnConverter(f.clone())),
		TypeSpec::Bool => Arc::new(BoolConverter),
		TypeSpec::Any | TypeSpec::Str => Arc::new(IdentityConverter),
		TypeSpec::Int => Arc::new(IntConverter),
		TypeSpec::Float => Arc::new(FloatConverter),
		TypeSpec::Parsed { parse, .. } => Arc::new(ParseConverter(Arc::clone(parse))),
		TypeSpec::Named(name) => {
			return Err(RegistrationError::UnknownType {
				param: param.to_string(),
				ty: name.to_string(),
			});
		}
		other => {
			return Err(RegistrationError::Unsupported {
				param: param.to_string(),
				ty: other.name(),
			});
		}
	};
	Ok(converter)
}
