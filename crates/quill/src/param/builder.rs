use std::sync::Arc;

use tracing::debug;

use super::ParamKind;
use super::ParamMode;
use super::ParamSpec;
use super::Parameter;
use super::TypeSpec;
use crate::Converter;
use crate::RegistrationError;
use crate::Value;
use crate::converter::ConverterMap;
use crate::converter::resolve;

/// Turn declared parameters into descriptors with resolved converter chains.
pub(crate) fn build_params(
	specs: Vec<ParamSpec>,
	converters: &ConverterMap,
) -> Result<Vec<Parameter>, RegistrationError> {
	let count = specs.len();
	let mut params = Vec::with_capacity(count);

	for (index, spec) in specs.iter().enumerate() {
		if spec.mode != ParamMode::Positional
			&& let Some(next) = specs.get(index + 1)
		{
			return Err(RegistrationError::NotLast {
				param: spec.name.clone(),
				next: next.name.clone(),
			});
		}
		params.push(build_one(spec.clone(), converters)?);
	}

	debug!("built {} parameter descriptor(s)", params.len());
	Ok(params)
}

fn build_one(spec: ParamSpec, converters: &ConverterMap) -> Result<Parameter, RegistrationError> {
	let ParamSpec {
		name,
		ty,
		mut default,
		mode,
	} = spec;

	if mode == ParamMode::Variadic && (default.is_some() || ty.contains_none()) {
		return Err(RegistrationError::OptionalVariadic(name));
	}

	let (target, greedy) = match &ty {
		TypeSpec::Greedy(inner) => {
			if mode != ParamMode::Positional {
				return Err(RegistrationError::GreedyMode(name));
			}
			check_greedy_target(&name, inner)?;
			if default.as_ref().is_some_and(|d| !matches!(d, Value::List(_))) {
				return Err(RegistrationError::GreedyDefault(name));
			}
			(inner.as_ref(), true)
		}
		other => (other, false),
	};

	let (chain, union) = match target {
		TypeSpec::Union(members) => {
			let mut chain: Vec<Arc<dyn Converter>> = Vec::with_capacity(members.len());
			for member in members {
				if !matches!(member, TypeSpec::NoneType) {
					chain.push(resolve(member, &name, converters)?);
				}
			}
			if target.contains_none() && default.is_none() {
				default = Some(Value::None);
			}
			(chain, true)
		}
		single => (vec![resolve(single, &name, converters)?], false),
	};

	let kind = match mode {
		ParamMode::Variadic => ParamKind::Variadic,
		ParamMode::ConsumeRest => ParamKind::ConsumeRest,
		ParamMode::Positional if greedy => ParamKind::Greedy,
		ParamMode::Positional if union => ParamKind::Union,
		ParamMode::Positional => ParamKind::Plain,
	};

	Ok(Parameter {
		name,
		ty,
		default,
		converters: chain,
		kind,
		union,
	})
}

fn check_greedy_target(param: &str, inner: &TypeSpec) -> Result<(), RegistrationError> {
	let invalid = match inner {
		TypeSpec::Any | TypeSpec::Str | TypeSpec::NoneType | TypeSpec::Greedy(_) => true,
		union @ TypeSpec::Union(_) => union.contains_none(),
		TypeSpec::Annotated(_, meta) => match meta.as_slice() {
			[converter] => return check_greedy_target(param, converter),
			_ => false,
		},
		_ => false,
	};
	if invalid {
		return Err(RegistrationError::InvalidGreedy {
			param: param.to_string(),
			ty: inner.name(),
		});
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	fn build(specs: Vec<ParamSpec>) -> Result<Vec<Parameter>, RegistrationError> {
		build_params(specs, &ConverterMap::new())
	}

	#[test]
	fn test_kinds() {
		let params = build(vec![
			ParamSpec::new("a", TypeSpec::Int),
			ParamSpec::new("b", TypeSpec::union([TypeSpec::Int, TypeSpec::Str])),
			ParamSpec::new("c", TypeSpec::greedy(TypeSpec::Float)),
			ParamSpec::untyped("d").variadic(),
		])
		.unwrap();

		let kinds: Vec<ParamKind> = params.iter().map(Parameter::kind).collect();
		assert_eq!(
			kinds,
			[
				ParamKind::Plain,
				ParamKind::Union,
				ParamKind::Greedy,
				ParamKind::Variadic
			]
		);
		assert_eq!(params[1].converter_count(), 2);
		assert!(!params[0].is_optional());
	}

	#[test]
	fn test_optional_union_gets_implicit_none_default() {
		let params = build(vec![ParamSpec::new("n", TypeSpec::optional(TypeSpec::Int))]).unwrap();
		assert_eq!(params[0].default(), Some(&Value::None));
		assert_eq!(params[0].converter_count(), 1);
		assert!(params[0].is_union());
	}

	#[test]
	fn test_explicit_default_is_kept() {
		let params = build(vec![
			ParamSpec::new("n", TypeSpec::optional(TypeSpec::Int)).with_default(5),
		])
		.unwrap();
		assert_eq!(params[0].default(), Some(&Value::Int(5)));
	}

	#[test]
	fn test_greedy_may_be_followed() {
		let params = build(vec![
			ParamSpec::new("nums", TypeSpec::greedy(TypeSpec::Int)),
			ParamSpec::new("rest", TypeSpec::Str),
		]);
		assert!(params.is_ok());
	}

	#[rstest]
	#[case(TypeSpec::Str)]
	#[case(TypeSpec::Any)]
	#[case(TypeSpec::NoneType)]
	#[case(TypeSpec::optional(TypeSpec::Int))]
	#[case(TypeSpec::greedy(TypeSpec::Int))]
	#[case(TypeSpec::annotated(TypeSpec::Int, TypeSpec::Str))]
	#[case(TypeSpec::annotated(TypeSpec::Int, TypeSpec::optional(TypeSpec::Int)))]
	fn test_invalid_greedy_targets(#[case] inner: TypeSpec) {
		let err = build(vec![ParamSpec::new("g", TypeSpec::greedy(inner))]).unwrap_err();
		assert!(matches!(err, RegistrationError::InvalidGreedy { .. }));
	}

	#[test]
	fn test_annotated_greedy_target_uses_its_converter() {
		let params = build(vec![ParamSpec::new(
			"g",
			TypeSpec::greedy(TypeSpec::annotated(TypeSpec::Str, TypeSpec::Int)),
		)]);
		assert!(params.is_ok());
	}

	#[test]
	fn test_greedy_default_must_be_list() {
		let err = build(vec![
			ParamSpec::new("g", TypeSpec::greedy(TypeSpec::Int)).with_default(1),
		])
		.unwrap_err();
		assert_eq!(err, RegistrationError::GreedyDefault("g".to_string()));

		let ok = build(vec![
			ParamSpec::new("g", TypeSpec::greedy(TypeSpec::Int)).with_default(Vec::<i64>::new()),
		]);
		assert!(ok.is_ok());
	}

	#[test]
	fn test_greedy_cannot_be_variadic() {
		let err = build(vec![
			ParamSpec::new("g", TypeSpec::greedy(TypeSpec::Int)).variadic(),
		])
		.unwrap_err();
		assert_eq!(err, RegistrationError::GreedyMode("g".to_string()));
	}

	#[rstest]
	#[case(ParamSpec::untyped("v").variadic().with_default("x"))]
	#[case(ParamSpec::new("v", TypeSpec::optional(TypeSpec::Int)).variadic())]
	fn test_optional_variadic_rejected(#[case] spec: ParamSpec) {
		let err = build(vec![spec]).unwrap_err();
		assert_eq!(err, RegistrationError::OptionalVariadic("v".to_string()));
	}

	#[rstest]
	#[case(ParamSpec::untyped("v").variadic())]
	#[case(ParamSpec::untyped("v").consume_rest())]
	fn test_rest_must_be_last(#[case] spec: ParamSpec) {
		let err = build(vec![spec, ParamSpec::untyped("after")]).unwrap_err();
		assert_eq!(
			err,
			RegistrationError::NotLast {
				param: "v".to_string(),
				next: "after".to_string()
			}
		);
	}

	#[test]
	fn test_unresolvable_named_type() {
		let err = build(vec![ParamSpec::new("who", TypeSpec::named("Member"))]).unwrap_err();
		assert!(matches!(err, RegistrationError::UnknownType { .. }));
	}
}
