use crate::ParamKind;
use crate::Parameter;
use crate::TypeSpec;
use crate::Value;

/// The type shown for a parameter: greedy and optional wrappers removed,
/// annotations reduced to their display type.
fn display_type(ty: &TypeSpec) -> &TypeSpec {
	match ty {
		TypeSpec::Greedy(inner) => display_type(inner),
		TypeSpec::Union(members) if ty.contains_none() => members
			.iter()
			.find(|m| !matches!(m, TypeSpec::NoneType))
			.map_or(ty, display_type),
		TypeSpec::Annotated(display, _) => display_type(display),
		other => other,
	}
}

fn label(param: &Parameter) -> String {
	match display_type(&param.ty) {
		TypeSpec::Literal(choices) => choices
			.iter()
			.map(|choice| match choice {
				Value::Str(s) => format!("\"{s}\""),
				other => other.to_string(),
			})
			.collect::<Vec<_>>()
			.join("|"),
		_ => param.name.clone(),
	}
}

/// POSIX-like usage of a parameter list, e.g. `<user> [reason=spam] <tags...>`.
pub(crate) fn render(params: &[Parameter]) -> String {
	params
		.iter()
		.map(|param| {
			let mut name = label(param);
			let optional = param.default.is_some();
			let (open, close) = if optional { ("[", "]") } else { ("<", ">") };

			if param.kind == ParamKind::Variadic {
				name.push_str("...");
			} else if let Some(default) = param.default.as_ref().filter(|d| !d.is_none()) {
				name.push_str(&format!("={default}"));
			}

			let greedy = if param.kind == ParamKind::Greedy { "..." } else { "" };
			format!("{open}{name}{close}{greedy}")
		})
		.collect::<Vec<_>>()
		.join(" ")
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ParamSpec;
	use crate::converter::ConverterMap;
	use crate::param::build_params;

	fn sig(specs: Vec<ParamSpec>) -> String {
		render(&build_params(specs, &ConverterMap::new()).unwrap())
	}

	#[test]
	fn test_required_and_optional() {
		assert_eq!(
			sig(vec![
				ParamSpec::untyped("user"),
				ParamSpec::untyped("reason").with_default("spam"),
				ParamSpec::new("days", TypeSpec::optional(TypeSpec::Int)),
			]),
			"<user> [reason=spam] [days]"
		);
	}

	#[test]
	fn test_variadic_and_greedy() {
		assert_eq!(
			sig(vec![
				ParamSpec::new("nums", TypeSpec::greedy(TypeSpec::Int)),
				ParamSpec::untyped("tags").variadic(),
			]),
			"<nums>... <tags...>"
		);
	}

	#[test]
	fn test_literal_choices() {
		assert_eq!(
			sig(vec![
				ParamSpec::new("mode", TypeSpec::literal(["on", "off"])),
				ParamSpec::new("size", TypeSpec::optional(TypeSpec::literal([1, 2]))),
			]),
			"<\"on\"|\"off\"> [1|2]"
		);
	}

	#[test]
	fn test_optional_union_shows_first_member() {
		assert_eq!(
			sig(vec![ParamSpec::new(
				"pick",
				TypeSpec::union([
					TypeSpec::literal(["a"]),
					TypeSpec::Int,
					TypeSpec::NoneType
				]),
			)]),
			"[\"a\"]"
		);
	}

	#[test]
	fn test_empty() {
		assert_eq!(sig(Vec::new()), "");
	}
}
