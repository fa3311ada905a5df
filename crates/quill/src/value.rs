//! Converted argument values.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A converted argument.
///
/// Built-in conversions produce the scalar variants; host converters that
/// resolve richer objects (a user, a channel, ...) wrap them in
/// [`Value::Custom`].
#[derive(Clone)]
pub enum Value {
	None,
	Str(String),
	Int(i64),
	Float(f64),
	Bool(bool),
	List(Vec<Value>),
	Custom(Arc<dyn Any + Send + Sync>),
}

impl Value {
	pub fn custom<T: Any + Send + Sync>(value: T) -> Self {
		Value::Custom(Arc::new(value))
	}

	pub fn is_none(&self) -> bool {
		matches!(self, Value::None)
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::Str(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_int(&self) -> Option<i64> {
		match self {
			Value::Int(i) => Some(*i),
			_ => None,
		}
	}

	pub fn as_float(&self) -> Option<f64> {
		match self {
			Value::Float(f) => Some(*f),
			Value::Int(i) => Some(*i as f64),
			_ => None,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Bool(b) => Some(*b),
			_ => None,
		}
	}

	pub fn as_list(&self) -> Option<&[Value]> {
		match self {
			Value::List(items) => Some(items),
			_ => None,
		}
	}

	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		match self {
			Value::Custom(inner) => inner.downcast_ref::<T>(),
			_ => None,
		}
	}

	/// Short name of the variant, used in diagnostics
	pub fn type_name(&self) -> &'static str {
		match self {
			Value::None => "None",
			Value::Str(_) => "str",
			Value::Int(_) => "int",
			Value::Float(_) => "float",
			Value::Bool(_) => "bool",
			Value::List(_) => "list",
			Value::Custom(_) => "custom",
		}
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Value::None, Value::None) => true,
			(Value::Str(a), Value::Str(b)) => a == b,
			(Value::Int(a), Value::Int(b)) => a == b,
			(Value::Float(a), Value::Float(b)) => a == b,
			(Value::Bool(a), Value::Bool(b)) => a == b,
			(Value::List(a), Value::List(b)) => a == b,
			(Value::Custom(a), Value::Custom(b)) => Arc::ptr_eq(a, b),
			_ => false,
		}
	}
}

impl fmt::Debug for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::None => f.write_str("None"),
			Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
			Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
			Value::Float(x) => f.debug_tuple("Float").field(x).finish(),
			Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
			Value::List(items) => f.debug_tuple("List").field(items).finish(),
			Value::Custom(_) => f.write_str("Custom(..)"),
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::None => f.write_str("None"),
			Value::Str(s) => f.write_str(s),
			Value::Int(i) => write!(f, "{i}"),
			Value::Float(x) => write!(f, "{x}"),
			Value::Bool(b) => write!(f, "{b}"),
			Value::List(items) => {
				f.write_str("[")?;
				for (i, item) in items.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{item}")?;
				}
				f.write_str("]")
			}
			Value::Custom(_) => f.write_str("<custom>"),
		}
	}
}

impl From<&str> for Value {
	fn from(s: &str) -> Self {
		Value::Str(s.to_string())
	}
}

impl From<String> for Value {
	fn from(s: String) -> Self {
		Value::Str(s)
	}
}

impl From<i64> for Value {
	fn from(i: i64) -> Self {
		Value::Int(i)
	}
}

impl From<i32> for Value {
	fn from(i: i32) -> Self {
		Value::Int(i64::from(i))
	}
}

impl From<f64> for Value {
	fn from(x: f64) -> Self {
		Value::Float(x)
	}
}

impl From<bool> for Value {
	fn from(b: bool) -> Self {
		Value::Bool(b)
	}
}

impl<T: Into<Value>> From<Vec<T>> for Value {
	fn from(items: Vec<T>) -> Self {
		Value::List(items.into_iter().map(Into::into).collect())
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map_or(Value::None, Into::into)
	}
}

/// Extraction of a typed value out of a bound argument.
pub trait FromValue: Sized {
	fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
	fn from_value(value: &Value) -> Option<Self> {
		Some(value.clone())
	}
}

impl FromValue for String {
	fn from_value(value: &Value) -> Option<Self> {
		value.as_str().map(str::to_string)
	}
}

impl FromValue for i64 {
	fn from_value(value: &Value) -> Option<Self> {
		value.as_int()
	}
}

impl FromValue for f64 {
	fn from_value(value: &Value) -> Option<Self> {
		value.as_float()
	}
}

impl FromValue for bool {
	fn from_value(value: &Value) -> Option<Self> {
		value.as_bool()
	}
}

impl<T: FromValue> FromValue for Vec<T> {
	fn from_value(value: &Value) -> Option<Self> {
		value.as_list()?.iter().map(T::from_value).collect()
	}
}

impl<T: FromValue> FromValue for Option<T> {
	fn from_value(value: &Value) -> Option<Self> {
		match value {
			Value::None => Some(None),
			other => T::from_value(other).map(Some),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Debug, PartialEq)]
	struct Member(u64);

	#[test]
	fn test_from_value_scalars() {
		assert_eq!(i64::from_value(&Value::Int(3)), Some(3));
		assert_eq!(String::from_value(&Value::from("a")), Some("a".to_string()));
		assert_eq!(bool::from_value(&Value::Int(1)), None);
		assert_eq!(f64::from_value(&Value::Int(2)), Some(2.0));
	}

	#[test]
	fn test_from_value_nested() {
		let list = Value::from(vec![1i64, 2, 3]);
		assert_eq!(Vec::<i64>::from_value(&list), Some(vec![1, 2, 3]));
		assert_eq!(Vec::<String>::from_value(&list), None);
		assert_eq!(Option::<i64>::from_value(&Value::None), Some(None));
		assert_eq!(Option::<i64>::from_value(&Value::Int(4)), Some(Some(4)));
	}

	#[test]
	fn test_custom_values() {
		let value = Value::custom(Member(7));
		assert_eq!(value.downcast_ref::<Member>(), Some(&Member(7)));
		assert_eq!(value.downcast_ref::<String>(), None);
		assert_eq!(value, value.clone());
		assert_ne!(value, Value::custom(Member(7)));
	}

	#[test]
	fn test_display() {
		assert_eq!(Value::from(vec!["a", "b"]).to_string(), "[a, b]");
		assert_eq!(Value::None.to_string(), "None");
		assert_eq!(Value::Bool(true).to_string(), "true");
	}
}
