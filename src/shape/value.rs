use std::cmp::Ordering;
use std::fmt;

use indexmap::IndexMap;

use crate::shape::{FieldPath, PathStep, Result};

/// Untyped input tree, as produced by a JSON decoder.
///
/// Map entries keep their input order; equality and ordering ignore it.
#[derive(Debug, Clone)]
pub enum Value {
	/// JSON `null`.
	Null,
	/// JSON boolean.
	Bool(bool),
	/// Number written without fraction or exponent.
	Integer(i64),
	/// Number written with fraction or exponent.
	Float(f64),
	/// JSON string.
	String(Box<str>),
	/// Ordered list.
	Sequence(Vec<Value>),
	/// String-keyed object.
	Map(IndexMap<Box<str>, Value>),
}

/// Runtime kind of a [`Value`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
	/// `null`.
	Null,
	/// Boolean.
	Bool,
	/// Integer number.
	Integer,
	/// Floating-point number.
	Float,
	/// String.
	String,
	/// Sequence.
	Sequence,
	/// Map.
	Map,
}

impl ValueKind {
	/// Lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool => "boolean",
			Self::Integer => "integer",
			Self::Float => "float",
			Self::String => "string",
			Self::Sequence => "sequence",
			Self::Map => "map",
		}
	}
}

impl fmt::Display for ValueKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl Value {
	/// Runtime kind of this value.
	pub fn kind(&self) -> ValueKind {
		match self {
			Self::Null => ValueKind::Null,
			Self::Bool(_) => ValueKind::Bool,
			Self::Integer(_) => ValueKind::Integer,
			Self::Float(_) => ValueKind::Float,
			Self::String(_) => ValueKind::String,
			Self::Sequence(_) => ValueKind::Sequence,
			Self::Map(_) => ValueKind::Map,
		}
	}

	/// Parse JSON text into a value tree.
	pub fn from_json_str(text: &str) -> Result<Self> {
		let json: serde_json::Value = serde_json::from_str(text)?;
		Ok(Self::from(json))
	}

	/// Whether this is `null`.
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Build a map value from key/value pairs.
	pub fn map<K, I>(entries: I) -> Self
	where
		K: Into<Box<str>>,
		I: IntoIterator<Item = (K, Value)>,
	{
		Self::Map(entries.into_iter().map(|(key, value)| (key.into(), value)).collect())
	}

	/// Follow a field path into nested maps and sequences.
	pub fn select(&self, path: &FieldPath) -> Option<&Value> {
		let mut current = self;
		for step in &path.steps {
			current = match (step, current) {
				(PathStep::Field(name), Self::Map(entries)) => entries.get(name.as_str())?,
				(PathStep::Index(index), Self::Sequence(items)) => items.get(*index)?,
				_ => return None,
			};
		}
		Some(current)
	}

	fn rank(&self) -> u8 {
		match self {
			Self::Null => 0,
			Self::Bool(_) => 1,
			Self::Integer(_) => 2,
			Self::Float(_) => 3,
			Self::String(_) => 4,
			Self::Sequence(_) => 5,
			Self::Map(_) => 6,
		}
	}
}

impl From<serde_json::Value> for Value {
	/// Unsigned integers above `i64::MAX` become floats.
	fn from(value: serde_json::Value) -> Self {
		match value {
			serde_json::Value::Null => Self::Null,
			serde_json::Value::Bool(v) => Self::Bool(v),
			serde_json::Value::Number(number) => {
				if let Some(v) = number.as_i64() {
					Self::Integer(v)
				} else if let Some(v) = number.as_u64() {
					Self::Float(v as f64)
				} else {
					Self::Float(number.as_f64().unwrap_or(f64::NAN))
				}
			}
			serde_json::Value::String(v) => Self::String(v.into_boxed_str()),
			serde_json::Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
			serde_json::Value::Object(entries) => Self::Map(entries.into_iter().map(|(key, value)| (key.into_boxed_str(), Self::from(value))).collect()),
		}
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::Integer(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::String(value.into())
	}
}

impl From<Vec<Value>> for Value {
	fn from(value: Vec<Value>) -> Self {
		Self::Sequence(value)
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		self.cmp(other) == Ordering::Equal
	}
}

impl Eq for Value {}

impl PartialOrd for Value {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Value {
	fn cmp(&self, other: &Self) -> Ordering {
		match (self, other) {
			(Self::Null, Self::Null) => Ordering::Equal,
			(Self::Bool(a), Self::Bool(b)) => a.cmp(b),
			(Self::Integer(a), Self::Integer(b)) => a.cmp(b),
			(Self::Float(a), Self::Float(b)) => cmp_float(*a, *b),
			(Self::String(a), Self::String(b)) => a.cmp(b),
			(Self::Sequence(a), Self::Sequence(b)) => a.cmp(b),
			(Self::Map(a), Self::Map(b)) => cmp_unordered(a, b),
			_ => self.rank().cmp(&other.rank()),
		}
	}
}

/// Numeric order where `0.0` equals `-0.0`; `total_cmp` only ranks NaN.
pub(crate) fn cmp_float(a: f64, b: f64) -> Ordering {
	if a == b { Ordering::Equal } else { a.total_cmp(&b) }
}

/// Compare two maps as key-sorted entry lists.
pub(crate) fn cmp_unordered<V: Ord>(a: &IndexMap<Box<str>, V>, b: &IndexMap<Box<str>, V>) -> Ordering {
	let mut left: Vec<_> = a.iter().collect();
	let mut right: Vec<_> = b.iter().collect();
	left.sort_by(|x, y| x.0.cmp(y.0));
	right.sort_by(|x, y| x.0.cmp(y.0));
	left.cmp(&right)
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => f.write_str("null"),
			Self::Bool(v) => write!(f, "{v}"),
			Self::Integer(v) => write!(f, "{v}"),
			Self::Float(v) => write!(f, "{v:?}"),
			Self::String(v) => write!(f, "{v:?}"),
			Self::Sequence(items) => {
				f.write_str("[")?;
				for (pos, item) in items.iter().enumerate() {
					if pos > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{item}")?;
				}
				f.write_str("]")
			}
			Self::Map(entries) => {
				f.write_str("{")?;
				for (pos, (key, item)) in entries.iter().enumerate() {
					if pos > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{key:?}: {item}")?;
				}
				f.write_str("}")
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::{Value, ValueKind};
	use crate::shape::FieldPath;

	#[test]
	fn json_numbers_keep_integer_float_split() {
		let value = Value::from(json!([1, 1.0, -7, 2.5e3]));
		let Value::Sequence(items) = value else {
			panic!("expected sequence");
		};
		let kinds: Vec<_> = items.iter().map(Value::kind).collect();
		assert_eq!(kinds, vec![ValueKind::Integer, ValueKind::Float, ValueKind::Integer, ValueKind::Float]);
	}

	#[test]
	fn map_order_is_kept_but_ignored_by_equality() {
		let a = Value::from(json!({"b": 1, "a": 2}));
		let b = Value::from(json!({"a": 2, "b": 1}));
		assert_eq!(a, b);

		let Value::Map(entries) = a else {
			panic!("expected map");
		};
		let keys: Vec<_> = entries.keys().map(|key| key.as_ref()).collect();
		assert_eq!(keys, vec!["b", "a"]);
	}

	#[test]
	fn select_follows_fields_and_indices() {
		let value = Value::from(json!({"orders": [{"id": 1}, {"id": 2}]}));
		let path = FieldPath::parse("orders[1].id").expect("path parses");
		assert_eq!(value.select(&path), Some(&Value::Integer(2)));

		let missing = FieldPath::parse("orders[5]").expect("path parses");
		assert_eq!(value.select(&missing), None);
	}

	#[test]
	fn signed_zeros_compare_equal() {
		assert_eq!(Value::Float(0.0), Value::Float(-0.0));
		assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
		assert!(Value::Float(-1.0) < Value::Float(-0.0));
	}

	#[test]
	fn display_is_json_like() {
		let value = Value::from(json!({"name": "x", "tags": [true, null, 1.5]}));
		assert_eq!(value.to_string(), r#"{"name": "x", "tags": [true, null, 1.5]}"#);
	}
}
