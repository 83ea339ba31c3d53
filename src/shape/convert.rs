use std::collections::{BTreeMap, BTreeSet};

use crate::shape::{Decoded, Literal, RecordValue, Result, ShapeError, Value};

/// Conversion out of a decoded tree into a native Rust value.
///
/// Record types implement this by moving fields out of the [`RecordValue`]
/// with [`RecordValue::take_field`].
pub trait FromDecoded: Sized {
	/// Convert, failing with [`ShapeError::Convert`] on a shape mismatch.
	fn from_decoded(value: Decoded) -> Result<Self>;
}

fn mismatch(expected: &'static str, value: &Decoded) -> ShapeError {
	ShapeError::Convert {
		expected,
		found: value.kind_name(),
	}
}

impl RecordValue {
	/// Move a field out by internal name and convert it.
	pub fn take_field<T: FromDecoded>(&mut self, name: &str) -> Result<T> {
		match self.take(name) {
			Some(value) => T::from_decoded(value),
			None => Err(ShapeError::Convert {
				expected: "record field",
				found: "nothing",
			}),
		}
	}
}

impl FromDecoded for Decoded {
	fn from_decoded(value: Decoded) -> Result<Self> {
		Ok(value)
	}
}

impl FromDecoded for i64 {
	fn from_decoded(value: Decoded) -> Result<Self> {
		match value {
			Decoded::Integer(v) | Decoded::Literal(Literal::Integer(v)) | Decoded::Dynamic(Value::Integer(v)) => Ok(v),
			other => Err(mismatch("i64", &other)),
		}
	}
}

impl FromDecoded for f64 {
	fn from_decoded(value: Decoded) -> Result<Self> {
		match value {
			Decoded::Float(v) | Decoded::Dynamic(Value::Float(v)) => Ok(v),
			other => Err(mismatch("f64", &other)),
		}
	}
}

impl FromDecoded for bool {
	fn from_decoded(value: Decoded) -> Result<Self> {
		match value {
			Decoded::Bool(v) | Decoded::Literal(Literal::Bool(v)) | Decoded::Dynamic(Value::Bool(v)) => Ok(v),
			other => Err(mismatch("bool", &other)),
		}
	}
}

impl FromDecoded for String {
	fn from_decoded(value: Decoded) -> Result<Self> {
		match value {
			Decoded::String(v) | Decoded::Literal(Literal::String(v)) | Decoded::Dynamic(Value::String(v)) => Ok(v.into_string()),
			other => Err(mismatch("String", &other)),
		}
	}
}

impl FromDecoded for Value {
	fn from_decoded(value: Decoded) -> Result<Self> {
		match value {
			Decoded::Dynamic(v) => Ok(v),
			other => Err(mismatch("Value", &other)),
		}
	}
}

impl<T: FromDecoded> FromDecoded for Option<T> {
	fn from_decoded(value: Decoded) -> Result<Self> {
		match value {
			Decoded::Optional(None) | Decoded::Literal(Literal::Null) | Decoded::Dynamic(Value::Null) => Ok(None),
			Decoded::Optional(Some(inner)) => T::from_decoded(*inner).map(Some),
			other => T::from_decoded(other).map(Some),
		}
	}
}

impl<T: FromDecoded> FromDecoded for Vec<T> {
	fn from_decoded(value: Decoded) -> Result<Self> {
		match value {
			Decoded::Sequence(items) | Decoded::Tuple(items) => items.into_iter().map(T::from_decoded).collect(),
			Decoded::Set(items) => items.into_iter().map(T::from_decoded).collect(),
			other => Err(mismatch("Vec", &other)),
		}
	}
}

impl<T: FromDecoded + Ord> FromDecoded for BTreeSet<T> {
	fn from_decoded(value: Decoded) -> Result<Self> {
		match value {
			Decoded::Set(items) => items.into_iter().map(T::from_decoded).collect(),
			Decoded::Sequence(items) => items.into_iter().map(T::from_decoded).collect(),
			other => Err(mismatch("BTreeSet", &other)),
		}
	}
}

impl<T: FromDecoded> FromDecoded for BTreeMap<String, T> {
	fn from_decoded(value: Decoded) -> Result<Self> {
		match value {
			Decoded::Map(entries) => entries
				.into_iter()
				.map(|(key, item)| Ok((key.into_string(), T::from_decoded(item)?)))
				.collect(),
			other => Err(mismatch("BTreeMap", &other)),
		}
	}
}

impl<A: FromDecoded, B: FromDecoded> FromDecoded for (A, B) {
	fn from_decoded(value: Decoded) -> Result<Self> {
		match value {
			Decoded::Tuple(items) | Decoded::Sequence(items) if items.len() == 2 => {
				let mut items = items.into_iter();
				match (items.next(), items.next()) {
					(Some(a), Some(b)) => Ok((A::from_decoded(a)?, B::from_decoded(b)?)),
					_ => Err(ShapeError::Convert {
						expected: "2-tuple",
						found: "tuple",
					}),
				}
			}
			other => Err(mismatch("2-tuple", &other)),
		}
	}
}

impl<A: FromDecoded, B: FromDecoded, C: FromDecoded> FromDecoded for (A, B, C) {
	fn from_decoded(value: Decoded) -> Result<Self> {
		match value {
			Decoded::Tuple(items) | Decoded::Sequence(items) if items.len() == 3 => {
				let mut items = items.into_iter();
				match (items.next(), items.next(), items.next()) {
					(Some(a), Some(b), Some(c)) => Ok((A::from_decoded(a)?, B::from_decoded(b)?, C::from_decoded(c)?)),
					_ => Err(ShapeError::Convert {
						expected: "3-tuple",
						found: "tuple",
					}),
				}
			}
			other => Err(mismatch("3-tuple", &other)),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::collections::{BTreeMap, BTreeSet};

	use serde_json::json;

	use super::FromDecoded;
	use crate::shape::{Decoded, RecordSpec, RecordValue, Resolver, Result, ShapeError, TypeDescriptor, Value, parse_into};

	#[derive(Debug, PartialEq)]
	struct Point {
		x: i64,
		label: Option<String>,
	}

	impl FromDecoded for Point {
		fn from_decoded(value: Decoded) -> Result<Self> {
			let Decoded::Record(mut record) = value else {
				return Err(ShapeError::Convert {
					expected: "Point",
					found: value.kind_name(),
				});
			};
			Ok(Self {
				x: record.take_field("x")?,
				label: record.take_field("label")?,
			})
		}
	}

	#[test]
	fn scalars_and_containers_convert() {
		assert_eq!(i64::from_decoded(Decoded::Integer(4)).expect("i64"), 4);
		assert_eq!(String::from_decoded(Decoded::String("a".into())).expect("String"), "a");
		assert_eq!(Option::<i64>::from_decoded(Decoded::none()).expect("none"), None);

		let seq = Decoded::Sequence(vec![Decoded::Bool(true), Decoded::Bool(false)]);
		assert_eq!(Vec::<bool>::from_decoded(seq).expect("Vec"), vec![true, false]);

		let tuple = Decoded::Tuple(vec![Decoded::Integer(1), Decoded::String("b".into())]);
		assert_eq!(<(i64, String)>::from_decoded(tuple).expect("tuple"), (1, "b".to_owned()));
	}

	#[test]
	fn shape_mismatch_names_both_sides() {
		let err = f64::from_decoded(Decoded::Integer(1)).expect_err("integer is not f64");
		assert!(matches!(err, ShapeError::Convert { expected: "f64", found: "integer" }), "got {err:?}");
	}

	#[test]
	fn records_convert_through_take_field() {
		let resolver = Resolver::new([RecordSpec::named("Point").field("x", "i64").field("label", "Option<String>")]).expect("records resolve");
		let input = Value::from(json!([{"x": 1}, {"x": 2, "label": "two"}]));
		let targets = [TypeDescriptor::record("Point")];
		let points: Vec<Point> = parse_into(&resolver, &input, &targets).expect("decode succeeds");
		assert_eq!(
			points,
			vec![
				Point { x: 1, label: None },
				Point {
					x: 2,
					label: Some("two".to_owned())
				},
			]
		);
	}

	#[test]
	fn maps_and_sets_convert() {
		let resolver = Resolver::default();
		let ty = resolver.resolve("Map<String, Set<i64>>").expect("type resolves");
		let input = Value::from(json!({"a": [3, 1, 3]}));
		let out: BTreeMap<String, BTreeSet<i64>> = parse_into(&resolver, &input, &ty).expect("decode succeeds");
		assert_eq!(out["a"], BTreeSet::from([1, 3]));
	}

	#[test]
	fn missing_field_fails_conversion() {
		let mut record = RecordValue {
			type_name: "Empty".into(),
			style: Default::default(),
			fields: Vec::new(),
		};
		assert!(record.take_field::<i64>("x").is_err());
	}
}
