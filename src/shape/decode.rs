use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::shape::{Decoded, FieldValue, FromDecoded, Location, PrimitiveKind, Resolver, Result, ShapeError, TypeDescriptor, Value};

/// Raw value a record sees for a key missing from its input map.
static MISSING: Value = Value::Null;

/// Runtime limits for decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum recursion depth before the decode is refused.
	pub max_depth: u32,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self { max_depth: 256 }
	}
}

/// What a top-level decode targets.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
	/// Decode the value against one descriptor.
	One(&'a TypeDescriptor),
	/// Homogeneous-list mode: the value must be a sequence and the slice must
	/// hold exactly one descriptor, applied to every element.
	Each(&'a [TypeDescriptor]),
}

impl<'a> From<&'a TypeDescriptor> for Target<'a> {
	fn from(value: &'a TypeDescriptor) -> Self {
		Self::One(value)
	}
}

impl<'a> From<&'a [TypeDescriptor]> for Target<'a> {
	fn from(value: &'a [TypeDescriptor]) -> Self {
		Self::Each(value)
	}
}

impl<'a> From<&'a Vec<TypeDescriptor>> for Target<'a> {
	fn from(value: &'a Vec<TypeDescriptor>) -> Self {
		Self::Each(value)
	}
}

impl<'a, const N: usize> From<&'a [TypeDescriptor; N]> for Target<'a> {
	fn from(value: &'a [TypeDescriptor; N]) -> Self {
		Self::Each(value)
	}
}

/// Decode `value` against `target` with default options.
pub fn parse<'a>(resolver: &Resolver, value: &Value, target: impl Into<Target<'a>>) -> Result<Decoded> {
	parse_with(resolver, value, target, &DecodeOptions::default())
}

/// Decode `value` against `target`.
///
/// Either the whole value conforms and a typed value comes back, or the call
/// fails with the location of the first non-conforming node.
pub fn parse_with<'a>(resolver: &Resolver, value: &Value, target: impl Into<Target<'a>>, opt: &DecodeOptions) -> Result<Decoded> {
	let decoder = Decoder { resolver, opt };
	let root = Location::root();

	match target.into() {
		Target::One(ty) => {
			tracing::debug!(shape = %ty, input = %value.kind(), "decode");
			decoder.decode(value, ty, &root, 0)
		}
		Target::Each(types) => {
			let [ty] = types else {
				return Err(ShapeError::ListTargetArity { count: types.len() });
			};
			let Value::Sequence(items) = value else {
				return Err(ShapeError::UnexpectedType {
					path: root.to_path(),
					expected: format!("sequence of {ty}"),
					actual: value.kind(),
				});
			};
			tracing::debug!(shape = %ty, items = items.len(), "decode each");
			items
				.iter()
				.enumerate()
				.map(|(idx, item)| decoder.decode(item, ty, &root.index(idx), 0))
				.collect::<Result<Vec<_>>>()
				.map(Decoded::Sequence)
		}
	}
}

/// Decode and convert into a native Rust type.
pub fn parse_into<'a, T: FromDecoded>(resolver: &Resolver, value: &Value, target: impl Into<Target<'a>>) -> Result<T> {
	T::from_decoded(parse(resolver, value, target)?)
}

struct Decoder<'r> {
	resolver: &'r Resolver,
	opt: &'r DecodeOptions,
}

impl Decoder<'_> {
	fn decode(&self, value: &Value, ty: &TypeDescriptor, at: &Location<'_>, depth: u32) -> Result<Decoded> {
		if depth >= self.opt.max_depth {
			return Err(ShapeError::DepthExceeded {
				path: at.to_path(),
				max_depth: self.opt.max_depth,
			});
		}
		let depth = depth + 1;

		match ty {
			TypeDescriptor::Dynamic => Ok(Decoded::Dynamic(value.clone())),
			TypeDescriptor::Optional(inner) => {
				if value.is_null() {
					return Ok(Decoded::none());
				}
				self.decode(value, inner, at, depth).map(Decoded::some)
			}
			TypeDescriptor::Primitive(kind) => match (kind, value) {
				(PrimitiveKind::Integer, Value::Integer(v)) => Ok(Decoded::Integer(*v)),
				(PrimitiveKind::Float, Value::Float(v)) => Ok(Decoded::Float(*v)),
				(PrimitiveKind::Boolean, Value::Bool(v)) => Ok(Decoded::Bool(*v)),
				(PrimitiveKind::String, Value::String(v)) => Ok(Decoded::String(v.clone())),
				_ => Err(mismatch(at, ty, value)),
			},
			TypeDescriptor::Sequence(element) => {
				let items = expect_sequence(value, ty, at)?;
				items
					.iter()
					.enumerate()
					.map(|(idx, item)| self.decode(item, element, &at.index(idx), depth))
					.collect::<Result<Vec<_>>>()
					.map(Decoded::Sequence)
			}
			TypeDescriptor::Map(map) => {
				let Value::Map(entries) = value else {
					return Err(mismatch(at, ty, value));
				};
				let mut out = IndexMap::with_capacity(entries.len());
				for (key, item) in entries {
					let decoded = self.decode(item, map.value(), &at.field(key), depth)?;
					out.insert(key.clone(), decoded);
				}
				Ok(Decoded::Map(out))
			}
			TypeDescriptor::Set(element) => {
				let items = expect_sequence(value, ty, at)?;
				items
					.iter()
					.map(|item| self.decode(item, element, at, depth))
					.collect::<Result<BTreeSet<_>>>()
					.map(Decoded::Set)
			}
			TypeDescriptor::Tuple(elements) => {
				let items = expect_sequence(value, ty, at)?;
				if items.len() != elements.len() {
					return Err(ShapeError::InvalidTupleSize {
						path: at.to_path(),
						expected: elements.len(),
						actual: items.len(),
					});
				}
				items
					.iter()
					.zip(elements)
					.map(|(item, element)| self.decode(item, element, at, depth))
					.collect::<Result<Vec<_>>>()
					.map(Decoded::Tuple)
			}
			TypeDescriptor::Union(alternatives) => self.decode_union(value, alternatives, at, depth),
			TypeDescriptor::Literal(allowed) => match allowed.iter().find(|item| item.matches(value)) {
				Some(hit) => Ok(Decoded::Literal(hit.clone())),
				None => Err(ShapeError::NoLiteralVariant {
					path: at.to_path(),
					value: value.clone(),
					allowed: allowed.clone(),
				}),
			},
			TypeDescriptor::Record(name) => self.decode_record(value, ty, name, at, depth),
		}
	}

	/// First alternative that decodes wins; data failures are collected in
	/// declaration order, anything else aborts the trial.
	fn decode_union(&self, value: &Value, alternatives: &[TypeDescriptor], at: &Location<'_>, depth: u32) -> Result<Decoded> {
		let mut attempts = Vec::with_capacity(alternatives.len());
		for (pos, alternative) in alternatives.iter().enumerate() {
			match self.decode(value, alternative, at, depth) {
				Ok(decoded) => return Ok(decoded),
				Err(err) if err.is_data_error() => {
					tracing::trace!(alternative = pos, error = %err, "union alternative rejected");
					attempts.push(err);
				}
				Err(err) => return Err(err),
			}
		}
		Err(ShapeError::NoUnionVariant { path: at.to_path(), attempts })
	}

	/// Keys absent from the input decode as `null`; keys not declared by the
	/// record are ignored.
	fn decode_record(&self, value: &Value, ty: &TypeDescriptor, name: &str, at: &Location<'_>, depth: u32) -> Result<Decoded> {
		let record = self.resolver.record(name)?;
		let Value::Map(entries) = value else {
			return Err(mismatch(at, ty, value));
		};

		let mut fields = Vec::with_capacity(record.fields.len());
		for field in &record.fields {
			let raw = entries.get(field.external_name.as_ref()).unwrap_or(&MISSING);
			let decoded = self.decode(raw, &field.ty, &at.field(&field.external_name), depth)?;
			fields.push(FieldValue {
				name: field.internal_name.clone(),
				value: decoded,
			});
		}

		record.construct(fields, at).map(Decoded::Record)
	}
}

fn expect_sequence<'v>(value: &'v Value, ty: &TypeDescriptor, at: &Location<'_>) -> Result<&'v [Value]> {
	match value {
		Value::Sequence(items) => Ok(items),
		_ => Err(mismatch(at, ty, value)),
	}
}

fn mismatch(at: &Location<'_>, ty: &TypeDescriptor, value: &Value) -> ShapeError {
	ShapeError::UnexpectedType {
		path: at.to_path(),
		expected: ty.to_string(),
		actual: value.kind(),
	}
}
