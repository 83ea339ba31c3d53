use std::fmt;
use std::sync::Arc;

use crate::shape::{Result, ShapeError, Value};

/// Scalar kinds a primitive descriptor can demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
	/// `i64`.
	Integer,
	/// `f64`.
	Float,
	/// `bool`.
	Boolean,
	/// `String`.
	String,
}

impl PrimitiveKind {
	/// Type-expression spelling.
	pub fn type_name(self) -> &'static str {
		match self {
			Self::Integer => "i64",
			Self::Float => "f64",
			Self::Boolean => "bool",
			Self::String => "String",
		}
	}

	/// Whether `value` is exactly the matching generic variant.
	pub fn accepts(self, value: &Value) -> bool {
		matches!(
			(self, value),
			(Self::Integer, Value::Integer(_)) | (Self::Float, Value::Float(_)) | (Self::Boolean, Value::Bool(_)) | (Self::String, Value::String(_))
		)
	}
}

/// Constant scalar allowed by a literal descriptor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Literal {
	/// `null`.
	Null,
	/// `true` / `false`.
	Bool(bool),
	/// Integer constant.
	Integer(i64),
	/// String constant.
	String(Box<str>),
}

impl Literal {
	/// Exact value equality; `1` never equals `true` and `1` never equals `1.0`.
	pub fn matches(&self, value: &Value) -> bool {
		match (self, value) {
			(Self::Null, Value::Null) => true,
			(Self::Bool(a), Value::Bool(b)) => a == b,
			(Self::Integer(a), Value::Integer(b)) => a == b,
			(Self::String(a), Value::String(b)) => a == b,
			_ => false,
		}
	}
}

impl fmt::Display for Literal {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => f.write_str("null"),
			Self::Bool(v) => write!(f, "{v}"),
			Self::Integer(v) => write!(f, "{v}"),
			Self::String(v) => write!(f, "{v:?}"),
		}
	}
}

/// Associative map shape; keys are always strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MapDescriptor {
	value: Box<TypeDescriptor>,
}

impl MapDescriptor {
	/// Build a map shape, refusing any key descriptor other than `String`.
	pub fn new(key: &TypeDescriptor, value: TypeDescriptor) -> Result<Self> {
		if *key != TypeDescriptor::Primitive(PrimitiveKind::String) {
			return Err(ShapeError::NonStringKey { key: key.to_string() });
		}
		Ok(Self { value: Box::new(value) })
	}

	/// Map shape with string keys and the given value shape.
	pub fn of(value: TypeDescriptor) -> Self {
		Self { value: Box::new(value) }
	}

	/// Key descriptor, always `String`.
	pub fn key(&self) -> &'static TypeDescriptor {
		static KEY: TypeDescriptor = TypeDescriptor::Primitive(PrimitiveKind::String);
		&KEY
	}

	/// Value descriptor.
	pub fn value(&self) -> &TypeDescriptor {
		&self.value
	}
}

/// Normalized description of an expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
	/// Exact scalar kind.
	Primitive(PrimitiveKind),
	/// Any value, passed through unchanged.
	Dynamic,
	/// Value may be null or absent.
	Optional(Box<TypeDescriptor>),
	/// Ordered list of one element shape.
	Sequence(Box<TypeDescriptor>),
	/// String-keyed map of one value shape.
	Map(MapDescriptor),
	/// Sequence input collapsed into a duplicate-free set.
	Set(Box<TypeDescriptor>),
	/// Fixed-arity positional sequence.
	Tuple(Vec<TypeDescriptor>),
	/// Alternatives tried in declaration order.
	Union(Vec<TypeDescriptor>),
	/// Constant scalars, declaration order kept, no duplicates.
	Literal(Vec<Literal>),
	/// Named record resolved through the resolver.
	Record(Arc<str>),
}

impl TypeDescriptor {
	/// `i64`.
	pub const INTEGER: Self = Self::Primitive(PrimitiveKind::Integer);
	/// `f64`.
	pub const FLOAT: Self = Self::Primitive(PrimitiveKind::Float);
	/// `bool`.
	pub const BOOLEAN: Self = Self::Primitive(PrimitiveKind::Boolean);
	/// `String`.
	pub const STRING: Self = Self::Primitive(PrimitiveKind::String);

	/// `Option<inner>`.
	pub fn optional(inner: Self) -> Self {
		Self::Optional(Box::new(inner))
	}

	/// `Vec<element>`.
	pub fn sequence(element: Self) -> Self {
		Self::Sequence(Box::new(element))
	}

	/// `Set<element>`.
	pub fn set(element: Self) -> Self {
		Self::Set(Box::new(element))
	}

	/// `Map<String, value>`.
	pub fn map(value: Self) -> Self {
		Self::Map(MapDescriptor::of(value))
	}

	/// Literal set, dropping repeated constants.
	pub fn literal<I: IntoIterator<Item = Literal>>(allowed: I) -> Self {
		let mut out: Vec<Literal> = Vec::new();
		for item in allowed {
			if !out.contains(&item) {
				out.push(item);
			}
		}
		Self::Literal(out)
	}

	/// Reference to a named record.
	pub fn record(name: &str) -> Self {
		Self::Record(Arc::from(name))
	}
}

impl fmt::Display for TypeDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Primitive(kind) => f.write_str(kind.type_name()),
			Self::Dynamic => f.write_str("Any"),
			Self::Optional(inner) => write!(f, "Option<{inner}>"),
			Self::Sequence(element) => write!(f, "Vec<{element}>"),
			Self::Map(map) => write!(f, "Map<String, {}>", map.value()),
			Self::Set(element) => write!(f, "Set<{element}>"),
			Self::Tuple(elements) => {
				f.write_str("(")?;
				for (pos, element) in elements.iter().enumerate() {
					if pos > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{element}")?;
				}
				if elements.len() == 1 {
					f.write_str(",")?;
				}
				f.write_str(")")
			}
			Self::Union(alternatives) => write_joined(f, alternatives),
			Self::Literal(allowed) => write_joined(f, allowed),
			Self::Record(name) => f.write_str(name),
		}
	}
}

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
	for (pos, item) in items.iter().enumerate() {
		if pos > 0 {
			f.write_str(" | ")?;
		}
		write!(f, "{item}")?;
	}
	Ok(())
}
