use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::shape::value::{cmp_float, cmp_unordered};
use crate::shape::{Literal, RecordStyle, Value};

/// Typed value produced by a successful decode.
#[derive(Debug, Clone)]
pub enum Decoded {
	/// `i64`.
	Integer(i64),
	/// `f64`.
	Float(f64),
	/// `bool`.
	Bool(bool),
	/// `String`.
	String(Box<str>),
	/// `Any`: the input value, untouched.
	Dynamic(Value),
	/// `Option<T>`.
	Optional(Option<Box<Decoded>>),
	/// `Vec<T>`.
	Sequence(Vec<Decoded>),
	/// `Map<String, V>`, input key order kept.
	Map(IndexMap<Box<str>, Decoded>),
	/// `Set<T>`.
	Set(BTreeSet<Decoded>),
	/// Fixed-arity tuple.
	Tuple(Vec<Decoded>),
	/// Matched literal constant.
	Literal(Literal),
	/// Constructed record.
	Record(RecordValue),
}

/// Constructed record instance.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct RecordValue {
	/// Record type name.
	pub type_name: Arc<str>,
	/// Authoring style of the record type.
	pub style: RecordStyle,
	/// Fields keyed by internal name, in declaration order.
	pub fields: Vec<FieldValue>,
}

/// Named record field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FieldValue {
	/// Internal field name.
	pub name: Box<str>,
	/// Decoded payload.
	pub value: Decoded,
}

impl RecordValue {
	/// Borrow a field by internal name.
	pub fn get(&self, name: &str) -> Option<&Decoded> {
		self.fields.iter().find(|field| field.name.as_ref() == name).map(|field| &field.value)
	}

	/// Move a field out by internal name.
	pub fn take(&mut self, name: &str) -> Option<Decoded> {
		let pos = self.fields.iter().position(|field| field.name.as_ref() == name)?;
		Some(self.fields.remove(pos).value)
	}

	/// Field values in declaration order, as a positional record sees them.
	pub fn positional_values(&self) -> impl Iterator<Item = &Decoded> {
		self.fields.iter().map(|field| &field.value)
	}
}

impl Decoded {
	/// Short label of the variant.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Self::Integer(_) => "integer",
			Self::Float(_) => "float",
			Self::Bool(_) => "boolean",
			Self::String(_) => "string",
			Self::Dynamic(_) => "dynamic",
			Self::Optional(_) => "optional",
			Self::Sequence(_) => "sequence",
			Self::Map(_) => "map",
			Self::Set(_) => "set",
			Self::Tuple(_) => "tuple",
			Self::Literal(_) => "literal",
			Self::Record(_) => "record",
		}
	}

	/// Present optional value.
	pub fn some(value: Decoded) -> Self {
		Self::Optional(Some(Box::new(value)))
	}

	/// Empty optional value.
	pub fn none() -> Self {
		Self::Optional(None)
	}

	/// Borrow as a record.
	pub fn as_record(&self) -> Option<&RecordValue> {
		match self {
			Self::Record(item) => Some(item),
			_ => None,
		}
	}

	fn rank(&self) -> u8 {
		match self {
			Self::Integer(_) => 0,
			Self::Float(_) => 1,
			Self::Bool(_) => 2,
			Self::String(_) => 3,
			Self::Dynamic(_) => 4,
			Self::Optional(_) => 5,
			Self::Sequence(_) => 6,
			Self::Map(_) => 7,
			Self::Set(_) => 8,
			Self::Tuple(_) => 9,
			Self::Literal(_) => 10,
			Self::Record(_) => 11,
		}
	}
}

impl PartialEq for Decoded {
	fn eq(&self, other: &Self) -> bool {
		self.cmp(other) == Ordering::Equal
	}
}

impl Eq for Decoded {}

impl PartialOrd for Decoded {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Decoded {
	fn cmp(&self, other: &Self) -> Ordering {
		match (self, other) {
			(Self::Integer(a), Self::Integer(b)) => a.cmp(b),
			(Self::Float(a), Self::Float(b)) => cmp_float(*a, *b),
			(Self::Bool(a), Self::Bool(b)) => a.cmp(b),
			(Self::String(a), Self::String(b)) => a.cmp(b),
			(Self::Dynamic(a), Self::Dynamic(b)) => a.cmp(b),
			(Self::Optional(a), Self::Optional(b)) => a.cmp(b),
			(Self::Sequence(a), Self::Sequence(b)) | (Self::Tuple(a), Self::Tuple(b)) => a.cmp(b),
			(Self::Map(a), Self::Map(b)) => cmp_unordered(a, b),
			(Self::Set(a), Self::Set(b)) => a.cmp(b),
			(Self::Literal(a), Self::Literal(b)) => a.cmp(b),
			(Self::Record(a), Self::Record(b)) => a.cmp(b),
			_ => self.rank().cmp(&other.rank()),
		}
	}
}
