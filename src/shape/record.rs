use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::shape::{Decoded, FieldPath, FieldValue, Location, RecordValue, Result, ShapeError, TypeDescriptor};

/// Authoring style of a record type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStyle {
	/// Plain record with named fields; fields may carry an external rename.
	#[default]
	Named,
	/// Fixed-arity positional record; fields are also addressable by name.
	Positional,
}

/// Post-construction check run on every decoded instance of a record.
#[derive(Clone)]
pub struct RecordCheck(Arc<dyn Fn(&RecordValue) -> std::result::Result<(), String> + Send + Sync>);

impl RecordCheck {
	/// Wrap a check closure.
	pub fn new<F>(check: F) -> Self
	where
		F: Fn(&RecordValue) -> std::result::Result<(), String> + Send + Sync + 'static,
	{
		Self(Arc::new(check))
	}

	fn run(&self, value: &RecordValue) -> std::result::Result<(), String> {
		(self.0)(value)
	}
}

impl fmt::Debug for RecordCheck {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("RecordCheck(..)")
	}
}

/// One authored record field.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
	/// Field name inside the program.
	pub name: String,
	/// External (wire) name override.
	#[serde(default)]
	pub rename: Option<String>,
	/// Type expression text.
	#[serde(rename = "type")]
	pub ty: String,
}

/// Authored record type, registered with the resolver.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordSpec {
	/// Record type name.
	pub name: String,
	/// Authoring style.
	#[serde(default)]
	pub style: RecordStyle,
	/// Fields in declaration order.
	pub fields: Vec<FieldSpec>,
	/// Optional construction check.
	#[serde(skip)]
	pub check: Option<RecordCheck>,
}

impl RecordSpec {
	/// Start a plain named-field record.
	pub fn named(name: &str) -> Self {
		Self {
			name: name.to_owned(),
			style: RecordStyle::Named,
			fields: Vec::new(),
			check: None,
		}
	}

	/// Start a fixed-arity positional record.
	pub fn positional(name: &str) -> Self {
		Self {
			style: RecordStyle::Positional,
			..Self::named(name)
		}
	}

	/// Append a field whose external name equals its program name.
	pub fn field(mut self, name: &str, ty: &str) -> Self {
		self.fields.push(FieldSpec {
			name: name.to_owned(),
			rename: None,
			ty: ty.to_owned(),
		});
		self
	}

	/// Append a field read from a different external name.
	pub fn renamed_field(mut self, name: &str, external: &str, ty: &str) -> Self {
		self.fields.push(FieldSpec {
			name: name.to_owned(),
			rename: Some(external.to_owned()),
			ty: ty.to_owned(),
		});
		self
	}

	/// Attach a construction check.
	pub fn with_check<F>(mut self, check: F) -> Self
	where
		F: Fn(&RecordValue) -> std::result::Result<(), String> + Send + Sync + 'static,
	{
		self.check = Some(RecordCheck::new(check));
		self
	}
}

/// Resolved field: external name, internal name and descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
	/// Name looked up in the input map.
	pub external_name: Box<str>,
	/// Name used in the constructed record.
	pub internal_name: Box<str>,
	/// Field shape.
	pub ty: TypeDescriptor,
}

/// Resolved record type.
#[derive(Debug, Clone)]
pub struct RecordDescriptor {
	/// Record type name.
	pub name: Arc<str>,
	/// Authoring style.
	pub style: RecordStyle,
	/// Fields in declaration order.
	pub fields: Vec<FieldDescriptor>,
	pub(crate) check: Option<RecordCheck>,
}

impl RecordDescriptor {
	/// Look up a field by external name.
	pub fn field(&self, external_name: &str) -> Option<&FieldDescriptor> {
		self.fields.iter().find(|field| field.external_name.as_ref() == external_name)
	}

	/// Whether a construction check is attached.
	pub fn has_check(&self) -> bool {
		self.check.is_some()
	}

	/// Build an instance from internal-name/value pairs, running the check.
	pub(crate) fn construct(&self, fields: Vec<FieldValue>, at: &Location<'_>) -> Result<RecordValue> {
		let value = RecordValue {
			type_name: Arc::clone(&self.name),
			style: self.style,
			fields,
		};
		if let Some(check) = &self.check {
			check.run(&value).map_err(|reason| ShapeError::RecordRejected {
				path: at.to_path(),
				record: self.name.to_string(),
				reason,
			})?;
		}
		Ok(value)
	}

	/// Build an instance from values in declaration order.
	///
	/// Values are taken as already decoded; only arity and the construction
	/// check are enforced.
	pub fn construct_positional(&self, values: Vec<Decoded>) -> Result<RecordValue> {
		if values.len() != self.fields.len() {
			return Err(ShapeError::InvalidTupleSize {
				path: FieldPath::root(),
				expected: self.fields.len(),
				actual: values.len(),
			});
		}
		let fields = self
			.fields
			.iter()
			.zip(values)
			.map(|(field, value)| FieldValue {
				name: field.internal_name.clone(),
				value,
			})
			.collect();
		self.construct(fields, &Location::root())
	}
}
