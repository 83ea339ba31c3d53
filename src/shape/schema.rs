use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::shape::{RecordSpec, Resolver, Result, TypeDescriptor};

/// Record types and an optional root type, as stored in a JSON document.
///
/// ```json
/// {
///   "root": "Vec<Person>",
///   "records": [
///     {"name": "Person", "fields": [{"name": "name", "type": "String"}]}
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Schema {
	/// Default type expression for documents checked against this schema.
	#[serde(default)]
	pub root: Option<String>,
	/// Record definitions.
	#[serde(default)]
	pub records: Vec<RecordSpec>,
}

impl Schema {
	/// Parse a schema document from JSON text.
	pub fn from_json_str(text: &str) -> Result<Self> {
		Ok(serde_json::from_str(text)?)
	}

	/// Read and parse a schema document from disk.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let text = fs::read_to_string(path)?;
		Self::from_json_str(&text)
	}

	/// Resolve the records and classify the root type, if one is declared.
	pub fn into_resolver(self) -> Result<(Resolver, Option<TypeDescriptor>)> {
		let resolver = Resolver::new(self.records)?;
		let root = self.root.as_deref().map(|text| resolver.resolve(text)).transpose()?;
		Ok((resolver, root))
	}
}
