use std::collections::HashMap;
use std::sync::Arc;

use crate::shape::{
	FieldDescriptor, Literal, MapDescriptor, PrimitiveKind, RecordDescriptor, RecordSpec, Result, ShapeError, TypeDescriptor, TypeExpr,
};

/// Names the type vocabulary claims for itself.
const RESERVED_NAMES: &[&str] = &["i64", "f64", "bool", "String", "Any", "Option", "Vec", "Map", "Set", "true", "false", "null"];

/// Registry of resolved record types and classifier for type expressions.
///
/// Immutable once built, so one resolver can serve any number of concurrent
/// decodes.
#[derive(Debug, Default)]
pub struct Resolver {
	index: HashMap<Arc<str>, usize>,
	records: Vec<RecordDescriptor>,
}

impl Resolver {
	/// Register and resolve record types.
	///
	/// All names are registered before any field is classified, so records
	/// may refer to themselves and to each other in any order. Each record is
	/// resolved exactly once.
	pub fn new<I>(specs: I) -> Result<Self>
	where
		I: IntoIterator<Item = RecordSpec>,
	{
		let specs: Vec<RecordSpec> = specs.into_iter().collect();
		let mut resolver = Self::default();

		for (idx, spec) in specs.iter().enumerate() {
			if RESERVED_NAMES.contains(&spec.name.as_str()) {
				return Err(ShapeError::ReservedTypeName { name: spec.name.clone() });
			}
			if !is_identifier(&spec.name) {
				return Err(ShapeError::InvalidTypeExpr {
					expr: spec.name.clone(),
					at: 0,
					reason: "record name is not an identifier",
				});
			}
			if resolver.index.insert(Arc::from(spec.name.as_str()), idx).is_some() {
				return Err(ShapeError::DuplicateRecord { name: spec.name.clone() });
			}
		}

		let mut records = Vec::with_capacity(specs.len());
		for spec in specs {
			records.push(resolver.resolve_record(spec)?);
		}
		resolver.records = records;

		tracing::debug!(records = resolver.records.len(), "record types resolved");
		Ok(resolver)
	}

	/// Parse and classify type expression text.
	pub fn resolve(&self, text: &str) -> Result<TypeDescriptor> {
		self.classify(&TypeExpr::parse(text)?)
	}

	/// Map a type expression onto the descriptor vocabulary.
	pub fn classify(&self, expr: &TypeExpr) -> Result<TypeDescriptor> {
		match expr {
			TypeExpr::Name(name) => self.classify_name(name),
			TypeExpr::Apply { name, args } => match name.as_str() {
				"Option" => Ok(TypeDescriptor::optional(self.classify(single_arg(name, args)?)?)),
				"Vec" => Ok(TypeDescriptor::sequence(self.classify(single_arg(name, args)?)?)),
				"Set" => Ok(TypeDescriptor::set(self.classify(single_arg(name, args)?)?)),
				"Map" => {
					let [key, value] = args.as_slice() else {
						return Err(ShapeError::InvalidTypeArity {
							name: name.clone(),
							expected: 2,
							actual: args.len(),
						});
					};
					let key = self.classify(key)?;
					let value = self.classify(value)?;
					Ok(TypeDescriptor::Map(MapDescriptor::new(&key, value)?))
				}
				_ => Err(ShapeError::UnsupportedType { name: name.clone() }),
			},
			TypeExpr::Tuple(items) => Ok(TypeDescriptor::Tuple(items.iter().map(|item| self.classify(item)).collect::<Result<_>>()?)),
			TypeExpr::Union(alternatives) => self.classify_union(alternatives),
			TypeExpr::Literal(value) => Ok(TypeDescriptor::Literal(vec![value.clone()])),
		}
	}

	/// Ordered field table of a record: external name, internal name, shape.
	pub fn record_fields(&self, name: &str) -> Result<&[FieldDescriptor]> {
		Ok(&self.record(name)?.fields)
	}

	/// Look up a resolved record type.
	pub fn record(&self, name: &str) -> Result<&RecordDescriptor> {
		self.index
			.get(name)
			.and_then(|idx| self.records.get(*idx))
			.ok_or_else(|| ShapeError::UnknownRecord { name: name.to_owned() })
	}

	/// Resolved record types in registration order.
	pub fn records(&self) -> impl Iterator<Item = &RecordDescriptor> {
		self.records.iter()
	}

	fn classify_name(&self, name: &str) -> Result<TypeDescriptor> {
		match name {
			"i64" => Ok(TypeDescriptor::Primitive(PrimitiveKind::Integer)),
			"f64" => Ok(TypeDescriptor::Primitive(PrimitiveKind::Float)),
			"bool" => Ok(TypeDescriptor::Primitive(PrimitiveKind::Boolean)),
			"String" => Ok(TypeDescriptor::Primitive(PrimitiveKind::String)),
			"Any" => Ok(TypeDescriptor::Dynamic),
			"Vec" => Ok(TypeDescriptor::sequence(TypeDescriptor::Dynamic)),
			"Set" => Ok(TypeDescriptor::set(TypeDescriptor::Dynamic)),
			"Map" => Ok(TypeDescriptor::map(TypeDescriptor::Dynamic)),
			"Option" => Err(ShapeError::InvalidTypeArity {
				name: name.to_owned(),
				expected: 1,
				actual: 0,
			}),
			_ => match self.index.get_key_value(name) {
				Some((key, _)) => Ok(TypeDescriptor::Record(Arc::clone(key))),
				None => Err(ShapeError::UnsupportedType { name: name.to_owned() }),
			},
		}
	}

	/// A `null` alternative makes the union optional; all-literal unions merge
	/// into one literal set.
	fn classify_union(&self, alternatives: &[TypeExpr]) -> Result<TypeDescriptor> {
		let mut nullable = false;
		let mut rest = Vec::with_capacity(alternatives.len());
		for alternative in alternatives {
			if *alternative == TypeExpr::Literal(Literal::Null) {
				nullable = true;
				continue;
			}
			match self.classify(alternative)? {
				TypeDescriptor::Union(nested) => rest.extend(nested),
				other => rest.push(other),
			}
		}

		let inner = if rest.is_empty() {
			TypeDescriptor::Literal(vec![Literal::Null])
		} else if rest.len() == 1 {
			rest.pop().unwrap_or(TypeDescriptor::Dynamic)
		} else if rest.iter().all(|item| matches!(item, TypeDescriptor::Literal(_))) {
			TypeDescriptor::literal(rest.into_iter().flat_map(|item| match item {
				TypeDescriptor::Literal(values) => values,
				_ => Vec::new(),
			}))
		} else {
			TypeDescriptor::Union(rest)
		};

		if nullable && !rest_is_null(&inner) {
			return Ok(TypeDescriptor::optional(inner));
		}
		Ok(inner)
	}

	fn resolve_record(&self, spec: RecordSpec) -> Result<RecordDescriptor> {
		let mut fields: Vec<FieldDescriptor> = Vec::with_capacity(spec.fields.len());
		for field in &spec.fields {
			let in_field = |source: ShapeError| ShapeError::InField {
				record: spec.name.clone(),
				field: field.name.clone(),
				source: Box::new(source),
			};
			let ty = self.resolve(&field.ty).map_err(in_field)?;
			let external = field.rename.as_deref().unwrap_or(&field.name);

			let duplicate = if fields.iter().any(|item| item.external_name.as_ref() == external) {
				Some(external)
			} else if fields.iter().any(|item| item.internal_name.as_ref() == field.name) {
				Some(field.name.as_str())
			} else {
				None
			};
			if let Some(name) = duplicate {
				return Err(ShapeError::DuplicateField {
					record: spec.name.clone(),
					field: name.to_owned(),
				});
			}

			fields.push(FieldDescriptor {
				external_name: external.into(),
				internal_name: field.name.as_str().into(),
				ty,
			});
		}

		let name = self
			.index
			.get_key_value(spec.name.as_str())
			.map(|(key, _)| Arc::clone(key))
			.unwrap_or_else(|| Arc::from(spec.name.as_str()));

		Ok(RecordDescriptor {
			name,
			style: spec.style,
			fields,
			check: spec.check,
		})
	}
}

fn rest_is_null(inner: &TypeDescriptor) -> bool {
	matches!(inner, TypeDescriptor::Literal(values) if values.as_slice() == [Literal::Null])
}

fn single_arg<'a>(name: &str, args: &'a [TypeExpr]) -> Result<&'a TypeExpr> {
	match args {
		[arg] => Ok(arg),
		_ => Err(ShapeError::InvalidTypeArity {
			name: name.to_owned(),
			expected: 1,
			actual: args.len(),
		}),
	}
}

fn is_identifier(name: &str) -> bool {
	let mut chars = name.chars();
	matches!(chars.next(), Some(first) if first.is_ascii_alphabetic() || first == '_') && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}
