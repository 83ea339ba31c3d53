use thiserror::Error;

use crate::shape::{FieldPath, Literal, Value, ValueKind};

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, ShapeError>;

/// Errors produced while resolving type descriptors and decoding values.
#[derive(Debug, Error)]
pub enum ShapeError {
	/// Value kind does not match the primitive or container the descriptor demands.
	#[error("{}: expected {expected}, found {actual}", path.describe())]
	UnexpectedType {
		/// Location of the offending value.
		path: FieldPath,
		/// Rendered expected shape.
		expected: String,
		/// Runtime kind of the offending value.
		actual: ValueKind,
	},
	/// Sequence length differs from the fixed tuple arity.
	#[error("{}: expected tuple of {expected} elements, found {actual}", path.describe())]
	InvalidTupleSize {
		/// Location of the offending sequence.
		path: FieldPath,
		/// Declared tuple arity.
		expected: usize,
		/// Actual sequence length.
		actual: usize,
	},
	/// No union alternative accepted the value.
	#[error("{}: no union alternative matched ({})", path.describe(), render_attempts(attempts))]
	NoUnionVariant {
		/// Location of the offending value.
		path: FieldPath,
		/// One failure per alternative, in declaration order.
		attempts: Vec<ShapeError>,
	},
	/// Value is not one of the allowed literal constants.
	#[error("{}: value {value} is not one of {}", path.describe(), render_literals(allowed))]
	NoLiteralVariant {
		/// Location of the offending value.
		path: FieldPath,
		/// Offending value.
		value: Value,
		/// Allowed constants in declaration order.
		allowed: Vec<Literal>,
	},
	/// Associative map authored with a key type other than `String`.
	#[error("map keys must be String, not {key}")]
	NonStringKey {
		/// Rendered key type expression.
		key: String,
	},
	/// Type name or generic head outside the supported vocabulary.
	#[error("unsupported type: {name}")]
	UnsupportedType {
		/// Offending type name.
		name: String,
	},
	/// Generic type applied to the wrong number of arguments.
	#[error("{name} takes {expected} type argument(s), got {actual}")]
	InvalidTypeArity {
		/// Generic head name.
		name: String,
		/// Required argument count.
		expected: usize,
		/// Supplied argument count.
		actual: usize,
	},
	/// Type expression text could not be parsed.
	#[error("invalid type expression {expr:?} at offset {at}: {reason}")]
	InvalidTypeExpr {
		/// Original expression text.
		expr: String,
		/// Byte offset of the failure.
		at: usize,
		/// Short description of what went wrong.
		reason: &'static str,
	},
	/// Record name was not registered with the resolver.
	#[error("unknown record: {name}")]
	UnknownRecord {
		/// Requested record name.
		name: String,
	},
	/// Record name registered twice.
	#[error("duplicate record: {name}")]
	DuplicateRecord {
		/// Duplicated record name.
		name: String,
	},
	/// Record name collides with a built-in type name.
	#[error("record name {name} shadows a built-in type")]
	ReservedTypeName {
		/// Offending record name.
		name: String,
	},
	/// Two fields of one record share an external name.
	#[error("record {record} declares external field name {field} twice")]
	DuplicateField {
		/// Record name.
		record: String,
		/// Duplicated external name.
		field: String,
	},
	/// Field type failed to resolve.
	#[error("record {record}, field {field}: {source}")]
	InField {
		/// Record name.
		record: String,
		/// Internal field name.
		field: String,
		/// Underlying resolution failure.
		source: Box<ShapeError>,
	},
	/// Record construction check refused the decoded fields.
	#[error("{}: record {record} rejected: {reason}", path.describe())]
	RecordRejected {
		/// Location of the record.
		path: FieldPath,
		/// Record name.
		record: String,
		/// Reason reported by the check.
		reason: String,
	},
	/// Decoder recursion depth exceeded configured limit.
	#[error("{}: decode depth exceeded (max={max_depth})", path.describe())]
	DepthExceeded {
		/// Location where the limit was hit.
		path: FieldPath,
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Homogeneous-list target did not hold exactly one descriptor.
	#[error("list target must hold exactly one type, got {count}")]
	ListTargetArity {
		/// Number of descriptors supplied.
		count: usize,
	},
	/// Path expression syntax is invalid.
	#[error("invalid field path: {path}")]
	InvalidFieldPath {
		/// Original user-provided path string.
		path: String,
	},
	/// Path selected no value in the input tree.
	#[error("no value at {path}")]
	PathNotFound {
		/// Requested path.
		path: String,
	},
	/// No type was requested and the schema declares no root type.
	#[error("no type given and the schema declares no root")]
	NoRootType,
	/// Decoded value could not be converted into the requested Rust type.
	#[error("cannot convert {found} into {expected}")]
	Convert {
		/// Requested Rust-side shape.
		expected: &'static str,
		/// Decoded shape that was supplied.
		found: &'static str,
	},
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// JSON text could not be decoded.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
}

impl ShapeError {
	/// Location carried by engine errors.
	pub fn path(&self) -> Option<&FieldPath> {
		match self {
			Self::UnexpectedType { path, .. }
			| Self::InvalidTupleSize { path, .. }
			| Self::NoUnionVariant { path, .. }
			| Self::NoLiteralVariant { path, .. }
			| Self::RecordRejected { path, .. }
			| Self::DepthExceeded { path, .. } => Some(path),
			_ => None,
		}
	}

	/// Whether the error describes non-conforming input rather than a broken setup.
	///
	/// Union trial only swallows data errors.
	pub fn is_data_error(&self) -> bool {
		matches!(
			self,
			Self::UnexpectedType { .. }
				| Self::InvalidTupleSize { .. }
				| Self::NoUnionVariant { .. }
				| Self::NoLiteralVariant { .. }
				| Self::RecordRejected { .. }
		)
	}

	/// Stable snake-case label for reports.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::UnexpectedType { .. } => "unexpected_type",
			Self::InvalidTupleSize { .. } => "invalid_tuple_size",
			Self::NoUnionVariant { .. } => "no_union_variant",
			Self::NoLiteralVariant { .. } => "no_literal_variant",
			Self::NonStringKey { .. } => "non_string_key",
			Self::UnsupportedType { .. } => "unsupported_type",
			Self::InvalidTypeArity { .. } => "invalid_type_arity",
			Self::InvalidTypeExpr { .. } => "invalid_type_expr",
			Self::UnknownRecord { .. } => "unknown_record",
			Self::DuplicateRecord { .. } => "duplicate_record",
			Self::ReservedTypeName { .. } => "reserved_type_name",
			Self::DuplicateField { .. } => "duplicate_field",
			Self::InField { .. } => "in_field",
			Self::RecordRejected { .. } => "record_rejected",
			Self::DepthExceeded { .. } => "depth_exceeded",
			Self::ListTargetArity { .. } => "list_target_arity",
			Self::InvalidFieldPath { .. } => "invalid_field_path",
			Self::PathNotFound { .. } => "path_not_found",
			Self::NoRootType => "no_root_type",
			Self::Convert { .. } => "convert",
			Self::Io(_) => "io",
			Self::Json(_) => "json",
		}
	}
}

fn render_attempts(attempts: &[ShapeError]) -> String {
	attempts.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

fn render_literals(allowed: &[Literal]) -> String {
	let items = allowed.iter().map(ToString::to_string).collect::<Vec<_>>();
	format!("[{}]", items.join(", "))
}
