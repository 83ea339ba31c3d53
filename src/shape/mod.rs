mod convert;
mod decode;
mod decoded;
mod descriptor;
mod error;
mod expr;
mod path;
mod record;
mod resolve;
mod schema;
mod value;

/// Native Rust conversions out of decoded values.
pub use convert::FromDecoded;
/// Decode entry points and options.
pub use decode::{DecodeOptions, Target, parse, parse_into, parse_with};
/// Typed decode output.
pub use decoded::{Decoded, FieldValue, RecordValue};
/// Normalized shape descriptors.
pub use descriptor::{Literal, MapDescriptor, PrimitiveKind, TypeDescriptor};
/// Error and result aliases.
pub use error::{Result, ShapeError};
/// Authored type expressions.
pub use expr::TypeExpr;
/// Location paths, owned and borrowed.
pub use path::{FieldPath, Location, PathStep, Step};
/// Record authoring and resolved record types.
pub use record::{FieldDescriptor, FieldSpec, RecordCheck, RecordDescriptor, RecordSpec, RecordStyle};
/// Record registry and type classifier.
pub use resolve::Resolver;
/// Serialized schema documents.
pub use schema::Schema;
/// Untyped input tree.
pub use value::{Value, ValueKind};
