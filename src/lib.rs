//! Type-directed decoding of generic JSON trees into typed values.

/// Type descriptors, the resolver, and the recursive decode engine.
pub mod shape;
