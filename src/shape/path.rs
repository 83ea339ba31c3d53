use std::fmt;

use crate::shape::{Result, ShapeError};

/// One step in a location path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
	/// Select a named field or map key.
	Field(String),
	/// Select a sequence element by zero-based index.
	Index(usize),
}

/// Owned location path from the decode root.
///
/// Rendering does not escape keys: a map key containing `.` or `[` prints
/// verbatim, so such a path does not parse back into the same steps. Use
/// `steps` when an exact location is needed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
	/// Ordered sequence of path steps.
	pub steps: Vec<PathStep>,
}

impl FieldPath {
	/// Empty path addressing the root.
	pub fn root() -> Self {
		Self::default()
	}

	/// Whether the path addresses the root.
	pub fn is_root(&self) -> bool {
		self.steps.is_empty()
	}

	/// Render for messages, naming the root explicitly.
	pub fn describe(&self) -> String {
		if self.is_root() { "<root>".to_owned() } else { self.to_string() }
	}

	/// Parse dotted field syntax with optional `[index]` selectors.
	///
	/// A path may also open with an index, as in `[2].name`.
	pub fn parse(input: &str) -> Result<Self> {
		if input.is_empty() {
			return Err(ShapeError::InvalidFieldPath { path: input.to_owned() });
		}

		let bytes = input.as_bytes();
		let mut idx = 0_usize;
		let mut steps = Vec::new();

		while idx < bytes.len() {
			let start = idx;
			while idx < bytes.len() {
				let byte = bytes[idx];
				if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
					idx += 1;
				} else {
					break;
				}
			}

			if idx > start {
				steps.push(PathStep::Field(input[start..idx].to_owned()));
			} else if !(steps.is_empty() && bytes[idx] == b'[') {
				return Err(ShapeError::InvalidFieldPath { path: input.to_owned() });
			}

			while idx < bytes.len() && bytes[idx] == b'[' {
				idx += 1;
				let n_start = idx;
				while idx < bytes.len() && bytes[idx].is_ascii_digit() {
					idx += 1;
				}
				if idx == n_start || idx >= bytes.len() || bytes[idx] != b']' {
					return Err(ShapeError::InvalidFieldPath { path: input.to_owned() });
				}

				let number = input[n_start..idx]
					.parse::<usize>()
					.map_err(|_| ShapeError::InvalidFieldPath { path: input.to_owned() })?;
				steps.push(PathStep::Index(number));
				idx += 1;
			}

			if idx < bytes.len() {
				if bytes[idx] != b'.' {
					return Err(ShapeError::InvalidFieldPath { path: input.to_owned() });
				}
				idx += 1;
				if idx >= bytes.len() {
					return Err(ShapeError::InvalidFieldPath { path: input.to_owned() });
				}
			}
		}

		Ok(Self { steps })
	}
}

impl fmt::Display for FieldPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (pos, step) in self.steps.iter().enumerate() {
			match step {
				PathStep::Field(name) => {
					if pos > 0 {
						f.write_str(".")?;
					}
					f.write_str(name)?;
				}
				PathStep::Index(index) => write!(f, "[{index}]")?,
			}
		}
		Ok(())
	}
}

/// Borrowed step used while a decode is in flight.
#[derive(Debug, Clone, Copy)]
pub enum Step<'a> {
	/// Field name or map key.
	Field(&'a str),
	/// Sequence index.
	Index(usize),
}

/// Location context of one decode frame.
///
/// Each child frame borrows its parent and adds one step; nothing is shared
/// mutably and nothing is allocated until a failure needs an owned path.
#[derive(Debug, Clone, Copy)]
pub struct Location<'a> {
	parent: Option<&'a Location<'a>>,
	step: Option<Step<'a>>,
}

impl<'a> Location<'a> {
	/// Root frame.
	pub const fn root() -> Self {
		Self { parent: None, step: None }
	}

	/// Child frame selecting a field or map key.
	pub fn field(&'a self, name: &'a str) -> Location<'a> {
		Location {
			parent: Some(self),
			step: Some(Step::Field(name)),
		}
	}

	/// Child frame selecting a sequence element.
	pub fn index(&'a self, index: usize) -> Location<'a> {
		Location {
			parent: Some(self),
			step: Some(Step::Index(index)),
		}
	}

	/// Number of steps from the root.
	pub fn depth(&self) -> usize {
		let mut depth = 0;
		let mut cursor = Some(self);
		while let Some(frame) = cursor {
			if frame.step.is_some() {
				depth += 1;
			}
			cursor = frame.parent;
		}
		depth
	}

	/// Materialize the owned path for diagnostics.
	pub fn to_path(&self) -> FieldPath {
		let mut steps = Vec::with_capacity(self.depth());
		let mut cursor = Some(self);
		while let Some(frame) = cursor {
			match frame.step {
				Some(Step::Field(name)) => steps.push(PathStep::Field(name.to_owned())),
				Some(Step::Index(index)) => steps.push(PathStep::Index(index)),
				None => {}
			}
			cursor = frame.parent;
		}
		steps.reverse();
		FieldPath { steps }
	}
}

#[cfg(test)]
mod tests;
