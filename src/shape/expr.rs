use std::fmt;
use std::str::FromStr;

use crate::shape::{Literal, Result, ShapeError};

/// Deepest accepted nesting of generics, tuples and groups.
const MAX_NESTING: u32 = 128;

/// Authored type expression, before classification.
///
/// Text syntax: `i64`, `Option<T>`, `Map<String, V>`, `(A, B)`, `A | B`,
/// literals such as `"active"`, `3`, `true` and `null`, and record names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
	/// Bare name: a primitive, `Any`, a bare collection, or a record.
	Name(String),
	/// Generic head applied to arguments, as in `Vec<T>`.
	Apply {
		/// Generic head name.
		name: String,
		/// Type arguments in order.
		args: Vec<TypeExpr>,
	},
	/// Parenthesized, comma-separated tuple.
	Tuple(Vec<TypeExpr>),
	/// `|`-separated alternatives.
	Union(Vec<TypeExpr>),
	/// Constant scalar.
	Literal(Literal),
}

impl TypeExpr {
	/// Parse type expression text.
	pub fn parse(input: &str) -> Result<Self> {
		let mut parser = Parser { input, pos: 0, depth: 0 };
		let expr = parser.union()?;
		parser.skip_ws();
		if parser.pos < input.len() {
			return Err(parser.fail("unexpected trailing input"));
		}
		Ok(expr)
	}

	/// Bare name expression.
	pub fn name(name: &str) -> Self {
		Self::Name(name.to_owned())
	}
}

impl FromStr for TypeExpr {
	type Err = ShapeError;

	fn from_str(input: &str) -> Result<Self> {
		Self::parse(input)
	}
}

struct Parser<'a> {
	input: &'a str,
	pos: usize,
	depth: u32,
}

impl Parser<'_> {
	fn union(&mut self) -> Result<TypeExpr> {
		if self.depth >= MAX_NESTING {
			return Err(self.fail("type nesting too deep"));
		}
		self.depth += 1;
		let out = self.alternatives();
		self.depth -= 1;
		out
	}

	fn alternatives(&mut self) -> Result<TypeExpr> {
		let mut alternatives = vec![self.term()?];
		while self.eat(b'|') {
			alternatives.push(self.term()?);
		}
		if alternatives.len() == 1 {
			return Ok(alternatives.pop().unwrap_or(TypeExpr::Tuple(Vec::new())));
		}
		Ok(TypeExpr::Union(alternatives))
	}

	fn term(&mut self) -> Result<TypeExpr> {
		self.skip_ws();
		match self.peek() {
			Some(b'(') => self.tuple(),
			Some(b'"') => self.string().map(|value| TypeExpr::Literal(Literal::String(value.into_boxed_str()))),
			Some(byte) if byte == b'-' || byte.is_ascii_digit() => self.integer().map(|value| TypeExpr::Literal(Literal::Integer(value))),
			Some(byte) if byte.is_ascii_alphabetic() || byte == b'_' => self.named(),
			Some(_) => Err(self.fail("expected a type")),
			None => Err(self.fail("unexpected end of input")),
		}
	}

	fn tuple(&mut self) -> Result<TypeExpr> {
		self.pos += 1;
		let mut items = Vec::new();
		let mut saw_comma = false;
		if self.eat(b')') {
			return Ok(TypeExpr::Tuple(items));
		}
		loop {
			items.push(self.union()?);
			if self.eat(b',') {
				saw_comma = true;
				if self.eat(b')') {
					break;
				}
				continue;
			}
			if self.eat(b')') {
				break;
			}
			return Err(self.fail("expected ',' or ')'"));
		}
		if items.len() == 1 && !saw_comma {
			return Ok(items.pop().unwrap_or(TypeExpr::Tuple(Vec::new())));
		}
		Ok(TypeExpr::Tuple(items))
	}

	fn named(&mut self) -> Result<TypeExpr> {
		let input = self.input;
		let start = self.pos;
		while let Some(byte) = self.peek() {
			if byte.is_ascii_alphanumeric() || byte == b'_' {
				self.pos += 1;
			} else {
				break;
			}
		}
		let ident = &input[start..self.pos];
		match ident {
			"true" => return Ok(TypeExpr::Literal(Literal::Bool(true))),
			"false" => return Ok(TypeExpr::Literal(Literal::Bool(false))),
			"null" => return Ok(TypeExpr::Literal(Literal::Null)),
			_ => {}
		}

		if !self.eat(b'<') {
			return Ok(TypeExpr::Name(ident.to_owned()));
		}
		let mut args = vec![self.union()?];
		while self.eat(b',') {
			args.push(self.union()?);
		}
		if !self.eat(b'>') {
			return Err(self.fail("expected ',' or '>'"));
		}
		Ok(TypeExpr::Apply {
			name: ident.to_owned(),
			args,
		})
	}

	fn string(&mut self) -> Result<String> {
		self.pos += 1;
		let input = self.input;
		let mut out = String::new();
		let mut chars = input[self.pos..].char_indices();
		while let Some((offset, ch)) = chars.next() {
			match ch {
				'"' => {
					self.pos += offset + 1;
					return Ok(out);
				}
				'\\' => {
					let escaped = match chars.next() {
						Some((_, '"')) => '"',
						Some((_, '\\')) => '\\',
						Some((_, 'n')) => '\n',
						Some((_, 't')) => '\t',
						Some((_, 'r')) => '\r',
						_ => {
							self.pos += offset;
							return Err(self.fail("invalid escape"));
						}
					};
					out.push(escaped);
				}
				c => out.push(c),
			}
		}
		Err(self.fail("unterminated string"))
	}

	fn integer(&mut self) -> Result<i64> {
		let start = self.pos;
		if self.peek() == Some(b'-') {
			self.pos += 1;
		}
		while self.peek().is_some_and(|byte| byte.is_ascii_digit()) {
			self.pos += 1;
		}
		let input = self.input;
		match input[start..self.pos].parse::<i64>() {
			Ok(value) => Ok(value),
			Err(_) => {
				self.pos = start;
				Err(self.fail("invalid integer literal"))
			}
		}
	}

	fn eat(&mut self, byte: u8) -> bool {
		self.skip_ws();
		if self.peek() == Some(byte) {
			self.pos += 1;
			return true;
		}
		false
	}

	fn peek(&self) -> Option<u8> {
		self.input.as_bytes().get(self.pos).copied()
	}

	fn skip_ws(&mut self) {
		while self.peek().is_some_and(|byte| byte.is_ascii_whitespace()) {
			self.pos += 1;
		}
	}

	fn fail(&self, reason: &'static str) -> ShapeError {
		ShapeError::InvalidTypeExpr {
			expr: self.input.to_owned(),
			at: self.pos,
			reason,
		}
	}
}

impl fmt::Display for TypeExpr {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Name(name) => f.write_str(name),
			Self::Apply { name, args } => {
				write!(f, "{name}<")?;
				write_list(f, args, ", ")?;
				f.write_str(">")
			}
			Self::Tuple(items) => {
				f.write_str("(")?;
				write_list(f, items, ", ")?;
				if items.len() == 1 {
					f.write_str(",")?;
				}
				f.write_str(")")
			}
			Self::Union(alternatives) => write_list(f, alternatives, " | "),
			Self::Literal(value) => write!(f, "{value}"),
		}
	}
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[TypeExpr], sep: &str) -> fmt::Result {
	for (pos, item) in items.iter().enumerate() {
		if pos > 0 {
			f.write_str(sep)?;
		}
		write!(f, "{item}")?;
	}
	Ok(())
}

#[cfg(test)]
mod tests;
