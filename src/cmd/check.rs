use std::fs;
use std::path::{Path, PathBuf};

use jsonshape::shape::{DecodeOptions, Decoded, FieldPath, Result, Schema, ShapeError, TypeDescriptor, Value, parse_with};

use crate::cmd::print::{PrintOptions, print_decoded};

#[derive(clap::Args)]
pub struct Args {
	pub schema: PathBuf,
	pub data: PathBuf,
	/// Type expression; defaults to the schema root.
	#[arg(long = "type")]
	pub type_expr: Option<String>,
	/// Treat the data as a list and decode every element against the type.
	#[arg(long)]
	pub each: bool,
	/// Decode only the sub-tree at this path.
	#[arg(long)]
	pub at: Option<String>,
	#[arg(long = "max-depth")]
	pub max_depth: Option<u32>,
	#[arg(long)]
	pub json: bool,
}

/// Decode a data file against a schema type and report the outcome.
pub fn run(args: Args) -> Result<()> {
	let Args {
		schema,
		data,
		type_expr,
		each,
		at,
		max_depth,
		json,
	} = args;

	let (resolver, root) = Schema::load(&schema)?.into_resolver()?;
	let ty = match type_expr {
		Some(text) => resolver.resolve(&text)?,
		None => root.ok_or(ShapeError::NoRootType)?,
	};

	let document = Value::from_json_str(&fs::read_to_string(&data)?)?;
	let value = match &at {
		Some(expr) => document
			.select(&FieldPath::parse(expr)?)
			.ok_or_else(|| ShapeError::PathNotFound { path: expr.clone() })?,
		None => &document,
	};

	let mut opt = DecodeOptions::default();
	if let Some(max_depth) = max_depth {
		opt.max_depth = max_depth;
	}

	let outcome = if each {
		parse_with(&resolver, value, std::slice::from_ref(&ty), &opt)
	} else {
		parse_with(&resolver, value, &ty, &opt)
	};

	if json {
		emit_report(&data, &ty, each, &outcome)?;
		return outcome.map(|_| ());
	}

	let decoded = outcome?;
	println!("file: {}", data.display());
	println!("type: {}", type_label(&ty, each));
	if let Some(expr) = &at {
		println!("at: {expr}");
	}
	println!("kind: {}", decoded.kind_name());
	println!("decoded:");
	print_decoded(&decoded, 0, 0, PrintOptions::default());
	Ok(())
}

fn type_label(ty: &TypeDescriptor, each: bool) -> String {
	if each { format!("each {ty}") } else { ty.to_string() }
}

fn emit_report(data: &Path, ty: &TypeDescriptor, each: bool, outcome: &Result<Decoded>) -> Result<()> {
	let mut report = CheckJson {
		file: data.display().to_string(),
		type_name: type_label(ty, each),
		ok: outcome.is_ok(),
		kind: None,
		path: None,
		error: None,
		reason: None,
	};
	match outcome {
		Ok(decoded) => report.kind = Some(decoded.kind_name()),
		Err(err) => {
			report.path = err.path().map(ToString::to_string);
			report.error = Some(err.kind());
			report.reason = Some(err.to_string());
		}
	}
	println!("{}", serde_json::to_string_pretty(&report)?);
	Ok(())
}

#[derive(serde::Serialize)]
struct CheckJson {
	file: String,
	#[serde(rename = "type")]
	type_name: String,
	ok: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	kind: Option<&'static str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	path: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	error: Option<&'static str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	reason: Option<String>,
}
