use std::path::PathBuf;

use jsonshape::shape::{RecordDescriptor, RecordStyle, Result, Schema};

#[derive(clap::Args)]
pub struct Args {
	pub schema: PathBuf,
	/// Print the field table of one record.
	#[arg(long)]
	pub record: Option<String>,
}

pub fn run(args: Args) -> Result<()> {
	let (resolver, root) = Schema::load(&args.schema)?.into_resolver()?;

	println!("schema: {}", args.schema.display());
	match &root {
		Some(ty) => println!("root: {ty}"),
		None => println!("root: none"),
	}
	println!("records: {}", resolver.records().count());

	match args.record {
		Some(name) => print_record(resolver.record(&name)?),
		None => {
			for record in resolver.records() {
				println!("  {} ({}, {} fields)", record.name, style_label(record.style), record.fields.len());
			}
		}
	}

	Ok(())
}

fn print_record(record: &RecordDescriptor) {
	println!("record: {}", record.name);
	println!("style: {}", style_label(record.style));
	println!("check: {}", record.has_check());
	println!("field_count: {}", record.fields.len());
	for field in &record.fields {
		if field.external_name == field.internal_name {
			println!("  {} {}", field.internal_name, field.ty);
		} else {
			println!("  {} <- {} {}", field.internal_name, field.external_name, field.ty);
		}
	}
}

fn style_label(style: RecordStyle) -> &'static str {
	match style {
		RecordStyle::Named => "named",
		RecordStyle::Positional => "positional",
	}
}
