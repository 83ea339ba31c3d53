use jsonshape::shape::Decoded;

/// Output truncation and formatting limits for decoded values.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of fields printed for a single record.
	pub max_fields_per_record: usize,
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum number of elements printed for sequences, sets, tuples and maps.
	pub max_items: usize,
	/// Maximum recursive print depth for nested containers.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_fields_per_record: 80,
			max_string_len: 200,
			max_items: 16,
			max_print_depth: 8,
		}
	}
}

/// Print a decoded tree, one scalar per line.
pub fn print_decoded(value: &Decoded, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	match value {
		Decoded::Integer(v) => println!("{pad}{v}"),
		Decoded::Float(v) => println!("{pad}{v:?}"),
		Decoded::Bool(v) => println!("{pad}{v}"),
		Decoded::String(v) => println!("{pad}\"{}\"", truncate(v, options.max_string_len)),
		Decoded::Literal(v) => println!("{pad}{v}"),
		Decoded::Dynamic(v) => println!("{pad}{}", truncate(&v.to_string(), options.max_string_len)),
		Decoded::Optional(None) => println!("{pad}none"),
		Decoded::Optional(Some(inner)) => print_decoded(inner, indent, depth, options),
		Decoded::Sequence(items) => print_items(items.iter(), items.len(), ("[", "]"), &pad, indent, depth, options),
		Decoded::Tuple(items) => print_items(items.iter(), items.len(), ("(", ")"), &pad, indent, depth, options),
		Decoded::Set(items) => print_items(items.iter(), items.len(), ("set {", "}"), &pad, indent, depth, options),
		Decoded::Map(entries) => {
			if depth >= options.max_print_depth {
				println!("{pad}{{ ... {} entries }}", entries.len());
				return;
			}
			println!("{pad}{{");
			for (key, item) in entries.iter().take(options.max_items) {
				print!("{pad}  {key:?}: ");
				print_nested(item, indent, depth, options);
			}
			if entries.len() > options.max_items {
				println!("{pad}  ... {} more", entries.len() - options.max_items);
			}
			println!("{pad}}}");
		}
		Decoded::Record(item) => {
			if depth >= options.max_print_depth {
				println!("{pad}{} {{ ... }}", item.type_name);
				return;
			}
			println!("{pad}{} {{", item.type_name);
			for field in item.fields.iter().take(options.max_fields_per_record) {
				print!("{pad}  {} = ", field.name);
				print_nested(&field.value, indent, depth, options);
			}
			if item.fields.len() > options.max_fields_per_record {
				println!("{pad}  ... {} more fields", item.fields.len() - options.max_fields_per_record);
			}
			println!("{pad}}}");
		}
	}
}

fn print_items<'a>(
	items: impl Iterator<Item = &'a Decoded>,
	len: usize,
	(open, close): (&str, &str),
	pad: &str,
	indent: usize,
	depth: u32,
	options: PrintOptions,
) {
	if depth >= options.max_print_depth {
		println!("{pad}{open} ... {len} items {close}");
		return;
	}
	println!("{pad}{open}");
	for item in items.take(options.max_items) {
		print_decoded(item, indent + 2, depth + 1, options);
	}
	if len > options.max_items {
		println!("{pad}  ... {} more", len - options.max_items);
	}
	println!("{pad}{close}");
}

/// Containers continue on the next line; scalars stay inline after the label.
fn print_nested(value: &Decoded, indent: usize, depth: u32, options: PrintOptions) {
	let inner = match value {
		Decoded::Optional(Some(inner)) => inner.as_ref(),
		other => other,
	};
	if matches!(inner, Decoded::Record(_) | Decoded::Sequence(_) | Decoded::Map(_) | Decoded::Set(_) | Decoded::Tuple(_)) {
		println!();
		print_decoded(inner, indent + 4, depth + 1, options);
	} else {
		print_decoded(inner, 0, depth + 1, options);
	}
}

fn truncate(input: &str, max_len: usize) -> String {
	if input.chars().count() <= max_len {
		return input.to_owned();
	}
	let out: String = input.chars().take(max_len).collect();
	format!("{out}...")
}
