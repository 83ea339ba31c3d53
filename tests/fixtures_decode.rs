#![allow(missing_docs)]

use jsonshape::shape::{Decoded, Literal, RecordStyle, RecordValue, Resolver, Schema, ShapeError, TypeDescriptor, Value, parse};
use jsonshape_testkit::{fixture_json, fixture_path};

const SCHEMAS: [&str; 2] = ["schema.json", "schema_positional.json"];

#[test]
fn primitive_types_decode_in_both_styles() {
	for schema in SCHEMAS {
		let record = decode_record(schema, "primitive_types.json", "PrimitiveTypes");
		assert_eq!(record.get("integer"), Some(&Decoded::Integer(123)));
		assert_eq!(record.get("string"), Some(&Decoded::String("str".into())));
		assert_eq!(record.get("boolean"), Some(&Decoded::Bool(true)));
		assert_eq!(record.get("optional_null"), Some(&Decoded::none()));
		assert_eq!(record.get("optional_int"), Some(&Decoded::some(Decoded::Integer(456))));
		assert_eq!(record.get("float"), Some(&Decoded::Float(1.2)));
	}
}

#[test]
fn list_of_primitive_types_uses_list_mode() {
	let resolver = load("schema.json");
	let targets = [TypeDescriptor::record("PrimitiveTypes")];
	let Decoded::Sequence(items) = parse(&resolver, &data("list_of_primitive_types.json"), &targets).expect("decode succeeds") else {
		panic!("expected sequence output");
	};
	assert_eq!(items.len(), 2);

	let second = items[1].as_record().expect("record element");
	assert_eq!(second.get("integer"), Some(&Decoded::Integer(123123)));
	assert_eq!(second.get("optional_null"), Some(&Decoded::none()), "absent key decodes as empty");
	assert_eq!(second.get("float"), Some(&Decoded::Float(12.3)));
}

#[test]
fn nested_lists_decode() {
	let record = decode_record("schema.json", "lists_with_lists.json", "Matrix");
	let Some(Decoded::Sequence(rows)) = record.get("matrix") else {
		panic!("expected matrix rows");
	};
	assert_eq!(rows.len(), 3);
	assert_eq!(
		rows[2],
		Decoded::Sequence(vec![Decoded::Integer(7), Decoded::Integer(8), Decoded::Integer(9)])
	);
}

#[test]
fn nested_record_reads_renamed_field() {
	for schema in SCHEMAS {
		let person = decode_record(schema, "nested_data_class.json", "Person");
		assert_eq!(person.get("name"), Some(&Decoded::String("Alice".into())));
		let address = person.get("address").and_then(Decoded::as_record).expect("nested record");
		assert_eq!(address.get("postal_code"), Some(&Decoded::String("12345".into())));
	}
}

#[test]
fn named_and_positional_styles_agree_on_fields() {
	let named = decode_record("schema.json", "nested_data_class.json", "Person");
	let positional = decode_record("schema_positional.json", "nested_data_class.json", "Person");
	assert_eq!(named.style, RecordStyle::Named);
	assert_eq!(positional.style, RecordStyle::Positional);

	let names: Vec<_> = named.positional_values().map(Decoded::kind_name).collect();
	let other: Vec<_> = positional.positional_values().map(Decoded::kind_name).collect();
	assert_eq!(names, other);
	assert_eq!(named.get("age"), positional.get("age"));
}

#[test]
fn positional_record_builds_from_ordered_values() {
	let resolver = load("schema_positional.json");
	let product = resolver.record("Product").expect("record exists");
	let built = product
		.construct_positional(vec![Decoded::String("pen".into()), Decoded::Float(1.5)])
		.expect("arity matches");
	assert_eq!(built.get("price"), Some(&Decoded::Float(1.5)));

	let err = product.construct_positional(vec![Decoded::Float(1.5)]).expect_err("arity mismatch");
	assert!(matches!(err, ShapeError::InvalidTupleSize { expected: 2, actual: 1, .. }), "got {err:?}");
}

#[test]
fn union_field_takes_first_matching_alternative() {
	let resolver = load("schema.json");
	let targets = [TypeDescriptor::record("Item")];
	let Decoded::Sequence(items) = parse(&resolver, &data("items.json"), &targets).expect("decode succeeds") else {
		panic!("expected sequence output");
	};
	let values: Vec<_> = items.iter().filter_map(Decoded::as_record).filter_map(|item| item.get("value")).collect();
	assert_eq!(values, vec![&Decoded::String("apple".into()), &Decoded::Float(10.5)]);
}

#[test]
fn order_set_collapses_duplicate_products() {
	for schema in SCHEMAS {
		let order = decode_record(schema, "order_set.json", "OrderSet");
		let Some(Decoded::Set(products)) = order.get("products") else {
			panic!("expected product set");
		};
		assert_eq!(products.len(), 2, "{schema}");
	}
}

#[test]
fn order_dict_keeps_input_key_order() {
	let order = decode_record("schema.json", "order_dict.json", "OrderDict");
	let Some(Decoded::Map(products)) = order.get("products") else {
		panic!("expected product map");
	};
	let keys: Vec<_> = products.keys().map(|key| key.as_ref()).collect();
	assert_eq!(keys, vec!["first", "second"]);
}

#[test]
fn status_literals_decode() {
	let resolver = load("schema.json");
	let targets = [TypeDescriptor::record("Status")];
	let Decoded::Sequence(items) = parse(&resolver, &data("statuses.json"), &targets).expect("decode succeeds") else {
		panic!("expected sequence output");
	};
	let statuses: Vec<_> = items.iter().filter_map(Decoded::as_record).filter_map(|item| item.get("status")).collect();
	assert_eq!(
		statuses,
		vec![
			&Decoded::Literal(Literal::String("active".into())),
			&Decoded::Literal(Literal::String("inactive".into()))
		]
	);

	let paused = Value::from(serde_json::json!({"status": "paused"}));
	let err = parse(&resolver, &paused, &TypeDescriptor::record("Status")).expect_err("paused is not allowed");
	assert!(matches!(err, ShapeError::NoLiteralVariant { .. }), "got {err:?}");
	assert_eq!(err.path().map(ToString::to_string).as_deref(), Some("status"));
}

#[test]
fn self_referential_tree_decodes() {
	let tree = decode_record("schema.json", "tree.json", "Node");
	let Some(Decoded::Sequence(children)) = tree.get("children") else {
		panic!("expected children");
	};
	let right = children[1].as_record().expect("record child");
	assert_eq!(right.get("weight"), Some(&Decoded::none()));
	let Some(Decoded::Sequence(grandchildren)) = right.get("children") else {
		panic!("expected grandchildren");
	};
	let leaf = grandchildren[0].as_record().expect("record leaf");
	assert_eq!(leaf.get("weight"), Some(&Decoded::some(Decoded::Float(2.0))));
}

#[test]
fn deep_failure_reports_full_path() {
	let resolver = load("schema.json");
	let err = parse(&resolver, &data("ledger_bad_price.json"), &TypeDescriptor::record("Ledger")).expect_err("price is a string");
	assert_eq!(err.path().map(ToString::to_string).as_deref(), Some("orders[1].products[1].price"));
	assert!(err.is_data_error());
}

#[test]
fn missing_renamed_key_fails_at_external_name() {
	let resolver = load("schema.json");
	let input = Value::from(serde_json::json!({"street": "s", "city": "c", "postal_code": "p"}));
	let err = parse(&resolver, &input, &TypeDescriptor::record("Address")).expect_err("postalCode is missing");
	assert_eq!(err.path().map(ToString::to_string).as_deref(), Some("postalCode"));
}

fn decode_record(schema: &str, data_name: &str, record: &str) -> RecordValue {
	let resolver = load(schema);
	match parse(&resolver, &data(data_name), &TypeDescriptor::record(record)).expect("decode succeeds") {
		Decoded::Record(item) => item,
		other => panic!("expected record, got {}", other.kind_name()),
	}
}

fn load(schema: &str) -> Resolver {
	let (resolver, _) = Schema::load(fixture_path(schema))
		.expect("schema loads")
		.into_resolver()
		.expect("schema resolves");
	resolver
}

fn data(name: &str) -> Value {
	Value::from(fixture_json(name))
}
