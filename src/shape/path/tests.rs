use super::{FieldPath, Location, PathStep};

#[test]
fn parses_fields_and_indices() {
	let path = FieldPath::parse("orders[2].items[0].price").expect("path parses");
	assert_eq!(
		path.steps,
		vec![
			PathStep::Field("orders".to_owned()),
			PathStep::Index(2),
			PathStep::Field("items".to_owned()),
			PathStep::Index(0),
			PathStep::Field("price".to_owned()),
		]
	);
}

#[test]
fn leading_index_is_accepted() {
	let path = FieldPath::parse("[3].name").expect("path parses");
	assert_eq!(path.steps, vec![PathStep::Index(3), PathStep::Field("name".to_owned())]);
	assert_eq!(path.to_string(), "[3].name");
}

#[test]
fn malformed_paths_are_rejected() {
	for input in ["", ".a", "a.", "a[", "a[x]", "a..b", "a.[1]", "a b"] {
		assert!(FieldPath::parse(input).is_err(), "{input:?} should be rejected");
	}
}

#[test]
fn render_joins_fields_with_dots_and_brackets_indices() {
	let path = FieldPath::parse("matrix[1][2]").expect("path parses");
	assert_eq!(path.to_string(), "matrix[1][2]");
	assert_eq!(FieldPath::root().to_string(), "");
	assert_eq!(FieldPath::root().describe(), "<root>");
}

#[test]
fn location_chain_materializes_in_root_order() {
	let root = Location::root();
	let orders = root.field("orders");
	let second = orders.index(1);
	let product = second.field("product");
	let price = product.field("price");

	assert_eq!(price.depth(), 4);
	assert_eq!(price.to_path().to_string(), "orders[1].product.price");
	assert_eq!(orders.to_path().to_string(), "orders");
	assert!(root.to_path().is_root());
}

#[test]
fn keys_with_separators_render_verbatim() {
	let root = Location::root();
	let map = root.field("prices");
	let key = map.field("v1.2[beta]");
	let path = key.to_path();

	assert_eq!(path.steps[1], PathStep::Field("v1.2[beta]".to_owned()));
	assert_eq!(path.to_string(), "prices.v1.2[beta]");
	assert!(FieldPath::parse(&path.to_string()).is_err());
}
