use super::TypeExpr;
use crate::shape::{Literal, ShapeError};

fn name(value: &str) -> TypeExpr {
	TypeExpr::name(value)
}

#[test]
fn nested_generics_parse() {
	let expr = TypeExpr::parse("Vec<Map<String, Option<i64>>>").expect("expression parses");
	assert_eq!(
		expr,
		TypeExpr::Apply {
			name: "Vec".to_owned(),
			args: vec![TypeExpr::Apply {
				name: "Map".to_owned(),
				args: vec![
					name("String"),
					TypeExpr::Apply {
						name: "Option".to_owned(),
						args: vec![name("i64")],
					},
				],
			}],
		}
	);
}

#[test]
fn tuples_and_grouping_are_distinguished() {
	assert_eq!(TypeExpr::parse("(i64)").expect("parses"), name("i64"));
	assert_eq!(TypeExpr::parse("(i64,)").expect("parses"), TypeExpr::Tuple(vec![name("i64")]));
	assert_eq!(TypeExpr::parse("()").expect("parses"), TypeExpr::Tuple(Vec::new()));
	assert_eq!(
		TypeExpr::parse("( i64 , String )").expect("parses"),
		TypeExpr::Tuple(vec![name("i64"), name("String")])
	);
}

#[test]
fn unions_and_literals_parse() {
	let expr = TypeExpr::parse(r#""active" | "in\"active" | -3 | true | null"#).expect("parses");
	assert_eq!(
		expr,
		TypeExpr::Union(vec![
			TypeExpr::Literal(Literal::String("active".into())),
			TypeExpr::Literal(Literal::String("in\"active".into())),
			TypeExpr::Literal(Literal::Integer(-3)),
			TypeExpr::Literal(Literal::Bool(true)),
			TypeExpr::Literal(Literal::Null),
		])
	);
}

#[test]
fn union_binds_inside_generic_arguments() {
	let expr = TypeExpr::parse("Option<String | f64>").expect("parses");
	let TypeExpr::Apply { args, .. } = expr else {
		panic!("expected generic application");
	};
	assert_eq!(args, vec![TypeExpr::Union(vec![name("String"), name("f64")])]);
}

#[test]
fn display_round_trips_through_parse() {
	for text in ["Vec<(i64, String)>", "Map<String, Set<Product>>", "\"a\" | \"b\"", "(Any,)", "Option<Person>"] {
		let expr = TypeExpr::parse(text).expect("parses");
		assert_eq!(TypeExpr::parse(&expr.to_string()).expect("rendered text parses"), expr);
	}
}

#[test]
fn errors_report_offset() {
	let err = TypeExpr::parse("Vec<i64").expect_err("unclosed generic");
	let ShapeError::InvalidTypeExpr { at, reason, .. } = err else {
		panic!("expected InvalidTypeExpr, got {err:?}");
	};
	assert_eq!(at, 7);
	assert_eq!(reason, "expected ',' or '>'");

	for text in ["", "Vec<>", "i64 String", "\"open", "(i64", "- 3", "#"] {
		assert!(TypeExpr::parse(text).is_err(), "{text:?} should be rejected");
	}
}

#[test]
fn runaway_nesting_is_refused() {
	let text = format!("{}i64{}", "(".repeat(200_000), ")".repeat(200_000));
	let err = TypeExpr::parse(&text).expect_err("too deep");
	assert!(
		matches!(err, ShapeError::InvalidTypeExpr { reason: "type nesting too deep", .. }),
		"got {err:?}"
	);

	let generics = format!("{}i64{}", "Vec<".repeat(200_000), ">".repeat(200_000));
	assert!(TypeExpr::parse(&generics).is_err());
}

#[test]
fn moderate_nesting_parses() {
	let text = format!("{}i64{}", "Vec<".repeat(64), ">".repeat(64));
	assert!(TypeExpr::parse(&text).is_ok());
}
