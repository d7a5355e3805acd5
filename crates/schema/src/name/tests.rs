use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

#[test]
fn test_encode_reserved_characters() {
	let encoder = SchemaNameEncoder;
	assert_eq!(encoder.encode("a b.c-d/e"), "a_1_b_2_c_3_d_4_e");
	assert_eq!(encoder.encode("my_type"), "my__type");
	assert_eq!(encoder.encode(""), "");
}

#[test]
fn test_decode_reverses_encode() {
	let encoder = SchemaNameEncoder;
	assert_eq!(encoder.decode("a_1_b_2_c_3_d_4_e"), "a b.c-d/e");
	assert_eq!(encoder.decode("my__type"), "my_type");
}

#[test]
fn test_decode_does_not_match_across_codewords() {
	let encoder = SchemaNameEncoder;
	let encoded = encoder.encode(".1-");
	assert_eq!(encoded, "_2_1_3_");
	assert_eq!(encoder.decode(&encoded), ".1-");
}

#[test]
fn test_decode_keeps_lone_underscore() {
	let encoder = SchemaNameEncoder;
	assert_eq!(encoder.decode("my_type"), "my_type");
	assert_eq!(encoder.decode("trailing_"), "trailing_");
}

#[test]
fn test_join_skips_empty_parts() {
	let encoder = SchemaNameEncoder;
	assert_eq!(encoder.join(["plone", "", "page"]), "plone_0_page");
	assert_eq!(encoder.join(["site/sub", "my-type", "extra"]), "site_4_sub_0_my_3_type_0_extra");
}

#[test]
fn test_split_on_separator_at_codeword_boundary() {
	let encoder = SchemaNameEncoder;
	let joined = encoder.join([" 0 ", "x"]);
	assert_eq!(joined, "_1_0_1__0_x");
	assert_eq!(encoder.split(&joined), vec![" 0 ", "x"]);
}

#[test]
fn test_split_schema_name_two_parts() {
	let parsed = split_schema_name("plone_0_page").unwrap();
	assert_eq!(
		parsed,
		SchemaName {
			prefix: "plone".into(),
			portal_type: "page".into(),
			schema: String::new(),
		}
	);
}

#[test]
fn test_split_schema_name_three_parts() {
	let parsed: SchemaName = "site_4_sub_0_news_1_item_0_extra".parse().unwrap();
	assert_eq!(parsed.prefix, "site/sub");
	assert_eq!(parsed.portal_type, "news item");
	assert_eq!(parsed.schema, "extra");
}

#[test]
fn test_split_schema_name_invalid_arity() {
	assert_eq!(
		split_schema_name("page").unwrap_err(),
		SchemaError::InvalidName {
			name: "page".into(),
			parts: 1,
		}
	);
	assert_eq!(
		split_schema_name("a_0_b_0_c_0_d").unwrap_err(),
		SchemaError::InvalidName {
			name: "a_0_b_0_c_0_d".into(),
			parts: 4,
		}
	);
	assert!(schema_name_to_portal_type("").is_err());
}

#[test]
fn test_portal_type_to_schema_name() {
	assert_eq!(portal_type_to_schema_name("page", "", None), "plone_0_page");
	assert_eq!(portal_type_to_schema_name("page", "", Some("")), "plone_0_page");
	assert_eq!(
		portal_type_to_schema_name("news-item", "extra", Some("site/sub")),
		"site_4_sub_0_news_3_item_0_extra"
	);
	assert_eq!(
		schema_name_to_portal_type(&portal_type_to_schema_name("news-item", "", None)).unwrap(),
		"news-item"
	);
}

fn arb_component() -> impl Strategy<Value = String> {
	prop_oneof![
		"[a-z0-9_ ./-]{1,12}",
		"\\PC{1,12}",
	]
}

proptest! {
	/// Every string survives an encode/decode round trip.
	#[test]
	fn prop_decode_encode_roundtrip(s in "\\PC*") {
		let encoder = SchemaNameEncoder;
		prop_assert_eq!(encoder.decode(&encoder.encode(&s)), s);
	}

	/// Reserved-heavy strings survive an encode/decode round trip.
	#[test]
	fn prop_reserved_roundtrip(s in "[ ./\\-_0-4a]*") {
		let encoder = SchemaNameEncoder;
		prop_assert_eq!(encoder.decode(&encoder.encode(&s)), s);
	}

	/// Encoded components never contain a separator at a codeword boundary.
	#[test]
	fn prop_split_join_recovers_parts(parts in prop::collection::vec(arb_component(), 2..=3)) {
		let encoder = SchemaNameEncoder;
		prop_assert_eq!(encoder.split(&encoder.join(&parts)), parts);
	}

	/// Names of two or three components parse; the suffix defaults to empty.
	#[test]
	fn prop_split_schema_name_accepts_two_or_three(parts in prop::collection::vec(arb_component(), 2..=3)) {
		let parsed = split_schema_name(&SchemaNameEncoder.join(&parts)).unwrap();
		prop_assert_eq!(&parsed.prefix, &parts[0]);
		prop_assert_eq!(&parsed.portal_type, &parts[1]);
		prop_assert_eq!(parsed.schema.as_str(), parts.get(2).map_or("", String::as_str));
	}

	/// Any other component count is an invalid name.
	#[test]
	fn prop_split_schema_name_rejects_other_arity(parts in prop::collection::vec(arb_component(), 4..=6)) {
		let joined = SchemaNameEncoder.join(&parts);
		let is_invalid_name = matches!(
			split_schema_name(&joined),
			Err(SchemaError::InvalidName { parts: n, .. }) if n == parts.len()
		);
		prop_assert!(is_invalid_name);
	}
}
