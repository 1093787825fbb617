//! Integration tests for subgraph-schema.
//!
//! These run the full normalize → entities → fields pipeline over realistic
//! subgraph schemas.

use subgraph_schema::{
    extract_entities, extract_fields, normalize, parse_schema, Entity, SchemaError,
};
use subgraph_test_utils::fixtures::{DEX_ENTITIES, DEX_SCHEMA, ERC20_SCHEMA, UNCLOSED_SCHEMA};

fn stored(fields: &[subgraph_schema::Field]) -> Vec<(&str, &str)> {
    fields
        .iter()
        .filter(|field| !field.is_derived())
        .map(|field| (field.name(), field.display_type()))
        .collect()
}

#[test]
fn test_dex_entities_in_order() {
    let entities = extract_entities(&normalize(DEX_SCHEMA));
    let names: Vec<&str> = entities.iter().map(Entity::name).collect();
    assert_eq!(names, DEX_ENTITIES);
}

#[test]
fn test_dex_stored_fields() {
    let parsed = parse_schema(DEX_SCHEMA).unwrap();

    assert_eq!(
        stored(parsed.fields_of("Factory").unwrap()),
        vec![
            ("id", "ID!"),
            ("pairCount", "Int!"),
            ("totalVolumeUSD", "BigDecimal!"),
        ]
    );
    assert_eq!(
        stored(parsed.fields_of("Token").unwrap()),
        vec![
            ("id", "ID!"),
            ("symbol", "String!"),
            ("name", "String!"),
            ("decimals", "BigInt!"),
        ]
    );
    assert_eq!(
        stored(parsed.fields_of("Pair").unwrap()),
        vec![
            ("id", "ID!"),
            ("token0", "Token!"),
            ("token1", "Token!"),
            ("reserve0", "BigDecimal!"),
            ("reserve1", "BigDecimal!"),
            ("hourData", "[[PairHourData!]](#pairhourdata)"),
        ]
    );
    assert_eq!(
        stored(parsed.fields_of("Swap").unwrap()),
        vec![
            ("id", "ID!"),
            ("pair", "Pair!"),
            ("sender", "Bytes!"),
            ("amountUSD", "BigDecimal!"),
        ]
    );
}

#[test]
fn test_dex_derived_fields_are_kept_but_flagged() {
    let parsed = parse_schema(DEX_SCHEMA).unwrap();
    let token = parsed.fields_of("Token").unwrap();

    let derived: Vec<&str> = token
        .iter()
        .filter(|field| field.is_derived())
        .map(subgraph_schema::Field::name)
        .collect();
    assert_eq!(derived, vec!["pairBase", "pairQuote"]);
    assert_eq!(token.len(), 6);
}

#[test]
fn test_non_entity_types_are_skipped() {
    let parsed = parse_schema(ERC20_SCHEMA).unwrap();
    assert_eq!(parsed.entity_count(), 1);
    assert!(parsed.fields_of("Transfer").is_none());
    assert_eq!(
        stored(parsed.fields_of("Token").unwrap()),
        vec![("id", "ID!"), ("balance", "BigInt!")]
    );
}

#[test]
fn test_unclosed_block_aborts_whole_parse() {
    let err = parse_schema(UNCLOSED_SCHEMA).unwrap_err();
    assert_eq!(
        err,
        SchemaError::MissingFieldBlock {
            entity: "Account".to_string()
        }
    );
}

#[test]
fn test_one_bad_entity_fails_even_after_good_ones() {
    let sdl = "type Good @entity {\n  id: ID!\n}\ntype Bad @entity {\n  id ID!\n}\n";
    let err = parse_schema(sdl).unwrap_err();
    assert_eq!(err.entity(), "Bad");
}

#[test]
fn test_entity_on_its_own_line_has_no_declaration() {
    let sdl = "type Token\n@entity {\n  id: ID!\n}\n";
    let err = parse_schema(sdl).unwrap_err();
    assert!(matches!(err, SchemaError::MissingDeclaration { .. }));
}

#[test]
fn test_duplicate_entities_share_first_declaration() {
    let sdl = "type A @entity {\n  id: ID!\n}\ntype A @entity {\n  id: ID!\n  extra: Int!\n}\n";
    let parsed = parse_schema(sdl).unwrap();
    assert_eq!(parsed.entity_count(), 2);
    assert_eq!(parsed.entities[0].1, parsed.entities[1].1);
    assert_eq!(parsed.entities[1].1.len(), 1);
}

#[test]
fn test_extract_fields_is_pure() {
    let normalized = normalize(DEX_SCHEMA);
    let pair = Entity::new("Pair").unwrap();
    let first = extract_fields(&pair, &normalized).unwrap();
    let second = extract_fields(&pair, &normalized).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_empty_schema() {
    let parsed = parse_schema("").unwrap();
    assert!(parsed.is_empty());
}
