//! Entity and field extraction for subgraph GraphQL schemas.
//!
//! This crate deliberately does not implement a GraphQL grammar. Subgraph
//! schemas follow a narrow convention (object types marked `@entity`, one
//! field per line, `@derivedFrom` on reverse relations), and the extraction
//! here relies on that convention through plain text splitting.
//!
//! The pipeline is:
//!
//! 1. [`normalize`] strips descriptions and `#` comments.
//! 2. [`extract_entities`] finds the `@entity` type names.
//! 3. [`extract_fields`] parses each entity's field block.
//!
//! [`parse_schema`] runs all three.
//!
//! ```
//! use subgraph_schema::parse_schema;
//!
//! let parsed = parse_schema("type Token @entity {\n  id: ID!\n}\n").unwrap();
//! assert_eq!(parsed.entity_count(), 1);
//! assert_eq!(parsed.fields_of("Token").unwrap()[0].raw_type(), "ID!");
//! ```

mod entities;
mod error;
mod fields;
mod model;
mod normalize;

pub use entities::{extract_entities, ENTITY_MARKER};
pub use error::{Result, SchemaError};
pub use fields::{extract_fields, DERIVED_MARKER};
pub use model::{Entity, Field, ParsedSchema};
pub use normalize::{normalize, NormalizedSchema};

/// Normalizes `raw` and extracts every entity with its fields.
///
/// Stops at the first entity whose fields cannot be extracted.
#[tracing::instrument(skip(raw), fields(raw_len = raw.len()))]
pub fn parse_schema(raw: &str) -> Result<ParsedSchema> {
    let normalized = normalize(raw);
    let entities = extract_entities(&normalized)
        .into_iter()
        .map(|entity| {
            let fields = extract_fields(&entity, &normalized)?;
            Ok((entity, fields))
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::info!(entities = entities.len(), "Parsed schema");
    Ok(ParsedSchema { entities })
}
