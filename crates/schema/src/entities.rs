//! Entity discovery.

use crate::{Entity, NormalizedSchema};

/// Delimiter that starts every object type declaration.
pub(crate) const TYPE_KEYWORD: &str = "type ";

/// Directive that marks a type as a stored entity.
pub const ENTITY_MARKER: &str = "@entity";

/// Lists the entity names declared in `schema`, in order of appearance.
///
/// The text is split on `"type "`; every chunk after the first one is a
/// candidate declaration and qualifies when it mentions `@entity` anywhere.
/// The entity name is the first whitespace-delimited token of the chunk.
/// Duplicate declarations yield duplicate names.
#[must_use]
#[tracing::instrument(skip(schema), fields(schema_len = schema.len()))]
pub fn extract_entities(schema: &NormalizedSchema) -> Vec<Entity> {
    let entities: Vec<Entity> = schema
        .as_str()
        .split(TYPE_KEYWORD)
        .skip(1)
        .filter(|chunk| chunk.contains(ENTITY_MARKER))
        .filter_map(|chunk| {
            let name = chunk.split_whitespace().next()?;
            tracing::trace!(entity = name, "Found entity declaration");
            Entity::new(name)
        })
        .collect();

    tracing::debug!(count = entities.len(), "Extracted entities");
    entities
}
