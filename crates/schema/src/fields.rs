//! Field extraction for a single entity.
//!
//! Works line by line on the text between the entity's `{` and the first
//! `}` after it. Each non-blank line is one `name: Type [directives]`
//! declaration.

use crate::entities::TYPE_KEYWORD;
use crate::{Entity, Field, NormalizedSchema, Result, SchemaError};

/// Directive that marks a field as computed from a reverse relationship.
pub const DERIVED_MARKER: &str = "@derivedFrom";

/// Separator between a field name and its type.
const NAME_SEPARATOR: &str = ": ";

/// Extracts the fields of `entity`, in declaration order.
///
/// Derived fields are included and flagged; callers decide whether to show
/// them. Either every line parses or the whole call fails.
#[tracing::instrument(skip(schema), fields(entity = %entity))]
pub fn extract_fields(entity: &Entity, schema: &NormalizedSchema) -> Result<Vec<Field>> {
    let declaration = format!("{TYPE_KEYWORD}{} ", entity.name());
    let (_, declaration_body) = schema.as_str().split_once(&declaration).ok_or_else(|| {
        SchemaError::MissingDeclaration {
            entity: entity.name().to_string(),
        }
    })?;

    let block = field_block(declaration_body).ok_or_else(|| SchemaError::MissingFieldBlock {
        entity: entity.name().to_string(),
    })?;

    let fields = block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| parse_field_line(entity, line))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        fields = fields.len(),
        derived = fields.iter().filter(|field| field.is_derived()).count(),
        "Extracted fields"
    );
    Ok(fields)
}

/// Text strictly between the first `{` and the first `}` after it.
fn field_block(declaration_body: &str) -> Option<&str> {
    let (_, after_open) = declaration_body.split_once('{')?;
    let (block, _) = after_open.split_once('}')?;
    Some(block)
}

fn parse_field_line(entity: &Entity, line: &str) -> Result<Field> {
    let malformed = || SchemaError::MalformedField {
        entity: entity.name().to_string(),
        line: line.to_string(),
    };

    let (name, type_and_rest) = line.split_once(NAME_SEPARATOR).ok_or_else(malformed)?;
    let name = name.trim();
    let raw_type = type_and_rest.split_whitespace().next().unwrap_or_default();
    if name.is_empty() || raw_type.is_empty() {
        return Err(malformed());
    }

    tracing::trace!(field = name, raw_type, "Parsed field");
    Ok(Field {
        name: name.to_string(),
        raw_type: raw_type.to_string(),
        display_type: display_type(raw_type),
        is_derived: line.contains(DERIVED_MARKER),
    })
}

/// Anchor of the element type for `[T!]` and `[T!]!` expressions.
///
/// Single references such as `Token!` are deliberately not linked.
pub(crate) fn list_anchor(raw_type: &str) -> Option<String> {
    if !(raw_type.starts_with('[') && raw_type.contains("!]")) {
        return None;
    }
    let element: String = raw_type
        .chars()
        .filter(|c| !matches!(c, '!' | '[' | ']'))
        .collect();
    Some(element.to_lowercase())
}

fn display_type(raw_type: &str) -> String {
    match list_anchor(raw_type) {
        Some(anchor) => format!("[{raw_type}](#{anchor})"),
        None => raw_type.to_string(),
    }
}
