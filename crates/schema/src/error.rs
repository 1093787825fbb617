use thiserror::Error;

pub type Result<T> = std::result::Result<T, SchemaError>;

/// Errors raised while extracting the fields of an entity.
///
/// Any of these aborts document generation for the whole schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Entity '{entity}' has no `type {entity} ` declaration")]
    MissingDeclaration { entity: String },

    #[error("Entity '{entity}' has no `{{ ... }}` field block")]
    MissingFieldBlock { entity: String },

    #[error("Entity '{entity}' has a malformed field declaration: '{line}'")]
    MalformedField { entity: String, line: String },
}

impl SchemaError {
    /// Name of the entity that failed to parse.
    #[must_use]
    pub fn entity(&self) -> &str {
        match self {
            Self::MissingDeclaration { entity }
            | Self::MissingFieldBlock { entity }
            | Self::MalformedField { entity, .. } => entity,
        }
    }
}
