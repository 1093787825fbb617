use std::fmt;

/// Name of a type declared with the `@entity` directive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity(String);

impl Entity {
    /// Returns `None` for an empty name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.is_empty() {
            None
        } else {
            Some(Self(name))
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }

    /// In-document anchor for this entity's section.
    #[must_use]
    pub fn anchor(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One line of an entity's field block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub(crate) name: String,
    pub(crate) raw_type: String,
    pub(crate) display_type: String,
    pub(crate) is_derived: bool,
}

impl Field {
    /// Left-hand side of the declaration. Kept verbatim, so an inline
    /// directive written before the colon stays part of the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type expression as written, e.g. `[Account!]!`.
    #[must_use]
    pub fn raw_type(&self) -> &str {
        &self.raw_type
    }

    /// Type expression as rendered. List-of-non-null types become a Markdown
    /// link to the element type's section; everything else equals
    /// [`Field::raw_type`].
    #[must_use]
    pub fn display_type(&self) -> &str {
        &self.display_type
    }

    /// Whether the declaration carries `@derivedFrom`.
    #[must_use]
    pub const fn is_derived(&self) -> bool {
        self.is_derived
    }
}

/// Every entity in a schema together with its fields, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSchema {
    pub entities: Vec<(Entity, Vec<Field>)>,
}

impl ParsedSchema {
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Fields of the first entity with the given name.
    #[must_use]
    pub fn fields_of(&self, name: &str) -> Option<&[Field]> {
        self.entities
            .iter()
            .find(|(entity, _)| entity.name() == name)
            .map(|(_, fields)| fields.as_slice())
    }
}
