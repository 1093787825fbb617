use subgraph_schema::{Entity, Field, ParsedSchema};

/// One entity and the fields shown in its table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySection {
    pub entity: Entity,
    pub fields: Vec<Field>,
}

/// Everything that ends up in the rendered page, in output order.
///
/// Derived fields are dropped on construction, so every field held here is
/// rendered as a table row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityDocument {
    sections: Vec<EntitySection>,
}

impl EntityDocument {
    /// Builds a document from entities paired with their extracted fields.
    ///
    /// Order is preserved; duplicate entities produce duplicate sections.
    #[must_use]
    pub fn new<I>(entities: I) -> Self
    where
        I: IntoIterator<Item = (Entity, Vec<Field>)>,
    {
        let sections = entities
            .into_iter()
            .map(|(entity, fields)| EntitySection {
                entity,
                fields: fields.into_iter().filter(|f| !f.is_derived()).collect(),
            })
            .collect();
        Self { sections }
    }

    #[must_use]
    pub fn from_parsed(parsed: &ParsedSchema) -> Self {
        Self::new(parsed.entities.iter().cloned())
    }

    #[must_use]
    pub fn sections(&self) -> &[EntitySection] {
        &self.sections
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of table rows across all sections.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.sections.iter().map(|section| section.fields.len()).sum()
    }
}
