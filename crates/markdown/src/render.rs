//! Markdown serialization.

use crate::{EntityDocument, EntitySection};
use std::fmt;

/// Page title used when none is configured.
pub const DEFAULT_TITLE: &str = "Subgraph Entities";

/// Placeholder written into every description cell.
const DESCRIPTION_PLACEHOLDER: &str = "...";

/// Rendering knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Text of the top-level `#` heading.
    pub title: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl RenderOptions {
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Renders `document` with the default title.
#[must_use]
pub fn render(document: &EntityDocument) -> String {
    render_with(document, &RenderOptions::default())
}

/// Renders `document` as Markdown.
///
/// The page is a title, a bullet index linking to each entity, then one
/// `##` section per entity with a `Field | Type | Description` table. Output
/// depends only on the inputs.
#[tracing::instrument(skip_all, fields(sections = document.sections().len()))]
#[must_use]
pub fn render_with(document: &EntityDocument, options: &RenderOptions) -> String {
    let markdown = Page { document, options }.to_string();
    tracing::debug!(bytes = markdown.len(), "Rendered document");
    markdown
}

struct Page<'a> {
    document: &'a EntityDocument,
    options: &'a RenderOptions,
}

impl fmt::Display for Page<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.options.title)?;
        writeln!(f)?;

        for section in self.document.sections() {
            writeln!(f, "* [{}](#{})", section.entity, section.entity.anchor())?;
        }
        writeln!(f)?;
        writeln!(f)?;

        for section in self.document.sections() {
            write_section(f, section)?;
        }
        Ok(())
    }
}

fn write_section(f: &mut fmt::Formatter<'_>, section: &EntitySection) -> fmt::Result {
    writeln!(f, "## {}", section.entity)?;
    writeln!(f, "| Field | Type | Description |")?;
    writeln!(f, "| --- | --- | --- |")?;
    for field in &section.fields {
        writeln!(
            f,
            "| {} | {} | {DESCRIPTION_PLACEHOLDER} |",
            field.name(),
            field.display_type()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use subgraph_schema::parse_schema;

    fn document(sdl: &str) -> EntityDocument {
        EntityDocument::from_parsed(&parse_schema(sdl).unwrap())
    }

    #[test]
    fn test_render_single_entity() {
        let markdown = render(&document(
            "type Foo @entity {\n  id: ID!\n  owner: [Account!]!\n  computed: BigInt! @derivedFrom(field: \"x\")\n}",
        ));

        assert_eq!(
            markdown,
            "# Subgraph Entities\n\
             \n\
             * [Foo](#foo)\n\
             \n\
             \n\
             ## Foo\n\
             | Field | Type | Description |\n\
             | --- | --- | --- |\n\
             | id | ID! | ... |\n\
             | owner | [[Account!]!](#account) | ... |\n"
        );
    }

    #[test]
    fn test_render_empty_document() {
        assert_eq!(
            render(&EntityDocument::default()),
            "# Subgraph Entities\n\n\n\n"
        );
    }

    #[test]
    fn test_entity_without_stored_fields_keeps_table_header() {
        let markdown = render(&document(
            "type Account @entity {\n  positions: [Position!]! @derivedFrom(field: \"owner\")\n}",
        ));
        assert!(markdown.ends_with(
            "## Account\n| Field | Type | Description |\n| --- | --- | --- |\n"
        ));
    }

    #[test]
    fn test_custom_title() {
        let options = RenderOptions::default().with_title("Uniswap V2 Entities");
        let markdown = render_with(&EntityDocument::default(), &options);
        assert!(markdown.starts_with("# Uniswap V2 Entities\n"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let doc = document(subgraph_test_utils::fixtures::DEX_SCHEMA);
        assert_eq!(render(&doc), render(&doc));
    }
}
