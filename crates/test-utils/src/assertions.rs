//! Helpers for asserting on rendered Markdown.
//!
//! These read documents back the way a reader would, so tests can check
//! structure (index order, table rows) without matching whole strings.

/// Link texts of the bullet index, in order.
///
/// ```
/// use subgraph_test_utils::assertions::index_entries;
///
/// let md = "# Subgraph Entities\n\n* [Token](#token)\n* [Pair](#pair)\n";
/// assert_eq!(index_entries(md), vec!["Token", "Pair"]);
/// ```
#[must_use]
pub fn index_entries(markdown: &str) -> Vec<String> {
    markdown
        .lines()
        .filter_map(|line| line.strip_prefix("* ["))
        .filter_map(|rest| rest.split_once(']'))
        .map(|(text, _)| text.to_string())
        .collect()
}

/// Headings of every `##` section, in order.
#[must_use]
pub fn section_headings(markdown: &str) -> Vec<String> {
    markdown
        .lines()
        .filter_map(|line| line.strip_prefix("## "))
        .map(str::to_string)
        .collect()
}

/// Data rows of the table under the first `## heading` section.
///
/// The header and separator rows are skipped. Each row is returned as its
/// trimmed cells. Returns `None` if the section does not exist.
#[must_use]
pub fn table_rows(markdown: &str, heading: &str) -> Option<Vec<Vec<String>>> {
    let marker = format!("## {heading}");
    let mut lines = markdown.lines().skip_while(|line| *line != marker);
    lines.next()?;

    let rows = lines
        .take_while(|line| line.starts_with('|'))
        .skip(2)
        .map(split_row)
        .collect();
    Some(rows)
}

fn split_row(line: &str) -> Vec<String> {
    let inner = line.trim().trim_start_matches('|').trim_end_matches('|');
    inner.split(" | ").map(|cell| cell.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "# Subgraph Entities\n\n* [Token](#token)\n* [Pair](#pair)\n\n\n## Token\n| Field | Type | Description |\n| --- | --- | --- |\n| id | ID! | ... |\n| balance | BigInt! | ... |\n## Pair\n| Field | Type | Description |\n| --- | --- | --- |\n";

    #[test]
    fn test_index_entries() {
        assert_eq!(index_entries(DOC), vec!["Token", "Pair"]);
    }

    #[test]
    fn test_section_headings() {
        assert_eq!(section_headings(DOC), vec!["Token", "Pair"]);
    }

    #[test]
    fn test_table_rows() {
        let rows = table_rows(DOC, "Token").unwrap();
        assert_eq!(
            rows,
            vec![
                vec!["id".to_string(), "ID!".to_string(), "...".to_string()],
                vec!["balance".to_string(), "BigInt!".to_string(), "...".to_string()],
            ]
        );
    }

    #[test]
    fn test_table_rows_empty_section() {
        assert_eq!(table_rows(DOC, "Pair"), Some(vec![]));
    }

    #[test]
    fn test_table_rows_missing_section() {
        assert_eq!(table_rows(DOC, "Swap"), None);
    }
}
