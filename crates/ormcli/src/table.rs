//! Plain-text table rendering.

use comfy_table::{ContentArrangement, Table, presets::NOTHING};

/// Render rows as a borderless table, optionally with a header row.
pub fn render_table<R, C>(rows: R, headers: Option<&[&str]>) -> String
where
    R: IntoIterator<Item = Vec<C>>,
    C: Into<comfy_table::Cell>,
{
    let mut table = Table::new();
    table
        .load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic);

    if let Some(headers) = headers {
        table.set_header(headers.to_vec());
    }
    for row in rows {
        table.add_row(row);
    }

    // No left padding: lines start flush with the first cell, and columns
    // are separated by two spaces.
    let columns: Vec<_> = table.column_iter_mut().collect();
    let last = columns.len().saturating_sub(1);
    for (idx, column) in columns.into_iter().enumerate() {
        column.set_padding(if idx == last { (0, 0) } else { (0, 2) });
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_rows_without_borders() {
        let rendered = render_table(
            vec![
                vec!["name".to_string(), "alice".to_string()],
                vec!["age".to_string(), "30".to_string()],
            ],
            None,
        );
        assert!(rendered.contains("name"));
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains('|'));
        assert!(!rendered.contains('+'));
    }

    #[test]
    fn lines_start_flush_with_the_first_cell() {
        let rendered = render_table(
            vec![
                vec!["name".to_string(), "alice".to_string()],
                vec!["age".to_string(), "30".to_string()],
            ],
            Some(&["field", "value"]),
        );
        for line in rendered.lines() {
            assert!(!line.starts_with(' '), "indented line: {line:?}");
        }
        assert!(rendered.lines().next().unwrap().starts_with("field"));
    }

    #[test]
    fn header_row_comes_first() {
        let rendered = render_table(
            vec![vec!["1".to_string(), "x".to_string()]],
            Some(&["id", "title"]),
        );
        let first = rendered.lines().next().unwrap();
        assert!(first.contains("id"));
        assert!(first.contains("title"));
    }
}
