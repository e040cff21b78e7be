/// Header and data rows of a table, as raw cell text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableModel {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableModel {
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Cells of `row` paired with the header columns. Extra cells are dropped
    /// and missing ones come back empty.
    pub fn cells<'a>(&self, row: &'a [String]) -> impl Iterator<Item = &'a str> {
        let count = self.column_count();
        row.iter()
            .map(String::as_str)
            .chain(std::iter::repeat(""))
            .take(count)
    }
}

/// Rebuild a table from pipe-delimited lines.
///
/// Used for text the Markdown lexer did not accept as a table. Returns `None`
/// when the lines do not form a header, a separator and at least one data row.
pub fn parse<S: AsRef<str>>(lines: &[S]) -> Option<TableModel> {
    let lines: Vec<&str> = lines
        .iter()
        .map(|line| line.as_ref().trim())
        .filter(|line| !line.is_empty() && *line != "|")
        .collect();

    log::debug!("table candidate with {} lines", lines.len());

    if lines.len() < 3 {
        log::debug!("not enough lines for a table, need at least 3");
        return None;
    }

    let headers = split_cells(lines[0]);
    let separator_valid = is_separator(lines[1]);
    let rows: Vec<Vec<String>> = lines[2..].iter().map(|line| split_cells(line)).collect();

    if !separator_valid || headers.is_empty() || rows.is_empty() {
        log::debug!(
            "table validation failed: separator_valid={}, headers={}, rows={}",
            separator_valid,
            headers.len(),
            rows.len()
        );
        return None;
    }

    Some(TableModel { headers, rows })
}

fn split_cells(line: &str) -> Vec<String> {
    line.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_separator(line: &str) -> bool {
    line.chars()
        .all(|ch| matches!(ch, '-' | ':' | '|') || ch.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_table() {
        let table = parse(&["| A | B |", "| - | - |", "| 1 | 2 |"]).unwrap();
        assert_eq!(table.headers, vec!["A", "B"]);
        assert_eq!(table.rows, vec![vec!["1", "2"]]);
    }

    #[test]
    fn too_few_lines() {
        assert_eq!(parse(&["| A | B |", "| - | - |"]), None);
        assert_eq!(parse(&["| A |", "", "|", "| - |"]), None);
    }

    #[test]
    fn blank_and_pipe_only_lines_are_dropped() {
        let table = parse(&["", "| A |", "|", "|---|", "   ", "| 1 |", "| 2 |"]).unwrap();
        assert_eq!(table.headers, vec!["A"]);
        assert_eq!(table.rows, vec![vec!["1"], vec!["2"]]);
    }

    #[test]
    fn separator_with_letters_is_rejected() {
        assert_eq!(parse(&["| A | B |", "| x | - |", "| 1 | 2 |"]), None);
    }

    #[test]
    fn alignment_separator_is_accepted() {
        let table = parse(&["A | B", ":--|--:", "1 | 2"]).unwrap();
        assert_eq!(table.headers, vec!["A", "B"]);
    }

    #[test]
    fn empty_header_is_rejected() {
        assert_eq!(parse(&["| |", "|-|", "| 1 |"]), None);
    }

    #[test]
    fn empty_cells_are_dropped() {
        let table = parse(&["| A | B | C |", "|---|---|---|", "| 1 |   | 3 |"]).unwrap();
        assert_eq!(table.rows, vec![vec!["1", "3"]]);
    }

    #[test]
    fn cells_are_padded_and_truncated_to_headers() {
        let table = TableModel {
            headers: vec!["A".into(), "B".into()],
            rows: vec![],
        };
        let short = vec!["1".to_string()];
        let long = vec!["1".to_string(), "2".to_string(), "3".to_string()];
        assert_eq!(table.cells(&short).collect::<Vec<_>>(), vec!["1", ""]);
        assert_eq!(table.cells(&long).collect::<Vec<_>>(), vec!["1", "2"]);
    }
}
