//! Plain-text table rendering for the command line.

use std::fmt::Write as _;

/// A titled grid of cells. Columns whose every cell parses as a number are
/// right-aligned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    title: Option<String>,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: None,
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn push<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.rows.push(row.into_iter().map(|c| c.to_string()).collect());
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let columns = self.headers.len();
        let mut widths = self.headers.iter().map(|h| display_width(h)).collect::<Vec<_>>();
        for row in &self.rows {
            for (idx, cell) in row.iter().enumerate().take(columns) {
                widths[idx] = widths[idx].max(display_width(cell));
            }
        }
        let numeric = (0..columns)
            .map(|idx| {
                !self.rows.is_empty()
                    && self
                        .rows
                        .iter()
                        .all(|row| row.get(idx).is_some_and(|cell| is_numeric(cell)))
            })
            .collect::<Vec<_>>();

        let mut output = String::new();
        if let Some(title) = &self.title {
            let _ = writeln!(output, "{title}");
        }
        let _ = writeln!(output, "{}", format_row(&self.headers, &widths, &numeric));
        let rule = widths.iter().map(|w| "-".repeat((*w).max(3))).collect::<Vec<_>>();
        let _ = writeln!(output, "{}", format_row(&rule, &widths, &vec![false; columns]));
        if self.rows.is_empty() {
            let _ = writeln!(output, "(no data)");
        }
        for row in &self.rows {
            let _ = writeln!(output, "{}", format_row(row, &widths, &numeric));
        }
        output
    }

    pub fn print(&self) {
        print!("{}", self.render());
    }
}

/// Two-column key/value table.
pub fn key_values<I, K, V>(title: &str, pairs: I) -> Table
where
    I: IntoIterator<Item = (K, V)>,
    K: ToString,
    V: ToString,
{
    let mut table = Table::new(["Stat", "Value"]).titled(title);
    for (key, value) in pairs {
        table.push([key.to_string(), value.to_string()]);
    }
    table
}

/// Formats a derived metric with two decimals.
pub fn fixed2(value: f64) -> String {
    format!("{value:.2}")
}

fn format_row(values: &[String], widths: &[usize], numeric: &[bool]) -> String {
    let cells = values
        .iter()
        .zip(widths)
        .zip(numeric)
        .map(|((value, width), right)| {
            let cell = value.replace(['\n', '\r', '\t'], " ");
            let pad = " ".repeat(width.saturating_sub(display_width(&cell)));
            if *right { format!("{pad}{cell}") } else { format!("{cell}{pad}") }
        })
        .collect::<Vec<_>>();
    cells.join("  ").trim_end().to_string()
}

fn display_width(value: &str) -> usize {
    value.chars().count()
}

fn is_numeric(cell: &str) -> bool {
    cell == "-" || cell.parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_columns_are_right_aligned() {
        let mut table = Table::new(["Batter", "Runs"]);
        table.push(["V Kohli", "8004"]);
        table.push(["MS Dhoni", "52"]);
        let rendered = table.render();
        let lines = rendered.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "Batter    Runs");
        assert_eq!(lines[2], "V Kohli   8004");
        assert_eq!(lines[3], "MS Dhoni    52");
    }

    #[test]
    fn empty_tables_say_so() {
        let table = Table::new(["Team", "Wins"]).titled("Wins");
        let rendered = table.render();
        assert!(rendered.starts_with("Wins\n"));
        assert!(rendered.contains("(no data)"));
    }
}
