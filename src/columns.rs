//! Column contracts for the two input tables.
//!
//! Header names are trimmed and lower-cased before lookup so that exports with
//! stray whitespace or capitalised headers still resolve.

use std::collections::HashMap;

use crate::error::LoadError;

pub const MATCH_COLUMNS: &[&str] = &[
    "id",
    "season",
    "venue",
    "team1",
    "team2",
    "toss_winner",
    "toss_decision",
    "winner",
    "result",
    "result_margin",
    "target_runs",
    "target_overs",
];

pub const DELIVERY_COLUMNS: &[&str] = &[
    "match_id",
    "inning",
    "over",
    "ball",
    "batting_team",
    "bowling_team",
    "batter",
    "bowler",
    "batsman_runs",
    "extra_runs",
    "extras_type",
    "total_runs",
    "is_wicket",
    "player_dismissed",
    "dismissal_kind",
    "fielder",
];

/// Position of each header in a record.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    table: &'static str,
    positions: HashMap<String, usize>,
}

impl ColumnMap {
    /// Indexes `headers` and checks every name in `required` is present.
    pub fn new(
        table: &'static str,
        headers: &[String],
        required: &[&'static str],
    ) -> Result<Self, LoadError> {
        let positions = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (normalize_header(name), idx))
            .collect::<HashMap<_, _>>();
        if let Some(missing) = required.iter().find(|name| !positions.contains_key(**name)) {
            return Err(LoadError::MissingColumn {
                table,
                column: *missing,
            });
        }
        Ok(Self { table, positions })
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    pub fn contains(&self, column: &str) -> bool {
        self.positions.contains_key(column)
    }

    /// Cell for `column`; absent columns and short records read as empty.
    pub fn get<'r>(&self, record: &'r [String], column: &str) -> &'r str {
        self.positions
            .get(column)
            .and_then(|idx| record.get(*idx))
            .map(String::as_str)
            .unwrap_or("")
    }
}

fn normalize_header(name: &str) -> String {
    name.trim().trim_start_matches('\u{feff}').to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn headers_are_matched_case_insensitively() {
        let map = ColumnMap::new("matches", &headers(&[" ID ", "Season"]), &["id", "season"])
            .expect("columns present");
        let record = headers(&["7", "2011"]);
        assert_eq!(map.get(&record, "season"), "2011");
        assert_eq!(map.get(&record, "venue"), "");
    }

    #[test]
    fn missing_required_column_is_reported() {
        let err = ColumnMap::new("deliveries", &headers(&["match_id"]), DELIVERY_COLUMNS)
            .expect_err("inning missing");
        assert!(matches!(
            err,
            LoadError::MissingColumn {
                table: "deliveries",
                column: "inning"
            }
        ));
    }
}
