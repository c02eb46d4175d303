//! Result shapes returned by the aggregation engine.
//!
//! These are plain data: a presentation layer turns them into tables or
//! charts. Everything serialises to JSON.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::metrics::{cmp_f64, percentage};

/// A named value: one bar of a bar chart or one row of a ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry<T> {
    pub name: String,
    pub value: T,
}

impl<T> Entry<T> {
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// One slice of a distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Share {
    pub label: String,
    pub count: u64,
    pub percent: f64,
}

/// One season on a per-season line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonPoint<T> {
    pub season: String,
    pub value: T,
    /// Team the entity represented that season, when meaningful.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
}

/// A per-season line for one team or player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series<T> {
    pub name: String,
    pub points: Vec<SeasonPoint<T>>,
}

impl<T: Copy> Series<T> {
    pub fn value_at(&self, season: &str) -> Option<T> {
        self.points
            .iter()
            .find(|p| p.season == season)
            .map(|p| p.value)
    }
}

/// A categorical breakdown for one team or player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breakdown<T> {
    pub name: String,
    pub entries: Vec<Entry<T>>,
}

impl<T: Copy> Breakdown<T> {
    pub fn value_of(&self, key: &str) -> Option<T> {
        self.entries.iter().find(|e| e.name == key).map(|e| e.value)
    }
}

/// Turns label counts into percentage shares, preserving input order.
pub fn shares<I>(counts: I) -> Vec<Share>
where
    I: IntoIterator<Item = (String, u64)>,
{
    let counts = counts.into_iter().collect::<Vec<_>>();
    let total = counts.iter().map(|(_, count)| *count).sum::<u64>();
    counts
        .into_iter()
        .map(|(label, count)| Share {
            label,
            count,
            percent: percentage(count, total),
        })
        .collect()
}

/// Counts occurrences of each name.
pub fn tally<'a, I>(names: I) -> BTreeMap<String, u64>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = BTreeMap::new();
    for name in names {
        *counts.entry(name.to_string()).or_insert(0) += 1;
    }
    counts
}

/// The highest count, ties broken by name.
pub fn leader(totals: BTreeMap<String, u64>) -> Option<Entry<u64>> {
    top_n_desc(totals, 1).into_iter().next()
}

/// Sorts descending by value, ties broken by name, and keeps the first `n`.
pub fn top_n_desc(totals: BTreeMap<String, u64>, n: usize) -> Vec<Entry<u64>> {
    let mut entries = totals
        .into_iter()
        .map(|(name, value)| Entry { name, value })
        .collect::<Vec<_>>();
    entries.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
    entries.truncate(n);
    entries
}

/// Sorts ascending by a float value, ties broken by name, and keeps the first `n`.
pub fn bottom_n_f64(mut entries: Vec<Entry<f64>>, n: usize) -> Vec<Entry<f64>> {
    entries.sort_by(|a, b| cmp_f64(a.value, b.value).then_with(|| a.name.cmp(&b.name)));
    entries.truncate(n);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shares_sum_to_one_hundred() {
        let rows = shares(vec![("4s".to_string(), 1), ("6s".to_string(), 3)]);
        assert_eq!(rows[0].percent, 25.0);
        assert_eq!(rows[1].percent, 75.0);
    }

    #[test]
    fn top_n_breaks_ties_by_name() {
        let totals = BTreeMap::from([
            ("b".to_string(), 5),
            ("a".to_string(), 5),
            ("c".to_string(), 9),
        ]);
        let top = top_n_desc(totals, 2);
        assert_eq!(top, vec![Entry::new("c", 9), Entry::new("a", 5)]);
    }

    #[test]
    fn leader_of_tally() {
        let counts = tally(["x", "y", "y", "x", "z"]);
        assert_eq!(counts["y"], 2);
        assert_eq!(leader(counts), Some(Entry::new("x", 2)));
        assert_eq!(leader(BTreeMap::new()), None);
    }
}
