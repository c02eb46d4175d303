//! Request filters and the shared row predicates.
//!
//! A [`FilterContext`] is built per request and threaded through the
//! aggregation calls. An empty season set and an absent one mean the same
//! thing: every season.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::{
    data::{EnrichedDelivery, Match},
    error::{StatsError, StatsResult},
};

/// Last powerplay over, 0-indexed.
pub const POWERPLAY_LAST_OVER: u8 = 5;
/// First death over, 0-indexed.
pub const DEATH_FIRST_OVER: u8 = 15;
/// Last over of a full innings, 0-indexed.
pub const DEATH_LAST_OVER: u8 = 19;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeasonFilter {
    seasons: BTreeSet<String>,
}

impl SeasonFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new<I, S>(seasons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            seasons: seasons
                .into_iter()
                .map(Into::into)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        self.seasons.is_empty()
    }

    pub fn admits(&self, season: &str) -> bool {
        self.seasons.is_empty() || self.seasons.contains(season)
    }

    pub fn seasons(&self) -> impl Iterator<Item = &str> {
        self.seasons.iter().map(String::as_str)
    }

    pub fn balls<'a>(
        &'a self,
        balls: &'a [EnrichedDelivery],
    ) -> impl Iterator<Item = &'a EnrichedDelivery> + 'a {
        balls.iter().filter(move |b| self.admits(&b.season))
    }

    pub fn matches<'a>(&'a self, matches: &'a [Match]) -> impl Iterator<Item = &'a Match> + 'a {
        matches.iter().filter(move |m| self.admits(&m.season))
    }
}

impl From<Option<Vec<String>>> for SeasonFilter {
    fn from(value: Option<Vec<String>>) -> Self {
        value.map(SeasonFilter::new).unwrap_or_default()
    }
}

/// One entity, optionally compared against a second.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pair {
    pub first: String,
    pub second: Option<String>,
}

impl Pair {
    pub fn single(first: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: None,
        }
    }

    pub fn both(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: Some(second.into()),
        }
    }

    /// Builds a pair from CLI-style values: empty strings are ignored and a
    /// repeated name collapses into a single entity.
    pub fn from_values(values: &[String]) -> Option<Self> {
        let mut names = values.iter().map(|v| v.trim()).filter(|v| !v.is_empty());
        let first = names.next()?.to_string();
        let second = names.next().filter(|s| *s != first).map(str::to_string);
        Some(Self { first, second })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.first.as_str()).chain(self.second.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names().any(|n| n == name)
    }

    /// Both names, or an error for comparisons that need two sides.
    pub fn require_both(&self, what: &'static str) -> StatsResult<(&str, &str)> {
        match self.second.as_deref() {
            Some(second) => Ok((self.first.as_str(), second)),
            None => Err(StatsError::MissingSelection { what }),
        }
    }
}

/// Everything a dashboard request can narrow on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterContext {
    pub seasons: SeasonFilter,
    pub teams: Option<Pair>,
    pub players: Option<Pair>,
}

impl FilterContext {
    pub fn with_seasons(seasons: SeasonFilter) -> Self {
        Self {
            seasons,
            ..Self::default()
        }
    }

    pub fn teams(&self) -> StatsResult<&Pair> {
        self.teams
            .as_ref()
            .ok_or(StatsError::MissingSelection { what: "team" })
    }

    pub fn players(&self) -> StatsResult<&Pair> {
        self.players
            .as_ref()
            .ok_or(StatsError::MissingSelection { what: "player" })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Powerplay,
    Middle,
    Death,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Powerplay, Phase::Middle, Phase::Death];

    /// Phase of a 0-indexed over.
    pub fn of_over(over: u8) -> Self {
        if over <= POWERPLAY_LAST_OVER {
            Phase::Powerplay
        } else if (DEATH_FIRST_OVER..=DEATH_LAST_OVER).contains(&over) {
            Phase::Death
        } else {
            Phase::Middle
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Powerplay => "Powerplay",
            Phase::Middle => "Middle",
            Phase::Death => "Death",
        }
    }
}
