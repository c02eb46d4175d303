//! Row types for the match and delivery tables plus cell parsing helpers.
//!
//! [`Match`] and [`Delivery`] mirror the two input files. [`EnrichedDelivery`]
//! is the joined, one-row-per-ball working table every aggregation reads.

use std::{fmt, ops::Deref, str::FromStr};

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::error::LoadError;

/// Dismissal kinds credited to the bowler.
pub const BOWLER_CREDITED_DISMISSALS: [DismissalKind; 6] = [
    DismissalKind::Bowled,
    DismissalKind::Caught,
    DismissalKind::Lbw,
    DismissalKind::Stumped,
    DismissalKind::CaughtAndBowled,
    DismissalKind::HitWicket,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TossDecision {
    Bat,
    Field,
}

impl FromStr for TossDecision {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bat" | "batting" => Ok(TossDecision::Bat),
            "field" | "fielding" | "bowl" => Ok(TossDecision::Field),
            other => Err(format!("unknown toss decision '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    Runs,
    Wickets,
    Tie,
    NoResult,
}

impl FromStr for MatchResult {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "runs" => Ok(MatchResult::Runs),
            "wickets" => Ok(MatchResult::Wickets),
            "tie" => Ok(MatchResult::Tie),
            "no result" | "no_result" => Ok(MatchResult::NoResult),
            other => Err(format!("unknown result '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtrasType {
    Wides,
    NoBalls,
    Byes,
    LegByes,
    Penalty,
}

impl FromStr for ExtrasType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "wides" | "wide" => Ok(ExtrasType::Wides),
            "noballs" | "noball" => Ok(ExtrasType::NoBalls),
            "byes" | "bye" => Ok(ExtrasType::Byes),
            "legbyes" | "legbye" => Ok(ExtrasType::LegByes),
            "penalty" => Ok(ExtrasType::Penalty),
            other => Err(format!("unknown extras type '{other}'")),
        }
    }
}

/// How a batter was dismissed. Kinds outside the known list are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DismissalKind {
    Bowled,
    Caught,
    Lbw,
    Stumped,
    CaughtAndBowled,
    HitWicket,
    RunOut,
    RetiredHurt,
    RetiredOut,
    ObstructingTheField,
    Other(String),
}

impl DismissalKind {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "bowled" => DismissalKind::Bowled,
            "caught" => DismissalKind::Caught,
            "lbw" => DismissalKind::Lbw,
            "stumped" => DismissalKind::Stumped,
            "caught and bowled" => DismissalKind::CaughtAndBowled,
            "hit wicket" => DismissalKind::HitWicket,
            "run out" => DismissalKind::RunOut,
            "retired hurt" => DismissalKind::RetiredHurt,
            "retired out" => DismissalKind::RetiredOut,
            "obstructing the field" => DismissalKind::ObstructingTheField,
            _ => DismissalKind::Other(value.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DismissalKind::Bowled => "bowled",
            DismissalKind::Caught => "caught",
            DismissalKind::Lbw => "lbw",
            DismissalKind::Stumped => "stumped",
            DismissalKind::CaughtAndBowled => "caught and bowled",
            DismissalKind::HitWicket => "hit wicket",
            DismissalKind::RunOut => "run out",
            DismissalKind::RetiredHurt => "retired hurt",
            DismissalKind::RetiredOut => "retired out",
            DismissalKind::ObstructingTheField => "obstructing the field",
            DismissalKind::Other(raw) => raw.as_str(),
        }
    }

    /// True for the kinds that count as a wicket in the bowler's figures.
    pub fn is_bowler_credited(&self) -> bool {
        BOWLER_CREDITED_DISMISSALS.contains(self)
    }
}

impl fmt::Display for DismissalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DismissalKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One fixture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    pub id: u64,
    pub season: String,
    pub date: Option<NaiveDate>,
    pub city: Option<String>,
    pub venue: String,
    pub team1: String,
    pub team2: String,
    pub toss_winner: String,
    pub toss_decision: TossDecision,
    pub winner: Option<String>,
    pub result: MatchResult,
    pub result_margin: Option<f64>,
    pub target_runs: Option<u32>,
    pub target_overs: Option<f64>,
    pub player_of_match: Option<String>,
    pub match_type: Option<String>,
    pub super_over: bool,
    pub method: Option<String>,
    pub umpire1: Option<String>,
    pub umpire2: Option<String>,
}

impl Match {
    pub fn involves(&self, team: &str) -> bool {
        self.team1 == team || self.team2 == team
    }
}

/// One ball bowled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Delivery {
    pub match_id: u64,
    pub inning: u8,
    pub over: u8,
    pub ball: u8,
    pub batting_team: String,
    pub bowling_team: String,
    pub batter: String,
    pub bowler: Option<String>,
    pub non_striker: Option<String>,
    pub batsman_runs: u32,
    pub extra_runs: u32,
    pub extras_type: Option<ExtrasType>,
    pub total_runs: u32,
    pub is_wicket: bool,
    pub player_dismissed: Option<String>,
    pub dismissal_kind: Option<DismissalKind>,
    pub fielder: Option<String>,
}

impl Delivery {
    /// Neither a wide nor a no-ball.
    pub fn is_legal(&self) -> bool {
        !matches!(
            self.extras_type,
            Some(ExtrasType::Wides) | Some(ExtrasType::NoBalls)
        )
    }

    /// A dismissal credited to the bowler.
    pub fn is_bowler_wicket(&self) -> bool {
        self.dismissal_kind
            .as_ref()
            .is_some_and(DismissalKind::is_bowler_credited)
    }

    pub fn bowler_name(&self) -> Option<&str> {
        self.bowler.as_deref()
    }

    pub fn bowled_by(&self, player: &str) -> bool {
        self.bowler.as_deref() == Some(player)
    }

    pub fn dismissed(&self, player: &str) -> bool {
        self.player_dismissed.as_deref() == Some(player)
    }
}

/// A delivery joined with the parent match fields aggregations need.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedDelivery {
    #[serde(flatten)]
    pub delivery: Delivery,
    pub season: String,
    pub venue: String,
    pub toss_winner: String,
    pub toss_decision: TossDecision,
    pub winner: Option<String>,
    pub target_runs: Option<u32>,
    pub target_overs: Option<f64>,
    pub player_of_match: Option<String>,
}

impl EnrichedDelivery {
    pub fn enrich(delivery: Delivery, parent: &Match) -> Self {
        Self {
            delivery,
            season: parent.season.clone(),
            venue: parent.venue.clone(),
            toss_winner: parent.toss_winner.clone(),
            toss_decision: parent.toss_decision,
            winner: parent.winner.clone(),
            target_runs: parent.target_runs,
            target_overs: parent.target_overs,
            player_of_match: parent.player_of_match.clone(),
        }
    }
}

impl Deref for EnrichedDelivery {
    type Target = Delivery;

    fn deref(&self) -> &Delivery {
        &self.delivery
    }
}

/// Absent-value tokens found in exported cricket datasets.
pub fn is_placeholder(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || matches!(
            trimmed.to_ascii_lowercase().as_str(),
            "na" | "n/a" | "null" | "none" | "nan"
        )
}

pub fn optional_text(value: &str) -> Option<String> {
    if is_placeholder(value) {
        None
    } else {
        Some(value.trim().to_string())
    }
}

pub fn required_text(column: &'static str, value: &str) -> Result<String, LoadError> {
    optional_text(value).ok_or_else(|| LoadError::InvalidValue {
        column,
        value: value.to_string(),
        reason: "value is required".to_string(),
    })
}

/// Parses an integer cell, accepting float renderings such as `12.0`.
pub fn optional_integer<T>(column: &'static str, value: &str) -> Result<Option<T>, LoadError>
where
    T: TryFrom<i64>,
{
    let Some(text) = optional_text(value) else {
        return Ok(None);
    };
    let invalid = |reason: String| LoadError::InvalidValue {
        column,
        value: text.clone(),
        reason,
    };
    let parsed = match text.parse::<i64>() {
        Ok(parsed) => parsed,
        Err(_) => {
            let float = text.parse::<f64>().map_err(|err| invalid(err.to_string()))?;
            if float.fract() != 0.0 {
                return Err(invalid("expected a whole number".to_string()));
            }
            float as i64
        }
    };
    T::try_from(parsed)
        .map(Some)
        .map_err(|_| invalid("out of range".to_string()))
}

pub fn required_integer<T>(column: &'static str, value: &str) -> Result<T, LoadError>
where
    T: TryFrom<i64>,
{
    optional_integer(column, value)?.ok_or_else(|| LoadError::InvalidValue {
        column,
        value: value.to_string(),
        reason: "value is required".to_string(),
    })
}

pub fn optional_float(column: &'static str, value: &str) -> Result<Option<f64>, LoadError> {
    let Some(text) = optional_text(value) else {
        return Ok(None);
    };
    text.parse::<f64>()
        .map(Some)
        .map_err(|err| LoadError::InvalidValue {
            column,
            value: text.clone(),
            reason: err.to_string(),
        })
}

pub fn parse_flag(column: &'static str, value: &str) -> Result<bool, LoadError> {
    let Some(text) = optional_text(value) else {
        return Ok(false);
    };
    match text.to_ascii_lowercase().as_str() {
        "1" | "y" | "yes" | "true" | "t" => Ok(true),
        "0" | "n" | "no" | "false" | "f" => Ok(false),
        _ => Err(LoadError::InvalidValue {
            column,
            value: text,
            reason: "expected a yes/no flag".to_string(),
        }),
    }
}

pub fn parse_enum<T>(column: &'static str, value: &str) -> Result<T, LoadError>
where
    T: FromStr<Err = String>,
{
    let text = required_text(column, value)?;
    text.parse::<T>().map_err(|reason| LoadError::InvalidValue {
        column,
        value: text,
        reason,
    })
}

pub fn parse_match_date(value: &str) -> Option<NaiveDate> {
    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d", "%d-%m-%Y"];
    let text = optional_text(value)?;
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&text, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(extras: Option<ExtrasType>, kind: Option<&str>) -> Delivery {
        Delivery {
            match_id: 1,
            inning: 1,
            over: 0,
            ball: 1,
            batting_team: "A".to_string(),
            bowling_team: "B".to_string(),
            batter: "x".to_string(),
            bowler: Some("y".to_string()),
            non_striker: None,
            batsman_runs: 0,
            extra_runs: 0,
            extras_type: extras,
            total_runs: 0,
            is_wicket: kind.is_some(),
            player_dismissed: kind.map(|_| "x".to_string()),
            dismissal_kind: kind.map(DismissalKind::parse),
            fielder: None,
        }
    }

    #[test]
    fn wides_and_no_balls_are_not_legal() {
        assert!(!ball(Some(ExtrasType::Wides), None).is_legal());
        assert!(!ball(Some(ExtrasType::NoBalls), None).is_legal());
        assert!(ball(Some(ExtrasType::LegByes), None).is_legal());
        assert!(ball(None, None).is_legal());
    }

    #[test]
    fn run_out_is_not_credited_to_bowler() {
        assert!(ball(None, Some("caught and bowled")).is_bowler_wicket());
        assert!(!ball(None, Some("run out")).is_bowler_wicket());
        assert!(!ball(None, Some("retired hurt")).is_bowler_wicket());
        assert!(!ball(None, Some("obstructing the field")).is_bowler_wicket());
    }

    #[test]
    fn unknown_dismissal_kind_is_kept_verbatim() {
        let kind = DismissalKind::parse("timed out");
        assert_eq!(kind, DismissalKind::Other("timed out".to_string()));
        assert_eq!(kind.as_str(), "timed out");
    }

    #[test]
    fn integers_accept_float_renderings_and_placeholders() {
        assert_eq!(optional_integer::<u32>("target_runs", "184.0").unwrap(), Some(184));
        assert_eq!(optional_integer::<u32>("target_runs", "NA").unwrap(), None);
        assert!(optional_integer::<u32>("target_runs", "18.5").is_err());
        assert!(optional_integer::<u8>("over", "-1").is_err());
    }

    #[test]
    fn match_dates_parse_common_formats() {
        let expected = NaiveDate::from_ymd_opt(2008, 4, 18);
        assert_eq!(parse_match_date("2008-04-18"), expected);
        assert_eq!(parse_match_date("18/04/2008"), expected);
        assert_eq!(parse_match_date("NA"), None);
    }
}
