//! Career-threshold player classification.
//!
//! Runs once over the full, unfiltered delivery table. The three lists are
//! ranked independently, so one player can appear in more than one of them.

use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;

use crate::data::Delivery;

pub const BATSMAN_MIN_RUNS: u64 = 1000;
pub const BATSMAN_MIN_BALLS: u64 = 500;
pub const BOWLER_MIN_WICKETS: u64 = 50;
pub const BOWLER_MIN_BALLS: u64 = 300;
pub const ALL_ROUNDER_WICKET_WEIGHT: u64 = 20;
pub const ROSTER_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerRole {
    Batsman,
    Bowler,
    AllRounder,
    Unknown,
}

impl PlayerRole {
    pub fn label(self) -> &'static str {
        match self {
            PlayerRole::Batsman => "Batsman",
            PlayerRole::Bowler => "Bowler",
            PlayerRole::AllRounder => "All-rounder",
            PlayerRole::Unknown => "Unclassified",
        }
    }
}

/// Career totals for one player across every delivery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CareerTotals {
    pub runs: u64,
    pub balls_faced: u64,
    pub wickets: u64,
    pub balls_bowled: u64,
}

impl CareerTotals {
    pub fn batsman_eligible(&self) -> bool {
        self.runs > BATSMAN_MIN_RUNS || self.balls_faced > BATSMAN_MIN_BALLS
    }

    pub fn bowler_eligible(&self) -> bool {
        self.wickets > BOWLER_MIN_WICKETS || self.balls_bowled > BOWLER_MIN_BALLS
    }

    pub fn all_rounder_score(&self) -> u64 {
        self.runs + ALL_ROUNDER_WICKET_WEIGHT * self.wickets
    }
}

/// The three ranked player lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Roster {
    pub batsmen: Vec<String>,
    pub bowlers: Vec<String>,
    pub all_rounders: Vec<String>,
}

impl Roster {
    /// Role used to pick a player's statistic set. Batsman is checked first,
    /// then bowler, then all-rounder.
    pub fn role_of(&self, player: &str) -> PlayerRole {
        let listed = |list: &[String]| list.iter().any(|p| p == player);
        if listed(&self.batsmen) {
            PlayerRole::Batsman
        } else if listed(&self.bowlers) {
            PlayerRole::Bowler
        } else if listed(&self.all_rounders) {
            PlayerRole::AllRounder
        } else {
            PlayerRole::Unknown
        }
    }
}

/// Per-player career totals. Deliveries with no bowler recorded count only
/// towards batting.
pub fn career_totals<'a, I>(deliveries: I) -> BTreeMap<String, CareerTotals>
where
    I: IntoIterator<Item = &'a Delivery>,
{
    let mut totals: BTreeMap<String, CareerTotals> = BTreeMap::new();
    for delivery in deliveries {
        let legal = u64::from(delivery.is_legal());
        let batter = totals.entry(delivery.batter.clone()).or_default();
        batter.runs += u64::from(delivery.batsman_runs);
        batter.balls_faced += legal;

        if let Some(bowler) = delivery.bowler_name() {
            let bowler = totals.entry(bowler.to_string()).or_default();
            bowler.balls_bowled += legal;
            bowler.wickets += u64::from(delivery.is_bowler_wicket());
        }
    }
    totals
}

pub fn classify<'a, I>(deliveries: I) -> Roster
where
    I: IntoIterator<Item = &'a Delivery>,
{
    let totals = career_totals(deliveries);
    let roster = Roster {
        batsmen: ranked(&totals, CareerTotals::batsman_eligible, |t| t.runs),
        bowlers: ranked(&totals, CareerTotals::bowler_eligible, |t| t.wickets),
        all_rounders: ranked(
            &totals,
            |t| t.batsman_eligible() && t.bowler_eligible(),
            CareerTotals::all_rounder_score,
        ),
    };
    debug!(
        "Classified {} player(s): {} batsmen, {} bowlers, {} all-rounders",
        totals.len(),
        roster.batsmen.len(),
        roster.bowlers.len(),
        roster.all_rounders.len()
    );
    roster
}

fn ranked(
    totals: &BTreeMap<String, CareerTotals>,
    eligible: impl Fn(&CareerTotals) -> bool,
    score: impl Fn(&CareerTotals) -> u64,
) -> Vec<String> {
    let mut candidates = totals
        .iter()
        .filter(|(_, t)| eligible(t))
        .map(|(name, t)| (name, score(t)))
        .collect::<Vec<_>>();
    candidates.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    candidates
        .into_iter()
        .take(ROSTER_SIZE)
        .map(|(name, _)| name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DismissalKind, ExtrasType};

    fn delivery(batter: &str, bowler: Option<&str>, runs: u32) -> Delivery {
        Delivery {
            match_id: 1,
            inning: 1,
            over: 0,
            ball: 1,
            batting_team: "A".to_string(),
            bowling_team: "B".to_string(),
            batter: batter.to_string(),
            bowler: bowler.map(str::to_string),
            non_striker: None,
            batsman_runs: runs,
            extra_runs: 0,
            extras_type: None,
            total_runs: runs,
            is_wicket: false,
            player_dismissed: None,
            dismissal_kind: None,
            fielder: None,
        }
    }

    #[test]
    fn thresholds_are_strict() {
        let at_limit = CareerTotals {
            runs: 1000,
            balls_faced: 500,
            wickets: 50,
            balls_bowled: 300,
        };
        assert!(!at_limit.batsman_eligible());
        assert!(!at_limit.bowler_eligible());

        let over = CareerTotals {
            runs: 1001,
            ..CareerTotals::default()
        };
        assert!(over.batsman_eligible());
    }

    #[test]
    fn wides_do_not_count_as_balls_and_run_outs_not_as_wickets() {
        let mut wide = delivery("bat", Some("bowl"), 0);
        wide.extras_type = Some(ExtrasType::Wides);
        let mut run_out = delivery("bat", Some("bowl"), 0);
        run_out.is_wicket = true;
        run_out.player_dismissed = Some("bat".to_string());
        run_out.dismissal_kind = Some(DismissalKind::RunOut);
        let rows = vec![wide, run_out, delivery("bat", None, 4)];

        let totals = career_totals(&rows);
        assert_eq!(totals["bat"].balls_faced, 2);
        assert_eq!(totals["bat"].runs, 4);
        assert_eq!(totals["bowl"].balls_bowled, 1);
        assert_eq!(totals["bowl"].wickets, 0);
    }

    #[test]
    fn role_dispatch_prefers_batsman_list() {
        let roster = Roster {
            batsmen: vec!["A".to_string()],
            bowlers: vec!["A".to_string(), "B".to_string()],
            all_rounders: vec!["A".to_string(), "C".to_string()],
        };
        assert_eq!(roster.role_of("A"), PlayerRole::Batsman);
        assert_eq!(roster.role_of("B"), PlayerRole::Bowler);
        assert_eq!(roster.role_of("C"), PlayerRole::AllRounder);
        assert_eq!(roster.role_of("D"), PlayerRole::Unknown);
    }
}
