//! League-wide headline numbers for the overview tab.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::{
    data::{EnrichedDelivery, Match, MatchResult, TossDecision},
    error::{StatsError, StatsResult},
    filter::{Phase, SeasonFilter},
    metrics::cmp_f64,
    series::{Entry, Share, leader, shares, tally, top_n_desc},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total_matches: usize,
    pub total_seasons: usize,
    pub total_teams: usize,
    pub total_venues: usize,
    pub most_successful_team: Option<Entry<u64>>,
    pub largest_result_margin: Option<f64>,
    pub most_common_venue: Option<Entry<u64>>,
}

pub fn summary_stats(matches: &[Match], seasons: &SeasonFilter) -> StatsResult<SummaryStats> {
    let selected = seasons.matches(matches).collect::<Vec<_>>();
    if selected.is_empty() {
        return Err(StatsError::no_data("summary statistics"));
    }
    let distinct = |f: fn(&Match) -> &str| selected.iter().map(|m| f(m)).collect::<BTreeSet<_>>().len();
    let teams = selected
        .iter()
        .flat_map(|m| [m.team1.as_str(), m.team2.as_str()])
        .collect::<BTreeSet<_>>();

    Ok(SummaryStats {
        total_matches: selected.len(),
        total_seasons: distinct(|m| m.season.as_str()),
        total_teams: teams.len(),
        total_venues: distinct(|m| m.venue.as_str()),
        most_successful_team: leader(tally(selected.iter().filter_map(|m| m.winner.as_deref()))),
        largest_result_margin: selected
            .iter()
            .filter_map(|m| m.result_margin)
            .max_by(|a, b| cmp_f64(*a, *b)),
        most_common_venue: leader(tally(selected.iter().map(|m| m.venue.as_str()))),
    })
}

/// Match count per season, in season order.
pub fn matches_per_season(matches: &[Match], seasons: &SeasonFilter) -> Vec<Entry<u64>> {
    tally(seasons.matches(matches).map(|m| m.season.as_str()))
        .into_iter()
        .map(|(season, count)| Entry::new(season, count))
        .collect()
}

/// Wins by the side batting first (result in runs) against wins by the
/// chasing side (result in wickets).
pub fn win_type_split(matches: &[Match], seasons: &SeasonFilter) -> Vec<Share> {
    let mut batting_first = 0;
    let mut fielding_first = 0;
    for m in seasons.matches(matches) {
        match m.result {
            MatchResult::Runs => batting_first += 1,
            MatchResult::Wickets => fielding_first += 1,
            MatchResult::Tie | MatchResult::NoResult => {}
        }
    }
    non_empty_shares([
        ("Batting First", batting_first),
        ("Fielding First", fielding_first),
    ])
}

pub fn toss_decisions(matches: &[Match], seasons: &SeasonFilter) -> Vec<Share> {
    let (bat, field) = seasons
        .matches(matches)
        .fold((0, 0), |(bat, field), m| match m.toss_decision {
            TossDecision::Bat => (bat + 1, field),
            TossDecision::Field => (bat, field + 1),
        });
    non_empty_shares([("Batting", bat), ("Fielding", field)])
}

/// Total wins per team, most first.
pub fn team_wins(matches: &[Match], seasons: &SeasonFilter) -> Vec<Entry<u64>> {
    let wins = tally(seasons.matches(matches).filter_map(|m| m.winner.as_deref()));
    top_n_desc(wins, usize::MAX)
}

pub fn total_runs(balls: &[EnrichedDelivery], seasons: &SeasonFilter) -> u64 {
    seasons.balls(balls).map(|b| u64::from(b.total_runs)).sum()
}

pub fn total_wickets(balls: &[EnrichedDelivery], seasons: &SeasonFilter) -> u64 {
    seasons.balls(balls).filter(|b| b.is_wicket).count() as u64
}

pub fn total_matches(matches: &[Match], seasons: &SeasonFilter) -> usize {
    seasons.matches(matches).count()
}

/// Scoring deliveries split into fours, sixes and everything else.
pub fn runs_distribution(balls: &[EnrichedDelivery], seasons: &SeasonFilter) -> Vec<Share> {
    let mut fours = 0;
    let mut sixes = 0;
    let mut other = 0;
    for ball in seasons.balls(balls).filter(|b| b.total_runs != 0) {
        match ball.total_runs {
            4 => fours += 1,
            6 => sixes += 1,
            _ => other += 1,
        }
    }
    non_empty_shares([("4s", fours), ("6s", sixes), ("Other", other)])
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverRuns {
    /// 1-indexed over number.
    pub over: u16,
    pub runs: u64,
    pub phase: Phase,
}

pub fn runs_per_over(balls: &[EnrichedDelivery], seasons: &SeasonFilter) -> Vec<OverRuns> {
    let mut per_over: BTreeMap<u8, u64> = BTreeMap::new();
    for ball in seasons.balls(balls) {
        *per_over.entry(ball.over).or_insert(0) += u64::from(ball.total_runs);
    }
    per_over
        .into_iter()
        .map(|(over, runs)| OverRuns {
            over: u16::from(over) + 1,
            runs,
            phase: Phase::of_over(over),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseTotal {
    pub phase: Phase,
    pub runs: u64,
    pub wickets: u64,
}

/// Runs and wickets in each phase, always in powerplay, middle, death order.
pub fn phase_runs(balls: &[EnrichedDelivery], seasons: &SeasonFilter) -> Vec<PhaseTotal> {
    let mut totals = Phase::ALL.map(|phase| PhaseTotal {
        phase,
        runs: 0,
        wickets: 0,
    });
    for ball in seasons.balls(balls) {
        let slot = Phase::of_over(ball.over) as usize;
        totals[slot].runs += u64::from(ball.total_runs);
        totals[slot].wickets += u64::from(ball.is_wicket);
    }
    totals.into()
}

fn non_empty_shares<const N: usize>(counts: [(&str, u64); N]) -> Vec<Share> {
    shares(
        counts
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(label, count)| (label.to_string(), count)),
    )
}
