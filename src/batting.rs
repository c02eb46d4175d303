//! Batting leaderboards and team batting rates.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    data::{EnrichedDelivery, Match, MatchResult},
    error::{StatsError, StatsResult},
    filter::SeasonFilter,
    metrics::{batting_strike_rate, group_totals, run_rate},
    series::{Entry, top_n_desc},
};

/// Target overs of an uninterrupted innings.
pub const FULL_INNINGS_OVERS: f64 = 20.0;

/// Run totals per batter.
pub fn runs_by_batter<'a, I>(balls: I) -> BTreeMap<String, u64>
where
    I: IntoIterator<Item = &'a EnrichedDelivery>,
{
    let mut runs = BTreeMap::new();
    for ball in balls {
        *runs.entry(ball.batter.clone()).or_insert(0) += u64::from(ball.batsman_runs);
    }
    runs
}

pub fn top_scorers(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
    n: usize,
) -> StatsResult<Vec<Entry<u64>>> {
    let runs = runs_by_batter(seasons.balls(balls));
    if runs.is_empty() {
        return Err(StatsError::no_data("top scorers"));
    }
    Ok(top_n_desc(runs, n))
}

/// `"<batter> (<runs> runs)"` for the leading run scorer.
pub fn top_scorer_label(balls: &[EnrichedDelivery], seasons: &SeasonFilter) -> StatsResult<String> {
    let top = top_scorers(balls, seasons, 1)?;
    top.first()
        .map(|e| format!("{} ({} runs)", e.name, e.value))
        .ok_or(StatsError::no_data("top scorer"))
}

/// Runs per over for every batting team. Teams with no legal ball faced
/// have no defined run rate and are left out.
pub fn team_run_rates(balls: &[EnrichedDelivery], seasons: &SeasonFilter) -> Vec<Entry<f64>> {
    group_totals(seasons.balls(balls), |b| Some(b.batting_team.as_str()))
        .into_iter()
        .filter_map(|(team, t)| run_rate(t.runs, t.legal_balls).map(|rate| Entry::new(team, rate)))
        .collect()
}

/// Runs per match for every batting team.
pub fn team_batting_averages(balls: &[EnrichedDelivery], seasons: &SeasonFilter) -> Vec<Entry<f64>> {
    group_totals(seasons.balls(balls), |b| Some(b.batting_team.as_str()))
        .into_iter()
        .map(|(team, t)| Entry::new(team, t.runs as f64 / t.match_count() as f64))
        .collect()
}

pub fn team_strike_rates(balls: &[EnrichedDelivery], seasons: &SeasonFilter) -> Vec<Entry<f64>> {
    group_totals(seasons.balls(balls), |b| Some(b.batting_team.as_str()))
        .into_iter()
        .map(|(team, t)| Entry::new(team, batting_strike_rate(t.batsman_runs, t.legal_balls)))
        .collect()
}

/// Largest target successfully chased.
pub fn highest_run_chase(matches: &[Match], seasons: &SeasonFilter) -> StatsResult<u32> {
    seasons
        .matches(matches)
        .filter(|m| m.result == MatchResult::Wickets)
        .filter_map(|m| m.target_runs)
        .max()
        .ok_or(StatsError::no_data("highest run chase"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InningsTotal {
    pub match_id: u64,
    pub team: String,
    pub runs: u64,
}

/// Lowest innings total among decided matches scheduled for the full twenty
/// overs. Ties go to the earliest match id.
pub fn lowest_total(balls: &[EnrichedDelivery], seasons: &SeasonFilter) -> StatsResult<InningsTotal> {
    let mut innings: BTreeMap<(u64, &str), u64> = BTreeMap::new();
    for ball in seasons.balls(balls).filter(|b| {
        b.winner.is_some()
            && b.target_overs == Some(FULL_INNINGS_OVERS)
            && matches!(b.inning, 1 | 2)
    }) {
        *innings
            .entry((ball.match_id, ball.batting_team.as_str()))
            .or_insert(0) += u64::from(ball.total_runs);
    }
    innings
        .into_iter()
        .min_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)))
        .map(|((match_id, team), runs)| InningsTotal {
            match_id,
            team: team.to_string(),
            runs,
        })
        .ok_or(StatsError::no_data("lowest total"))
}
