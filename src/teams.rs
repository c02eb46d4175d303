//! Team profiles and side-by-side team comparisons.
//!
//! Every function taking a [`Pair`] computes each team on its own and returns
//! one result per team, in pair order.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    bowling::dismissal_label,
    data::{EnrichedDelivery, Match, TossDecision},
    error::StatsResult,
    filter::{Pair, Phase, SeasonFilter},
    metrics::{
        BallTotals, batting_strike_rate, bowling_average, bowling_strike_rate, economy,
        group_totals, percentage, run_rate,
    },
    series::{Entry, SeasonPoint, Series, leader, tally, top_n_desc},
};

/// Headline numbers for one team. Team wicket counts include run-outs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamStats {
    pub team: String,
    pub total_matches: u64,
    pub wins: u64,
    pub win_pct: f64,
    pub toss_wins: u64,
    pub toss_win_pct: f64,
    /// Wins after winning the toss and batting, as a share of toss wins.
    pub batting_first_win_pct: f64,
    /// Wins after winning the toss and fielding, as a share of toss wins.
    pub bowling_first_win_pct: f64,
    pub wickets_lost: u64,
    pub total_runs: u64,
    /// Runs per match batted.
    pub batting_average: f64,
    pub run_rate: f64,
    pub strike_rate: f64,
    pub wickets_taken: u64,
    pub runs_conceded: u64,
    pub bowling_average: f64,
    pub bowling_economy: f64,
    pub bowling_strike_rate: f64,
}

struct MatchOutcome<'a> {
    winner: Option<&'a str>,
    toss_winner: &'a str,
    toss_decision: TossDecision,
}

pub fn team_stats(balls: &[EnrichedDelivery], seasons: &SeasonFilter, team: &str) -> TeamStats {
    let mut batting = BallTotals::default();
    let mut bowling = BallTotals::default();
    let mut outcomes: BTreeMap<u64, MatchOutcome<'_>> = BTreeMap::new();
    for ball in seasons.balls(balls) {
        let bats = ball.batting_team == team;
        let bowls = ball.bowling_team == team;
        if bats {
            batting.add(ball);
        }
        if bowls {
            bowling.add(ball);
        }
        if bats || bowls {
            outcomes.entry(ball.match_id).or_insert_with(|| MatchOutcome {
                winner: ball.winner.as_deref(),
                toss_winner: ball.toss_winner.as_str(),
                toss_decision: ball.toss_decision,
            });
        }
    }

    let total_matches = outcomes.len() as u64;
    let won = |o: &MatchOutcome<'_>| o.winner == Some(team);
    let wins = outcomes.values().filter(|o| won(*o)).count() as u64;
    let toss_wins = outcomes.values().filter(|o| o.toss_winner == team).count() as u64;
    let toss_won_and = |decision: TossDecision| {
        outcomes
            .values()
            .filter(|o| o.toss_winner == team && o.toss_decision == decision && won(*o))
            .count() as u64
    };
    let batting_average = if batting.match_count() == 0 {
        0.0
    } else {
        batting.runs as f64 / batting.match_count() as f64
    };

    TeamStats {
        team: team.to_string(),
        total_matches,
        wins,
        win_pct: percentage(wins, total_matches),
        toss_wins,
        toss_win_pct: percentage(toss_wins, total_matches),
        batting_first_win_pct: percentage(toss_won_and(TossDecision::Bat), toss_wins),
        bowling_first_win_pct: percentage(toss_won_and(TossDecision::Field), toss_wins),
        wickets_lost: batting.dismissals,
        total_runs: batting.runs,
        batting_average,
        run_rate: run_rate(batting.runs, batting.legal_balls).unwrap_or(0.0),
        strike_rate: batting_strike_rate(batting.batsman_runs, batting.legal_balls),
        wickets_taken: bowling.dismissals,
        runs_conceded: bowling.runs,
        bowling_average: bowling_average(bowling.runs, bowling.dismissals),
        bowling_economy: economy(bowling.runs, bowling.legal_balls),
        bowling_strike_rate: bowling_strike_rate(bowling.legal_balls, bowling.dismissals),
    }
}

/// One statistic across the compared teams. `normalized` divides each value
/// by the largest absolute value in the row (or 1 when every value is
/// smaller than 1) so rows can share one axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatRow {
    pub stat: &'static str,
    pub values: Vec<f64>,
    pub normalized: Vec<f64>,
}

impl StatRow {
    fn new(stat: &'static str, values: Vec<f64>) -> Self {
        let scale = values.iter().map(|v| v.abs()).fold(1.0_f64, f64::max);
        let normalized = values.iter().map(|v| v / scale).collect();
        Self {
            stat,
            values,
            normalized,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamComparison {
    pub teams: Vec<String>,
    pub basic: Vec<StatRow>,
    pub batting: Vec<StatRow>,
    pub bowling: Vec<StatRow>,
}

type StatField = (&'static str, fn(&TeamStats) -> f64);

const BASIC_FIELDS: &[StatField] = &[
    ("Total Matches", |s| s.total_matches as f64),
    ("Win %", |s| s.win_pct),
    ("Toss Win %", |s| s.toss_win_pct),
];

const BATTING_FIELDS: &[StatField] = &[
    ("Batting First Win %", |s| s.batting_first_win_pct),
    ("Wickets Lost", |s| s.wickets_lost as f64),
    ("Total Runs", |s| s.total_runs as f64),
    ("Batting Average", |s| s.batting_average),
    ("Run Rate", |s| s.run_rate),
    ("Strike Rate", |s| s.strike_rate),
];

const BOWLING_FIELDS: &[StatField] = &[
    ("Bowling First Win %", |s| s.bowling_first_win_pct),
    ("Wickets Taken", |s| s.wickets_taken as f64),
    ("Bowling Average", |s| s.bowling_average),
    ("Bowling Economy", |s| s.bowling_economy),
    ("Bowling Strike Rate", |s| s.bowling_strike_rate),
];

/// Team stats for one or two teams arranged as comparison rows.
pub fn compare_teams(balls: &[EnrichedDelivery], seasons: &SeasonFilter, teams: &Pair) -> TeamComparison {
    let stats = teams
        .names()
        .map(|team| team_stats(balls, seasons, team))
        .collect::<Vec<_>>();
    let rows = |fields: &[StatField]| {
        fields
            .iter()
            .map(|(stat, field)| StatRow::new(*stat, stats.iter().map(field).collect()))
            .collect::<Vec<_>>()
    };
    TeamComparison {
        teams: teams.names().map(str::to_string).collect(),
        basic: rows(BASIC_FIELDS),
        batting: rows(BATTING_FIELDS),
        bowling: rows(BOWLING_FIELDS),
    }
}

/// Wins per season for each team, zero-filled across the seasons the team
/// played in.
pub fn wins_per_season(matches: &[Match], seasons: &SeasonFilter, teams: &Pair) -> Vec<Series<u64>> {
    teams
        .names()
        .map(|team| {
            let mut wins: BTreeMap<&str, u64> = BTreeMap::new();
            for m in seasons.matches(matches).filter(|m| m.involves(team)) {
                *wins.entry(m.season.as_str()).or_insert(0) +=
                    u64::from(m.winner.as_deref() == Some(team));
            }
            Series {
                name: team.to_string(),
                points: wins
                    .into_iter()
                    .map(|(season, value)| SeasonPoint {
                        season: season.to_string(),
                        value,
                        team: None,
                    })
                    .collect(),
            }
        })
        .collect()
}

/// Results of matches played between the two teams, by winner.
pub fn head_to_head(
    matches: &[Match],
    seasons: &SeasonFilter,
    teams: &Pair,
) -> StatsResult<Vec<Entry<u64>>> {
    let (first, second) = teams.require_both("second team")?;
    let wins = tally(
        seasons
            .matches(matches)
            .filter(|m| m.involves(first) && m.involves(second))
            .filter_map(|m| m.winner.as_deref()),
    );
    Ok(top_n_desc(wins, usize::MAX))
}

fn per_season<T>(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
    teams: &Pair,
    side: fn(&EnrichedDelivery) -> &str,
    admit: impl Fn(&EnrichedDelivery) -> bool,
    value: impl Fn(&BallTotals) -> T,
) -> Vec<Series<T>> {
    teams
        .names()
        .map(|team| {
            let groups = group_totals(
                seasons.balls(balls).filter(|b| side(*b) == team && admit(*b)),
                |b| Some(b.season.as_str()),
            );
            Series {
                name: team.to_string(),
                points: groups
                    .into_iter()
                    .map(|(season, t)| SeasonPoint {
                        season: season.to_string(),
                        value: value(&t),
                        team: None,
                    })
                    .collect(),
            }
        })
        .collect()
}

fn batting_side(b: &EnrichedDelivery) -> &str {
    &b.batting_team
}

fn bowling_side(b: &EnrichedDelivery) -> &str {
    &b.bowling_team
}

/// Runs scored per season within one phase.
pub fn phase_batting(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
    teams: &Pair,
    phase: Phase,
) -> Vec<Series<u64>> {
    per_season(
        balls,
        seasons,
        teams,
        batting_side,
        |b| Phase::of_over(b.over) == phase,
        |t: &BallTotals| t.runs,
    )
}

/// Wickets taken per season within one phase.
pub fn phase_bowling(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
    teams: &Pair,
    phase: Phase,
) -> Vec<Series<u64>> {
    per_season(
        balls,
        seasons,
        teams,
        bowling_side,
        |b| Phase::of_over(b.over) == phase,
        |t: &BallTotals| t.dismissals,
    )
}

pub fn team_strike_rate_by_season(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
    teams: &Pair,
) -> Vec<Series<f64>> {
    per_season(balls, seasons, teams, batting_side, |_| true, |t: &BallTotals| {
        batting_strike_rate(t.batsman_runs, t.legal_balls)
    })
}

pub fn team_economy_by_season(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
    teams: &Pair,
) -> Vec<Series<f64>> {
    per_season(balls, seasons, teams, bowling_side, |_| true, |t: &BallTotals| {
        economy(t.runs, t.legal_balls)
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamPerformers {
    pub team: String,
    pub top_scorer: Option<Entry<u64>>,
    pub top_wicket_taker: Option<Entry<u64>>,
}

/// Leading run scorer and wicket taker for each team.
pub fn top_performers(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
    teams: &Pair,
) -> Vec<TeamPerformers> {
    teams
        .names()
        .map(|team| {
            let mut runs: BTreeMap<String, u64> = BTreeMap::new();
            let mut wickets: BTreeMap<String, u64> = BTreeMap::new();
            for ball in seasons.balls(balls) {
                if ball.batting_team == team {
                    *runs.entry(ball.batter.clone()).or_insert(0) += u64::from(ball.batsman_runs);
                }
                if ball.bowling_team == team && ball.is_bowler_wicket() {
                    if let Some(bowler) = ball.bowler_name() {
                        *wickets.entry(bowler.to_string()).or_insert(0) += 1;
                    }
                }
            }
            TeamPerformers {
                team: team.to_string(),
                top_scorer: leader(runs),
                top_wicket_taker: leader(wickets),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundaryCount {
    pub team: String,
    pub fours: u64,
    pub sixes: u64,
}

/// Fours and sixes off the bat.
pub fn boundary_counts(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
    teams: &Pair,
) -> Vec<BoundaryCount> {
    teams
        .names()
        .map(|team| {
            let mut count = BoundaryCount {
                team: team.to_string(),
                fours: 0,
                sixes: 0,
            };
            for ball in seasons.balls(balls).filter(|b| b.batting_team == team) {
                match ball.batsman_runs {
                    4 => count.fours += 1,
                    6 => count.sixes += 1,
                    _ => {}
                }
            }
            count
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DismissalBreakdown {
    pub team: String,
    pub taken: Vec<Entry<u64>>,
    pub lost: Vec<Entry<u64>>,
}

/// Bowler-credited dismissals by kind, taken in the field and lost at the crease.
pub fn dismissal_breakdown(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
    teams: &Pair,
) -> Vec<DismissalBreakdown> {
    let by_kind = |side: fn(&EnrichedDelivery) -> &str, team: &str| {
        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        for kind in seasons
            .balls(balls)
            .filter(|b| side(*b) == team)
            .filter_map(|b| b.dismissal_kind.as_ref())
            .filter(|k| k.is_bowler_credited())
        {
            *counts.entry(dismissal_label(kind)).or_insert(0) += 1;
        }
        top_n_desc(counts, usize::MAX)
    };
    teams
        .names()
        .map(|team| DismissalBreakdown {
            team: team.to_string(),
            taken: by_kind(bowling_side, team),
            lost: by_kind(batting_side, team),
        })
        .collect()
}
