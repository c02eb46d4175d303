//! Player profiles, role dispatch and player comparisons.
//!
//! Pair functions return one result per player, in pair order, each
//! computed independently of the other.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::{
    bowling::{Figures, best_bowling_figures, dismissal_label},
    classify::{PlayerRole, Roster},
    data::EnrichedDelivery,
    filter::{Pair, SeasonFilter},
    metrics::{
        BallTotals, batting_average, batting_strike_rate, bowling_average, bowling_strike_rate,
        economy, group_totals, overs,
    },
    series::{Breakdown, Entry, SeasonPoint, Series, leader, tally, top_n_desc},
};

/// Venues kept per player in the venue breakdowns.
pub const TOP_VENUES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattingProfile {
    pub player: String,
    pub matches: u64,
    pub innings: u64,
    pub runs: u64,
    pub balls_faced: u64,
    pub strike_rate: f64,
    pub dismissals: u64,
    pub average: f64,
    pub fours: u64,
    pub sixes: u64,
    pub fifties: u64,
    pub hundreds: u64,
    pub best_score: u64,
    pub most_common_dismissal: Option<String>,
    pub player_of_match: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BowlingProfile {
    pub player: String,
    pub matches: u64,
    pub innings: u64,
    pub wickets: u64,
    pub runs_conceded: u64,
    pub legal_balls: u64,
    pub overs: f64,
    pub average: f64,
    pub economy: f64,
    pub strike_rate: f64,
    pub best_figures: Option<Figures>,
    pub four_wicket_hauls: u64,
    pub five_wicket_hauls: u64,
    pub most_common_dismissal: Option<String>,
    pub maiden_overs: u64,
}

/// Statistics for one player, shaped by the player's role.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum PlayerStats {
    Batsman(BattingProfile),
    Bowler(BowlingProfile),
    AllRounder {
        batting: BattingProfile,
        bowling: BowlingProfile,
    },
    /// The player is on none of the role lists; no statistics are produced.
    Unclassified { player: String },
}

impl PlayerStats {
    pub fn player(&self) -> &str {
        match self {
            PlayerStats::Batsman(p) => &p.player,
            PlayerStats::Bowler(p) => &p.player,
            PlayerStats::AllRounder { batting, .. } => &batting.player,
            PlayerStats::Unclassified { player } => player,
        }
    }

    pub fn role(&self) -> PlayerRole {
        match self {
            PlayerStats::Batsman(_) => PlayerRole::Batsman,
            PlayerStats::Bowler(_) => PlayerRole::Bowler,
            PlayerStats::AllRounder { .. } => PlayerRole::AllRounder,
            PlayerStats::Unclassified { .. } => PlayerRole::Unknown,
        }
    }
}

fn most_common_kind<'a, I>(balls: I) -> Option<String>
where
    I: IntoIterator<Item = &'a EnrichedDelivery>,
{
    let labels = balls
        .into_iter()
        .filter_map(|b| b.dismissal_kind.as_ref())
        .map(dismissal_label)
        .collect::<Vec<_>>();
    leader(tally(labels.iter().map(String::as_str))).map(|e| e.name)
}

pub fn batting_profile(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
    player: &str,
) -> BattingProfile {
    let mut appeared = BTreeSet::new();
    let mut innings = BTreeSet::new();
    let mut match_runs: BTreeMap<u64, u64> = BTreeMap::new();
    let mut potm = BTreeSet::new();
    let mut runs = 0;
    let mut balls_faced = 0;
    let mut fours = 0;
    let mut sixes = 0;
    let mut dismissed = Vec::new();

    for ball in seasons.balls(balls) {
        let on_strike = ball.batter == player;
        if on_strike
            || ball.non_striker.as_deref() == Some(player)
            || ball.bowled_by(player)
        {
            appeared.insert(ball.match_id);
        }
        if ball.player_of_match.as_deref() == Some(player) {
            potm.insert(ball.match_id);
        }
        if ball.dismissed(player) {
            dismissed.push(ball);
        }
        if !on_strike {
            continue;
        }
        innings.insert((ball.match_id, ball.inning));
        runs += u64::from(ball.batsman_runs);
        balls_faced += u64::from(ball.is_legal());
        *match_runs.entry(ball.match_id).or_insert(0) += u64::from(ball.batsman_runs);
        match ball.batsman_runs {
            4 => fours += 1,
            6 => sixes += 1,
            _ => {}
        }
    }

    let dismissals = dismissed.len() as u64;
    BattingProfile {
        player: player.to_string(),
        matches: appeared.len() as u64,
        innings: innings.len() as u64,
        runs,
        balls_faced,
        strike_rate: batting_strike_rate(runs, balls_faced),
        dismissals,
        average: batting_average(runs, dismissals),
        fours,
        sixes,
        fifties: match_runs.values().filter(|r| (50..100).contains(*r)).count() as u64,
        hundreds: match_runs.values().filter(|r| **r >= 100).count() as u64,
        best_score: match_runs.values().copied().max().unwrap_or(0),
        most_common_dismissal: most_common_kind(dismissed),
        player_of_match: potm.len() as u64,
    }
}

pub fn bowling_profile(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
    player: &str,
) -> BowlingProfile {
    let bowled = seasons
        .balls(balls)
        .filter(|b| b.bowled_by(player))
        .collect::<Vec<_>>();
    let mut totals = BallTotals::default();
    bowled.iter().for_each(|b| totals.add(b));

    let innings = bowled
        .iter()
        .map(|b| (b.match_id, b.inning))
        .collect::<BTreeSet<_>>();
    let per_match = group_totals(bowled.iter().copied(), |b| Some(b.match_id));
    let hauls = |wanted: fn(u64) -> bool| {
        per_match
            .values()
            .filter(|t| wanted(t.bowler_wickets))
            .count() as u64
    };
    let per_over = group_totals(bowled.iter().copied(), |b| {
        Some((b.match_id, b.inning, b.over))
    });
    let maiden_overs = per_over
        .values()
        .filter(|t| t.runs == 0 && t.legal_balls >= 6)
        .count() as u64;

    BowlingProfile {
        player: player.to_string(),
        matches: totals.match_count(),
        innings: innings.len() as u64,
        wickets: totals.bowler_wickets,
        runs_conceded: totals.runs,
        legal_balls: totals.legal_balls,
        overs: overs(totals.legal_balls),
        average: bowling_average(totals.runs, totals.bowler_wickets),
        economy: economy(totals.runs, totals.legal_balls),
        strike_rate: bowling_strike_rate(totals.legal_balls, totals.bowler_wickets),
        best_figures: best_bowling_figures(balls, seasons, Some(player)).ok(),
        four_wicket_hauls: hauls(|w| w == 4),
        five_wicket_hauls: hauls(|w| w >= 5),
        most_common_dismissal: most_common_kind(
            bowled.iter().copied().filter(|b| b.is_bowler_wicket()),
        ),
        maiden_overs,
    }
}

/// Routes a player to the statistic set matching their role.
pub fn player_stats(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
    roster: &Roster,
    player: &str,
) -> PlayerStats {
    match roster.role_of(player) {
        PlayerRole::Batsman => PlayerStats::Batsman(batting_profile(balls, seasons, player)),
        PlayerRole::Bowler => PlayerStats::Bowler(bowling_profile(balls, seasons, player)),
        PlayerRole::AllRounder => PlayerStats::AllRounder {
            batting: batting_profile(balls, seasons, player),
            bowling: bowling_profile(balls, seasons, player),
        },
        PlayerRole::Unknown => PlayerStats::Unclassified {
            player: player.to_string(),
        },
    }
}

/// The team a player turned out for in each season, first appearance wins.
/// Batting appearances are checked before bowling ones.
pub fn teams_by_season(balls: &[EnrichedDelivery], player: &str) -> Vec<Entry<String>> {
    season_teams(balls, player)
        .into_iter()
        .map(|(season, team)| Entry::new(season, team))
        .collect()
}

/// Team in the player's latest season.
pub fn last_team(balls: &[EnrichedDelivery], player: &str) -> Option<String> {
    season_teams(balls, player).into_values().next_back()
}

fn season_teams(balls: &[EnrichedDelivery], player: &str) -> BTreeMap<String, String> {
    let mut as_batter: BTreeMap<&str, &str> = BTreeMap::new();
    let mut as_bowler: BTreeMap<&str, &str> = BTreeMap::new();
    for ball in balls {
        if ball.batter == player {
            as_batter.entry(&ball.season).or_insert(&ball.batting_team);
        }
        if ball.bowled_by(player) {
            as_bowler.entry(&ball.season).or_insert(&ball.bowling_team);
        }
    }
    for (season, team) in as_bowler {
        as_batter.entry(season).or_insert(team);
    }
    as_batter
        .into_iter()
        .map(|(season, team)| (season.to_string(), team.to_string()))
        .collect()
}

/// Builds one series per player from per-season values.
fn series_for<T>(
    balls: &[EnrichedDelivery],
    player: &str,
    values: BTreeMap<String, T>,
) -> Series<T> {
    let teams = season_teams(balls, player);
    Series {
        name: player.to_string(),
        points: values
            .into_iter()
            .map(|(season, value)| SeasonPoint {
                team: teams.get(&season).cloned(),
                season,
                value,
            })
            .collect(),
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct BattingSeason {
    runs: u64,
    legal_balls: u64,
    dismissals: u64,
}

fn batting_seasons(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
    player: &str,
) -> BTreeMap<String, BattingSeason> {
    let mut per_season: BTreeMap<String, BattingSeason> = BTreeMap::new();
    for ball in seasons.balls(balls) {
        let faced = ball.batter == player;
        let out = ball.dismissed(player);
        if !faced && !out {
            continue;
        }
        let entry = per_season.entry(ball.season.clone()).or_default();
        if faced {
            entry.runs += u64::from(ball.batsman_runs);
            entry.legal_balls += u64::from(ball.is_legal());
        }
        entry.dismissals += u64::from(out);
    }
    per_season
}

fn bowling_seasons(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
    player: &str,
) -> BTreeMap<String, BallTotals> {
    group_totals(seasons.balls(balls), |b| {
        b.bowled_by(player).then(|| b.season.clone())
    })
}

pub fn runs_by_season(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
    players: &Pair,
) -> Vec<Series<u64>> {
    players
        .names()
        .map(|player| {
            let values = batting_seasons(balls, seasons, player)
                .into_iter()
                .map(|(season, s)| (season, s.runs))
                .collect();
            series_for(balls, player, values)
        })
        .collect()
}

/// Per-season strike rate and average lines, one of each per player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateSeries {
    pub strike_rate: Vec<Series<f64>>,
    pub average: Vec<Series<f64>>,
}

pub fn batting_rates_by_season(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
    players: &Pair,
) -> RateSeries {
    let mut rates = RateSeries {
        strike_rate: Vec::new(),
        average: Vec::new(),
    };
    for player in players.names() {
        let per_season = batting_seasons(balls, seasons, player);
        let strike_rate = per_season
            .iter()
            .map(|(season, s)| (season.clone(), batting_strike_rate(s.runs, s.legal_balls)))
            .collect();
        let average = per_season
            .iter()
            .map(|(season, s)| (season.clone(), batting_average(s.runs, s.dismissals)))
            .collect();
        rates.strike_rate.push(series_for(balls, player, strike_rate));
        rates.average.push(series_for(balls, player, average));
    }
    rates
}

pub fn wickets_by_season(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
    players: &Pair,
) -> Vec<Series<u64>> {
    players
        .names()
        .map(|player| {
            let values = bowling_seasons(balls, seasons, player)
                .into_iter()
                .map(|(season, t)| (season, t.bowler_wickets))
                .collect();
            series_for(balls, player, values)
        })
        .collect()
}

pub fn bowling_rates_by_season(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
    players: &Pair,
) -> RateSeries {
    let mut rates = RateSeries {
        strike_rate: Vec::new(),
        average: Vec::new(),
    };
    for player in players.names() {
        let per_season = bowling_seasons(balls, seasons, player);
        let strike_rate = per_season
            .iter()
            .map(|(season, t)| {
                (season.clone(), bowling_strike_rate(t.legal_balls, t.bowler_wickets))
            })
            .collect();
        let average = per_season
            .iter()
            .map(|(season, t)| (season.clone(), bowling_average(t.runs, t.bowler_wickets)))
            .collect();
        rates.strike_rate.push(series_for(balls, player, strike_rate));
        rates.average.push(series_for(balls, player, average));
    }
    rates
}

pub fn economy_by_season(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
    players: &Pair,
) -> Vec<Series<f64>> {
    players
        .names()
        .map(|player| {
            let values = bowling_seasons(balls, seasons, player)
                .into_iter()
                .map(|(season, t)| (season, economy(t.runs, t.legal_balls)))
                .collect();
            series_for(balls, player, values)
        })
        .collect()
}

fn breakdown<'a>(
    player: &str,
    rows: impl Iterator<Item = (&'a str, u64)>,
    limit: usize,
) -> Breakdown<u64> {
    let mut totals: BTreeMap<String, u64> = BTreeMap::new();
    for (key, value) in rows {
        *totals.entry(key.to_string()).or_insert(0) += value;
    }
    Breakdown {
        name: player.to_string(),
        entries: top_n_desc(totals, limit),
    }
}

/// Runs scored against each opposing team.
pub fn runs_against_teams(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
    players: &Pair,
) -> Vec<Breakdown<u64>> {
    players
        .names()
        .map(|player| {
            let rows = seasons
                .balls(balls)
                .filter(|b| b.batter == player)
                .map(|b| (b.bowling_team.as_str(), u64::from(b.batsman_runs)));
            breakdown(player, rows, usize::MAX)
        })
        .collect()
}

/// Runs at the player's ten most productive venues.
pub fn runs_at_venues(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
    players: &Pair,
) -> Vec<Breakdown<u64>> {
    players
        .names()
        .map(|player| {
            let rows = seasons
                .balls(balls)
                .filter(|b| b.batter == player)
                .map(|b| (b.venue.as_str(), u64::from(b.batsman_runs)));
            breakdown(player, rows, TOP_VENUES)
        })
        .collect()
}

/// Bowler-credited wickets against each batting side.
pub fn wickets_against_teams(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
    players: &Pair,
) -> Vec<Breakdown<u64>> {
    players
        .names()
        .map(|player| {
            let rows = seasons
                .balls(balls)
                .filter(|b| b.bowled_by(player) && b.is_bowler_wicket())
                .map(|b| (b.batting_team.as_str(), 1));
            breakdown(player, rows, usize::MAX)
        })
        .collect()
}

pub fn wickets_at_venues(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
    players: &Pair,
) -> Vec<Breakdown<u64>> {
    players
        .names()
        .map(|player| {
            let rows = seasons
                .balls(balls)
                .filter(|b| b.bowled_by(player) && b.is_bowler_wicket())
                .map(|b| (b.venue.as_str(), 1));
            breakdown(player, rows, TOP_VENUES)
        })
        .collect()
}
