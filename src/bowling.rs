//! Bowling leaderboards, best figures, hat-tricks and team bowling rates.

use std::{collections::BTreeMap, fmt};

use heck::ToTitleCase;
use itertools::Itertools;
use serde::Serialize;

use crate::{
    data::{BOWLER_CREDITED_DISMISSALS, DismissalKind, EnrichedDelivery},
    error::{StatsError, StatsResult},
    filter::SeasonFilter,
    metrics::{
        BallTotals, bowling_average, bowling_strike_rate, cmp_f64, economy, group_totals, overs,
    },
    normalize::short_name,
    series::{Entry, Share, bottom_n_f64, shares, top_n_desc},
};

/// Legal balls a bowler needs (100 overs) to enter the economy ranking.
pub const MIN_ECONOMY_BALLS: u64 = 600;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BowlerLine {
    pub bowler: String,
    pub matches: u64,
    pub runs_conceded: u64,
    pub wickets: u64,
    pub legal_balls: u64,
    pub overs: f64,
    pub economy: f64,
    pub average: f64,
    pub strike_rate: f64,
}

impl BowlerLine {
    fn from_totals(bowler: &str, t: &BallTotals) -> Self {
        Self {
            bowler: bowler.to_string(),
            matches: t.match_count(),
            runs_conceded: t.runs,
            wickets: t.bowler_wickets,
            legal_balls: t.legal_balls,
            overs: overs(t.legal_balls),
            economy: economy(t.runs, t.legal_balls),
            average: bowling_average(t.runs, t.bowler_wickets),
            strike_rate: bowling_strike_rate(t.legal_balls, t.bowler_wickets),
        }
    }
}

/// One line per bowler, most wickets first.
pub fn bowler_table(balls: &[EnrichedDelivery], seasons: &SeasonFilter) -> Vec<BowlerLine> {
    let mut lines = group_totals(seasons.balls(balls), |b| b.bowler_name())
        .iter()
        .map(|(bowler, t)| BowlerLine::from_totals(bowler, t))
        .collect::<Vec<_>>();
    lines.sort_by(|a, b| b.wickets.cmp(&a.wickets).then_with(|| a.bowler.cmp(&b.bowler)));
    lines
}

pub fn top_wicket_takers(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
    n: usize,
) -> StatsResult<Vec<Entry<u64>>> {
    let wickets = group_totals(seasons.balls(balls), |b| b.bowler_name().map(str::to_string))
        .into_iter()
        .map(|(bowler, t)| (bowler, t.bowler_wickets))
        .collect::<BTreeMap<_, _>>();
    if wickets.is_empty() {
        return Err(StatsError::no_data("top wicket takers"));
    }
    Ok(top_n_desc(wickets, n))
}

/// `"<bowler> (<wickets> wickets)"` for the leading wicket taker.
pub fn top_wicket_taker_label(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
) -> StatsResult<String> {
    let top = top_wicket_takers(balls, seasons, 1)?;
    top.first()
        .map(|e| format!("{} ({} wickets)", e.name, e.value))
        .ok_or(StatsError::no_data("top wicket taker"))
}

/// Lowest economy among bowlers with at least [`MIN_ECONOMY_BALLS`] legal
/// balls. An empty ranking is a valid answer when nobody qualifies.
pub fn best_economy(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
    n: usize,
) -> StatsResult<Vec<Entry<f64>>> {
    let totals = group_totals(seasons.balls(balls), |b| b.bowler_name());
    if totals.is_empty() {
        return Err(StatsError::no_data("best economy"));
    }
    let qualified = totals
        .into_iter()
        .filter(|(_, t)| t.legal_balls >= MIN_ECONOMY_BALLS)
        .map(|(bowler, t)| Entry::new(bowler, economy(t.runs, t.legal_balls)))
        .collect();
    Ok(bottom_n_f64(qualified, n))
}

/// Wickets and runs for one bowler in one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Figures {
    pub match_id: u64,
    pub bowler: String,
    pub wickets: u64,
    pub runs: u64,
}

impl fmt::Display for Figures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/{})", self.bowler, self.wickets, self.runs)
    }
}

/// Every (match, bowler) spell, best first: most wickets, then fewest runs.
pub fn spell_figures(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
    bowler: Option<&str>,
) -> Vec<Figures> {
    let spells = group_totals(seasons.balls(balls), |b| {
        let name = b.bowler_name()?;
        bowler.is_none_or(|wanted| wanted == name).then_some((b.match_id, name))
    });
    let mut figures = spells
        .into_iter()
        .map(|((match_id, name), t)| Figures {
            match_id,
            bowler: name.to_string(),
            wickets: t.bowler_wickets,
            runs: t.runs,
        })
        .collect::<Vec<_>>();
    figures.sort_by(|a, b| {
        b.wickets
            .cmp(&a.wickets)
            .then_with(|| a.runs.cmp(&b.runs))
            .then_with(|| a.match_id.cmp(&b.match_id))
            .then_with(|| a.bowler.cmp(&b.bowler))
    });
    figures
}

/// Best single-match figures, globally or for one bowler.
pub fn best_bowling_figures(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
    bowler: Option<&str>,
) -> StatsResult<Figures> {
    spell_figures(balls, seasons, bowler)
        .into_iter()
        .next()
        .ok_or(StatsError::no_data("best bowling figures"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpensiveOver {
    pub match_id: u64,
    pub inning: u8,
    pub bowler: String,
    /// 1-indexed over number.
    pub over: u16,
    pub runs: u64,
}

pub fn most_expensive_overs(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
    n: usize,
) -> StatsResult<Vec<ExpensiveOver>> {
    let per_over = group_totals(seasons.balls(balls), |b| {
        Some((b.match_id, b.inning, b.over, b.bowler_name()?))
    });
    if per_over.is_empty() {
        return Err(StatsError::no_data("most expensive overs"));
    }
    let mut ranked = per_over
        .into_iter()
        .map(|((match_id, inning, over, bowler), t)| ExpensiveOver {
            match_id,
            inning,
            bowler: bowler.to_string(),
            over: u16::from(over) + 1,
            runs: t.runs,
        })
        .collect::<Vec<_>>();
    ranked.sort_by(|a, b| {
        b.runs
            .cmp(&a.runs)
            .then_with(|| (a.match_id, a.inning, a.over).cmp(&(b.match_id, b.inning, b.over)))
    });
    ranked.truncate(n);
    Ok(ranked)
}

/// Display label for a dismissal kind.
pub fn dismissal_label(kind: &DismissalKind) -> String {
    match kind {
        DismissalKind::Lbw => "LBW".to_string(),
        other => other.as_str().to_title_case(),
    }
}

/// Share of each bowler-credited dismissal kind.
pub fn dismissal_kinds(balls: &[EnrichedDelivery], seasons: &SeasonFilter) -> Vec<Share> {
    let mut counts: BTreeMap<&DismissalKind, u64> = BTreeMap::new();
    for kind in seasons
        .balls(balls)
        .filter_map(|b| b.dismissal_kind.as_ref())
        .filter(|k| k.is_bowler_credited())
    {
        *counts.entry(kind).or_insert(0) += 1;
    }
    shares(
        BOWLER_CREDITED_DISMISSALS
            .iter()
            .filter_map(|kind| counts.get(kind).map(|count| (dismissal_label(kind), *count))),
    )
}

/// Counts three-in-a-row windows over a spell's wicket sequence. Windows
/// overlap: four straight wickets are two hat-tricks.
pub fn count_hat_tricks(wickets: &[bool]) -> u64 {
    wickets
        .iter()
        .tuple_windows()
        .filter(|(a, b, c)| **a && **b && **c)
        .count() as u64
}

/// Hat-trick count per bowler, most first. Wides and no-balls are removed
/// from each spell before windowing.
pub fn hat_tricks(balls: &[EnrichedDelivery], seasons: &SeasonFilter) -> Vec<Entry<u64>> {
    let mut spells: BTreeMap<(u64, &str), Vec<(u8, u8, u8, bool)>> = BTreeMap::new();
    for ball in seasons.balls(balls).filter(|b| b.is_legal()) {
        if let Some(bowler) = ball.bowler_name() {
            spells.entry((ball.match_id, bowler)).or_default().push((
                ball.inning,
                ball.over,
                ball.ball,
                ball.is_bowler_wicket(),
            ));
        }
    }

    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for ((_, bowler), mut sequence) in spells {
        sequence.sort_by_key(|&(inning, over, ball, _)| (inning, over, ball));
        let wickets = sequence.iter().map(|s| s.3).collect::<Vec<_>>();
        let found = count_hat_tricks(&wickets);
        if found > 0 {
            *counts.entry(bowler.to_string()).or_insert(0) += found;
        }
    }
    top_n_desc(counts, usize::MAX)
}

/// Bowler with the most hat-tricks, or `None` when the slice has none.
pub fn most_hat_tricks(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
) -> StatsResult<Option<Entry<u64>>> {
    if seasons.balls(balls).next().is_none() {
        return Err(StatsError::no_data("hat-tricks"));
    }
    Ok(hat_tricks(balls, seasons).into_iter().next())
}

/// `"<bowler> (<n> Hattrick[s])"`, or `"-"` when nobody took one.
pub fn most_hat_tricks_label(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
) -> StatsResult<String> {
    Ok(match most_hat_tricks(balls, seasons)? {
        Some(top) if top.value > 1 => format!("{} ({} Hattricks)", top.name, top.value),
        Some(top) => format!("{} ({} Hattrick)", top.name, top.value),
        None => "-".to_string(),
    })
}

fn per_bowling_team(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
    metric: impl Fn(&BallTotals) -> f64,
) -> Vec<Entry<f64>> {
    group_totals(seasons.balls(balls), |b| Some(b.bowling_team.as_str()))
        .into_iter()
        .map(|(team, t)| Entry::new(team, metric(&t)))
        .collect()
}

/// Runs conceded per bowler-credited wicket, per bowling team.
pub fn team_bowling_averages(balls: &[EnrichedDelivery], seasons: &SeasonFilter) -> Vec<Entry<f64>> {
    per_bowling_team(balls, seasons, |t| bowling_average(t.runs, t.bowler_wickets))
}

pub fn team_bowling_strike_rates(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
) -> Vec<Entry<f64>> {
    per_bowling_team(balls, seasons, |t| {
        bowling_strike_rate(t.legal_balls, t.bowler_wickets)
    })
}

pub fn team_bowling_economies(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
) -> Vec<Entry<f64>> {
    per_bowling_team(balls, seasons, |t| economy(t.runs, t.legal_balls))
}

/// A team-level bowling record, optionally tied to one season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamBest {
    pub team: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    pub value: f64,
}

impl TeamBest {
    /// `"<short name> (<value>)"`.
    pub fn label(&self) -> String {
        format!("{} ({:.2})", short_name(&self.team), self.value)
    }
}

fn lowest(candidates: Vec<TeamBest>, query: &'static str) -> StatsResult<TeamBest> {
    candidates
        .into_iter()
        .min_by(|a, b| {
            cmp_f64(a.value, b.value)
                .then_with(|| a.team.cmp(&b.team))
                .then_with(|| a.season.cmp(&b.season))
        })
        .ok_or(StatsError::no_data(query))
}

/// Most economical single team season.
pub fn best_team_economy(balls: &[EnrichedDelivery], seasons: &SeasonFilter) -> StatsResult<TeamBest> {
    let candidates = group_totals(seasons.balls(balls), |b| {
        Some((b.season.as_str(), b.bowling_team.as_str()))
    })
    .into_iter()
    .filter(|(_, t)| t.legal_balls > 0)
    .map(|((season, team), t)| TeamBest {
        team: team.to_string(),
        season: Some(season.to_string()),
        value: economy(t.runs, t.legal_balls),
    })
    .collect();
    lowest(candidates, "best team economy")
}

/// Lowest balls-per-wicket single team season. Seasons without a wicket
/// have no strike rate to compare.
pub fn best_team_strike_rate(
    balls: &[EnrichedDelivery],
    seasons: &SeasonFilter,
) -> StatsResult<TeamBest> {
    let candidates = group_totals(seasons.balls(balls), |b| {
        Some((b.season.as_str(), b.bowling_team.as_str()))
    })
    .into_iter()
    .filter(|(_, t)| t.bowler_wickets > 0)
    .map(|((season, team), t)| TeamBest {
        team: team.to_string(),
        season: Some(season.to_string()),
        value: bowling_strike_rate(t.legal_balls, t.bowler_wickets),
    })
    .collect();
    lowest(candidates, "best team strike rate")
}

/// Lowest runs-per-wicket over the whole selection.
pub fn best_team_average(balls: &[EnrichedDelivery], seasons: &SeasonFilter) -> StatsResult<TeamBest> {
    let candidates = group_totals(seasons.balls(balls), |b| Some(b.bowling_team.as_str()))
        .into_iter()
        .filter(|(_, t)| t.bowler_wickets > 0)
        .map(|(team, t)| TeamBest {
            team: team.to_string(),
            season: None,
            value: bowling_average(t.runs, t.bowler_wickets),
        })
        .collect();
    lowest(candidates, "best team average")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hat_trick_windows_overlap() {
        assert_eq!(count_hat_tricks(&[true, true, true]), 1);
        assert_eq!(count_hat_tricks(&[true, true, true, true]), 2);
        assert_eq!(count_hat_tricks(&[true, true, false, true]), 0);
        assert_eq!(count_hat_tricks(&[true, true]), 0);
        assert_eq!(count_hat_tricks(&[]), 0);
    }

    #[test]
    fn dismissal_labels() {
        assert_eq!(dismissal_label(&DismissalKind::Lbw), "LBW");
        assert_eq!(dismissal_label(&DismissalKind::HitWicket), "Hit Wicket");
        assert_eq!(dismissal_label(&DismissalKind::Bowled), "Bowled");
    }

    #[test]
    fn figures_display() {
        let figures = Figures {
            match_id: 1,
            bowler: "JJ Bumrah".to_string(),
            wickets: 5,
            runs: 10,
        };
        assert_eq!(figures.to_string(), "JJ Bumrah (5/10)");
    }

    #[test]
    fn team_best_label_uses_short_name() {
        let best = TeamBest {
            team: "Mumbai Indians".to_string(),
            season: Some("2020".to_string()),
            value: 7.256,
        };
        assert_eq!(best.label(), "MI (7.26)");
    }
}
