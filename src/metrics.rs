//! Derived-rate formulas and their zero-denominator conventions.
//!
//! | metric              | zero denominator  |
//! |---------------------|-------------------|
//! | batting average     | total runs        |
//! | batting strike rate | 0                 |
//! | bowling average     | runs conceded     |
//! | economy             | 0                 |
//! | bowling strike rate | 0                 |
//! | team run rate       | undefined (None)  |

use std::{
    cmp::Ordering,
    collections::{BTreeMap, BTreeSet},
};

use crate::data::{Delivery, EnrichedDelivery};

pub const BALLS_PER_OVER: f64 = 6.0;

/// Running totals over a group of deliveries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BallTotals {
    /// Every run off the bat or from extras.
    pub runs: u64,
    pub batsman_runs: u64,
    pub legal_balls: u64,
    /// Any dismissal, run-outs included.
    pub dismissals: u64,
    /// Dismissals credited to the bowler.
    pub bowler_wickets: u64,
    pub matches: BTreeSet<u64>,
}

impl BallTotals {
    pub fn add(&mut self, delivery: &Delivery) {
        self.runs += u64::from(delivery.total_runs);
        self.batsman_runs += u64::from(delivery.batsman_runs);
        self.legal_balls += u64::from(delivery.is_legal());
        self.dismissals += u64::from(delivery.is_wicket);
        self.bowler_wickets += u64::from(delivery.is_bowler_wicket());
        self.matches.insert(delivery.match_id);
    }

    pub fn match_count(&self) -> u64 {
        self.matches.len() as u64
    }
}

/// Groups balls by a key and accumulates [`BallTotals`] per group. Balls
/// whose key is `None` are skipped.
pub fn group_totals<'a, I, K, F>(balls: I, key: F) -> BTreeMap<K, BallTotals>
where
    I: IntoIterator<Item = &'a EnrichedDelivery>,
    K: Ord,
    F: Fn(&'a EnrichedDelivery) -> Option<K>,
{
    let mut groups: BTreeMap<K, BallTotals> = BTreeMap::new();
    for ball in balls {
        if let Some(k) = key(ball) {
            groups.entry(k).or_default().add(ball);
        }
    }
    groups
}

pub fn overs(legal_balls: u64) -> f64 {
    legal_balls as f64 / BALLS_PER_OVER
}

pub fn batting_average(runs: u64, dismissals: u64) -> f64 {
    if dismissals == 0 {
        runs as f64
    } else {
        runs as f64 / dismissals as f64
    }
}

pub fn batting_strike_rate(runs: u64, legal_balls: u64) -> f64 {
    if legal_balls == 0 {
        0.0
    } else {
        runs as f64 / legal_balls as f64 * 100.0
    }
}

pub fn bowling_average(runs_conceded: u64, wickets: u64) -> f64 {
    if wickets == 0 {
        runs_conceded as f64
    } else {
        runs_conceded as f64 / wickets as f64
    }
}

pub fn economy(runs_conceded: u64, legal_balls: u64) -> f64 {
    if legal_balls == 0 {
        0.0
    } else {
        runs_conceded as f64 / overs(legal_balls)
    }
}

pub fn bowling_strike_rate(legal_balls: u64, wickets: u64) -> f64 {
    if wickets == 0 {
        0.0
    } else {
        legal_balls as f64 / wickets as f64
    }
}

pub fn run_rate(runs: u64, legal_balls: u64) -> Option<f64> {
    (legal_balls > 0).then(|| runs as f64 / overs(legal_balls))
}

pub fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Rounds to two decimal places for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Total order on floats for sorting derived metrics.
pub fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}
