mod common;

use common::*;
use cricket_stats::{
    batting, bowling,
    data::{Delivery, DismissalKind, EnrichedDelivery, Match},
    filter::{Pair, SeasonFilter},
    overview, player, teams,
};
use proptest::prelude::*;

const SEASONS: [&str; 3] = ["2018", "2019", "2020"];
const BATTERS: [&str; 4] = ["RG Sharma", "V Kohli", "MS Dhoni", "KL Rahul"];
const BOWLERS: [&str; 3] = ["JJ Bumrah", "R Ashwin", "YS Chahal"];

fn fixtures() -> Vec<Match> {
    SEASONS
        .iter()
        .enumerate()
        .map(|(idx, season)| fixture(idx as u64 + 1, season, HOME, AWAY))
        .collect()
}

#[derive(Debug, Clone)]
struct BallPlan {
    season: usize,
    home_bats: bool,
    batter: usize,
    bowler: usize,
    over: u8,
    runs: u32,
    wicket: bool,
    wide: bool,
}

fn ball_plan() -> impl Strategy<Value = BallPlan> {
    (
        0..SEASONS.len(),
        any::<bool>(),
        0..BATTERS.len(),
        0..BOWLERS.len(),
        0u8..20,
        0u32..7,
        any::<bool>(),
        prop::bool::weighted(0.1),
    )
        .prop_map(|(season, home_bats, batter, bowler, over, runs, wicket, wide)| BallPlan {
            season,
            home_bats,
            batter,
            bowler,
            over,
            runs,
            wicket,
            wide,
        })
}

fn build(plans: &[BallPlan]) -> Vec<EnrichedDelivery> {
    let deliveries = plans
        .iter()
        .enumerate()
        .map(|(idx, plan)| {
            let mut d: Delivery = ball(
                plan.season as u64 + 1,
                plan.over,
                (idx % 6) as u8 + 1,
                BATTERS[plan.batter],
                BOWLERS[plan.bowler],
                plan.runs,
            );
            if !plan.home_bats {
                d = second_innings(d);
            }
            if plan.wide {
                d = wide(d);
            } else if plan.wicket {
                d = out(d, DismissalKind::Caught);
            }
            d
        })
        .collect();
    balls(fixtures(), deliveries)
}

proptest! {
    #[test]
    fn selecting_every_season_matches_no_selection(plans in prop::collection::vec(ball_plan(), 1..80)) {
        let balls = build(&plans);
        let matches = fixtures();
        let unrestricted = SeasonFilter::all();
        let everything = SeasonFilter::new(SEASONS);
        let blank = SeasonFilter::new(Vec::<String>::new());
        prop_assert!(blank.is_unrestricted());

        for filter in [&everything, &blank] {
            prop_assert_eq!(
                batting::top_scorers(&balls, filter, 10),
                batting::top_scorers(&balls, &unrestricted, 10)
            );
            prop_assert_eq!(
                bowling::bowler_table(&balls, filter),
                bowling::bowler_table(&balls, &unrestricted)
            );
            prop_assert_eq!(
                bowling::hat_tricks(&balls, filter),
                bowling::hat_tricks(&balls, &unrestricted)
            );
            prop_assert_eq!(
                overview::phase_runs(&balls, filter),
                overview::phase_runs(&balls, &unrestricted)
            );
            prop_assert_eq!(
                overview::summary_stats(&matches, filter),
                overview::summary_stats(&matches, &unrestricted)
            );
            prop_assert_eq!(
                batting::team_run_rates(&balls, filter),
                batting::team_run_rates(&balls, &unrestricted)
            );
        }
    }

    #[test]
    fn swapping_a_pair_swaps_the_results(plans in prop::collection::vec(ball_plan(), 1..80)) {
        let balls = build(&plans);
        let matches = fixtures();
        let seasons = SeasonFilter::all();
        let forward = Pair::both(HOME, AWAY);
        let backward = Pair::both(AWAY, HOME);

        let mut wins = teams::wins_per_season(&matches, &seasons, &backward);
        wins.reverse();
        prop_assert_eq!(teams::wins_per_season(&matches, &seasons, &forward), wins);

        let mut bounds = teams::boundary_counts(&balls, &seasons, &backward);
        bounds.reverse();
        prop_assert_eq!(teams::boundary_counts(&balls, &seasons, &forward), bounds);

        let ab = teams::compare_teams(&balls, &seasons, &forward);
        let ba = teams::compare_teams(&balls, &seasons, &backward);
        for (x, y) in ab.batting.iter().zip(&ba.batting) {
            let mut flipped = y.values.clone();
            flipped.reverse();
            prop_assert_eq!(&x.values, &flipped);
        }

        let players = Pair::both(BATTERS[0], BATTERS[1]);
        let swapped = Pair::both(BATTERS[1], BATTERS[0]);
        let mut runs = player::runs_by_season(&balls, &seasons, &swapped);
        runs.reverse();
        prop_assert_eq!(player::runs_by_season(&balls, &seasons, &players), runs);

        let alone = player::batting_rates_by_season(&balls, &seasons, &Pair::single(BATTERS[0]));
        let paired = player::batting_rates_by_season(&balls, &seasons, &players);
        prop_assert_eq!(&alone.strike_rate[0], &paired.strike_rate[0]);
        prop_assert_eq!(&alone.average[0], &paired.average[0]);

        let alone = teams::team_stats(&balls, &seasons, HOME);
        let paired = teams::compare_teams(&balls, &seasons, &Pair::single(HOME));
        prop_assert_eq!(paired.bowling[1].values[0], alone.wickets_taken as f64);
    }
}
