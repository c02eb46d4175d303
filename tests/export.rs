mod common;

use std::fs;

use common::*;
use cricket_stats::{
    data::DismissalKind,
    export::{self, ALL_ROUNDER_FILE, BATTER_FILE},
    filter::SeasonFilter,
    player::{self, PlayerStats},
};

fn sample_balls() -> Vec<cricket_stats::data::EnrichedDelivery> {
    let mut deliveries = over_of(1, 0, "Opener", "Spinner", [1, 4, 0, 6, 2, 0]);
    deliveries.push(out(ball(1, 1, 1, "Opener", "Spinner", 0), DismissalKind::Caught));
    balls(vec![fixture(1, "2021", HOME, AWAY)], deliveries)
}

#[test]
fn header_is_written_once() {
    let workspace = TestWorkspace::new();
    let balls = sample_balls();
    let stats = PlayerStats::Batsman(player::batting_profile(&balls, &SeasonFilter::all(), "Opener"));

    let first = export::append_player_stats(workspace.path(), &stats).expect("first export");
    let second = export::append_player_stats(workspace.path(), &stats).expect("second export");
    assert_eq!(first, second);
    let path = first.expect("batters are exported");
    assert!(path.ends_with(BATTER_FILE));

    let contents = fs::read_to_string(&path).expect("read export");
    let lines = contents.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("player,total_matches,total_innings,total_runs"));
    assert!(lines[1].starts_with("Opener,1,1,13,7,185.71,1,13,1,1,"));
    assert_eq!(lines[1], lines[2]);
}

#[test]
fn all_rounders_get_prefixed_columns() {
    let workspace = TestWorkspace::new();
    let balls = sample_balls();
    let seasons = SeasonFilter::all();
    let stats = PlayerStats::AllRounder {
        batting: player::batting_profile(&balls, &seasons, "Spinner"),
        bowling: player::bowling_profile(&balls, &seasons, "Spinner"),
    };

    let path = export::append_player_stats(&workspace.path().join("nested"), &stats)
        .expect("export")
        .expect("all-rounders are exported");
    assert!(path.ends_with(ALL_ROUNDER_FILE));
    let contents = fs::read_to_string(&path).expect("read export");
    let header = contents.lines().next().expect("header");
    assert!(header.starts_with("player,batting_total_matches"));
    assert!(header.contains("bowling_best_bowling_figures"));
    assert!(contents.contains("Spinner (1/13)"));
}
