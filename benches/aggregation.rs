use std::fs::File;
use std::io::{BufWriter, Write};

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use cricket_stats::bowling;
use cricket_stats::config::DashboardConfig;
use cricket_stats::engine::Engine;
use cricket_stats::filter::{Pair, SeasonFilter};
use cricket_stats::loader;
use cricket_stats::{overview, teams};
use tempfile::TempDir;

const TEAMS: [&str; 8] = [
    "Mumbai Indians",
    "Chennai Super Kings",
    "Kolkata Knight Riders",
    "Delhi Capitals",
    "Punjab Kings",
    "Rajasthan Royals",
    "Sunrisers Hyderabad",
    "Royal Challengers Bengaluru",
];

/// One season of 60 full matches written as CSV.
fn generate_season(matches: u64) -> (TempDir, DashboardConfig) {
    let temp_dir = tempfile::tempdir().expect("temp dir");
    let matches_path = temp_dir.path().join("matches.csv");
    let deliveries_path = temp_dir.path().join("deliveries.csv");

    let mut m = BufWriter::new(File::create(&matches_path).expect("create matches"));
    let mut d = BufWriter::new(File::create(&deliveries_path).expect("create deliveries"));
    writeln!(
        m,
        "id,season,venue,team1,team2,toss_winner,toss_decision,winner,result,result_margin,target_runs,target_overs"
    )
    .expect("header");
    writeln!(
        d,
        "match_id,inning,over,ball,batting_team,bowling_team,batter,bowler,non_striker,batsman_runs,extra_runs,extras_type,total_runs,is_wicket,player_dismissed,dismissal_kind,fielder"
    )
    .expect("header");

    for id in 1..=matches {
        let home = TEAMS[(id as usize) % TEAMS.len()];
        let away = TEAMS[(id as usize + 3) % TEAMS.len()];
        writeln!(m, "{id},2024,Venue {},{home},{away},{home},bat,{home},runs,12,170,20", id % 10)
            .expect("match row");
        for inning in 1..=2u8 {
            let (bat, bowl) = if inning == 1 { (home, away) } else { (away, home) };
            for over in 0..20u64 {
                for ball in 1..=6u64 {
                    let seq = id * 1000 + over * 6 + ball;
                    let batter = format!("{bat} Batter {}", seq % 7);
                    let bowler = format!("{bowl} Bowler {}", over % 5);
                    let runs = [0, 1, 1, 2, 4, 0, 6, 1][(seq % 8) as usize];
                    let (wicket, dismissed, kind) = if seq % 29 == 0 {
                        (1, batter.as_str(), "caught")
                    } else {
                        (0, "NA", "NA")
                    };
                    let (extras, extra_runs) = if seq % 37 == 0 { ("wides", 1) } else { ("", 0) };
                    writeln!(
                        d,
                        "{id},{inning},{over},{ball},{bat},{bowl},{batter},{bowler},NA,{runs},{extra_runs},{extras},{},{wicket},{dismissed},{kind},NA",
                        runs + extra_runs
                    )
                    .expect("delivery row");
                }
            }
        }
    }
    m.flush().expect("flush matches");
    d.flush().expect("flush deliveries");

    let config = DashboardConfig {
        matches: matches_path,
        deliveries: deliveries_path,
        ..DashboardConfig::default()
    };
    (temp_dir, config)
}

fn bench_aggregation(c: &mut Criterion) {
    let (temp_dir, config) = generate_season(60);
    let engine = Engine::new(loader::load(&config).expect("load season"));
    let all = SeasonFilter::all();
    let pair = Pair::both(TEAMS[0], TEAMS[1]);

    let mut group = c.benchmark_group("season");

    group.bench_function("load_and_classify", |b| {
        b.iter_batched(
            || config.clone(),
            |config| Engine::new(loader::load(&config).expect("load season")),
            BatchSize::LargeInput,
        );
    });

    group.bench_function("overview", |b| {
        b.iter(|| {
            overview::phase_runs(engine.balls(), &all);
            overview::runs_per_over(engine.balls(), &all);
            overview::summary_stats(engine.matches(), &all).expect("summary")
        });
    });

    group.bench_function("hat_tricks", |b| {
        b.iter(|| bowling::hat_tricks(engine.balls(), &all));
    });

    group.bench_function("compare_teams", |b| {
        b.iter(|| teams::compare_teams(engine.balls(), &all, &pair));
    });

    drop(temp_dir);
    group.finish();
}

criterion_group!(benches, bench_aggregation);
criterion_main!(benches);
