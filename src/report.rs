//! Dashboard tabs assembled from engine queries.
//!
//! Each tab is a list of named sections. A section carries both a text
//! table and the serialised query result, so one pass over the engine
//! serves either output format.

use std::{collections::BTreeSet, iter, path::Path};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    batting, bowling,
    classify::PlayerRole,
    cli::OutputFormat,
    engine::Engine,
    error::StatsResult,
    export,
    filter::{FilterContext, Phase},
    normalize::venue_label,
    overview,
    player::{self, BattingProfile, BowlingProfile, PlayerStats},
    series::{Breakdown, Entry, Series, Share},
    table::{Table, fixed2, key_values},
    teams::{self, StatRow},
};

const NONE: &str = "-";

#[derive(Debug)]
struct Section {
    key: String,
    tables: Vec<Table>,
    value: Value,
}

#[derive(Debug, Default)]
pub struct Report {
    sections: Vec<Section>,
}

impl Report {
    fn add<T: Serialize>(&mut self, key: &str, tables: Vec<Table>, value: &T) -> Result<()> {
        let value = serde_json::to_value(value).with_context(|| format!("Serialising {key}"))?;
        self.sections.push(Section {
            key: key.to_string(),
            tables,
            value,
        });
        Ok(())
    }

    fn add_table<T: Serialize>(&mut self, key: &str, table: Table, value: &T) -> Result<()> {
        self.add(key, vec![table], value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.key.as_str())
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(self
                .sections
                .iter()
                .flat_map(|s| s.tables.iter())
                .map(Table::render)
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Json => {
                let map = self
                    .sections
                    .iter()
                    .map(|s| (s.key.clone(), s.value.clone()))
                    .collect::<Map<_, _>>();
                let mut rendered = serde_json::to_string_pretty(&Value::Object(map))
                    .context("Serialising report")?;
                rendered.push('\n');
                Ok(rendered)
            }
        }
    }
}

/// Empty selections read as absent values; other query errors propagate.
fn present<T>(result: StatsResult<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_no_data() => {
            debug!("{err}");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

fn label(result: StatsResult<String>) -> Result<String> {
    Ok(present(result)?.unwrap_or_else(|| NONE.to_string()))
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| NONE.to_string())
}

fn entry_label(entry: Option<&Entry<u64>>) -> String {
    or_dash(entry.map(|e| format!("{} ({})", e.name, e.value)))
}

fn entry_table<T>(title: &str, headers: [&str; 2], entries: &[Entry<T>], cell: impl Fn(&T) -> String) -> Table {
    let mut table = Table::new(headers).titled(title);
    for entry in entries {
        table.push([entry.name.clone(), cell(&entry.value)]);
    }
    table
}

fn share_table(title: &str, heading: &str, shares: &[Share]) -> Table {
    let mut table = Table::new([heading, "Count", "Percent"]).titled(title);
    for share in shares {
        table.push([share.label.clone(), share.count.to_string(), fixed2(share.percent)]);
    }
    table
}

/// Seasons down the side, one column per series.
fn series_table<T: Copy>(title: &str, series: &[Series<T>], cell: impl Fn(T) -> String) -> Table {
    let seasons = series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.season.as_str()))
        .collect::<BTreeSet<_>>();
    let headers = iter::once("Season".to_string()).chain(series.iter().map(|s| s.name.clone()));
    let mut table = Table::new(headers).titled(title);
    for season in seasons {
        let values = series
            .iter()
            .map(|s| or_dash(s.value_at(season).map(&cell)));
        table.push(iter::once(season.to_string()).chain(values));
    }
    table
}

fn breakdown_tables(
    title: &str,
    heading: &str,
    breakdowns: &[Breakdown<u64>],
    name: impl Fn(&str) -> String,
) -> Vec<Table> {
    breakdowns
        .iter()
        .map(|b| {
            let mut table = Table::new([heading, "Value"]).titled(format!("{title}: {}", b.name));
            for entry in &b.entries {
                table.push([name(&entry.name), entry.value.to_string()]);
            }
            table
        })
        .collect()
}

fn stat_rows_table(title: &str, teams: &[String], rows: &[StatRow]) -> Table {
    let headers = iter::once("Stat".to_string()).chain(teams.iter().cloned());
    let mut table = Table::new(headers).titled(title);
    for row in rows {
        table.push(iter::once(row.stat.to_string()).chain(row.values.iter().map(|v| fixed2(*v))));
    }
    table
}

pub fn overview(engine: &Engine, ctx: &FilterContext, top: usize) -> Result<Report> {
    let (balls, matches, seasons) = (engine.balls(), engine.matches(), &ctx.seasons);
    let mut report = Report::default();

    let summary = present(overview::summary_stats(matches, seasons))?;
    let cards = key_values(
        "Summary",
        [
            ("Matches", overview::total_matches(matches, seasons).to_string()),
            ("Seasons", or_dash(summary.as_ref().map(|s| s.total_seasons))),
            ("Teams", or_dash(summary.as_ref().map(|s| s.total_teams))),
            ("Venues", or_dash(summary.as_ref().map(|s| s.total_venues))),
            ("Total Runs", overview::total_runs(balls, seasons).to_string()),
            ("Total Wickets", overview::total_wickets(balls, seasons).to_string()),
            (
                "Most Successful Team",
                entry_label(summary.as_ref().and_then(|s| s.most_successful_team.as_ref())),
            ),
            (
                "Largest Result Margin",
                or_dash(summary.as_ref().and_then(|s| s.largest_result_margin)),
            ),
            (
                "Most Common Venue",
                entry_label(summary.as_ref().and_then(|s| s.most_common_venue.as_ref())),
            ),
        ],
    );
    report.add_table("summary", cards, &summary)?;

    let per_season = overview::matches_per_season(matches, seasons);
    let table = entry_table("Matches per Season", ["Season", "Matches"], &per_season, u64::to_string);
    report.add_table("matches_per_season", table, &per_season)?;

    let split = overview::win_type_split(matches, seasons);
    report.add_table("win_type_split", share_table("Win Type", "Result", &split), &split)?;

    let toss = overview::toss_decisions(matches, seasons);
    report.add_table("toss_decisions", share_table("Toss Decisions", "Decision", &toss), &toss)?;

    let wins = overview::team_wins(matches, seasons)
        .into_iter()
        .take(top)
        .collect::<Vec<_>>();
    report.add_table("team_wins", entry_table("Team Wins", ["Team", "Wins"], &wins, u64::to_string), &wins)?;

    let distribution = overview::runs_distribution(balls, seasons);
    report.add_table(
        "runs_distribution",
        share_table("Runs Distribution", "Scoring Ball", &distribution),
        &distribution,
    )?;

    let overs = overview::runs_per_over(balls, seasons);
    let mut table = Table::new(["Over", "Runs", "Phase"]).titled("Runs per Over");
    for over in &overs {
        table.push([over.over.to_string(), over.runs.to_string(), over.phase.label().to_string()]);
    }
    report.add_table("runs_per_over", table, &overs)?;

    let phases = overview::phase_runs(balls, seasons);
    let mut table = Table::new(["Phase", "Runs", "Wickets"]).titled("Runs by Phase");
    for phase in &phases {
        table.push([phase.phase.label().to_string(), phase.runs.to_string(), phase.wickets.to_string()]);
    }
    report.add_table("phase_runs", table, &phases)?;

    Ok(report)
}

pub fn batting(engine: &Engine, ctx: &FilterContext, top: usize) -> Result<Report> {
    let (balls, matches, seasons) = (engine.balls(), engine.matches(), &ctx.seasons);
    let mut report = Report::default();

    let lowest = present(batting::lowest_total(balls, seasons))?;
    let chase = present(batting::highest_run_chase(matches, seasons))?;
    let cards = key_values(
        "Batting Highlights",
        [
            ("Top Scorer", label(batting::top_scorer_label(balls, seasons))?),
            ("Highest Run Chase", or_dash(chase)),
            (
                "Lowest Total",
                or_dash(lowest.as_ref().map(|l| format!("{} ({})", l.runs, l.team))),
            ),
        ],
    );
    report.add_table(
        "highlights",
        cards,
        &serde_json::json!({ "highest_run_chase": chase, "lowest_total": lowest }),
    )?;

    let scorers = present(batting::top_scorers(balls, seasons, top))?.unwrap_or_default();
    let table = entry_table("Top Run Scorers", ["Batter", "Runs"], &scorers, u64::to_string);
    report.add_table("top_scorers", table, &scorers)?;

    let rates = batting::team_run_rates(balls, seasons);
    let table = entry_table("Team Run Rates", ["Team", "Run Rate"], &rates, |v| fixed2(*v));
    report.add_table("team_run_rates", table, &rates)?;

    let averages = batting::team_batting_averages(balls, seasons);
    let table = entry_table("Team Batting Averages", ["Team", "Runs per Match"], &averages, |v| {
        fixed2(*v)
    });
    report.add_table("team_batting_averages", table, &averages)?;

    let strike_rates = batting::team_strike_rates(balls, seasons);
    let table = entry_table("Team Strike Rates", ["Team", "Strike Rate"], &strike_rates, |v| {
        fixed2(*v)
    });
    report.add_table("team_strike_rates", table, &strike_rates)?;

    Ok(report)
}

pub fn bowling(engine: &Engine, ctx: &FilterContext, top: usize) -> Result<Report> {
    let (balls, seasons) = (engine.balls(), &ctx.seasons);
    let mut report = Report::default();

    let figures = present(bowling::best_bowling_figures(balls, seasons, None))?;
    let economy = present(bowling::best_team_economy(balls, seasons))?;
    let strike_rate = present(bowling::best_team_strike_rate(balls, seasons))?;
    let average = present(bowling::best_team_average(balls, seasons))?;
    let cards = key_values(
        "Bowling Highlights",
        [
            ("Top Wicket Taker", label(bowling::top_wicket_taker_label(balls, seasons))?),
            ("Best Figures", or_dash(figures.as_ref())),
            ("Most Hat-tricks", label(bowling::most_hat_tricks_label(balls, seasons))?),
            ("Best Team Economy", or_dash(economy.as_ref().map(|b| b.label()))),
            ("Best Team Strike Rate", or_dash(strike_rate.as_ref().map(|b| b.label()))),
            ("Best Team Average", or_dash(average.as_ref().map(|b| b.label()))),
        ],
    );
    report.add_table(
        "highlights",
        cards,
        &serde_json::json!({
            "best_bowling_figures": figures,
            "best_team_economy": economy,
            "best_team_strike_rate": strike_rate,
            "best_team_average": average,
        }),
    )?;

    let takers = present(bowling::top_wicket_takers(balls, seasons, top))?.unwrap_or_default();
    let table = entry_table("Top Wicket Takers", ["Bowler", "Wickets"], &takers, u64::to_string);
    report.add_table("top_wicket_takers", table, &takers)?;

    let lines = bowling::bowler_table(balls, seasons)
        .into_iter()
        .take(top)
        .collect::<Vec<_>>();
    let mut table = Table::new(["Bowler", "Matches", "Wickets", "Runs", "Overs", "Economy", "Average", "Strike Rate"])
        .titled("Bowlers");
    for line in &lines {
        table.push([
            line.bowler.clone(),
            line.matches.to_string(),
            line.wickets.to_string(),
            line.runs_conceded.to_string(),
            fixed2(line.overs),
            fixed2(line.economy),
            fixed2(line.average),
            fixed2(line.strike_rate),
        ]);
    }
    report.add_table("bowlers", table, &lines)?;

    let economical = present(bowling::best_economy(balls, seasons, top))?.unwrap_or_default();
    let table = entry_table("Best Economy (min 100 overs)", ["Bowler", "Economy"], &economical, |v| {
        fixed2(*v)
    });
    report.add_table("best_economy", table, &economical)?;

    let expensive = present(bowling::most_expensive_overs(balls, seasons, top))?.unwrap_or_default();
    let mut table = Table::new(["Match", "Inning", "Over", "Bowler", "Runs"]).titled("Most Expensive Overs");
    for over in &expensive {
        table.push([
            over.match_id.to_string(),
            over.inning.to_string(),
            over.over.to_string(),
            over.bowler.clone(),
            over.runs.to_string(),
        ]);
    }
    report.add_table("most_expensive_overs", table, &expensive)?;

    let kinds = bowling::dismissal_kinds(balls, seasons);
    report.add_table("dismissal_kinds", share_table("Dismissal Kinds", "Kind", &kinds), &kinds)?;

    let hat_tricks = bowling::hat_tricks(balls, seasons);
    let table = entry_table("Hat-tricks", ["Bowler", "Hat-tricks"], &hat_tricks, u64::to_string);
    report.add_table("hat_tricks", table, &hat_tricks)?;

    let averages = bowling::team_bowling_averages(balls, seasons);
    let table = entry_table("Team Bowling Averages", ["Team", "Average"], &averages, |v| fixed2(*v));
    report.add_table("team_bowling_averages", table, &averages)?;

    let strike_rates = bowling::team_bowling_strike_rates(balls, seasons);
    let table = entry_table("Team Bowling Strike Rates", ["Team", "Strike Rate"], &strike_rates, |v| {
        fixed2(*v)
    });
    report.add_table("team_bowling_strike_rates", table, &strike_rates)?;

    let economies = bowling::team_bowling_economies(balls, seasons);
    let table = entry_table("Team Bowling Economies", ["Team", "Economy"], &economies, |v| fixed2(*v));
    report.add_table("team_bowling_economies", table, &economies)?;

    Ok(report)
}

pub fn teams(engine: &Engine, ctx: &FilterContext, phase: Phase) -> Result<Report> {
    let (balls, matches, seasons) = (engine.balls(), engine.matches(), &ctx.seasons);
    let pair = ctx.teams()?;
    let mut report = Report::default();

    let comparison = teams::compare_teams(balls, seasons, pair);
    let tables = vec![
        stat_rows_table("Team Overview", &comparison.teams, &comparison.basic),
        stat_rows_table("Batting", &comparison.teams, &comparison.batting),
        stat_rows_table("Bowling", &comparison.teams, &comparison.bowling),
    ];
    report.add("comparison", tables, &comparison)?;

    let wins = teams::wins_per_season(matches, seasons, pair);
    report.add_table("wins_per_season", series_table("Wins per Season", &wins, |v| v.to_string()), &wins)?;

    if pair.second.is_some() {
        let h2h = teams::head_to_head(matches, seasons, pair)?;
        let table = entry_table("Head to Head", ["Winner", "Wins"], &h2h, u64::to_string);
        report.add_table("head_to_head", table, &h2h)?;
    }

    let runs = teams::phase_batting(balls, seasons, pair, phase);
    let title = format!("{} Runs per Season", phase.label());
    report.add_table("phase_batting", series_table(&title, &runs, |v| v.to_string()), &runs)?;

    let wickets = teams::phase_bowling(balls, seasons, pair, phase);
    let title = format!("{} Wickets per Season", phase.label());
    report.add_table("phase_bowling", series_table(&title, &wickets, |v| v.to_string()), &wickets)?;

    let strike_rates = teams::team_strike_rate_by_season(balls, seasons, pair);
    let table = series_table("Strike Rate per Season", &strike_rates, fixed2);
    report.add_table("strike_rate_by_season", table, &strike_rates)?;

    let economies = teams::team_economy_by_season(balls, seasons, pair);
    let table = series_table("Economy per Season", &economies, fixed2);
    report.add_table("economy_by_season", table, &economies)?;

    let performers = teams::top_performers(balls, seasons, pair);
    let mut table = Table::new(["Team", "Top Scorer", "Top Wicket Taker"]).titled("Top Performers");
    for p in &performers {
        table.push([
            p.team.clone(),
            entry_label(p.top_scorer.as_ref()),
            entry_label(p.top_wicket_taker.as_ref()),
        ]);
    }
    report.add_table("top_performers", table, &performers)?;

    let boundaries = teams::boundary_counts(balls, seasons, pair);
    let mut table = Table::new(["Team", "Fours", "Sixes"]).titled("Boundaries");
    for b in &boundaries {
        table.push([b.team.clone(), b.fours.to_string(), b.sixes.to_string()]);
    }
    report.add_table("boundary_counts", table, &boundaries)?;

    let dismissals = teams::dismissal_breakdown(balls, seasons, pair);
    let tables = dismissals
        .iter()
        .flat_map(|d| {
            [
                entry_table(&format!("Dismissals Taken: {}", d.team), ["Kind", "Count"], &d.taken, u64::to_string),
                entry_table(&format!("Dismissals Lost: {}", d.team), ["Kind", "Count"], &d.lost, u64::to_string),
            ]
        })
        .collect();
    report.add("dismissal_breakdown", tables, &dismissals)?;

    Ok(report)
}

fn batting_pairs(p: &BattingProfile) -> Vec<(&'static str, String)> {
    vec![
        ("Matches", p.matches.to_string()),
        ("Innings", p.innings.to_string()),
        ("Runs", p.runs.to_string()),
        ("Balls Faced", p.balls_faced.to_string()),
        ("Strike Rate", fixed2(p.strike_rate)),
        ("Dismissals", p.dismissals.to_string()),
        ("Average", fixed2(p.average)),
        ("Fours", p.fours.to_string()),
        ("Sixes", p.sixes.to_string()),
        ("Fifties", p.fifties.to_string()),
        ("Hundreds", p.hundreds.to_string()),
        ("Best Score", p.best_score.to_string()),
        ("Most Common Dismissal", or_dash(p.most_common_dismissal.as_ref())),
        ("Player of the Match", p.player_of_match.to_string()),
    ]
}

fn bowling_pairs(p: &BowlingProfile) -> Vec<(&'static str, String)> {
    vec![
        ("Matches", p.matches.to_string()),
        ("Innings", p.innings.to_string()),
        ("Wickets", p.wickets.to_string()),
        ("Runs Conceded", p.runs_conceded.to_string()),
        ("Balls", p.legal_balls.to_string()),
        ("Overs", fixed2(p.overs)),
        ("Average", fixed2(p.average)),
        ("Economy", fixed2(p.economy)),
        ("Strike Rate", fixed2(p.strike_rate)),
        ("Best Figures", or_dash(p.best_figures.as_ref())),
        ("4-Wicket Hauls", p.four_wicket_hauls.to_string()),
        ("5-Wicket Hauls", p.five_wicket_hauls.to_string()),
        ("Most Common Dismissal", or_dash(p.most_common_dismissal.as_ref())),
        ("Maiden Overs", p.maiden_overs.to_string()),
    ]
}

fn profile_tables(stats: &PlayerStats, team: Option<&str>) -> Vec<Table> {
    let player = stats.player();
    let header = key_values(
        player,
        [("Role", stats.role().label().to_string()), ("Team", or_dash(team))],
    );
    let mut tables = vec![header];
    match stats {
        PlayerStats::Batsman(p) => tables.push(key_values("Batting", batting_pairs(p))),
        PlayerStats::Bowler(p) => tables.push(key_values("Bowling", bowling_pairs(p))),
        PlayerStats::AllRounder { batting, bowling } => {
            tables.push(key_values("Batting", batting_pairs(batting)));
            tables.push(key_values("Bowling", bowling_pairs(bowling)));
        }
        PlayerStats::Unclassified { .. } => {}
    }
    tables
}

#[derive(Serialize)]
struct Profile<'a> {
    stats: &'a PlayerStats,
    team: Option<String>,
    teams_by_season: Vec<Entry<String>>,
}

pub fn player(engine: &Engine, ctx: &FilterContext, export_dir: Option<&Path>) -> Result<Report> {
    let (balls, seasons) = (engine.balls(), &ctx.seasons);
    let players = ctx.players()?;
    let mut report = Report::default();

    for name in players.names() {
        let stats = engine.player_stats(seasons, name);
        let team = player::last_team(balls, name);
        let history = player::teams_by_season(balls, name);
        let mut tables = profile_tables(&stats, team.as_deref());
        tables.push(entry_table(
            &format!("Teams: {name}"),
            ["Season", "Team"],
            &history,
            String::clone,
        ));
        if let Some(dir) = export_dir {
            export::append_player_stats(dir, &stats)?;
        }
        let key = format!("profile:{name}");
        let profile = Profile {
            stats: &stats,
            team,
            teams_by_season: history,
        };
        report.add(&key, tables, &profile)?;
    }

    let roles = players.names().map(|p| engine.role_of(p)).collect::<Vec<_>>();
    let batting = roles
        .iter()
        .any(|r| matches!(r, PlayerRole::Batsman | PlayerRole::AllRounder));
    let bowling = roles
        .iter()
        .any(|r| matches!(r, PlayerRole::Bowler | PlayerRole::AllRounder));

    if batting {
        let runs = player::runs_by_season(balls, seasons, players);
        report.add_table("runs_by_season", series_table("Runs per Season", &runs, |v| v.to_string()), &runs)?;

        let rates = player::batting_rates_by_season(balls, seasons, players);
        let tables = vec![
            series_table("Batting Strike Rate per Season", &rates.strike_rate, fixed2),
            series_table("Batting Average per Season", &rates.average, fixed2),
        ];
        report.add("batting_rates_by_season", tables, &rates)?;

        let against = player::runs_against_teams(balls, seasons, players);
        let tables = breakdown_tables("Runs Against", "Team", &against, str::to_string);
        report.add("runs_against_teams", tables, &against)?;

        let venues = player::runs_at_venues(balls, seasons, players);
        let tables = breakdown_tables("Runs at Venues", "Venue", &venues, venue_label);
        report.add("runs_at_venues", tables, &venues)?;
    }

    if bowling {
        let wickets = player::wickets_by_season(balls, seasons, players);
        let table = series_table("Wickets per Season", &wickets, |v| v.to_string());
        report.add_table("wickets_by_season", table, &wickets)?;

        let rates = player::bowling_rates_by_season(balls, seasons, players);
        let tables = vec![
            series_table("Bowling Strike Rate per Season", &rates.strike_rate, fixed2),
            series_table("Bowling Average per Season", &rates.average, fixed2),
        ];
        report.add("bowling_rates_by_season", tables, &rates)?;

        let economies = player::economy_by_season(balls, seasons, players);
        let table = series_table("Economy per Season", &economies, fixed2);
        report.add_table("economy_by_season", table, &economies)?;

        let against = player::wickets_against_teams(balls, seasons, players);
        let tables = breakdown_tables("Wickets Against", "Team", &against, str::to_string);
        report.add("wickets_against_teams", tables, &against)?;

        let venues = player::wickets_at_venues(balls, seasons, players);
        let tables = breakdown_tables("Wickets at Venues", "Venue", &venues, venue_label);
        report.add("wickets_at_venues", tables, &venues)?;
    }

    info!("Built player report with {} section(s)", report.sections.len());
    Ok(report)
}

pub fn roles(engine: &Engine) -> Result<Report> {
    let roster = engine.roster();
    let mut report = Report::default();
    for (key, title, names) in [
        ("batsmen", "Batsmen", &roster.batsmen),
        ("bowlers", "Bowlers", &roster.bowlers),
        ("all_rounders", "All-rounders", &roster.all_rounders),
    ] {
        let mut table = Table::new(["Rank", "Player"]).titled(title);
        for (rank, name) in names.iter().enumerate() {
            table.push([(rank + 1).to_string(), name.clone()]);
        }
        report.add_table(key, table, names)?;
    }
    Ok(report)
}
