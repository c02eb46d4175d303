//! Opt-in CSV export of player lookups.
//!
//! Each lookup appends one row to a per-role file inside the export
//! directory. A header row is written only when the file is new.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};

use crate::{
    io_utils::open_append_writer,
    metrics::round2,
    player::{BattingProfile, BowlingProfile, PlayerStats},
};

pub const BATTER_FILE: &str = "batter_stats.csv";
pub const BOWLER_FILE: &str = "bowler_stats.csv";
pub const ALL_ROUNDER_FILE: &str = "allrounder_stats.csv";

type Column = (String, String);

fn column(name: &str, value: impl ToString) -> Column {
    (name.to_string(), value.to_string())
}

fn optional(value: Option<impl ToString>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn batting_columns(p: &BattingProfile) -> Vec<Column> {
    vec![
        column("total_matches", p.matches),
        column("total_innings", p.innings),
        column("total_runs", p.runs),
        column("balls_faced", p.balls_faced),
        column("batting_strike_rate", round2(p.strike_rate)),
        column("dismissals", p.dismissals),
        column("batting_average", round2(p.average)),
        column("total_fours", p.fours),
        column("total_sixes", p.sixes),
        column("fifties", p.fifties),
        column("hundreds", p.hundreds),
        column("best_score", p.best_score),
        column("dismissal_type_often", optional(p.most_common_dismissal.as_ref())),
        column("player_of_the_match", p.player_of_match),
    ]
}

fn bowling_columns(p: &BowlingProfile) -> Vec<Column> {
    vec![
        column("total_matches", p.matches),
        column("total_innings", p.innings),
        column("total_wickets", p.wickets),
        column("runs_conceded", p.runs_conceded),
        column("balls_bowled", p.legal_balls),
        column("total_overs", round2(p.overs)),
        column("bowling_average", round2(p.average)),
        column("economy_rate", round2(p.economy)),
        column("bowling_strike_rate", round2(p.strike_rate)),
        column("best_bowling_figures", optional(p.best_figures.as_ref())),
        column("four_wicket_hauls", p.four_wicket_hauls),
        column("five_wicket_hauls", p.five_wicket_hauls),
        column("dismissal_type_often", optional(p.most_common_dismissal.as_ref())),
        column("maiden_overs", p.maiden_overs),
    ]
}

fn prefixed(prefix: &str, columns: Vec<Column>) -> Vec<Column> {
    columns
        .into_iter()
        .map(|(name, value)| (format!("{prefix}_{name}"), value))
        .collect()
}

/// Target file name and columns for a lookup, or `None` for players
/// without statistics.
pub fn export_row(stats: &PlayerStats) -> Option<(&'static str, Vec<Column>)> {
    let (file, mut columns) = match stats {
        PlayerStats::Batsman(p) => (BATTER_FILE, batting_columns(p)),
        PlayerStats::Bowler(p) => (BOWLER_FILE, bowling_columns(p)),
        PlayerStats::AllRounder { batting, bowling } => {
            let mut columns = prefixed("batting", batting_columns(batting));
            columns.extend(prefixed("bowling", bowling_columns(bowling)));
            (ALL_ROUNDER_FILE, columns)
        }
        PlayerStats::Unclassified { .. } => return None,
    };
    columns.insert(0, column("player", stats.player()));
    Some((file, columns))
}

/// Appends `stats` to its role file under `dir`. Returns the file written,
/// or `None` when the player is unclassified.
pub fn append_player_stats(dir: &Path, stats: &PlayerStats) -> Result<Option<PathBuf>> {
    let Some((file, columns)) = export_row(stats) else {
        debug!("Skipping export for unclassified player '{}'", stats.player());
        return Ok(None);
    };
    std::fs::create_dir_all(dir).with_context(|| format!("Creating export directory {dir:?}"))?;
    let path = dir.join(file);
    let (mut writer, fresh) = open_append_writer(&path)?;
    if fresh {
        writer
            .write_record(columns.iter().map(|(name, _)| name.as_str()))
            .with_context(|| format!("Writing header to {path:?}"))?;
    }
    writer
        .write_record(columns.iter().map(|(_, value)| value.as_str()))
        .with_context(|| format!("Writing row to {path:?}"))?;
    writer.flush().with_context(|| format!("Flushing {path:?}"))?;
    info!("Appended statistics for '{}' to {:?}", stats.player(), path);
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unclassified_players_have_no_export_row() {
        let stats = PlayerStats::Unclassified {
            player: "Nobody".to_string(),
        };
        assert!(export_row(&stats).is_none());
    }
}
