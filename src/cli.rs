use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::filter::Phase;

#[derive(Debug, Parser)]
#[command(author, version, about = "Ball-by-ball cricket statistics dashboard", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub source: SourceArgs,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Season summary, win splits and run distribution
    Overview,
    /// Top scorers, team run rates and scoring extremes
    Batting,
    /// Wicket takers, economy, figures and hat-tricks
    Bowling,
    /// Compare one or two teams
    Teams(TeamsArgs),
    /// Statistics for one or two players
    Player(PlayerArgs),
    /// List the classified batsmen, bowlers and all-rounders
    Roles,
}

/// Options shared by every subcommand.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// YAML configuration file supplying defaults for the options below
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Match-level CSV file
    #[arg(long, global = true)]
    pub matches: Option<PathBuf>,
    /// Ball-by-ball CSV file
    #[arg(long, global = true)]
    pub deliveries: Option<PathBuf>,
    /// Character encoding of both input files (defaults to utf-8)
    #[arg(long = "input-encoding", global = true)]
    pub input_encoding: Option<String>,
    /// Restrict to these seasons (repeatable or comma separated)
    #[arg(long = "season", global = true, value_delimiter = ',')]
    pub seasons: Vec<String>,
    /// Number of rows in ranked tables
    #[arg(long, global = true)]
    pub top: Option<usize>,
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Args)]
pub struct TeamsArgs {
    /// Team to report on; pass twice to compare two teams
    #[arg(long = "team", required = true, num_args = 1)]
    pub teams: Vec<String>,
    /// Match phase used by the phase batting and bowling tables
    #[arg(long, value_enum, default_value = "powerplay")]
    pub phase: PhaseChoice,
}

#[derive(Debug, Args)]
pub struct PlayerArgs {
    /// Player to report on; pass twice to compare two players
    #[arg(long = "player", required = true, num_args = 1)]
    pub players: Vec<String>,
    /// Append each lookup to per-role CSV files in this directory
    #[arg(long = "export-dir")]
    pub export_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
#[value(rename_all = "kebab-case")]
pub enum PhaseChoice {
    Powerplay,
    Middle,
    Death,
}

impl From<PhaseChoice> for Phase {
    fn from(choice: PhaseChoice) -> Self {
        match choice {
            PhaseChoice::Powerplay => Phase::Powerplay,
            PhaseChoice::Middle => Phase::Middle,
            PhaseChoice::Death => Phase::Death,
        }
    }
}
