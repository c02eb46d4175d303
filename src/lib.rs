pub mod batting;
pub mod bowling;
pub mod classify;
pub mod cli;
pub mod columns;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod export;
pub mod filter;
pub mod io_utils;
pub mod loader;
pub mod metrics;
pub mod normalize;
pub mod overview;
pub mod player;
pub mod report;
pub mod series;
pub mod table;
pub mod teams;

use std::{env, io::Write, sync::OnceLock};

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{LevelFilter, debug, info};

use crate::{
    cli::{Cli, Commands, SourceArgs},
    config::DashboardConfig,
    engine::Engine,
    filter::{FilterContext, Pair, SeasonFilter},
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("cricket_stats", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = resolve_config(&cli.source)?;
    let ctx = FilterContext::with_seasons(SeasonFilter::new(cli.source.seasons.iter().cloned()));
    if !ctx.seasons.is_unrestricted() {
        debug!("Season filter: {:?}", ctx.seasons.seasons().collect::<Vec<_>>());
    }

    let dataset = loader::load(&config)?;
    let engine = Engine::new(dataset);

    let report = match &cli.command {
        Commands::Overview => report::overview(&engine, &ctx, config.top)?,
        Commands::Batting => report::batting(&engine, &ctx, config.top)?,
        Commands::Bowling => report::bowling(&engine, &ctx, config.top)?,
        Commands::Teams(args) => {
            let ctx = FilterContext {
                teams: Some(pair_from(&args.teams, "team")?),
                ..ctx
            };
            report::teams(&engine, &ctx, args.phase.into())?
        }
        Commands::Player(args) => {
            let ctx = FilterContext {
                players: Some(pair_from(&args.players, "player")?),
                ..ctx
            };
            let export_dir = args.export_dir.as_deref().or(config.export_dir.as_deref());
            report::player(&engine, &ctx, export_dir)?
        }
        Commands::Roles => report::roles(&engine)?,
    };
    info!(
        "Rendering {} section(s) as {:?}",
        report.keys().count(),
        cli.source.format
    );

    let rendered = report.render(cli.source.format)?;
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(rendered.as_bytes())
        .context("Writing report to stdout")?;
    handle.flush().context("Flushing stdout")?;
    Ok(())
}

/// Config file values with command-line overrides applied.
fn resolve_config(args: &SourceArgs) -> Result<DashboardConfig> {
    let mut config = match &args.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(matches) = &args.matches {
        config.matches = matches.clone();
    }
    if let Some(deliveries) = &args.deliveries {
        config.deliveries = deliveries.clone();
    }
    if let Some(encoding) = &args.input_encoding {
        config.encoding = Some(encoding.clone());
    }
    if let Some(top) = args.top {
        config.top = top;
    }
    config.validate()?;
    debug!("Resolved configuration: {config:?}");
    Ok(config)
}

fn pair_from(values: &[String], what: &str) -> Result<Pair> {
    if values.len() > 2 {
        bail!("at most two {what}s can be compared, got {}", values.len());
    }
    Pair::from_values(values).with_context(|| format!("a {what} name is required"))
}
