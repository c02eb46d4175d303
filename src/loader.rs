//! Loading, normalising and joining the match and delivery tables.
//!
//! Both files are read in full at start-up. Team and venue names are
//! canonicalised before the join, and every delivery is joined to its parent
//! match by id. Deliveries whose match id is unknown are dropped (inner join).

use std::{
    collections::{BTreeSet, HashMap},
    path::Path,
    time::Instant,
};

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use log::{debug, info, warn};

use crate::{
    columns::{ColumnMap, DELIVERY_COLUMNS, MATCH_COLUMNS},
    config::DashboardConfig,
    data::{
        Delivery, DismissalKind, EnrichedDelivery, ExtrasType, Match, optional_float,
        optional_integer, optional_text, parse_enum, parse_flag, parse_match_date,
        required_integer, required_text,
    },
    error::LoadError,
    io_utils,
    normalize::{normalize_team_in_place, normalize_venue_in_place},
};

/// The immutable in-memory dataset shared by every query.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub matches: Vec<Match>,
    pub deliveries: Vec<Delivery>,
    pub balls: Vec<EnrichedDelivery>,
    dropped: usize,
}

impl Dataset {
    /// Normalises and joins already-parsed tables.
    pub fn from_tables(
        mut matches: Vec<Match>,
        mut deliveries: Vec<Delivery>,
    ) -> Result<Self, LoadError> {
        if matches.is_empty() {
            return Err(LoadError::EmptyTable { table: "matches" });
        }
        if deliveries.is_empty() {
            return Err(LoadError::EmptyTable { table: "deliveries" });
        }
        matches.iter_mut().for_each(normalize_match);
        deliveries.iter_mut().for_each(normalize_delivery);

        let (balls, dropped) = join(&matches, &deliveries);
        if balls.is_empty() {
            return Err(LoadError::NothingJoined);
        }
        Ok(Self {
            matches,
            deliveries,
            balls,
            dropped,
        })
    }

    /// Number of deliveries discarded by the join.
    pub fn dropped_deliveries(&self) -> usize {
        self.dropped
    }

    /// Distinct seasons, sorted.
    pub fn seasons(&self) -> Vec<String> {
        self.matches
            .iter()
            .map(|m| m.season.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct canonical team names, sorted.
    pub fn teams(&self) -> Vec<String> {
        self.matches
            .iter()
            .flat_map(|m| [m.team1.clone(), m.team2.clone()])
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn venues(&self) -> Vec<String> {
        self.matches
            .iter()
            .map(|m| m.venue.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Reads both tables named by `config` and joins them.
pub fn load(config: &DashboardConfig) -> Result<Dataset> {
    let encoding = io_utils::resolve_encoding(config.encoding.as_deref())?;
    let started = Instant::now();

    let matches = read_matches(&config.matches, encoding)
        .with_context(|| format!("Loading matches from {:?}", config.matches))?;
    let deliveries = read_deliveries(&config.deliveries, encoding)
        .with_context(|| format!("Loading deliveries from {:?}", config.deliveries))?;
    let match_rows = matches.len();
    let delivery_rows = deliveries.len();

    let dataset = Dataset::from_tables(matches, deliveries).context("Joining deliveries to matches")?;
    if dataset.dropped_deliveries() > 0 {
        warn!(
            "Dropped {} delivery row(s) referencing unknown match ids",
            dataset.dropped_deliveries()
        );
    }
    info!(
        "Loaded {} match(es) and {} delivery row(s) into {} enriched row(s) in {:?}",
        match_rows,
        delivery_rows,
        dataset.balls.len(),
        started.elapsed()
    );
    Ok(dataset)
}

pub fn read_matches(path: &Path, encoding: &'static Encoding) -> Result<Vec<Match>> {
    read_table(path, encoding, "matches", MATCH_COLUMNS, parse_match)
}

pub fn read_deliveries(path: &Path, encoding: &'static Encoding) -> Result<Vec<Delivery>> {
    read_table(path, encoding, "deliveries", DELIVERY_COLUMNS, parse_delivery)
}

fn read_table<T>(
    path: &Path,
    encoding: &'static Encoding,
    table: &'static str,
    required: &[&'static str],
    parse: fn(&ColumnMap, &[String]) -> Result<T, LoadError>,
) -> Result<Vec<T>> {
    let delimiter = io_utils::resolve_input_delimiter(path, None);
    let mut reader = io_utils::open_csv_reader_from_path(path, delimiter)?;
    let headers = io_utils::reader_headers(&mut reader, encoding)?;
    let columns = ColumnMap::new(table, &headers, required)
        .with_context(|| format!("Validating headers for {path:?}"))?;
    debug!("{} header: {:?}", columns.table(), headers);

    let mut rows = Vec::new();
    for (row_idx, record) in reader.byte_records().enumerate() {
        let record = record.with_context(|| format!("Reading row {}", row_idx + 2))?;
        let decoded = io_utils::decode_record(&record, encoding)?;
        if decoded.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let row = parse(&columns, &decoded).with_context(|| format!("Parsing row {}", row_idx + 2))?;
        rows.push(row);
    }
    if rows.is_empty() {
        return Err(LoadError::EmptyTable { table }.into());
    }
    debug!("Read {} {} row(s) from {:?}", rows.len(), table, path);
    Ok(rows)
}

pub fn parse_match(columns: &ColumnMap, record: &[String]) -> Result<Match, LoadError> {
    let cell = |name: &str| columns.get(record, name);
    Ok(Match {
        id: required_integer("id", cell("id"))?,
        season: required_text("season", cell("season"))?,
        date: parse_match_date(cell("date")),
        city: optional_text(cell("city")),
        venue: required_text("venue", cell("venue"))?,
        team1: required_text("team1", cell("team1"))?,
        team2: required_text("team2", cell("team2"))?,
        toss_winner: required_text("toss_winner", cell("toss_winner"))?,
        toss_decision: parse_enum("toss_decision", cell("toss_decision"))?,
        winner: optional_text(cell("winner")),
        result: parse_enum("result", cell("result"))?,
        result_margin: optional_float("result_margin", cell("result_margin"))?,
        target_runs: optional_integer("target_runs", cell("target_runs"))?,
        target_overs: optional_float("target_overs", cell("target_overs"))?,
        player_of_match: optional_text(cell("player_of_match")),
        match_type: optional_text(cell("match_type")),
        super_over: parse_flag("super_over", cell("super_over"))?,
        method: optional_text(cell("method")),
        umpire1: optional_text(cell("umpire1")),
        umpire2: optional_text(cell("umpire2")),
    })
}

pub fn parse_delivery(columns: &ColumnMap, record: &[String]) -> Result<Delivery, LoadError> {
    let cell = |name: &str| columns.get(record, name);
    let is_wicket = parse_flag("is_wicket", cell("is_wicket"))?;
    let player_dismissed = optional_text(cell("player_dismissed"));
    if is_wicket && player_dismissed.is_none() {
        return Err(LoadError::InvalidValue {
            column: "player_dismissed",
            value: String::new(),
            reason: "wicket recorded without a dismissed player".to_string(),
        });
    }
    let extras_type = match optional_text(cell("extras_type")) {
        Some(_) => Some(parse_enum::<ExtrasType>("extras_type", cell("extras_type"))?),
        None => None,
    };
    Ok(Delivery {
        match_id: required_integer("match_id", cell("match_id"))?,
        inning: required_integer("inning", cell("inning"))?,
        over: required_integer("over", cell("over"))?,
        ball: required_integer("ball", cell("ball"))?,
        batting_team: required_text("batting_team", cell("batting_team"))?,
        bowling_team: required_text("bowling_team", cell("bowling_team"))?,
        batter: required_text("batter", cell("batter"))?,
        bowler: optional_text(cell("bowler")),
        non_striker: optional_text(cell("non_striker")),
        batsman_runs: required_integer("batsman_runs", cell("batsman_runs"))?,
        extra_runs: optional_integer("extra_runs", cell("extra_runs"))?.unwrap_or(0),
        extras_type,
        total_runs: required_integer("total_runs", cell("total_runs"))?,
        is_wicket,
        player_dismissed,
        dismissal_kind: optional_text(cell("dismissal_kind")).map(|kind| DismissalKind::parse(&kind)),
        fielder: optional_text(cell("fielder")),
    })
}

fn normalize_match(m: &mut Match) {
    normalize_venue_in_place(&mut m.venue);
    normalize_team_in_place(&mut m.team1);
    normalize_team_in_place(&mut m.team2);
    normalize_team_in_place(&mut m.toss_winner);
    if let Some(winner) = m.winner.as_mut() {
        normalize_team_in_place(winner);
    }
}

fn normalize_delivery(d: &mut Delivery) {
    normalize_team_in_place(&mut d.batting_team);
    normalize_team_in_place(&mut d.bowling_team);
}

/// Inner join of deliveries onto matches. Returns the joined rows and the
/// count of deliveries whose match id had no parent.
pub fn join(matches: &[Match], deliveries: &[Delivery]) -> (Vec<EnrichedDelivery>, usize) {
    let by_id: HashMap<u64, &Match> = matches.iter().map(|m| (m.id, m)).collect();
    let mut dropped = 0usize;
    let mut joined = Vec::with_capacity(deliveries.len());
    for delivery in deliveries {
        match by_id.get(&delivery.match_id) {
            Some(parent) => joined.push(EnrichedDelivery::enrich(delivery.clone(), parent)),
            None => dropped += 1,
        }
    }
    (joined, dropped)
}
