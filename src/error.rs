//! Error types shared by the loader and the aggregation engine.

use thiserror::Error;

/// Result alias for aggregation queries.
pub type StatsResult<T> = std::result::Result<T, StatsError>;

/// Failures raised while reading or validating the input tables.
#[derive(Error, Debug)]
pub enum LoadError {
    /// A column the engine depends on is absent from the header row
    #[error("required column '{column}' missing from {table} table")]
    MissingColumn { table: &'static str, column: &'static str },

    /// The file parsed but produced no data rows
    #[error("{table} table contains no rows")]
    EmptyTable { table: &'static str },

    /// A cell could not be interpreted for its column
    #[error("invalid value '{value}' for column '{column}': {reason}")]
    InvalidValue {
        column: &'static str,
        value: String,
        reason: String,
    },

    /// The join discarded every delivery
    #[error("no delivery references a known match id")]
    NothingJoined,
}

/// Failures raised by aggregation queries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// The filtered slice was empty for a query that needs at least one row
    #[error("no data for this selection ({query})")]
    NoData { query: &'static str },

    /// A comparison query was invoked without the entity it compares
    #[error("a {what} selection is required")]
    MissingSelection { what: &'static str },
}

impl StatsError {
    pub fn no_data(query: &'static str) -> Self {
        StatsError::NoData { query }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, StatsError::NoData { .. })
    }
}
