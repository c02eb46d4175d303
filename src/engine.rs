//! The loaded dataset together with the player roster derived from it.

use log::info;

use crate::{
    classify::{PlayerRole, Roster, classify},
    data::{EnrichedDelivery, Match},
    filter::SeasonFilter,
    loader::Dataset,
    player::{PlayerStats, player_stats},
};

/// Built once at start-up and only read afterwards.
#[derive(Debug, Clone)]
pub struct Engine {
    dataset: Dataset,
    roster: Roster,
}

impl Engine {
    /// Classifies every player over the full delivery table.
    pub fn new(dataset: Dataset) -> Self {
        let roster = classify(&dataset.deliveries);
        info!(
            "Roster ready: {} batsmen, {} bowlers, {} all-rounders",
            roster.batsmen.len(),
            roster.bowlers.len(),
            roster.all_rounders.len()
        );
        Self { dataset, roster }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn balls(&self) -> &[EnrichedDelivery] {
        &self.dataset.balls
    }

    pub fn matches(&self) -> &[Match] {
        &self.dataset.matches
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn role_of(&self, player: &str) -> PlayerRole {
        self.roster.role_of(player)
    }

    pub fn player_stats(&self, seasons: &SeasonFilter, player: &str) -> PlayerStats {
        player_stats(self.balls(), seasons, &self.roster, player)
    }
}
