//! Best score and coin totals
//!
//! Fed with simulation events as plain integer deltas. Storage is the
//! host's business; JSON helpers are provided for convenience.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::sim::GameEvent;

/// Persistent player progress
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Progress {
    pub best_score: u64,
    /// Lifetime coins collected
    pub total_coins: u64,
    pub runs_played: u32,
    pub pipes_passed: u64,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event; returns true when a new best score was set
    pub fn apply(&mut self, event: &GameEvent) -> bool {
        match *event {
            GameEvent::PipePassed { .. } => {
                self.pipes_passed += 1;
                false
            }
            GameEvent::CoinCollected { value } => {
                self.total_coins += value;
                false
            }
            GameEvent::Died { score, .. } => {
                self.runs_played += 1;
                if score > self.best_score {
                    log::info!("New best score: {} (was {})", score, self.best_score);
                    self.best_score = score;
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    /// Apply a tick's worth of events
    pub fn apply_all<'a>(&mut self, events: impl IntoIterator<Item = &'a GameEvent>) -> bool {
        events
            .into_iter()
            .fold(false, |new_best, e| self.apply(e) || new_best)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
