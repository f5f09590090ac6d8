//! Winner history
//!
//! Winners are ranked in reveal order: the first drawn is #1.

use serde::{Deserialize, Serialize};

use crate::color::Hsl;
use crate::sim::ParticipantId;

/// A single revealed winner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinnerEntry {
    /// 1-indexed draw order
    pub rank: usize,
    pub participant: ParticipantId,
    pub name: String,
    pub color: Hsl,
    /// Weight the participant held when it won
    pub weight: u32,
    /// Session clock at reveal (ms)
    pub revealed_at_ms: f64,
}

/// Ranked list of winners for the current session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Winners {
    pub entries: Vec<WinnerEntry>,
}

impl Winners {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a winner and return its entry (rank assigned here)
    pub fn record(
        &mut self,
        participant: ParticipantId,
        name: &str,
        color: Hsl,
        weight: u32,
        revealed_at_ms: f64,
    ) -> &WinnerEntry {
        let rank = self.entries.len() + 1;
        self.entries.push(WinnerEntry {
            rank,
            participant,
            name: name.to_string(),
            color,
            weight,
            revealed_at_ms,
        });
        &self.entries[rank - 1]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
