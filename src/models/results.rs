//! Ranking and participation statistics (for API / display).

use crate::models::participant::ParticipantId;
use crate::models::tournament::TournamentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the ranking.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankedParticipant {
    pub index: ParticipantId,
    pub prompt: String,
    pub model: Option<String>,
    /// Decided matches won, across all counted brackets. Byes do not count.
    pub win_count: u32,
    /// Decided matches this participant took part in.
    pub matches_played: u32,
    /// `win_count / matches_played * 100`, two decimals; 0 when nothing was played.
    pub win_percentage: f64,
    /// Completed brackets that named this participant champion.
    pub championships: u32,
}

/// Voter participation for one tournament.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticipationStats {
    pub total_voters: usize,
    pub completed_voters: usize,
    /// Percent, one decimal.
    pub completion_rate: f64,
}

impl ParticipationStats {
    pub fn new(total_voters: usize, completed_voters: usize) -> Self {
        let completion_rate = if total_voters == 0 {
            0.0
        } else {
            round_to(completed_voters as f64 / total_voters as f64 * 100.0, 1)
        };
        Self {
            total_voters,
            completed_voters,
            completion_rate,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentResults {
    pub ranking: Vec<RankedParticipant>,
    pub stats: ParticipationStats,
}

/// List-view entry for a tournament.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentSummary {
    pub id: TournamentId,
    /// Question, cut to 100 characters.
    pub question: String,
    pub num_prompts: usize,
    pub created_at: DateTime<Utc>,
    pub stats: ParticipationStats,
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
