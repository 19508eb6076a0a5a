//! Bracket shape: slots, matches, rounds.

use crate::models::participant::ParticipantId;
use serde::{Deserialize, Serialize};

/// What occupies one side of a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    /// A participant by index.
    Real(ParticipantId),
    /// Intentionally empty; the other side advances without a vote.
    Bye,
    /// Waiting on the winner of an earlier-round match.
    Pending,
}

impl Slot {
    pub fn participant(self) -> Option<ParticipantId> {
        match self {
            Slot::Real(p) => Some(p),
            Slot::Bye | Slot::Pending => None,
        }
    }

    pub fn is_real(self) -> bool {
        matches!(self, Slot::Real(_))
    }
}

/// Coordinates of a match: round index, then match index within the round.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct MatchCoord {
    pub round: usize,
    #[serde(rename = "match")]
    pub match_index: usize,
}

impl MatchCoord {
    pub fn new(round: usize, match_index: usize) -> Self {
        Self { round, match_index }
    }
}

/// A single pairing.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub participant1: Slot,
    pub participant2: Slot,
    /// None until decided by a vote or settled by a bye.
    pub winner: Option<ParticipantId>,
}

impl Match {
    /// New match; a real participant facing a bye is settled immediately.
    pub fn new(participant1: Slot, participant2: Slot) -> Self {
        let mut m = Self {
            participant1,
            participant2,
            winner: None,
        };
        m.settle_bye();
        m
    }

    /// Both sides are real participants, i.e. the match needs (or needed) a voter decision.
    pub fn is_contested(&self) -> bool {
        self.participant1.is_real() && self.participant2.is_real()
    }

    /// Contested and not yet decided.
    pub fn is_votable(&self) -> bool {
        self.is_contested() && self.winner.is_none()
    }

    /// Contested and decided.
    pub fn is_decided(&self) -> bool {
        self.is_contested() && self.winner.is_some()
    }

    /// Whether `participant` occupies either side.
    pub fn involves(&self, participant: ParticipantId) -> bool {
        self.participant1 == Slot::Real(participant) || self.participant2 == Slot::Real(participant)
    }

    /// What this match feeds into the next round.
    pub fn outcome(&self) -> Slot {
        match (self.winner, self.participant1, self.participant2) {
            (Some(w), _, _) => Slot::Real(w),
            (None, Slot::Bye, Slot::Bye) => Slot::Bye,
            _ => Slot::Pending,
        }
    }

    /// Settle a real-vs-bye pairing. Returns true if the winner was set by this call.
    pub fn settle_bye(&mut self) -> bool {
        if self.winner.is_some() {
            return false;
        }
        let winner = match (self.participant1, self.participant2) {
            (Slot::Real(p), Slot::Bye) | (Slot::Bye, Slot::Real(p)) => p,
            _ => return false,
        };
        self.winner = Some(winner);
        true
    }
}

/// Rounds of matches, first round widest, last round a single final.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bracket {
    pub rounds: Vec<Vec<Match>>,
}

impl Bracket {
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    pub fn get(&self, coord: MatchCoord) -> Option<&Match> {
        self.rounds.get(coord.round)?.get(coord.match_index)
    }

    pub fn get_mut(&mut self, coord: MatchCoord) -> Option<&mut Match> {
        self.rounds.get_mut(coord.round)?.get_mut(coord.match_index)
    }

    pub fn final_match(&self) -> Option<&Match> {
        self.rounds.last().and_then(|r| r.first())
    }

    /// Complete exactly when the final has a winner.
    pub fn is_complete(&self) -> bool {
        self.final_match().is_some_and(|m| m.winner.is_some())
    }

    /// Winner of the final, once decided.
    pub fn champion(&self) -> Option<ParticipantId> {
        self.final_match().and_then(|m| m.winner)
    }

    /// All matches with their coordinates, round by round.
    pub fn iter(&self) -> impl Iterator<Item = (MatchCoord, &Match)> + '_ {
        self.rounds.iter().enumerate().flat_map(|(r, round)| {
            round
                .iter()
                .enumerate()
                .map(move |(m, game)| (MatchCoord::new(r, m), game))
        })
    }
}
