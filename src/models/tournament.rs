//! Tournament, per-voter brackets, and errors.

use crate::models::bracket::{Bracket, MatchCoord};
use crate::models::participant::{Participant, ParticipantId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Opaque voter identity supplied by the caller (session id, user id, ...).
pub type VoterId = String;

/// Why a creation request was rejected.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InvalidInput {
    EmptyQuestion,
    QuestionTooLong { max: usize },
    TooFewParticipants { count: usize },
    TooManyParticipants { count: usize, max: usize },
    EmptyPrompt { index: usize },
    PromptTooLong { index: usize, max: usize },
    /// Some participants name a model and this one does not.
    MissingModel { index: usize },
    UnknownModel { index: usize, model: String },
    EmptyResponse { index: usize },
    DuplicateParticipant { index: usize },
    /// No response was supplied and none could be produced.
    ResponseUnavailable { index: usize },
}

impl std::fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidInput::EmptyQuestion => write!(f, "Question cannot be empty"),
            InvalidInput::QuestionTooLong { max } => {
                write!(f, "Question is longer than {} characters", max)
            }
            InvalidInput::TooFewParticipants { count } => {
                write!(f, "At least 2 prompts required (got {})", count)
            }
            InvalidInput::TooManyParticipants { count, max } => {
                write!(f, "At most {} prompts allowed (got {})", max, count)
            }
            InvalidInput::EmptyPrompt { index } => write!(f, "Prompt {} is empty", index + 1),
            InvalidInput::PromptTooLong { index, max } => {
                write!(f, "Prompt {} is longer than {} characters", index + 1, max)
            }
            InvalidInput::MissingModel { index } => {
                write!(f, "Prompt {} needs a model when other prompts name one", index + 1)
            }
            InvalidInput::UnknownModel { index, model } => {
                write!(f, "Model '{}' for prompt {} is not available", model, index + 1)
            }
            InvalidInput::EmptyResponse { index } => {
                write!(f, "Response for prompt {} is empty", index + 1)
            }
            InvalidInput::DuplicateParticipant { index } => {
                write!(f, "Prompt {} duplicates an earlier prompt-model combination", index + 1)
            }
            InvalidInput::ResponseUnavailable { index } => {
                write!(f, "No response available for prompt {}", index + 1)
            }
        }
    }
}

/// Why a vote was refused. Refused votes never touch the bracket.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum IllegalVote {
    OutOfRange { round: usize, match_index: usize },
    /// One side is still pending or is a bye.
    NotReady { round: usize, match_index: usize },
    AlreadyDecided { round: usize, match_index: usize },
    NotAParticipant {
        winner: ParticipantId,
        participants: (ParticipantId, ParticipantId),
    },
    /// The voter's final is already decided.
    BracketComplete,
}

impl std::fmt::Display for IllegalVote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalVote::OutOfRange { round, match_index } => {
                write!(f, "No match {} in round {}", match_index, round)
            }
            IllegalVote::NotReady { .. } => write!(f, "This match is not ready for voting yet"),
            IllegalVote::AlreadyDecided { .. } => write!(f, "This match has already been decided"),
            IllegalVote::NotAParticipant {
                winner,
                participants: (a, b),
            } => write!(
                f,
                "Winner index {} must be one of the participants [{}, {}]",
                winner, a, b
            ),
            IllegalVote::BracketComplete => write!(f, "Bracket is already complete"),
        }
    }
}

/// Errors surfaced by the arena.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ArenaError {
    InvalidInput(InvalidInput),
    IllegalVote(IllegalVote),
    TournamentNotFound(TournamentId),
}

impl std::fmt::Display for ArenaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArenaError::InvalidInput(e) => write!(f, "Invalid input: {}", e),
            ArenaError::IllegalVote(e) => write!(f, "Illegal vote: {}", e),
            ArenaError::TournamentNotFound(id) => write!(f, "No tournament {}", id),
        }
    }
}

impl std::error::Error for InvalidInput {}
impl std::error::Error for IllegalVote {}
impl std::error::Error for ArenaError {}

impl From<InvalidInput> for ArenaError {
    fn from(e: InvalidInput) -> Self {
        ArenaError::InvalidInput(e)
    }
}

impl From<IllegalVote> for ArenaError {
    fn from(e: IllegalVote) -> Self {
        ArenaError::IllegalVote(e)
    }
}

/// A created tournament: question, participants, and the bracket every voter starts from.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub question: String,
    pub participants: Vec<Participant>,
    /// Canonical unfilled bracket; never mutated by votes.
    pub bracket_template: Bracket,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    pub fn new(question: impl Into<String>, participants: Vec<Participant>, bracket_template: Bracket) -> Self {
        Self {
            id: Uuid::new_v4(),
            question: question.into(),
            participants,
            bracket_template,
            created_at: Utc::now(),
        }
    }

    /// Prompt texts in participant order.
    pub fn prompts(&self) -> Vec<&str> {
        self.participants.iter().map(|p| p.prompt.as_str()).collect()
    }

    /// Response texts in participant order.
    pub fn responses(&self) -> Vec<&str> {
        self.participants.iter().map(|p| p.response.as_str()).collect()
    }
}

/// Where a voter is in their walk through the bracket.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoterState {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

/// One voter's private copy of the bracket.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VoterBracket {
    pub bracket: Bracket,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl VoterBracket {
    /// Fresh copy of the template.
    pub fn from_template(template: &Bracket) -> Self {
        Self {
            bracket: template.clone(),
            started_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn state(&self) -> VoterState {
        if self.bracket.is_complete() {
            VoterState::Completed
        } else {
            VoterState::InProgress
        }
    }

    pub fn champion(&self) -> Option<ParticipantId> {
        self.bracket.champion()
    }
}

/// What a voter sees next: their state, next match, and progress.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct VoterStatus {
    pub state: VoterState,
    pub completed: bool,
    pub winner: Option<ParticipantId>,
    pub next_match: Option<MatchCoord>,
    pub progress: u8,
    /// When the voter's bracket was created; None before they start.
    pub started_at: Option<DateTime<Utc>>,
    /// When the voter decided their final.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Result of an accepted vote.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VoteOutcome {
    pub bracket: Bracket,
    pub completed: bool,
    pub winner: Option<ParticipantId>,
    pub next_match: Option<MatchCoord>,
}

/// A tournament as one voter sees it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TournamentView {
    pub tournament: Tournament,
    /// The voter's bracket, or the template if they have not started.
    pub bracket: Bracket,
    /// Display name per round, first round first.
    pub round_names: Vec<String>,
    pub status: VoterStatus,
}
