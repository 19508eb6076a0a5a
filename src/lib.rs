//! Prompt arena: single-elimination brackets over candidate prompts, voted on per voter.

pub mod arena;
pub mod config;
pub mod logic;
pub mod models;

pub use arena::Arena;
pub use config::{ArenaConfig, Limits};
pub use logic::{
    aggregate, build_bracket, compute_progress, find_next_votable_match, prepare_participants,
    rank_participants, record_vote, results_csv, round_name, shuffle_inputs, validate_question,
    validate_vote, ResponseSource,
};
pub use models::{
    ArenaError, Bracket, IllegalVote, InvalidInput, Match, MatchCoord, Participant, ParticipantId,
    ParticipantInput, ParticipationStats, RankedParticipant, Slot, Tournament, TournamentId,
    TournamentResults, TournamentSummary, TournamentView, VoteOutcome, VoterBracket, VoterId,
    VoterState, VoterStatus,
};
