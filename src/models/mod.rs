//! Data structures for the arena: participants, brackets, tournaments, results.

mod bracket;
mod participant;
mod results;
mod tournament;

pub use bracket::{Bracket, Match, MatchCoord, Slot};
pub use participant::{Participant, ParticipantId, ParticipantInput};
pub(crate) use results::round_to;
pub use results::{ParticipationStats, RankedParticipant, TournamentResults, TournamentSummary};
pub use tournament::{
    ArenaError, IllegalVote, InvalidInput, Tournament, TournamentId, TournamentView, VoteOutcome,
    VoterBracket, VoterId, VoterState, VoterStatus,
};
