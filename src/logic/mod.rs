//! Bracket engine: setup, seeding, vote advancement, progress, results.

mod advance;
mod progress;
mod results;
mod seeding;
mod setup;

pub use advance::{record_vote, validate_vote};
pub use progress::{compute_progress, find_next_votable_match, round_name};
pub use results::{aggregate, rank_participants, results_csv};
pub use seeding::build_bracket;
pub use setup::{prepare_participants, shuffle_inputs, validate_question, ResponseSource};
