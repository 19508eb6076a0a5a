//! Where a voter stands: next votable match, percent done, round labels.

use crate::models::{Bracket, MatchCoord};

/// First match (round by round, then by match index) with two real participants and no winner.
/// Use a voter's own bracket, never the shared template.
pub fn find_next_votable_match(bracket: &Bracket) -> Option<MatchCoord> {
    bracket
        .iter()
        .find(|(_, m)| m.is_votable())
        .map(|(coord, _)| coord)
}

/// Percent of voter decisions made, 0..=100.
///
/// Only contested matches (two real participants) count; byes and pending matches are not
/// decisions. A complete bracket is always 100 and an incomplete one never rounds up to 100.
pub fn compute_progress(bracket: &Bracket) -> u8 {
    if bracket.is_complete() {
        return 100;
    }
    let (decided, total) = bracket
        .iter()
        .filter(|(_, m)| m.is_contested())
        .fold((0usize, 0usize), |(d, t), (_, m)| (d + usize::from(m.winner.is_some()), t + 1));
    if total == 0 {
        return 0;
    }
    let percent = (100.0 * decided as f64 / total as f64).round() as u8;
    percent.min(99)
}

/// Display name for a round: "Final", "Semi-Final", "Quarter-Final", otherwise "Round N".
pub fn round_name(round: usize, total_rounds: usize) -> String {
    match total_rounds.checked_sub(round + 1) {
        Some(0) => "Final".to_string(),
        Some(1) => "Semi-Final".to_string(),
        Some(2) => "Quarter-Final".to_string(),
        _ => format!("Round {}", round + 1),
    }
}
