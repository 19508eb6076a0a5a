//! Bracket construction: seed participants in order, pad with byes, wire rounds by halving.

use crate::models::{Bracket, InvalidInput, Match, Slot};

/// Build a single-elimination bracket for `participant_count` participants (at least 2).
///
/// The first round has `P / 2` matches where `P` is the next power of two `>= participant_count`.
/// Participant `i` takes slot `i`; slots `participant_count..P` are byes, so byes gather at the
/// end. Real-vs-bye matches are settled here. Each later round pairs the outcomes of matches
/// `2m` and `2m + 1` of the round before; all-bye branches carry a bye forward.
pub fn build_bracket(participant_count: usize) -> Result<Bracket, InvalidInput> {
    if participant_count < 2 {
        return Err(InvalidInput::TooFewParticipants {
            count: participant_count,
        });
    }
    let slot_count = participant_count.next_power_of_two();
    let seeds: Vec<Slot> = (0..slot_count)
        .map(|i| if i < participant_count { Slot::Real(i) } else { Slot::Bye })
        .collect();

    let mut rounds = Vec::new();
    let mut current: Vec<Match> = seeds
        .chunks_exact(2)
        .map(|pair| Match::new(pair[0], pair[1]))
        .collect();
    loop {
        let next: Option<Vec<Match>> = (current.len() > 1).then(|| {
            current
                .chunks_exact(2)
                .map(|pair| Match::new(pair[0].outcome(), pair[1].outcome()))
                .collect()
        });
        rounds.push(current);
        match next {
            Some(round) => current = round,
            None => break,
        }
    }

    log::debug!(
        "Built bracket: {} participants, {} slots, {} rounds",
        participant_count,
        slot_count,
        rounds.len()
    );
    Ok(Bracket { rounds })
}
