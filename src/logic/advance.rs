//! Recording votes: validate, set the winner, carry it forward through the bracket.

use crate::models::{Bracket, IllegalVote, Match, MatchCoord, ParticipantId, Slot};

/// Check a vote against the bracket without changing anything.
pub fn validate_vote(bracket: &Bracket, coord: MatchCoord, winner: ParticipantId) -> Result<(), IllegalVote> {
    if bracket.is_complete() {
        return Err(IllegalVote::BracketComplete);
    }
    let m = bracket.get(coord).ok_or(IllegalVote::OutOfRange {
        round: coord.round,
        match_index: coord.match_index,
    })?;
    let (a, b) = match (m.participant1, m.participant2) {
        (Slot::Real(a), Slot::Real(b)) => (a, b),
        _ => {
            return Err(IllegalVote::NotReady {
                round: coord.round,
                match_index: coord.match_index,
            })
        }
    };
    if m.winner.is_some() {
        return Err(IllegalVote::AlreadyDecided {
            round: coord.round,
            match_index: coord.match_index,
        });
    }
    if winner != a && winner != b {
        return Err(IllegalVote::NotAParticipant {
            winner,
            participants: (a, b),
        });
    }
    Ok(())
}

/// Record `winner` for the match at `coord`, then propagate.
///
/// The winner moves into round `r + 1`, match `m / 2`: `participant1` for even `m`,
/// `participant2` for odd. If that match now pairs a real participant with a bye it is settled
/// and its winner moves on too, until a match needs a vote or the final is reached.
/// Nothing is changed when validation fails.
pub fn record_vote(bracket: &mut Bracket, coord: MatchCoord, winner: ParticipantId) -> Result<(), IllegalVote> {
    validate_vote(bracket, coord, winner)?;
    if let Some(m) = bracket.get_mut(coord) {
        m.winner = Some(winner);
    }
    log::debug!(
        "Recorded winner {} for round {} match {}",
        winner,
        coord.round,
        coord.match_index
    );
    propagate(bracket, coord);
    Ok(())
}

fn propagate(bracket: &mut Bracket, from: MatchCoord) {
    let mut coord = from;
    while let Some(outcome) = bracket.get(coord).map(Match::outcome) {
        let next = MatchCoord::new(coord.round + 1, coord.match_index / 2);
        let Some(target) = bracket.get_mut(next) else {
            break;
        };
        let slot = if coord.match_index % 2 == 0 {
            &mut target.participant1
        } else {
            &mut target.participant2
        };
        assert_eq!(*slot, Slot::Pending, "propagating into a filled slot at {:?}", next);
        *slot = outcome;
        if !target.settle_bye() {
            break;
        }
        log::debug!("Bye settled round {} match {}", next.round, next.match_index);
        coord = next;
    }
}
