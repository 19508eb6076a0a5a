//! Integration tests for next-match lookup, progress, and round names.

use prompt_arena::{
    build_bracket, compute_progress, find_next_votable_match, record_vote, round_name, Bracket,
    MatchCoord,
};

/// Vote the lower seed through every match, returning the progress seen before each vote and at the end.
fn walk(n: usize) -> (Bracket, Vec<u8>) {
    let mut b = build_bracket(n).unwrap();
    let mut seen = vec![compute_progress(&b)];
    while let Some(coord) = find_next_votable_match(&b) {
        let m = *b.get(coord).unwrap();
        assert!(m.is_votable());
        let winner = m.participant1.participant().unwrap();
        record_vote(&mut b, coord, winner).unwrap();
        assert_ne!(find_next_votable_match(&b), Some(coord));
        seen.push(compute_progress(&b));
    }
    (b, seen)
}

#[test]
fn three_participants_start_on_the_real_match() {
    let b = build_bracket(3).unwrap();
    assert_eq!(find_next_votable_match(&b), Some(MatchCoord::new(0, 0)));
}

/// Five participants always take four decisions (N - 1), however the byes fall.
#[test]
fn five_participants_count_four_decisions() {
    let b = build_bracket(5).unwrap();
    assert_eq!(compute_progress(&b), 0);
    // Byes sit at the end of the seed order, so (0,1) and (2,3) are both contested.
    let round_one = b.rounds[0].iter().filter(|m| m.is_votable()).count();
    assert_eq!(round_one, 2);

    let (done, _) = walk(5);
    assert_eq!(done.iter().filter(|(_, m)| m.is_contested()).count(), 4);
    assert_eq!(done.iter().filter(|(_, m)| m.is_decided()).count(), 4);
}

#[test]
fn four_participants_progress_steps() {
    let (_, seen) = walk(4);
    assert_eq!(seen, vec![0, 50, 67, 100]);
}

#[test]
fn progress_never_drops_and_hits_100_only_when_complete() {
    for n in 2..=24 {
        let (b, seen) = walk(n);
        assert!(b.is_complete());
        assert!(seen.windows(2).all(|w| w[0] <= w[1]), "n = {n}: {seen:?}");
        let (last, earlier) = seen.split_last().unwrap();
        assert_eq!(*last, 100);
        assert!(earlier.iter().all(|p| *p < 100), "n = {n}: {seen:?}");
    }
}

#[test]
fn complete_bracket_has_no_next_match() {
    let (b, _) = walk(7);
    assert_eq!(find_next_votable_match(&b), None);
}

#[test]
fn empty_bracket_is_zero_percent() {
    assert_eq!(compute_progress(&Bracket::default()), 0);
    assert_eq!(find_next_votable_match(&Bracket::default()), None);
}

#[test]
fn round_names_count_back_from_the_final() {
    assert_eq!(round_name(0, 1), "Final");
    assert_eq!(round_name(3, 4), "Final");
    assert_eq!(round_name(2, 4), "Semi-Final");
    assert_eq!(round_name(1, 4), "Quarter-Final");
    assert_eq!(round_name(0, 4), "Round 1");
}
