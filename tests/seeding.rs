//! Integration tests for bracket construction: shape, seeding order, byes.

use prompt_arena::{build_bracket, Bracket, InvalidInput, Match, Slot};

fn real_real(a: usize, b: usize) -> Match {
    Match {
        participant1: Slot::Real(a),
        participant2: Slot::Real(b),
        winner: None,
    }
}

#[test]
fn rounds_halve_down_to_a_single_final() {
    for n in 2..=40usize {
        let b = build_bracket(n).unwrap();
        let slots = n.next_power_of_two();
        let expected_rounds = slots.trailing_zeros() as usize; // ceil(log2 n)
        assert_eq!(b.round_count(), expected_rounds, "n = {n}");
        assert_eq!(b.rounds[0].len(), slots / 2);
        for r in 1..b.round_count() {
            assert_eq!(b.rounds[r].len() * 2, b.rounds[r - 1].len(), "n = {n}, round {r}");
        }
        assert_eq!(b.rounds.last().unwrap().len(), 1);
    }
}

#[test]
fn two_participants_make_one_match_without_byes() {
    let b = build_bracket(2).unwrap();
    assert_eq!(b.rounds, vec![vec![real_real(0, 1)]]);
    assert!(!b.is_complete());
}

#[test]
fn three_participants_settle_the_bye_at_construction() {
    let b = build_bracket(3).unwrap();
    assert_eq!(b.round_count(), 2);
    assert_eq!(b.rounds[0][0], real_real(0, 1));
    assert_eq!(
        b.rounds[0][1],
        Match {
            participant1: Slot::Real(2),
            participant2: Slot::Bye,
            winner: Some(2),
        }
    );
    assert_eq!(b.rounds[1][0].participant1, Slot::Pending);
    assert_eq!(b.rounds[1][0].participant2, Slot::Real(2));
    assert_eq!(b.rounds[1][0].winner, None);
}

#[test]
fn five_participants_pad_to_eight_slots() {
    let b = build_bracket(5).unwrap();
    assert_eq!(b.round_count(), 3);
    let first = &b.rounds[0];
    assert_eq!(first.len(), 4);
    assert_eq!(first[0], real_real(0, 1));
    assert_eq!(first[1], real_real(2, 3));
    assert_eq!(first[2].winner, Some(4));
    assert_eq!((first[3].participant1, first[3].participant2), (Slot::Bye, Slot::Bye));
    assert_eq!(first[3].winner, None);

    // The all-bye branch carries a bye, which settles prompt 4 again in round 2.
    assert_eq!(b.rounds[1][1].participant1, Slot::Real(4));
    assert_eq!(b.rounds[1][1].participant2, Slot::Bye);
    assert_eq!(b.rounds[1][1].winner, Some(4));
    assert_eq!(b.rounds[2][0].participant1, Slot::Pending);
    assert_eq!(b.rounds[2][0].participant2, Slot::Real(4));
}

#[test]
fn seeds_keep_caller_order_and_byes_go_last() {
    let b = build_bracket(11).unwrap();
    let slots: Vec<Slot> = b.rounds[0]
        .iter()
        .flat_map(|m| [m.participant1, m.participant2])
        .collect();
    assert_eq!(slots.len(), 16);
    for (i, s) in slots.iter().enumerate() {
        if i < 11 {
            assert_eq!(*s, Slot::Real(i));
        } else {
            assert_eq!(*s, Slot::Bye);
        }
    }
}

#[test]
fn template_has_no_decided_contests() {
    for n in 2..=33 {
        let b = build_bracket(n).unwrap();
        assert!(b.iter().all(|(_, m)| !m.is_decided()), "n = {n}");
        assert!(b.iter().any(|(_, m)| m.is_votable()), "n = {n}");
    }
}

#[test]
fn later_slots_mirror_feeder_outcomes() {
    for n in 2..=20 {
        let b = build_bracket(n).unwrap();
        for r in 1..b.round_count() {
            for (m, game) in b.rounds[r].iter().enumerate() {
                assert_eq!(game.participant1, b.rounds[r - 1][2 * m].outcome());
                assert_eq!(game.participant2, b.rounds[r - 1][2 * m + 1].outcome());
            }
        }
    }
}

#[test]
fn fewer_than_two_participants_is_invalid() {
    assert_eq!(
        build_bracket(1),
        Err(InvalidInput::TooFewParticipants { count: 1 })
    );
    assert_eq!(
        build_bracket(0),
        Err(InvalidInput::TooFewParticipants { count: 0 })
    );
}

#[test]
fn bracket_json_keeps_its_shape() {
    let b = build_bracket(3).unwrap();
    let json = serde_json::to_value(&b).unwrap();
    assert_eq!(json[0][1]["participant2"], serde_json::json!("bye"));
    assert_eq!(json[1][0]["participant1"], serde_json::json!("pending"));
    assert_eq!(json[0][0]["participant1"], serde_json::json!({ "real": 0 }));
    let back: Bracket = serde_json::from_value(json).unwrap();
    assert_eq!(back, b);
}
