//! Integration tests for ranking, participation stats, and CSV export.

use prompt_arena::{
    aggregate, build_bracket, find_next_votable_match, rank_participants, record_vote, results_csv,
    Bracket, MatchCoord, Participant, ParticipationStats,
};

fn participants(n: usize) -> Vec<Participant> {
    (0..n)
        .map(|i| Participant {
            index: i,
            prompt: format!("Prompt {i}"),
            model: None,
            response: format!("Response {i}"),
        })
        .collect()
}

fn vote(b: &mut Bracket, round: usize, match_index: usize, winner: usize) {
    record_vote(b, MatchCoord::new(round, match_index), winner).unwrap();
}

/// Complete a bracket always picking the higher seed index.
fn completed_upsets(n: usize) -> Bracket {
    let mut b = build_bracket(n).unwrap();
    while let Some(coord) = find_next_votable_match(&b) {
        let w = b.get(coord).unwrap().participant2.participant().unwrap();
        record_vote(&mut b, coord, w).unwrap();
    }
    b
}

#[test]
fn ranking_orders_by_wins_then_index() {
    let mut b = build_bracket(4).unwrap();
    vote(&mut b, 0, 0, 0);
    vote(&mut b, 0, 1, 2);
    vote(&mut b, 1, 0, 2);

    let ranking = rank_participants(&participants(4), &[b]);
    let order: Vec<usize> = ranking.iter().map(|r| r.index).collect();
    assert_eq!(order, vec![2, 0, 1, 3]);
    assert_eq!(ranking[0].win_count, 2);
    assert_eq!(ranking[0].matches_played, 2);
    assert_eq!(ranking[0].win_percentage, 100.0);
    assert_eq!(ranking[0].championships, 1);
    assert_eq!(ranking[1].win_percentage, 50.0);
    assert_eq!(ranking[2].win_percentage, 0.0);
    assert_eq!(ranking[1].prompt, "Prompt 0");
}

#[test]
fn byes_are_not_wins() {
    let mut b = build_bracket(3).unwrap();
    vote(&mut b, 0, 0, 0);
    vote(&mut b, 1, 0, 2);

    let ranking = rank_participants(&participants(3), &[b]);
    let two = ranking.iter().find(|r| r.index == 2).unwrap();
    assert_eq!(two.win_count, 1);
    assert_eq!(two.matches_played, 1);
}

#[test]
fn win_counts_sum_to_decided_matches() {
    for n in 2..=17 {
        let b = completed_upsets(n);
        let decided = b.iter().filter(|(_, m)| m.is_decided()).count() as u32;
        let ranking = rank_participants(&participants(n), std::slice::from_ref(&b));
        let total: u32 = ranking.iter().map(|r| r.win_count).sum();
        assert_eq!(total, decided, "n = {n}");
    }
}

#[test]
fn unplayed_participants_score_zero_percent() {
    let b = build_bracket(5).unwrap();
    let ranking = rank_participants(&participants(5), &[b]);
    assert!(ranking.iter().all(|r| r.win_count == 0 && r.win_percentage == 0.0));
    let order: Vec<usize> = ranking.iter().map(|r| r.index).collect();
    assert_eq!(order, vec![0, 1, 2, 3, 4]);
}

#[test]
fn aggregate_counts_across_voters() {
    let done_a = completed_upsets(4);
    let done_b = completed_upsets(4);
    let mut partial = build_bracket(4).unwrap();
    vote(&mut partial, 0, 0, 0);

    let results = aggregate(&participants(4), &[done_a, done_b, partial]);
    assert_eq!(results.stats.total_voters, 3);
    assert_eq!(results.stats.completed_voters, 2);
    assert_eq!(results.stats.completion_rate, 66.7);

    let top = &results.ranking[0];
    assert_eq!(top.index, 3);
    assert_eq!(top.win_count, 4);
    assert_eq!(top.championships, 2);
    let zero = results.ranking.iter().find(|r| r.index == 0).unwrap();
    assert_eq!((zero.win_count, zero.matches_played), (1, 3));
    assert_eq!(zero.win_percentage, 33.33);
}

#[test]
fn stats_without_voters_are_zero() {
    assert_eq!(
        ParticipationStats::new(0, 0),
        ParticipationStats {
            total_voters: 0,
            completed_voters: 0,
            completion_rate: 0.0,
        }
    );
}

#[test]
fn csv_has_header_and_one_row_per_participant() {
    let results = aggregate(&participants(3), &[completed_upsets(3)]);
    let csv = String::from_utf8(results_csv(&results).unwrap()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "rank,index,prompt,model,win_count,matches_played,win_percentage,championships"
    );
    assert_eq!(lines.len(), 4);
    // 1 and 2 each win one decided match; the tie keeps participant order.
    assert!(lines[1].starts_with("1,1,Prompt 1,,1,"));
    assert!(lines[2].starts_with("2,2,Prompt 2,,1,"));
}
