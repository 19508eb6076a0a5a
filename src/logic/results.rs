//! Results: tally decided matches across voter brackets into a ranking.

use crate::models::{
    round_to, Bracket, Participant, ParticipationStats, RankedParticipant, Slot, TournamentResults,
};
use serde::Serialize;

/// Rank participants by decided matches won across `brackets`.
///
/// Only contested matches count, so byes add neither wins nor matches played.
/// `win_percentage` is wins over matches played. Sorted by `win_count` descending;
/// ties keep participant order.
pub fn rank_participants(participants: &[Participant], brackets: &[Bracket]) -> Vec<RankedParticipant> {
    let n = participants.len();
    let mut wins = vec![0u32; n];
    let mut played = vec![0u32; n];
    let mut championships = vec![0u32; n];

    for bracket in brackets {
        for (_, m) in bracket.iter().filter(|(_, m)| m.is_decided()) {
            if let Some(count) = m.winner.and_then(|w| wins.get_mut(w)) {
                *count += 1;
            }
            for p in [m.participant1, m.participant2].into_iter().filter_map(Slot::participant) {
                if let Some(count) = played.get_mut(p) {
                    *count += 1;
                }
            }
        }
        if let Some(count) = bracket.champion().and_then(|c| championships.get_mut(c)) {
            *count += 1;
        }
    }

    let mut ranking: Vec<RankedParticipant> = participants
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let win_percentage = if played[i] == 0 {
                0.0
            } else {
                round_to(f64::from(wins[i]) / f64::from(played[i]) * 100.0, 2)
            };
            RankedParticipant {
                index: i,
                prompt: p.prompt.clone(),
                model: p.model.clone(),
                win_count: wins[i],
                matches_played: played[i],
                win_percentage,
                championships: championships[i],
            }
        })
        .collect();
    ranking.sort_by(|a, b| b.win_count.cmp(&a.win_count));
    ranking
}

/// Ranking plus participation stats over every voter bracket.
pub fn aggregate(participants: &[Participant], brackets: &[Bracket]) -> TournamentResults {
    let completed = brackets.iter().filter(|b| b.is_complete()).count();
    TournamentResults {
        ranking: rank_participants(participants, brackets),
        stats: ParticipationStats::new(brackets.len(), completed),
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    rank: usize,
    index: usize,
    prompt: &'a str,
    model: Option<&'a str>,
    win_count: u32,
    matches_played: u32,
    win_percentage: f64,
    championships: u32,
}

/// Ranking as CSV with a header row.
pub fn results_csv(results: &TournamentResults) -> Result<Vec<u8>, csv::Error> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for (i, r) in results.ranking.iter().enumerate() {
        wtr.serialize(CsvRow {
            rank: i + 1,
            index: r.index,
            prompt: &r.prompt,
            model: r.model.as_deref(),
            win_count: r.win_count,
            matches_played: r.matches_played,
            win_percentage: r.win_percentage,
            championships: r.championships,
        })?;
    }
    wtr.into_inner().map_err(|e| e.into_error().into())
}
