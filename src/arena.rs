//! In-memory arena: owns tournaments and every voter's private bracket.
//!
//! Each tournament keeps its template immutable. A voter's bracket is cloned from it on first
//! touch and guarded by its own mutex, so votes from one voter on one tournament run one at a
//! time while different voters and tournaments never wait on each other.

use crate::config::Limits;
use crate::logic::{
    aggregate, build_bracket, compute_progress, find_next_votable_match, prepare_participants,
    record_vote, round_name, validate_question, validate_vote, ResponseSource,
};
use crate::models::{
    ArenaError, Bracket, MatchCoord, ParticipantId, ParticipantInput, ParticipationStats,
    Tournament, TournamentId, TournamentResults, TournamentSummary, TournamentView, VoteOutcome,
    VoterBracket, VoterId, VoterState, VoterStatus,
};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

/// Summaries cut questions to this many characters.
const SUMMARY_QUESTION_CHARS: usize = 100;

type VoterSlot = Arc<Mutex<VoterBracket>>;

/// Per-tournament entry: tournament data, voter brackets, last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    voters: RwLock<HashMap<VoterId, VoterSlot>>,
    last_activity: Mutex<Instant>,
}

impl TournamentEntry {
    fn touch(&self) {
        *lock(&self.last_activity) = Instant::now();
    }

    fn idle_for(&self) -> Duration {
        lock(&self.last_activity).elapsed()
    }

    fn voter(&self, voter: &str) -> Option<VoterSlot> {
        read(&self.voters).get(voter).cloned()
    }

    fn voter_or_insert(&self, voter: &str) -> VoterSlot {
        if let Some(slot) = self.voter(voter) {
            return slot;
        }
        write(&self.voters)
            .entry(voter.to_string())
            .or_insert_with(|| {
                log::debug!("Voter {} joined tournament {}", voter, self.tournament.id);
                Arc::new(Mutex::new(VoterBracket::from_template(
                    &self.tournament.bracket_template,
                )))
            })
            .clone()
    }

    /// Snapshot of every voter bracket.
    fn voter_brackets(&self) -> Vec<Bracket> {
        let slots: Vec<VoterSlot> = read(&self.voters).values().cloned().collect();
        slots.iter().map(|s| lock(s).bracket.clone()).collect()
    }

    fn stats(&self) -> ParticipationStats {
        let brackets = self.voter_brackets();
        let completed = brackets.iter().filter(|b| b.is_complete()).count();
        ParticipationStats::new(brackets.len(), completed)
    }
}

/// Tournament store and orchestration of votes.
pub struct Arena {
    tournaments: RwLock<HashMap<TournamentId, Arc<TournamentEntry>>>,
    limits: Limits,
    responses: Option<Box<dyn ResponseSource>>,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(Limits::default())
    }
}

impl Arena {
    pub fn new(limits: Limits) -> Self {
        Self {
            tournaments: RwLock::new(HashMap::new()),
            limits,
            responses: None,
        }
    }

    /// Fill in missing participant responses from `source` at creation.
    pub fn with_response_source(mut self, source: impl ResponseSource + 'static) -> Self {
        self.responses = Some(Box::new(source));
        self
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Validate input, build the bracket template, store the tournament.
    /// Nothing is stored when validation fails.
    pub fn create_tournament(
        &self,
        question: &str,
        inputs: &[ParticipantInput],
    ) -> Result<Tournament, ArenaError> {
        let question = validate_question(question, &self.limits)?;
        let participants =
            prepare_participants(&question, inputs, &self.limits, self.responses.as_deref())?;
        let template = build_bracket(participants.len())?;
        let tournament = Tournament::new(question, participants, template);
        log::info!(
            "Created tournament {} with {} prompts ({} rounds)",
            tournament.id,
            tournament.participants.len(),
            tournament.bracket_template.round_count()
        );
        write(&self.tournaments).insert(
            tournament.id,
            Arc::new(TournamentEntry {
                tournament: tournament.clone(),
                voters: RwLock::new(HashMap::new()),
                last_activity: Mutex::new(Instant::now()),
            }),
        );
        Ok(tournament)
    }

    fn entry(&self, id: TournamentId) -> Result<Arc<TournamentEntry>, ArenaError> {
        let entry = read(&self.tournaments)
            .get(&id)
            .cloned()
            .ok_or(ArenaError::TournamentNotFound(id))?;
        entry.touch();
        Ok(entry)
    }

    pub fn get_tournament(&self, id: TournamentId) -> Result<Tournament, ArenaError> {
        Ok(self.entry(id)?.tournament.clone())
    }

    /// The voter's bracket, cloned from the template on first call.
    pub fn get_or_create_voter_bracket(
        &self,
        id: TournamentId,
        voter: &str,
    ) -> Result<Bracket, ArenaError> {
        let entry = self.entry(id)?;
        let slot = entry.voter_or_insert(voter);
        let bracket = lock(&slot).bracket.clone();
        Ok(bracket)
    }

    /// Read-only snapshot: the voter's bracket, or the template if they have not started.
    pub fn get_bracket_state(&self, id: TournamentId, voter: &str) -> Result<Bracket, ArenaError> {
        let entry = self.entry(id)?;
        let bracket = match entry.voter(voter) {
            Some(slot) => lock(&slot).bracket.clone(),
            None => entry.tournament.bracket_template.clone(),
        };
        Ok(bracket)
    }

    pub fn voter_status(&self, id: TournamentId, voter: &str) -> Result<VoterStatus, ArenaError> {
        let entry = self.entry(id)?;
        Ok(status_of(&entry, voter).1)
    }

    /// Tournament, the voter's bracket, and where they stand.
    pub fn get_tournament_view(
        &self,
        id: TournamentId,
        voter: &str,
    ) -> Result<TournamentView, ArenaError> {
        let entry = self.entry(id)?;
        let (bracket, status) = status_of(&entry, voter);
        let rounds = bracket.round_count();
        Ok(TournamentView {
            tournament: entry.tournament.clone(),
            round_names: (0..rounds).map(|r| round_name(r, rounds)).collect(),
            bracket,
            status,
        })
    }

    /// Record one voter's decision on their own bracket.
    ///
    /// A voter with no bracket yet gets one only if the vote is valid against the template.
    /// The voter is complete as soon as their final has a winner.
    pub fn vote(
        &self,
        id: TournamentId,
        voter: &str,
        coord: MatchCoord,
        winner: ParticipantId,
    ) -> Result<VoteOutcome, ArenaError> {
        let entry = self.entry(id)?;
        let slot = match entry.voter(voter) {
            Some(slot) => slot,
            None => {
                validate_vote(&entry.tournament.bracket_template, coord, winner)?;
                entry.voter_or_insert(voter)
            }
        };
        let mut voter_bracket = lock(&slot);
        record_vote(&mut voter_bracket.bracket, coord, winner)?;

        let champion = voter_bracket.champion();
        if let Some(champion) = champion {
            voter_bracket.completed_at = Some(Utc::now());
            log::info!(
                "Voter {} completed tournament {} (winner: prompt {})",
                voter,
                id,
                champion
            );
        }
        Ok(VoteOutcome {
            next_match: find_next_votable_match(&voter_bracket.bracket),
            completed: champion.is_some(),
            winner: champion,
            bracket: voter_bracket.bracket.clone(),
        })
    }

    /// Ranking and participation over every voter bracket, complete or not.
    pub fn get_results(&self, id: TournamentId) -> Result<TournamentResults, ArenaError> {
        let entry = self.entry(id)?;
        let brackets = entry.voter_brackets();
        Ok(aggregate(&entry.tournament.participants, &brackets))
    }

    /// All tournaments, newest first.
    pub fn list_tournaments(&self) -> Vec<TournamentSummary> {
        let entries: Vec<Arc<TournamentEntry>> = read(&self.tournaments).values().cloned().collect();
        let mut summaries: Vec<TournamentSummary> = entries
            .iter()
            .map(|e| TournamentSummary {
                id: e.tournament.id,
                question: truncate(&e.tournament.question, SUMMARY_QUESTION_CHARS),
                num_prompts: e.tournament.participants.len(),
                created_at: e.tournament.created_at,
                stats: e.stats(),
            })
            .collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        summaries
    }

    pub fn remove_tournament(&self, id: TournamentId) -> Result<(), ArenaError> {
        write(&self.tournaments)
            .remove(&id)
            .map(|_| log::info!("Removed tournament {}", id))
            .ok_or(ArenaError::TournamentNotFound(id))
    }

    /// Drop tournaments with no activity for `timeout`. Returns how many were removed.
    pub fn remove_idle(&self, timeout: Duration) -> usize {
        let mut g = write(&self.tournaments);
        let before = g.len();
        g.retain(|_, entry| entry.idle_for() < timeout);
        before - g.len()
    }

    pub fn len(&self) -> usize {
        read(&self.tournaments).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn status_of(entry: &TournamentEntry, voter: &str) -> (Bracket, VoterStatus) {
    match entry.voter(voter) {
        Some(slot) => {
            let vb = lock(&slot);
            let status = VoterStatus {
                state: vb.state(),
                completed: vb.bracket.is_complete(),
                winner: vb.champion(),
                next_match: find_next_votable_match(&vb.bracket),
                progress: compute_progress(&vb.bracket),
                started_at: Some(vb.started_at),
                completed_at: vb.completed_at,
            };
            (vb.bracket.clone(), status)
        }
        None => {
            let template = &entry.tournament.bracket_template;
            let status = VoterStatus {
                state: VoterState::NotStarted,
                completed: false,
                winner: None,
                next_match: find_next_votable_match(template),
                progress: 0,
                started_at: None,
                completed_at: None,
            };
            (template.clone(), status)
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

// Votes validate before mutating, so a poisoned lock never guards a half-applied vote.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

fn read<T>(l: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    l.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(l: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    l.write().unwrap_or_else(PoisonError::into_inner)
}
