//! Creation requests: validate the question and participants before any bracket is built.

use crate::config::Limits;
use crate::models::{InvalidInput, Participant, ParticipantInput};
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// Produces a participant's response to the tournament question when the caller did not supply one.
pub trait ResponseSource: Send + Sync {
    /// None (or blank text) means the response could not be produced.
    fn respond(&self, question: &str, prompt: &str, model: Option<&str>) -> Option<String>;
}

impl<F> ResponseSource for F
where
    F: Fn(&str, &str, Option<&str>) -> Option<String> + Send + Sync,
{
    fn respond(&self, question: &str, prompt: &str, model: Option<&str>) -> Option<String> {
        self(question, prompt, model)
    }
}

/// Trimmed, non-empty question within the length limit.
pub fn validate_question(question: &str, limits: &Limits) -> Result<String, InvalidInput> {
    let question = question.trim();
    if question.is_empty() {
        return Err(InvalidInput::EmptyQuestion);
    }
    if question.chars().count() > limits.max_question_chars {
        return Err(InvalidInput::QuestionTooLong {
            max: limits.max_question_chars,
        });
    }
    Ok(question.to_string())
}

/// Turn raw inputs into indexed participants.
///
/// 1. Drop rows where every field is blank.
/// 2. Require 2..=max participants.
/// 3. Trim and check each prompt; in multi-model mode (any model given) every row needs one.
/// 4. Reject repeated (prompt, model) pairs.
/// 5. Fill missing responses from `responses`, only once everything else has passed.
///    A participant left without a response is `ResponseUnavailable`.
pub fn prepare_participants(
    question: &str,
    inputs: &[ParticipantInput],
    limits: &Limits,
    responses: Option<&dyn ResponseSource>,
) -> Result<Vec<Participant>, InvalidInput> {
    let rows: Vec<&ParticipantInput> = inputs.iter().filter(|i| !i.is_blank()).collect();
    if rows.len() < 2 {
        return Err(InvalidInput::TooFewParticipants { count: rows.len() });
    }
    if rows.len() > limits.max_participants {
        return Err(InvalidInput::TooManyParticipants {
            count: rows.len(),
            max: limits.max_participants,
        });
    }

    let multi_model = rows.iter().any(|r| non_blank(&r.model).is_some());
    let mut seen: HashSet<(String, Option<String>)> = HashSet::new();
    let mut checked = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        let prompt = row.text.trim();
        if prompt.is_empty() {
            return Err(InvalidInput::EmptyPrompt { index });
        }
        if prompt.chars().count() > limits.max_prompt_chars {
            return Err(InvalidInput::PromptTooLong {
                index,
                max: limits.max_prompt_chars,
            });
        }
        let model = non_blank(&row.model);
        match model {
            None if multi_model => return Err(InvalidInput::MissingModel { index }),
            Some(m) if !limits.model_allowed(m) => {
                return Err(InvalidInput::UnknownModel {
                    index,
                    model: m.to_string(),
                })
            }
            _ => {}
        }
        let response = match &row.response {
            Some(r) if r.trim().is_empty() => return Err(InvalidInput::EmptyResponse { index }),
            Some(r) => Some(r.trim().to_string()),
            None => None,
        };
        if !seen.insert((prompt.to_string(), model.map(String::from))) {
            return Err(InvalidInput::DuplicateParticipant { index });
        }
        checked.push((prompt.to_string(), model.map(String::from), response));
    }

    checked
        .into_iter()
        .enumerate()
        .map(|(index, (prompt, model, response))| -> Result<Participant, InvalidInput> {
            let response = match response {
                Some(r) => r,
                None => responses
                    .and_then(|source| source.respond(question, &prompt, model.as_deref()))
                    .map(|r| r.trim().to_string())
                    .filter(|r| !r.is_empty())
                    .ok_or(InvalidInput::ResponseUnavailable { index })?,
            };
            Ok(Participant {
                index,
                prompt,
                model,
                response,
            })
        })
        .collect()
}

/// Randomize seed order before creation. The bracket itself always keeps the order it is given.
pub fn shuffle_inputs(inputs: &mut [ParticipantInput]) {
    inputs.shuffle(&mut rand::thread_rng());
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
