//! Participant (a prompt, optionally bound to a model) and the raw input it is built from.

use serde::{Deserialize, Serialize};

/// Zero-based position of a participant in its tournament.
pub type ParticipantId = usize;

/// One candidate as submitted by a caller. `response` may be left out when the arena has a
/// response source to produce it.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ParticipantInput {
    pub text: String,
    #[serde(default)]
    pub model: Option<String>,
    /// Pre-computed response to the tournament question, if the caller already has one.
    #[serde(default)]
    pub response: Option<String>,
}

impl ParticipantInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: None,
            response: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.response = Some(response.into());
        self
    }

    /// True when every field is empty or whitespace (an unused form row).
    pub fn is_blank(&self) -> bool {
        fn blank(s: &Option<String>) -> bool {
            s.as_deref().map_or(true, |v| v.trim().is_empty())
        }
        self.text.trim().is_empty() && blank(&self.model) && blank(&self.response)
    }
}

/// A validated, immutable participant.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub index: ParticipantId,
    pub prompt: String,
    pub model: Option<String>,
    /// The response voters compare.
    pub response: String,
}
