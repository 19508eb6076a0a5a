//! Configuration from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `8080` |
//! | `ARENA_IDLE_HOURS` | `12` (`0` keeps tournaments forever) |
//! | `ARENA_MAX_PARTICIPANTS` | `16` |
//! | `ARENA_MAX_QUESTION_CHARS` | `1000` |
//! | `ARENA_MAX_PROMPT_CHARS` | `5000` |
//! | `ARENA_MODELS` | empty (any model) |
//! | `ARENA_STATIC_DIR` | `static` |

use std::str::FromStr;
use std::time::Duration;

/// Creation-time limits applied to questions and participants.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Limits {
    pub max_participants: usize,
    pub max_question_chars: usize,
    pub max_prompt_chars: usize,
    /// Accepted model ids; empty accepts any model.
    pub allowed_models: Vec<String>,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_participants: 16,
            max_question_chars: 1000,
            max_prompt_chars: 5000,
            allowed_models: Vec::new(),
        }
    }
}

impl Limits {
    pub fn model_allowed(&self, model: &str) -> bool {
        self.allowed_models.is_empty() || self.allowed_models.iter().any(|m| m == model)
    }
}

/// Everything the web binary needs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ArenaConfig {
    pub host: String,
    pub port: u16,
    /// Tournaments idle this long are removed; None disables the sweep.
    pub idle_timeout: Option<Duration>,
    pub static_dir: String,
    pub limits: Limits,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            idle_timeout: Some(Duration::from_secs(12 * 3600)),
            static_dir: "static".to_string(),
            limits: Limits::default(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl ArenaConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(host) = lookup("HOST").filter(|h| !h.trim().is_empty()) {
            cfg.host = host.trim().to_string();
        }
        cfg.port = parse_or(&lookup, "PORT", cfg.port);
        let idle_hours: u64 = parse_or(&lookup, "ARENA_IDLE_HOURS", 12);
        cfg.idle_timeout = match idle_hours.checked_mul(3600) {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => {
                log::warn!("Ignoring ARENA_IDLE_HOURS={}, using 12", idle_hours);
                cfg.idle_timeout
            }
        };
        cfg.limits.max_participants =
            parse_or(&lookup, "ARENA_MAX_PARTICIPANTS", cfg.limits.max_participants);
        cfg.limits.max_question_chars =
            parse_or(&lookup, "ARENA_MAX_QUESTION_CHARS", cfg.limits.max_question_chars);
        cfg.limits.max_prompt_chars =
            parse_or(&lookup, "ARENA_MAX_PROMPT_CHARS", cfg.limits.max_prompt_chars);
        if let Some(models) = lookup("ARENA_MODELS") {
            cfg.limits.allowed_models = models
                .split(',')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(dir) = lookup("ARENA_STATIC_DIR").filter(|d| !d.trim().is_empty()) {
            cfg.static_dir = dir.trim().to_string();
        }
        cfg
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring {}={:?}, using {}", key, raw, default);
            default
        }),
    }
}
