// src/persona/selector.rs
// Clarity-mode window and per-request persona selection

use chrono::{DateTime, TimeDelta, Utc};
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::info;

use super::Persona;
use crate::config::PersonaConfig;

const NO_WINDOW: i64 = i64::MIN;

/// Persona and voice chosen for one response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaChoice {
    pub persona: Persona,
    pub voice: String,
    /// Set when clarity mode was active for this request
    pub clarity_expires_at: Option<DateTime<Utc>>,
}

impl PersonaChoice {
    pub fn system_prompt(&self) -> &'static str {
        self.persona.prompt()
    }
}

/// "Clarity mode active until T". `None` means it was never triggered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClarityWindow {
    pub expires_at: Option<DateTime<Utc>>,
}

impl ClarityWindow {
    pub fn until(expires_at: DateTime<Utc>) -> Self {
        Self {
            expires_at: Some(expires_at),
        }
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|t| now < t)
    }

    /// Pure selection step: the current window goes in, the updated window comes out.
    ///
    /// A question containing the sacred phrase (case-insensitive substring) re-arms the
    /// window to `now + clarity_duration_sec`. A later expiry already in place is kept,
    /// so re-triggering never shortens clarity mode.
    pub fn select(
        self,
        config: &PersonaConfig,
        question: &str,
        now: DateTime<Utc>,
    ) -> (PersonaChoice, ClarityWindow) {
        let mut window = self;
        let mut clarity_active = self.is_active(now);

        if phrase_invoked(config, question) {
            let renewed = clarity_deadline(now, config.clarity_duration_sec);
            window.expires_at = Some(match self.expires_at {
                Some(previous) if previous > renewed => previous,
                _ => renewed,
            });
            clarity_active = true;
        }

        let choice = if clarity_active {
            PersonaChoice {
                persona: Persona::Clear,
                voice: config.tts_voice.clone(),
                clarity_expires_at: window.expires_at,
            }
        } else {
            PersonaChoice {
                persona: Persona::Sarcastic,
                voice: config.fancy_voice.clone(),
                clarity_expires_at: None,
            }
        };

        (choice, window)
    }
}

fn phrase_invoked(config: &PersonaConfig, question: &str) -> bool {
    let phrase = config.normalized_phrase();
    // Config loading rejects empty phrases; this keeps hand-built configs honest too.
    !phrase.trim().is_empty() && question.to_lowercase().contains(&phrase)
}

fn clarity_deadline(now: DateTime<Utc>, duration_sec: u64) -> DateTime<Utc> {
    i64::try_from(duration_sec)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .and_then(|delta| now.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Process-wide holder of the clarity window.
///
/// Request handling is the only writer. Load and store are separate atomic
/// operations, so two overlapping requests can lose one update; last write wins.
///
/// The expiry is kept in epoch nanoseconds so a stored window never ends before
/// the one `select` computed. Expiries past year 2262 clamp to the largest
/// representable instant.
#[derive(Debug)]
pub struct ClarityClock {
    expires_at_ns: AtomicI64,
}

impl Default for ClarityClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClarityClock {
    pub fn new() -> Self {
        Self {
            expires_at_ns: AtomicI64::new(NO_WINDOW),
        }
    }

    pub fn load(&self) -> ClarityWindow {
        match self.expires_at_ns.load(Ordering::Acquire) {
            NO_WINDOW => ClarityWindow::default(),
            ns => ClarityWindow::until(DateTime::from_timestamp_nanos(ns)),
        }
    }

    pub fn store(&self, window: ClarityWindow) {
        let ns = window
            .expires_at
            .map(|t| t.timestamp_nanos_opt().unwrap_or(i64::MAX))
            .unwrap_or(NO_WINDOW);
        self.expires_at_ns.store(ns, Ordering::Release);
    }
}

/// Persona selection bound to the loaded config and the process clarity clock
#[derive(Debug)]
pub struct PersonaSelector {
    config: PersonaConfig,
    clock: ClarityClock,
}

impl PersonaSelector {
    pub fn new(config: PersonaConfig) -> Self {
        Self {
            config,
            clock: ClarityClock::new(),
        }
    }

    pub fn config(&self) -> &PersonaConfig {
        &self.config
    }

    pub fn window(&self) -> ClarityWindow {
        self.clock.load()
    }

    /// Choose the persona for `question` at `now` and record the updated window.
    pub fn choose(&self, question: &str, now: DateTime<Utc>) -> PersonaChoice {
        let current = self.clock.load();
        let (choice, updated) = current.select(&self.config, question, now);

        if updated != current {
            info!(
                expires_at = ?updated.expires_at,
                "Clarity mode activated by sacred phrase"
            );
            self.clock.store(updated);
        }

        choice
    }
}
