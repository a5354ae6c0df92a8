// src/persona/mod.rs
// Persona system for the Oracle's two voices.
// Sarcastic by default; the sacred phrase buys a window of clarity.

pub mod clear;
pub mod sarcastic;
pub mod selector;

pub use clear::CLEAR_PERSONA_PROMPT;
pub use sarcastic::SARCASTIC_PERSONA_PROMPT;
pub use selector::{ClarityClock, ClarityWindow, PersonaChoice, PersonaSelector};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persona {
    Sarcastic, // Skippy - smug, funny, still helpful
    Clear,     // Plain assistant while clarity mode is active
}

impl Persona {
    /// Returns the system prompt for this persona.
    pub fn prompt(&self) -> &'static str {
        match self {
            Persona::Sarcastic => SARCASTIC_PERSONA_PROMPT,
            Persona::Clear => CLEAR_PERSONA_PROMPT,
        }
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Persona::Sarcastic => "sarcastic",
                Persona::Clear => "clear",
            }
        )
    }
}

impl std::str::FromStr for Persona {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sarcastic" => Ok(Persona::Sarcastic),
            "clear" => Ok(Persona::Clear),
            _ => Err(()),
        }
    }
}
