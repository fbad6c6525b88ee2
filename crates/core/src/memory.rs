//! Conversation memory for a coaching session.
//!
//! Memory is an ordered, append-only list of turns. The only mutation is
//! [`Memory::push`]; rendering it into prompt text is a pure function of the
//! recorded turns.

use std::fmt;

/// Who produced a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Speaker {
    Founder,
    /// A coaching persona, identified by its role name.
    Coach(&'static str),
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::Founder => write!(f, "Founder"),
            Speaker::Coach(role) => write!(f, "Agent ({})", role),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

impl Turn {
    pub fn founder(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Founder,
            text: text.into(),
        }
    }

    pub fn coach(role: &'static str, text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Coach(role),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Memory {
    turns: Vec<Turn>,
}

impl Memory {
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Renders every turn, oldest first, one `speaker: text` block per turn.
    pub fn render(&self) -> String {
        self.turns
            .iter()
            .map(|turn| format!("{}: {}", turn.speaker, turn.text))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
