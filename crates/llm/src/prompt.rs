//! Prompt construction for the remote mortgage advisor.

use std::fmt;

use serde::{Deserialize, Serialize};

/// System prompt fixing the advisor persona for every remote call.
const ADVISOR_SYSTEM_PROMPT: &str =
    "You are an expert South African mortgage advisor. Prefer concise, clear answers with SA context.";

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Build the two-message exchange for a single user question: the fixed
/// advisor persona followed by the raw question text, verbatim.
pub fn advisor_messages(question: &str) -> Vec<Message> {
    vec![
        Message::system(ADVISOR_SYSTEM_PROMPT),
        Message::user(question),
    ]
}
