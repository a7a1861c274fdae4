//! Chat domain module.
//!
//! # Module Structure
//!
//! - `message`: Message types (`MessageRole`, `ChatMessage`)
//! - `service`: Trait for the chat collaborator (`ChatService`)

mod message;
mod service;

// Re-export public API
pub use message::{ChatMessage, MessageRole};
pub use service::{ChatService, ChatTurn};

/// Opening assistant message of a topic conversation.
pub fn greeting(topic: &str) -> String {
    format!(
        "Hello! I'm your AI Study Assistant. Do you have any specific doubts about \"{topic}\"?"
    )
}

/// Scripted reply appended when a chat turn fails.
pub const FALLBACK_REPLY: &str = "I'm having a bit of trouble connecting to my knowledge base. Please check if the backend is running!";
