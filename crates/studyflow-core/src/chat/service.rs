//! Boundary to the external chat collaborator.

use crate::error::ChatError;
use async_trait::async_trait;

/// One chat turn: the topic in scope and the student's message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub topic: String,
    pub message: String,
}

/// Answers a single doubt about a topic.
///
/// Any failure, including a reply without text, is reported as
/// [`ChatError::ServiceUnavailable`].
#[async_trait]
pub trait ChatService: Send + Sync {
    async fn reply(&self, turn: &ChatTurn) -> Result<String, ChatError>;
}
