//! Topic-scoped doubt-solver conversation.
//!
//! The user's message is appended as soon as `send` is called. Turns then go
//! through a FIFO gate, so only one request is in flight per session and the
//! assistant replies land in the same order the questions were asked.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use studyflow_core::chat::{self, ChatMessage, ChatService, ChatTurn};
use tokio::sync::Mutex as TurnGate;

/// Monotonically increasing identifier of a chat session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(u64);

impl SessionId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// Whether a turn is currently being answered or waiting for one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    Pending,
}

/// What happened to one `send` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input, nothing appended or sent.
    Ignored,
    /// The assistant reply was appended.
    Replied(ChatMessage),
    /// The turn failed and the scripted fallback was appended.
    FellBack(ChatMessage),
    /// The session was closed before the reply could be applied.
    Discarded,
}

impl SendOutcome {
    /// The assistant message this turn appended, if any.
    pub fn reply(&self) -> Option<&ChatMessage> {
        match self {
            Self::Replied(message) | Self::FellBack(message) => Some(message),
            Self::Ignored | Self::Discarded => None,
        }
    }
}

pub struct ChatSession {
    id: SessionId,
    topic: String,
    service: Arc<dyn ChatService>,
    messages: Mutex<Vec<ChatMessage>>,
    turn_gate: TurnGate<()>,
    outstanding: AtomicUsize,
    closed: AtomicBool,
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("id", &self.id)
            .field("topic", &self.topic)
            .finish_non_exhaustive()
    }
}

impl ChatSession {
    /// Opens a conversation about `topic`, starting with the assistant's greeting.
    pub fn new(id: SessionId, topic: impl Into<String>, service: Arc<dyn ChatService>) -> Self {
        let topic = topic.into();
        let greeting = ChatMessage::assistant(chat::greeting(&topic));
        Self {
            id,
            topic,
            service,
            messages: Mutex::new(vec![greeting]),
            turn_gate: TurnGate::new(()),
            outstanding: AtomicUsize::new(0),
            closed: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Copy of the message log in append order.
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn state(&self) -> TurnState {
        if self.outstanding.load(Ordering::Acquire) > 0 {
            TurnState::Pending
        } else {
            TurnState::Idle
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Discards the session. Queued turns are not sent and late replies are dropped.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            tracing::debug!(session = self.id.value(), topic = %self.topic, "Chat session closed");
        }
    }

    /// Sends one question about the session's topic.
    ///
    /// Blank input is ignored. Otherwise the user message is appended before
    /// this future first suspends. Failures never surface as errors; the
    /// fallback reply is appended instead so the conversation can go on.
    pub async fn send(&self, text: &str) -> SendOutcome {
        if text.trim().is_empty() {
            return SendOutcome::Ignored;
        }
        if self.is_closed() {
            tracing::debug!(session = self.id.value(), "Ignoring send on closed session");
            return SendOutcome::Discarded;
        }

        self.append(ChatMessage::user(text));
        let _outstanding = OutstandingTurn::enter(&self.outstanding);

        let _turn = self.turn_gate.lock().await;
        if self.is_closed() {
            return SendOutcome::Discarded;
        }

        let turn = ChatTurn {
            topic: self.topic.clone(),
            message: text.to_string(),
        };
        let reply = self.service.reply(&turn).await;

        if self.is_closed() {
            tracing::warn!(
                session = self.id.value(),
                "Dropping chat reply for a closed session"
            );
            return SendOutcome::Discarded;
        }

        match reply {
            Ok(content) => {
                let reply = ChatMessage::assistant(content);
                self.append(reply.clone());
                SendOutcome::Replied(reply)
            }
            Err(err) => {
                tracing::warn!(session = self.id.value(), "Chat turn failed: {}", err);
                let fallback = ChatMessage::assistant(chat::FALLBACK_REPLY);
                self.append(fallback.clone());
                SendOutcome::FellBack(fallback)
            }
        }
    }

    fn append(&self, message: ChatMessage) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message);
    }
}

struct OutstandingTurn<'a>(&'a AtomicUsize);

impl<'a> OutstandingTurn<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::AcqRel);
        Self(counter)
    }
}

impl Drop for OutstandingTurn<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}
