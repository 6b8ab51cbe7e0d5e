use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use tokio::sync::mpsc;

use super::ChatError;
use super::Event;

/// Opaque reference to a remote conversation. `context` carries whatever the
/// backend needs to continue the conversation on the next prompt, and is only
/// ever interpreted by the backend that minted the handle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionHandle {
    pub id: String,
    pub context: String,
}

#[derive(Debug, PartialEq, Eq)]
pub struct BackendPrompt {
    pub text: String,
    pub context: String,
}

impl BackendPrompt {
    pub fn new(text: String, context: String) -> BackendPrompt {
        return BackendPrompt { text, context };
    }
}

/// One streamed chunk of an assistant reply. The terminal chunk has `done`
/// set and carries the updated conversation context in place of text.
pub struct ReplyFragment {
    pub text: String,
    pub done: bool,
    pub context: Option<String>,
}

#[async_trait]
pub trait Backend {
    /// Used at startup to verify all configurations are available to work
    /// with the backend.
    async fn health_check(&self) -> Result<()>;

    /// Opens a new remote conversation. Callers reuse the returned handle for
    /// the lifetime of the chat panel.
    async fn create_session(&self) -> Result<SessionHandle, ChatError>;

    /// Requests a streamed reply for a prompt. Each fragment is passed
    /// through the channel in arrival order, followed by a final fragment
    /// with `done` set and the updated conversation context attached.
    async fn send_and_stream<'a>(
        &self,
        prompt: BackendPrompt,
        tx: &'a mpsc::UnboundedSender<Event>,
    ) -> Result<(), ChatError>;
}

pub type BackendArc = Arc<dyn Backend + Send + Sync>;
