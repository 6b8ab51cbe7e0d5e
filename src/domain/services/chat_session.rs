#[cfg(test)]
#[path = "chat_session_test.rs"]
mod tests;
use crate::domain::models::Author;
use crate::domain::models::BackendPrompt;
use crate::domain::models::ChatError;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::ReplyFragment;
use crate::domain::models::SessionHandle;
use crate::domain::models::SubmitError;

const WELCOME_TEXT: &str = "Hi! I'm your FocusFlow assistant. I can help you plan your schedule, break down tasks, or answer complex questions using my deep reasoning capabilities. How can I help?";

const STREAM_ERROR_TEXT: &str = "I'm sorry, I encountered an error. Please try again later.";

/// The conversation owned by the chat panel: an insertion-ordered message
/// log, a lazily-opened handle to the remote conversation, and at most one
/// pending reply at a time.
pub struct ChatSession {
    pub messages: Vec<Message>,
    handle: Option<SessionHandle>,
    pending_id: Option<String>,
    opening: bool,
}

impl Default for ChatSession {
    fn default() -> ChatSession {
        return ChatSession {
            messages: vec![Message::new(Author::Assistant, WELCOME_TEXT)],
            handle: None,
            pending_id: None,
            opening: false,
        };
    }
}

impl ChatSession {
    pub fn handle(&self) -> Option<&SessionHandle> {
        return self.handle.as_ref();
    }

    pub fn is_open(&self) -> bool {
        return self.handle.is_some();
    }

    /// A reply placeholder is live and still owns the stream.
    pub fn is_waiting(&self) -> bool {
        return self.pending_id.is_some();
    }

    /// Reports whether an open request should be dispatched. Repeated calls
    /// while a request is in flight, or once a handle exists, return false,
    /// which makes panel activation safe to repeat.
    pub fn ensure_open(&mut self) -> bool {
        if self.handle.is_some() || self.opening {
            return false;
        }

        self.opening = true;
        return true;
    }

    /// A second handle for an already-open session is discarded so callers
    /// always observe the handle they were first given.
    pub fn attach_handle(&mut self, handle: SessionHandle) {
        self.opening = false;
        if self.handle.is_none() {
            self.handle = Some(handle);
        }
    }

    pub fn fail_open(&mut self, err: &ChatError) {
        self.opening = false;
        self.messages.push(Message::new_with_type(
            Author::FocusFlow,
            MessageType::Error,
            &format!("{err}\n\nSubmit your message again to retry."),
        ));
    }

    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Appends the user message and the reply placeholder, and returns the
    /// prompt to hand to the backend. Blank input, a missing session, and a
    /// reply already in flight are all rejected before anything is appended.
    pub fn submit(&mut self, text: &str) -> Result<BackendPrompt, SubmitError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SubmitError::Empty);
        }
        if self.pending_id.is_some() {
            return Err(SubmitError::ReplyInFlight);
        }
        let Some(handle) = self.handle.as_ref() else {
            return Err(SubmitError::NotConnected);
        };

        let prompt = BackendPrompt::new(trimmed.to_string(), handle.context.clone());

        self.messages.push(Message::new(Author::User, trimmed));

        let placeholder = Message::new_pending(Author::Assistant);
        self.pending_id = Some(placeholder.id().to_string());
        self.messages.push(placeholder);

        return Ok(prompt);
    }

    /// Merges one arriving fragment into the reply placeholder. Fragments are
    /// applied in arrival order; the terminal fragment settles the
    /// placeholder and stores the updated conversation context on the handle.
    pub fn apply_fragment(&mut self, fragment: ReplyFragment) {
        let Some(placeholder) = self.pending_message_mut() else {
            tracing::warn!("received a reply fragment with no pending placeholder");
            return;
        };

        if !fragment.text.is_empty() {
            placeholder.append(&fragment.text);
        }

        if fragment.done {
            placeholder.resolve();
            self.pending_id = None;
            if let Some(context) = fragment.context {
                if let Some(handle) = self.handle.as_mut() {
                    handle.context = context;
                }
            }
        }
    }

    /// The stream died mid-reply. Whatever fragments already arrived stay on
    /// the placeholder, and a fixed error notice follows it. The user message
    /// is never rolled back.
    pub fn fail_stream(&mut self) {
        if let Some(placeholder) = self.pending_message_mut() {
            placeholder.resolve();
        }
        self.pending_id = None;

        self.messages.push(Message::new_with_type(
            Author::FocusFlow,
            MessageType::Error,
            STREAM_ERROR_TEXT,
        ));
    }

    /// User-initiated interrupt: the partial reply is kept as an ordinary
    /// message and no error notice is appended.
    pub fn abort_reply(&mut self) {
        if let Some(placeholder) = self.pending_message_mut() {
            placeholder.resolve();
        }
        self.pending_id = None;
    }

    pub fn last_user_text(&self) -> Option<String> {
        return self
            .messages
            .iter()
            .rev()
            .find(|message| return message.author == Author::User)
            .map(|message| return message.text.to_string());
    }

    fn pending_message_mut(&mut self) -> Option<&mut Message> {
        let id = self.pending_id.clone()?;
        return self
            .messages
            .iter_mut()
            .find(|message| return message.id() == id);
    }
}
