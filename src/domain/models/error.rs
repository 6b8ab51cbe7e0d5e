use thiserror::Error;

/// Failures from the remote assistant collaborator. Both kinds are recovered
/// at the panel boundary and never tear down the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("could not open a conversation with the assistant: {0}")]
    SessionCreation(String),
    #[error("the assistant stream failed: {0}")]
    Stream(String),
}

/// Reasons a prompt submission is rejected before reaching the backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("prompt is empty")]
    Empty,
    #[error("no assistant session is open yet")]
    NotConnected,
    #[error("a reply is already in flight")]
    ReplyInFlight,
}
