use super::BackendPrompt;

pub enum Action {
    OpenSession(),
    SubmitPrompt(BackendPrompt),
    AbortReply(),
}
