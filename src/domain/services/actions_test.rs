use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use test_utils::reply_fragments_fixture;
use tokio::sync::mpsc;

use super::ActionsService;
use crate::domain::models::Action;
use crate::domain::models::Backend;
use crate::domain::models::BackendPrompt;
use crate::domain::models::ChatError;
use crate::domain::models::Event;
use crate::domain::models::ReplyFragment;
use crate::domain::models::SessionHandle;

struct FakeBackend {
    fail_open: bool,
    fail_stream: bool,
}

#[async_trait]
impl Backend for FakeBackend {
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    async fn create_session(&self) -> Result<SessionHandle, ChatError> {
        if self.fail_open {
            return Err(ChatError::SessionCreation("unreachable".to_string()));
        }

        return Ok(SessionHandle {
            id: "fake-session".to_string(),
            context: "".to_string(),
        });
    }

    async fn send_and_stream<'a>(
        &self,
        prompt: BackendPrompt,
        tx: &'a mpsc::UnboundedSender<Event>,
    ) -> Result<(), ChatError> {
        if self.fail_stream {
            return Err(ChatError::Stream("connection reset".to_string()));
        }

        for chunk in reply_fragments_fixture() {
            tx.send(Event::AssistantFragment(ReplyFragment {
                text: chunk.to_string(),
                done: false,
                context: None,
            }))
            .map_err(|err| return ChatError::Stream(err.to_string()))?;
        }

        tx.send(Event::AssistantFragment(ReplyFragment {
            text: "".to_string(),
            done: true,
            context: Some(prompt.text),
        }))
        .map_err(|err| return ChatError::Stream(err.to_string()))?;

        return Ok(());
    }
}

fn start_service(fail_open: bool, fail_stream: bool) -> (
    mpsc::UnboundedSender<Action>,
    mpsc::UnboundedReceiver<Event>,
) {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    tokio::spawn(async move {
        let backend = Arc::new(FakeBackend {
            fail_open,
            fail_stream,
        });
        return ActionsService::start(backend, event_tx, &mut action_rx).await;
    });

    return (action_tx, event_rx);
}

#[tokio::test]
async fn it_opens_a_session() {
    let (action_tx, mut event_rx) = start_service(false, false);
    action_tx.send(Action::OpenSession()).unwrap();

    match event_rx.recv().await.unwrap() {
        Event::SessionOpened(handle) => {
            assert_eq!(handle.id, "fake-session");
        }
        _ => panic!("expected a session-opened event"),
    }
}

#[tokio::test]
async fn it_reports_session_failures() {
    let (action_tx, mut event_rx) = start_service(true, false);
    action_tx.send(Action::OpenSession()).unwrap();

    match event_rx.recv().await.unwrap() {
        Event::SessionFailed(err) => {
            assert_eq!(err, ChatError::SessionCreation("unreachable".to_string()));
        }
        _ => panic!("expected a session-failed event"),
    }
}

#[tokio::test]
async fn it_streams_fragments_in_order() {
    let (action_tx, mut event_rx) = start_service(false, false);
    action_tx
        .send(Action::SubmitPrompt(BackendPrompt::new(
            "Plan my day".to_string(),
            "".to_string(),
        )))
        .unwrap();

    let mut texts: Vec<String> = vec![];
    loop {
        match event_rx.recv().await.unwrap() {
            Event::AssistantFragment(fragment) => {
                if fragment.done {
                    assert_eq!(fragment.context, Some("Plan my day".to_string()));
                    break;
                }
                texts.push(fragment.text);
            }
            _ => panic!("expected reply fragments"),
        }
    }

    assert_eq!(texts, vec!["Sure", ", here", "'s a plan"]);
}

#[tokio::test]
async fn it_reports_stream_failures() {
    let (action_tx, mut event_rx) = start_service(false, true);
    action_tx
        .send(Action::SubmitPrompt(BackendPrompt::new(
            "Plan my day".to_string(),
            "".to_string(),
        )))
        .unwrap();

    match event_rx.recv().await.unwrap() {
        Event::StreamFailed(err) => {
            assert_eq!(err, ChatError::Stream("connection reset".to_string()));
        }
        _ => panic!("expected a stream-failed event"),
    }
}
