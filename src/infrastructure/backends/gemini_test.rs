use anyhow::bail;
use anyhow::Result;
use test_utils::gemini_stream_body_fixture;
use tokio::sync::mpsc;

use super::Content;
use super::ContentParts;
use super::Gemini;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Backend;
use crate::domain::models::BackendPrompt;
use crate::domain::models::ChatError;
use crate::domain::models::Event;
use crate::domain::models::ReplyFragment;

impl Gemini {
    fn with_url(url: String) -> Gemini {
        return Gemini {
            url,
            token: "abc".to_string(),
            timeout: "200".to_string(),
        };
    }
}

fn to_fragment(event: Option<Event>) -> Result<ReplyFragment> {
    let fragment = match event.unwrap() {
        Event::AssistantFragment(fragment) => fragment,
        _ => bail!("Wrong type from recv"),
    };

    return Ok(fragment);
}

#[tokio::test]
async fn it_successfully_health_checks() {
    Config::set(ConfigKey::Model, "model-1");
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v1beta/model-1?key=abc")
        .with_status(200)
        .create();

    let backend = Gemini::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_ok());
    mock.assert();
}

#[tokio::test]
async fn it_fails_health_checks() {
    Config::set(ConfigKey::Model, "model-1");
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v1beta/model-1?key=abc")
        .with_status(500)
        .create();

    let backend = Gemini::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_err());
    mock.assert();
}

#[tokio::test]
async fn it_creates_a_session() -> Result<()> {
    Config::set(ConfigKey::Model, "model-1");
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v1beta/model-1?key=abc")
        .with_status(200)
        .create();

    let backend = Gemini::with_url(server.url());
    let handle = backend.create_session().await?;
    mock.assert();

    assert!(!handle.id.is_empty());
    assert_eq!(handle.context, "");

    return Ok(());
}

#[tokio::test]
async fn it_fails_session_creation_when_unreachable() {
    Config::set(ConfigKey::Model, "model-1");
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v1beta/model-1?key=abc")
        .with_status(503)
        .create();

    let backend = Gemini::with_url(server.url());
    let res = backend.create_session().await;
    mock.assert();

    match res {
        Err(ChatError::SessionCreation(_)) => {}
        _ => panic!("expected a session-creation error"),
    }
}

#[tokio::test]
async fn it_fails_session_creation_without_a_token() {
    let backend = Gemini {
        url: "http://localhost:0".to_string(),
        token: "".to_string(),
        timeout: "200".to_string(),
    };

    match backend.create_session().await {
        Err(ChatError::SessionCreation(reason)) => {
            assert!(reason.contains("token"));
        }
        _ => panic!("expected a session-creation error"),
    }
}

#[tokio::test]
async fn it_streams_completions() -> Result<()> {
    Config::set(ConfigKey::Model, "model-1");
    let prompt = BackendPrompt::new(
        "Plan my day".to_string(),
        serde_json::to_string(&vec![Content {
            role: "model".to_string(),
            parts: vec![ContentParts::Text("Hello".to_string())],
        }])?,
    );

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1beta/model-1:streamGenerateContent?key=abc")
        .with_status(200)
        .with_body(gemini_stream_body_fixture())
        .create();

    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();

    let backend = Gemini::with_url(server.url());
    backend.send_and_stream(prompt, &tx).await.unwrap();

    mock.assert();

    let first_recv = to_fragment(rx.recv().await)?;
    let second_recv = to_fragment(rx.recv().await)?;
    let third_recv = to_fragment(rx.recv().await)?;
    let done_recv = to_fragment(rx.recv().await)?;

    assert_eq!(first_recv.text, "Sure".to_string());
    assert!(!first_recv.done);
    assert_eq!(first_recv.context, None);

    assert_eq!(second_recv.text, ", here".to_string());
    assert!(!second_recv.done);

    assert_eq!(third_recv.text, "'s a plan".to_string());
    assert!(!third_recv.done);

    assert_eq!(done_recv.text, "".to_string());
    assert!(done_recv.done);

    let expected_context = serde_json::to_string(&vec![
        Content {
            role: "model".to_string(),
            parts: vec![ContentParts::Text("Hello".to_string())],
        },
        Content {
            role: "user".to_string(),
            parts: vec![ContentParts::Text("Plan my day".to_string())],
        },
        Content {
            role: "model".to_string(),
            parts: vec![ContentParts::Text("Sure, here's a plan".to_string())],
        },
    ])?;
    assert_eq!(done_recv.context, Some(expected_context));

    return Ok(());
}

#[tokio::test]
async fn it_fails_streaming_on_server_errors() {
    Config::set(ConfigKey::Model, "model-1");
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1beta/model-1:streamGenerateContent?key=abc")
        .with_status(429)
        .create();

    let (tx, _rx) = mpsc::unbounded_channel::<Event>();

    let backend = Gemini::with_url(server.url());
    let res = backend
        .send_and_stream(BackendPrompt::new("Plan my day".to_string(), "".to_string()), &tx)
        .await;
    mock.assert();

    match res {
        Err(ChatError::Stream(reason)) => {
            assert!(reason.contains("429"));
        }
        _ => panic!("expected a stream error"),
    }
}
