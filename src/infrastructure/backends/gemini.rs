#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;
use tokio_util::io::StreamReader;
use uuid::Uuid;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Backend;
use crate::domain::models::BackendPrompt;
use crate::domain::models::ChatError;
use crate::domain::models::Event;
use crate::domain::models::ReplyFragment;
use crate::domain::models::SessionHandle;

const PERSONA: &str = "You are the FocusFlow assistant, a productivity coach inside a dashboard for tasks, time tracking, and focus sessions. Help the user plan schedules, break work into tasks, and answer questions concisely. Return results in markdown.";

fn convert_err(err: reqwest::Error) -> std::io::Error {
    let err_msg = err.to_string();
    return std::io::Error::new(std::io::ErrorKind::Interrupted, err_msg);
}

fn create_session_id() -> String {
    return Uuid::new_v4()
        .to_string()
        .split('-')
        .enumerate()
        .filter_map(|(idx, str)| {
            if idx > 1 {
                return None;
            }
            return Some(str);
        })
        .collect::<Vec<&str>>()
        .join("-");
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContentPartsBlob {
    mime_type: String,
    data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
enum ContentParts {
    Text(String),
    InlineData(ContentPartsBlob),
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Content {
    role: String,
    parts: Vec<ContentParts>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompletionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    text: String,
}

pub struct Gemini {
    url: String,
    token: String,
    timeout: String,
}

impl Default for Gemini {
    fn default() -> Gemini {
        return Gemini {
            url: Config::get(ConfigKey::GeminiURL),
            token: Config::get(ConfigKey::GeminiToken),
            timeout: Config::get(ConfigKey::BackendHealthCheckTimeout),
        };
    }
}

impl Gemini {
    async fn verify_reachable(&self) -> Result<(), ChatError> {
        if self.url.is_empty() {
            return Err(ChatError::SessionCreation(
                "Gemini URL is not defined".to_string(),
            ));
        }
        if self.token.is_empty() {
            return Err(ChatError::SessionCreation(
                "Gemini token is not defined".to_string(),
            ));
        }

        let url = format!(
            "{url}/v1beta/{model}?key={key}",
            url = self.url,
            model = Config::get(ConfigKey::Model),
            key = self.token
        );

        let timeout = self
            .timeout
            .parse::<u64>()
            .map_err(|err| return ChatError::SessionCreation(err.to_string()))?;

        let res = reqwest::Client::new()
            .get(&url)
            .timeout(Duration::from_millis(timeout))
            .send()
            .await
            .map_err(|err| return ChatError::SessionCreation(err.to_string()))?;

        let status = res.status().as_u16();
        if status >= 400 {
            tracing::error!(status = status, "Gemini session check failed");
            return Err(ChatError::SessionCreation(format!(
                "Gemini returned status {status}"
            )));
        }

        return Ok(());
    }
}

#[async_trait]
impl Backend for Gemini {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Gemini URL is not defined");
        }
        if self.token.is_empty() {
            bail!("Gemini token is not defined");
        }

        let url = format!(
            "{url}/v1beta/{model}?key={key}",
            url = self.url,
            model = Config::get(ConfigKey::Model),
            key = self.token
        );

        let res = reqwest::Client::new()
            .get(&url)
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        if res.is_err() {
            tracing::error!(error = ?res.unwrap_err(), "Gemini is not reachable");
            bail!("Gemini is not reachable");
        }

        let status = res.unwrap().status().as_u16();
        if status >= 400 {
            tracing::error!(status = status, "Gemini health check failed");
            bail!("Gemini health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn create_session(&self) -> Result<SessionHandle, ChatError> {
        self.verify_reachable().await?;

        let handle = SessionHandle {
            id: create_session_id(),
            context: "".to_string(),
        };

        tracing::debug!(session_id = handle.id, "created Gemini session");
        return Ok(handle);
    }

    #[allow(clippy::implicit_return)]
    async fn send_and_stream<'a>(
        &self,
        prompt: BackendPrompt,
        tx: &'a mpsc::UnboundedSender<Event>,
    ) -> Result<(), ChatError> {
        let mut contents: Vec<Content> = vec![];
        if !prompt.context.is_empty() {
            contents = serde_json::from_str(&prompt.context)
                .map_err(|err| return ChatError::Stream(err.to_string()))?;
        }
        contents.push(Content {
            role: "user".to_string(),
            parts: vec![ContentParts::Text(prompt.text)],
        });

        let req = CompletionRequest {
            system_instruction: Some(Content {
                role: "system".to_string(),
                parts: vec![ContentParts::Text(PERSONA.to_string())],
            }),
            contents: contents.clone(),
        };

        let res = reqwest::Client::new()
            .post(format!(
                "{url}/v1beta/{model}:streamGenerateContent?key={key}",
                url = self.url,
                model = Config::get(ConfigKey::Model),
                key = self.token,
            ))
            .json(&req)
            .send()
            .await
            .map_err(|err| return ChatError::Stream(err.to_string()))?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "failed to make completion request to Gemini"
            );
            return Err(ChatError::Stream(format!(
                "Gemini returned status {}",
                res.status().as_u16()
            )));
        }

        let stream = res.bytes_stream().map_err(convert_err);
        let mut lines_reader = StreamReader::new(stream).lines();

        let mut full_text = "".to_string();
        while let Ok(line) = lines_reader.next_line().await {
            if line.is_none() {
                break;
            }

            let cleaned_line = line.unwrap().trim().to_string();
            if !cleaned_line.starts_with("\"text\":") {
                continue;
            }

            let fragment: GenerateContentResponse =
                serde_json::from_str(&format!("{{ {text} }}", text = cleaned_line))
                    .map_err(|err| return ChatError::Stream(err.to_string()))?;

            if fragment.text.is_empty() || fragment.text == "\n" {
                break;
            }

            full_text += &fragment.text;
            tx.send(Event::AssistantFragment(ReplyFragment {
                text: fragment.text,
                done: false,
                context: None,
            }))
            .map_err(|err| return ChatError::Stream(err.to_string()))?;
        }

        contents.push(Content {
            role: "model".to_string(),
            parts: vec![ContentParts::Text(full_text.clone())],
        });

        let context = serde_json::to_string(&contents)
            .map_err(|err| return ChatError::Stream(err.to_string()))?;

        tx.send(Event::AssistantFragment(ReplyFragment {
            text: "".to_string(),
            done: true,
            context: Some(context),
        }))
        .map_err(|err| return ChatError::Stream(err.to_string()))?;

        return Ok(());
    }
}
