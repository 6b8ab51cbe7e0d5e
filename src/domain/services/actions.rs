#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;
use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::models::Action;
use crate::domain::models::BackendArc;
use crate::domain::models::Event;

/// Background worker owning all traffic to the assistant backend. Session
/// opens run inline; each streamed reply runs on its own task so it can be
/// aborted without tearing the worker down.
pub struct ActionsService {}

impl ActionsService {
    pub async fn start(
        backend: BackendArc,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        // Lazy default.
        let mut worker: JoinHandle<Result<()>> = tokio::spawn(async {
            return Ok(());
        });

        loop {
            let action = rx.recv().await;
            if action.is_none() {
                return Ok(());
            }

            match action.unwrap() {
                Action::OpenSession() => match backend.create_session().await {
                    Ok(handle) => {
                        tracing::debug!(session_id = handle.id, "assistant session opened");
                        tx.send(Event::SessionOpened(handle))?;
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "assistant session could not be opened");
                        tx.send(Event::SessionFailed(err))?;
                    }
                },
                Action::AbortReply() => {
                    worker.abort();
                }
                Action::SubmitPrompt(prompt) => {
                    let worker_backend = backend.clone();
                    let worker_tx = tx.clone();

                    worker = tokio::spawn(async move {
                        if let Err(err) = worker_backend.send_and_stream(prompt, &worker_tx).await {
                            worker_tx.send(Event::StreamFailed(err))?;
                        }

                        return Ok(());
                    });
                }
            }
        }
    }
}
