#[cfg(test)]
#[path = "ticker_test.rs"]
mod tests;
use tokio::sync::mpsc;
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::domain::models::Event;

/// A cancellable once-per-second driver. While armed it delivers
/// [`Event::TimerTick`] on every elapsed second; cancelling (or dropping the
/// handle) stops the underlying task.
pub struct Ticker {
    token: CancellationToken,
}

impl Ticker {
    pub fn arm(tx: mpsc::UnboundedSender<Event>) -> Ticker {
        let token = CancellationToken::new();
        let ticker_token = token.clone();

        tokio::spawn(async move {
            let mut interval = time::interval(time::Duration::from_secs(1));
            // The first interval tick resolves immediately; the countdown
            // only moves on elapsed seconds.
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = ticker_token.cancelled() => {
                        return;
                    }
                    _ = interval.tick() => {
                        if tx.send(Event::TimerTick()).is_err() {
                            return;
                        }
                    }
                }
            }
        });

        return Ticker { token };
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
