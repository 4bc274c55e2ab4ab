use std::time::Duration;

use prep_core::model::{SessionEvent, SessionPhase, SessionResult};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::runner::SessionRunner;
use super::timer::spawn_ticker;
use crate::error::SessionError;

const CHANNEL_CAPACITY: usize = 64;

/// What producers can send into a running session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionInput {
    Event(SessionEvent),
    /// Leave the session. Nothing is scored.
    Quit,
}

/// Outcome of consuming one input.
#[derive(Debug)]
pub enum Step {
    Applied(SessionEvent),
    /// A tick arrived while the session was not running; nothing changed.
    Idle,
    Completed(SessionResult),
    Rejected {
        event: SessionEvent,
        error: SessionError,
    },
    Quit,
}

/// Single consumer for a session's event channel.
///
/// The ticker task and any input producers share one channel, so timer expiry
/// and submission are applied strictly in arrival order.
pub struct SessionDriver {
    runner: SessionRunner,
    tx: mpsc::Sender<SessionInput>,
    rx: mpsc::Receiver<SessionInput>,
    ticker: JoinHandle<()>,
}

impl SessionDriver {
    /// Spawn the ticker and take ownership of `runner`. Must be called inside
    /// a tokio runtime.
    ///
    /// The ticker runs from here on, before `Start` and after completion too.
    /// Those ticks come back from [`step`](Self::step) as [`Step::Idle`].
    #[must_use]
    pub fn spawn(runner: SessionRunner, tick_period: Duration) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let ticker = spawn_ticker(tx.clone(), tick_period);
        Self {
            runner,
            tx,
            rx,
            ticker,
        }
    }

    /// A producer handle for user input.
    #[must_use]
    pub fn sender(&self) -> mpsc::Sender<SessionInput> {
        self.tx.clone()
    }

    #[must_use]
    pub fn runner(&self) -> &SessionRunner {
        &self.runner
    }

    /// Wait for the next input and apply it.
    pub async fn step(&mut self) -> Step {
        let Some(input) = self.rx.recv().await else {
            return Step::Quit;
        };
        match input {
            SessionInput::Quit => Step::Quit,
            SessionInput::Event(SessionEvent::Tick)
                if self.runner.state().phase() != SessionPhase::Active =>
            {
                Step::Idle
            }
            SessionInput::Event(event) => match self.runner.apply(event.clone()) {
                Ok(Some(result)) => Step::Completed(result),
                Ok(None) => Step::Applied(event),
                Err(error) => Step::Rejected { event, error },
            },
        }
    }

    /// Step until the session completes or a producer quits.
    pub async fn run_to_completion(&mut self) -> Option<SessionResult> {
        loop {
            match self.step().await {
                Step::Completed(result) => return Some(result),
                Step::Quit => return None,
                Step::Applied(_) | Step::Idle | Step::Rejected { .. } => {}
            }
        }
    }
}

impl Drop for SessionDriver {
    fn drop(&mut self) {
        self.ticker.abort();
    }
}
