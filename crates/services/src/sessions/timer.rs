use std::time::Duration;

use prep_core::model::SessionEvent;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::trace;

use super::driver::SessionInput;

/// One countdown step.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Send a `Tick` into `events` every `period` until the receiver goes away.
///
/// The first tick fires one full period after spawning. Ticks are only
/// producers; whether they count is up to the session state.
#[must_use]
pub fn spawn_ticker(events: mpsc::Sender<SessionInput>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticks = interval_at(Instant::now() + period, period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticks.tick().await;
            if events
                .send(SessionInput::Event(SessionEvent::Tick))
                .await
                .is_err()
            {
                trace!("ticker stopped: receiver dropped");
                break;
            }
        }
    })
}
