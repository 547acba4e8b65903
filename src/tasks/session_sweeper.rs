use tokio::sync::watch;
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::core::{metrics, sessions::SessionStore};

/// Removes idle sessions every `every` until `shutdown` flips to true.
pub(crate) async fn run(
    sessions: SessionStore,
    idle: time::Duration,
    every: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut tick = interval(every);
    tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        if *shutdown.borrow() {
            break;
        }

        tokio::select! {
            _ = shutdown.changed() => break,
            _ = tick.tick() => {
                let removed = sessions.expire_idle(idle).await;
                if removed > 0 {
                    metrics::record_expired_sessions(removed);
                    let remaining = sessions.len().await;
                    tracing::info!(removed, remaining, "Expired idle sessions");
                }
            }
        }
    }

    tracing::debug!("Session sweeper stopped");
}
