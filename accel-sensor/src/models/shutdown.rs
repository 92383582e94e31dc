use log::{error, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

const RENOTIFY_PERIOD: Duration = Duration::from_millis(100);
const N_NOTIFICATIONS: usize = 10;

/// What ends a feed besides an explicit `stop`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShutdownTrigger {
    CtrlC,
    TimeToLive(Duration),
}

impl From<Option<u64>> for ShutdownTrigger {
    fn from(run_for_millis: Option<u64>) -> Self {
        match run_for_millis {
            Some(millis) => ShutdownTrigger::TimeToLive(Duration::from_millis(millis)),
            None => ShutdownTrigger::CtrlC,
        }
    }
}

impl ShutdownTrigger {
    /// Returns false if the trigger can never fire.
    async fn wait(self) -> bool {
        match self {
            ShutdownTrigger::TimeToLive(time_to_live) => {
                tokio::time::sleep(time_to_live).await;
                info!("Feed time-to-live elapsed. Sending stop signal...");
                true
            }
            ShutdownTrigger::CtrlC => match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Ctrl+C received. Sending stop signal...");
                    true
                }
                Err(e) => {
                    error!("Unable to listen for Ctrl+C: {}", e);
                    false
                }
            },
        }
    }
}

/// Spawns a task that wakes the feed loop waiting on `notify` once the trigger
/// derived from `run_for_millis` fires.
pub(crate) fn listen_for_shutdown(
    notify: Arc<Notify>,
    run_for_millis: Option<u64>,
) -> JoinHandle<()> {
    let trigger = ShutdownTrigger::from(run_for_millis);
    tokio::spawn(async move {
        if !trigger.wait().await {
            return;
        }
        // the feed may be busy publishing and miss the first wake-up
        for _ in 0..N_NOTIFICATIONS {
            notify.notify_waiters();
            tokio::time::sleep(RENOTIFY_PERIOD).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    #[test]
    fn test_trigger_from_time_to_live() {
        assert_eq!(ShutdownTrigger::from(None), ShutdownTrigger::CtrlC);
        assert_eq!(
            ShutdownTrigger::from(Some(250)),
            ShutdownTrigger::TimeToLive(Duration::from_millis(250))
        );
    }

    #[tokio::test]
    async fn test_notified_after_time_to_live() {
        let notify = Arc::new(Notify::new());
        let handle = listen_for_shutdown(notify.clone(), Some(200));

        let result = timeout(Duration::from_millis(400), notify.notified()).await;
        assert!(result.is_ok(), "stop signal not received in time");

        handle.abort();
    }

    #[tokio::test]
    async fn test_quiet_before_time_to_live() {
        let notify = Arc::new(Notify::new());
        let handle = listen_for_shutdown(notify.clone(), Some(500));

        let result = timeout(Duration::from_millis(100), notify.notified()).await;
        assert!(result.is_err());

        handle.abort();
    }
}
