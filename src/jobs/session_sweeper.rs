// ==================== SESSION SWEEPER ====================
// Background job that drops expired sessions so the in-memory store
// stays bounded by the number of live logins.

use std::time::Duration;

use actix_web::web;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::utils::SessionStore;

/// Spawns the sweeper; it runs every `every` until the runtime shuts down
pub fn start_session_sweeper(store: web::Data<SessionStore>, every: Duration) -> JoinHandle<()> {
    log::info!(
        "🧹 Starting session sweeper (every {}s, session TTL {}s)",
        every.as_secs(),
        store.ttl().as_secs()
    );

    tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately; nothing can have expired yet
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let removed = store.purge_expired();
            if removed > 0 {
                log::info!("🧹 Removed {} expired sessions ({} live)", removed, store.len());
            } else {
                log::debug!("🧹 No expired sessions ({} live)", store.len());
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::SessionEntry;

    #[tokio::test]
    async fn test_sweeper_purges_expired_sessions() {
        let store = web::Data::new(SessionStore::new(Duration::from_millis(10)));
        store.create(SessionEntry {
            first_name: "Ann".into(),
            last_name: "Lee".into(),
        });
        assert_eq!(store.len(), 1);

        let handle = start_session_sweeper(store.clone(), Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert!(store.is_empty());
        handle.abort();
    }
}
