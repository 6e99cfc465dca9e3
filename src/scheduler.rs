//! Daily refresh trigger
//!
//! A blind cadence trigger with no policy of its own: it refreshes once at
//! startup and then once per day at a fixed UTC wall-clock time, always
//! going through the store's refresh path. A failed tick is logged and the
//! next tick is the retry.

use crate::store::SnapshotStore;
use chrono::{DateTime, NaiveTime, TimeDelta, Utc};
use std::time::Duration;
use tracing::{debug, error, info};

pub async fn run(store: &SnapshotStore, refresh_at: NaiveTime) {
    tick(store).await;

    loop {
        let delay = delay_until(Utc::now(), refresh_at);
        debug!("Next scheduled refresh in {}s", delay.as_secs());
        tokio::time::sleep(delay).await;
        tick(store).await;
    }
}

async fn tick(store: &SnapshotStore) {
    match store.refresh().await {
        Ok(snapshot) => info!(date = %snapshot.date, "Scheduled refresh complete"),
        Err(e) => error!("Scheduled refresh failed: {e}"),
    }
}

/// Time until the next occurrence of `at` (UTC), strictly in the future.
fn delay_until(now: DateTime<Utc>, at: NaiveTime) -> Duration {
    let todays_run = now.date_naive().and_time(at).and_utc();
    let next_run = if todays_run > now {
        todays_run
    } else {
        todays_run + TimeDelta::days(1)
    };
    (next_run - now).to_std().unwrap_or_default()
}
