//! Background jobs: daily SKU cache refresh and periodic inventory sync.
//!
//! Each job owns one tokio task and awaits every run before waiting for the
//! next one, so a job never overlaps itself. The two jobs are independent
//! and may run at the same time.

use std::time::Duration;

use chrono::{DateTime, NaiveTime, TimeDelta, Utc};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{error, info};

use super::inventory::InventoryReconciler;
use super::sku_cache::SkuCache;
use crate::printify::PrintifyClient;

/// Handles to the running background jobs.
#[derive(Default)]
pub struct Scheduler {
    tasks: Vec<JoinHandle<()>>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the SKU cache every day at `at` (UTC).
    pub fn spawn_sku_refresh(
        &mut self,
        cache: SkuCache,
        printify: PrintifyClient,
        at: NaiveTime,
    ) {
        info!(at = %at, "Scheduling daily SKU cache refresh (UTC)");
        self.tasks.push(tokio::spawn(async move {
            loop {
                let wait = until_next_daily(Utc::now(), at);
                tokio::time::sleep(wait).await;
                // Failure is logged by the cache and the last good mappings stay
                let _ = cache.rebuild(&printify).await;
            }
        }));
    }

    /// Reconcile inventory every `period`, first run one period from now.
    pub fn spawn_inventory_sync(&mut self, reconciler: InventoryReconciler, period: Duration) {
        info!(period_secs = period.as_secs(), "Scheduling inventory sync");
        self.tasks.push(tokio::spawn(run_every(period, move || {
            let reconciler = reconciler.clone();
            async move {
                if let Err(e) = reconciler.reconcile().await {
                    error!(error = %e, "Inventory sync failed to read catalog");
                }
            }
        })));
    }

    /// Stop every job and wait for the tasks to finish. A run in progress
    /// is cancelled at its next await point.
    pub async fn shutdown(self) {
        let jobs = self.tasks.len();
        for task in self.tasks {
            task.abort();
            let _ = task.await;
        }
        info!(jobs, "Background jobs stopped");
    }
}

/// Run `job` every `period`, first run one period from now.
///
/// A run is awaited before the next tick is taken. A run that outlasts the
/// period delays the following one instead of stacking up behind it.
async fn run_every<F, Fut>(period: Duration, mut job: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        job().await;
    }
}

/// Time from `now` until the next UTC occurrence of `at`.
///
/// If `now` is exactly `at`, the next occurrence is tomorrow.
#[must_use]
pub fn until_next_daily(now: DateTime<Utc>, at: NaiveTime) -> Duration {
    let today = now.date_naive().and_time(at).and_utc();
    let next = if today > now {
        today
    } else {
        today + TimeDelta::days(1)
    };
    (next - now).to_std().unwrap_or(Duration::ZERO)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::TimeZone;
    use mockito::Matcher;
    use secrecy::SecretString;
    use url::Url;

    use super::*;
    use crate::bigcartel::BigCartelClient;
    use crate::config::{BigCartelConfig, PrintifyConfig};

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_until_next_daily_later_today() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 1, 30, 0).unwrap();
        assert_eq!(until_next_daily(now, at(3, 0)), Duration::from_secs(90 * 60));
    }

    #[test]
    fn test_until_next_daily_rolls_to_tomorrow() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 4, 0, 0).unwrap();
        assert_eq!(
            until_next_daily(now, at(3, 0)),
            Duration::from_secs(23 * 60 * 60)
        );
    }

    #[test]
    fn test_until_next_daily_exact_time_waits_a_day() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 3, 0, 0).unwrap();
        assert_eq!(
            until_next_daily(now, at(3, 0)),
            Duration::from_secs(24 * 60 * 60)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_job_never_overlaps_itself() {
        // Each run takes three periods
        let running = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));
        let runs = Arc::new(AtomicUsize::new(0));
        let period = Duration::from_secs(60);

        let (r, m, n) = (running.clone(), max_seen.clone(), runs.clone());
        let task = tokio::spawn(run_every(period, move || {
            let (r, m, n) = (r.clone(), m.clone(), n.clone());
            async move {
                let now = r.fetch_add(1, Ordering::SeqCst) + 1;
                m.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(period * 3).await;
                r.fetch_sub(1, Ordering::SeqCst);
                n.fetch_add(1, Ordering::SeqCst);
            }
        }));

        tokio::time::sleep(period * 20).await;
        task.abort();

        assert!(runs.load(Ordering::SeqCst) >= 3);
        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_job_waits_one_period_before_first_run() {
        let runs = Arc::new(AtomicUsize::new(0));
        let period = Duration::from_secs(30 * 60);

        let n = runs.clone();
        let task = tokio::spawn(run_every(period, move || {
            let n = n.clone();
            async move {
                n.fetch_add(1, Ordering::SeqCst);
            }
        }));

        tokio::time::sleep(period - Duration::from_secs(1)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        task.abort();
    }

    #[tokio::test]
    async fn test_inventory_sync_job_pushes_quantities() {
        let mut printify = mockito::Server::new_async().await;
        let mut bigcartel = mockito::Server::new_async().await;
        let catalog = printify
            .mock("GET", "/v1/shops/shop-1/products.json")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"current_page":1,"last_page":1,"data":[
                    {"id":"p1","variants":[{"id":1,"sku":"A","is_enabled":true}]}
                ]}"#,
            )
            .expect_at_least(1)
            .create_async()
            .await;
        let update = bigcartel
            .mock("PUT", "/stores/store-9/products/A")
            .match_body(Matcher::Json(serde_json::json!({"quantity": 999})))
            .with_status(200)
            .expect_at_least(1)
            .create_async()
            .await;

        let printify_client = PrintifyClient::new(
            &PrintifyConfig {
                api_url: Url::parse(&printify.url()).unwrap(),
                api_key: SecretString::from("test-key"),
                shop_id: "shop-1".to_string(),
            },
            Duration::from_secs(5),
        )
        .unwrap();
        let bigcartel_client = BigCartelClient::new(
            &BigCartelConfig {
                api_url: Url::parse(&bigcartel.url()).unwrap(),
                api_token: SecretString::from("bc-token"),
                store_id: "store-9".to_string(),
                webhook_secret: SecretString::from("unused"),
            },
            Duration::from_secs(5),
        )
        .unwrap();

        let mut scheduler = Scheduler::new();
        scheduler.spawn_inventory_sync(
            InventoryReconciler::new(printify_client, bigcartel_client, 999),
            Duration::from_millis(50),
        );
        tokio::time::sleep(Duration::from_millis(500)).await;
        scheduler.shutdown().await;

        catalog.assert_async().await;
        update.assert_async().await;
    }

    #[tokio::test]
    async fn test_shutdown_aborts_jobs() {
        let mut scheduler = Scheduler::new();
        scheduler.tasks.push(tokio::spawn(std::future::pending::<()>()));
        scheduler.tasks.push(tokio::spawn(std::future::pending::<()>()));

        let handles: Vec<_> = scheduler
            .tasks
            .iter()
            .map(JoinHandle::abort_handle)
            .collect();
        scheduler.shutdown().await;

        for handle in handles {
            assert!(handle.is_finished());
        }
    }
}
