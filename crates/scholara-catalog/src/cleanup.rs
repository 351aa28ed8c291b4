//! Deletion of expired scholarships, on demand and once a day.
//!
//! The cleanup partitions with the same [`is_expired`] predicate the
//! read paths use, so anything hidden from listing is eventually
//! deleted. Runs are idempotent and may overlap: the deleted count is
//! whatever the store actually removed.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, NaiveTime, TimeZone};
use scholara_core::error::ScholaraResult;
use scholara_core::repository::ScholarshipRepository;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::expiration::{days_until_deadline, is_expired, today};
use crate::service::CatalogService;

/// Outcome of one cleanup run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Documents loaded from the store.
    pub scanned: usize,
    /// Documents the expiration policy flagged.
    pub identified: usize,
    /// Documents the store reported as removed. Lower than
    /// `identified` when another run got there first.
    pub deleted: u64,
}

impl<R: ScholarshipRepository> CatalogService<R> {
    /// Delete every expired scholarship in one bulk operation.
    pub async fn run_cleanup(&self) -> ScholaraResult<CleanupReport> {
        let today = today();
        let all = self.repository().list_all().await?;
        let scanned = all.len();

        let expired: Vec<String> = all
            .into_iter()
            .filter(|s| is_expired(s, today))
            .inspect(|s| {
                debug!(
                    id = %s.id,
                    title = s.title.as_deref().unwrap_or_default(),
                    deadline = s.deadline_date().unwrap_or_default(),
                    days_until_deadline = days_until_deadline(s, today),
                    "Expired scholarship"
                );
            })
            .map(|s| s.id)
            .collect();

        if expired.is_empty() {
            info!(scanned, "No expired scholarships to clean up");
            return Ok(CleanupReport {
                scanned,
                ..Default::default()
            });
        }

        let deleted = self.repository().delete_many(&expired).await?;
        info!(
            scanned,
            identified = expired.len(),
            deleted,
            "Expired scholarships cleaned up"
        );

        Ok(CleanupReport {
            scanned,
            identified: expired.len(),
            deleted,
        })
    }
}

/// Time left until the next 00:00 in `now`'s time zone.
///
/// When that local midnight does not exist (a DST gap) the next
/// instant after it is used.
pub fn duration_until_next_midnight<Tz: TimeZone>(now: &DateTime<Tz>) -> Duration {
    let tz = now.timezone();
    let next_midnight = now
        .date_naive()
        .succ_opt()
        .map(|day| day.and_time(NaiveTime::MIN))
        .and_then(|midnight| {
            let after_gap = midnight + chrono::Duration::hours(1);
            tz.from_local_datetime(&midnight)
                .earliest()
                .or_else(|| tz.from_local_datetime(&after_gap).earliest())
        });

    match next_midnight {
        Some(at) => (at - now.clone()).to_std().unwrap_or(Duration::from_secs(1)),
        None => Duration::from_secs(24 * 60 * 60),
    }
}

/// Spawn the daily cleanup task: sleep until the next local midnight,
/// run the cleanup, repeat. Abort the returned handle to stop it.
pub fn spawn_daily_cleanup<R>(service: Arc<CatalogService<R>>) -> JoinHandle<()>
where
    R: ScholarshipRepository + 'static,
{
    spawn_cleanup_schedule(service, || duration_until_next_midnight(&Local::now()))
}

/// Spawn a cleanup loop that waits `next_wait()` before every run. A
/// failed run is logged and does not stop later runs.
pub fn spawn_cleanup_schedule<R, F>(
    service: Arc<CatalogService<R>>,
    next_wait: F,
) -> JoinHandle<()>
where
    R: ScholarshipRepository + 'static,
    F: Fn() -> Duration + Send + 'static,
{
    tokio::spawn(async move {
        loop {
            let wait = next_wait();
            info!(wait_secs = wait.as_secs(), "Next scholarship cleanup scheduled");
            tokio::time::sleep(wait).await;

            match service.run_cleanup().await {
                Ok(report) => info!(
                    scanned = report.scanned,
                    deleted = report.deleted,
                    "Scheduled cleanup finished"
                ),
                Err(e) => error!(error = %e, "Scheduled cleanup failed"),
            }
        }
    })
}
