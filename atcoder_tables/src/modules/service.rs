use crate::modules::utils::is_accepted;
use anyhow::Result;
use atcoder_tables_libs::{
    resource::{client::ProblemsResource, model::Submission},
    status, table,
    table::TableSet,
};
use chrono::{DateTime, FixedOffset, Local};
use futures::future::try_join_all;
use itertools::Itertools;
use serde::Serialize;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tokio::sync::watch;

/// One fully computed set of tables together with the inputs that produced
/// it. Snapshots are immutable; a refresh replaces the whole thing.
#[derive(Debug, Clone, Serialize)]
pub struct TableSnapshot {
    pub primary_user: String,
    pub rivals: Vec<String>,
    pub generated_at: DateTime<FixedOffset>,
    pub tables: TableSet,
}

pub struct TableService<R> {
    resource: R,
}

impl<R> TableService<R>
where
    R: ProblemsResource,
{
    pub fn new(resource: R) -> Self {
        Self { resource }
    }

    /// Runs the whole pipeline once: fetch everything, resolve statuses,
    /// organize the tables.
    ///
    /// Contests and problems are fetched concurrently, then submissions with
    /// one request per distinct non-empty user id. Any failed fetch aborts
    /// the run; partial submission data never reaches the resolver.
    pub async fn build_snapshot(
        &self,
        primary_user: &str,
        rivals: &[String],
    ) -> Result<TableSnapshot> {
        let (contests, problems) = tokio::try_join!(
            self.resource.fetch_contests(),
            self.resource.fetch_problems(),
        )?;

        let users: Vec<&str> = std::iter::once(primary_user)
            .chain(rivals.iter().map(String::as_str))
            .filter(|user| !user.is_empty())
            .unique()
            .collect();
        let responses = try_join_all(
            users
                .into_iter()
                .map(|user| self.resource.fetch_user_submissions(user)),
        )
        .await?;
        let submissions: Vec<Submission> = responses.into_iter().flatten().collect();

        let statuses = status::resolve(&problems, &submissions, primary_user, rivals, is_accepted);
        let composed = table::compose(&problems, &contests, &statuses)?;
        let tables = table::organize(&contests, &composed)?;

        tracing::info!(
            "Organized {} problems into {} contest rows.",
            tables.problem_count(),
            tables.contest_count()
        );

        Ok(TableSnapshot {
            primary_user: String::from(primary_user),
            rivals: rivals.to_vec(),
            generated_at: Local::now().fixed_offset(),
            tables,
        })
    }
}

/// Publishes snapshots of the server's default user set.
///
/// Refreshes may overlap. Each run takes a ticket from a monotonically
/// increasing counter and publishes only if no newer run has started by the
/// time it completes, so the slot never moves backwards in start order.
pub struct RefreshCoordinator<R> {
    service: Arc<TableService<R>>,
    primary_user: String,
    rivals: Vec<String>,
    epoch: AtomicU64,
    slot: watch::Sender<Option<Arc<TableSnapshot>>>,
}

impl<R> RefreshCoordinator<R>
where
    R: ProblemsResource,
{
    pub fn new(service: Arc<TableService<R>>, primary_user: String, rivals: Vec<String>) -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            service,
            primary_user,
            rivals,
            epoch: AtomicU64::new(0),
            slot,
        }
    }

    /// Whether a default user set was configured at startup.
    pub fn has_users(&self) -> bool {
        !self.primary_user.is_empty() || !self.rivals.is_empty()
    }

    /// The latest published snapshot, if a refresh completed yet.
    pub fn latest(&self) -> Option<Arc<TableSnapshot>> {
        self.slot.borrow().clone()
    }

    /// A receiver notified whenever a new snapshot is published.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<TableSnapshot>>> {
        self.slot.subscribe()
    }

    /// Runs one refresh of the default user set.
    ///
    /// Returns `Ok(true)` if this run's snapshot was published and `Ok(false)`
    /// if a newer refresh started while this one was running, in which case
    /// the result is discarded.
    pub async fn refresh(&self) -> Result<bool> {
        let ticket = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!("Start refresh {} of the table snapshot.", ticket);

        let snapshot = self
            .service
            .build_snapshot(&self.primary_user, &self.rivals)
            .await?;
        let snapshot = Arc::new(snapshot);

        // The staleness check and the publication must be one atomic step, so
        // both happen inside the watch lock.
        let published = self.slot.send_if_modified(|slot| {
            if self.epoch.load(Ordering::SeqCst) == ticket {
                *slot = Some(snapshot);
                true
            } else {
                false
            }
        });

        if published {
            tracing::info!("Refresh {} published a new table snapshot.", ticket);
        } else {
            tracing::info!("Refresh {} was superseded, result discarded.", ticket);
        }

        Ok(published)
    }
}
