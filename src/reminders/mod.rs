//! One-shot reminders
//!
//! Each reminder is its own Tokio task sleeping until its deadline, so
//! firing is independent of whatever command is being handled at the time.
//! Jobs are tracked in a registry until they fire or are cancelled.

mod time;

pub use time::{parse_clock_time, resolve_today};

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Local};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::error::InvalidTime;
use crate::voice::Speaker;
use crate::Result;

/// A scheduled reminder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderJob {
    /// Opaque handle
    pub id: Uuid,
    /// When the reminder fires
    pub fire_at: DateTime<Local>,
    /// What to remind about
    pub task: String,
}

struct Scheduled {
    job: ReminderJob,
    handle: JoinHandle<()>,
}

type Registry = Arc<Mutex<HashMap<Uuid, Scheduled>>>;

/// Registry of pending reminders
pub struct ReminderScheduler {
    speaker: Arc<Speaker>,
    jobs: Registry,
}

impl ReminderScheduler {
    /// Create a scheduler that announces through `speaker`
    #[must_use]
    pub fn new(speaker: Arc<Speaker>) -> Self {
        Self {
            speaker,
            jobs: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Schedule `task` to be announced at `fire_at`
    ///
    /// `now` is the instant the delay is measured from. Must be called from
    /// within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTime::Passed`] if `fire_at` is not after `now`
    pub fn schedule(
        &self,
        task: &str,
        fire_at: DateTime<Local>,
        now: DateTime<Local>,
    ) -> Result<ReminderJob> {
        let delay = (fire_at - now)
            .to_std()
            .ok()
            .filter(|delay| !delay.is_zero())
            .ok_or(InvalidTime::Passed)?;
        let deadline = tokio::time::Instant::now() + delay;
        let job = ReminderJob {
            id: Uuid::new_v4(),
            fire_at,
            task: task.to_string(),
        };

        let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);

        let handle = {
            let id = job.id;
            let task = job.task.clone();
            let speaker = Arc::clone(&self.speaker);
            let registry = Arc::clone(&self.jobs);
            tokio::spawn(async move {
                tokio::time::sleep_until(deadline).await;

                registry
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .remove(&id);

                tracing::info!(%id, task = %task, "reminder firing");
                speaker.speak(&format!("Reminder: {task}"));
            })
        };

        tracing::info!(
            id = %job.id,
            task = %job.task,
            fire_at = %job.fire_at,
            delay_secs = delay.as_secs(),
            "reminder scheduled"
        );

        jobs.insert(
            job.id,
            Scheduled {
                job: job.clone(),
                handle,
            },
        );

        Ok(job)
    }

    /// Reminders that have not fired yet, soonest first
    #[must_use]
    pub fn pending(&self) -> Vec<ReminderJob> {
        let mut pending: Vec<ReminderJob> = self
            .jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(|s| s.job.clone())
            .collect();
        pending.sort_by_key(|job| job.fire_at);
        pending
    }

    /// Cancel a pending reminder
    ///
    /// Returns false if it already fired or never existed.
    pub fn cancel(&self, id: Uuid) -> bool {
        let removed = self
            .jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);

        match removed {
            Some(scheduled) => {
                scheduled.handle.abort();
                tracing::info!(%id, "reminder cancelled");
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for ReminderScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReminderScheduler")
            .field("pending", &self.pending().len())
            .finish_non_exhaustive()
    }
}
