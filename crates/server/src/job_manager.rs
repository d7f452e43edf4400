use crate::types::{Job, JobStatus};
use chrono::Utc;
use futures::FutureExt;
use std::any::Any;
use std::collections::HashMap;
use std::fmt::Display;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Result placeholder before a job finishes
pub const PENDING_RESULT: &str = "No Data";

/// Result reported for unknown job ids
pub const MISSING_RESULT: &str = "NA";

/// Tracks background cleansing jobs by transaction id
#[derive(Clone, Default)]
pub struct JobManager {
    jobs: Arc<RwLock<HashMap<String, Job>>>,
}

impl JobManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new in-progress job
    pub async fn submit(&self) -> Job {
        let job = Job {
            id: Uuid::new_v4().to_string(),
            status: JobStatus::InProgress,
            result: PENDING_RESULT.to_string(),
            created_at: Utc::now(),
            finished_at: None,
        };

        self.jobs.write().await.insert(job.id.clone(), job.clone());
        debug!("Job {} submitted", job.id);
        job
    }

    /// Drive `work` to completion and record its outcome on the job
    ///
    /// Errors and panics both end the job in the error state. Nothing is
    /// propagated to the caller.
    pub async fn run<F, E>(&self, job_id: &str, work: F)
    where
        F: Future<Output = Result<String, E>>,
        E: Display,
    {
        let (status, result) = match AssertUnwindSafe(work).catch_unwind().await {
            Ok(Ok(output)) => {
                info!("Job {} finished", job_id);
                (JobStatus::Success, output)
            }
            Ok(Err(e)) => {
                error!("Job {} failed: {}", job_id, e);
                (JobStatus::Error, failure_message(e))
            }
            Err(panic) => {
                let reason = panic_reason(panic.as_ref());
                error!("Job {} panicked: {}", job_id, reason);
                (JobStatus::Error, failure_message(reason))
            }
        };

        self.finish(job_id, status, result).await;
    }

    /// Run `work` for the job on the tokio runtime
    pub fn spawn<F, E>(&self, job_id: String, work: F) -> JoinHandle<()>
    where
        F: Future<Output = Result<String, E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let manager = self.clone();
        tokio::spawn(async move {
            manager.run(&job_id, work).await;
        })
    }

    pub async fn get_status(&self, job_id: &str) -> JobStatus {
        self.jobs
            .read()
            .await
            .get(job_id)
            .map(|job| job.status)
            .unwrap_or(JobStatus::NotFound)
    }

    pub async fn get_result(&self, job_id: &str) -> (JobStatus, String) {
        match self.jobs.read().await.get(job_id) {
            Some(job) => (job.status, job.result.clone()),
            None => (JobStatus::NotFound, MISSING_RESULT.to_string()),
        }
    }

    /// Number of tracked jobs
    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.jobs.read().await.is_empty()
    }

    async fn finish(&self, job_id: &str, status: JobStatus, result: String) {
        let mut jobs = self.jobs.write().await;
        match jobs.get_mut(job_id) {
            Some(job) if job.status.is_terminal() => {
                warn!("Job {} already finished, ignoring new outcome", job_id);
            }
            Some(job) => {
                job.status = status;
                job.result = result;
                job.finished_at = Some(Utc::now());
            }
            None => warn!("Job {} is not tracked", job_id),
        }
    }
}

fn failure_message(e: impl Display) -> String {
    format!("Error occurred while cleansing the note: {}", e)
}

fn panic_reason(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
