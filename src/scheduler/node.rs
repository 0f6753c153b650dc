use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

use super::{ComparisonJob, JobOutcome, JobResult, SchedulerConfig, SchedulerError};
use crate::comparator::{Comparator, ComparisonError, ComparisonReport};
use crate::queue::CancellationFlag;

const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Handle to one submitted comparison
pub struct JobHandle {
    label: String,
    cancel: CancellationFlag,
    join: JoinHandle<JobResult>,
}

impl JobHandle {
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Asks the job to stop; it reports `Cancelled` once the worker notices
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub async fn join(self) -> JobResult {
        match self.join.await {
            Ok(result) => result,
            Err(e) => JobResult {
                label: self.label,
                outcome: JobOutcome::Failed(ComparisonError::Internal(format!("Job task failed: {}", e))),
                elapsed: Duration::ZERO,
            },
        }
    }
}

/// Worker pool running independent comparisons on tokio's blocking pool.
///
/// A semaphore bounds how many comparisons simulate at once. A slot stays taken
/// until the worker thread actually returns, also after a timeout.
pub struct ComparisonScheduler {
    comparator: Comparator,
    config: SchedulerConfig,
    permits: Arc<Semaphore>,
}

impl ComparisonScheduler {
    pub fn new(comparator: Comparator, config: SchedulerConfig) -> Result<Self, SchedulerError> {
        if config.max_concurrent == 0 {
            return Err(SchedulerError::InvalidConcurrency(config.max_concurrent));
        }
        Ok(Self {
            comparator,
            permits: Arc::new(Semaphore::new(config.max_concurrent)),
            config,
        })
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Slots not held by a running comparison
    pub fn available_slots(&self) -> usize {
        self.permits.available_permits()
    }

    pub fn submit(&self, job: ComparisonJob) -> JobHandle {
        let cancel = CancellationFlag::new();
        let label = job.label.clone();
        let join = tokio::spawn(run_job(
            self.comparator.clone(),
            self.permits.clone(),
            self.config.timeout,
            job,
            cancel.clone(),
        ));
        JobHandle { label, cancel, join }
    }

    /// Runs every job and returns the results in submission order
    pub async fn run_batch(&self, jobs: Vec<ComparisonJob>) -> Vec<JobResult> {
        tracing::info!(jobs = jobs.len(), max_concurrent = self.config.max_concurrent, "running comparison batch");
        let handles: Vec<JobHandle> = jobs.into_iter().map(|job| self.submit(job)).collect();
        futures::future::join_all(handles.into_iter().map(JobHandle::join)).await
    }
}

/// Resolves once the flag is raised
async fn wait_for_cancel(cancel: &CancellationFlag) {
    while !cancel.is_cancelled() {
        tokio::time::sleep(CANCEL_POLL_INTERVAL).await;
    }
}

async fn run_job(
    comparator: Comparator,
    permits: Arc<Semaphore>,
    timeout: Option<Duration>,
    job: ComparisonJob,
    cancel: CancellationFlag,
) -> JobResult {
    let started = Instant::now();
    let ComparisonJob { label, request } = job;
    let finish = |outcome: JobOutcome| JobResult { label: label.clone(), outcome, elapsed: started.elapsed() };

    if cancel.is_cancelled() {
        return finish(JobOutcome::Cancelled);
    }
    let permit = tokio::select! {
        acquired = permits.acquire_owned() => match acquired {
            Ok(permit) => permit,
            Err(_) => return finish(JobOutcome::Failed(ComparisonError::Internal("Scheduler closed".to_string()))),
        },
        _ = wait_for_cancel(&cancel) => {
            tracing::debug!(job = %label, "comparison cancelled while waiting for a slot");
            return finish(JobOutcome::Cancelled);
        }
    };

    let worker = comparator.clone();
    let worker_cancel = cancel.clone();
    let task = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        worker.compare(&request, &worker_cancel)
    });

    let joined = match timeout {
        Some(limit) => match tokio::time::timeout(limit, task).await {
            Ok(joined) => joined,
            Err(_) => {
                cancel.cancel();
                tracing::warn!(job = %label, timeout_ms = limit.as_millis() as u64, "comparison timed out");
                return finish(JobOutcome::TimedOut);
            }
        },
        None => task.await,
    };

    let outcome = match joined {
        Ok(Ok(report)) => match comparator.record(&report).await {
            Ok(()) => JobOutcome::Completed(Box::new(report)),
            Err(e) => JobOutcome::Failed(e),
        },
        Ok(Err(ComparisonError::Cancelled)) => JobOutcome::Cancelled,
        Ok(Err(e)) => {
            tracing::warn!(job = %label, error = %e, "comparison failed");
            JobOutcome::Failed(e)
        }
        Err(e) => JobOutcome::Failed(ComparisonError::Internal(format!("Comparison worker failed: {}", e))),
    };
    finish(outcome)
}

/// Unwraps completed reports, keeping submission order
pub fn completed_reports(results: &[JobResult]) -> Vec<&ComparisonReport> {
    results.iter().filter_map(|r| r.outcome.report()).collect()
}
