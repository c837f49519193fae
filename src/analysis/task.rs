//! Handles for in-flight backend operations (uploads, analyses).
//!
//! An [`OperationHandle`] owns a spawned tokio task. Its status follows the
//! real outcome of the future: running until the future resolves, then
//! succeeded or failed. Dropping the handle aborts the task, so an operation
//! never outlives the screen that started it.

use std::future::Future;
use std::time::{Duration, Instant};

use futures::FutureExt;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::BackendError;

/// Lifecycle of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationStatus {
    Running,
    Succeeded,
    Failed,
    Cancelled,
}

impl OperationStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }
}

impl std::fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Running => "running",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

/// Owner of a spawned backend operation.
#[derive(Debug)]
pub struct OperationHandle<T> {
    label: String,
    started: Instant,
    status: OperationStatus,
    task: Option<JoinHandle<Result<T, BackendError>>>,
    outcome: Option<Result<T, BackendError>>,
}

impl<T: Send + 'static> OperationHandle<T> {
    /// Spawn `fut` on the current tokio runtime.
    pub fn spawn<F>(label: impl Into<String>, fut: F) -> Self
    where
        F: Future<Output = Result<T, BackendError>> + Send + 'static,
    {
        let label = label.into();
        debug!(operation = %label, "Operation started");
        Self {
            label,
            started: Instant::now(),
            status: OperationStatus::Running,
            task: Some(tokio::spawn(fut)),
            outcome: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Current status, collecting the task's result if it has finished.
    pub fn poll(&mut self) -> OperationStatus {
        let finished = self.task.as_ref().is_some_and(JoinHandle::is_finished);
        if finished {
            if let Some(mut task) = self.task.take() {
                // A finished JoinHandle resolves on first poll.
                match (&mut task).now_or_never() {
                    Some(joined) => self.settle(joined),
                    None => self.task = Some(task),
                }
            }
        }
        self.status
    }

    pub fn status(&self) -> OperationStatus {
        self.status
    }

    /// Take the result once the operation has finished.
    ///
    /// Returns `None` while running or after the result was already taken.
    pub fn take_outcome(&mut self) -> Option<Result<T, BackendError>> {
        self.poll();
        self.outcome.take()
    }

    /// Abort the task. A no-op once the operation has finished.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            self.status = OperationStatus::Cancelled;
            self.outcome = Some(Err(BackendError::Cancelled {
                operation: self.label.clone(),
            }));
            debug!(operation = %self.label, "Operation cancelled");
        }
    }

    /// Wait for the operation to finish and return its result.
    pub async fn wait(mut self) -> Result<T, BackendError> {
        if let Some(task) = self.task.take() {
            let joined = task.await;
            self.settle(joined);
        }
        self.outcome.take().unwrap_or_else(|| {
            Err(BackendError::Cancelled {
                operation: self.label.clone(),
            })
        })
    }

    /// Display estimate for a progress bar, in percent.
    ///
    /// Running operations approach 90% over `expected`; only a finished
    /// operation reports 100%.
    pub fn progress_estimate(&self, expected: Duration) -> f64 {
        match self.status {
            OperationStatus::Running => {
                let expected = expected.as_secs_f64();
                if expected <= 0.0 {
                    return 90.0;
                }
                (self.elapsed().as_secs_f64() / expected * 90.0).min(90.0)
            }
            _ => 100.0,
        }
    }

    fn settle(&mut self, joined: Result<Result<T, BackendError>, tokio::task::JoinError>) {
        let outcome = match joined {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(BackendError::Cancelled {
                operation: self.label.clone(),
            }),
            Err(e) => Err(BackendError::RequestFailed {
                operation: self.label.clone(),
                reason: format!("task panicked: {e}"),
            }),
        };
        self.status = match &outcome {
            Ok(_) => OperationStatus::Succeeded,
            Err(BackendError::Cancelled { .. }) => OperationStatus::Cancelled,
            Err(_) => OperationStatus::Failed,
        };
        match &outcome {
            Ok(_) => debug!(operation = %self.label, elapsed_ms = self.elapsed().as_millis() as u64, "Operation finished"),
            Err(e) => warn!(operation = %self.label, error = %e, "Operation did not succeed"),
        }
        self.outcome = Some(outcome);
    }
}

impl<T> Drop for OperationHandle<T> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;

    async fn settle<T: Send + 'static>(handle: &mut OperationHandle<T>) -> OperationStatus {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let status = handle.poll();
                if status.is_terminal() {
                    return status;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("operation did not settle")
    }

    #[tokio::test]
    async fn success_is_reported_after_completion() {
        let mut handle = OperationHandle::spawn("upload", async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok::<_, BackendError>(7)
        });
        assert_eq!(handle.status(), OperationStatus::Running);
        assert!(handle.progress_estimate(Duration::from_secs(10)) < 100.0);

        assert_eq!(settle(&mut handle).await, OperationStatus::Succeeded);
        assert_eq!(handle.take_outcome(), Some(Ok(7)));
        assert_eq!(handle.take_outcome(), None);
        assert_eq!(handle.progress_estimate(Duration::from_secs(10)), 100.0);
    }

    #[tokio::test]
    async fn failure_is_reported_as_failure() {
        let mut handle = OperationHandle::<u32>::spawn("analysis", async {
            Err(BackendError::RequestFailed {
                operation: "analysis".into(),
                reason: "unreadable".into(),
            })
        });
        assert_eq!(settle(&mut handle).await, OperationStatus::Failed);
        assert!(matches!(
            handle.take_outcome(),
            Some(Err(BackendError::RequestFailed { .. }))
        ));
    }

    #[tokio::test]
    async fn cancel_aborts_task() {
        let mut handle = OperationHandle::<()>::spawn("upload", async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        });
        handle.cancel();
        assert_eq!(handle.status(), OperationStatus::Cancelled);
        assert!(matches!(
            handle.take_outcome(),
            Some(Err(BackendError::Cancelled { .. }))
        ));
    }

    #[tokio::test]
    async fn drop_aborts_task() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = finished.clone();
        let handle = OperationHandle::<()>::spawn("upload", async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            flag.store(true, Ordering::SeqCst);
            Ok(())
        });
        drop(handle);
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(!finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn wait_returns_result() {
        let handle = OperationHandle::spawn("analysis", async { Ok::<_, BackendError>("done") });
        let result = tokio::time::timeout(Duration::from_secs(5), handle.wait())
            .await
            .unwrap();
        assert_eq!(result, Ok("done"));
    }

    #[test]
    fn display_matches_serde() {
        for status in [
            OperationStatus::Running,
            OperationStatus::Succeeded,
            OperationStatus::Failed,
            OperationStatus::Cancelled,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(format!("\"{status}\""), json);
        }
    }
}
