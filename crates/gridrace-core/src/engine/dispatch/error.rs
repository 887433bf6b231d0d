use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Dispatch requires at least one worker")]
    NoWorkers,

    #[error("Failed to spawn worker {worker_id}: {reason}")]
    Spawn { worker_id: usize, reason: String },

    #[error("Worker {worker_id} hung up before its message could be delivered")]
    SendFailed { worker_id: usize },

    #[error("Scheduler hung up while worker {worker_id} was still running")]
    SchedulerHungUp { worker_id: usize },

    #[error("All workers disconnected after {received} of {expected} results")]
    WorkersDisconnected { received: usize, expected: usize },

    #[error("Worker {worker_id} panicked")]
    WorkerPanicked { worker_id: usize },

    #[error("No result arrived within {waited:?}")]
    Timeout { waited: Duration },

    #[error("Protocol violation: {0}")]
    Protocol(String),
}
