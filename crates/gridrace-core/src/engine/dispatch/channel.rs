use super::message::{Envelope, Tag, Task, WorkerMessage};
use crossbeam_channel::{Receiver, Sender, unbounded};

/// A worker's inbox with a one-message look-ahead slot.
///
/// `probe` blocks until a message is available and exposes its tag while the payload
/// stays buffered; `take_task` or `take_shutdown` then consumes it.
#[derive(Debug)]
pub struct Mailbox {
    inbox: Receiver<Envelope>,
    pending: Option<Envelope>,
}

impl Mailbox {
    pub fn new(inbox: Receiver<Envelope>) -> Self {
        Self {
            inbox,
            pending: None,
        }
    }

    /// Returns `None` once the scheduler has hung up and nothing is buffered.
    pub fn probe(&mut self) -> Option<Tag> {
        if self.pending.is_none() {
            self.pending = self.inbox.recv().ok();
        }
        self.pending.as_ref().map(Envelope::tag)
    }

    pub fn take_task(&mut self) -> Option<Task> {
        match self.pending.take() {
            Some(Envelope::Task(task)) => Some(task),
            other => {
                self.pending = other;
                None
            }
        }
    }

    pub fn take_shutdown(&mut self) -> bool {
        if matches!(self.pending, Some(Envelope::Shutdown)) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}

/// Channel endpoints owned by one worker.
#[derive(Debug)]
pub struct WorkerChannels {
    pub worker_id: usize,
    pub mailbox: Mailbox,
    pub to_scheduler: Sender<WorkerMessage>,
}

/// Channel endpoints owned by the scheduler.
///
/// The scheduler holds no result sender of its own, so the result channel disconnects
/// as soon as every worker has dropped its endpoints.
#[derive(Debug)]
pub struct SchedulerChannels {
    pub from_workers: Receiver<WorkerMessage>,
    pub to_workers: Vec<Sender<Envelope>>,
}

impl SchedulerChannels {
    pub fn num_workers(&self) -> usize {
        self.to_workers.len()
    }
}

/// One inbound channel per worker plus a single shared result channel.
pub fn create_channels(num_workers: usize) -> (SchedulerChannels, Vec<WorkerChannels>) {
    let (result_tx, result_rx) = unbounded();

    let mut to_workers = Vec::with_capacity(num_workers);
    let mut workers = Vec::with_capacity(num_workers);
    for worker_id in 0..num_workers {
        let (task_tx, task_rx) = unbounded();
        to_workers.push(task_tx);
        workers.push(WorkerChannels {
            worker_id,
            mailbox: Mailbox::new(task_rx),
            to_scheduler: result_tx.clone(),
        });
    }
    drop(result_tx);

    (
        SchedulerChannels {
            from_workers: result_rx,
            to_workers,
        },
        workers,
    )
}
