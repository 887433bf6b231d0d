use super::channel::SchedulerChannels;
use super::error::DispatchError;
use super::ledger::{DispatchEvent, DispatchLedger};
use super::message::{Envelope, SolveResult, Task, WorkerMessage};
use crate::core::models::grid::Grid;
use crate::engine::progress::{Progress, ProgressReporter};
use crossbeam_channel::RecvTimeoutError;
use std::mem;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerPolicy {
    /// Stop dispatching after the first `Solved` result and drain only what is in flight.
    pub stop_after_first_solution: bool,
    /// Bound on the wait for any single result; `None` blocks until a result arrives.
    pub result_timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    /// One slot per task, in task order. Empty only for skipped indices.
    pub results: Vec<Option<SolveResult>>,
    /// Task indices in the order their results arrived.
    pub arrival_order: Vec<usize>,
    pub ledger: DispatchLedger,
}

/// Greedy master: one task in flight per worker, refilled as results come back.
pub(crate) struct Scheduler<'a, 'r> {
    channels: SchedulerChannels,
    policy: SchedulerPolicy,
    reporter: &'a ProgressReporter<'r>,
    grids: Vec<Grid>,
    next: usize,
    assigned: Vec<Option<usize>>,
    results: Vec<Option<SolveResult>>,
    arrival_order: Vec<usize>,
    ledger: DispatchLedger,
    shutdown_sent: bool,
    stopping: bool,
}

impl<'a, 'r> Scheduler<'a, 'r> {
    pub(crate) fn new(
        channels: SchedulerChannels,
        grids: Vec<Grid>,
        policy: SchedulerPolicy,
        reporter: &'a ProgressReporter<'r>,
    ) -> Self {
        let num_workers = channels.num_workers();
        let num_tasks = grids.len();
        Self {
            channels,
            policy,
            reporter,
            grids,
            next: 0,
            assigned: vec![None; num_workers],
            results: vec![None; num_tasks],
            arrival_order: Vec::with_capacity(num_tasks),
            ledger: DispatchLedger::new(num_workers),
            shutdown_sent: false,
            stopping: false,
        }
    }

    pub(crate) fn run(mut self) -> Result<DispatchOutcome, DispatchError> {
        let num_tasks = self.grids.len();
        self.reporter.report(Progress::DispatchStart {
            total_tasks: num_tasks as u64,
        });
        info!(
            tasks = num_tasks,
            workers = self.channels.num_workers(),
            "Starting dispatch."
        );

        for worker_id in 0..self.channels.num_workers() {
            if !self.has_pending() {
                break;
            }
            self.dispatch_next(worker_id)?;
        }
        if !self.has_pending() {
            self.broadcast_shutdown()?;
        }

        while self.in_flight() > 0 {
            match self.receive()? {
                WorkerMessage::Result { worker_id, result } => {
                    self.accept(worker_id, result)?;
                    if self.has_pending() {
                        self.dispatch_next(worker_id)?;
                    } else {
                        self.broadcast_shutdown()?;
                    }
                }
            }
        }
        self.broadcast_shutdown()?;

        let skipped: Vec<usize> = (self.next..num_tasks).collect();
        if !skipped.is_empty() {
            info!(skipped = skipped.len(), "Stopped early; undispatched tasks skipped.");
        }
        self.ledger.mark_skipped(skipped);
        self.reporter.report(Progress::DispatchFinish);

        Ok(DispatchOutcome {
            results: self.results,
            arrival_order: self.arrival_order,
            ledger: self.ledger,
        })
    }

    fn has_pending(&self) -> bool {
        !self.stopping && self.next < self.grids.len()
    }

    fn in_flight(&self) -> usize {
        self.assigned.iter().filter(|a| a.is_some()).count()
    }

    fn dispatch_next(&mut self, worker_id: usize) -> Result<(), DispatchError> {
        let index = self.next;
        let grid = mem::take(&mut self.grids[index]);
        self.channels.to_workers[worker_id]
            .send(Envelope::Task(Task { index, grid }))
            .map_err(|_| DispatchError::SendFailed { worker_id })?;

        self.next += 1;
        self.assigned[worker_id] = Some(index);
        self.ledger.record(DispatchEvent::TaskSent { worker_id, index });
        debug!(worker_id, index, "Task sent.");
        Ok(())
    }

    fn broadcast_shutdown(&mut self) -> Result<(), DispatchError> {
        if self.shutdown_sent {
            return Ok(());
        }
        self.shutdown_sent = true;
        for (worker_id, sender) in self.channels.to_workers.iter().enumerate() {
            sender
                .send(Envelope::Shutdown)
                .map_err(|_| DispatchError::SendFailed { worker_id })?;
            self.ledger.record(DispatchEvent::ShutdownSent { worker_id });
        }
        debug!("Shutdown sent to every worker.");
        Ok(())
    }

    fn receive(&self) -> Result<WorkerMessage, DispatchError> {
        let disconnected = || DispatchError::WorkersDisconnected {
            received: self.arrival_order.len(),
            expected: self.next,
        };
        match self.policy.result_timeout {
            Some(waited) => {
                self.channels
                    .from_workers
                    .recv_timeout(waited)
                    .map_err(|e| match e {
                        RecvTimeoutError::Timeout => DispatchError::Timeout { waited },
                        RecvTimeoutError::Disconnected => disconnected(),
                    })
            }
            None => self
                .channels
                .from_workers
                .recv()
                .map_err(|_| disconnected()),
        }
    }

    fn accept(&mut self, worker_id: usize, result: SolveResult) -> Result<(), DispatchError> {
        let index = result.index;
        let expected = self.assigned.get_mut(worker_id).ok_or_else(|| {
            DispatchError::Protocol(format!("result from unknown worker {}", worker_id))
        })?;
        if *expected != Some(index) {
            return Err(DispatchError::Protocol(format!(
                "worker {} returned index {} while holding {:?}",
                worker_id, index, expected
            )));
        }
        *expected = None;

        self.ledger
            .record(DispatchEvent::ResultReceived { worker_id, index });
        self.arrival_order.push(index);
        debug!(worker_id, index, status = %result.status, "Result received.");
        self.reporter.report(Progress::TaskCompleted {
            index,
            worker_id,
            status: result.status,
        });

        if self.policy.stop_after_first_solution && result.status.is_solved() && !self.stopping {
            info!(index, worker_id, "First solution received; stopping dispatch.");
            self.stopping = true;
        }
        self.results[index] = Some(result);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::dispatch::channel::create_channels;
    use crate::engine::dispatch::message::SolveStatus;
    use std::thread;

    fn reply(index: usize, worker_id: usize) -> WorkerMessage {
        WorkerMessage::Result {
            worker_id,
            result: SolveResult {
                index,
                grid: Grid::empty(),
                status: SolveStatus::Unsolvable,
                elapsed: Duration::ZERO,
            },
        }
    }

    #[test]
    fn result_for_an_index_the_worker_does_not_hold_is_a_protocol_error() {
        let (scheduler, mut workers) = create_channels(1);
        let mut worker = workers.remove(0);
        let handle = thread::spawn(move || {
            worker.mailbox.probe();
            let task = worker.mailbox.take_task().unwrap();
            worker.to_scheduler.send(reply(task.index + 5, 0)).unwrap();
        });

        let reporter = ProgressReporter::new();
        let outcome = Scheduler::new(
            scheduler,
            vec![Grid::empty(), Grid::empty()],
            SchedulerPolicy::default(),
            &reporter,
        )
        .run();
        handle.join().unwrap();
        assert!(matches!(outcome, Err(DispatchError::Protocol(_))));
    }

    #[test]
    fn silent_workers_trigger_the_result_timeout() {
        let (scheduler, workers) = create_channels(1);
        let reporter = ProgressReporter::new();
        let policy = SchedulerPolicy {
            result_timeout: Some(Duration::from_millis(20)),
            ..SchedulerPolicy::default()
        };
        let outcome = Scheduler::new(scheduler, vec![Grid::empty()], policy, &reporter).run();
        assert_eq!(
            outcome.unwrap_err(),
            DispatchError::Timeout {
                waited: Duration::from_millis(20)
            }
        );
        drop(workers);
    }

    #[test]
    fn dropped_workers_are_reported_as_disconnected() {
        let (scheduler, workers) = create_channels(2);
        let mailboxes_kept: Vec<_> = workers.into_iter().map(|w| w.mailbox).collect();
        let reporter = ProgressReporter::new();
        let outcome = Scheduler::new(
            scheduler,
            vec![Grid::empty(); 3],
            SchedulerPolicy::default(),
            &reporter,
        )
        .run();
        assert_eq!(
            outcome.unwrap_err(),
            DispatchError::WorkersDisconnected {
                received: 0,
                expected: 2
            }
        );
        drop(mailboxes_kept);
    }

    #[test]
    fn a_hung_up_worker_fails_the_send() {
        let (scheduler, mut workers) = create_channels(2);
        drop(workers.remove(1));
        let reporter = ProgressReporter::new();
        let outcome = Scheduler::new(
            scheduler,
            vec![Grid::empty(); 2],
            SchedulerPolicy::default(),
            &reporter,
        )
        .run();
        assert_eq!(
            outcome.unwrap_err(),
            DispatchError::SendFailed { worker_id: 1 }
        );
        drop(workers);
    }
}
