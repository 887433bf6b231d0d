use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DispatchEvent {
    TaskSent { worker_id: usize, index: usize },
    ShutdownSent { worker_id: usize },
    ResultReceived { worker_id: usize, index: usize },
}

/// Ordered record of every message the scheduler sent or received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispatchLedger {
    num_workers: usize,
    events: Vec<DispatchEvent>,
    skipped: Vec<usize>,
}

impl DispatchLedger {
    pub fn new(num_workers: usize) -> Self {
        Self {
            num_workers,
            ..Self::default()
        }
    }

    pub(crate) fn record(&mut self, event: DispatchEvent) {
        self.events.push(event);
    }

    pub(crate) fn mark_skipped(&mut self, indices: impl IntoIterator<Item = usize>) {
        self.skipped.extend(indices);
    }

    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    pub fn events(&self) -> &[DispatchEvent] {
        &self.events
    }

    /// Indices that were never dispatched because the run stopped early.
    pub fn skipped(&self) -> &[usize] {
        &self.skipped
    }

    pub fn tasks_sent(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, DispatchEvent::TaskSent { .. }))
            .count()
    }

    pub fn tasks_sent_to(&self, worker: usize) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, DispatchEvent::TaskSent { worker_id, .. } if *worker_id == worker))
            .count()
    }

    pub fn shutdowns_sent_to(&self, worker: usize) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, DispatchEvent::ShutdownSent { worker_id } if *worker_id == worker))
            .count()
    }

    pub fn tasks_per_worker(&self) -> Vec<usize> {
        (0..self.num_workers).map(|w| self.tasks_sent_to(w)).collect()
    }

    /// Received indices, in arrival order.
    pub fn received_indices(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|e| match e {
                DispatchEvent::ResultReceived { index, .. } => Some(*index),
                _ => None,
            })
            .collect()
    }

    /// `true` if any worker was sent a task after its shutdown.
    pub fn task_sent_after_shutdown(&self) -> bool {
        let mut shut_down = Vec::new();
        for event in &self.events {
            match *event {
                DispatchEvent::ShutdownSent { worker_id } => shut_down.push(worker_id),
                DispatchEvent::TaskSent { worker_id, .. } if shut_down.contains(&worker_id) => {
                    return true;
                }
                _ => {}
            }
        }
        false
    }

    /// Checks the scheduler invariants for a run over `num_tasks` puzzles.
    ///
    /// Returns one line per violation; an empty list means the run was well formed.
    pub fn violations(&self, num_tasks: usize) -> Vec<String> {
        let mut problems = Vec::new();

        let dispatched = num_tasks - self.skipped.len().min(num_tasks);
        if self.tasks_sent() != dispatched {
            problems.push(format!(
                "{} tasks sent, expected {}",
                self.tasks_sent(),
                dispatched
            ));
        }

        let mut seen = vec![0usize; num_tasks];
        for index in self.received_indices() {
            match seen.get_mut(index) {
                Some(count) => *count += 1,
                None => problems.push(format!("result for unknown index {}", index)),
            }
        }
        for (index, count) in seen.iter().enumerate() {
            let expected = usize::from(!self.skipped.contains(&index));
            if *count != expected {
                problems.push(format!(
                    "index {} received {} times, expected {}",
                    index, count, expected
                ));
            }
        }

        for worker in 0..self.num_workers {
            let shutdowns = self.shutdowns_sent_to(worker);
            if shutdowns != 1 {
                problems.push(format!("worker {} got {} shutdowns", worker, shutdowns));
            }
        }

        if self.task_sent_after_shutdown() {
            problems.push("a task was sent after a shutdown".to_string());
        }
        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use DispatchEvent::*;

    fn ledger(events: &[DispatchEvent]) -> DispatchLedger {
        let mut ledger = DispatchLedger::new(2);
        for event in events {
            ledger.record(*event);
        }
        ledger
    }

    #[test]
    fn well_formed_run_has_no_violations() {
        let ledger = ledger(&[
            TaskSent { worker_id: 0, index: 0 },
            TaskSent { worker_id: 1, index: 1 },
            ResultReceived { worker_id: 1, index: 1 },
            TaskSent { worker_id: 1, index: 2 },
            ShutdownSent { worker_id: 0 },
            ShutdownSent { worker_id: 1 },
            ResultReceived { worker_id: 0, index: 0 },
            ResultReceived { worker_id: 1, index: 2 },
        ]);
        assert!(ledger.violations(3).is_empty());
        assert_eq!(ledger.num_workers(), 2);
        assert_eq!(ledger.tasks_per_worker(), vec![1, 2]);
        assert_eq!(ledger.received_indices(), vec![1, 0, 2]);
    }

    #[test]
    fn detects_task_after_shutdown_and_duplicate_results() {
        let ledger = ledger(&[
            TaskSent { worker_id: 0, index: 0 },
            ShutdownSent { worker_id: 0 },
            TaskSent { worker_id: 0, index: 1 },
            ShutdownSent { worker_id: 1 },
            ResultReceived { worker_id: 0, index: 0 },
            ResultReceived { worker_id: 0, index: 0 },
        ]);
        assert!(ledger.task_sent_after_shutdown());
        let problems = ledger.violations(2);
        assert!(problems.iter().any(|p| p.contains("index 0 received 2 times")));
        assert!(problems.iter().any(|p| p.contains("index 1 received 0 times")));
        assert!(problems.iter().any(|p| p.contains("after a shutdown")));
    }

    #[test]
    fn skipped_indices_are_not_expected() {
        let mut ledger = ledger(&[
            TaskSent { worker_id: 0, index: 0 },
            ResultReceived { worker_id: 0, index: 0 },
            ShutdownSent { worker_id: 0 },
            ShutdownSent { worker_id: 1 },
        ]);
        ledger.mark_skipped([1, 2]);
        assert!(ledger.violations(3).is_empty());
        assert_eq!(ledger.skipped(), &[1, 2]);
    }

    #[test]
    fn missing_shutdown_is_reported() {
        let ledger = ledger(&[ShutdownSent { worker_id: 0 }]);
        assert_eq!(ledger.violations(0), vec!["worker 1 got 0 shutdowns"]);
    }
}
