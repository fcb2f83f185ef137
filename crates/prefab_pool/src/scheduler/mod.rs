//! Deferred task scheduling
//!
//! A single-threaded queue of tasks that become due after a delay measured
//! on the scheduler's own clock. Nothing sleeps: the owner advances the
//! clock once per frame and drains whatever has come due.
//!
//! ```text
//! schedule(delay, task) ──► pending (due = now + delay)
//!                                │
//!         advance(dt) ──► now += dt
//!                                │
//!         take_due() ◄── due <= now, ordered by (due, insertion)
//! ```

/// Identifier returned for every scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

/// Work the pool registry defers to a later frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolTask<P, I> {
    /// Return an outstanding instance to its pool
    Release(I),
    /// Run the next culling check for a prefab's pool
    ///
    /// The pool only honours the cull whose task id it is waiting on.
    Cull(P),
}

#[derive(Debug)]
struct Scheduled<T> {
    due: f64,
    id: TaskId,
    task: T,
}

/// Clock-driven deferred task queue
#[derive(Debug)]
pub struct Scheduler<T> {
    current_time: f64,
    next_id: u64,
    pending: Vec<Scheduled<T>>,
}

impl<T> Scheduler<T> {
    /// Create an empty scheduler starting at time zero
    pub fn new() -> Self {
        Self {
            current_time: 0.0,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Current scheduler time in seconds
    pub fn now(&self) -> f64 {
        self.current_time
    }

    /// Schedule `task` to become due `delay` seconds from now
    ///
    /// Negative or non-finite delays are treated as zero.
    pub fn schedule(&mut self, delay: f64, task: T) -> TaskId {
        let delay = if delay.is_finite() { delay.max(0.0) } else { 0.0 };
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending.push(Scheduled {
            due: self.current_time + delay,
            id,
            task,
        });
        id
    }

    /// Move the clock forward
    pub fn advance(&mut self, delta_time: f64) {
        if delta_time.is_finite() && delta_time > 0.0 {
            self.current_time += delta_time;
        }
    }

    /// Remove and return every task due at the current time, with its id
    ///
    /// Earlier due times come first; equal due times keep scheduling order.
    pub fn take_due(&mut self) -> Vec<(TaskId, T)> {
        let now = self.current_time;
        let (mut due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|scheduled| scheduled.due <= now);
        self.pending = waiting;

        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.id.cmp(&b.id)));
        due.into_iter().map(|scheduled| (scheduled.id, scheduled.task)).collect()
    }

    /// Number of tasks still waiting
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Whether no tasks are waiting
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Time remaining until the earliest pending task, if any
    pub fn time_until_next(&self) -> Option<f64> {
        self.pending
            .iter()
            .map(|scheduled| (scheduled.due - self.current_time).max(0.0))
            .min_by(f64::total_cmp)
    }

    /// Drop every pending task
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
