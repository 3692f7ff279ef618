//! Cancellable turn scheduler.
//!
//! Enemy turns are deferred by a short pacing delay. Instead of sleeping, the
//! controller enqueues the [`Continuation`] on a logical clock and either
//! advances the clock (tests, headless runs) or sleeps until the next task is
//! due. Ending a session cancels its pending tasks, so a stale enemy turn
//! never fires against a finished encounter.

use std::collections::BTreeMap;
use std::time::Duration;

use crawl_core::Continuation;

/// Handle returned by [`TurnScheduler::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTask {
    pub id: TaskId,
    /// Logical time at which the task fires.
    pub due: Duration,
    pub continuation: Continuation,
}

impl ScheduledTask {
    pub fn session_id(&self) -> u64 {
        self.continuation.session_id()
    }
}

/// Logical-clock queue of pending continuations.
///
/// Tasks fire in `due` order; tasks due at the same instant fire in
/// scheduling order.
#[derive(Debug, Default)]
pub struct TurnScheduler {
    now: Duration,
    next_id: u64,
    queue: BTreeMap<(Duration, TaskId), ScheduledTask>,
}

impl TurnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current logical time.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn pending(&self) -> impl Iterator<Item = &ScheduledTask> {
        self.queue.values()
    }

    /// Enqueues `continuation` to fire `delay` from now.
    pub fn schedule(&mut self, continuation: Continuation, delay: Duration) -> TaskId {
        self.next_id += 1;
        let id = TaskId(self.next_id);
        let due = self.now.saturating_add(delay);
        self.queue.insert(
            (due, id),
            ScheduledTask {
                id,
                due,
                continuation,
            },
        );
        id
    }

    /// Removes a task. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let key = self.queue.keys().find(|(_, task)| *task == id).copied();
        key.is_some_and(|key| self.queue.remove(&key).is_some())
    }

    /// Removes every task belonging to `session_id`. Returns how many were removed.
    pub fn cancel_session(&mut self, session_id: u64) -> usize {
        let before = self.queue.len();
        self.queue.retain(|_, task| task.session_id() != session_id);
        before - self.queue.len()
    }

    /// Drops every pending task.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Moves the clock forward and returns the continuations that came due.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Continuation> {
        self.now = self.now.saturating_add(elapsed);
        self.pop_due()
    }

    /// Fires everything regardless of due time, moving the clock to the last
    /// due instant. Used to flush synchronously.
    pub fn drain_all(&mut self) -> Vec<Continuation> {
        if let Some((due, _)) = self.queue.keys().next_back() {
            self.now = self.now.max(*due);
        }
        std::mem::take(&mut self.queue)
            .into_values()
            .map(|task| task.continuation)
            .collect()
    }

    /// Time remaining until the earliest task is due, if any.
    pub fn next_due(&self) -> Option<Duration> {
        self.queue
            .keys()
            .next()
            .map(|(due, _)| due.saturating_sub(self.now))
    }

    fn pop_due(&mut self) -> Vec<Continuation> {
        let mut due = Vec::new();
        while let Some(entry) = self.queue.first_entry() {
            if entry.key().0 > self.now {
                break;
            }
            due.push(entry.remove().continuation);
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy_turn(session_id: u64) -> Continuation {
        Continuation::EnemyTurn { session_id }
    }

    #[test]
    fn tasks_fire_once_their_delay_has_elapsed() {
        let mut scheduler = TurnScheduler::new();
        scheduler.schedule(enemy_turn(1), Duration::from_millis(500));

        assert!(scheduler.advance(Duration::from_millis(499)).is_empty());
        assert_eq!(scheduler.next_due(), Some(Duration::from_millis(1)));
        assert_eq!(scheduler.advance(Duration::from_millis(1)), vec![enemy_turn(1)]);
        assert!(scheduler.is_empty());
        assert_eq!(scheduler.next_due(), None);
    }

    #[test]
    fn due_order_then_scheduling_order() {
        let mut scheduler = TurnScheduler::new();
        scheduler.schedule(enemy_turn(3), Duration::from_millis(200));
        scheduler.schedule(enemy_turn(1), Duration::from_millis(100));
        scheduler.schedule(enemy_turn(2), Duration::from_millis(100));

        assert_eq!(
            scheduler.advance(Duration::from_secs(1)),
            vec![enemy_turn(1), enemy_turn(2), enemy_turn(3)]
        );
    }

    #[test]
    fn cancelled_tasks_never_fire() {
        let mut scheduler = TurnScheduler::new();
        let first = scheduler.schedule(enemy_turn(1), Duration::from_millis(100));
        scheduler.schedule(enemy_turn(2), Duration::from_millis(100));
        scheduler.schedule(enemy_turn(2), Duration::from_millis(300));

        assert!(scheduler.cancel(first));
        assert!(!scheduler.cancel(first));
        assert_eq!(scheduler.cancel_session(2), 2);
        assert!(scheduler.drain_all().is_empty());
    }

    #[test]
    fn drain_all_ignores_the_clock() {
        let mut scheduler = TurnScheduler::new();
        scheduler.schedule(enemy_turn(1), Duration::from_secs(5));

        assert_eq!(scheduler.drain_all(), vec![enemy_turn(1)]);
        assert_eq!(scheduler.now(), Duration::from_secs(5));
    }
}
