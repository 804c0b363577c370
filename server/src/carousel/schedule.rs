//! Timer scheduling seam and a virtual-clock implementation

use std::collections::BTreeMap;
use std::time::Duration;

/// Which of the carousel's two timers a handle belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Advance,
    Resume,
}

/// Identity of one scheduled callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    id: u64,
    kind: TimerKind,
}

impl TimerHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> TimerKind {
        self.kind
    }
}

/// Capability to schedule and cancel timer callbacks.
///
/// Firing is reported back to the owner of the scheduler, which passes the
/// handle to `Carousel::on_timer`.
pub trait Scheduler {
    /// Fire `kind` every `period`, first after one period.
    fn schedule_repeating(&mut self, kind: TimerKind, period: Duration) -> TimerHandle;

    /// Fire `kind` once after `delay`.
    fn schedule_once(&mut self, kind: TimerKind, delay: Duration) -> TimerHandle;

    /// Cancel a timer. Unknown or already-fired handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    kind: TimerKind,
    deadline: Duration,
    period: Option<Duration>,
}

/// Timers ordered on a virtual clock measured from an arbitrary origin.
///
/// Nothing fires on its own: the owner moves the clock with `pop_due` and
/// `set_now`. Tests use it as a fake clock; the driver maps it onto
/// `tokio::time`.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<u64, PendingTimer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position of the virtual clock
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move the clock forward. Moving it backwards is ignored.
    pub fn set_now(&mut self, now: Duration) {
        if now > self.now {
            self.now = now;
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.contains_key(&handle.id)
    }

    /// Number of live timers of one kind
    pub fn count(&self, kind: TimerKind) -> usize {
        self.pending.values().filter(|t| t.kind == kind).count()
    }

    /// Next firing time of a live timer
    pub fn deadline(&self, handle: TimerHandle) -> Option<Duration> {
        self.pending.get(&handle.id).map(|t| t.deadline)
    }

    /// Earliest deadline among all live timers
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.values().map(|t| t.deadline).min()
    }

    /// Take the earliest timer due at or before `until`.
    ///
    /// The clock moves to that timer's deadline. One-shot timers are removed;
    /// repeating timers keep their handle and are re-armed one period later.
    /// Ties fire in scheduling order.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerHandle> {
        let (id, timer) = self
            .pending
            .iter()
            .filter(|(_, t)| t.deadline <= until)
            .min_by_key(|(id, t)| (t.deadline, **id))
            .map(|(id, t)| (*id, *t))?;

        self.set_now(timer.deadline);
        match timer.period {
            Some(period) => {
                if let Some(entry) = self.pending.get_mut(&id) {
                    entry.deadline = timer.deadline + period;
                }
            }
            None => {
                self.pending.remove(&id);
            }
        }

        Some(TimerHandle {
            id,
            kind: timer.kind,
        })
    }

    /// Drop the ticks a repeating timer missed while its owner was not
    /// polling, the way a browser interval does.
    ///
    /// A repeating timer more than one period behind `now` is moved to its
    /// latest tick at or before `now`, so it fires once and keeps its cadence.
    /// Returns the number of ticks skipped.
    pub fn skip_missed_ticks(&mut self, now: Duration) -> u64 {
        let mut skipped = 0;
        for timer in self.pending.values_mut() {
            let Some(period) = timer.period else {
                continue;
            };
            if timer.deadline + period > now {
                continue;
            }
            let behind = (now - timer.deadline).as_nanos() / period.as_nanos();
            let ticks = u32::try_from(behind).unwrap_or(u32::MAX);
            timer.deadline += period * ticks;
            skipped += u64::from(ticks);
        }
        skipped
    }

    fn insert(
        &mut self,
        kind: TimerKind,
        delay: Duration,
        period: Option<Duration>,
    ) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.insert(
            id,
            PendingTimer {
                kind,
                deadline: self.now + delay,
                period,
            },
        );
        TimerHandle { id, kind }
    }
}

impl Scheduler for TimerQueue {
    fn schedule_repeating(&mut self, kind: TimerKind, period: Duration) -> TimerHandle {
        // A zero period would make pop_due spin forever.
        let period = period.max(Duration::from_millis(1));
        self.insert(kind, period, Some(period))
    }

    fn schedule_once(&mut self, kind: TimerKind, delay: Duration) -> TimerHandle {
        self.insert(kind, delay, None)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.remove(&handle.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_once_fires_at_deadline_and_is_removed() {
        let mut queue = TimerQueue::new();
        let handle = queue.schedule_once(TimerKind::Resume, ms(3000));

        assert_eq!(queue.pop_due(ms(2999)), None);
        assert_eq!(queue.pop_due(ms(3000)), Some(handle));
        assert_eq!(queue.now(), ms(3000));
        assert!(!queue.is_pending(handle));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_repeating_keeps_handle_and_rearms() {
        let mut queue = TimerQueue::new();
        let handle = queue.schedule_repeating(TimerKind::Advance, ms(3000));

        assert_eq!(queue.pop_due(ms(10_000)), Some(handle));
        assert_eq!(queue.deadline(handle), Some(ms(6000)));
        assert_eq!(queue.pop_due(ms(10_000)), Some(handle));
        assert_eq!(queue.pop_due(ms(10_000)), Some(handle));
        assert_eq!(queue.pop_due(ms(10_000)), None);
        assert_eq!(queue.now(), ms(9000));
    }

    #[test]
    fn test_earliest_deadline_first_then_scheduling_order() {
        let mut queue = TimerQueue::new();
        let late = queue.schedule_once(TimerKind::Resume, ms(200));
        let first = queue.schedule_once(TimerKind::Advance, ms(100));
        let second = queue.schedule_once(TimerKind::Resume, ms(100));

        assert_eq!(queue.next_deadline(), Some(ms(100)));
        assert_eq!(queue.pop_due(ms(500)), Some(first));
        assert_eq!(queue.pop_due(ms(500)), Some(second));
        assert_eq!(queue.pop_due(ms(500)), Some(late));
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut queue = TimerQueue::new();
        let handle = queue.schedule_once(TimerKind::Resume, ms(10));

        queue.cancel(handle);
        queue.cancel(handle);

        assert!(queue.is_empty());
        assert_eq!(queue.pop_due(ms(100)), None);
    }

    #[test]
    fn test_deadlines_are_relative_to_current_clock() {
        let mut queue = TimerQueue::new();
        queue.set_now(ms(1000));
        let handle = queue.schedule_once(TimerKind::Resume, ms(500));
        assert_eq!(queue.deadline(handle), Some(ms(1500)));

        queue.set_now(ms(10));
        assert_eq!(queue.now(), ms(1000));
    }

    #[test]
    fn test_skip_missed_ticks_fires_once_on_cadence() {
        let mut queue = TimerQueue::new();
        let handle = queue.schedule_repeating(TimerKind::Advance, ms(3000));
        let once = queue.schedule_once(TimerKind::Resume, ms(1000));

        assert_eq!(queue.skip_missed_ticks(ms(10_000)), 2);
        assert_eq!(queue.deadline(handle), Some(ms(9000)));
        assert_eq!(queue.deadline(once), Some(ms(1000)));

        assert_eq!(queue.pop_due(ms(10_000)), Some(once));
        assert_eq!(queue.pop_due(ms(10_000)), Some(handle));
        assert_eq!(queue.pop_due(ms(10_000)), None);
        assert_eq!(queue.deadline(handle), Some(ms(12_000)));
    }

    #[test]
    fn test_skip_missed_ticks_leaves_on_time_timers() {
        let mut queue = TimerQueue::new();
        let handle = queue.schedule_repeating(TimerKind::Advance, ms(3000));

        assert_eq!(queue.skip_missed_ticks(ms(5999)), 0);
        assert_eq!(queue.deadline(handle), Some(ms(3000)));
    }

    #[test]
    fn test_count_by_kind() {
        let mut queue = TimerQueue::new();
        queue.schedule_repeating(TimerKind::Advance, ms(10));
        queue.schedule_once(TimerKind::Resume, ms(10));
        queue.schedule_once(TimerKind::Resume, ms(20));

        assert_eq!(queue.count(TimerKind::Advance), 1);
        assert_eq!(queue.count(TimerKind::Resume), 2);
        assert_eq!(queue.len(), 3);
    }
}
