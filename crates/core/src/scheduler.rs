//! Scheduler module - deterministic timers driven by elapsed milliseconds
//!
//! The engine owns three timers:
//!
//! - [`TimerKind::Drop`]: periodic gravity
//! - [`TimerKind::LockGrace`]: one-shot grace window before a blocked piece locks
//! - [`TimerKind::ClearAnimation`]: one-shot delay before highlighted rows are removed
//!
//! Time only moves through [`Scheduler::pop_due`], which hands back due timers
//! one at a time in time order. The engine handles each one before asking for
//! the next, so every callback runs on the same logical queue.

/// Timers the engine can arm.
///
/// Declaration order is the tie-break when several timers are due at the same
/// instant: a finishing clear animation runs before a lock, which runs before gravity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerKind {
    ClearAnimation,
    LockGrace,
    Drop,
}

impl TimerKind {
    const COUNT: usize = 3;

    const ALL: [TimerKind; Self::COUNT] = [
        TimerKind::ClearAnimation,
        TimerKind::LockGrace,
        TimerKind::Drop,
    ];

    fn slot(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Timer {
    remaining_ms: u32,
    /// `Some` for periodic timers.
    period_ms: Option<u32>,
}

/// Fixed set of cancelable timers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scheduler {
    timers: [Option<Timer>; TimerKind::COUNT],
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a periodic timer; the first firing is one full period away.
    ///
    /// A zero period is clamped to 1ms so the timer always makes progress.
    pub fn start_periodic(&mut self, kind: TimerKind, period_ms: u32) {
        let period_ms = period_ms.max(1);
        self.timers[kind.slot()] = Some(Timer {
            remaining_ms: period_ms,
            period_ms: Some(period_ms),
        });
    }

    /// Arm a one-shot timer, replacing any pending one of the same kind.
    pub fn start_once(&mut self, kind: TimerKind, delay_ms: u32) {
        self.timers[kind.slot()] = Some(Timer {
            remaining_ms: delay_ms,
            period_ms: None,
        });
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.timers[kind.slot()] = None;
    }

    pub fn cancel_all(&mut self) {
        self.timers = [None; TimerKind::COUNT];
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.timers[kind.slot()].is_some()
    }

    /// Milliseconds until `kind` fires, if armed.
    pub fn remaining_ms(&self, kind: TimerKind) -> Option<u32> {
        self.timers[kind.slot()].map(|t| t.remaining_ms)
    }

    /// Pop the earliest timer due within `budget_ms`.
    ///
    /// On `Some`, time advanced up to that timer and the consumed amount was
    /// subtracted from `budget_ms`. Periodic timers re-arm, one-shots disarm.
    /// On `None`, nothing was due: every armed timer advanced by the whole
    /// budget and `budget_ms` is now 0.
    pub fn pop_due(&mut self, budget_ms: &mut u32) -> Option<TimerKind> {
        let next = TimerKind::ALL
            .iter()
            .filter_map(|&kind| self.timers[kind.slot()].map(|t| (t.remaining_ms, kind)))
            .min();

        match next {
            Some((remaining, kind)) if remaining <= *budget_ms => {
                self.elapse(remaining);
                *budget_ms -= remaining;

                let slot = &mut self.timers[kind.slot()];
                *slot = slot.and_then(|t| {
                    t.period_ms.map(|period| Timer {
                        remaining_ms: period,
                        period_ms: Some(period),
                    })
                });
                Some(kind)
            }
            _ => {
                self.elapse(*budget_ms);
                *budget_ms = 0;
                None
            }
        }
    }

    fn elapse(&mut self, ms: u32) {
        for timer in self.timers.iter_mut().flatten() {
            timer.remaining_ms = timer.remaining_ms.saturating_sub(ms);
        }
    }
}
