#![forbid(unsafe_code)]

//! Single-transition gate with cancellable timers.
//!
//! The gate is a non-reentrant lock with drop semantics: a request that
//! finds it busy is discarded, never queued. It also owns the timers a
//! transition schedules (the settle debounce) so that releasing or resetting
//! the gate cancels anything still pending.
//!
//! Timers carry a value instead of a closure. [`AnimationGate::advance`]
//! hands back the values whose delay elapsed, and the owner acts on them with
//! full access to its own state.
//!
//! # Invariants
//!
//! 1. `try_acquire` succeeds only when idle, and clears stale timers.
//! 2. `release`, `reset`, `clear_timers` and `cancel` never fail and are
//!    no-ops when there is nothing to clear.
//! 3. Fired timers are returned in the order they were scheduled when they
//!    expire on the same advance.

use std::time::Duration;

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct PendingTimer<A> {
    handle: TimerHandle,
    remaining: Duration,
    action: A,
}

/// Busy flag plus the timers registered while it is held.
#[derive(Debug, Clone)]
pub struct AnimationGate<A> {
    busy: bool,
    timers: Vec<PendingTimer<A>>,
    next_handle: u64,
}

impl<A> Default for AnimationGate<A> {
    fn default() -> Self {
        Self {
            busy: false,
            timers: Vec::new(),
            next_handle: 0,
        }
    }
}

impl<A> AnimationGate<A> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the gate. Returns `false`, changing nothing, when it is held.
    pub fn try_acquire(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        self.clear_timers();
        true
    }

    /// Give the gate back and cancel pending timers.
    pub fn release(&mut self) {
        self.busy = false;
        self.clear_timers();
    }

    /// Force the gate idle regardless of who holds it.
    pub fn reset(&mut self) {
        self.release();
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Register `action` to fire after `delay`.
    pub fn schedule(&mut self, delay: Duration, action: A) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        self.timers.push(PendingTimer {
            handle,
            remaining: delay,
            action,
        });
        handle
    }

    /// Cancel one timer. Returns whether it was still pending.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        self.timers.len() < before
    }

    /// Cancel every pending timer.
    pub fn clear_timers(&mut self) {
        self.timers.clear();
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Let `dt` pass and return the actions of every timer that expired.
    pub fn advance(&mut self, dt: Duration) -> Vec<A> {
        let mut fired = Vec::new();
        let mut kept = Vec::with_capacity(self.timers.len());
        for mut timer in self.timers.drain(..) {
            if timer.remaining <= dt {
                fired.push(timer.action);
            } else {
                timer.remaining -= dt;
                kept.push(timer);
            }
        }
        self.timers = kept;
        fired
    }
}
