#![forbid(unsafe_code)]

//! Milestone events for animations, polled instead of pushed.
//!
//! [`Callbacks`] wraps an [`Animation`] and queues an [`AnimationEvent`] when
//! the wrapped animation receives its first tick and when it completes. The
//! owner drains the queue after each tick. No closures are stored, so the
//! owner can react with `&mut self` access to its own state.
//!
//! # Invariants
//!
//! 1. `Started` is queued at most once per play-through.
//! 2. `Completed` is queued at most once, on the tick where the inner
//!    animation becomes complete. An inner animation that is complete before
//!    any time passes (an empty group) completes on the first tick.
//! 3. `drain_events` empties the queue; events are never replayed.
//! 4. `reset` rearms both events.

use std::time::Duration;

use super::Animation;

/// Milestone reached by a wrapped animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEvent {
    /// First tick received.
    Started,
    /// The animation finished.
    Completed,
}

/// An animation wrapper that records milestone events.
#[derive(Debug, Clone)]
pub struct Callbacks<A> {
    inner: A,
    started: bool,
    completed: bool,
    events: Vec<AnimationEvent>,
}

impl<A: Animation> Callbacks<A> {
    #[must_use]
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            started: false,
            completed: false,
            events: Vec::new(),
        }
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// Take all queued events.
    pub fn drain_events(&mut self) -> Vec<AnimationEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether `Completed` has been queued (drained or not).
    #[must_use]
    pub fn has_completed(&self) -> bool {
        self.completed
    }
}

impl<A: Animation> Animation for Callbacks<A> {
    fn tick(&mut self, dt: Duration) {
        self.inner.tick(dt);
        if !self.started {
            self.started = true;
            self.events.push(AnimationEvent::Started);
        }
        if !self.completed && self.inner.is_complete() {
            self.completed = true;
            self.events.push(AnimationEvent::Completed);
        }
    }

    fn is_complete(&self) -> bool {
        self.inner.is_complete()
    }

    fn value(&self) -> f32 {
        self.inner.value()
    }

    fn reset(&mut self) {
        self.inner.reset();
        self.started = false;
        self.completed = false;
        self.events.clear();
    }

    fn overshoot(&self) -> Duration {
        self.inner.overshoot()
    }
}
