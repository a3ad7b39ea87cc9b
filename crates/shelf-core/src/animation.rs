#![forbid(unsafe_code)]

//! Tick-driven animation primitives.
//!
//! Every animation here is advanced by an explicit [`Animation::tick`] with
//! the elapsed [`Duration`]; nothing reads a wall clock. The layout engine
//! owns the frame loop and decides how much time to feed in, so a whole
//! transition can be replayed deterministically in tests.
//!
//! The pieces compose:
//!
//! ```ignore
//! use std::time::Duration;
//! use shelf_core::animation::{delay, Animation, Easing, Tween};
//!
//! let mut slide = delay(
//!     Duration::from_millis(50),
//!     Tween::new(-505.0_f32, 0.0, Duration::from_millis(800)).easing(Easing::BackOut { overshoot: 1.0 }),
//! );
//! slide.tick(Duration::from_millis(16));
//! let x = slide.inner().current();
//! ```

pub mod callbacks;
pub mod group;
pub mod latch;
pub mod stagger;

pub use callbacks::{AnimationEvent, Callbacks};
pub use group::AnimationGroup;
pub use latch::CompletionLatch;
pub use stagger::{StaggerMode, stagger_offsets};

use std::f32::consts::TAU;
use std::time::Duration;

use crate::geometry::Point;

// ---------------------------------------------------------------------------
// Easing functions
// ---------------------------------------------------------------------------

/// Easing function signature: maps `t` in [0, 1] to a curve value.
///
/// Curves that overshoot (back, elastic) may leave [0, 1] in between but
/// always map 0 to 0 and 1 to 1.
pub type EasingFn = fn(f32) -> f32;

/// Identity easing (constant velocity).
#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-in.
#[inline]
pub fn ease_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Quadratic ease-out.
#[inline]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out.
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Cubic ease-in-out (the "power3" family).
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Back ease-in: pulls slightly backwards before accelerating.
#[inline]
pub fn back_in(t: f32, overshoot: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    (overshoot + 1.0) * t * t * t - overshoot * t * t
}

/// Back ease-out: overshoots the target then settles.
#[inline]
pub fn back_out(t: f32, overshoot: f32) -> f32 {
    let u = t.clamp(0.0, 1.0) - 1.0;
    1.0 + (overshoot + 1.0) * u * u * u + overshoot * u * u
}

/// Elastic ease-in with the given amplitude (clamped to >= 1) and period.
pub fn elastic_in(t: f32, amplitude: f32, period: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t <= 0.0 || t >= 1.0 {
        return t;
    }
    let amplitude = amplitude.max(1.0);
    let period = if period > 0.0 { period } else { 0.3 };
    let shift = period / TAU * (1.0 / amplitude).asin();
    let u = t - 1.0;
    -(amplitude * 2f32.powf(10.0 * u) * ((u - shift) * TAU / period).sin())
}

/// A named easing curve with its parameters.
///
/// Unlike [`EasingFn`] this can carry curve parameters and be loaded from
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    Power3InOut,
    BackIn {
        overshoot: f32,
    },
    BackOut {
        overshoot: f32,
    },
    ElasticIn {
        amplitude: f32,
        period: f32,
    },
}

impl Easing {
    /// Evaluate the curve at `t` (clamped to [0, 1]).
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Self::Linear => linear(t),
            Self::EaseIn => ease_in(t),
            Self::EaseOut => ease_out(t),
            Self::EaseInOut => ease_in_out(t),
            Self::Power3InOut => ease_in_out_cubic(t),
            Self::BackIn { overshoot } => back_in(t, overshoot),
            Self::BackOut { overshoot } => back_out(t, overshoot),
            Self::ElasticIn { amplitude, period } => elastic_in(t, amplitude, period),
        }
    }
}

// ---------------------------------------------------------------------------
// Animation trait
// ---------------------------------------------------------------------------

/// A time-based animation producing progress values in [0.0, 1.0].
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current progress, clamped to [0.0, 1.0].
    fn value(&self) -> f32;

    /// Rewind to the initial state.
    fn reset(&mut self);

    /// Time elapsed past completion, forwarded by wrappers such as
    /// [`Delayed`]. Zero for animations that have not completed.
    fn overshoot(&self) -> Duration {
        Duration::ZERO
    }
}

// ---------------------------------------------------------------------------
// Interpolation
// ---------------------------------------------------------------------------

/// Values a [`Tween`] can interpolate.
pub trait Lerp: Copy {
    /// Value at fraction `t` between `from` and `to`. `t` may leave [0, 1]
    /// for overshooting curves.
    fn lerp(from: Self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(from: Self, to: Self, t: f32) -> Self {
        from + (to - from) * t
    }
}

impl Lerp for Point {
    #[inline]
    fn lerp(from: Self, to: Self, t: f32) -> Self {
        Point::new(f32::lerp(from.x, to.x, t), f32::lerp(from.y, to.y, t))
    }
}

// ---------------------------------------------------------------------------
// Tween
// ---------------------------------------------------------------------------

/// Interpolates a value from `from` to `to` over a duration with an easing
/// curve.
///
/// Elapsed time is accumulated as a [`Duration`] so there is no float drift,
/// and [`Tween::current`] returns `to` exactly once the tween has completed.
#[derive(Debug, Clone, Copy)]
pub struct Tween<T> {
    from: T,
    to: T,
    elapsed: Duration,
    duration: Duration,
    easing: Easing,
}

impl<T: Lerp> Tween<T> {
    /// Create a linear tween. A zero duration is clamped to 1ns so the
    /// tween completes on its first tick.
    pub fn new(from: T, to: T, duration: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            easing: Easing::Linear,
        }
    }

    /// Set the easing curve (builder).
    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Start value.
    pub fn from(&self) -> T {
        self.from
    }

    /// Target value.
    pub fn to(&self) -> T {
        self.to
    }

    /// Raw linear progress, before easing.
    pub fn progress(&self) -> f32 {
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (t as f32).clamp(0.0, 1.0)
    }

    /// Interpolated value at the current time.
    pub fn current(&self) -> T {
        if self.is_complete() {
            self.to
        } else {
            T::lerp(self.from, self.to, self.easing.apply(self.progress()))
        }
    }
}

impl<T: Lerp> Animation for Tween<T> {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        self.easing.apply(self.progress()).clamp(0.0, 1.0)
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    fn overshoot(&self) -> Duration {
        self.elapsed.saturating_sub(self.duration)
    }
}

// ---------------------------------------------------------------------------
// Delayed
// ---------------------------------------------------------------------------

/// Wait for a delay, then play the inner animation.
///
/// Used for staggering: each member of a group gets its own start offset.
#[derive(Debug, Clone, Copy)]
pub struct Delayed<A> {
    delay: Duration,
    waited: Duration,
    inner: A,
    started: bool,
}

impl<A: Animation> Delayed<A> {
    pub fn new(delay: Duration, inner: A) -> Self {
        Self {
            delay,
            waited: Duration::ZERO,
            inner,
            started: delay.is_zero(),
        }
    }

    /// Whether the delay has elapsed.
    pub fn has_started(&self) -> bool {
        self.started
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }
}

impl<A: Animation> Animation for Delayed<A> {
    fn tick(&mut self, dt: Duration) {
        if self.started {
            self.inner.tick(dt);
            return;
        }
        self.waited = self.waited.saturating_add(dt);
        if self.waited >= self.delay {
            self.started = true;
            let carry = self.waited - self.delay;
            if !carry.is_zero() {
                self.inner.tick(carry);
            }
        }
    }

    fn is_complete(&self) -> bool {
        self.started && self.inner.is_complete()
    }

    fn value(&self) -> f32 {
        if self.started {
            self.inner.value()
        } else {
            0.0
        }
    }

    fn reset(&mut self) {
        self.waited = Duration::ZERO;
        self.started = self.delay.is_zero();
        self.inner.reset();
    }

    fn overshoot(&self) -> Duration {
        if self.started {
            self.inner.overshoot()
        } else {
            Duration::ZERO
        }
    }
}

/// Create a [`Delayed`] animation.
pub fn delay<A: Animation>(d: Duration, a: A) -> Delayed<A> {
    Delayed::new(d, a)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
