#![forbid(unsafe_code)]

//! Stagger offsets: per-member start delays for cascading animations.
//!
//! A shelf split or an item reflow starts each member slightly after the
//! previous one. [`stagger_offsets`] computes those start delays; the caller
//! wraps each member's tween in a [`Delayed`](super::Delayed) with its offset.
//!
//! # Invariants
//!
//! 1. `stagger_offsets(0, ..)` is empty.
//! 2. The first offset is always `Duration::ZERO`.
//! 3. Offsets never decrease.
//! 4. For `Linear`, `offset[i] == i * step` exactly (integer arithmetic).
//! 5. For eased modes the span is `(count - 1) * step`, distributed along the
//!    curve.

use std::time::Duration;

use super::{EasingFn, ease_in, ease_in_out, ease_out};

/// How start delays are spread across members.
#[derive(Debug, Clone, Copy)]
pub enum StaggerMode {
    /// Equal spacing.
    Linear,
    /// Gaps grow towards the end.
    EaseIn,
    /// Gaps shrink towards the end.
    EaseOut,
    /// Tight at both ends, wide in the middle.
    EaseInOut,
    /// Any monotone curve over normalized position.
    Custom(EasingFn),
}

/// Start delay for each of `count` members, `step` apart on average.
#[must_use]
pub fn stagger_offsets(count: usize, step: Duration, mode: StaggerMode) -> Vec<Duration> {
    match count {
        0 => return Vec::new(),
        1 => return vec![Duration::ZERO],
        _ => {}
    }

    let curve: EasingFn = match mode {
        StaggerMode::Linear => {
            return (0..count)
                .map(|i| step.saturating_mul(u32::try_from(i).unwrap_or(u32::MAX)))
                .collect();
        }
        StaggerMode::EaseIn => ease_in,
        StaggerMode::EaseOut => ease_out,
        StaggerMode::EaseInOut => ease_in_out,
        StaggerMode::Custom(f) => f,
    };

    let span_nanos = step.as_nanos() as f64 * (count - 1) as f64;
    let last = (count - 1) as f32;
    (0..count)
        .map(|i| {
            let eased = curve(i as f32 / last).clamp(0.0, 1.0);
            Duration::from_nanos((span_nanos * f64::from(eased)) as u64)
        })
        .collect()
}

/// Total time until the last staggered member finishes.
#[must_use]
pub fn staggered_span(count: usize, step: Duration, duration: Duration) -> Duration {
    if count == 0 {
        return Duration::ZERO;
    }
    step.saturating_mul(u32::try_from(count - 1).unwrap_or(u32::MAX))
        .saturating_add(duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_20: Duration = Duration::from_millis(20);
    const MS_50: Duration = Duration::from_millis(50);

    #[test]
    fn empty_and_single() {
        assert!(stagger_offsets(0, MS_50, StaggerMode::Linear).is_empty());
        assert_eq!(
            stagger_offsets(1, MS_50, StaggerMode::EaseIn),
            vec![Duration::ZERO]
        );
    }

    #[test]
    fn linear_is_exact() {
        let offsets = stagger_offsets(4, MS_50, StaggerMode::Linear);
        assert_eq!(
            offsets,
            vec![
                Duration::ZERO,
                MS_50,
                Duration::from_millis(100),
                Duration::from_millis(150)
            ]
        );
    }

    #[test]
    fn eased_modes_share_span_and_order() {
        for mode in [
            StaggerMode::EaseIn,
            StaggerMode::EaseOut,
            StaggerMode::EaseInOut,
        ] {
            let offsets = stagger_offsets(6, MS_20, mode);
            assert_eq!(offsets[0], Duration::ZERO);
            assert_eq!(offsets[5], Duration::from_millis(100));
            for w in offsets.windows(2) {
                assert!(w[1] >= w[0], "{mode:?} not monotone: {offsets:?}");
            }
        }
    }

    #[test]
    fn ease_in_gaps_grow() {
        let offsets = stagger_offsets(5, MS_50, StaggerMode::EaseIn);
        let gaps: Vec<Duration> = offsets.windows(2).map(|w| w[1] - w[0]).collect();
        for g in gaps.windows(2) {
            assert!(g[1] >= g[0], "{gaps:?}");
        }
    }

    #[test]
    fn zero_step_means_simultaneous() {
        let offsets = stagger_offsets(3, Duration::ZERO, StaggerMode::Linear);
        assert!(offsets.iter().all(Duration::is_zero));
    }

    #[test]
    fn span_covers_last_member() {
        assert_eq!(
            staggered_span(10, MS_20, Duration::from_millis(100)),
            Duration::from_millis(280)
        );
        assert_eq!(staggered_span(0, MS_20, MS_50), Duration::ZERO);
    }
}
