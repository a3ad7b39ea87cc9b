#![forbid(unsafe_code)]

//! Keyed animation groups: one lifecycle for many members.
//!
//! An [`AnimationGroup`] holds one animation per key (a shelf index, an item
//! id) and ticks them together. The group itself implements [`Animation`]:
//! it is complete when every member is, and its value is the mean progress.
//!
//! # Invariants
//!
//! 1. Keys are unique; inserting an existing key replaces its animation in
//!    place, keeping insertion order.
//! 2. An empty group is immediately complete with progress 0.0.
//! 3. Completed members are not ticked again.

use std::time::Duration;

use super::Animation;

/// A collection of animations addressed by key.
#[derive(Debug, Clone)]
pub struct AnimationGroup<K, A> {
    members: Vec<(K, A)>,
}

impl<K, A> Default for AnimationGroup<K, A> {
    fn default() -> Self {
        Self {
            members: Vec::new(),
        }
    }
}

impl<K: PartialEq, A: Animation> AnimationGroup<K, A> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: K, animation: A) -> Self {
        self.insert(key, animation);
        self
    }

    /// Add or replace the animation for `key`.
    pub fn insert(&mut self, key: K, animation: A) {
        match self.members.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = animation,
            None => self.members.push((key, animation)),
        }
    }

    /// Remove the animation for `key`. Returns whether it existed.
    pub fn remove(&mut self, key: &K) -> bool {
        let before = self.members.len();
        self.members.retain(|(k, _)| k != key);
        self.members.len() < before
    }

    /// Drop every member.
    pub fn clear(&mut self) {
        self.members.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<&A> {
        self.members.iter().find(|(k, _)| k == key).map(|(_, a)| a)
    }

    /// Whether every member has finished.
    #[must_use]
    pub fn all_complete(&self) -> bool {
        self.members.iter().all(|(_, a)| a.is_complete())
    }

    /// Mean progress of all members, 0.0 when empty.
    #[must_use]
    pub fn overall_progress(&self) -> f32 {
        if self.members.is_empty() {
            return 0.0;
        }
        let sum: f32 = self.members.iter().map(|(_, a)| a.value()).sum();
        sum / self.members.len() as f32
    }

    /// Members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &A)> {
        self.members.iter().map(|(k, a)| (k, a))
    }
}

impl<K: PartialEq, A: Animation> Animation for AnimationGroup<K, A> {
    fn tick(&mut self, dt: Duration) {
        for (_, animation) in &mut self.members {
            if !animation.is_complete() {
                animation.tick(dt);
            }
        }
    }

    fn is_complete(&self) -> bool {
        self.all_complete()
    }

    fn value(&self) -> f32 {
        self.overall_progress()
    }

    fn reset(&mut self) {
        for (_, animation) in &mut self.members {
            animation.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Tween;

    const MS_100: Duration = Duration::from_millis(100);
    const MS_200: Duration = Duration::from_millis(200);
    const SEC_1: Duration = Duration::from_secs(1);

    fn tween(d: Duration) -> Tween<f32> {
        Tween::new(0.0, 1.0, d)
    }

    #[test]
    fn empty_group_is_complete() {
        let group: AnimationGroup<usize, Tween<f32>> = AnimationGroup::new();
        assert!(group.is_empty());
        assert!(group.is_complete());
        assert_eq!(group.overall_progress(), 0.0);
    }

    #[test]
    fn completes_when_slowest_member_does() {
        let mut group = AnimationGroup::new().with(0, tween(MS_100)).with(1, tween(MS_200));
        group.tick(MS_100);
        assert!(group.get(&0).is_some_and(|a| a.is_complete()));
        assert!(!group.is_complete());
        group.tick(MS_100);
        assert!(group.is_complete());
    }

    #[test]
    fn mean_progress() {
        let mut group = AnimationGroup::new().with("a", tween(MS_200)).with("b", tween(SEC_1));
        group.tick(MS_200);
        assert!((group.overall_progress() - 0.6).abs() < 0.01);
        assert!((group.value() - group.overall_progress()).abs() < f32::EPSILON);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut group = AnimationGroup::new().with(3, tween(MS_100)).with(7, tween(MS_100));
        group.insert(3, tween(SEC_1));
        assert_eq!(group.len(), 2);
        let keys: Vec<_> = group.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![3, 7]);
        group.tick(MS_100);
        assert!(!group.is_complete());
    }

    #[test]
    fn remove_and_clear() {
        let mut group = AnimationGroup::new().with(1, tween(MS_100)).with(2, tween(MS_100));
        assert!(group.remove(&1));
        assert!(!group.remove(&1));
        assert_eq!(group.len(), 1);
        group.clear();
        assert!(group.is_empty());
    }

    #[test]
    fn reset_rewinds_members() {
        let mut group = AnimationGroup::new().with(0, tween(MS_100));
        group.tick(MS_100);
        assert!(group.is_complete());
        group.reset();
        assert!(!group.is_complete());
    }
}
