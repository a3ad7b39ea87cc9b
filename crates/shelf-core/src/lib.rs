#![forbid(unsafe_code)]

//! Core: tweening, easing, stagger scheduling and pixel geometry.
//!
//! # Role in the bookshelf
//! `shelf-core` holds the renderer-independent building blocks that the
//! layout engine (`shelf-layout`) drives: time-based [`animation`] values that
//! are advanced by explicit `tick(dt)` calls, and the floating-point
//! [`geometry`] used for shelf and item bounding boxes.
//!
//! Nothing here owns a clock. The caller decides how much time passed and
//! feeds it in, which keeps every transition deterministic under test.

pub mod animation;
pub mod geometry;
