//! Grid domain: lattice metrics, player orientation and movement easing.

mod easing;
mod metrics;
mod orientation;


pub use easing::{EaseStep, move_towards, move_towards_vec, quad_ease_in};
pub use metrics::GridMetrics;
pub use orientation::{Orientation, OrientationError, Turn};
