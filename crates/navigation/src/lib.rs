//! Navigation state for the pyramid viewer's free-fly camera.
//!
//! Input events mutate a single [`NavigationState`]; once per frame the render
//! loop reads a view and projection matrix from it.
//!
//! # Invariants
//! - Pitch stays within `[-pitch_limit, pitch_limit]` (89 degrees by default,
//!   never above [`MAX_PITCH_LIMIT`]).
//! - Yaw stays within `[-180, 180)` degrees.
//! - Movement rate stays within `[min_movement_rate, max_movement_rate]`.
//! - `front` is a unit vector after every mutation.
//! - The first pointer sample after construction or reset only sets the
//!   baseline cursor position.

mod camera;
mod config;

pub use camera::{NavigationState, Pose};
pub use config::{ConfigError, MAX_PITCH_LIMIT, NavigationConfig};
