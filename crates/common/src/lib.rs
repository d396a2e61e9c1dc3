//! Shared types used across the pyramid viewer crates.

mod types;

pub use types::Transform;
