//! Input layer: raw device input is translated into actions before it reaches
//! the navigation state.
//!
//! # Invariants
//! - The navigation core consumes actions and movement sets, never raw key codes.
//! - Held movement keys compose; nothing here normalizes combined motion.

pub mod action;
pub mod movement;

pub use action::{Action, InputError, Movement};
pub use movement::MovementSet;
