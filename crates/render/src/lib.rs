//! Rendering adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers never mutate navigation state.
//! - A [`RenderView`] is captured fresh every frame; nothing caches matrices
//!   across frames.

mod renderer;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};

pub fn crate_info() -> String {
    format!("pyramid-render v{}", env!("CARGO_PKG_VERSION"))
}
