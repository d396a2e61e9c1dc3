//! wgpu render backend for the pyramid viewer.
//!
//! Draws one textured pyramid with a depth test. Camera matrices arrive as a
//! [`pyramid_render::RenderView`] each frame.
//!
//! # Invariants
//! - The renderer never mutates navigation state.
//! - Exactly one draw call per frame.

mod context;
mod gpu;
mod shaders;

pub use context::GpuContext;
pub use gpu::PyramidRenderer;

/// Errors from GPU setup and frame acquisition.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}
