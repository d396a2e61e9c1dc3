//! Asset data for the pyramid viewer: the fixed textured mesh and the image
//! decoded into the pyramid's texture.
//!
//! Nothing here touches the GPU. The wgpu backend uploads what these types
//! describe.

mod mesh;
mod texture;

pub use mesh::{PYRAMID_VERTEX_COUNT, TexturedVertex, pyramid_vertices};
pub use texture::{AssetError, TextureImage};
