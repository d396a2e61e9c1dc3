use bytemuck::{Pod, Zeroable};

/// Vertex with a position and a texture coordinate.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct TexturedVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

const fn v(position: [f32; 3], uv: [f32; 2]) -> TexturedVertex {
    TexturedVertex { position, uv }
}

pub const PYRAMID_VERTEX_COUNT: u32 = 18;

/// Square pyramid on the XZ plane: base from -1 to 1, apex at y = 1.
/// Two base triangles followed by four sides, drawn as a plain triangle list.
#[rustfmt::skip]
static PYRAMID: [TexturedVertex; PYRAMID_VERTEX_COUNT as usize] = [
    // Base
    v([-1.0, 0.0, -1.0], [0.0, 0.0]),
    v([-1.0, 0.0,  1.0], [0.0, 1.0]),
    v([ 1.0, 0.0,  1.0], [1.0, 1.0]),

    v([ 1.0, 0.0,  1.0], [1.0, 1.0]),
    v([ 1.0, 0.0, -1.0], [1.0, 0.0]),
    v([-1.0, 0.0, -1.0], [0.0, 0.0]),

    // -X side
    v([-1.0, 0.0, -1.0], [0.0, 0.0]),
    v([-1.0, 0.0,  1.0], [1.0, 0.0]),
    v([ 0.0, 1.0,  0.0], [0.5, 1.0]),

    // -Z side
    v([-1.0, 0.0, -1.0], [0.0, 0.0]),
    v([ 1.0, 0.0, -1.0], [1.0, 0.0]),
    v([ 0.0, 1.0,  0.0], [0.5, 1.0]),

    // +X side
    v([ 1.0, 0.0,  1.0], [0.0, 0.0]),
    v([ 1.0, 0.0, -1.0], [1.0, 0.0]),
    v([ 0.0, 1.0,  0.0], [0.5, 1.0]),

    // +Z side
    v([-1.0, 0.0,  1.0], [0.0, 0.0]),
    v([ 1.0, 0.0,  1.0], [1.0, 0.0]),
    v([ 0.0, 1.0,  0.0], [0.5, 1.0]),
];

pub fn pyramid_vertices() -> &'static [TexturedVertex] {
    &PYRAMID
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_triangles() {
        assert_eq!(pyramid_vertices().len(), PYRAMID_VERTEX_COUNT as usize);
        assert_eq!(pyramid_vertices().len() % 3, 0);
    }

    #[test]
    fn base_lies_on_ground_plane() {
        for vertex in &pyramid_vertices()[..6] {
            assert_eq!(vertex.position[1], 0.0);
        }
    }

    #[test]
    fn every_side_reaches_the_apex() {
        for side in pyramid_vertices()[6..].chunks(3) {
            assert_eq!(side[2].position, [0.0, 1.0, 0.0]);
            assert_eq!(side[2].uv, [0.5, 1.0]);
        }
    }

    #[test]
    fn texture_coordinates_in_unit_square() {
        for vertex in pyramid_vertices() {
            assert!(vertex.uv.iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }

    #[test]
    fn vertex_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<TexturedVertex>(), 5 * 4);
        let bytes: &[u8] = bytemuck::cast_slice(pyramid_vertices());
        assert_eq!(bytes.len(), 18 * 20);
    }
}
