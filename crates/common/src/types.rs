use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Spatial transform: position, rotation, scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Placement of the pyramid in the world: pushed one unit towards the
    /// viewer and shrunk to 70%.
    pub fn pyramid() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 1.0),
            rotation: Quat::IDENTITY,
            scale: Vec3::splat(0.7),
        }
    }

    /// Model matrix, applied as scale, then rotation, then translation.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Quat::IDENTITY);
        assert_eq!(t.scale, Vec3::ONE);
        assert_eq!(t.to_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn pyramid_transform_scales_then_translates() {
        let m = Transform::pyramid().to_matrix();
        let apex = m.transform_point3(Vec3::new(0.0, 1.0, 0.0));
        assert!((apex - Vec3::new(0.0, 0.7, 1.0)).length() < 1e-6);

        let corner = m.transform_point3(Vec3::new(-1.0, 0.0, -1.0));
        assert!((corner - Vec3::new(-0.7, 0.0, 0.3)).length() < 1e-6);
    }
}
