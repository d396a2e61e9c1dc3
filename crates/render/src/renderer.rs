use glam::{Mat4, Vec3};
use pyramid_common::Transform;
use pyramid_navigation::NavigationState;

/// Matrices and camera placement for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Camera look direction.
    pub front: Vec3,
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
}

impl RenderView {
    /// Build the frame's matrices from the current navigation state.
    pub fn capture(navigation: &NavigationState, model: &Transform, aspect: f32) -> Self {
        Self {
            eye: navigation.position(),
            front: navigation.front(),
            model: model.to_matrix(),
            view: navigation.view_matrix(),
            projection: navigation.projection_matrix(aspect),
        }
    }

    pub fn model_view_projection(&self) -> Mat4 {
        self.projection * self.view * self.model
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the navigation state and a captured view, then produces
/// output. It never moves the camera.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&self, navigation: &NavigationState, view: &RenderView) -> Self::Output;
}

/// Text renderer for the CLI and logs.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

fn push_matrix(out: &mut String, name: &str, m: &Mat4) {
    out.push_str(&format!("{name}:\n"));
    // Row-major for reading; glam stores columns.
    let rows = m.transpose().to_cols_array_2d();
    for row in rows {
        out.push_str(&format!(
            "  [{:>9.4} {:>9.4} {:>9.4} {:>9.4}]\n",
            row[0], row[1], row[2], row[3]
        ));
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, navigation: &NavigationState, view: &RenderView) -> String {
        let pose = navigation.pose();
        let mut out = String::new();
        out.push_str(&format!(
            "=== Camera (yaw={:.1}, pitch={:.1}, speed={:.1}, fov={:.0}) ===\n",
            pose.yaw, pose.pitch, pose.movement_rate, pose.fov_degrees
        ));
        out.push_str(&format!(
            "eye=({:.3}, {:.3}, {:.3}) front=({:.3}, {:.3}, {:.3})\n",
            view.eye.x, view.eye.y, view.eye.z, view.front.x, view.front.y, view.front.z
        ));
        push_matrix(&mut out, "view", &view.view);
        push_matrix(&mut out, "projection", &view.projection);
        out
    }
}
