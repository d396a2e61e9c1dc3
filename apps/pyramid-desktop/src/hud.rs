use crate::keymap;
use egui::Context as EguiContext;
use pyramid_navigation::Pose;
use pyramid_render_wgpu::GpuContext;
use winit::event::WindowEvent;
use winit::window::Window;

/// egui overlay showing the camera pose.
pub struct Hud {
    ctx: EguiContext,
    winit_state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

impl Hud {
    pub fn new(window: &Window, gpu: &GpuContext) -> Self {
        let ctx = EguiContext::default();
        let winit_state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let renderer = egui_wgpu::Renderer::new(&gpu.device, gpu.surface_format(), None, 1, false);
        Self {
            ctx,
            winit_state,
            renderer,
        }
    }

    /// Forward a window event to egui. Returns true if egui consumed it.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.winit_state.on_window_event(window, event).consumed
    }

    /// Paint the overlay on top of `target`.
    pub fn draw(
        &mut self,
        window: &Window,
        gpu: &GpuContext,
        target: &wgpu::TextureView,
        pose: &Pose,
    ) {
        let raw_input = self.winit_state.take_egui_input(window);
        let full_output = self.ctx.run(raw_input, |ctx| {
            egui::Window::new("Navigation")
                .resizable(false)
                .default_pos([12.0, 12.0])
                .show(ctx, |ui| {
                    ui.label(format!(
                        "Position: ({:.2}, {:.2}, {:.2})",
                        pose.position.x, pose.position.y, pose.position.z
                    ));
                    ui.label(format!(
                        "Front: ({:.2}, {:.2}, {:.2})",
                        pose.front.x, pose.front.y, pose.front.z
                    ));
                    ui.label(format!("Yaw: {:.1}  Pitch: {:.1}", pose.yaw, pose.pitch));
                    ui.label(format!("Speed: {:.1} units/s", pose.movement_rate));
                    ui.separator();
                    ui.small(keymap::HELP);
                });
        });

        self.winit_state
            .handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let (width, height) = gpu.size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer
                .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("hud_encoder"),
            });
        self.renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("hud_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: target,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));

        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}
