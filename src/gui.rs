use atom_model::Isotope;
use egui::{Align2, Color32, Context, FontId, LayerId, Pos2, RichText};
use egui_wgpu::Renderer;
use egui_winit::State;
use wgpu::{Device, TextureFormat};
use winit::{event::WindowEvent, window::Window};

/// Text anchored to a projected scene point, in egui points
pub struct ScreenLabel {
    pub position: Pos2,
    pub text: String,
}

pub struct UiState {
    pub fps: f32,
    pub frame_time: f32,
    pub isotope: Isotope,
    /// Mass number picked in the selector, consumed by the next frame
    pub requested_isotope: Option<u32>,
    pub show_orbits: bool,
    pub show_labels: bool,
    pub time_scale: f32,
    pub is_paused: bool,
    pub reset_camera: bool,
    pub labels: Vec<ScreenLabel>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time: 0.0,
            isotope: Isotope::default(),
            requested_isotope: None,
            show_orbits: true,
            show_labels: true,
            time_scale: 1.0,
            is_paused: false,
            reset_camera: false,
            labels: Vec::new(),
        }
    }
}

pub struct Gui {
    context: Context,
    state: State,
    renderer: Renderer,
}

impl Gui {
    pub fn new(device: &Device, output_color_format: TextureFormat, window: &Window) -> Self {
        let context = Context::default();
        let id = context.viewport_id();

        let state = State::new(
            context.clone(),
            id,
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(device.limits().max_texture_dimension_2d as usize),
        );

        let renderer = Renderer::new(
            device,
            output_color_format,
            egui_wgpu::RendererOptions {
                msaa_samples: 1,
                depth_stencil_format: None,
                dithering: false,
                ..Default::default()
            },
        );

        Self {
            context,
            state,
            renderer,
        }
    }

    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        let response = self.state.on_window_event(window, event);
        response.consumed
    }

    pub fn render(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        window: &Window,
        view: &wgpu::TextureView,
        ui_state: &mut UiState,
    ) {
        let raw_input = self.state.take_egui_input(window);

        let full_output = self.context.run(raw_input, |ctx| {
            Self::ui(ctx, ui_state);
        });

        self.state
            .handle_platform_output(window, full_output.platform_output);

        let clipped_primitives = self
            .context
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let size = window.inner_size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [size.width, size.height],
            pixels_per_point: window.scale_factor() as f32,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.renderer.update_buffers(
            device,
            queue,
            encoder,
            &clipped_primitives,
            &screen_descriptor,
        );

        let mut render_pass = encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            })
            .forget_lifetime();

        self.renderer
            .render(&mut render_pass, &clipped_primitives, &screen_descriptor);
        drop(render_pass);

        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }

    fn ui(ctx: &Context, state: &mut UiState) {
        egui::Area::new(egui::Id::new("title"))
            .anchor(Align2::CENTER_TOP, [0.0, 10.0])
            .interactable(false)
            .show(ctx, |ui| {
                ui.label(
                    RichText::new("Carbon Atom")
                        .size(32.0)
                        .color(Color32::WHITE),
                );
            });

        // Diagnostics Panel (Top Left)
        egui::Window::new("Diagnostics")
            .anchor(Align2::LEFT_TOP, [10.0, 10.0])
            .resizable(false)
            .collapsible(true)
            .show(ctx, |ui| {
                ui.label(format!("FPS: {:.1}", state.fps));
                ui.label(format!("Frame Time: {:.2} ms", state.frame_time));
            });

        // Isotope Panel (Top Right)
        egui::Window::new("Isotope")
            .anchor(Align2::RIGHT_TOP, [-10.0, 10.0])
            .resizable(false)
            .collapsible(true)
            .show(ctx, |ui| {
                let mut selected = state.isotope;
                egui::ComboBox::from_id_salt("isotope")
                    .selected_text(selected.to_string())
                    .show_ui(ui, |ui| {
                        for isotope in Isotope::ALL {
                            ui.selectable_value(&mut selected, isotope, isotope.to_string());
                        }
                    });
                if selected != state.isotope {
                    state.requested_isotope = Some(selected.mass_number());
                }

                ui.separator();
                ui.label(format!("Protons: {}", state.isotope.proton_count()));
                ui.label(format!("Neutrons: {}", state.isotope.neutron_count()));
                ui.label(format!("Electrons: {}", atom_model::CARBON_ELECTRONS.len()));
            });

        // Display Controls (Bottom Left)
        egui::Window::new("Display")
            .anchor(Align2::LEFT_BOTTOM, [10.0, -10.0])
            .resizable(false)
            .collapsible(true)
            .show(ctx, |ui| {
                ui.checkbox(&mut state.show_orbits, "Show Orbits");
                ui.checkbox(&mut state.show_labels, "Show Labels");
                ui.separator();
                ui.add(egui::Slider::new(&mut state.time_scale, 0.0..=4.0).text("Time Scale"));
                ui.checkbox(&mut state.is_paused, "Paused");
                if ui.button("Reset Camera").clicked() {
                    state.reset_camera = true;
                }
            });

        let painter = ctx.layer_painter(LayerId::background());
        for label in &state.labels {
            painter.text(
                label.position,
                Align2::LEFT_BOTTOM,
                &label.text,
                FontId::proportional(14.0),
                Color32::WHITE,
            );
        }
    }
}
