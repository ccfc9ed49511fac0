// src/ui.rs
use egui;

pub struct UiStatus<'a> {
    pub progress: f32,
    pub pass_count: u32,
    pub paused: bool,
    pub looping: bool,
    pub polygon_count: usize,
    pub point_count: usize,
    pub triangle_count: usize,
    pub last_error: Option<&'a str>,
}

pub fn build_ui(ctx: &egui::Context, status: &UiStatus) {
    egui::Window::new("Animation")
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(10.0, 10.0))
        .resizable(false)
        .show(ctx, |ui| {
            ui.vertical(|ui| {
                ui.add(egui::ProgressBar::new(status.progress).text(format!("t = {:.2}", status.progress)));
                ui.label(format!("Passes completed: {}", status.pass_count));
                ui.label(format!(
                    "{} polygons over {} shared points ({} triangles)",
                    status.polygon_count, status.point_count, status.triangle_count
                ));
                ui.label(if status.paused { "Paused" } else { "Running" });
                ui.label(if status.looping { "Looping" } else { "One shot" });
                if let Some(error) = status.last_error {
                    ui.separator();
                    ui.colored_label(egui::Color32::LIGHT_RED, error);
                }
                ui.separator();
                ui.label("Space: Pause/Resume");
                ui.label("R: Restart pass");
                ui.label("L: Toggle looping");
            });
        });
}
