/*
 * UI Module
 *
 * This module builds the egui control panel. It edits a copy of the
 * simulation parameters; the caller decides whether to apply the copy.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::{SimulationParams, UpdateOrder};

// What the user asked for this frame
#[derive(Debug, Default)]
pub struct UiResponse {
    pub params_changed: bool,
    pub reset: bool,
    pub quit: bool,
}

// Update the UI, editing `params` in place
pub fn update_ui(egui: &mut Egui, params: &mut SimulationParams, debug_info: &DebugInfo) -> UiResponse {
    let mut response = UiResponse::default();

    // Snapshot for change detection
    let before = params.clone();

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Boid Parameters", |ui| {
                ui.add(egui::Slider::new(&mut params.boids_num, SimulationParams::ui_boids_num_range()).text("Number of Boids"));
                ui.add(egui::Slider::new(&mut params.max_speed, SimulationParams::max_speed_range()).text("Max Speed"));
                ui.add(egui::Slider::new(&mut params.delta_time, SimulationParams::delta_time_range()).text("Delta Time"));

                if ui.button("Reset Boids").clicked() {
                    response.reset = true;
                }
            });

            ui.collapsing("Flocking Behavior", |ui| {
                ui.add(egui::Slider::new(&mut params.separation.scalar, SimulationParams::scalar_range()).text("Separation Scalar"));
                ui.add(egui::Slider::new(&mut params.alignment.scalar, SimulationParams::scalar_range()).text("Alignment Scalar"));
                ui.add(egui::Slider::new(&mut params.cohesion.scalar, SimulationParams::scalar_range()).text("Cohesion Scalar"));
                ui.add(egui::Slider::new(&mut params.separation.radius, SimulationParams::radius_range()).text("Separation Radius"));
                ui.add(egui::Slider::new(&mut params.alignment.radius, SimulationParams::radius_range()).text("Alignment Radius"));
                ui.add(egui::Slider::new(&mut params.cohesion.radius, SimulationParams::radius_range()).text("Cohesion Radius"));

                ui.checkbox(&mut params.smooth, "Smooth Radius Falloff");

                ui.horizontal(|ui| {
                    ui.label("Update Order");
                    ui.radio_value(&mut params.update_order, UpdateOrder::Snapshot, "Snapshot");
                    ui.radio_value(&mut params.update_order, UpdateOrder::Immediate, "Immediate");
                });
            });

            ui.collapsing("Statistics", |ui| {
                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
                ui.label(format!("Ticks: {} ({} this frame)", debug_info.ticks, debug_info.ticks_per_frame));
                ui.label(format!("Mean speed: {:.2}", debug_info.stats.mean_speed));
                ui.label(format!("Max speed: {:.2}", debug_info.stats.max_speed));
                ui.label(format!(
                    "Centroid: ({:.0}, {:.0})",
                    debug_info.stats.centroid.x, debug_info.stats.centroid.y
                ));
            });

            ui.checkbox(&mut params.show_leader, "Show Leader Overlay");
            ui.checkbox(&mut params.paused, "Pause Simulation");

            if ui.button("Quit").clicked() {
                response.quit = true;
            }
        });

    response.params_changed = *params != before;
    response
}
