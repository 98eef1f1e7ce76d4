use crate::spawn::SpawnTimer;
use crate::{AppState, RunState, SceneInits, SimContext};
use bevy::prelude::*;
use bevy_egui::egui::Slider;
use bevy_egui::{egui, EguiContexts};

pub fn update_ui(
    mut commands: Commands,
    mut ui_context: EguiContexts,
    sim: Res<SimContext>,
    spawn_timer: Res<SpawnTimer>,
    mut app_state: ResMut<AppState>,
    scenes: Res<SceneInits>,
) {
    egui::Window::new("Parameters").show(ui_context.ctx_mut(), |ui| {
        let mut changed = false;
        egui::ComboBox::from_label("selected scene")
            .selected_text(&scenes.scenes[app_state.selected_scene].0)
            .show_ui(ui, |ui| {
                for (i, (name, _)) in scenes.scenes.iter().enumerate() {
                    changed = ui
                        .selectable_value(&mut app_state.selected_scene, i, name)
                        .changed()
                        || changed;
                }
            });
        if changed {
            scenes.init_scene(&mut commands, app_state.selected_scene);
            app_state.restarting = false;
        }

        ui.add(Slider::new(&mut app_state.gravity_factor, 0.0..=10.0).text("gravity factor"));

        ui.label(format!("Bodies: {}", sim.world.num_glyphs()));
        ui.label(format!(
            "Drops: {}/{}",
            sim.scheduler.completed(),
            sim.scheduler.max_drops()
        ));
        ui.label(format!(
            "Spawn timer: {}",
            if spawn_timer.is_active() { "active" } else { "cancelled" }
        ));

        ui.horizontal(|ui| {
            let label = if app_state.run_state == RunState::Paused {
                "Run"
            } else {
                "Pause"
            };

            if ui.button(label).clicked() {
                if app_state.run_state == RunState::Paused {
                    app_state.run_state = RunState::Running
                } else {
                    app_state.run_state = RunState::Paused
                }
            }

            if ui.button("Step").clicked() {
                app_state.run_state = RunState::Step;
            }

            if ui.button("Restart").clicked() {
                scenes.init_scene(&mut commands, app_state.selected_scene);
                app_state.restarting = true;
            }
        });
    });
}
