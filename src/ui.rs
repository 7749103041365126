use bevy::{
    diagnostic::{Diagnostics, FrameTimeDiagnosticsPlugin},
    prelude::*,
};
use bevy_egui::{egui, EguiContexts};

use crate::raster::Raster;
use crate::settings::{HeightSource, LightSettings, LoadedRaster, RegenerateMesh, ViewerSettings};

fn source_label(source: HeightSource) -> &'static str {
    match source {
        HeightSource::Sine => "Sine",
        HeightSource::Perlin => "Perlin",
        HeightSource::Image => "Image",
    }
}

pub fn heightmap_panel(
    mut contexts: EguiContexts,
    mut settings: ResMut<ViewerSettings>,
    mut raster: ResMut<LoadedRaster>,
    mut regenerate: EventWriter<RegenerateMesh>,
) {
    egui::Window::new("Heightmap").show(contexts.ctx_mut(), |ui| {
        ui.horizontal(|ui| {
            ui.label("File Path");
            ui.add(egui::TextEdit::singleline(&mut settings.file_path).desired_width(300.0));
        });

        ui.horizontal(|ui| {
            if ui.button("Load File").clicked() {
                match Raster::load(&settings.file_path) {
                    Ok(loaded) => {
                        info!(
                            "loaded `{}` ({}x{})",
                            settings.file_path,
                            loaded.width(),
                            loaded.height()
                        );
                        settings.loaded_file = Some(settings.file_path.clone());
                        raster.0 = Some(loaded);
                    }
                    Err(err) => warn!("{err}"),
                }
            }

            if ui.button("Generate Grid").clicked() {
                regenerate.send(RegenerateMesh);
            }

            ui.add(
                egui::Slider::new(&mut settings.height_scale, 0.0..=100.0).text("Z Scale Factor"),
            );
        });

        ui.horizontal(|ui| {
            ui.label("Source");
            egui::ComboBox::from_id_source("height_source")
                .selected_text(source_label(settings.source))
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut settings.source, HeightSource::Sine, "Sine");
                    ui.selectable_value(&mut settings.source, HeightSource::Perlin, "Perlin");
                    ui.selectable_value(&mut settings.source, HeightSource::Image, "Image");
                });

            if settings.source == HeightSource::Perlin {
                ui.label("Seed");
                ui.add(egui::DragValue::new(&mut settings.seed));
            }
        });

        ui.horizontal(|ui| {
            ui.label("N");
            ui.add(egui::DragValue::new(&mut settings.grid_n).clamp_range(1..=512));
            ui.label("M");
            ui.add(egui::DragValue::new(&mut settings.grid_m).clamp_range(1..=512));

            let dims = raster.0.as_ref().map(|r| (r.width(), r.height()));
            if ui
                .add_enabled(dims.is_some(), egui::Button::new("Use Image Size"))
                .clicked()
            {
                if let Some((width, height)) = dims {
                    settings.grid_n = width.max(1);
                    settings.grid_m = height.max(1);
                }
            }
        });

        let (width, height) = raster
            .0
            .as_ref()
            .map(|r| (r.width(), r.height()))
            .unwrap_or((0, 0));
        ui.label(format!(
            "Width: {width}  Height: {height}  Loaded file: {}",
            settings.loaded_file.as_deref().unwrap_or("-")
        ));

        ui.separator();

        ui.horizontal(|ui| {
            ui.label("Heightmap Color");
            ui.color_edit_button_rgb(&mut settings.base_color);
        });
        ui.checkbox(&mut settings.wireframe, "Wireframe On");
    });
}

pub fn performance_panel(
    mut contexts: EguiContexts,
    diagnostics: Res<Diagnostics>,
    mut settings: ResMut<ViewerSettings>,
) {
    let fps = diagnostics
        .get(FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|d| d.smoothed())
        .unwrap_or(0.0);
    let frame_time = diagnostics
        .get(FrameTimeDiagnosticsPlugin::FRAME_TIME)
        .and_then(|d| d.smoothed())
        .unwrap_or(0.0);

    egui::Window::new("Performance").show(contexts.ctx_mut(), |ui| {
        ui.checkbox(&mut settings.vsync, "VSync");
        ui.label(format!("Frametime: {frame_time:.3} ms (FPS {fps:.1})"));
    });
}

pub fn lighting_panel(mut contexts: EguiContexts, mut light: ResMut<LightSettings>) {
    egui::Window::new("Lighting").show(contexts.ctx_mut(), |ui| {
        ui.horizontal(|ui| {
            ui.label("Direction");
            ui.add(egui::DragValue::new(&mut light.direction.x).speed(0.01));
            ui.add(egui::DragValue::new(&mut light.direction.y).speed(0.01));
            ui.add(egui::DragValue::new(&mut light.direction.z).speed(0.01));
        });

        ui.horizontal(|ui| {
            ui.label("Ambient");
            ui.color_edit_button_rgb(&mut light.ambient_color);
            ui.add(egui::Slider::new(&mut light.ambient_brightness, 0.0..=1.0));
        });

        ui.horizontal(|ui| {
            ui.label("Sun");
            ui.color_edit_button_rgb(&mut light.sun_color);
        });
        ui.add(egui::Slider::new(&mut light.illuminance, 0.0..=100_000.0).text("Illuminance"));
    });
}
