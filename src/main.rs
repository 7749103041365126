use std::f32::consts::FRAC_PI_2;

use bevy::{
    diagnostic::FrameTimeDiagnosticsPlugin,
    pbr::wireframe::{WireframeConfig, WireframePlugin},
    prelude::*,
    render::{
        render_resource::Face,
        settings::{WgpuFeatures, WgpuSettings},
        RenderPlugin,
    },
    window::{PresentMode, PrimaryWindow},
};
use bevy_atmosphere::prelude::*;
use bevy_egui::EguiPlugin;

use heightmap_viewer::{
    camera::{apply_cursor_mode, CameraControllerPlugin, FlyCamera},
    field::SampleField,
    generation::{perlin_field, NoiseSettings},
    meshing::{build_terrain_mesh, TerrainMeshData},
    raster::Raster,
    settings::{HeightSource, LightSettings, LoadedRaster, RegenerateMesh, ViewerSettings},
    ui,
};

#[derive(Component)]
struct TerrainSurface;

#[derive(Component)]
struct Sun;

/// The two cull-mode materials shared by the surface's draw passes. Mesh
/// handles live on the surface entities; rebuilds swap in a freshly added
/// asset and the replaced one is dropped once unreferenced.
#[derive(Resource)]
struct TerrainMaterials {
    front: Handle<StandardMaterial>,
    back: Handle<StandardMaterial>,
}

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(RenderPlugin {
                    wgpu_settings: WgpuSettings {
                        features: WgpuFeatures::POLYGON_MODE_LINE,
                        ..default()
                    },
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Heightmap Visualizer".into(),
                        resolution: (1280., 720.).into(),
                        present_mode: PresentMode::AutoVsync,
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugin(WireframePlugin)
        .add_plugin(EguiPlugin)
        .add_plugin(AtmospherePlugin)
        .add_plugin(FrameTimeDiagnosticsPlugin::default())
        .add_plugin(CameraControllerPlugin)
        .init_resource::<ViewerSettings>()
        .init_resource::<LoadedRaster>()
        .init_resource::<LightSettings>()
        .add_event::<RegenerateMesh>()
        .add_startup_system(setup)
        .add_system(ui::heightmap_panel)
        .add_system(ui::performance_panel)
        .add_system(ui::lighting_panel)
        .add_system(rebuild_terrain)
        .add_system(sync_material_color)
        .add_system(sync_lighting)
        .add_system(sync_render_flags)
        .run();
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<ViewerSettings>,
    light: Res<LightSettings>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    if let Ok(mut window) = windows.get_single_mut() {
        apply_cursor_mode(&mut window, true);
    }

    let data = terrain_mesh_data(&settings, None);
    info!(
        "generated grid: {} vertices, {} triangles",
        data.vertex_count(),
        data.triangle_count()
    );
    let mesh = meshes.add(data.into_render_mesh());

    let base_color = color_from(settings.base_color);
    let front = materials.add(surface_material(base_color, Face::Back));
    let back = materials.add(surface_material(base_color, Face::Front));

    let transform = terrain_transform(settings.grid_n, settings.grid_m);

    // Same vertex data drawn twice with opposite culling so both sides of
    // the surface are visible without duplicated geometry.
    commands.spawn((
        PbrBundle {
            mesh: mesh.clone(),
            material: front.clone(),
            transform,
            ..default()
        },
        TerrainSurface,
    ));
    commands.spawn((
        PbrBundle {
            mesh: mesh.clone(),
            material: back.clone(),
            transform,
            ..default()
        },
        TerrainSurface,
    ));
    commands.insert_resource(TerrainMaterials { front, back });

    add_camera(&mut commands);
    add_lights(&mut commands, &light);
}

fn add_camera(commands: &mut Commands) {
    commands.spawn((
        Camera3dBundle::default(),
        FlyCamera::default(),
        AtmosphereCamera::default(),
    ));
}

fn add_lights(commands: &mut Commands, light: &LightSettings) {
    commands.insert_resource(AmbientLight {
        color: color_from(light.ambient_color),
        brightness: light.ambient_brightness,
    });

    let mut transform = Transform::default();
    transform.look_to(light.direction.normalize_or_zero(), Vec3::Y);
    commands.spawn((
        DirectionalLightBundle {
            directional_light: DirectionalLight {
                color: color_from(light.sun_color),
                illuminance: light.illuminance,
                shadows_enabled: false,
                ..default()
            },
            transform,
            ..default()
        },
        Sun,
    ));
}

fn surface_material(base_color: Color, cull: Face) -> StandardMaterial {
    StandardMaterial {
        base_color,
        perceptual_roughness: 0.5,
        cull_mode: Some(cull),
        ..default()
    }
}

fn color_from(rgb: [f32; 3]) -> Color {
    Color::rgb(rgb[0], rgb[1], rgb[2])
}

fn terrain_transform(n: u32, m: u32) -> Transform {
    // The grid is built in x/y with height along z; stand it up and correct
    // the cell aspect with the m/n scale.
    Transform {
        rotation: Quat::from_rotation_x(-FRAC_PI_2),
        scale: terrain_scale(n, m),
        ..default()
    }
}

fn terrain_scale(n: u32, m: u32) -> Vec3 {
    Vec3::new(10.0, 10.0 * m as f32 / n as f32, 10.0)
}

fn terrain_mesh_data(settings: &ViewerSettings, raster: Option<&Raster>) -> TerrainMeshData {
    let field = match settings.source {
        HeightSource::Sine => SampleField::Analytic,
        HeightSource::Perlin => SampleField::Perlin(perlin_field(
            ((settings.grid_n + 1) as usize, (settings.grid_m + 1) as usize),
            settings.seed,
            NoiseSettings::default(),
        )),
        HeightSource::Image => SampleField::Image(raster),
    };

    build_terrain_mesh(
        settings.grid_n,
        settings.grid_m,
        &field,
        settings.normalized_height_scale(),
    )
}

fn rebuild_terrain(
    mut regenerate: EventReader<RegenerateMesh>,
    settings: Res<ViewerSettings>,
    raster: Res<LoadedRaster>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut surfaces: Query<(&mut Handle<Mesh>, &mut Transform), With<TerrainSurface>>,
) {
    if regenerate.is_empty() {
        return;
    }
    regenerate.clear();

    let data = terrain_mesh_data(&settings, raster.0.as_ref());
    info!(
        "generated grid: {} vertices, {} triangles",
        data.vertex_count(),
        data.triangle_count()
    );

    let mesh = meshes.add(data.into_render_mesh());
    let scale = terrain_scale(settings.grid_n, settings.grid_m);
    for (mut handle, mut transform) in surfaces.iter_mut() {
        *handle = mesh.clone();
        transform.scale = scale;
    }
}

fn sync_material_color(
    settings: Res<ViewerSettings>,
    surface: Res<TerrainMaterials>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let color = color_from(settings.base_color);
    for handle in [surface.front.clone(), surface.back.clone()] {
        let stale = materials
            .get(&handle)
            .map_or(false, |mat| mat.base_color != color);
        if stale {
            if let Some(mat) = materials.get_mut(&handle) {
                mat.base_color = color;
            }
        }
    }
}

fn sync_lighting(
    light: Res<LightSettings>,
    mut ambient: ResMut<AmbientLight>,
    mut suns: Query<(&mut DirectionalLight, &mut Transform), With<Sun>>,
) {
    if !light.is_changed() {
        return;
    }

    ambient.color = color_from(light.ambient_color);
    ambient.brightness = light.ambient_brightness;

    let direction = light.direction.normalize_or_zero();
    for (mut sun, mut transform) in suns.iter_mut() {
        sun.color = color_from(light.sun_color);
        sun.illuminance = light.illuminance;
        if direction != Vec3::ZERO {
            let up = if direction.cross(Vec3::Y).length_squared() < 1e-6 {
                Vec3::Z
            } else {
                Vec3::Y
            };
            transform.look_to(direction, up);
        }
    }
}

fn sync_render_flags(
    settings: Res<ViewerSettings>,
    mut wireframe: ResMut<WireframeConfig>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    if wireframe.global != settings.wireframe {
        wireframe.global = settings.wireframe;
    }

    let present_mode = if settings.vsync {
        PresentMode::AutoVsync
    } else {
        PresentMode::AutoNoVsync
    };
    if let Ok(mut window) = windows.get_single_mut() {
        if window.present_mode != present_mode {
            window.present_mode = present_mode;
        }
    }
}
