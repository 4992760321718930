// Interactive sandbox over the fluid2d solver: mouse spawns and stirs
// particles, the solver state lives in the FluidPlugin.
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy::window::WindowResolution;

use fluid2d::constants::{AREA_HEIGHT, AREA_WIDTH, RADIUS_STEP, SPEED_COLOR_SCALE};
use fluid2d::core::{apply_frame_commands, step_simulation};
use fluid2d::{FluidPlugin, FluidState, FrameInput};

#[derive(Component)]
struct ParticleVisual {
    index: usize,
}

#[derive(Resource)]
struct ParticleAssets {
    mesh: Handle<Mesh>,
}

#[derive(Component)]
struct HudText;

/// Sim space is y-down with the origin at the window's top-left, matching
/// cursor coordinates; world space is y-up and centered.
fn sim_to_world(position: Vec2) -> Vec3 {
    Vec3::new(
        position.x - AREA_WIDTH / 2.0,
        AREA_HEIGHT / 2.0 - position.y,
        0.0,
    )
}

fn setup(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    commands.spawn(Camera2d);
    commands.insert_resource(ParticleAssets {
        mesh: meshes.add(Circle::new(1.0)),
    });
}

fn setup_hud(mut commands: Commands) {
    commands.spawn((
        Text::default(),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        HudText,
    ));
}

fn sample_input(
    windows: Query<&Window>,
    mouse: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    mut input: ResMut<FrameInput>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    if let Some(cursor) = window.cursor_position() {
        input.pointer = cursor;
    }

    input.spawning = mouse.pressed(MouseButton::Left);
    input.attracting = mouse.pressed(MouseButton::Right);

    if keys.just_pressed(KeyCode::KeyR) {
        input.reset = true;
    }

    let modifier_held = keys.pressed(KeyCode::SuperLeft)
        || keys.pressed(KeyCode::SuperRight)
        || keys.pressed(KeyCode::ControlLeft)
        || keys.pressed(KeyCode::ControlRight);
    if modifier_held {
        if keys.just_pressed(KeyCode::Equal) {
            input.radius_delta += RADIUS_STEP;
        }
        if keys.just_pressed(KeyCode::Minus) {
            input.radius_delta -= RADIUS_STEP;
        }
    }
}

/// Faster particles shift from blue toward white.
fn speed_color(speed: f32) -> Color {
    let s = speed * SPEED_COLOR_SCALE;
    Color::srgb(
        ((100.0 + s) / 255.0).min(1.0),
        ((220.0 + s) / 255.0).min(1.0),
        1.0,
    )
}

/// Keep one circle entity per particle slot: visuals are a dense pool
/// indexed 0..n, grown and shrunk to match the store each frame.
fn sync_particle_visuals(
    mut commands: Commands,
    state: Res<FluidState>,
    assets: Res<ParticleAssets>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut visuals: Query<(
        Entity,
        &ParticleVisual,
        &mut Transform,
        &MeshMaterial2d<ColorMaterial>,
    )>,
) {
    let particles = state.particles();
    let mut existing = 0;

    for (entity, visual, mut transform, material) in visuals.iter_mut() {
        let Some(particle) = particles.get(visual.index) else {
            commands.entity(entity).despawn();
            continue;
        };
        existing = existing.max(visual.index + 1);
        transform.translation = sim_to_world(particle.position);
        transform.scale = Vec3::splat(particle.radius);
        if let Some(material) = materials.get_mut(&material.0) {
            material.color = speed_color(particle.speed());
        }
    }

    for index in existing..particles.len() {
        let particle = &particles[index];
        commands.spawn((
            ParticleVisual { index },
            Mesh2d(assets.mesh.clone()),
            MeshMaterial2d(materials.add(speed_color(0.0))),
            Transform::from_translation(sim_to_world(particle.position))
                .with_scale(Vec3::splat(particle.radius)),
        ));
    }
}

fn draw_overlays(mut gizmos: Gizmos, state: Res<FluidState>, input: Res<FrameInput>) {
    let vessel = state.vessel();

    // Vessel walls; the top stays open so no segment is drawn there.
    let outline = [
        Vec2::new(vessel.left, vessel.top),
        Vec2::new(vessel.left, vessel.bottom),
        Vec2::new(vessel.right, vessel.bottom),
        Vec2::new(vessel.right, vessel.top),
    ]
    .map(|p| sim_to_world(p).truncate());
    gizmos.linestrip_2d(outline, Color::WHITE);

    // Pointer interaction range.
    gizmos.circle_2d(
        sim_to_world(input.pointer).truncate(),
        state.params().interaction_distance(),
        Color::srgba(1.0, 1.0, 1.0, 0.31),
    );
}

fn update_hud(
    diagnostics: Res<DiagnosticsStore>,
    state: Res<FluidState>,
    mut query: Query<&mut Text, With<HudText>>,
) {
    for mut text in &mut query {
        let fps = diagnostics
            .get(&FrameTimeDiagnosticsPlugin::FPS)
            .and_then(|fps| fps.smoothed())
            .unwrap_or(0.0);

        text.0 = format!("Particles: {}\nFPS: {:.0}", state.particle_count(), fps);
    }
}

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Fluid Simulation".into(),
                resolution: WindowResolution::new(AREA_WIDTH as u32, AREA_HEIGHT as u32),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_plugins(FluidPlugin)
        .add_systems(Startup, (setup, setup_hud))
        .add_systems(
            Update,
            (
                sample_input.before(apply_frame_commands),
                (sync_particle_visuals, draw_overlays, update_hud).after(step_simulation),
            ),
        )
        .run();
}
