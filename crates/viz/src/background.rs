//! Hero background: hosts a particle field behind the page content.
//!
//! The primary window stands in for the container. Each Bevy update is one
//! display refresh: the pending frame is fired into a recording surface and
//! the recorded lines and markers are replayed with gizmos and pooled meshes.
//! A window-sized quad behind everything paints the palette gradient.

use bevy::app::AppExit;
use bevy::prelude::*;
use bevy::render::mesh::VertexAttributeValues;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::window::{PrimaryWindow, WindowResized, WindowScaleFactorChanged};

use field_core::{FieldConfig, FieldRng, ManualHost, ParticleField, RecordingSurface, Viewport};
use field_events::{DrawCommand, Rgba};

use crate::camera::canvas_to_world;

/// Halo alpha standing in for the canvas shadow blur.
const GLOW_ALPHA: f32 = 0.35;

/// Depth of the gradient quad, below halos (0.5) and markers (1.0).
const GRADIENT_Z: f32 = -1.0;

/// Plugin for the particle field background.
pub struct ParticleBackgroundPlugin;

impl Plugin for ParticleBackgroundPlugin {
    fn build(&self, app: &mut App) {
        // HeroField should be inserted by main.rs before adding this plugin
        if !app.world().contains_resource::<HeroField>() {
            app.insert_resource(HeroField::new(
                FieldConfig::default(),
                field_core::field_rng(None),
            ));
        }

        let background = app
            .world()
            .resource::<HeroField>()
            .field
            .config()
            .palette
            .background_bottom;

        app.insert_resource(ClearColor(to_color(background)))
            .init_resource::<FrameHost>()
            .init_resource::<MarkerPool>()
            .add_systems(
                Startup,
                (
                    configure_gizmos,
                    spawn_background,
                    spawn_marker_pool,
                    mount_field,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    toggle_mount,
                    forward_resizes,
                    advance_frame,
                    draw_connections,
                    sync_markers,
                )
                    .chain(),
            )
            .add_systems(Last, unmount_on_exit);
    }
}

/// The field and the surface it renders into.
#[derive(Resource)]
pub struct HeroField {
    pub field: ParticleField,
    pub surface: RecordingSurface,
}

impl HeroField {
    pub fn new(config: FieldConfig, rng: FieldRng) -> Self {
        Self {
            field: ParticleField::new(config, rng),
            surface: RecordingSurface::new(),
        }
    }

    pub fn mount(&mut self, host: &mut ManualHost, viewport: Viewport) {
        self.field.mount(host, &mut self.surface, viewport);
    }

    /// Unmounts and drops whatever was recorded, so nothing is replayed.
    pub fn unmount(&mut self, host: &mut ManualHost) {
        self.field.unmount(host);
        self.surface.take_commands();
    }
}

/// Refresh signal and resize subscriptions for the field.
///
/// Requested frames queue here and one is fired per Bevy update.
#[derive(Resource, Default)]
pub struct FrameHost(pub ManualHost);

/// Filled circle for one particle.
#[derive(Component)]
pub struct ParticleMarker;

/// Translucent disc behind a marker, in place of a shadow blur.
#[derive(Component)]
pub struct ParticleHalo;

/// Full-window quad carrying the background gradient.
#[derive(Component)]
pub struct BackgroundGradient;

/// Marker and halo entities, one slot per particle.
#[derive(Resource, Default)]
pub struct MarkerPool {
    pub markers: Vec<Entity>,
    pub halos: Vec<Entity>,
}

type MarkerFilter = Or<(With<ParticleMarker>, With<ParticleHalo>)>;

/// Converts a palette color to a Bevy color.
pub fn to_color(rgba: Rgba) -> Color {
    let [r, g, b, a] = rgba.to_f32_array();
    Color::srgba(r, g, b, a)
}

/// Container geometry as the field sees it.
pub fn window_viewport(window: &Window) -> Viewport {
    Viewport::new(window.width(), window.height(), window.scale_factor())
}

/// Unit quad shaded `top` along its upper edge and `bottom` along its lower
/// edge. Scale it to the window to fill the view.
pub fn gradient_mesh(top: Rgba, bottom: Rgba) -> Mesh {
    let top = linear_components(top);
    let bottom = linear_components(bottom);

    let mut mesh = Mesh::from(Rectangle::new(1.0, 1.0));
    let colors: Vec<[f32; 4]> = match mesh.attribute(Mesh::ATTRIBUTE_POSITION) {
        Some(VertexAttributeValues::Float32x3(positions)) => positions
            .iter()
            .map(|p| if p[1] > 0.0 { top } else { bottom })
            .collect(),
        _ => Vec::new(),
    };
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
    mesh
}

/// Scale that stretches the unit gradient quad over the viewport.
pub fn gradient_scale(viewport: Viewport) -> Vec3 {
    Vec3::new(viewport.width, viewport.height, 1.0)
}

fn linear_components(rgba: Rgba) -> [f32; 4] {
    let linear = to_color(rgba).to_linear();
    [linear.red, linear.green, linear.blue, linear.alpha]
}

fn configure_gizmos(mut store: ResMut<GizmoConfigStore>, hero: Res<HeroField>) {
    let (config, _) = store.config_mut::<DefaultGizmoConfigGroup>();
    config.line_width = hero.field.config().connections.line_width;
}

/// System to spawn hidden markers for the fixed particle count.
fn spawn_marker_pool(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    hero: Res<HeroField>,
    mut pool: ResMut<MarkerPool>,
) {
    let config = hero.field.config();
    let radius = config.field.particle_radius;
    let style = config.palette.particle_style();

    let marker_mesh = Mesh2dHandle(meshes.add(Circle::new(radius)));
    let marker_material = materials.add(ColorMaterial::from(to_color(style.color)));
    let halo = style.glow.map(|glow| {
        (
            Mesh2dHandle(meshes.add(Circle::new(radius + glow.blur * 0.5))),
            materials.add(ColorMaterial::from(to_color(glow.color.with_alpha(GLOW_ALPHA)))),
        )
    });

    for _ in 0..config.field.particle_count {
        let marker = commands
            .spawn((
                MaterialMesh2dBundle {
                    mesh: marker_mesh.clone(),
                    material: marker_material.clone(),
                    transform: Transform::from_xyz(0.0, 0.0, 1.0),
                    visibility: Visibility::Hidden,
                    ..default()
                },
                ParticleMarker,
            ))
            .id();
        pool.markers.push(marker);

        if let Some((mesh, material)) = &halo {
            let halo = commands
                .spawn((
                    MaterialMesh2dBundle {
                        mesh: mesh.clone(),
                        material: material.clone(),
                        transform: Transform::from_xyz(0.0, 0.0, 0.5),
                        visibility: Visibility::Hidden,
                        ..default()
                    },
                    ParticleHalo,
                ))
                .id();
            pool.halos.push(halo);
        }
    }
}

/// System to spawn the gradient quad behind the field.
fn spawn_background(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    hero: Res<HeroField>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let palette = &hero.field.config().palette;
    let scale = windows
        .get_single()
        .map(|w| gradient_scale(window_viewport(w)))
        .unwrap_or(Vec3::ONE);

    commands.spawn((
        MaterialMesh2dBundle {
            mesh: Mesh2dHandle(meshes.add(gradient_mesh(
                palette.background_top,
                palette.background_bottom,
            ))),
            material: materials.add(ColorMaterial::default()),
            transform: Transform::from_xyz(0.0, 0.0, GRADIENT_Z).with_scale(scale),
            ..default()
        },
        BackgroundGradient,
    ));
}

/// System to mount the field on the primary window at startup.
fn mount_field(
    mut hero: ResMut<HeroField>,
    mut host: ResMut<FrameHost>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Ok(window) = windows.get_single() else {
        tracing::warn!("No primary window, particle field not mounted");
        return;
    };

    let viewport = window_viewport(window);
    hero.mount(&mut host.0, viewport);
    tracing::info!(
        "Mounted particle field on {}x{} window (scale {})",
        viewport.width,
        viewport.height,
        viewport.device_pixel_ratio
    );
}

/// System to mount or unmount with Escape.
fn toggle_mount(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut hero: ResMut<HeroField>,
    mut host: ResMut<FrameHost>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    if !keyboard.just_pressed(KeyCode::Escape) {
        return;
    }

    if hero.field.is_mounted() {
        hero.unmount(&mut host.0);
        tracing::info!("Particle field unmounted");
    } else if let Ok(window) = windows.get_single() {
        hero.mount(&mut host.0, window_viewport(window));
        tracing::info!("Particle field mounted");
    }
}

/// System to forward size and density changes of the window.
///
/// The gradient always follows the window; the field only while subscribed.
fn forward_resizes(
    mut resized: EventReader<WindowResized>,
    mut rescaled: EventReader<WindowScaleFactorChanged>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut gradient: Query<&mut Transform, With<BackgroundGradient>>,
    mut hero: ResMut<HeroField>,
    host: Res<FrameHost>,
) {
    // Only the latest geometry matters within one update
    let any_resized = resized.read().count() > 0;
    let any_rescaled = rescaled.read().count() > 0;
    if !any_resized && !any_rescaled {
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };

    let viewport = window_viewport(window);
    for mut transform in &mut gradient {
        transform.scale = gradient_scale(viewport);
    }

    if host.0.listener_count() == 0 {
        return;
    }
    let HeroField { field, surface } = &mut *hero;
    field.resize(surface, viewport);
}

/// System to fire the pending frame, once per refresh.
fn advance_frame(mut hero: ResMut<HeroField>, mut host: ResMut<FrameHost>) {
    let Some(handle) = host.0.next_frame() else {
        return;
    };

    let HeroField { field, surface } = &mut *hero;
    surface.take_commands();
    field.on_frame(handle, &mut host.0, surface);
}

/// System to replay recorded connection lines.
fn draw_connections(hero: Res<HeroField>, mut gizmos: Gizmos) {
    let Some(viewport) = hero.field.viewport() else {
        return;
    };
    let size = Vec2::new(viewport.width, viewport.height);

    for command in hero.surface.last_frame() {
        if let DrawCommand::Line { from, to, color, .. } = command {
            gizmos.line_2d(
                canvas_to_world(*from, size),
                canvas_to_world(*to, size),
                to_color(*color),
            );
        }
    }
}

/// System to move pooled markers onto the recorded circles.
fn sync_markers(
    hero: Res<HeroField>,
    pool: Res<MarkerPool>,
    mut query: Query<(&mut Transform, &mut Visibility), MarkerFilter>,
) {
    let size = hero
        .field
        .viewport()
        .map(|v| Vec2::new(v.width, v.height))
        .unwrap_or(Vec2::ZERO);
    let mut centers = hero.surface.last_frame().iter().filter_map(|c| match c {
        DrawCommand::Circle { center, .. } => Some(canvas_to_world(*center, size)),
        _ => None,
    });

    for (index, marker) in pool.markers.iter().enumerate() {
        let center = centers.next();
        place(&mut query, *marker, center);
        if let Some(halo) = pool.halos.get(index) {
            place(&mut query, *halo, center);
        }
    }
}

fn place(
    query: &mut Query<(&mut Transform, &mut Visibility), MarkerFilter>,
    entity: Entity,
    center: Option<Vec2>,
) {
    let Ok((mut transform, mut visibility)) = query.get_mut(entity) else {
        return;
    };
    match center {
        Some(center) => {
            transform.translation.x = center.x;
            transform.translation.y = center.y;
            *visibility = Visibility::Visible;
        }
        None => *visibility = Visibility::Hidden,
    }
}

/// System to stop the loop when the app shuts down.
fn unmount_on_exit(
    mut exits: EventReader<AppExit>,
    mut hero: ResMut<HeroField>,
    mut host: ResMut<FrameHost>,
) {
    if exits.read().next().is_some() && hero.field.is_mounted() {
        hero.unmount(&mut host.0);
        tracing::info!("Particle field unmounted on exit");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::window::WindowResolution;

    fn resize_app(window: Window) -> (App, Entity) {
        let mut hero = HeroField::new(FieldConfig::default(), field_core::field_rng(Some(3)));
        let mut host = ManualHost::new();
        hero.mount(&mut host, Viewport::new(800.0, 600.0, 1.0));

        let mut app = App::new();
        app.add_event::<WindowResized>()
            .add_event::<WindowScaleFactorChanged>()
            .insert_resource(hero)
            .insert_resource(FrameHost(host))
            .add_systems(Update, forward_resizes);
        let window = app.world_mut().spawn((window, PrimaryWindow)).id();
        app.world_mut()
            .spawn((Transform::default(), BackgroundGradient));
        (app, window)
    }

    #[test]
    fn test_to_color_keeps_alpha() {
        let color = to_color(Rgba::rgb(255, 0, 0).with_alpha(0.5));
        let srgba = color.to_srgba();
        assert_eq!(srgba.red, 1.0);
        assert_eq!(srgba.green, 0.0);
        assert_eq!(srgba.alpha, 0.5);
    }

    #[test]
    fn test_hero_field_unmount_clears_recording() {
        let mut hero = HeroField::new(FieldConfig::default(), field_core::field_rng(Some(1)));
        let mut host = ManualHost::new();

        hero.mount(&mut host, Viewport::new(640.0, 360.0, 1.0));
        let handle = host.next_frame().unwrap();
        hero.field.on_frame(handle, &mut host, &mut hero.surface);
        assert!(hero.surface.command_count() > 0);

        hero.unmount(&mut host);
        assert_eq!(hero.surface.command_count(), 0);
        assert_eq!(host.pending_frames(), 0);
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn test_gradient_mesh_shades_top_to_bottom() {
        let top = Rgba::rgb(0x1e, 0x29, 0x3b);
        let bottom = Rgba::rgb(0x0f, 0x17, 0x2a);
        let mesh = gradient_mesh(top, bottom);

        let Some(VertexAttributeValues::Float32x3(positions)) =
            mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        else {
            panic!("quad has no positions");
        };
        let Some(VertexAttributeValues::Float32x4(colors)) = mesh.attribute(Mesh::ATTRIBUTE_COLOR)
        else {
            panic!("quad has no vertex colors");
        };

        assert_eq!(colors.len(), positions.len());
        for (position, color) in positions.iter().zip(colors) {
            let expected = if position[1] > 0.0 { top } else { bottom };
            assert_eq!(*color, linear_components(expected));
        }
        assert!(colors.contains(&linear_components(top)));
        assert!(colors.contains(&linear_components(bottom)));
    }

    #[test]
    fn test_gradient_scale_follows_viewport() {
        let scale = gradient_scale(Viewport::new(1280.0, 720.0, 2.0));
        assert_eq!(scale, Vec3::new(1280.0, 720.0, 1.0));
    }

    #[test]
    fn test_density_change_refits_field() {
        let window = Window {
            resolution: WindowResolution::new(800.0, 600.0).with_scale_factor_override(2.0),
            ..default()
        };
        let (mut app, entity) = resize_app(window);

        app.world_mut().send_event(WindowScaleFactorChanged {
            window: entity,
            scale_factor: 2.0,
        });
        app.update();

        let expected = window_viewport(app.world().get::<Window>(entity).unwrap());
        let hero = app.world().resource::<HeroField>();
        assert_eq!(expected.device_pixel_ratio, 2.0);
        assert_eq!(hero.field.viewport(), Some(expected));
        assert_eq!(hero.surface.scale(), 2.0);
        assert_eq!(hero.surface.buffer(), expected.buffer_size());

        let mut gradient = app
            .world_mut()
            .query_filtered::<&Transform, With<BackgroundGradient>>();
        let transform = gradient.single(app.world());
        assert_eq!(transform.scale, gradient_scale(expected));
    }

    #[test]
    fn test_no_window_events_leaves_field_alone() {
        let (mut app, _) = resize_app(Window::default());
        app.update();

        let hero = app.world().resource::<HeroField>();
        assert_eq!(hero.field.viewport(), Some(Viewport::new(800.0, 600.0, 1.0)));
        assert_eq!(hero.surface.scale(), 1.0);
    }

    #[test]
    fn test_marker_pool_default_empty() {
        let pool = MarkerPool::default();
        assert!(pool.markers.is_empty());
        assert!(pool.halos.is_empty());
    }
}
