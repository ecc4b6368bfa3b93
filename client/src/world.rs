//! World systems
//!
//! Spawns the apartment: floors tagged by surface, walls, the interactive doors and the color
//! cube, plus lights. Every solid piece is registered in [`SceneColliders`] as it is spawned.

use bevy::prelude::*;
use interior_shared::{
    ColorChanger, Door, DoorKind, InteractableSet, LayerMask, ObjectId, SceneColliders, SurfaceKind,
};
use interior_shared::physics::BoxCollider;

use crate::doors::DoorHinge;
use crate::player::PLAYER_ACTOR;

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneColliders>();
        app.init_resource::<InteractableSet>();
        app.add_systems(Startup, spawn_world);
    }
}

// =============================================================================
// COMPONENTS
// =============================================================================

/// Root entity for all world visuals
#[derive(Component)]
pub struct WorldRoot;

/// Links a rendered entity to its interactable object
#[derive(Component, Clone, Copy, Debug)]
pub struct Interactive(pub ObjectId);

// =============================================================================
// LAYOUT
// =============================================================================

const WALL_HEIGHT: f32 = 2.8;
const WALL_THICKNESS: f32 = 0.1;

/// Floor zones: (center XZ, half size XZ, surface)
const FLOORS: [(Vec2, Vec2, SurfaceKind); 4] = [
    // Hallway tiles
    (Vec2::new(0.0, 0.0), Vec2::new(2.0, 4.0), SurfaceKind::Floor),
    // Living room parquet
    (Vec2::new(-1.0, -9.0), Vec2::new(7.0, 5.0), SurfaceKind::Wood),
    // Bedroom rug
    (Vec2::new(5.0, 0.0), Vec2::new(3.0, 4.0), SurfaceKind::Carpet),
    // Balcony
    (Vec2::new(-5.0, 0.0), Vec2::new(3.0, 4.0), SurfaceKind::Ground),
];

/// Wall segments: (from XZ, to XZ). Gaps are doorways.
const WALLS: [(Vec2, Vec2); 12] = [
    // Outer shell
    (Vec2::new(-8.0, 4.0), Vec2::new(8.0, 4.0)),
    (Vec2::new(-8.0, -14.0), Vec2::new(6.0, -14.0)),
    (Vec2::new(-8.0, -14.0), Vec2::new(-8.0, 4.0)),
    (Vec2::new(8.0, -4.0), Vec2::new(8.0, 4.0)),
    (Vec2::new(6.0, -14.0), Vec2::new(6.0, -4.0)),
    (Vec2::new(6.0, -4.0), Vec2::new(8.0, -4.0)),
    // Hallway / bedroom with a doorway at z in [-0.5, 0.5]
    (Vec2::new(2.0, -4.0), Vec2::new(2.0, -0.5)),
    (Vec2::new(2.0, 0.5), Vec2::new(2.0, 4.0)),
    // Hallway / balcony, open at z in [-1.5, 1.5]
    (Vec2::new(-2.0, -4.0), Vec2::new(-2.0, -1.5)),
    (Vec2::new(-2.0, 1.5), Vec2::new(-2.0, 4.0)),
    // Hallway / living room, open at x in [-1, 1]
    (Vec2::new(-8.0, -4.0), Vec2::new(-1.0, -4.0)),
    (Vec2::new(1.0, -4.0), Vec2::new(2.0, -4.0)),
];

/// Door panel placement. `size` is width, height, thickness; `swing` is in degrees.
struct DoorLayout {
    kind: DoorKind,
    hinge: Vec3,
    size: Vec3,
    yaw: f32,
    swing: f32,
    color: Color,
}

fn door_layouts() -> [DoorLayout; 4] {
    [
        // Bedroom door, in the doorway at x = 2
        DoorLayout {
            kind: DoorKind::Door,
            hinge: Vec3::new(2.0, 0.0, 0.5),
            size: Vec3::new(1.0, 2.1, 0.05),
            yaw: std::f32::consts::FRAC_PI_2,
            swing: 90.0,
            color: Color::srgb(0.55, 0.38, 0.22),
        },
        // Fridge against the living room back wall
        DoorLayout {
            kind: DoorKind::Fridge,
            hinge: Vec3::new(3.0, 0.9, -13.2),
            size: Vec3::new(0.8, 1.0, 0.05),
            yaw: 0.0,
            swing: -100.0,
            color: Color::srgb(0.9, 0.9, 0.92),
        },
        DoorLayout {
            kind: DoorKind::FridgeLower,
            hinge: Vec3::new(3.0, 0.0, -13.2),
            size: Vec3::new(0.8, 0.85, 0.05),
            yaw: 0.0,
            swing: -100.0,
            color: Color::srgb(0.9, 0.9, 0.92),
        },
        // Closet on the living room side wall
        DoorLayout {
            kind: DoorKind::Closet,
            hinge: Vec3::new(-7.4, 0.0, -11.0),
            size: Vec3::new(1.2, 2.2, 0.05),
            yaw: -std::f32::consts::FRAC_PI_2,
            swing: 90.0,
            color: Color::srgb(0.8, 0.75, 0.65),
        },
    ]
}

// =============================================================================
// SPAWNING
// =============================================================================

/// Spawn the apartment and register its colliders and interactables
pub fn spawn_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut colliders: ResMut<SceneColliders>,
    mut interactables: ResMut<InteractableSet>,
) {
    let root = commands
        .spawn((WorldRoot, Transform::default(), Visibility::default()))
        .id();

    // --- Floors ---
    for (center, half, surface) in FLOORS {
        let collider = BoxCollider::new(
            Vec3::new(center.x, -0.05, center.y),
            Vec3::new(half.x, 0.05, half.y),
            LayerMask::TERRAIN,
        )
        .with_surface(surface);
        let material = materials.add(StandardMaterial {
            base_color: floor_color(surface),
            perceptual_roughness: 0.9,
            ..default()
        });
        let entity = spawn_box(&mut commands, &mut meshes, material, &collider);
        commands.entity(root).add_child(entity);
        colliders.insert(collider);
    }

    // --- Walls ---
    let wall_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.86, 0.84, 0.8),
        perceptual_roughness: 0.95,
        ..default()
    });
    for (from, to) in WALLS {
        let min = from.min(to);
        let max = from.max(to);
        let center = (min + max) * 0.5;
        let half = ((max - min) * 0.5).max(Vec2::splat(WALL_THICKNESS * 0.5));
        let collider = BoxCollider::new(
            Vec3::new(center.x, WALL_HEIGHT * 0.5, center.y),
            Vec3::new(half.x, WALL_HEIGHT * 0.5, half.y),
            LayerMask::WALLS,
        );
        let entity = spawn_box(&mut commands, &mut meshes, wall_material.clone(), &collider);
        commands.entity(root).add_child(entity);
        colliders.insert(collider);
    }

    // --- Fridge body, table and closet carcass (solid, not interactive) ---
    let appliance_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.8, 0.8, 0.82),
        ..default()
    });
    for collider in [
        BoxCollider::new(Vec3::new(3.4, 0.95, -13.6), Vec3::new(0.4, 0.95, 0.35), LayerMask::WALLS),
        BoxCollider::new(Vec3::new(-2.0, 0.375, -9.0), Vec3::new(0.6, 0.375, 0.6), LayerMask::WALLS),
        BoxCollider::new(Vec3::new(-7.7, 1.1, -10.4), Vec3::new(0.28, 1.1, 0.6), LayerMask::WALLS),
    ] {
        let entity = spawn_box(&mut commands, &mut meshes, appliance_material.clone(), &collider);
        commands.entity(root).add_child(entity);
        colliders.insert(collider);
    }

    // --- Doors ---
    for layout in door_layouts() {
        let id = interactables.allocate_id();
        let hinge = DoorHinge::new(id, layout.size, layout.yaw, layout.swing);
        let rotation = hinge.rotation();
        let (center, half_extents) = hinge.panel_bounds(layout.hinge);

        colliders.insert(
            BoxCollider::new(center, half_extents, hinge.collider_layers()).with_object(id),
        );
        interactables.insert(
            id,
            Door::new(id, layout.kind, layout.hinge).with_actor(PLAYER_ACTOR),
        );

        let material = materials.add(StandardMaterial {
            base_color: layout.color,
            ..default()
        });
        let panel = commands
            .spawn((
                Interactive(id),
                Mesh3d(meshes.add(Cuboid::new(layout.size.x, layout.size.y, layout.size.z))),
                MeshMaterial3d(material),
                Transform::from_translation(hinge.panel_offset()),
            ))
            .id();
        let pivot = commands
            .spawn((
                hinge,
                Transform::from_translation(layout.hinge).with_rotation(rotation),
                Visibility::default(),
            ))
            .add_child(panel)
            .id();
        commands.entity(root).add_child(pivot);
    }

    // --- Color cube on the table ---
    let cube_id = interactables.allocate_id();
    interactables.insert(cube_id, ColorChanger::new(cube_id));
    let cube_collider = BoxCollider::new(Vec3::new(-2.0, 0.95, -9.0), Vec3::splat(0.2), LayerMask::PROPS)
        .with_object(cube_id);
    let cube_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.2, 0.5, 0.9),
        ..default()
    });
    let cube = spawn_box(&mut commands, &mut meshes, cube_material, &cube_collider);
    commands.entity(cube).insert(Interactive(cube_id));
    commands.entity(root).add_child(cube);
    colliders.insert(cube_collider);

    // --- Lights ---
    for position in [Vec3::new(0.0, 2.6, 0.0), Vec3::new(0.0, 2.6, -9.0), Vec3::new(5.0, 2.6, 0.0)] {
        let light = commands
            .spawn((
                PointLight {
                    intensity: 400_000.0,
                    range: 14.0,
                    shadows_enabled: true,
                    color: Color::srgb(1.0, 0.95, 0.85),
                    ..default()
                },
                Transform::from_translation(position),
            ))
            .id();
        commands.entity(root).add_child(light);
    }

    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.95, 0.92, 0.88),
        brightness: 120.0,
        affects_lightmapped_meshes: true,
    });
    commands.insert_resource(ClearColor(Color::srgb(0.55, 0.7, 0.85)));

    info!(
        "World spawned: {} colliders, {} interactables",
        colliders.len(),
        interactables.len()
    );
}

fn spawn_box(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    material: Handle<StandardMaterial>,
    collider: &BoxCollider,
) -> Entity {
    let size = collider.half_extents * 2.0;
    commands
        .spawn((
            Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
            MeshMaterial3d(material),
            Transform::from_translation(collider.center),
        ))
        .id()
}

fn floor_color(surface: SurfaceKind) -> Color {
    match surface {
        SurfaceKind::Ground => Color::srgb(0.45, 0.42, 0.36),
        SurfaceKind::Floor => Color::srgb(0.78, 0.76, 0.72),
        SurfaceKind::Wood => Color::srgb(0.58, 0.4, 0.24),
        SurfaceKind::Carpet => Color::srgb(0.45, 0.2, 0.22),
    }
}
