//! Presentation of interaction effects: door swings and material tints.
//!
//! Activations only emit [`WorldEffect`]s; this module turns them into motion and color.

use bevy::prelude::*;
use interior_shared::door::DOOR_ANIMATION_DELAY;
use interior_shared::{LayerMask, ObjectId, SceneColliders, WorldEffect};

use crate::world::Interactive;

pub struct DoorsPlugin;

impl Plugin for DoorsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<WorldEffectMessage>();
        app.add_systems(
            Update,
            (apply_world_effects, animate_hinges)
                .chain()
                .after(crate::player::drive_player),
        );
    }
}

/// An effect emitted by an activation this frame
#[derive(Message, Clone, Debug)]
pub struct WorldEffectMessage(pub WorldEffect);

/// Hinge pivot of a door panel. The panel is a child offset along local +X.
#[derive(Component, Clone, Debug)]
pub struct DoorHinge {
    pub object: ObjectId,
    /// Panel width, height, thickness
    pub size: Vec3,
    /// Yaw of the closed panel (radians)
    pub closed_yaw: f32,
    /// Opening angle in degrees; the sign picks the swing direction
    pub swing: f32,
    /// Current and target opening angle in degrees
    pub angle: f32,
    pub target: f32,
}

impl DoorHinge {
    pub fn new(object: ObjectId, size: Vec3, closed_yaw: f32, swing: f32) -> Self {
        Self {
            object,
            size,
            closed_yaw,
            swing,
            angle: 0.0,
            target: 0.0,
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.closed_yaw + self.angle.to_radians())
    }

    /// Panel center relative to the hinge, in hinge space
    pub fn panel_offset(&self) -> Vec3 {
        Vec3::new(self.size.x * 0.5, self.size.y * 0.5, 0.0)
    }

    /// World-space box enclosing the panel for a hinge at `pivot`
    pub fn panel_bounds(&self, pivot: Vec3) -> (Vec3, Vec3) {
        let rotation = self.rotation();
        let center = pivot + rotation * self.panel_offset();
        let half_extents = Mat3::from_quat(rotation).abs() * (self.size * 0.5);
        (center, half_extents)
    }

    /// A fully closed panel blocks movement; a swinging or open one is only targetable
    pub fn collider_layers(&self) -> LayerMask {
        if self.angle == 0.0 {
            LayerMask::PROPS.union(LayerMask::WALLS)
        } else {
            LayerMask::PROPS
        }
    }

    /// Swing speed in degrees per second; a full swing takes the pacing delay
    fn speed(&self) -> f32 {
        self.swing.abs() / DOOR_ANIMATION_DELAY
    }
}

/// Move `angle` toward `target` at `speed` degrees per second without overshooting
pub fn step_hinge(angle: f32, target: f32, speed: f32, dt: f32) -> f32 {
    let max_step = speed * dt;
    let delta = target - angle;
    if delta.abs() <= max_step {
        target
    } else {
        angle + max_step * delta.signum()
    }
}

/// Route effects to the entities that present them
pub fn apply_world_effects(
    mut effects: MessageReader<WorldEffectMessage>,
    mut hinges: Query<&mut DoorHinge>,
    tintables: Query<(&Interactive, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for WorldEffectMessage(effect) in effects.read() {
        match effect {
            WorldEffect::PlayAnimation { object, cue } => {
                let Some(mut hinge) = hinges.iter_mut().find(|h| h.object == *object) else {
                    warn!("Animation cue {:?} for {:?}, which has no hinge", cue, object);
                    continue;
                };
                // A new cue mid-swing retargets from the current angle
                hinge.target = if cue.starts_with("Opening") { hinge.swing } else { 0.0 };
            }
            WorldEffect::Tint { object, color } => {
                let Some((_, material)) = tintables.iter().find(|(i, _)| i.0 == *object) else {
                    warn!("Tint for {:?}, which has no material", object);
                    continue;
                };
                if let Some(material) = materials.get_mut(&material.0) {
                    material.base_color = *color;
                }
            }
        }
    }
}

/// Ease hinges toward their targets and keep the panel colliders in step
pub fn animate_hinges(
    time: Res<Time>,
    mut hinges: Query<(&mut DoorHinge, &mut Transform)>,
    mut colliders: ResMut<SceneColliders>,
) {
    let dt = time.delta_secs();
    for (mut hinge, mut transform) in hinges.iter_mut() {
        if hinge.angle == hinge.target {
            continue;
        }
        let speed = hinge.speed();
        hinge.angle = step_hinge(hinge.angle, hinge.target, speed, dt);
        transform.rotation = hinge.rotation();

        if let Some(collider) = colliders.object_collider_mut(hinge.object) {
            let (center, half_extents) = hinge.panel_bounds(transform.translation);
            collider.center = center;
            collider.half_extents = half_extents;
            collider.layers = hinge.collider_layers();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hinge_reaches_target_without_overshoot() {
        let mut angle = 0.0;
        for _ in 0..100 {
            angle = step_hinge(angle, 90.0, 180.0, 0.016);
            assert!(angle <= 90.0);
        }
        assert_eq!(angle, 90.0);
    }

    #[test]
    fn test_hinge_retargets_mid_swing() {
        let angle = step_hinge(0.0, 90.0, 180.0, 0.25);
        assert_eq!(angle, 45.0);
        let angle = step_hinge(angle, 0.0, 180.0, 0.1);
        assert!((angle - 27.0).abs() < 1e-4);
    }

    #[test]
    fn test_open_panel_bounds_turn_with_hinge() {
        let mut hinge = DoorHinge::new(ObjectId(0), Vec3::new(1.0, 2.0, 0.1), 0.0, 90.0);
        let (center, half) = hinge.panel_bounds(Vec3::ZERO);
        assert!((center - Vec3::new(0.5, 1.0, 0.0)).length() < 1e-5);
        assert!((half - Vec3::new(0.5, 1.0, 0.05)).length() < 1e-5);

        hinge.angle = 90.0;
        let (center, half) = hinge.panel_bounds(Vec3::ZERO);
        assert!((center - Vec3::new(0.0, 1.0, -0.5)).length() < 1e-5);
        assert!((half - Vec3::new(0.05, 1.0, 0.5)).length() < 1e-5);
    }

    #[test]
    fn test_only_closed_panel_blocks() {
        let mut hinge = DoorHinge::new(ObjectId(0), Vec3::new(1.0, 2.0, 0.1), 0.0, 90.0);
        assert!(hinge.collider_layers().intersects(LayerMask::WALLS));
        assert!(hinge.collider_layers().intersects(LayerMask::PROPS));

        hinge.target = 90.0;
        hinge.angle = step_hinge(hinge.angle, hinge.target, hinge.speed(), 0.016);
        assert!(!hinge.collider_layers().intersects(LayerMask::WALLS));

        hinge.angle = 90.0;
        assert_eq!(hinge.collider_layers(), LayerMask::PROPS);

        hinge.target = 0.0;
        for _ in 0..200 {
            hinge.angle = step_hinge(hinge.angle, hinge.target, hinge.speed(), 0.016);
        }
        assert!(hinge.collider_layers().intersects(LayerMask::WALLS));
    }
}
