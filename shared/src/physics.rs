//! Physics queries and the kinematic character body.
//!
//! The gameplay core only ever asks two kinds of question of the world: "what does this ray
//! hit first" and "where is the ground under me". `PhysicsQuery` is that seam. The scene used by
//! the client (and by tests) is a flat list of axis-aligned boxes, which is plenty for an
//! apartment interior.

use bevy::prelude::*;

use crate::footsteps::SurfaceKind;
use crate::interactable::ObjectId;

/// Collision layers a collider belongs to / a query considers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Walkable surfaces. The footstep probe only looks at these.
    pub const TERRAIN: LayerMask = LayerMask(1 << 0);
    /// Static geometry that blocks horizontal movement.
    pub const WALLS: LayerMask = LayerMask(1 << 1);
    /// Furniture and interactable objects.
    pub const PROPS: LayerMask = LayerMask(1 << 2);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    #[inline]
    pub const fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub const fn union(self, other: LayerMask) -> LayerMask {
        LayerMask(self.0 | other.0)
    }
}

/// Nearest hit of a ray cast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub distance: f32,
    pub point: Vec3,
    /// Surface tag of the collider, if it carries one.
    pub surface: Option<SurfaceKind>,
    /// Interactable object owning the collider, if any.
    pub object: Option<ObjectId>,
}

/// Ray queries against the scene.
pub trait PhysicsQuery {
    /// First collider on `mask` hit by the ray within `max_distance`.
    ///
    /// `direction` need not be normalized; a zero direction hits nothing.
    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit>;

    /// First collider on `mask` met by an upright body of `radius` moving from `origin`.
    ///
    /// Colliders are grown by `radius` on X and Z, so the hit distance is how far the body's
    /// center may travel before its side touches. A body already touching a collider is only
    /// stopped when moving further into it.
    fn sweep_body(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        radius: f32,
        mask: LayerMask,
    ) -> Option<RayHit>;
}

/// Axis-aligned box collider.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxCollider {
    pub center: Vec3,
    pub half_extents: Vec3,
    pub layers: LayerMask,
    pub surface: Option<SurfaceKind>,
    pub object: Option<ObjectId>,
}

impl BoxCollider {
    pub fn new(center: Vec3, half_extents: Vec3, layers: LayerMask) -> Self {
        Self {
            center,
            half_extents,
            layers,
            surface: None,
            object: None,
        }
    }

    pub fn with_surface(mut self, surface: SurfaceKind) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn with_object(mut self, object: ObjectId) -> Self {
        self.object = Some(object);
        self
    }

    /// Slab test. Returns the entry distance along a normalized `dir`.
    ///
    /// Rays starting inside the box do not hit it.
    fn ray_entry(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        let min = self.center - self.half_extents;
        let max = self.center + self.half_extents;

        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;

        for axis in 0..3 {
            let o = origin[axis];
            let d = dir[axis];
            if d.abs() < 1e-8 {
                if o < min[axis] || o > max[axis] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let mut t0 = (min[axis] - o) * inv;
            let mut t1 = (max[axis] - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_near = t_near.max(t0);
            t_far = t_far.min(t1);
            if t_near > t_far {
                return None;
            }
        }

        (t_near >= 0.0).then_some(t_near)
    }

    fn contains(&self, point: Vec3) -> bool {
        (point - self.center).abs().cmple(self.half_extents).all()
    }

    /// Outward normal of the side face (X or Z) nearest to `point`.
    fn nearest_side_normal(&self, point: Vec3) -> Vec3 {
        let d = point - self.center;
        let gap_x = self.half_extents.x - d.x.abs();
        let gap_z = self.half_extents.z - d.z.abs();
        if gap_x < gap_z {
            Vec3::X * d.x.signum()
        } else {
            Vec3::Z * d.z.signum()
        }
    }

    /// Entry distance of a body of `radius` moving along a normalized `dir`.
    fn sweep_entry(&self, origin: Vec3, dir: Vec3, radius: f32) -> Option<f32> {
        let grown = Self {
            half_extents: self.half_extents + Vec3::new(radius, 0.0, radius),
            ..*self
        };
        if grown.contains(origin) {
            return (dir.dot(grown.nearest_side_normal(origin)) < 0.0).then_some(0.0);
        }
        grown.ray_entry(origin, dir)
    }
}

/// The static collision scene.
#[derive(Resource, Clone, Debug, Default)]
pub struct SceneColliders {
    colliders: Vec<BoxCollider>,
}

impl SceneColliders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, collider: BoxCollider) {
        self.colliders.push(collider);
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Collider owned by an interactable, for objects that move (door panels).
    pub fn object_collider_mut(&mut self, object: ObjectId) -> Option<&mut BoxCollider> {
        self.colliders.iter_mut().find(|c| c.object == Some(object))
    }

    fn nearest(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
        entry: impl Fn(&BoxCollider, Vec3) -> Option<f32>,
    ) -> Option<RayHit> {
        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO {
            return None;
        }

        let mut closest: Option<(f32, &BoxCollider)> = None;
        for collider in self.colliders.iter().filter(|c| c.layers.intersects(mask)) {
            let Some(t) = entry(collider, dir) else {
                continue;
            };
            if t > max_distance {
                continue;
            }
            if closest.map_or(true, |(best, _)| t < best) {
                closest = Some((t, collider));
            }
        }

        closest.map(|(t, collider)| RayHit {
            distance: t,
            point: origin + dir * t,
            surface: collider.surface,
            object: collider.object,
        })
    }
}

impl PhysicsQuery for SceneColliders {
    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        self.nearest(origin, direction, max_distance, mask, |collider, dir| {
            collider.ray_entry(origin, dir)
        })
    }

    fn sweep_body(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        radius: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        self.nearest(origin, direction, max_distance, mask, |collider, dir| {
            collider.sweep_entry(origin, dir, radius)
        })
    }
}

/// Kinematic first-person body.
///
/// Position is at the feet. Yaw is in radians about +Y (Bevy: -Z is forward).
#[derive(Clone, Debug, PartialEq)]
pub struct CharacterBody {
    pub position: Vec3,
    pub yaw: f32,
    /// Displacement actually applied by the last move, per second.
    pub velocity: Vec3,
    pub grounded: bool,
    pub radius: f32,
}

impl CharacterBody {
    /// Height above the feet from which the ground probe starts (lets the body climb lips).
    const STEP_HEIGHT: f32 = 0.3;
    /// Distance within which the body snaps onto the ground.
    const SKIN: f32 = 0.05;
    /// Height of the sweep used to block horizontal movement.
    const KNEE_HEIGHT: f32 = 0.5;

    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            velocity: Vec3::ZERO,
            grounded: false,
            radius: 0.3,
        }
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    pub fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    /// Apply one frame's displacement against the scene.
    ///
    /// - Horizontal motion keeps `radius` clear of walls, one axis at a time so the body slides
    ///   along them
    /// - Downward motion lands on terrain and sets `grounded`
    /// - Upward motion always leaves the ground
    pub fn move_and_collide(&mut self, displacement: Vec3, physics: &impl PhysicsQuery, dt: f32) {
        let start = self.position;

        // --- Horizontal ---
        for step in [Vec3::new(displacement.x, 0.0, 0.0), Vec3::new(0.0, 0.0, displacement.z)] {
            let distance = step.length();
            if distance <= 1e-6 {
                continue;
            }
            let dir = step / distance;
            let knee = self.position + Vec3::Y * Self::KNEE_HEIGHT;
            let allowed = physics
                .sweep_body(knee, dir, distance, self.radius, LayerMask::WALLS)
                .map_or(distance, |hit| hit.distance.min(distance));
            self.position += dir * allowed;
        }

        // --- Vertical ---
        let dy = displacement.y;
        if dy > 0.0 {
            self.position.y += dy;
            self.grounded = false;
        } else {
            let probe_origin = self.position + Vec3::Y * Self::STEP_HEIGHT;
            let probe_len = Self::STEP_HEIGHT + (-dy) + Self::SKIN;
            let target_y = self.position.y + dy;
            match physics.cast_ray(probe_origin, Vec3::NEG_Y, probe_len, LayerMask::TERRAIN) {
                Some(hit) if target_y <= hit.point.y + Self::SKIN => {
                    self.position.y = hit.point.y;
                    self.grounded = true;
                }
                _ => {
                    self.position.y = target_y;
                    self.grounded = false;
                }
            }
        }

        self.velocity = if dt > 0.0 {
            (self.position - start) / dt
        } else {
            Vec3::ZERO
        };
    }
}
