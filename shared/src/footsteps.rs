//! Surface-dependent footstep audio.

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::physics::{LayerMask, PhysicsQuery};
use crate::settings::ControllerSettings;
use crate::state::PlayerState;

/// Material underfoot, as tagged on terrain colliders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    Ground,
    Floor,
    Wood,
    Carpet,
}

pub const ALL_SURFACE_KINDS: [SurfaceKind; 4] = [
    SurfaceKind::Ground,
    SurfaceKind::Floor,
    SurfaceKind::Wood,
    SurfaceKind::Carpet,
];

impl SurfaceKind {
    /// Stable tag used in scene data and asset names.
    pub const fn id(&self) -> &'static str {
        match self {
            SurfaceKind::Ground => "ground",
            SurfaceKind::Floor => "floor",
            SurfaceKind::Wood => "wood",
            SurfaceKind::Carpet => "carpet",
        }
    }

    /// Parse a surface tag (case-insensitive). Unknown tags are `None`.
    pub fn from_tag(tag: &str) -> Option<SurfaceKind> {
        ALL_SURFACE_KINDS
            .iter()
            .copied()
            .find(|kind| kind.id().eq_ignore_ascii_case(tag))
    }
}

/// One pool of interchangeable clips per surface.
///
/// Generic over the clip type so the client can store asset handles and tests can use names.
#[derive(Clone, Debug)]
pub struct FootstepPools<C> {
    pub ground: Vec<C>,
    pub floor: Vec<C>,
    pub wood: Vec<C>,
    pub carpet: Vec<C>,
}

impl<C> Default for FootstepPools<C> {
    fn default() -> Self {
        Self {
            ground: Vec::new(),
            floor: Vec::new(),
            wood: Vec::new(),
            carpet: Vec::new(),
        }
    }
}

impl<C> FootstepPools<C> {
    /// Pool for a probed surface. No surface (or an untagged one) uses the ground pool.
    pub fn for_surface(&self, surface: Option<SurfaceKind>) -> &[C] {
        match surface {
            Some(SurfaceKind::Floor) => &self.floor,
            Some(SurfaceKind::Wood) => &self.wood,
            Some(SurfaceKind::Carpet) => &self.carpet,
            Some(SurfaceKind::Ground) | None => &self.ground,
        }
    }

    pub fn pool_mut(&mut self, surface: SurfaceKind) -> &mut Vec<C> {
        match surface {
            SurfaceKind::Ground => &mut self.ground,
            SurfaceKind::Floor => &mut self.floor,
            SurfaceKind::Wood => &mut self.wood,
            SurfaceKind::Carpet => &mut self.carpet,
        }
    }
}

/// Probe straight down from `origin` for the surface underfoot.
pub fn probe_surface(
    physics: &impl PhysicsQuery,
    origin: Vec3,
    max_distance: f32,
) -> Option<SurfaceKind> {
    physics
        .cast_ray(origin, Vec3::NEG_Y, max_distance, LayerMask::TERRAIN)
        .and_then(|hit| hit.surface)
}

/// Seconds until the next footstep may fire at the given speed multiplier.
pub fn step_interval(settings: &ControllerSettings, speed_multiplier: f32) -> f32 {
    if speed_multiplier <= 0.0 {
        return settings.step_interval.max(settings.min_step_interval);
    }
    (settings.step_interval / speed_multiplier).max(settings.min_step_interval)
}

/// Fire a footstep if one is due.
///
/// Returns the clip to play, if any. The timer is rescheduled whenever a step is due, even when
/// the surface's pool is empty.
pub fn update_footsteps<'a, C, R>(
    state: &mut PlayerState,
    settings: &ControllerSettings,
    grounded: bool,
    speed: f32,
    now: f32,
    probe_origin: Vec3,
    physics: &impl PhysicsQuery,
    pools: &'a FootstepPools<C>,
    rng: &mut R,
) -> Option<&'a C>
where
    R: Rng + ?Sized,
{
    if !grounded || speed <= settings.min_move_speed {
        return None;
    }
    if now < state.next_step_time {
        return None;
    }

    let surface = probe_surface(physics, probe_origin, settings.footstep_probe_distance);
    let clip = pools.for_surface(surface).choose(rng);

    state.next_step_time = now + step_interval(settings, state.current_speed_multiplier);
    clip
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{BoxCollider, SceneColliders};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pools() -> FootstepPools<&'static str> {
        FootstepPools {
            ground: vec!["ground_1", "ground_2"],
            floor: vec!["floor_1"],
            wood: vec!["wood_1", "wood_2", "wood_3"],
            carpet: Vec::new(),
        }
    }

    fn scene_with(surface: Option<SurfaceKind>) -> SceneColliders {
        let mut scene = SceneColliders::new();
        let mut floor =
            BoxCollider::new(Vec3::new(0.0, -0.5, 0.0), Vec3::new(10.0, 0.5, 10.0), LayerMask::TERRAIN);
        floor.surface = surface;
        scene.insert(floor);
        scene
    }

    #[test]
    fn test_surface_tags() {
        assert_eq!(SurfaceKind::from_tag("Wood"), Some(SurfaceKind::Wood));
        assert_eq!(SurfaceKind::from_tag("carpet"), Some(SurfaceKind::Carpet));
        assert_eq!(SurfaceKind::from_tag("Lava"), None);
    }

    #[test]
    fn test_unknown_surface_uses_ground_pool() {
        let pools = pools();
        assert_eq!(pools.for_surface(None), pools.ground.as_slice());
        assert_eq!(pools.for_surface(Some(SurfaceKind::Wood)), pools.wood.as_slice());
    }

    #[test]
    fn test_probe_reads_surface_tag() {
        let scene = scene_with(Some(SurfaceKind::Carpet));
        assert_eq!(probe_surface(&scene, Vec3::new(0.0, 1.0, 0.0), 5.0), Some(SurfaceKind::Carpet));
        assert_eq!(probe_surface(&scene, Vec3::new(0.0, 10.0, 0.0), 5.0), None);
    }

    #[test]
    fn test_cadence_halves_when_sprinting() {
        let settings = ControllerSettings::default();
        let scene = scene_with(Some(SurfaceKind::Wood));
        let pools = pools();
        let mut rng = StdRng::seed_from_u64(7);
        let mut state = PlayerState::new();
        state.current_speed_multiplier = 2.0;

        let origin = Vec3::new(0.0, 0.5, 0.0);
        let first = update_footsteps(&mut state, &settings, true, 5.0, 1.0, origin, &scene, &pools, &mut rng);
        assert!(first.is_some_and(|clip| clip.starts_with("wood")));
        assert!((state.next_step_time - 1.25).abs() < 1e-6);

        let early = update_footsteps(&mut state, &settings, true, 5.0, 1.2499, origin, &scene, &pools, &mut rng);
        assert!(early.is_none());

        let due = update_footsteps(&mut state, &settings, true, 5.0, 1.25, origin, &scene, &pools, &mut rng);
        assert!(due.is_some());
    }

    #[test]
    fn test_no_step_when_airborne_or_still() {
        let settings = ControllerSettings::default();
        let scene = scene_with(None);
        let pools = pools();
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = PlayerState::new();

        let origin = Vec3::new(0.0, 0.5, 0.0);
        assert!(update_footsteps(&mut state, &settings, false, 5.0, 0.0, origin, &scene, &pools, &mut rng).is_none());
        assert!(update_footsteps(&mut state, &settings, true, 0.05, 0.0, origin, &scene, &pools, &mut rng).is_none());
        assert_eq!(state.next_step_time, 0.0);
    }

    #[test]
    fn test_empty_pool_is_skipped_but_rescheduled() {
        let settings = ControllerSettings::default();
        let scene = scene_with(Some(SurfaceKind::Carpet));
        let pools = pools();
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = PlayerState::new();

        let clip = update_footsteps(&mut state, &settings, true, 5.0, 2.0, Vec3::new(0.0, 0.5, 0.0), &scene, &pools, &mut rng);
        assert!(clip.is_none());
        assert!((state.next_step_time - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_interval_floor() {
        let settings = ControllerSettings::default();
        assert!((step_interval(&settings, 100.0) - settings.min_step_interval).abs() < 1e-6);
        assert!((step_interval(&settings, 1.0) - 0.5).abs() < 1e-6);
    }
}
