//! Hinged doors: room doors, fridge doors and closet doors.
//!
//! Each door is a two-state machine. Activation flips the state immediately and cues the
//! matching animation; playback is not tracked. A second activation while the swing is still
//! playing is accepted and cues the opposite animation, interrupting the first.

use bevy::prelude::*;

use crate::deferred::Deferred;
use crate::interactable::{ActorId, InteractContext, Interactable, ObjectId, WorldEffect};

/// Actors at or beyond this distance cannot operate a door.
pub const DOOR_RANGE: f32 = 15.0;

/// Pacing delay after an animation cue.
pub const DOOR_ANIMATION_DELAY: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DoorKind {
    Door,
    Fridge,
    /// Second fridge compartment; its animation clips carry a suffix.
    FridgeLower,
    Closet,
}

impl DoorKind {
    pub const fn label(&self) -> &'static str {
        match self {
            DoorKind::Door | DoorKind::Closet => "Open the door",
            DoorKind::Fridge | DoorKind::FridgeLower => "Open the fridge",
        }
    }

    pub const fn opening_cue(&self) -> &'static str {
        match self {
            DoorKind::FridgeLower => "Opening 1",
            _ => "Opening",
        }
    }

    pub const fn closing_cue(&self) -> &'static str {
        match self {
            DoorKind::FridgeLower => "Closing 1",
            _ => "Closing",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DoorState {
    #[default]
    Closed,
    Open,
}

#[derive(Clone, Debug)]
pub struct Door {
    pub id: ObjectId,
    pub kind: DoorKind,
    pub state: DoorState,
    /// World position used for the range check.
    pub position: Vec3,
    /// Who may operate this door. Unset means nobody.
    pub actor: Option<ActorId>,
}

impl Door {
    pub fn new(id: ObjectId, kind: DoorKind, position: Vec3) -> Self {
        Self {
            id,
            kind,
            state: DoorState::Closed,
            position,
            actor: None,
        }
    }

    pub fn with_actor(mut self, actor: ActorId) -> Self {
        self.actor = Some(actor);
        self
    }

    pub fn is_open(&self) -> bool {
        self.state == DoorState::Open
    }
}

impl Interactable for Door {
    fn describe(&self) -> &str {
        self.kind.label()
    }

    fn activate(&mut self, ctx: &mut InteractContext<'_>) {
        let Some(actor) = self.actor else {
            return;
        };
        let Some(actor_position) = ctx.actor_position(actor) else {
            return;
        };
        if actor_position.distance(self.position) >= DOOR_RANGE {
            return;
        }

        let cue = match self.state {
            DoorState::Closed => {
                debug!("Door {:?}: opening", self.id);
                self.state = DoorState::Open;
                self.kind.opening_cue()
            }
            DoorState::Open => {
                debug!("Door {:?}: closing", self.id);
                self.state = DoorState::Closed;
                self.kind.closing_cue()
            }
        };

        ctx.emit(WorldEffect::PlayAnimation { object: self.id, cue });
        ctx.defer(
            DOOR_ANIMATION_DELAY,
            Deferred::AnimationSettled { object: self.id, cue },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deferred::DeferredQueue;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const PLAYER: ActorId = ActorId(1);

    fn activate_from(door: &mut Door, actor_at: Vec3) -> Vec<WorldEffect> {
        let actors = [(PLAYER, actor_at)];
        let mut effects = Vec::new();
        let mut deferred = DeferredQueue::default();
        let mut rng = StdRng::seed_from_u64(0);
        let mut ctx = InteractContext::new(0.0, &actors, &mut effects, &mut deferred, &mut rng);
        door.activate(&mut ctx);
        effects
    }

    #[test]
    fn test_door_toggles() {
        let mut door = Door::new(ObjectId(3), DoorKind::Door, Vec3::ZERO).with_actor(PLAYER);
        assert_eq!(door.state, DoorState::Closed);

        let effects = activate_from(&mut door, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(door.state, DoorState::Open);
        assert_eq!(
            effects,
            vec![WorldEffect::PlayAnimation { object: ObjectId(3), cue: "Opening" }]
        );

        let effects = activate_from(&mut door, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(door.state, DoorState::Closed);
        assert_eq!(
            effects,
            vec![WorldEffect::PlayAnimation { object: ObjectId(3), cue: "Closing" }]
        );
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut door = Door::new(ObjectId(0), DoorKind::Closet, Vec3::ZERO).with_actor(PLAYER);

        assert!(activate_from(&mut door, Vec3::new(20.0, 0.0, 0.0)).is_empty());
        assert_eq!(door.state, DoorState::Closed);

        // Exactly at range is still too far
        assert!(activate_from(&mut door, Vec3::new(DOOR_RANGE, 0.0, 0.0)).is_empty());
        assert_eq!(door.state, DoorState::Closed);
    }

    #[test]
    fn test_missing_actor_is_ignored() {
        let mut door = Door::new(ObjectId(0), DoorKind::Fridge, Vec3::ZERO);
        assert!(activate_from(&mut door, Vec3::ZERO).is_empty());
        assert!(!door.is_open());

        // Actor configured but not present in the scene
        let mut door = door.with_actor(ActorId(9));
        assert!(activate_from(&mut door, Vec3::ZERO).is_empty());
        assert!(!door.is_open());
    }

    #[test]
    fn test_activation_schedules_continuation() {
        let mut door = Door::new(ObjectId(5), DoorKind::FridgeLower, Vec3::ZERO).with_actor(PLAYER);
        let actors = [(PLAYER, Vec3::ZERO)];
        let mut effects = Vec::new();
        let mut deferred = DeferredQueue::default();
        let mut rng = StdRng::seed_from_u64(0);
        let mut ctx = InteractContext::new(10.0, &actors, &mut effects, &mut deferred, &mut rng);

        door.activate(&mut ctx);

        assert!(deferred.drain_due(10.49).is_empty());
        assert_eq!(
            deferred.drain_due(10.5),
            vec![Deferred::AnimationSettled { object: ObjectId(5), cue: "Opening 1" }]
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(DoorKind::Door.label(), "Open the door");
        assert_eq!(DoorKind::Closet.label(), "Open the door");
        assert_eq!(DoorKind::Fridge.label(), "Open the fridge");
        assert_eq!(DoorKind::FridgeLower.closing_cue(), "Closing 1");
    }
}
