//! First-person player controller.
//!
//! Owns all player-side state and runs the per-frame steps in a fixed order:
//!
//! 1. latch input, run due continuations
//! 2. movement: ground movement, look, footsteps
//! 3. interaction targeting (sees this frame's position)
//! 4. camera bob, in a separate late step after the frame's motion has settled

use bevy::prelude::*;
use rand::RngCore;

use crate::camera_bob::{camera_bob, BobParams};
use crate::deferred::{Deferred, DeferredQueue};
use crate::footsteps::{update_footsteps, FootstepPools};
use crate::input::FrameInput;
use crate::interactable::{ActorId, InteractContext, InteractableSet, WorldEffect};
use crate::look::{apply_look, camera_rotation};
use crate::movement::ground_movement;
use crate::physics::{CharacterBody, PhysicsQuery};
use crate::settings::ControllerSettings;
use crate::state::PlayerState;
use crate::targeting::{update_targeting, TargetingResult};

/// Height above the feet the footstep probe starts from.
const FOOTSTEP_PROBE_LIFT: f32 = 0.5;

/// Everything the controller borrows from the world for one frame.
pub struct FrameContext<'a, P, C> {
    /// Frame time in seconds.
    pub dt: f32,
    /// Elapsed time in seconds.
    pub now: f32,
    pub physics: &'a P,
    pub footsteps: &'a FootstepPools<C>,
    pub interactables: &'a mut InteractableSet,
    pub rng: &'a mut dyn RngCore,
}

/// What the frame asks of the presentation layer.
#[derive(Clone, Debug)]
pub struct FrameOutput<C> {
    /// Footstep clip to play, if one fired.
    pub footstep: Option<C>,
    pub targeting: TargetingResult,
    /// Effects requested by activations this frame.
    pub effects: Vec<WorldEffect>,
    /// Continuations that came due this frame.
    pub settled: Vec<Deferred>,
}

#[derive(Component, Clone, Debug)]
pub struct PlayerController {
    pub settings: ControllerSettings,
    pub state: PlayerState,
    pub body: CharacterBody,
    /// Identity interactables use to locate the player.
    pub actor: ActorId,
    deferred: DeferredQueue,
}

impl PlayerController {
    pub fn new(settings: ControllerSettings, position: Vec3, actor: ActorId) -> Self {
        Self {
            settings,
            state: PlayerState::new(),
            body: CharacterBody::new(position),
            actor,
            deferred: DeferredQueue::default(),
        }
    }

    pub fn eye_position(&self) -> Vec3 {
        self.body.position + Vec3::Y * self.settings.eye_height
    }

    pub fn camera_rotation(&self) -> Quat {
        camera_rotation(&self.body, self.state.pitch)
    }

    /// Direction through the centre of the view.
    pub fn view_direction(&self) -> Vec3 {
        self.camera_rotation() * Vec3::NEG_Z
    }

    pub fn pending_continuations(&self) -> usize {
        self.deferred.len()
    }

    /// Main per-frame step: movement, look, footsteps, then interaction targeting.
    pub fn update<P, C>(&mut self, input: &FrameInput, ctx: FrameContext<'_, P, C>) -> FrameOutput<C>
    where
        P: PhysicsQuery,
        C: Clone,
    {
        let FrameContext {
            dt,
            now,
            physics,
            footsteps,
            interactables,
            rng,
        } = ctx;

        self.state.latch(input);

        let settled = self.deferred.drain_due(now);
        for continuation in &settled {
            debug!("Continuation settled: {:?}", continuation);
        }

        // --- Movement ---
        let displacement = ground_movement(&mut self.state, &self.settings, &self.body, dt);
        self.body.move_and_collide(displacement, physics, dt);
        apply_look(&mut self.state, &self.settings, &mut self.body, dt);

        let footstep = update_footsteps(
            &mut self.state,
            &self.settings,
            self.body.grounded,
            self.body.velocity.length(),
            now,
            self.body.position + Vec3::Y * FOOTSTEP_PROBE_LIFT,
            physics,
            footsteps,
            &mut *rng,
        )
        .cloned();

        // --- Interaction ---
        let origin = self.eye_position();
        let direction = self.view_direction();
        let actors = [(self.actor, self.body.position)];
        let mut effects = Vec::new();
        let mut interact_ctx = InteractContext::new(now, &actors, &mut effects, &mut self.deferred, rng);
        let targeting = update_targeting(
            &mut self.state,
            physics,
            interactables,
            origin,
            direction,
            self.settings.interaction_distance,
            &mut interact_ctx,
        );

        FrameOutput {
            footstep,
            targeting,
            effects,
            settled,
        }
    }

    /// Late step: camera-bob gains from the settled motion of this frame.
    pub fn late_update(&self) -> BobParams {
        camera_bob(
            &self.settings,
            self.body.grounded,
            self.body.velocity.length(),
            self.state.current_speed_multiplier,
        )
    }
}
