//! The "interact with the thing I'm looking at" contract.
//!
//! Any object the player can target implements [`Interactable`]. Objects never touch the engine
//! directly: activation pushes [`WorldEffect`]s (animation cues, tints) that the client applies,
//! and may schedule fire-and-forget continuations on the [`DeferredQueue`].

use std::collections::HashMap;

use bevy::prelude::*;
use rand::RngCore;

use crate::deferred::{Deferred, DeferredQueue};

/// Identity of an interactable object in the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

/// Identity of something that can interact (the player).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ActorId(pub u32);

/// Presentation request produced by an activation.
#[derive(Clone, Debug, PartialEq)]
pub enum WorldEffect {
    /// Play a named animation cue on the object.
    PlayAnimation { object: ObjectId, cue: &'static str },
    /// Recolor the object's material.
    Tint { object: ObjectId, color: Color },
}

/// What an activation can see and do.
pub struct InteractContext<'a> {
    /// Elapsed time in seconds.
    pub now: f32,
    actors: &'a [(ActorId, Vec3)],
    effects: &'a mut Vec<WorldEffect>,
    deferred: &'a mut DeferredQueue,
    rng: &'a mut dyn RngCore,
}

impl<'a> InteractContext<'a> {
    pub fn new(
        now: f32,
        actors: &'a [(ActorId, Vec3)],
        effects: &'a mut Vec<WorldEffect>,
        deferred: &'a mut DeferredQueue,
        rng: &'a mut dyn RngCore,
    ) -> Self {
        Self {
            now,
            actors,
            effects,
            deferred,
            rng,
        }
    }

    pub fn actor_position(&self, actor: ActorId) -> Option<Vec3> {
        self.actors
            .iter()
            .find(|(id, _)| *id == actor)
            .map(|(_, position)| *position)
    }

    pub fn emit(&mut self, effect: WorldEffect) {
        self.effects.push(effect);
    }

    /// Schedule a continuation `delay` seconds from now. It cannot be cancelled.
    pub fn defer(&mut self, delay: f32, continuation: Deferred) {
        self.deferred.schedule(self.now + delay, continuation);
    }

    pub fn rng(&mut self) -> &mut dyn RngCore {
        &mut *self.rng
    }
}

/// Capability of being targeted and activated by the player.
pub trait Interactable: Send + Sync {
    /// Prompt text shown while the object is targeted.
    fn describe(&self) -> &str;

    /// Act on the object. Must not block; failures are silent no-ops.
    fn activate(&mut self, ctx: &mut InteractContext<'_>);
}

/// All interactables in the scene, addressed by the ids their colliders carry.
#[derive(Resource, Default)]
pub struct InteractableSet {
    objects: HashMap<ObjectId, Box<dyn Interactable>>,
    next_id: u32,
}

impl InteractableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve an id before the object exists (objects usually need their own id).
    pub fn allocate_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    pub fn insert(&mut self, id: ObjectId, object: impl Interactable + 'static) {
        self.next_id = self.next_id.max(id.0.saturating_add(1));
        self.objects.insert(id, Box::new(object));
    }

    pub fn get(&self, id: ObjectId) -> Option<&dyn Interactable> {
        self.objects.get(&id).map(|object| object.as_ref())
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut (dyn Interactable + 'static)> {
        self.objects.get_mut(&id).map(|object| object.as_mut())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
