//! Per-frame interaction targeting.
//!
//! A ray from the camera picks the first collider in view. If it belongs to an interactable,
//! the prompt shows its description and a pending interact request activates it. Nothing is
//! remembered between frames.

use bevy::prelude::*;

use crate::interactable::{InteractContext, InteractableSet, ObjectId};
use crate::physics::{LayerMask, PhysicsQuery};
use crate::state::PlayerState;

/// Interaction UI state for one frame.
#[derive(Resource, Clone, Debug, Default, PartialEq, Eq)]
pub struct InteractionPrompt {
    pub visible: bool,
    pub text: String,
}

impl InteractionPrompt {
    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn showing(text: impl Into<String>) -> Self {
        Self {
            visible: true,
            text: text.into(),
        }
    }
}

/// Result of one targeting step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TargetingResult {
    pub prompt: InteractionPrompt,
    /// Interactable under the crosshair this frame.
    pub target: Option<ObjectId>,
    /// Set when the target was activated this frame.
    pub activated: bool,
}

/// Cast the view ray, update the prompt and dispatch a pending interaction.
///
/// The interact request is consumed whether or not anything was activated.
pub fn update_targeting(
    state: &mut PlayerState,
    physics: &impl PhysicsQuery,
    interactables: &mut InteractableSet,
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
    ctx: &mut InteractContext<'_>,
) -> TargetingResult {
    let requested = std::mem::take(&mut state.interact_input);

    let hit = physics.cast_ray(origin, direction, max_distance, LayerMask::ALL);
    let target = hit
        .and_then(|hit| hit.object)
        .and_then(|id| interactables.get_mut(id).map(|object| (id, object)));

    let Some((id, object)) = target else {
        if requested {
            debug!("Interact request dropped: nothing to interact with");
        }
        return TargetingResult::default();
    };

    let prompt = InteractionPrompt::showing(object.describe());
    if requested {
        object.activate(ctx);
    }

    TargetingResult {
        prompt,
        target: Some(id),
        activated: requested,
    }
}
