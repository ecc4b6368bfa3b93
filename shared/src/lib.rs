//! Gameplay core shared by the client and tests.
//!
//! Everything in here is engine-independent apart from Bevy's math types and log macros:
//! plain structs and functions driven once per frame by the client's systems.

pub mod camera_bob;
pub mod color_changer;
pub mod controller;
pub mod deferred;
pub mod door;
pub mod footsteps;
pub mod input;
pub mod interactable;
pub mod look;
pub mod movement;
pub mod physics;
pub mod settings;
pub mod state;
pub mod targeting;

pub use camera_bob::BobParams;
pub use color_changer::ColorChanger;
pub use controller::{FrameContext, FrameOutput, PlayerController};
pub use deferred::{Deferred, DeferredQueue};
pub use door::{Door, DoorKind, DoorState};
pub use footsteps::{FootstepPools, SurfaceKind};
pub use input::{ButtonPhase, FrameInput};
pub use interactable::{
    ActorId, InteractContext, Interactable, InteractableSet, ObjectId, WorldEffect,
};
pub use physics::{CharacterBody, LayerMask, PhysicsQuery, RayHit, SceneColliders};
pub use settings::{ControllerSettings, SettingsError};
pub use state::PlayerState;
pub use targeting::InteractionPrompt;
