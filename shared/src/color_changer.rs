//! An object that takes a random color each time it is used.

use bevy::prelude::*;
use rand::Rng;

use crate::interactable::{InteractContext, Interactable, ObjectId, WorldEffect};

#[derive(Clone, Debug)]
pub struct ColorChanger {
    pub id: ObjectId,
}

impl ColorChanger {
    pub fn new(id: ObjectId) -> Self {
        Self { id }
    }
}

impl Interactable for ColorChanger {
    fn describe(&self) -> &str {
        "Change to random color"
    }

    fn activate(&mut self, ctx: &mut InteractContext<'_>) {
        let rng = ctx.rng();
        let color = Color::srgb(rng.gen(), rng.gen(), rng.gen());
        debug!("ColorChanger {:?}: new color {:?}", self.id, color);
        ctx.emit(WorldEffect::Tint { object: self.id, color });
    }
}
