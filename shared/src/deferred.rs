//! Timed continuations.
//!
//! An activation can ask for a second step to run a fixed time later (doors pace their swing
//! this way). Continuations run on the frame loop when due; nothing awaits them and they cannot
//! be cancelled.

use crate::interactable::ObjectId;

#[derive(Clone, Debug, PartialEq)]
pub enum Deferred {
    /// An animation cue has had its pacing delay.
    AnimationSettled { object: ObjectId, cue: &'static str },
}

#[derive(Clone, Debug, Default)]
pub struct DeferredQueue {
    pending: Vec<(f32, Deferred)>,
}

impl DeferredQueue {
    pub fn schedule(&mut self, due: f32, continuation: Deferred) {
        self.pending.push((due, continuation));
    }

    /// Remove and return every continuation due at `now`, earliest first.
    /// Ties keep scheduling order.
    pub fn drain_due(&mut self, now: f32) -> Vec<Deferred> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].0 <= now {
                due.push(self.pending.remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by(|a, b| a.0.total_cmp(&b.0));
        due.into_iter().map(|(_, continuation)| continuation).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
