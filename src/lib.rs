//! Hand-gesture recognition core.
//!
//! Turns per-frame, confidence-qualified 2-D hand joints into debounced
//! gesture lifecycle events.  Frames flow
//! `assign` → `coordinator::GestureSet` → `processor::GestureProcessor`
//! → `gestures::*`, and events come back as `event::GestureEvent` values.

pub mod assign;
pub mod config;
pub mod coordinator;
pub mod event;
pub mod evidence;
pub mod frame;
pub mod gestures;
pub mod predicates;
pub mod processor;

#[cfg(test)]
mod fixtures;

pub use assign::{assign_hands, Assignment};
pub use config::GestureConfig;
pub use coordinator::{GestureSet, SetStats};
pub use event::{
    CursorTrigger, GestureDelegate, GestureEvent, GestureKind, GestureState, TriggerKind,
};
pub use evidence::{EvidenceAccumulator, EvidenceState};
pub use frame::{Finger, Frame, Hand, HandJointSet, Joint, JointSample, Position, SavedPose};
pub use processor::{GestureBehavior, GestureContext, GestureProcessor};
