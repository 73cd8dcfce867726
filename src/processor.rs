//! Gesture processor: shared state plus a per-gesture behavior.
//!
//! `GestureProcessor` owns what every gesture needs (current state, the
//! saved pose, the last delivered frame) and hands a `GestureContext` to its
//! `GestureBehavior` once per frame.  Behaviors read joints and predicates
//! through the context, change state through it, and emit lifecycle events
//! into it.  Nothing is called back; the events are returned to the owner.

use std::any::Any;
use std::fmt;

use tracing::debug;

use crate::event::{GestureEvent, GestureKind, GestureState, TriggerKind};
use crate::frame::{Finger, Frame, Hand, Joint, Position, SavedPose, GENERAL_CONFIDENCE};
use crate::predicates;

// ── Behavior trait ─────────────────────────────────────────

/// Gesture-specific recognition step.
pub trait GestureBehavior: fmt::Debug + Send {
    fn kind(&self) -> GestureKind;

    /// Advance the state machine for one non-empty frame.
    fn check_gesture(&mut self, ctx: &mut GestureContext<'_>);

    /// Clear behavior-private state (counters, last pose, buffers).
    fn reset(&mut self) {}

    /// Extra `:key value` pairs for the status s-expression.
    fn status_fields(&self) -> String {
        String::new()
    }

    fn as_any(&self) -> &dyn Any;
}

// ── Context ────────────────────────────────────────────────

/// View of a processor handed to its behavior for one frame step.
pub struct GestureContext<'a> {
    kind: GestureKind,
    frame: &'a Frame,
    state: &'a mut GestureState,
    saved: &'a mut Option<SavedPose>,
    events: &'a mut Vec<GestureEvent>,
    min_confidence: f32,
}

impl<'a> GestureContext<'a> {
    pub fn frame(&self) -> &Frame {
        self.frame
    }

    pub fn state(&self) -> GestureState {
        *self.state
    }

    /// Change state, emitting `StateChanged` when the value actually changes.
    pub fn set_state(&mut self, to: GestureState) {
        let from = *self.state;
        if from == to {
            return;
        }
        debug!(
            "gesture {}: {} -> {}",
            self.kind.as_str(),
            from.as_str(),
            to.as_str(),
        );
        *self.state = to;
        self.events.push(GestureEvent::StateChanged {
            gesture: self.kind,
            from,
            to,
        });
    }

    /// Number of labeled hands in the current frame.
    pub fn hand_count(&self) -> usize {
        self.frame.hand_count()
    }

    /// Joint position at the processor's confidence threshold.
    pub fn joint(&self, hand: Hand, finger: Finger, joint: Joint) -> Option<Position> {
        self.frame.joint_with(hand, finger, joint, self.min_confidence)
    }

    /// Joint position at an explicit confidence threshold.
    pub fn joint_with(
        &self,
        hand: Hand,
        finger: Finger,
        joint: Joint,
        min_confidence: f32,
    ) -> Option<Position> {
        self.frame.joint_with(hand, finger, joint, min_confidence)
    }

    pub fn wrist(&self, hand: Hand) -> Option<Position> {
        self.joint(hand, Finger::Wrist, Joint::Tip)
    }

    pub fn is_finger_bent(&self, hand: Hand, finger: Finger) -> bool {
        predicates::finger_bent_with(self.frame, hand, finger, self.min_confidence)
    }

    pub fn is_finger_straight(&self, hand: Hand, finger: Finger) -> bool {
        predicates::finger_straight_with(self.frame, hand, finger, self.min_confidence)
    }

    /// Snapshot the current frame as the saved pose.
    pub fn save_pose(&mut self) {
        *self.saved = Some(SavedPose::capture(self.frame));
    }

    pub fn saved_pose(&self) -> Option<&SavedPose> {
        self.saved.as_ref()
    }

    pub fn clear_saved_pose(&mut self) {
        *self.saved = None;
    }

    /// Joint position in the saved pose at the processor's threshold.
    pub fn saved_joint(&self, hand: Hand, finger: Finger, joint: Joint) -> Option<Position> {
        self.saved
            .as_ref()?
            .joint(hand, finger, joint, self.min_confidence)
    }

    pub fn began(&mut self, points: Vec<Position>) {
        self.emit(GestureEvent::Began {
            gesture: self.kind,
            points,
        });
    }

    pub fn moved(&mut self, points: Vec<Position>) {
        self.emit(GestureEvent::Moved {
            gesture: self.kind,
            points,
        });
    }

    pub fn fired(&mut self, points: Vec<Position>, trigger: TriggerKind) {
        self.emit(GestureEvent::Fired {
            gesture: self.kind,
            points,
            trigger,
        });
    }

    pub fn ended(&mut self, points: Vec<Position>) {
        self.emit(GestureEvent::Ended {
            gesture: self.kind,
            points,
        });
    }

    pub fn canceled(&mut self, points: Vec<Position>) {
        self.emit(GestureEvent::Canceled {
            gesture: self.kind,
            points,
        });
    }

    fn emit(&mut self, event: GestureEvent) {
        debug!("gesture {}: {}", self.kind.as_str(), event.name());
        self.events.push(event);
    }
}

// ── Processor ──────────────────────────────────────────────

/// One gesture's state machine.
#[derive(Debug)]
pub struct GestureProcessor {
    behavior: Box<dyn GestureBehavior>,
    state: GestureState,
    saved: Option<SavedPose>,
    /// Last frame delivered, `None` until the first frame or after reset.
    frame: Option<Frame>,
    min_confidence: f32,
    frames_seen: u64,
}

impl GestureProcessor {
    /// Create a processor in the `Unknown` state.
    pub fn new(behavior: impl GestureBehavior + 'static) -> Self {
        Self {
            behavior: Box::new(behavior),
            state: GestureState::Unknown,
            saved: None,
            frame: None,
            min_confidence: GENERAL_CONFIDENCE,
            frames_seen: 0,
        }
    }

    /// Override the joint acceptance threshold used by pose classifiers.
    pub fn with_min_confidence(mut self, min_confidence: f32) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    pub fn kind(&self) -> GestureKind {
        self.behavior.kind()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn saved_pose(&self) -> Option<&SavedPose> {
        self.saved.as_ref()
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    pub fn frames_seen(&self) -> u64 {
        self.frames_seen
    }

    /// Concrete behavior, if it is a `T`.
    pub fn behavior<T: GestureBehavior + 'static>(&self) -> Option<&T> {
        self.behavior.as_any().downcast_ref::<T>()
    }

    /// Run one recognition step.  An empty frame neither advances nor
    /// resets the state machine.
    pub fn process(&mut self, frame: &Frame) -> Vec<GestureEvent> {
        self.frame = Some(frame.clone());
        self.frames_seen += 1;

        let mut events = Vec::new();
        if frame.is_empty() {
            return events;
        }

        let mut ctx = GestureContext {
            kind: self.behavior.kind(),
            frame,
            state: &mut self.state,
            saved: &mut self.saved,
            events: &mut events,
            min_confidence: self.min_confidence,
        };
        self.behavior.check_gesture(&mut ctx);
        events
    }

    /// Return to `Unknown` with the saved pose, last frame and behavior
    /// counters cleared.
    pub fn state_reset(&mut self) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        let kind = self.behavior.kind();
        if self.state != GestureState::Unknown {
            debug!(
                "gesture {}: reset from {}",
                kind.as_str(),
                self.state.as_str()
            );
            events.push(GestureEvent::StateChanged {
                gesture: kind,
                from: self.state,
                to: GestureState::Unknown,
            });
        }
        self.state = GestureState::Unknown;
        self.saved = None;
        self.frame = None;
        self.behavior.reset();
        events
    }

    /// Abort an in-progress gesture from outside (e.g. detection lost).
    /// Emits `Canceled` when the gesture had left `Unknown`, then resets.
    pub fn cancel(&mut self) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        if self.state != GestureState::Unknown {
            let kind = self.behavior.kind();
            debug!("gesture {}: canceled", kind.as_str());
            events.push(GestureEvent::Canceled {
                gesture: kind,
                points: Vec::new(),
            });
        }
        events.extend(self.state_reset());
        events
    }

    /// Joint position in the last delivered frame.
    ///
    /// # Panics
    ///
    /// Panics if no frame has been delivered since creation or the last
    /// reset; asking for geometry before any observation is a caller bug.
    pub fn joint_position(&self, hand: Hand, finger: Finger, joint: Joint) -> Option<Position> {
        let frame = match self.frame.as_ref() {
            Some(frame) => frame,
            None => panic!(
                "gesture {}: joint lookup before any frame was delivered",
                self.kind().as_str()
            ),
        };
        frame.joint_with(hand, finger, joint, self.min_confidence)
    }

    /// Generate s-expression for status reporting.
    pub fn status_sexp(&self) -> String {
        format!(
            "(:gesture {} :state {} :saved-pose {} :frames {}{})",
            self.kind().as_str(),
            self.state.as_str(),
            if self.saved.is_some() { "t" } else { "nil" },
            self.frames_seen,
            self.behavior.status_fields(),
        )
    }
}
