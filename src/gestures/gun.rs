//! Finger-gun: make a fist, point the index, drop the thumb to shoot.
//!
//! Poses are judged on the right hand from the wrist: the index finger
//! through its mcp joint (fist vs aim) and the thumb through its dip joint
//! (shot).  Only pose changes fire; holding a pose does not repeat.  That
//! includes starting over: after `ended`, a fist that is still held does
//! not begin again until the hand leaves the fist pose and returns.

use std::any::Any;

use crate::event::{GestureKind, GestureState, TriggerKind};
use crate::frame::{Finger, Hand, Joint, Position};
use crate::predicates::{is_bend, is_straight};
use crate::processor::{GestureBehavior, GestureContext};

/// Momentary hand shape seen by the gun gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GunPose {
    /// Index curled toward the wrist.
    Fist,
    /// Index extended.
    Aim,
    /// Thumb folded down.
    Shot,
}

impl GunPose {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fist => "fist",
            Self::Aim => "aim",
            Self::Shot => "shot",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Gun {
    last_pose: Option<GunPose>,
}

impl Gun {
    /// Pose seen on the previous non-empty frame.
    pub fn last_pose(&self) -> Option<GunPose> {
        self.last_pose
    }

    fn classify(ctx: &GestureContext<'_>) -> Option<GunPose> {
        let wrist = ctx.wrist(Hand::Right);
        let at = |finger, joint| ctx.joint(Hand::Right, finger, joint);

        if is_bend(wrist, at(Finger::Thumb, Joint::Dip), at(Finger::Thumb, Joint::Tip)) {
            return Some(GunPose::Shot);
        }
        let index_mcp = at(Finger::Index, Joint::Mcp);
        let index_tip = at(Finger::Index, Joint::Tip);
        if is_straight(wrist, index_mcp, index_tip) {
            Some(GunPose::Aim)
        } else if is_bend(wrist, index_mcp, index_tip) {
            Some(GunPose::Fist)
        } else {
            None
        }
    }

    /// Barrel: index tip then index mcp.
    fn barrel(ctx: &GestureContext<'_>) -> Vec<Position> {
        match (
            ctx.joint(Hand::Right, Finger::Index, Joint::Tip),
            ctx.joint(Hand::Right, Finger::Index, Joint::Mcp),
        ) {
            (Some(tip), Some(mcp)) => vec![tip, mcp],
            _ => Vec::new(),
        }
    }
}

impl GestureBehavior for Gun {
    fn kind(&self) -> GestureKind {
        GestureKind::Gun
    }

    fn check_gesture(&mut self, ctx: &mut GestureContext<'_>) {
        let pose = Self::classify(ctx);
        let changed = pose != self.last_pose;

        match (ctx.state(), pose) {
            // A fist carried over from the previous frame is not a new start.
            (GestureState::Unknown, Some(GunPose::Fist)) if changed => {
                ctx.set_state(GestureState::WaitForNextPose);
                let points = Self::barrel(ctx);
                ctx.began(points);
            }
            (GestureState::WaitForNextPose, Some(GunPose::Aim)) => {
                let points = Self::barrel(ctx);
                ctx.moved(points);
            }
            (GestureState::WaitForNextPose, Some(GunPose::Shot)) if changed => {
                let points = Self::barrel(ctx);
                ctx.fired(points, TriggerKind::Shoot);
            }
            (GestureState::WaitForNextPose, Some(GunPose::Fist)) if changed => {
                ctx.set_state(GestureState::Unknown);
                let points = Self::barrel(ctx);
                ctx.ended(points);
            }
            _ => {}
        }

        self.last_pose = pose;
    }

    fn reset(&mut self) {
        self.last_pose = None;
    }

    fn status_fields(&self) -> String {
        format!(
            " :last-pose {}",
            self.last_pose.map(|p| p.as_str()).unwrap_or("nil")
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
