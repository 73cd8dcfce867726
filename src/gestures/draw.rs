//! Pencil-pose drawing with open-hand canvas clear.
//!
//! Pencil pose: right index finger straight with the thumb tip resting near
//! the index pip.  Holding it draws (index tip tracked every frame); an open
//! hand seen from `Unknown` fires a one-shot canvas clear.

use std::any::Any;

use crate::config::GestureConfig;
use crate::event::{GestureKind, GestureState, TriggerKind};
use crate::frame::{Finger, Hand, Joint};
use crate::predicates::near;
use crate::processor::{GestureBehavior, GestureContext};

#[derive(Debug, Clone)]
pub struct Draw {
    /// Thumb-tip to index-pip distance that counts as holding the pencil.
    pub pencil_distance: f64,
}

impl Default for Draw {
    fn default() -> Self {
        Self {
            pencil_distance: 100.0,
        }
    }
}

impl Draw {
    pub fn from_config(config: &GestureConfig) -> Self {
        Self {
            pencil_distance: config.pencil_distance,
        }
    }

    fn is_pencil_pose(&self, ctx: &GestureContext<'_>) -> bool {
        ctx.is_finger_straight(Hand::Right, Finger::Index)
            && near(
                ctx.joint(Hand::Right, Finger::Thumb, Joint::Tip),
                ctx.joint(Hand::Right, Finger::Index, Joint::Pip),
                self.pencil_distance,
            )
    }

    fn is_open_hand(ctx: &GestureContext<'_>) -> bool {
        Finger::DIGITS
            .iter()
            .all(|&finger| ctx.is_finger_straight(Hand::Right, finger))
    }
}

impl GestureBehavior for Draw {
    fn kind(&self) -> GestureKind {
        GestureKind::Draw
    }

    fn check_gesture(&mut self, ctx: &mut GestureContext<'_>) {
        let tip: Vec<_> = ctx
            .joint(Hand::Right, Finger::Index, Joint::Tip)
            .into_iter()
            .collect();

        match ctx.state() {
            GestureState::Unknown => {
                if self.is_pencil_pose(ctx) {
                    ctx.set_state(GestureState::WaitForRelease);
                    ctx.began(tip);
                } else if Self::is_open_hand(ctx) {
                    ctx.fired(Vec::new(), TriggerKind::CanvasClear);
                }
            }
            GestureState::WaitForRelease => {
                if self.is_pencil_pose(ctx) {
                    ctx.moved(tip);
                } else {
                    ctx.set_state(GestureState::Unknown);
                    ctx.ended(tip);
                }
            }
            _ => {}
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
