//! Pointing cursor with directional triggers.
//!
//! Pointing pose: right index straight with middle and ring curled.  While
//! pointing, the index tip is tracked every frame and the pointing direction
//! (or a thumb click against the index pip) fires a trigger whenever it
//! changes.

use std::any::Any;

use crate::config::GestureConfig;
use crate::event::{CursorTrigger, GestureKind, GestureState, TriggerKind};
use crate::frame::{Finger, Hand, Joint, Position};
use crate::predicates::near;
use crate::processor::{GestureBehavior, GestureContext};

#[derive(Debug, Clone)]
pub struct Cursor {
    /// Index mcp→tip length below which no direction is reported.
    pub min_extent: f64,
    /// Thumb-tip to index-pip distance that counts as a click.
    pub click_distance: f64,
    last_trigger: Option<CursorTrigger>,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            min_extent: 40.0,
            click_distance: 60.0,
            last_trigger: None,
        }
    }
}

impl Cursor {
    pub fn from_config(config: &GestureConfig) -> Self {
        Self {
            min_extent: config.cursor_min_extent,
            click_distance: config.cursor_click_distance,
            last_trigger: None,
        }
    }

    /// Trigger reported on the most recent pointing frame.
    pub fn last_trigger(&self) -> Option<CursorTrigger> {
        self.last_trigger
    }

    fn is_pointing(ctx: &GestureContext<'_>) -> bool {
        ctx.is_finger_straight(Hand::Right, Finger::Index)
            && ctx.is_finger_bent(Hand::Right, Finger::Middle)
            && ctx.is_finger_bent(Hand::Right, Finger::Ring)
    }

    fn classify(&self, ctx: &GestureContext<'_>) -> Option<CursorTrigger> {
        let pip = ctx.joint(Hand::Right, Finger::Index, Joint::Pip);
        if near(ctx.joint(Hand::Right, Finger::Thumb, Joint::Tip), pip, self.click_distance) {
            return Some(CursorTrigger::Fire);
        }

        let tip = ctx.joint(Hand::Right, Finger::Index, Joint::Tip)?;
        let mcp = ctx.joint(Hand::Right, Finger::Index, Joint::Mcp)?;
        let (dx, dy) = (tip.x - mcp.x, tip.y - mcp.y);
        if dx.hypot(dy) <= self.min_extent {
            return None;
        }
        Some(if dx.abs() > dy.abs() {
            if dx < 0.0 {
                CursorTrigger::Left
            } else {
                CursorTrigger::Right
            }
        } else if dy < 0.0 {
            CursorTrigger::Up
        } else {
            CursorTrigger::Down
        })
    }

    fn fire_on_change(&mut self, ctx: &mut GestureContext<'_>, points: Vec<Position>) {
        let trigger = self.classify(ctx);
        if let Some(kind) = trigger {
            if trigger != self.last_trigger {
                ctx.fired(points, TriggerKind::Cursor(kind));
            }
        }
        self.last_trigger = trigger;
    }
}

impl GestureBehavior for Cursor {
    fn kind(&self) -> GestureKind {
        GestureKind::Cursor
    }

    fn check_gesture(&mut self, ctx: &mut GestureContext<'_>) {
        let tip: Vec<_> = ctx
            .joint(Hand::Right, Finger::Index, Joint::Tip)
            .into_iter()
            .collect();
        let pointing = Self::is_pointing(ctx);

        match ctx.state() {
            GestureState::Unknown if pointing => {
                ctx.set_state(GestureState::WaitForRelease);
                ctx.began(tip.clone());
                self.last_trigger = None;
                self.fire_on_change(ctx, tip);
            }
            GestureState::WaitForRelease if pointing => {
                ctx.moved(tip.clone());
                self.fire_on_change(ctx, tip);
            }
            GestureState::WaitForRelease => {
                ctx.set_state(GestureState::Unknown);
                ctx.ended(tip);
                self.last_trigger = None;
            }
            _ => {}
        }
    }

    fn reset(&mut self) {
        self.last_trigger = None;
    }

    fn status_fields(&self) -> String {
        format!(
            " :trigger {}",
            self.last_trigger.map(|t| t.as_str()).unwrap_or("nil")
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
