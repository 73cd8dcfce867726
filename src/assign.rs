//! Right/left hand assignment for one estimator result.
//!
//! Hand identity is not tracked across frames, so labels are decided from
//! scratch every frame.  One hand takes the configured default label; two
//! hands are ordered by thumb-tip x in a mirrored camera view (smaller x is
//! the right hand).  Equal x falls back to y (higher thumb is the right
//! hand) so the labels never depend on the estimator's output order.

use tracing::{debug, warn};

use crate::frame::{Finger, Frame, Hand, HandJointSet, Joint, Position};

/// Outcome of labeling one estimator result.
#[derive(Debug, Clone, PartialEq)]
pub enum Assignment {
    /// Hands labeled; the frame may be empty.
    Assigned(Frame),
    /// Two hands seen but a thumb tip could not be resolved.  Gesture
    /// evaluation is skipped for this frame.
    Stalled,
}

impl Assignment {
    pub fn frame(self) -> Option<Frame> {
        match self {
            Self::Assigned(frame) => Some(frame),
            Self::Stalled => None,
        }
    }
}

/// Label raw per-hand joint sets as right/left.  Thumb tips must reach
/// `min_confidence` for two hands to be ordered.
pub fn assign_hands(
    mut hands: Vec<HandJointSet>,
    default_hand: Hand,
    min_confidence: f32,
) -> Assignment {
    match hands.len() {
        0 => Assignment::Assigned(Frame::empty()),
        1 => {
            let only = hands.remove(0);
            Assignment::Assigned(Frame::single(default_hand, only))
        }
        2 => {
            let second = hands.remove(1);
            let first = hands.remove(0);
            let thumb1 = first.point(Finger::Thumb, Joint::Tip, min_confidence);
            let thumb2 = second.point(Finger::Thumb, Joint::Tip, min_confidence);
            let (Some(t1), Some(t2)) = (thumb1, thumb2) else {
                debug!("hand assignment stalled: thumb tip unresolved");
                return Assignment::Stalled;
            };
            if is_right_of(&t1, &t2) {
                Assignment::Assigned(Frame::pair(first, second))
            } else {
                Assignment::Assigned(Frame::pair(second, first))
            }
        }
        n => {
            warn!("estimator reported {} hands, treating as none", n);
            Assignment::Assigned(Frame::empty())
        }
    }
}

/// Mirrored view: `a` belongs to the right hand when its thumb is further
/// left, or level and higher.
fn is_right_of(a: &Position, b: &Position) -> bool {
    a.x < b.x || (a.x == b.x && a.y <= b.y)
}
