//! Two-hand heart shape.
//!
//! First pose: both thumb tips and both index tips touch.  Second pose: both
//! index pips rise above their tips, closing the top of the heart.  While
//! held the gesture tracks the midpoint of the right index tip and the left
//! thumb tip.  Either pair of tips drifting apart releases it.

use std::any::Any;

use crate::config::GestureConfig;
use crate::event::{GestureKind, GestureState};
use crate::frame::{Finger, Hand, Joint, Position};
use crate::predicates::{far, is_above, midpoint, near};
use crate::processor::{GestureBehavior, GestureContext};

#[derive(Debug, Clone)]
pub struct Heart {
    pub near_distance: f64,
    pub above_margin: f64,
    pub release_distance: f64,
}

impl Default for Heart {
    fn default() -> Self {
        Self {
            near_distance: 75.0,
            above_margin: 75.0,
            release_distance: 200.0,
        }
    }
}

impl Heart {
    pub fn from_config(config: &GestureConfig) -> Self {
        Self {
            near_distance: config.heart_near_distance,
            above_margin: config.heart_above_margin,
            release_distance: config.heart_release_distance,
        }
    }

    fn tips(ctx: &GestureContext<'_>, finger: Finger) -> (Option<Position>, Option<Position>) {
        (
            ctx.joint(Hand::Right, finger, Joint::Tip),
            ctx.joint(Hand::Left, finger, Joint::Tip),
        )
    }

    fn is_first_pose(&self, ctx: &GestureContext<'_>) -> bool {
        let (rt, lt) = Self::tips(ctx, Finger::Thumb);
        let (ri, li) = Self::tips(ctx, Finger::Index);
        near(rt, lt, self.near_distance) && near(ri, li, self.near_distance)
    }

    fn is_second_pose(&self, ctx: &GestureContext<'_>) -> bool {
        [Hand::Right, Hand::Left].iter().all(|&hand| {
            is_above(
                ctx.joint(hand, Finger::Index, Joint::Pip),
                ctx.joint(hand, Finger::Index, Joint::Tip),
                self.above_margin,
            )
        })
    }

    fn is_released(&self, ctx: &GestureContext<'_>) -> bool {
        let (rt, lt) = Self::tips(ctx, Finger::Thumb);
        let (ri, li) = Self::tips(ctx, Finger::Index);
        far(rt, lt, self.release_distance) || far(ri, li, self.release_distance)
    }

    /// Center of the heart, falling back to the pose saved when it began.
    fn tracking_point(ctx: &GestureContext<'_>) -> Vec<Position> {
        midpoint(
            ctx.joint(Hand::Right, Finger::Index, Joint::Tip),
            ctx.joint(Hand::Left, Finger::Thumb, Joint::Tip),
        )
        .or_else(|| {
            midpoint(
                ctx.saved_joint(Hand::Right, Finger::Index, Joint::Tip),
                ctx.saved_joint(Hand::Left, Finger::Thumb, Joint::Tip),
            )
        })
        .into_iter()
        .collect()
    }

    fn end(ctx: &mut GestureContext<'_>) {
        let points = Self::tracking_point(ctx);
        ctx.set_state(GestureState::Unknown);
        ctx.clear_saved_pose();
        ctx.ended(points);
    }
}

impl GestureBehavior for Heart {
    fn kind(&self) -> GestureKind {
        GestureKind::Heart
    }

    fn check_gesture(&mut self, ctx: &mut GestureContext<'_>) {
        // Both labels resolve to the same hand in a one-hand frame.
        if ctx.hand_count() < 2 {
            return;
        }

        match ctx.state() {
            GestureState::Unknown => {
                if self.is_first_pose(ctx) {
                    ctx.save_pose();
                    ctx.set_state(GestureState::WaitForNextPose);
                    let points = Self::tracking_point(ctx);
                    ctx.began(points);
                }
            }
            GestureState::WaitForNextPose => {
                if self.is_released(ctx) {
                    Self::end(ctx);
                } else if self.is_second_pose(ctx) {
                    ctx.set_state(GestureState::WaitForRelease);
                }
            }
            GestureState::WaitForRelease => {
                if self.is_released(ctx) {
                    Self::end(ctx);
                } else {
                    let points = Self::tracking_point(ctx);
                    ctx.moved(points);
                }
            }
            _ => {}
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::GestureEvent;
    use crate::fixtures::{obscure, open_hand, place};
    use crate::frame::{Frame, HandJointSet};
    use crate::processor::GestureProcessor;

    /// One side of the heart: thumb tip at `(x, 500)`, index tip at
    /// `(x, index_y)`, index pip at `(x, pip_y)`.
    fn side(x: f64, index_y: f64, pip_y: f64) -> HandJointSet {
        let mut hand = open_hand(x, 700.0);
        place(&mut hand, Finger::Thumb, Joint::Tip, x, 500.0);
        place(&mut hand, Finger::Index, Joint::Tip, x, index_y);
        place(&mut hand, Finger::Index, Joint::Pip, x, pip_y);
        hand
    }

    /// Tips touching, index pips below the tips.
    fn first_pose() -> Frame {
        Frame::pair(side(285.0, 400.0, 480.0), side(315.0, 400.0, 480.0))
    }

    /// Index tips dropped 100 below their pips.
    fn second_pose() -> Frame {
        Frame::pair(side(285.0, 580.0, 480.0), side(315.0, 580.0, 480.0))
    }

    fn lifecycle(events: &[GestureEvent]) -> Vec<&'static str> {
        events
            .iter()
            .filter(|e| e.is_lifecycle())
            .map(|e| e.name())
            .collect()
    }

    #[test]
    fn test_heart_end_to_end() {
        let mut p = GestureProcessor::new(Heart::default());

        let events = p.process(&first_pose());
        assert_eq!(lifecycle(&events), vec!["began"]);
        assert_eq!(p.state(), GestureState::WaitForNextPose);
        assert!(p.saved_pose().is_some());

        let events = p.process(&second_pose());
        assert!(lifecycle(&events).is_empty());
        assert_eq!(p.state(), GestureState::WaitForRelease);

        let events = p.process(&second_pose());
        assert_eq!(
            events,
            vec![GestureEvent::Moved {
                gesture: GestureKind::Heart,
                points: vec![Position::new(300.0, 540.0)],
            }]
        );

        let mut left = side(315.0, 580.0, 480.0);
        place(&mut left, Finger::Thumb, Joint::Tip, 585.0, 500.0);
        let events = p.process(&Frame::pair(side(285.0, 580.0, 480.0), left));
        assert_eq!(lifecycle(&events), vec!["ended"]);
        assert_eq!(p.state(), GestureState::Unknown);
        assert!(p.saved_pose().is_none());
    }

    #[test]
    fn test_requires_two_hands() {
        let mut p = GestureProcessor::new(Heart::default());
        let single = Frame::single(Hand::Right, side(300.0, 400.0, 480.0));
        assert!(p.process(&single).is_empty());
        assert_eq!(p.state(), GestureState::Unknown);
    }

    #[test]
    fn test_early_release_from_first_pose() {
        let mut p = GestureProcessor::new(Heart::default());
        p.process(&first_pose());

        let apart = Frame::pair(side(100.0, 400.0, 480.0), side(400.0, 400.0, 480.0));
        let events = p.process(&apart);
        assert_eq!(lifecycle(&events), vec!["ended"]);
        assert_eq!(p.state(), GestureState::Unknown);
    }

    #[test]
    fn test_drift_inside_hysteresis_keeps_state() {
        let mut p = GestureProcessor::new(Heart::default());
        p.process(&first_pose());

        // 150 apart: no longer near, not yet far.
        let drift = Frame::pair(side(225.0, 400.0, 480.0), side(375.0, 400.0, 480.0));
        assert!(p.process(&drift).is_empty());
        assert_eq!(p.state(), GestureState::WaitForNextPose);
    }

    #[test]
    fn test_index_tips_apart_releases() {
        let mut p = GestureProcessor::new(Heart::default());
        p.process(&first_pose());
        p.process(&second_pose());

        let mut right = side(285.0, 580.0, 480.0);
        place(&mut right, Finger::Index, Joint::Tip, 0.0, 580.0);
        let events = p.process(&Frame::pair(right, side(315.0, 580.0, 480.0)));
        assert_eq!(lifecycle(&events), vec!["ended"]);
    }

    #[test]
    fn test_empty_frames_freeze_tracking() {
        let mut p = GestureProcessor::new(Heart::default());
        p.process(&first_pose());
        p.process(&second_pose());
        for _ in 0..10 {
            assert!(p.process(&Frame::empty()).is_empty());
        }
        assert_eq!(p.state(), GestureState::WaitForRelease);
    }

    #[test]
    fn test_tracking_falls_back_to_saved_pose() {
        let mut p = GestureProcessor::new(Heart::default());
        p.process(&first_pose());
        p.process(&second_pose());

        let mut left = side(315.0, 580.0, 480.0);
        obscure(&mut left, Finger::Thumb, Joint::Tip);
        let events = p.process(&Frame::pair(side(285.0, 580.0, 480.0), left));
        // Saved first pose: right index tip (285, 400), left thumb tip (315, 500).
        assert_eq!(
            events,
            vec![GestureEvent::Moved {
                gesture: GestureKind::Heart,
                points: vec![Position::new(300.0, 450.0)],
            }]
        );
    }
}
