//! Debounced thumb/index pinch for continuous path input.
//!
//! Each frame the thumb tip and index tip distance is fed to an
//! `EvidenceAccumulator`.  Midpoints seen while the accumulator is still
//! undecided are buffered; they are flushed with `began`/`moved` once the
//! pinch commits and dropped if it commits to apart instead.  A frame where
//! either tip is below confidence is skipped: counters, buffer and state
//! are left as they were.

use std::any::Any;

use crate::config::GestureConfig;
use crate::event::{GestureKind, GestureState};
use crate::evidence::{EvidenceAccumulator, EvidenceState};
use crate::frame::{Finger, Hand, Joint, Position};
use crate::processor::{GestureBehavior, GestureContext};

use tracing::trace;

#[derive(Debug, Clone, Default)]
pub struct Pinch {
    evidence: EvidenceAccumulator,
    /// Midpoints collected while evidence is undecided.
    buffer: Vec<Position>,
    /// A `began` has been emitted and no `ended` yet.
    drawing: bool,
    last_pair: Option<(Position, Position)>,
}

impl Pinch {
    pub fn new(max_distance: f64, trigger: u32) -> Self {
        Self {
            evidence: EvidenceAccumulator::new(max_distance, trigger),
            ..Self::default()
        }
    }

    pub fn from_config(config: &GestureConfig) -> Self {
        Self::new(config.pinch_max_distance, config.evidence_trigger)
    }

    /// Last resolved (thumb tip, index tip) pair.
    pub fn last_pair(&self) -> Option<(Position, Position)> {
        self.last_pair
    }

    pub fn evidence(&self) -> &EvidenceAccumulator {
        &self.evidence
    }

    pub fn evidence_state(&self) -> EvidenceState {
        self.evidence.state()
    }

    pub fn buffered(&self) -> &[Position] {
        &self.buffer
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Most midpoints held while undecided: a full trigger window on each
    /// side of a wobble.
    pub fn buffer_capacity(&self) -> usize {
        2 * self.evidence.trigger() as usize
    }

    /// Buffer a midpoint, dropping the oldest past capacity.
    fn hold(&mut self, mid: Position) {
        self.buffer.push(mid);
        let cap = self.buffer_capacity();
        if self.buffer.len() > cap {
            let excess = self.buffer.len() - cap;
            self.buffer.drain(..excess);
        }
    }
}

impl GestureBehavior for Pinch {
    fn kind(&self) -> GestureKind {
        GestureKind::Pinch
    }

    fn check_gesture(&mut self, ctx: &mut GestureContext<'_>) {
        let (Some(thumb), Some(index)) = (
            ctx.joint(Hand::Right, Finger::Thumb, Joint::Tip),
            ctx.joint(Hand::Right, Finger::Index, Joint::Tip),
        ) else {
            trace!("pinch: tip below confidence, frame skipped");
            return;
        };

        self.last_pair = Some((thumb, index));
        let mid = thumb.midpoint(&index);

        match self.evidence.update(thumb.distance(&index)) {
            EvidenceState::PossibleEngaged | EvidenceState::PossibleDisengaged => {
                self.hold(mid);
                ctx.set_state(GestureState::Possible);
            }
            EvidenceState::Engaged => {
                self.hold(mid);
                let points = std::mem::take(&mut self.buffer);
                ctx.set_state(GestureState::Detected);
                if self.drawing {
                    ctx.moved(points);
                } else {
                    self.drawing = true;
                    ctx.began(points);
                }
            }
            EvidenceState::Disengaged | EvidenceState::Unknown => {
                self.buffer.clear();
                ctx.set_state(GestureState::Unknown);
                if self.drawing {
                    self.drawing = false;
                    ctx.ended(vec![mid]);
                }
            }
        }
    }

    fn reset(&mut self) {
        self.evidence.reset();
        self.buffer.clear();
        self.drawing = false;
        self.last_pair = None;
    }

    fn status_fields(&self) -> String {
        format!(
            " :evidence {} :buffered {} :drawing {}",
            self.evidence.state().as_str(),
            self.buffer.len(),
            if self.drawing { "t" } else { "nil" },
        )
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
    use crate::frame::{Frame, HandJointSet, PINCH_CONFIDENCE};
    use crate::processor::GestureProcessor;

    fn pinch_processor() -> GestureProcessor {
        GestureProcessor::new(Pinch::default()).with_min_confidence(PINCH_CONFIDENCE)
    }

    /// Thumb tip at `(x, 300)`, index tip `gap` to its right.
    fn tips(x: f64, gap: f64) -> Frame {
        let mut hand: HandJointSet = open_hand(x, 600.0);
        place(&mut hand, Finger::Thumb, Joint::Tip, x, 300.0);
        place(&mut hand, Finger::Index, Joint::Tip, x + gap, 300.0);
        Frame::single(Hand::Right, hand)
    }

    fn names(events: &[GestureEvent]) -> Vec<&'static str> {
        events
            .iter()
            .filter(|e| e.is_lifecycle())
            .map(|e| e.name())
            .collect()
    }

    #[test]
    fn test_commit_flushes_buffered_midpoints() {
        let mut p = pinch_processor();
        assert!(names(&p.process(&tips(100.0, 10.0))).is_empty());
        assert_eq!(p.state(), GestureState::Possible);
        assert!(names(&p.process(&tips(110.0, 10.0))).is_empty());
        assert_eq!(p.behavior::<Pinch>().unwrap().buffered().len(), 2);

        let events = p.process(&tips(120.0, 10.0));
        assert_eq!(p.state(), GestureState::Detected);
        let began = events
            .iter()
            .find(|e| matches!(e, GestureEvent::Began { .. }))
            .unwrap();
        assert_eq!(
            began.points(),
            &[
                Position::new(105.0, 300.0),
                Position::new(115.0, 300.0),
                Position::new(125.0, 300.0),
            ]
        );
        assert!(p.behavior::<Pinch>().unwrap().buffered().is_empty());

        let events = p.process(&tips(130.0, 10.0));
        assert_eq!(
            events,
            vec![GestureEvent::Moved {
                gesture: GestureKind::Pinch,
                points: vec![Position::new(135.0, 300.0)],
            }]
        );
    }

    #[test]
    fn test_flicker_never_begins() {
        let mut p = pinch_processor();
        for i in 0..12 {
            let gap = if i % 2 == 0 { 10.0 } else { 60.0 };
            let events = p.process(&tips(100.0, gap));
            assert!(names(&events).is_empty(), "frame {}: {:?}", i, events);
        }
        assert_eq!(p.state(), GestureState::Possible);
    }

    #[test]
    fn test_apart_ends_and_discards_buffer() {
        let mut p = pinch_processor();
        for _ in 0..3 {
            p.process(&tips(100.0, 10.0));
        }
        assert!(p.behavior::<Pinch>().unwrap().is_drawing());

        assert!(names(&p.process(&tips(100.0, 80.0))).is_empty());
        assert!(names(&p.process(&tips(100.0, 80.0))).is_empty());
        assert_eq!(p.behavior::<Pinch>().unwrap().buffered().len(), 2);

        let events = p.process(&tips(100.0, 80.0));
        assert_eq!(names(&events), vec!["ended"]);
        assert_eq!(p.state(), GestureState::Unknown);
        let pinch = p.behavior::<Pinch>().unwrap();
        assert!(pinch.buffered().is_empty());
        assert!(!pinch.is_drawing());
        assert_eq!(pinch.evidence_state(), EvidenceState::Disengaged);
    }

    #[test]
    fn test_brief_release_continues_path() {
        let mut p = pinch_processor();
        for _ in 0..3 {
            p.process(&tips(100.0, 10.0));
        }
        p.process(&tips(100.0, 80.0));
        // Back within threshold before apart commits: the wobble is kept.
        p.process(&tips(100.0, 10.0));
        p.process(&tips(100.0, 10.0));
        let events = p.process(&tips(100.0, 10.0));
        assert_eq!(names(&events), vec!["moved"]);
        assert_eq!(events.last().unwrap().points().len(), 4);
    }

    #[test]
    fn test_low_confidence_tip_still_accepted_above_pinch_threshold() {
        let mut frame_hand = open_hand(100.0, 600.0);
        place(&mut frame_hand, Finger::Thumb, Joint::Tip, 100.0, 300.0);
        place(&mut frame_hand, Finger::Index, Joint::Tip, 110.0, 300.0);
        let mut sample = frame_hand.sample(Finger::Index, Joint::Tip).unwrap();
        sample.confidence = 0.4;
        frame_hand.set(Finger::Index, Joint::Tip, sample);

        let mut p = pinch_processor();
        p.process(&Frame::single(Hand::Right, frame_hand));
        assert_eq!(p.state(), GestureState::Possible);
        assert_eq!(
            p.behavior::<Pinch>().unwrap().last_pair(),
            Some((Position::new(100.0, 300.0), Position::new(110.0, 300.0)))
        );
    }

    #[test]
    fn test_dropout_frame_keeps_open_path() {
        let mut p = pinch_processor();
        for _ in 0..3 {
            p.process(&tips(100.0, 10.0));
        }
        assert_eq!(p.state(), GestureState::Detected);

        let mut dropout = open_hand(100.0, 600.0);
        obscure(&mut dropout, Finger::Index, Joint::Tip);
        let events = p.process(&Frame::single(Hand::Right, dropout));
        assert!(events.is_empty(), "{:?}", events);
        assert_eq!(p.state(), GestureState::Detected);
        let pinch = p.behavior::<Pinch>().unwrap();
        assert!(pinch.is_drawing());
        assert_eq!(pinch.evidence_state(), EvidenceState::Engaged);
        assert_eq!(pinch.evidence().close_count(), 3);

        let events = p.process(&tips(100.0, 10.0));
        assert_eq!(
            events,
            vec![GestureEvent::Moved {
                gesture: GestureKind::Pinch,
                points: vec![Position::new(105.0, 300.0)],
            }]
        );
    }

    #[test]
    fn test_dropout_before_commit_keeps_evidence() {
        let mut p = pinch_processor();
        p.process(&tips(100.0, 10.0));
        p.process(&tips(100.0, 10.0));

        let mut dropout = open_hand(100.0, 600.0);
        obscure(&mut dropout, Finger::Thumb, Joint::Tip);
        assert!(p.process(&Frame::single(Hand::Right, dropout)).is_empty());
        assert_eq!(p.behavior::<Pinch>().unwrap().buffered().len(), 2);

        let events = p.process(&tips(100.0, 10.0));
        assert_eq!(names(&events), vec!["began"]);
        assert_eq!(events.last().unwrap().points().len(), 3);
    }

    #[test]
    fn test_flicker_buffer_is_bounded() {
        let mut p = pinch_processor();
        for i in 0..50 {
            let gap = if i % 2 == 0 { 10.0 } else { 60.0 };
            p.process(&tips(100.0 + i as f64, gap));
        }
        let pinch = p.behavior::<Pinch>().unwrap();
        assert_eq!(pinch.buffer_capacity(), 6);
        assert_eq!(pinch.buffered().len(), 6);
        // Newest midpoints survive: last frame was x=149, gap 60.
        assert_eq!(pinch.buffered().last(), Some(&Position::new(179.0, 300.0)));
    }

    #[test]
    fn test_reset_clears_tracking() {
        let mut p = pinch_processor();
        p.process(&tips(100.0, 10.0));
        p.state_reset();
        let pinch = p.behavior::<Pinch>().unwrap();
        assert!(pinch.last_pair().is_none());
        assert!(pinch.buffered().is_empty());
        assert_eq!(pinch.evidence_state(), EvidenceState::Unknown);
    }

    #[test]
    fn test_status_fields() {
        let mut p = pinch_processor();
        p.process(&tips(100.0, 10.0));
        let sexp = p.status_sexp();
        assert!(sexp.contains(":evidence possible-engaged"));
        assert!(sexp.contains(":buffered 1"));
        assert!(sexp.contains(":drawing nil"));
    }
}
