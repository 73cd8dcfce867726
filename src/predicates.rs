//! Geometric predicates over optional joint positions.
//!
//! Every predicate takes `Option<Position>` and returns `false` when any
//! required point is missing, so low-confidence joints read as "condition
//! not met" rather than as a position at the origin.  Thresholds are in
//! display-coordinate units.

use crate::frame::{Finger, Frame, Hand, Joint, Position, GENERAL_CONFIDENCE};

/// Distance between two points is below `threshold`.
pub fn near(p1: Option<Position>, p2: Option<Position>, threshold: f64) -> bool {
    match (p1, p2) {
        (Some(a), Some(b)) => a.distance(&b) < threshold,
        _ => false,
    }
}

/// Distance between two points is above `threshold`.
pub fn far(p1: Option<Position>, p2: Option<Position>, threshold: f64) -> bool {
    match (p1, p2) {
        (Some(a), Some(b)) => a.distance(&b) > threshold,
        _ => false,
    }
}

/// The finger curls back toward the palm: `mid` is farther from the wrist
/// than `tip`.
pub fn is_bend(wrist: Option<Position>, mid: Option<Position>, tip: Option<Position>) -> bool {
    match (wrist, mid, tip) {
        (Some(w), Some(m), Some(t)) => w.distance(&m) > w.distance(&t),
        _ => false,
    }
}

/// The finger points away from the palm: `tip` is farther from the wrist
/// than `mid`.
pub fn is_straight(wrist: Option<Position>, mid: Option<Position>, tip: Option<Position>) -> bool {
    match (wrist, mid, tip) {
        (Some(w), Some(m), Some(t)) => w.distance(&m) < w.distance(&t),
        _ => false,
    }
}

/// `p` is higher on screen than `reference` by more than `margin`.
pub fn is_above(p: Option<Position>, reference: Option<Position>, margin: f64) -> bool {
    match (p, reference) {
        (Some(p), Some(r)) => r.y - p.y > margin,
        _ => false,
    }
}

/// `p` is lower on screen than `reference` by more than `margin`.
pub fn is_below(p: Option<Position>, reference: Option<Position>, margin: f64) -> bool {
    match (p, reference) {
        (Some(p), Some(r)) => p.y - r.y > margin,
        _ => false,
    }
}

/// Midpoint of two optional points.
pub fn midpoint(p1: Option<Position>, p2: Option<Position>) -> Option<Position> {
    Some(p1?.midpoint(&p2?))
}

/// Finger bent, judged from the wrist, the finger's pip joint and its tip.
pub fn is_finger_bent(frame: &Frame, hand: Hand, finger: Finger) -> bool {
    finger_bent_with(frame, hand, finger, GENERAL_CONFIDENCE)
}

/// Finger straight, judged from the wrist, the finger's pip joint and its tip.
pub fn is_finger_straight(frame: &Frame, hand: Hand, finger: Finger) -> bool {
    finger_straight_with(frame, hand, finger, GENERAL_CONFIDENCE)
}

/// [`is_finger_bent`] at an explicit confidence threshold.
pub fn finger_bent_with(frame: &Frame, hand: Hand, finger: Finger, min_confidence: f32) -> bool {
    let (wrist, pip, tip) = finger_triple(frame, hand, finger, min_confidence);
    is_bend(wrist, pip, tip)
}

/// [`is_finger_straight`] at an explicit confidence threshold.
pub fn finger_straight_with(
    frame: &Frame,
    hand: Hand,
    finger: Finger,
    min_confidence: f32,
) -> bool {
    let (wrist, pip, tip) = finger_triple(frame, hand, finger, min_confidence);
    is_straight(wrist, pip, tip)
}

fn finger_triple(
    frame: &Frame,
    hand: Hand,
    finger: Finger,
    min_confidence: f32,
) -> (Option<Position>, Option<Position>, Option<Position>) {
    (
        frame.joint_with(hand, Finger::Wrist, Joint::Tip, min_confidence),
        frame.joint_with(hand, finger, Joint::Pip, min_confidence),
        frame.joint_with(hand, finger, Joint::Tip, min_confidence),
    )
}
