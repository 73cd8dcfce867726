//! Synthetic hands for tests.
//!
//! Hands are drawn upright in display coordinates: the wrist at `(wx, wy)`
//! and the digits extending upward (negative y).  An open hand has every
//! digit straight; `curl` folds a digit so its tip sits closer to the wrist
//! than both its pip and mcp joints.

use crate::frame::{Finger, HandJointSet, Joint, JointSample};

const CONFIDENT: f32 = 0.9;
const DOUBTFUL: f32 = 0.1;

/// Column offset of each non-thumb digit from the wrist.
fn column(finger: Finger) -> f64 {
    match finger {
        Finger::Index => -30.0,
        Finger::Middle => 0.0,
        Finger::Ring => 30.0,
        Finger::Little => 60.0,
        Finger::Thumb | Finger::Wrist => 0.0,
    }
}

/// Open hand: all five digits straight, thumb spread away from the index.
pub(crate) fn open_hand(wx: f64, wy: f64) -> HandJointSet {
    let mut hand = HandJointSet::new().with(Finger::Wrist, Joint::Tip, wx, wy, CONFIDENT);
    place(&mut hand, Finger::Thumb, Joint::Mcp, wx - 60.0, wy - 40.0);
    place(&mut hand, Finger::Thumb, Joint::Pip, wx - 90.0, wy - 60.0);
    place(&mut hand, Finger::Thumb, Joint::Dip, wx - 110.0, wy - 75.0);
    place(&mut hand, Finger::Thumb, Joint::Tip, wx - 150.0, wy - 90.0);
    for finger in [Finger::Index, Finger::Middle, Finger::Ring, Finger::Little] {
        let x = wx + column(finger);
        place(&mut hand, finger, Joint::Mcp, x, wy - 80.0);
        place(&mut hand, finger, Joint::Pip, x, wy - 120.0);
        place(&mut hand, finger, Joint::Dip, x, wy - 150.0);
        place(&mut hand, finger, Joint::Tip, x, wy - 180.0);
    }
    hand
}

/// Fold a digit back toward the palm.
pub(crate) fn curl(hand: &mut HandJointSet, finger: Finger) {
    let wrist = hand
        .sample(Finger::Wrist, Joint::Tip)
        .expect("fixture hand has a wrist")
        .position;
    let (wx, wy) = (wrist.x, wrist.y);
    match finger {
        Finger::Thumb => {
            place(hand, Finger::Thumb, Joint::Tip, wx - 50.0, wy - 30.0);
        }
        Finger::Wrist => {}
        _ => {
            let x = wx + column(finger);
            place(hand, finger, Joint::Dip, x, wy - 90.0);
            place(hand, finger, Joint::Tip, x, wy - 60.0);
        }
    }
}

/// Curl every digit: a closed fist.
pub(crate) fn fist(wx: f64, wy: f64) -> HandJointSet {
    let mut hand = open_hand(wx, wy);
    for finger in Finger::DIGITS {
        curl(&mut hand, finger);
    }
    hand
}

/// Move a joint with full confidence.
pub(crate) fn place(hand: &mut HandJointSet, finger: Finger, joint: Joint, x: f64, y: f64) {
    hand.set(finger, joint, JointSample::new(x, y, CONFIDENT));
}

/// Drop a joint's confidence below every acceptance threshold.
pub(crate) fn obscure(hand: &mut HandJointSet, finger: Finger, joint: Joint) {
    if let Some(mut sample) = hand.sample(finger, joint) {
        sample.confidence = DOUBTFUL;
        hand.set(finger, joint, sample);
    }
}
