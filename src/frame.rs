//! Joint frame data model.
//!
//! A `Frame` is one snapshot of up to two hands, each a `HandJointSet` of
//! per-finger joint samples in display coordinates.  Samples carry the
//! estimator's confidence; validity is decided at lookup time against the
//! caller's acceptance threshold, so the same frame serves the 0.6 general
//! gestures and the 0.3 two-point pinch.

use tracing::trace;

/// Minimum confidence for a joint to be used by pose classifiers.
pub const GENERAL_CONFIDENCE: f32 = 0.6;

/// Minimum confidence for the two-point pinch tracker.
pub const PINCH_CONFIDENCE: f32 = 0.3;

// ── Geometry ───────────────────────────────────────────────

/// A point in display coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Position) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Point halfway between two points.
    pub fn midpoint(&self, other: &Position) -> Position {
        Position {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// One joint as reported by the estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointSample {
    pub position: Position,
    /// Estimator confidence (0.0-1.0).
    pub confidence: f32,
}

impl JointSample {
    pub fn new(x: f64, y: f64, confidence: f32) -> Self {
        Self {
            position: Position::new(x, y),
            confidence,
        }
    }

    /// Position if the sample meets `min_confidence`, otherwise `None`.
    pub fn accepted(&self, min_confidence: f32) -> Option<Position> {
        if self.confidence < min_confidence {
            return None;
        }
        Some(self.position)
    }
}

// ── Finger / joint / hand enums ────────────────────────────

/// Fingers of a hand, plus the wrist which has a single joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Little,
    Wrist,
}

impl Finger {
    /// The five digits, thumb first.
    pub const DIGITS: [Finger; 5] = [
        Self::Thumb,
        Self::Index,
        Self::Middle,
        Self::Ring,
        Self::Little,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Thumb => "thumb",
            Self::Index => "index",
            Self::Middle => "middle",
            Self::Ring => "ring",
            Self::Little => "little",
            Self::Wrist => "wrist",
        }
    }

    fn digit_index(&self) -> Option<usize> {
        match self {
            Self::Thumb => Some(0),
            Self::Index => Some(1),
            Self::Middle => Some(2),
            Self::Ring => Some(3),
            Self::Little => Some(4),
            Self::Wrist => None,
        }
    }
}

/// Joint along a finger, from the tip toward the palm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Joint {
    /// Fingertip.
    Tip,
    /// First joint below the tip.
    Dip,
    /// Second joint.
    Pip,
    /// Knuckle.
    Mcp,
}

impl Joint {
    pub const ALL: [Joint; 4] = [Self::Tip, Self::Dip, Self::Pip, Self::Mcp];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tip => "tip",
            Self::Dip => "dip",
            Self::Pip => "pip",
            Self::Mcp => "mcp",
        }
    }
}

/// Which hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hand {
    Right,
    Left,
}

impl Hand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Right => "right",
            Self::Left => "left",
        }
    }

    /// Parse "right" / "left".
    pub fn parse(s: &str) -> Option<Hand> {
        match s {
            "right" => Some(Self::Right),
            "left" => Some(Self::Left),
            _ => None,
        }
    }
}

// ── Hand joint set ─────────────────────────────────────────

/// Number of landmarks in the estimator's flat hand layout.
pub const LANDMARK_COUNT: usize = 21;

/// Joints of one detected hand for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandJointSet {
    /// Per-digit joints indexed by `Joint`, thumb first.
    digits: [[Option<JointSample>; 4]; 5],
    wrist: Option<JointSample>,
}

impl HandJointSet {
    /// An empty set with no joints recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the estimator's flat landmark order:
    /// wrist, then for each digit its four joints from the palm outward
    /// (thumb CMC/MP/IP/tip, index MCP/PIP/DIP/tip, ...).
    pub fn from_landmarks(landmarks: &[JointSample; LANDMARK_COUNT]) -> Self {
        let mut set = Self::new();
        set.wrist = Some(landmarks[0]);
        for (d, finger) in Finger::DIGITS.iter().enumerate() {
            let base = 1 + d * 4;
            // Palm-outward order reversed into tip-first joint order.
            set.set(*finger, Joint::Mcp, landmarks[base]);
            set.set(*finger, Joint::Pip, landmarks[base + 1]);
            set.set(*finger, Joint::Dip, landmarks[base + 2]);
            set.set(*finger, Joint::Tip, landmarks[base + 3]);
        }
        set
    }

    /// Record a joint.  The wrist ignores `joint`.
    pub fn set(&mut self, finger: Finger, joint: Joint, sample: JointSample) {
        match finger.digit_index() {
            Some(d) => self.digits[d][joint.index()] = Some(sample),
            None => self.wrist = Some(sample),
        }
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, finger: Finger, joint: Joint, x: f64, y: f64, confidence: f32) -> Self {
        self.set(finger, joint, JointSample::new(x, y, confidence));
        self
    }

    /// Raw sample regardless of confidence.  The wrist has one sample for
    /// every requested joint.
    pub fn sample(&self, finger: Finger, joint: Joint) -> Option<JointSample> {
        match finger.digit_index() {
            Some(d) => self.digits[d][joint.index()],
            None => self.wrist,
        }
    }

    /// Position of a joint if its confidence meets `min_confidence`.
    pub fn point(&self, finger: Finger, joint: Joint, min_confidence: f32) -> Option<Position> {
        self.sample(finger, joint)?.accepted(min_confidence)
    }

    /// Number of recorded samples (at most 21).
    pub fn recorded(&self) -> usize {
        let digits = self.digits.iter().flatten().filter(|s| s.is_some()).count();
        digits + usize::from(self.wrist.is_some())
    }
}

// ── Frame ──────────────────────────────────────────────────

/// Right/left labeled hands observed in one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    right: Option<HandJointSet>,
    left: Option<HandJointSet>,
}

impl Frame {
    /// A frame with no hands.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A frame with a single hand under the given label.
    pub fn single(hand: Hand, joints: HandJointSet) -> Self {
        let mut frame = Self::empty();
        *frame.slot_mut(hand) = Some(joints);
        frame
    }

    /// A frame with both hands labeled.
    pub fn pair(right: HandJointSet, left: HandJointSet) -> Self {
        Self {
            right: Some(right),
            left: Some(left),
        }
    }

    fn slot_mut(&mut self, hand: Hand) -> &mut Option<HandJointSet> {
        match hand {
            Hand::Right => &mut self.right,
            Hand::Left => &mut self.left,
        }
    }

    /// Number of hands in the frame (0-2).
    pub fn hand_count(&self) -> usize {
        usize::from(self.right.is_some()) + usize::from(self.left.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.hand_count() == 0
    }

    /// The hand stored under exactly this label.
    pub fn labeled(&self, hand: Hand) -> Option<&HandJointSet> {
        match hand {
            Hand::Right => self.right.as_ref(),
            Hand::Left => self.left.as_ref(),
        }
    }

    /// Hand used for lookups.  With a single observed hand every label
    /// resolves to it.
    pub fn hand(&self, hand: Hand) -> Option<&HandJointSet> {
        match (&self.right, &self.left) {
            (Some(r), Some(l)) => Some(match hand {
                Hand::Right => r,
                Hand::Left => l,
            }),
            (Some(only), None) | (None, Some(only)) => Some(only),
            (None, None) => None,
        }
    }

    /// Joint position at the general confidence threshold.
    pub fn joint(&self, hand: Hand, finger: Finger, joint: Joint) -> Option<Position> {
        self.joint_with(hand, finger, joint, GENERAL_CONFIDENCE)
    }

    /// Joint position at an explicit confidence threshold.
    pub fn joint_with(
        &self,
        hand: Hand,
        finger: Finger,
        joint: Joint,
        min_confidence: f32,
    ) -> Option<Position> {
        let position = self.hand(hand)?.point(finger, joint, min_confidence);
        if position.is_none() {
            trace!(
                "joint {}-{} on {} hand unavailable",
                finger.as_str(),
                joint.as_str(),
                hand.as_str(),
            );
        }
        position
    }
}

// ── Saved pose ─────────────────────────────────────────────

/// Snapshot of a frame captured at a state transition.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedPose {
    frame: Frame,
}

impl SavedPose {
    pub fn capture(frame: &Frame) -> Self {
        Self {
            frame: frame.clone(),
        }
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Joint position in the saved frame, same rules as [`Frame::joint_with`].
    pub fn joint(
        &self,
        hand: Hand,
        finger: Finger,
        joint: Joint,
        min_confidence: f32,
    ) -> Option<Position> {
        self.frame.joint_with(hand, finger, joint, min_confidence)
    }
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn landmarks() -> [JointSample; LANDMARK_COUNT] {
        let mut out = [JointSample::new(0.0, 0.0, 0.9); LANDMARK_COUNT];
        for (i, s) in out.iter_mut().enumerate() {
            s.position = Position::new(i as f64, 100.0 - i as f64);
        }
        out
    }

    #[test]
    fn test_distance_and_midpoint() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-9);
        assert_eq!(a.midpoint(&b), Position::new(1.5, 2.0));
    }

    #[test]
    fn test_low_confidence_is_absent() {
        let set = HandJointSet::new().with(Finger::Index, Joint::Tip, 10.0, 20.0, 0.5);
        assert!(set.point(Finger::Index, Joint::Tip, GENERAL_CONFIDENCE).is_none());
        assert_eq!(
            set.point(Finger::Index, Joint::Tip, PINCH_CONFIDENCE),
            Some(Position::new(10.0, 20.0))
        );
    }

    #[test]
    fn test_confidence_at_threshold_is_accepted() {
        let sample = JointSample::new(1.0, 1.0, GENERAL_CONFIDENCE);
        assert!(sample.accepted(GENERAL_CONFIDENCE).is_some());
    }

    #[test]
    fn test_wrist_ignores_joint_index() {
        let set = HandJointSet::new().with(Finger::Wrist, Joint::Mcp, 5.0, 6.0, 0.9);
        for joint in Joint::ALL {
            assert_eq!(
                set.point(Finger::Wrist, joint, GENERAL_CONFIDENCE),
                Some(Position::new(5.0, 6.0))
            );
        }
    }

    #[test]
    fn test_from_landmarks_mapping() {
        let set = HandJointSet::from_landmarks(&landmarks());
        assert_eq!(set.recorded(), LANDMARK_COUNT);
        assert_eq!(set.sample(Finger::Wrist, Joint::Tip).unwrap().position.x, 0.0);
        // thumb CMC is landmark 1, thumb tip is landmark 4
        assert_eq!(set.sample(Finger::Thumb, Joint::Mcp).unwrap().position.x, 1.0);
        assert_eq!(set.sample(Finger::Thumb, Joint::Tip).unwrap().position.x, 4.0);
        // index PIP is landmark 6, little tip is landmark 20
        assert_eq!(set.sample(Finger::Index, Joint::Pip).unwrap().position.x, 6.0);
        assert_eq!(set.sample(Finger::Little, Joint::Tip).unwrap().position.x, 20.0);
    }

    #[test]
    fn test_frame_counts() {
        assert_eq!(Frame::empty().hand_count(), 0);
        assert!(Frame::empty().is_empty());
        assert_eq!(Frame::single(Hand::Left, HandJointSet::new()).hand_count(), 1);
        assert_eq!(Frame::pair(HandJointSet::new(), HandJointSet::new()).hand_count(), 2);
    }

    #[test]
    fn test_single_hand_answers_both_labels() {
        let set = HandJointSet::new().with(Finger::Thumb, Joint::Tip, 7.0, 8.0, 0.9);
        let frame = Frame::single(Hand::Left, set);
        assert!(frame.labeled(Hand::Right).is_none());
        assert!(frame.labeled(Hand::Left).is_some());
        assert_eq!(
            frame.joint(Hand::Right, Finger::Thumb, Joint::Tip),
            Some(Position::new(7.0, 8.0))
        );
    }

    #[test]
    fn test_pair_lookup_by_label() {
        let right = HandJointSet::new().with(Finger::Index, Joint::Tip, 1.0, 1.0, 0.9);
        let left = HandJointSet::new().with(Finger::Index, Joint::Tip, 2.0, 2.0, 0.9);
        let frame = Frame::pair(right, left);
        assert_eq!(
            frame.joint(Hand::Right, Finger::Index, Joint::Tip),
            Some(Position::new(1.0, 1.0))
        );
        assert_eq!(
            frame.joint(Hand::Left, Finger::Index, Joint::Tip),
            Some(Position::new(2.0, 2.0))
        );
    }

    #[test]
    fn test_empty_frame_has_no_joints() {
        assert!(Frame::empty().joint(Hand::Right, Finger::Index, Joint::Tip).is_none());
    }

    #[test]
    fn test_saved_pose_lookup() {
        let set = HandJointSet::new().with(Finger::Index, Joint::Tip, 3.0, 4.0, 0.9);
        let saved = SavedPose::capture(&Frame::single(Hand::Right, set));
        assert_eq!(
            saved.joint(Hand::Right, Finger::Index, Joint::Tip, GENERAL_CONFIDENCE),
            Some(Position::new(3.0, 4.0))
        );
    }

    #[test]
    fn test_hand_parse() {
        assert_eq!(Hand::parse("right"), Some(Hand::Right));
        assert_eq!(Hand::parse("left"), Some(Hand::Left));
        assert_eq!(Hand::parse("both"), None);
        assert_eq!(Hand::Left.as_str(), "left");
    }

    #[test]
    fn test_names() {
        assert_eq!(Finger::Little.as_str(), "little");
        assert_eq!(Joint::Pip.as_str(), "pip");
        assert_eq!(Joint::Mcp.index(), 3);
    }
}
