//! Gesture lifecycle events.
//!
//! Processors return events from every frame step instead of calling back
//! into their owner.  Consumers either match on `GestureEvent` directly or
//! route events through a `GestureDelegate` whose methods default to no-ops.

use crate::frame::Position;

// ── Identity ───────────────────────────────────────────────

/// Concrete gesture family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    /// Pencil pose drawing with open-hand canvas clear.
    Draw,
    /// Two-hand heart shape.
    Heart,
    /// Fist, aim, shoot.
    Gun,
    /// Pointing cursor with directional triggers.
    Cursor,
    /// Debounced thumb/index pinch.
    Pinch,
}

impl GestureKind {
    pub const ALL: [GestureKind; 5] = [
        Self::Draw,
        Self::Heart,
        Self::Gun,
        Self::Cursor,
        Self::Pinch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draw => "draw",
            Self::Heart => "heart",
            Self::Gun => "gun",
            Self::Cursor => "cursor",
            Self::Pinch => "pinch",
        }
    }

    pub fn parse(s: &str) -> Option<GestureKind> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

/// Direction or click reported by the cursor gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorTrigger {
    Up,
    Down,
    Left,
    Right,
    Fire,
}

impl CursorTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::Fire => "fire",
        }
    }
}

/// Why a `Fired` event was emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    /// Open hand seen by the draw gesture.
    CanvasClear,
    /// Thumb dropped by the gun gesture.
    Shoot,
    Cursor(CursorTrigger),
}

impl TriggerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CanvasClear => "canvas-clear",
            Self::Shoot => "shoot",
            Self::Cursor(t) => t.as_str(),
        }
    }
}

// ── State ──────────────────────────────────────────────────

/// Per-processor recognition state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureState {
    Unknown,
    Possible,
    Detected,
    WaitForNextPose,
    WaitForRelease,
}

impl GestureState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Possible => "possible",
            Self::Detected => "detected",
            Self::WaitForNextPose => "wait-for-next-pose",
            Self::WaitForRelease => "wait-for-release",
        }
    }
}

// ── Events ─────────────────────────────────────────────────

/// Events emitted by gesture processors.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureEvent {
    /// First qualifying pose detected.
    Began {
        gesture: GestureKind,
        points: Vec<Position>,
    },
    /// Tracking update while the gesture is in progress.
    Moved {
        gesture: GestureKind,
        points: Vec<Position>,
    },
    /// A discrete action pose.
    Fired {
        gesture: GestureKind,
        points: Vec<Position>,
        trigger: TriggerKind,
    },
    /// Pose released normally.
    Ended {
        gesture: GestureKind,
        points: Vec<Position>,
    },
    /// Pose interrupted abnormally.
    Canceled {
        gesture: GestureKind,
        points: Vec<Position>,
    },
    /// Processor state changed.  Always precedes any lifecycle event the
    /// same step emits after the transition.
    StateChanged {
        gesture: GestureKind,
        from: GestureState,
        to: GestureState,
    },
}

impl GestureEvent {
    pub fn gesture(&self) -> GestureKind {
        match self {
            Self::Began { gesture, .. }
            | Self::Moved { gesture, .. }
            | Self::Fired { gesture, .. }
            | Self::Ended { gesture, .. }
            | Self::Canceled { gesture, .. }
            | Self::StateChanged { gesture, .. } => *gesture,
        }
    }

    /// Points carried by a lifecycle event (empty for state changes).
    pub fn points(&self) -> &[Position] {
        match self {
            Self::Began { points, .. }
            | Self::Moved { points, .. }
            | Self::Fired { points, .. }
            | Self::Ended { points, .. }
            | Self::Canceled { points, .. } => points,
            Self::StateChanged { .. } => &[],
        }
    }

    /// Whether this is a lifecycle event rather than a state notification.
    pub fn is_lifecycle(&self) -> bool {
        !matches!(self, Self::StateChanged { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Began { .. } => "began",
            Self::Moved { .. } => "moved",
            Self::Fired { .. } => "fired",
            Self::Ended { .. } => "ended",
            Self::Canceled { .. } => "canceled",
            Self::StateChanged { .. } => "state-changed",
        }
    }

    /// Route the event to the matching delegate method.
    pub fn dispatch(&self, delegate: &mut dyn GestureDelegate) {
        match self {
            Self::Began { gesture, points } => delegate.gesture_began(*gesture, points),
            Self::Moved { gesture, points } => delegate.gesture_moved(*gesture, points),
            Self::Fired {
                gesture,
                points,
                trigger,
            } => delegate.gesture_fired(*gesture, points, *trigger),
            Self::Ended { gesture, points } => delegate.gesture_ended(*gesture, points),
            Self::Canceled { gesture, points } => delegate.gesture_canceled(*gesture, points),
            Self::StateChanged { gesture, from, to } => {
                delegate.state_changed(*gesture, *from, *to)
            }
        }
    }

    /// S-expression form for logs and status.
    pub fn to_sexp(&self) -> String {
        let mut s = format!(
            "(:event :{} :gesture :{}",
            self.name(),
            self.gesture().as_str()
        );
        match self {
            Self::StateChanged { from, to, .. } => {
                s.push_str(&format!(" :from :{} :to :{}", from.as_str(), to.as_str()));
            }
            other => {
                if let Self::Fired { trigger, .. } = other {
                    s.push_str(&format!(" :trigger :{}", trigger.as_str()));
                }
                s.push_str(" :points (");
                for (i, p) in other.points().iter().enumerate() {
                    if i > 0 {
                        s.push(' ');
                    }
                    s.push_str(&format!("({:.1} {:.1})", p.x, p.y));
                }
                s.push(')');
            }
        }
        s.push(')');
        s
    }
}

/// Callback-style consumer of gesture events.  Implement only what you need.
pub trait GestureDelegate {
    fn gesture_began(&mut self, _gesture: GestureKind, _points: &[Position]) {}
    fn gesture_moved(&mut self, _gesture: GestureKind, _points: &[Position]) {}
    fn gesture_fired(&mut self, _gesture: GestureKind, _points: &[Position], _trigger: TriggerKind) {
    }
    fn gesture_ended(&mut self, _gesture: GestureKind, _points: &[Position]) {}
    fn gesture_canceled(&mut self, _gesture: GestureKind, _points: &[Position]) {}
    fn state_changed(&mut self, _gesture: GestureKind, _from: GestureState, _to: GestureState) {}
}
