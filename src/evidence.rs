//! Consecutive-frame evidence accumulator for two-point distance signals.
//!
//! Raw per-frame distance flickers around the threshold; the accumulator
//! only commits to `Engaged` / `Disengaged` after `trigger` consecutive
//! frames on the same side.

use tracing::trace;

/// Default engagement distance in display units.
pub const DEFAULT_MAX_DISTANCE: f64 = 40.0;

/// Default number of consecutive frames needed to commit.
pub const DEFAULT_TRIGGER: u32 = 3;

/// Debounced ternary output of the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvidenceState {
    /// No evidence yet (initial, or after reset).
    Unknown,
    PossibleEngaged,
    Engaged,
    PossibleDisengaged,
    Disengaged,
}

impl EvidenceState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::PossibleEngaged => "possible-engaged",
            Self::Engaged => "engaged",
            Self::PossibleDisengaged => "possible-disengaged",
            Self::Disengaged => "disengaged",
        }
    }

    /// Either of the two uncommitted states.
    pub fn is_possible(&self) -> bool {
        matches!(self, Self::PossibleEngaged | Self::PossibleDisengaged)
    }
}

/// Pinch/apart evidence counters.
#[derive(Debug, Clone)]
pub struct EvidenceAccumulator {
    max_distance: f64,
    trigger: u32,
    close_count: u32,
    far_count: u32,
    state: EvidenceState,
}

impl Default for EvidenceAccumulator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DISTANCE, DEFAULT_TRIGGER)
    }
}

impl EvidenceAccumulator {
    /// `trigger` is clamped to at least one frame.
    pub fn new(max_distance: f64, trigger: u32) -> Self {
        Self {
            max_distance,
            trigger: trigger.max(1),
            close_count: 0,
            far_count: 0,
            state: EvidenceState::Unknown,
        }
    }

    /// Feed one frame's distance and return the debounced state.
    pub fn update(&mut self, distance: f64) -> EvidenceState {
        if distance < self.max_distance {
            self.close_count = self.close_count.saturating_add(1);
            self.far_count = 0;
            self.state = if self.close_count >= self.trigger {
                EvidenceState::Engaged
            } else {
                EvidenceState::PossibleEngaged
            };
        } else {
            self.far_count = self.far_count.saturating_add(1);
            self.close_count = 0;
            self.state = if self.far_count >= self.trigger {
                EvidenceState::Disengaged
            } else {
                EvidenceState::PossibleDisengaged
            };
        }
        trace!(
            "evidence: distance={:.1} close={} far={} state={}",
            distance,
            self.close_count,
            self.far_count,
            self.state.as_str(),
        );
        self.state
    }

    /// Zero both counters and return to `Unknown`.
    pub fn reset(&mut self) {
        self.close_count = 0;
        self.far_count = 0;
        self.state = EvidenceState::Unknown;
    }

    pub fn state(&self) -> EvidenceState {
        self.state
    }

    pub fn close_count(&self) -> u32 {
        self.close_count
    }

    pub fn far_count(&self) -> u32 {
        self.far_count
    }

    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    pub fn trigger(&self) -> u32 {
        self.trigger
    }
}
