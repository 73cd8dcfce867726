//! Gesture set: the ordered processor list fed once per frame.
//!
//! Every registered processor sees every frame, in registration order, and
//! is evaluated independently; the set holds no cross-gesture state.  Raw
//! estimator output goes through `process_hands`, which labels hands first
//! and skips the whole frame when labeling stalls.

use tracing::{debug, info};

use crate::assign::{assign_hands, Assignment};
use crate::config::GestureConfig;
use crate::event::{GestureEvent, GestureKind};
use crate::frame::{Frame, HandJointSet};
use crate::gestures;
use crate::processor::GestureProcessor;

/// Per-set counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetStats {
    /// Frames evaluated by the processors.
    pub frames: u64,
    /// Frames skipped because two hands could not be labeled.
    pub stalled: u64,
    /// Lifecycle and state events emitted.
    pub events: u64,
}

/// Ordered collection of gesture processors.
#[derive(Debug)]
pub struct GestureSet {
    /// Configuration.
    pub config: GestureConfig,
    processors: Vec<GestureProcessor>,
    stats: SetStats,
    terminated: bool,
}

impl Default for GestureSet {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureSet {
    /// Create an empty set with default configuration.
    pub fn new() -> Self {
        Self {
            config: GestureConfig::default(),
            processors: Vec::new(),
            stats: SetStats::default(),
            terminated: false,
        }
    }

    /// Create a set holding the gestures named in `config`, in order.
    pub fn from_config(config: GestureConfig) -> Self {
        let processors = Self::build_all(&config);
        info!("gesture set built with {} processors", processors.len());
        Self {
            config,
            processors,
            stats: SetStats::default(),
            terminated: false,
        }
    }

    fn build_all(config: &GestureConfig) -> Vec<GestureProcessor> {
        config
            .gestures
            .iter()
            .map(|&kind| gestures::build(kind, config))
            .collect()
    }

    /// Register a processor after those already present.
    pub fn append(&mut self, processor: GestureProcessor) {
        debug!("gesture {} registered", processor.kind().as_str());
        self.processors.push(processor);
        self.terminated = false;
    }

    pub fn processors(&self) -> &[GestureProcessor] {
        &self.processors
    }

    /// First registered processor of `kind`.
    pub fn processor(&self, kind: GestureKind) -> Option<&GestureProcessor> {
        self.processors.iter().find(|p| p.kind() == kind)
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    pub fn stats(&self) -> SetStats {
        self.stats
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Label one estimator result and evaluate it.  A stalled labeling
    /// skips evaluation without touching any gesture state.
    pub fn process_hands(&mut self, hands: Vec<HandJointSet>) -> Vec<GestureEvent> {
        if !self.config.enabled {
            return Vec::new();
        }
        let assigned = assign_hands(hands, self.config.default_hand, self.config.min_confidence);
        match assigned {
            Assignment::Assigned(frame) => self.process_frame(&frame),
            Assignment::Stalled => {
                self.stats.stalled += 1;
                Vec::new()
            }
        }
    }

    /// Feed an already-labeled frame to every processor in order.
    pub fn process_frame(&mut self, frame: &Frame) -> Vec<GestureEvent> {
        if !self.config.enabled {
            return Vec::new();
        }
        self.stats.frames += 1;

        let mut events = Vec::new();
        for processor in &mut self.processors {
            events.extend(processor.process(frame));
        }
        self.stats.events += events.len() as u64;
        events
    }

    /// Apply a configuration plist and rebuild the registered gestures from
    /// it.  All gesture state is dropped; on error nothing changes.
    pub fn reconfigure(&mut self, raw: &str) -> anyhow::Result<()> {
        self.config.apply_sexp(raw)?;
        self.processors = Self::build_all(&self.config);
        self.terminated = false;
        info!(
            "gesture set reconfigured with {} processors",
            self.processors.len()
        );
        Ok(())
    }

    /// Return every processor to `unknown`.
    pub fn reset(&mut self) -> Vec<GestureEvent> {
        info!("gesture set reset");
        let mut events = Vec::new();
        for processor in &mut self.processors {
            events.extend(processor.state_reset());
        }
        events
    }

    /// Cancel every in-progress gesture, e.g. when detection is lost.
    pub fn cancel_all(&mut self) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        for processor in &mut self.processors {
            events.extend(processor.cancel());
        }
        events
    }

    /// Drop every processor; the frame source has stopped.
    pub fn terminate(&mut self) {
        info!(
            "gesture set terminated, dropping {} processors",
            self.processors.len()
        );
        self.processors.clear();
        self.terminated = true;
    }

    /// Generate s-expression for status reporting.
    pub fn status_sexp(&self) -> String {
        let mut s = format!(
            "(:enabled {} :terminated {} :frames {} :stalled {} :events {} :gestures (",
            if self.config.enabled { "t" } else { "nil" },
            if self.terminated { "t" } else { "nil" },
            self.stats.frames,
            self.stats.stalled,
            self.stats.events,
        );
        for (i, processor) in self.processors.iter().enumerate() {
            if i > 0 {
                s.push(' ');
            }
            s.push_str(&processor.status_sexp());
        }
        s.push_str("))");
        s
    }
}
