//! Recognition thresholds and s-expression configuration.
//!
//! `GestureConfig` holds every tunable the gesture family uses.  It can be
//! updated from a property list such as
//! `(:pencil-distance 120 :default-hand :left :gestures (draw heart))` and
//! rendered back with `config_sexp`.

use anyhow::{anyhow, bail, Context};
use lexpr::Value;
use tracing::debug;

use crate::event::GestureKind;
use crate::evidence::{DEFAULT_MAX_DISTANCE, DEFAULT_TRIGGER};
use crate::frame::{Hand, GENERAL_CONFIDENCE, PINCH_CONFIDENCE};

/// Configuration for hand assignment and gesture recognition.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    /// Enable gesture recognition.
    pub enabled: bool,
    /// Label given to a lone observed hand.
    pub default_hand: Hand,
    /// Joint acceptance threshold for pose classifiers.
    pub min_confidence: f32,
    /// Joint acceptance threshold for the two-point pinch tracker.
    pub pinch_min_confidence: f32,
    /// Max thumb-tip to index-pip distance for the pencil pose.
    pub pencil_distance: f64,
    /// Max distance between paired tips for the heart's first pose.
    pub heart_near_distance: f64,
    /// How far index pips must rise above their tips for the heart shape.
    pub heart_above_margin: f64,
    /// Paired tip distance that releases the heart.
    pub heart_release_distance: f64,
    /// Minimum index length before the cursor reports a direction.
    pub cursor_min_extent: f64,
    /// Max thumb-tip to index-pip distance for a cursor click.
    pub cursor_click_distance: f64,
    /// Thumb/index distance below which the pinch collects engage evidence.
    pub pinch_max_distance: f64,
    /// Consecutive frames needed before the pinch commits.
    pub evidence_trigger: u32,
    /// Gestures to register, in evaluation order.
    pub gestures: Vec<GestureKind>,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_hand: Hand::Right,
            min_confidence: GENERAL_CONFIDENCE,
            pinch_min_confidence: PINCH_CONFIDENCE,
            pencil_distance: 100.0,
            heart_near_distance: 75.0,
            heart_above_margin: 75.0,
            heart_release_distance: 200.0,
            cursor_min_extent: 40.0,
            cursor_click_distance: 60.0,
            pinch_max_distance: DEFAULT_MAX_DISTANCE,
            evidence_trigger: DEFAULT_TRIGGER,
            gestures: GestureKind::ALL.to_vec(),
        }
    }
}

impl GestureConfig {
    /// Parse a property list into a config built on the defaults.
    pub fn from_sexp(raw: &str) -> anyhow::Result<Self> {
        let mut config = Self::default();
        config.apply_sexp(raw)?;
        Ok(config)
    }

    /// Update fields from a property list.  Keys not present are left
    /// alone; on any error the config is unchanged.
    pub fn apply_sexp(&mut self, raw: &str) -> anyhow::Result<()> {
        let value = lexpr::from_str(raw).context("malformed configuration s-expression")?;
        let mut next = self.clone();

        if let Some(enabled) = get_bool(&value, "enabled") {
            next.enabled = enabled;
        }
        if let Some(hand) = get_keyword(&value, "default-hand") {
            next.default_hand =
                Hand::parse(&hand).ok_or_else(|| anyhow!("unknown hand: {}", hand))?;
        }
        if let Some(v) = get_number(&value, "min-confidence")? {
            next.min_confidence = confidence(v, "min-confidence")?;
        }
        if let Some(v) = get_number(&value, "pinch-min-confidence")? {
            next.pinch_min_confidence = confidence(v, "pinch-min-confidence")?;
        }
        if let Some(v) = get_number(&value, "pencil-distance")? {
            next.pencil_distance = positive(v, "pencil-distance")?;
        }
        if let Some(v) = get_number(&value, "heart-near-distance")? {
            next.heart_near_distance = positive(v, "heart-near-distance")?;
        }
        if let Some(v) = get_number(&value, "heart-above-margin")? {
            if !(v >= 0.0 && v.is_finite()) {
                bail!("heart-above-margin must be a finite non-negative number, got {}", v);
            }
            next.heart_above_margin = v;
        }
        if let Some(v) = get_number(&value, "heart-release-distance")? {
            next.heart_release_distance = positive(v, "heart-release-distance")?;
        }
        if let Some(v) = get_number(&value, "cursor-min-extent")? {
            next.cursor_min_extent = positive(v, "cursor-min-extent")?;
        }
        if let Some(v) = get_number(&value, "cursor-click-distance")? {
            next.cursor_click_distance = positive(v, "cursor-click-distance")?;
        }
        if let Some(v) = get_number(&value, "pinch-max-distance")? {
            next.pinch_max_distance = positive(v, "pinch-max-distance")?;
        }
        if let Some(v) = get_number(&value, "evidence-trigger")? {
            if v < 1.0 || v.fract() != 0.0 || v > f64::from(u32::MAX) {
                bail!("evidence-trigger must be a positive integer, got {}", v);
            }
            next.evidence_trigger = v as u32;
        }
        if let Some(list) = get_value(&value, "gestures") {
            next.gestures = parse_gestures(list)?;
        }

        if next.heart_release_distance <= next.heart_near_distance {
            bail!(
                "heart-release-distance ({}) must exceed heart-near-distance ({})",
                next.heart_release_distance,
                next.heart_near_distance,
            );
        }

        debug!("gesture config updated");
        *self = next;
        Ok(())
    }

    /// Generate s-expression for the active configuration.
    pub fn config_sexp(&self) -> String {
        let gestures: Vec<&str> = self.gestures.iter().map(|g| g.as_str()).collect();
        format!(
            "(:enabled {} :default-hand :{} :min-confidence {:.2} :pinch-min-confidence {:.2} :pencil-distance {:.1} :heart-near-distance {:.1} :heart-above-margin {:.1} :heart-release-distance {:.1} :cursor-min-extent {:.1} :cursor-click-distance {:.1} :pinch-max-distance {:.1} :evidence-trigger {} :gestures ({}))",
            if self.enabled { "t" } else { "nil" },
            self.default_hand.as_str(),
            self.min_confidence,
            self.pinch_min_confidence,
            self.pencil_distance,
            self.heart_near_distance,
            self.heart_above_margin,
            self.heart_release_distance,
            self.cursor_min_extent,
            self.cursor_click_distance,
            self.pinch_max_distance,
            self.evidence_trigger,
            gestures.join(" "),
        )
    }
}

fn confidence(v: f64, key: &str) -> anyhow::Result<f32> {
    if !(0.0..=1.0).contains(&v) {
        bail!("{} must be within [0, 1], got {}", key, v);
    }
    Ok(v as f32)
}

fn positive(v: f64, key: &str) -> anyhow::Result<f64> {
    if !(v > 0.0 && v.is_finite()) {
        bail!("{} must be positive, got {}", key, v);
    }
    Ok(v)
}

fn parse_gestures(list: &Value) -> anyhow::Result<Vec<GestureKind>> {
    let mut gestures = Vec::new();
    for item in flatten_list(list) {
        let name = atom_string(item).ok_or_else(|| anyhow!("bad gesture entry: {}", item))?;
        let kind = GestureKind::parse(&name).ok_or_else(|| anyhow!("unknown gesture: {}", name))?;
        if !gestures.contains(&kind) {
            gestures.push(kind);
        }
    }
    Ok(gestures)
}

// ── Plist helpers ──────────────────────────────────────────

/// Find the value following `:key` in a property list.
/// Handles both `Value::Keyword("key")` (elisp parser) and
/// `Value::Symbol(":key")` (default parser) forms.
fn get_value<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    let prefixed = format!(":{}", key);
    let mut current = value;
    while let Value::Cons(pair) = current {
        let is_key = match pair.car() {
            Value::Keyword(k) => k.as_ref() == key,
            Value::Symbol(s) => s.as_ref() == prefixed,
            _ => false,
        };
        if is_key {
            return match pair.cdr() {
                Value::Cons(next) => Some(next.car()),
                _ => None,
            };
        }
        current = pair.cdr();
    }
    None
}

/// Render an atom as a bare string (keyword colon stripped).
fn atom_string(val: &Value) -> Option<String> {
    match val {
        Value::Keyword(v) => Some(v.to_string()),
        Value::Symbol(v) => Some(v.strip_prefix(':').unwrap_or(v).to_string()),
        Value::String(v) => Some(v.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(if *b { "t" } else { "nil" }.to_string()),
        Value::Null | Value::Nil => Some("nil".to_string()),
        _ => None,
    }
}

/// Extract a keyword value from an s-expression plist as a string.
fn get_keyword(value: &Value, key: &str) -> Option<String> {
    get_value(value, key).and_then(atom_string)
}

/// Extract a boolean value from an s-expression plist.
/// Treats "nil" as false, anything else as true.
fn get_bool(value: &Value, key: &str) -> Option<bool> {
    get_keyword(value, key).map(|s| s != "nil")
}

/// Extract a numeric value; present-but-not-a-number is an error.
fn get_number(value: &Value, key: &str) -> anyhow::Result<Option<f64>> {
    match get_keyword(value, key) {
        None => Ok(None),
        Some(s) => s
            .parse::<f64>()
            .map(Some)
            .map_err(|_| anyhow!(":{} expects a number, got {}", key, s)),
    }
}

/// Flatten a possibly nested list/cons structure into a Vec of leaf values.
fn flatten_list(value: &Value) -> Vec<&Value> {
    let mut result = Vec::new();
    fn walk<'a>(v: &'a Value, out: &mut Vec<&'a Value>) {
        match v {
            Value::Cons(pair) => {
                walk(pair.car(), out);
                walk(pair.cdr(), out);
            }
            Value::Null => {}
            other => out.push(other),
        }
    }
    walk(value, &mut result);
    result
}
