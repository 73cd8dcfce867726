//! Concrete gesture catalogue.

pub mod cursor;
pub mod draw;
pub mod gun;
pub mod heart;
pub mod pinch;

pub use cursor::Cursor;
pub use draw::Draw;
pub use gun::{Gun, GunPose};
pub use heart::Heart;
pub use pinch::Pinch;

use crate::config::GestureConfig;
use crate::event::GestureKind;
use crate::processor::GestureProcessor;

/// Build a processor for `kind` with thresholds taken from `config`.
pub fn build(kind: GestureKind, config: &GestureConfig) -> GestureProcessor {
    let processor = match kind {
        GestureKind::Draw => GestureProcessor::new(Draw::from_config(config)),
        GestureKind::Heart => GestureProcessor::new(Heart::from_config(config)),
        GestureKind::Gun => GestureProcessor::new(Gun::default()),
        GestureKind::Cursor => GestureProcessor::new(Cursor::from_config(config)),
        GestureKind::Pinch => {
            return GestureProcessor::new(Pinch::from_config(config))
                .with_min_confidence(config.pinch_min_confidence);
        }
    };
    processor.with_min_confidence(config.min_confidence)
}
