pub mod animate;
pub mod field;

pub use animate::*;
pub use field::*;

use crate::constants::{SPARKLE_ALPHA, SPARKLE_COUNT, SPARKLE_SIZE};

/// Sparkle tunables.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SparkleParams {
    pub count: usize,
    pub base_size: f32,
    pub base_alpha: f32,
}

impl Default for SparkleParams {
    fn default() -> Self {
        Self {
            count: SPARKLE_COUNT,
            base_size: SPARKLE_SIZE,
            base_alpha: SPARKLE_ALPHA,
        }
    }
}
