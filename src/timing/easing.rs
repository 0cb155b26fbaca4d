// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Easing curves for scroll animation.
//!
//! Each curve maps progress in [0, 1] to an eased value in [0, 1]. All curves
//! are monotonic and hit exactly 0 and 1 at the ends, so a tween built on
//! them never overshoots its target.

use serde::{Deserialize, Serialize};

/// Easing curve applied to tween progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Easing {
    /// Constant speed
    Linear,
    /// Cubic ease-out: 1 - (1-t)^3
    #[default]
    Cubic,
    /// Quintic ease-out: 1 - (1-t)^5
    Quintic,
    /// Exponential ease-out: 1 - 2^(-10t)
    Exponential,
}

impl Easing {
    /// Apply the curve to a progress value
    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Cubic => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Easing::Quintic => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv * inv * inv
            }
            Easing::Exponential => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f64.powf(-10.0 * t)
                }
            }
        }
    }

    /// All supported curves
    pub fn all() -> [Easing; 4] {
        [Easing::Linear, Easing::Cubic, Easing::Quintic, Easing::Exponential]
    }
}
