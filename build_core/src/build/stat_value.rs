//! StatValue - Combines a base value with summed coefficients

use crate::modifier::Coefficients;
use serde::{Deserialize, Serialize};

/// Base stat at a 1-based level: `flat + per_level * (7/400 (n^2 - 1) + 267/400 (n - 1))`
///
/// Level 1 adds no growth.
pub fn grow(flat: f64, per_level: f64, level: u32) -> f64 {
    let n = f64::from(level);
    flat + per_level * (7.0 / 400.0 * (n * n - 1.0) + 267.0 / 400.0 * (n - 1.0))
}

/// One attribute's base value and the coefficients summed across sources
///
/// Final value is calculated as:
/// `pre = (base × (1 + Σpercent_base) + Σflat + Σper_level × L) × (1 + Σpercent + Σpercent_per_level × L)`
/// `total = pre + Σpercent_bonus × (pre − base)`
///
/// where `L` is the zero-based level index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatValue {
    /// Character base at the current level
    pub base: f64,
    /// Summed coefficients of every selected source
    pub modifiers: Coefficients,
    /// Zero-based level index
    pub level_index: u32,
}

impl StatValue {
    pub fn new(base: f64, modifiers: Coefficients, level_index: u32) -> Self {
        StatValue {
            base,
            modifiers,
            level_index,
        }
    }

    pub fn with_base(base: f64) -> Self {
        StatValue {
            base,
            ..Default::default()
        }
    }

    /// Total before the bonus-only percentage applies
    pub fn pre_bonus(&self) -> f64 {
        let m = &self.modifiers;
        let level = f64::from(self.level_index);
        let additive = self.base * (1.0 + m.percent_base) + m.flat + m.per_level * level;
        additive * (1.0 + m.percent + m.percent_per_level * level)
    }

    /// Final value
    pub fn compute(&self) -> f64 {
        let pre_bonus = self.pre_bonus();
        pre_bonus + self.modifiers.percent_bonus * (pre_bonus - self.base)
    }

    /// Final value minus base
    pub fn bonus(&self) -> f64 {
        self.compute() - self.base
    }
}
