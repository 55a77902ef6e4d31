//! Modifier records - the six-coefficient bundle every stat source carries

mod default_map;

pub use default_map::DefaultMap;

use crate::types::Attribute;
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// The six coefficients a source contributes to one attribute
///
/// All fields default to zero. No sign restriction is placed on any of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coefficients {
    /// Added directly to the total
    pub flat: f64,
    /// Multiplies the aggregated total (stacks additively across sources)
    pub percent: f64,
    /// Added to the total, scaled by level index
    pub per_level: f64,
    /// Multiplicative percent, scaled by level index
    pub percent_per_level: f64,
    /// Multiplies only the character's base value
    pub percent_base: f64,
    /// Multiplies only the bonus portion (total minus base)
    pub percent_bonus: f64,
}

impl Coefficients {
    pub fn flat(value: f64) -> Self {
        Coefficients {
            flat: value,
            ..Default::default()
        }
    }

    pub fn percent(value: f64) -> Self {
        Coefficients {
            percent: value,
            ..Default::default()
        }
    }

    /// Base growth: a flat value plus a per-level increment
    pub fn growth(flat: f64, per_level: f64) -> Self {
        Coefficients {
            flat,
            per_level,
            ..Default::default()
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Coefficients::default()
    }
}

impl AddAssign for Coefficients {
    fn add_assign(&mut self, rhs: Self) {
        self.flat += rhs.flat;
        self.percent += rhs.percent;
        self.per_level += rhs.per_level;
        self.percent_per_level += rhs.percent_per_level;
        self.percent_base += rhs.percent_base;
        self.percent_bonus += rhs.percent_bonus;
    }
}

impl Add for Coefficients {
    type Output = Coefficients;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl Sum for Coefficients {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Coefficients::default(), Add::add)
    }
}

/// Per-attribute coefficients attached to a character, item, rune or talent rank
///
/// Attributes that were never set read back as all-zero coefficients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModifierRecord {
    stats: DefaultMap<Attribute, Coefficients>,
}

impl ModifierRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, attr: Attribute, coefficients: Coefficients) -> Self {
        self.set(attr, coefficients);
        self
    }

    /// Coefficients for `attr`, zero when unset
    pub fn get(&self, attr: Attribute) -> Coefficients {
        self.stats.get(&attr)
    }

    pub fn set(&mut self, attr: Attribute, coefficients: Coefficients) {
        self.stats.insert(attr, coefficients);
    }

    /// Attributes this record explicitly carries
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, Coefficients)> + '_ {
        self.stats.iter().map(|(attr, c)| (*attr, *c))
    }

    pub fn is_empty(&self) -> bool {
        self.stats.iter().all(|(_, c)| c.is_zero())
    }

    /// Attack speed has no total-scaling percent: every attack speed percent
    /// scales the base value only, so it is moved into `percent_base`.
    pub fn normalize(&mut self) {
        if self.stats.contains_key(&Attribute::AttackSpeed) {
            let attack_speed = self.stats.entry(Attribute::AttackSpeed);
            attack_speed.percent_base += attack_speed.percent;
            attack_speed.percent = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_attribute_is_zero() {
        let record = ModifierRecord::new().with(Attribute::Armor, Coefficients::flat(15.0));
        assert_eq!(record.get(Attribute::Armor).flat, 15.0);
        assert!(record.get(Attribute::Mana).is_zero());
    }

    #[test]
    fn test_coefficients_sum_independently() {
        let a = Coefficients {
            flat: 10.0,
            percent: 0.1,
            percent_bonus: 0.05,
            ..Default::default()
        };
        let b = Coefficients {
            flat: -4.0,
            per_level: 2.0,
            percent_bonus: 0.05,
            ..Default::default()
        };

        let total: Coefficients = [a, b].into_iter().sum();
        assert!((total.flat - 6.0).abs() < f64::EPSILON);
        assert!((total.percent - 0.1).abs() < f64::EPSILON);
        assert!((total.per_level - 2.0).abs() < f64::EPSILON);
        assert!((total.percent_bonus - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_normalize_folds_attack_speed_percent() {
        let mut record = ModifierRecord::new()
            .with(
                Attribute::AttackSpeed,
                Coefficients {
                    percent: 0.045,
                    percent_base: 0.01,
                    ..Default::default()
                },
            )
            .with(Attribute::Armor, Coefficients::percent(0.1));
        record.normalize();

        let attack_speed = record.get(Attribute::AttackSpeed);
        assert_eq!(attack_speed.percent, 0.0);
        assert!((attack_speed.percent_base - 0.055).abs() < 1e-12);
        // Other attributes keep their percent
        assert_eq!(record.get(Attribute::Armor).percent, 0.1);
    }

    #[test]
    fn test_parse_record_from_toml() {
        let toml = r#"
armor = { flat = 15.0 }
attack_speed = { percent_base = 0.12, percent_per_level = 0.002 }
"#;
        let record: ModifierRecord = toml::from_str(toml).unwrap();
        assert_eq!(record.get(Attribute::Armor), Coefficients::flat(15.0));
        assert!((record.get(Attribute::AttackSpeed).percent_per_level - 0.002).abs() < 1e-12);
        assert!(record.get(Attribute::Health).is_zero());
    }
}
