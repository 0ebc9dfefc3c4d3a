//! Guarded ratio values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A ratio whose denominator may be zero.
///
/// Serializes as a number, or `null` when undefined, so a zero standard
/// deviation or beta never surfaces as `Infinity` or `NaN`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ratio {
    /// A finite ratio.
    Value(f64),
    /// The denominator was zero or not finite.
    Undefined,
}

impl Ratio {
    /// Divides, returning `Undefined` for a zero or non-finite denominator
    /// or a non-finite result.
    #[must_use]
    pub fn guarded(numerator: f64, denominator: f64) -> Self {
        if denominator == 0.0 || !denominator.is_finite() {
            return Ratio::Undefined;
        }
        let value = numerator / denominator;
        if value.is_finite() {
            Ratio::Value(value)
        } else {
            Ratio::Undefined
        }
    }

    /// The value, if defined.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            Ratio::Value(v) => Some(*v),
            Ratio::Undefined => None,
        }
    }

    /// True if the ratio has a value.
    #[must_use]
    pub fn is_defined(&self) -> bool {
        matches!(self, Ratio::Value(_))
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ratio::Value(v) => write!(f, "{v:.4}"),
            Ratio::Undefined => f.write_str("undefined"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guarded_division() {
        assert_eq!(Ratio::guarded(1.0, 2.0), Ratio::Value(0.5));
        assert_eq!(Ratio::guarded(1.0, 0.0), Ratio::Undefined);
        assert_eq!(Ratio::guarded(1.0, -0.0), Ratio::Undefined);
        assert_eq!(Ratio::guarded(1.0, f64::NAN), Ratio::Undefined);
        assert_eq!(Ratio::guarded(f64::INFINITY, 1.0), Ratio::Undefined);
    }

    #[test]
    fn test_serialization() {
        assert_eq!(serde_json::to_string(&Ratio::Value(1.5)).unwrap(), "1.5");
        assert_eq!(serde_json::to_string(&Ratio::Undefined).unwrap(), "null");
        let r: Ratio = serde_json::from_str("null").unwrap();
        assert_eq!(r, Ratio::Undefined);
    }

    #[test]
    fn test_display() {
        assert_eq!(Ratio::Value(0.123456).to_string(), "0.1235");
        assert_eq!(Ratio::Undefined.to_string(), "undefined");
    }
}
