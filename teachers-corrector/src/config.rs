#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tunes how answers are compared with their reference.
///
/// The tolerances only apply when a decimal number takes part in either expression. Exact
/// expressions are always compared exactly.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct CorrectionConfig {
    /// Largest accepted difference, relative to the larger of the two values.
    pub relative_tolerance: f64,

    /// Largest accepted difference near zero.
    pub absolute_tolerance: f64,

    /// Number of points at which expressions with symbols are evaluated.
    pub samples: usize,

    /// Seed of the generator of sample points, so that grading is reproducible.
    pub seed: u64,
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        Self {
            relative_tolerance: 1e-9,
            absolute_tolerance: 1e-12,
            samples: 8,
            seed: 0x7ea_c4e5,
        }
    }
}

impl CorrectionConfig {
    /// Returns true if `a` and `b` are equal within the tolerances.
    pub fn close(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.absolute_tolerance + self.relative_tolerance * a.abs().max(b.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerances() {
        let config = CorrectionConfig::default();
        assert!(config.close(0.75, 0.75));
        assert!(config.close(1e6, 1e6 + 1e-4));
        assert!(config.close(0.0, 1e-13));
        assert!(!config.close(0.33, 1.0 / 3.0));
        assert!(!config.close(0.0, 1e-6));
    }
}
