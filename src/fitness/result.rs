//! Multi-objective fitness result and its tolerance-banded ordering
//!
//! Components are compared in rule order. A component that is ahead, but by
//! no more than the tolerance, counts as a tie and the next component
//! decides. When the last component is such a near tie, the one ahead wins.

use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, Serialize)]
pub struct FitnessResult {
    values: Vec<f64>,
    tolerance: f64,
}

impl FitnessResult {
    pub fn new(values: Vec<f64>, tolerance: f64) -> Self {
        Self { values, tolerance }
    }

    /// Zero vector of `len` components
    pub fn zeros(len: usize, tolerance: f64) -> Self {
        Self::new(vec![0.0; len], tolerance)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `self > other` under this result's tolerance
    pub fn is_greater_than(&self, other: &FitnessResult) -> bool {
        if self == other {
            return false;
        }
        let band = 1.0 + self.tolerance;
        let last = self.values.len().min(other.values.len()).saturating_sub(1);
        for (i, (a, b)) in self.values.iter().zip(other.values.iter()).enumerate() {
            if *a > b * band {
                return true;
            }
            if a < b {
                return false;
            }
            // b <= a <= b * band
            if i == last {
                return true;
            }
        }
        false
    }

    /// `self < other`: `other` is ahead of `self` under the same band rules
    pub fn is_less_than(&self, other: &FitnessResult) -> bool {
        if self == other {
            return false;
        }
        let band = 1.0 + self.tolerance;
        let last = self.values.len().min(other.values.len()).saturating_sub(1);
        for (i, (a, b)) in self.values.iter().zip(other.values.iter()).enumerate() {
            if *b > a * band {
                return true;
            }
            if b < a {
                return false;
            }
            // a <= b <= a * band
            if i == last {
                return true;
            }
        }
        false
    }

    pub fn compare(&self, other: &FitnessResult) -> Ordering {
        if self.is_greater_than(other) {
            Ordering::Greater
        } else if self.is_less_than(other) {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    }
}

/// Exact equality of every component; tolerance is not part of identity
impl PartialEq for FitnessResult {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exact(values: &[f64]) -> FitnessResult {
        FitnessResult::new(values.to_vec(), 0.0)
    }

    fn banded(values: &[f64]) -> FitnessResult {
        FitnessResult::new(values.to_vec(), 0.1)
    }

    #[test]
    fn test_exact_lexicographic_order() {
        assert!(exact(&[2.0, 0.0]).is_greater_than(&exact(&[1.0, 9.0])));
        assert!(exact(&[1.0, 3.0]).is_greater_than(&exact(&[1.0, 2.0])));
        assert!(exact(&[1.0, 2.0]).is_less_than(&exact(&[1.0, 3.0])));
        assert!(!exact(&[1.0, 2.0]).is_greater_than(&exact(&[1.0, 2.0])));
        assert!(!exact(&[1.0, 2.0]).is_less_than(&exact(&[1.0, 2.0])));
        assert_eq!(exact(&[1.0, 2.0]), exact(&[1.0, 2.0]));
    }

    #[test]
    fn test_within_band_on_last_component_wins() {
        assert!(banded(&[105.0]).is_greater_than(&banded(&[100.0])));
        assert!(banded(&[100.0]).is_less_than(&banded(&[105.0])));
        assert!(!banded(&[100.0]).is_greater_than(&banded(&[105.0])));
    }

    #[test]
    fn test_outside_band_wins_regardless_of_rest() {
        assert!(banded(&[111.0, 0.0]).is_greater_than(&banded(&[100.0, 50.0])));
        assert!(banded(&[100.0, 50.0]).is_less_than(&banded(&[111.0, 0.0])));
    }

    #[test]
    fn test_within_band_defers_to_next_component() {
        // 105 is inside 100's band: the second objective decides for the
        // higher side, the lower side loses on the first objective outright
        assert!(banded(&[105.0, 60.0]).is_greater_than(&banded(&[100.0, 50.0])));
        assert!(!banded(&[105.0, 10.0]).is_greater_than(&banded(&[100.0, 50.0])));
        assert!(!banded(&[100.0, 50.0]).is_greater_than(&banded(&[105.0, 10.0])));
        assert_eq!(
            banded(&[105.0, 10.0]).compare(&banded(&[100.0, 50.0])),
            Ordering::Equal
        );
    }

    #[test]
    fn test_compare() {
        assert_eq!(exact(&[2.0]).compare(&exact(&[1.0])), Ordering::Greater);
        assert_eq!(exact(&[1.0]).compare(&exact(&[2.0])), Ordering::Less);
        assert_eq!(exact(&[1.0]).compare(&exact(&[1.0])), Ordering::Equal);
    }

    #[test]
    fn test_zeros() {
        let z = FitnessResult::zeros(3, 0.0);
        assert_eq!(z.values(), &[0.0, 0.0, 0.0]);
        assert!(exact(&[0.0, 0.0, 1.0]).is_greater_than(&z));
        assert!(FitnessResult::zeros(0, 0.0) == FitnessResult::zeros(0, 0.0));
    }
}
