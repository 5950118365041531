use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;

/// Prediction equals gold, position for position and in length.
pub fn exact_match(predicted: &[u32], gold: &[u32]) -> bool {
    predicted == gold
}

/// Prediction has as many tokens as gold.
pub fn length_match(predicted: &[u32], gold: &[u32]) -> bool {
    predicted.len() == gold.len()
}

/// A running hit rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Accuracy {
    pub correct: usize,
    pub total: usize,
}

impl Accuracy {
    pub fn record(&mut self, hit: bool) {
        self.total += 1;
        if hit {
            self.correct += 1;
        }
    }

    pub fn merge(&mut self, other: Accuracy) {
        self.correct += other.correct;
        self.total += other.total;
    }

    /// Fraction of hits, `None` before anything was recorded.
    pub fn value(&self) -> Option<f64> {
        (self.total > 0).then(|| self.correct as f64 / self.total as f64)
    }
}

impl Display for Accuracy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.value() {
            Some(value) => write!(f, "{value:.4} ({}/{})", self.correct, self.total),
            None => f.write_str("n/a (0/0)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_accuracy_has_no_value() {
        assert_eq!(Accuracy::default().value(), None);
        assert_eq!(Accuracy::default().to_string(), "n/a (0/0)");
    }

    #[test]
    fn exact_match_requires_equal_length() {
        assert!(!exact_match(&[1, 2], &[1, 2, 3]));
        assert!(length_match(&[4, 5, 6], &[1, 2, 3]));
    }
}
