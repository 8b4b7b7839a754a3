//! Session high score
//!
//! Lives only as long as the process; a page reload starts fresh.

use serde::{Deserialize, Serialize};

/// Best score seen since the process started
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current best score
    pub fn best(&self) -> u64 {
        self.best
    }

    /// Fold a score in. Returns true if it set a new best.
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_maximum() {
        let mut high = HighScore::new();
        assert!(high.record(3));
        assert!(!high.record(2));
        assert!(!high.record(3));
        assert_eq!(high.best(), 3);
        assert!(high.record(7));
        assert_eq!(high.best(), 7);
    }

    #[test]
    fn test_zero_is_not_a_new_best() {
        let mut high = HighScore::new();
        assert!(!high.record(0));
        assert_eq!(high.best(), 0);
    }
}
