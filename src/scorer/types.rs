use serde::{Deserialize, Serialize};

/// Everything the ranker learned about one candidate key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftResult {
    pub key: usize,
    pub text: String,

    // Raw signals
    pub chi_squared: f64,
    pub bigram: f64,
    pub dictionary: f64,
    pub stem: f64,

    // Uncapped weighted sum, used for ranking
    pub combined: f64,

    pub matches: usize,
    pub total_words: usize,
}

impl ShiftResult {
    /// Combined score as a percentage, capped at 100.
    pub fn confidence(&self) -> f64 {
        (self.combined * 100.0).min(100.0)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DictScore {
    pub score: f64,
    pub matches: usize,
    pub total: usize,
}

impl DictScore {
    pub fn match_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.matches as f64 / self.total as f64
        }
    }
}
