/// Chi-squared values at or above this contribute nothing.
pub const CHI_DECAY: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalWeights {
    pub chi: f64,
    pub bigram: f64,
    pub dictionary: f64,
    pub stem: f64,
}

/// Length bands: chi-squared is trusted less as the sample shrinks.
pub fn weights_for(letters: usize) -> SignalWeights {
    let (chi, bigram, dictionary, stem) = if letters >= 100 {
        (0.35, 0.10, 0.35, 0.20)
    } else if letters >= 30 {
        (0.20, 0.20, 0.35, 0.25)
    } else if letters >= 10 {
        (0.10, 0.30, 0.35, 0.25)
    } else {
        (0.05, 0.45, 0.30, 0.20)
    };
    SignalWeights {
        chi,
        bigram,
        dictionary,
        stem,
    }
}

#[inline(always)]
pub fn chi_norm(chi: f64) -> f64 {
    (1.0 - chi / CHI_DECAY).max(0.0)
}

pub fn combine_scores(chi: f64, bigram: f64, dictionary: f64, stem: f64, letters: usize) -> f64 {
    let w = weights_for(letters);
    w.chi * chi_norm(chi) + w.bigram * bigram + w.dictionary * dictionary + w.stem * stem
}
