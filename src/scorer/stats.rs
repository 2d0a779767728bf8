use crate::alphabet::Alphabet;

/// Returned for an empty letter sequence so it never wins a comparison.
pub const CHI_SQUARED_SENTINEL: f64 = 1e9;

pub const MIN_BIGRAM_LETTERS: usize = 4;
pub const MIN_IC_LETTERS: usize = 2;

fn letter_counts(alphabet: &Alphabet, indices: &[usize]) -> Vec<usize> {
    let mut counts = vec![0usize; alphabet.size];
    for &i in indices {
        if let Some(c) = counts.get_mut(i) {
            *c += 1;
        }
    }
    counts
}

/// Fit of the observed letter counts against the reference frequencies. Lower is better.
pub fn chi_squared(alphabet: &Alphabet, indices: &[usize]) -> f64 {
    let n = indices.len();
    if n == 0 {
        return CHI_SQUARED_SENTINEL;
    }

    let counts = letter_counts(alphabet, indices);
    let mut chi = 0.0;
    for (i, &observed) in counts.iter().enumerate() {
        let expected = alphabet.frequencies.get(i).copied().unwrap_or(0.0) * n as f64;
        if expected > 0.0 {
            let diff = observed as f64 - expected;
            chi += diff * diff / expected;
        }
    }
    chi
}

/// Share of adjacent letter pairs that are common bigrams.
pub fn bigram_score(alphabet: &Alphabet, indices: &[usize]) -> f64 {
    if indices.len() < MIN_BIGRAM_LETTERS {
        return 0.0;
    }
    let total = indices.len() - 1;
    let hits = indices
        .windows(2)
        .filter(|pair| alphabet.is_common_bigram(pair[0], pair[1]))
        .count();
    hits as f64 / total as f64
}

/// Probability that two letters drawn at random are equal.
///
/// Rotation-invariant: it tells language from noise, never one key from another.
pub fn index_of_coincidence(alphabet: &Alphabet, indices: &[usize]) -> f64 {
    let n = indices.len();
    if n < MIN_IC_LETTERS {
        return 0.0;
    }
    let counts = letter_counts(alphabet, indices);
    let sum: f64 = counts
        .iter()
        .map(|&c| c as f64 * (c as f64 - 1.0))
        .sum();
    sum / (n as f64 * (n as f64 - 1.0))
}
