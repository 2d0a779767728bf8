use super::types::DictScore;
use crate::alphabet::{fold_case, Alphabet};
use std::collections::HashSet;

pub const MIN_EXTRACTED_WORD: usize = 2;

// Tier weights for matched letters
const WEIGHT_EXACT: f64 = 1.0;
const WEIGHT_NORMALIZED: f64 = 1.0;
const WEIGHT_STEMMED: f64 = 0.8;
const WEIGHT_NORMALIZED_STEMMED: f64 = 0.7;

/// Splits text into case-folded runs of this alphabet's letters. Single letters are noise.
pub fn extract_words(alphabet: &Alphabet, text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for c in text.chars() {
        if alphabet.contains(c) {
            current.push(fold_case(c));
            current_len += 1;
        } else {
            if current_len >= MIN_EXTRACTED_WORD {
                words.push(std::mem::take(&mut current));
            } else {
                current.clear();
            }
            current_len = 0;
        }
    }
    if current_len >= MIN_EXTRACTED_WORD {
        words.push(current);
    }
    words
}

/// Strips the first listed suffix that leaves a long enough base.
pub fn stem_word(alphabet: &Alphabet, word: &str) -> String {
    let word_len = word.chars().count();
    for suffix in &alphabet.suffixes {
        let suffix_len = suffix.chars().count();
        if word_len > suffix_len + alphabet.stem_min_base && word.ends_with(suffix.as_str()) {
            return word[..word.len() - suffix.len()].to_string();
        }
    }
    word.to_string()
}

/// Tiered dictionary matching: exact, normalized, stemmed, normalized + stemmed.
pub fn dict_score(alphabet: &Alphabet, dictionary: &HashSet<String>, text: &str) -> DictScore {
    let words = extract_words(alphabet, text);
    if words.is_empty() {
        return DictScore::default();
    }

    let mut matches = 0usize;
    let mut matched_letters = 0.0;
    let mut total_letters = 0.0;

    for word in &words {
        let len = word.chars().count() as f64;
        total_letters += len;

        if let Some(weight) = match_tier(alphabet, dictionary, word) {
            matches += 1;
            matched_letters += len * weight;
        }
    }

    let ratio = matches as f64 / words.len() as f64;
    let weighted = if total_letters > 0.0 {
        matched_letters / total_letters
    } else {
        0.0
    };

    DictScore {
        score: ratio * 0.5 + weighted * 0.5,
        matches,
        total: words.len(),
    }
}

fn match_tier(alphabet: &Alphabet, dictionary: &HashSet<String>, word: &str) -> Option<f64> {
    if dictionary.contains(word) {
        return Some(WEIGHT_EXACT);
    }

    let normalized = alphabet.normalize(word);
    let changed = normalized != word;
    if changed && dictionary.contains(&normalized) {
        return Some(WEIGHT_NORMALIZED);
    }

    let stem = stem_word(alphabet, word);
    if stem != word && dictionary.contains(&stem) {
        return Some(WEIGHT_STEMMED);
    }

    if changed {
        let stem = stem_word(alphabet, &normalized);
        if stem != normalized && dictionary.contains(&stem) {
            return Some(WEIGHT_NORMALIZED_STEMMED);
        }
    }
    None
}

/// Share of words whose stem, cut back one letter at a time, hits the dictionary.
///
/// Short stems can collide with short dictionary words; that weakness is accepted and the
/// signal is weighted below the tiered score.
pub fn stem_dict_score(alphabet: &Alphabet, dictionary: &HashSet<String>, text: &str) -> f64 {
    let words = extract_words(alphabet, text);
    if words.is_empty() {
        return 0.0;
    }

    let mut hits = 0usize;
    let mut candidate = String::new();
    for word in &words {
        let normalized = alphabet.normalize(word);
        let mut letters: Vec<char> = stem_word(alphabet, &normalized).chars().collect();

        while letters.len() >= alphabet.truncation_min {
            candidate.clear();
            candidate.extend(letters.iter());
            if dictionary.contains(&candidate) {
                hits += 1;
                break;
            }
            letters.pop();
        }
    }
    hits as f64 / words.len() as f64
}
