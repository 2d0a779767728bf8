pub mod combine;
pub mod lexical;
pub mod stats;
pub mod types;

pub use self::types::{DictScore, ShiftResult};
use crate::alphabet::{Alphabet, Language};
use crate::config::DictionaryPaths;
use crate::dictionary::{Dictionary, WordSource};
use crate::language;
use rayon::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

// Plaintext detector thresholds
pub const PLAINTEXT_MATCH_RATIO: f64 = 0.7;
pub const PLAINTEXT_MIN_LETTERS: usize = 30;
pub const PLAINTEXT_DICT_SCORE: f64 = 0.4;

/// Immutable analysis context: both alphabet descriptors plus the word source.
///
/// Cheap to clone and safe to share between threads.
#[derive(Clone)]
pub struct Scorer {
    pub russian: Alphabet,
    pub english: Alphabet,
    dictionary: Arc<dyn WordSource>,
}

impl Scorer {
    pub fn new(dictionary: Arc<dyn WordSource>) -> Self {
        Self::with_alphabets(Alphabet::russian(), Alphabet::english(), dictionary)
    }

    pub fn with_alphabets(
        russian: Alphabet,
        english: Alphabet,
        dictionary: Arc<dyn WordSource>,
    ) -> Self {
        Self {
            russian,
            english,
            dictionary,
        }
    }

    pub fn from_paths(paths: &DictionaryPaths) -> Self {
        Self::new(Arc::new(Dictionary::new(paths.clone())))
    }

    /// Built-in vocabulary only; no file system access.
    pub fn builtin() -> Self {
        Self::new(Arc::new(Dictionary::builtin()))
    }

    #[inline(always)]
    pub fn alphabet(&self, language: Language) -> &Alphabet {
        match language {
            Language::Russian => &self.russian,
            Language::English => &self.english,
        }
    }

    pub fn words(&self, language: Language) -> &HashSet<String> {
        self.dictionary.words(language)
    }

    pub fn detect_language(&self, text: &str) -> Language {
        language::detect_language(text)
    }

    /// Decrypts `text` with `key` and scores the candidate on every signal.
    pub fn analyze_shift(&self, text: &str, key: i64, language: Language) -> ShiftResult {
        let alphabet = self.alphabet(language);
        let base = alphabet.letter_indices(text);
        self.score_key(alphabet, text, &base, alphabet.normalize_key(key))
    }

    fn score_key(&self, alphabet: &Alphabet, text: &str, base: &[usize], key: usize) -> ShiftResult {
        let words = self.words(alphabet.language);
        let decrypted = alphabet.decrypt(text, key as i64);
        let indices: Vec<usize> = base.iter().map(|&i| alphabet.shift_index(i, key)).collect();

        let chi = stats::chi_squared(alphabet, &indices);
        let bigram = stats::bigram_score(alphabet, &indices);
        let ds = lexical::dict_score(alphabet, words, &decrypted);
        let stem = lexical::stem_dict_score(alphabet, words, &decrypted);
        let combined = combine::combine_scores(chi, bigram, ds.score, stem, indices.len());

        ShiftResult {
            key,
            text: decrypted,
            chi_squared: chi,
            bigram,
            dictionary: ds.score,
            stem,
            combined,
            matches: ds.matches,
            total_words: ds.total,
        }
    }

    /// Scores every key of the alphabet and returns the results best-first.
    ///
    /// Always returns exactly `alphabet.size` results; ties keep key order.
    pub fn crack(&self, text: &str, language: Language) -> Vec<ShiftResult> {
        let alphabet = self.alphabet(language);
        let base = alphabet.letter_indices(text);

        let mut results: Vec<ShiftResult> = (0..alphabet.size)
            .into_par_iter()
            .map(|key| self.score_key(alphabet, text, &base, key))
            .collect();

        results.sort_by(|a, b| b.combined.total_cmp(&a.combined));

        if let Some(best) = results.first() {
            debug!(
                "crack[{}]: {} letters, best key {} ({:.1}%)",
                language,
                base.len(),
                best.key,
                best.confidence()
            );
        }
        results
    }

    pub fn dict_score(&self, text: &str, language: Language) -> DictScore {
        lexical::dict_score(self.alphabet(language), self.words(language), text)
    }

    pub fn index_of_coincidence(&self, text: &str, language: Language) -> f64 {
        let alphabet = self.alphabet(language);
        stats::index_of_coincidence(alphabet, &alphabet.letter_indices(text))
    }

    /// Heuristic check for text that is not encrypted at all.
    ///
    /// A `false` on short text is a weak negative, not proof of encryption.
    pub fn is_plaintext(&self, text: &str) -> bool {
        self.is_plaintext_in(text, self.detect_language(text))
    }

    pub fn is_plaintext_in(&self, text: &str, language: Language) -> bool {
        let alphabet = self.alphabet(language);
        let ds = self.dict_score(text, language);

        if ds.total > 0 && ds.match_ratio() >= PLAINTEXT_MATCH_RATIO {
            return true;
        }

        let indices = alphabet.letter_indices(text);
        if indices.len() >= PLAINTEXT_MIN_LETTERS {
            let ic = stats::index_of_coincidence(alphabet, &indices);
            return ic > alphabet.ic_threshold && ds.score > PLAINTEXT_DICT_SCORE;
        }
        false
    }
}
