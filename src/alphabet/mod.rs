pub mod tables;

use self::tables::*;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// The two supported alphabets. Russian comes first and wins every tie.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
    ValueEnum,
)]
pub enum Language {
    #[strum(serialize = "ru")]
    #[serde(rename = "ru")]
    #[value(name = "ru")]
    Russian,
    #[strum(serialize = "en")]
    #[serde(rename = "en")]
    #[value(name = "en")]
    English,
}

impl Language {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Russian => "Russian",
            Self::English => "English",
        }
    }
}

// --- Code point classification ---

pub fn is_russian_lower(c: char) -> bool {
    matches!(c, '\u{0430}'..='\u{044F}' | '\u{0451}')
}

pub fn is_russian_upper(c: char) -> bool {
    matches!(c, '\u{0410}'..='\u{042F}' | '\u{0401}')
}

pub fn is_russian(c: char) -> bool {
    is_russian_lower(c) || is_russian_upper(c)
}

pub fn is_english(c: char) -> bool {
    c.is_ascii_alphabetic()
}

pub fn is_upper(c: char) -> bool {
    is_russian_upper(c) || c.is_ascii_uppercase()
}

/// Lowercases letters of both alphabets. Everything else is returned untouched.
pub fn fold_case(c: char) -> char {
    match c {
        '\u{0401}' => '\u{0451}',
        '\u{0410}'..='\u{042F}' => char::from_u32(c as u32 + 0x20).unwrap_or(c),
        'A'..='Z' => c.to_ascii_lowercase(),
        _ => c,
    }
}

pub fn to_upper(c: char) -> char {
    match c {
        '\u{0451}' => '\u{0401}',
        '\u{0430}'..='\u{044F}' => char::from_u32(c as u32 - 0x20).unwrap_or(c),
        'a'..='z' => c.to_ascii_uppercase(),
        _ => c,
    }
}

// --- Index mapping ---
//
// ё sits between е and ж in the alphabet but far away in Unicode (U+0451),
// so the Russian mapping is three explicit ranges rather than one subtraction.

pub fn russian_index(c: char) -> Option<usize> {
    let c = fold_case(c);
    match c {
        '\u{0451}' => Some(6),
        '\u{0430}'..='\u{0435}' => Some((c as u32 - 0x0430) as usize),
        '\u{0436}'..='\u{044F}' => Some((c as u32 - 0x0436) as usize + 7),
        _ => None,
    }
}

pub fn russian_letter(idx: usize) -> char {
    debug_assert!(idx < RUSSIAN_SIZE);
    let code = match idx {
        6 => 0x0451,
        0..=5 => 0x0430 + idx as u32,
        _ => 0x0436 + (idx as u32 - 7),
    };
    char::from_u32(code).unwrap_or('\u{0430}')
}

pub fn english_index(c: char) -> Option<usize> {
    let c = fold_case(c);
    if c.is_ascii_lowercase() {
        Some((c as u8 - b'a') as usize)
    } else {
        None
    }
}

pub fn english_letter(idx: usize) -> char {
    debug_assert!(idx < ENGLISH_SIZE);
    (b'a' + idx as u8) as char
}

fn normalize_russian(c: char) -> char {
    match c {
        '\u{0451}' => '\u{0435}',
        '\u{0401}' => '\u{0415}',
        _ => c,
    }
}

fn normalize_identity(c: char) -> char {
    c
}

/// Everything the scorers need to know about one alphabet.
#[derive(Clone)]
pub struct Alphabet {
    pub language: Language,
    pub size: usize,
    pub frequencies: Vec<f64>,
    // Flattened: bigrams[first * size + second]
    pub bigrams: Vec<bool>,
    pub suffixes: Vec<String>,
    /// A suffix is stripped only if more than this many letters remain.
    pub stem_min_base: usize,
    /// Progressive truncation stops below this length.
    pub truncation_min: usize,
    pub ic_threshold: f64,
    index_fn: fn(char) -> Option<usize>,
    letter_fn: fn(usize) -> char,
    normalize_fn: fn(char) -> char,
}

impl std::fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Alphabet")
            .field("language", &self.language)
            .field("size", &self.size)
            .field("suffixes", &self.suffixes.len())
            .finish()
    }
}

impl Alphabet {
    pub fn new(language: Language) -> Self {
        match language {
            Language::Russian => Self::russian(),
            Language::English => Self::english(),
        }
    }

    pub fn russian() -> Self {
        let mut alphabet = Self {
            language: Language::Russian,
            size: RUSSIAN_SIZE,
            frequencies: RUSSIAN_FREQ.to_vec(),
            bigrams: Vec::new(),
            suffixes: RUSSIAN_SUFFIXES.iter().map(|s| s.to_string()).collect(),
            stem_min_base: 3,
            truncation_min: 3,
            ic_threshold: 0.045,
            index_fn: russian_index,
            letter_fn: russian_letter,
            normalize_fn: normalize_russian,
        };
        alphabet.load_bigrams(RUSSIAN_BIGRAMS);
        alphabet
    }

    pub fn english() -> Self {
        let mut alphabet = Self {
            language: Language::English,
            size: ENGLISH_SIZE,
            frequencies: ENGLISH_FREQ.to_vec(),
            bigrams: Vec::new(),
            suffixes: ENGLISH_SUFFIXES.iter().map(|s| s.to_string()).collect(),
            stem_min_base: 2,
            truncation_min: 2,
            ic_threshold: 0.055,
            index_fn: english_index,
            letter_fn: english_letter,
            normalize_fn: normalize_identity,
        };
        alphabet.load_bigrams(ENGLISH_BIGRAMS);
        alphabet
    }

    /// Rebuilds the bigram table from two-letter strings. Pairs with foreign letters are ignored.
    pub fn load_bigrams(&mut self, pairs: &[&str]) {
        self.bigrams = vec![false; self.size * self.size];
        for pair in pairs {
            let chars: Vec<char> = pair.chars().collect();
            if chars.len() != 2 {
                continue;
            }
            if let (Some(a), Some(b)) = (self.index(chars[0]), self.index(chars[1])) {
                self.bigrams[a * self.size + b] = true;
            }
        }
    }

    #[inline(always)]
    pub fn index(&self, c: char) -> Option<usize> {
        (self.index_fn)(c)
    }

    #[inline(always)]
    pub fn letter(&self, idx: usize) -> char {
        (self.letter_fn)(idx)
    }

    #[inline(always)]
    pub fn contains(&self, c: char) -> bool {
        self.index(c).is_some()
    }

    #[inline(always)]
    pub fn is_common_bigram(&self, first: usize, second: usize) -> bool {
        self.bigrams
            .get(first * self.size + second)
            .copied()
            .unwrap_or(false)
    }

    pub fn normalize(&self, word: &str) -> String {
        word.chars().map(self.normalize_fn).collect()
    }

    pub fn letter_indices(&self, text: &str) -> Vec<usize> {
        text.chars().filter_map(|c| self.index(c)).collect()
    }

    /// Normalizes any integer key into `[0, size)`.
    pub fn normalize_key(&self, key: i64) -> usize {
        key.rem_euclid(self.size as i64) as usize
    }

    #[inline(always)]
    pub fn shift_index(&self, idx: usize, key: usize) -> usize {
        (idx + self.size - key % self.size) % self.size
    }

    /// Rotates every letter of this alphabet backward by `key`, keeping case.
    pub fn decrypt(&self, text: &str, key: i64) -> String {
        let key = self.normalize_key(key);
        text.chars()
            .map(|c| match self.index(c) {
                Some(idx) => {
                    let plain = self.letter(self.shift_index(idx, key));
                    if is_upper(c) {
                        to_upper(plain)
                    } else {
                        plain
                    }
                }
                None => c,
            })
            .collect()
    }

    pub fn encrypt(&self, text: &str, key: i64) -> String {
        self.decrypt(text, -key)
    }
}

/// Decodes raw input bytes, dropping every byte that cannot start a valid UTF-8 sequence.
pub fn decode_input(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut rest = bytes;
    while !rest.is_empty() {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                out.push_str(valid);
                break;
            }
            Err(e) => {
                let (valid, after) = rest.split_at(e.valid_up_to());
                if let Ok(s) = std::str::from_utf8(valid) {
                    out.push_str(s);
                }
                rest = &after[1..];
            }
        }
    }
    out
}
