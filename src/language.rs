use crate::alphabet::{is_english, is_russian, Language};
use serde::{Deserialize, Serialize};

/// Text is bilingual once the minority alphabet exceeds this share of all letters.
pub const BILINGUAL_MINORITY_SHARE: f64 = 0.05;

/// How far back (in code points) a split may move to land on whitespace.
pub const BOUNDARY_LOOKBACK: usize = 10;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LetterCounts {
    pub russian: usize,
    pub english: usize,
}

impl LetterCounts {
    pub fn total(&self) -> usize {
        self.russian + self.english
    }

    pub fn minority(&self) -> usize {
        self.russian.min(self.english)
    }
}

/// A run of text attributed to one language. Offsets are in characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageSpan {
    pub start: usize,
    pub end: usize,
    pub language: Language,
    pub text: String,
}

pub fn count_letters(text: &str) -> LetterCounts {
    let mut counts = LetterCounts::default();
    for c in text.chars() {
        if is_russian(c) {
            counts.russian += 1;
        } else if is_english(c) {
            counts.english += 1;
        }
    }
    counts
}

/// Majority alphabet by letter count; ties (including no letters) go to Russian.
pub fn detect_language(text: &str) -> Language {
    let counts = count_letters(text);
    if counts.english > counts.russian {
        Language::English
    } else {
        Language::Russian
    }
}

pub fn is_bilingual(text: &str) -> bool {
    let counts = count_letters(text);
    let total = counts.total();
    if total == 0 {
        return false;
    }
    counts.minority() as f64 / total as f64 > BILINGUAL_MINORITY_SHARE
}

fn letter_language(c: char) -> Option<Language> {
    if is_russian(c) {
        Some(Language::Russian)
    } else if is_english(c) {
        Some(Language::English)
    } else {
        None
    }
}

/// Cuts the text at every change of alphabet, preferring a nearby whitespace boundary.
pub fn split_by_language(text: &str) -> Vec<LanguageSpan> {
    if text.is_empty() {
        return Vec::new();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut spans = Vec::new();
    let mut current: Option<Language> = None;
    let mut span_start = 0usize;

    for (i, &c) in chars.iter().enumerate() {
        let Some(detected) = letter_language(c) else {
            continue;
        };

        match current {
            None => current = Some(detected),
            Some(lang) if lang != detected => {
                let floor = i.saturating_sub(BOUNDARY_LOOKBACK).max(span_start);
                let split_at = (floor..i)
                    .rev()
                    .find(|&j| matches!(chars[j], ' ' | '\n' | '\t'))
                    .map(|j| j + 1)
                    .unwrap_or(i);

                if split_at > span_start {
                    spans.push(LanguageSpan {
                        start: span_start,
                        end: split_at,
                        language: lang,
                        text: chars[span_start..split_at].iter().collect(),
                    });
                }
                span_start = split_at;
                current = Some(detected);
            }
            Some(_) => {}
        }
    }

    if let Some(lang) = current {
        if span_start < chars.len() {
            spans.push(LanguageSpan {
                start: span_start,
                end: chars.len(),
                language: lang,
                text: chars[span_start..].iter().collect(),
            });
        }
    }

    if spans.is_empty() {
        // No letters at all: fall back to one Russian span.
        spans.push(LanguageSpan {
            start: 0,
            end: chars.len(),
            language: Language::Russian,
            text: text.to_string(),
        });
    }
    spans
}
