use crate::alphabet::{Alphabet, Language};
use crate::config::SegmenterParams;
use crate::scorer::{combine, stats, Scorer, ShiftResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info};

// Local key proxy: cheap two-signal score used per position.
pub const PROXY_BIGRAM_WEIGHT: f64 = 0.6;
pub const PROXY_CHI_WEIGHT: f64 = 0.4;

/// A region of the text with its own best key. Offsets are in characters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
    pub language: Language,
    pub best: ShiftResult,
}

impl Segment {
    pub fn key(&self) -> usize {
        self.best.key
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Number of distinct keys across the segments.
pub fn distinct_keys(segments: &[Segment]) -> usize {
    segments.iter().map(Segment::key).collect::<HashSet<_>>().len()
}

pub struct Segmenter<'a> {
    scorer: &'a Scorer,
    params: SegmenterParams,
}

impl<'a> Segmenter<'a> {
    pub fn new(scorer: &'a Scorer, params: SegmenterParams) -> Self {
        Self { scorer, params }
    }

    /// Best proxy key for every character position.
    ///
    /// Letter positions are scored independently on the rayon pool; non-letters then take the
    /// estimate of the position before them (0 at the start).
    pub fn compute_shift_map(&self, alphabet: &Alphabet, chars: &[char]) -> Vec<usize> {
        let n = chars.len();
        let half = self.params.window_size / 2;
        let indices: Vec<Option<usize>> = chars.iter().map(|&c| alphabet.index(c)).collect();

        let local: Vec<Option<usize>> = (0..n)
            .into_par_iter()
            .map(|i| {
                indices[i]?;
                let start = i.saturating_sub(half);
                let end = i.saturating_add(half).min(n);
                let window: Vec<usize> = indices[start..end].iter().flatten().copied().collect();
                Some(best_proxy_key(alphabet, &window))
            })
            .collect();

        let mut map = Vec::with_capacity(n);
        let mut previous = 0usize;
        for estimate in local {
            if let Some(key) = estimate {
                previous = key;
            }
            map.push(previous);
        }
        map
    }

    /// Replaces each estimate with the most frequent key of its neighborhood.
    pub fn smooth(&self, map: &[usize]) -> Vec<usize> {
        let n = map.len();
        let r = self.params.smooth_radius;
        let mut counts: Vec<(usize, usize)> = Vec::new();

        (0..n)
            .map(|i| {
                let start = i.saturating_sub(r);
                let end = i.saturating_add(r).saturating_add(1).min(n);
                counts.clear();
                for &key in &map[start..end] {
                    match counts.iter_mut().find(|(k, _)| *k == key) {
                        Some((_, c)) => *c += 1,
                        None => counts.push((key, 1)),
                    }
                }
                // Strict comparison: the first key seen among the maximal ones wins.
                let mut mode = map[i];
                let mut best = 0usize;
                for &(key, count) in &counts {
                    if count > best {
                        mode = key;
                        best = count;
                    }
                }
                mode
            })
            .collect()
    }

    /// Splits a smoothed map at every key change and annexes short segments to their predecessor.
    pub fn find_boundaries(&self, smoothed: &[usize], text_len: usize) -> Vec<(usize, usize)> {
        let Some(&first) = smoothed.first() else {
            return vec![(0, text_len)];
        };

        let mut bounds = Vec::new();
        let mut seg_start = 0usize;
        let mut current = first;
        for (i, &key) in smoothed.iter().enumerate().skip(1) {
            if key != current {
                bounds.push((seg_start, i));
                seg_start = i;
                current = key;
            }
        }
        bounds.push((seg_start, smoothed.len()));

        let mut merged: Vec<(usize, usize)> = Vec::with_capacity(bounds.len());
        for (start, end) in bounds {
            match merged.last_mut() {
                Some(last) if end - start < self.params.min_segment => last.1 = end,
                _ => merged.push((start, end)),
            }
        }
        merged
    }

    /// Segments `text` into regions encrypted with different keys and cracks each one.
    pub fn detect_mixed(&self, text: &str, language: Language) -> Vec<Segment> {
        let alphabet = self.scorer.alphabet(language);
        let chars: Vec<char> = text.chars().collect();
        let letters = chars.iter().filter(|&&c| alphabet.contains(c)).count();

        let min_letters = self.params.window_size.saturating_mul(2);
        if letters < min_letters {
            debug!(
                "mixed[{}]: {} letters, below {}; single crack",
                language, letters, min_letters
            );
            return self.crack_span(&chars, 0, chars.len(), language).into_iter().collect();
        }

        let map = self.compute_shift_map(alphabet, &chars);
        let smoothed = self.smooth(&map);
        let bounds = self.find_boundaries(&smoothed, chars.len());

        let segments: Vec<Segment> = bounds
            .par_iter()
            .filter_map(|&(start, end)| self.crack_span(&chars, start, end, language))
            .collect();

        info!(
            "🧩 mixed[{}]: {} segments, {} distinct keys",
            language,
            segments.len(),
            distinct_keys(&segments)
        );
        segments
    }

    fn crack_span(&self, chars: &[char], start: usize, end: usize, language: Language) -> Option<Segment> {
        let text: String = chars[start..end].iter().collect();
        let best = self.scorer.crack(&text, language).into_iter().next()?;
        Some(Segment {
            start,
            end,
            language,
            best,
        })
    }
}

fn best_proxy_key(alphabet: &Alphabet, window: &[usize]) -> usize {
    let mut shifted = vec![0usize; window.len()];
    let mut best_key = 0usize;
    let mut best_score = -1.0;

    for key in 0..alphabet.size {
        for (dst, &src) in shifted.iter_mut().zip(window) {
            *dst = alphabet.shift_index(src, key);
        }
        let chi = stats::chi_squared(alphabet, &shifted);
        let bigram = stats::bigram_score(alphabet, &shifted);
        let score = PROXY_BIGRAM_WEIGHT * bigram + PROXY_CHI_WEIGHT * combine::chi_norm(chi);
        if score > best_score {
            best_score = score;
            best_key = key;
        }
    }
    best_key
}

/// Mixed-cipher detection with default parameters.
pub fn detect_mixed(scorer: &Scorer, text: &str, language: Language) -> Vec<Segment> {
    Segmenter::new(scorer, SegmenterParams::default()).detect_mixed(text, language)
}

/// Decrypted text of all segments, in order.
pub fn join_segments(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.best.text.as_str()).collect()
}
