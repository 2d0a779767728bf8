use crate::alphabet::Language;
use crate::config::{RoutingParams, SegmenterParams};
use crate::language::{self, LanguageSpan};
use crate::mixed::{self, Segment, Segmenter};
use crate::scorer::{Scorer, ShiftResult};
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AnalysisKind {
    /// One key over the whole text.
    Single,
    /// Regions encrypted with different keys.
    Mixed,
    /// Russian and English regions cracked separately.
    Bilingual,
}

/// Everything the front end needs to present one input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub kind: AnalysisKind,
    pub language: Language,
    pub is_plaintext: bool,
    /// Best-first candidates for the whole text; empty for bilingual input.
    pub ranking: Vec<ShiftResult>,
    pub segments: Vec<Segment>,
    pub spans: Vec<LanguageSpan>,
    /// Decrypted text: the best candidate, or the segment decryptions joined in order.
    pub text: String,
}

impl Analysis {
    pub fn best(&self) -> Option<&ShiftResult> {
        self.ranking.first()
    }

    /// Languages present in the analysed text, in order of first appearance.
    pub fn languages(&self) -> Vec<Language> {
        let mut langs = Vec::new();
        for seg in &self.segments {
            if !langs.contains(&seg.language) {
                langs.push(seg.language);
            }
        }
        if langs.is_empty() {
            langs.push(self.language);
        }
        langs
    }
}

/// Options for one `analyze` call.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub routing: RoutingParams,
    pub segmenter: SegmenterParams,
    pub language: Option<Language>,
    pub force_mixed: bool,
}

/// Service: route the text to the bilingual splitter, the ranker and, when needed, the
/// mixed-cipher segmenter.
pub fn analyze(scorer: &Scorer, text: &str, options: &AnalyzeOptions) -> Analysis {
    if options.language.is_none() && language::is_bilingual(text) {
        return analyze_bilingual(scorer, text);
    }

    let lang = options
        .language
        .unwrap_or_else(|| scorer.detect_language(text));
    let is_plaintext = scorer.is_plaintext_in(text, lang);

    let mut ranking = scorer.crack(text, lang);
    let best_confidence = ranking.first().map(ShiftResult::confidence).unwrap_or(0.0);
    let char_len = text.chars().count();

    let wants_mixed = options.force_mixed
        || (!is_plaintext
            && best_confidence < options.routing.low_confidence
            && char_len > options.routing.mixed_min_chars);

    if wants_mixed {
        let segments =
            Segmenter::new(scorer, options.segmenter.clone()).detect_mixed(text, lang);
        let keys = mixed::distinct_keys(&segments);
        debug!("routing: mixed check found {} distinct keys", keys);

        if keys > 1 {
            info!("🔀 mixed cipher detected: {} segments", segments.len());
            let joined = mixed::join_segments(&segments);
            ranking.truncate(options.routing.top);
            return Analysis {
                kind: AnalysisKind::Mixed,
                language: lang,
                is_plaintext,
                ranking,
                segments,
                spans: Vec::new(),
                text: joined,
            };
        }
    }

    let decrypted = ranking.first().map(|r| r.text.clone()).unwrap_or_default();
    ranking.truncate(options.routing.top);
    Analysis {
        kind: AnalysisKind::Single,
        language: lang,
        is_plaintext,
        ranking,
        segments: Vec::new(),
        spans: Vec::new(),
        text: decrypted,
    }
}

fn analyze_bilingual(scorer: &Scorer, text: &str) -> Analysis {
    let spans = language::split_by_language(text);
    info!("🌐 bilingual input: {} language spans", spans.len());

    let segments: Vec<Segment> = spans
        .iter()
        .filter_map(|span| {
            let best = scorer.crack(&span.text, span.language).into_iter().next()?;
            Some(Segment {
                start: span.start,
                end: span.end,
                language: span.language,
                best,
            })
        })
        .collect();

    Analysis {
        kind: AnalysisKind::Bilingual,
        language: scorer.detect_language(text),
        is_plaintext: false,
        ranking: Vec::new(),
        text: mixed::join_segments(&segments),
        segments,
        spans,
    }
}
