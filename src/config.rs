use crate::error::{CfResult, CipherError};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Upper bound for every segmenter length, in characters.
pub const MAX_SEGMENTER_PARAM: usize = 1_000_000;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[command(flatten)]
    #[serde(default)]
    pub segmenter: SegmenterParams,
    #[command(flatten)]
    #[serde(default)]
    pub routing: RoutingParams,
    #[command(flatten)]
    #[serde(default)]
    pub dictionary: DictionaryPaths,
}

/// Sliding-window parameters of the mixed-cipher segmenter.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterParams {
    #[arg(long, default_value_t = 40)]
    pub window_size: usize,
    // Neighborhood is [i - r, i + r]
    #[arg(long, default_value_t = 7)]
    pub smooth_radius: usize,
    #[arg(long, default_value_t = 15)]
    pub min_segment: usize,
}

impl Default for SegmenterParams {
    fn default() -> Self {
        Self {
            window_size: 40,
            smooth_radius: 7,
            min_segment: 15,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingParams {
    /// Below this confidence (percent) a long text is re-checked as a mixed cipher.
    #[arg(long, default_value_t = 60.0)]
    pub low_confidence: f64,
    #[arg(long, default_value_t = 60)]
    pub mixed_min_chars: usize,
    #[arg(long, default_value_t = 5)]
    pub top: usize,
}

impl Default for RoutingParams {
    fn default() -> Self {
        Self {
            low_confidence: 60.0,
            mixed_min_chars: 60,
            top: 5,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DictionaryPaths {
    #[arg(long)]
    pub ru_dict: Option<PathBuf>,
    #[arg(long)]
    pub en_dict: Option<PathBuf>,
    /// Skip the executable/cwd/home lookup and use only explicit paths.
    #[arg(long, default_value_t = false)]
    pub no_dict_search: bool,
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CfResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CfResult<()> {
        if self.segmenter.window_size < 2 {
            return Err(CipherError::Config(format!(
                "window_size must be at least 2 (got {})",
                self.segmenter.window_size
            )));
        }
        let segmenter = [
            ("window_size", self.segmenter.window_size),
            ("smooth_radius", self.segmenter.smooth_radius),
            ("min_segment", self.segmenter.min_segment),
        ];
        for (name, value) in segmenter {
            if value > MAX_SEGMENTER_PARAM {
                return Err(CipherError::Config(format!(
                    "{} must be at most {} (got {})",
                    name, MAX_SEGMENTER_PARAM, value
                )));
            }
        }
        if !(0.0..=100.0).contains(&self.routing.low_confidence) {
            return Err(CipherError::Config(format!(
                "low_confidence is a percentage (got {})",
                self.routing.low_confidence
            )));
        }
        Ok(())
    }

    /// Applies the flags the user typed explicitly, leaving file values for everything else.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(segmenter.window_size, "window_size");
        update_if_present!(segmenter.smooth_radius, "smooth_radius");
        update_if_present!(segmenter.min_segment, "min_segment");

        update_if_present!(routing.low_confidence, "low_confidence");
        update_if_present!(routing.mixed_min_chars, "mixed_min_chars");
        update_if_present!(routing.top, "top");

        update_if_present!(dictionary.ru_dict, "ru_dict");
        update_if_present!(dictionary.en_dict, "en_dict");
        update_if_present!(dictionary.no_dict_search, "no_dict_search");
    }
}
