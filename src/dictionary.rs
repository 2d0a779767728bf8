use crate::alphabet::tables::{ENGLISH_COMMON_WORDS, RUSSIAN_COMMON_WORDS};
use crate::alphabet::{fold_case, is_english, is_russian, Language};
use crate::config::DictionaryPaths;
use crate::error::CfResult;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

pub const MIN_WORD_LEN: usize = 2;
pub const MAX_WORD_LEN: usize = 50;

// Files smaller than this are treated as placeholders.
const MIN_WORD_LIST_BYTES: u64 = 100;

/// Read-only access to the known words of a language.
///
/// Implementations must hand out the same set for the lifetime of the value and must be safe to
/// read from several threads at once.
pub trait WordSource: Send + Sync {
    fn words(&self, language: Language) -> &HashSet<String>;

    fn contains(&self, language: Language, word: &str) -> bool {
        self.words(language).contains(word)
    }
}

/// Word lists backed by optional files plus the built-in fallback vocabulary.
///
/// Each language is materialized on first access and never changes afterwards.
pub struct Dictionary {
    paths: DictionaryPaths,
    russian: OnceLock<HashSet<String>>,
    english: OnceLock<HashSet<String>>,
}

impl Dictionary {
    pub fn new(paths: DictionaryPaths) -> Self {
        Self {
            paths,
            russian: OnceLock::new(),
            english: OnceLock::new(),
        }
    }

    /// Built-in words only, no file lookup.
    pub fn builtin() -> Self {
        Self::new(DictionaryPaths {
            ru_dict: None,
            en_dict: None,
            no_dict_search: true,
        })
    }

    /// Eagerly materialized dictionary from in-memory lists (built-in words are still added).
    pub fn from_words<R, E, S1, S2>(russian: R, english: E) -> Self
    where
        R: IntoIterator<Item = S1>,
        E: IntoIterator<Item = S2>,
        S1: AsRef<str>,
        S2: AsRef<str>,
    {
        let dict = Self::builtin();
        let mut ru = builtin_set(Language::Russian);
        ru.extend(russian.into_iter().filter_map(|w| accept_word(w.as_ref())));
        let mut en = builtin_set(Language::English);
        en.extend(english.into_iter().filter_map(|w| accept_word(w.as_ref())));
        let _ = dict.russian.set(ru);
        let _ = dict.english.set(en);
        dict
    }

    /// Total number of known words over both languages. Forces both lists to load.
    pub fn len(&self) -> usize {
        self.words(Language::Russian).len() + self.words(Language::English).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, language: Language) -> &OnceLock<HashSet<String>> {
        match language {
            Language::Russian => &self.russian,
            Language::English => &self.english,
        }
    }

    fn resolve_path(&self, language: Language) -> Option<PathBuf> {
        let explicit = match language {
            Language::Russian => self.paths.ru_dict.clone(),
            Language::English => self.paths.en_dict.clone(),
        };
        if explicit.is_some() || self.paths.no_dict_search {
            return explicit;
        }
        find_word_list(default_file_name(language))
    }

    fn materialize(&self, language: Language) -> HashSet<String> {
        let mut words = HashSet::new();

        match self.resolve_path(language) {
            Some(path) => match load_word_list(&path) {
                Ok(list) => {
                    info!(
                        "📖 Loaded {} {} words from {:?}",
                        list.len(),
                        language.display_name(),
                        path
                    );
                    words.extend(list);
                }
                Err(e) => {
                    warn!(
                        "⚠️  Could not read word list {:?}: {}. Using built-in words only.",
                        path, e
                    );
                }
            },
            None => debug!(
                "No {} word list found, using built-in words",
                language.display_name()
            ),
        }

        words.extend(builtin_set(language));
        words
    }
}

impl WordSource for Dictionary {
    fn words(&self, language: Language) -> &HashSet<String> {
        self.slot(language).get_or_init(|| self.materialize(language))
    }
}

pub fn default_file_name(language: Language) -> &'static str {
    match language {
        Language::Russian => "russian_dict.txt",
        Language::English => "english_dict.txt",
    }
}

fn builtin_set(language: Language) -> HashSet<String> {
    let list = match language {
        Language::Russian => RUSSIAN_COMMON_WORDS,
        Language::English => ENGLISH_COMMON_WORDS,
    };
    list.iter().map(|w| w.to_string()).collect()
}

/// Case-folds a raw line and returns it if it is a usable dictionary word.
pub fn accept_word(line: &str) -> Option<String> {
    let word: String = line.trim_end().chars().map(fold_case).collect();
    let len = word.chars().count();
    if !(MIN_WORD_LEN..=MAX_WORD_LEN).contains(&len) {
        return None;
    }
    if word.chars().all(|c| is_russian(c) || is_english(c)) {
        Some(word)
    } else {
        None
    }
}

pub fn load_word_list<P: AsRef<Path>>(path: P) -> CfResult<Vec<String>> {
    let file = File::open(path)?;
    read_word_list(file)
}

/// Parses a newline-delimited word list. Bad lines are skipped, never reported.
pub fn read_word_list<R: Read>(reader: R) -> CfResult<Vec<String>> {
    // One record per '\n'-terminated line; a lone '\r' stays inside the line.
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .delimiter(b'\t')
        .terminator(csv::Terminator::Any(b'\n'))
        .from_reader(reader);

    let mut words = Vec::new();
    let mut skipped = 0usize;
    let mut line = Vec::new();

    for record in rdr.byte_records() {
        let record = record?;
        // Rejoin tab-split fields so trailing tabs trim away like any other whitespace.
        line.clear();
        for (i, field) in record.iter().enumerate() {
            if i > 0 {
                line.push(b'\t');
            }
            line.extend_from_slice(field);
        }

        let accepted = std::str::from_utf8(&line).ok().and_then(accept_word);
        match accepted {
            Some(word) => words.push(word),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("Skipped {} unusable word list lines", skipped);
    }
    Ok(words)
}

/// Looks for `name` next to the executable, one level above it, in the working
/// directory and in `$HOME`.
pub fn find_word_list(name: &str) -> Option<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
    {
        if let Some(parent) = exe_dir.parent() {
            let parent = parent.to_path_buf();
            dirs.push(exe_dir);
            dirs.push(parent);
        } else {
            dirs.push(exe_dir);
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(home) = std::env::var_os("HOME") {
        dirs.push(PathBuf::from(home));
    }

    dirs.into_iter()
        .map(|dir| dir.join(name))
        .find(|p| {
            p.metadata()
                .map(|m| m.is_file() && m.len() > MIN_WORD_LIST_BYTES)
                .unwrap_or(false)
        })
}
