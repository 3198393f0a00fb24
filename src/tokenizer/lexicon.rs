use std::collections::HashSet;
use std::path::Path;

use crate::error::{Result, ZonesError};

/// Set of known words; words outside it are dropped by the tokenizer
///
/// Lookups are case-insensitive: entries are stored lowercased.
///
/// # Examples
/// ```
/// use tfidf_zones::tokenizer::lexicon::Lexicon;
///
/// let lexicon = Lexicon::from_words(["Cat", "sat"]);
/// assert!(lexicon.contains("cat"));
/// assert!(!lexicon.contains("xyzzy"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    words: HashSet<String>,
}

impl Lexicon {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Parse a word list: whitespace separated words, `#` starts a comment line
    pub fn parse(source: &str) -> Self {
        Self::from_words(
            source
                .lines()
                .filter(|line| !line.trim_start().starts_with('#'))
                .flat_map(str::split_whitespace),
        )
    }

    /// Load a word list file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|err| ZonesError::io(path, err))?;
        let lexicon = Self::parse(&source);
        if lexicon.is_empty() {
            log::warn!("lexicon {} is empty: every word will be dropped", path.display());
        }
        Ok(lexicon)
    }

    pub fn contains(&self, word: &str) -> bool {
        if word.chars().any(char::is_uppercase) {
            self.words.contains(&word.to_lowercase())
        } else {
            self.words.contains(word)
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
