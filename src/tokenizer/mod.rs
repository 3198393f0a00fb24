//! Text normalization and n-gram expansion.
//!
//! Raw text is folded into plain ASCII punctuation, split on whitespace and
//! stripped down to words. Words are then expanded into the terms that get
//! counted: the words themselves, contiguous n-grams, or skip-grams.

pub mod lexicon;
pub mod stopwords;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ZonesError};

pub use lexicon::Lexicon;

/// Joins the words of a contiguous n-gram (`the_cat_sat`)
pub const NGRAM_DELIMITER: &str = "_";
/// Joins the two words of a skip-gram (`the~sat`)
/// Distinct from [`NGRAM_DELIMITER`] so a skip-gram never collides with a bigram.
pub const SKIPGRAM_DELIMITER: &str = "~";
/// Words skipped between the two halves of a skip-gram
pub const SKIPGRAM_DISTANCE: usize = 1;

/// N-gram level
/// 1-5 are contiguous n-grams, 6 selects skip-grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct NgramLevel(usize);

impl NgramLevel {
    pub const UNIGRAM: Self = Self(1);
    pub const BIGRAM: Self = Self(2);
    pub const SKIPGRAM: Self = Self(6);

    /// Validate an n-gram level
    pub fn new(n: usize) -> Result<Self> {
        if (1..=6).contains(&n) {
            Ok(Self(n))
        } else {
            Err(ZonesError::config(format!("ngram must be 1-6, got {n}")))
        }
    }

    #[inline]
    pub fn get(self) -> usize {
        self.0
    }

    #[inline]
    pub fn is_skipgram(self) -> bool {
        self.0 == 6
    }

    /// Human readable label used in reports
    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "unigrams",
            2 => "bigrams",
            3 => "trigrams",
            4 => "4-grams",
            5 => "5-grams",
            _ => "skipgrams",
        }
    }
}

impl Default for NgramLevel {
    fn default() -> Self {
        Self::UNIGRAM
    }
}

impl TryFrom<usize> for NgramLevel {
    type Error = ZonesError;

    fn try_from(n: usize) -> Result<Self> {
        Self::new(n)
    }
}

impl From<NgramLevel> for usize {
    fn from(level: NgramLevel) -> Self {
        level.0
    }
}

/// Tokenizer behaviour knobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Lowercase every word
    pub lowercase: bool,
    /// Drop words made only of digits (and inner apostrophes/hyphens)
    pub strip_numbers: bool,
    /// Minimum word length in characters
    pub min_length: usize,
    /// Drop n-grams and skip-grams containing a function word
    pub drop_stopword_ngrams: bool,
    /// Word list file; when set, words missing from it are dropped
    pub lexicon: Option<PathBuf>,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            lowercase: true,
            strip_numbers: false,
            min_length: 1,
            drop_stopword_ngrams: false,
            lexicon: None,
        }
    }
}

/// Turns raw text into an ordered sequence of terms
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    config: TokenizerConfig,
    lexicon: Option<Lexicon>,
}

impl Tokenizer {
    /// Tokenizer without a lexicon; see [`Tokenizer::from_config`] to load one
    pub fn new(config: TokenizerConfig) -> Self {
        Self {
            config,
            lexicon: None,
        }
    }

    /// Tokenizer with the lexicon named by `config.lexicon`, if any
    pub fn from_config(config: TokenizerConfig) -> Result<Self> {
        let lexicon = config.lexicon.as_deref().map(Lexicon::from_file).transpose()?;
        let tokenizer = Self::new(config);
        Ok(match lexicon {
            Some(lexicon) => tokenizer.with_lexicon(lexicon),
            None => tokenizer,
        })
    }

    /// Keep only words found in `lexicon`
    pub fn with_lexicon(mut self, lexicon: Lexicon) -> Self {
        log::debug!("lexicon filter on: {} words", lexicon.len());
        self.lexicon = Some(lexicon);
        self
    }

    pub fn lexicon(&self) -> Option<&Lexicon> {
        self.lexicon.as_ref()
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Normalized words of `text`, in order
    pub fn words(&self, text: &str) -> Vec<String> {
        let folded: String = text.chars().filter_map(fold_typography).collect();
        folded
            .split_whitespace()
            .filter_map(|raw| self.normalize_word(raw))
            .collect()
    }

    /// Terms of `text` at the given n-gram level
    pub fn tokenize(&self, text: &str, level: NgramLevel) -> Vec<String> {
        self.expand(&self.words(text), level)
    }

    /// Expand already normalized words into terms
    pub fn expand(&self, words: &[String], level: NgramLevel) -> Vec<String> {
        let terms = expand(words, level);
        if self.config.drop_stopword_ngrams && level != NgramLevel::UNIGRAM {
            stopwords::filter_function_word_ngrams(terms)
        } else {
            terms
        }
    }

    fn normalize_word(&self, raw: &str) -> Option<String> {
        let mut word = String::with_capacity(raw.len());
        for c in raw.chars() {
            if c.is_alphanumeric() {
                if self.config.lowercase {
                    word.extend(c.to_lowercase());
                } else {
                    word.push(c);
                }
            } else if is_joiner(c) && !word.ends_with(is_joiner) {
                word.push(c);
            }
        }
        let word = word.trim_matches(is_joiner);
        if word.is_empty() || word.chars().count() < self.config.min_length {
            return None;
        }
        if self.config.strip_numbers && !word.chars().any(char::is_alphabetic) {
            return None;
        }
        if self.lexicon.as_ref().is_some_and(|lexicon| !lexicon.contains(word)) {
            return None;
        }
        Some(word.to_string())
    }
}

/// Tokenize with the default configuration
///
/// # Examples
/// ```
/// use tfidf_zones::tokenize;
///
/// let terms = tokenize("The cat sat.", 2).unwrap();
/// assert_eq!(terms, vec!["the_cat", "cat_sat"]);
/// ```
pub fn tokenize(text: &str, n: usize) -> Result<Vec<String>> {
    let level = NgramLevel::new(n)?;
    Ok(Tokenizer::default().tokenize(text, level))
}

/// Expand words into terms for `level`
pub fn expand(words: &[String], level: NgramLevel) -> Vec<String> {
    if level.is_skipgram() {
        skipgrams(words, SKIPGRAM_DISTANCE)
    } else {
        ngrams(words, level.get())
    }
}

/// Contiguous n-grams, sliding one word at a time
pub fn ngrams(words: &[String], n: usize) -> Vec<String> {
    if n <= 1 {
        return words.to_vec();
    }
    words.windows(n).map(|w| w.join(NGRAM_DELIMITER)).collect()
}

/// Word pairs with `skip` words between them
pub fn skipgrams(words: &[String], skip: usize) -> Vec<String> {
    words
        .windows(skip + 2)
        .filter_map(|w| match (w.first(), w.last()) {
            (Some(first), Some(last)) => Some(format!("{first}{SKIPGRAM_DELIMITER}{last}")),
            _ => None,
        })
        .collect()
}

#[inline]
fn is_joiner(c: char) -> bool {
    c == '\'' || c == '-'
}

/// Map typographic punctuation onto the ASCII forms the word filter understands.
/// `None` drops the character.
fn fold_typography(c: char) -> Option<char> {
    match c {
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' => Some('\''),
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' => None,
        '\u{2010}'..='\u{2015}' | '\u{2212}' => Some('-'),
        '\u{2026}' => Some(' '),
        _ => Some(c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        Tokenizer::default().words(text)
    }

    #[test]
    fn simple_sentence_is_lowercased_and_stripped() {
        assert_eq!(
            words("The cat sat on the mat."),
            vec!["the", "cat", "sat", "on", "the", "mat"]
        );
    }

    #[test]
    fn empty_input_yields_no_terms() {
        assert!(tokenize("", 1).unwrap().is_empty());
        assert!(tokenize("   \n\t ", 3).unwrap().is_empty());
    }

    #[test]
    fn punctuation_only_words_vanish() {
        assert_eq!(words("Hello , world ! -- ?"), vec!["hello", "world"]);
    }

    #[test]
    fn contractions_and_hyphens_survive() {
        let w = words("I didn't see the looking-glass on the well-known shelf");
        assert!(w.contains(&"didn't".to_string()));
        assert!(w.contains(&"looking-glass".to_string()));
        assert!(w.contains(&"well-known".to_string()));
    }

    #[test]
    fn typographic_punctuation_is_folded() {
        assert_eq!(words("\u{201C}Hello\u{201D} she said"), vec!["hello", "she", "said"]);
        assert_eq!(words("word\u{2014}another"), vec!["word-another"]);
        assert_eq!(words("wait\u{2026} what"), vec!["wait", "what"]);
        assert_eq!(words("Alice\u{2019}s cat"), vec!["alice's", "cat"]);
    }

    #[test]
    fn edge_joiners_are_trimmed() {
        assert_eq!(words("'tis -maybe- rock--roll"), vec!["tis", "maybe", "rock-roll"]);
    }

    #[test]
    fn lowercase_can_be_disabled() {
        let tokenizer = Tokenizer::new(TokenizerConfig {
            lowercase: false,
            ..TokenizerConfig::default()
        });
        assert_eq!(tokenizer.words("Alice Bob"), vec!["Alice", "Bob"]);
    }

    #[test]
    fn min_length_and_numbers_filters() {
        let tokenizer = Tokenizer::new(TokenizerConfig {
            min_length: 2,
            strip_numbers: true,
            ..TokenizerConfig::default()
        });
        assert_eq!(
            tokenizer.words("I am a big dog with 42 cats and 7 dogs"),
            vec!["am", "big", "dog", "with", "cats", "and", "dogs"]
        );
    }

    #[test]
    fn bigrams_and_trigrams_slide_by_one_word() {
        assert_eq!(tokenize("the cat sat", 2).unwrap(), vec!["the_cat", "cat_sat"]);
        assert_eq!(
            tokenize("the cat sat down", 3).unwrap(),
            vec!["the_cat_sat", "cat_sat_down"]
        );
    }

    #[test]
    fn too_few_words_yield_no_ngrams() {
        assert!(tokenize("lonely", 2).unwrap().is_empty());
        assert!(tokenize("one two three four", 5).unwrap().is_empty());
    }

    #[test]
    fn skipgrams_skip_one_word_and_use_their_own_delimiter() {
        let terms = tokenize("the big cat sat", 6).unwrap();
        assert_eq!(terms, vec!["the~cat", "big~sat"]);
        assert!(tokenize("the big", 6).unwrap().is_empty());
    }

    #[test]
    fn out_of_range_level_is_a_config_error() {
        assert!(matches!(tokenize("a b", 0), Err(ZonesError::Config(_))));
        assert!(matches!(tokenize("a b", 7), Err(ZonesError::Config(_))));
    }

    #[test]
    fn stopword_ngrams_are_dropped_only_when_enabled() {
        let text = "the crimson velvet curtain of the house";
        let plain = Tokenizer::default();
        let filtered = Tokenizer::new(TokenizerConfig {
            drop_stopword_ngrams: true,
            ..TokenizerConfig::default()
        });
        assert!(plain.tokenize(text, NgramLevel::BIGRAM).contains(&"of_the".to_string()));
        assert_eq!(
            filtered.tokenize(text, NgramLevel::BIGRAM),
            vec!["crimson_velvet", "velvet_curtain"]
        );
        assert_eq!(
            filtered.tokenize(text, NgramLevel::UNIGRAM),
            plain.tokenize(text, NgramLevel::UNIGRAM)
        );
    }

    fn with_lexicon() -> Tokenizer {
        Tokenizer::default().with_lexicon(Lexicon::from_words(["the", "cat", "sat", "on", "mat"]))
    }

    #[test]
    fn lexicon_drops_unknown_words() {
        let words = with_lexicon().words("The xyzzy qwfp cat sat");
        assert_eq!(words, vec!["the", "cat", "sat"]);
    }

    #[test]
    fn no_lexicon_keeps_unknown_words() {
        let words = words("The xyzzy cat sat");
        assert!(words.contains(&"xyzzy".to_string()));
        assert!(words.contains(&"cat".to_string()));
    }

    #[test]
    fn lexicon_shrinks_the_term_count() {
        let text = "The xyzzy qwfp cat sat on the zxcvb mat";
        let plain = Tokenizer::default().tokenize(text, NgramLevel::UNIGRAM);
        let known = with_lexicon().tokenize(text, NgramLevel::UNIGRAM);
        assert_eq!(plain.len(), 9);
        assert_eq!(known, vec!["the", "cat", "sat", "on", "the", "mat"]);
        // bigrams form over the surviving words
        assert_eq!(with_lexicon().tokenize("cat xyzzy sat", NgramLevel::BIGRAM), vec!["cat_sat"]);
    }

    #[test]
    fn lexicon_path_is_loaded_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        std::fs::write(&path, "cat\nsat\n").unwrap();
        let tokenizer = Tokenizer::from_config(TokenizerConfig {
            lexicon: Some(path),
            ..TokenizerConfig::default()
        })
        .unwrap();
        assert_eq!(tokenizer.words("the cat sat down"), vec!["cat", "sat"]);

        let missing = Tokenizer::from_config(TokenizerConfig {
            lexicon: Some(dir.path().join("missing.txt")),
            ..TokenizerConfig::default()
        });
        assert!(matches!(missing, Err(ZonesError::Io { .. })));
    }

    #[test]
    fn level_labels() {
        assert_eq!(NgramLevel::UNIGRAM.label(), "unigrams");
        assert_eq!(NgramLevel::new(4).unwrap().label(), "4-grams");
        assert_eq!(NgramLevel::SKIPGRAM.label(), "skipgrams");
    }
}
