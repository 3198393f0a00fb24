//! English function words used by the n-gram stopword filter.

use super::{NGRAM_DELIMITER, SKIPGRAM_DELIMITER};

/// Closed-class English words (articles, pronouns, prepositions, conjunctions,
/// auxiliaries). Kept sorted for binary search.
pub const FUNCTION_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "among", "an",
    "and", "any", "are", "as", "at", "be", "been", "before", "being", "below",
    "beside", "besides", "between", "beyond", "both", "but", "by", "can", "could",
    "did", "do", "does", "doing", "down", "during", "each", "either", "every",
    "few", "for", "from", "had", "has", "have", "having", "he", "her", "hers",
    "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it",
    "its", "itself", "may", "me", "might", "mine", "more", "most", "must", "my",
    "myself", "neither", "no", "nor", "not", "of", "off", "on", "once", "only",
    "onto", "or", "other", "our", "ours", "ourselves", "out", "over", "own",
    "shall", "she", "should", "since", "so", "some", "such", "than", "that", "the",
    "their", "theirs", "them", "themselves", "then", "there", "these", "they",
    "this", "those", "though", "through", "to", "too", "toward", "towards", "under",
    "unless", "until", "up", "upon", "us", "very", "was", "we", "were", "what",
    "when", "where", "whether", "which", "while", "who", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours",
    "yourself", "yourselves",
];

#[inline]
pub fn is_function_word(word: &str) -> bool {
    FUNCTION_WORDS.binary_search(&word).is_ok()
}

/// Drop every n-gram (or skip-gram) that has a component matching `is_stop`
pub fn filter_ngrams<F>(grams: Vec<String>, is_stop: F) -> Vec<String>
where
    F: Fn(&str) -> bool,
{
    grams
        .into_iter()
        .filter(|gram| {
            !gram
                .split(NGRAM_DELIMITER)
                .flat_map(|part| part.split(SKIPGRAM_DELIMITER))
                .any(|word| is_stop(word))
        })
        .collect()
}

/// [`filter_ngrams`] against [`FUNCTION_WORDS`]
pub fn filter_function_word_ngrams(grams: Vec<String>) -> Vec<String> {
    filter_ngrams(grams, is_function_word)
}
