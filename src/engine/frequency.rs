use indexmap::IndexMap;

use crate::corpus::Chunk;
use crate::error::{Result, ZonesError};

/// TermFrequency struct
/// Counts the number of times each term appears in one chunk.
/// Iteration follows first occurrence, so results are reproducible.
///
/// # Examples
/// ```
/// use tfidf_zones::engine::frequency::TermFrequency;
/// let mut term_freq = TermFrequency::new();
/// term_freq.add_term("term1");
/// term_freq.add_term("term2");
/// term_freq.add_term("term1");
///
/// assert_eq!(term_freq.term_count("term1"), 2);
/// assert_eq!(term_freq.term_sum(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TermFrequency {
    term_count: IndexMap<String, u64>,
    total_term_count: u64,
}

impl TermFrequency {
    /// Create a new TermFrequency
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the terms of one chunk
    /// An empty term means the chunk was not produced by the tokenizer.
    ///
    /// # Arguments
    /// * `index` - position of the chunk in the corpus, for error context
    /// * `chunk` - chunk to count
    pub fn from_chunk(index: usize, chunk: &Chunk) -> Result<Self> {
        let mut freq = Self::new();
        for term in chunk.tokens() {
            if term.is_empty() {
                return Err(ZonesError::engine(term.as_str(), index, "empty term in chunk"));
            }
            freq.add_term(term);
        }
        Ok(freq)
    }

    /// Add a term
    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        match self.term_count.get_mut(term) {
            Some(count) => *count += 1,
            None => {
                self.term_count.insert(term.to_string(), 1);
            }
        }
        self.total_term_count += 1;
        self
    }

    /// Add multiple terms
    #[inline]
    pub fn add_terms<T>(&mut self, terms: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for term in terms {
            self.add_term(term.as_ref());
        }
        self
    }

    /// Occurrence count for a specific term
    #[inline]
    pub fn term_count(&self, term: &str) -> u64 {
        self.term_count.get(term).copied().unwrap_or(0)
    }

    /// Total count of all terms
    #[inline]
    pub fn term_sum(&self) -> u64 {
        self.total_term_count
    }

    /// Number of unique terms
    #[inline]
    pub fn term_num(&self) -> usize {
        self.term_count.len()
    }

    #[inline]
    pub fn contains_term(&self, term: &str) -> bool {
        self.term_count.contains_key(term)
    }

    /// Iterator over terms and their counts
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.term_count.iter().map(|(term, &count)| (term.as_str(), count))
    }

    /// Iterator over the set of terms
    #[inline]
    pub fn term_set_iter(&self) -> impl Iterator<Item = &str> {
        self.term_count.keys().map(String::as_str)
    }
}

impl<T> From<&[T]> for TermFrequency
where
    T: AsRef<str>,
{
    fn from(terms: &[T]) -> Self {
        let mut tf = TermFrequency::new();
        tf.add_terms(terms);
        tf
    }
}

/// Document frequency accumulator
/// Keeps the number of chunks seen and, per term, how many of them contain it.
#[derive(Debug, Clone, Default)]
pub struct DocumentFrequency {
    doc_num: u64,
    term_docs: IndexMap<String, u64>,
}

impl DocumentFrequency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one chunk's term set
    pub fn add_set<'a, I>(&mut self, terms: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.doc_num += 1;
        for term in terms {
            match self.term_docs.get_mut(term) {
                Some(count) => *count += 1,
                None => {
                    self.term_docs.insert(term.to_string(), 1);
                }
            }
        }
    }

    /// Number of chunks added
    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Number of chunks containing `term`
    #[inline]
    pub fn term_count(&self, term: &str) -> u64 {
        self.term_docs.get(term).copied().unwrap_or(0)
    }

    /// Vocabulary size
    #[inline]
    pub fn term_num(&self) -> usize {
        self.term_docs.len()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.term_docs.iter().map(|(term, &count)| (term.as_str(), count))
    }
}
