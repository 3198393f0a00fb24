use serde::{Deserialize, Serialize};

use crate::error::{Result, ZonesError};

/// Fixed-size slice of a document's terms
/// The unit of "document" for IDF purposes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Chunk {
    tokens: Vec<String>,
}

impl Chunk {
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    #[inline]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn into_tokens(self) -> Vec<String> {
        self.tokens
    }
}

impl From<Vec<String>> for Chunk {
    fn from(tokens: Vec<String>) -> Self {
        Self::new(tokens)
    }
}

impl<T> From<&[T]> for Chunk
where
    T: AsRef<str>,
{
    fn from(tokens: &[T]) -> Self {
        Self::new(tokens.iter().map(|t| t.as_ref().to_string()).collect())
    }
}

/// How the tail of a document is handled when splitting it into chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkStrategy {
    /// Every chunk holds `chunk_size` terms except the last, which takes the remainder
    #[default]
    Fixed,
    /// A remainder under 90% of `chunk_size` is spread over the other chunks,
    /// so chunk lengths differ by at most one term
    Balanced,
}

impl ChunkStrategy {
    pub fn split(self, tokens: Vec<String>, chunk_size: usize) -> Result<Vec<Chunk>> {
        match self {
            ChunkStrategy::Fixed => chunk_tokens(tokens, chunk_size),
            ChunkStrategy::Balanced => chunk_balanced(tokens, chunk_size),
        }
    }
}

/// Split `tokens` into chunks of `chunk_size`, the last one taking the remainder
///
/// # Examples
/// ```
/// use tfidf_zones::corpus::chunk_tokens;
///
/// let tokens: Vec<String> = ["a", "b", "c", "d", "e"].iter().map(|s| s.to_string()).collect();
/// let chunks = chunk_tokens(tokens, 2).unwrap();
/// assert_eq!(chunks.len(), 3);
/// assert_eq!(chunks[2].tokens(), ["e"]);
/// ```
pub fn chunk_tokens(tokens: Vec<String>, chunk_size: usize) -> Result<Vec<Chunk>> {
    let size = positive(chunk_size)?;
    let mut chunks = Vec::with_capacity(tokens.len().div_ceil(size));
    let mut iter = tokens.into_iter().peekable();
    while iter.peek().is_some() {
        chunks.push(Chunk::new(iter.by_ref().take(size).collect()));
    }
    Ok(chunks)
}

/// Split `tokens` into evenly sized chunks, absorbing a short remainder
pub fn chunk_balanced(tokens: Vec<String>, chunk_size: usize) -> Result<Vec<Chunk>> {
    let size = positive(chunk_size)?;
    let total = tokens.len();
    if total == 0 {
        return Ok(Vec::new());
    }
    if total <= size {
        return Ok(vec![Chunk::new(tokens)]);
    }

    let full = total / size;
    let remainder = total % size;
    // remainder >= 0.9 * size keeps its own chunk
    let count = if remainder * 10 >= size * 9 { full + 1 } else { full };
    let base = total / count;
    let extra = total % count;

    let mut iter = tokens.into_iter();
    Ok((0..count)
        .map(|i| Chunk::new(iter.by_ref().take(base + usize::from(i < extra)).collect()))
        .collect())
}

fn positive(chunk_size: usize) -> Result<usize> {
    if chunk_size == 0 {
        Err(ZonesError::config("chunk_size must be positive"))
    } else {
        Ok(chunk_size)
    }
}
