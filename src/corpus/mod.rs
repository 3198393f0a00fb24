//! Synthetic corpus built from chunked documents.
//!
//! IDF needs more than one document, so every source document is carved into
//! chunks and the chunks are what the engines count as documents.

mod chunk;

pub use chunk::{chunk_balanced, chunk_tokens, Chunk, ChunkStrategy};

use crate::error::Result;

/// Ordered chunks from one or more source documents
/// Chunks never straddle two source documents.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    chunks: Vec<Chunk>,
    documents: usize,
    tokens: usize,
}

impl Corpus {
    /// Create an empty corpus
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a corpus from one document's terms
    pub fn from_tokens(tokens: Vec<String>, strategy: ChunkStrategy, chunk_size: usize) -> Result<Self> {
        let mut corpus = Self::new();
        corpus.push_document(tokens, strategy, chunk_size)?;
        Ok(corpus)
    }

    /// Chunk a document and append its chunks
    /// Returns the number of chunks the document contributed.
    pub fn push_document(
        &mut self,
        tokens: Vec<String>,
        strategy: ChunkStrategy,
        chunk_size: usize,
    ) -> Result<usize> {
        let chunks = strategy.split(tokens, chunk_size)?;
        Ok(self.push_chunks(chunks))
    }

    /// Append a document as a single chunk
    /// An empty document contributes nothing but still counts as a document.
    pub fn push_whole_document(&mut self, tokens: Vec<String>) -> usize {
        if tokens.is_empty() {
            self.push_chunks(Vec::new())
        } else {
            self.push_chunks(vec![Chunk::new(tokens)])
        }
    }

    fn push_chunks(&mut self, chunks: Vec<Chunk>) -> usize {
        let added = chunks.len();
        self.documents += 1;
        self.tokens += chunks.iter().map(Chunk::len).sum::<usize>();
        self.chunks.extend(chunks);
        added
    }

    #[inline]
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Number of chunks (N in the IDF formula)
    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Number of source documents pushed
    #[inline]
    pub fn document_count(&self) -> usize {
        self.documents
    }

    /// Total number of terms over all chunks
    #[inline]
    pub fn token_count(&self) -> usize {
        self.tokens
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

impl From<Vec<Chunk>> for Corpus {
    fn from(chunks: Vec<Chunk>) -> Self {
        let mut corpus = Self::new();
        corpus.push_chunks(chunks);
        corpus
    }
}
