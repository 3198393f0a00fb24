//! TF-IDF engines.
//!
//! Two interchangeable implementations of [`TfIdfEngine`]:
//! - [`PureEngine`] counts with hash maps only
//! - [`SparseEngine`] builds a chunk x term sparse matrix with `sprs`
//!
//! Both use raw counts as TF, the smoothed IDF of [`smoothed_idf`], and the
//! mean of `tf * idf` over all chunks as the corpus-wide score.

pub mod frequency;
mod pure;
mod sparse;

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::corpus::Chunk;
use crate::error::{Result, ZonesError};

pub use pure::PureEngine;
pub use sparse::SparseEngine;

/// Corpus-wide statistics of one term
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TermStats {
    /// raw occurrence count over all chunks
    pub tf: u64,
    /// number of chunks containing the term
    pub df: u64,
    /// smoothed inverse document frequency
    pub idf: f64,
    /// mean TF-IDF over all chunks
    pub score: f64,
}

/// term -> stats, in order of first occurrence in the corpus
pub type TermStatsMap = IndexMap<String, TermStats>;

/// TF-IDF Calculation Engine Trait
/// Implementations must agree on `tf`, `df` and `idf` exactly, and on `score`
/// up to floating point summation order.
pub trait TfIdfEngine {
    /// Compute stats for every term observed in `chunks`
    /// An empty corpus yields an empty map.
    fn build_corpus_stats(chunks: &[Chunk]) -> Result<TermStatsMap>;
}

/// `ln((1 + N) / (1 + df)) + 1`
/// Always > 0, and exactly 1.0 for a term present in every chunk.
#[inline]
pub fn smoothed_idf(chunk_count: u64, df: u64) -> f64 {
    ((1.0 + chunk_count as f64) / (1.0 + df as f64)).ln() + 1.0
}

/// Engine selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    #[default]
    Pure,
    #[serde(rename = "scikit", alias = "sparse")]
    Sparse,
}

impl EngineKind {
    pub fn name(self) -> &'static str {
        match self {
            EngineKind::Pure => "pure",
            EngineKind::Sparse => "scikit",
        }
    }

    /// Run the selected engine
    pub fn build_corpus_stats(self, chunks: &[Chunk]) -> Result<TermStatsMap> {
        let stats = match self {
            EngineKind::Pure => PureEngine::build_corpus_stats(chunks)?,
            EngineKind::Sparse => SparseEngine::build_corpus_stats(chunks)?,
        };
        log::debug!(
            "{} engine: {} terms over {} chunks",
            self.name(),
            stats.len(),
            chunks.len()
        );
        Ok(stats)
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EngineKind {
    type Err = ZonesError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pure" => Ok(EngineKind::Pure),
            "scikit" | "sparse" => Ok(EngineKind::Sparse),
            other => Err(ZonesError::config(format!(
                "engine must be one of pure, scikit; got {other:?}"
            ))),
        }
    }
}

/// Compute corpus stats with the selected engine
pub fn build_corpus_stats(chunks: &[Chunk], engine: EngineKind) -> Result<TermStatsMap> {
    engine.build_corpus_stats(chunks)
}
