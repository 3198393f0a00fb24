use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::corpus::ChunkStrategy;
use crate::engine::EngineKind;
use crate::error::{Result, ZonesError};
use crate::tokenizer::{NgramLevel, TokenizerConfig};

/// Smallest chunk that still gives meaningful term counts
pub const MIN_CHUNK_SIZE: usize = 100;
pub const DEFAULT_CHUNK_SIZE: usize = 2000;
pub const DEFAULT_TOP_K: usize = 10;

/// Configuration of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// TF-IDF engine to use
    pub engine: EngineKind,

    /// N-gram level (1-5, 6 = skip-grams)
    pub ngram: NgramLevel,

    /// Terms per chunk
    pub chunk_size: usize,

    /// How the last, shorter chunk of a document is handled
    pub chunk_strategy: ChunkStrategy,

    /// Terms reported per zone
    pub top_k: usize,

    /// Drop terms found in fewer chunks than this
    pub min_df: Option<u64>,

    /// Drop terms occurring fewer times than this over the whole corpus
    pub min_tf: Option<u64>,

    pub tokenizer: TokenizerConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            engine: EngineKind::Pure,
            ngram: NgramLevel::UNIGRAM,
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_strategy: ChunkStrategy::Fixed,
            top_k: DEFAULT_TOP_K,
            min_df: None,
            min_tf: None,
            tokenizer: TokenizerConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size < MIN_CHUNK_SIZE {
            return Err(ZonesError::config(format!(
                "chunk_size must be >= {MIN_CHUNK_SIZE}, got {}",
                self.chunk_size
            )));
        }
        if self.top_k < 1 {
            return Err(ZonesError::config(format!("top_k must be >= 1, got {}", self.top_k)));
        }
        if self.min_df == Some(0) {
            return Err(ZonesError::config("min_df must be >= 1"));
        }
        if self.min_tf == Some(0) {
            return Err(ZonesError::config("min_tf must be >= 1"));
        }
        if self.tokenizer.min_length == 0 {
            return Err(ZonesError::config("tokenizer.min_length must be >= 1"));
        }
        Ok(())
    }

    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|err| ZonesError::config(err.to_string()))
    }

    /// Load a TOML config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|err| ZonesError::io(path, err))?;
        Self::from_toml_str(&source)
    }
}
