/// This crate is a TF-IDF Zone Analysis Engine.
/// A text is carved into fixed-size chunks, every term is scored with TF-IDF
/// over those chunks, and terms are grouped into three bands by how many
/// chunks they appear in.
pub mod analyzer;
pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod report;
pub mod tokenizer;
pub mod utils;
pub mod zones;

/// Tokenizer
/// Normalizes text into words and expands them into n-grams (`_` joined) or
/// skip-grams (`~` joined).
///
/// `tokenize` runs with the default `TokenizerConfig`:
/// - lowercase
/// - keep numbers
/// - keep stopword n-grams
///
/// Use `Tokenizer` with your own `TokenizerConfig` for anything else.
pub use tokenizer::{tokenize, Lexicon, NgramLevel, Tokenizer, TokenizerConfig};

/// Chunked corpus
/// Every source document is split into chunks of `chunk_size` terms, and the
/// chunks are the documents TF-IDF is computed over.
/// Chunks never straddle two source documents.
pub use corpus::{chunk_tokens, Chunk, ChunkStrategy, Corpus};

/// TF IDF Calculation Engine Trait
/// A trait that defines how corpus-wide term statistics are computed.
///
/// Two implementations are provided, and they agree on tf, df and idf:
/// - `PureEngine`: hash-map counting
/// - `SparseEngine`: a chunk x term sparse matrix (`sprs`)
///
/// `EngineKind` selects one at runtime; `build_corpus_stats` dispatches on it.
pub use engine::{
    build_corpus_stats, EngineKind, PureEngine, SparseEngine, TermStats, TermStatsMap,
    TfIdfEngine,
};

/// Zone Classifier
/// Buckets terms by the percentile rank of their document frequency:
/// - Too Common: rank >= 90
/// - Goldilocks: 45 <= rank <= 55
/// - Too Rare: rank <= 10
///
/// Each zone holds at most `top_k` terms, highest TF-IDF first.
pub use zones::{classify_zones, Zone, ZoneEntry, Zones};

/// Analysis pipeline
/// `Analyzer` ties tokenizer, chunker, engine and zone classifier together
/// for a text, a set of documents, a file, or a directory of `.txt` files.
pub use analyzer::{AnalysisResult, Analyzer, ScoredTerm};

/// Run configuration, loadable from TOML
pub use config::AnalysisConfig;

pub use error::{Result, ZonesError};

/// Output formats: text, CSV and JSON
pub use report::{to_csv, write_report, ReportFormat};
