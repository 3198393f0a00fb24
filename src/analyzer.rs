//! Analysis pipeline: text -> terms -> chunks -> TF-IDF -> zones.

use std::path::Path;
use std::time::{Duration, Instant};

use serde::Serialize;
use walkdir::WalkDir;

use crate::config::AnalysisConfig;
use crate::corpus::Corpus;
use crate::engine::{TermStats, TermStatsMap};
use crate::error::{Result, ZonesError};
use crate::tokenizer::Tokenizer;
use crate::utils::stats::DfStats;
use crate::zones::{classify_zones, Zones};

/// A scored term, as listed in the full result table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredTerm {
    pub term: String,
    #[serde(flatten)]
    pub stats: TermStats,
}

/// Result of one analysis run
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// `<text>`, `<docs>`, or the file/directory name
    pub source: String,
    pub file_count: usize,
    /// characters of input text
    pub text_length: usize,
    /// words after normalization, before n-gram expansion
    pub word_count: usize,
    /// terms counted (n-grams or skip-grams when n > 1)
    pub term_count: usize,
    pub chunk_count: usize,
    /// 0 when every document is its own chunk
    pub chunk_size: usize,
    pub engine: String,
    pub ngram_type: String,
    /// every term that survived filtering, by descending score then term
    pub all_scored: Vec<ScoredTerm>,
    pub zones: Zones,
    pub df_stats: DfStats,
    #[serde(serialize_with = "serialize_secs")]
    pub elapsed: Duration,
}

impl AnalysisResult {
    /// Number of distinct terms reported
    pub fn vocabulary_size(&self) -> usize {
        self.all_scored.len()
    }
}

fn serialize_secs<S>(elapsed: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64(elapsed.as_secs_f64())
}

/// Runs the pipeline with one validated configuration
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalysisConfig,
    tokenizer: Tokenizer,
}

/// Per-run accumulator threaded through the pipeline stages
#[derive(Debug, Default)]
struct RunInput {
    corpus: Corpus,
    text_length: usize,
    word_count: usize,
}

impl RunInput {
    fn add_chunked(&mut self, analyzer: &Analyzer, text: &str) -> Result<()> {
        let (words, terms) = analyzer.terms(text);
        self.text_length += text.chars().count();
        self.word_count += words;
        self.corpus.push_document(
            terms,
            analyzer.config.chunk_strategy,
            analyzer.config.chunk_size,
        )?;
        Ok(())
    }

    fn add_whole(&mut self, analyzer: &Analyzer, text: &str) {
        let (words, terms) = analyzer.terms(text);
        self.text_length += text.chars().count();
        self.word_count += words;
        self.corpus.push_whole_document(terms);
    }
}

impl Analyzer {
    /// Create an analyzer; fails on invalid configuration or an unreadable lexicon
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        let tokenizer = Tokenizer::from_config(config.tokenizer.clone())?;
        Ok(Self { config, tokenizer })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze one document, chunked
    pub fn analyze_text(&self, text: &str) -> Result<AnalysisResult> {
        let start = Instant::now();
        let mut input = RunInput::default();
        input.add_chunked(self, text)?;
        self.finish("<text>", input, self.config.chunk_size, start)
    }

    /// Analyze several documents, each one a single chunk
    pub fn analyze_docs<S>(&self, docs: &[S]) -> Result<AnalysisResult>
    where
        S: AsRef<str>,
    {
        let start = Instant::now();
        let mut input = RunInput::default();
        for doc in docs {
            input.add_whole(self, doc.as_ref());
        }
        self.finish("<docs>", input, 0, start)
    }

    /// Analyze one UTF-8 text file, chunked
    pub fn analyze_file(&self, path: impl AsRef<Path>) -> Result<AnalysisResult> {
        let path = path.as_ref();
        let text = read_text(path)?;
        let start = Instant::now();
        let mut input = RunInput::default();
        input.add_chunked(self, &text)?;
        self.finish(&display_name(path), input, self.config.chunk_size, start)
    }

    /// Analyze every `.txt` file directly inside `dir` as one combined corpus
    /// Files are read in name order and chunked separately.
    pub fn analyze_dir(&self, dir: impl AsRef<Path>) -> Result<AnalysisResult> {
        let dir = dir.as_ref();
        let files = text_files(dir)?;
        if files.is_empty() {
            return Err(ZonesError::NoDocuments(dir.to_path_buf()));
        }

        let start = Instant::now();
        let mut input = RunInput::default();
        for (i, path) in files.iter().enumerate() {
            log::debug!("[{}/{}] {}", i + 1, files.len(), path.display());
            let text = read_text(path)?;
            input.add_chunked(self, &text)?;
        }
        self.finish(&display_name(dir), input, self.config.chunk_size, start)
    }

    /// (word count, terms) of one document
    fn terms(&self, text: &str) -> (usize, Vec<String>) {
        let words = self.tokenizer.words(text);
        let terms = self.tokenizer.expand(&words, self.config.ngram);
        (words.len(), terms)
    }

    fn finish(
        &self,
        source: &str,
        input: RunInput,
        chunk_size: usize,
        start: Instant,
    ) -> Result<AnalysisResult> {
        let corpus = &input.corpus;
        if corpus.is_empty() {
            log::warn!("{source}: no terms to analyze");
        }
        log::debug!(
            "{source}: {} words, {} terms, {} chunks from {} documents",
            input.word_count,
            corpus.token_count(),
            corpus.chunk_count(),
            corpus.document_count()
        );

        let mut stats = self.config.engine.build_corpus_stats(corpus.chunks())?;
        self.apply_filters(&mut stats);

        let zones = classify_zones(&stats, corpus.chunk_count(), self.config.top_k);
        let df_stats = DfStats::from_values(stats.values().map(|s| s.df));
        let all_scored = ranked(stats);

        Ok(AnalysisResult {
            source: source.to_string(),
            file_count: corpus.document_count(),
            text_length: input.text_length,
            word_count: input.word_count,
            term_count: corpus.token_count(),
            chunk_count: corpus.chunk_count(),
            chunk_size,
            engine: self.config.engine.name().to_string(),
            ngram_type: self.config.ngram.label().to_string(),
            all_scored,
            zones,
            df_stats,
            elapsed: start.elapsed(),
        })
    }

    fn apply_filters(&self, stats: &mut TermStatsMap) {
        let before = stats.len();
        if let Some(min_df) = self.config.min_df {
            stats.retain(|_, s| s.df >= min_df);
        }
        if let Some(min_tf) = self.config.min_tf {
            stats.retain(|_, s| s.tf >= min_tf);
        }
        if stats.len() != before {
            log::debug!("filters dropped {} of {} terms", before - stats.len(), before);
        }
    }
}

/// All terms by descending score, then term
fn ranked(stats: TermStatsMap) -> Vec<ScoredTerm> {
    let mut all: Vec<ScoredTerm> = stats
        .into_iter()
        .map(|(term, stats)| ScoredTerm { term, stats })
        .collect();
    all.sort_by(|a, b| {
        b.stats
            .score
            .total_cmp(&a.stats.score)
            .then_with(|| a.term.cmp(&b.term))
    });
    all
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|err| ZonesError::io(path, err))
}

/// `.txt` files directly inside `dir`, sorted by name
fn text_files(dir: &Path) -> Result<Vec<std::path::PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(dir).to_path_buf();
            let source = err
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
            ZonesError::io(path, source)
        })?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineKind;
    use crate::tokenizer::NgramLevel;

    const TEXT: &str = "the cat sat on the mat and the dog lay on the rug ";

    fn analyzer(config: AnalysisConfig) -> Analyzer {
        Analyzer::new(config).unwrap()
    }

    fn small_chunks() -> AnalysisConfig {
        AnalysisConfig {
            chunk_size: 200,
            ..AnalysisConfig::default()
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = AnalysisConfig {
            chunk_size: 10,
            ..AnalysisConfig::default()
        };
        assert!(matches!(Analyzer::new(config), Err(ZonesError::Config(_))));
    }

    #[test]
    fn analyze_text_reports_counts() {
        let text = TEXT.repeat(50);
        let result = analyzer(small_chunks()).analyze_text(&text).unwrap();

        assert_eq!(result.source, "<text>");
        assert_eq!(result.file_count, 1);
        assert_eq!(result.text_length, text.len());
        assert_eq!(result.word_count, 650);
        assert_eq!(result.term_count, 650);
        assert_eq!(result.chunk_count, 4);
        assert_eq!(result.chunk_size, 200);
        assert_eq!(result.engine, "pure");
        assert_eq!(result.ngram_type, "unigrams");
        assert_eq!(result.vocabulary_size(), 9);
        assert_eq!(result.all_scored[0].term, "the");
    }

    #[test]
    fn empty_text_gives_empty_zones() {
        for engine in [EngineKind::Pure, EngineKind::Sparse] {
            let result = analyzer(AnalysisConfig {
                engine,
                ..AnalysisConfig::default()
            })
            .analyze_text("")
            .unwrap();
            assert_eq!(result.chunk_count, 0);
            assert!(result.all_scored.is_empty());
            assert!(result.zones.is_empty());
            assert_eq!(result.df_stats, DfStats::default());
        }
    }

    #[test]
    fn bigrams_are_joined() {
        let result = analyzer(AnalysisConfig {
            ngram: NgramLevel::BIGRAM,
            ..small_chunks()
        })
        .analyze_text(&TEXT.repeat(50))
        .unwrap();
        assert_eq!(result.ngram_type, "bigrams");
        assert_eq!(result.word_count, 650);
        assert_eq!(result.term_count, 649);
        assert!(result.all_scored.iter().all(|t| t.term.contains('_')));
    }

    #[test]
    fn min_df_and_min_tf_filter_terms() {
        let text = format!("{} unique words here", TEXT.repeat(50));
        let plain = analyzer(small_chunks()).analyze_text(&text).unwrap();
        let filtered = analyzer(AnalysisConfig {
            min_df: Some(2),
            min_tf: Some(5),
            ..small_chunks()
        })
        .analyze_text(&text)
        .unwrap();

        assert!(plain.all_scored.iter().any(|t| t.term == "unique"));
        assert!(filtered.all_scored.iter().all(|t| t.stats.df >= 2 && t.stats.tf >= 5));
        assert!(filtered.vocabulary_size() < plain.vocabulary_size());
    }

    #[test]
    fn analyze_docs_uses_one_chunk_per_doc() {
        let docs = [
            "the cat sat on the mat and the dog lay on the rug",
            "a quick brown fox jumped over the lazy dog near the fence",
            "the old man walked through the dark forest beside the river",
        ];
        let result = analyzer(AnalysisConfig::default()).analyze_docs(&docs).unwrap();
        assert_eq!(result.source, "<docs>");
        assert_eq!(result.file_count, 3);
        assert_eq!(result.chunk_count, 3);
        assert_eq!(result.chunk_size, 0);

        let the = result.all_scored.iter().find(|t| t.term == "the").unwrap();
        assert_eq!(the.stats.df, 3);
        assert_eq!(the.stats.idf, 1.0);
    }

    #[test]
    fn engines_report_the_same_frequencies() {
        let text = TEXT.repeat(40) + &"and a crimson velvet curtain hung there ".repeat(7);
        let run = |engine| {
            analyzer(AnalysisConfig {
                engine,
                ..small_chunks()
            })
            .analyze_text(&text)
            .unwrap()
        };
        let pure = run(EngineKind::Pure);
        let sparse = run(EngineKind::Sparse);
        assert_eq!(sparse.engine, "scikit");
        assert_eq!(pure.all_scored.len(), sparse.all_scored.len());
        for (p, s) in pure.all_scored.iter().zip(&sparse.all_scored) {
            assert_eq!(p.term, s.term);
            assert_eq!((p.stats.tf, p.stats.df), (s.stats.tf, s.stats.df));
        }
        assert_eq!(pure.zones, sparse.zones);
    }
}
