use crate::corpus::Chunk;
use crate::engine::frequency::{DocumentFrequency, TermFrequency};
use crate::engine::{smoothed_idf, TermStats, TermStatsMap, TfIdfEngine};
use crate::error::Result;

/// Hash-map TF-IDF engine with no numeric library behind it
#[derive(Debug, Clone, Copy, Default)]
pub struct PureEngine;

impl TfIdfEngine for PureEngine {
    fn build_corpus_stats(chunks: &[Chunk]) -> Result<TermStatsMap> {
        if chunks.is_empty() {
            return Ok(TermStatsMap::new());
        }

        let chunk_freqs = chunks
            .iter()
            .enumerate()
            .map(|(index, chunk)| TermFrequency::from_chunk(index, chunk))
            .collect::<Result<Vec<_>>>()?;

        let mut doc_freq = DocumentFrequency::new();
        for freq in &chunk_freqs {
            doc_freq.add_set(freq.term_set_iter());
        }

        let chunk_count = doc_freq.doc_num();
        let mut stats = TermStatsMap::with_capacity(doc_freq.term_num());
        for (term, df) in doc_freq.iter() {
            stats.insert(
                term.to_string(),
                TermStats {
                    tf: 0,
                    df,
                    idf: smoothed_idf(chunk_count, df),
                    score: 0.0,
                },
            );
        }

        // sum tf * idf chunk by chunk, then take the mean over every chunk
        for freq in &chunk_freqs {
            for (term, count) in freq.iter() {
                if let Some(entry) = stats.get_mut(term) {
                    entry.tf += count;
                    entry.score += count as f64 * entry.idf;
                }
            }
        }
        let n = chunk_count as f64;
        for entry in stats.values_mut() {
            entry.score /= n;
        }

        Ok(stats)
    }
}
