use indexmap::IndexSet;
use sprs::{CsMat, TriMat};

use crate::corpus::Chunk;
use crate::engine::{smoothed_idf, TermStats, TermStatsMap, TfIdfEngine};
use crate::error::{Result, ZonesError};

/// TF-IDF engine backed by `sprs` sparse matrices
///
/// The corpus becomes a chunk x term count matrix (CSR). DF is the number of
/// stored entries per column, and the TF-IDF matrix is the count matrix times
/// a diagonal IDF matrix.
#[derive(Debug, Clone, Copy, Default)]
pub struct SparseEngine;

impl TfIdfEngine for SparseEngine {
    fn build_corpus_stats(chunks: &[Chunk]) -> Result<TermStatsMap> {
        if chunks.is_empty() {
            return Ok(TermStatsMap::new());
        }

        let (vocab, counts) = count_matrix(chunks)?;
        let chunk_count = counts.rows() as u64;

        // column views: one sparse vector of per-chunk counts per term
        let by_term = counts.to_csc();
        let mut tf = Vec::with_capacity(vocab.len());
        let mut idf = Vec::with_capacity(vocab.len());
        for column in by_term.outer_iterator() {
            let df = column.nnz() as u64;
            tf.push(column.data().iter().sum::<f64>() as u64);
            idf.push((df, smoothed_idf(chunk_count, df)));
        }

        let idf_diag = diagonal(idf.iter().map(|&(_, value)| value).collect())?;
        let weighted = (&counts * &idf_diag).to_csc();
        if weighted.cols() != vocab.len() {
            return Err(ZonesError::engine(
                "",
                0,
                format!("tf-idf matrix has {} columns for {} terms", weighted.cols(), vocab.len()),
            ));
        }

        let n = chunk_count as f64;
        let stats = vocab
            .into_iter()
            .zip(weighted.outer_iterator())
            .zip(tf.into_iter().zip(idf))
            .map(|((term, column), (tf, (df, idf)))| {
                let score = column.data().iter().sum::<f64>() / n;
                (term.to_string(), TermStats { tf, df, idf, score })
            })
            .collect();
        Ok(stats)
    }
}

/// Vocabulary in order of first occurrence, and the chunk x term count matrix
fn count_matrix(chunks: &[Chunk]) -> Result<(IndexSet<&str>, CsMat<f64>)> {
    let mut vocab: IndexSet<&str> = IndexSet::new();
    let mut rows = Vec::new();
    let mut cols = Vec::new();
    for (row, chunk) in chunks.iter().enumerate() {
        for term in chunk.tokens() {
            if term.is_empty() {
                return Err(ZonesError::engine(term.as_str(), row, "empty term in chunk"));
            }
            let (col, _) = vocab.insert_full(term.as_str());
            rows.push(row);
            cols.push(col);
        }
    }

    // duplicate (row, col) triplets are summed into counts on conversion
    let data = vec![1.0; rows.len()];
    let triplets = TriMat::from_triplets((chunks.len(), vocab.len()), rows, cols, data);
    Ok((vocab, triplets.to_csr()))
}

fn diagonal(values: Vec<f64>) -> Result<CsMat<f64>> {
    let dim = values.len();
    CsMat::try_new((dim, dim), (0..=dim).collect(), (0..dim).collect(), values)
        .map_err(|(_, _, _, err)| ZonesError::engine("", 0, format!("idf diagonal: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_terms_in_a_chunk_count_once_for_df() {
        let chunks = vec![
            Chunk::from(&["x", "x", "x", "y"][..]),
            Chunk::from(&["y"][..]),
        ];
        let stats = SparseEngine::build_corpus_stats(&chunks).unwrap();
        assert_eq!(stats["x"].df, 1);
        assert_eq!(stats["x"].tf, 3);
        assert_eq!(stats["y"].df, 2);
        assert_eq!(stats["y"].tf, 2);

        let x_idf = (3.0f64 / 2.0).ln() + 1.0;
        assert!((stats["x"].score - 3.0 * x_idf / 2.0).abs() < 1e-12);
    }

    #[test]
    fn single_chunk_corpus() {
        let chunks = vec![Chunk::from(&["a", "b", "a"][..])];
        let stats = SparseEngine::build_corpus_stats(&chunks).unwrap();
        assert!(stats.values().all(|s| s.df == 1 && s.idf == 1.0));
        assert_eq!(stats["a"].score, 2.0);
    }
}
