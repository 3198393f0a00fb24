//! CSV export of every scored term.
//!
//! Columns: `term,tf,df,idf,tfidf,tf_pct,tf_cum_norm,zone`
//!
//! - `tf_pct` is the term's share of all counted terms, in `[0, 1]`
//! - `tf_cum_norm` walks terms by descending tf and reports the running share
//!   as a whole percentage, clamped to `1..=100`
//! - `zone` is `1`, `2` or `3` (too common, goldilocks, too rare) from the DF
//!   band alone, before any `top_k` cut; empty outside every band

use std::collections::HashMap;
use std::io::{self, Write};

use crate::analyzer::{AnalysisResult, ScoredTerm};
use crate::utils::stats::PercentileRank;
use crate::zones::Zone;

pub const CSV_HEADER: &str = "term,tf,df,idf,tfidf,tf_pct,tf_cum_norm,zone";

/// Write the CSV table for `result`, rows in result order
pub fn write_csv<W: Write>(out: &mut W, result: &AnalysisResult) -> io::Result<()> {
    writeln!(out, "{CSV_HEADER}")?;
    for row in csv_rows(result) {
        writeln!(out, "{row}")?;
    }
    Ok(())
}

/// CSV table as a string
pub fn to_csv(result: &AnalysisResult) -> String {
    let mut csv = format!("{CSV_HEADER}\n");
    for row in csv_rows(result) {
        csv.push_str(&row);
        csv.push('\n');
    }
    csv
}

/// One formatted line per scored term, without the header
fn csv_rows(result: &AnalysisResult) -> Vec<String> {
    let terms = &result.all_scored;
    let total = result.term_count as f64;
    let cumulative = cumulative_percent(terms, total);
    let df_ranks = PercentileRank::new(terms.iter().map(|t| t.stats.df));

    terms
        .iter()
        .map(|term| {
            let stats = &term.stats;
            let tf_pct = if total > 0.0 { stats.tf as f64 / total } else { 0.0 };
            let cum = cumulative.get(term.term.as_str()).copied().unwrap_or(0);
            let zone = Zone::for_percentile(df_ranks.rank(stats.df))
                .map(|zone| zone.index().to_string())
                .unwrap_or_default();
            format!(
                "{},{},{},{:.6},{:.6},{:.6},{},{}",
                quote(&term.term),
                stats.tf,
                stats.df,
                stats.idf,
                stats.score,
                tf_pct,
                cum,
                zone
            )
        })
        .collect()
}

/// term -> running tf percentage, terms taken by descending tf
fn cumulative_percent(terms: &[ScoredTerm], total: f64) -> HashMap<&str, u32> {
    let mut by_tf: Vec<&ScoredTerm> = terms.iter().collect();
    // stable: equal tf keeps result order
    by_tf.sort_by(|a, b| b.stats.tf.cmp(&a.stats.tf));

    let mut running = 0u64;
    by_tf
        .into_iter()
        .map(|term| {
            running += term.stats.tf;
            let percent = if total > 0.0 {
                (100.0 * running as f64 / total).round().clamp(1.0, 100.0) as u32
            } else {
                0
            };
            (term.term.as_str(), percent)
        })
        .collect()
}

/// Quote a field holding a comma, quote or line break
fn quote(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
