use std::io::{self, Write};

use crate::analyzer::AnalysisResult;
use crate::zones::{Zone, ZoneEntry};

const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";
const CYAN: &str = "\x1b[36m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const MAGENTA: &str = "\x1b[35m";
const WHITE: &str = "\x1b[97m";

/// Applies ANSI codes only when enabled
#[derive(Debug, Clone, Copy)]
struct Palette {
    enabled: bool,
}

impl Palette {
    fn paint(self, codes: &[&str], text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        format!("{}{text}{RESET}", codes.concat())
    }
}

/// Human readable report: summary, DF distribution, then the zone tables
pub fn write_text<W: Write>(out: &mut W, result: &AnalysisResult, color: bool) -> io::Result<()> {
    let palette = Palette { enabled: color };
    let rule = palette.paint(&[DIM], &"═".repeat(40));

    writeln!(out)?;
    writeln!(out, "  {}", palette.paint(&[BOLD, CYAN], "TF-IDF Zone Analysis"))?;
    writeln!(out, "  {rule}")?;
    writeln!(out)?;

    let mut summary = vec![
        ("source", result.source.clone()),
        ("engine", result.engine.clone()),
        ("ngram_type", result.ngram_type.clone()),
    ];
    if result.file_count > 1 {
        summary.push(("files", result.file_count.to_string()));
    }
    summary.extend([
        ("text_length", format!("{} chars", thousands(result.text_length))),
        ("words", thousands(result.word_count)),
        ("terms", thousands(result.term_count)),
        ("vocabulary", thousands(result.vocabulary_size())),
    ]);
    if result.chunk_size == 0 {
        summary.push(("documents", result.chunk_count.to_string()));
    } else {
        summary.push(("chunks", result.chunk_count.to_string()));
        summary.push(("chunk_size", result.chunk_size.to_string()));
    }
    for (key, value) in &summary {
        key_value(out, palette, key, value)?;
    }
    writeln!(out)?;

    writeln!(out, "  {}", palette.paint(&[BOLD, CYAN], "DF Distribution"))?;
    writeln!(out, "  {rule}")?;
    key_value(out, palette, "mean", &result.df_stats.mean.to_string())?;
    key_value(out, palette, "median", &result.df_stats.median.to_string())?;
    key_value(out, palette, "mode", &result.df_stats.mode.to_string())?;
    writeln!(out)?;

    for (zone, entries) in result.zones.iter() {
        zone_table(out, palette, zone, entries)?;
    }

    writeln!(out, "  {}", palette.paint(&[DIM], &"─".repeat(40)))?;
    let done = format!("Completed in {:.2}s", result.elapsed.as_secs_f64());
    writeln!(out, "  {}", palette.paint(&[GREEN], &done))?;
    writeln!(out)
}

fn key_value<W: Write>(out: &mut W, palette: Palette, key: &str, value: &str) -> io::Result<()> {
    writeln!(
        out,
        "  {} {}",
        palette.paint(&[CYAN], &format!("{key:<13}")),
        palette.paint(&[WHITE], value)
    )
}

fn zone_table<W: Write>(
    out: &mut W,
    palette: Palette,
    zone: Zone,
    entries: &[ZoneEntry],
) -> io::Result<()> {
    let (color, band) = match zone {
        Zone::TooCommon => (YELLOW, "df percentile >= 90"),
        Zone::Goldilocks => (GREEN, "45 <= df percentile <= 55"),
        Zone::TooRare => (MAGENTA, "df percentile <= 10"),
    };
    let title = format!("{:<12}({band})", zone.label());
    writeln!(out, "  {}", palette.paint(&[color, BOLD], &title))?;
    writeln!(out, "  {}", palette.paint(&[DIM], &"─".repeat(68)))?;
    if entries.is_empty() {
        writeln!(out, "  {}", palette.paint(&[DIM], "(none)"))?;
    }
    for entry in entries {
        writeln!(
            out,
            "  {:<24} tf={:<5} df={:<4} idf={:.4}  tfidf={:.4}",
            entry.term, entry.tf, entry.df, entry.idf, entry.score
        )?;
    }
    writeln!(out)
}

/// `1234567` -> `1,234,567`
fn thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
