use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Parser};
use tfidf_zones::report::{stdout_color_enabled, write_report};
use tfidf_zones::{AnalysisConfig, Analyzer, ChunkStrategy, EngineKind, NgramLevel, ReportFormat};

#[derive(Parser)]
#[command(name = "tfidf-zones")]
#[command(about = "TF-IDF zone analysis: too common, goldilocks and too rare terms", long_about = None)]
#[command(version)]
#[command(group(ArgGroup::new("input").required(true).args(["file", "dir"])))]
struct Cli {
    /// Analyze a single text file
    #[arg(long)]
    file: Option<PathBuf>,

    /// Analyze every .txt file in a directory as one corpus
    #[arg(long)]
    dir: Option<PathBuf>,

    /// TF-IDF engine: pure, or scikit (alias: sparse) [default: pure]
    #[arg(long)]
    engine: Option<EngineKind>,

    /// Terms shown per zone [default: 10]
    #[arg(long)]
    top_k: Option<usize>,

    /// N-gram level: 1-5, or 6 for skip-grams [default: 1]
    #[arg(long)]
    ngram: Option<usize>,

    /// Terms per chunk, at least 100 [default: 2000]
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Spread a short trailing chunk over the others
    #[arg(long)]
    balanced: bool,

    /// Drop terms found in fewer chunks than this
    #[arg(long)]
    min_df: Option<u64>,

    /// Drop terms occurring fewer times than this
    #[arg(long)]
    min_tf: Option<u64>,

    /// Drop words shorter than this many characters
    #[arg(long)]
    min_length: Option<usize>,

    /// Drop purely numeric words
    #[arg(long)]
    strip_numbers: bool,

    /// Drop n-grams containing a function word
    #[arg(long)]
    no_ngram_stopwords: bool,

    /// Keep only words listed in this file (whitespace separated, `#` comments)
    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// Output format: text, csv or json
    #[arg(long, default_value = "text")]
    format: ReportFormat,

    /// Write the report to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Load analysis settings from a TOML file; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Log errors only
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR {err:#}");
            ExitCode::from(1)
        }
    }
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Error);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn run(cli: Cli) -> Result<()> {
    let config = build_config(&cli)?;
    let analyzer = Analyzer::new(config)?;

    let result = match (&cli.file, &cli.dir) {
        (Some(file), _) => {
            if !file.is_file() {
                bail!("file not found: {}", file.display());
            }
            analyzer.analyze_file(file)?
        }
        (None, Some(dir)) => {
            if !dir.is_dir() {
                bail!("directory not found: {}", dir.display());
            }
            analyzer.analyze_dir(dir)?
        }
        (None, None) => bail!("one of --file or --dir is required"),
    };

    let format = cli.format;
    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            write_report(&mut out, &result, format, false)?;
            out.flush()?;
            log::info!("wrote {format} report to {}", path.display());
        }
        None => {
            let color = format == ReportFormat::Text && stdout_color_enabled();
            let mut out = io::stdout().lock();
            write_report(&mut out, &result, format, color)?;
            out.flush()?;
        }
    }
    Ok(())
}

/// Config file (or defaults), then explicit flags on top
fn build_config(cli: &Cli) -> Result<AnalysisConfig> {
    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };

    if let Some(engine) = cli.engine {
        config.engine = engine;
    }
    if let Some(top_k) = cli.top_k {
        config.top_k = top_k;
    }
    if let Some(n) = cli.ngram {
        config.ngram = NgramLevel::new(n)?;
    }
    if let Some(chunk_size) = cli.chunk_size {
        config.chunk_size = chunk_size;
    }
    if cli.balanced {
        config.chunk_strategy = ChunkStrategy::Balanced;
    }
    if cli.min_df.is_some() {
        config.min_df = cli.min_df;
    }
    if cli.min_tf.is_some() {
        config.min_tf = cli.min_tf;
    }
    if let Some(min_length) = cli.min_length {
        config.tokenizer.min_length = min_length;
    }
    if cli.strip_numbers {
        config.tokenizer.strip_numbers = true;
    }
    if cli.no_ngram_stopwords {
        config.tokenizer.drop_stopword_ngrams = true;
    }
    if let Some(lexicon) = &cli.lexicon {
        config.tokenizer.lexicon = Some(lexicon.clone());
    }
    Ok(config)
}
