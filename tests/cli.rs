use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tfidf-zones"))
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("spawn tfidf-zones")
}

fn write_corpus(dir: &Path) -> String {
    let path = dir.join("sample.txt");
    let text = "the quick brown fox jumps over the lazy dog while the old cat sleeps ".repeat(60);
    fs::write(&path, text).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn text_report_for_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_corpus(dir.path());
    let output = run(&["--file", &file, "--chunk-size", "100"]);

    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("TF-IDF Zone Analysis"));
    assert!(stdout.contains("sample.txt"));
    assert!(stdout.contains("GOLDILOCKS"));
    assert!(!stdout.contains('\u{1b}'));
}

#[test]
fn csv_report_to_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_corpus(dir.path());
    let out = dir.path().join("zones.csv");
    let output = run(&[
        "--file",
        &file,
        "--chunk-size",
        "100",
        "--engine",
        "scikit",
        "--format",
        "csv",
        "--output",
        &out.to_string_lossy(),
    ]);

    assert!(output.status.success(), "{output:?}");
    let csv = fs::read_to_string(&out).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("term,tf,df,idf,tfidf,tf_pct,tf_cum_norm,zone"));
    assert!(lines.next().unwrap().starts_with("the,"));
}

#[test]
fn json_report_for_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    write_corpus(dir.path());
    fs::write(dir.path().join("second.txt"), "a tale of two cities ".repeat(40)).unwrap();
    let output = run(&[
        "--dir",
        &dir.path().to_string_lossy(),
        "--chunk-size",
        "100",
        "--format",
        "json",
    ]);

    assert!(output.status.success(), "{output:?}");
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["file_count"], 2);
    assert_eq!(value["engine"], "pure");
}

#[test]
fn config_file_is_overridden_by_flags() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_corpus(dir.path());
    let config = dir.path().join("zones.toml");
    fs::write(&config, "engine = \"scikit\"\nngram = 2\nchunk_size = 100\n").unwrap();

    let output = run(&[
        "--file",
        &file,
        "--config",
        &config.to_string_lossy(),
        "--ngram",
        "6",
        "--format",
        "json",
    ]);

    assert!(output.status.success(), "{output:?}");
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["engine"], "scikit");
    assert_eq!(value["ngram_type"], "skipgrams");
    assert_eq!(value["chunk_size"], 100);
}

#[test]
fn validation_errors_exit_with_one() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_corpus(dir.path());

    let file = file.as_str();

    let cases = vec![
        (vec!["--file", file, "--chunk-size", "50"], "chunk_size must be >= 100"),
        (vec!["--file", file, "--top-k", "0"], "top_k must be >= 1"),
        (vec!["--file", file, "--ngram", "7"], "ngram must be 1-6"),
        (vec!["--file", "/definitely/not/here.txt"], "file not found"),
    ];
    for (args, message) in cases {
        let output = run(&args);
        assert_eq!(output.status.code(), Some(1), "{args:?}");
        let stderr = String::from_utf8(output.stderr).unwrap();
        assert!(stderr.starts_with("ERROR "), "{stderr}");
        assert!(stderr.contains(message), "{stderr}");
    }
}

#[test]
fn empty_directory_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&["--dir", &dir.path().to_string_lossy()]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("no .txt files found"), "{stderr}");
}

#[test]
fn sparse_is_an_engine_alias() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_corpus(dir.path());
    let output = run(&["--file", &file, "--chunk-size", "100", "--engine", "sparse", "--format", "json"]);

    assert!(output.status.success(), "{output:?}");
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["engine"], "scikit");

    let output = run(&["--file", &file, "--engine", "numpy"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("engine must be one of"), "{stderr}");
}

/// Ten files where `term{k}` appears in exactly `k` of them
fn write_staircase(dir: &Path) {
    for doc in 0..10 {
        let words: Vec<String> = ((doc + 1)..=10).map(|k| format!("term{k}")).collect();
        fs::write(dir.join(format!("doc{doc}.txt")), words.join(" ")).unwrap();
    }
}

#[test]
fn every_zone_is_filled_for_mixed_frequencies() {
    let dir = tempfile::tempdir().unwrap();
    write_staircase(dir.path());
    let dir_arg = dir.path().to_string_lossy().into_owned();

    let output = run(&["--dir", &dir_arg, "--chunk-size", "100", "--format", "json"]);
    assert!(output.status.success(), "{output:?}");
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["chunk_count"], 10);
    assert_eq!(value["zones"]["too_common"][0]["term"], "term10");
    assert_eq!(value["zones"]["goldilocks"][0]["term"], "term5");
    assert_eq!(value["zones"]["too_rare"][0]["term"], "term1");

    let output = run(&["--dir", &dir_arg, "--chunk-size", "100"]);
    let stdout = String::from_utf8(output.stdout).unwrap();
    let goldilocks = stdout.find("GOLDILOCKS").unwrap();
    let too_rare = stdout.find("TOO RARE").unwrap();
    assert!(stdout[goldilocks..too_rare].contains("term5 "), "{stdout}");
    assert!(stdout[too_rare..].contains("term1 "), "{stdout}");
}

#[test]
fn lexicon_flag_drops_unknown_words() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_corpus(dir.path());
    let words = dir.path().join("words.txt");
    fs::write(&words, "quick brown fox\n").unwrap();

    let output = run(&[
        "--file",
        &file,
        "--chunk-size",
        "100",
        "--lexicon",
        &words.to_string_lossy(),
        "--format",
        "json",
    ]);
    assert!(output.status.success(), "{output:?}");
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let terms: Vec<&str> = value["all_scored"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["term"].as_str().unwrap())
        .collect();
    assert_eq!(terms, vec!["brown", "fox", "quick"]);
}
