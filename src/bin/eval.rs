// Batch evaluation harness: runs the corrector over a TSV file of
// `typo<TAB>expected` cases and reports per-case outcomes.
// Run with: cargo run --bin spell_eval -- <data_dir> <cases.tsv> [report.json]
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use serde::Serialize;
use spell_core::{Corrector, TableSources};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::Path;

#[derive(Serialize)]
struct CaseResult {
    typo: String,
    expected: String,
    actual: String,
    passed: bool,
}

#[derive(Serialize)]
struct Report {
    total: usize,
    passed: usize,
    cases: Vec<CaseResult>,
}

fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("usage: spell_eval <data_dir> <cases.tsv> [report.json]");
        std::process::exit(2);
    }

    let engine = match Corrector::from_tables(&TableSources::from_dir(Path::new(&args[1]))) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let cases = match read_cases(Path::new(&args[2])) {
        Ok(cases) => cases,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let mut results = Vec::with_capacity(cases.len());
    for (typo, expected) in cases {
        let actual = engine.correct(&typo);
        let passed = actual == expected;
        let status = if passed { "PASSED" } else { "FAILED" };
        println!("Input: '{typo}' -> Output: '{actual}' (Expected: '{expected}') - {status}");
        results.push(CaseResult { typo, expected, actual, passed });
    }

    let report = Report {
        total: results.len(),
        passed: results.iter().filter(|r| r.passed).count(),
        cases: results,
    };
    println!("--> Suite Summary: {}/{} cases passed.", report.passed, report.total);

    if let Some(out_path) = args.get(3) {
        let file = File::create(out_path).expect("could not create report file");
        serde_json::to_writer_pretty(BufWriter::new(file), &report)
            .expect("could not write report");
        println!("Report written to '{}'", out_path);
    }
}

fn read_cases(path: &Path) -> Result<Vec<(String, String)>, std::io::Error> {
    let mut cases = Vec::new();
    for line in BufReader::new(File::open(path)?).lines() {
        let line = line?;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        match line.split_once('\t') {
            Some((typo, expected)) => {
                cases.push((typo.trim().to_string(), expected.trim().to_string()));
            }
            None => {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("expected 'typo<TAB>expected', got '{line}'"),
                ));
            }
        }
    }
    Ok(cases)
}

fn init_logging() {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{h({l})} {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info))
        .expect("logging config");
    log4rs::init_config(config).expect("logging init");
}
