use crossterm::style::Stylize;
use log::{info, LevelFilter};
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use spell_core::{Corrector, TableSources};
use std::io::{stdin, stdout, Write};
use std::path::Path;

const COMPILED_NAME: &str = "compiled_stats.bin";

fn main() {
    init_logging();

    let data_dir = std::env::args().nth(1).unwrap_or_else(|| "data".to_string());
    let engine = match load_engine(Path::new(&data_dir)) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    println!("Noisy-channel spelling corrector. Type a word, or 'exit' to quit.");
    println!("---------------------------------------------------------------");

    loop {
        print!("{} ", ">".bold());
        stdout().flush().unwrap();

        let mut input = String::new();
        if stdin().read_line(&mut input).unwrap() == 0 {
            break;
        }
        let line = input.trim();

        match line {
            "exit" => break,
            "" => continue,
            words => {
                for word in words.split_whitespace() {
                    let corrected = engine.correct(word);
                    if corrected == word {
                        println!("  {}", corrected.as_str().dim());
                    } else {
                        println!("  {} -> {}", word, corrected.as_str().green().bold());
                    }
                }
            }
        }
    }
}

/// Prefers the compiled artifact; falls back to the CSV tables and compiles
/// them for the next start.
fn load_engine(data_dir: &Path) -> Result<Corrector, spell_core::DataLoadError> {
    let compiled = data_dir.join(COMPILED_NAME);
    if compiled.is_file() {
        info!("loading compiled statistics from {}", compiled.display());
        return Corrector::from_compiled(&compiled);
    }

    info!("loading statistics tables from {}", data_dir.display());
    let engine = Corrector::from_tables(&TableSources::from_dir(data_dir))?;
    if let Err(e) = engine.save_compiled(&compiled) {
        eprintln!("[WARN] Could not write compiled statistics: {}", e);
    }
    Ok(engine)
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
