// src/loader.rs
//! Parsing of the on-disk statistics tables into a [`StatisticsStore`].
//!
//! The five count tables are CSV files with a header row; the vocabulary is
//! a plain text file of whitespace-delimited `word count` lines. Any
//! unreadable or malformed source aborts construction with a
//! [`DataLoadError`]; a partially-loaded store is never produced.

use crate::core::stats::StatisticsStore;
use crate::core::types::{CharPair, CountTable};
use log::info;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Construction-time failure: a statistics source is missing or malformed.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed record in {}: {detail}", .path.display())]
    Malformed { path: PathBuf, detail: String },

    #[error("failed to decode compiled statistics {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },
}

/// The six file paths a statistics store is built from.
#[derive(Debug, Clone)]
pub struct TableSources {
    pub unigrams: PathBuf,
    pub bigrams: PathBuf,
    pub substitutions: PathBuf,
    pub deletions: PathBuf,
    pub additions: PathBuf,
    pub vocabulary: PathBuf,
}

impl TableSources {
    /// The conventional file names inside one data directory.
    pub fn from_dir(dir: &Path) -> Self {
        Self {
            unigrams: dir.join("unigrams.csv"),
            bigrams: dir.join("bigrams.csv"),
            substitutions: dir.join("substitutions.csv"),
            deletions: dir.join("deletions.csv"),
            additions: dir.join("additions.csv"),
            vocabulary: dir.join("word_frequencies.txt"),
        }
    }
}

#[derive(Deserialize)]
struct UnigramRecord {
    unigram: String,
    count: u64,
}

#[derive(Deserialize)]
struct BigramRecord {
    bigram: String,
    count: u64,
}

#[derive(Deserialize)]
struct SubstitutionRecord {
    original: String,
    substituted: String,
    count: u64,
}

#[derive(Deserialize)]
struct DeletionRecord {
    prefix: String,
    deleted: String,
    count: u64,
}

#[derive(Deserialize)]
struct AdditionRecord {
    prefix: String,
    added: String,
    count: u64,
}

/// Loads all six sources and assembles the store.
pub fn load_statistics(sources: &TableSources) -> Result<StatisticsStore, DataLoadError> {
    let path = &sources.unigrams;
    let unigrams = load_csv(path, |record: UnigramRecord| {
        Ok((single_char(&record.unigram, path)?, record.count))
    })?;
    let path = &sources.bigrams;
    let bigrams = load_csv(path, |record: BigramRecord| {
        Ok((char_window(&record.bigram, path)?, record.count))
    })?;
    let path = &sources.substitutions;
    let substitutions = load_csv(path, |record: SubstitutionRecord| {
        let key = (
            single_char(&record.original, path)?,
            single_char(&record.substituted, path)?,
        );
        Ok((key, record.count))
    })?;
    let path = &sources.deletions;
    let deletions = load_csv(path, |record: DeletionRecord| {
        let key = (
            single_char(&record.prefix, path)?,
            single_char(&record.deleted, path)?,
        );
        Ok((key, record.count))
    })?;
    let path = &sources.additions;
    let insertions = load_csv(path, |record: AdditionRecord| {
        let key = (
            single_char(&record.prefix, path)?,
            single_char(&record.added, path)?,
        );
        Ok((key, record.count))
    })?;
    let vocabulary = load_vocabulary(&sources.vocabulary)?;

    info!(
        "loaded statistics: {} unigrams, {} bigrams, {} substitutions, {} deletions, {} insertions, {} vocabulary words",
        unigrams.len(),
        bigrams.len(),
        substitutions.len(),
        deletions.len(),
        insertions.len(),
        vocabulary.len(),
    );

    Ok(StatisticsStore::new(
        unigrams,
        bigrams,
        substitutions,
        deletions,
        insertions,
        vocabulary,
    ))
}

/// Reads one CSV count table, mapping each deserialized record to a key.
fn load_csv<R, K, F>(path: &Path, to_entry: F) -> Result<CountTable<K>, DataLoadError>
where
    R: for<'de> Deserialize<'de>,
    K: Eq + std::hash::Hash,
    F: Fn(R) -> Result<(K, u64), DataLoadError>,
{
    let file = open(path)?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));
    let mut table = CountTable::new();
    for record in reader.deserialize() {
        let record: R = record.map_err(|source| DataLoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let (key, count) = to_entry(record)?;
        table.add(key, count);
    }
    Ok(table)
}

/// Reads the whitespace-delimited `word count` vocabulary file. Unlike the
/// CSV tables there is no header row. An empty vocabulary is rejected: the
/// channel model's flat transposition estimate divides by the total word
/// count.
fn load_vocabulary(path: &Path) -> Result<HashMap<String, u64>, DataLoadError> {
    let file = open(path)?;
    let mut vocabulary = HashMap::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(word), Some(count), None) => {
                let count: u64 = count.parse().map_err(|_| malformed(path, &line))?;
                vocabulary.insert(word.to_lowercase(), count);
            }
            _ => return Err(malformed(path, &line)),
        }
    }
    if vocabulary.is_empty() {
        return Err(DataLoadError::Malformed {
            path: path.to_path_buf(),
            detail: "vocabulary file contains no entries".to_string(),
        });
    }
    Ok(vocabulary)
}

fn open(path: &Path) -> Result<File, DataLoadError> {
    File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn single_char(field: &str, path: &Path) -> Result<char, DataLoadError> {
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(malformed(path, field)),
    }
}

fn char_window(field: &str, path: &Path) -> Result<CharPair, DataLoadError> {
    let mut chars = field.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(first), Some(second), None) => Ok((first, second)),
        _ => Err(malformed(path, field)),
    }
}

fn malformed(path: &Path, detail: &str) -> DataLoadError {
    DataLoadError::Malformed {
        path: path.to_path_buf(),
        detail: format!("'{detail}'"),
    }
}
