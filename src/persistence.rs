// src/persistence.rs
//! Save/load of a compiled statistics store. Parsing the CSV tables is the
//! slow part of startup; a store compiled once with [`save_to_disk`] loads
//! back in a single bincode read.

use crate::core::stats::StatisticsStore;
use crate::loader::DataLoadError;
use log::info;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Error, ErrorKind};
use std::path::Path;
use tempfile::NamedTempFile;

pub fn save_to_disk(stats: &StatisticsStore, path: &Path) -> Result<(), Error> {
    let parent_dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir)?;

    // Write into a sibling temp file first, then rename over the target, so
    // a crash mid-write never leaves a truncated artifact behind.
    let temp_file = NamedTempFile::new_in(parent_dir)?;
    let writer = BufWriter::new(&temp_file);
    bincode::serialize_into(writer, stats)
        .map_err(|e| Error::new(ErrorKind::Other, e))?;

    temp_file.persist(path)?;
    info!("compiled statistics written to {}", path.display());
    Ok(())
}

pub fn load_from_disk(path: &Path) -> Result<StatisticsStore, DataLoadError> {
    let file = File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    bincode::deserialize_from(reader).map_err(|source| DataLoadError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
