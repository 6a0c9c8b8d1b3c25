use crate::{error::FootprintError, history};
use csv::WriterBuilder;
use footprint_schemas::result::CarbonLogEntry;
use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
};
use tracing::info;

/// Persistence for footprint results: read every entry, append one.
pub trait LogStore {
    fn entries(&self) -> Result<Vec<CarbonLogEntry>, FootprintError>;

    fn append(&mut self, entry: CarbonLogEntry) -> Result<(), FootprintError>;

    /// The most recent entry by timestamp, regardless of storage order.
    fn latest(&self) -> Result<Option<CarbonLogEntry>, FootprintError> {
        let entries = self.entries()?;
        Ok(history::latest_entry(&entries).cloned())
    }
}

/// An append-only CSV file with `co2e,timestamp,category` columns.
///
/// A file that does not exist yet is an empty history.
pub struct CsvLogStore {
    path: PathBuf,
}

impl CsvLogStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display(&self) -> String {
        self.path.display().to_string()
    }

    fn is_empty_file(&self) -> bool {
        fs::metadata(&self.path).map_or(true, |m| m.len() == 0)
    }
}

impl LogStore for CsvLogStore {
    fn entries(&self) -> Result<Vec<CarbonLogEntry>, FootprintError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path)
            .map_err(|e| FootprintError::CsvError(self.display(), e))?;

        let mut entries = Vec::new();
        for result in reader.deserialize() {
            let entry: CarbonLogEntry =
                result.map_err(|e| FootprintError::CsvError(self.display(), e))?;
            entries.push(entry);
        }
        Ok(entries)
    }

    fn append(&mut self, entry: CarbonLogEntry) -> Result<(), FootprintError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| FootprintError::FileIO(self.display(), e))?;
        }
        let write_header = self.is_empty_file();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| FootprintError::FileIO(self.display(), e))?;

        let mut writer = WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        writer
            .serialize(&entry)
            .map_err(|e| FootprintError::CsvError(self.display(), e))?;
        writer
            .flush()
            .map_err(|e| FootprintError::FileIO(self.display(), e))?;

        info!(path = %self.display(), co2e = entry.co2e, "footprint logged");
        Ok(())
    }
}

/// In-memory store, kept in insertion order.
#[derive(Debug, Default, Clone)]
pub struct MemoryLogStore {
    entries: Vec<CarbonLogEntry>,
}

impl MemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<CarbonLogEntry>) -> Self {
        Self { entries }
    }
}

impl LogStore for MemoryLogStore {
    fn entries(&self) -> Result<Vec<CarbonLogEntry>, FootprintError> {
        Ok(self.entries.clone())
    }

    fn append(&mut self, entry: CarbonLogEntry) -> Result<(), FootprintError> {
        self.entries.push(entry);
        Ok(())
    }
}
