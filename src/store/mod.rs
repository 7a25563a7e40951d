//! Flat record files
//!
//! Each collection is a text file holding one JSON document per line. Files
//! are always read whole and rewritten whole; a missing file is an empty
//! collection. Lines that fail to decode are kept verbatim across rewrites
//! and ignored by every scan.

use crate::data::{Record, RecordId};
use crate::{ClinicError, ClinicResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// A line-oriented text file
#[derive(Debug, Clone)]
pub struct RecordFile {
    path: PathBuf,
}

impl RecordFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All non-empty lines, trimmed. A missing file reads as no lines.
    pub fn read_lines(&self) -> ClinicResult<Vec<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(self.failed("reading", e)),
        }
    }

    /// Replace the whole file with the given lines
    pub fn write_lines<I, S>(&self, lines: I) -> ClinicResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        for line in lines {
            text.push_str(line.as_ref().trim());
            text.push('\n');
        }
        self.ensure_parent()?;
        fs::write(&self.path, text).map_err(|e| self.failed("writing", e))
    }

    pub fn append_line(&self, line: &str) -> ClinicResult<()> {
        self.ensure_parent()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.failed("opening", e))?;
        writeln!(file, "{}", line.trim()).map_err(|e| self.failed("appending to", e))
    }

    fn ensure_parent(&self) -> ClinicResult<()> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                fs::create_dir_all(dir).map_err(|e| self.failed("creating directory for", e))
            }
            _ => Ok(()),
        }
    }

    fn failed(&self, action: &str, source: std::io::Error) -> ClinicError {
        error!(path = %self.path.display(), error = %source, "error {} record file", action);
        ClinicError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// One line of a collection file
#[derive(Debug, Clone, PartialEq)]
pub enum Entry<T> {
    Record(T),
    /// A line that did not decode; written back untouched
    Malformed(String),
}

impl<T: Serialize> Entry<T> {
    fn to_line(&self) -> ClinicResult<String> {
        match self {
            Entry::Record(record) => Ok(serde_json::to_string(record)?),
            Entry::Malformed(line) => Ok(line.clone()),
        }
    }
}

/// Only the id of a line, for scans that need nothing else
#[derive(Deserialize)]
struct IdOnly {
    id: RecordId,
}

/// A typed collection stored in a [`RecordFile`]
#[derive(Debug, Clone)]
pub struct Table<T> {
    file: RecordFile,
    _record: PhantomData<T>,
}

impl<T> Table<T>
where
    T: Record + Serialize + DeserializeOwned,
{
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            file: RecordFile::new(path),
            _record: PhantomData,
        }
    }

    pub fn file(&self) -> &RecordFile {
        &self.file
    }

    /// Every line, decoded where possible
    pub fn entries(&self) -> ClinicResult<Vec<Entry<T>>> {
        let entries = self
            .file
            .read_lines()?
            .into_iter()
            .map(|line| match serde_json::from_str(&line) {
                Ok(record) => Entry::Record(record),
                Err(e) => {
                    debug!(kind = T::KIND, error = %e, "skipping malformed line");
                    Entry::Malformed(line)
                }
            })
            .collect();
        Ok(entries)
    }

    /// Decoded records in file order
    pub fn records(&self) -> ClinicResult<Vec<T>> {
        Ok(self
            .entries()?
            .into_iter()
            .filter_map(|entry| match entry {
                Entry::Record(record) => Some(record),
                Entry::Malformed(_) => None,
            })
            .collect())
    }

    pub fn get(&self, id: RecordId) -> ClinicResult<Option<T>> {
        Ok(self.records()?.into_iter().find(|r| r.id() == id))
    }

    /// Highest id on file plus one. Lines without a readable id are skipped.
    pub fn next_id(&self) -> ClinicResult<RecordId> {
        let max = self
            .file
            .read_lines()?
            .iter()
            .filter_map(|line| serde_json::from_str::<IdOnly>(line).ok())
            .map(|row| row.id)
            .max();
        match max {
            None => Ok(RecordId::FIRST),
            Some(max) => max.next().ok_or_else(|| {
                error!(kind = T::KIND, %max, "no record id left after the highest one");
                ClinicError::IdsExhausted(T::KIND)
            }),
        }
    }

    pub fn append(&self, record: &T) -> ClinicResult<()> {
        let line = serde_json::to_string(record)?;
        self.file.append_line(&line)
    }

    pub fn rewrite(&self, entries: &[Entry<T>]) -> ClinicResult<()> {
        let lines = entries
            .iter()
            .map(Entry::to_line)
            .collect::<ClinicResult<Vec<_>>>()?;
        self.file.write_lines(lines)
    }

    /// Drop every record for which `keep` is false; returns how many went.
    /// Nothing is written when nothing matched.
    pub fn retain(&self, mut keep: impl FnMut(&T) -> bool) -> ClinicResult<usize> {
        let entries = self.entries()?;
        let before = entries.len();
        let kept: Vec<Entry<T>> = entries
            .into_iter()
            .filter(|entry| match entry {
                Entry::Record(record) => keep(record),
                Entry::Malformed(_) => true,
            })
            .collect();
        let removed = before - kept.len();
        if removed > 0 {
            self.rewrite(&kept)?;
        }
        Ok(removed)
    }

    /// Apply `edit` to every record; it returns true when it changed one.
    /// Returns the edited records; nothing is written when none changed.
    pub fn update(&self, mut edit: impl FnMut(&mut T) -> bool) -> ClinicResult<Vec<T>>
    where
        T: Clone,
    {
        let mut entries = self.entries()?;
        let mut changed = Vec::new();
        for entry in entries.iter_mut() {
            if let Entry::Record(record) = entry {
                if edit(record) {
                    changed.push(record.clone());
                }
            }
        }
        if !changed.is_empty() {
            self.rewrite(&entries)?;
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Prescription;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn prescription(id: u64, patient: u64) -> Prescription {
        let issued_on = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        Prescription {
            id: RecordId(id),
            patient_id: RecordId(patient),
            patient_name: "Jane Doe".to_string(),
            details: "-1.25 / -1.00, varifocal".to_string(),
            issued_on,
            expires_on: issued_on + chrono::Duration::days(365),
        }
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = RecordFile::new(dir.path().join("nothing.txt"));
        assert!(file.read_lines().unwrap().is_empty());
    }

    #[test]
    fn lines_round_trip_trimmed_and_non_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = RecordFile::new(dir.path().join("nested").join("lines.txt"));
        file.write_lines(["  first ", "", "second", "   "]).unwrap();
        file.append_line("third  ").unwrap();
        assert_eq!(file.read_lines().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn unreadable_path_is_an_error_not_empty() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be read as a file
        let file = RecordFile::new(dir.path());
        assert!(matches!(file.read_lines(), Err(ClinicError::Io { .. })));
    }

    #[test]
    fn next_id_starts_at_one_and_skips_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let table: Table<Prescription> = Table::open(dir.path().join("prescriptions.jsonl"));
        assert_eq!(table.next_id().unwrap(), RecordId(1));

        table.append(&prescription(4, 1)).unwrap();
        table.file().append_line("not json at all").unwrap();
        table.file().append_line(r#"{"id":"x9"}"#).unwrap();
        table.append(&prescription(2, 1)).unwrap();
        assert_eq!(table.next_id().unwrap(), RecordId(5));
    }

    #[test]
    fn retain_keeps_malformed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let table: Table<Prescription> = Table::open(dir.path().join("prescriptions.jsonl"));
        table.append(&prescription(1, 1)).unwrap();
        table.file().append_line("1,legacy,row").unwrap();
        table.append(&prescription(2, 2)).unwrap();

        let removed = table.retain(|p| p.patient_id != RecordId(1)).unwrap();
        assert_eq!(removed, 1);

        let lines = table.file().read_lines().unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "1,legacy,row");
        assert_eq!(table.records().unwrap(), vec![prescription(2, 2)]);
    }

    #[test]
    fn update_rewrites_only_changed_records() {
        let dir = tempfile::tempdir().unwrap();
        let table: Table<Prescription> = Table::open(dir.path().join("prescriptions.jsonl"));
        table.append(&prescription(1, 1)).unwrap();
        table.append(&prescription(2, 2)).unwrap();

        let changed = table
            .update(|p| {
                if p.id == RecordId(2) {
                    p.details = "reading glasses".to_string();
                    true
                } else {
                    false
                }
            })
            .unwrap();
        assert_eq!(changed.len(), 1);
        assert_eq!(table.get(RecordId(2)).unwrap().unwrap().details, "reading glasses");
        assert_eq!(table.get(RecordId(1)).unwrap(), Some(prescription(1, 1)));
    }

    #[test]
    fn next_id_past_the_largest_id_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let table: Table<Prescription> = Table::open(dir.path().join("prescriptions.jsonl"));
        table.append(&prescription(u64::MAX, 1)).unwrap();

        assert!(matches!(
            table.next_id(),
            Err(ClinicError::IdsExhausted("Prescription"))
        ));
    }

    proptest! {
        #[test]
        fn next_id_is_max_plus_one(ids in prop::collection::vec(1u64..100_000, 1..30)) {
            let dir = tempfile::tempdir().unwrap();
            let table: Table<Prescription> = Table::open(dir.path().join("p.jsonl"));
            for id in &ids {
                table.append(&prescription(*id, 1)).unwrap();
            }
            let max = *ids.iter().max().unwrap();
            prop_assert_eq!(table.next_id().unwrap(), RecordId(max + 1));
        }
    }
}
