//! In-memory record store and the catalog that owns it.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::sync::Arc;

use itertools::Itertools;
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::core::record::JobRecord;
use crate::error::Result;

/// Ordered, deduplicated collection of job records.
///
/// A record's position is its stable identifier for the lifetime of the
/// store; stores are never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<JobRecord>,
}

impl RecordStore {
    /// Build a store, dropping records without a title or organization and
    /// collapsing exact duplicates onto their first occurrence.
    pub fn from_records(records: impl IntoIterator<Item = JobRecord>) -> Self {
        let mut rejected = 0usize;
        let mut seen = 0usize;
        let records: Vec<JobRecord> = records
            .into_iter()
            .inspect(|_| seen += 1)
            .filter(|record| {
                let keep = record.is_complete();
                if !keep {
                    rejected += 1;
                }
                keep
            })
            .unique()
            .collect();

        if rejected > 0 {
            debug!(rejected, "dropped records missing title or organization");
        }
        debug!(input = seen, kept = records.len(), "record store built");
        Self { records }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<&JobRecord> {
        self.records.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JobRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn records(&self) -> &[JobRecord] {
        &self.records
    }

    /// Read a persisted table. Column names are matched after trimming;
    /// rows that fail to deserialize are skipped with a warning.
    pub fn read_csv(reader: impl Read) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_reader(reader);

        let mut records = Vec::new();
        for (row, result) in reader.deserialize::<JobRecord>().enumerate() {
            match result {
                Ok(record) => records.push(record),
                Err(err) => warn!(row = row + 1, error = %err, "skipping unreadable record row"),
            }
        }
        Ok(Self::from_records(records))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let store = Self::read_csv(file)?;
        info!(path = %path.display(), records = store.len(), "loaded record table");
        Ok(store)
    }

    /// Load the table if it exists, otherwise start empty.
    pub fn load_or_empty(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "no record table yet, starting empty");
            Ok(Self::default())
        }
    }

    pub fn write_csv(&self, writer: impl Write) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        if self.records.is_empty() {
            writer.write_record([
                "Title",
                "Organization",
                "Salary",
                "Experience",
                "Qualification",
                "Location",
                "Category",
            ])?;
        }
        for record in &self.records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Replace the table at `path` wholesale.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let tmp = path.with_extension("csv.tmp");
        self.write_csv(File::create(&tmp)?)?;
        std::fs::rename(&tmp, path)?;
        info!(path = %path.display(), records = self.len(), "saved record table");
        Ok(())
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a JobRecord;
    type IntoIter = std::slice::Iter<'a, JobRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Owner of the current record store.
///
/// Readers take a snapshot and keep using it for the whole query; a refresh
/// swaps in a new store, so no reader ever sees a partially built one.
#[derive(Debug, Default)]
pub struct Catalog {
    current: RwLock<Arc<RecordStore>>,
}

impl Catalog {
    #[must_use]
    pub fn new(store: RecordStore) -> Self {
        Self {
            current: RwLock::new(Arc::new(store)),
        }
    }

    /// Current store.
    #[must_use]
    pub fn snapshot(&self) -> Arc<RecordStore> {
        Arc::clone(&self.current.read())
    }

    /// Swap in a freshly built store, returning the one it replaced.
    pub fn replace(&self, store: RecordStore) -> Arc<RecordStore> {
        let next = Arc::new(store);
        let previous = std::mem::replace(&mut *self.current.write(), next);
        info!(
            previous = previous.len(),
            current = self.current.read().len(),
            "record catalog refreshed"
        );
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::Category;

    fn record(title: &str, org: &str, location: &str) -> JobRecord {
        JobRecord {
            title: title.to_string(),
            organization: org.to_string(),
            location: location.to_string(),
            ..JobRecord::default()
        }
    }

    #[test]
    fn identical_records_collapse_to_first() {
        let store = RecordStore::from_records(vec![
            record("Clerk", "Post Office", "Delhi"),
            record("Engineer", "Metro", "Pune"),
            record("Clerk", "Post Office", "Delhi"),
        ]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0).unwrap().title, "Clerk");
        assert_eq!(store.get(1).unwrap().title, "Engineer");
    }

    #[test]
    fn records_differing_in_one_field_are_kept() {
        let store = RecordStore::from_records(vec![
            record("Clerk", "Post Office", "Delhi"),
            record("Clerk", "Post Office", "Mumbai"),
        ]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn incomplete_records_are_rejected() {
        let store = RecordStore::from_records(vec![
            record("Clerk", "", "Delhi"),
            record("Engineer", "Metro", ""),
        ]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).unwrap().organization, "Metro");
    }

    #[test]
    fn csv_headers_tolerate_whitespace() {
        let raw = " Title , Organization,Salary ,Experience,Qualification,Location, Category\n\
                   Data Analyst,Acme Corp,45000,Fresher,B.Tech,Pune,Engineering\n\
                   Lecturer,State College,\"₹30,000 - ₹50,000\",2+ Years,M.Sc,Jaipur,Education\n";
        let store = RecordStore::read_csv(raw.as_bytes()).unwrap();
        assert_eq!(store.len(), 2);
        let lecturer = store.get(1).unwrap();
        assert_eq!(lecturer.salary, "₹30,000 - ₹50,000");
        assert_eq!(lecturer.category, Some(Category::Education));
    }

    #[test]
    fn unreadable_rows_are_skipped() {
        let raw = "Title,Organization,Salary,Experience,Qualification,Location,Category\n\
                   Data Analyst,Acme Corp,45000,Fresher,B.Tech,Pune,Astrology\n\
                   Clerk,Post Office,,,,Delhi,\n";
        let store = RecordStore::read_csv(raw.as_bytes()).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).unwrap().title, "Clerk");
        assert_eq!(store.get(0).unwrap().category, None);
    }

    #[test]
    fn save_then_load_preserves_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/jobs.csv");
        let store = RecordStore::from_records(vec![
            record("Clerk", "Post Office, North", "Delhi").with_category(Category::Commerce),
            record("Engineer", "Metro", "Pune"),
        ]);
        store.save(&path).unwrap();
        let loaded = RecordStore::load(&path).unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn empty_store_still_writes_header() {
        let mut out = Vec::new();
        RecordStore::default().write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Title,Organization,Salary"));
        assert!(RecordStore::read_csv(text.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn catalog_refresh_swaps_whole_store() {
        let catalog = Catalog::new(RecordStore::from_records(vec![record("A", "B", "")]));
        let held = catalog.snapshot();

        let previous = catalog.replace(RecordStore::from_records(vec![
            record("C", "D", ""),
            record("E", "F", ""),
        ]));

        assert_eq!(previous.len(), 1);
        assert_eq!(held.len(), 1, "existing readers keep their snapshot");
        assert_eq!(catalog.snapshot().len(), 2);
    }
}
