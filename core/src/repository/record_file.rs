use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{Result, TrackerError};
use crate::model::record::DailyRecord;
use crate::repository::traits::RecordRepository;
use crate::repository::write_json_file;

/// Storage key of the saved days. The file is `<key>.json` in the data directory.
pub const RECORDS_KEY: &str = "trackerData";

pub struct FileRecordRepository {
    file_path: PathBuf,
    records: Vec<DailyRecord>,
}

impl FileRecordRepository {
    /// Prepares the store under `base_dir`. Nothing is read until [`RecordRepository::load`].
    pub fn new(base_dir: &Path) -> Result<Self> {
        fs::create_dir_all(base_dir)?;
        let file_path = base_dir.join(format!("{}.json", RECORDS_KEY));
        Ok(FileRecordRepository {
            file_path,
            records: Vec::new(),
        })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn read_records(&self) -> Result<Vec<DailyRecord>> {
        if !self.file_path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.file_path).map_err(|e| TrackerError::StorageRead {
            path: self.file_path.clone(),
            reason: e.to_string(),
        })?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|e| TrackerError::StorageRead {
            path: self.file_path.clone(),
            reason: e.to_string(),
        })
    }
}

impl RecordRepository for FileRecordRepository {
    fn load(&mut self) -> Vec<DailyRecord> {
        self.records = match self.read_records() {
            Ok(records) => {
                info!(count = records.len(), path = ?self.file_path, "loaded saved records");
                records
            }
            Err(e) => {
                warn!(error = %e, "stored records are unreadable, starting with none");
                Vec::new()
            }
        };
        self.records.clone()
    }

    fn append(&mut self, record: DailyRecord) -> Result<&[DailyRecord]> {
        let mut next = self.records.clone();
        next.push(record);
        write_json_file(&self.file_path, &next)?;
        self.records = next;
        Ok(&self.records)
    }

    fn records(&self) -> &[DailyRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::roster::Roster;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn sample_record(day: u32) -> DailyRecord {
        let mut roster = Roster::default();
        roster.toggle_attendance(2);
        roster.set_quantity(1, 3);
        roster.set_price(2, 32.75);
        let date = NaiveDate::from_ymd_opt(2025, 3, day).unwrap();
        DailyRecord::snapshot(date, &roster.staff, &roster.items)
    }

    #[test]
    fn test_load_without_file_is_empty() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let mut repo = FileRecordRepository::new(dir.path())?;
        assert!(repo.load().is_empty());
        assert!(repo.records().is_empty());
        Ok(())
    }

    #[test]
    fn test_append_then_reload_round_trips() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let record = sample_record(10);

        let mut repo = FileRecordRepository::new(dir.path())?;
        repo.load();
        let all = repo.append(record.clone())?;
        assert_eq!(all.len(), 1);

        // Simulated restart.
        let mut reopened = FileRecordRepository::new(dir.path())?;
        let loaded = reopened.load();
        assert_eq!(loaded, vec![record]);
        Ok(())
    }

    #[test]
    fn test_append_rewrites_whole_collection() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let mut repo = FileRecordRepository::new(dir.path())?;
        repo.load();
        repo.append(sample_record(1))?;
        repo.append(sample_record(2))?;

        let raw = fs::read_to_string(repo.file_path())?;
        let on_disk: Vec<DailyRecord> = serde_json::from_str(&raw)?;
        assert_eq!(on_disk.len(), 2);
        assert_eq!(on_disk[1].date, "2025-03-02");
        assert!(!repo.file_path().with_extension("json.tmp").exists());
        Ok(())
    }

    #[test]
    fn test_corrupt_file_loads_as_empty() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("trackerData.json");
        fs::write(&path, "{ this is not json")?;

        let mut repo = FileRecordRepository::new(dir.path())?;
        assert!(repo.load().is_empty());
        assert!(repo.read_records().is_err());
        Ok(())
    }

    #[test]
    fn test_failed_write_leaves_memory_untouched() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let mut repo = FileRecordRepository::new(dir.path())?;
        repo.load();
        repo.append(sample_record(1))?;

        // A directory in the temp file's place makes the write fail.
        fs::create_dir(repo.file_path().with_extension("json.tmp"))?;
        let result = repo.append(sample_record(2));

        assert!(matches!(result, Err(TrackerError::StorageWrite { .. })));
        assert_eq!(repo.records().len(), 1);
        Ok(())
    }

    #[test]
    fn test_reads_records_written_by_web_client() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let json = r#"[{
            "date": "2025-03-10T08:12:33.123Z",
            "staff": [{"id": 1, "name": "Staff 1", "salary": 5000, "shifts": 1, "present": true}],
            "items": [{"id": 1, "name": "Water", "price": 20, "unit": "bottles", "quantity": 3}],
            "totalSalary": 5000,
            "totalItemsCost": 60
        }]"#;
        fs::write(dir.path().join("trackerData.json"), json)?;

        let mut repo = FileRecordRepository::new(dir.path())?;
        let loaded = repo.load();
        assert_eq!(loaded.len(), 1);
        assert!(loaded[0].falls_in(2025, 3));
        assert_eq!(loaded[0].total_items_cost, 60.0);
        Ok(())
    }
}
