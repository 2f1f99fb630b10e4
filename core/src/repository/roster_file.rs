use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Result, TrackerError};
use crate::model::roster::Roster;
use crate::repository::traits::RosterRepository;
use crate::repository::write_json_file;

const ROSTER_FILE_NAME: &str = "roster.json";

/// Keeps the roster and inventory between runs.
#[derive(Clone)]
pub struct FileRosterRepository {
    file_path: PathBuf,
}

impl FileRosterRepository {
    pub fn new(base_dir: &Path) -> Result<Self> {
        fs::create_dir_all(base_dir)?;
        let file_path = base_dir.join(ROSTER_FILE_NAME);

        // Seed the default roster on first run.
        if !file_path.exists() {
            info!(path = ?file_path, "creating default roster");
            write_json_file(&file_path, &Roster::default())?;
        }

        Ok(FileRosterRepository { file_path })
    }
}

impl RosterRepository for FileRosterRepository {
    fn load(&self) -> Result<Roster> {
        let content = fs::read_to_string(&self.file_path)?;
        serde_json::from_str(&content).map_err(|e| TrackerError::StorageRead {
            path: self.file_path.clone(),
            reason: e.to_string(),
        })
    }

    fn save(&self, roster: &Roster) -> Result<()> {
        write_json_file(&self.file_path, roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::staff::Shifts;
    use tempfile::tempdir;

    #[test]
    fn test_first_run_seeds_default_roster() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let repo = FileRosterRepository::new(dir.path())?;
        assert_eq!(repo.load()?, Roster::default());
        Ok(())
    }

    #[test]
    fn test_save_and_reload() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let repo = FileRosterRepository::new(dir.path())?;

        let mut roster = repo.load()?;
        roster.add_staff("Cleaner", 3000.0, Shifts::Single);
        roster.adjust_quantity(1, 5);
        repo.save(&roster)?;

        let reopened = FileRosterRepository::new(dir.path())?;
        assert_eq!(reopened.load()?, roster);
        Ok(())
    }

    #[test]
    fn test_corrupt_roster_is_a_read_error() -> anyhow::Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join(ROSTER_FILE_NAME), "[]")?;
        let repo = FileRosterRepository::new(dir.path())?;
        assert!(matches!(repo.load(), Err(TrackerError::StorageRead { .. })));
        Ok(())
    }
}
