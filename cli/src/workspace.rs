use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use tracing::warn;
use tracker_core::sync::{self, RemoteSync};
use tracker_core::{
    FileRecordRepository, FileRosterRepository, MonthReport, MonthReportUseCase, Roster,
    RosterRepository, SaveOutcome, SaveService, SyncStatus, TrackerConfig,
};

pub type Tracker = SaveService<FileRecordRepository, Box<dyn RemoteSync>>;

/// Everything the user is working with: the editable roster and the saved days.
pub struct Workspace {
    pub data_dir: PathBuf,
    pub roster: Roster,
    pub tracker: Tracker,
    roster_repo: FileRosterRepository,
}

impl Workspace {
    pub fn open(config: &TrackerConfig) -> Result<Self> {
        let data_dir = config.resolved_data_dir()?;

        let roster_repo = FileRosterRepository::new(&data_dir)?;
        let roster = match roster_repo.load() {
            Ok(roster) => roster,
            Err(e) => {
                warn!(error = %e, "roster is unreadable, falling back to the default roster");
                eprintln!("Warning: {} (using the default roster)", e);
                Roster::default()
            }
        };

        let records = FileRecordRepository::new(&data_dir)?;
        let mut tracker = SaveService::new(records, sync::from_config(config)?);
        tracker.load();

        Ok(Self {
            data_dir,
            roster,
            tracker,
            roster_repo,
        })
    }

    pub fn save_roster(&self) -> Result<()> {
        self.roster_repo.save(&self.roster)?;
        Ok(())
    }

    pub fn save_day(&mut self, date: NaiveDate) -> Result<SaveOutcome> {
        Ok(self.tracker.save(date, &self.roster)?)
    }

    pub fn month_report(&self, date: NaiveDate) -> MonthReport {
        MonthReportUseCase::new(self.tracker.repo(), &self.roster).report(date)
    }
}

pub fn describe_sync(tracker: &Tracker) -> String {
    match tracker.sync_target() {
        Some(url) => format!("Saves sync to {}", url),
        None => "Webhook sync is off".to_string(),
    }
}

pub fn describe_save(outcome: &SaveOutcome) -> String {
    let sync = match &outcome.sync {
        SyncStatus::Synced => "synced to webhook".to_string(),
        SyncStatus::Skipped => "no webhook configured".to_string(),
        SyncStatus::Failed(reason) => format!("webhook sync failed: {}", reason),
    };
    format!("Saved {} ({})", outcome.record.date, sync)
}
