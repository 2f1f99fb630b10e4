use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::Result;
use crate::model::record::DailyRecord;
use crate::model::roster::Roster;
use crate::repository::RecordRepository;
use crate::sync::RemoteSync;

#[derive(Debug, Clone, PartialEq)]
pub enum SyncStatus {
    Synced,
    /// No webhook configured.
    Skipped,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct SaveOutcome {
    pub record: DailyRecord,
    pub sync: SyncStatus,
}

/// Saves days: snapshot, push to the webhook, then append locally.
/// A failed push never prevents the local append; only a failed local write is an error.
pub struct SaveService<R: RecordRepository, S: RemoteSync> {
    repo: R,
    sync: S,
}

impl<R: RecordRepository, S: RemoteSync> SaveService<R, S> {
    pub fn new(repo: R, sync: S) -> Self {
        Self { repo, sync }
    }

    /// Loads stored records; returns how many were found.
    pub fn load(&mut self) -> usize {
        self.repo.load().len()
    }

    pub fn records(&self) -> &[DailyRecord] {
        self.repo.records()
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// The webhook saves are pushed to, if sync is on.
    pub fn sync_target(&self) -> Option<&str> {
        if self.sync.is_enabled() {
            self.sync.target()
        } else {
            None
        }
    }

    pub fn save(&mut self, date: NaiveDate, roster: &Roster) -> Result<SaveOutcome> {
        let record = DailyRecord::snapshot(date, &roster.staff, &roster.items);

        // The push completes (or fails) before the store is touched.
        let sync = if !self.sync.is_enabled() {
            SyncStatus::Skipped
        } else {
            match self.sync.push(&record) {
                Ok(()) => SyncStatus::Synced,
                Err(e) => {
                    warn!(error = %e, date = %record.date, "sync failed, saving locally only");
                    SyncStatus::Failed(e.to_string())
                }
            }
        };

        let total = self.repo.append(record.clone())?.len();
        info!(date = %record.date, total, "record saved");

        Ok(SaveOutcome { record, sync })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackerError;
    use std::cell::RefCell;
    use std::rc::Rc;

    type EventLog = Rc<RefCell<Vec<&'static str>>>;

    struct MockRecordRepo {
        records: Vec<DailyRecord>,
        fail_writes: bool,
        log: EventLog,
    }

    impl RecordRepository for MockRecordRepo {
        fn load(&mut self) -> Vec<DailyRecord> { self.records.clone() }
        fn append(&mut self, record: DailyRecord) -> Result<&[DailyRecord]> {
            self.log.borrow_mut().push("append");
            if self.fail_writes {
                return Err(TrackerError::Io(std::io::Error::other("disk full")));
            }
            self.records.push(record);
            Ok(&self.records)
        }
        fn records(&self) -> &[DailyRecord] { &self.records }
    }

    struct MockSync {
        fail: bool,
        enabled: bool,
        log: EventLog,
    }

    impl RemoteSync for MockSync {
        fn push(&self, _record: &DailyRecord) -> Result<()> {
            self.log.borrow_mut().push("push");
            if self.fail {
                Err(TrackerError::Sync("connection refused".to_string()))
            } else {
                Ok(())
            }
        }
        fn is_enabled(&self) -> bool { self.enabled }
        fn target(&self) -> Option<&str> { Some("http://hook.test/save") }
    }

    fn service(sync_fails: bool, sync_enabled: bool, write_fails: bool) -> (SaveService<MockRecordRepo, MockSync>, EventLog) {
        let log: EventLog = Rc::new(RefCell::new(Vec::new()));
        let repo = MockRecordRepo { records: Vec::new(), fail_writes: write_fails, log: log.clone() };
        let sync = MockSync { fail: sync_fails, enabled: sync_enabled, log: log.clone() };
        (SaveService::new(repo, sync), log)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[test]
    fn test_push_happens_before_append() {
        let (mut svc, log) = service(false, true, false);
        let outcome = svc.save(today(), &Roster::default()).unwrap();

        assert_eq!(outcome.sync, SyncStatus::Synced);
        assert_eq!(*log.borrow(), vec!["push", "append"]);
        assert_eq!(svc.records().len(), 1);
    }

    #[test]
    fn test_failed_sync_still_saves_locally() {
        let (mut svc, log) = service(true, true, false);
        let outcome = svc.save(today(), &Roster::default()).unwrap();

        assert!(matches!(outcome.sync, SyncStatus::Failed(ref msg) if msg.contains("connection refused")));
        assert_eq!(*log.borrow(), vec!["push", "append"]);
        assert_eq!(svc.records(), &[outcome.record]);
    }

    #[test]
    fn test_disabled_sync_is_skipped() {
        let (mut svc, log) = service(false, false, false);
        let outcome = svc.save(today(), &Roster::default()).unwrap();

        assert_eq!(outcome.sync, SyncStatus::Skipped);
        assert_eq!(*log.borrow(), vec!["append"]);
    }

    #[test]
    fn test_sync_target_only_when_enabled() {
        let (svc, _log) = service(false, true, false);
        assert_eq!(svc.sync_target(), Some("http://hook.test/save"));
        let (svc, _log) = service(false, false, false);
        assert_eq!(svc.sync_target(), None);
    }

    #[test]
    fn test_local_write_failure_is_an_error() {
        let (mut svc, _log) = service(false, true, true);
        assert!(svc.save(today(), &Roster::default()).is_err());
        assert!(svc.records().is_empty());
    }

    #[test]
    fn test_saved_record_is_independent_of_later_edits() {
        let (mut svc, _log) = service(false, true, false);
        let mut roster = Roster::default();
        roster.set_quantity(1, 2);
        svc.save(today(), &roster).unwrap();

        roster.set_salary(1, 99999.0);
        roster.remove_item(1);

        let saved = &svc.records()[0];
        assert_eq!(saved.staff[0].salary, 5000.0);
        assert_eq!(saved.items[0].quantity, 2);
        assert_eq!(saved.total_items_cost, 40.0);
    }
}
