use crate::error::Result;
use crate::model::record::DailyRecord;
use crate::model::roster::Roster;

/// Append-only collection of saved days.
pub trait RecordRepository {
    /// Reads everything from durable storage. Missing or unreadable storage yields an empty list.
    fn load(&mut self) -> Vec<DailyRecord>;
    /// Persists `record` and returns the full collection. The in-memory
    /// collection only changes once the durable write has succeeded.
    fn append(&mut self, record: DailyRecord) -> Result<&[DailyRecord]>;
    fn records(&self) -> &[DailyRecord];
}

pub trait RosterRepository {
    fn load(&self) -> Result<Roster>;
    fn save(&self, roster: &Roster) -> Result<()>;
}
