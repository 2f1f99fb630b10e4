pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod sync;
pub mod time;
pub mod usecase;

pub use config::TrackerConfig;
pub use error::{Result, TrackerError};
pub use input::{expand_key, parse_args, ItemInput, ParsedInput, StaffInput};
pub use model::item::Item;
pub use model::record::DailyRecord;
pub use model::roster::Roster;
pub use model::staff::{Shifts, StaffMember};
pub use model::summary::MonthToDateSummary;
pub use repository::{FileRecordRepository, FileRosterRepository, RecordRepository, RosterRepository};
pub use service::aggregator::{daily_items_cost, daily_staff_cost, month_to_date, prorate_monthly_staff_cost};
pub use service::save_service::{SaveOutcome, SaveService, SyncStatus};
pub use sync::RemoteSync;
pub use time::{parse_day, parse_month};
pub use usecase::month_report::{MonthReport, MonthReportUseCase};
