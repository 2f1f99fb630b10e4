use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::item::Item;
use crate::model::staff::StaffMember;
use crate::service::aggregator::{daily_items_cost, daily_staff_cost};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One saved day. The staff and items are value snapshots taken at save time,
/// and the totals are computed from exactly those snapshots.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    /// ISO date as written. Kept as a string so a malformed value still loads.
    pub date: String,
    pub staff: Vec<StaffMember>,
    pub items: Vec<Item>,
    pub total_salary: f64,
    pub total_items_cost: f64,
}

impl DailyRecord {
    pub fn snapshot(date: NaiveDate, staff: &[StaffMember], items: &[Item]) -> Self {
        Self {
            date: date.format(DATE_FORMAT).to_string(),
            staff: staff.to_vec(),
            items: items.to_vec(),
            total_salary: daily_staff_cost(staff),
            total_items_cost: daily_items_cost(items),
        }
    }

    /// Calendar date of the record. Accepts plain `YYYY-MM-DD` and full
    /// RFC 3339 timestamps (taken in the offset they were written with).
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        let raw = self.date.trim();
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
    }

    pub fn falls_in(&self, year: i32, month: u32) -> bool {
        self.calendar_date()
            .map(|d| d.year() == year && d.month() == month)
            .unwrap_or(false)
    }
}
