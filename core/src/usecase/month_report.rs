use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::model::roster::Roster;
use crate::model::staff::Shifts;
use crate::model::summary::MonthToDateSummary;
use crate::repository::RecordRepository;
use crate::service::aggregator::{month_to_date, prorate_monthly_staff_cost};

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StaffLine {
    pub id: u32,
    pub name: String,
    pub shifts: Shifts,
    pub present_days: u32,
    /// Monthly salary prorated over the days present.
    pub cost: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemLine {
    pub id: u32,
    pub name: String,
    pub unit: String,
    pub quantity: u64,
    /// Quantity valued at the item's current price.
    pub cost: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthReport {
    pub year: i32,
    pub month: u32,
    /// Selected day; the report reads as "1 to `through_day`".
    pub through_day: u32,
    pub staff: Vec<StaffLine>,
    pub items: Vec<ItemLine>,
    pub summary: MonthToDateSummary,
}

impl MonthReport {
    pub fn grand_total(&self) -> f64 {
        self.summary.grand_total()
    }

    /// e.g. `1-18 Oct 2026`
    pub fn period_label(&self) -> String {
        let month_name = NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%b").to_string())
            .unwrap_or_default();
        format!("1-{} {} {}", self.through_day, month_name, self.year)
    }
}

/// Month-to-date view of the stored records, joined with the current roster.
pub struct MonthReportUseCase<'a, R: RecordRepository> {
    repo: &'a R,
    roster: &'a Roster,
}

impl<'a, R: RecordRepository> MonthReportUseCase<'a, R> {
    pub fn new(repo: &'a R, roster: &'a Roster) -> Self {
        Self { repo, roster }
    }

    pub fn report(&self, date: NaiveDate) -> MonthReport {
        let summary = month_to_date(
            self.repo.records(),
            date.month(),
            date.year(),
            &self.roster.staff,
            &self.roster.items,
        );

        let staff = self
            .roster
            .staff
            .iter()
            .map(|s| {
                let present_days = summary.present_days(s.id);
                StaffLine {
                    id: s.id,
                    name: s.name.clone(),
                    shifts: s.shifts,
                    present_days,
                    cost: prorate_monthly_staff_cost(s.salary, present_days, s.shifts),
                }
            })
            .collect();

        let items = self
            .roster
            .items
            .iter()
            .map(|i| {
                let quantity = summary.quantity(i.id);
                ItemLine {
                    id: i.id,
                    name: i.name.clone(),
                    unit: i.unit.clone(),
                    quantity,
                    cost: quantity as f64 * i.price,
                }
            })
            .collect();

        MonthReport {
            year: date.year(),
            month: date.month(),
            through_day: date.day(),
            staff,
            items,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::model::record::DailyRecord;

    struct MockRecordRepo {
        records: Vec<DailyRecord>,
    }

    impl RecordRepository for MockRecordRepo {
        fn load(&mut self) -> Vec<DailyRecord> { self.records.clone() }
        fn append(&mut self, _record: DailyRecord) -> Result<&[DailyRecord]> { unimplemented!() }
        fn records(&self) -> &[DailyRecord] { &self.records }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_report_prorates_staff_and_prices_items() {
        let mut roster = Roster::default();
        roster.set_quantity(1, 3);
        let mut records = Vec::new();
        for d in 1..=15 {
            records.push(DailyRecord::snapshot(day(d), &roster.staff, &roster.items));
        }
        let repo = MockRecordRepo { records };

        let report = MonthReportUseCase::new(&repo, &roster).report(day(15));

        let staff_2 = report.staff.iter().find(|l| l.id == 2).unwrap();
        assert_eq!(staff_2.present_days, 15);
        assert_eq!(staff_2.cost, 3000.0);

        let cook = report.staff.iter().find(|l| l.id == 4).unwrap();
        assert_eq!(cook.cost, prorate_monthly_staff_cost(8000.0, 15, Shifts::Double));
        assert!((cook.cost - 8000.0).abs() < 1e-6);

        let water = report.items.iter().find(|l| l.id == 1).unwrap();
        assert_eq!(water.quantity, 45);
        assert_eq!(water.cost, 900.0);

        assert_eq!(report.summary.days_recorded, 15);
        assert_eq!(report.grand_total(), report.summary.staff_cost + report.summary.items_cost);
        assert_eq!(report.period_label(), "1-15 Mar 2025");
    }

    #[test]
    fn test_report_for_empty_month() {
        let roster = Roster::default();
        let repo = MockRecordRepo { records: Vec::new() };
        let report = MonthReportUseCase::new(&repo, &roster).report(day(1));

        assert_eq!(report.staff.len(), roster.staff.len());
        assert!(report.staff.iter().all(|l| l.present_days == 0 && l.cost == 0.0));
        assert!(report.items.iter().all(|l| l.quantity == 0));
        assert_eq!(report.grand_total(), 0.0);
    }
}
