//! Daily and month-to-date cost calculations.
//!
//! Everything here is a pure function over in-memory data. Callers pass the
//! current roster and the stored records in; nothing is cached between calls.

use std::collections::BTreeMap;

use crate::model::item::Item;
use crate::model::record::DailyRecord;
use crate::model::staff::{Shifts, StaffMember};
use crate::model::summary::{MonthToDateSummary, Presence, QuantityTotal};

/// Month length assumed when prorating a monthly salary, whatever the calendar says.
pub const PRORATION_DAYS: f64 = 30.0;

pub fn daily_staff_cost(staff: &[StaffMember]) -> f64 {
    staff.iter().map(StaffMember::daily_cost).sum()
}

pub fn daily_items_cost(items: &[Item]) -> f64 {
    items.iter().map(Item::cost).sum()
}

/// Full monthly payroll of the roster, ignoring today's attendance.
pub fn monthly_payroll(staff: &[StaffMember]) -> f64 {
    staff
        .iter()
        .map(|s| s.salary * s.shifts.multiplier())
        .sum()
}

pub fn prorate_monthly_staff_cost(monthly_salary: f64, present_days: u32, shifts: Shifts) -> f64 {
    (monthly_salary / PRORATION_DAYS) * f64::from(present_days) * shifts.multiplier()
}

/// Records dated in the given month. Records with an unparseable date belong to no month.
pub fn select_month(records: &[DailyRecord], year: i32, month: u32) -> Vec<&DailyRecord> {
    records.iter().filter(|r| r.falls_in(year, month)).collect()
}

pub fn month_to_date(
    records: &[DailyRecord],
    month: u32,
    year: i32,
    staff_roster: &[StaffMember],
    item_roster: &[Item],
) -> MonthToDateSummary {
    let selected = select_month(records, year, month);

    // Only ids on the current roster are tracked.
    let mut staff_presence: BTreeMap<u32, Presence> = staff_roster
        .iter()
        .map(|s| (s.id, Presence::default()))
        .collect();
    let mut item_quantities: BTreeMap<u32, QuantityTotal> = item_roster
        .iter()
        .map(|i| (i.id, QuantityTotal::default()))
        .collect();

    let mut staff_cost = 0.0;
    let mut items_cost = 0.0;

    for record in &selected {
        // Per-record totals are taken as saved, not recomputed from the snapshots.
        staff_cost += record.total_salary;
        items_cost += record.total_items_cost;

        for member in &record.staff {
            if let Some(presence) = staff_presence.get_mut(&member.id) {
                if member.present {
                    presence.present += 1;
                } else {
                    presence.absent += 1;
                }
            }
        }

        for item in &record.items {
            if let Some(quantity) = item_quantities.get_mut(&item.id) {
                quantity.total += u64::from(item.quantity);
            }
        }
    }

    MonthToDateSummary {
        staff_cost,
        items_cost,
        days_recorded: selected.len(),
        staff_presence,
        item_quantities,
    }
}
