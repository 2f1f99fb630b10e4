use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Presence {
    pub present: u32,
    pub absent: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuantityTotal {
    pub total: u64,
}

/// Month-to-date roll-up. Always rebuilt from scratch, never persisted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MonthToDateSummary {
    pub staff_cost: f64,
    pub items_cost: f64,
    pub days_recorded: usize,
    pub staff_presence: BTreeMap<u32, Presence>,
    pub item_quantities: BTreeMap<u32, QuantityTotal>,
}

impl MonthToDateSummary {
    pub fn grand_total(&self) -> f64 {
        self.staff_cost + self.items_cost
    }

    pub fn present_days(&self, staff_id: u32) -> u32 {
        self.staff_presence
            .get(&staff_id)
            .map(|p| p.present)
            .unwrap_or(0)
    }

    pub fn quantity(&self, item_id: u32) -> u64 {
        self.item_quantities
            .get(&item_id)
            .map(|q| q.total)
            .unwrap_or(0)
    }
}
