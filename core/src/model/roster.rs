use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, TrackerError};
use crate::model::item::{Item, DEFAULT_UNIT};
use crate::model::staff::{Shifts, StaffMember};
use crate::service::aggregator::{daily_items_cost, daily_staff_cost};

/// Id for a new entry: one past the largest existing id, or 1 for an empty list.
/// `None` once the largest id is `u32::MAX`.
pub fn next_id<I: IntoIterator<Item = u32>>(ids: I) -> Option<u32> {
    match ids.into_iter().max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}

fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TrackerError::Validation("name must not be empty".to_string()));
    }
    Ok(trimmed.to_string())
}

/// The live roster and inventory the user is editing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Roster {
    pub staff: Vec<StaffMember>,
    pub items: Vec<Item>,
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            staff: vec![
                StaffMember::new(1, "Staff 1".to_string(), 5000.0, Shifts::Single),
                StaffMember::new(2, "Staff 2".to_string(), 6000.0, Shifts::Single),
                StaffMember::new(3, "Staff 3".to_string(), 7000.0, Shifts::Single),
                StaffMember::new(4, "Cook".to_string(), 8000.0, Shifts::Double),
            ],
            items: vec![
                Item::new(1, "Water".to_string(), 20.0, "bottles".to_string()),
                Item::new(2, "Milk".to_string(), 30.0, "liters".to_string()),
            ],
        }
    }
}

impl Roster {
    pub fn empty() -> Self {
        Self {
            staff: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn daily_staff_cost(&self) -> f64 {
        daily_staff_cost(&self.staff)
    }

    pub fn daily_items_cost(&self) -> f64 {
        daily_items_cost(&self.items)
    }

    // --- Staff ---

    /// Adds a present staff member. An empty name is a silent no-op.
    pub fn add_staff(&mut self, name: &str, salary: f64, shifts: Shifts) -> Option<u32> {
        let name = match validate_name(name) {
            Ok(name) => name,
            Err(e) => {
                debug!(error = %e, "ignoring staff member without a name");
                return None;
            }
        };
        let Some(id) = next_id(self.staff.iter().map(|s| s.id)) else {
            warn!("no staff id left after {}", u32::MAX);
            return None;
        };
        self.staff.push(StaffMember::new(id, name, salary, shifts));
        Some(id)
    }

    pub fn remove_staff(&mut self, id: u32) -> bool {
        let before = self.staff.len();
        self.staff.retain(|s| s.id != id);
        self.staff.len() != before
    }

    pub fn staff_member(&self, id: u32) -> Option<&StaffMember> {
        self.staff.iter().find(|s| s.id == id)
    }

    fn staff_member_mut(&mut self, id: u32) -> Option<&mut StaffMember> {
        self.staff.iter_mut().find(|s| s.id == id)
    }

    /// Flips attendance and returns the new `present` value.
    pub fn toggle_attendance(&mut self, id: u32) -> Option<bool> {
        let member = self.staff_member_mut(id)?;
        member.present = !member.present;
        Some(member.present)
    }

    pub fn set_salary(&mut self, id: u32, salary: f64) -> bool {
        match self.staff_member_mut(id) {
            Some(member) => {
                member.salary = salary.max(0.0);
                true
            }
            None => false,
        }
    }

    pub fn set_shifts(&mut self, id: u32, shifts: Shifts) -> bool {
        match self.staff_member_mut(id) {
            Some(member) => {
                member.shifts = shifts;
                true
            }
            None => false,
        }
    }

    // --- Items ---

    /// Adds an item with zero quantity. An empty name is a silent no-op;
    /// an empty unit falls back to `units`.
    pub fn add_item(&mut self, name: &str, price: f64, unit: &str) -> Option<u32> {
        let name = match validate_name(name) {
            Ok(name) => name,
            Err(e) => {
                debug!(error = %e, "ignoring item without a name");
                return None;
            }
        };
        let unit = match unit.trim() {
            "" => DEFAULT_UNIT.to_string(),
            u => u.to_string(),
        };
        let Some(id) = next_id(self.items.iter().map(|i| i.id)) else {
            warn!("no item id left after {}", u32::MAX);
            return None;
        };
        self.items.push(Item::new(id, name, price, unit));
        Some(id)
    }

    pub fn remove_item(&mut self, id: u32) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != before
    }

    pub fn item(&self, id: u32) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    fn item_mut(&mut self, id: u32) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    /// Returns the new quantity.
    pub fn adjust_quantity(&mut self, id: u32, delta: i64) -> Option<u32> {
        self.item_mut(id).map(|item| item.adjust_quantity(delta))
    }

    pub fn set_quantity(&mut self, id: u32, quantity: u32) -> bool {
        match self.item_mut(id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Sets the unit; a blank unit falls back to the default one.
    pub fn set_unit(&mut self, id: u32, unit: &str) -> bool {
        match self.item_mut(id) {
            Some(item) => {
                item.unit = match unit.trim() {
                    "" => DEFAULT_UNIT.to_string(),
                    u => u.to_string(),
                };
                true
            }
            None => false,
        }
    }

    pub fn set_price(&mut self, id: u32, price: f64) -> bool {
        match self.item_mut(id) {
            Some(item) => {
                item.price = price.max(0.0);
                true
            }
            None => false,
        }
    }
}
