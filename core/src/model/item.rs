use serde::{Deserialize, Serialize};

pub const DEFAULT_UNIT: &str = "units";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Item {
    pub id: u32,
    pub name: String,
    /// Price per unit.
    pub price: f64,
    pub unit: String,
    /// Units received today.
    pub quantity: u32,
}

impl Item {
    pub fn new(id: u32, name: String, price: f64, unit: String) -> Self {
        Self {
            id,
            name,
            price: price.max(0.0),
            unit,
            quantity: 0,
        }
    }

    pub fn cost(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }

    /// Applies a signed change to today's quantity, never going below zero.
    pub fn adjust_quantity(&mut self, delta: i64) -> u32 {
        let next = (i64::from(self.quantity) + delta).clamp(0, i64::from(u32::MAX));
        self.quantity = next as u32;
        self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjust_quantity_clamps_at_zero() {
        let mut item = Item::new(1, "Water".to_string(), 20.0, "bottles".to_string());
        assert_eq!(item.adjust_quantity(3), 3);
        assert_eq!(item.adjust_quantity(-1), 2);
        assert_eq!(item.adjust_quantity(-10), 0);
    }

    #[test]
    fn test_cost() {
        let mut item = Item::new(1, "Milk".to_string(), 30.0, "liters".to_string());
        item.quantity = 4;
        assert_eq!(item.cost(), 120.0);
    }
}
