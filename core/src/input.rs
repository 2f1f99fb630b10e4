use std::collections::HashMap;

use crate::error::{Result, TrackerError};
use crate::model::roster::Roster;
use crate::model::staff::Shifts;

pub const STAFF_KEYS: &[&str] = &["salary", "shifts"];
pub const ITEM_KEYS: &[&str] = &["price", "unit", "quantity"];

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub name: String,
    pub metadata: HashMap<String, String>,
}

/// Splits free words (joined into the name) from `key:value` pairs.
pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut name_parts = Vec::new();
    let mut metadata = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() {
                metadata.insert(key.to_string(), value.to_string());
                continue;
            }
        }
        name_parts.push(arg.as_str());
    }

    ParsedInput {
        name: name_parts.join(" "),
        metadata,
    }
}

/// Resolves an exact key or an unambiguous prefix of one.
pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(TrackerError::InvalidInput(format!("Unknown key: '{}'", key))),
        _ => Err(TrackerError::InvalidInput(format!(
            "Ambiguous key: '{}' matches {:?}",
            key, matches
        ))),
    }
}

/// A non-negative, finite money amount.
pub fn parse_amount(value: &str) -> Result<f64> {
    let amount: f64 = value
        .trim()
        .parse()
        .map_err(|_| TrackerError::InvalidInput(format!("Invalid amount: '{}'", value)))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(TrackerError::InvalidInput(format!(
            "Amount must be zero or more: '{}'",
            value
        )));
    }
    Ok(amount)
}

pub fn parse_shifts(value: &str) -> Result<Shifts> {
    let n: u8 = value
        .trim()
        .parse()
        .map_err(|_| TrackerError::InvalidInput(format!("Invalid shifts: '{}'", value)))?;
    Shifts::try_from(n).map_err(TrackerError::InvalidInput)
}

fn normalized(metadata: HashMap<String, String>, keys: &[&str]) -> Result<HashMap<String, String>> {
    let mut out = HashMap::new();
    for (key, value) in metadata {
        out.insert(expand_key(&key, keys)?, value);
    }
    Ok(out)
}

#[derive(Debug, Default, PartialEq)]
pub struct StaffInput {
    pub name: String,
    pub salary: Option<f64>,
    pub shifts: Option<Shifts>,
}

impl StaffInput {
    /// Parses `Name words salary:5000 shifts:2`.
    pub fn parse(args: &[String]) -> Result<Self> {
        let parsed = parse_args(args);
        let metadata = normalized(parsed.metadata, STAFF_KEYS)?;
        Ok(Self {
            name: parsed.name,
            salary: metadata.get("salary").map(|v| parse_amount(v)).transpose()?,
            shifts: metadata.get("shifts").map(|v| parse_shifts(v)).transpose()?,
        })
    }

    pub fn add_to(&self, roster: &mut Roster) -> Option<u32> {
        roster.add_staff(
            &self.name,
            self.salary.unwrap_or(0.0),
            self.shifts.unwrap_or_default(),
        )
    }

    /// Applies the given fields to an existing member. The name is not edited.
    pub fn apply_to(&self, roster: &mut Roster, id: u32) -> bool {
        if roster.staff_member(id).is_none() {
            return false;
        }
        if let Some(salary) = self.salary {
            roster.set_salary(id, salary);
        }
        if let Some(shifts) = self.shifts {
            roster.set_shifts(id, shifts);
        }
        true
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct ItemInput {
    pub name: String,
    pub price: Option<f64>,
    pub unit: Option<String>,
    pub quantity: Option<u32>,
}

impl ItemInput {
    /// Parses `Name words price:30 unit:liters`.
    pub fn parse(args: &[String]) -> Result<Self> {
        let parsed = parse_args(args);
        let metadata = normalized(parsed.metadata, ITEM_KEYS)?;
        let quantity = metadata
            .get("quantity")
            .map(|v| {
                v.trim()
                    .parse::<u32>()
                    .map_err(|_| TrackerError::InvalidInput(format!("Invalid quantity: '{}'", v)))
            })
            .transpose()?;
        Ok(Self {
            name: parsed.name,
            price: metadata.get("price").map(|v| parse_amount(v)).transpose()?,
            unit: metadata.get("unit").cloned(),
            quantity,
        })
    }

    pub fn add_to(&self, roster: &mut Roster) -> Option<u32> {
        let id = roster.add_item(
            &self.name,
            self.price.unwrap_or(0.0),
            self.unit.as_deref().unwrap_or(""),
        )?;
        if let Some(q) = self.quantity {
            roster.set_quantity(id, q);
        }
        Some(id)
    }

    /// Applies price, unit and quantity to an existing item.
    pub fn apply_to(&self, roster: &mut Roster, id: u32) -> bool {
        if roster.item(id).is_none() {
            return false;
        }
        if let Some(price) = self.price {
            roster.set_price(id, price);
        }
        if let Some(unit) = &self.unit {
            roster.set_unit(id, unit);
        }
        if let Some(q) = self.quantity {
            roster.set_quantity(id, q);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &str) -> Vec<String> {
        s.split_whitespace().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_parse_simple() {
        let parsed = parse_args(&words("Head Cook salary:9000 shifts:2"));
        assert_eq!(parsed.name, "Head Cook");
        assert_eq!(parsed.metadata.get("salary"), Some(&"9000".to_string()));
        assert_eq!(parsed.metadata.get("shifts"), Some(&"2".to_string()));
    }

    #[test]
    fn test_expand_key() {
        assert_eq!(expand_key("s", &["salary"]).unwrap(), "salary");
        assert_eq!(expand_key("sal", STAFF_KEYS).unwrap(), "salary");
        assert_eq!(expand_key("sh", STAFF_KEYS).unwrap(), "shifts");
        assert_eq!(expand_key("u", ITEM_KEYS).unwrap(), "unit");

        // Ambiguous
        assert!(expand_key("s", STAFF_KEYS).is_err());
        // Unknown
        assert!(expand_key("x", ITEM_KEYS).is_err());
    }

    #[test]
    fn test_staff_input() {
        let input = StaffInput::parse(&words("Head Cook sal:9000 sh:2")).unwrap();
        assert_eq!(input.name, "Head Cook");
        assert_eq!(input.salary, Some(9000.0));
        assert_eq!(input.shifts, Some(Shifts::Double));

        assert!(StaffInput::parse(&words("Cook shifts:3")).is_err());
        assert!(StaffInput::parse(&words("Cook salary:-5")).is_err());
    }

    #[test]
    fn test_item_input_adds_with_defaults() {
        let mut roster = Roster::empty();
        let input = ItemInput::parse(&words("Bread price:40")).unwrap();
        let id = input.add_to(&mut roster).unwrap();
        let bread = roster.item(id).unwrap();
        assert_eq!(bread.price, 40.0);
        assert_eq!(bread.unit, "units");
    }

    #[test]
    fn test_apply_edits_existing_entries() {
        let mut roster = Roster::default();
        let edit = StaffInput::parse(&words("salary:5500 shifts:2")).unwrap();
        assert!(edit.apply_to(&mut roster, 1));
        let member = roster.staff_member(1).unwrap();
        assert_eq!(member.salary, 5500.0);
        assert_eq!(member.shifts, Shifts::Double);
        assert!(!edit.apply_to(&mut roster, 99));

        let edit = ItemInput::parse(&words("q:4 p:25")).unwrap();
        assert!(edit.apply_to(&mut roster, 1));
        assert_eq!(roster.item(1).unwrap().cost(), 100.0);
    }

    #[test]
    fn test_item_edit_changes_unit() {
        let mut roster = Roster::default();
        let edit = ItemInput::parse(&words("unit:kilos")).unwrap();
        assert!(edit.apply_to(&mut roster, 1));
        let water = roster.item(1).unwrap();
        assert_eq!(water.unit, "kilos");
        assert_eq!(water.price, 20.0);
    }

    #[test]
    fn test_nameless_staff_input_adds_nothing() {
        let mut roster = Roster::default();
        let input = StaffInput::parse(&words("salary:5000")).unwrap();
        assert_eq!(input.add_to(&mut roster), None);
        assert_eq!(roster.staff.len(), 4);
    }
}
