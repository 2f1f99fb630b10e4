use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of shifts a staff member works per day. Stored as the integer 1 or 2.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum Shifts {
    #[default]
    Single,
    Double,
}

impl Shifts {
    pub fn count(self) -> u8 {
        match self {
            Shifts::Single => 1,
            Shifts::Double => 2,
        }
    }

    pub fn multiplier(self) -> f64 {
        f64::from(self.count())
    }
}

impl TryFrom<u8> for Shifts {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Shifts::Single),
            2 => Ok(Shifts::Double),
            other => Err(format!("shifts must be 1 or 2, got {}", other)),
        }
    }
}

impl From<Shifts> for u8 {
    fn from(value: Shifts) -> Self {
        value.count()
    }
}

impl fmt::Display for Shifts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StaffMember {
    pub id: u32,
    pub name: String,
    /// Monthly salary.
    pub salary: f64,
    pub shifts: Shifts,
    pub present: bool,
}

impl StaffMember {
    pub fn new(id: u32, name: String, salary: f64, shifts: Shifts) -> Self {
        Self {
            id,
            name,
            salary: salary.max(0.0),
            shifts,
            present: true,
        }
    }

    /// Cost this member adds to today's total: salary × shifts when present, 0 otherwise.
    pub fn daily_cost(&self) -> f64 {
        if self.present {
            self.salary * self.shifts.multiplier()
        } else {
            0.0
        }
    }
}
