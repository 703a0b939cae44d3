use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TallyError;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum ExpenseType {
    Personal,
    Business,
    Other,
}

impl ExpenseType {
    pub const ALL: [ExpenseType; 3] = [ExpenseType::Personal, ExpenseType::Business, ExpenseType::Other];

    pub fn as_str(self) -> &'static str {
        match self {
            ExpenseType::Personal => "Personal",
            ExpenseType::Business => "Business",
            ExpenseType::Other => "Other",
        }
    }
}

impl fmt::Display for ExpenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseType {
    type Err = TallyError;

    /// Stored and typed values are matched case-insensitively. Anything else
    /// never comes from user input, so it is reported as an invariant breach.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExpenseType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TallyError::InvariantViolation(format!("unknown expense type '{s}'")))
    }
}

/// A committed expense. Only the store constructs these.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRecord {
    pub id: i64,
    pub name: String,
    pub category: ExpenseType,
    pub cost: f64,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub icon: String,
    pub color: String,
}

/// Field values for a record that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub name: String,
    pub category: ExpenseType,
    pub cost: f64,
    pub icon: String,
    pub color: String,
}

/// Partial update. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpensePatch {
    pub name: Option<String>,
    pub category: Option<ExpenseType>,
    pub cost: Option<f64>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl ExpensePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.cost.is_none()
            && self.icon.is_none()
            && self.color.is_none()
    }
}

/// Checks the two rules every persisted record satisfies.
pub fn validate_fields(name: &str, cost: f64) -> crate::error::Result<()> {
    if name.is_empty() {
        return Err(TallyError::Validation("name must not be empty".to_string()));
    }
    if !cost.is_finite() || cost <= 0.0 {
        return Err(TallyError::Validation(format!("cost must be greater than zero, got {cost}")));
    }
    Ok(())
}
