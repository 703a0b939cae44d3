//! Filter and sort projection over a snapshot of the store.
//!
//! Everything here is a pure function of its inputs: the same records,
//! filter and sort key always produce the same ordered view.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TallyError};
use crate::models::{ExpenseRecord, ExpenseType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(ExpenseType),
}

impl CategoryFilter {
    /// Cycle order used by the interactive browser.
    pub const CYCLE: [CategoryFilter; 4] = [
        CategoryFilter::All,
        CategoryFilter::Only(ExpenseType::Personal),
        CategoryFilter::Only(ExpenseType::Business),
        CategoryFilter::Only(ExpenseType::Other),
    ];

    pub fn matches(self, category: ExpenseType) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(t) => t == category,
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::CYCLE.iter().position(|f| *f == self).unwrap_or(0);
        Self::CYCLE[(idx + 1) % Self::CYCLE.len()]
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("All"),
            CategoryFilter::Only(t) => t.fmt(f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse::<ExpenseType>()
            .map(CategoryFilter::Only)
            .map_err(|_| TallyError::InvariantViolation(format!("unknown category filter '{s}'")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FilterSpec {
    pub category: CategoryFilter,
    pub minimum_cost: f64,
}

impl FilterSpec {
    pub fn new(category: CategoryFilter, minimum_cost: f64) -> Result<Self> {
        if !minimum_cost.is_finite() || minimum_cost < 0.0 {
            return Err(TallyError::Validation(format!(
                "minimum cost must be zero or more, got {minimum_cost}"
            )));
        }
        Ok(Self { category, minimum_cost })
    }

    pub fn keeps(&self, record: &ExpenseRecord) -> bool {
        self.category.matches(record.category) && record.cost >= self.minimum_cost
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Cost,
}

impl SortField {
    fn compare(self, a: &ExpenseRecord, b: &ExpenseRecord) -> Ordering {
        match self {
            SortField::Name => compare_names(&a.name, &b.name),
            SortField::Cost => a.cost.total_cmp(&b.cost),
        }
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

/// Two fields, both ascending. Ties on both fall back to id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub primary: SortField,
    pub secondary: SortField,
}

impl SortKey {
    pub const BY_NAME: SortKey = SortKey { primary: SortField::Name, secondary: SortField::Cost };
    pub const BY_COST: SortKey = SortKey { primary: SortField::Cost, secondary: SortField::Name };

    pub fn compare(&self, a: &ExpenseRecord, b: &ExpenseRecord) -> Ordering {
        self.primary
            .compare(a, b)
            .then_with(|| self.secondary.compare(a, b))
            .then_with(|| a.id.cmp(&b.id))
    }

    pub fn toggled(self) -> Self {
        if self == Self::BY_NAME {
            Self::BY_COST
        } else {
            Self::BY_NAME
        }
    }
}

impl Default for SortKey {
    fn default() -> Self {
        Self::BY_NAME
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = |field: SortField| match field {
            SortField::Name => "name",
            SortField::Cost => "cost",
        };
        write!(f, "{}, {}", label(self.primary), label(self.secondary))
    }
}

/// Sort order as it appears in settings and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Name,
    Cost,
}

impl From<SortOrder> for SortKey {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Name => SortKey::BY_NAME,
            SortOrder::Cost => SortKey::BY_COST,
        }
    }
}

/// The ordered list plus its summary figures.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpenseView {
    pub rows: Vec<ExpenseRecord>,
    pub total: f64,
    pub count: usize,
}

pub fn project(records: &[ExpenseRecord], filter: &FilterSpec, sort: &SortKey) -> ExpenseView {
    let mut rows: Vec<ExpenseRecord> = records.iter().filter(|r| filter.keeps(r)).cloned().collect();
    rows.sort_by(|a, b| sort.compare(a, b));
    let total = rows.iter().map(|r| r.cost).sum();
    let count = rows.len();
    ExpenseView { rows, total, count }
}
