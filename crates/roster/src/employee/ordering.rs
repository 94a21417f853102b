//! Sort orders for employee listings.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RosterError;

use super::record::Employee;

/// Key to order a listing by. Every key sorts best-first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Most years of experience first (the natural ordering).
    #[default]
    Experience,
    /// Highest salary first.
    Salary,
    /// Highest performance rating first.
    Rating,
}

impl SortKey {
    /// Compare two employees under this key.
    pub fn compare(&self, a: &Employee, b: &Employee) -> Ordering {
        match self {
            SortKey::Experience => a.cmp_by_experience(b),
            SortKey::Salary => b.salary().total_cmp(&a.salary()),
            SortKey::Rating => b.performance_rating().total_cmp(&a.performance_rating()),
        }
    }
}

impl FromStr for SortKey {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "experience" | "yearsofexperience" | "exp" => Ok(SortKey::Experience),
            "salary" | "pay" => Ok(SortKey::Salary),
            "rating" | "performancerating" | "performance" => Ok(SortKey::Rating),
            _ => Err(RosterError::invalid_argument(format!(
                "Unknown sort key: {}. Use experience, salary, or rating.",
                s
            ))),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Experience => write!(f, "experience"),
            SortKey::Salary => write!(f, "salary"),
            SortKey::Rating => write!(f, "rating"),
        }
    }
}

/// Stable sort: employees with equal keys keep their relative order.
pub fn sort_employees(employees: &mut [&Employee], key: SortKey) {
    employees.sort_by(|a, b| key.compare(a, b));
}
