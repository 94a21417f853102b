//! Read-only lookups and searches.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::employee::{
    same_department, sort_employees, validate_department, Employee, EmployeeId, SortKey,
};
use crate::error::{Result, RosterError};

use super::directory::{check_rating_threshold, EmployeeStore};

/// Which records to keep by employment status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    pub fn matches(&self, employee: &Employee) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => employee.is_active(),
            StatusFilter::Inactive => !employee.is_active(),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = RosterError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "inactive" => Ok(StatusFilter::Inactive),
            _ => Err(RosterError::invalid_argument(format!(
                "Unknown status filter: {}. Use all, active, or inactive.",
                s
            ))),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Active => write!(f, "active"),
            StatusFilter::Inactive => write!(f, "inactive"),
        }
    }
}

impl EmployeeStore {
    pub fn get(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.get(&id)
    }

    pub fn contains(&self, id: EmployeeId) -> bool {
        self.employees.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Iterate over records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Employee> {
        self.employees.values()
    }

    /// Snapshot of every record, in insertion order.
    pub fn all(&self) -> Vec<&Employee> {
        self.iter().collect()
    }

    /// Every record, stably sorted by `key`.
    pub fn sorted(&self, key: SortKey) -> Vec<&Employee> {
        let mut employees = self.all();
        sort_employees(&mut employees, key);
        employees
    }

    /// Records rated at least `min_rating`.
    pub fn search_by_min_rating(&self, min_rating: f64) -> Result<Vec<&Employee>> {
        check_rating_threshold(min_rating)?;
        Ok(self
            .iter()
            .filter(|e| e.performance_rating() >= min_rating)
            .collect())
    }

    /// Records whose name or department contains `term`, ignoring case.
    ///
    /// A missing term (`None`) is an `InvalidArgument` error; an empty term
    /// matches everyone.
    pub fn search_by_term<'a>(&self, term: impl Into<Option<&'a str>>) -> Result<Vec<&Employee>> {
        let term = term
            .into()
            .ok_or_else(|| RosterError::invalid_argument("Search term cannot be null"))?
            .to_lowercase();

        Ok(self
            .iter()
            .filter(|e| {
                e.name().to_lowercase().contains(&term)
                    || e.department().to_lowercase().contains(&term)
            })
            .collect())
    }

    /// Records whose name contains `term`, ignoring case.
    pub fn search_by_name(&self, term: &str) -> Vec<&Employee> {
        let term = term.to_lowercase();
        self.iter()
            .filter(|e| e.name().to_lowercase().contains(&term))
            .collect()
    }

    /// Records in exactly this department, ignoring case.
    pub fn search_by_department(&self, department: &str) -> Result<Vec<&Employee>> {
        validate_department(department)?;
        Ok(self
            .iter()
            .filter(|e| same_department(e.department(), department))
            .collect())
    }

    /// Records with salary in `[min, max]`.
    pub fn search_by_salary_range(&self, min: f64, max: f64) -> Result<Vec<&Employee>> {
        if min.is_nan() || max.is_nan() || min < 0.0 || max < 0.0 {
            return Err(RosterError::invalid_salary(format!(
                "Salary range bounds cannot be negative (got {} to {})",
                min, max
            )));
        }
        if min > max {
            return Err(RosterError::invalid_salary(format!(
                "Minimum salary {} is greater than maximum salary {}",
                min, max
            )));
        }

        Ok(self
            .iter()
            .filter(|e| (min..=max).contains(&e.salary()))
            .collect())
    }

    /// Records matching an employment status filter.
    pub fn filter_by_status(&self, filter: StatusFilter) -> Vec<&Employee> {
        self.iter().filter(|e| filter.matches(e)).collect()
    }
}
