//! Aggregate reports over the store.

use serde::{Deserialize, Serialize};

use crate::employee::{
    same_department, sort_employees, validate_department, Employee, SortKey,
};
use crate::error::{Result, RosterError};

use super::directory::EmployeeStore;

/// Size of the highest-paid report.
pub const TOP_PAID_LIMIT: usize = 5;

/// Counts of records by employment status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headcount {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
}

impl EmployeeStore {
    /// Up to `limit` records, highest salary first.
    ///
    /// Equal salaries keep insertion order.
    pub fn top_paid(&self, limit: usize) -> Vec<&Employee> {
        let mut employees = self.all();
        sort_employees(&mut employees, SortKey::Salary);
        employees.truncate(limit);
        employees
    }

    /// The five highest-paid records.
    pub fn top5_by_salary(&self) -> Vec<&Employee> {
        self.top_paid(TOP_PAID_LIMIT)
    }

    /// Mean salary of a department, matched ignoring case.
    ///
    /// Returns 0.0 when nobody works there. A missing or blank department is
    /// an `InvalidDepartment` error.
    pub fn average_salary_by_department<'a>(
        &self,
        department: impl Into<Option<&'a str>>,
    ) -> Result<f64> {
        let department = department
            .into()
            .ok_or_else(|| RosterError::invalid_department("Department cannot be null"))?;
        validate_department(department)?;
        let department = department.trim();

        let (sum, count) = self
            .iter()
            .filter(|e| same_department(e.department(), department))
            .fold((0.0, 0usize), |(sum, count), e| (sum + e.salary(), count + 1));

        if count == 0 {
            return Ok(0.0);
        }
        Ok(sum / count as f64)
    }

    pub fn headcount(&self) -> Headcount {
        let active = self.iter().filter(|e| e.is_active()).count();
        Headcount {
            total: self.len(),
            active,
            inactive: self.len() - active,
        }
    }
}
