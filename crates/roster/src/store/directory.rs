//! The employee store and its mutations.

use indexmap::IndexMap;

use crate::employee::{Employee, EmployeeId, MAX_RATING, MIN_RATING};
use crate::error::{Result, RosterError};

/// In-memory collection of employee records keyed by id.
///
/// Records are kept in insertion order. Nothing relies on that order except
/// tie-breaking in ordered reports, which always sort explicitly.
#[derive(Debug, Clone, Default)]
pub struct EmployeeStore {
    pub(super) employees: IndexMap<EmployeeId, Employee>,
}

impl EmployeeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record.
    ///
    /// Fails with `DuplicateId` if the id is taken, otherwise with the first
    /// failing field check (salary, department, name, experience, rating).
    /// On failure the store is unchanged.
    pub fn add(&mut self, mut employee: Employee) -> Result<()> {
        if self.employees.contains_key(&employee.id()) {
            return Err(RosterError::duplicate_id(format!(
                "Employee with ID {} already exists",
                employee.id()
            )));
        }
        employee.validate()?;
        employee.normalize();

        self.employees.insert(employee.id(), employee);
        Ok(())
    }

    /// Add a batch of records, all or none.
    pub fn import(&mut self, employees: Vec<Employee>) -> Result<usize> {
        let mut incoming = std::collections::HashSet::with_capacity(employees.len());
        for employee in &employees {
            if self.employees.contains_key(&employee.id()) || !incoming.insert(employee.id()) {
                return Err(RosterError::duplicate_id(format!(
                    "Employee with ID {} already exists",
                    employee.id()
                )));
            }
            employee
                .validate()
                .map_err(|e| e.context(format!("employee {}", employee.id())))?;
        }

        let count = employees.len();
        for mut employee in employees {
            employee.normalize();
            self.employees.insert(employee.id(), employee);
        }
        Ok(count)
    }

    /// Remove a record by id and return it.
    pub fn remove(&mut self, id: EmployeeId) -> Result<Employee> {
        self.employees
            .shift_remove(&id)
            .ok_or_else(|| not_found(id))
    }

    /// Raise the salary of everyone rated at least `min_rating`.
    ///
    /// Salaries are multiplied by `1 + percentage / 100`. Both arguments are
    /// checked before any record changes, and so is every qualifying
    /// salary: if one would overflow, nothing is raised. Returns how many
    /// records were raised.
    pub fn give_raise(&mut self, percentage: f64, min_rating: f64) -> Result<usize> {
        if !percentage.is_finite() || percentage < 0.0 {
            return Err(RosterError::invalid_argument(format!(
                "Raise percentage cannot be negative (got {})",
                percentage
            )));
        }
        check_rating_threshold(min_rating)?;

        let factor = 1.0 + percentage / 100.0;
        for employee in self.employees.values() {
            if employee.performance_rating() >= min_rating
                && employee.scaled_salary(factor).is_none()
            {
                return Err(RosterError::invalid_argument(format!(
                    "A {}% raise would overflow the salary of employee {}",
                    percentage,
                    employee.id()
                )));
            }
        }

        let mut raised = 0;
        for employee in self.employees.values_mut() {
            if employee.performance_rating() >= min_rating {
                employee.scale_salary(factor);
                raised += 1;
            }
        }
        Ok(raised)
    }

    pub(super) fn get_mut(&mut self, id: EmployeeId) -> Result<&mut Employee> {
        self.employees.get_mut(&id).ok_or_else(|| not_found(id))
    }
}

pub(super) fn not_found(id: EmployeeId) -> RosterError {
    RosterError::not_found(format!("Employee with ID {} does not exist", id))
}

/// Rating thresholds must lie in [0, 5].
pub(super) fn check_rating_threshold(min_rating: f64) -> Result<()> {
    if !min_rating.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&min_rating) {
        return Err(RosterError::invalid_argument(format!(
            "Minimum rating must be between {} and {} (got {})",
            MIN_RATING, MAX_RATING, min_rating
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::NewEmployee;
    use crate::error::ErrorKind;

    fn emp(name: &str, department: &str, salary: f64, rating: f64) -> Employee {
        NewEmployee::new(name, department)
            .with_salary(salary)
            .with_rating(rating)
            .with_experience(4)
            .build(EmployeeId::generate())
            .unwrap()
    }

    /// Deserialize a record, bypassing the constructor checks.
    fn raw(json: serde_json::Value) -> Employee {
        serde_json::from_value(json).unwrap()
    }

    fn raw_with(field: &str, value: serde_json::Value) -> Employee {
        let mut json = serde_json::json!({
            "id": EmployeeId::generate(),
            "name": "Ben Johnson",
            "department": "IT",
            "salary": 1000.0,
            "performance_rating": 5.0,
            "years_of_experience": 4,
            "active": true,
        });
        json[field] = value;
        raw(json)
    }

    #[test]
    fn test_add_valid_employees() {
        let mut store = EmployeeStore::new();
        store.add(emp("Dan Mark", "IT", 50000.0, 5.0)).unwrap();
        store.add(emp("Ben Johnson", "IT", 1000.0, 5.0)).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_add_duplicate_leaves_store_unchanged() {
        let mut store = EmployeeStore::new();
        let dan = emp("Dan Mark", "IT", 50000.0, 5.0);
        store.add(dan.clone()).unwrap();

        let mut twin = dan.clone();
        twin.set_name("Impostor").unwrap();
        let err = store.add(twin).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::DuplicateId);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(dan.id()).unwrap().name(), "Dan Mark");
    }

    #[test]
    fn test_add_rejects_invalid_fields() {
        let cases = [
            ("salary", serde_json::json!(-1000.0), ErrorKind::InvalidSalary),
            ("department", serde_json::json!(""), ErrorKind::InvalidDepartment),
            ("name", serde_json::json!("  "), ErrorKind::InvalidName),
            ("years_of_experience", serde_json::json!(-2), ErrorKind::InvalidExperience),
            ("performance_rating", serde_json::json!(7.0), ErrorKind::InvalidPerformanceRating),
        ];

        let mut store = EmployeeStore::new();
        for (field, value, kind) in cases {
            let err = store.add(raw_with(field, value)).unwrap_err();
            assert_eq!(err.kind(), kind, "field {}", field);
            assert!(store.is_empty());
        }
    }

    #[test]
    fn test_add_checks_salary_before_department() {
        let mut json = serde_json::json!({
            "id": EmployeeId::generate(),
            "name": "",
            "department": "",
            "salary": -1.0,
            "performance_rating": 3.0,
            "years_of_experience": 1,
            "active": true,
        });
        let mut store = EmployeeStore::new();
        let err = store.add(raw(json.clone())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSalary);

        json["salary"] = serde_json::json!(1.0);
        let err = store.add(raw(json)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDepartment);
    }

    #[test]
    fn test_remove_existing() {
        let mut store = EmployeeStore::new();
        let dan = emp("Dan Mark", "IT", 50000.0, 5.0);
        let id = dan.id();
        store.add(dan).unwrap();

        let removed = store.remove(id).unwrap();
        assert_eq!(removed.id(), id);
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_missing_is_not_found() {
        let mut store = EmployeeStore::new();
        store.add(emp("Dan Mark", "IT", 50000.0, 5.0)).unwrap();

        let err = store.remove(EmployeeId::generate()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_keeps_order_of_others() {
        let mut store = EmployeeStore::new();
        let a = emp("A", "IT", 1.0, 1.0);
        let b = emp("B", "IT", 1.0, 1.0);
        let c = emp("C", "IT", 1.0, 1.0);
        let b_id = b.id();
        store.add(a).unwrap();
        store.add(b).unwrap();
        store.add(c).unwrap();

        store.remove(b_id).unwrap();
        let names: Vec<&str> = store.iter().map(|e| e.name()).collect();
        assert_eq!(names, ["A", "C"]);
    }

    #[test]
    fn test_give_raise_applies_to_qualified_only() {
        let mut store = EmployeeStore::new();
        let star = emp("Dan Mark", "IT", 50000.0, 5.0);
        let average = emp("Owusu Dennis", "HR", 60000.0, 3.0);
        let (star_id, average_id) = (star.id(), average.id());
        store.add(star).unwrap();
        store.add(average).unwrap();

        let raised = store.give_raise(10.0, 4.0).unwrap();

        assert_eq!(raised, 1);
        assert_eq!(store.get(star_id).unwrap().salary(), 55000.0);
        assert_eq!(store.get(average_id).unwrap().salary(), 60000.0);
    }

    #[test]
    fn test_give_raise_threshold_is_inclusive() {
        let mut store = EmployeeStore::new();
        let borderline = emp("Dan Mark", "IT", 1000.0, 4.0);
        let id = borderline.id();
        store.add(borderline).unwrap();

        store.give_raise(50.0, 4.0).unwrap();
        assert_eq!(store.get(id).unwrap().salary(), 1500.0);
    }

    #[test]
    fn test_give_raise_rejects_bad_arguments() {
        let mut store = EmployeeStore::new();
        let dan = emp("Dan Mark", "IT", 50000.0, 5.0);
        let id = dan.id();
        store.add(dan).unwrap();

        for (pct, rating) in [(-10.0, 4.0), (10.0, -0.1), (10.0, 5.1), (f64::NAN, 4.0)] {
            let err = store.give_raise(pct, rating).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
        assert_eq!(store.get(id).unwrap().salary(), 50000.0);
    }

    #[test]
    fn test_import_is_all_or_nothing() {
        let mut store = EmployeeStore::new();
        let existing = emp("Dan Mark", "IT", 50000.0, 5.0);
        store.add(existing.clone()).unwrap();

        let batch = vec![emp("New Hire", "HR", 3000.0, 3.0), existing];
        let err = store.import(batch).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateId);
        assert_eq!(store.len(), 1);

        let count = store
            .import(vec![emp("A", "HR", 1.0, 1.0), emp("B", "HR", 2.0, 2.0)])
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_import_rejects_repeated_id_in_batch() {
        let mut store = EmployeeStore::new();
        let a = emp("A", "HR", 1.0, 1.0);
        let err = store.import(vec![a.clone(), a]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateId);
        assert!(store.is_empty());
    }

    #[test]
    fn test_give_raise_rejects_overflow_and_changes_nothing() {
        let mut store = EmployeeStore::new();
        let rich = emp("Rich Man", "IT", 1e300, 5.0);
        let modest = emp("Dan Mark", "IT", 50000.0, 5.0);
        let (rich_id, modest_id) = (rich.id(), modest.id());
        store.add(modest).unwrap();
        store.add(rich).unwrap();

        let err = store.give_raise(1e12, 0.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(store.get(rich_id).unwrap().salary(), 1e300);
        assert_eq!(store.get(modest_id).unwrap().salary(), 50000.0);
    }

    #[test]
    fn test_give_raise_ignores_unqualified_overflow() {
        let mut store = EmployeeStore::new();
        store.add(emp("Rich Man", "IT", 1e300, 1.0)).unwrap();
        store.add(emp("Dan Mark", "IT", 50000.0, 5.0)).unwrap();

        assert_eq!(store.give_raise(1e12, 4.0).unwrap(), 1);
        assert!(store.iter().all(|e| e.salary().is_finite()));
    }

    #[test]
    fn test_add_rounds_deserialized_rating() {
        let mut store = EmployeeStore::new();
        let record = raw_with("performance_rating", serde_json::json!(3.14159));
        let id = record.id();
        store.add(record).unwrap();
        assert_eq!(store.get(id).unwrap().performance_rating(), 3.1);
    }

    #[test]
    fn test_import_rounds_deserialized_rating() {
        let mut store = EmployeeStore::new();
        let record = raw_with("performance_rating", serde_json::json!(4.96));
        let id = record.id();
        store.import(vec![record]).unwrap();
        assert_eq!(store.get(id).unwrap().performance_rating(), 5.0);
    }
}
