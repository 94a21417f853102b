//! The employee record and its field-level validation.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Result, RosterError};

use super::id::EmployeeId;

/// Lowest allowed performance rating.
pub const MIN_RATING: f64 = 0.0;

/// Highest allowed performance rating.
pub const MAX_RATING: f64 = 5.0;

/// Magnitude from which every `f64` is already a whole number.
const WHOLE_NUMBER_BOUND: f64 = 4_503_599_627_370_496.0; // 2^52

/// Round to one decimal place, halves away from zero.
///
/// Values too large to carry a fractional part come back unchanged.
pub fn round_to_tenth(value: f64) -> f64 {
    let scaled = value * 10.0;
    if value.abs() >= WHOLE_NUMBER_BOUND || !scaled.is_finite() {
        return value;
    }
    scaled.round() / 10.0
}

/// Department equality ignoring case, with Unicode case folding.
pub(crate) fn same_department(stored: &str, query: &str) -> bool {
    stored.trim().to_lowercase() == query.trim().to_lowercase()
}

pub(crate) fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(RosterError::invalid_name("Name cannot be empty"));
    }
    Ok(())
}

pub(crate) fn validate_department(department: &str) -> Result<()> {
    if department.trim().is_empty() {
        return Err(RosterError::invalid_department("Department cannot be empty"));
    }
    Ok(())
}

pub(crate) fn validate_salary(salary: f64) -> Result<()> {
    if !salary.is_finite() || salary < 0.0 {
        return Err(RosterError::invalid_salary(format!(
            "Salary cannot be negative (got {})",
            salary
        )));
    }
    Ok(())
}

pub(crate) fn validate_rating(rating: f64) -> Result<()> {
    if !rating.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(RosterError::invalid_rating(format!(
            "Performance rating must be between {} and {} (got {})",
            MIN_RATING, MAX_RATING, rating
        )));
    }
    Ok(())
}

pub(crate) fn validate_experience(years: i32) -> Result<()> {
    if years < 0 {
        return Err(RosterError::invalid_experience(format!(
            "Years of experience cannot be negative (got {})",
            years
        )));
    }
    Ok(())
}

/// Field values for a record that has not been created yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub name: String,
    pub department: String,
    pub salary: f64,
    pub performance_rating: f64,
    pub years_of_experience: i32,
    pub active: bool,
    pub profile_image: String,
}

impl NewEmployee {
    /// Start a new active employee with zero salary, rating and experience.
    pub fn new(name: impl Into<String>, department: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            department: department.into(),
            salary: 0.0,
            performance_rating: 0.0,
            years_of_experience: 0,
            active: true,
            profile_image: String::new(),
        }
    }

    pub fn with_salary(mut self, salary: f64) -> Self {
        self.salary = salary;
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.performance_rating = rating;
        self
    }

    pub fn with_experience(mut self, years: i32) -> Self {
        self.years_of_experience = years;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_profile_image(mut self, reference: impl Into<String>) -> Self {
        self.profile_image = reference.into();
        self
    }

    /// Validate the values and create the record.
    pub fn build(self, id: EmployeeId) -> Result<Employee> {
        Employee::new(id, self)
    }
}

/// One person's employment record.
///
/// Every setter validates before mutating, so a failed call leaves the
/// record untouched. Equality and hashing consider the id only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    id: EmployeeId,
    name: String,
    department: String,
    #[serde(serialize_with = "serialize_tenth")]
    salary: f64,
    performance_rating: f64,
    years_of_experience: i32,
    active: bool,
    #[serde(default)]
    profile_image: String,
}

fn serialize_tenth<S: Serializer>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_to_tenth(*value))
}

impl Employee {
    /// Create a record, validating every field.
    pub fn new(id: EmployeeId, fields: NewEmployee) -> Result<Self> {
        validate_name(&fields.name)?;
        validate_department(&fields.department)?;
        validate_salary(fields.salary)?;
        validate_rating(fields.performance_rating)?;
        validate_experience(fields.years_of_experience)?;

        Ok(Self {
            id,
            name: fields.name,
            department: fields.department,
            salary: fields.salary,
            performance_rating: round_to_tenth(fields.performance_rating),
            years_of_experience: fields.years_of_experience,
            active: fields.active,
            profile_image: fields.profile_image,
        })
    }

    pub fn id(&self) -> EmployeeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    /// Salary rounded to one decimal place.
    pub fn salary(&self) -> f64 {
        round_to_tenth(self.salary)
    }

    /// Performance rating, already rounded to one decimal place.
    pub fn performance_rating(&self) -> f64 {
        self.performance_rating
    }

    pub fn years_of_experience(&self) -> i32 {
        self.years_of_experience
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn profile_image(&self) -> &str {
        &self.profile_image
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        validate_name(&name)?;
        self.name = name;
        Ok(())
    }

    pub fn set_department(&mut self, department: impl Into<String>) -> Result<()> {
        let department = department.into();
        validate_department(&department)?;
        self.department = department;
        Ok(())
    }

    pub fn set_salary(&mut self, salary: f64) -> Result<()> {
        validate_salary(salary)?;
        self.salary = salary;
        Ok(())
    }

    /// Set the rating; stored rounded to one decimal place.
    pub fn set_performance_rating(&mut self, rating: f64) -> Result<()> {
        validate_rating(rating)?;
        self.performance_rating = round_to_tenth(rating);
        Ok(())
    }

    pub fn set_years_of_experience(&mut self, years: i32) -> Result<()> {
        validate_experience(years)?;
        self.years_of_experience = years;
        Ok(())
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn set_profile_image(&mut self, reference: impl Into<String>) {
        self.profile_image = reference.into();
    }

    /// Natural ordering: more years of experience first.
    ///
    /// Ties compare equal; use a stable sort when tie order matters.
    pub fn cmp_by_experience(&self, other: &Self) -> Ordering {
        other.years_of_experience.cmp(&self.years_of_experience)
    }

    /// Re-run every field check on the stored values.
    ///
    /// Records built through [`Employee::new`] always pass; deserialized
    /// records may not. Salary, department, name and experience are checked
    /// in that order.
    pub(crate) fn validate(&self) -> Result<()> {
        validate_salary(self.salary)?;
        validate_department(&self.department)?;
        validate_name(&self.name)?;
        validate_experience(self.years_of_experience)?;
        validate_rating(self.performance_rating)?;
        Ok(())
    }

    /// Round the stored rating, for records that skipped the setters.
    pub(crate) fn normalize(&mut self) {
        self.performance_rating = round_to_tenth(self.performance_rating);
    }

    /// Salary after multiplying by `factor`, or `None` if it would overflow.
    pub(crate) fn scaled_salary(&self, factor: f64) -> Option<f64> {
        Some(self.salary * factor).filter(|s| s.is_finite())
    }

    /// Multiply the salary without re-validating.
    ///
    /// Callers check [`Employee::scaled_salary`] first.
    pub(crate) fn scale_salary(&mut self, factor: f64) {
        self.salary *= factor;
    }
}

impl PartialEq for Employee {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Employee {}

impl Hash for Employee {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
