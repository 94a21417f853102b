//! Single-field updates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::employee::{Employee, EmployeeId};
use crate::error::{Result, RosterError};

use super::directory::{not_found, EmployeeStore};

/// An updatable field of an employee record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Department,
    Salary,
    PerformanceRating,
    YearsOfExperience,
    Active,
    ProfileImage,
}

impl Field {
    /// All fields, in display order.
    pub const ALL: [Field; 7] = [
        Field::Name,
        Field::Department,
        Field::Salary,
        Field::PerformanceRating,
        Field::YearsOfExperience,
        Field::Active,
        Field::ProfileImage,
    ];

    /// Canonical field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Department => "department",
            Field::Salary => "salary",
            Field::PerformanceRating => "performanceRating",
            Field::YearsOfExperience => "yearsOfExperience",
            Field::Active => "isActive",
            Field::ProfileImage => "profilePicture",
        }
    }

    /// Parse a raw text value into a typed update for this field.
    ///
    /// A value that does not fit the field's type is an `InvalidField`
    /// error; range checks are left to the record's setters.
    pub fn parse_value(&self, raw: &str) -> Result<FieldUpdate> {
        let mismatch = |expected: &str| {
            RosterError::invalid_field(format!(
                "Field {} expects {}, got '{}'",
                self.as_str(),
                expected,
                raw
            ))
        };
        let trimmed = raw.trim();

        let update = match self {
            Field::Name => FieldUpdate::Name(raw.to_string()),
            Field::Department => FieldUpdate::Department(raw.to_string()),
            Field::ProfileImage => FieldUpdate::ProfileImage(raw.to_string()),
            Field::Salary => FieldUpdate::Salary(
                trimmed.parse().map_err(|_| mismatch("a number"))?,
            ),
            Field::PerformanceRating => FieldUpdate::PerformanceRating(
                trimmed.parse().map_err(|_| mismatch("a number"))?,
            ),
            Field::YearsOfExperience => FieldUpdate::YearsOfExperience(
                trimmed.parse().map_err(|_| mismatch("a whole number"))?,
            ),
            Field::Active => FieldUpdate::Active(
                parse_bool(trimmed).ok_or_else(|| mismatch("true or false"))?,
            ),
        };
        Ok(update)
    }
}

impl FromStr for Field {
    type Err = RosterError;

    /// Case-insensitive; `_`, `-` and spaces are ignored.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();

        match key.as_str() {
            "name" => Ok(Field::Name),
            "department" | "dept" => Ok(Field::Department),
            "salary" => Ok(Field::Salary),
            "performancerating" | "rating" => Ok(Field::PerformanceRating),
            "yearsofexperience" | "experience" => Ok(Field::YearsOfExperience),
            "isactive" | "active" => Ok(Field::Active),
            "profilepicture" | "profileimage" | "image" => Ok(Field::ProfileImage),
            _ => Err(RosterError::invalid_field(format!("Invalid field: {}", s))),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed new value for exactly one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FieldUpdate {
    Name(String),
    Department(String),
    Salary(f64),
    PerformanceRating(f64),
    YearsOfExperience(i32),
    Active(bool),
    ProfileImage(String),
}

impl FieldUpdate {
    /// The field this update targets.
    pub fn field(&self) -> Field {
        match self {
            FieldUpdate::Name(_) => Field::Name,
            FieldUpdate::Department(_) => Field::Department,
            FieldUpdate::Salary(_) => Field::Salary,
            FieldUpdate::PerformanceRating(_) => Field::PerformanceRating,
            FieldUpdate::YearsOfExperience(_) => Field::YearsOfExperience,
            FieldUpdate::Active(_) => Field::Active,
            FieldUpdate::ProfileImage(_) => Field::ProfileImage,
        }
    }

    /// Apply through the record's validating setter.
    pub fn apply(self, employee: &mut Employee) -> Result<()> {
        match self {
            FieldUpdate::Name(name) => employee.set_name(name),
            FieldUpdate::Department(department) => employee.set_department(department),
            FieldUpdate::Salary(salary) => employee.set_salary(salary),
            FieldUpdate::PerformanceRating(rating) => employee.set_performance_rating(rating),
            FieldUpdate::YearsOfExperience(years) => employee.set_years_of_experience(years),
            FieldUpdate::Active(active) => {
                employee.set_active(active);
                Ok(())
            }
            FieldUpdate::ProfileImage(reference) => {
                employee.set_profile_image(reference);
                Ok(())
            }
        }
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

impl EmployeeStore {
    /// Change one field of a stored record.
    ///
    /// Validation errors from the setter are returned unchanged and leave
    /// the record as it was.
    pub fn update(&mut self, id: EmployeeId, update: FieldUpdate) -> Result<()> {
        let employee = self.get_mut(id)?;
        update.apply(employee)
    }

    /// Change one field given its name and a raw text value.
    ///
    /// Checks, in order: the id exists (`NotFound`), the field name is known
    /// (`InvalidField`), the value has the field's type (`InvalidField`),
    /// then the setter's own validation.
    pub fn update_field(&mut self, id: EmployeeId, field: &str, value: &str) -> Result<()> {
        if !self.contains(id) {
            return Err(not_found(id));
        }
        let update = field.parse::<Field>()?.parse_value(value)?;
        self.update(id, update)
    }
}

pub(crate) fn parse_flag(text: &str) -> Option<bool> {
    parse_bool(text.trim())
}
