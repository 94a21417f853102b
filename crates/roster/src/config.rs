//! Configuration for Roster front ends.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::employee::same_department;
use crate::error::{ErrorKind, Result, RosterError};
use crate::store::TOP_PAID_LIMIT;

/// Departments offered for selection by default.
pub const DEFAULT_DEPARTMENTS: &[&str] = &["IT", "Finance", "HR", "Engineering", "Marketing"];

/// Settings shared by the front ends.
///
/// Departments are a picklist, not a constraint: the store accepts any
/// non-blank department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Departments to offer for selection.
    pub departments: Vec<String>,
    /// Number of records in the highest-paid report.
    pub top_paid_limit: usize,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            departments: DEFAULT_DEPARTMENTS.iter().map(|d| d.to_string()).collect(),
            top_paid_limit: TOP_PAID_LIMIT,
        }
    }
}

impl RosterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_departments<I, S>(mut self, departments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.departments = departments.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_top_paid_limit(mut self, limit: usize) -> Self {
        self.top_paid_limit = limit;
        self
    }

    /// Whether `department` is on the picklist, ignoring case.
    pub fn is_known_department(&self, department: &str) -> bool {
        self.departments
            .iter()
            .any(|d| same_department(d, department))
    }

    /// Load configuration from a JSON file. Missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| {
            RosterError::new(
                ErrorKind::Io,
                format!("Failed to open config file '{}': {}", path.display(), e),
            )
        })?;

        let config: RosterConfig = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            RosterError::config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate().map_err(|e| e.context(path.display()))?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.top_paid_limit == 0 {
            return Err(RosterError::config("top_paid_limit must be at least 1"));
        }
        if let Some(blank) = self.departments.iter().position(|d| d.trim().is_empty()) {
            return Err(RosterError::config(format!(
                "departments[{}] is blank",
                blank
            )));
        }
        Ok(())
    }
}
