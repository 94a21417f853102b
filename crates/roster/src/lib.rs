//! Roster: validated in-memory employee records.
//!
//! A [`EmployeeStore`] holds [`Employee`] records keyed by [`EmployeeId`] and
//! offers raises, searches, sorted listings and salary reports. Every field
//! is validated where it is set, and the store repeats the checks when a
//! record is added.
//!
//! # Core Principles
//!
//! - **Validate at mutation**: a failed setter leaves the record unchanged
//! - **Memory only**: nothing is persisted; state ends with the process
//! - **Errors, not logs**: the library reports failures to its caller and
//!   leaves presentation to the front end
//!
//! # Example
//!
//! ```
//! use roster::{EmployeeId, EmployeeStore, ErrorKind, NewEmployee};
//!
//! let mut store = EmployeeStore::new();
//! let dan = NewEmployee::new("Dan Mark", "IT")
//!     .with_salary(50000.0)
//!     .with_rating(5.0)
//!     .build(EmployeeId::generate())
//!     .unwrap();
//! store.add(dan.clone()).unwrap();
//!
//! let err = store.add(dan).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::DuplicateId);
//! assert_eq!(store.top5_by_salary().len(), 1);
//! ```

pub mod auth;
pub mod config;
pub mod employee;
pub mod error;
pub mod import;
pub mod store;

pub use auth::{CredentialTable, User};
pub use config::RosterConfig;
pub use employee::{Employee, EmployeeId, NewEmployee, SortKey};
pub use error::{ErrorKind, Result, RosterError};
pub use store::{EmployeeStore, Field, FieldUpdate, Headcount, SharedStore, StatusFilter};
