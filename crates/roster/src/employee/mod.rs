//! Employee records.
//!
//! An [`Employee`] holds one validated record keyed by an [`EmployeeId`].
//! Field checks run in the constructor and in every setter, independently of
//! the store's own checks on insertion.

mod id;
mod ordering;
mod record;

pub use id::EmployeeId;
pub use ordering::{sort_employees, SortKey};
pub use record::{round_to_tenth, Employee, NewEmployee, MAX_RATING, MIN_RATING};

pub(crate) use record::{same_department, validate_department};
