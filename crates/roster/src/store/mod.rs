//! The employee store.
//!
//! [`EmployeeStore`] owns every record it holds and enforces the add-time
//! checks. Mutations live in `directory`, single-field updates in `update`,
//! searches in `query` and aggregates in `report`.
//!
//! # Usage
//!
//! ```
//! use roster::{EmployeeId, EmployeeStore, NewEmployee};
//!
//! let mut store = EmployeeStore::new();
//! let dan = NewEmployee::new("Dan Mark", "IT")
//!     .with_salary(50000.0)
//!     .with_rating(5.0)
//!     .with_experience(4)
//!     .build(EmployeeId::generate())?;
//! let id = dan.id();
//! store.add(dan)?;
//!
//! store.give_raise(10.0, 4.0)?;
//! assert_eq!(store.get(id).unwrap().salary(), 55000.0);
//! assert_eq!(store.average_salary_by_department("it")?, 55000.0);
//! # Ok::<(), roster::RosterError>(())
//! ```

mod directory;
mod query;
mod report;
mod shared;
mod update;

pub use directory::EmployeeStore;
pub use query::StatusFilter;
pub use report::{Headcount, TOP_PAID_LIMIT};
pub use shared::SharedStore;
pub use update::{Field, FieldUpdate};

pub(crate) use update::parse_flag;
