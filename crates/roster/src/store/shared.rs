//! A store shared between several callers.

use std::sync::{Arc, PoisonError, RwLock};

use super::directory::EmployeeStore;

/// Cloneable handle to one store behind a single readers-writer lock.
///
/// Readers may run together; a writer excludes everyone else. Every store
/// mutation validates before it writes, so a poisoned lock still guards a
/// consistent store and is recovered rather than propagated.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Arc<RwLock<EmployeeStore>>,
}

impl SharedStore {
    pub fn new(store: EmployeeStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Run `f` with shared read access.
    pub fn read<T>(&self, f: impl FnOnce(&EmployeeStore) -> T) -> T {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Run `f` with exclusive write access.
    pub fn write<T>(&self, f: impl FnOnce(&mut EmployeeStore) -> T) -> T {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

impl From<EmployeeStore> for SharedStore {
    fn from(store: EmployeeStore) -> Self {
        Self::new(store)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::employee::{EmployeeId, NewEmployee};

    #[test]
    fn test_concurrent_adds_are_all_kept() {
        let shared = SharedStore::default();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || {
                    let emp = NewEmployee::new(format!("Worker {}", i), "IT")
                        .with_salary(1000.0 * i as f64)
                        .with_rating(4.0)
                        .build(EmployeeId::generate())
                        .unwrap();
                    shared.write(|store| store.add(emp)).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(shared.read(|store| store.len()), 8);
    }

    #[test]
    fn test_raise_through_handle_is_visible_to_readers() {
        let mut store = EmployeeStore::new();
        let emp = NewEmployee::new("Dan Mark", "IT")
            .with_salary(50000.0)
            .with_rating(5.0)
            .build(EmployeeId::generate())
            .unwrap();
        let id = emp.id();
        store.add(emp).unwrap();

        let shared = SharedStore::from(store);
        let reader = shared.clone();
        shared.write(|s| s.give_raise(10.0, 4.0)).unwrap();

        let salary = reader.read(|s| s.get(id).map(|e| e.salary()));
        assert_eq!(salary, Some(55000.0));
    }
}
