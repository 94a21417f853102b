//! Property-based tests for the employee record and store.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p roster --test property_tests
//!
//! # More cases
//! PROPTEST_CASES=10000 cargo test -p roster --test property_tests
//! ```

use proptest::prelude::*;

use roster::employee::round_to_tenth;
use roster::{EmployeeId, EmployeeStore, ErrorKind, NewEmployee, SortKey};

// =============================================================================
// Test Strategies
// =============================================================================

fn name() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,10} [A-Z][a-z]{1,12}"
}

fn department() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("IT".to_string()),
        Just("Finance".to_string()),
        Just("HR".to_string()),
        Just("Engineering".to_string()),
        Just("Marketing".to_string()),
    ]
}

fn salary() -> impl Strategy<Value = f64> {
    0.0..500_000.0f64
}

fn rating() -> impl Strategy<Value = f64> {
    0.0..=5.0f64
}

fn new_employee() -> impl Strategy<Value = NewEmployee> {
    (name(), department(), salary(), rating(), 0..45i32, any::<bool>()).prop_map(
        |(name, dept, salary, rating, years, active)| {
            NewEmployee::new(name, dept)
                .with_salary(salary)
                .with_rating(rating)
                .with_experience(years)
                .with_active(active)
        },
    )
}

fn populated_store() -> impl Strategy<Value = EmployeeStore> {
    prop::collection::vec(new_employee(), 0..20).prop_map(|drafts| {
        let mut store = EmployeeStore::new();
        for draft in drafts {
            store
                .add(draft.build(EmployeeId::generate()).unwrap())
                .unwrap();
        }
        store
    })
}

// =============================================================================
// Record Properties
// =============================================================================

proptest! {
    /// Reading every field right after construction returns the validated,
    /// rounded inputs.
    #[test]
    fn read_after_write(draft in new_employee()) {
        let id = EmployeeId::generate();
        let emp = draft.clone().build(id).unwrap();

        prop_assert_eq!(emp.id(), id);
        prop_assert_eq!(emp.name(), draft.name.as_str());
        prop_assert_eq!(emp.department(), draft.department.as_str());
        prop_assert_eq!(emp.salary(), round_to_tenth(draft.salary));
        prop_assert_eq!(emp.performance_rating(), round_to_tenth(draft.performance_rating));
        prop_assert_eq!(emp.years_of_experience(), draft.years_of_experience);
        prop_assert_eq!(emp.is_active(), draft.active);
    }

    /// Out-of-range ratings are always rejected and never stored.
    #[test]
    fn rating_out_of_range_rejected(
        draft in new_employee(),
        bad in prop_oneof![-100.0..-0.0001f64, 5.0001..100.0f64],
    ) {
        let mut emp = draft.build(EmployeeId::generate()).unwrap();
        let before = emp.performance_rating();
        let err = emp.set_performance_rating(bad).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::InvalidPerformanceRating);
        prop_assert_eq!(emp.performance_rating(), before);
    }

    /// Rounding is idempotent.
    #[test]
    fn rounding_idempotent(value in -1.0e6..1.0e6f64) {
        let once = round_to_tenth(value);
        prop_assert_eq!(round_to_tenth(once), once);
    }
}

// =============================================================================
// Store Properties
// =============================================================================

proptest! {
    /// Invalid records never change the store size.
    #[test]
    fn invalid_add_keeps_size(store in populated_store(), salary in -1.0e6..-0.01f64) {
        let mut store = store;
        let before = store.len();
        let bad: roster::Employee = serde_json::from_value(serde_json::json!({
            "id": EmployeeId::generate(),
            "name": "Ben Johnson",
            "department": "IT",
            "salary": salary,
            "performance_rating": 3.0,
            "years_of_experience": 1,
            "active": true,
        })).unwrap();

        prop_assert_eq!(store.add(bad).unwrap_err().kind(), ErrorKind::InvalidSalary);
        prop_assert_eq!(store.len(), before);
    }

    /// The top-paid report is sorted, bounded and drawn from the store.
    #[test]
    fn top5_sorted_and_bounded(store in populated_store()) {
        let top = store.top5_by_salary();
        prop_assert_eq!(top.len(), store.len().min(5));
        for pair in top.windows(2) {
            prop_assert!(pair[0].salary() >= pair[1].salary());
        }
        for emp in &top {
            prop_assert!(store.contains(emp.id()));
        }
        if let (Some(last), Some(max_rest)) = (
            top.last(),
            store.sorted(SortKey::Salary).get(top.len()).map(|e| e.salary()),
        ) {
            prop_assert!(last.salary() >= max_rest);
        }
    }

    /// A raise touches exactly the records at or above the threshold.
    #[test]
    fn raise_only_touches_qualified(
        store in populated_store(),
        pct in 0.0..50.0f64,
        min in 0.0..=5.0f64,
    ) {
        let mut store = store;
        let before: Vec<(EmployeeId, f64, f64)> = store
            .iter()
            .map(|e| (e.id(), e.salary(), e.performance_rating()))
            .collect();

        store.give_raise(pct, min).unwrap();

        for (id, salary, rating) in before {
            let now = store.get(id).unwrap().salary();
            if rating >= min {
                prop_assert!(now >= salary);
            } else {
                prop_assert_eq!(now, salary);
            }
        }
    }

    /// Salary range results all lie inside the range.
    #[test]
    fn salary_range_results_within_bounds(
        store in populated_store(),
        a in salary(),
        b in salary(),
    ) {
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        for emp in store.search_by_salary_range(min, max).unwrap() {
            prop_assert!(emp.salary() >= min && emp.salary() <= max);
        }
    }

    /// A missing search term always fails.
    #[test]
    fn null_term_always_fails(store in populated_store()) {
        prop_assert_eq!(
            store.search_by_term(None).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }
}
