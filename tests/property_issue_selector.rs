use autolinear::domain::models::{Issue, Priority, NO_DESCRIPTION};
use autolinear::services::issue_selector::{select, sort_by_priority};
use proptest::prelude::*;

fn build_issues(priorities: &[Option<u8>]) -> Vec<Issue> {
    priorities
        .iter()
        .enumerate()
        .map(|(i, priority)| Issue {
            id: format!("id-{i}"),
            identifier: Some(format!("ENG-{i}")),
            priority: priority.map(|p| Priority::Detailed {
                value: Some(f64::from(p)),
                name: None,
            }),
            description: Some(format!("description {i}")),
        })
        .collect()
}

fn priorities() -> impl Strategy<Value = Vec<Option<u8>>> {
    prop::collection::vec(prop::option::of(0u8..5), 1..30)
}

proptest! {
    /// Property: the selected issue is always one of the inputs
    #[test]
    fn prop_selection_comes_from_input(priorities in priorities()) {
        let issues = build_issues(&priorities);
        let result = select(&issues, None).unwrap();

        prop_assert!(issues.iter().any(|issue| issue.id == result.issue_id));
    }

    /// Property: without a hint, nothing in the list is more urgent than the pick
    #[test]
    fn prop_selection_is_most_urgent(priorities in priorities()) {
        let issues = build_issues(&priorities);
        let result = select(&issues, None).unwrap();

        let chosen = issues.iter().find(|issue| issue.id == result.issue_id).unwrap();
        for issue in &issues {
            prop_assert!(chosen.priority_rank() <= issue.priority_rank());
        }
    }

    /// Property: ties resolve to the earliest issue in input order
    #[test]
    fn prop_sort_is_stable(priorities in priorities()) {
        let issues = build_issues(&priorities);
        let sorted = sort_by_priority(&issues);

        prop_assert_eq!(sorted.len(), issues.len());
        for pair in sorted.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            prop_assert!(a.priority_rank() <= b.priority_rank());
            if a.priority_rank() == b.priority_rank() {
                let index = |issue: &Issue| issues.iter().position(|i| i.id == issue.id).unwrap();
                prop_assert!(index(a) < index(b));
            }
        }
    }

    /// Property: issues without a priority are never chosen over prioritized ones
    #[test]
    fn prop_missing_priority_sorts_last(priorities in priorities()) {
        let issues = build_issues(&priorities);
        let sorted = sort_by_priority(&issues);

        let first_missing = sorted.iter().position(|issue| issue.priority.is_none());
        if let Some(start) = first_missing {
            prop_assert!(sorted[start..].iter().all(|issue| issue.priority.is_none()));
        }
    }

    /// Property: a hint naming an issue in the list always wins
    #[test]
    fn prop_matching_hint_wins(priorities in priorities(), pick in any::<prop::sample::Index>()) {
        let issues = build_issues(&priorities);
        let target = &issues[pick.index(issues.len())];
        let hint = target.identifier.clone().unwrap();

        let result = select(&issues, Some(&hint)).unwrap();
        prop_assert_eq!(&result.issue_id, &target.id);
    }

    /// Property: a hint matching nothing behaves like no hint
    #[test]
    fn prop_unmatched_hint_falls_back(priorities in priorities()) {
        let issues = build_issues(&priorities);

        let with_hint = select(&issues, Some("NOPE-1")).unwrap();
        let without = select(&issues, None).unwrap();
        prop_assert_eq!(with_hint, without);
    }
}

#[test]
fn test_missing_description_uses_placeholder() {
    let mut issues = build_issues(&[Some(1)]);
    issues[0].description = None;

    let result = select(&issues, None).unwrap();
    assert_eq!(result.description, NO_DESCRIPTION);
}

#[test]
fn test_empty_input_is_no_issues_found() {
    let err = select(&[], None).unwrap_err();
    assert_eq!(err.to_string(), "No issues found in Linear");
}
