//! Picks the one issue `auto_linear` acts on.
//!
//! Ranking is by `priority.value` ascending, with issues lacking a priority
//! last. An explicit identifier (`project`) wins over the ranking whenever it
//! matches an issue in the list.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Issue, SelectionResult};

/// Stable ascending sort by priority value; missing priority sorts last.
pub fn sort_by_priority(issues: &[Issue]) -> Vec<&Issue> {
    let mut sorted: Vec<&Issue> = issues.iter().collect();
    sorted.sort_by(|a, b| a.priority_rank().total_cmp(&b.priority_rank()));
    sorted
}

/// Select the issue to process.
///
/// The first issue in priority order whose `identifier` equals `project`
/// exactly is chosen; otherwise the most urgent issue overall.
pub fn select(issues: &[Issue], project: Option<&str>) -> DomainResult<SelectionResult> {
    let sorted = sort_by_priority(issues);
    let fallback = *sorted.first().ok_or(DomainError::NoIssuesFound)?;

    let chosen = project
        .and_then(|wanted| {
            sorted
                .iter()
                .copied()
                .find(|issue| issue.identifier.as_deref() == Some(wanted))
        })
        .unwrap_or(fallback);

    tracing::debug!(
        issue_id = %chosen.id,
        identifier = ?chosen.identifier,
        project = ?project,
        candidates = issues.len(),
        "Selected issue"
    );

    Ok(SelectionResult::from_issue(chosen))
}
