//! Completion patterns
//!
//! Each pattern is a pure predicate over all visits of one schedule id.
//! "Completed" always means the configured status field holds the
//! configured completed literal, `Completed` unless overridden.

use crate::domain::{CompletionRule, ScheduleRecord, VisitType};
use serde::Serialize;
use std::fmt;

/// Which completion pattern selected a schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchReason {
    /// PM Visit 1 completed and the PM sequence resolved
    PmSequence,
    /// Only PM Visit 2 visits, all completed
    Pm2Only,
    /// Every non-PM visit completed
    NonPmCompleted,
}

impl MatchReason {
    /// Union order of the patterns
    pub const ORDER: [MatchReason; 3] = [
        MatchReason::PmSequence,
        MatchReason::Pm2Only,
        MatchReason::NonPmCompleted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchReason::PmSequence => "pm_sequence",
            MatchReason::Pm2Only => "pm2_only",
            MatchReason::NonPmCompleted => "non_pm_completed",
        }
    }

    /// Evaluates this pattern against one group
    pub fn matches(&self, rows: &[&ScheduleRecord], rule: CompletionRule<'_>) -> bool {
        match self {
            MatchReason::PmSequence => pm_sequence_completed(rows, rule),
            MatchReason::Pm2Only => pm2_only_completed(rows, rule),
            MatchReason::NonPmCompleted => non_pm_fully_completed(rows, rule),
        }
    }
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// PM visit sequence completed
///
/// Requires a completed `PM Visit 1`, no visit with an absent type, and
/// either no `PM Visit 2` at all or at least one completed `PM Visit 2`.
/// Every `PM Visit 1` must carry a status.
pub fn pm_sequence_completed(rows: &[&ScheduleRecord], rule: CompletionRule<'_>) -> bool {
    let has_completed_pm1 = rows
        .iter()
        .any(|r| r.is_type(&VisitType::PmVisit1) && r.is_completed(rule));
    if !has_completed_pm1 {
        return false;
    }

    if rows.iter().any(|r| r.visit_type.is_none()) {
        return false;
    }

    let mut pm2 = rows.iter().filter(|r| r.is_type(&VisitType::PmVisit2)).peekable();
    let pm2_resolved = pm2.peek().is_none() || pm2.any(|r| r.is_completed(rule));
    if !pm2_resolved {
        return false;
    }

    rows.iter()
        .filter(|r| r.is_type(&VisitType::PmVisit1))
        .all(|r| r.status(rule.field).is_some())
}

/// All non-PM visits completed
///
/// Visits that are neither `PM Visit 1` nor `PM Visit 2` (including those
/// with no type) must exist and all be completed.
pub fn non_pm_fully_completed(rows: &[&ScheduleRecord], rule: CompletionRule<'_>) -> bool {
    let mut non_pm = rows
        .iter()
        .filter(|r| !r.visit_type.as_ref().is_some_and(VisitType::is_preventive))
        .peekable();

    non_pm.peek().is_some() && non_pm.all(|r| r.is_completed(rule))
}

/// Exclusively `PM Visit 2`, all completed
pub fn pm2_only_completed(rows: &[&ScheduleRecord], rule: CompletionRule<'_>) -> bool {
    !rows.is_empty()
        && rows
            .iter()
            .all(|r| r.is_type(&VisitType::PmVisit2) && r.is_completed(rule))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StatusField;

    const FIELD: CompletionRule<'static> = CompletionRule::new(StatusField::CompletionStatus);

    fn visit(visit_type: Option<&str>, status: Option<&str>) -> ScheduleRecord {
        let mut builder = ScheduleRecord::builder().id("MS-1");
        if let Some(t) = visit_type {
            builder = builder.visit_type(t);
        }
        if let Some(s) = status {
            builder = builder.completion_status(s);
        }
        builder.build().unwrap()
    }

    fn refs(rows: &[ScheduleRecord]) -> Vec<&ScheduleRecord> {
        rows.iter().collect()
    }

    #[test]
    fn test_pm_sequence_without_pm2() {
        let rows = vec![visit(Some("PM Visit 1"), Some("Completed"))];
        assert!(pm_sequence_completed(&refs(&rows), FIELD));
    }

    #[test]
    fn test_pm_sequence_with_one_completed_pm2() {
        let rows = vec![
            visit(Some("PM Visit 1"), Some("Completed")),
            visit(Some("PM Visit 2"), Some("Pending")),
            visit(Some("PM Visit 2"), Some("Completed")),
        ];
        assert!(pm_sequence_completed(&refs(&rows), FIELD));
    }

    #[test]
    fn test_pm_sequence_unresolved_pm2() {
        let rows = vec![
            visit(Some("PM Visit 1"), Some("Completed")),
            visit(Some("PM Visit 2"), Some("Pending")),
        ];
        assert!(!pm_sequence_completed(&refs(&rows), FIELD));
    }

    #[test]
    fn test_pm_sequence_excluded_by_untyped_visit() {
        let rows = vec![
            visit(Some("PM Visit 1"), Some("Completed")),
            visit(None, Some("Completed")),
        ];
        assert!(!pm_sequence_completed(&refs(&rows), FIELD));
    }

    #[test]
    fn test_pm_sequence_requires_status_on_every_pm1() {
        let rows = vec![
            visit(Some("PM Visit 1"), Some("Completed")),
            visit(Some("PM Visit 1"), None),
        ];
        assert!(!pm_sequence_completed(&refs(&rows), FIELD));

        let rows = vec![
            visit(Some("PM Visit 1"), Some("Completed")),
            visit(Some("PM Visit 1"), Some("Pending")),
        ];
        assert!(pm_sequence_completed(&refs(&rows), FIELD));
    }

    #[test]
    fn test_pm_sequence_needs_completed_pm1() {
        let rows = vec![visit(Some("PM Visit 1"), Some("Pending"))];
        assert!(!pm_sequence_completed(&refs(&rows), FIELD));
    }

    #[test]
    fn test_non_pm_all_completed() {
        let rows = vec![
            visit(Some("In House Work"), Some("Completed")),
            visit(Some("Others Work"), Some("Completed")),
            visit(Some("PM Visit 1"), Some("Pending")),
        ];
        assert!(non_pm_fully_completed(&refs(&rows), FIELD));
    }

    #[test]
    fn test_non_pm_one_missing() {
        let rows = vec![
            visit(Some("In House Work"), Some("Completed")),
            visit(Some("Others Work"), None),
        ];
        assert!(!non_pm_fully_completed(&refs(&rows), FIELD));
    }

    #[test]
    fn test_non_pm_requires_a_non_pm_visit() {
        let rows = vec![visit(Some("PM Visit 1"), Some("Completed"))];
        assert!(!non_pm_fully_completed(&refs(&rows), FIELD));
    }

    #[test]
    fn test_pm2_only() {
        let rows = vec![
            visit(Some("PM Visit 2"), Some("Completed")),
            visit(Some("PM Visit 2"), Some("Completed")),
        ];
        assert!(pm2_only_completed(&refs(&rows), FIELD));

        let rows = vec![
            visit(Some("PM Visit 2"), Some("Completed")),
            visit(Some("PM Visit 1"), Some("Completed")),
        ];
        assert!(!pm2_only_completed(&refs(&rows), FIELD));

        assert!(!pm2_only_completed(&[], FIELD));
    }

    #[test]
    fn test_status_field_selection() {
        let row = ScheduleRecord::builder()
            .id("MS-1")
            .visit_type("PM Visit 2")
            .completion_status("Pending")
            .service_completion_status("Completed")
            .build()
            .unwrap();
        let rows = vec![&row];

        assert!(!pm2_only_completed(&rows, StatusField::CompletionStatus.into()));
        assert!(pm2_only_completed(&rows, StatusField::ServiceCompletionStatus.into()));
    }

    #[test]
    fn test_custom_completed_literal() {
        let rows = vec![
            visit(Some("PM Visit 1"), Some("Closed")),
            visit(Some("In House Work"), Some("Closed")),
        ];
        let closed = FIELD.with_literal("Closed");

        assert!(pm_sequence_completed(&refs(&rows), closed));
        assert!(non_pm_fully_completed(&refs(&rows), closed));
        assert!(!pm_sequence_completed(&refs(&rows), FIELD));
        assert!(!non_pm_fully_completed(&refs(&rows), FIELD));
    }
}
