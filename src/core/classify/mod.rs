//! Completion classifier
//!
//! Decides, per schedule id, whether its filtered visits form a billable
//! completed set under any of the three [`MatchReason`] patterns.
//!
//! # Example
//!
//! ```
//! use maintenance_report::core::classify::classify;
//! use maintenance_report::domain::{ScheduleRecord, StatusField};
//!
//! let rows = vec![
//!     ScheduleRecord::builder()
//!         .id("MS-001")
//!         .visit_type("PM Visit 1")
//!         .completion_status("Completed")
//!         .build()
//!         .unwrap(),
//! ];
//!
//! let result = classify(&rows, StatusField::CompletionStatus);
//! assert_eq!(result.selected_ids(), vec!["MS-001"]);
//! ```

pub mod grouping;
pub mod patterns;

pub use grouping::ScheduleGroups;
pub use patterns::{
    non_pm_fully_completed, pm2_only_completed, pm_sequence_completed, MatchReason,
};

use crate::domain::{CompletionRule, ScheduleId, ScheduleRecord};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Outcome of classifying one filtered table
#[derive(Debug, Clone, Default, Serialize)]
pub struct Classification {
    /// Selected ids, deduplicated, in union order
    pub selected: Vec<ScheduleId>,

    /// Every pattern each selected id matched
    pub reasons: HashMap<ScheduleId, Vec<MatchReason>>,

    /// Distinct schedule ids among the classified rows
    pub schedules: usize,
}

impl Classification {
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn selected_ids(&self) -> Vec<&str> {
        self.selected.iter().map(ScheduleId::as_str).collect()
    }

    pub fn reasons_for(&self, id: &ScheduleId) -> &[MatchReason] {
        self.reasons.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of selected ids that matched `reason`
    pub fn count(&self, reason: MatchReason) -> usize {
        self.reasons
            .values()
            .filter(|matched| matched.contains(&reason))
            .count()
    }
}

/// Classifies `records` by schedule id
///
/// The result lists the ids of the PM-sequence pattern, then the PM Visit 2
/// only pattern, then the non-PM pattern, dropping repeats so each id keeps
/// its first position. Within a pattern ids follow their first appearance in
/// `records`.
///
/// `rule` is a [`CompletionRule`] or a bare
/// [`StatusField`](crate::domain::StatusField), which reads the `Completed`
/// literal.
pub fn classify<'a, 'r, I, R>(records: I, rule: R) -> Classification
where
    I: IntoIterator<Item = &'a ScheduleRecord>,
    R: Into<CompletionRule<'r>>,
{
    let rule = rule.into();
    let groups = ScheduleGroups::from_records(records);
    let mut matched: Vec<(&ScheduleId, Vec<MatchReason>)> = Vec::with_capacity(groups.len());

    for (id, rows) in groups.iter() {
        let reasons: Vec<MatchReason> = MatchReason::ORDER
            .into_iter()
            .filter(|reason| reason.matches(rows, rule))
            .collect();
        if !reasons.is_empty() {
            tracing::debug!(
                schedule = %id,
                reasons = ?reasons,
                visits = rows.len(),
                "Schedule matched"
            );
        }
        matched.push((id, reasons));
    }

    let mut seen: HashSet<&ScheduleId> = HashSet::new();
    let mut selected = Vec::new();
    for reason in MatchReason::ORDER {
        for (id, reasons) in &matched {
            if reasons.contains(&reason) && seen.insert(*id) {
                selected.push((*id).clone());
            }
        }
    }

    let reasons = matched
        .into_iter()
        .filter(|(_, reasons)| !reasons.is_empty())
        .map(|(id, reasons)| (id.clone(), reasons))
        .collect();

    Classification {
        selected,
        reasons,
        schedules: groups.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::StatusField;

    const FIELD: StatusField = StatusField::CompletionStatus;

    fn visit(id: &str, visit_type: &str, status: Option<&str>) -> ScheduleRecord {
        let builder = ScheduleRecord::builder().id(id).visit_type(visit_type);
        let builder = match status {
            Some(s) => builder.completion_status(s),
            None => builder,
        };
        builder.build().unwrap()
    }

    #[test]
    fn test_empty_input_selects_nothing() {
        let rows: Vec<ScheduleRecord> = Vec::new();
        let result = classify(&rows, FIELD);
        assert!(result.is_empty());
        assert!(result.reasons.is_empty());
        assert_eq!(result.schedules, 0);
    }

    #[test]
    fn test_union_order_is_pm_sequence_then_pm2_then_non_pm() {
        let rows = vec![
            visit("NON-PM", "Others Work", Some("Completed")),
            visit("PM2", "PM Visit 2", Some("Completed")),
            visit("PM1", "PM Visit 1", Some("Completed")),
        ];

        let result = classify(&rows, FIELD);
        assert_eq!(result.selected_ids(), vec!["PM1", "PM2", "NON-PM"]);
    }

    #[test]
    fn test_id_matching_two_patterns_listed_once() {
        let rows = vec![
            visit("MS-1", "PM Visit 1", Some("Completed")),
            visit("MS-1", "In House Work", Some("Completed")),
        ];

        let result = classify(&rows, FIELD);
        assert_eq!(result.selected_ids(), vec!["MS-1"]);

        let id = ScheduleId::new("MS-1").unwrap();
        assert_eq!(
            result.reasons_for(&id),
            &[MatchReason::PmSequence, MatchReason::NonPmCompleted]
        );
        assert_eq!(result.count(MatchReason::PmSequence), 1);
        assert_eq!(result.count(MatchReason::NonPmCompleted), 1);
        assert_eq!(result.count(MatchReason::Pm2Only), 0);
    }

    #[test]
    fn test_unmatched_ids_have_no_reasons() {
        let rows = vec![visit("MS-1", "PM Visit 1", Some("Pending"))];
        let result = classify(&rows, FIELD);

        let id = ScheduleId::new("MS-1").unwrap();
        assert!(result.is_empty());
        assert!(result.reasons_for(&id).is_empty());
    }

    #[test]
    fn test_schedules_counts_every_group() {
        let rows = vec![
            visit("MS-1", "PM Visit 1", Some("Completed")),
            visit("MS-2", "Others Work", Some("Pending")),
            visit("MS-1", "PM Visit 2", Some("Completed")),
        ];

        let result = classify(&rows, FIELD);
        assert_eq!(result.selected_ids(), vec!["MS-1"]);
        assert_eq!(result.schedules, 2);
    }

    #[test]
    fn test_completed_literal_drives_selection() {
        let rows = vec![
            visit("MS-1", "PM Visit 1", Some("Closed")),
            visit("MS-2", "In House Work", Some("Completed")),
        ];

        let default = classify(&rows, FIELD);
        assert_eq!(default.selected_ids(), vec!["MS-2"]);

        let closed = classify(&rows, CompletionRule::new(FIELD).with_literal("Closed"));
        assert_eq!(closed.selected_ids(), vec!["MS-1"]);
    }
}
