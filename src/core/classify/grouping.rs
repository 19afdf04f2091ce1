//! Ordered grouping of visits by schedule id

use crate::domain::{ScheduleId, ScheduleRecord};
use std::collections::HashMap;

/// Visits grouped by schedule id, groups in first-appearance order
#[derive(Debug, Default)]
pub struct ScheduleGroups<'a> {
    groups: Vec<(&'a ScheduleId, Vec<&'a ScheduleRecord>)>,
}

impl<'a> ScheduleGroups<'a> {
    /// Groups `records` by id; rows inside a group keep their input order
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ScheduleRecord>,
    {
        let mut index: HashMap<&'a ScheduleId, usize> = HashMap::new();
        let mut groups: Vec<(&'a ScheduleId, Vec<&'a ScheduleRecord>)> = Vec::new();

        for record in records {
            match index.get(&record.id) {
                Some(&pos) => groups[pos].1.push(record),
                None => {
                    index.insert(&record.id, groups.len());
                    groups.push((&record.id, vec![record]));
                }
            }
        }

        Self { groups }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterates `(id, rows)` in first-appearance order
    pub fn iter(&self) -> impl Iterator<Item = (&'a ScheduleId, &[&'a ScheduleRecord])> + '_ {
        self.groups.iter().map(|(id, rows)| (*id, rows.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str) -> ScheduleRecord {
        ScheduleRecord::builder().id(id).build().unwrap()
    }

    #[test]
    fn test_groups_keep_first_appearance_order() {
        let rows = vec![row("B"), row("A"), row("B"), row("C"), row("A")];
        let groups = ScheduleGroups::from_records(&rows);

        let summary: Vec<(&str, usize)> = groups
            .iter()
            .map(|(id, rows)| (id.as_str(), rows.len()))
            .collect();
        assert_eq!(summary, vec![("B", 2), ("A", 2), ("C", 1)]);
    }

    #[test]
    fn test_empty_input() {
        let rows: Vec<ScheduleRecord> = Vec::new();
        let groups = ScheduleGroups::from_records(&rows);
        assert!(groups.is_empty());
        assert_eq!(groups.len(), 0);
    }
}
