//! Visit classification types
//!
//! A maintenance schedule is made of visits; each visit carries a type and a
//! per-visit completion status. The classifier only gives special meaning to
//! the two preventive-maintenance types, every other type is treated alike.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Status literal the ERP writes when a visit's work is finished
pub const COMPLETED: &str = "Completed";

/// Type of a scheduled visit
///
/// Unknown types are kept verbatim in [`VisitType::Other`] so they can be
/// reported and filtered rather than failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VisitType {
    /// First preventive-maintenance visit
    PmVisit1,
    /// Second preventive-maintenance visit
    PmVisit2,
    /// Performance verification assistance
    PvtAssistVisit,
    /// Work carried out at the service centre
    InHouseWork,
    /// Miscellaneous billable work
    OthersWork,
    /// ASTM method assistance
    AstmAssistVisit,
    /// Any other value the ERP may return
    Other(String),
}

impl VisitType {
    /// The six visit types a billing report considers by default
    pub const BILLABLE: [VisitType; 6] = [
        VisitType::PmVisit1,
        VisitType::PmVisit2,
        VisitType::PvtAssistVisit,
        VisitType::InHouseWork,
        VisitType::OthersWork,
        VisitType::AstmAssistVisit,
    ];

    /// ERP label of this visit type
    pub fn as_str(&self) -> &str {
        match self {
            VisitType::PmVisit1 => "PM Visit 1",
            VisitType::PmVisit2 => "PM Visit 2",
            VisitType::PvtAssistVisit => "PVT Assist Visit",
            VisitType::InHouseWork => "In House Work",
            VisitType::OthersWork => "Others Work",
            VisitType::AstmAssistVisit => "ASTM Assist Visit",
            VisitType::Other(label) => label,
        }
    }

    /// True for `PM Visit 1` and `PM Visit 2`
    pub fn is_preventive(&self) -> bool {
        matches!(self, VisitType::PmVisit1 | VisitType::PmVisit2)
    }

    /// Default allow-list as ERP labels
    pub fn billable_labels() -> Vec<String> {
        Self::BILLABLE.iter().map(|t| t.as_str().to_string()).collect()
    }
}

impl fmt::Display for VisitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisitType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "PM Visit 1" => VisitType::PmVisit1,
            "PM Visit 2" => VisitType::PmVisit2,
            "PVT Assist Visit" => VisitType::PvtAssistVisit,
            "In House Work" => VisitType::InHouseWork,
            "Others Work" => VisitType::OthersWork,
            "ASTM Assist Visit" => VisitType::AstmAssistVisit,
            other => VisitType::Other(other.to_string()),
        })
    }
}

impl From<&str> for VisitType {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(t) => t,
            Err(never) => match never {},
        }
    }
}

impl Serialize for VisitType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for VisitType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(|s| VisitType::from(s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("PM Visit 1", VisitType::PmVisit1)]
    #[test_case("PM Visit 2", VisitType::PmVisit2)]
    #[test_case("PVT Assist Visit", VisitType::PvtAssistVisit)]
    #[test_case("In House Work", VisitType::InHouseWork)]
    #[test_case("Others Work", VisitType::OthersWork)]
    #[test_case("ASTM Assist Visit", VisitType::AstmAssistVisit)]
    fn test_known_labels(label: &str, expected: VisitType) {
        let parsed = VisitType::from(label);
        assert_eq!(parsed, expected);
        assert_eq!(parsed.as_str(), label);
    }

    #[test]
    fn test_unknown_label_kept_verbatim() {
        let parsed = VisitType::from("Installation");
        assert_eq!(parsed, VisitType::Other("Installation".to_string()));
        assert_eq!(parsed.to_string(), "Installation");
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        assert!(matches!(VisitType::from("pm visit 1"), VisitType::Other(_)));
    }

    #[test]
    fn test_preventive_types() {
        assert!(VisitType::PmVisit1.is_preventive());
        assert!(VisitType::PmVisit2.is_preventive());
        assert!(!VisitType::InHouseWork.is_preventive());
        assert!(!VisitType::Other("PM Visit 3".into()).is_preventive());
    }

    #[test]
    fn test_billable_labels() {
        let labels = VisitType::billable_labels();
        assert_eq!(labels.len(), 6);
        assert!(labels.contains(&"ASTM Assist Visit".to_string()));
    }

    #[test]
    fn test_serde_round_trip_uses_labels() {
        let json = serde_json::to_string(&VisitType::InHouseWork).unwrap();
        assert_eq!(json, "\"In House Work\"");
        let back: VisitType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, VisitType::InHouseWork);
    }
}
