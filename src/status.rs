use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The health of a monitored service, reduced to a small fixed
/// vocabulary.
///
/// Vendor labels that match none of the normalization rules are kept
/// verbatim in `Other`, so the set is not closed in the strict sense.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Operational,
    Degraded,
    PartialOutage,
    MajorOutage,
    Maintenance,
    Unknown,
    Other(String),
}

impl Status {
    #[must_use]
    pub fn as_label(&self) -> &str {
        match self {
            Self::Operational => "Operational",
            Self::Degraded => "Degraded",
            Self::PartialOutage => "Partial Outage",
            Self::MajorOutage => "Major Outage",
            Self::Maintenance => "Maintenance",
            Self::Unknown => "Unknown",
            Self::Other(label) => label,
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_label())
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        match status {
            Status::Other(label) => label,
            other => other.as_label().to_string(),
        }
    }
}

impl From<String> for Status {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Operational" => Self::Operational,
            "Degraded" => Self::Degraded,
            "Partial Outage" => Self::PartialOutage,
            "Major Outage" => Self::MajorOutage,
            "Maintenance" => Self::Maintenance,
            "Unknown" => Self::Unknown,
            _ => Self::Other(label),
        }
    }
}

/// Map an arbitrary vendor status label onto the canonical vocabulary.
///
/// The label is trimmed and lower-cased, then the rules below are tried
/// in order and the first match wins:
///
/// 1. exactly `none`, `operational`, `healthy` or `ok` → `Operational`
/// 2. contains `degrad`, or exactly `minor` → `Degraded`
/// 3. contains `partial`, or exactly `major` → `PartialOutage`
/// 4. contains `critical`, `down`, `outage` or `unhealthy` → `MajorOutage`
/// 5. contains `maintenance` → `Maintenance`
///
/// An empty label is `Unknown`; a label matching no rule is returned
/// unchanged.
#[must_use]
pub fn normalize(label: &str) -> Status {
    if label.is_empty() {
        return Status::Unknown;
    }
    let s = label.trim().to_lowercase();
    if matches!(s.as_str(), "none" | "operational" | "healthy" | "ok") {
        return Status::Operational;
    }
    if s.contains("degrad") || s == "minor" {
        return Status::Degraded;
    }
    if s.contains("partial") || s == "major" {
        return Status::PartialOutage;
    }
    if ["critical", "down", "outage", "unhealthy"]
        .iter()
        .any(|needle| s.contains(needle))
    {
        return Status::MajorOutage;
    }
    if s.contains("maintenance") {
        return Status::Maintenance;
    }
    Status::Other(label.to_string())
}
