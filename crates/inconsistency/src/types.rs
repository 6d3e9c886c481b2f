use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The case subject a note is checked against.
///
/// Dates are ISO `YYYY-MM-DD`; names default to empty when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingType {
    Name,
    Date,
}

impl FindingType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Date => "date",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A single advisory result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InconsistencyFinding {
    #[serde(rename = "type")]
    pub finding_type: FindingType,
    pub message: String,
    pub severity: Severity,
}

impl InconsistencyFinding {
    pub fn warning(finding_type: FindingType, message: impl Into<String>) -> Self {
        Self {
            finding_type,
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    pub fn error(finding_type: FindingType, message: impl Into<String>) -> Self {
        Self {
            finding_type,
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

/// True when at least one finding has [`Severity::Error`]
pub fn has_errors(findings: &[InconsistencyFinding]) -> bool {
    findings.iter().any(|f| f.severity == Severity::Error)
}
