use ingest::ClauseType;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ComplianceStatus {
    Ok,
    Attention,
}

impl ComplianceStatus {
    /// Attention when a mandatory clause is missing or any inconsistency fired.
    pub fn from_checks(missing: &BTreeSet<ClauseType>, inconsistencies: &[String]) -> Self {
        if missing.is_empty() && inconsistencies.is_empty() {
            ComplianceStatus::Ok
        } else {
            ComplianceStatus::Attention
        }
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplianceStatus::Ok => write!(f, "OK"),
            ComplianceStatus::Attention => write!(f, "ATTENTION"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseScore {
    pub risk: u8,
    pub quality: u8,
    pub rationale: String,
    pub legal_basis: String,
    pub citation: String,
}

/// Output of the rule engine for one contract graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceFinding {
    /// Clause types found by segmentation, in document order.
    pub detected_clauses: Vec<ClauseType>,
    pub missing_clauses: BTreeSet<ClauseType>,
    pub inconsistencies: Vec<String>,
    pub risks: Vec<String>,
    pub per_clause_score: BTreeMap<ClauseType, ClauseScore>,
    pub correlation_alerts: Vec<String>,
    pub status: ComplianceStatus,
}

impl ComplianceFinding {
    pub fn requires_review(&self) -> bool {
        self.status == ComplianceStatus::Attention
    }
}
