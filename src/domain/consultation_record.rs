use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::report::ConsultationReport;

/// One persisted consultation: who talked, how it ended, the audit report
/// and the full reconstructed dialogue text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultationRecord {
    pub recorded_at: DateTime<Utc>,
    pub consultant: String,
    pub patient: String,
    pub deal_outcome: String,
    #[serde(flatten)]
    pub report: ConsultationReport,
    pub dialogue: String,
}

impl ConsultationRecord {
    pub fn new(
        consultant: impl Into<String>,
        patient: impl Into<String>,
        deal_outcome: impl Into<String>,
        report: ConsultationReport,
        dialogue: impl Into<String>,
    ) -> Self {
        Self {
            recorded_at: Utc::now(),
            consultant: consultant.into(),
            patient: patient.into(),
            deal_outcome: deal_outcome.into(),
            report,
            dialogue: dialogue.into(),
        }
    }
}
