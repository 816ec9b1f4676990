//! Payload shapes of the downstream log-analysis service. This crate only produces
//! requests for it; nothing here performs I/O.

use crate::schema::CanonicalRecord;
use serde::{Deserialize, Serialize};

/// `{ "log_data": ... }` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub log_data: serde_json::Value,
}

impl AnalysisRequest {
    pub fn from_record(record: &CanonicalRecord) -> serde_json::Result<Self> {
        Ok(Self {
            log_data: serde_json::to_value(record)?,
        })
    }

    /// Wrap an arbitrary raw log payload.
    pub fn raw(log_data: impl Into<serde_json::Value>) -> Self {
        Self {
            log_data: log_data.into(),
        }
    }
}

/// The service answers in Korean; the aliases accept those grades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatLevel {
    #[serde(alias = "정보")]
    Info,
    #[serde(alias = "낮음")]
    Low,
    #[serde(alias = "중간")]
    Medium,
    #[serde(alias = "높음")]
    High,
    #[serde(alias = "심각")]
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[serde(alias = "긴급")]
    Urgent,
    #[serde(alias = "높음")]
    High,
    #[serde(alias = "중간")]
    Medium,
    #[serde(alias = "낮음")]
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedAnomaly {
    pub anomaly_type: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemediationStep {
    pub priority: Priority,
    pub action: String,
    pub reason: String,
}

/// Response body of the analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub log_summary: String,
    #[serde(default)]
    pub detected_anomalies: Vec<DetectedAnomaly>,
    pub threat_level: ThreatLevel,
    #[serde(default)]
    pub remediation_plan: Vec<RemediationStep>,
}

impl AnalysisReport {
    /// Remediation steps, most urgent first; ties keep service order.
    pub fn plan_by_priority(&self) -> Vec<&RemediationStep> {
        let mut steps: Vec<&RemediationStep> = self.remediation_plan.iter().collect();
        steps.sort_by_key(|s| s.priority);
        steps
    }
}
