//! Document and AI-analysis records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::ui::format_file_size;

labelled_enum! {
    pub enum DocumentType {
        Financial => ("financial", "Financial"),
        Legal => ("legal", "Legal"),
        Operational => ("operational", "Operational"),
        Other => ("other", "Other"),
    }
}

labelled_enum! {
    pub enum AnalysisType {
        DocumentSummary => ("document-summary", "Document Summary"),
        RiskAssessment => ("risk-assessment", "Risk Assessment"),
        ValuationAnalysis => ("valuation-analysis", "Valuation Analysis"),
        TimelineOptimization => ("timeline-optimization", "Timeline Optimization"),
    }
}

/// A precomputed analysis attached to a document or a deal step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiAnalysis {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_id: Option<String>,
    pub analysis_type: AnalysisType,
    pub summary: String,
    pub key_findings: Vec<String>,
    pub red_flags: Vec<String>,
    pub recommendations: Vec<String>,
    /// In `[0, 1]`.
    #[serde(deserialize_with = "deserialize_confidence")]
    confidence: f64,
    pub created_at: DateTime<Utc>,
}

impl AiAnalysis {
    pub fn new(
        id: impl Into<String>,
        analysis_type: AnalysisType,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            document_id: None,
            step_id: None,
            analysis_type,
            summary: summary.into(),
            key_findings: Vec::new(),
            red_flags: Vec::new(),
            recommendations: Vec::new(),
            confidence: 0.0,
            created_at: Utc::now(),
        }
    }

    pub fn with_document(mut self, document_id: impl Into<String>) -> Self {
        self.document_id = Some(document_id.into());
        self
    }

    pub fn with_step(mut self, step_id: impl Into<String>) -> Self {
        self.step_id = Some(step_id.into());
        self
    }

    pub fn with_findings<I, S>(mut self, findings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.key_findings = findings.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_red_flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.red_flags = flags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_recommendations<I, S>(mut self, recommendations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recommendations = recommendations.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set confidence, clamped to `[0, 1]`. NaN becomes 0.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = clamp_confidence(confidence);
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Confidence as a whole percentage.
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }
}

fn clamp_confidence(confidence: f64) -> f64 {
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    }
}

fn deserialize_confidence<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(deserializer).map(clamp_confidence)
}

/// An uploaded document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub deal_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
    /// Size in bytes.
    pub size: u64,
    pub mime_type: String,
    pub file_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<AiAnalysis>,
}

impl Document {
    pub fn new(
        id: impl Into<String>,
        deal_id: impl Into<String>,
        name: impl Into<String>,
        doc_type: DocumentType,
    ) -> Self {
        Self {
            id: id.into(),
            deal_id: deal_id.into(),
            name: name.into(),
            doc_type,
            uploaded_by: String::new(),
            uploaded_at: Utc::now(),
            size: 0,
            mime_type: "application/octet-stream".to_string(),
            file_url: String::new(),
            ai_analysis: None,
        }
    }

    pub fn with_uploader(mut self, uploaded_by: impl Into<String>) -> Self {
        self.uploaded_by = uploaded_by.into();
        self
    }

    pub fn with_file(
        mut self,
        size: u64,
        mime_type: impl Into<String>,
        file_url: impl Into<String>,
    ) -> Self {
        self.size = size;
        self.mime_type = mime_type.into();
        self.file_url = file_url.into();
        self
    }

    pub fn with_uploaded_at(mut self, uploaded_at: DateTime<Utc>) -> Self {
        self.uploaded_at = uploaded_at;
        self
    }

    pub fn with_analysis(mut self, analysis: AiAnalysis) -> Self {
        self.ai_analysis = Some(analysis);
        self
    }

    pub fn is_analyzed(&self) -> bool {
        self.ai_analysis.is_some()
    }

    pub fn size_label(&self) -> String {
        format_file_size(self.size)
    }
}
