//! Document analysis panel: document list with per-document analysis
//! summaries, analysis requests and uploads.
//!
//! Analyzing and uploading states last exactly as long as the backend
//! operation behind them. Results are folded into the document list by
//! [`AnalysisPanel::poll`].

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::backend::{FileHandle, MarketplaceBackend};
use crate::error::{AnalysisError, BackendError};

use super::model::{AiAnalysis, Document};
use super::task::{OperationHandle, OperationStatus};

/// Findings shown per document before "View Full Report".
const SUMMARY_FINDINGS: usize = 3;
/// Red flags shown per document.
const SUMMARY_RED_FLAGS: usize = 2;

/// A headline statistic above the document list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverviewCard {
    pub title: &'static str,
    pub value: String,
    pub caption: &'static str,
}

/// What the panel shows for one document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSummary {
    pub id: String,
    pub name: String,
    pub doc_type: &'static str,
    pub size: String,
    pub analyzed: bool,
    pub summary: Option<String>,
    pub key_findings: Vec<String>,
    pub red_flags: Vec<String>,
    pub confidence_percent: Option<u32>,
    pub analyzing: bool,
}

impl DocumentSummary {
    fn from_document(doc: &Document, analyzing: bool) -> Self {
        let analysis = doc.ai_analysis.as_ref();
        Self {
            id: doc.id.clone(),
            name: doc.name.clone(),
            doc_type: doc.doc_type.as_str(),
            size: doc.size_label(),
            analyzed: analysis.is_some(),
            summary: analysis.map(|a| a.summary.clone()),
            key_findings: analysis
                .map(|a| a.key_findings.iter().take(SUMMARY_FINDINGS).cloned().collect())
                .unwrap_or_default(),
            red_flags: analysis
                .map(|a| a.red_flags.iter().take(SUMMARY_RED_FLAGS).cloned().collect())
                .unwrap_or_default(),
            confidence_percent: analysis.map(AiAnalysis::confidence_percent),
            analyzing,
        }
    }

    pub fn badge(&self) -> &'static str {
        if self.analyzed { "Analyzed" } else { "Pending" }
    }

    pub fn has_concerns(&self) -> bool {
        !self.red_flags.is_empty()
    }
}

/// A finished panel operation, reported once by [`AnalysisPanel::poll`].
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    Analyzed {
        document_id: String,
        result: Result<(), BackendError>,
    },
    Uploaded(Result<Document, BackendError>),
}

pub struct AnalysisPanel {
    deal_id: String,
    documents: Vec<Document>,
    backend: Arc<dyn MarketplaceBackend>,
    analyses: HashMap<String, OperationHandle<AiAnalysis>>,
    uploads: Vec<OperationHandle<Document>>,
    expected_duration: Duration,
}

impl AnalysisPanel {
    pub fn new(
        deal_id: impl Into<String>,
        documents: Vec<Document>,
        backend: Arc<dyn MarketplaceBackend>,
    ) -> Self {
        Self {
            deal_id: deal_id.into(),
            documents,
            backend,
            analyses: HashMap::new(),
            uploads: Vec::new(),
            expected_duration: Duration::from_secs(3),
        }
    }

    /// Builder: typical operation time, used only to pace progress bars.
    pub fn with_expected_duration(mut self, expected: Duration) -> Self {
        self.expected_duration = expected;
        self
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Give the document list back, aborting any running operations.
    pub fn into_documents(mut self) -> Vec<Document> {
        self.cancel_all();
        self.documents
    }

    pub fn document(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    /// Start analyzing a document.
    pub fn request_analysis(&mut self, document_id: &str) -> Result<(), AnalysisError> {
        let document = self
            .document(document_id)
            .cloned()
            .ok_or_else(|| AnalysisError::DocumentNotFound {
                id: document_id.to_string(),
            })?;
        if self.is_analyzing(document_id) {
            return Err(AnalysisError::AlreadyAnalyzing {
                id: document_id.to_string(),
            });
        }

        info!(document_id, name = %document.name, "Document analysis started");
        let backend = Arc::clone(&self.backend);
        let handle = OperationHandle::spawn(format!("analyze {document_id}"), async move {
            backend.request_analysis(&document).await
        });
        self.analyses.insert(document_id.to_string(), handle);
        Ok(())
    }

    /// Start uploading a file into the deal's document list.
    pub fn upload_document(&mut self, file: FileHandle) {
        info!(deal_id = %self.deal_id, file = %file.name, size = file.size, "Document upload started");
        let backend = Arc::clone(&self.backend);
        let deal_id = self.deal_id.clone();
        let label = format!("upload {}", file.name);
        self.uploads.push(OperationHandle::spawn(label, async move {
            backend.upload_document(&deal_id, None, file).await
        }));
    }

    pub fn is_analyzing(&self, document_id: &str) -> bool {
        self.analyses
            .get(document_id)
            .is_some_and(|h| h.status() == OperationStatus::Running)
    }

    pub fn is_uploading(&self) -> bool {
        self.uploads
            .iter()
            .any(|h| h.status() == OperationStatus::Running)
    }

    /// Progress of a running analysis, in percent.
    pub fn analysis_progress(&self, document_id: &str) -> Option<f64> {
        self.analyses
            .get(document_id)
            .filter(|h| h.status() == OperationStatus::Running)
            .map(|h| h.progress_estimate(self.expected_duration))
    }

    /// Progress of the slowest running upload, in percent.
    pub fn upload_progress(&self) -> Option<f64> {
        self.uploads
            .iter()
            .filter(|h| h.status() == OperationStatus::Running)
            .map(|h| h.progress_estimate(self.expected_duration))
            .reduce(f64::min)
    }

    /// Collect finished operations and fold their results into the list.
    pub fn poll(&mut self) -> Vec<PanelEvent> {
        let mut events = Vec::new();

        let finished: Vec<String> = self
            .analyses
            .iter_mut()
            .filter_map(|(id, h)| h.poll().is_terminal().then(|| id.clone()))
            .collect();
        for document_id in finished {
            let Some(outcome) = self
                .analyses
                .remove(&document_id)
                .and_then(|mut h| h.take_outcome())
            else {
                continue;
            };
            let result = match outcome {
                Ok(analysis) => match self.documents.iter_mut().find(|d| d.id == document_id) {
                    Some(doc) => {
                        info!(
                            document_id = %document_id,
                            confidence = analysis.confidence(),
                            "Document analysis finished"
                        );
                        doc.ai_analysis = Some(analysis);
                        Ok(())
                    }
                    None => {
                        warn!(document_id = %document_id, "Analyzed document no longer listed");
                        Ok(())
                    }
                },
                Err(e) => Err(e),
            };
            events.push(PanelEvent::Analyzed {
                document_id,
                result,
            });
        }

        let mut running = Vec::with_capacity(self.uploads.len());
        for mut handle in std::mem::take(&mut self.uploads) {
            if !handle.poll().is_terminal() {
                running.push(handle);
                continue;
            }
            if let Some(result) = handle.take_outcome() {
                if let Ok(doc) = &result {
                    info!(document_id = %doc.id, name = %doc.name, "Document uploaded");
                    self.documents.push(doc.clone());
                }
                events.push(PanelEvent::Uploaded(result));
            }
        }
        self.uploads = running;

        events
    }

    /// The four headline cards.
    pub fn overview(&self) -> Vec<OverviewCard> {
        vec![
            OverviewCard {
                title: "AI Models",
                value: "3".to_string(),
                caption: "Active analyzers",
            },
            OverviewCard {
                title: "Accuracy",
                value: "94%".to_string(),
                caption: "Analysis accuracy",
            },
            OverviewCard {
                title: "Speed",
                value: "2min".to_string(),
                caption: "Avg analysis time",
            },
            OverviewCard {
                title: "Documents",
                value: self.documents.len().to_string(),
                caption: "Total uploaded",
            },
        ]
    }

    pub fn summaries(&self) -> Vec<DocumentSummary> {
        self.documents
            .iter()
            .map(|d| DocumentSummary::from_document(d, self.is_analyzing(&d.id)))
            .collect()
    }

    /// Abort every running operation.
    pub fn cancel_all(&mut self) {
        for handle in self.analyses.values_mut() {
            handle.cancel();
        }
        for handle in &mut self.uploads {
            handle.cancel();
        }
        self.analyses.clear();
        self.uploads.clear();
    }
}
