//! Marketplace backend: the sink for every user intent that leaves the
//! core (completed onboarding, step completion, uploads, analysis requests,
//! buyer decisions).
//!
//! [`DemoBackend`] stands in for a real service: it logs each request,
//! waits a configurable latency, and answers with canned results.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::{AiAnalysis, AnalysisType, Document, DocumentType};
use crate::error::BackendError;
use crate::fixtures;
use crate::profiles::{MatchDecision, Profile};

/// An opaque reference to a user-selected file. The core never reads the
/// file's contents; it only forwards the handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

impl FileHandle {
    /// Describe an existing file from its metadata.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let metadata = tokio::fs::metadata(&path).await?;
        if !metadata.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            mime_type: mime_type_for(&path).to_string(),
            name,
            size: metadata.len(),
            path,
        })
    }
}

fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "csv" => "text/csv",
        "txt" | "md" => "text/plain",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// Guess a document category from its file name.
pub fn classify_document(name: &str) -> DocumentType {
    let lower = name.to_ascii_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| lower.contains(w));
    if has(&["financial", "p&l", "profit", "balance", "cash", "tax", "revenue", "accounts"]) {
        DocumentType::Financial
    } else if has(&["contract", "agreement", "nda", "legal", "lease", "license", "policy"]) {
        DocumentType::Legal
    } else if has(&["operations", "process", "employee", "org", "inventory", "supplier"]) {
        DocumentType::Operational
    } else {
        DocumentType::Other
    }
}

/// Every request that reaches a backend, for logging and assertions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackendEvent {
    OnboardingCompleted { profile: Profile },
    StepCompleted { deal_id: String, step_id: String },
    DocumentUploaded { deal_id: String, step_id: Option<String>, document_id: String },
    AnalysisRequested { document_id: String },
    BuyerDecision { buyer_id: String, decision: MatchDecision },
}

/// Destination for user intents.
///
/// Implementations talk to whatever persists deals and profiles. Every
/// method may fail; callers surface the failure instead of assuming success.
#[async_trait]
pub trait MarketplaceBackend: Send + Sync {
    /// A wizard finished and produced a profile.
    async fn complete_onboarding(&self, profile: Profile) -> Result<(), BackendError>;

    /// The user asked to mark a deal step complete.
    async fn complete_step(&self, deal_id: &str, step_id: &str) -> Result<(), BackendError>;

    /// Upload a file, optionally attached to a deal step.
    async fn upload_document(
        &self,
        deal_id: &str,
        step_id: Option<&str>,
        file: FileHandle,
    ) -> Result<Document, BackendError>;

    /// Analyze a previously uploaded document.
    async fn request_analysis(&self, document: &Document) -> Result<AiAnalysis, BackendError>;

    /// A seller accepted or rejected a buyer.
    async fn respond_to_buyer(
        &self,
        buyer_id: &str,
        decision: MatchDecision,
    ) -> Result<(), BackendError>;
}

/// In-process backend with canned responses.
pub struct DemoBackend {
    user_id: String,
    latency: Duration,
    failing: HashSet<String>,
    events: Mutex<Vec<BackendEvent>>,
}

impl DemoBackend {
    pub fn new(latency: Duration) -> Self {
        Self {
            user_id: "seller-1".to_string(),
            latency,
            failing: HashSet::new(),
            events: Mutex::new(Vec::new()),
        }
    }

    /// Builder: the user recorded as uploader.
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Builder: make requests about `id` fail. Matches document ids, step
    /// ids, buyer ids and file names.
    pub fn with_failure(mut self, id: impl Into<String>) -> Self {
        self.failing.insert(id.into());
        self
    }

    /// Requests received so far, in order.
    pub fn events(&self) -> Vec<BackendEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    fn record(&self, event: BackendEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    async fn respond(&self, operation: &str, subject: &str) -> Result<(), BackendError> {
        tokio::time::sleep(self.latency).await;
        if self.failing.contains(subject) {
            warn!(operation, subject, "Demo backend failing request");
            return Err(BackendError::RequestFailed {
                operation: operation.to_string(),
                reason: format!("demo backend configured to fail '{subject}'"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl MarketplaceBackend for DemoBackend {
    async fn complete_onboarding(&self, profile: Profile) -> Result<(), BackendError> {
        info!(
            user_id = %profile.id(),
            role = %profile.role(),
            "Onboarding completed"
        );
        self.respond("complete_onboarding", profile.id()).await?;
        self.record(BackendEvent::OnboardingCompleted { profile });
        Ok(())
    }

    async fn complete_step(&self, deal_id: &str, step_id: &str) -> Result<(), BackendError> {
        info!(deal_id, step_id, "Step completion requested");
        self.respond("complete_step", step_id).await?;
        self.record(BackendEvent::StepCompleted {
            deal_id: deal_id.to_string(),
            step_id: step_id.to_string(),
        });
        Ok(())
    }

    async fn upload_document(
        &self,
        deal_id: &str,
        step_id: Option<&str>,
        file: FileHandle,
    ) -> Result<Document, BackendError> {
        info!(deal_id, step_id, file = %file.name, size = file.size, "Document upload started");
        self.respond("upload_document", &file.name).await?;

        let id = format!("doc-{}", Uuid::new_v4());
        let document = Document::new(&id, deal_id, &file.name, classify_document(&file.name))
            .with_uploader(&self.user_id)
            .with_file(file.size, file.mime_type, format!("/uploads/{id}"))
            .with_uploaded_at(Utc::now());
        self.record(BackendEvent::DocumentUploaded {
            deal_id: deal_id.to_string(),
            step_id: step_id.map(str::to_string),
            document_id: id,
        });
        Ok(document)
    }

    async fn request_analysis(&self, document: &Document) -> Result<AiAnalysis, BackendError> {
        info!(document_id = %document.id, name = %document.name, "Analysis requested");
        self.respond("request_analysis", &document.id).await?;
        self.record(BackendEvent::AnalysisRequested {
            document_id: document.id.clone(),
        });

        let analysis = match document.doc_type {
            DocumentType::Financial => fixtures::financial_statements_analysis(),
            _ => AiAnalysis::new(
                format!("analysis-{}", Uuid::new_v4()),
                AnalysisType::RiskAssessment,
                format!("{} reviewed; no material issues detected.", document.name),
            )
            .with_findings([format!("{} document is complete and legible", document.doc_type.label())])
            .with_recommendations(["Have counsel review before closing"])
            .with_confidence(0.8),
        };
        let mut analysis = analysis
            .with_document(&document.id)
            .with_created_at(Utc::now());
        analysis.id = format!("analysis-{}", Uuid::new_v4());
        Ok(analysis)
    }

    async fn respond_to_buyer(
        &self,
        buyer_id: &str,
        decision: MatchDecision,
    ) -> Result<(), BackendError> {
        info!(buyer_id, %decision, "Buyer decision recorded");
        self.respond("respond_to_buyer", buyer_id).await?;
        self.record(BackendEvent::BuyerDecision {
            buyer_id: buyer_id.to_string(),
            decision,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn backend() -> DemoBackend {
        DemoBackend::new(Duration::ZERO)
    }

    #[test]
    fn classifies_by_name() {
        assert_eq!(classify_document("P&L 2023.pdf"), DocumentType::Financial);
        assert_eq!(classify_document("Customer Contracts.pdf"), DocumentType::Legal);
        assert_eq!(classify_document("Employee handbook.docx"), DocumentType::Operational);
        assert_eq!(classify_document("photo.png"), DocumentType::Other);
    }

    #[tokio::test]
    async fn file_handle_reads_metadata() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(&[0u8; 2048]).unwrap();
        let handle = FileHandle::from_path(file.path()).await.unwrap();
        assert_eq!(handle.size, 2048);
        assert_eq!(handle.mime_type, "application/pdf");
        assert!(handle.name.ends_with(".pdf"));
    }

    #[tokio::test]
    async fn file_handle_rejects_directories_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FileHandle::from_path(dir.path()).await.is_err());
        assert!(FileHandle::from_path(dir.path().join("nope.pdf")).await.is_err());
    }

    #[tokio::test]
    async fn upload_returns_document_and_records_event() {
        let backend = backend().with_user("seller-7");
        let file = FileHandle {
            path: PathBuf::from("/tmp/Balance Sheet.pdf"),
            name: "Balance Sheet.pdf".into(),
            size: 1_000,
            mime_type: "application/pdf".into(),
        };
        let doc = backend
            .upload_document("deal-1", Some("financial-disclosure"), file)
            .await
            .unwrap();
        assert_eq!(doc.doc_type, DocumentType::Financial);
        assert_eq!(doc.uploaded_by, "seller-7");
        assert!(doc.id.starts_with("doc-"));
        assert!(matches!(
            backend.events().as_slice(),
            [BackendEvent::DocumentUploaded { step_id: Some(s), .. }] if s == "financial-disclosure"
        ));
    }

    #[tokio::test]
    async fn analysis_is_linked_to_document() {
        let backend = backend();
        let doc = Document::new("doc-5", "deal-1", "Lease", DocumentType::Legal);
        let analysis = backend.request_analysis(&doc).await.unwrap();
        assert_eq!(analysis.document_id.as_deref(), Some("doc-5"));
        assert_eq!(analysis.analysis_type, AnalysisType::RiskAssessment);
    }

    #[tokio::test]
    async fn configured_failures_are_reported() {
        let backend = backend().with_failure("doc-2");
        let doc = Document::new("doc-2", "deal-1", "Customer Contracts", DocumentType::Legal);
        let err = backend.request_analysis(&doc).await.unwrap_err();
        assert!(matches!(err, BackendError::RequestFailed { .. }));
        assert!(backend.events().is_empty());
    }
}
