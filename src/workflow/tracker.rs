//! Workflow tracker: progress, time-remaining estimate and per-step detail
//! views over a deal, plus upload and "mark complete" actions.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::analysis::{AiAnalysis, Document, OperationHandle, OperationStatus};
use crate::backend::{FileHandle, MarketplaceBackend};
use crate::error::{BackendError, WorkflowError};

use super::catalog::{
    ACQUISITION_STEPS, OPTIONAL_FINANCIAL_DOCUMENTS, REQUIRED_FINANCIAL_DOCUMENTS, VALUATION_CARDS,
    ValuationCard, WorkflowStepDef, find_step,
};
use super::model::{Deal, StepStatus};

/// Step-specific body of the detail pane.
#[derive(Debug, Clone, PartialEq)]
pub enum StepDetail {
    /// Document checklist for financial disclosure.
    Documents {
        required: &'static [&'static str],
        optional: &'static [&'static str],
    },
    /// Due diligence, with the step's analysis when one exists.
    Analysis(Option<AiAnalysis>),
    Valuation(&'static [ValuationCard]),
    /// Any other catalog step.
    Summary {
        description: &'static str,
        estimated_days: u32,
    },
    /// The id is not in the catalog.
    Unknown,
}

/// Everything the detail pane shows for the selected step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepView {
    pub id: String,
    pub name: String,
    pub status: StepStatus,
    pub detail: StepDetail,
    /// Documents attached to the step.
    pub documents: Vec<String>,
    /// Upload and mark-complete are offered.
    pub actionable: bool,
    pub uploading: bool,
}

/// One row of the step list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRow {
    pub def: &'static WorkflowStepDef,
    pub status: StepStatus,
    pub selected: bool,
}

/// A request to complete a step. The tracker does not change the deal;
/// whoever owns the deal decides, then calls [`WorkflowTracker::apply_status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepCompletion {
    pub deal_id: String,
    pub step_id: String,
}

/// A finished upload, reported once by [`WorkflowTracker::poll_uploads`].
#[derive(Debug, Clone, PartialEq)]
pub struct UploadEvent {
    pub step_id: String,
    pub result: Result<Document, BackendError>,
}

pub struct WorkflowTracker {
    deal: Deal,
    backend: Arc<dyn MarketplaceBackend>,
    selected: Option<String>,
    uploads: HashMap<String, OperationHandle<Document>>,
}

impl WorkflowTracker {
    pub fn new(deal: Deal, backend: Arc<dyn MarketplaceBackend>) -> Self {
        Self {
            deal,
            backend,
            selected: None,
            uploads: HashMap::new(),
        }
    }

    pub fn deal(&self) -> &Deal {
        &self.deal
    }

    /// Give the deal back, aborting any running uploads.
    pub fn into_deal(mut self) -> Deal {
        self.cancel_uploads();
        self.deal
    }

    /// Focus the detail pane on a step. Any id is accepted.
    pub fn select_step(&mut self, id: &str) {
        debug!(step_id = id, "Workflow step selected");
        self.selected = Some(id.to_string());
    }

    pub fn selected_step(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Percent of catalog steps completed.
    pub fn progress(&self) -> f64 {
        if ACQUISITION_STEPS.is_empty() {
            return 0.0;
        }
        self.deal.completed_count() as f64 / ACQUISITION_STEPS.len() as f64 * 100.0
    }

    /// Sum of day estimates for every step not yet completed.
    pub fn estimate_remaining_days(&self) -> u32 {
        ACQUISITION_STEPS
            .iter()
            .filter(|def| self.deal.step_status(def.id) != StepStatus::Completed)
            .map(|def| def.estimated_days)
            .sum()
    }

    pub fn rows(&self) -> Vec<StepRow> {
        ACQUISITION_STEPS
            .iter()
            .map(|def| StepRow {
                def,
                status: self.deal.step_status(def.id),
                selected: self.selected.as_deref() == Some(def.id),
            })
            .collect()
    }

    /// Detail of the selected step, `None` when nothing is selected.
    pub fn selected_view(&self) -> Option<StepView> {
        self.selected.as_deref().map(|id| self.step_view(id))
    }

    /// Detail of any step. Ids outside the catalog get an inert fallback.
    pub fn step_view(&self, id: &str) -> StepView {
        let status = self.deal.step_status(id);
        let step = self.deal.step(id);
        let Some(def) = find_step(id) else {
            return StepView {
                id: id.to_string(),
                name: id.to_string(),
                status,
                detail: StepDetail::Unknown,
                documents: Vec::new(),
                actionable: false,
                uploading: false,
            };
        };

        let detail = match def.id {
            "financial-disclosure" => StepDetail::Documents {
                required: REQUIRED_FINANCIAL_DOCUMENTS,
                optional: OPTIONAL_FINANCIAL_DOCUMENTS,
            },
            "due-diligence" => StepDetail::Analysis(step.and_then(|s| s.ai_analysis.clone())),
            "valuation" => StepDetail::Valuation(VALUATION_CARDS),
            _ => StepDetail::Summary {
                description: def.description,
                estimated_days: def.estimated_days,
            },
        };

        StepView {
            id: def.id.to_string(),
            name: def.name.to_string(),
            status,
            detail,
            documents: step.map(|s| s.documents.clone()).unwrap_or_default(),
            actionable: status != StepStatus::Completed,
            uploading: self.is_uploading(def.id),
        }
    }

    /// Request completion of a step. The deal is not modified.
    pub fn mark_step_complete(&self, id: &str) -> Result<StepCompletion, WorkflowError> {
        if find_step(id).is_none() {
            return Err(WorkflowError::UnknownStep { id: id.to_string() });
        }
        if self.deal.step_status(id) == StepStatus::Completed {
            return Err(WorkflowError::AlreadyCompleted { id: id.to_string() });
        }
        if self.is_uploading(id) {
            return Err(WorkflowError::UploadInProgress { id: id.to_string() });
        }
        info!(deal_id = %self.deal.id, step_id = id, "Step completion requested");
        Ok(StepCompletion {
            deal_id: self.deal.id.clone(),
            step_id: id.to_string(),
        })
    }

    /// Record a status decided by the deal's owner.
    pub fn apply_status(&mut self, id: &str, status: StepStatus) -> Result<(), WorkflowError> {
        self.deal.set_step_status(id, status)
    }

    /// Start uploading a file for a step. The step shows as uploading until
    /// the backend answers.
    pub fn upload_document(&mut self, step_id: &str, file: FileHandle) -> Result<(), WorkflowError> {
        if find_step(step_id).is_none() {
            return Err(WorkflowError::UnknownStep {
                id: step_id.to_string(),
            });
        }
        if self.deal.step_status(step_id) == StepStatus::Completed {
            return Err(WorkflowError::AlreadyCompleted {
                id: step_id.to_string(),
            });
        }
        if self.is_uploading(step_id) {
            return Err(WorkflowError::UploadInProgress {
                id: step_id.to_string(),
            });
        }

        info!(deal_id = %self.deal.id, step_id, file = %file.name, "Step document upload started");
        let backend = Arc::clone(&self.backend);
        let deal_id = self.deal.id.clone();
        let step = step_id.to_string();
        let handle = OperationHandle::spawn(format!("upload {}", file.name), async move {
            backend.upload_document(&deal_id, Some(step.as_str()), file).await
        });
        self.uploads.insert(step_id.to_string(), handle);
        Ok(())
    }

    pub fn is_uploading(&self, step_id: &str) -> bool {
        self.uploads
            .get(step_id)
            .is_some_and(|h| h.status() == OperationStatus::Running)
    }

    /// Collect finished uploads. Successful ones are attached to the deal.
    pub fn poll_uploads(&mut self) -> Vec<UploadEvent> {
        let finished: Vec<String> = self
            .uploads
            .iter_mut()
            .filter_map(|(step, handle)| handle.poll().is_terminal().then(|| step.clone()))
            .collect();

        let mut events = Vec::with_capacity(finished.len());
        for step_id in finished {
            let Some(mut handle) = self.uploads.remove(&step_id) else {
                continue;
            };
            let Some(result) = handle.take_outcome() else {
                continue;
            };
            if let Ok(document) = &result {
                if let Err(e) = self.deal.attach_document(document.clone(), Some(&step_id)) {
                    tracing::warn!(step_id = %step_id, error = %e, "Uploaded document not attached");
                }
                info!(step_id = %step_id, document_id = %document.id, "Step document uploaded");
            }
            events.push(UploadEvent { step_id, result });
        }
        events
    }

    /// Abort every running upload.
    pub fn cancel_uploads(&mut self) {
        for handle in self.uploads.values_mut() {
            handle.cancel();
        }
        self.uploads.clear();
    }
}
