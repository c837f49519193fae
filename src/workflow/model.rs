//! Deal and deal-step records.
//!
//! A [`Deal`] always holds exactly one [`DealStep`] per catalog entry, in
//! catalog order, and its current step is always one of them. Both hold
//! after construction, after every mutator, and after deserialization.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analysis::{AiAnalysis, Document};
use crate::error::WorkflowError;

use super::catalog::{ACQUISITION_STEPS, WorkflowStepDef};

labelled_enum! {
    #[derive(Default)]
    pub enum StepStatus {
        #[default]
        Pending => ("pending", "Pending"),
        InProgress => ("in-progress", "In Progress"),
        Completed => ("completed", "Completed"),
        Blocked => ("blocked", "Blocked"),
    }
}

labelled_enum! {
    pub enum DealStatus {
        Negotiating => ("negotiating", "Negotiating"),
        DueDiligence => ("due-diligence", "Due Diligence"),
        LegalReview => ("legal-review", "Legal Review"),
        Closing => ("closing", "Closing"),
        Completed => ("completed", "Completed"),
        Cancelled => ("cancelled", "Cancelled"),
    }
}

/// Live state of one workflow step within a deal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealStep {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: StepStatus,
    #[serde(default)]
    pub assigned_to: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<AiAnalysis>,
    /// Ids of documents attached to this step.
    #[serde(default)]
    pub documents: Vec<String>,
}

impl DealStep {
    /// A pending step for a catalog entry.
    pub fn from_def(def: &WorkflowStepDef) -> Self {
        Self {
            id: def.id.to_string(),
            name: def.name.to_string(),
            description: def.description.to_string(),
            status: StepStatus::Pending,
            assigned_to: Vec::new(),
            due_date: None,
            completed_at: None,
            ai_analysis: None,
            documents: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: StepStatus) -> Self {
        self.set_status(status);
        self
    }

    pub fn with_assignees<I, S>(mut self, assignees: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assigned_to = assignees.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_analysis(mut self, analysis: AiAnalysis) -> Self {
        self.ai_analysis = Some(analysis);
        self
    }

    /// Set status; entering `Completed` stamps `completed_at`, leaving it
    /// clears the stamp.
    pub fn set_status(&mut self, status: StepStatus) {
        if status == StepStatus::Completed {
            if self.completed_at.is_none() {
                self.completed_at = Some(Utc::now());
            }
        } else {
            self.completed_at = None;
        }
        self.status = status;
    }

    pub fn is_completed(&self) -> bool {
        self.status == StepStatus::Completed
    }
}

/// An acquisition in progress between a buyer and a seller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DealRecord")]
pub struct Deal {
    pub id: String,
    pub match_id: String,
    pub buyer_id: String,
    pub seller_id: String,
    pub status: DealStatus,
    current_step: String,
    steps: Vec<DealStep>,
    pub documents: Vec<Document>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_close_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agreed_price: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Deal {
    /// A new deal with every catalog step pending, positioned on the first.
    pub fn new(
        id: impl Into<String>,
        match_id: impl Into<String>,
        buyer_id: impl Into<String>,
        seller_id: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            match_id: match_id.into(),
            buyer_id: buyer_id.into(),
            seller_id: seller_id.into(),
            status: DealStatus::Negotiating,
            current_step: ACQUISITION_STEPS[0].id.to_string(),
            steps: ACQUISITION_STEPS.iter().map(DealStep::from_def).collect(),
            documents: Vec::new(),
            target_close_date: None,
            agreed_price: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_status(mut self, status: DealStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_documents(mut self, documents: Vec<Document>) -> Self {
        self.documents = documents;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = created_at;
        self
    }

    /// Replace catalog steps with the supplied live records, matched by id.
    ///
    /// Steps not mentioned stay as they are. Unknown or repeated ids are
    /// rejected and leave the deal unchanged.
    pub fn with_steps(mut self, overrides: Vec<DealStep>) -> Result<Self, WorkflowError> {
        let mut seen: Vec<&str> = Vec::with_capacity(overrides.len());
        for step in &overrides {
            if !self.steps.iter().any(|s| s.id == step.id) {
                return Err(WorkflowError::UnknownStep {
                    id: step.id.clone(),
                });
            }
            if seen.contains(&step.id.as_str()) {
                return Err(WorkflowError::DuplicateStep {
                    id: step.id.clone(),
                });
            }
            seen.push(&step.id);
        }
        for step in overrides {
            if let Some(slot) = self.steps.iter_mut().find(|s| s.id == step.id) {
                *slot = step;
            }
        }
        Ok(self)
    }

    /// Builder form of [`Deal::set_current_step`].
    pub fn with_current_step(mut self, id: &str) -> Result<Self, WorkflowError> {
        self.set_current_step(id)?;
        Ok(self)
    }

    pub fn steps(&self) -> &[DealStep] {
        &self.steps
    }

    pub fn step(&self, id: &str) -> Option<&DealStep> {
        self.steps.iter().find(|s| s.id == id)
    }

    fn step_mut(&mut self, id: &str) -> Result<&mut DealStep, WorkflowError> {
        self.steps
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| WorkflowError::UnknownStep { id: id.to_string() })
    }

    /// Status of a step, `Pending` for ids the deal does not know.
    pub fn step_status(&self, id: &str) -> StepStatus {
        self.step(id).map(|s| s.status).unwrap_or_default()
    }

    pub fn current_step_id(&self) -> &str {
        &self.current_step
    }

    pub fn current_step(&self) -> Option<&DealStep> {
        self.step(&self.current_step)
    }

    pub fn set_current_step(&mut self, id: &str) -> Result<(), WorkflowError> {
        if self.step(id).is_none() {
            return Err(WorkflowError::CurrentStepMissing { id: id.to_string() });
        }
        self.current_step = id.to_string();
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn set_step_status(&mut self, id: &str, status: StepStatus) -> Result<(), WorkflowError> {
        self.step_mut(id)?.set_status(status);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Attach a document to the deal, and to a step when one is given.
    pub fn attach_document(
        &mut self,
        document: Document,
        step_id: Option<&str>,
    ) -> Result<(), WorkflowError> {
        if let Some(step_id) = step_id {
            self.step_mut(step_id)?.documents.push(document.id.clone());
        }
        self.documents.push(document);
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn completed_count(&self) -> usize {
        self.steps.iter().filter(|s| s.is_completed()).count()
    }

    fn validate(&self) -> Result<(), WorkflowError> {
        if self.steps.len() != ACQUISITION_STEPS.len() {
            let missing = ACQUISITION_STEPS
                .iter()
                .find(|def| !self.steps.iter().any(|s| s.id == def.id));
            if let Some(def) = missing {
                return Err(WorkflowError::UnknownStep {
                    id: def.id.to_string(),
                });
            }
        }
        for (step, def) in self.steps.iter().zip(ACQUISITION_STEPS) {
            if step.id != def.id {
                return Err(WorkflowError::UnknownStep {
                    id: step.id.clone(),
                });
            }
        }
        if self.step(&self.current_step).is_none() {
            return Err(WorkflowError::CurrentStepMissing {
                id: self.current_step.clone(),
            });
        }
        Ok(())
    }
}

/// Wire shape of a deal. Steps may be sparse; missing catalog steps are
/// filled in as pending.
#[derive(Deserialize)]
struct DealRecord {
    id: String,
    match_id: String,
    buyer_id: String,
    seller_id: String,
    status: DealStatus,
    current_step: String,
    #[serde(default)]
    steps: Vec<DealStep>,
    #[serde(default)]
    documents: Vec<Document>,
    #[serde(default)]
    target_close_date: Option<DateTime<Utc>>,
    #[serde(default)]
    agreed_price: Option<Decimal>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<DealRecord> for Deal {
    type Error = WorkflowError;

    fn try_from(raw: DealRecord) -> Result<Self, Self::Error> {
        let mut deal = Deal::new(raw.id, raw.match_id, raw.buyer_id, raw.seller_id)
            .with_status(raw.status)
            .with_documents(raw.documents)
            .with_steps(raw.steps)?
            .with_current_step(&raw.current_step)?;
        deal.target_close_date = raw.target_close_date;
        deal.agreed_price = raw.agreed_price;
        deal.created_at = raw.created_at;
        deal.updated_at = raw.updated_at;
        deal.validate()?;
        Ok(deal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deal() -> Deal {
        Deal::new("deal-9", "match-9", "buyer-1", "seller-1")
    }

    #[test]
    fn step_status_defaults_to_pending() {
        assert_eq!(StepStatus::default(), StepStatus::Pending);
        let status: StepStatus = serde_json::from_str("\"blocked\"").unwrap();
        assert_eq!(status, StepStatus::Blocked);
    }

    #[test]
    fn new_deal_has_every_catalog_step_pending() {
        let deal = deal();
        assert_eq!(deal.steps().len(), ACQUISITION_STEPS.len());
        assert!(deal.steps().iter().all(|s| s.status == StepStatus::Pending));
        assert_eq!(deal.current_step_id(), "initial-discussion");
        assert!(deal.validate().is_ok());
    }

    #[test]
    fn with_steps_rejects_unknown_and_duplicate_ids() {
        let stray = DealStep::from_def(&WorkflowStepDef {
            id: "escrow",
            name: "Escrow",
            description: "",
            estimated_days: 1,
        });
        assert_eq!(
            deal().with_steps(vec![stray]).unwrap_err(),
            WorkflowError::UnknownStep { id: "escrow".into() }
        );

        let nda = DealStep::from_def(&ACQUISITION_STEPS[1]);
        assert_eq!(
            deal().with_steps(vec![nda.clone(), nda]).unwrap_err(),
            WorkflowError::DuplicateStep { id: "nda-signing".into() }
        );
    }

    #[test]
    fn with_steps_keeps_catalog_order() {
        let closing = DealStep::from_def(&ACQUISITION_STEPS[6]).with_status(StepStatus::Blocked);
        let deal = deal().with_steps(vec![closing]).unwrap();
        assert_eq!(deal.steps()[6].status, StepStatus::Blocked);
        assert_eq!(deal.steps()[0].id, "initial-discussion");
    }

    #[test]
    fn current_step_must_be_a_member() {
        let mut deal = deal();
        assert_eq!(
            deal.set_current_step("escrow").unwrap_err(),
            WorkflowError::CurrentStepMissing { id: "escrow".into() }
        );
        assert_eq!(deal.current_step_id(), "initial-discussion");
        deal.set_current_step("valuation").unwrap();
        assert_eq!(deal.current_step().unwrap().name, "Valuation & Negotiation");
    }

    #[test]
    fn completing_a_step_stamps_completion_time() {
        let mut deal = deal();
        deal.set_step_status("nda-signing", StepStatus::Completed).unwrap();
        assert!(deal.step("nda-signing").unwrap().completed_at.is_some());
        deal.set_step_status("nda-signing", StepStatus::InProgress).unwrap();
        assert!(deal.step("nda-signing").unwrap().completed_at.is_none());
        assert!(deal.set_step_status("escrow", StepStatus::Completed).is_err());
    }

    #[test]
    fn unknown_step_status_defaults_to_pending() {
        assert_eq!(deal().step_status("escrow"), StepStatus::Pending);
    }

    #[test]
    fn deserialize_fills_sparse_steps() {
        let json = serde_json::json!({
            "id": "deal-1",
            "match_id": "match-1",
            "buyer_id": "buyer-1",
            "seller_id": "seller-1",
            "status": "due-diligence",
            "current_step": "due-diligence",
            "steps": [
                { "id": "due-diligence", "name": "Due Diligence",
                  "description": "Comprehensive business review", "status": "in-progress" }
            ],
            "created_at": "2024-02-01T00:00:00Z",
            "updated_at": "2024-02-01T00:00:00Z"
        });
        let deal: Deal = serde_json::from_value(json).unwrap();
        assert_eq!(deal.steps().len(), 7);
        assert_eq!(deal.step_status("due-diligence"), StepStatus::InProgress);
        assert_eq!(deal.status, DealStatus::DueDiligence);
    }

    #[test]
    fn deserialize_rejects_foreign_current_step() {
        let json = serde_json::json!({
            "id": "deal-1",
            "match_id": "match-1",
            "buyer_id": "buyer-1",
            "seller_id": "seller-1",
            "status": "negotiating",
            "current_step": "escrow",
            "created_at": "2024-02-01T00:00:00Z",
            "updated_at": "2024-02-01T00:00:00Z"
        });
        assert!(serde_json::from_value::<Deal>(json).is_err());
    }

    #[test]
    fn serialized_round_trip_preserves_deal() {
        let deal = deal()
            .with_steps(vec![
                DealStep::from_def(&ACQUISITION_STEPS[0]).with_status(StepStatus::Completed),
            ])
            .unwrap();
        let json = serde_json::to_string(&deal).unwrap();
        let back: Deal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, deal);
    }
}
