//! The view router owns the demo entities and the active screen, and turns
//! [`ViewAction`]s into screen changes and backend requests.
//!
//! Per-screen state (wizard progress, step selection, running operations)
//! lives inside [`Screen`] and is dropped when the screen is left. Deal and
//! document changes are handed back to the router first.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::{AnalysisPanel, Document, PanelEvent};
use crate::backend::MarketplaceBackend;
use crate::config::AppConfig;
use crate::error::{Error, Result, ViewError};
use crate::fixtures;
use crate::onboarding::{BUYER_STEPS, BuyerDraft, SELLER_STEPS, SellerDraft, Wizard, WizardOutcome};
use crate::profiles::{BuyerProfile, MatchDecision, Profile, Role};
use crate::workflow::{ACQUISITION_STEPS, Deal, StepStatus, WorkflowTracker};

use super::state::{ViewAction, ViewKind};

/// The active screen and its ephemeral state.
pub enum Screen {
    Landing,
    BuyerOnboarding(Wizard<BuyerDraft>),
    SellerOnboarding(Wizard<SellerDraft>),
    BuyerBrowse,
    BuyerProfile { buyer_id: String },
    Acquisition(WorkflowTracker),
    AiAnalyzer(AnalysisPanel),
}

impl Screen {
    pub fn kind(&self) -> ViewKind {
        match self {
            Self::Landing => ViewKind::Landing,
            Self::BuyerOnboarding(_) => ViewKind::BuyerOnboarding,
            Self::SellerOnboarding(_) => ViewKind::SellerOnboarding,
            Self::BuyerBrowse => ViewKind::BuyerBrowse,
            Self::BuyerProfile { .. } => ViewKind::BuyerProfile,
            Self::Acquisition(_) => ViewKind::Acquisition,
            Self::AiAnalyzer(_) => ViewKind::AiAnalyzer,
        }
    }
}

/// Result of a dispatched action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    /// Screen showing after the action.
    pub view: ViewKind,
    /// One-line message for the user, if the action produced one.
    pub notice: Option<String>,
}

pub struct ViewRouter {
    config: AppConfig,
    backend: Arc<dyn MarketplaceBackend>,
    buyers: Vec<BuyerProfile>,
    /// `None` while the acquisition screen holds the deal.
    deal: Option<Deal>,
    /// Empty while the analyzer screen holds the documents.
    documents: Vec<Document>,
    deal_id: String,
    screen: Screen,
    decisions: HashMap<String, MatchDecision>,
    profile: Option<Profile>,
}

impl ViewRouter {
    /// Router over the demo fixtures, starting on the landing screen.
    pub fn new(config: AppConfig, backend: Arc<dyn MarketplaceBackend>) -> Self {
        let deal = fixtures::mock_deal();
        Self {
            config,
            backend,
            buyers: fixtures::mock_buyers(),
            deal_id: deal.id.clone(),
            deal: Some(deal),
            documents: fixtures::mock_documents(),
            screen: Screen::Landing,
            decisions: HashMap::new(),
            profile: None,
        }
    }

    /// Builder: buyers listed on the browse screen.
    pub fn with_buyers(mut self, buyers: Vec<BuyerProfile>) -> Self {
        self.buyers = buyers;
        self
    }

    /// Builder: the deal shown on the acquisition screen.
    pub fn with_deal(mut self, deal: Deal) -> Self {
        self.deal_id = deal.id.clone();
        self.deal = Some(deal);
        self
    }

    /// Builder: documents shown on the analyzer screen.
    pub fn with_documents(mut self, documents: Vec<Document>) -> Self {
        self.documents = documents;
        self
    }

    pub fn view(&self) -> ViewKind {
        self.screen.kind()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn buyers(&self) -> &[BuyerProfile] {
        &self.buyers
    }

    pub fn buyer(&self, id: &str) -> Option<&BuyerProfile> {
        self.buyers.iter().find(|b| b.user.id == id)
    }

    /// The seller's last decision on a buyer.
    pub fn decision(&self, buyer_id: &str) -> Option<MatchDecision> {
        self.decisions.get(buyer_id).copied()
    }

    /// The profile produced by the last completed onboarding.
    pub fn completed_profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// Role chosen on the landing screen or finished in onboarding.
    pub fn role(&self) -> Option<Role> {
        match &self.screen {
            Screen::BuyerOnboarding(_) => Some(Role::Buyer),
            Screen::SellerOnboarding(_) => Some(Role::Seller),
            _ => self.profile.as_ref().map(Profile::role),
        }
    }

    pub fn deal(&self) -> Option<&Deal> {
        match &self.screen {
            Screen::Acquisition(tracker) => Some(tracker.deal()),
            _ => self.deal.as_ref(),
        }
    }

    pub fn documents(&self) -> &[Document] {
        match &self.screen {
            Screen::AiAnalyzer(panel) => panel.documents(),
            _ => &self.documents,
        }
    }

    /// Apply one user action.
    pub async fn dispatch(&mut self, action: ViewAction) -> Result<Dispatch> {
        let notice = match action {
            ViewAction::ChooseRole(role) => {
                let target = match role {
                    Role::Buyer => ViewKind::BuyerOnboarding,
                    Role::Seller => ViewKind::SellerOnboarding,
                };
                self.open(target)?;
                None
            }
            ViewAction::OpenDemo(target) => {
                if self.view() != ViewKind::Landing
                    || matches!(
                        target,
                        ViewKind::BuyerOnboarding | ViewKind::SellerOnboarding
                    )
                {
                    return Err(self.invalid(target));
                }
                self.open(target)?;
                None
            }
            ViewAction::Home => {
                if self.view() != ViewKind::Landing {
                    self.open(ViewKind::Landing)?;
                }
                None
            }
            ViewAction::Back => {
                self.back()?;
                None
            }
            ViewAction::SetField { key, value } => {
                match &mut self.screen {
                    Screen::BuyerOnboarding(wizard) => wizard.set_field(&key, &value)?,
                    Screen::SellerOnboarding(wizard) => wizard.set_field(&key, &value)?,
                    _ => return Err(self.unavailable("set")),
                }
                None
            }
            ViewAction::Next => self.next().await?,
            ViewAction::ViewBuyer(id) => {
                if self.buyer(&id).is_none() {
                    return Err(ViewError::BuyerNotFound { id }.into());
                }
                if !self.view().can_transition_to(ViewKind::BuyerProfile) {
                    return Err(self.invalid(ViewKind::BuyerProfile));
                }
                self.switch(|_| Screen::BuyerProfile { buyer_id: id });
                None
            }
            ViewAction::AcceptBuyer(id) => Some(self.decide(&id, MatchDecision::Accept).await?),
            ViewAction::RejectBuyer(id) => Some(self.decide(&id, MatchDecision::Reject).await?),
            ViewAction::SelectStep(id) => {
                let Screen::Acquisition(tracker) = &mut self.screen else {
                    return Err(self.unavailable("select"));
                };
                tracker.select_step(&id);
                None
            }
            ViewAction::CompleteStep(id) => Some(self.complete_step(&id).await?),
            ViewAction::UploadStepDocument { step_id, file } => {
                let Screen::Acquisition(tracker) = &mut self.screen else {
                    return Err(self.unavailable("upload"));
                };
                let name = file.name.clone();
                tracker.upload_document(&step_id, file)?;
                Some(format!("Uploading {name} to {step_id}..."))
            }
            ViewAction::RequestAnalysis(id) => {
                let Screen::AiAnalyzer(panel) = &mut self.screen else {
                    return Err(self.unavailable("analyze"));
                };
                panel.request_analysis(&id)?;
                Some(format!("Analyzing {id}..."))
            }
            ViewAction::UploadDocument(file) => {
                let Screen::AiAnalyzer(panel) = &mut self.screen else {
                    return Err(self.unavailable("add-doc"));
                };
                let name = file.name.clone();
                panel.upload_document(file);
                Some(format!("Uploading {name}..."))
            }
        };

        Ok(Dispatch {
            view: self.view(),
            notice,
        })
    }

    /// Collect finished uploads and analyses on the active screen.
    pub fn poll(&mut self) -> Vec<String> {
        match &mut self.screen {
            Screen::Acquisition(tracker) => tracker
                .poll_uploads()
                .into_iter()
                .map(|event| match event.result {
                    Ok(doc) => format!("Uploaded {} to {}", doc.name, event.step_id),
                    Err(e) => format!("Upload to {} failed: {e}", event.step_id),
                })
                .collect(),
            Screen::AiAnalyzer(panel) => {
                let events = panel.poll();
                events
                    .into_iter()
                    .map(|event| match event {
                        PanelEvent::Analyzed {
                            document_id,
                            result: Ok(()),
                        } => {
                            let name = panel
                                .document(&document_id)
                                .map(|d| d.name.as_str())
                                .unwrap_or(document_id.as_str());
                            format!("Analysis complete for {name}")
                        }
                        PanelEvent::Analyzed {
                            document_id,
                            result: Err(e),
                        } => format!("Analysis of {document_id} failed: {e}"),
                        PanelEvent::Uploaded(Ok(doc)) => format!("Uploaded {}", doc.name),
                        PanelEvent::Uploaded(Err(e)) => format!("Upload failed: {e}"),
                    })
                    .collect()
            }
            _ => Vec::new(),
        }
    }

    /// Whether the active screen has operations still running.
    pub fn is_busy(&self) -> bool {
        match &self.screen {
            Screen::Acquisition(tracker) => ACQUISITION_STEPS
                .iter()
                .any(|def| tracker.is_uploading(def.id)),
            Screen::AiAnalyzer(panel) => {
                panel.is_uploading()
                    || panel.documents().iter().any(|d| panel.is_analyzing(&d.id))
            }
            _ => false,
        }
    }

    /// Poll until every running operation has finished.
    pub async fn settle(&mut self) -> Vec<String> {
        let mut notices = self.poll();
        while self.is_busy() {
            tokio::time::sleep(Duration::from_millis(10)).await;
            notices.extend(self.poll());
        }
        notices
    }

    async fn next(&mut self) -> Result<Option<String>> {
        let user_id = Uuid::new_v4().to_string();
        let profile = match &mut self.screen {
            Screen::BuyerOnboarding(wizard) => match wizard.advance()? {
                WizardOutcome::Completed(draft) => Profile::Buyer(draft.into_profile(user_id)?),
                _ => return Ok(None),
            },
            Screen::SellerOnboarding(wizard) => match wizard.advance()? {
                WizardOutcome::Completed(draft) => Profile::Seller(draft.into_profile(user_id)),
                _ => return Ok(None),
            },
            _ => return Err(self.unavailable("next")),
        };

        // A failed submission keeps the wizard on its last step.
        self.backend.complete_onboarding(profile.clone()).await?;
        info!(role = %profile.role(), user_id = %profile.id(), "Profile submitted");

        let name = profile.user().full_name();
        self.profile = Some(profile);
        self.open(ViewKind::BuyerBrowse)?;
        Ok(Some(format!("Welcome {name}, your profile is complete")))
    }

    fn back(&mut self) -> Result<()> {
        let leave = match &mut self.screen {
            Screen::BuyerOnboarding(wizard) => matches!(wizard.retreat(), WizardOutcome::Cancelled),
            Screen::SellerOnboarding(wizard) => {
                matches!(wizard.retreat(), WizardOutcome::Cancelled)
            }
            _ => true,
        };
        if !leave {
            return Ok(());
        }
        let target = self
            .view()
            .back_target()
            .ok_or_else(|| self.unavailable("back"))?;
        self.open(target)
    }

    async fn decide(&mut self, buyer_id: &str, decision: MatchDecision) -> Result<String> {
        if !matches!(self.view(), ViewKind::BuyerBrowse | ViewKind::BuyerProfile) {
            return Err(self.unavailable(match decision {
                MatchDecision::Accept => "accept",
                MatchDecision::Reject => "reject",
            }));
        }
        let name = self
            .buyer(buyer_id)
            .map(|b| b.user.full_name())
            .ok_or_else(|| ViewError::BuyerNotFound {
                id: buyer_id.to_string(),
            })?;

        self.backend.respond_to_buyer(buyer_id, decision).await?;
        self.decisions.insert(buyer_id.to_string(), decision);
        Ok(match decision {
            MatchDecision::Accept => format!("Accepted {name}"),
            MatchDecision::Reject => format!("Passed on {name}"),
        })
    }

    async fn complete_step(&mut self, step_id: &str) -> Result<String> {
        let completion = match &self.screen {
            Screen::Acquisition(tracker) => tracker.mark_step_complete(step_id)?,
            _ => return Err(self.unavailable("complete")),
        };

        self.backend
            .complete_step(&completion.deal_id, &completion.step_id)
            .await?;

        let Screen::Acquisition(tracker) = &mut self.screen else {
            return Err(self.unavailable("complete"));
        };
        tracker.apply_status(&completion.step_id, StepStatus::Completed)?;
        Ok(format!("Marked {} complete", completion.step_id))
    }

    /// Move to a parameterless screen, checking the transition first.
    fn open(&mut self, target: ViewKind) -> Result<()> {
        if target == ViewKind::BuyerProfile || !self.view().can_transition_to(target) {
            return Err(self.invalid(target));
        }
        self.switch(|router| match target {
            ViewKind::BuyerOnboarding => Screen::BuyerOnboarding(
                Wizard::new(BUYER_STEPS).with_policy(router.config.validation),
            ),
            ViewKind::SellerOnboarding => Screen::SellerOnboarding(
                Wizard::new(SELLER_STEPS).with_policy(router.config.validation),
            ),
            ViewKind::BuyerBrowse => Screen::BuyerBrowse,
            ViewKind::Acquisition => {
                let deal = router.deal.take().unwrap_or_else(fixtures::mock_deal);
                Screen::Acquisition(WorkflowTracker::new(deal, Arc::clone(&router.backend)))
            }
            ViewKind::AiAnalyzer => {
                let documents = std::mem::take(&mut router.documents);
                Screen::AiAnalyzer(
                    AnalysisPanel::new(&router.deal_id, documents, Arc::clone(&router.backend))
                        .with_expected_duration(router.config.demo_latency),
                )
            }
            ViewKind::Landing | ViewKind::BuyerProfile => Screen::Landing,
        });
        Ok(())
    }

    /// Leave the active screen, then build the next one.
    fn switch(&mut self, build: impl FnOnce(&mut Self) -> Screen) {
        let from = self.view();
        self.leave();
        self.screen = build(self);
        let to = self.view();
        info!(%from, %to, "View changed");
    }

    /// Drop the active screen, taking back the deal or documents it held.
    fn leave(&mut self) {
        match std::mem::replace(&mut self.screen, Screen::Landing) {
            Screen::Acquisition(tracker) => self.deal = Some(tracker.into_deal()),
            Screen::AiAnalyzer(panel) => self.documents = panel.into_documents(),
            _ => {}
        }
    }

    fn unavailable(&self, action: &str) -> Error {
        let view = self.view();
        warn!(action, %view, "Action not available");
        ViewError::NotAvailable {
            action: action.to_string(),
            view: view.to_string(),
        }
        .into()
    }

    fn invalid(&self, to: ViewKind) -> Error {
        ViewError::InvalidTransition {
            from: self.view().to_string(),
            to: to.to_string(),
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::backend::{BackendEvent, DemoBackend, FileHandle};
    use crate::config::ValidationPolicy;
    use crate::error::WorkflowError;

    fn router_with(backend: DemoBackend) -> (ViewRouter, Arc<DemoBackend>) {
        let backend = Arc::new(backend);
        let router = ViewRouter::new(AppConfig::default(), backend.clone());
        (router, backend)
    }

    fn router() -> (ViewRouter, Arc<DemoBackend>) {
        router_with(DemoBackend::new(Duration::ZERO))
    }

    fn file(name: &str) -> FileHandle {
        FileHandle {
            path: PathBuf::from(format!("/tmp/{name}")),
            name: name.to_string(),
            size: 1_048_576,
            mime_type: "application/pdf".to_string(),
        }
    }

    fn set(key: &str, value: &str) -> ViewAction {
        ViewAction::SetField {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    #[tokio::test]
    async fn starts_on_landing() {
        let (router, _) = router();
        assert_eq!(router.view(), ViewKind::Landing);
        assert!(router.role().is_none());
        assert!(router.deal().is_some());
        assert_eq!(router.documents().len(), 2);
    }

    #[tokio::test]
    async fn seller_onboarding_completes_to_buyer_browse() {
        let (mut router, backend) = router();
        router
            .dispatch(ViewAction::ChooseRole(Role::Seller))
            .await
            .unwrap();
        assert_eq!(router.view(), ViewKind::SellerOnboarding);
        assert_eq!(router.role(), Some(Role::Seller));

        router.dispatch(set("first_name", "Sarah")).await.unwrap();
        router.dispatch(set("last_name", "Chen")).await.unwrap();
        router.dispatch(set("business.name", "TechFlow")).await.unwrap();
        router.dispatch(set("financials.annual_revenue", "1200000")).await.unwrap();
        router.dispatch(set("financials.profit", "300000")).await.unwrap();

        for _ in 0..3 {
            let dispatch = router.dispatch(ViewAction::Next).await.unwrap();
            assert_eq!(dispatch.view, ViewKind::SellerOnboarding);
            assert!(dispatch.notice.is_none());
        }
        let done = router.dispatch(ViewAction::Next).await.unwrap();
        assert_eq!(done.view, ViewKind::BuyerBrowse);
        assert!(done.notice.unwrap().contains("Sarah Chen"));

        let Some(Profile::Seller(profile)) = router.completed_profile() else {
            panic!("expected a seller profile");
        };
        assert_eq!(profile.business.name, "TechFlow");
        assert_eq!(router.role(), Some(Role::Seller));
        assert!(matches!(
            backend.events().as_slice(),
            [BackendEvent::OnboardingCompleted { .. }]
        ));
    }

    #[tokio::test]
    async fn back_from_first_onboarding_step_returns_to_landing() {
        let (mut router, _) = router();
        router
            .dispatch(ViewAction::ChooseRole(Role::Buyer))
            .await
            .unwrap();
        router.dispatch(ViewAction::Next).await.unwrap();

        let back = router.dispatch(ViewAction::Back).await.unwrap();
        assert_eq!(back.view, ViewKind::BuyerOnboarding);
        let back = router.dispatch(ViewAction::Back).await.unwrap();
        assert_eq!(back.view, ViewKind::Landing);
    }

    #[tokio::test]
    async fn strict_policy_blocks_next() {
        let backend: Arc<dyn MarketplaceBackend> = Arc::new(DemoBackend::new(Duration::ZERO));
        let config = AppConfig {
            validation: ValidationPolicy::Strict,
            ..AppConfig::default()
        };
        let mut router = ViewRouter::new(config, backend);
        router
            .dispatch(ViewAction::ChooseRole(Role::Buyer))
            .await
            .unwrap();
        let err = router.dispatch(ViewAction::Next).await.unwrap_err();
        assert!(matches!(err, Error::Wizard(_)));
        assert_eq!(router.view(), ViewKind::BuyerOnboarding);
    }

    #[tokio::test]
    async fn buyer_profile_and_decisions() {
        let (mut router, backend) = router();
        router
            .dispatch(ViewAction::OpenDemo(ViewKind::BuyerBrowse))
            .await
            .unwrap();

        let missing = router
            .dispatch(ViewAction::ViewBuyer("buyer-404".into()))
            .await
            .unwrap_err();
        assert!(matches!(missing, Error::View(ViewError::BuyerNotFound { .. })));

        router
            .dispatch(ViewAction::ViewBuyer("buyer-1".into()))
            .await
            .unwrap();
        assert!(matches!(router.screen(), Screen::BuyerProfile { buyer_id } if buyer_id == "buyer-1"));

        let accepted = router
            .dispatch(ViewAction::AcceptBuyer("buyer-1".into()))
            .await
            .unwrap();
        assert_eq!(accepted.notice.as_deref(), Some("Accepted John Investor"));
        assert_eq!(router.decision("buyer-1"), Some(MatchDecision::Accept));
        assert_eq!(
            backend.events(),
            [BackendEvent::BuyerDecision {
                buyer_id: "buyer-1".into(),
                decision: MatchDecision::Accept
            }]
        );

        let back = router.dispatch(ViewAction::Back).await.unwrap();
        assert_eq!(back.view, ViewKind::BuyerBrowse);
        let back = router.dispatch(ViewAction::Back).await.unwrap();
        assert_eq!(back.view, ViewKind::Landing);
    }

    #[tokio::test]
    async fn failed_decision_is_not_recorded() {
        let (mut router, _) = router_with(DemoBackend::new(Duration::ZERO).with_failure("buyer-1"));
        router
            .dispatch(ViewAction::OpenDemo(ViewKind::BuyerBrowse))
            .await
            .unwrap();
        let err = router
            .dispatch(ViewAction::RejectBuyer("buyer-1".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Backend(_)));
        assert!(router.decision("buyer-1").is_none());
    }

    #[tokio::test]
    async fn completed_step_survives_navigation() {
        let (mut router, backend) = router();
        router
            .dispatch(ViewAction::OpenDemo(ViewKind::Acquisition))
            .await
            .unwrap();
        router
            .dispatch(ViewAction::SelectStep("due-diligence".into()))
            .await
            .unwrap();
        let done = router
            .dispatch(ViewAction::CompleteStep("due-diligence".into()))
            .await
            .unwrap();
        assert_eq!(done.notice.as_deref(), Some("Marked due-diligence complete"));

        let again = router
            .dispatch(ViewAction::CompleteStep("due-diligence".into()))
            .await
            .unwrap_err();
        assert!(matches!(
            again,
            Error::Workflow(WorkflowError::AlreadyCompleted { .. })
        ));

        router.dispatch(ViewAction::Home).await.unwrap();
        let deal = router.deal().unwrap();
        assert_eq!(deal.step_status("due-diligence"), StepStatus::Completed);
        assert_eq!(deal.completed_count(), 4);
        assert!(matches!(
            backend.events().as_slice(),
            [BackendEvent::StepCompleted { step_id, .. }] if step_id == "due-diligence"
        ));
    }

    #[tokio::test]
    async fn step_upload_reports_when_finished() {
        let (mut router, _) = router_with(DemoBackend::new(Duration::from_millis(10)));
        router
            .dispatch(ViewAction::OpenDemo(ViewKind::Acquisition))
            .await
            .unwrap();
        router
            .dispatch(ViewAction::UploadStepDocument {
                step_id: "valuation".into(),
                file: file("Valuation Model.xlsx"),
            })
            .await
            .unwrap();
        assert!(router.is_busy());

        let notices = tokio::time::timeout(Duration::from_secs(5), router.settle())
            .await
            .expect("upload did not finish");
        assert_eq!(notices, ["Uploaded Valuation Model.xlsx to valuation"]);
        assert!(!router.is_busy());
        assert_eq!(router.deal().unwrap().step("valuation").unwrap().documents.len(), 1);
    }

    #[tokio::test]
    async fn analysis_result_is_kept_after_leaving_analyzer() {
        let (mut router, _) = router_with(DemoBackend::new(Duration::from_millis(10)));
        router
            .dispatch(ViewAction::OpenDemo(ViewKind::AiAnalyzer))
            .await
            .unwrap();
        router
            .dispatch(ViewAction::RequestAnalysis("doc-2".into()))
            .await
            .unwrap();
        let notices = tokio::time::timeout(Duration::from_secs(5), router.settle())
            .await
            .expect("analysis did not finish");
        assert_eq!(notices.len(), 1);
        assert!(notices[0].starts_with("Analysis complete for"));

        router.dispatch(ViewAction::Back).await.unwrap();
        assert_eq!(router.view(), ViewKind::Landing);
        assert!(router.documents().iter().all(|d| d.is_analyzed()));
    }

    #[tokio::test]
    async fn leaving_analyzer_cancels_running_analysis() {
        let (mut router, backend) = router_with(DemoBackend::new(Duration::from_secs(60)));
        router
            .dispatch(ViewAction::OpenDemo(ViewKind::AiAnalyzer))
            .await
            .unwrap();
        router
            .dispatch(ViewAction::RequestAnalysis("doc-2".into()))
            .await
            .unwrap();
        router.dispatch(ViewAction::Home).await.unwrap();

        assert!(!router.is_busy());
        assert!(!router.documents()[1].is_analyzed());
        assert!(backend.events().is_empty());
    }

    #[tokio::test]
    async fn actions_outside_their_screen_are_rejected() {
        let (mut router, _) = router();
        let err = router.dispatch(ViewAction::Next).await.unwrap_err();
        assert!(matches!(
            err,
            Error::View(ViewError::NotAvailable { ref action, ref view })
                if action == "next" && view == "landing"
        ));
        assert!(matches!(
            router.dispatch(ViewAction::Back).await.unwrap_err(),
            Error::View(ViewError::NotAvailable { .. })
        ));
        assert!(matches!(
            router
                .dispatch(ViewAction::OpenDemo(ViewKind::BuyerProfile))
                .await
                .unwrap_err(),
            Error::View(ViewError::InvalidTransition { .. })
        ));

        router
            .dispatch(ViewAction::OpenDemo(ViewKind::Acquisition))
            .await
            .unwrap();
        assert!(matches!(
            router
                .dispatch(ViewAction::OpenDemo(ViewKind::AiAnalyzer))
                .await
                .unwrap_err(),
            Error::View(ViewError::InvalidTransition { .. })
        ));
        assert!(matches!(
            router
                .dispatch(ViewAction::RequestAnalysis("doc-1".into()))
                .await
                .unwrap_err(),
            Error::View(ViewError::NotAvailable { .. })
        ));
    }

    #[tokio::test]
    async fn home_on_landing_is_a_no_op() {
        let (mut router, _) = router();
        let dispatch = router.dispatch(ViewAction::Home).await.unwrap();
        assert_eq!(dispatch.view, ViewKind::Landing);
    }
}
