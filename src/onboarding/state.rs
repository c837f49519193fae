//! Onboarding wizard state machine: tracks which step the user is on and
//! the record accumulated so far.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ValidationPolicy;
use crate::error::{FieldError, WizardError};

use super::model::Draft;
use super::steps::{StepDefinition, find_field};

/// How a step indicator is drawn relative to the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    Completed,
    Active,
    Upcoming,
}

impl std::fmt::Display for StepState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Completed => "completed",
            Self::Active => "active",
            Self::Upcoming => "upcoming",
        };
        write!(f, "{s}")
    }
}

/// One entry of the wizard's step indicator row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepIndicator {
    pub number: usize,
    pub title: &'static str,
    pub description: &'static str,
    pub state: StepState,
}

/// Result of a navigation request.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardOutcome<D> {
    /// Moved forward to the given index.
    Advanced { index: usize },
    /// Advance on the last step: the accumulated record is handed back.
    /// The index stays on the last step.
    Completed(D),
    /// Moved back to the given index.
    Retreated { index: usize },
    /// Back on the first step: the caller should leave the wizard.
    Cancelled,
}

/// Multi-step onboarding wizard over a fixed step table.
///
/// The current index always stays within `0..step_count()`.
#[derive(Debug, Clone)]
pub struct Wizard<D: Draft> {
    steps: &'static [StepDefinition],
    current: usize,
    record: D,
    policy: ValidationPolicy,
}

impl<D: Draft> Wizard<D> {
    /// Start at the first step with an empty record.
    pub fn new(steps: &'static [StepDefinition]) -> Self {
        Self {
            steps,
            current: 0,
            record: D::default(),
            policy: ValidationPolicy::default(),
        }
    }

    /// Builder: set the validation policy applied on advance.
    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn steps(&self) -> &'static [StepDefinition] {
        self.steps
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> Option<&'static StepDefinition> {
        self.steps.get(self.current)
    }

    pub fn record(&self) -> &D {
        &self.record
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    pub fn is_last_step(&self) -> bool {
        self.current + 1 >= self.steps.len()
    }

    /// Merge a partial update into the record. Later writes win per field.
    pub fn update(&mut self, patch: D) {
        self.record.merge(patch);
    }

    /// Parse raw input for the field `key` and store it in the record.
    ///
    /// The key may belong to any step, not only the current one.
    pub fn set_field(&mut self, key: &str, raw: &str) -> Result<(), FieldError> {
        let field = find_field(self.steps, key).ok_or_else(|| FieldError::UnknownField {
            key: key.to_string(),
        })?;
        let value = field.parse(raw)?;
        self.record.set_field(key, value)?;
        debug!(field = key, step = self.current, "Wizard field updated");
        Ok(())
    }

    /// Validation errors for every field of the current step.
    pub fn validate_current_step(&self) -> Vec<FieldError> {
        let Some(step) = self.current_step() else {
            return Vec::new();
        };
        step.fields
            .iter()
            .filter_map(|field| {
                let value = self.record.field(field.key);
                field.validate(value.as_deref()).err()
            })
            .collect()
    }

    /// Move forward, or hand back the record on the last step.
    ///
    /// Under [`ValidationPolicy::Permissive`] this never fails. Under
    /// [`ValidationPolicy::Strict`] an invalid current step is reported and
    /// the index does not move.
    pub fn advance(&mut self) -> Result<WizardOutcome<D>, WizardError> {
        if self.policy == ValidationPolicy::Strict {
            let errors = self.validate_current_step();
            if !errors.is_empty() {
                let step = self.current_step().map(|s| s.title).unwrap_or_default();
                debug!(step, count = errors.len(), "Wizard advance blocked");
                return Err(WizardError::StepInvalid {
                    step: step.to_string(),
                    errors,
                });
            }
        }

        if self.is_last_step() {
            info!(steps = self.steps.len(), "Wizard completed");
            return Ok(WizardOutcome::Completed(self.record.clone()));
        }

        self.current += 1;
        debug!(index = self.current, "Wizard advanced");
        Ok(WizardOutcome::Advanced {
            index: self.current,
        })
    }

    /// Move back one step, or signal cancellation from the first step.
    pub fn retreat(&mut self) -> WizardOutcome<D> {
        if self.current == 0 {
            debug!("Wizard cancelled");
            return WizardOutcome::Cancelled;
        }
        self.current -= 1;
        debug!(index = self.current, "Wizard retreated");
        WizardOutcome::Retreated {
            index: self.current,
        }
    }

    /// Percent complete: `(index + 1) / steps * 100`.
    pub fn progress(&self) -> f64 {
        if self.steps.is_empty() {
            return 0.0;
        }
        (self.current + 1) as f64 / self.steps.len() as f64 * 100.0
    }

    /// "Step k of N".
    pub fn step_label(&self) -> String {
        format!("Step {} of {}", self.current + 1, self.steps.len())
    }

    /// Label for the forward button.
    pub fn primary_action_label(&self) -> &'static str {
        if self.is_last_step() {
            "Complete Profile"
        } else {
            "Continue"
        }
    }

    pub fn indicators(&self) -> Vec<StepIndicator> {
        self.steps
            .iter()
            .enumerate()
            .map(|(i, step)| StepIndicator {
                number: i + 1,
                title: step.title,
                description: step.description,
                state: match i.cmp(&self.current) {
                    std::cmp::Ordering::Less => StepState::Completed,
                    std::cmp::Ordering::Equal => StepState::Active,
                    std::cmp::Ordering::Greater => StepState::Upcoming,
                },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboarding::model::{BuyerDraft, SellerDraft};
    use crate::onboarding::steps::{BUYER_STEPS, SELLER_STEPS};

    fn seller() -> Wizard<SellerDraft> {
        Wizard::new(SELLER_STEPS)
    }

    #[test]
    fn advance_walks_to_last_step_then_completes() {
        let mut wizard = seller();
        for expected in 1..4 {
            assert_eq!(
                wizard.advance().unwrap(),
                WizardOutcome::Advanced { index: expected }
            );
        }
        assert!(wizard.is_last_step());
        assert!(matches!(wizard.advance().unwrap(), WizardOutcome::Completed(_)));
        assert_eq!(wizard.current_index(), 3);
        // Completion repeats until the caller navigates away.
        assert!(matches!(wizard.advance().unwrap(), WizardOutcome::Completed(_)));
        assert_eq!(wizard.current_index(), 3);
    }

    #[test]
    fn retreat_from_first_step_cancels() {
        let mut wizard = seller();
        assert_eq!(wizard.retreat(), WizardOutcome::Cancelled);
        assert_eq!(wizard.current_index(), 0);

        wizard.advance().unwrap();
        wizard.advance().unwrap();
        assert_eq!(wizard.retreat(), WizardOutcome::Retreated { index: 1 });
        assert_eq!(wizard.current_index(), 1);
    }

    #[test]
    fn progress_tracks_index() {
        let mut wizard = seller();
        assert_eq!(wizard.progress(), 25.0);
        wizard.advance().unwrap();
        assert_eq!(wizard.progress(), 50.0);
        wizard.advance().unwrap();
        wizard.advance().unwrap();
        assert_eq!(wizard.progress(), 100.0);
    }

    #[test]
    fn update_is_last_write_wins() {
        let mut wizard = seller();
        wizard.update(SellerDraft {
            first_name: Some("A".into()),
            ..Default::default()
        });
        wizard.update(SellerDraft {
            first_name: Some("B".into()),
            last_name: Some("C".into()),
            ..Default::default()
        });
        assert_eq!(wizard.record().first_name.as_deref(), Some("B"));
        assert_eq!(wizard.record().last_name.as_deref(), Some("C"));
    }

    #[test]
    fn permissive_policy_never_blocks() {
        let mut wizard = seller();
        assert!(!wizard.validate_current_step().is_empty());
        assert!(wizard.advance().is_ok());
    }

    #[test]
    fn strict_policy_blocks_invalid_step() {
        let mut wizard = seller().with_policy(ValidationPolicy::Strict);
        let err = wizard.advance().unwrap_err();
        match err {
            WizardError::StepInvalid { step, errors } => {
                assert_eq!(step, "Business Overview");
                let keys: Vec<_> = errors.iter().map(|e| e.key().to_string()).collect();
                assert!(keys.contains(&"business.name".to_string()));
                assert!(keys.contains(&"email".to_string()));
                assert!(!keys.contains(&"business.website".to_string()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(wizard.current_index(), 0);

        for (key, raw) in [
            ("first_name", "Sam"),
            ("last_name", "Seller"),
            ("email", "sam@example.com"),
            ("business.name", "Acme"),
            ("business.industry", "saas"),
        ] {
            wizard.set_field(key, raw).unwrap();
        }
        assert_eq!(wizard.advance().unwrap(), WizardOutcome::Advanced { index: 1 });
    }

    #[test]
    fn set_field_rejects_unknown_and_malformed_input() {
        let mut wizard = seller();
        assert!(matches!(
            wizard.set_field("budget.min", "100"),
            Err(FieldError::UnknownField { .. })
        ));
        assert!(matches!(
            wizard.set_field("financials.asking_price", "a lot"),
            Err(FieldError::InvalidNumber { .. })
        ));
        wizard.set_field("financials.asking_price", "$1,000,000").unwrap();
        assert_eq!(
            wizard.record().field("financials.asking_price").as_deref(),
            Some("1000000")
        );
    }

    #[test]
    fn completed_record_carries_nested_keys() {
        let mut wizard = seller();
        wizard.set_field("business.name", "Acme").unwrap();
        wizard.set_field("financials.asking_price", "1000000").unwrap();
        let record = loop {
            if let WizardOutcome::Completed(record) = wizard.advance().unwrap() {
                break record;
            }
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["business"]["name"], "Acme");
        assert_eq!(json["financials"]["asking_price"], "1000000");
    }

    #[test]
    fn indicators_and_labels() {
        let mut wizard: Wizard<BuyerDraft> = Wizard::new(BUYER_STEPS);
        wizard.advance().unwrap();
        let states: Vec<_> = wizard.indicators().iter().map(|i| i.state).collect();
        assert_eq!(
            states,
            [
                StepState::Completed,
                StepState::Active,
                StepState::Upcoming,
                StepState::Upcoming
            ]
        );
        assert_eq!(wizard.step_label(), "Step 2 of 4");
        assert_eq!(wizard.primary_action_label(), "Continue");
        wizard.advance().unwrap();
        wizard.advance().unwrap();
        assert_eq!(wizard.primary_action_label(), "Complete Profile");
    }

    #[test]
    fn display_matches_serde() {
        for state in [StepState::Completed, StepState::Active, StepState::Upcoming] {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(format!("\"{state}\""), json);
        }
    }
}
