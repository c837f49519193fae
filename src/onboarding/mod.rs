//! Onboarding wizards: multi-step forms that collect a buyer or seller
//! profile.
//!
//! A [`Wizard`] walks a static table of [`StepDefinition`]s, merging user
//! input into a [`Draft`] record. Advancing past the last step hands the
//! record back to the caller, which turns it into a [`crate::profiles::Profile`].

pub mod model;
pub mod state;
pub mod steps;

pub use model::{BuyerDraft, Draft, SellerDraft};
pub use state::{StepIndicator, StepState, Wizard, WizardOutcome};
pub use steps::{BUYER_STEPS, SELLER_STEPS, StepDefinition};
