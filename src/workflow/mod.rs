//! Acquisition workflow: the seven-step path from first discussion to
//! closing, tracked per deal.

pub mod catalog;
pub mod model;
pub mod tracker;

pub use catalog::{ACQUISITION_STEPS, ValuationCard, WorkflowStepDef};
pub use model::{Deal, DealStatus, DealStep, StepStatus};
pub use tracker::{StepCompletion, StepDetail, StepRow, StepView, UploadEvent, WorkflowTracker};
