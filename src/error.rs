//! Error types for dealflow.

use rust_decimal::Decimal;

/// Top-level error type for the marketplace core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Field error: {0}")]
    Field(#[from] FieldError),

    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),

    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    #[error("Workflow error: {0}")]
    Workflow(#[from] WorkflowError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("View error: {0}")]
    View(#[from] ViewError),

    #[error("Command error: {0}")]
    Command(#[from] CommandError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// A single form field that could not be accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("Unknown field: {key}")]
    UnknownField { key: String },

    #[error("{label} is required")]
    Required { key: String, label: String },

    #[error("{label} must be a number, got '{value}'")]
    InvalidNumber {
        key: String,
        label: String,
        value: String,
    },

    #[error("{label} must be one of: {options}")]
    InvalidOption {
        key: String,
        label: String,
        options: String,
    },

    #[error("{label} must be a valid email address")]
    InvalidEmail { key: String, label: String },
}

impl FieldError {
    /// Key of the field this error belongs to.
    pub fn key(&self) -> &str {
        match self {
            Self::UnknownField { key }
            | Self::Required { key, .. }
            | Self::InvalidNumber { key, .. }
            | Self::InvalidOption { key, .. }
            | Self::InvalidEmail { key, .. } => key,
        }
    }
}

/// Onboarding wizard errors.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("Step '{step}' has {} invalid field(s)", errors.len())]
    StepInvalid {
        step: String,
        errors: Vec<FieldError>,
    },

    #[error(transparent)]
    Field(#[from] FieldError),
}

/// Profile construction errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("Budget minimum {min} exceeds maximum {max}")]
    BudgetInverted { min: Decimal, max: Decimal },

    #[error("Budget values must be non-negative, got {value}")]
    NegativeBudget { value: Decimal },
}

/// Deal / acquisition workflow errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    #[error("Step '{id}' is not part of the workflow catalog")]
    UnknownStep { id: String },

    #[error("Step '{id}' appears more than once")]
    DuplicateStep { id: String },

    #[error("Current step '{id}' is not one of the deal's steps")]
    CurrentStepMissing { id: String },

    #[error("Step '{id}' is already completed")]
    AlreadyCompleted { id: String },

    #[error("A document upload for step '{id}' is still running")]
    UploadInProgress { id: String },
}

/// Document analysis panel errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("Document '{id}' not found")]
    DocumentNotFound { id: String },

    #[error("Document '{id}' is already being analyzed")]
    AlreadyAnalyzing { id: String },
}

/// Errors reported by the external marketplace backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("{operation} failed: {reason}")]
    RequestFailed { operation: String, reason: String },

    #[error("{operation} rejected: {reason}")]
    Rejected { operation: String, reason: String },

    #[error("{operation} was cancelled")]
    Cancelled { operation: String },
}

/// View router errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    #[error("Cannot go from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("'{action}' is not available on the {view} screen")]
    NotAvailable { action: String, view: String },

    #[error("Buyer '{id}' not found")]
    BuyerNotFound { id: String },
}

/// REPL input that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command '{name}'")]
    Unknown { name: String },

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("Cannot read {path}: {reason}")]
    UnreadableFile { path: String, reason: String },
}

/// Result type alias for dealflow.
pub type Result<T> = std::result::Result<T, Error>;
