//! Document analysis: documents, their AI analyses, and the panel that
//! requests new ones.

pub mod model;
pub mod panel;
pub mod task;

pub use model::{AiAnalysis, AnalysisType, Document, DocumentType};
pub use panel::{AnalysisPanel, DocumentSummary, OverviewCard, PanelEvent};
pub use task::{OperationHandle, OperationStatus};
