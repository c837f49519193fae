//! Presentation primitives shared by every screen: form fields, progress
//! bars and number formatting.

pub mod form;
pub mod format;
pub mod progress;

pub use form::{FieldKind, FieldValue, FormField, SelectOption};
pub use format::{format_compact_number, format_compact_range, format_currency, format_file_size};
pub use progress::Progress;
