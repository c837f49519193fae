//! Top-level screen switching.

pub mod router;
pub mod state;

pub use router::{Dispatch, Screen, ViewRouter};
pub use state::{ViewAction, ViewKind, nav_items};
