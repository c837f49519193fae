//! DealFlow: business-acquisition marketplace core.

#[macro_use]
mod macros;

pub mod analysis;
pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod onboarding;
pub mod profiles;
pub mod render;
pub mod ui;
pub mod view;
pub mod workflow;
