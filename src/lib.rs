pub use crate::error::{HarnessError, Result};

pub mod cli;
pub mod config;
pub mod error;
pub mod expect;
pub mod pipeline;
pub mod stage;
pub mod suite;
