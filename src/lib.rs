pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{cli::LocalStorage, PatchSettings};
pub use crate::core::patcher::{PatchPlan, Patcher};
pub use crate::domain::model::{PatchReport, PatchRule};
pub use crate::utils::error::{PatchError, Result};
