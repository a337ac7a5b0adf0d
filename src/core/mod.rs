pub mod encoding;
pub mod fixes;
pub mod patcher;

pub use crate::domain::model::{FixOutcome, PatchReport, PatchRule};
pub use crate::domain::ports::Storage;
pub use crate::utils::error::Result;
