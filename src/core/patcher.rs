use crate::core::encoding::{decode_utf8_sig, encode_utf8};
use crate::core::fixes;
use crate::domain::model::{PatchReport, PatchRule};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::Path;

/// A computed patch that has not been written yet.
#[derive(Debug, Clone)]
pub struct PatchPlan {
    pub report: PatchReport,
    pub text: String,
}

pub struct Patcher<S: Storage> {
    storage: S,
    rule: PatchRule,
}

impl<S: Storage> Patcher<S> {
    pub fn new(storage: S, rule: PatchRule) -> Self {
        Self { storage, rule }
    }

    /// Reads and fixes `path` without touching the file.
    pub fn plan(&self, path: &Path) -> Result<PatchPlan> {
        tracing::debug!("Reading {}", path.display());
        let bytes = self.storage.read_file(path)?;
        let decoded = decode_utf8_sig(path, bytes)?;

        let (text, outcome) = fixes::apply(&decoded.text, &self.rule);
        if outcome.malformed_markers_fixed > 0 {
            tracing::info!(
                "Rewrote {} malformed lint comment(s)",
                outcome.malformed_markers_fixed
            );
        }
        if outcome.comment_inserted {
            tracing::info!(
                "Inserted lint comment before first '{}'",
                self.rule.closing_fragment.trim()
            );
        }
        if !outcome.changed() {
            tracing::debug!("No lint comment changes needed");
        }

        Ok(PatchPlan {
            report: PatchReport::new(path.display().to_string(), decoded.had_bom, outcome),
            text,
        })
    }

    /// Fixes `path` in place. The file is rewritten even when nothing changed.
    pub fn fix(&self, path: &Path) -> Result<PatchReport> {
        let PatchPlan { mut report, text } = self.plan(path)?;

        let bytes = encode_utf8(&text);
        self.storage.write_file(path, bytes)?;
        report.written = true;
        tracing::debug!("Wrote {} ({} bytes)", path.display(), bytes.len());

        Ok(report)
    }
}
