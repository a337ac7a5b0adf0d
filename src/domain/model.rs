use serde::{Deserialize, Serialize};

pub const DEFAULT_TARGET: &str = "src/EmployerView.jsx";
pub const DEFAULT_COMMENT: &str = "// eslint-disable-next-line react-hooks/exhaustive-deps";
pub const DEFAULT_COMMENT_INDENT: &str = "    ";
pub const DEFAULT_MALFORMED_ESCAPE: &str = "`n";
pub const DEFAULT_CLOSING_FRAGMENT: &str = "  }, [open, app]);";
pub const DEFAULT_LOOKBACK_LINES: usize = 5;

/// Literals driving both fixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchRule {
    pub comment: String,
    pub comment_indent: String,
    pub malformed_escape: String,
    pub closing_fragment: String,
    pub lookback_lines: usize,
}

impl Default for PatchRule {
    fn default() -> Self {
        Self {
            comment: DEFAULT_COMMENT.to_string(),
            comment_indent: DEFAULT_COMMENT_INDENT.to_string(),
            malformed_escape: DEFAULT_MALFORMED_ESCAPE.to_string(),
            closing_fragment: DEFAULT_CLOSING_FRAGMENT.to_string(),
            lookback_lines: DEFAULT_LOOKBACK_LINES,
        }
    }
}

impl PatchRule {
    /// Comment, stray escape and closing fragment glued together.
    pub fn malformed_marker(&self) -> String {
        format!(
            "{}{}{}{}",
            self.comment_indent, self.comment, self.malformed_escape, self.closing_fragment
        )
    }

    pub fn corrected_form(&self) -> String {
        format!("{}\n{}", self.comment_line(), self.closing_fragment)
    }

    /// Indented comment without the trailing newline.
    pub fn comment_line(&self) -> String {
        format!("{}{}", self.comment_indent, self.comment)
    }
}

/// What `fixes::apply` changed in a piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixOutcome {
    pub malformed_markers_fixed: usize,
    pub comment_inserted: bool,
}

impl FixOutcome {
    pub fn changed(&self) -> bool {
        self.malformed_markers_fixed > 0 || self.comment_inserted
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchReport {
    pub path: String,
    pub bom_stripped: bool,
    pub malformed_markers_fixed: usize,
    pub comment_inserted: bool,
    pub content_changed: bool,
    pub written: bool,
}

impl PatchReport {
    pub fn new(path: String, bom_stripped: bool, outcome: FixOutcome) -> Self {
        Self {
            path,
            bom_stripped,
            malformed_markers_fixed: outcome.malformed_markers_fixed,
            comment_inserted: outcome.comment_inserted,
            content_changed: outcome.changed(),
            written: false,
        }
    }

    /// True when the bytes on disk differ from what gets written.
    pub fn bytes_differ(&self) -> bool {
        self.bom_stripped || self.content_changed
    }
}
