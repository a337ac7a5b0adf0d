//! Pure text fixes for the broken lint-suppression comment.
//!
//! The text is never parsed; both fixes work on exact substrings taken from
//! a [`PatchRule`].

use crate::domain::model::{FixOutcome, PatchRule};

/// Rewrites every `comment` + stray escape + fragment into comment, newline, fragment.
pub fn fix_malformed_marker(text: &str, rule: &PatchRule) -> (String, usize) {
    let marker = rule.malformed_marker();
    let count = text.matches(marker.as_str()).count();
    if count == 0 {
        return (text.to_string(), 0);
    }
    (text.replace(marker.as_str(), &rule.corrected_form()), count)
}

/// Whether the lines just above the first `closing_fragment` already carry the comment.
///
/// The window is the last `lookback_lines` segments of the text before the
/// fragment split on `\n`; the final segment is the partial line the fragment
/// starts on. The window always covers at least the line above it.
pub fn comment_precedes_fragment(text: &str, rule: &PatchRule) -> Option<bool> {
    let idx = text.find(rule.closing_fragment.as_str())?;
    let segments: Vec<&str> = text[..idx].split('\n').collect();
    let start = segments.len().saturating_sub(rule.lookback_lines.max(2));
    Some(
        segments[start..]
            .iter()
            .any(|line| line.contains(rule.comment.as_str())),
    )
}

/// Line ending nearest before `idx`, falling back to the file's first one.
fn line_ending_at(text: &str, idx: usize) -> &'static str {
    let newline = text[..idx].rfind('\n').or_else(|| text.find('\n'));
    match newline {
        Some(pos) if text[..pos].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}

/// Inserts the comment line before the first `closing_fragment` when it is missing.
pub fn insert_missing_comment(text: &str, rule: &PatchRule) -> (String, bool) {
    let Some(idx) = text.find(rule.closing_fragment.as_str()) else {
        return (text.to_string(), false);
    };
    if comment_precedes_fragment(text, rule) == Some(true) {
        return (text.to_string(), false);
    }

    let insertion = format!(
        "{}{}{}",
        rule.comment_line(),
        line_ending_at(text, idx),
        rule.closing_fragment
    );
    (text.replacen(rule.closing_fragment.as_str(), &insertion, 1), true)
}

/// Both fixes in order. Applying this to its own output is a no-op.
pub fn apply(text: &str, rule: &PatchRule) -> (String, FixOutcome) {
    let (text, malformed_markers_fixed) = fix_malformed_marker(text, rule);
    let (text, comment_inserted) = insert_missing_comment(&text, rule);

    (
        text,
        FixOutcome {
            malformed_markers_fixed,
            comment_inserted,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMMENT: &str = "// eslint-disable-next-line react-hooks/exhaustive-deps";

    fn effect(body: &str) -> String {
        format!("  useEffect(() => {{\n    if (open) load(app);\n{}\n\nexport default X;\n", body)
    }

    #[test]
    fn test_malformed_marker_gets_real_newline() {
        let rule = PatchRule::default();
        let input = effect(&format!("    {}`n  }}, [open, app]);", COMMENT));

        let (output, outcome) = apply(&input, &rule);

        assert_eq!(outcome.malformed_markers_fixed, 1);
        assert!(!outcome.comment_inserted);
        assert_eq!(output, effect(&format!("    {}\n  }}, [open, app]);", COMMENT)));
    }

    #[test]
    fn test_every_malformed_marker_is_fixed() {
        let rule = PatchRule::default();
        let marker = rule.malformed_marker();
        let input = format!("{}\n{}\n", marker, marker);

        let (output, outcome) = apply(&input, &rule);

        assert_eq!(outcome.malformed_markers_fixed, 2);
        assert!(!output.contains("`n"));
    }

    #[test]
    fn test_missing_comment_inserted_before_first_fragment_only() {
        let rule = PatchRule::default();
        let input = "a\n  }, [open, app]);\nb\nc\nd\ne\nf\ng\n  }, [open, app]);\n";

        let (output, outcome) = apply(input, &rule);

        assert!(outcome.comment_inserted);
        assert_eq!(
            output,
            format!(
                "a\n    {}\n  }}, [open, app]);\nb\nc\nd\ne\nf\ng\n  }}, [open, app]);\n",
                COMMENT
            )
        );
    }

    #[test]
    fn test_existing_comment_within_window_is_respected() {
        let rule = PatchRule::default();
        let input = format!("x\n    {}\n  }}, [open, app]);\n", COMMENT);

        let (output, outcome) = apply(&input, &rule);

        assert!(!outcome.changed());
        assert_eq!(output, input);
    }

    #[test]
    fn test_comment_outside_window_does_not_count() {
        let rule = PatchRule::default();
        // segments before the fragment: comment, 1, 2, 3, 4, "" -> comment falls out of a 5-segment window
        let input = format!("    {}\n1\n2\n3\n4\n  }}, [open, app]);\n", COMMENT);

        let (_, outcome) = apply(&input, &rule);
        assert!(outcome.comment_inserted);

        let input = format!("    {}\n1\n2\n3\n  }}, [open, app]);\n", COMMENT);
        let (_, outcome) = apply(&input, &rule);
        assert!(!outcome.comment_inserted);
    }

    #[test]
    fn test_no_fragment_means_no_change() {
        let rule = PatchRule::default();
        let input = "export default function EmployerView() {}\n";

        assert_eq!(comment_precedes_fragment(input, &rule), None);
        let (output, outcome) = apply(input, &rule);
        assert!(!outcome.changed());
        assert_eq!(output, input);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let rule = PatchRule::default();
        let inputs = [
            effect(&format!("    {}`n  }}, [open, app]);", COMMENT)),
            effect("  }, [open, app]);"),
            effect(&format!("    {}\n  }}, [open, app]);", COMMENT)),
            "  }, [open, app]);\r\n  }, [open, app]);\r\n".to_string(),
        ];

        for input in inputs {
            let (once, _) = apply(&input, &rule);
            let (twice, outcome) = apply(&once, &rule);
            assert_eq!(once, twice, "second pass changed {:?}", input);
            assert!(!outcome.changed());
        }
    }

    #[test]
    fn test_smallest_window_is_idempotent() {
        let rule = PatchRule {
            lookback_lines: 2,
            ..PatchRule::default()
        };
        let input = "  useEffect(() => {\n    load();\n  }, [open, app]);\n";

        let (once, outcome) = apply(input, &rule);
        assert!(outcome.comment_inserted);
        let (twice, outcome) = apply(&once, &rule);

        assert!(!outcome.comment_inserted);
        assert_eq!(once, twice);
        assert_eq!(twice.matches(COMMENT).count(), 1);
    }

    #[test]
    fn test_single_line_window_still_sees_line_above() {
        let rule = PatchRule {
            lookback_lines: 1,
            ..PatchRule::default()
        };
        let (once, _) = apply("    load();\n  }, [open, app]);\n", &rule);
        let (twice, outcome) = apply(&once, &rule);

        assert!(!outcome.comment_inserted);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_crlf_file_keeps_crlf_on_insert() {
        let rule = PatchRule::default();
        let input = "  useEffect(() => {\r\n    load();\r\n  }, [open, app]);\r\n";

        let (output, outcome) = apply(input, &rule);

        assert!(outcome.comment_inserted);
        assert_eq!(
            output,
            format!(
                "  useEffect(() => {{\r\n    load();\r\n    {}\r\n  }}, [open, app]);\r\n",
                COMMENT
            )
        );
        assert!(!output.replace("\r\n", "").contains('\n'));
    }

    #[test]
    fn test_crlf_detected_after_fragment_when_nothing_precedes_it() {
        let rule = PatchRule::default();
        let (output, _) = apply("  }, [open, app]);\r\n", &rule);

        assert_eq!(output, format!("    {}\r\n  }}, [open, app]);\r\n", COMMENT));
    }

    #[test]
    fn test_fragment_at_start_of_file() {
        let rule = PatchRule::default();
        let (output, outcome) = apply("  }, [open, app]);", &rule);

        assert!(outcome.comment_inserted);
        assert_eq!(output, format!("    {}\n  }}, [open, app]);", COMMENT));
    }
}
