use crate::model::EntityKind;
use std::fmt;

const CHOOSER_REMEDIATION: &str = "install fzf (https://github.com/junegunn/fzf), point RPICK_CHOOSER at another chooser, or set \"fallback\": \"prompt\" in the config";

/// Failures of the selection driver and result resolver.
///
/// Cancellation is not represented here; it is a normal
/// [`crate::model::SelectionResult`] value.
#[derive(Debug)]
pub enum PickError {
    /// The interactive chooser is missing or cannot be executed.
    EnvironmentUnavailable { tool: String, remediation: String },
    /// The chooser crashed, exited unexpectedly or produced unusable output.
    SelectionFailed { reason: String },
    /// A chosen index has no record behind it.
    RecordMissing { index: usize, len: usize },
    /// The chosen record carries neither a URL nor an identifier.
    IdentifierMissing { index: usize },
    /// Selection was requested for an empty result set.
    NoResults { kind: EntityKind },
}

impl PickError {
    pub fn chooser_unavailable(tool: &str, detail: impl fmt::Display) -> Self {
        PickError::EnvironmentUnavailable {
            tool: tool.to_string(),
            remediation: format!("{detail}; {CHOOSER_REMEDIATION}"),
        }
    }

    pub fn selection_failed(reason: impl Into<String>) -> Self {
        PickError::SelectionFailed {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for PickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PickError::EnvironmentUnavailable { tool, remediation } => {
                write!(f, "chooser `{tool}` is unavailable: {remediation}")
            }
            PickError::SelectionFailed { reason } => write!(f, "selection failed: {reason}"),
            PickError::RecordMissing { index, len } => write!(
                f,
                "internal error: selected row {index} has no matching record ({len} records)"
            ),
            PickError::IdentifierMissing { index } => {
                write!(f, "selected record {index} has no id or url to download")
            }
            PickError::NoResults { kind } => write!(f, "no {kind} results to select from"),
        }
    }
}

impl std::error::Error for PickError {}
