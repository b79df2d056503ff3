//! Reasons a widget payload cannot be rendered.
//!
//! None of these ever escape to the page as a fault: `widget::dispatch` folds every
//! one of them into `RenderOutcome::Unrenderable` using the `Display` text below.

use thiserror::Error;

/// Why a response could not be turned into a widget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// Descriptor (`kind`) or data payload absent / null.
    #[error("No chart data available.")]
    MissingData,
    /// `kind` is not one of the recognized tags; the literal value is kept.
    #[error("Unsupported chart type: {0}")]
    UnsupportedKind(String),
    /// A field the kind's family needs is absent or has the wrong type.
    #[error("Malformed {kind} data: missing or invalid {field}")]
    MalformedFamilyData { kind: &'static str, field: String },
    /// The response element is not an object.
    #[error("Invalid widget payload: {0}")]
    InvalidPayload(String),
    /// The backend reported that the analysis failed.
    #[error("{0}")]
    Backend(String),
}

impl RenderError {
    pub(crate) fn malformed(kind: &'static str, field: impl Into<String>) -> Self {
        RenderError::MalformedFamilyData {
            kind,
            field: field.into(),
        }
    }
}
