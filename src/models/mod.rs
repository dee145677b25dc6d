use serde::{Deserialize, Serialize};

// ── Request body ──────────────────────────────────────────────────────────────

/// JSON body sent to the analysis endpoint.
///
/// Day counts travel as strings, exactly as they sit in the form fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub ticker: String,
    pub end_date: Option<String>, // serialized as null when the field is empty
    pub lookback_days: String,
    pub crossover_days: String,
}

// ── Response envelope ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseEnvelope {
    pub success: bool,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    /// Server-side stack trace, sent alongside `error` on failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traceback: Option<String>,
}

impl ResponseEnvelope {
    pub fn ok(html: impl Into<String>) -> Self {
        Self {
            success: true,
            html: Some(html.into()),
            error: None,
            traceback: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            html: None,
            error: Some(error.into()),
            traceback: None,
        }
    }
}

// ── UI state ──────────────────────────────────────────────────────────────────

/// Visible state of the form. Transitions:
/// Idle → Submitting → (ErrorShown | Idle), ErrorShown → Submitting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Submitting,
    ErrorShown(String),
}

impl UiState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, UiState::Submitting)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            UiState::ErrorShown(msg) => Some(msg),
            _ => None,
        }
    }
}
