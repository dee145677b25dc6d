use thiserror::Error;

pub const POPUP_BLOCKED_MESSAGE: &str = "Please allow pop-ups for this site to view the analysis";
pub const GENERIC_FAILURE_MESSAGE: &str = "Analysis failed";

/// Everything that can go wrong between pressing submit and seeing a result.
///
/// The `Display` text is what ends up in the error element, so each variant
/// renders as a user-facing sentence.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("{0}")]
    Transport(String),

    #[error("HTTP error {status}")]
    Http { status: u16 },

    #[error("Malformed response from server: {0}")]
    MalformedResponse(String),

    /// The server answered with `success: false`.
    #[error("{0}")]
    Rejected(String),

    #[error("{}", POPUP_BLOCKED_MESSAGE)]
    PopupBlocked,

    #[error("Failed to write analysis document: {0}")]
    Render(String),

    #[error("A submission is already in progress")]
    Busy,
}

impl FormError {
    /// Failure from an envelope's `error` field, with the generic fallback.
    pub fn rejected(error: Option<&str>) -> Self {
        match error {
            Some(msg) if !msg.is_empty() => FormError::Rejected(msg.to_string()),
            _ => FormError::Rejected(GENERIC_FAILURE_MESSAGE.to_string()),
        }
    }
}

impl From<reqwest::Error> for FormError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            FormError::Http {
                status: status.as_u16(),
            }
        } else {
            FormError::Transport(e.to_string())
        }
    }
}

impl From<std::io::Error> for FormError {
    fn from(e: std::io::Error) -> Self {
        FormError::Render(e.to_string())
    }
}
