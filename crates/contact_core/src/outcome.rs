use crate::ValidationResult;

/// Response body the server sends when the message was accepted.
pub const SUCCESS_SENTINEL: &str = "OK";

pub const CONFIRMATION_MESSAGE: &str = "Your message has been sent. Thank you!";

/// Shown when the server answers 2xx with an empty body.
pub const EMPTY_RESPONSE_MESSAGE: &str = "The server returned an empty response.";

/// Fallback when a transport failure carries no description.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Your message could not be sent.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success,
    Failure { message: String },
}

impl SubmissionOutcome {
    /// Interpret a raw response body. Only the exact sentinel counts as
    /// success; anything else is shown to the user verbatim.
    pub fn from_response(raw: &str) -> Self {
        if raw == SUCCESS_SENTINEL {
            SubmissionOutcome::Success
        } else if raw.is_empty() {
            SubmissionOutcome::Failure {
                message: EMPTY_RESPONSE_MESSAGE.to_string(),
            }
        } else {
            SubmissionOutcome::Failure {
                message: raw.to_string(),
            }
        }
    }

    pub fn from_transport_error(message: impl Into<String>) -> Self {
        let message = message.into();
        SubmissionOutcome::Failure {
            message: if message.trim().is_empty() {
                TRANSPORT_FAILURE_MESSAGE.to_string()
            } else {
                message
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success)
    }

    /// Text for the result region.
    pub fn display_text(&self) -> &str {
        match self {
            SubmissionOutcome::Success => CONFIRMATION_MESSAGE,
            SubmissionOutcome::Failure { message } => message,
        }
    }

    /// The result region as page markup. Server failure text is already
    /// markup and passes through untouched.
    pub fn to_markup(&self) -> String {
        match self {
            SubmissionOutcome::Success => {
                format!("<div class=\"successmsg\">{CONFIRMATION_MESSAGE}</div>")
            }
            SubmissionOutcome::Failure { message } => message.clone(),
        }
    }
}

/// Why a submit action did not reach the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Invalid(ValidationResult),
    /// Single-flight policy: another attempt is still pending.
    InFlight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResult {
    Completed(SubmissionOutcome),
    Rejected(Rejection),
}

impl SubmitResult {
    pub fn outcome(&self) -> Option<&SubmissionOutcome> {
        match self {
            SubmitResult::Completed(outcome) => Some(outcome),
            SubmitResult::Rejected(_) => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, SubmitResult::Rejected(_))
    }
}
