use thiserror::Error;

use crate::i18n::Messages;

/// Why a call to the task store did not produce a usable reply.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// The request never completed: no window, fetch rejected, body unreadable.
    #[error("request failed: {0}")]
    Transport(String),

    /// A reply arrived but was not the JSON we expected.
    #[error("malformed response: {0}")]
    Decode(String),

    /// Non-2xx reply carrying the server's `error` field, if it sent one.
    #[error("server rejected request with status {status}")]
    Rejected { status: u16, error: Option<String> },
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl ClientError {
    /// Text shown to the user. Server-supplied errors are surfaced
    /// verbatim; everything that is not an application error collapses to
    /// the generic network message.
    pub fn user_message(&self, fallback: &str, messages: &Messages) -> String {
        match self {
            ClientError::Rejected {
                error: Some(error), ..
            } if !error.is_empty() => error.clone(),
            ClientError::Rejected { .. } => fallback.to_string(),
            ClientError::Transport(_) | ClientError::Decode(_) => messages.network_error.to_string(),
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, ClientError::Rejected { .. })
    }
}
