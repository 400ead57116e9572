//! The uniform response wrapper used by every routing-service endpoint.

use serde::{Deserialize, Serialize};

use crate::error::TransportError;

/// Wire shape of every response: `{success, data, error}`.
///
/// `data` is present iff `success` is true. A failed envelope should carry
/// `error.message`; when it does not, a message keyed on the HTTP status is
/// synthesized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<EnvelopeError>,
}

/// The `error` member of a failed envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvelopeError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(EnvelopeError {
                message: Some(message.into()),
            }),
        }
    }

    /// Unwrap the envelope against the HTTP status it arrived with.
    ///
    /// A non-2xx status or `success: false` is a [`TransportError::Request`],
    /// whatever the other one says. A successful envelope without `data`
    /// yields `None`.
    pub fn into_result(self, status: u16) -> Result<Option<T>, TransportError> {
        if !(200..300).contains(&status) || !self.success {
            let message = self
                .error
                .and_then(|e| e.message)
                .unwrap_or_else(|| TransportError::status_message(status));
            return Err(TransportError::Request { status, message });
        }
        Ok(self.data)
    }
}
