use serde::{Deserialize, Serialize};

/// Response code used when the terminal replied without one.
pub const UNKNOWN_ERROR_CODE: &str = "UNKNOWN_ERROR";
/// Response code used when the platform delivered no callback data at all.
pub const NULL_INTENT_CODE: &str = "NULL_INTENT";

const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Approved,
    /// The terminal answered with a business-level decline.
    Declined,
    /// The bridge or the terminal failed before producing a business answer.
    Error,
}

/// The normalized result of one payment request.
///
/// Built only by the codec; the raw code and data are kept verbatim for
/// diagnostics.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOutcome {
    status: PaymentStatus,
    code: String,
    message: Option<String>,
    raw_data: Option<String>,
}

impl PaymentOutcome {
    pub(crate) fn new(
        status: PaymentStatus,
        code: String,
        message: Option<String>,
        raw_data: Option<String>,
    ) -> Self {
        Self {
            status,
            code,
            message,
            raw_data,
        }
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn raw_data(&self) -> Option<&str> {
        self.raw_data.as_deref()
    }

    pub fn is_approved(&self) -> bool {
        self.status == PaymentStatus::Approved
    }

    /// True when the outcome reports a failure of the bridge or the terminal
    /// rather than a decision about the payment.
    pub fn is_system_fault(&self) -> bool {
        self.status == PaymentStatus::Error
    }

    /// Message to show the user, with a generic fallback for failures.
    pub fn description(&self) -> &str {
        match (&self.message, self.status) {
            (Some(message), _) => message,
            (None, PaymentStatus::Approved) => "",
            (None, _) => UNKNOWN_ERROR_MESSAGE,
        }
    }
}
