//! Maps the terminal's loosely-typed callback fields into a `PaymentOutcome`.
//!
//! Raw response codes never leave this module except as the verbatim `code`
//! carried on the outcome.

use super::callback::CallbackPayload;
use super::outcome::{NULL_INTENT_CODE, PaymentOutcome, PaymentStatus, UNKNOWN_ERROR_CODE};

const APPROVED_CODES: [&str; 2] = ["00", "01"];

pub fn decode(
    response_code: Option<&str>,
    response_message: Option<&str>,
    raw_data: Option<&str>,
) -> PaymentOutcome {
    let message = response_message.map(str::to_string);
    let raw_data = raw_data.map(str::to_string);

    match response_code {
        Some(code) if APPROVED_CODES.contains(&code) => {
            PaymentOutcome::new(PaymentStatus::Approved, code.to_string(), message, raw_data)
        }
        Some(code) => {
            PaymentOutcome::new(PaymentStatus::Declined, code.to_string(), message, raw_data)
        }
        None => PaymentOutcome::new(
            PaymentStatus::Error,
            UNKNOWN_ERROR_CODE.to_string(),
            message,
            raw_data,
        ),
    }
}

pub fn decode_payload(payload: &CallbackPayload) -> PaymentOutcome {
    decode(
        payload.response_code.as_deref(),
        payload.response_message.as_deref(),
        payload.transaction_data.as_deref(),
    )
}

/// Outcome for a callback that arrived without any data.
pub fn null_callback() -> PaymentOutcome {
    PaymentOutcome::new(
        PaymentStatus::Error,
        NULL_INTENT_CODE.to_string(),
        Some("Intent data is null".to_string()),
        None,
    )
}
