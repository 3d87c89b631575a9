use serde::{Deserialize, Serialize};

/// Fields the terminal handler attaches to its asynchronous reply.
///
/// Every field is optional; the codec decides what a missing one means.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CallbackPayload {
    pub response_code: Option<String>,
    pub response_message: Option<String>,
    pub transaction_data: Option<String>,
}

impl CallbackPayload {
    /// Parses a JSON callback body, returning `None` when it is malformed.
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}
