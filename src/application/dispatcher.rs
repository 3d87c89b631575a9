use super::slot::PendingSlot;
use crate::domain::callback::CallbackPayload;
use crate::domain::codec;
use crate::domain::request::CorrelationToken;
use log::{debug, info, warn};
use std::sync::Arc;

/// What happened to one callback delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackDisposition {
    /// The pending request with this token was resolved.
    Resolved(CorrelationToken),
    /// Nothing was pending; a duplicate or late delivery.
    Stray,
    /// The callback answers some other platform request.
    ForeignRequestCode(i32),
}

/// Entry point for the terminal handler's replies.
///
/// Cheap to clone; every clone shares the gateway's slot. Safe to call from
/// any thread and never blocks.
#[derive(Debug, Clone)]
pub struct CallbackDispatcher {
    slot: Arc<PendingSlot>,
    request_code: i32,
}

impl CallbackDispatcher {
    pub fn new(slot: Arc<PendingSlot>, request_code: i32) -> Self {
        Self { slot, request_code }
    }

    pub fn on_callback(
        &self,
        request_code: i32,
        payload: Option<CallbackPayload>,
    ) -> CallbackDisposition {
        if request_code != self.request_code {
            debug!("Ignoring callback for request code {request_code}");
            return CallbackDisposition::ForeignRequestCode(request_code);
        }

        let Some(pending) = self.slot.take_current() else {
            warn!("Received callback with no pending payment request, ignoring");
            return CallbackDisposition::Stray;
        };

        let token = pending.token();
        let outcome = match payload {
            Some(payload) => codec::decode_payload(&payload),
            None => codec::null_callback(),
        };
        info!(
            "Resolving payment request {token} with {:?} ({})",
            outcome.status(),
            outcome.code()
        );

        if !pending.resolve(Ok(outcome)) {
            debug!("Caller of payment request {token} is no longer waiting");
        }
        CallbackDisposition::Resolved(token)
    }

    /// Same as `on_callback` for a JSON body; malformed JSON counts as no data.
    pub fn on_raw_callback(&self, request_code: i32, raw: Option<&str>) -> CallbackDisposition {
        let payload = raw.and_then(|body| {
            let parsed = CallbackPayload::from_json(body);
            if parsed.is_none() {
                warn!("Discarding malformed callback payload");
            }
            parsed
        });
        self.on_callback(request_code, payload)
    }
}
