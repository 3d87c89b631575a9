use crate::domain::outcome::PaymentOutcome;
use crate::domain::request::CorrelationToken;
use crate::error::Result;
use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tokio::sync::oneshot;

pub type Continuation = oneshot::Sender<Result<PaymentOutcome>>;

#[derive(Error, Debug, PartialEq)]
pub enum SlotError {
    #[error("request {0} is already pending")]
    AlreadyPending(CorrelationToken),
}

/// The suspended caller of one in-flight payment.
#[derive(Debug)]
pub struct PendingRequest {
    token: CorrelationToken,
    continuation: Continuation,
}

impl PendingRequest {
    pub fn token(&self) -> CorrelationToken {
        self.token
    }

    /// Hands the result to the waiting caller.
    ///
    /// Consumes the request, so it can only ever be resolved once. Returns
    /// `false` if the caller stopped waiting.
    pub fn resolve(self, result: Result<PaymentOutcome>) -> bool {
        self.continuation.send(result).is_ok()
    }
}

/// Holds at most one pending payment request.
///
/// Every claim or clear goes through the same lock, so for any occupancy
/// exactly one of the take operations returns it.
#[derive(Debug)]
pub struct PendingSlot {
    next_token: AtomicU64,
    occupant: Mutex<Option<PendingRequest>>,
}

impl Default for PendingSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl PendingSlot {
    pub fn new() -> Self {
        Self {
            next_token: AtomicU64::new(1),
            occupant: Mutex::new(None),
        }
    }

    // The guarded value is a plain Option, so a panic elsewhere can't leave it
    // half-written.
    fn lock(&self) -> MutexGuard<'_, Option<PendingRequest>> {
        self.occupant.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn install(&self, continuation: Continuation) -> std::result::Result<CorrelationToken, SlotError> {
        let mut occupant = self.lock();
        if let Some(current) = occupant.as_ref() {
            return Err(SlotError::AlreadyPending(current.token));
        }

        let token = CorrelationToken(self.next_token.fetch_add(1, Ordering::Relaxed));
        *occupant = Some(PendingRequest {
            token,
            continuation,
        });
        debug!("Installed pending request {token}");
        Ok(token)
    }

    /// Takes the pending request only if it carries `token`.
    pub fn take_if_matches(&self, token: CorrelationToken) -> Option<PendingRequest> {
        let mut occupant = self.lock();
        match occupant.as_ref() {
            Some(current) if current.token == token => {
                debug!("Claimed pending request {token}");
                occupant.take()
            }
            _ => None,
        }
    }

    /// Takes whatever request is pending.
    ///
    /// Platform callbacks carry no token, so in the single-slot model any
    /// callback belongs to the current occupant.
    pub fn take_current(&self) -> Option<PendingRequest> {
        let taken = self.lock().take();
        if let Some(pending) = &taken {
            debug!("Claimed pending request {}", pending.token);
        }
        taken
    }

    pub fn clear_on_timeout_or_cancel(&self, token: CorrelationToken) -> Option<PendingRequest> {
        self.take_if_matches(token)
    }

    pub fn is_pending(&self) -> bool {
        self.lock().is_some()
    }

    pub fn current_token(&self) -> Option<CorrelationToken> {
        self.lock().as_ref().map(PendingRequest::token)
    }
}
