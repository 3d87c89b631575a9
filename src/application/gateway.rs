use super::dispatcher::CallbackDispatcher;
use super::slot::{PendingSlot, SlotError};
use crate::config::BridgeConfig;
use crate::domain::amount::Amount;
use crate::domain::outcome::PaymentOutcome;
use crate::domain::ports::TerminalHandlerBox;
use crate::domain::request::{CorrelationToken, PaymentRequest, TerminalRequest};
use crate::error::{BridgeError, Result};
use log::{debug, error, info, warn};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

/// Public entry point for payment requests.
///
/// `PaymentGateway` validates the amount, claims the pending slot and hands the
/// request to the terminal handler. The outcome is delivered later, through the
/// `CallbackDispatcher` sharing the same slot.
pub struct PaymentGateway {
    slot: Arc<PendingSlot>,
    handler: TerminalHandlerBox,
    config: BridgeConfig,
}

impl PaymentGateway {
    /// Creates a new `PaymentGateway`.
    ///
    /// # Arguments
    ///
    /// * `slot` - The pending slot shared with the callback dispatcher.
    /// * `handler` - The terminal handler requests are sent to.
    /// * `config` - Request envelope constants and the default timeout.
    pub fn new(slot: Arc<PendingSlot>, handler: TerminalHandlerBox, config: BridgeConfig) -> Self {
        Self {
            slot,
            handler,
            config,
        }
    }

    /// A dispatcher that resolves requests started by this gateway.
    pub fn dispatcher(&self) -> CallbackDispatcher {
        CallbackDispatcher::new(Arc::clone(&self.slot), self.config.request_code)
    }

    pub fn is_busy(&self) -> bool {
        self.slot.is_pending()
    }

    /// Requests a payment and waits for its outcome.
    pub async fn start_payment(&self, amount: Option<Decimal>) -> Result<PaymentOutcome> {
        self.begin_payment(amount).await?.outcome().await
    }

    /// Like `start_payment`, overriding the configured timeout.
    pub async fn start_payment_with_timeout(
        &self,
        amount: Option<Decimal>,
        timeout: Duration,
    ) -> Result<PaymentOutcome> {
        self.begin_payment(amount)
            .await?
            .with_timeout(Some(timeout))
            .outcome()
            .await
    }

    /// Sends the request to the terminal without waiting for the reply.
    ///
    /// Fails straight away on an invalid amount, on a request already in
    /// progress, or when the terminal handler cannot be reached. In each case
    /// the slot is left as it was before the call.
    pub async fn begin_payment(&self, amount: Option<Decimal>) -> Result<PendingPayment> {
        let amount = Amount::parse(amount)?;

        let (continuation, receiver) = oneshot::channel();
        let token = self.slot.install(continuation).map_err(|err| {
            let SlotError::AlreadyPending(current) = err;
            warn!("Rejecting payment of {}: request {current} still pending", amount.value());
            BridgeError::RequestInProgress
        })?;

        let pending = PendingPayment {
            token,
            receiver,
            slot: Arc::clone(&self.slot),
            timeout: self.config.timeout(),
        };

        let request = PaymentRequest { token, amount };
        let envelope = match TerminalRequest::consume(&request, &self.config) {
            Ok(envelope) => envelope,
            Err(err) => {
                self.slot.take_if_matches(token);
                return Err(err);
            }
        };

        info!(
            "Dispatching payment request {token} for {} to {}",
            amount.value(),
            self.config.handler_component
        );
        if let Err(cause) = self.handler.dispatch(envelope).await {
            error!("Failed to dispatch payment request {token}: {cause}");
            self.slot.take_if_matches(token);
            return Err(BridgeError::Dispatch(cause));
        }

        Ok(pending)
    }

    /// Cancels the request with `token` if it is still pending.
    pub fn cancel(&self, token: CorrelationToken) -> bool {
        match self.slot.clear_on_timeout_or_cancel(token) {
            Some(pending) => {
                info!("Cancelling payment request {token}");
                pending.resolve(Err(BridgeError::Cancelled));
                true
            }
            None => false,
        }
    }
}

/// A dispatched payment waiting for the terminal's reply.
///
/// Dropping it before the outcome arrives releases the slot.
#[derive(Debug)]
pub struct PendingPayment {
    token: CorrelationToken,
    receiver: oneshot::Receiver<Result<PaymentOutcome>>,
    slot: Arc<PendingSlot>,
    timeout: Option<Duration>,
}

impl PendingPayment {
    pub fn token(&self) -> CorrelationToken {
        self.token
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Waits until the callback, the timeout or a cancellation resolves the
    /// request, whichever claims the slot first.
    pub async fn outcome(mut self) -> Result<PaymentOutcome> {
        if let Some(limit) = self.timeout {
            if let Ok(received) = tokio::time::timeout(limit, &mut self.receiver).await {
                return received.unwrap_or(Err(BridgeError::Cancelled));
            }

            match self.slot.clear_on_timeout_or_cancel(self.token) {
                Some(pending) => {
                    warn!("Payment request {} timed out after {limit:?}", self.token);
                    pending.resolve(Err(BridgeError::Timeout(limit)));
                }
                None => debug!(
                    "Payment request {} was claimed by its callback as the timer fired",
                    self.token
                ),
            }
        }

        // Only reached without a timeout or after the timer elapsed, so the
        // receiver has not completed yet.
        (&mut self.receiver).await.unwrap_or(Err(BridgeError::Cancelled))
    }
}

impl Drop for PendingPayment {
    fn drop(&mut self) {
        if self.slot.clear_on_timeout_or_cancel(self.token).is_some() {
            info!("Payment request {} abandoned by its caller", self.token);
        }
    }
}
