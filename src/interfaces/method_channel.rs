//! The envelope the UI shell speaks: a named method call with loosely-typed
//! arguments in, a success/error/not-implemented response out.

use crate::application::gateway::PaymentGateway;
use crate::domain::amount::Amount;
use crate::domain::outcome::PaymentOutcome;
use crate::error::{BridgeError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

pub const START_PAYMENT_METHOD: &str = "startPayment";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApprovedResult {
    pub response_code: String,
    pub response_message: Option<String>,
    pub transaction_data: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum MethodResponse {
    Success {
        result: ApprovedResult,
    },
    Error {
        code: String,
        message: String,
        details: Option<String>,
    },
    NotImplemented,
}

impl From<PaymentOutcome> for MethodResponse {
    fn from(outcome: PaymentOutcome) -> Self {
        if outcome.is_approved() {
            MethodResponse::Success {
                result: ApprovedResult {
                    response_code: outcome.code().to_string(),
                    response_message: outcome.message().map(str::to_string),
                    transaction_data: outcome.raw_data().map(str::to_string),
                },
            }
        } else {
            MethodResponse::Error {
                code: outcome.code().to_string(),
                message: outcome.description().to_string(),
                details: outcome.raw_data().map(str::to_string),
            }
        }
    }
}

impl From<BridgeError> for MethodResponse {
    fn from(err: BridgeError) -> Self {
        let message = match &err {
            BridgeError::InvalidArgument(reason) => reason.clone(),
            other => other.to_string(),
        };
        MethodResponse::Error {
            code: err.code().to_string(),
            message,
            details: None,
        }
    }
}

/// Routes UI method calls onto the payment gateway.
pub struct MethodChannel {
    gateway: Arc<PaymentGateway>,
}

impl MethodChannel {
    pub fn new(gateway: Arc<PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(&self, call: MethodCall) -> MethodResponse {
        match call.method.as_str() {
            START_PAYMENT_METHOD => match self.start_payment(&call.arguments).await {
                Ok(outcome) => outcome.into(),
                Err(err) => err.into(),
            },
            _ => MethodResponse::NotImplemented,
        }
    }

    /// Handles a JSON-encoded call and returns the JSON-encoded response.
    pub async fn handle_json(&self, raw: &str) -> Result<String> {
        let call: MethodCall = serde_json::from_str(raw)?;
        let response = self.handle(call).await;
        Ok(serde_json::to_string(&response)?)
    }

    async fn start_payment(&self, arguments: &Map<String, Value>) -> Result<PaymentOutcome> {
        let amount = match arguments.get("amount").and_then(Value::as_f64) {
            Some(value) => Some(Decimal::from(Amount::from_f64(value)?)),
            None => None,
        };
        self.gateway.start_payment(amount).await
    }
}
