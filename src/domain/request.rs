use super::amount::Amount;
use crate::config::BridgeConfig;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The only terminal operation a payment request asks for.
pub const CONSUME_TRANSACTION: &str = "Consume";

/// Identifies one outstanding payment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CorrelationToken(pub u64);

impl fmt::Display for CorrelationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    pub token: CorrelationToken,
    pub amount: Amount,
}

/// Body of the `transactionData` extra, sent as a JSON number.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct TransactionData {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl TransactionData {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// The envelope handed to the terminal handler by the one-way call.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TerminalRequest {
    pub handler_package: String,
    pub handler_component: String,
    pub application_name: String,
    pub transaction_name: String,
    pub transaction_data: String,
    pub request_code: i32,
    pub token: CorrelationToken,
}

impl TerminalRequest {
    /// Builds the "Consume" envelope for a validated request.
    pub fn consume(request: &PaymentRequest, config: &BridgeConfig) -> Result<Self> {
        let transaction_data = TransactionData {
            amount: request.amount.value(),
        }
        .to_json()?;

        Ok(Self {
            handler_package: config.handler_package.clone(),
            handler_component: config.handler_component.clone(),
            application_name: config.application_name.clone(),
            transaction_name: CONSUME_TRANSACTION.to_string(),
            transaction_data,
            request_code: config.request_code,
            token: request.token,
        })
    }

    pub fn transaction(&self) -> Result<TransactionData> {
        Ok(serde_json::from_str(&self.transaction_data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_consume_envelope() {
        let request = PaymentRequest {
            token: CorrelationToken(7),
            amount: Amount::new(dec!(10.50)).unwrap(),
        };
        let envelope = TerminalRequest::consume(&request, &BridgeConfig::default()).unwrap();

        assert_eq!(envelope.transaction_name, "Consume");
        assert_eq!(envelope.application_name, "ArkeAcquiringProject");
        assert_eq!(envelope.request_code, 1001);
        assert_eq!(envelope.token, CorrelationToken(7));

        let data: serde_json::Value = serde_json::from_str(&envelope.transaction_data).unwrap();
        assert_eq!(data["amount"].as_f64(), Some(10.5));
        assert_eq!(envelope.transaction().unwrap().amount, dec!(10.5));
    }

    #[test]
    fn test_envelope_serializes_camel_case() {
        let request = PaymentRequest {
            token: CorrelationToken(1),
            amount: Amount::new(dec!(5)).unwrap(),
        };
        let envelope = TerminalRequest::consume(&request, &BridgeConfig::default()).unwrap();
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["applicationName"], "ArkeAcquiringProject");
        assert_eq!(json["transactionName"], "Consume");
        assert_eq!(
            json["handlerComponent"],
            "com.arke.thirdcalling.ThirdPartyCallActivity"
        );
    }
}
