use crate::error::{BridgeError, Result};
use rust_decimal::Decimal;

/// A positive monetary amount requested from the terminal.
///
/// This wraps `rust_decimal::Decimal` so that an `Amount` can only exist once it
/// has passed validation. Every payment request carries one.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(BridgeError::InvalidArgument(
                "Amount must be positive".to_string(),
            ))
        }
    }

    /// Validates an amount that may not have been supplied at all.
    pub fn parse(value: Option<Decimal>) -> Result<Self> {
        match value {
            Some(value) => Self::new(value),
            None => Err(BridgeError::InvalidArgument(
                "Amount is required".to_string(),
            )),
        }
    }

    /// Converts a floating point amount, as sent by the UI shell.
    pub fn from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(BridgeError::InvalidArgument(
                "Amount must be a finite number".to_string(),
            ));
        }
        let decimal = Decimal::try_from(value).map_err(|_| {
            BridgeError::InvalidArgument("Amount is out of range".to_string())
        })?;
        Self::new(decimal)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}
