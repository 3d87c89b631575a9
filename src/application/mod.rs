//! Application layer correlating payment requests with terminal callbacks.
//!
//! The `PaymentGateway` starts requests and the `CallbackDispatcher` resolves
//! them. The two never talk to each other directly: the `PendingSlot` they
//! share is the only state both sides touch.

pub mod dispatcher;
pub mod gateway;
pub mod slot;
