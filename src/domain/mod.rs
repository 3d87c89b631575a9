pub mod amount;
pub mod callback;
pub mod codec;
pub mod outcome;
pub mod ports;
pub mod request;
