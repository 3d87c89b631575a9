use super::request::TerminalRequest;
use async_trait::async_trait;
use thiserror::Error;

/// Why the one-way call to the terminal handler could not be issued.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchFailure {
    #[error("terminal handler {0} is not installed")]
    NotInstalled(String),
    #[error("terminal handler unreachable: {0}")]
    Unreachable(String),
}

/// The out-of-process terminal handler.
///
/// `dispatch` returns once the request has been handed over. The reply, if any,
/// arrives later through the `CallbackDispatcher`.
#[async_trait]
pub trait TerminalHandler: Send + Sync {
    async fn dispatch(&self, request: TerminalRequest) -> Result<(), DispatchFailure>;
}

pub type TerminalHandlerBox = Box<dyn TerminalHandler>;
