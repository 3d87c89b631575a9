use crate::application::dispatcher::CallbackDispatcher;
use crate::domain::callback::CallbackPayload;
use crate::domain::ports::{DispatchFailure, TerminalHandler};
use crate::domain::request::TerminalRequest;
use async_trait::async_trait;
use log::info;
use std::time::Duration;

/// How the simulated terminal answers a request.
#[derive(Debug, Clone, PartialEq)]
pub enum TerminalScript {
    /// Reply with this payload.
    Reply(CallbackPayload),
    /// Reply without any data.
    EmptyReply,
    /// Accept the request and never reply.
    Silent,
    /// Refuse the one-way call.
    Unreachable,
}

/// A stand-in for the external terminal handler.
///
/// Replies arrive on a separate tokio task after `delay`, through the same
/// `CallbackDispatcher` a real platform callback would use.
#[derive(Debug, Clone)]
pub struct SimulatedTerminal {
    dispatcher: CallbackDispatcher,
    script: TerminalScript,
    delay: Duration,
    replies: usize,
}

impl SimulatedTerminal {
    pub fn new(dispatcher: CallbackDispatcher, script: TerminalScript, delay: Duration) -> Self {
        Self {
            dispatcher,
            script,
            delay,
            replies: 1,
        }
    }

    /// Deliver each reply `replies` times, as a misbehaving platform might.
    pub fn with_replies(mut self, replies: usize) -> Self {
        self.replies = replies;
        self
    }
}

#[async_trait]
impl TerminalHandler for SimulatedTerminal {
    async fn dispatch(&self, request: TerminalRequest) -> Result<(), DispatchFailure> {
        let payload = match &self.script {
            TerminalScript::Unreachable => {
                return Err(DispatchFailure::Unreachable(format!(
                    "{}/{}",
                    request.handler_package, request.handler_component
                )));
            }
            TerminalScript::Silent => {
                info!("Simulated terminal accepted request {} and will stay silent", request.token);
                return Ok(());
            }
            TerminalScript::Reply(payload) => Some(payload.clone()),
            TerminalScript::EmptyReply => None,
        };

        let dispatcher = self.dispatcher.clone();
        let delay = self.delay;
        let replies = self.replies;
        let request_code = request.request_code;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            for _ in 0..replies {
                let disposition = dispatcher.on_callback(request_code, payload.clone());
                info!("Simulated terminal reply handled as {disposition:?}");
            }
        });
        Ok(())
    }
}
