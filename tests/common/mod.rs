#![allow(dead_code)]

use async_trait::async_trait;
use emv_bridge::application::gateway::PaymentGateway;
use emv_bridge::application::slot::PendingSlot;
use emv_bridge::config::BridgeConfig;
use emv_bridge::domain::ports::{DispatchFailure, TerminalHandler};
use emv_bridge::domain::request::TerminalRequest;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Records every dispatched request and never replies on its own.
#[derive(Default, Clone)]
pub struct RecordingTerminal {
    requests: Arc<Mutex<Vec<TerminalRequest>>>,
}

impl RecordingTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn requests(&self) -> Vec<TerminalRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl TerminalHandler for RecordingTerminal {
    async fn dispatch(&self, request: TerminalRequest) -> Result<(), DispatchFailure> {
        self.requests.lock().await.push(request);
        Ok(())
    }
}

pub fn gateway_with(terminal: RecordingTerminal, config: BridgeConfig) -> Arc<PaymentGateway> {
    Arc::new(PaymentGateway::new(
        Arc::new(PendingSlot::new()),
        Box::new(terminal),
        config,
    ))
}

pub fn recording_gateway() -> (Arc<PaymentGateway>, RecordingTerminal) {
    let terminal = RecordingTerminal::new();
    (gateway_with(terminal.clone(), BridgeConfig::default()), terminal)
}
