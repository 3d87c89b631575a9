use emv_bridge::application::dispatcher::CallbackDispatcher;
use emv_bridge::application::gateway::PaymentGateway;
use emv_bridge::application::slot::PendingSlot;
use emv_bridge::config::BridgeConfig;
use emv_bridge::domain::callback::CallbackPayload;
use emv_bridge::domain::ports::TerminalHandlerBox;
use emv_bridge::infrastructure::simulated::{SimulatedTerminal, TerminalScript};
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_gateway_is_shareable_across_tasks() {
    let slot = Arc::new(PendingSlot::new());
    let dispatcher = CallbackDispatcher::new(Arc::clone(&slot), 1001);
    let terminal: TerminalHandlerBox = Box::new(
        SimulatedTerminal::new(
            dispatcher,
            TerminalScript::Reply(CallbackPayload {
                response_code: Some("01".to_string()),
                ..Default::default()
            }),
            Duration::from_millis(5),
        )
        .with_replies(3),
    );
    let gateway = Arc::new(PaymentGateway::new(slot, terminal, BridgeConfig::default()));

    // Verify Send + Sync by spawning tasks
    let handle = {
        let gateway = Arc::clone(&gateway);
        tokio::spawn(async move { gateway.start_payment(Some(dec!(7.25))).await })
    };

    let outcome = handle.await.unwrap().unwrap();
    assert!(outcome.is_approved());
    assert_eq!(outcome.code(), "01");

    // Duplicate replies from the simulated terminal land on an empty slot.
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(!gateway.is_busy());
}

#[tokio::test]
async fn test_unreachable_terminal_surfaces_dispatch_error() {
    let slot = Arc::new(PendingSlot::new());
    let dispatcher = CallbackDispatcher::new(Arc::clone(&slot), 1001);
    let terminal = SimulatedTerminal::new(dispatcher, TerminalScript::Unreachable, Duration::ZERO);
    let gateway = PaymentGateway::new(slot, Box::new(terminal), BridgeConfig::default());

    let err = gateway.start_payment(Some(dec!(1))).await.unwrap_err();
    assert_eq!(err.code(), "INTENT_ERROR");
    assert!(err.to_string().contains("com.arke2"));
    assert!(!gateway.is_busy());
}
