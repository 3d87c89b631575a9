mod common;

use common::recording_gateway;
use emv_bridge::interfaces::method_channel::{MethodCall, MethodChannel, MethodResponse};
use serde_json::{Map, Value, json};
use std::time::Duration;

fn call(method: &str, arguments: Value) -> MethodCall {
    let arguments: Map<String, Value> = match arguments {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    MethodCall {
        method: method.to_string(),
        arguments,
    }
}

#[tokio::test]
async fn test_start_payment_success() {
    let (gateway, terminal) = recording_gateway();
    let channel = MethodChannel::new(gateway.clone());
    let dispatcher = gateway.dispatcher();

    let responder = tokio::spawn(async move {
        while terminal.requests().await.is_empty() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        dispatcher.on_raw_callback(
            1001,
            Some(r#"{"responseCode":"00","responseMessage":"OK","transactionData":"{}"}"#),
        );
    });

    let response = channel
        .handle(call("startPayment", json!({ "amount": 10.5 })))
        .await;
    responder.await.unwrap();

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["status"], "success");
    assert_eq!(json["result"]["responseCode"], "00");
    assert_eq!(json["result"]["responseMessage"], "OK");
    assert_eq!(json["result"]["transactionData"], "{}");
}

#[tokio::test]
async fn test_missing_amount_is_invalid_argument() {
    let (gateway, terminal) = recording_gateway();
    let channel = MethodChannel::new(gateway);

    let response = channel.handle(call("startPayment", json!({}))).await;
    assert_eq!(
        response,
        MethodResponse::Error {
            code: "INVALID_ARGUMENT".to_string(),
            message: "Amount is required".to_string(),
            details: None,
        }
    );

    let response = channel
        .handle(call("startPayment", json!({ "amount": -1.0 })))
        .await;
    assert!(matches!(response, MethodResponse::Error { ref code, .. } if code == "INVALID_ARGUMENT"));
    assert!(terminal.requests().await.is_empty());
}

#[tokio::test]
async fn test_unknown_method_is_not_implemented() {
    let (gateway, _terminal) = recording_gateway();
    let channel = MethodChannel::new(gateway);

    let response = channel.handle(call("refund", json!({ "amount": 1.0 }))).await;
    assert_eq!(response, MethodResponse::NotImplemented);
}

#[tokio::test]
async fn test_json_round_trip_for_declined_payment() {
    let (gateway, terminal) = recording_gateway();
    let channel = MethodChannel::new(gateway.clone());
    let dispatcher = gateway.dispatcher();

    let responder = tokio::spawn(async move {
        while terminal.requests().await.is_empty() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        dispatcher.on_raw_callback(
            1001,
            Some(r#"{"responseCode":"05","responseMessage":"Do not honor","transactionData":"raw"}"#),
        );
    });

    let raw = channel
        .handle_json(r#"{"method":"startPayment","arguments":{"amount":5}}"#)
        .await
        .unwrap();
    responder.await.unwrap();

    let json: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["status"], "error");
    assert_eq!(json["code"], "05");
    assert_eq!(json["message"], "Do not honor");
    assert_eq!(json["details"], "raw");
}

#[tokio::test]
async fn test_malformed_call_is_rejected() {
    let (gateway, _terminal) = recording_gateway();
    let channel = MethodChannel::new(gateway);

    assert!(channel.handle_json("{not json").await.is_err());
}
