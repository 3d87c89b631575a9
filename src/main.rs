use clap::{Parser, ValueEnum};
use emv_bridge::application::gateway::PaymentGateway;
use emv_bridge::application::dispatcher::CallbackDispatcher;
use emv_bridge::application::slot::PendingSlot;
use emv_bridge::config::BridgeConfig;
use emv_bridge::domain::callback::CallbackPayload;
use emv_bridge::infrastructure::simulated::{SimulatedTerminal, TerminalScript};
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Reply with the given response fields
    Reply,
    /// Reply without any data
    Empty,
    /// Never reply
    Silent,
    /// Refuse the request
    Unreachable,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Amount to charge
    #[arg(allow_negative_numbers = true)]
    amount: Decimal,

    /// How the simulated terminal behaves
    #[arg(long, value_enum, default_value_t = Mode::Reply)]
    mode: Mode,

    /// Response code sent back by the terminal
    #[arg(long, default_value = "00")]
    response_code: String,

    #[arg(long)]
    response_message: Option<String>,

    #[arg(long)]
    transaction_data: Option<String>,

    /// Delay before the terminal replies, in milliseconds
    #[arg(long, default_value_t = 50)]
    delay_ms: u64,

    /// Give up waiting for the reply after this many milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,
}

impl Cli {
    fn script(&self) -> TerminalScript {
        match self.mode {
            Mode::Reply => TerminalScript::Reply(CallbackPayload {
                response_code: Some(self.response_code.clone()),
                response_message: self.response_message.clone(),
                transaction_data: self.transaction_data.clone(),
            }),
            Mode::Empty => TerminalScript::EmptyReply,
            Mode::Silent => TerminalScript::Silent,
            Mode::Unreachable => TerminalScript::Unreachable,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let mut config = BridgeConfig::load().into_diagnostic()?;
    if cli.timeout_ms.is_some() {
        config.timeout_ms = cli.timeout_ms;
    }

    let slot = Arc::new(PendingSlot::new());
    let dispatcher = CallbackDispatcher::new(Arc::clone(&slot), config.request_code);
    let terminal = SimulatedTerminal::new(
        dispatcher,
        cli.script(),
        Duration::from_millis(cli.delay_ms),
    );
    let gateway = PaymentGateway::new(slot, Box::new(terminal), config);

    let outcome = gateway
        .start_payment(Some(cli.amount))
        .await
        .into_diagnostic()?;

    println!("{}", serde_json::to_string_pretty(&outcome).into_diagnostic()?);
    Ok(())
}
