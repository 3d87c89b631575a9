use crate::error::Result;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_APPLICATION_NAME: &str = "ArkeAcquiringProject";
pub const DEFAULT_HANDLER_PACKAGE: &str = "com.arke2";
pub const DEFAULT_HANDLER_COMPONENT: &str = "com.arke.thirdcalling.ThirdPartyCallActivity";
pub const DEFAULT_REQUEST_CODE: i32 = 1001;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BridgeConfig {
    pub application_name: String,
    pub handler_package: String,
    pub handler_component: String,
    pub request_code: i32,
    /// How long to wait for the terminal's callback. Unset or `0` waits forever.
    pub timeout_ms: Option<u64>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            application_name: DEFAULT_APPLICATION_NAME.to_string(),
            handler_package: DEFAULT_HANDLER_PACKAGE.to_string(),
            handler_component: DEFAULT_HANDLER_COMPONENT.to_string(),
            request_code: DEFAULT_REQUEST_CODE,
            timeout_ms: None,
        }
    }
}

impl BridgeConfig {
    /// Loads the defaults overridden by `BRIDGE_*` environment variables.
    pub fn load() -> Result<Self> {
        let config_builder = config::Config::builder()
            .set_default("application_name", DEFAULT_APPLICATION_NAME)?
            .set_default("handler_package", DEFAULT_HANDLER_PACKAGE)?
            .set_default("handler_component", DEFAULT_HANDLER_COMPONENT)?
            .set_default("request_code", i64::from(DEFAULT_REQUEST_CODE))?
            .add_source(config::Environment::with_prefix("BRIDGE"))
            .build()?;

        Ok(config_builder.try_deserialize()?)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }
}
