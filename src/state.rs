// src/state.rs
use std::fmt;
use std::sync::Arc;

use crate::{
    errors::{TeknisiError, TeknisiResult},
    services::{
        messaging_service::{
            DEFAULT_WHATSAPP_API_URL, LogGateway, MemoryGateway, NotificationGateway, WhatsAppConfig,
            WhatsAppGateway,
        },
        notification_service::Notifier,
    },
};

pub const GATEWAY_ENV: &str = "TEKNISI_GATEWAY";
pub const WHATSAPP_URL_ENV: &str = "WHATSAPP_API_URL";
pub const WHATSAPP_TOKEN_ENV: &str = "WHATSAPP_API_TOKEN";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayKind {
    Log,
    Memory,
    WhatsApp,
}

impl GatewayKind {
    fn parse(value: &str) -> TeknisiResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "log" => Ok(GatewayKind::Log),
            "memory" => Ok(GatewayKind::Memory),
            "whatsapp" | "wa" => Ok(GatewayKind::WhatsApp),
            other => Err(TeknisiError::configuration(format!(
                "{} must be one of log, memory, whatsapp (got '{}')",
                GATEWAY_ENV, other
            ))),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub gateway: GatewayKind,
    pub whatsapp_api_url: String,
    pub whatsapp_api_token: Option<String>,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("gateway", &self.gateway)
            .field("whatsapp_api_url", &self.whatsapp_api_url)
            .field(
                "whatsapp_api_token",
                &self.whatsapp_api_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gateway: GatewayKind::Log,
            whatsapp_api_url: DEFAULT_WHATSAPP_API_URL.to_string(),
            whatsapp_api_token: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> TeknisiResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> TeknisiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let gateway = match lookup(GATEWAY_ENV) {
            Some(value) => GatewayKind::parse(&value)?,
            None => GatewayKind::Log,
        };

        Ok(Self {
            gateway,
            whatsapp_api_url: lookup(WHATSAPP_URL_ENV)
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_WHATSAPP_API_URL.to_string()),
            whatsapp_api_token: lookup(WHATSAPP_TOKEN_ENV).filter(|token| !token.trim().is_empty()),
        })
    }

    /// Errors when the WhatsApp gateway is selected without a token.
    pub fn require_complete(self) -> TeknisiResult<Self> {
        if self.gateway == GatewayKind::WhatsApp && self.whatsapp_api_token.is_none() {
            return Err(TeknisiError::missing_env(WHATSAPP_TOKEN_ENV));
        }
        Ok(self)
    }

    /// The memory gateway built here is type-erased; use [`AppState::outbox`] to read it.
    pub fn build_gateway(&self) -> Arc<dyn NotificationGateway> {
        match (self.gateway, &self.whatsapp_api_token) {
            (GatewayKind::WhatsApp, Some(token)) => Arc::new(WhatsAppGateway::new(WhatsAppConfig {
                api_url: self.whatsapp_api_url.clone(),
                api_token: token.clone(),
            })),
            (GatewayKind::WhatsApp, None) => {
                tracing::warn!("{} not set, using log notification gateway", WHATSAPP_TOKEN_ENV);
                Arc::new(LogGateway)
            }
            (GatewayKind::Memory, _) => Arc::new(MemoryGateway::new()),
            (GatewayKind::Log, _) => Arc::new(LogGateway),
        }
    }
}

pub struct AppState {
    pub notifier: Notifier,
    pub config: AppConfig,
    outbox: Option<Arc<MemoryGateway>>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let outbox = (config.gateway == GatewayKind::Memory).then(|| Arc::new(MemoryGateway::new()));
        let gateway: Arc<dyn NotificationGateway> = match &outbox {
            Some(memory) => memory.clone(),
            None => config.build_gateway(),
        };

        let notifier = Notifier::new(gateway);
        tracing::info!("Notifications go through the '{}' gateway", notifier.gateway_name());

        Self { notifier, config, outbox }
    }

    /// Messages held by the memory gateway; `None` for any other gateway.
    pub fn outbox(&self) -> Option<&MemoryGateway> {
        self.outbox.as_deref()
    }

    pub fn from_env() -> TeknisiResult<Self> {
        Ok(Self::new(AppConfig::from_env()?))
    }
}
