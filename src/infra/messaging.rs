use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

/// Event kinds the messaging transport distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationEvent {
    ChangeReturnStatus,
}

/// A single outbound email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Routing metadata accompanying an email send. Client fields are only
/// set for client-facing mail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchContext {
    pub reseller_id: i64,
    pub client_id: Option<i64>,
    pub event: NotificationEvent,
    pub status_to: Option<i32>,
}

/// Outcome reported by the SMS channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmsDelivery {
    pub sent: bool,
    pub error: Option<String>,
}

/// Outbound transport for email and SMS delivery. Send failures are
/// reported, never retried here.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagingGateway: Send + Sync {
    async fn send_email(&self, message: EmailMessage, context: DispatchContext) -> Result<()>;

    async fn send_sms(
        &self,
        reseller_id: i64,
        client_id: i64,
        event: NotificationEvent,
        status_to: i32,
        params: &BTreeMap<String, String>,
    ) -> Result<SmsDelivery>;
}
