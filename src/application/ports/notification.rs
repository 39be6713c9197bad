// src/application/ports/notification.rs
use crate::application::ApplicationResult;
use async_trait::async_trait;

/// One message, one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub subject: String,
    pub body: String,
    pub from: String,
    pub to: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Delivers the whole batch. Success or failure is reported for the batch
    /// as a whole; returns the number of messages handed off.
    async fn send_batch(&self, messages: &[OutboundEmail]) -> ApplicationResult<usize>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BroadcastOutcome {
    Sent,
    /// No broadcast credential is configured.
    Skipped,
    Failed,
}

#[async_trait]
pub trait Broadcaster: Send + Sync {
    async fn broadcast(&self, summary: &str) -> ApplicationResult<BroadcastOutcome>;
}
