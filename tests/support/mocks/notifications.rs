// tests/support/mocks/notifications.rs
use async_trait::async_trait;
use news_portal::application::{
    ApplicationResult,
    error::ApplicationError,
    ports::notification::{BroadcastOutcome, Broadcaster, Mailer, OutboundEmail},
};
use std::sync::Mutex;
use tokio::sync::Notify;

/// Keeps every batch it was asked to send.
#[derive(Default)]
pub struct RecordingMailer {
    batches: Mutex<Vec<Vec<OutboundEmail>>>,
}

impl RecordingMailer {
    pub fn batches(&self) -> Vec<Vec<OutboundEmail>> {
        self.batches.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<OutboundEmail> {
        self.batches().into_iter().flatten().collect()
    }

    pub fn recipients(&self) -> Vec<String> {
        let mut to: Vec<String> = self.messages().into_iter().map(|m| m.to).collect();
        to.sort();
        to
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_batch(&self, messages: &[OutboundEmail]) -> ApplicationResult<usize> {
        self.batches.lock().unwrap().push(messages.to_vec());
        Ok(messages.len())
    }
}

/// Rejects every batch, counting the attempts.
#[derive(Default)]
pub struct FailingMailer {
    attempts: Mutex<usize>,
}

impl FailingMailer {
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl Mailer for FailingMailer {
    async fn send_batch(&self, _messages: &[OutboundEmail]) -> ApplicationResult<usize> {
        *self.attempts.lock().unwrap() += 1;
        Err(ApplicationError::infrastructure("smtp relay unreachable"))
    }
}

#[derive(Default)]
pub struct RecordingBroadcaster {
    summaries: Mutex<Vec<String>>,
}

impl RecordingBroadcaster {
    pub fn summaries(&self) -> Vec<String> {
        self.summaries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Broadcaster for RecordingBroadcaster {
    async fn broadcast(&self, summary: &str) -> ApplicationResult<BroadcastOutcome> {
        self.summaries.lock().unwrap().push(summary.to_string());
        Ok(BroadcastOutcome::Sent)
    }
}

/// Refuses every broadcast.
#[derive(Default)]
pub struct FailingBroadcaster {
    attempts: Mutex<usize>,
}

impl FailingBroadcaster {
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl Broadcaster for FailingBroadcaster {
    async fn broadcast(&self, _summary: &str) -> ApplicationResult<BroadcastOutcome> {
        *self.attempts.lock().unwrap() += 1;
        Err(ApplicationError::infrastructure("broadcast endpoint returned 503"))
    }
}

/// Holds each batch until `release` is called, then records it.
#[derive(Default)]
pub struct GatedMailer {
    gate: Notify,
    attempts: Mutex<usize>,
    delivered: RecordingMailer,
}

impl GatedMailer {
    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }

    pub fn batches(&self) -> Vec<Vec<OutboundEmail>> {
        self.delivered.batches()
    }
}

#[async_trait]
impl Mailer for GatedMailer {
    async fn send_batch(&self, messages: &[OutboundEmail]) -> ApplicationResult<usize> {
        *self.attempts.lock().unwrap() += 1;
        self.gate.notified().await;
        self.delivered.send_batch(messages).await
    }
}
