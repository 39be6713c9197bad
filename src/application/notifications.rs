// src/application/notifications.rs
//! Post-commit fan-out for newly approved content: one email per distinct
//! subscriber, sent as a single batch, followed by the external broadcast.
//! Every failure on this path is logged and swallowed.
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::application::ports::notification::{
    BroadcastOutcome, Broadcaster, Mailer, OutboundEmail,
};
use crate::domain::content::{ContentItem, SubscriberResolver};

pub const PREVIEW_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchMode {
    /// Spawned onto the runtime; the caller never waits.
    #[default]
    Detached,
    /// Awaited by the caller after the write, bounded by a timeout.
    Inline,
}

#[derive(Debug, Clone)]
pub struct NotificationSettings {
    pub from_email: String,
    pub mode: DispatchMode,
    pub timeout: Duration,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            from_email: "noreply@newsportal.local".into(),
            mode: DispatchMode::default(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// What one dispatch did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub recipients: usize,
    pub emails_sent: usize,
    pub email_error: Option<String>,
    pub broadcast: BroadcastOutcome,
}

pub struct NotificationService {
    resolver: Arc<SubscriberResolver>,
    mailer: Arc<dyn Mailer>,
    broadcaster: Arc<dyn Broadcaster>,
    settings: NotificationSettings,
}

impl NotificationService {
    pub fn new(
        resolver: Arc<SubscriberResolver>,
        mailer: Arc<dyn Mailer>,
        broadcaster: Arc<dyn Broadcaster>,
        settings: NotificationSettings,
    ) -> Self {
        Self {
            resolver,
            mailer,
            broadcaster,
            settings,
        }
    }

    /// Runs `notify_approved` according to the configured mode. Must only be
    /// called once the status write has committed.
    pub async fn dispatch(self: &Arc<Self>, item: ContentItem) {
        match self.settings.mode {
            DispatchMode::Detached => {
                let service = Arc::clone(self);
                tokio::spawn(async move {
                    service.notify_approved(&item).await;
                });
            }
            DispatchMode::Inline => {
                let id = item.id;
                if tokio::time::timeout(self.settings.timeout, self.notify_approved(&item))
                    .await
                    .is_err()
                {
                    warn!(content_id = %id, "notification dispatch timed out");
                }
            }
        }
    }

    pub async fn notify_approved(&self, item: &ContentItem) -> DispatchReport {
        let messages = match self.resolver.recipients(item).await {
            Ok(recipients) => self.compose(item, recipients.iter().map(|u| u.email.as_str())),
            Err(err) => {
                warn!(content_id = %item.id, error = %err, "failed to resolve subscribers");
                let broadcast = self.broadcast(item).await;
                return DispatchReport {
                    recipients: 0,
                    emails_sent: 0,
                    email_error: Some(err.to_string()),
                    broadcast,
                };
            }
        };

        let recipients = messages.len();
        let (emails_sent, email_error) = self.send(item, &messages).await;
        let broadcast = self.broadcast(item).await;

        DispatchReport {
            recipients,
            emails_sent,
            email_error,
            broadcast,
        }
    }

    fn compose<'a>(
        &self,
        item: &ContentItem,
        recipients: impl Iterator<Item = &'a str>,
    ) -> Vec<OutboundEmail> {
        let subject = item.kind.notification_subject(&item.title);
        let body = item.body.preview(PREVIEW_CHARS);
        recipients
            .map(|to| OutboundEmail {
                subject: subject.clone(),
                body: body.clone(),
                from: self.settings.from_email.clone(),
                to: to.to_string(),
            })
            .collect()
    }

    async fn send(&self, item: &ContentItem, messages: &[OutboundEmail]) -> (usize, Option<String>) {
        if messages.is_empty() {
            debug!(content_id = %item.id, "no subscribers to notify");
            return (0, None);
        }
        match self.mailer.send_batch(messages).await {
            Ok(sent) => {
                info!(content_id = %item.id, kind = %item.kind, sent, "approval emails sent");
                (sent, None)
            }
            Err(err) => {
                warn!(content_id = %item.id, error = %err, "approval email batch failed");
                (0, Some(err.to_string()))
            }
        }
    }

    async fn broadcast(&self, item: &ContentItem) -> BroadcastOutcome {
        let summary = format!("{} - {}", item.kind.label(), item.title);
        match self.broadcaster.broadcast(&summary).await {
            Ok(BroadcastOutcome::Skipped) => {
                debug!(content_id = %item.id, "broadcast skipped, no credential configured");
                BroadcastOutcome::Skipped
            }
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(content_id = %item.id, error = %err, "broadcast failed");
                BroadcastOutcome::Failed
            }
        }
    }
}
