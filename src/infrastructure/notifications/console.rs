use crate::application::{
    ApplicationResult,
    ports::notification::{Mailer, OutboundEmail},
};
use async_trait::async_trait;
use tracing::info;

/// Writes each message to the log instead of delivering it. Used when no
/// SMTP relay is configured.
#[derive(Default, Clone)]
pub struct ConsoleMailer;

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn send_batch(&self, messages: &[OutboundEmail]) -> ApplicationResult<usize> {
        for email in messages {
            info!(
                from = %email.from,
                to = %email.to,
                subject = %email.subject,
                body = %email.body,
                "email (console backend)"
            );
        }
        Ok(messages.len())
    }
}
