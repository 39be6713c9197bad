use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::notification::{Mailer, OutboundEmail},
};
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType, transport::smtp::authentication::Credentials,
};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Delivers mail through an SMTP relay, one envelope per recipient.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(settings: &SmtpSettings) -> ApplicationResult<Self> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
            .map_err(|err| {
                ApplicationError::infrastructure(format!("failed to create SMTP transport: {err}"))
            })?
            .port(settings.port);
        if let (Some(username), Some(password)) = (&settings.username, &settings.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }
        Ok(Self {
            transport: builder.build(),
        })
    }
}

fn build_message(email: &OutboundEmail) -> ApplicationResult<Message> {
    let from = email.from.parse().map_err(|err| {
        ApplicationError::infrastructure(format!("invalid from address '{}': {err}", email.from))
    })?;
    let to = email.to.parse().map_err(|err| {
        ApplicationError::infrastructure(format!("invalid recipient '{}': {err}", email.to))
    })?;
    Message::builder()
        .from(from)
        .to(to)
        .subject(email.subject.clone())
        .header(ContentType::TEXT_PLAIN)
        .body(email.body.clone())
        .map_err(|err| ApplicationError::infrastructure(format!("failed to build email: {err}")))
}

/// Builds and delivers each message in turn. A message that cannot be built
/// or delivered is logged and skipped; the batch fails only when nothing got
/// through.
async fn deliver_each<F, Fut>(messages: &[OutboundEmail], mut deliver: F) -> ApplicationResult<usize>
where
    F: FnMut(Message) -> Fut,
    Fut: Future<Output = Result<(), String>>,
{
    let mut sent = 0;
    let mut failed = 0;
    for email in messages {
        let outcome = match build_message(email) {
            Ok(message) => deliver(message).await,
            Err(err) => Err(err.to_string()),
        };
        match outcome {
            Ok(()) => sent += 1,
            Err(err) => {
                failed += 1;
                warn!(recipient = %email.to, error = %err, "skipping undeliverable email");
            }
        }
    }

    if sent == 0 && failed > 0 {
        return Err(ApplicationError::infrastructure(format!(
            "SMTP delivery failed for all {failed} messages"
        )));
    }
    if failed > 0 {
        warn!(sent, failed, "SMTP batch partially delivered");
    } else {
        debug!(sent, "SMTP batch delivered");
    }
    Ok(sent)
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_batch(&self, messages: &[OutboundEmail]) -> ApplicationResult<usize> {
        let transport = &self.transport;
        deliver_each(messages, |message| async move {
            transport
                .send(message)
                .await
                .map(|_| ())
                .map_err(|err| err.to_string())
        })
        .await
    }
}
