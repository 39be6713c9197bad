use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::notification::{BroadcastOutcome, Broadcaster},
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Serialize)]
struct BroadcastPost<'a> {
    text: &'a str,
}

/// Posts a one-line summary to an external endpoint with a bearer credential.
#[derive(Clone)]
pub struct HttpBroadcaster {
    client: Client,
    endpoint: String,
    bearer_token: String,
}

impl HttpBroadcaster {
    pub fn new(
        endpoint: impl Into<String>,
        bearer_token: impl Into<String>,
        timeout: Duration,
    ) -> ApplicationResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            bearer_token: bearer_token.into(),
        })
    }
}

#[async_trait]
impl Broadcaster for HttpBroadcaster {
    async fn broadcast(&self, summary: &str) -> ApplicationResult<BroadcastOutcome> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.bearer_token)
            .json(&BroadcastPost { text: summary })
            .send()
            .await
            .map_err(|err| ApplicationError::infrastructure(format!("broadcast request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApplicationError::infrastructure(format!(
                "broadcast endpoint answered {status}"
            )));
        }
        info!(endpoint = %self.endpoint, "broadcast posted");
        Ok(BroadcastOutcome::Sent)
    }
}

/// Stand-in when no broadcast credential is configured.
#[derive(Default, Clone)]
pub struct DisabledBroadcaster;

#[async_trait]
impl Broadcaster for DisabledBroadcaster {
    async fn broadcast(&self, summary: &str) -> ApplicationResult<BroadcastOutcome> {
        tracing::debug!(%summary, "broadcast disabled");
        Ok(BroadcastOutcome::Skipped)
    }
}
