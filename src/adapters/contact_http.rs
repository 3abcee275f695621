use crate::domain::model::ContactMessage;
use crate::domain::ports::{ContactReceipt, ContactTransport};
use crate::utils::error::{BookingError, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use std::time::Duration;

/// Posts contact messages as JSON to a configured endpoint.
#[derive(Debug, Clone)]
pub struct HttpContactTransport {
    client: Client,
    endpoint: String,
}

impl HttpContactTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ContactTransport for HttpContactTransport {
    async fn deliver(&self, message: &ContactMessage) -> Result<ContactReceipt> {
        tracing::debug!("Posting contact message to: {}", self.endpoint);
        let response = self.client.post(self.endpoint.as_str()).json(message).send().await?;

        let status = response.status();
        tracing::debug!("Contact endpoint response status: {}", status);

        if !status.is_success() {
            return Err(BookingError::RemoteRejected {
                status: status.as_u16(),
            });
        }

        Ok(ContactReceipt {
            delivered_at: Utc::now(),
        })
    }
}
