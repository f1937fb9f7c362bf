use std::time::Duration;

use contact_core::{AttemptId, FormFieldSet};
use form_logging::{form_debug, form_warn};
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::decode::decode_body;
use crate::encode::{encode_fields, FORM_CONTENT_TYPE};
use crate::{FailureKind, TransportError};

#[derive(Debug, Clone)]
pub struct TransportSettings {
    /// Page URL the endpoint path is resolved against.
    pub base_url: String,
    /// Relative path of the mail script.
    pub endpoint: String,
    pub connect_timeout: Duration,
    /// `None` leaves the request bounded only by the connection itself.
    pub request_timeout: Option<Duration>,
    pub max_response_bytes: u64,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost/".to_string(),
            endpoint: "_layout/php/send.php".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            max_response_bytes: 64 * 1024,
        }
    }
}

impl TransportSettings {
    pub fn endpoint_url(&self) -> Result<Url, TransportError> {
        Url::parse(&self.base_url)
            .and_then(|base| base.join(&self.endpoint))
            .map_err(|err| TransportError::new(FailureKind::InvalidEndpoint, err.to_string()))
    }
}

/// Sends one attempt's fields and yields the raw response text.
#[async_trait::async_trait]
pub trait SubmissionTransport: Send + Sync {
    async fn send(
        &self,
        attempt: AttemptId,
        fields: &FormFieldSet,
    ) -> Result<String, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    settings: TransportSettings,
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(settings: TransportSettings) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| TransportError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &TransportSettings {
        &self.settings
    }
}

#[async_trait::async_trait]
impl SubmissionTransport for ReqwestTransport {
    async fn send(
        &self,
        attempt: AttemptId,
        fields: &FormFieldSet,
    ) -> Result<String, TransportError> {
        let url = self.settings.endpoint_url()?;
        let body = encode_fields(fields);
        form_debug!(
            attempt = attempt;
            "POST {} ({} fields, {} bytes)",
            url,
            fields.successful_pairs().len(),
            body.len()
        );

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            form_warn!(attempt = attempt; "server answered {}", status);
            return Err(TransportError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned);

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        let text = decode_body(&bytes, content_type.as_deref())
            .map_err(|err| TransportError::new(FailureKind::Decode, err.to_string()))?;
        form_debug!(attempt = attempt; "response received ({} bytes)", bytes.len());
        Ok(text)
    }
}

fn too_large(max_bytes: u64, actual: u64) -> TransportError {
    TransportError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(FailureKind::Timeout, err.to_string());
    }
    TransportError::new(FailureKind::Network, err.to_string())
}
