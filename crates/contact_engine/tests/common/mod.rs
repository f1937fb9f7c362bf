use std::sync::{Arc, Mutex};
use std::time::Duration;

use contact_core::{AttemptId, FormFieldSet};
use contact_engine::{FailureKind, SubmissionTransport, TransportError};

/// Transport double that answers every call with a canned result and
/// remembers what it was asked to send.
#[derive(Clone)]
pub struct StubTransport {
    response: Result<String, TransportError>,
    delay: Option<Duration>,
    sent: Arc<Mutex<Vec<(AttemptId, FormFieldSet)>>>,
}

#[allow(dead_code)]
impl StubTransport {
    pub fn responding(body: &str) -> Self {
        Self {
            response: Ok(body.to_string()),
            delay: None,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(kind: FailureKind, message: &str) -> Self {
        Self {
            response: Err(TransportError {
                kind,
                message: message.to_string(),
            }),
            delay: None,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn sent(&self) -> Vec<(AttemptId, FormFieldSet)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SubmissionTransport for StubTransport {
    async fn send(
        &self,
        attempt: AttemptId,
        fields: &FormFieldSet,
    ) -> Result<String, TransportError> {
        self.sent.lock().unwrap().push((attempt, fields.clone()));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.response.clone()
    }
}
