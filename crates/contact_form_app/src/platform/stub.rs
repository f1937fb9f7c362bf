use std::sync::{Arc, Mutex};
use std::time::Duration;

use contact_core::{AttemptId, FormFieldSet};
use contact_engine::{SubmissionTransport, TransportError};

type Reply = dyn Fn(AttemptId) -> Result<String, TransportError> + Send + Sync;

/// Transport double whose answer is computed from the attempt id.
#[derive(Clone)]
pub struct ScriptedTransport {
    reply: Arc<Reply>,
    delay: Duration,
    attempts: Arc<Mutex<Vec<AttemptId>>>,
}

impl ScriptedTransport {
    pub fn replying(
        reply: impl Fn(AttemptId) -> Result<String, TransportError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            reply: Arc::new(reply),
            delay: Duration::ZERO,
            attempts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Attempt ids in the order they reached the transport.
    pub fn attempts(&self) -> Vec<AttemptId> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SubmissionTransport for ScriptedTransport {
    async fn send(
        &self,
        attempt: AttemptId,
        _fields: &FormFieldSet,
    ) -> Result<String, TransportError> {
        self.attempts.lock().unwrap().push(attempt);
        tokio::time::sleep(self.delay).await;
        (self.reply)(attempt)
    }
}
