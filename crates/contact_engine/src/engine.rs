use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use contact_core::{AttemptId, FormFieldSet};
use form_logging::{form_info, form_warn};

use crate::transport::{ReqwestTransport, SubmissionTransport, TransportSettings};
use crate::EngineEvent;

enum EngineCommand {
    Submit {
        attempt: AttemptId,
        fields: FormFieldSet,
    },
}

/// Runs submissions on a background tokio runtime. Each command is its own
/// task, so overlapping attempts proceed independently and every one of them
/// reports back exactly once.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: TransportSettings) -> io::Result<Self> {
        let transport = ReqwestTransport::new(settings)
            .map_err(io::Error::other)?;
        Self::with_transport(Arc::new(transport))
    }

    pub fn with_transport(transport: Arc<dyn SubmissionTransport>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("contact-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let transport = transport.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(transport.as_ref(), command, event_tx).await;
                    });
                }
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn submit(&self, attempt: AttemptId, fields: FormFieldSet) {
        if self
            .cmd_tx
            .send(EngineCommand::Submit { attempt, fields })
            .is_err()
        {
            form_warn!(attempt = attempt; "engine thread is gone; submission dropped");
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    transport: &dyn SubmissionTransport,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Submit { attempt, fields } => {
            let result = transport.send(attempt, &fields).await;
            match &result {
                Ok(_) => form_info!(attempt = attempt; "submission resolved"),
                Err(err) => form_warn!(attempt = attempt; "submission failed: {}", err),
            }
            let _ = event_tx.send(EngineEvent::SubmissionCompleted { attempt, result });
        }
    }
}
