use std::io;
use std::sync::Arc;
use std::time::Duration;

use contact_core::{Effect, Msg, Rejection};
use contact_engine::{EngineEvent, EngineHandle, SubmissionTransport, TransportSettings};
use form_logging::{form_info, form_warn};

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: TransportSettings) -> io::Result<Self> {
        Ok(Self {
            engine: EngineHandle::new(settings)?,
        })
    }

    pub fn with_transport(transport: Arc<dyn SubmissionTransport>) -> io::Result<Self> {
        Ok(Self {
            engine: EngineHandle::with_transport(transport)?,
        })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Submit { attempt, fields } => {
                    form_info!(
                        attempt = attempt;
                        "Submit fields={}",
                        fields
                            .successful_pairs()
                            .iter()
                            .map(|(name, _)| *name)
                            .collect::<Vec<_>>()
                            .join(",")
                    );
                    self.engine.submit(attempt, fields);
                }
                Effect::Rejected(Rejection::Invalid(result)) => {
                    form_info!("Submit rejected, invalid: {}", result.invalid_fields().join(","));
                }
                Effect::Rejected(Rejection::InFlight) => {
                    form_warn!("Submit rejected, an attempt is still pending");
                }
                Effect::OutcomeReady { attempt, outcome } => {
                    form_info!(attempt = attempt; "Outcome success={}", outcome.is_success());
                }
            }
        }
    }

    /// Wait up to `timeout` for the engine to resolve an attempt.
    pub fn next_msg(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(|event| match event {
            EngineEvent::SubmissionCompleted { attempt, result } => Msg::SubmissionResolved {
                attempt,
                response: result.map_err(|err| {
                    form_warn!(attempt = attempt; "Transport failed: {}", err);
                    err.user_message()
                }),
            },
        })
    }
}
