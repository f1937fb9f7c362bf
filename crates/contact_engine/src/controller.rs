use contact_core::{
    update, AttemptId, Effect, FormFieldSet, FormState, FormViewModel, Msg, Rejection,
    SubmissionOutcome, SubmitResult,
};
use form_logging::{form_debug, form_info, form_warn};

use crate::SubmissionTransport;

/// Drives one form's state machine against a transport, one submit action
/// at a time.
pub struct ContactFormController<T> {
    state: FormState,
    transport: T,
}

impl<T: SubmissionTransport> ContactFormController<T> {
    pub fn new(transport: T) -> Self {
        Self::with_state(FormState::new(), transport)
    }

    pub fn with_state(state: FormState, transport: T) -> Self {
        Self { state, transport }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn form(&self) -> &FormFieldSet {
        self.state.form()
    }

    pub fn view(&self) -> FormViewModel {
        self.state.view()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        effects
    }

    pub fn clear(&mut self) {
        self.dispatch(Msg::ClearClicked);
    }

    /// Load `fields` into the form and submit it.
    pub async fn handle_submit(&mut self, fields: FormFieldSet) -> SubmitResult {
        self.dispatch(Msg::FormLoaded(fields));
        self.submit_current().await
    }

    /// Submit whatever the form currently holds.
    ///
    /// Dropping the returned future while the request is pending resolves
    /// the attempt as a [`CANCELLED_MESSAGE`] failure, so the form accepts
    /// the next submit.
    pub async fn submit_current(&mut self) -> SubmitResult {
        let mut result = SubmitResult::Rejected(Rejection::InFlight);
        for effect in self.dispatch(Msg::SubmitClicked) {
            match effect {
                Effect::Rejected(rejection) => {
                    form_debug!("submit rejected: {:?}", rejection);
                    result = SubmitResult::Rejected(rejection);
                }
                Effect::Submit { attempt, fields } => {
                    let pending = PendingAttempt::new(&mut self.state, attempt);
                    let response = self
                        .transport
                        .send(attempt, &fields)
                        .await
                        .map_err(|err| err.user_message());
                    if let Some(outcome) = pending.resolve(response) {
                        form_info!(attempt = attempt; "outcome: {}", outcome.display_text());
                        result = SubmitResult::Completed(outcome);
                    }
                }
                Effect::OutcomeReady { .. } => {}
            }
        }
        result
    }
}

/// Shown for an attempt whose caller stopped waiting for the server.
pub const CANCELLED_MESSAGE: &str = "Sending was cancelled before the server answered.";

/// An attempt between `Submit` and its resolution. Dropped unresolved, it
/// resolves the attempt as cancelled.
struct PendingAttempt<'a> {
    state: &'a mut FormState,
    attempt: AttemptId,
    resolved: bool,
}

impl<'a> PendingAttempt<'a> {
    fn new(state: &'a mut FormState, attempt: AttemptId) -> Self {
        Self {
            state,
            attempt,
            resolved: false,
        }
    }

    fn resolve(mut self, response: Result<String, String>) -> Option<SubmissionOutcome> {
        self.resolved = true;
        resolve_attempt(self.state, self.attempt, response)
    }
}

impl Drop for PendingAttempt<'_> {
    fn drop(&mut self) {
        if !self.resolved {
            form_warn!(attempt = self.attempt; "submit cancelled while waiting for the server");
            resolve_attempt(self.state, self.attempt, Err(CANCELLED_MESSAGE.to_string()));
        }
    }
}

fn resolve_attempt(
    state: &mut FormState,
    attempt: AttemptId,
    response: Result<String, String>,
) -> Option<SubmissionOutcome> {
    let (next, effects) = update(
        std::mem::take(state),
        Msg::SubmissionResolved { attempt, response },
    );
    *state = next;
    effects.into_iter().find_map(|effect| match effect {
        Effect::OutcomeReady { outcome, .. } => Some(outcome),
        _ => None,
    })
}
