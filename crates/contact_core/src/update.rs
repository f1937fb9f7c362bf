use crate::{Effect, FormState, Msg, Rejection, SubmissionOutcome, SubmitPolicy};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: FormState, msg: Msg) -> (FormState, Vec<Effect>) {
    let effects = match msg {
        Msg::FormLoaded(form) => {
            // The submitted snapshot is already detached, but the live form
            // stays frozen until every pending attempt has resolved.
            if !state.has_in_flight() {
                state.replace_form(form);
            }
            Vec::new()
        }
        Msg::FieldEdited(edit) => {
            if !state.has_in_flight() {
                state.apply_edit(&edit);
            }
            Vec::new()
        }
        Msg::ClearClicked => {
            if !state.has_in_flight() {
                state.clear_form();
            }
            Vec::new()
        }
        Msg::SubmitClicked => {
            if state.policy() == SubmitPolicy::SingleFlight && state.has_in_flight() {
                state.reject(Rejection::InFlight);
                return (state, vec![Effect::Rejected(Rejection::InFlight)]);
            }

            state.begin_validation();
            let validation = state.validate();
            if !validation.is_valid() {
                let rejection = Rejection::Invalid(validation);
                state.reject(rejection.clone());
                return (state, vec![Effect::Rejected(rejection)]);
            }

            let (attempt, fields) = state.begin_attempt();
            vec![Effect::Submit { attempt, fields }]
        }
        Msg::SubmissionResolved { attempt, response } => {
            if !state.finish_attempt(attempt) {
                return (state, Vec::new());
            }
            let outcome = match response {
                Ok(body) => SubmissionOutcome::from_response(&body),
                Err(message) => SubmissionOutcome::from_transport_error(message),
            };
            if outcome.is_success() {
                state.clear_form();
            }
            state.show_result(outcome.clone());
            vec![Effect::OutcomeReady { attempt, outcome }]
        }
        Msg::Tick => Vec::new(),
    };

    (state, effects)
}
