use std::collections::BTreeSet;

use crate::view_model::{FieldView, FormViewModel};
use crate::{FieldEdit, FieldValidator, FormFieldSet, Rejection, SubmissionOutcome};

pub type AttemptId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Validating,
    Submitting,
    ResultDisplayed,
}

/// What to do with a submit action while an earlier attempt is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPolicy {
    /// Refuse it with [`Rejection::InFlight`].
    #[default]
    SingleFlight,
    /// Dispatch another request; every result is still rendered.
    AllowConcurrent,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    form: FormFieldSet,
    validator: FieldValidator,
    policy: SubmitPolicy,
    ui: UiState,
    last_attempt: AttemptId,
    in_flight: BTreeSet<AttemptId>,
    result: Option<SubmissionOutcome>,
    last_rejection: Option<Rejection>,
    dirty: bool,
}

impl FormState {
    /// Empty form checked by the standard contact rules.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form(mut self, form: FormFieldSet) -> Self {
        self.form = form;
        self
    }

    pub fn with_validator(mut self, validator: FieldValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_policy(mut self, policy: SubmitPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn view(&self) -> FormViewModel {
        FormViewModel {
            ui_state: self.ui,
            fields: self
                .form
                .fields()
                .into_iter()
                .map(|field| FieldView {
                    name: field.name.clone(),
                    value: field.control.successful_value().map(ToOwned::to_owned),
                })
                .collect(),
            in_flight: self.in_flight.len(),
            result: self.result.clone(),
            invalid_fields: match &self.last_rejection {
                Some(Rejection::Invalid(result)) => result
                    .invalid_fields()
                    .into_iter()
                    .map(ToOwned::to_owned)
                    .collect(),
                _ => Vec::new(),
            },
            dirty: self.dirty,
        }
    }

    pub fn form(&self) -> &FormFieldSet {
        &self.form
    }

    pub fn validator(&self) -> &FieldValidator {
        &self.validator
    }

    pub fn policy(&self) -> SubmitPolicy {
        self.policy
    }

    pub fn ui_state(&self) -> UiState {
        self.ui
    }

    pub fn result(&self) -> Option<&SubmissionOutcome> {
        self.result.as_ref()
    }

    pub fn last_rejection(&self) -> Option<&Rejection> {
        self.last_rejection.as_ref()
    }

    pub fn has_in_flight(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn in_flight(&self) -> impl Iterator<Item = AttemptId> + '_ {
        self.in_flight.iter().copied()
    }

    /// Returns whether anything visible changed since the last call, and
    /// resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn replace_form(&mut self, form: FormFieldSet) {
        if self.form != form {
            self.form = form;
            self.mark_dirty();
        }
    }

    pub(crate) fn apply_edit(&mut self, edit: &FieldEdit) {
        if self.form.apply(edit) {
            self.mark_dirty();
        }
    }

    pub(crate) fn clear_form(&mut self) {
        if !self.form.is_cleared() {
            self.form.clear();
            self.mark_dirty();
        }
    }

    /// A submit action starts: the previous result leaves the region.
    pub(crate) fn begin_validation(&mut self) {
        self.ui = UiState::Validating;
        self.result = None;
        self.last_rejection = None;
        self.mark_dirty();
    }

    pub(crate) fn validate(&self) -> crate::ValidationResult {
        self.validator.validate(&self.form)
    }

    /// Record a refused submit. The UI falls back to whatever the pending
    /// attempts imply.
    pub(crate) fn reject(&mut self, rejection: Rejection) {
        self.last_rejection = Some(rejection);
        self.ui = if self.has_in_flight() {
            UiState::Submitting
        } else {
            UiState::Idle
        };
        self.mark_dirty();
    }

    /// Allocate an attempt and snapshot the fields it submits.
    pub(crate) fn begin_attempt(&mut self) -> (AttemptId, FormFieldSet) {
        self.last_attempt += 1;
        let attempt = self.last_attempt;
        self.in_flight.insert(attempt);
        self.ui = UiState::Submitting;
        self.mark_dirty();
        (attempt, self.form.clone())
    }

    /// Returns `false` for attempts that are unknown or already resolved.
    pub(crate) fn finish_attempt(&mut self, attempt: AttemptId) -> bool {
        self.in_flight.remove(&attempt)
    }

    pub(crate) fn show_result(&mut self, outcome: SubmissionOutcome) {
        self.result = Some(outcome);
        self.ui = if self.has_in_flight() {
            UiState::Submitting
        } else {
            UiState::ResultDisplayed
        };
        self.mark_dirty();
    }
}
