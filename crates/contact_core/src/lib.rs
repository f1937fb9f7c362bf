//! Contact form core: pure submission state machine and view-model helpers.
mod effect;
mod form;
mod msg;
mod outcome;
mod state;
mod update;
mod validate;
mod view_model;

pub use effect::Effect;
pub use form::{Control, Field, FieldEdit, FormFieldSet, FormNode};
pub use msg::Msg;
pub use outcome::{
    Rejection, SubmissionOutcome, SubmitResult, CONFIRMATION_MESSAGE, EMPTY_RESPONSE_MESSAGE,
    SUCCESS_SENTINEL, TRANSPORT_FAILURE_MESSAGE,
};
pub use state::{AttemptId, FormState, SubmitPolicy, UiState};
pub use update::update;
pub use validate::{FieldError, FieldErrorKind, FieldRule, FieldValidator, Pattern, ValidationResult};
pub use view_model::{FieldView, FormViewModel};
