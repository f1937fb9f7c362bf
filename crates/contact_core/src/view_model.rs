use crate::{SubmissionOutcome, UiState};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormViewModel {
    pub ui_state: UiState,
    pub fields: Vec<FieldView>,
    pub in_flight: usize,
    /// Content of the result region, if any.
    pub result: Option<SubmissionOutcome>,
    /// Fields flagged by the last rejected submit.
    pub invalid_fields: Vec<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub name: String,
    /// `None` for unchecked boxes and empty selects.
    pub value: Option<String>,
}
