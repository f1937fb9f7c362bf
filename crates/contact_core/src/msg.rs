#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Replace the live form, e.g. after collecting it from the page.
    FormLoaded(crate::FormFieldSet),
    /// User changed a single control.
    FieldEdited(crate::FieldEdit),
    /// User submitted the form.
    SubmitClicked,
    /// Transport resolved an attempt: the raw body, or a failure description.
    SubmissionResolved {
        attempt: crate::AttemptId,
        response: Result<String, String>,
    },
    /// User reset the form.
    ClearClicked,
    /// Wake-up while waiting on the transport; changes nothing.
    Tick,
}
