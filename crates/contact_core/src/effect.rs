#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send `fields` for `attempt` and report back with
    /// [`crate::Msg::SubmissionResolved`].
    Submit {
        attempt: crate::AttemptId,
        fields: crate::FormFieldSet,
    },
    /// The submit action never reached the transport.
    Rejected(crate::Rejection),
    /// An attempt resolved and its result is now displayed.
    OutcomeReady {
        attempt: crate::AttemptId,
        outcome: crate::SubmissionOutcome,
    },
}
