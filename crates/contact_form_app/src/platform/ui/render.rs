use contact_core::{FormViewModel, UiState};

/// Terminal rendering of the form view: a status line, field indicators and
/// the result region.
pub fn render(view: &FormViewModel, html: bool) -> Vec<String> {
    let mut lines = vec![status_line(view)];

    if !view.invalid_fields.is_empty() {
        lines.push(format!("Please check: {}", view.invalid_fields.join(", ")));
    }

    if let Some(outcome) = &view.result {
        let text = if html {
            outcome.to_markup()
        } else {
            outcome.display_text().to_string()
        };
        let marker = if outcome.is_success() { "OK" } else { "ERR" };
        lines.push(format!("[{marker}] {text}"));
    }

    lines
}

fn status_line(view: &FormViewModel) -> String {
    let filled = view
        .fields
        .iter()
        .filter(|field| field.value.as_deref().is_some_and(|value| !value.is_empty()))
        .count();
    let label = state_label(view.ui_state);
    if view.in_flight > 0 {
        format!(
            "Form: {label} | Fields filled: {filled}/{} | Pending: {}",
            view.fields.len(),
            view.in_flight
        )
    } else {
        format!("Form: {label} | Fields filled: {filled}/{}", view.fields.len())
    }
}

fn state_label(state: UiState) -> &'static str {
    match state {
        UiState::Idle => "Idle",
        UiState::Validating => "Validating",
        UiState::Submitting => "Submitting",
        UiState::ResultDisplayed => "Result",
    }
}
