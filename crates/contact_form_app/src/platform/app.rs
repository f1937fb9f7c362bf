use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

use contact_core::{update, FormState, Msg};
use form_logging::{form_info, form_warn};
use thiserror::Error;

use super::config::{AppConfig, ConfigError};
use super::effects::EffectRunner;
use super::{logging, ui, Cli};

const TICK: Duration = Duration::from_millis(75);

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to start the submission engine: {0}")]
    Engine(#[from] io::Error),
}

/// Submit the form described by `cli` once and wait for every attempt to
/// resolve. Exits successfully only when the server confirmed the message.
pub fn run_app(cli: Cli) -> Result<ExitCode, AppError> {
    let config = AppConfig::load(&cli.config)?;
    logging::initialize(config.log_destination, config.verbose);

    let settings = config.transport_settings(cli.base_url.as_deref());
    form_info!(
        "Loaded config from {:?}; endpoint {} relative to {}",
        cli.config,
        settings.endpoint,
        settings.base_url
    );

    let state = FormState::new()
        .with_validator(config.validator()?)
        .with_policy(config.policy.into())
        .with_form(cli.form());
    let mut app = App::new(state, EffectRunner::new(settings)?, cli.html, io::stdout());

    app.dispatch(Msg::SubmitClicked);
    Ok(if app.run_until_settled() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

struct App<W> {
    state: FormState,
    runner: EffectRunner,
    html: bool,
    out: W,
}

impl<W: Write> App<W> {
    fn new(state: FormState, runner: EffectRunner, html: bool, out: W) -> Self {
        Self {
            state,
            runner,
            html,
            out,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            for line in ui::render::render(&state.view(), self.html) {
                if let Err(err) = writeln!(self.out, "{line}") {
                    form_warn!("could not write form output: {}", err);
                }
            }
        }
        self.state = state;
        self.runner.enqueue(effects);
    }

    /// Feed engine results back into the form until no attempt is pending.
    /// Returns whether the region ended on a confirmation.
    fn run_until_settled(&mut self) -> bool {
        while self.state.has_in_flight() {
            let msg = self.runner.next_msg(TICK).unwrap_or(Msg::Tick);
            self.dispatch(msg);
        }
        self.state
            .result()
            .is_some_and(|outcome| outcome.is_success())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use contact_core::{
        FormFieldSet, SubmitPolicy, UiState, CONFIRMATION_MESSAGE, EMPTY_RESPONSE_MESSAGE,
    };
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::platform::stub::ScriptedTransport;

    fn app(transport: &ScriptedTransport, policy: SubmitPolicy) -> App<Vec<u8>> {
        let state = FormState::new()
            .with_policy(policy)
            .with_form(FormFieldSet::contact("Alice", "a@b.com", "Hi", "Hello"));
        let runner = EffectRunner::with_transport(Arc::new(transport.clone())).unwrap();
        App::new(state, runner, false, Vec::new())
    }

    fn output(app: &App<Vec<u8>>) -> String {
        String::from_utf8(app.out.clone()).unwrap()
    }

    #[test]
    fn confirmed_submission_settles_successfully() {
        let transport = ScriptedTransport::replying(|_| Ok("OK".to_string()));
        let mut app = app(&transport, SubmitPolicy::SingleFlight);

        app.dispatch(Msg::SubmitClicked);
        let confirmed = app.run_until_settled();

        assert!(confirmed);
        assert_eq!(transport.attempts(), vec![1]);
        assert_eq!(app.state.ui_state(), UiState::ResultDisplayed);
        assert!(app.state.form().is_cleared());
        assert!(output(&app).contains(&format!("[OK] {CONFIRMATION_MESSAGE}")));
    }

    #[test]
    fn overlapping_attempts_are_each_rendered() {
        let transport = ScriptedTransport::replying(|attempt| Ok(format!("reply {attempt}")))
            .with_delay(Duration::from_millis(30));
        let mut app = app(&transport, SubmitPolicy::AllowConcurrent);

        app.dispatch(Msg::SubmitClicked);
        app.dispatch(Msg::SubmitClicked);
        assert!(app.state.has_in_flight());
        let confirmed = app.run_until_settled();

        assert!(!confirmed);
        let mut attempts = transport.attempts();
        attempts.sort_unstable();
        assert_eq!(attempts, vec![1, 2]);
        assert!(!app.state.has_in_flight());
        assert_eq!(app.state.ui_state(), UiState::ResultDisplayed);

        let printed = output(&app);
        assert!(printed.contains("[ERR] reply 1"), "{printed}");
        assert!(printed.contains("[ERR] reply 2"), "{printed}");
    }

    #[test]
    fn empty_reply_settles_as_failure() {
        let transport = ScriptedTransport::replying(|_| Ok(String::new()));
        let mut app = app(&transport, SubmitPolicy::SingleFlight);

        app.dispatch(Msg::SubmitClicked);

        assert!(!app.run_until_settled());
        assert!(output(&app).contains(&format!("[ERR] {EMPTY_RESPONSE_MESSAGE}")));
        assert_eq!(app.state.form().value("name"), Some("Alice"));
    }

    #[test]
    fn invalid_form_settles_without_sending() {
        let transport = ScriptedTransport::replying(|_| Ok("OK".to_string()));
        let mut app = app(&transport, SubmitPolicy::SingleFlight);
        app.state = FormState::new().with_form(FormFieldSet::contact("", "", "", ""));

        app.dispatch(Msg::SubmitClicked);

        assert!(!app.run_until_settled());
        assert!(transport.attempts().is_empty());
        assert!(output(&app).contains("Please check: name, email, subject"));
    }
}
