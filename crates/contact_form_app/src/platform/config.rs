use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use contact_core::{FieldValidator, Pattern, SubmitPolicy};
use contact_engine::TransportSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("rule for `{field}` has an invalid pattern: {reason}")]
    Pattern { field: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PolicySetting {
    #[default]
    SingleFlight,
    AllowConcurrent,
}

impl From<PolicySetting> for SubmitPolicy {
    fn from(setting: PolicySetting) -> Self {
        match setting {
            PolicySetting::SingleFlight => SubmitPolicy::SingleFlight,
            PolicySetting::AllowConcurrent => SubmitPolicy::AllowConcurrent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub field: String,
    #[serde(default = "default_required")]
    pub required: bool,
    /// `email`, `url`, `integer`, or a regular expression.
    #[serde(default)]
    pub pattern: Option<String>,
}

fn default_required() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub endpoint: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: Option<u64>,
    pub max_response_bytes: u64,
    pub policy: PolicySetting,
    pub log_destination: LogDestination,
    pub verbose: bool,
    /// `None` keeps the standard contact rules.
    pub rules: Option<Vec<RuleConfig>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let transport = TransportSettings::default();
        Self {
            base_url: transport.base_url,
            endpoint: transport.endpoint,
            connect_timeout_ms: transport.connect_timeout.as_millis() as u64,
            request_timeout_ms: transport.request_timeout.map(|t| t.as_millis() as u64),
            max_response_bytes: transport.max_response_bytes,
            policy: PolicySetting::default(),
            log_destination: LogDestination::default(),
            verbose: false,
            rules: None,
        }
    }
}

impl AppConfig {
    /// Read `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn transport_settings(&self, base_url_override: Option<&str>) -> TransportSettings {
        TransportSettings {
            base_url: base_url_override.unwrap_or(&self.base_url).to_string(),
            endpoint: self.endpoint.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: self.request_timeout_ms.map(Duration::from_millis),
            max_response_bytes: self.max_response_bytes,
        }
    }

    pub fn validator(&self) -> Result<FieldValidator, ConfigError> {
        let Some(rules) = &self.rules else {
            return Ok(FieldValidator::contact_form());
        };
        let mut validator = FieldValidator::new();
        for rule in rules {
            let pattern = rule
                .pattern
                .as_deref()
                .map(|raw| {
                    Pattern::from_name(raw).map(Ok).unwrap_or_else(|| {
                        Pattern::custom(raw).map_err(|err| ConfigError::Pattern {
                            field: rule.field.clone(),
                            reason: err.to_string(),
                        })
                    })
                })
                .transpose()?;
            validator = match (rule.required, pattern) {
                (true, Some(pattern)) => validator.require_matching(&rule.field, pattern),
                (true, None) => validator.require(&rule.field),
                (false, Some(pattern)) => validator.matching(&rule.field, pattern),
                (false, None) => validator,
            };
        }
        Ok(validator)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use contact_core::FormFieldSet;
    use tempfile::{NamedTempFile, TempDir};

    use super::*;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig::load(&temp.path().join("absent.ron")).unwrap();

        assert_eq!(config, AppConfig::default());
        let settings = config.transport_settings(None);
        assert_eq!(settings.endpoint, "_layout/php/send.php");
        assert_eq!(settings.request_timeout, None);
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let file = write_config(
            r#"(
                base_url: "https://example.com/contact.html",
                request_timeout_ms: Some(1500),
                policy: AllowConcurrent,
                log_destination: Both,
            )"#,
        );
        let config = AppConfig::load(file.path()).unwrap();

        assert_eq!(config.policy, PolicySetting::AllowConcurrent);
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(
            SubmitPolicy::from(config.policy),
            SubmitPolicy::AllowConcurrent
        );
        let settings = config.transport_settings(None);
        assert_eq!(settings.base_url, "https://example.com/contact.html");
        assert_eq!(settings.request_timeout, Some(Duration::from_millis(1500)));
        assert_eq!(settings.endpoint, AppConfig::default().endpoint);

        let overridden = config.transport_settings(Some("http://127.0.0.1:8080/"));
        assert_eq!(overridden.base_url, "http://127.0.0.1:8080/");
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let file = write_config("(base_url: 42");
        let err = AppConfig::load(file.path()).unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn default_rules_are_the_contact_rules() {
        let validator = AppConfig::default().validator().unwrap();
        assert_eq!(validator, FieldValidator::contact_form());
    }

    #[test]
    fn configured_rules_replace_the_defaults() {
        let file = write_config(
            r#"(
                rules: Some([
                    (field: "email", pattern: Some("email")),
                    (field: "zip", required: false, pattern: Some("^[0-9]{5}$")),
                ]),
            )"#,
        );
        let validator = AppConfig::load(file.path()).unwrap().validator().unwrap();

        let ok = FormFieldSet::new().text("email", "a@b.com");
        assert!(validator.validate(&ok).is_valid());

        let bad_zip = ok.clone().text("zip", "12");
        assert_eq!(validator.validate(&bad_zip).invalid_fields(), vec!["zip"]);
    }

    #[test]
    fn invalid_rule_pattern_is_reported() {
        let config = AppConfig {
            rules: Some(vec![RuleConfig {
                field: "zip".to_string(),
                required: true,
                pattern: Some("([".to_string()),
            }]),
            ..AppConfig::default()
        };

        match config.validator() {
            Err(ConfigError::Pattern { field, .. }) => assert_eq!(field, "zip"),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
