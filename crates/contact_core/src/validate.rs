use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use validator::{ValidateEmail, ValidateUrl};

use crate::FormFieldSet;

static RE_INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-?[0-9]+$").unwrap());

/// Shape a field value must have.
#[derive(Debug, Clone)]
pub enum Pattern {
    Email,
    Url,
    Integer,
    Custom(Regex),
}

impl Pattern {
    /// Named patterns usable from configuration: `email`, `url`, `integer`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "email" => Some(Pattern::Email),
            "url" => Some(Pattern::Url),
            "integer" => Some(Pattern::Integer),
            _ => None,
        }
    }

    pub fn custom(expr: &str) -> Result<Self, regex::Error> {
        Regex::new(expr).map(Pattern::Custom)
    }

    pub fn label(&self) -> &str {
        match self {
            Pattern::Email => "email",
            Pattern::Url => "url",
            Pattern::Integer => "integer",
            Pattern::Custom(regex) => regex.as_str(),
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Pattern::Email => value.validate_email(),
            Pattern::Url => value.validate_url(),
            Pattern::Integer => RE_INTEGER.is_match(value),
            Pattern::Custom(regex) => regex.is_match(value),
        }
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Pattern::Custom(a), Pattern::Custom(b)) => a.as_str() == b.as_str(),
            (Pattern::Custom(_), _) | (_, Pattern::Custom(_)) => false,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Eq for Pattern {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    pub field: String,
    pub required: bool,
    pub pattern: Option<Pattern>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldErrorKind {
    Missing,
    Malformed { pattern: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub kind: FieldErrorKind,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FieldErrorKind::Missing => write!(f, "{} is required", self.field),
            FieldErrorKind::Malformed { pattern } => {
                write!(f, "{} must match {}", self.field, pattern)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationResult {
    errors: Vec<FieldError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn invalid_fields(&self) -> Vec<&str> {
        self.errors.iter().map(|error| error.field.as_str()).collect()
    }
}

/// Per-form rule set. Rules run in declaration order and each field reports
/// at most one error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidator {
    rules: Vec<FieldRule>,
}

impl Default for FieldValidator {
    fn default() -> Self {
        Self::contact_form()
    }
}

impl FieldValidator {
    /// A validator with no rules; everything passes.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// `name` and `subject` required, `email` required and email-shaped.
    pub fn contact_form() -> Self {
        Self::new()
            .require("name")
            .require_matching("email", Pattern::Email)
            .require("subject")
    }

    pub fn require(self, field: &str) -> Self {
        self.rule(field, true, None)
    }

    pub fn require_matching(self, field: &str, pattern: Pattern) -> Self {
        self.rule(field, true, Some(pattern))
    }

    /// Optional field that must match `pattern` when filled in.
    pub fn matching(self, field: &str, pattern: Pattern) -> Self {
        self.rule(field, false, Some(pattern))
    }

    fn rule(mut self, field: &str, required: bool, pattern: Option<Pattern>) -> Self {
        self.rules.push(FieldRule {
            field: field.to_string(),
            required,
            pattern,
        });
        self
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Check `fields` against every rule. Values are trimmed before both the
    /// required check and the pattern match.
    pub fn validate(&self, fields: &FormFieldSet) -> ValidationResult {
        let mut errors: Vec<FieldError> = Vec::new();
        for rule in &self.rules {
            if errors.iter().any(|error| error.field == rule.field) {
                continue;
            }
            let value = fields.value(&rule.field).map(str::trim).unwrap_or_default();
            let kind = if value.is_empty() {
                rule.required.then_some(FieldErrorKind::Missing)
            } else {
                rule.pattern
                    .as_ref()
                    .filter(|pattern| !pattern.matches(value))
                    .map(|pattern| FieldErrorKind::Malformed {
                        pattern: pattern.label().to_string(),
                    })
            };
            if let Some(kind) = kind {
                errors.push(FieldError {
                    field: rule.field.clone(),
                    kind,
                });
            }
        }
        ValidationResult { errors }
    }
}
