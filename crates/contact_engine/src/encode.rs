use contact_core::FormFieldSet;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Everything `encodeURIComponent` escapes.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Serialize the successful controls of `fields` the way jQuery's
/// `serialize()` does: document order, `\n` and `\r\n` normalized to CRLF,
/// `encodeURIComponent` escaping with spaces as `+`.
pub fn encode_fields(fields: &FormFieldSet) -> String {
    fields
        .successful_pairs()
        .into_iter()
        .map(|(name, value)| {
            format!(
                "{}={}",
                encode_component(name),
                encode_component(&normalize_line_breaks(value))
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

// A literal `%` is escaped first, so no `%20` in the output comes from input.
fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, URI_COMPONENT)
        .to_string()
        .replace("%20", "+")
}

fn normalize_line_breaks(value: &str) -> String {
    value
        .replace("\r\n", "\n")
        .replace('\n', "\r\n")
}
