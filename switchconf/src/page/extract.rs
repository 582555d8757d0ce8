//! Extraction of embedded script variables.

use regex::Regex;
use serde::de::DeserializeOwned;

use crate::error::PageError;

/// Build the pattern matching `name = <payload>;`.
///
/// The payload may span lines; the shortest match up to the first `;` is
/// taken.
fn assignment_pattern(variable: &str) -> Regex {
    let pattern = format!(r"(?s)\b{}\s*=\s*(.*?);", regex::escape(variable));
    // Escaped input always yields a valid pattern.
    Regex::new(&pattern).unwrap()
}

/// Find the raw payload assigned to `variable`.
pub fn find_var<'a>(html: &'a str, variable: &str) -> Result<&'a str, PageError> {
    assignment_pattern(variable)
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .ok_or_else(|| PageError::MarkerNotFound {
            variable: variable.to_string(),
        })
}

/// Find the payload assigned to `variable` and parse it as relaxed JSON.
///
/// Pages use JavaScript object literals: unquoted keys, single-quoted
/// strings and trailing commas are accepted.
pub fn extract_var<T: DeserializeOwned>(html: &str, variable: &str) -> Result<T, PageError> {
    let payload = find_var(html, variable)?;
    json5::from_str(payload).map_err(|source| PageError::MalformedPayload {
        variable: variable.to_string(),
        source,
    })
}
