use serde_json::Value;

/// A parsed `--set KEY=VALUE` argument
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Dotted key split into its segments
    pub path: Vec<String>,
    pub value: Value,
}

/// Parse a `KEY=VALUE` assignment.
///
/// The value is read as JSON when it parses, so `true`, `3` and
/// `["a/*"]` keep their types; anything else becomes a string.
///
/// # Errors
///
/// Returns an error message when the `=` is missing or a key segment is
/// empty.
pub fn parse_assignment(s: &str) -> Result<Assignment, String> {
    let Some((key, raw)) = s.split_once('=') else {
        return Err(format!("Expected KEY=VALUE, got '{s}'"));
    };

    let path: Vec<String> = key.split('.').map(str::to_string).collect();
    if path.iter().any(|segment| segment.trim().is_empty()) {
        return Err(format!("Option key cannot have empty segments: '{key}'"));
    }

    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok(Assignment { path, value })
}
