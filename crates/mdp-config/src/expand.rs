//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a config value.
///
/// Bare `$VAR` is left alone, so literal dollar signs in paths survive.
/// An unset variable without a default is an error naming `field`.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let escaped = escape_bare_dollars(value);
    shellexpand::env_with_context(&escaped, |var| match std::env::var(var) {
        Ok(val) => Ok(Some(val)),
        Err(_) => Err(UnsetVar(var.to_owned())),
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Double every `$` outside a `${...}` reference.
///
/// shellexpand also expands bare `$VAR` and reads `$$` as a literal `$`.
fn escape_bare_dollars(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 4);
    let mut rest = value;
    while let Some(idx) = rest.find('$') {
        escaped.push_str(&rest[..idx]);
        rest = &rest[idx..];
        if rest.starts_with("${")
            && let Some(end) = rest.find('}')
        {
            escaped.push_str(&rest[..=end]);
            rest = &rest[end + 1..];
            continue;
        }
        escaped.push_str("$$");
        rest = &rest[1..];
    }
    escaped.push_str(rest);
    escaped
}

/// Variable referenced without a default that is not set.
struct UnsetVar(String);
