//! `${VAR}` and `${VAR:-default}` substitution in configuration strings.

use std::env::VarError;

use crate::ConfigError;

/// Substitute environment variables into the value of `field`.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    substitute(value, field, |name| std::env::var(name).map(Some))
}

/// Substitute using `lookup`; a bare `$` outside `${...}` is left alone.
fn substitute<F>(value: &str, field: &str, lookup: F) -> Result<String, ConfigError>
where
    F: FnMut(&str) -> Result<Option<String>, VarError>,
{
    if !value.contains("${") {
        return Ok(value.to_owned());
    }
    match shellexpand::env_with_context(value, lookup) {
        Ok(expanded) => Ok(expanded.into_owned()),
        Err(e) => Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        }),
    }
}
