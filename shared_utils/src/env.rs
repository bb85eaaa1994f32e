use thiserror::Error;

/// An environment variable required by the application is not set.
#[derive(Debug, Error)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVarError(pub String);

/// Reads an environment variable, returning a structured error if it's missing.
///
/// Thin wrapper around `std::env::var` so callers get an error type that
/// names the variable instead of the generic `VarError`.
pub fn get_env_var(name: &str) -> Result<String, MissingEnvVarError> {
    std::env::var(name).map_err(|_| MissingEnvVarError(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_var_reports_name() {
        let err = get_env_var("SHARED_UTILS_DEFINITELY_UNSET").unwrap_err();
        assert!(err.to_string().contains("SHARED_UTILS_DEFINITELY_UNSET"));
    }
}
