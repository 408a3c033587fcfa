use std::{fmt::Display, str::FromStr};

use thiserror::Error;

/// Error raised when an override variable is set to an unusable value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvVarError {
    /// The variable is set but its value could not be parsed.
    #[error("Invalid value {value:?} for environment variable {name}: {message}")]
    Invalid {
        name: String,
        value: String,
        message: String,
    },
}

/// Reads an optional override. Unset and blank values both count as absent.
pub fn env_override(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reads and parses an optional override.
///
/// Returns `Ok(None)` when the variable is unset or blank, and
/// [`EnvVarError::Invalid`] when it is set to something `T` cannot parse.
pub fn parse_env_override<T>(name: &str) -> Result<Option<T>, EnvVarError>
where
    T: FromStr,
    T::Err: Display,
{
    let Some(raw) = env_override(name) else {
        return Ok(None);
    };
    raw.parse::<T>()
        .map(Some)
        .map_err(|e| EnvVarError::Invalid {
            name: name.to_string(),
            message: e.to_string(),
            value: raw,
        })
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    fn set(name: &str, value: &str) {
        // SAFETY: every test touching the environment runs under #[serial].
        unsafe { std::env::set_var(name, value) };
    }

    fn unset(name: &str) {
        // SAFETY: as above.
        unsafe { std::env::remove_var(name) };
    }

    #[test]
    #[serial]
    fn unset_override_is_absent() {
        unset("SHARED_UTILS_TEST_UNSET");
        assert_eq!(env_override("SHARED_UTILS_TEST_UNSET"), None);
    }

    #[test]
    #[serial]
    fn blank_override_counts_as_absent() {
        set("SHARED_UTILS_TEST_BLANK", "   ");
        assert_eq!(env_override("SHARED_UTILS_TEST_BLANK"), None);
        unset("SHARED_UTILS_TEST_BLANK");
    }

    #[test]
    #[serial]
    fn override_is_trimmed() {
        set("SHARED_UTILS_TEST_TRIM", "  http://localhost:5000 ");
        assert_eq!(
            env_override("SHARED_UTILS_TEST_TRIM").as_deref(),
            Some("http://localhost:5000")
        );
        unset("SHARED_UTILS_TEST_TRIM");
    }

    #[test]
    #[serial]
    fn parse_override_reports_bad_values() {
        set("SHARED_UTILS_TEST_PARSE", "ten");
        let err = parse_env_override::<u64>("SHARED_UTILS_TEST_PARSE").unwrap_err();
        assert!(matches!(err, EnvVarError::Invalid { ref value, .. } if value == "ten"));
        assert!(err.to_string().contains("SHARED_UTILS_TEST_PARSE"));

        set("SHARED_UTILS_TEST_PARSE", "10");
        assert_eq!(
            parse_env_override::<u64>("SHARED_UTILS_TEST_PARSE").unwrap(),
            Some(10)
        );

        unset("SHARED_UTILS_TEST_PARSE");
        assert_eq!(
            parse_env_override::<u64>("SHARED_UTILS_TEST_PARSE").unwrap(),
            None
        );
    }
}
