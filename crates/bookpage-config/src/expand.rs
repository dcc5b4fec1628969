//! Environment variable expansion for configuration strings.
//!
//! - `${VAR}` expands to the value of `VAR`, errors if unset
//! - `${VAR:-default}` expands to `VAR` if set, otherwise the default
//!
//! Text without `${` passes through untouched.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// `field` names the config field for error messages (e.g.
/// `storage.database_url`).
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            return Err(ConfigError::EnvVar {
                field: field.to_owned(),
                message: "unterminated ${ reference".to_owned(),
            });
        };

        let token = &after[..end];
        let (name, default) = match token.split_once(":-") {
            Some((name, default)) => (name, Some(default)),
            None => (token, None),
        };

        match std::env::var(name) {
            Ok(value) => out.push_str(&value),
            Err(_) => match default {
                Some(default) => out.push_str(default),
                None => {
                    return Err(ConfigError::EnvVar {
                        field: field.to_owned(),
                        message: format!("${{{name}}} not set"),
                    });
                }
            },
        }

        rest = &after[end + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_passes_through() {
        assert_eq!(
            expand_env("sqlite:bookpage.db", "storage.database_url").unwrap(),
            "sqlite:bookpage.db"
        );
    }

    #[test]
    fn test_expands_set_variable() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("BOOKPAGE_EXPAND_TEST", "value");
        }

        assert_eq!(
            expand_env("before-${BOOKPAGE_EXPAND_TEST}-after", "f").unwrap(),
            "before-value-after"
        );

        unsafe {
            std::env::remove_var("BOOKPAGE_EXPAND_TEST");
        }
    }

    #[test]
    fn test_default_used_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("BOOKPAGE_EXPAND_MISSING");
        }

        assert_eq!(
            expand_env("${BOOKPAGE_EXPAND_MISSING:-fallback}", "f").unwrap(),
            "fallback"
        );
    }

    #[test]
    fn test_missing_without_default_errors() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("BOOKPAGE_EXPAND_MISSING");
        }

        let err = expand_env("${BOOKPAGE_EXPAND_MISSING}", "storage.database_url").unwrap_err();

        assert!(err.to_string().contains("BOOKPAGE_EXPAND_MISSING"));
        assert!(err.to_string().contains("storage.database_url"));
    }

    #[test]
    fn test_unterminated_reference_errors() {
        let err = expand_env("${BROKEN", "f").unwrap_err();

        assert!(err.to_string().contains("unterminated"));
    }
}
