//! `${VAR}` and `${VAR:-default}` expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` references in `value`, reporting failures against `field`.
///
/// Strings without `${` are returned unchanged, so a literal `$` needs no
/// escaping.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let expanded = shellexpand::env_with_context(value, |name| {
        std::env::var(name).map(Some).map_err(|_| UnsetVar {
            name: name.to_owned(),
        })
    })
    .map_err(|err| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", err.cause.name),
    })?;

    Ok(expanded.into_owned())
}

/// Lookup failure for an unset variable without a default.
struct UnsetVar {
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_expand_set_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("T2T_TEST_OUT", "site");
        }
        let result = expand_env("build/${T2T_TEST_OUT}", "convert.output_dir").unwrap();
        assert_eq!(result, "build/site");
        unsafe {
            std::env::remove_var("T2T_TEST_OUT");
        }
    }

    #[test]
    fn test_expand_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("T2T_TEST_UNSET_EXT");
        }
        let result = expand_env("${T2T_TEST_UNSET_EXT:-mediawiki}", "wiki.extension").unwrap();
        assert_eq!(result, "mediawiki");
    }

    #[test]
    fn test_expand_missing_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("T2T_TEST_MISSING");
        }
        let err = expand_env("${T2T_TEST_MISSING}", "convert.output_dir").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let message = err.to_string();
        assert!(message.contains("T2T_TEST_MISSING"));
        assert!(message.contains("convert.output_dir"));
    }

    #[test]
    fn test_literal_dollar_unchanged() {
        assert_eq!(expand_env("out/$HOME", "convert.output_dir").unwrap(), "out/$HOME");
        assert_eq!(expand_env("plain", "convert.output_dir").unwrap(), "plain");
    }
}
