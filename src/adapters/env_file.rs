// SPDX-License-Identifier: MIT OR Apache-2.0

//! `.env` file support.
//!
//! The file is a flat list of `KEY=VALUE` lines. Each pair is written into the process
//! environment, where it then acts as an override for the matching dotted key.

use crate::domain::{ConfigError, Result};
use std::env;
use std::fs;
use std::path::Path;

/// Applies a `.env` file to the process environment.
///
/// Each line is read literally as `KEY=VALUE`, split at the first `=`. Blank lines and
/// lines starting with `#` are skipped, whitespace around keys and values is trimmed,
/// and one pair of matching quotes (`"..."` or `'...'`) is removed from values. Nothing
/// else is interpreted: `$`, `#` and inner spaces are kept as written. Every pair
/// overwrites an existing variable of the same name. Lines without `=`, or with a key
/// the environment cannot hold, are skipped and logged at debug level.
///
/// Returns the number of variables set. A file that cannot be read is reported as
/// `ConfigError::SourceError`.
///
/// # Examples
///
/// ```rust,no_run
/// use treecfg::adapters::apply_env_file;
///
/// let count = apply_env_file(".env").unwrap();
/// println!("applied {} variables", count);
/// ```
pub fn apply_env_file<P: AsRef<Path>>(path: P) -> Result<usize> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| ConfigError::SourceError {
        source_name: "env-file".to_string(),
        message: format!("Failed to read {}", path.display()),
        source: Some(Box::new(e)),
    })?;

    let mut applied = 0;
    for (number, line) in content.lines().enumerate() {
        match parse_line(line) {
            Some((key, value)) => {
                env::set_var(key, value);
                applied += 1;
            }
            None => {
                let trimmed = line.trim();
                if !trimmed.is_empty() && !trimmed.starts_with('#') {
                    tracing::debug!("Skipping malformed line {} in {}", number + 1, path.display());
                }
            }
        }
    }

    tracing::debug!("Applied {} variables from {}", applied, path.display());
    Ok(applied)
}

/// Splits one line into a key and its unquoted value.
fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    // set_var panics on an empty key or a NUL byte
    if key.is_empty() || key.contains('\0') || value.contains('\0') {
        return None;
    }

    Some((key, strip_quotes(value.trim())))
}

fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    struct EnvCleanup(Vec<&'static str>);

    impl Drop for EnvCleanup {
        fn drop(&mut self) {
            for key in &self.0 {
                env::remove_var(key);
            }
        }
    }

    #[test]
    fn test_apply_env_file_sets_variables() {
        let _cleanup = EnvCleanup(vec![
            "TREECFG_ENVFILE_PLAIN",
            "TREECFG_ENVFILE_SPACED",
            "TREECFG_ENVFILE_DQUOTED",
            "TREECFG_ENVFILE_SQUOTED",
        ]);
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(
            &path,
            "# comment\n\
             \n\
             TREECFG_ENVFILE_PLAIN=plain\n\
             TREECFG_ENVFILE_SPACED = spaced\n\
             TREECFG_ENVFILE_DQUOTED=\"hello world\"\n\
             TREECFG_ENVFILE_SQUOTED='single'\n",
        )
        .unwrap();

        let applied = apply_env_file(&path).unwrap();

        assert_eq!(applied, 4);
        assert_eq!(env::var("TREECFG_ENVFILE_PLAIN").unwrap(), "plain");
        assert_eq!(env::var("TREECFG_ENVFILE_SPACED").unwrap(), "spaced");
        assert_eq!(env::var("TREECFG_ENVFILE_DQUOTED").unwrap(), "hello world");
        assert_eq!(env::var("TREECFG_ENVFILE_SQUOTED").unwrap(), "single");
    }

    #[test]
    fn test_apply_env_file_skips_lines_without_separator() {
        let _cleanup = EnvCleanup(vec!["TREECFG_ENVFILE_BEFORE", "TREECFG_ENVFILE_AFTER"]);
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(
            &path,
            "TREECFG_ENVFILE_BEFORE=one\n\
             not a pair\n\
             =no key\n\
             TREECFG_ENVFILE_AFTER=two\n",
        )
        .unwrap();

        let applied = apply_env_file(&path).unwrap();

        assert_eq!(applied, 2);
        assert_eq!(env::var("TREECFG_ENVFILE_BEFORE").unwrap(), "one");
        assert_eq!(env::var("TREECFG_ENVFILE_AFTER").unwrap(), "two");
    }

    #[test]
    fn test_apply_env_file_keeps_values_literal() {
        let _cleanup = EnvCleanup(vec![
            "TREECFG_ENVFILE_FIRST",
            "TREECFG_ENVFILE_APOSTROPHE",
            "TREECFG_ENVFILE_DOLLAR",
            "TREECFG_ENVFILE_HASH",
            "TREECFG_ENVFILE_WORDS",
            "TREECFG_ENVFILE_EQUALS",
            "TREECFG_ENVFILE_LAST",
        ]);
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(
            &path,
            "TREECFG_ENVFILE_FIRST=first\n\
             TREECFG_ENVFILE_APOSTROPHE=it's\n\
             TREECFG_ENVFILE_DOLLAR=pa$HOME\n\
             TREECFG_ENVFILE_HASH=abc # tail\n\
             TREECFG_ENVFILE_WORDS=hello world\n\
             TREECFG_ENVFILE_EQUALS=a=b=c\n\
             TREECFG_ENVFILE_LAST=last\n",
        )
        .unwrap();

        let applied = apply_env_file(&path).unwrap();

        assert_eq!(applied, 7);
        assert_eq!(env::var("TREECFG_ENVFILE_FIRST").unwrap(), "first");
        assert_eq!(env::var("TREECFG_ENVFILE_APOSTROPHE").unwrap(), "it's");
        assert_eq!(env::var("TREECFG_ENVFILE_DOLLAR").unwrap(), "pa$HOME");
        assert_eq!(env::var("TREECFG_ENVFILE_HASH").unwrap(), "abc # tail");
        assert_eq!(env::var("TREECFG_ENVFILE_WORDS").unwrap(), "hello world");
        assert_eq!(env::var("TREECFG_ENVFILE_EQUALS").unwrap(), "a=b=c");
        assert_eq!(env::var("TREECFG_ENVFILE_LAST").unwrap(), "last");
    }

    #[test]
    fn test_apply_env_file_strips_only_matching_quotes() {
        let _cleanup = EnvCleanup(vec![
            "TREECFG_ENVFILE_OPEN",
            "TREECFG_ENVFILE_MIXED",
            "TREECFG_ENVFILE_NESTED",
            "TREECFG_ENVFILE_LONE",
            "TREECFG_ENVFILE_EMPTY",
        ]);
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(
            &path,
            "TREECFG_ENVFILE_OPEN=\"abc\n\
             TREECFG_ENVFILE_MIXED=\"abc'\n\
             TREECFG_ENVFILE_NESTED='\"inner\"'\n\
             TREECFG_ENVFILE_LONE=\"\n\
             TREECFG_ENVFILE_EMPTY=\"\"\n",
        )
        .unwrap();

        apply_env_file(&path).unwrap();

        assert_eq!(env::var("TREECFG_ENVFILE_OPEN").unwrap(), "\"abc");
        assert_eq!(env::var("TREECFG_ENVFILE_MIXED").unwrap(), "\"abc'");
        assert_eq!(env::var("TREECFG_ENVFILE_NESTED").unwrap(), "\"inner\"");
        assert_eq!(env::var("TREECFG_ENVFILE_LONE").unwrap(), "\"");
        assert_eq!(env::var("TREECFG_ENVFILE_EMPTY").unwrap(), "");
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("  KEY = value  "), Some(("KEY", "value")));
        assert_eq!(parse_line("KEY="), Some(("KEY", "")));
        assert_eq!(parse_line("# KEY=value"), None);
        assert_eq!(parse_line("   "), None);
        assert_eq!(parse_line("KEY"), None);
        assert_eq!(parse_line("= value"), None);
    }

    #[test]
    fn test_apply_env_file_overrides_existing() {
        let _cleanup = EnvCleanup(vec!["TREECFG_ENVFILE_EXISTING"]);
        env::set_var("TREECFG_ENVFILE_EXISTING", "before");
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "TREECFG_ENVFILE_EXISTING=after\n").unwrap();

        apply_env_file(&path).unwrap();

        assert_eq!(env::var("TREECFG_ENVFILE_EXISTING").unwrap(), "after");
    }

    #[test]
    fn test_apply_env_file_missing_is_error() {
        let dir = TempDir::new().unwrap();
        let result = apply_env_file(dir.path().join("missing.env"));
        assert!(matches!(result, Err(ConfigError::SourceError { .. })));
    }
}
