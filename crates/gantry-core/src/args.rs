//! Startup argument store.
//!
//! [`ArgSet`] holds `key → value` pairs collected from the command line
//! and, optionally, from a supplementary argument file. The grammar is
//! deliberately small: `--key=value`, `--key value`, or a bare `--flag`
//! (which stores `"true"`). Within one source, later occurrences of a key
//! override earlier ones. Across sources, the command line wins: file
//! entries are only inserted for keys not already present.
//!
//! All failures are explicit [`ArgError`] values; a misconfigured startup
//! is the caller's decision to abort on, not this crate's.

use indexmap::IndexMap;
use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};

/// Errors from argument loading and typed retrieval.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArgError {
    /// The argument file could not be read.
    Io {
        /// Path that failed to load.
        path: PathBuf,
        /// Underlying I/O error text.
        reason: String,
    },
    /// A token did not fit the `--key[=value]` grammar.
    UnexpectedToken {
        /// The offending token.
        token: String,
    },
    /// A key was present but its value failed to parse.
    BadValue {
        /// The key whose value was rejected.
        key: String,
        /// The raw value.
        value: String,
        /// What the caller asked for (`"int"`, `"float"`, `"bool"`).
        expected: &'static str,
    },
    /// A required key was absent.
    MissingKey {
        /// The absent key.
        key: String,
    },
}

impl fmt::Display for ArgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, reason } => {
                write!(f, "failed to load args from {}: {reason}", path.display())
            }
            Self::UnexpectedToken { token } => {
                write!(f, "unexpected argument token '{token}' (expected --key[=value])")
            }
            Self::BadValue {
                key,
                value,
                expected,
            } => write!(f, "argument '{key}': '{value}' is not a valid {expected}"),
            Self::MissingKey { key } => write!(f, "required argument '{key}' is missing"),
        }
    }
}

impl Error for ArgError {}

/// Insertion-ordered `key → value` argument store.
#[derive(Clone, Debug, Default)]
pub struct ArgSet {
    entries: IndexMap<String, String>,
}

impl ArgSet {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse command-line style tokens into the store.
    ///
    /// Later occurrences of a key override earlier ones. Tokens that do
    /// not start with `--` are rejected.
    pub fn load_args(&mut self, args: &[String]) -> Result<(), ArgError> {
        for (key, value) in parse_tokens(args)? {
            self.entries.insert(key, value);
        }
        Ok(())
    }

    /// Append entries from an argument file.
    ///
    /// The file uses the same token grammar as the command line, split on
    /// whitespace, with `#` starting a line comment. Keys already present
    /// in the store are left untouched, so command-line entries override
    /// file entries regardless of load order.
    pub fn load_file(&mut self, path: &Path) -> Result<(), ArgError> {
        let text = std::fs::read_to_string(path).map_err(|e| ArgError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let tokens: Vec<String> = text
            .lines()
            .map(|line| line.split('#').next().unwrap_or(""))
            .flat_map(|line| line.split_whitespace())
            .map(str::to_string)
            .collect();
        for (key, value) in parse_tokens(&tokens)? {
            self.entries.entry(key).or_insert(value);
        }
        Ok(())
    }

    /// Whether `key` is present.
    pub fn has_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Raw value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Required string value.
    pub fn parse_string(&self, key: &str) -> Result<String, ArgError> {
        self.get(key)
            .map(str::to_string)
            .ok_or_else(|| ArgError::MissingKey {
                key: key.to_string(),
            })
    }

    /// String value with a default for absent keys.
    pub fn parse_string_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or(default).to_string()
    }

    /// Required integer value.
    pub fn parse_int(&self, key: &str) -> Result<i64, ArgError> {
        let raw = self.parse_string(key)?;
        raw.parse().map_err(|_| ArgError::BadValue {
            key: key.to_string(),
            value: raw,
            expected: "int",
        })
    }

    /// Integer value with a default for absent keys.
    ///
    /// A key that is present but malformed is still an error — a typo in
    /// a config file must not silently fall back to the default.
    pub fn parse_int_or(&self, key: &str, default: i64) -> Result<i64, ArgError> {
        match self.get(key) {
            None => Ok(default),
            Some(_) => self.parse_int(key),
        }
    }

    /// Required floating-point value.
    pub fn parse_f64(&self, key: &str) -> Result<f64, ArgError> {
        let raw = self.parse_string(key)?;
        raw.parse().map_err(|_| ArgError::BadValue {
            key: key.to_string(),
            value: raw,
            expected: "float",
        })
    }

    /// Floating-point value with a default for absent keys.
    pub fn parse_f64_or(&self, key: &str, default: f64) -> Result<f64, ArgError> {
        match self.get(key) {
            None => Ok(default),
            Some(_) => self.parse_f64(key),
        }
    }

    /// Boolean value with a default for absent keys.
    ///
    /// Accepts `true`/`false`/`1`/`0`.
    pub fn parse_bool_or(&self, key: &str, default: bool) -> Result<bool, ArgError> {
        match self.get(key) {
            None => Ok(default),
            Some("true") | Some("1") => Ok(true),
            Some("false") | Some("0") => Ok(false),
            Some(other) => Err(ArgError::BadValue {
                key: key.to_string(),
                value: other.to_string(),
                expected: "bool",
            }),
        }
    }
}

/// Parse a token stream into `(key, value)` pairs.
///
/// `--key=value` and `--key value` both yield a pair; `--flag` followed by
/// another `--` token (or end of input) yields `("flag", "true")`.
fn parse_tokens(tokens: &[String]) -> Result<Vec<(String, String)>, ArgError> {
    let mut pairs = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        let key = token
            .strip_prefix("--")
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ArgError::UnexpectedToken {
                token: token.clone(),
            })?;
        if let Some((key, value)) = key.split_once('=') {
            pairs.push((key.to_string(), value.to_string()));
            i += 1;
        } else if i + 1 < tokens.len() && !tokens[i + 1].starts_with("--") {
            pairs.push((key.to_string(), tokens[i + 1].clone()));
            i += 2;
        } else {
            pairs.push((key.to_string(), "true".to_string()));
            i += 1;
        }
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_all_three_token_forms() {
        let mut args = ArgSet::new();
        args.load_args(&strs(&["--scene=reach", "--num_agents", "4", "--headless"]))
            .unwrap();
        assert_eq!(args.get("scene"), Some("reach"));
        assert_eq!(args.parse_int("num_agents").unwrap(), 4);
        assert_eq!(args.parse_bool_or("headless", false).unwrap(), true);
    }

    #[test]
    fn later_occurrence_overrides_earlier() {
        let mut args = ArgSet::new();
        args.load_args(&strs(&["--scene=drift", "--scene=reach"]))
            .unwrap();
        assert_eq!(args.get("scene"), Some("reach"));
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn bare_token_is_rejected() {
        let mut args = ArgSet::new();
        let err = args.load_args(&strs(&["scene"])).unwrap_err();
        assert!(matches!(err, ArgError::UnexpectedToken { .. }));
    }

    #[test]
    fn missing_required_key_errors() {
        let args = ArgSet::new();
        assert!(matches!(
            args.parse_string("scene"),
            Err(ArgError::MissingKey { .. })
        ));
    }

    #[test]
    fn malformed_int_errors_even_with_default() {
        let mut args = ArgSet::new();
        args.load_args(&strs(&["--substeps=soon"])).unwrap();
        let err = args.parse_int_or("substeps", 1).unwrap_err();
        assert!(matches!(err, ArgError::BadValue { .. }));
    }

    #[test]
    fn absent_key_takes_default() {
        let args = ArgSet::new();
        assert_eq!(args.parse_int_or("substeps", 1).unwrap(), 1);
        assert_eq!(args.parse_f64_or("speed", 1.5).unwrap(), 1.5);
        assert_eq!(args.parse_string_or("scene", "drift"), "drift");
    }

    #[test]
    fn file_entries_do_not_override_command_line() {
        let dir = std::env::temp_dir().join("gantry_argset_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("precedence.args");
        std::fs::write(
            &path,
            "# arena setup\n--scene drift   # overridden by cmdline\n--num_agents 8\n",
        )
        .unwrap();

        let mut args = ArgSet::new();
        args.load_args(&strs(&["--scene=reach"])).unwrap();
        args.load_file(&path).unwrap();

        assert_eq!(args.get("scene"), Some("reach"));
        assert_eq!(args.parse_int("num_agents").unwrap(), 8);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let mut args = ArgSet::new();
        let err = args
            .load_file(Path::new("/nonexistent/gantry.args"))
            .unwrap_err();
        assert!(matches!(err, ArgError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/gantry.args"));
    }

    #[test]
    fn comments_and_blank_lines_are_ignored() {
        let dir = std::env::temp_dir().join("gantry_argset_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("comments.args");
        std::fs::write(&path, "# full-line comment\n\n--speed 2.0\n").unwrap();

        let mut args = ArgSet::new();
        args.load_file(&path).unwrap();
        assert_eq!(args.parse_f64("speed").unwrap(), 2.0);
        assert_eq!(args.len(), 1);
    }
}
