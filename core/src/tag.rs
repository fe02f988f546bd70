//! Field metadata tags.
//!
//! A tag is a space-separated list of `key:"value"` pairs attached to a
//! field description, for example:
//!
//! ```text
//! command:"add" alias:"a" description:"Add a file to the index"
//! ```
//!
//! Keys may repeat (`alias:"a" alias:"ad"`); [`MultiTag::get`] returns the
//! last occurrence and [`MultiTag::get_many`] returns all of them in order.
//!
//! # Examples
//!
//! ```
//! use command_binder_core::MultiTag;
//!
//! let tag = MultiTag::parse(r#"short:"v" long:"verbose" alias:"a" alias:"b""#).unwrap();
//! assert_eq!(tag.get("long"), Some("verbose"));
//! assert_eq!(tag.get_many("alias"), ["a", "b"]);
//! assert!(tag.get("missing").is_none());
//! ```

use std::collections::HashMap;

use thiserror::Error;

/// Errors produced while parsing a tag string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    /// A `:` or `"` appeared where a key was expected.
    #[error("expected a key name, found `{found}`")]
    MissingKey {
        /// Character found instead.
        found: char,
    },
    /// The tag ended right after a key.
    #[error("expected `:` after key `{key}`, found end of tag")]
    UnexpectedEnd {
        /// Key that was being read.
        key: String,
    },
    /// Something other than `:` followed a key.
    #[error("expected `:` after key `{key}`, found `{found}`")]
    ExpectedColon {
        /// Key that was being read.
        key: String,
        /// Character found instead.
        found: char,
    },
    /// The tag ended right after `key:`.
    #[error("expected `\"` to start the value of `{key}`, found end of tag")]
    MissingValue {
        /// Key whose value is missing.
        key: String,
    },
    /// Something other than `"` followed `key:`.
    #[error("expected `\"` to start the value of `{key}`, found `{found}`")]
    ExpectedQuote {
        /// Key whose value is malformed.
        key: String,
        /// Character found instead.
        found: char,
    },
    /// A raw newline appeared inside a quoted value.
    #[error("unexpected newline in the value of `{key}`")]
    NewlineInValue {
        /// Key whose value is malformed.
        key: String,
    },
    /// A quoted value was never closed.
    #[error("unterminated value for `{key}`")]
    UnterminatedValue {
        /// Key whose value is malformed.
        key: String,
    },
    /// A backslash escape is not recognized.
    #[error("invalid escape `\\{escape}` in the value of `{key}`")]
    InvalidEscape {
        /// Key whose value is malformed.
        key: String,
        /// Character following the backslash.
        escape: char,
    },
}

/// Parsed tag: every key mapped to all of its values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiTag {
    values: HashMap<String, Vec<String>>,
}

impl MultiTag {
    /// Parses tag text. An empty or all-blank string yields an empty tag.
    ///
    /// # Errors
    ///
    /// Returns a [`TagError`] describing the first syntax problem.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_binder_core::{MultiTag, TagError};
    ///
    /// assert!(MultiTag::parse("").unwrap().get("long").is_none());
    /// assert!(matches!(
    ///     MultiTag::parse(r#"long:verbose"#),
    ///     Err(TagError::ExpectedQuote { .. })
    /// ));
    /// ```
    pub fn parse(text: &str) -> Result<Self, TagError> {
        let mut values: HashMap<String, Vec<String>> = HashMap::new();
        let mut rest = text;

        loop {
            rest = rest.trim_start_matches(' ');
            if rest.is_empty() {
                break;
            }

            let Some(key_end) = rest.find([' ', ':', '"']) else {
                return Err(TagError::UnexpectedEnd {
                    key: rest.to_string(),
                });
            };
            if key_end == 0 {
                let found = rest.chars().next().unwrap_or(':');
                return Err(TagError::MissingKey { found });
            }
            let (key, tail) = rest.split_at(key_end);

            let Some(tail) = tail.strip_prefix(':') else {
                let found = tail.chars().next().unwrap_or(' ');
                return Err(TagError::ExpectedColon {
                    key: key.to_string(),
                    found,
                });
            };

            let Some(quoted) = tail.strip_prefix('"') else {
                return Err(match tail.chars().next() {
                    Some(found) => TagError::ExpectedQuote {
                        key: key.to_string(),
                        found,
                    },
                    None => TagError::MissingValue {
                        key: key.to_string(),
                    },
                });
            };

            let (value, remaining) = unquote(key, quoted)?;
            values.entry(key.to_string()).or_default().push(value);
            rest = remaining;
        }

        Ok(Self { values })
    }

    /// Returns the last value recorded for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|all| all.last())
            .map(String::as_str)
    }

    /// Returns every value recorded for `key`, in the order they appeared.
    pub fn get_many(&self, key: &str) -> &[String] {
        self.values.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns `true` if `key` is present with a non-empty last value.
    ///
    /// Classification keys such as `command` or `required` are considered
    /// absent when written as `required:""`.
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.is_empty())
    }

    /// Returns the last non-empty value recorded for `key`.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }
}

/// Reads a quoted value whose opening quote was already consumed. Returns the
/// decoded value and the text after the closing quote.
fn unquote<'a>(key: &str, input: &'a str) -> Result<(String, &'a str), TagError> {
    let mut value = String::new();
    let mut chars = input.char_indices();

    while let Some((idx, ch)) = chars.next() {
        match ch {
            '"' => return Ok((value, &input[idx + 1..])),
            '\n' => {
                return Err(TagError::NewlineInValue {
                    key: key.to_string(),
                });
            }
            '\\' => {
                let Some((_, escape)) = chars.next() else {
                    break;
                };
                let decoded = match escape {
                    '"' => '"',
                    '\\' => '\\',
                    '\'' => '\'',
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    other => {
                        return Err(TagError::InvalidEscape {
                            key: key.to_string(),
                            escape: other,
                        });
                    }
                };
                value.push(decoded);
            }
            other => value.push(other),
        }
    }

    Err(TagError::UnterminatedValue {
        key: key.to_string(),
    })
}
