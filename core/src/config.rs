//! Binder configuration.

use serde::{Deserialize, Serialize};

/// How the scanner treats two entries claiming the same name in one scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// The entry registered last wins; nothing is reported.
    #[default]
    LastWins,
    /// Duplicate subcommand names, duplicate option names within a command
    /// and repeated positional blocks fail the scan.
    Reject,
}

/// Settings that shape how a tree is built.
///
/// # Examples
///
/// ```
/// use command_binder_core::{BinderConfig, CollisionPolicy};
///
/// let config: BinderConfig = serde_json::from_str(r#"{"collisions": "reject"}"#).unwrap();
/// assert_eq!(config.namespace_delimiter, ".");
/// assert_eq!(config.collisions, CollisionPolicy::Reject);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinderConfig {
    /// Joins group namespaces and long option names.
    pub namespace_delimiter: String,
    /// Duplicate-name handling.
    pub collisions: CollisionPolicy,
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self {
            namespace_delimiter: ".".to_string(),
            collisions: CollisionPolicy::default(),
        }
    }
}

impl BinderConfig {
    /// Default configuration with duplicate names rejected.
    pub fn strict() -> Self {
        Self {
            collisions: CollisionPolicy::Reject,
            ..Self::default()
        }
    }
}
