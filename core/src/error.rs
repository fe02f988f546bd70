//! Error types for building a command tree.
//!
//! Scanning is fail-fast: the first error aborts the scan of the branch it
//! occurred in and propagates to the caller. Whatever was already linked
//! into the tree stays linked; callers should treat the whole configuration
//! as invalid.

use thiserror::Error;

use crate::tag::TagError;

/// Errors raised while scanning annotated fields into a command tree.
#[derive(Debug, Error)]
pub enum BindError {
    /// A field's metadata tag could not be parsed.
    #[error("malformed tag on field `{field}`: {source}")]
    TagSyntax {
        /// Declared name of the offending field.
        field: String,
        /// Underlying parser error.
        #[source]
        source: TagError,
    },

    /// Scanning a subcommand's aggregate failed.
    #[error("failed to scan command `{command}`: {source}")]
    SubScan {
        /// Name of the subcommand being scanned.
        command: String,
        /// Error raised inside the subcommand.
        #[source]
        source: Box<BindError>,
    },

    /// A `short` tag held more than one character.
    #[error("short name `{value}` on field `{field}` must be a single character")]
    ShortNameTooLong {
        /// Declared name of the offending field.
        field: String,
        /// The rejected tag value.
        value: String,
    },

    /// A structural tag (`command`, `positional-args`, `group`) was put on a
    /// leaf field.
    #[error("field `{field}` is tagged `{key}` but has no nested fields")]
    NotAStruct {
        /// Declared name of the offending field.
        field: String,
        /// The structural tag key.
        key: &'static str,
    },

    /// A positional-argument block contained a nested aggregate.
    #[error("positional argument `{field}` must bind a value, not nested fields")]
    UnbindablePositional {
        /// Declared name of the offending sub-field.
        field: String,
    },

    /// Two sibling commands share a name or alias (reject policy only).
    #[error("duplicate command name `{name}` under `{parent}`")]
    DuplicateCommand {
        /// Name of the parent command.
        parent: String,
        /// The colliding name or alias.
        name: String,
    },

    /// Two options of one command share a short or long name (reject policy
    /// only).
    #[error("duplicate option `{name}` in command `{command}`")]
    DuplicateOption {
        /// Name of the command owning both options.
        command: String,
        /// The colliding name, rendered as `-x` or `--name`.
        name: String,
    },

    /// A command declared a second positional-argument block (reject policy
    /// only).
    #[error("command `{command}` declares more than one positional-args block")]
    DuplicatePositionalBlock {
        /// Name of the command.
        command: String,
    },
}

/// Convenience alias for results with [`BindError`].
pub type Result<T> = std::result::Result<T, BindError>;
