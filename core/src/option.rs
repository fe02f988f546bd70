//! Leaf options.

use crate::error::{BindError, Result};
use crate::tag::MultiTag;
use crate::value::Binding;

/// A single flag or switch bound to a destination.
///
/// Options are created by the scanner from leaf fields tagged with `short`,
/// `long` or `ini-name`. Each option is owned by exactly one
/// [`Group`](crate::Group).
#[derive(Debug, Clone)]
pub struct CliOption {
    /// Single-character name (`-v`).
    pub short: Option<char>,
    /// Long name without dashes (`verbose`), before namespacing.
    pub long: Option<String>,
    /// Help text.
    pub description: Option<String>,
    /// Placeholder shown in usage for value-taking options.
    pub value_name: Option<String>,
    /// Default values, in declaration order.
    pub defaults: Vec<String>,
    /// Allowed values, in declaration order.
    pub choices: Vec<String>,
    /// Whether the option must be supplied.
    pub required: bool,
    /// Whether help output should omit the option.
    pub hidden: bool,
    /// Name used by configuration-file loaders.
    pub ini_name: Option<String>,
    /// Declared name of the field the option was scanned from.
    pub field: String,
    qualified_long: Option<String>,
    binding: Binding,
}

impl CliOption {
    /// Builds an option from a parsed tag.
    ///
    /// `namespace` is the already-joined namespace of the enclosing groups
    /// (empty at command level). Returns `Ok(None)` when the field has no
    /// `short`, `long` or `ini-name`, in which case it is not an option.
    pub(crate) fn from_tag(
        field: &str,
        tag: &MultiTag,
        namespace: &str,
        delimiter: &str,
        binding: Binding,
    ) -> Result<Option<Self>> {
        let short = match tag.non_empty("short") {
            None => None,
            Some(value) => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => {
                        return Err(BindError::ShortNameTooLong {
                            field: field.to_string(),
                            value: value.to_string(),
                        });
                    }
                }
            }
        };
        let long = tag.non_empty("long").map(str::to_string);
        let ini_name = tag.non_empty("ini-name").map(str::to_string);

        if short.is_none() && long.is_none() && ini_name.is_none() {
            return Ok(None);
        }

        let qualified_long = long.as_deref().map(|long| {
            if namespace.is_empty() {
                long.to_string()
            } else {
                format!("{namespace}{delimiter}{long}")
            }
        });

        Ok(Some(Self {
            short,
            long,
            description: tag.non_empty("description").map(str::to_string),
            value_name: tag.non_empty("value-name").map(str::to_string),
            defaults: tag.get_many("default").to_vec(),
            choices: tag.get_many("choice").to_vec(),
            required: tag.is_set("required"),
            hidden: tag.is_set("hidden"),
            ini_name,
            field: field.to_string(),
            qualified_long,
            binding,
        }))
    }

    /// The `-h, --help` switch of the synthesized help group.
    pub(crate) fn builtin_help(binding: Binding) -> Self {
        Self {
            short: Some('h'),
            long: Some("help".to_string()),
            description: Some("Show this help message".to_string()),
            value_name: None,
            defaults: Vec::new(),
            choices: Vec::new(),
            required: false,
            hidden: false,
            ini_name: None,
            field: "ShowHelp".to_string(),
            qualified_long: Some("help".to_string()),
            binding,
        }
    }

    /// Long name prefixed with the namespaces of every enclosing group.
    ///
    /// `None` when the option has no long name.
    pub fn long_name_with_namespace(&self) -> Option<&str> {
        self.qualified_long.as_deref()
    }

    /// Whether the option can be given on the command line at all.
    ///
    /// Options that only carry an `ini-name` are reachable from
    /// configuration files but not from the command line.
    pub fn can_cli(&self) -> bool {
        self.short.is_some() || self.long.is_some()
    }

    /// Destination the option writes into.
    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    /// Whether the option consumes a value.
    pub fn takes_value(&self) -> bool {
        self.binding.takes_value()
    }

    /// Name for messages: `--qualified-long`, `-s`, or the ini name.
    pub fn display_name(&self) -> String {
        match (self.long_name_with_namespace(), self.short) {
            (Some(long), _) => format!("--{long}"),
            (None, Some(short)) => format!("-{short}"),
            (None, None) => self.ini_name.clone().unwrap_or_else(|| self.field.clone()),
        }
    }
}
