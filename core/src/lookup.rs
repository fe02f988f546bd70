//! Per-scope lookup tables.
//!
//! A [`Lookup`] is the merged view a tokenizer needs while it sits inside one
//! command: every option visible from that command (its own and its
//! ancestors') by short and namespace-qualified long name, and the command's
//! direct children by name and alias. Lookups are rebuilt for every scope and
//! never stored on the tree.

use std::collections::HashMap;

use tracing::trace;

use crate::command::CommandId;
use crate::option::CliOption;
use crate::tree::CommandTree;

/// Name-resolution maps for one command scope.
#[derive(Debug, Default, Clone)]
pub struct Lookup<'t> {
    /// Short name to option.
    pub short_names: HashMap<char, &'t CliOption>,
    /// Namespace-qualified long name to option.
    pub long_names: HashMap<String, &'t CliOption>,
    /// Child name or alias to child command.
    pub commands: HashMap<String, CommandId>,
}

impl<'t> Lookup<'t> {
    /// Option answering to `-short`.
    pub fn short(&self, short: char) -> Option<&'t CliOption> {
        self.short_names.get(&short).copied()
    }

    /// Option answering to `--long` (namespace-qualified).
    pub fn long(&self, long: &str) -> Option<&'t CliOption> {
        self.long_names.get(long).copied()
    }

    /// Child command answering to `token`.
    pub fn command(&self, token: &str) -> Option<CommandId> {
        self.commands.get(token).copied()
    }

    /// Command tokens, sorted.
    pub fn command_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl CommandTree {
    /// Builds the lookup for the scope of command `id`.
    ///
    /// Options of every ancestor are merged from the root downward, then the
    /// command's own options and its direct children. Later insertions
    /// replace earlier ones, so the nearest scope wins a name collision.
    /// Ancestors never contribute commands: only `id`'s own children can be
    /// selected from its scope.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_binder_core::{Aggregate, BinderConfig, CommandTree, Slot};
    ///
    /// let verbose: Slot<bool> = Slot::default();
    /// let all: Slot<bool> = Slot::default();
    /// let data = Aggregate::new()
    ///     .value("Verbose", r#"short:"v" long:"verbose""#, &verbose)
    ///     .nested(
    ///         "Add",
    ///         r#"command:"add" alias:"a""#,
    ///         Aggregate::new().value("All", r#"short:"A" long:"all""#, &all),
    ///     );
    /// let tree = CommandTree::build("app", "", "", &data, BinderConfig::default()).unwrap();
    ///
    /// let root = tree.make_lookup(tree.root());
    /// assert_eq!(root.command_names(), ["a", "add"]);
    /// assert!(root.long("all").is_none());
    ///
    /// let add = tree.find_child(tree.root(), "add").unwrap();
    /// let scoped = tree.make_lookup(add);
    /// assert!(scoped.long("verbose").is_some());
    /// assert!(scoped.short('A').is_some());
    /// assert!(scoped.commands.is_empty());
    /// ```
    pub fn make_lookup(&self, id: CommandId) -> Lookup<'_> {
        let mut lookup = Lookup::default();

        let mut ancestors: Vec<CommandId> = self.ancestors(id).collect();
        ancestors.reverse();
        for ancestor in ancestors {
            self.fill_lookup(&mut lookup, ancestor, true);
        }
        self.fill_lookup(&mut lookup, id, false);

        trace!(
            command = %self.command(id).name,
            short = lookup.short_names.len(),
            long = lookup.long_names.len(),
            commands = lookup.commands.len(),
            "Built lookup"
        );
        lookup
    }

    fn fill_lookup<'t>(&'t self, lookup: &mut Lookup<'t>, id: CommandId, only_options: bool) {
        let command = self.command(id);
        command.group().each_group(&mut |group| {
            for option in group.options() {
                if let Some(short) = option.short {
                    lookup.short_names.insert(short, option);
                }
                if let Some(long) = option.long_name_with_namespace() {
                    lookup.long_names.insert(long.to_string(), option);
                }
            }
        });

        if only_options {
            return;
        }

        for child in self.children(id) {
            for name in child.names() {
                lookup.commands.insert(name.to_string(), child.id());
            }
        }
    }
}
