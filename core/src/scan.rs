//! Annotated-structure scanner.
//!
//! Walks an [`Aggregate`] once, in declaration order, and classifies every
//! field by its tag:
//!
//! - `positional-args` on a nested field: the nested fields become the
//!   command's ordered positional arguments;
//! - `command` on a nested field: a child command is created and scanned;
//! - `group` on a nested field: a nested option group is created and
//!   scanned (group classification only, no commands inside groups);
//! - any other nested field is flattened into the enclosing group;
//! - leaf fields with `short`, `long` or `ini-name` become options.
//!
//! `no-flag` skips a field entirely.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::command::{Arg, CommandId};
use crate::config::CollisionPolicy;
use crate::error::{BindError, Result};
use crate::field::{Aggregate, Field, FieldKind};
use crate::group::Group;
use crate::option::CliOption;
use crate::tag::MultiTag;
use crate::tree::CommandTree;

/// Tag keys that only make sense on fields with nested fields.
const STRUCTURAL_KEYS: [&str; 3] = ["command", "positional-args", "group"];

/// Scans `data` into command `id`.
pub(crate) fn scan_command(tree: &mut CommandTree, id: CommandId, data: Aggregate) -> Result<()> {
    let mut group = std::mem::take(&mut tree.command_mut(id).group);
    let outcome = Scanner::new(tree, Some(id)).scan_fields(data.into_fields(), &mut group, "");
    tree.command_mut(id).group = group;
    outcome?;

    if tree.config().collisions == CollisionPolicy::Reject {
        check_option_collisions(tree, id)?;
    }
    Ok(())
}

fn parse_tag(field: &str, text: &str) -> Result<MultiTag> {
    MultiTag::parse(text).map_err(|source| BindError::TagSyntax {
        field: field.to_string(),
        source,
    })
}

struct Scanner<'t> {
    tree: &'t mut CommandTree,
    /// Command receiving subcommands and positional blocks; `None` while
    /// scanning inside a nested group.
    command: Option<CommandId>,
    positional_seen: bool,
}

impl<'t> Scanner<'t> {
    fn new(tree: &'t mut CommandTree, command: Option<CommandId>) -> Self {
        Self {
            tree,
            command,
            positional_seen: false,
        }
    }

    fn scan_fields(
        &mut self,
        fields: Vec<Field>,
        group: &mut Group,
        namespace: &str,
    ) -> Result<()> {
        for field in fields {
            let tag = parse_tag(&field.name, &field.tag)?;
            if tag.is_set("no-flag") {
                trace!(field = %field.name, "Skipping no-flag field");
                continue;
            }

            match field.kind {
                FieldKind::Struct(data) => {
                    if let Some(data) = self.dispatch(&field.name, &tag, data, group, namespace)? {
                        self.scan_fields(data.into_fields(), group, namespace)?;
                    }
                }
                FieldKind::Value(binding) => {
                    if let Some(key) = STRUCTURAL_KEYS.into_iter().find(|key| tag.is_set(key)) {
                        return Err(BindError::NotAStruct {
                            field: field.name,
                            key,
                        });
                    }
                    let delimiter = &self.tree.config().namespace_delimiter;
                    match CliOption::from_tag(&field.name, &tag, namespace, delimiter, binding)? {
                        Some(option) => group.add_option(option),
                        None => trace!(field = %field.name, "Field has no option names"),
                    }
                }
            }
        }
        Ok(())
    }

    /// Command-level classification. Returns the aggregate back when the
    /// field is neither a positional block, a subcommand nor a group.
    fn dispatch(
        &mut self,
        field: &str,
        tag: &MultiTag,
        data: Aggregate,
        group: &mut Group,
        namespace: &str,
    ) -> Result<Option<Aggregate>> {
        if let Some(command) = self.command {
            if tag.is_set("positional-args") {
                self.bind_positional(command, tag, data)?;
                return Ok(None);
            }
            if let Some(name) = tag.non_empty("command") {
                trace!(field, command = name, "Scanning subcommand field");
                self.tree.add_tagged_command(command, name, tag, data)?;
                return Ok(None);
            }
        }
        self.scan_sub_group(tag, data, group, namespace)
    }

    /// Group-level classification: `group`-tagged fields become nested
    /// groups, anything else is handed back for flattening.
    fn scan_sub_group(
        &mut self,
        tag: &MultiTag,
        data: Aggregate,
        group: &mut Group,
        namespace: &str,
    ) -> Result<Option<Aggregate>> {
        let Some(title) = tag.non_empty("group") else {
            return Ok(Some(data));
        };

        let mut sub = Group::new(title, tag.non_empty("description").map(str::to_string));
        sub.namespace = tag.non_empty("namespace").map(str::to_string);
        sub.hidden = tag.is_set("hidden");

        let nested = match (&sub.namespace, namespace.is_empty()) {
            (None, _) => namespace.to_string(),
            (Some(own), true) => own.clone(),
            (Some(own), false) => {
                format!("{namespace}{}{own}", self.tree.config().namespace_delimiter)
            }
        };

        Scanner::new(&mut *self.tree, None).scan_fields(data.into_fields(), &mut sub, &nested)?;
        group.add_group(sub);
        Ok(None)
    }

    fn bind_positional(
        &mut self,
        command: CommandId,
        tag: &MultiTag,
        data: Aggregate,
    ) -> Result<()> {
        let mut args = Vec::with_capacity(data.len());
        for field in data.into_fields() {
            let arg_tag = parse_tag(&field.name, &field.tag)?;
            let FieldKind::Value(binding) = field.kind else {
                return Err(BindError::UnbindablePositional { field: field.name });
            };
            args.push(Arg::new(field.name, arg_tag, binding));
        }

        let reject = self.tree.config().collisions == CollisionPolicy::Reject;
        let cmd = self.tree.command_mut(command);
        if self.positional_seen {
            if reject {
                return Err(BindError::DuplicatePositionalBlock {
                    command: cmd.name.clone(),
                });
            }
            debug!(command = %cmd.name, "Replacing earlier positional-args block");
        }

        cmd.args_required = tag.is_set("required") && !args.is_empty();
        cmd.args = args;
        self.positional_seen = true;
        debug!(
            command = %cmd.name,
            args = cmd.args.len(),
            required = cmd.args_required,
            "Bound positional arguments"
        );
        Ok(())
    }
}

fn check_option_collisions(tree: &CommandTree, id: CommandId) -> Result<()> {
    let command = tree.command(id);
    let mut shorts = HashSet::new();
    let mut longs = HashSet::new();

    for option in command.group().all_options() {
        let short_clash = option.short.filter(|short| !shorts.insert(*short));
        let long_clash = option
            .long_name_with_namespace()
            .filter(|long| !longs.insert(*long));

        let clash = match (short_clash, long_clash) {
            (Some(short), _) => Some(format!("-{short}")),
            (None, Some(long)) => Some(format!("--{long}")),
            (None, None) => None,
        };
        if let Some(name) = clash {
            return Err(BindError::DuplicateOption {
                command: command.name.clone(),
                name,
            });
        }
    }
    Ok(())
}
