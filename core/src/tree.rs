//! The command arena.
//!
//! A [`CommandTree`] owns every [`Command`] of one configuration. Commands are
//! created once, during the scan of the root aggregate or of a nested
//! `command`-tagged field, and live as long as the tree.

use std::collections::HashSet;
use std::rc::Rc;

use tracing::debug;

use crate::command::{Command, CommandId};
use crate::config::{BinderConfig, CollisionPolicy};
use crate::error::{BindError, Result};
use crate::field::{Aggregate, Annotated};
use crate::group::{Group, HELP_GROUP_NAME};
use crate::option::CliOption;
use crate::scan;
use crate::tag::MultiTag;
use crate::value::{Callback, CallbackFn};

/// Arena of commands rooted at a single top-level command.
///
/// # Examples
///
/// ```
/// use command_binder_core::{Aggregate, BinderConfig, CommandTree, Slot};
///
/// let verbose: Slot<bool> = Slot::default();
/// let message: Slot<String> = Slot::default();
///
/// let data = Aggregate::new()
///     .value("Verbose", r#"short:"v" long:"verbose""#, &verbose)
///     .nested(
///         "Commit",
///         r#"command:"commit" alias:"ci" description:"Record changes""#,
///         Aggregate::new().value("Message", r#"short:"m" long:"message""#, &message),
///     );
///
/// let tree = CommandTree::build("git", "", "", &data, BinderConfig::default()).unwrap();
/// let commit = tree.find_child(tree.root(), "ci").unwrap();
/// assert_eq!(tree.command(commit).name, "commit");
/// assert_eq!(tree.command(commit).short_description(), "Record changes");
/// assert_eq!(tree.parent(commit), Some(tree.root()));
/// ```
#[derive(Debug)]
pub struct CommandTree {
    commands: Vec<Command>,
    config: BinderConfig,
}

impl CommandTree {
    /// Creates the root command and scans `data` into it.
    ///
    /// # Errors
    ///
    /// Returns the first [`BindError`] raised while scanning; the tree is
    /// discarded in that case.
    pub fn build(
        name: &str,
        short_description: &str,
        long_description: &str,
        data: &impl Annotated,
        config: BinderConfig,
    ) -> Result<Self> {
        let mut tree = Self {
            commands: Vec::new(),
            config,
        };
        let root = tree.create(name, short_description, long_description);
        scan::scan_command(&mut tree, root, data.describe())?;
        debug!(command = %name, commands = tree.commands.len(), "Built command tree");
        Ok(tree)
    }

    /// Configuration the tree was built with.
    pub fn config(&self) -> &BinderConfig {
        &self.config
    }

    /// Id of the root command.
    pub fn root(&self) -> CommandId {
        CommandId(0)
    }

    /// The root command.
    pub fn root_command(&self) -> &Command {
        self.command(self.root())
    }

    /// Number of commands in the arena.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Always `false`: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Looks a command up by id.
    pub fn get(&self, id: CommandId) -> Option<&Command> {
        self.commands.get(id.0)
    }

    /// Borrows a command by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree.
    pub fn command(&self, id: CommandId) -> &Command {
        &self.commands[id.0]
    }

    pub(crate) fn command_mut(&mut self, id: CommandId) -> &mut Command {
        &mut self.commands[id.0]
    }

    /// Parent of `id`, `None` for the root.
    pub fn parent(&self, id: CommandId) -> Option<CommandId> {
        self.command(id).parent
    }

    /// Direct children of `id` in registration order.
    pub fn children(&self, id: CommandId) -> impl Iterator<Item = &Command> {
        self.command(id)
            .children
            .iter()
            .map(move |child| self.command(*child))
    }

    /// Ancestors of `id`, from its parent up to the root.
    pub fn ancestors(&self, id: CommandId) -> impl Iterator<Item = CommandId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    /// Command names from the root down to `id`.
    pub fn path(&self, id: CommandId) -> Vec<&str> {
        let mut path: Vec<&str> = self
            .ancestors(id)
            .map(|ancestor| self.command(ancestor).name.as_str())
            .collect();
        path.reverse();
        path.push(self.command(id).name.as_str());
        path
    }

    /// Direct child of `id` answering to `token` (name or alias).
    ///
    /// When siblings collide, the last registered one wins.
    pub fn find_child(&self, id: CommandId, token: &str) -> Option<CommandId> {
        self.children(id)
            .filter(|child| child.matches(token))
            .last()
            .map(Command::id)
    }

    /// Adds a subcommand under `parent`, scanning `data` into it.
    ///
    /// On error the tree is left exactly as it was: neither the new command
    /// nor anything scanned below it stays in the arena.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::SubScan`] if scanning the new command fails, or
    /// [`BindError::DuplicateCommand`] under [`CollisionPolicy::Reject`].
    pub fn add_command(
        &mut self,
        parent: CommandId,
        name: &str,
        short_description: &str,
        long_description: &str,
        data: &impl Annotated,
    ) -> Result<CommandId> {
        let command = NewCommand {
            name,
            short_description,
            long_description,
            aliases: &[],
            subcommands_optional: false,
        };
        self.insert_child(parent, command, data.describe())
    }

    /// Adds a subcommand discovered on a `command`-tagged field.
    pub(crate) fn add_tagged_command(
        &mut self,
        parent: CommandId,
        name: &str,
        tag: &MultiTag,
        data: Aggregate,
    ) -> Result<CommandId> {
        let command = NewCommand {
            name,
            short_description: tag.get("description").unwrap_or_default(),
            long_description: tag.get("long-description").unwrap_or_default(),
            aliases: tag.get_many("alias"),
            subcommands_optional: tag.is_set("subcommands-optional"),
        };
        self.insert_child(parent, command, data)
    }

    fn create(
        &mut self,
        name: &str,
        short_description: &str,
        long_description: &str,
    ) -> CommandId {
        let id = CommandId(self.commands.len());
        self.commands
            .push(Command::new(id, name, short_description, long_description));
        id
    }

    /// Creates a command under `parent`, scans it and registers it.
    ///
    /// Every command created while scanning the new one has an id at or
    /// above the new id, so truncating the arena there undoes a failed
    /// insertion completely.
    fn insert_child(
        &mut self,
        parent: CommandId,
        new: NewCommand<'_>,
        data: Aggregate,
    ) -> Result<CommandId> {
        self.check_unique(parent, new.name, new.aliases)?;

        let id = self.create(new.name, new.short_description, new.long_description);
        let command = self.command_mut(id);
        command.parent = Some(parent);
        command.aliases = new.aliases.to_vec();
        command.subcommands_optional = new.subcommands_optional;

        if let Err(source) = scan::scan_command(self, id, data) {
            self.commands.truncate(id.0);
            return Err(BindError::SubScan {
                command: new.name.to_string(),
                source: Box::new(source),
            });
        }

        self.command_mut(parent).children.push(id);
        debug!(
            parent = %self.command(parent).name,
            command = %new.name,
            aliases = ?new.aliases,
            "Registered subcommand"
        );
        Ok(id)
    }

    /// Under [`CollisionPolicy::Reject`], fails if `name` or any alias is
    /// already taken by a child of `parent`.
    fn check_unique(&self, parent: CommandId, name: &str, aliases: &[String]) -> Result<()> {
        if self.config.collisions != CollisionPolicy::Reject {
            return Ok(());
        }

        let taken: HashSet<&str> = self
            .children(parent)
            .flat_map(|sibling| sibling.names())
            .collect();
        let mut names = std::iter::once(name).chain(aliases.iter().map(String::as_str));
        match names.find(|name| taken.contains(name)) {
            Some(name) => Err(BindError::DuplicateCommand {
                parent: self.command(parent).name.clone(),
                name: name.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Visits `id`, then its direct children. With `recurse`, every child's
    /// whole subtree is visited depth-first instead.
    pub fn each_command<'a, F: FnMut(&'a Command)>(
        &'a self,
        id: CommandId,
        recurse: bool,
        f: &mut F,
    ) {
        f(self.command(id));
        for child in &self.command(id).children {
            if recurse {
                self.each_command(*child, true, f);
            } else {
                f(self.command(*child));
            }
        }
    }

    /// Injects the synthesized help group into `id` and every command below
    /// it. Commands that already carry one are left alone, but their
    /// children are still visited.
    pub fn add_help_groups(&mut self, id: CommandId, show_help: &CallbackFn) {
        let command = self.command_mut(id);
        if !command.has_builtin_help_group {
            command.group.add_group(help_group(show_help));
            command.has_builtin_help_group = true;
            debug!(command = %command.name, "Injected help group");
        }

        let children = command.children.clone();
        for child in children {
            self.add_help_groups(child, show_help);
        }
    }
}

/// Identity of a subcommand about to be inserted.
struct NewCommand<'a> {
    name: &'a str,
    short_description: &'a str,
    long_description: &'a str,
    aliases: &'a [String],
    subcommands_optional: bool,
}

fn help_group(show_help: &CallbackFn) -> Group {
    let mut group = Group::new(HELP_GROUP_NAME, None);
    group.add_option(CliOption::builtin_help(
        Callback::new(Rc::clone(show_help)).binding(),
    ));
    group.mark_builtin_help();
    group
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::value::{Bind, Slot};

    fn chain() -> (CommandTree, Slot<bool>) {
        let flag: Slot<bool> = Slot::default();
        let data = Aggregate::new().nested(
            "A",
            r#"command:"a""#,
            Aggregate::new().nested(
                "B",
                r#"command:"b""#,
                Aggregate::new().value("Flag", r#"long:"flag""#, &flag),
            ),
        );
        let tree = CommandTree::build("root", "", "", &data, BinderConfig::default()).unwrap();
        (tree, flag)
    }

    #[test]
    fn test_path_and_ancestors() {
        let (tree, _) = chain();
        let a = tree.find_child(tree.root(), "a").unwrap();
        let b = tree.find_child(a, "b").unwrap();

        assert_eq!(tree.path(b), vec!["root", "a", "b"]);
        assert_eq!(tree.ancestors(b).collect::<Vec<_>>(), vec![a, tree.root()]);
        assert_eq!(tree.ancestors(tree.root()).count(), 0);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_each_command_recursion() {
        let (tree, _) = chain();
        let mut shallow = Vec::new();
        tree.each_command(tree.root(), false, &mut |c| shallow.push(c.name.clone()));
        assert_eq!(shallow, vec!["root", "a"]);

        let mut deep = Vec::new();
        tree.each_command(tree.root(), true, &mut |c| deep.push(c.name.clone()));
        assert_eq!(deep, vec!["root", "a", "b"]);
    }

    #[test]
    fn test_add_command_programmatically() {
        let (mut tree, _) = chain();
        let port: Slot<u16> = Slot::default();
        let data = Aggregate::new().value("Port", r#"short:"p""#, &port);
        let serve = tree
            .add_command(tree.root(), "serve", "Run the server", "", &data)
            .unwrap();

        assert_eq!(tree.find_child(tree.root(), "serve"), Some(serve));
        assert_eq!(tree.command(serve).group().options().len(), 1);
        assert!(tree.command(serve).long_description().is_none());
    }

    #[test]
    fn test_help_callback_is_bound() {
        let (mut tree, _) = chain();
        let shown = Rc::new(Cell::new(false));
        let flag = Rc::clone(&shown);
        let callback: CallbackFn = Rc::new(move || {
            flag.set(true);
            Ok(())
        });
        tree.add_help_groups(tree.root(), &callback);

        let help = tree.root_command().group().groups().last().unwrap();
        assert!(help.is_builtin_help());
        assert_eq!(help.short_description, HELP_GROUP_NAME);
        let option = &help.options()[0];
        assert_eq!(option.short, Some('h'));
        assert_eq!(option.long_name_with_namespace(), Some("help"));
        option.binding().set(None).unwrap();
        assert!(shown.get());
    }
}
