//! Resolution state handed to a tokenizer.
//!
//! The tree itself is never mutated while a command line is resolved. The
//! chain of selected commands lives in an [`ActivePath`] owned by a
//! [`ParseState`], so each resolution run starts from a clean slate and two
//! runs over the same tree do not interfere.

use crate::command::{Arg, Command, CommandId};
use crate::group::Group;
use crate::lookup::Lookup;
use crate::tree::CommandTree;

/// Commands selected so far, from the root down to the current scope.
///
/// Each entry is a direct child of the previous one, so at most one command
/// per depth is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePath {
    ids: Vec<CommandId>,
}

impl ActivePath {
    /// Path holding only `root`.
    pub fn new(root: CommandId) -> Self {
        Self { ids: vec![root] }
    }

    /// Innermost selected command.
    pub fn current(&self) -> CommandId {
        // `ids` is never empty: it starts with the root and only grows.
        self.ids[self.ids.len() - 1]
    }

    /// Child selected under `id`, if `id` is on the path and not its end.
    pub fn active(&self, id: CommandId) -> Option<CommandId> {
        let position = self.ids.iter().position(|candidate| *candidate == id)?;
        self.ids.get(position + 1).copied()
    }

    /// Selects `child` below the current command. Returns `false`, leaving
    /// the path untouched, when `child` is not a direct child of it.
    pub fn activate(&mut self, tree: &CommandTree, child: CommandId) -> bool {
        if tree.get(child).and_then(Command::parent) != Some(self.current()) {
            return false;
        }
        self.ids.push(child);
        true
    }

    /// Selected commands, root first.
    pub fn ids(&self) -> &[CommandId] {
        &self.ids
    }
}

/// Everything a tokenizer needs for the current command scope.
#[derive(Debug)]
pub struct ParseState<'t> {
    tree: &'t CommandTree,
    /// Positional slots still to be filled, copied from the command so
    /// consuming them leaves the command untouched.
    pub positional: Vec<Arg>,
    /// Names resolvable in this scope.
    pub lookup: Lookup<'t>,
    /// Command whose scope this is.
    pub command: CommandId,
    /// Commands selected so far.
    pub active: ActivePath,
}

impl<'t> ParseState<'t> {
    /// Fresh state scoped to the root command.
    pub fn new(tree: &'t CommandTree) -> Self {
        let root = tree.root();
        let mut state = Self {
            tree,
            positional: Vec::new(),
            lookup: Lookup::default(),
            command: root,
            active: ActivePath::new(root),
        };
        tree.fill_parse_state(root, &mut state);
        state
    }

    /// Descends into the child command answering to `token` in the current
    /// scope, re-seeding the state for it.
    ///
    /// Returns `None`, leaving the state untouched, if `token` names no
    /// child of the current command.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_binder_core::{Aggregate, BinderConfig, CommandTree, ParseState};
    ///
    /// let data = Aggregate::new().nested(
    ///     "Remote",
    ///     r#"command:"remote""#,
    ///     Aggregate::new().nested("Add", r#"command:"add""#, Aggregate::new()),
    /// );
    /// let tree = CommandTree::build("git", "", "", &data, BinderConfig::default()).unwrap();
    ///
    /// let mut state = ParseState::new(&tree);
    /// assert!(state.enter("add").is_none());
    /// let remote = state.enter("remote").unwrap();
    /// let add = state.enter("add").unwrap();
    /// assert_eq!(state.command, add);
    /// assert_eq!(state.active.active(tree.root()), Some(remote));
    /// assert_eq!(state.active.active(remote), Some(add));
    /// ```
    pub fn enter(&mut self, token: &str) -> Option<CommandId> {
        let tree = self.tree;
        let child = self.lookup.command(token)?;
        if !self.active.activate(tree, child) {
            return None;
        }
        tree.fill_parse_state(child, self);
        Some(child)
    }

    /// Visits every group along the active path.
    pub fn each_active_group<F: FnMut(&'t Command, &'t Group)>(&self, f: F) {
        self.tree.each_active_group(self.tree.root(), &self.active, f);
    }
}

impl CommandTree {
    /// Seeds `state` for the scope of command `id`: a copy of its positional
    /// arguments, a fresh lookup and the command itself.
    pub fn fill_parse_state<'t>(&'t self, id: CommandId, state: &mut ParseState<'t>) {
        state.positional = self.command(id).args().to_vec();
        state.lookup = self.make_lookup(id);
        state.command = id;
    }

    /// Visits every group of `root`, then follows `path` into the active
    /// child and repeats. Inactive siblings are never visited.
    pub fn each_active_group<'t, F: FnMut(&'t Command, &'t Group)>(
        &'t self,
        root: CommandId,
        path: &ActivePath,
        mut f: F,
    ) {
        let mut current = Some(root);
        while let Some(id) = current {
            let command = self.command(id);
            command.group().each_group(&mut |group| f(command, group));
            current = path.active(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BinderConfig;
    use crate::field::Aggregate;
    use crate::value::Slot;

    fn tree() -> CommandTree {
        let a: Slot<bool> = Slot::default();
        let b: Slot<bool> = Slot::default();
        let file: Slot<String> = Slot::default();
        let data = Aggregate::new()
            .nested(
                "Build",
                r#"command:"build""#,
                Aggregate::new()
                    .nested(
                        "Opts",
                        r#"group:"Build Options""#,
                        Aggregate::new().value("A", r#"short:"a""#, &a),
                    )
                    .nested(
                        "Args",
                        r#"positional-args:"1""#,
                        Aggregate::new().value("File", "", &file),
                    ),
            )
            .nested(
                "Test",
                r#"command:"test""#,
                Aggregate::new().nested(
                    "Opts",
                    r#"group:"Test Options""#,
                    Aggregate::new().value("B", r#"short:"b""#, &b),
                ),
            );
        CommandTree::build("cargo", "", "", &data, BinderConfig::default()).unwrap()
    }

    #[test]
    fn test_activate_rejects_non_children() {
        let tree = tree();
        let build = tree.find_child(tree.root(), "build").unwrap();
        let test = tree.find_child(tree.root(), "test").unwrap();

        let mut path = ActivePath::new(tree.root());
        assert!(path.activate(&tree, build));
        assert!(!path.activate(&tree, test));
        assert_eq!(path.ids(), [tree.root(), build]);
        assert_eq!(path.current(), build);
        assert_eq!(path.active(build), None);
    }

    #[test]
    fn test_each_active_group_follows_only_active_branch() {
        let tree = tree();
        let mut state = ParseState::new(&tree);
        state.enter("build").unwrap();

        let mut titles = Vec::new();
        state.each_active_group(|command, group| {
            titles.push(format!("{}:{}", command.name, group.short_description));
        });
        assert_eq!(titles, vec!["cargo:", "build:", "build:Build Options"]);
    }

    #[test]
    fn test_positional_copy_is_independent() {
        let tree = tree();
        let mut state = ParseState::new(&tree);
        assert!(state.positional.is_empty());

        let build = state.enter("build").unwrap();
        assert_eq!(state.positional.len(), 1);
        state.positional.remove(0);
        assert_eq!(tree.command(build).args().len(), 1);
    }

    #[test]
    fn test_fresh_state_per_run() {
        let tree = tree();
        let mut first = ParseState::new(&tree);
        first.enter("test").unwrap();

        let second = ParseState::new(&tree);
        assert_eq!(second.command, tree.root());
        assert_eq!(second.active.ids(), [tree.root()]);
        assert_eq!(second.lookup.command_names(), ["build", "test"]);
    }
}
