//! Tree-wide queries used by usage and help rendering.

use crate::command::{Command, CommandId};
use crate::group::Group;
use crate::tree::CommandTree;

impl CommandTree {
    /// Direct children of `id`, sorted by name. Grandchildren are not
    /// visited and the tree is not reordered.
    pub fn sorted_commands(&self, id: CommandId) -> Vec<&Command> {
        let mut commands: Vec<&Command> = self.children(id).collect();
        commands.sort_by(|a, b| a.name.cmp(&b.name));
        commands
    }

    /// Whether any group of `id`, other than the synthesized help group,
    /// holds an option usable from the command line.
    pub fn has_cli_options(&self, id: CommandId) -> bool {
        let mut found = false;
        self.command(id).group().each_group(&mut |group| {
            if !group.is_builtin_help() && group.options().iter().any(|o| o.can_cli()) {
                found = true;
            }
        });
        found
    }

    /// Resolves a dotted path such as `sub1.sub2.Group Name` to a group.
    ///
    /// The whole path is first tried as a group title under `id`. Failing
    /// that, a path starting with `child.` continues inside that child, and a
    /// path equal to a child's name yields the child's root group.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_binder_core::{Aggregate, BinderConfig, CommandTree, Slot};
    ///
    /// let port: Slot<u16> = Slot::default();
    /// let data = Aggregate::new().nested(
    ///     "Serve",
    ///     r#"command:"serve""#,
    ///     Aggregate::new().nested(
    ///         "Net",
    ///         r#"group:"Network""#,
    ///         Aggregate::new().value("Port", r#"long:"port""#, &port),
    ///     ),
    /// );
    /// let tree = CommandTree::build("app", "", "", &data, BinderConfig::default()).unwrap();
    ///
    /// let network = tree.group_by_name(tree.root(), "serve.Network").unwrap();
    /// assert_eq!(network.options()[0].field, "Port");
    /// assert!(tree.group_by_name(tree.root(), "serve").is_some());
    /// assert!(tree.group_by_name(tree.root(), "serve.Storage").is_none());
    /// ```
    pub fn group_by_name(&self, id: CommandId, path: &str) -> Option<&Group> {
        let command = self.command(id);
        if let Some(group) = command.group().group_by_name(path) {
            return Some(group);
        }

        self.children(id).find_map(|child| {
            if path == child.name {
                return Some(child.group());
            }
            let rest = path.strip_prefix(child.name.as_str())?.strip_prefix('.')?;
            self.group_by_name(child.id(), rest)
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::config::BinderConfig;
    use crate::field::Aggregate;
    use crate::tree::CommandTree;
    use crate::value::{CallbackFn, Slot};
    use std::rc::Rc;

    #[test]
    fn test_sorted_commands_leaves_order_untouched() {
        let data = ["zeta", "alpha", "mid"]
            .into_iter()
            .fold(Aggregate::new(), |data, name| {
                data.nested(name, &format!(r#"command:"{name}""#), Aggregate::new())
            });
        let tree = CommandTree::build("app", "", "", &data, BinderConfig::default()).unwrap();

        for _ in 0..2 {
            let sorted: Vec<_> = tree
                .sorted_commands(tree.root())
                .into_iter()
                .map(|c| c.name.as_str())
                .collect();
            assert_eq!(sorted, ["alpha", "mid", "zeta"]);
        }
        let declared: Vec<_> = tree.children(tree.root()).map(|c| c.name.as_str()).collect();
        assert_eq!(declared, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_has_cli_options_ignores_help_and_ini_only() {
        let cache: Slot<String> = Slot::default();
        let data = Aggregate::new().value("Cache", r#"ini-name:"cache""#, &cache);
        let mut tree = CommandTree::build("app", "", "", &data, BinderConfig::default()).unwrap();
        assert!(!tree.has_cli_options(tree.root()));

        let noop: CallbackFn = Rc::new(|| Ok(()));
        tree.add_help_groups(tree.root(), &noop);
        assert!(!tree.has_cli_options(tree.root()));

        let verbose: Slot<bool> = Slot::default();
        let data = Aggregate::new().nested(
            "Output",
            r#"group:"Output""#,
            Aggregate::new().value("Verbose", r#"short:"v""#, &verbose),
        );
        let tree = CommandTree::build("app", "", "", &data, BinderConfig::default()).unwrap();
        assert!(tree.has_cli_options(tree.root()));
    }
}
