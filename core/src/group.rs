//! Option groups.
//!
//! A group owns a flat list of options and a list of nested groups. Every
//! command owns one root group; `group:"Name"` fields add nested groups
//! beneath it. Groups form a strict tree: they are built once during a
//! forward scan and never shared.

use crate::option::CliOption;

/// Short description given to the synthesized help group.
pub const HELP_GROUP_NAME: &str = "Help Options";

/// A named or anonymous collection of options and nested groups.
#[derive(Debug, Clone, Default)]
pub struct Group {
    /// Group title (the `group` tag value); for a command's root group, the
    /// command's short description.
    pub short_description: String,
    /// Extended description.
    pub long_description: Option<String>,
    /// Namespace prepended to the long names of options below this group.
    pub namespace: Option<String>,
    /// Whether help output should omit the group.
    pub hidden: bool,
    options: Vec<CliOption>,
    groups: Vec<Group>,
    builtin_help: bool,
}

impl Group {
    /// Creates an empty group.
    pub fn new(short_description: impl Into<String>, long_description: Option<String>) -> Self {
        Self {
            short_description: short_description.into(),
            long_description,
            ..Default::default()
        }
    }

    /// Options owned directly by this group.
    pub fn options(&self) -> &[CliOption] {
        &self.options
    }

    /// Groups nested directly under this group.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Whether this is the synthesized help group.
    pub fn is_builtin_help(&self) -> bool {
        self.builtin_help
    }

    pub(crate) fn add_option(&mut self, option: CliOption) {
        self.options.push(option);
    }

    pub(crate) fn add_group(&mut self, group: Group) {
        self.groups.push(group);
    }

    pub(crate) fn mark_builtin_help(&mut self) {
        self.builtin_help = true;
    }

    /// Visits this group, then every nested group depth-first.
    pub fn each_group<'a, F: FnMut(&'a Group)>(&'a self, f: &mut F) {
        f(self);
        for group in &self.groups {
            group.each_group(f);
        }
    }

    /// Every option in this group and its nested groups, in scan order.
    pub fn all_options(&self) -> Vec<&CliOption> {
        let mut options = Vec::new();
        self.each_group(&mut |group| options.extend(group.options.iter()));
        options
    }

    /// Finds a nested group (not this one) by title, case-insensitively.
    ///
    /// When several nested groups share a title, the last one in scan order
    /// wins.
    pub fn find(&self, title: &str) -> Option<&Group> {
        let wanted = title.to_lowercase();
        let mut found = None;
        for group in &self.groups {
            group.each_group(&mut |g| {
                if g.short_description.to_lowercase() == wanted {
                    found = Some(g);
                }
            });
        }
        found
    }

    /// Resolves a group name relative to this group: the empty name is the
    /// group itself, anything else goes through [`find`](Self::find).
    ///
    /// # Examples
    ///
    /// ```
    /// use command_binder_core::{Aggregate, BinderConfig, CommandTree, Slot};
    ///
    /// let level: Slot<String> = Slot::default();
    /// let data = Aggregate::new().nested(
    ///     "Logging",
    ///     r#"group:"Logging Options" namespace:"log""#,
    ///     Aggregate::new().value("Level", r#"long:"level""#, &level),
    /// );
    /// let tree = CommandTree::build("app", "", "", &data, BinderConfig::default()).unwrap();
    /// let root = tree.root_command().group();
    ///
    /// assert!(std::ptr::eq(root.group_by_name("").unwrap(), root));
    /// let logging = root.group_by_name("logging options").unwrap();
    /// assert_eq!(logging.namespace.as_deref(), Some("log"));
    /// ```
    pub fn group_by_name(&self, name: &str) -> Option<&Group> {
        if name.is_empty() {
            return Some(self);
        }
        self.find(name)
    }
}
