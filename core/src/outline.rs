//! Serializable snapshot of a command tree.
//!
//! The outline carries names, descriptions and flags but no bindings, so it
//! can be written out as JSON or YAML for inspection and diffing.

use serde::{Deserialize, Serialize};

use crate::command::{Arg, Command, CommandId};
use crate::group::Group;
use crate::option::CliOption;
use crate::tree::CommandTree;

/// One command and everything below it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandOutline {
    /// Registered name.
    pub name: String,
    /// Alternate names, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Short description; empty when none was given.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Extended description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    /// Every positional argument must be supplied.
    #[serde(default, skip_serializing_if = "is_false")]
    pub args_required: bool,
    /// The command may run without a subcommand.
    #[serde(default, skip_serializing_if = "is_false")]
    pub subcommands_optional: bool,
    /// Positional arguments in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<ArgOutline>,
    /// The untitled root group, absent when it holds nothing.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GroupOutline>,
    /// Children sorted by name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<CommandOutline>,
}

/// An option group and its nested groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupOutline {
    /// Title; empty for a command's root group.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    /// Prefix joined onto the long names below this group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Omitted from help output.
    #[serde(default, skip_serializing_if = "is_false")]
    pub hidden: bool,
    /// Options owned directly by the group.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionOutline>,
    /// Nested groups in scan order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GroupOutline>,
}

/// A flag-style option without its binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionOutline {
    /// Declared name of the bound field.
    pub field: String,
    /// Single-character name, used as `-x`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,
    /// Namespace-qualified long name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
    /// Key used in configuration files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ini_name: Option<String>,
    /// Help text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Placeholder shown for the value in help.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_name: Option<String>,
    /// Default values, in tag order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub defaults: Vec<String>,
    /// Allowed values; empty means any.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
    /// `false` for switches.
    #[serde(default, skip_serializing_if = "is_false")]
    pub takes_value: bool,
    /// Must be given on the command line.
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    /// Omitted from help output.
    #[serde(default, skip_serializing_if = "is_false")]
    pub hidden: bool,
}

/// A positional argument without its binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgOutline {
    /// Name shown in usage.
    pub name: String,
    /// Declared name of the bound field.
    pub field: String,
    /// Help text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl CommandTree {
    /// Snapshot of `id` and its subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_binder_core::{Aggregate, BinderConfig, CommandTree, Slot};
    ///
    /// let force: Slot<bool> = Slot::default();
    /// let data = Aggregate::new()
    ///     .nested("Push", r#"command:"push""#, Aggregate::new())
    ///     .nested(
    ///         "Add",
    ///         r#"command:"add""#,
    ///         Aggregate::new().value("Force", r#"short:"f""#, &force),
    ///     );
    /// let tree = CommandTree::build("git", "", "", &data, BinderConfig::default()).unwrap();
    ///
    /// let outline = tree.outline(tree.root());
    /// let names: Vec<_> = outline.commands.iter().map(|c| c.name.as_str()).collect();
    /// assert_eq!(names, ["add", "push"]);
    /// assert_eq!(outline.commands[0].groups[0].options[0].short, Some('f'));
    /// ```
    pub fn outline(&self, id: CommandId) -> CommandOutline {
        let command = self.command(id);
        CommandOutline {
            name: command.name.clone(),
            aliases: command.aliases.clone(),
            description: command.short_description().to_string(),
            long_description: command.long_description().map(str::to_string),
            args_required: command.args_required,
            subcommands_optional: command.subcommands_optional,
            args: command.args().iter().map(ArgOutline::from).collect(),
            groups: root_groups(command),
            commands: self
                .sorted_commands(id)
                .into_iter()
                .map(|child| self.outline(child.id()))
                .collect(),
        }
    }
}

/// The root group is listed untitled; its description already belongs to
/// the command. Empty root groups are dropped.
fn root_groups(command: &Command) -> Vec<GroupOutline> {
    let mut root = GroupOutline::from(command.group());
    root.title.clear();
    if root.options.is_empty() && root.groups.is_empty() {
        return Vec::new();
    }
    vec![root]
}

impl From<&Group> for GroupOutline {
    fn from(group: &Group) -> Self {
        Self {
            title: group.short_description.clone(),
            namespace: group.namespace.clone(),
            hidden: group.hidden,
            options: group.options().iter().map(OptionOutline::from).collect(),
            groups: group.groups().iter().map(GroupOutline::from).collect(),
        }
    }
}

impl From<&CliOption> for OptionOutline {
    fn from(option: &CliOption) -> Self {
        Self {
            field: option.field.clone(),
            short: option.short,
            long: option.long_name_with_namespace().map(str::to_string),
            ini_name: option.ini_name.clone(),
            description: option.description.clone(),
            value_name: option.value_name.clone(),
            defaults: option.defaults.clone(),
            choices: option.choices.clone(),
            takes_value: option.takes_value(),
            required: option.required,
            hidden: option.hidden,
        }
    }
}

impl From<&Arg> for ArgOutline {
    fn from(arg: &Arg) -> Self {
        Self {
            name: arg.name.clone(),
            field: arg.field.clone(),
            description: arg.description.clone(),
        }
    }
}
