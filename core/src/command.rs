//! Command nodes and positional arguments.
//!
//! Commands live in a [`CommandTree`](crate::CommandTree) arena and refer to
//! each other through [`CommandId`]s: a parent owns its children's ids, and
//! every child keeps a non-owning id of its parent for upward walks.

use crate::group::Group;
use crate::tag::MultiTag;
use crate::value::Binding;

/// Stable index of a command inside its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(pub(crate) usize);

impl CommandId {
    /// Position of the command in its tree's arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A value supplied by position rather than by flag name.
///
/// # Examples
///
/// ```
/// use command_binder_core::{Aggregate, BinderConfig, CommandTree, Slot};
///
/// let src: Slot<String> = Slot::default();
/// let dst: Slot<String> = Slot::default();
/// let data = Aggregate::new().nested(
///     "Args",
///     r#"positional-args:"yes""#,
///     Aggregate::new()
///         .value("Source", r#"description:"Copy from""#, &src)
///         .value("Dest", r#"positional-arg-name:"target""#, &dst),
/// );
///
/// let tree = CommandTree::build("cp", "", "", &data, BinderConfig::default()).unwrap();
/// let names: Vec<_> = tree.root_command().args().iter().map(|a| a.name.as_str()).collect();
/// assert_eq!(names, ["Source", "target"]);
/// ```
#[derive(Debug, Clone)]
pub struct Arg {
    /// Name shown in usage: the `positional-arg-name` tag or the field name.
    pub name: String,
    /// Help text from the `description` tag.
    pub description: Option<String>,
    /// Declared name of the bound field.
    pub field: String,
    tag: MultiTag,
    binding: Binding,
}

impl Arg {
    pub(crate) fn new(field: String, tag: MultiTag, binding: Binding) -> Self {
        let name = tag
            .non_empty("positional-arg-name")
            .map_or_else(|| field.clone(), str::to_string);
        Self {
            name,
            description: tag.non_empty("description").map(str::to_string),
            field,
            tag,
            binding,
        }
    }

    /// The argument's own metadata tag.
    pub fn tag(&self) -> &MultiTag {
        &self.tag
    }

    /// Destination the argument writes into.
    pub fn binding(&self) -> &Binding {
        &self.binding
    }
}

/// A named node of the command tree.
///
/// A command is an option group (its root [`Group`]) plus identity, an
/// ordered positional-argument list and links to its parent and children.
#[derive(Debug, Clone)]
pub struct Command {
    /// Registered name.
    pub name: String,
    /// Alternate names resolving to the same command.
    pub aliases: Vec<String>,
    /// Whether every positional argument must be supplied.
    pub args_required: bool,
    /// Whether the command may be used without choosing a subcommand.
    pub subcommands_optional: bool,
    pub(crate) id: CommandId,
    pub(crate) group: Group,
    pub(crate) args: Vec<Arg>,
    pub(crate) parent: Option<CommandId>,
    pub(crate) children: Vec<CommandId>,
    pub(crate) has_builtin_help_group: bool,
}

impl Command {
    pub(crate) fn new(
        id: CommandId,
        name: &str,
        short_description: &str,
        long_description: &str,
    ) -> Self {
        let long_description = (!long_description.is_empty()).then(|| long_description.to_string());
        Self {
            name: name.to_string(),
            aliases: Vec::new(),
            args_required: false,
            subcommands_optional: false,
            id,
            group: Group::new(short_description, long_description),
            args: Vec::new(),
            parent: None,
            children: Vec::new(),
            has_builtin_help_group: false,
        }
    }

    /// This command's id.
    pub fn id(&self) -> CommandId {
        self.id
    }

    /// Root option group of the command.
    pub fn group(&self) -> &Group {
        &self.group
    }

    /// Short description (the root group's title).
    pub fn short_description(&self) -> &str {
        &self.group.short_description
    }

    /// Extended description.
    pub fn long_description(&self) -> Option<&str> {
        self.group.long_description.as_deref()
    }

    /// Positional arguments in declaration order.
    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// Parent command, `None` at the root.
    pub fn parent(&self) -> Option<CommandId> {
        self.parent
    }

    /// Direct children in registration order.
    pub fn child_ids(&self) -> &[CommandId] {
        &self.children
    }

    /// Whether the synthesized help group was injected.
    pub fn has_builtin_help_group(&self) -> bool {
        self.has_builtin_help_group
    }

    /// `true` iff `token` equals the name or one of the aliases exactly.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_binder_core::{Aggregate, BinderConfig, CommandTree};
    ///
    /// let data = Aggregate::new().nested(
    ///     "Remove",
    ///     r#"command:"remove" alias:"rm""#,
    ///     Aggregate::new(),
    /// );
    /// let tree = CommandTree::build("app", "", "", &data, BinderConfig::default()).unwrap();
    /// let remove = tree.children(tree.root()).next().unwrap();
    ///
    /// assert!(remove.matches("remove"));
    /// assert!(remove.matches("rm"));
    /// assert!(!remove.matches("Remove"));
    /// assert!(!remove.matches("rem"));
    /// ```
    pub fn matches(&self, token: &str) -> bool {
        self.name == token || self.aliases.iter().any(|alias| alias == token)
    }

    /// Name and aliases.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}
