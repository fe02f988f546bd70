//! Declarative binding engine for command-line interfaces.
//!
//! This crate turns an annotated description of a program's configuration
//! into a tree of commands, option groups and positional arguments, and
//! builds the per-scope name tables a tokenizer needs to map raw arguments
//! back onto the bound fields:
//!
//! - [`Aggregate`] / [`Annotated`] describe configuration types: an ordered
//!   list of fields, each with a metadata tag ([`MultiTag`]) and either a
//!   [`Binding`] or nested fields.
//! - [`CommandTree::build`] scans the description into an arena of
//!   [`Command`]s, each owning a root [`Group`] of [`CliOption`]s.
//! - [`CommandTree::make_lookup`] merges option visibility across ancestor
//!   scopes into a [`Lookup`].
//! - [`ParseState`] carries the per-run resolution state, including the
//!   [`ActivePath`] of selected commands.
//!
//! Tree-wide utilities ([`CommandTree::sorted_commands`],
//! [`CommandTree::group_by_name`], [`CommandTree::add_help_groups`],
//! [`CommandTree::outline`]) support usage and help rendering.
//!
//! # Example
//!
//! ```
//! use command_binder_core::*;
//!
//! let verbose: Slot<bool> = Slot::default();
//! let target: Slot<String> = Slot::default();
//!
//! let data = Aggregate::new()
//!     .value("Verbose", r#"short:"v" long:"verbose" description:"Chatty output""#, &verbose)
//!     .nested(
//!         "Deploy",
//!         r#"command:"deploy" alias:"d""#,
//!         Aggregate::new().nested(
//!             "Args",
//!             r#"positional-args:"yes" required:"yes""#,
//!             Aggregate::new().value("Target", "", &target),
//!         ),
//!     );
//!
//! let tree =
//!     CommandTree::build("ship", "Ship things", "", &data, BinderConfig::default()).unwrap();
//! let mut state = ParseState::new(&tree);
//!
//! state.lookup.short('v').unwrap().binding().set(None).unwrap();
//! let deploy = state.enter("d").unwrap();
//! assert!(tree.command(deploy).args_required);
//! state.positional.remove(0).binding().set(Some("prod")).unwrap();
//!
//! assert!(verbose.get());
//! assert_eq!(target.get(), "prod");
//! ```

mod command;
mod config;
mod error;
mod field;
mod group;
mod lookup;
mod option;
mod outline;
mod scan;
mod state;
mod tag;
mod tree;
mod utils;
mod value;

pub use command::{Arg, Command, CommandId};
pub use config::{BinderConfig, CollisionPolicy};
pub use error::{BindError, Result};
pub use field::{Aggregate, Annotated, Field, FieldKind};
pub use group::{Group, HELP_GROUP_NAME};
pub use lookup::Lookup;
pub use option::CliOption;
pub use outline::{ArgOutline, CommandOutline, GroupOutline, OptionOutline};
pub use state::{ActivePath, ParseState};
pub use tag::{MultiTag, TagError};
pub use tree::CommandTree;
pub use value::{ArgValue, Bind, Binding, Callback, CallbackFn, Slot, ValueError};
