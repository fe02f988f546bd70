//! File formats for command-binder.
//!
//! - [`Description`] loads a declarative field description from JSON or
//!   YAML and builds its [`CommandTree`](command_binder_core::CommandTree).
//! - [`load_config`] / [`save_config`] read and write the
//!   [`BinderConfig`](command_binder_core::BinderConfig) YAML file.

pub mod config;
pub mod description;
pub mod error;

pub use config::{load_config, save_config};
pub use description::{Description, FieldSpec, ValueType};
pub use error::{DescError, Result};
