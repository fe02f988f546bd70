//! Declarative field descriptions.
//!
//! An [`Aggregate`] is the scanner's view of a user configuration type: an
//! ordered list of fields, each with a declared name, a raw metadata tag and
//! either a binding (leaf value) or nested fields. Implement [`Annotated`]
//! on a configuration type to describe it once and hand it to
//! [`CommandTree::build`](crate::CommandTree::build).
//!
//! # Examples
//!
//! ```
//! use command_binder_core::{Aggregate, Annotated, Slot};
//!
//! #[derive(Default)]
//! struct AddArgs {
//!     force: Slot<bool>,
//!     path: Slot<String>,
//! }
//!
//! impl Annotated for AddArgs {
//!     fn describe(&self) -> Aggregate {
//!         Aggregate::new()
//!             .value("Force", r#"short:"f" long:"force""#, &self.force)
//!             .nested(
//!                 "Args",
//!                 r#"positional-args:"yes" required:"yes""#,
//!                 Aggregate::new().value("Path", "", &self.path),
//!             )
//!     }
//! }
//!
//! let add = AddArgs::default();
//! assert_eq!(add.describe().len(), 2);
//! ```

use crate::value::{ArgValue, Binding, Slot};

/// What a field holds.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// A single bindable value.
    Value(Binding),
    /// Nested fields: a subcommand, a group, a positional block or a
    /// flattened struct, depending on the tag.
    Struct(Aggregate),
}

/// One declared field.
#[derive(Debug, Clone)]
pub struct Field {
    /// Declared field name; used for positional argument names and errors.
    pub name: String,
    /// Raw metadata tag text.
    pub tag: String,
    /// Field contents.
    pub kind: FieldKind,
}

impl Field {
    /// Creates a leaf field bound to `binding`.
    pub fn value(name: impl Into<String>, tag: impl Into<String>, binding: Binding) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
            kind: FieldKind::Value(binding),
        }
    }

    /// Creates a field holding nested fields.
    pub fn nested(name: impl Into<String>, tag: impl Into<String>, fields: Aggregate) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
            kind: FieldKind::Struct(fields),
        }
    }
}

/// Ordered list of fields describing one configuration type.
#[derive(Debug, Clone, Default)]
pub struct Aggregate {
    fields: Vec<Field>,
}

impl Aggregate {
    /// Creates an empty aggregate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a leaf field bound to `slot`.
    pub fn value<T: ArgValue + 'static>(
        self,
        name: impl Into<String>,
        tag: impl Into<String>,
        slot: &Slot<T>,
    ) -> Self {
        self.field(Field::value(name, tag, slot.binding()))
    }

    /// Appends a field holding nested fields.
    pub fn nested(
        self,
        name: impl Into<String>,
        tag: impl Into<String>,
        fields: Aggregate,
    ) -> Self {
        self.field(Field::nested(name, tag, fields))
    }

    /// Appends an already-built field.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends a field in place.
    pub fn push(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Number of top-level fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if there are no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Borrows the fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub(crate) fn into_fields(self) -> Vec<Field> {
        self.fields
    }
}

impl FromIterator<Field> for Aggregate {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Configuration types that can describe their fields to the scanner.
pub trait Annotated {
    /// Describes this value's fields, binding leaves to the value's slots.
    fn describe(&self) -> Aggregate;
}

impl Annotated for Aggregate {
    fn describe(&self) -> Aggregate {
        self.clone()
    }
}
