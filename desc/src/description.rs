//! Declarative field descriptions.
//!
//! A [`Description`] is the on-disk form of an annotated configuration: the
//! root command's name and descriptions plus a tree of [`FieldSpec`]s. Each
//! spec is either a typed leaf (bound to a fresh [`Slot`]) or a list of
//! nested specs, and carries the same tag text an in-code
//! [`Aggregate`] would.
//!
//! # Example YAML
//!
//! ```yaml
//! name: git
//! description: The stupid content tracker
//! fields:
//!   - name: Verbose
//!     tag: 'short:"v" long:"verbose"'
//!     type: bool
//!   - name: Commit
//!     tag: 'command:"commit" alias:"ci"'
//!     fields:
//!       - name: Message
//!         tag: 'short:"m" long:"message"'
//!         type: string
//! ```

use std::io::BufReader;
use std::path::{Path, PathBuf};

use command_binder_core::{Aggregate, BinderConfig, Binding, CommandTree, Field, Slot};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DescError, Result};

/// Destination type of a leaf field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Switch; set by presence.
    Bool,
    /// Single string value; the last occurrence wins.
    String,
    /// Signed 64-bit integer.
    Int,
    /// 64-bit float.
    Float,
    /// Filesystem path, stored as given.
    Path,
    /// Repeatable string value; every occurrence appends.
    Strings,
}

impl ValueType {
    /// A fresh, unset destination of this type.
    pub fn binding(self) -> Binding {
        match self {
            Self::Bool => Slot::<bool>::default().binding(),
            Self::String => Slot::<String>::default().binding(),
            Self::Int => Slot::<i64>::default().binding(),
            Self::Float => Slot::<f64>::default().binding(),
            Self::Path => Slot::<PathBuf>::default().binding(),
            Self::Strings => Slot::<Vec<String>>::default().binding(),
        }
    }
}

/// One described field: a typed leaf or a list of nested fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Declared field name; must not be empty.
    pub name: String,
    /// Raw metadata tag, in the same syntax as an in-code field's tag.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tag: String,
    /// Leaf type. Exactly one of `value_type` and `fields` is set.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ValueType>,
    /// Nested fields of a struct-like field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldSpec>>,
}

impl FieldSpec {
    fn to_field(&self, parent: &str) -> Result<Field> {
        let path = if parent.is_empty() {
            self.name.clone()
        } else {
            format!("{parent}/{}", self.name)
        };
        if self.name.is_empty() {
            return Err(DescError::InvalidDescription(format!(
                "unnamed field under `{parent}`"
            )));
        }

        match (self.value_type, &self.fields) {
            (Some(value_type), None) => {
                Ok(Field::value(&self.name, &self.tag, value_type.binding()))
            }
            (None, Some(fields)) => {
                let nested = fields
                    .iter()
                    .map(|spec| spec.to_field(&path))
                    .collect::<Result<Aggregate>>()?;
                Ok(Field::nested(&self.name, &self.tag, nested))
            }
            (Some(_), Some(_)) => Err(DescError::InvalidDescription(format!(
                "field `{path}` has both `type` and `fields`"
            ))),
            (None, None) => Err(DescError::InvalidDescription(format!(
                "field `{path}` needs either `type` or `fields`"
            ))),
        }
    }
}

/// A root command and its described fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Description {
    /// Name of the root command.
    pub name: String,
    /// Root command's short description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Root command's extended description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub long_description: String,
    /// Top-level fields, scanned into the root command.
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

impl Description {
    /// Loads a description, picking the format from the file extension
    /// (`.json`, `.yaml` or `.yml`).
    ///
    /// # Errors
    ///
    /// Returns [`Io`](DescError::Io) if the file cannot be read,
    /// [`Json`](DescError::Json) / [`Yaml`](DescError::Yaml) if parsing
    /// fails, or [`InvalidDescription`](DescError::InvalidDescription) for
    /// an unknown extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let reader = || -> Result<BufReader<std::fs::File>> {
            Ok(BufReader::new(std::fs::File::open(path)?))
        };
        let description: Self = match extension.as_deref() {
            Some("json") => serde_json::from_reader(reader()?)?,
            Some("yaml" | "yml") => serde_yaml::from_reader(reader()?)?,
            _ => {
                return Err(DescError::InvalidDescription(format!(
                    "unsupported description format: '{}'",
                    path.display()
                )));
            }
        };
        debug!(
            path = %path.display(),
            command = %description.name,
            fields = description.fields.len(),
            "Loaded description"
        );
        Ok(description)
    }

    /// Parses a YAML description.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Parses a JSON description.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Converts the field specs into an [`Aggregate`], binding every leaf to
    /// a fresh slot of its declared type.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDescription`](DescError::InvalidDescription) for a
    /// field that is unnamed or is not exactly one of leaf or nested.
    pub fn to_aggregate(&self) -> Result<Aggregate> {
        self.fields.iter().map(|spec| spec.to_field("")).collect()
    }

    /// Builds the command tree for this description.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_binder_core::BinderConfig;
    /// use command_binder_desc::Description;
    ///
    /// let description = Description::from_yaml_str(r#"
    /// name: app
    /// fields:
    ///   - name: Serve
    ///     tag: 'command:"serve"'
    ///     fields:
    ///       - name: Port
    ///         tag: 'short:"p" long:"port"'
    ///         type: int
    /// "#).unwrap();
    ///
    /// let tree = description.build_tree(BinderConfig::default()).unwrap();
    /// let serve = tree.find_child(tree.root(), "serve").unwrap();
    /// assert!(tree.make_lookup(serve).short('p').unwrap().takes_value());
    /// ```
    pub fn build_tree(&self, config: BinderConfig) -> Result<CommandTree> {
        if self.name.is_empty() {
            return Err(DescError::InvalidDescription(
                "description has no command name".to_string(),
            ));
        }
        let data = self.to_aggregate()?;
        let tree = CommandTree::build(
            &self.name,
            &self.description,
            &self.long_description,
            &data,
            config,
        )?;
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use command_binder_core::{Bind, BindError, FieldKind};

    use super::*;

    const YAML: &str = r#"
name: tool
description: A tool
fields:
  - name: Verbose
    tag: 'short:"v"'
    type: bool
  - name: Include
    tag: 'short:"I" long:"include"'
    type: strings
  - name: Args
    tag: 'positional-args:"yes"'
    fields:
      - name: Input
        type: path
"#;

    #[test]
    fn test_yaml_to_aggregate() {
        let description = Description::from_yaml_str(YAML).unwrap();
        assert_eq!(description.description, "A tool");
        assert!(description.long_description.is_empty());

        let data = description.to_aggregate().unwrap();
        let kinds: Vec<_> = data
            .fields()
            .iter()
            .map(|f| matches!(f.kind, FieldKind::Struct(_)))
            .collect();
        assert_eq!(kinds, [false, false, true]);
    }

    #[test]
    fn test_value_types_map_to_slots() {
        assert!(!ValueType::Bool.binding().takes_value());
        assert!(ValueType::Path.binding().takes_value());

        let strings = ValueType::Strings.binding();
        strings.set(Some("a")).unwrap();
        strings.set(Some("b")).unwrap();
        assert!(strings.is_set());

        let int = ValueType::Int.binding();
        assert!(int.set(Some("twelve")).is_err());
        assert!(!int.is_set());
    }

    #[test]
    fn test_field_needs_exactly_one_shape() {
        let both = r#"{"name": "x", "fields": [{"name": "F", "type": "bool", "fields": []}]}"#;
        let err = Description::from_json_str(both).unwrap().to_aggregate().unwrap_err();
        assert!(err.to_string().contains("both `type` and `fields`"));

        let neither = r#"{"name": "x", "fields": [{"name": "G", "fields": [{"name": "F"}]}]}"#;
        let err = Description::from_json_str(neither).unwrap().to_aggregate().unwrap_err();
        assert!(err.to_string().contains("`G/F`"));
    }

    #[test]
    fn test_bind_errors_are_wrapped() {
        let json = concat!(
            r#"{"name": "x", "fields": "#,
            r#"[{"name": "F", "tag": "short:\"ab\"", "type": "bool"}]}"#,
        );
        let err = Description::from_json_str(json)
            .unwrap()
            .build_tree(BinderConfig::default())
            .unwrap_err();
        assert!(matches!(err, DescError::Bind(BindError::ShortNameTooLong { .. })));
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let json = r#"{"name": "x", "fields": [{"name": "F", "type": "duration"}]}"#;
        assert!(matches!(Description::from_json_str(json), Err(DescError::Json(_))));
    }
}
