//! Binder configuration files.
//!
//! # Example YAML
//!
//! ```yaml
//! namespace_delimiter: "."
//! collisions: reject
//! ```
//!
//! Missing keys fall back to [`BinderConfig::default`].

use std::io::{BufReader, BufWriter};
use std::path::Path;

use command_binder_core::BinderConfig;
use tracing::debug;

use crate::error::Result;

/// Loads a [`BinderConfig`] from a YAML file.
///
/// # Errors
///
/// Returns [`Io`](crate::DescError::Io) if the file cannot be read, or
/// [`Yaml`](crate::DescError::Yaml) if parsing fails.
///
/// # Examples
///
/// ```no_run
/// let config = command_binder_desc::load_config("binder.yaml").unwrap();
/// println!("delimiter: {}", config.namespace_delimiter);
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<BinderConfig> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let reader = BufReader::new(file);
    let config: BinderConfig = serde_yaml::from_reader(reader)?;
    debug!(path = %path.display(), collisions = ?config.collisions, "Loaded binder config");
    Ok(config)
}

/// Saves a [`BinderConfig`] as YAML.
///
/// # Errors
///
/// Returns [`Io`](crate::DescError::Io) if the file cannot be written, or
/// [`Yaml`](crate::DescError::Yaml) if serialization fails.
pub fn save_config(config: &BinderConfig, path: impl AsRef<Path>) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let writer = BufWriter::new(file);
    serde_yaml::to_writer(writer, config)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use command_binder_core::CollisionPolicy;

    use super::*;

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binder.yaml");
        let config = BinderConfig {
            namespace_delimiter: "-".to_string(),
            collisions: CollisionPolicy::Reject,
        };

        save_config(&config, &path).unwrap();
        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binder.yaml");
        std::fs::write(&path, "collisions: reject\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.namespace_delimiter, ".");
        assert_eq!(config.collisions, CollisionPolicy::Reject);
    }

    #[test]
    fn test_missing_config_is_io_error() {
        let err = load_config("/nonexistent/binder.yaml").unwrap_err();
        assert!(matches!(err, crate::DescError::Io(_)));
    }
}
