use std::fs;
use std::path::{Path, PathBuf};

use command_binder_core::{BinderConfig, CollisionPolicy};
use command_binder_desc::{load_config, save_config, DescError, Description};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const GIT_YAML: &str = r#"
name: git
description: The stupid content tracker
fields:
  - name: Verbose
    tag: 'short:"v" long:"verbose"'
    type: bool
  - name: Remote
    tag: 'command:"remote" subcommands-optional:"1"'
    fields:
      - name: Add
        tag: 'command:"add" alias:"a"'
        fields:
          - name: Fetch
            tag: 'short:"f" long:"fetch"'
            type: bool
          - name: Args
            tag: 'positional-args:"yes" required:"yes"'
            fields:
              - name: Name
                type: string
              - name: Url
                tag: 'positional-arg-name:"url"'
                type: string
"#;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[test]
fn test_load_yaml_and_build_tree() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "git.yaml", GIT_YAML);

    let description = Description::load(&path).unwrap();
    let tree = description.build_tree(BinderConfig::default()).unwrap();

    let remote = tree.find_child(tree.root(), "remote").unwrap();
    let add = tree.find_child(remote, "a").unwrap();
    assert!(tree.command(remote).subcommands_optional);
    assert!(tree.command(add).args_required);

    let args: Vec<_> = tree.command(add).args().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(args, ["Name", "url"]);

    let lookup = tree.make_lookup(add);
    assert!(lookup.long("verbose").is_some());
    assert!(lookup.long("fetch").is_some());
}

#[test]
fn test_json_and_yaml_agree() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = Description::from_yaml_str(GIT_YAML).unwrap();
    let json = serde_json::to_string_pretty(&yaml).unwrap();
    let json_path = write(dir.path(), "git.json", &json);
    assert_eq!(Description::load(&json_path).unwrap(), yaml);

    let yml_path = write(dir.path(), "git.YML", GIT_YAML);
    assert_eq!(Description::load(&yml_path).unwrap(), yaml);
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "git.toml", "name = 'git'");
    let err = Description::load(&path).unwrap_err();
    assert!(matches!(err, DescError::InvalidDescription(_)));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Description::load(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, DescError::Io(_)));
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn test_strict_config_rejects_duplicate_aliases() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("binder.yaml");
    save_config(&BinderConfig::strict(), &config_path).unwrap();
    let config = load_config(&config_path).unwrap();
    assert_eq!(config.collisions, CollisionPolicy::Reject);

    let description = Description::from_yaml_str(
        r#"
name: app
fields:
  - name: List
    tag: 'command:"list" alias:"ls"'
    fields: []
  - name: Show
    tag: 'command:"show" alias:"ls"'
    fields: []
"#,
    )
    .unwrap();

    assert!(description.build_tree(BinderConfig::default()).is_ok());
    let err = description.build_tree(config).unwrap_err();
    assert!(err.to_string().contains("duplicate command name `ls`"));
}
