use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;

const DESCRIPTION: &str = r#"
name: git
description: The stupid content tracker
fields:
  - name: Verbose
    tag: 'short:"v" long:"verbose"'
    type: bool
  - name: Remote
    tag: 'command:"remote" description:"Manage remotes"'
    fields:
      - name: Add
        tag: 'command:"add" alias:"a"'
        fields:
          - name: Fetch
            tag: 'group:"Fetch Options" namespace:"fetch"'
            fields:
              - name: Tags
                tag: 'long:"tags" description:"Import tags"'
                type: bool
          - name: Args
            tag: 'positional-args:"yes" required:"yes"'
            fields:
              - name: Name
                type: string
      - name: Prune
        tag: 'command:"prune"'
        fields: []
  - name: Commit
    tag: 'command:"commit" alias:"ci"'
    fields:
      - name: Message
        tag: 'short:"m" long:"message" value-name:"MSG"'
        type: string
"#;

fn write_description(dir: &Path) -> PathBuf {
    let path = dir.join("git.yaml");
    fs::write(&path, DESCRIPTION).expect("failed to write description");
    path
}

fn cmdbind(args: &[&str]) -> Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_cmdbind"))
        .args(args)
        .output()
        .expect("failed to run cmdbind")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ---------------------------------------------------------------------------
// tree
// ---------------------------------------------------------------------------

#[test]
fn tree_lists_sorted_children() {
    let dir = tempfile::tempdir().unwrap();
    let desc = write_description(dir.path());

    let output = cmdbind(&["tree", desc.to_str().unwrap()]);
    assert!(output.status.success());
    let lines: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
    assert_eq!(
        lines,
        [
            "git - The stupid content tracker",
            "  commit (ci)",
            "  remote - Manage remotes [no options]",
            "    add (a)",
            "    prune [no options]",
        ]
    );
}

// ---------------------------------------------------------------------------
// lookup
// ---------------------------------------------------------------------------

#[test]
fn lookup_follows_aliases_and_merges_ancestors() {
    let dir = tempfile::tempdir().unwrap();
    let desc = write_description(dir.path());

    let output = cmdbind(&["lookup", desc.to_str().unwrap(), "remote", "a"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("command: git remote add"));
    assert!(text.contains("  -v  Verbose"));
    assert!(text.contains("  --fetch.tags  Tags"));
    assert!(text.contains("positional:\n  Name"));
    assert!(!text.contains("--message"));
}

#[test]
fn lookup_root_lists_commands_with_aliases() {
    let dir = tempfile::tempdir().unwrap();
    let desc = write_description(dir.path());

    let output = cmdbind(&["lookup", desc.to_str().unwrap()]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("  ci  -> commit"));
    assert!(text.contains("  commit  -> commit"));
    assert!(text.contains("  remote  -> remote"));
    assert!(!text.contains("prune"));
}

#[test]
fn lookup_unknown_command_fails() {
    let dir = tempfile::tempdir().unwrap();
    let desc = write_description(dir.path());

    let output = cmdbind(&["lookup", desc.to_str().unwrap(), "remote", "commit"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown command 'commit' under 'git remote'"));
}

// ---------------------------------------------------------------------------
// group
// ---------------------------------------------------------------------------

#[test]
fn group_resolves_dotted_path() {
    let dir = tempfile::tempdir().unwrap();
    let desc = write_description(dir.path());

    let output = cmdbind(&["group", desc.to_str().unwrap(), "remote.add.fetch options"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "Fetch Options\n  --fetch.tags  Import tags\n"
    );

    let output = cmdbind(&["group", desc.to_str().unwrap(), "remote.missing"]);
    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// outline
// ---------------------------------------------------------------------------

#[test]
fn outline_json_with_help_groups() {
    let dir = tempfile::tempdir().unwrap();
    let desc = write_description(dir.path());

    let output = cmdbind(&["outline", desc.to_str().unwrap(), "--help-groups"]);
    assert!(output.status.success());
    let outline: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();

    assert_eq!(outline["name"], "git");
    assert_eq!(outline["commands"][0]["name"], "commit");
    assert_eq!(outline["commands"][0]["aliases"][0], "ci");
    let help = &outline["groups"][0]["groups"][0];
    assert_eq!(help["title"], "Help Options");
    assert_eq!(help["options"][0]["long"], "help");
}

#[test]
fn outline_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let desc = write_description(dir.path());

    let output = cmdbind(&["outline", desc.to_str().unwrap(), "--format", "yaml"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("name: git\n"));
    assert!(text.contains("value_name: MSG"));
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

#[test]
fn config_changes_namespace_delimiter() {
    let dir = tempfile::tempdir().unwrap();
    let desc = write_description(dir.path());
    let config = dir.path().join("binder.yaml");
    fs::write(&config, "namespace_delimiter: \"-\"\n").unwrap();

    let output = cmdbind(&[
        "--config",
        config.to_str().unwrap(),
        "lookup",
        desc.to_str().unwrap(),
        "remote",
        "add",
    ]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("--fetch-tags"));
}

#[test]
fn strict_config_reports_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    let desc = dir.path().join("dup.json");
    let json = serde_json::json!({
        "name": "app",
        "fields": [
            {"name": "A", "tag": "short:\"x\"", "type": "bool"},
            {"name": "B", "tag": "short:\"x\"", "type": "string"}
        ]
    });
    fs::write(&desc, json.to_string()).unwrap();
    let config = dir.path().join("binder.yaml");
    fs::write(&config, "collisions: reject\n").unwrap();

    let lenient = cmdbind(&["tree", desc.to_str().unwrap()]);
    assert!(lenient.status.success());

    let strict = cmdbind(&["--config", config.to_str().unwrap(), "tree", desc.to_str().unwrap()]);
    assert!(!strict.status.success());
    let stderr = String::from_utf8_lossy(&strict.stderr);
    assert!(stderr.contains("duplicate option `-x`"));
}

#[test]
fn missing_description_fails() {
    let output = cmdbind(&["tree", "/nonexistent/desc.yaml"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("error: Failed to load"));
}
