use std::path::{Path, PathBuf};
use std::rc::Rc;

use clap::{ArgAction, Args, Parser, Subcommand};
use command_binder_core::{
    BinderConfig, CallbackFn, CliOption, CommandId, CommandTree, Group, ParseState,
};
use command_binder_desc::{Description, load_config};
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;

/// Output format for `outline`.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "cmdbind")]
#[command(about = "Inspect command trees built from declarative field descriptions")]
struct Cli {
    /// Binder configuration file (YAML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log to stderr (-v debug, -vv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the command tree, children sorted by name.
    Tree(TreeArgs),
    /// Print the lookup tables visible from a command path.
    Lookup(LookupArgs),
    /// Resolve a dotted group path and print its options.
    Group(GroupArgs),
    /// Export the tree as JSON or YAML.
    Outline(OutlineArgs),
}

#[derive(Debug, Args)]
struct TreeArgs {
    /// Description file (.json, .yaml or .yml).
    description: PathBuf,
}

#[derive(Debug, Args)]
struct LookupArgs {
    /// Description file (.json, .yaml or .yml).
    description: PathBuf,
    /// Command names or aliases to descend into, starting at the root.
    path: Vec<String>,
}

#[derive(Debug, Args)]
struct GroupArgs {
    /// Description file (.json, .yaml or .yml).
    description: PathBuf,
    /// Dotted group path, e.g. `remote.add.Fetch Options`.
    name: String,
}

#[derive(Debug, Args)]
struct OutlineArgs {
    /// Description file (.json, .yaml or .yml).
    description: PathBuf,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Include the synthesized `-h, --help` group in every command.
    #[arg(long)]
    help_groups: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match load_binder_config(cli.config.as_deref()) {
        Ok(config) => match cli.command {
            Command::Tree(args) => run_tree(args, config),
            Command::Lookup(args) => run_lookup(args, config),
            Command::Group(args) => run_group(args, config),
            Command::Outline(args) => run_outline(args, config),
        },
        Err(err) => Err(err),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => return,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn load_binder_config(path: Option<&Path>) -> Result<BinderConfig, String> {
    match path {
        None => Ok(BinderConfig::default()),
        Some(path) => load_config(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display())),
    }
}

fn build_tree(path: &Path, config: BinderConfig) -> Result<CommandTree, String> {
    let description = Description::load(path)
        .map_err(|err| format!("Failed to load '{}': {err}", path.display()))?;
    let tree = description
        .build_tree(config)
        .map_err(|err| format!("Failed to build '{}': {err}", path.display()))?;
    debug!(commands = tree.len(), "Tree ready");
    Ok(tree)
}

fn run_tree(args: TreeArgs, config: BinderConfig) -> Result<(), String> {
    let tree = build_tree(&args.description, config)?;
    print_command(&tree, tree.root(), 0);
    Ok(())
}

fn print_command(tree: &CommandTree, id: CommandId, depth: usize) {
    let command = tree.command(id);
    let mut line = format!("{}{}", "  ".repeat(depth), command.name);
    if !command.aliases.is_empty() {
        line.push_str(&format!(" ({})", command.aliases.join(", ")));
    }
    if !command.short_description().is_empty() {
        line.push_str(&format!(" - {}", command.short_description()));
    }
    if !tree.has_cli_options(id) && command.args().is_empty() {
        line.push_str(" [no options]");
    }
    println!("{line}");

    for child in tree.sorted_commands(id) {
        print_command(tree, child.id(), depth + 1);
    }
}

fn run_lookup(args: LookupArgs, config: BinderConfig) -> Result<(), String> {
    let tree = build_tree(&args.description, config)?;
    let mut state = ParseState::new(&tree);
    for token in &args.path {
        if state.enter(token).is_none() {
            return Err(format!(
                "Unknown command '{token}' under '{}'",
                tree.path(state.command).join(" ")
            ));
        }
    }

    println!("command: {}", tree.path(state.command).join(" "));

    let mut shorts: Vec<_> = state.lookup.short_names.iter().collect();
    shorts.sort_by_key(|(short, _)| **short);
    println!("short:");
    for (short, option) in shorts {
        println!("  -{short}  {}", option.field);
    }

    let mut longs: Vec<_> = state.lookup.long_names.iter().collect();
    longs.sort_by(|a, b| a.0.cmp(b.0));
    println!("long:");
    for (long, option) in longs {
        println!("  --{long}  {}", option.field);
    }

    println!("commands:");
    for name in state.lookup.command_names() {
        if let Some(id) = state.lookup.command(name) {
            println!("  {name}  -> {}", tree.command(id).name);
        }
    }

    if !state.positional.is_empty() {
        println!("positional:");
        for arg in &state.positional {
            println!("  {}", arg.name);
        }
    }
    Ok(())
}

fn run_group(args: GroupArgs, config: BinderConfig) -> Result<(), String> {
    let tree = build_tree(&args.description, config)?;
    let group = tree
        .group_by_name(tree.root(), &args.name)
        .ok_or_else(|| format!("No group named '{}'", args.name))?;
    print_group(group, 0);
    Ok(())
}

fn print_group(group: &Group, depth: usize) {
    let indent = "  ".repeat(depth);
    let title = if group.short_description.is_empty() {
        "(untitled)"
    } else {
        group.short_description.as_str()
    };
    println!("{indent}{title}");
    for option in group.options() {
        println!("{indent}  {}", option_label(option));
    }
    for nested in group.groups() {
        print_group(nested, depth + 1);
    }
}

fn option_label(option: &CliOption) -> String {
    let mut names = Vec::new();
    if let Some(short) = option.short {
        names.push(format!("-{short}"));
    }
    if let Some(long) = option.long_name_with_namespace() {
        names.push(format!("--{long}"));
    }
    if names.is_empty() {
        if let Some(ini) = &option.ini_name {
            names.push(format!("[{ini}]"));
        }
    }

    let mut label = names.join(", ");
    if option.takes_value() {
        label.push_str(&format!(" <{}>", option.value_name.as_deref().unwrap_or("value")));
    }
    if let Some(description) = &option.description {
        label.push_str(&format!("  {description}"));
    }
    label
}

fn run_outline(args: OutlineArgs, config: BinderConfig) -> Result<(), String> {
    let mut tree = build_tree(&args.description, config)?;
    if args.help_groups {
        let noop: CallbackFn = Rc::new(|| Ok(()));
        tree.add_help_groups(tree.root(), &noop);
    }

    let outline = tree.outline(tree.root());
    let raw = match args.format {
        CliOutputFormat::Json => serde_json::to_string_pretty(&outline)
            .map_err(|err| format!("Failed to serialize outline: {err}"))?,
        CliOutputFormat::Yaml => serde_yaml::to_string(&outline)
            .map_err(|err| format!("Failed to serialize outline: {err}"))?,
    };
    println!("{}", raw.trim_end());
    Ok(())
}
