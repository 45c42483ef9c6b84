//! dirlaunch - launch programs by walking a directory tree.
//!
//! Usage:
//!   dirlaunch [PATH]                 Launch interactive TUI
//!   dirlaunch list [PATH]            Print every entry with its command
//!   dirlaunch exec ENTRY [--root P]  Run the command for one entry
//!   dirlaunch --help                 Show help

mod logging;

use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{bail, Context, Result};

use dirlaunch_core::{compile, ScanConfig, DEFAULT_ROOT};
use dirlaunch_scan::CommandScanner;
use dirlaunch_tui::{LaunchOutcome, Launcher, SystemHost, TuiConfig};

#[derive(Parser)]
#[command(
    name = "dirlaunch",
    version,
    about = "Launch programs by walking a directory tree",
    long_about = "dirlaunch turns a directory tree into a menu of commands.\n\n\
                  The directories between the root and an entry name the program \
                  and its flags: `foo.bar/baz.qux/file` runs \
                  `foo --bar --baz qux <root>/foo.bar/baz.qux/file`. \
                  Hold `s` and `x` together to exit the interactive view."
)]
struct Cli {
    /// Root directory to browse
    #[arg(default_value = DEFAULT_ROOT)]
    path: PathBuf,

    #[command(flatten)]
    scan: ScanArgs,

    /// Seconds both hold keys must stay down to exit
    #[arg(long, default_value_t = dirlaunch_tui::app::EXIT_HOLD_SECS)]
    hold_secs: u64,

    /// Write logs to this file (the interactive view logs nothing otherwise)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Args, Clone)]
struct ScanArgs {
    /// Skip hidden entries (names starting with `.`)
    #[arg(long, global = true)]
    no_hidden: bool,

    /// Follow symbolic links
    #[arg(long, global = true)]
    follow_symlinks: bool,

    /// Maximum depth below the root
    #[arg(long, global = true, value_name = "N")]
    max_depth: Option<u32>,

    /// Skip entries by name: exact, `prefix*` or `*suffix` (repeatable)
    #[arg(long = "ignore", global = true, value_name = "PATTERN")]
    ignore: Vec<String>,
}

impl ScanArgs {
    fn config(&self, root: PathBuf) -> Result<ScanConfig> {
        ScanConfig::builder()
            .root(root)
            .include_hidden(!self.no_hidden)
            .follow_symlinks(self.follow_symlinks)
            .max_depth(self.max_depth)
            .ignore_patterns(self.ignore.clone())
            .build()
            .context("Invalid scan configuration")
    }
}

#[derive(Subcommand)]
enum Command {
    /// Print every entry with the command it launches
    List {
        /// Root directory to scan
        #[arg(default_value = DEFAULT_ROOT)]
        path: PathBuf,
    },

    /// Run the command for one entry
    Exec {
        /// Entry path relative to the root, e.g. `foo.bar/target.txt`
        entry: PathBuf,

        /// Root directory the entry lives under
        #[arg(long, default_value = DEFAULT_ROOT)]
        root: PathBuf,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    match cli.command {
        Some(Command::List { ref path }) => {
            logging::init_stderr();
            run_list(cli.scan.config(path.clone())?)?;
        }
        Some(Command::Exec {
            ref entry,
            ref root,
        }) => {
            logging::init_stderr();
            run_exec(root, entry)?;
        }
        None => {
            if let Some(log_file) = &cli.log_file {
                logging::init_file(log_file)?;
            }
            let config = TuiConfig::new(cli.scan.config(cli.path.clone())?)
                .with_exit_hold(Duration::from_secs(cli.hold_secs));
            dirlaunch_tui::run_with_config(config)?;
        }
    }

    Ok(())
}

/// Scan the root and print the tree with each entry's command.
fn run_list(config: ScanConfig) -> Result<()> {
    eprintln!("Scanning {}...", config.root.display());

    let tree = CommandScanner::new().scan(&config).context("Scan failed")?;

    println!("{}/", tree.root_path.display());
    for (indices, node) in tree.walk() {
        let indent = "  ".repeat(indices.len());
        if node.is_dir() {
            println!("{indent}{}/", node.name);
        } else {
            println!("{indent}{}  $ {}", node.name, node.command);
        }
    }

    eprintln!(
        "{} files, {} directories in {:.2}s",
        tree.stats.total_files,
        tree.stats.total_dirs,
        tree.scan_duration.as_secs_f64()
    );
    for warning in &tree.warnings {
        eprintln!("warning: {}", warning.message);
    }

    Ok(())
}

/// Compile the command for `entry` under `root` and run it.
fn run_exec(root: &Path, entry: &Path) -> Result<()> {
    let mut segments = Vec::new();
    for component in entry.components() {
        match component {
            Component::Normal(name) => segments.push(name.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => bail!("Entry must be a path below the root: {}", entry.display()),
        }
    }
    let target = segments.iter().fold(root.to_path_buf(), |path, s| path.join(s));
    if segments.pop().is_none() {
        bail!("Entry is empty");
    }

    if std::fs::symlink_metadata(&target).is_err() {
        bail!("No such entry: {}", target.display());
    }

    let command = compile(&segments, &target.to_string_lossy());
    eprintln!("$ {command}");

    match Launcher::new(SystemHost).execute(&command)? {
        LaunchOutcome::Completed => {}
        LaunchOutcome::CompletedWithShortFlags(retry) => {
            eprintln!("succeeded with short flags: {retry}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_testpath() {
        let cli = Cli::parse_from(["dirlaunch"]);
        assert_eq!(cli.path, PathBuf::from(DEFAULT_ROOT));
        assert_eq!(cli.hold_secs, 3);
        assert!(cli.command.is_none());
        assert!(cli.scan.config(cli.path.clone()).unwrap().include_hidden);
    }

    #[test]
    fn test_scan_flags_reach_config() {
        let cli = Cli::parse_from([
            "dirlaunch",
            "list",
            "menu",
            "--no-hidden",
            "--max-depth",
            "2",
            "--ignore",
            "target",
            "--ignore",
            "*.bak",
        ]);
        let Some(Command::List { path }) = &cli.command else {
            panic!("expected list");
        };
        let config = cli.scan.config(path.clone()).unwrap();
        assert_eq!(config.root, PathBuf::from("menu"));
        assert!(!config.include_hidden);
        assert_eq!(config.max_depth, Some(2));
        assert_eq!(config.ignore_patterns, ["target", "*.bak"]);
    }

    #[test]
    fn test_exec_rejects_escaping_entry() {
        let err = run_exec(Path::new("testpath"), Path::new("../etc/passwd")).unwrap_err();
        assert!(err.to_string().contains("below the root"));
    }
}
