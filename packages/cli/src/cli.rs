use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tagfs",
    about = "Typed key-value records, lists and scripts kept as plain files",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Base directory holding the Store, Lists and Scripts folders.
    /// Defaults to $TAGFS_HOME, then the platform data directory.
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Read a record
    Get(GetArgs),
    /// Write, merge or (with an empty value) delete a record
    Put(PutArgs),
    /// Delete a record
    Delete(KeyArgs),
    /// List stored keys
    Keys,
    /// List files under a directory, breadth first
    Walk(WalkArgs),
    /// Read or write list files
    #[command(subcommand)]
    List(ListCommand),
    /// Manage script files
    #[command(subcommand)]
    Script(ScriptCommand),
}

#[derive(Args)]
pub struct KeyArgs {
    pub key: String,
}

#[derive(Args)]
pub struct GetArgs {
    pub key: String,
    /// raw, random (r), or a kind: number, boolean, array, object, string
    #[arg(long)]
    pub hint: Option<String>,
}

#[derive(Args)]
pub struct PutArgs {
    pub key: String,
    pub value: String,
    /// a (accumulate), or a kind to coerce to
    #[arg(long)]
    pub mode: Option<String>,
    /// Parse VALUE as JSON instead of taking it as text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct WalkArgs {
    pub root: PathBuf,
    /// Directory levels to scan, -1 for unbounded
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    pub depth: i64,
    /// Files to collect before stopping, -1 for unbounded
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    pub limit: i64,
}

#[derive(Subcommand)]
pub enum ListCommand {
    /// Print a list file
    Get { name: String },
    /// Write a list file
    Put { name: String, content: String },
}

#[derive(Subcommand)]
pub enum ScriptCommand {
    /// List script names
    Ls,
    /// Print a script
    Get { name: String },
    /// Write a script
    Put { name: String, content: String },
    /// Delete a script
    Rm { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn walk_accepts_unbounded_limits() {
        let cli = Cli::parse_from(["tagfs", "walk", "/tmp", "--depth", "-1", "--limit", "3"]);
        let Command::Walk(args) = cli.command else {
            panic!("expected walk");
        };
        assert_eq!(args.depth, -1);
        assert_eq!(args.limit, 3);
    }

    #[test]
    fn put_takes_mode_and_root() {
        let cli = Cli::parse_from([
            "tagfs", "put", "counter", "2", "--json", "--mode", "a", "--root", "/srv/tagfs",
        ]);
        assert_eq!(cli.root, Some(PathBuf::from("/srv/tagfs")));
        let Command::Put(args) = cli.command else {
            panic!("expected put");
        };
        assert!(args.json);
        assert_eq!(args.mode.as_deref(), Some("a"));
    }
}
