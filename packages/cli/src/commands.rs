use std::path::PathBuf;

use anyhow::Context;
use serde_json::Value as JsonValue;
use tagfs_typed_store::{
    walk, Hint, ListStore, PutMode, ScriptStore, StoreRoots, TypedLocalStore, WalkOptions,
};

use crate::cli::*;

const HOME_ENV: &str = "TAGFS_HOME";

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let roots = StoreRoots::new(base_dir(cli.root));
    match cli.command {
        Command::Get(args) => cmd_get(&roots, args),
        Command::Put(args) => cmd_put(&roots, args),
        Command::Delete(args) => cmd_delete(&roots, args),
        Command::Keys => cmd_keys(&roots),
        Command::Walk(args) => cmd_walk(args),
        Command::List(command) => cmd_list(&roots, command),
        Command::Script(command) => cmd_script(&roots, command),
    }
}

fn base_dir(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var_os(HOME_ENV).map(PathBuf::from))
        .or_else(|| dirs::data_dir().map(|dir| dir.join("tagfs")))
        .unwrap_or_else(|| PathBuf::from("tagfs"))
}

fn records(roots: &StoreRoots) -> anyhow::Result<TypedLocalStore> {
    roots.ensure().context("preparing storage folders")?;
    Ok(TypedLocalStore::new(roots.store.clone())?)
}

fn print_value(value: &JsonValue) {
    match value {
        JsonValue::String(text) => println!("{}", text),
        other => println!("{}", other),
    }
}

fn cmd_get(roots: &StoreRoots, args: GetArgs) -> anyhow::Result<()> {
    let hint = args.hint.as_deref().map(Hint::parse);
    match records(roots)?.get(&args.key, hint.as_ref())? {
        Some(value) => print_value(&value),
        None => log::info!("{} is not set", args.key),
    }
    Ok(())
}

fn cmd_put(roots: &StoreRoots, args: PutArgs) -> anyhow::Result<()> {
    let value = if args.json {
        serde_json::from_str(&args.value).context("VALUE is not valid JSON")?
    } else {
        JsonValue::String(args.value)
    };
    let mode = PutMode::parse(args.mode.as_deref());
    let written = records(roots)?.put(value, &args.key, mode)?;
    println!("{}", written);
    Ok(())
}

fn cmd_delete(roots: &StoreRoots, args: KeyArgs) -> anyhow::Result<()> {
    println!("{}", records(roots)?.delete(&args.key)?);
    Ok(())
}

fn cmd_keys(roots: &StoreRoots) -> anyhow::Result<()> {
    for key in records(roots)?.all()? {
        println!("{}", key);
    }
    Ok(())
}

fn cmd_walk(args: WalkArgs) -> anyhow::Result<()> {
    let options = WalkOptions::from_limits(args.depth, args.limit);
    for entry in walk(&args.root, &options)? {
        println!("{}\t{}", entry.size, entry.path.display());
    }
    Ok(())
}

fn cmd_list(roots: &StoreRoots, command: ListCommand) -> anyhow::Result<()> {
    roots.ensure().context("preparing storage folders")?;
    let lists = ListStore::new(roots.lists.clone())?;
    match command {
        ListCommand::Get { name } => {
            if let Some(text) = lists.get(&name) {
                print!("{}", text);
            }
        }
        ListCommand::Put { name, content } => {
            println!("{}", lists.put(&name, &JsonValue::String(content)));
        }
    }
    Ok(())
}

fn cmd_script(roots: &StoreRoots, command: ScriptCommand) -> anyhow::Result<()> {
    roots.ensure().context("preparing storage folders")?;
    let scripts = ScriptStore::new(roots.scripts.clone())?;
    match command {
        ScriptCommand::Ls => {
            for name in scripts.list()? {
                println!("{}", name);
            }
        }
        ScriptCommand::Get { name } => {
            if let Some(text) = scripts.get(&name) {
                print!("{}", text);
            }
        }
        ScriptCommand::Put { name, content } => {
            println!("{}", scripts.put(&name, &JsonValue::String(content)));
        }
        ScriptCommand::Rm { name } => println!("{}", scripts.delete(&name)),
    }
    Ok(())
}
