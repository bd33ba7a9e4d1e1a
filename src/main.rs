use std::fs;
use std::process;

use clap::{Parser, Subcommand};
use envbind::{key, Binder, Kind, Shape};
use tracing_subscriber::EnvFilter;

/// Inspect and load environment-bound config shapes.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the environment key and kind of every leaf in a JSON shape file
    Keys {
        /// Path to the shape file
        shape: String,
    },
    /// Derive the key path for a chain of field names, outermost first
    Key {
        /// Field names, e.g. `GracefulShutdown Seconds`
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Bind the process environment into a JSON shape and print the result
    Load {
        /// Path to the shape file
        shape: String,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() {
    // Log to stderr, filtered by RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI arguments.
    let args = Args::parse();

    // Run the command; any failure exits non-zero.
    if let Err(e) = run(args.command) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<(), String> {
    match command {
        Command::Keys { shape } => {
            // One line per leaf: env key, then kind.
            let shape = read_shape(&shape)?;
            for leaf in envbind::key_paths(&shape) {
                println!("{}\t{}", leaf.env_key(), leaf.kind);
            }
        }
        Command::Key { names } => {
            // Each name is snake-cased before joining.
            let path = key::join_all(names.iter().map(|n| envbind::normalize_key(n)));
            println!("{path}\t{}", key::env_key(&path));
        }
        Command::Load { shape, pretty } => {
            // The file holds the root record's fields.
            let root = Kind::Record(read_shape(&shape)?);
            let value = Binder::default()
                .load_value(&root)
                .map_err(|e| e.to_string())?;
            // Output result.
            let out = if pretty {
                serde_json::to_string_pretty(&value)
            } else {
                serde_json::to_string(&value)
            }
            .map_err(|e| e.to_string())?;
            println!("{out}");
        }
    }
    Ok(())
}

fn read_shape(path: &str) -> Result<Shape, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?;
    serde_json::from_str(&text).map_err(|e| format!("{path}: invalid shape: {e}"))
}

