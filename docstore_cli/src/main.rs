mod client;
mod exec;
mod format;
mod parser;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use docstore_core::Database;
use tracing_subscriber::EnvFilter;

use client::{LocalClient, RemoteClient, TableClient};
use exec::execute;
use parser::parse;

/// Interactive shell for docstore tables
#[derive(Parser, Debug)]
#[command(name = "docstore_cli", version, about = "REPL for a docstore server or database file")]
struct Args {
    /// Base URL of a running docstore_server
    #[arg(long, env = "DOCSTORE_URL", default_value = "http://127.0.0.1:4000")]
    url: String,

    /// Open this database file in process instead of talking to a server.
    /// Takes precedence over --url.
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,
}

fn print_help() {
    println!("Commands:");
    println!("  tables                                   -> list tables");
    println!("  create <table> <field>:<type>[:pk] ...   -> create a table (types: string|number|file)");
    println!("  show <table> [sort <field>] [where <field>=<value>]");
    println!("  insert <table> <json-object>             -> append a row");
    println!("  update <table> <id> <json-object>        -> merge fields into a row");
    println!("  delete <table> <id>                      -> remove a row");
    println!("  drop <table>                             -> remove a table");
    println!("  parse <cmd>                              -> show parsed command (debug)");
    println!("  exit|quit                                -> quit");
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let client: Box<dyn TableClient> = match &args.file {
        Some(path) => {
            let db = Database::open_file(path)
                .with_context(|| format!("cannot open '{}'", path.display()))?;
            println!("docstore_cli using {} (type 'help' or 'exit')", path.display());
            Box::new(LocalClient::new(db))
        }
        None => {
            let client = RemoteClient::new(&args.url)?;
            println!("docstore_cli connected to {} (type 'help' or 'exit')", args.url);
            Box::new(client)
        }
    };

    loop {
        print!("docstore> ");
        io::stdout().flush()?;

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Failed to read input: {e}");
                continue;
            }
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            break;
        }

        if input.eq_ignore_ascii_case("help") {
            print_help();
            continue;
        }

        if let Some(rest) = input.strip_prefix("parse ") {
            match parse(rest) {
                Ok(cmd) => println!("Parsed as: {cmd:?}"),
                Err(e) => eprintln!("Parse error: {e}"),
            }
            continue;
        }

        let cmd = match parse(input) {
            Ok(cmd) => cmd,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match execute(cmd, client.as_ref()) {
            Ok(out) => println!("{out}"),
            Err(err) => println!("Error: {err:#}"),
        }
    }

    Ok(())
}
