mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{add, export, init, lint, AddArgs, ExportArgs, InitArgs, LintArgs};
use tracing_subscriber::EnvFilter;

/// ASPxone CLI - build pages from blocks and export them as Razor/MVC views
#[derive(Parser, Debug)]
#[command(name = "aspxone")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log every applied mutation and ignored reference
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new ASPxone project
    Init(InitArgs),

    /// Add a block to a page file
    Add(AddArgs),

    /// Export page files to documents
    Export(ExportArgs),

    /// Check page files for dropped styles and unknown block types
    Lint(LintArgs),
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so `export --stdout` output stays clean
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| {
            let cwd = cwd.display().to_string();
            match cli.command {
                Command::Init(args) => init(args, &cwd),
                Command::Add(args) => add(args, &cwd),
                Command::Export(args) => export(args, &cwd),
                Command::Lint(args) => lint(args, &cwd),
            }
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
