use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};
use colored::Colorize;
use driftman::{DriftContext, commands, output};
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "drift",
    version = driftman::VERSION,
    about = "Hash-based change tracking for generated files",
    long_about = "Records SHA-256 baselines for a set of generated files and detects \
                  which of them have been customized since"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress informational messages
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Record baseline hashes (full tree scan when no paths given)
    Baseline {
        /// Paths to record; omit to scan the whole working tree
        paths: Vec<String>,
    },

    /// Detect drift against the baseline (exit code 1 when drift is found)
    Check {
        /// Single path to check; omit to check every tracked file
        path: Option<String>,
    },

    /// List files flagged as modified
    Modified,

    /// Back up files into the backup directory
    Backup {
        /// Files to back up
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Summarize tracked and modified files
    Report {
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    match run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red().bold());
            process::exit(2);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);
    if cli.quiet {
        output::set_verbosity(output::Verbosity::Quiet);
    } else if cli.verbose {
        output::set_verbosity(output::Verbosity::Verbose);
    }

    // Completion needs no context (and must not create a config file)
    let context = match &cli.command {
        Commands::Completion { .. } => None,
        _ => Some(DriftContext::new()?),
    };

    match cli.command {
        Commands::Baseline { paths } => {
            let ctx = context.expect("context initialized above");
            commands::baseline::execute(&ctx, &paths)?;
        }
        Commands::Check { path } => {
            let ctx = context.expect("context initialized above");
            let changed = commands::check::execute(&ctx, path.as_deref())?;
            if changed {
                return Ok(1);
            }
        }
        Commands::Modified => {
            let ctx = context.expect("context initialized above");
            commands::modified::execute(&ctx)?;
        }
        Commands::Backup { paths } => {
            let ctx = context.expect("context initialized above");
            commands::backup::execute(&ctx, &paths)?;
        }
        Commands::Report { json } => {
            let ctx = context.expect("context initialized above");
            commands::report::execute(&ctx, json)?;
        }
        Commands::Completion { shell } => {
            print_completions(shell, &mut Cli::command());
        }
    }

    Ok(0)
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("driftman={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn print_completions<G: Generator>(g: G, cmd: &mut clap::Command) {
    generate(g, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
