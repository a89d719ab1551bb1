//! CLI for gitlabctl.
//!
//! Reports which GitLab projects, found by name fragments, are missing a
//! given branch.

use clap::{Parser, Subcommand};
use gitlabctl::{parse_search_terms, Config, Runner, RunnerError, VerifyReport};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// gitlabctl - Check GitLab projects for required branches.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file.
    #[arg(long, env = "GITLABCTL_CONFIG", default_value = "config.json")]
    config: PathBuf,

    /// Turn on verbose (debug) logging on stderr.
    #[arg(long)]
    verbose: bool,

    /// Accept invalid TLS certificates.
    #[arg(long)]
    insecure: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the projects that are missing a branch.
    Verify {
        /// GitLab projects to verify, comma separated search terms.
        #[arg(long, default_value = "")]
        projects: String,

        /// GitLab branch name.
        #[arg(long)]
        branch: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(args.verbose);

    match run(args).await {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(1)
        }
    }
}

/// Initializes tracing on stderr so stdout only carries the report line.
///
/// `RUST_LOG` takes precedence; otherwise `--verbose` selects `debug` and the
/// default is `warn`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<VerifyReport, RunnerError> {
    let mut config = Config::load(&args.config)?;
    if args.insecure {
        config = config.with_insecure(true);
    }

    match args.command {
        Command::Verify { projects, branch } => {
            let terms = parse_search_terms(&projects);
            debug!(terms = ?terms, branch = %branch, "Verify command executed");

            let runner = Runner::new(config)?;
            runner.verify(&terms, &branch).await
        }
    }
}
