//! Dynalist mirror CLI entry point.

use clap::Parser;
use dlm::cli::commands;
use dlm::cli::{Cli, Commands};
use dlm::config::resolve_settings_path;
use dlm::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Set up tracing based on verbosity
    init_tracing(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                eprintln!("{}", e.to_structured_json());
            } else if !cli.quiet {
                if let Some(hint) = e.hint() {
                    eprintln!("Error: {e}\n  Hint: {hint}");
                } else {
                    eprintln!("Error: {e}");
                }
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    // Honor RUST_LOG if set, otherwise use verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug,reqwest=info,hyper=info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli) -> Result<(), Error> {
    let settings_path = resolve_settings_path(cli.settings.as_deref());
    let token = cli.token.as_deref();
    let json = cli.json;

    match &cli.command {
        Commands::List { id, no_sort } => {
            commands::list::execute(id.as_deref(), !no_sort, token, &settings_path, json)
        }
        Commands::Tree { id, no_sort } => {
            commands::tree::execute(id.as_deref(), !no_sort, token, &settings_path, json)
        }
        Commands::Find {
            pattern,
            ignore_case,
            no_sort,
        } => commands::find::execute(pattern, *ignore_case, !no_sort, token, &settings_path, json),
        Commands::Export(args) => commands::export::execute(args, token, &settings_path, json),

        // Mirroring
        Commands::Init { root, dest, force } => {
            commands::init::execute(&settings_path, root, dest.as_deref(), *force, json)
        }
        Commands::Status { no_sort } => {
            commands::status::execute(!no_sort, token, &settings_path, json)
        }
        Commands::Update => commands::update::execute(token, &settings_path, json),

        Commands::Completions { shell } => commands::completions::execute(shell),
        Commands::Version => commands::version::execute(json),
    }
}
