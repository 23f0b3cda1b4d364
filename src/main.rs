use clap::Parser;
use surelock::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Init => surelock::cli::commands::init::execute(&cli),
        Commands::Add {
            ref entry,
            ref username,
            ref category,
            ref description,
        } => surelock::cli::commands::add::execute(
            &cli,
            entry,
            username,
            category.as_deref(),
            description,
        ),
        Commands::View {
            ref entry,
            ref category,
            no_clipboard,
        } => surelock::cli::commands::view::execute(&cli, entry, category.as_deref(), no_clipboard),
        Commands::Del {
            ref entry,
            ref category,
        } => surelock::cli::commands::delete::execute(&cli, entry, category.as_deref()),
        Commands::Show {
            ref category,
            list_categories,
        } => surelock::cli::commands::show::execute(&cli, category.as_deref(), list_categories),
        Commands::AddCategory { ref category } => {
            surelock::cli::commands::category::execute_add(&cli, category)
        }
        Commands::DeleteCategory {
            ref category,
            force,
        } => surelock::cli::commands::category::execute_delete(&cli, category, force),
        Commands::Completions { shell } => surelock::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        surelock::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr so stdout stays clean for `view`.
/// `SURELOCK_LOG` overrides the level chosen with `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("SURELOCK_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("surelock={level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
