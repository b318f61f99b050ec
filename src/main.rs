use clap::Parser;
use miette::Result;
use prio::cli::commands::{ahp, completions, delphi, inspect, kano, moscow, scale, topsis};
use prio::cli::{Cli, Commands};
use prio::core::Config;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let config = Config::load();
    let global = &cli.global;

    match cli.command {
        Commands::Moscow(args) => moscow::run(args, global, &config),
        Commands::Kano(args) => kano::run(args, global, &config),
        Commands::Topsis(args) => topsis::run_crisp(args, global, &config),
        Commands::FuzzyTopsis(args) => topsis::run_fuzzy(args, global, &config),
        Commands::IfsTopsis(args) => topsis::run_ifs(args, global, &config),
        Commands::Ahp(cmd) => ahp::run(cmd, global, &config),
        Commands::Delphi(cmd) => delphi::run(cmd, global, &config),
        Commands::Scale(args) => scale::run(args, global, &config),
        Commands::Inspect(args) => inspect::run(args, global, &config),
        Commands::Completions(args) => completions::run(args),
    }
}

/// Log to stderr; `RUST_LOG` takes precedence over `-v`
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
