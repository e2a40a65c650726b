use clap::Parser;
use replot_bin::{
    cli::{Cli, Command},
    commands,
    config::FormatterConfig,
};
use replot_log::LogConfig;
use tracing::info;

fn main() {
    let cli = Cli::parse();

    let log_guard = match replot_log::init(LogConfig {
        log_file_path: cli.log_file.clone(),
    }) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {e}");
            None
        },
    };

    let result = run(cli);

    // Flush the log file before a possible exit.
    drop(log_guard);
    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let discovered = FormatterConfig::discover();
    let mut config =
        FormatterConfig::load_with_overrides(cli.config.as_deref(), discovered.as_deref())?;
    info!(
        config = ?cli.config.as_ref().or(discovered.as_ref()),
        "loaded formatter config"
    );

    match cli.command {
        Command::Format(args) => {
            args.style.apply(&mut config);
            commands::format::run(&args, &config)
        },
        Command::Check(args) => {
            args.style.apply(&mut config);
            commands::check::run(&args, &config)
        },
        Command::Types => commands::types::run(),
    }
}
