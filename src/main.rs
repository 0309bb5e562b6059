use anyhow::Result;
use clap::Parser;
use qualmap::cli::{Cli, Commands};
use qualmap::commands::{self, AnalyzeConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            config,
            exclude,
            languages,
            format,
            output,
            top,
            jobs,
            no_parallel,
            verbosity,
        } => {
            init_logging(verbosity);
            commands::handle_analyze(AnalyzeConfig {
                path,
                config_file: config,
                exclude,
                languages,
                format,
                output,
                top,
                jobs,
                parallel: !no_parallel,
            })
        }
        Commands::Init { path, force } => {
            init_logging(0);
            commands::init_config(&path, force)?;
            Ok(())
        }
    }
}

/// `RUST_LOG` wins when set; otherwise `-v` raises the level from `warn`.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
