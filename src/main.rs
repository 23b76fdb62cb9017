mod main_runtime;

use clap::Parser;
use statuser::cli::Cli;
use statuser::error::Result;
use statuser::report::{ColumnFormatter, DEFAULT_STYLE};
use tracing::{debug, error};

use main_runtime::{build_reporter, init_logging, load_config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match load_config(&cli.config_dir) {
        Ok(config) => config,
        Err(e) => {
            init_logging("warn");
            error!("{e}");
            return Err(e);
        }
    };
    init_logging(&config.logging.level);
    debug!(config_dir = %cli.config_dir.display(), "configuration loaded");

    let color = cli.color_enabled(&config);
    let reporter = build_reporter(config)?.with_formatter(ColumnFormatter::new(DEFAULT_STYLE, color));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    reporter.run(&mut out).await
}
