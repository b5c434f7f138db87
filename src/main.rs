mod cli;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use insight_api::{Backend, HttpBackend};
use insight_tui::{App, AppOptions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let mut config = insight_config::load(cli.config.as_deref())?;
    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
    }
    if let Some(user) = &cli.user {
        config.api.user_id = user.clone();
    }
    if cli.ascii {
        config.tui.ascii = true;
    }

    if let Some(Commands::ShowConfig) = &cli.command {
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(config.api.base_url.clone()));
    let app = App::new(
        backend,
        AppOptions {
            user_id: config.api.user_id.clone(),
            ascii: config.tui.ascii,
        },
    );

    let terminal = ratatui::init();
    let result = app.run(terminal).await;
    ratatui::restore();

    result
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
