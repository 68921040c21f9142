//! summit-content - content API and contact endpoint for the Coin Nations summit site

use clap::Parser;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use summit_content::cli::commands::{handle_counts, handle_show};
use summit_content::config::{Args, Command};
use summit_content::content::{ContentFacade, USE_SANITY_ENV};
use summit_content::server::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("summit_content={},info", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }
    if args.use_sanity.is_none() {
        warn!("{} is not set, using static content", USE_SANITY_ENV);
    }

    match args.command.clone().unwrap_or(Command::Serve) {
        Command::Serve => {
            info!("Listen: {}", args.listen);
            info!("Content backend: {}", args.backend());
            if let Some(config) = args.sanity_config() {
                info!(
                    "Sanity: project {} dataset {} (api v{}, {})",
                    config.project_id,
                    config.dataset,
                    config.api_version,
                    config.perspective.as_str()
                );
            }

            let state = Arc::new(AppState::from_args(args).await?);
            if let Err(e) = state.cache.warm().await {
                error!("Failed to warm content cache: {}", e);
            }
            server::http::run(state).await?;
        }
        Command::Show { resource } => {
            let content = ContentFacade::new(args.backend(), args.sanity_config())?;
            println!("{}", handle_show(&content, &resource).await?);
        }
        Command::Counts => {
            println!("{}", handle_counts(&args).await?);
        }
    }

    Ok(())
}
