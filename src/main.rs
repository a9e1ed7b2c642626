use anyhow::Result;
use clap::{Parser, Subcommand};
use edgecast_cache::cache::{CacheClient, CacheService};
use edgecast_cache::models::{Config, MediaType};
use std::str::FromStr;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "edgecast-cache")]
#[command(about = "Manage EdgeCast edge-cache contents")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Purge cached objects matching a path pattern.
    Purge {
        /// Path pattern to purge, e.g. `https://cdn.example.com/images/*`.
        #[arg(value_name = "PATTERN")]
        pattern: String,

        /// Delivery platform, by name or numeric code.
        #[arg(
            long,
            value_name = "TYPE",
            default_value = "http-large-object",
            value_parser = parse_media_type
        )]
        media_type: MediaType,
    },
    /// Preload a URL into the edge cache.
    Load {
        /// URL to load, or a path when `--relative` is set.
        #[arg(value_name = "URL")]
        url: String,

        /// Delivery platform, by name or numeric code.
        #[arg(
            long,
            value_name = "TYPE",
            default_value = "http-large-object",
            value_parser = parse_media_type
        )]
        media_type: MediaType,

        /// Resolve URL against the configured CDN root before loading.
        #[arg(long)]
        relative: bool,
    },
}

fn parse_media_type(input: &str) -> std::result::Result<MediaType, String> {
    MediaType::from_str(input)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "edgecast_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let client = CacheClient::new(config.account_number, config.token, config.cdn_base_url)
        .with_api_base_url(config.api_base_url);

    let accepted = match args.command {
        Command::Purge {
            pattern,
            media_type,
        } => {
            info!("Purging {} ({})", pattern, media_type);
            client.purge(media_type, &pattern).await
        }
        Command::Load {
            url,
            media_type,
            relative,
        } => {
            let url = if relative {
                client.absolute_url(&url)
            } else {
                url
            };
            info!("Loading {} ({})", url, media_type);
            client.load(media_type, &url).await
        }
    };

    if accepted {
        info!("Operation accepted");
        Ok(())
    } else {
        error!("Operation failed");
        std::process::exit(1);
    }
}
