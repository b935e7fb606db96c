use clap::{Args, Parser, Subcommand};
use log::warn;
use std::path::PathBuf;

use crate::cache::ResponseCache;
use crate::config::{self, Config};
use crate::domain::track::WidgetPayload;
use crate::lastfm::LastfmClient;
use crate::widget::{RawQuery, TrackAggregator, WidgetQuery, render::render_widget};

#[derive(Parser)]
#[command(name = "scrobbed")]
#[command(version = "0.1")]
#[command(about = "Embeddable Last.fm track widgets")]
pub struct Cli {
    /// Path to the config TOML file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run http server hosting the widget
    Serve,
    /// Print the widget HTML for a user
    Render(WidgetArgs),
    /// List the tracks a widget would show
    List(WidgetArgs),
}

#[derive(Args)]
pub struct WidgetArgs {
    /// "recently" or "frequently"
    #[arg(short = 't', long = "type")]
    pub kind: String,
    /// Last.fm user name
    #[arg(short, long)]
    pub user: String,
    /// Number of tracks to request
    #[arg(short, long)]
    pub limit: Option<String>,
    /// Window for top tracks: overall, 7day, 1month, 3month, "6month ", 12month
    #[arg(short, long)]
    pub period: Option<String>,
}

impl From<&WidgetArgs> for RawQuery {
    fn from(args: &WidgetArgs) -> Self {
        RawQuery {
            kind: Some(args.kind.clone()),
            user: Some(args.user.clone()),
            limit: args.limit.clone(),
            period: args.period.clone(),
        }
    }
}

/// Entrypoint for CLI
pub fn run() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let cfg = Config::load(&cli.config.to_string_lossy())?;

    match &cli.command {
        Commands::Serve => {
            println!("Starting HTTP server...");

            if cfg.api_key().is_none() {
                warn!(
                    "no Last.fm API key configured, widget requests will fail until {} is set",
                    config::API_KEY_ENV
                );
            }

            let http_server =
                crate::http::server::HttpServer::new(build_aggregator(&cfg), cfg.http.clone());

            println!(
                "HTTP server running at http://{}:{}/embed/tracks",
                http_server.config.bind_addr, http_server.config.port
            );
            http_server.run();
        }

        Commands::Render(args) => {
            let payload = build_payload(&cfg, args)?;
            println!("{}", render_widget(&payload));
        }

        Commands::List(args) => {
            let payload = build_payload(&cfg, args)?;
            print_payload(&payload);
        }
    }

    Ok(())
}

fn build_aggregator(cfg: &Config) -> TrackAggregator {
    let cache = ResponseCache::in_memory(&cfg.cache);
    let client = LastfmClient::from_config(&cfg.lastfm, cfg.api_key(), cache);
    TrackAggregator::new(client)
}

fn build_payload(cfg: &Config, args: &WidgetArgs) -> anyhow::Result<WidgetPayload> {
    let raw = RawQuery::from(args);
    raw.check_required()?;

    let aggregator = build_aggregator(cfg);
    aggregator.ensure_configured()?;

    let query = WidgetQuery::try_from(raw)?;
    Ok(aggregator.build(&query)?)
}

fn print_payload(payload: &WidgetPayload) {
    println!("{}", payload.title);

    if !payload.thumbnails.is_empty() {
        println!("  Thumbnails:");
        for url in &payload.thumbnails {
            println!("    - {url}");
        }
    }

    println!("  Tracks ({}):", payload.tracks.len());
    for (i, track) in payload.tracks.iter().enumerate() {
        let suffix = match track.play_count() {
            Some(play_count) => format!(" ({play_count} plays)"),
            None if track.now_playing() => " [now playing]".to_string(),
            None => String::new(),
        };
        println!(
            "  {:>3}. {} - {}{suffix}",
            i + 1,
            track.artist_name,
            track.name
        );
    }
}
