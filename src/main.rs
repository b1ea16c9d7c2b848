use clap::{
    Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};

use tracktube::{cli, config, error};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

/// Configuration is read from the environment or a `.env` file:
/// SPOTIFY_CLIENT_ID, SPOTIFY_CLIENT_SECRET and YOUTUBE_CREDENTIALS_JSON are
/// required; SPOTIFY_PLAYLIST_ID, TRACKTUBE_TOKEN_PATH and
/// TRACKTUBE_DOWNLOADER are optional.
#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {}

#[tokio::main]
async fn main() {
    let _cli = Cli::parse();

    config::load_env();
    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("{}", e),
    };

    if let Err(e) = cli::run(&config).await {
        error!("{}", e);
    }
}
