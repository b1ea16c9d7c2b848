//! tracktube library
//!
//! Reads the tracks of a Spotify playlist, looks up a matching YouTube video
//! for each of them and hands every match to an external downloader.
//!
//! # Modules
//!
//! - `cli` - Wiring of the production clients into one run
//! - `config` - Environment loading and the explicit [`config::Config`] value
//! - `download` - External downloader invocation
//! - `management` - Credential cache and access token lifetime
//! - `pipeline` - Search and download driver, independent of any network client
//! - `spotify` - Spotify Web API client (client-credentials grant)
//! - `types` - Data structures and API payloads
//! - `utils` - Query, URL and authorization-code helpers
//! - `youtube` - YouTube OAuth bootstrap and search client
//!
//! # Example
//!
//! ```
//! use tracktube::{cli, config};
//!
//! #[tokio::main]
//! async fn main() -> tracktube::Res<()> {
//!     config::load_env();
//!     let config = config::Config::from_env()?;
//!     cli::run(&config).await
//! }
//! ```

pub mod cli;
pub mod config;
pub mod download;
pub mod management;
pub mod pipeline;
pub mod spotify;
pub mod types;
pub mod utils;
pub mod youtube;

/// A convenient Result type alias for operations that may fail.
///
/// Used at the top of the call tree where the typed errors of the individual
/// components meet. Keeps `Send + Sync` bounds for async contexts.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching playlist {}", playlist_id);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Downloaded {} videos", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the process with exit code 1. Only the binary entry point calls
/// this; library code returns errors instead.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues such as a skipped track or an unusable
/// credential cache.
///
/// # Example
///
/// ```
/// warning!("No video found for {} by {}", title, artist);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
