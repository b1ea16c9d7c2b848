use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};
use reqwest::Url;

use crate::{config::YOUTUBE_WATCH_URL, types::Track};

const STATE_LENGTH: usize = 32;

pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(STATE_LENGTH)
        .map(char::from)
        .collect()
}

/// Steady-ticking spinner; callers clear it before printing anything else.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

pub fn build_search_query(track: &Track) -> String {
    format!("{} {}", track.title, track.artist)
}

pub fn watch_url(video_id: &str) -> String {
    format!("{YOUTUBE_WATCH_URL}?v={video_id}")
}

/// Undoes the URL encoding of whatever the operator pasted, with `+` read as
/// a space the way query strings encode it.
pub fn decode_pasted_input(input: &str) -> Result<String, std::string::FromUtf8Error> {
    let input = input.trim().replace('+', " ");
    urlencoding::decode(&input).map(|decoded| decoded.into_owned())
}

/// Pulls the `code` query parameter out of a redirect URL or a bare query
/// string. Returns `None` when there is no non-empty `code`.
pub fn extract_auth_code(decoded: &str) -> Option<String> {
    let url = match Url::parse(decoded) {
        Ok(url) => url,
        Err(_) => {
            let raw = decoded.trim_start_matches('?');
            Url::parse(&format!("http://localhost/?{raw}")).ok()?
        }
    };

    url.query_pairs()
        .find(|(key, _)| key == "code")
        .map(|(_, value)| value.into_owned())
        .filter(|code| !code.is_empty())
}
