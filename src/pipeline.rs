//! Search and download driver.
//!
//! Searches are best-effort: a track whose search fails is reported and left
//! out. Downloads are all-or-nothing: the first failing download stops the
//! batch and its error is returned.

use std::future::Future;

use crate::{
    download::{DownloadError, Downloader},
    success,
    types::{Track, VideoMatch},
    utils, warning,
    youtube::search::SearchError,
};

pub trait VideoSearch {
    /// Returns the id of the top video for `query`.
    fn search(&mut self, query: &str) -> impl Future<Output = Result<String, SearchError>>;
}

/// Searches every track in order and returns the matches, in playlist order.
pub async fn collect_videos<S>(tracks: &[Track], search: &mut S) -> Vec<VideoMatch>
where
    S: VideoSearch,
{
    let mut matches = Vec::with_capacity(tracks.len());

    for track in tracks {
        let query = utils::build_search_query(track);

        let pb = utils::spinner(format!("Searching YouTube for \"{}\"...", query));
        let result = search.search(&query).await;
        pb.finish_and_clear();

        match result {
            Ok(video_id) => matches.push(VideoMatch {
                track: track.clone(),
                video_id,
            }),
            Err(e) => warning!(
                "Error searching YouTube for {} by {}: {}",
                track.title,
                track.artist,
                e
            ),
        }
    }

    matches
}

/// Downloads every match in order. Stops at the first failure.
pub async fn download_videos<D>(matches: &[VideoMatch], downloader: &mut D) -> Result<usize, DownloadError>
where
    D: Downloader,
{
    let total = matches.len();

    for (i, m) in matches.iter().enumerate() {
        let url = utils::watch_url(&m.video_id);

        let pb = utils::spinner(format!("Downloading {} ({}/{})...", url, i + 1, total));
        let result = downloader.download(&url).await;
        pb.finish_and_clear();
        result?;

        success!("Downloaded {} by {}", m.track.title, m.track.artist);
    }

    Ok(total)
}
