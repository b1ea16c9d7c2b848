use tabled::Table;

use crate::{
    Res,
    config::Config,
    download::ExternalDownloader,
    info,
    management::{CredentialStore, TokenManager},
    pipeline,
    spotify::playlist::SpotifyClient,
    success,
    types::MatchTableRow,
    utils,
    youtube::{
        auth::{self, OAuthClient, StdinPrompt},
        search::YoutubeClient,
    },
};

pub async fn run(config: &Config) -> Res<()> {
    let spotify = SpotifyClient::new(&config.spotify_client_id, &config.spotify_client_secret);

    let pb = utils::spinner(format!("Fetching Spotify playlist {}...", config.playlist_id));
    let tracks = spotify.playlist_tracks(&config.playlist_id).await;
    pb.finish_and_clear();
    let tracks = tracks?;
    info!("Found {} tracks in playlist {}", tracks.len(), config.playlist_id);

    let oauth = OAuthClient::new(config.youtube.clone())?;
    let store = CredentialStore::new(&config.token_path);
    let credential = auth::bootstrap(&store, &oauth, &mut StdinPrompt).await?;
    let mut youtube = YoutubeClient::new(TokenManager::new(credential, oauth));

    let matches = pipeline::collect_videos(&tracks, &mut youtube).await;
    if !matches.is_empty() {
        println!("{}", Table::new(matches.iter().map(MatchTableRow::from)));
    }
    info!("Matched {} of {} tracks", matches.len(), tracks.len());

    let mut downloader = ExternalDownloader::new(&config.downloader);
    let downloaded = pipeline::download_videos(&matches, &mut downloader).await?;

    success!("Downloaded {} videos.", downloaded);
    Ok(())
}
