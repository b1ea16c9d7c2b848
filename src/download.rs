use std::{future::Future, io};

use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Failed to start downloader {program}: {source}")]
    Spawn { program: String, source: io::Error },
    #[error("Failed to download video {url} ({status})\n{output}")]
    Failed {
        url: String,
        status: String,
        output: String,
    },
}

pub trait Downloader {
    fn download(&mut self, url: &str) -> impl Future<Output = Result<(), DownloadError>>;
}

/// Runs an external downloader binary with the watch URL as its only
/// argument, e.g. `youtube-dl https://www.youtube.com/watch?v=<id>`.
pub struct ExternalDownloader {
    program: String,
}

impl ExternalDownloader {
    pub fn new(program: impl Into<String>) -> Self {
        ExternalDownloader {
            program: program.into(),
        }
    }
}

impl Downloader for ExternalDownloader {
    async fn download(&mut self, url: &str) -> Result<(), DownloadError> {
        let output = Command::new(&self.program)
            .arg(url)
            .output()
            .await
            .map_err(|source| DownloadError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(DownloadError::Failed {
                url: url.to_string(),
                status: output.status.to_string(),
                output: combined,
            });
        }

        Ok(())
    }
}
