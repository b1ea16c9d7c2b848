use std::{
    ffi::OsString,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::types::Credential;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Credential file {} does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("Credential file {} is not a valid credential record: {source}", .path.display())]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Unable to encode credential: {0}")]
    Encode(serde_json::Error),
    #[error("Unable to access credential file {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

/// Single-file cache for the YouTube OAuth credential.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CredentialStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<Credential, CredentialError> {
        let content = async_fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => CredentialError::NotFound(self.path.clone()),
                _ => self.io_error(e),
            })?;

        serde_json::from_str(&content).map_err(|source| CredentialError::Decode {
            path: self.path.clone(),
            source,
        })
    }

    /// Replaces the cache file with `credential`. The record is written to a
    /// sibling file first and renamed over the target, so the cache never
    /// holds a half-written record.
    pub async fn save(&self, credential: &Credential) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(credential).map_err(CredentialError::Encode)?;
        let tmp_path = self.tmp_path();
        async_fs::write(&tmp_path, json)
            .await
            .map_err(|e| self.io_error(e))?;
        async_fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| self.io_error(e))
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from("token.json"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: io::Error) -> CredentialError {
        CredentialError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
