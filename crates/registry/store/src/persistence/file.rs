use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tokio::{fs, task};
use user_registry_domain::AccountRecord;

use crate::{RecordStore, error::Result};

/// A record store backed by a single JSON array on disk.
///
/// Each write goes to its own temporary file in the data file's directory, which is then
/// renamed over the data file, so readers never observe a half written array. Concurrent
/// writers are not arbitrated: the last one to rename wins.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Opens the store at `path`, creating missing parent directories and initializing the
    /// file with an empty array when it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the directories or the initial file cannot be created.
    pub async fn open<P>(path: P) -> Result<Self>
    where
        P: Into<PathBuf>,
    {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        if !fs::try_exists(&path).await? {
            write_atomically(&path, b"[]".to_vec()).await?;
            tracing::info!(path = %path.display(), "initialized empty data file");
        }

        Ok(Self { path })
    }

    /// Returns the location of the data file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    #[tracing::instrument(skip_all, fields(path = %self.path.display()))]
    async fn load_all(&self) -> Result<Vec<AccountRecord>> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let records = serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            tracing::warn!("failed to parse data file, treating it as empty: {e}");
            Vec::new()
        });

        Ok(records)
    }

    #[tracing::instrument(skip_all, fields(path = %self.path.display(), count = records.len()))]
    async fn save_all(&self, records: &[AccountRecord]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(records)?;

        write_atomically(&self.path, bytes).await.map_err(From::from)
    }
}

async fn write_atomically(path: &Path, contents: Vec<u8>) -> io::Result<()> {
    let path = path.to_owned();

    task::spawn_blocking(move || {
        let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&contents)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map(drop).map_err(|e| e.error)
    })
    .await
    .map_err(io::Error::other)?
}
