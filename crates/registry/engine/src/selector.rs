//! Startup selection of the record store backing the account service.

mod error;

pub use self::error::SelectStoreError;

use std::{net::IpAddr, path::PathBuf, sync::Arc};

use bon::Builder;
use dissolve_derive::Dissolve;
use user_registry_store::{DirectoryStorage, JsonFileStore, LocalStore, RecordStore};

/// The kind of deployment the registry runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DeploymentProfile {
    Development,
    Production,
}

/// The record store implementation in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Backend {
    /// [`JsonFileStore`] on the server-side data file
    File,

    /// [`LocalStore`] over client-local directory storage
    Local,
}

/// Where the registry is deployed.
#[derive(Debug, Clone, Builder)]
pub struct DeploymentContext {
    profile: DeploymentProfile,

    /// Host name the registry is served from
    #[builder(into)]
    host: String,
}

/// Where each backend keeps its data.
#[derive(Debug, Clone, Builder)]
pub struct StoreLocations {
    /// Data file of the file-backed store
    #[builder(into)]
    data_file: PathBuf,

    /// Directory of the client-local storage
    #[builder(into)]
    local_storage_dir: PathBuf,
}

/// The store picked at startup, together with which backend it is.
#[derive(Dissolve)]
pub struct SelectedStore {
    backend: Backend,
    store: Arc<dyn RecordStore>,
}

impl DeploymentContext {
    pub fn profile(&self) -> DeploymentProfile {
        self.profile
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Whether the server-side data file is available: only in development, served from a
    /// loopback host.
    pub fn has_backend(&self) -> bool {
        self.profile == DeploymentProfile::Development && is_loopback_host(&self.host)
    }

    pub fn backend(&self) -> Backend {
        if self.has_backend() { Backend::File } else { Backend::Local }
    }
}

impl SelectedStore {
    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }
}

/// Opens the record store for `context`.
///
/// This is meant to run once at startup; the returned store is used for the lifetime of the
/// process and the choice is never re-evaluated.
///
/// # Errors
///
/// Returns an error if the selected backend cannot be initialized.
#[tracing::instrument(skip_all, fields(profile = %context.profile, host = %context.host))]
pub async fn open_selected_store(
    context: &DeploymentContext,
    locations: &StoreLocations,
) -> Result<SelectedStore, SelectStoreError> {
    let backend = context.backend();

    let store: Arc<dyn RecordStore> = match backend {
        Backend::File => Arc::new(JsonFileStore::open(locations.data_file.clone()).await?),
        Backend::Local => Arc::new(LocalStore::new(
            DirectoryStorage::open(locations.local_storage_dir.clone()).await?,
        )),
    };

    match backend {
        Backend::File => {
            tracing::info!(path = %locations.data_file.display(), "using file-backed record store")
        },
        Backend::Local => tracing::info!(
            dir = %locations.local_storage_dir.display(),
            "using client-local record store"
        ),
    }

    Ok(SelectedStore { backend, store })
}

fn is_loopback_host(host: &str) -> bool {
    host.eq_ignore_ascii_case("localhost")
        || host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .is_ok_and(|ip| ip.is_loopback())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use user_registry_store::STORAGE_KEY;

    use super::*;

    fn context(profile: DeploymentProfile, host: &str) -> DeploymentContext {
        DeploymentContext::builder().profile(profile).host(host).build()
    }

    #[test]
    fn development_on_loopback_uses_the_file_backend() {
        for host in ["localhost", "LOCALHOST", "127.0.0.1", "::1", "[::1]"] {
            assert_eq!(
                context(DeploymentProfile::Development, host).backend(),
                Backend::File,
                "{host}",
            );
        }
    }

    #[test]
    fn production_or_remote_hosts_use_the_local_backend() {
        assert_eq!(context(DeploymentProfile::Production, "localhost").backend(), Backend::Local);
        assert_eq!(
            context(DeploymentProfile::Development, "example.github.io").backend(),
            Backend::Local,
        );
        assert_eq!(
            context(DeploymentProfile::Development, "192.168.1.10").backend(),
            Backend::Local,
        );
    }

    #[test]
    fn profile_parses_case_insensitively() {
        assert_eq!("Production".parse::<DeploymentProfile>().unwrap(), DeploymentProfile::Production);
        assert_eq!(DeploymentProfile::Development.to_string(), "development");
        assert!("staging".parse::<DeploymentProfile>().is_err());
    }

    #[tokio::test]
    async fn file_backend_creates_the_data_file() {
        let temp_dir = TempDir::new().unwrap();
        let locations = StoreLocations::builder()
            .data_file(temp_dir.path().join("data").join("users.json"))
            .local_storage_dir(temp_dir.path().join("local"))
            .build();

        let selected =
            open_selected_store(&context(DeploymentProfile::Development, "localhost"), &locations)
                .await
                .unwrap();

        assert_eq!(selected.backend(), Backend::File);
        assert!(temp_dir.path().join("data").join("users.json").exists());
        assert!(!temp_dir.path().join("local").exists());
    }

    #[tokio::test]
    async fn local_backend_writes_under_the_storage_key() {
        let temp_dir = TempDir::new().unwrap();
        let locations = StoreLocations::builder()
            .data_file(temp_dir.path().join("users.json"))
            .local_storage_dir(temp_dir.path().join("local"))
            .build();

        let SelectedStoreDissolved { backend, store } =
            open_selected_store(&context(DeploymentProfile::Production, "localhost"), &locations)
                .await
                .unwrap()
                .dissolve();

        store.save_all(&[]).await.unwrap();

        assert_eq!(backend, Backend::Local);
        assert!(temp_dir.path().join("local").join(STORAGE_KEY).exists());
        assert!(!temp_dir.path().join("users.json").exists());
    }
}
