//! Dataset acquisition.
//!
//! The dataset is a single CSV file, either downloaded once over HTTP or
//! read from a local path. Loading happens once at startup; a failure is
//! reported to the caller and leaves the store untouched.

use std::path::PathBuf;

use crate::{Dataset, DatasetError, DatasetStore};

/// Public URL of the gun violence dataset.
pub const DEFAULT_DATASET_URL: &str =
    "https://datasetstoragecloud.s3.us-east-1.amazonaws.com/gun_violence_usa.csv";

/// Where the dataset CSV comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// Download from an HTTP(S) URL.
    Url(String),
    /// Read from a local file.
    Path(PathBuf),
}

impl Default for DatasetSource {
    fn default() -> Self {
        Self::Url(DEFAULT_DATASET_URL.to_string())
    }
}

impl std::fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

impl DatasetSource {
    /// Fetches the raw CSV bytes.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Http`] if the download fails or the server
    /// responds with an error status, or [`DatasetError::Io`] if the local
    /// file cannot be read.
    pub async fn fetch(&self) -> Result<Vec<u8>, DatasetError> {
        let bytes = match self {
            Self::Url(url) => {
                let response = reqwest::get(url).await?.error_for_status()?;
                response.bytes().await?.to_vec()
            }
            Self::Path(path) => tokio::fs::read(path).await?,
        };

        log::debug!("Fetched {} bytes from {self}", bytes.len());

        Ok(bytes)
    }
}

/// Fetches and parses the dataset from `source`.
///
/// # Errors
///
/// Returns [`DatasetError`] if fetching or parsing fails.
pub async fn load(source: &DatasetSource) -> Result<Dataset, DatasetError> {
    let bytes = source.fetch().await?;
    Dataset::from_csv_bytes(&bytes)
}

/// Loads the dataset from `source` and installs it into `store`.
///
/// Returns the number of records loaded.
///
/// # Errors
///
/// Returns [`DatasetError`] if fetching or parsing fails, or if the store
/// already holds a dataset. The store is left unchanged on error.
pub async fn load_into(
    store: &DatasetStore,
    source: &DatasetSource,
) -> Result<usize, DatasetError> {
    log::info!("Loading dataset from {source}...");
    let dataset = load(source).await?;
    let count = dataset.len();
    store.install(dataset)?;
    log::info!("Dataset loaded: {count} records");
    Ok(count)
}
