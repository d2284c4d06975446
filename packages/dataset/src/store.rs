//! The install-once dataset holder shared by every request.

use std::sync::OnceLock;

use crate::{Dataset, DatasetError};

/// Holds the dataset once it has been loaded.
///
/// The store starts empty. [`DatasetStore::install`] is the only write and
/// succeeds at most once; afterwards readers get `&Dataset` without any
/// locking. Readers that arrive before installation see `None` rather than
/// a partially built dataset.
#[derive(Debug, Default)]
pub struct DatasetStore {
    dataset: OnceLock<Dataset>,
}

impl DatasetStore {
    /// Creates an empty, not-ready store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            dataset: OnceLock::new(),
        }
    }

    /// Creates a store that is already ready with `dataset`.
    #[must_use]
    pub fn with_dataset(dataset: Dataset) -> Self {
        let store = Self::new();
        let _ = store.dataset.set(dataset);
        store
    }

    /// Installs the loaded dataset.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::AlreadyLoaded`] if a dataset was already
    /// installed. The existing dataset is kept.
    pub fn install(&self, dataset: Dataset) -> Result<(), DatasetError> {
        self.dataset
            .set(dataset)
            .map_err(|_| DatasetError::AlreadyLoaded)
    }

    /// Whether a usable dataset is held.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.dataset.get().is_some()
    }

    /// The installed dataset, or `None` while not ready.
    #[must_use]
    pub fn get(&self) -> Option<&Dataset> {
        self.dataset.get()
    }
}
