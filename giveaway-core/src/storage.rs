use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::saved::SavedEntry;

/// Everything that survives a restart: bookmarks and the display mode.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedState {
    pub saved: Vec<SavedEntry>,
    pub is_dark: bool,
}

/// JSON file holding a [`PersistedState`], replaced atomically on write.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub const FILE_NAME: &'static str = "state.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(Self::FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    /// Reads the snapshot. A corrupt file falls back to the temp file left by
    /// an interrupted write, then to the empty state.
    pub async fn load(&self) -> PersistedState {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(error = %e, path = %self.path.display(), "no snapshot to restore");
                return PersistedState::default();
            }
        };
        match serde_json::from_slice::<PersistedState>(&bytes) {
            Ok(state) => state,
            Err(e) => {
                warn!(
                    error = %e,
                    path = %self.path.display(),
                    "failed to parse snapshot, trying tmp fallback"
                );
                match tokio::fs::read(self.tmp_path()).await {
                    Ok(tmp_bytes) => serde_json::from_slice(&tmp_bytes).unwrap_or_default(),
                    Err(_) => PersistedState::default(),
                }
            }
        }
    }

    pub async fn persist(&self, state: &PersistedState) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(state)?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), saved = state.saved.len(), "snapshot persisted");
        Ok(())
    }
}
