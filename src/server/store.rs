use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use super::types::ScheduleSnapshot;
use crate::error::StoreError;
use crate::schedule::ParseReport;

pub const SNAPSHOT_FILE: &str = "schedule.json";

// ── ScheduleStore – the published snapshot and its file ───────────────────────

pub struct ScheduleStore {
    current: RwLock<Arc<ScheduleSnapshot>>,
    /// Serializes regenerations so revisions stay sequential.
    write_lock: Mutex<()>,
    file_path: PathBuf,
}

impl ScheduleStore {
    /// Load from disk synchronously (file is small – safe to block on startup).
    pub fn load(data_dir: impl AsRef<Path>) -> Self {
        let file_path = data_dir.as_ref().join(SNAPSHOT_FILE);
        let snapshot = match std::fs::read_to_string(&file_path) {
            Ok(raw) => match serde_json::from_str::<ScheduleSnapshot>(&raw) {
                Ok(snapshot) => {
                    info!(
                        revision = snapshot.revision,
                        matches = snapshot.stats.total_matches,
                        "loaded schedule snapshot"
                    );
                    snapshot
                }
                Err(e) => {
                    warn!(path = %file_path.display(), "corrupt schedule snapshot: {e}");
                    ScheduleSnapshot::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => ScheduleSnapshot::default(),
            Err(e) => {
                warn!(path = %file_path.display(), "schedule read error: {e}");
                ScheduleSnapshot::default()
            }
        };

        Self {
            current: RwLock::new(Arc::new(snapshot)),
            write_lock: Mutex::new(()),
            file_path,
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub async fn current(&self) -> Arc<ScheduleSnapshot> {
        self.current.read().await.clone()
    }

    /// Persist the parse result as the next revision and publish it. When the
    /// write fails the previous snapshot stays published.
    pub async fn replace(&self, report: ParseReport) -> Result<Arc<ScheduleSnapshot>, StoreError> {
        let _guard = self.write_lock.lock().await;

        let previous = self.current().await;
        let next = Arc::new(ScheduleSnapshot::next(&previous, report));
        self.save(&next).await?;

        *self.current.write().await = next.clone();
        info!(
            revision = next.revision,
            matches = next.stats.total_matches,
            channels = next.stats.total_channels,
            skipped_lines = next.stats.skipped_lines,
            "published schedule snapshot"
        );
        Ok(next)
    }

    async fn save(&self, snapshot: &ScheduleSnapshot) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(snapshot)?;
        let write_err = |source| StoreError::Write {
            path: self.file_path.clone(),
            source,
        };

        if let Some(parent) = self.file_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
        }
        // Write next to the target then rename so readers never see half a file.
        let tmp_path = self.file_path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json).await.map_err(write_err)?;
        tokio::fs::rename(&tmp_path, &self.file_path)
            .await
            .map_err(write_err)?;
        Ok(())
    }
}
