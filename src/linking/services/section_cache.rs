//! Per-run cache of project section lists.

use crate::linking::{
    domain::{ProjectGid, SectionRef},
    ports::{TaskTracker, TrackerError, TrackerResult},
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;

type SectionSlot = Arc<OnceCell<Arc<[SectionRef]>>>;

/// Caches `list_sections` results by project gid.
///
/// Concurrent lookups of the same project share one remote call. A failed
/// fetch leaves the slot empty so the next lookup retries.
#[derive(Debug, Default)]
pub struct SectionCache {
    slots: Mutex<HashMap<ProjectGid, SectionSlot>>,
}

impl SectionCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the sections of `project`, fetching them on first use.
    ///
    /// # Errors
    ///
    /// Returns the tracker error from the fetch, or a runtime error when the
    /// slot map lock is poisoned.
    pub async fn sections<T>(
        &self,
        tracker: &T,
        project: &ProjectGid,
    ) -> TrackerResult<Arc<[SectionRef]>>
    where
        T: TaskTracker + ?Sized,
    {
        let slot = {
            let mut slots = self.slots.lock().map_err(|err| {
                TrackerError::runtime(std::io::Error::other(err.to_string()))
            })?;
            Arc::clone(slots.entry(project.clone()).or_default())
        };
        slot.get_or_try_init(|| async {
            tracker
                .list_sections(project)
                .await
                .map(Arc::<[SectionRef]>::from)
        })
        .await
        .cloned()
    }
}
