use anyhow::Result as Fallible;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use rr_core::{entities::*, repositories as repo, repositories::CommentSnapshot};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};
use tokio::sync::watch;

mod file;
mod repo_impl;

#[derive(Debug, Default)]
struct State {
    // In insertion order
    comments: Vec<Comment>,
    recipe_ratings: HashMap<Id, AvgRatingValue>,
    feeds: HashMap<Id, watch::Sender<CommentSnapshot>>,
}

impl State {
    fn snapshot_of(&self, recipe_id: &str) -> CommentSnapshot {
        self.comments
            .iter()
            .filter(|c| c.recipe_id == recipe_id)
            .cloned()
            .collect::<Vec<_>>()
            .into()
    }

    // Replace the snapshot of all subscribers of the recipe.
    // Feeds without any receivers left are dropped.
    fn publish(&mut self, recipe_id: &str) {
        let Some(tx) = self.feeds.get(recipe_id) else {
            return;
        };
        if tx.receiver_count() == 0 {
            log::debug!("Dropping the last feed of recipe {recipe_id}");
            self.feeds.remove(recipe_id);
            return;
        }
        tx.send_replace(self.snapshot_of(recipe_id));
    }
}

type SharedState = Arc<RwLock<State>>;

/// Comment store that keeps everything in memory.
///
/// Clones share the same state. Reads may happen concurrently,
/// while every write holds an exclusive lock until the change
/// has been published to all subscribers and, if configured,
/// written to the backing file.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDb {
    state: SharedState,
    file: Option<PathBuf>,
    offline: Arc<AtomicBool>,
}

impl InMemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a store that is persisted as JSON in `path`.
    ///
    /// A missing file is created on the first write.
    pub fn open(path: impl AsRef<Path>) -> Fallible<Self> {
        let path = path.as_ref();
        let state = if path.exists() {
            log::info!("Loading comments from {}", path.display());
            file::load(path)?
        } else {
            log::info!("Starting with an empty store at {}", path.display());
            State::default()
        };
        Ok(Self {
            state: Arc::new(RwLock::new(state)),
            file: Some(path.to_owned()),
            offline: Default::default(),
        })
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Let all subsequent writes fail as if the store was unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::Release);
    }

    fn shared(&self) -> RwLockReadGuard<'_, State> {
        self.state.read()
    }

    fn exclusive(&self) -> repo::Result<RwLockWriteGuard<'_, State>> {
        if self.offline.load(Ordering::Acquire) {
            log::warn!("Rejecting write access while offline");
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "comment store is offline",
            )
            .into());
        }
        Ok(self.state.write())
    }

    fn persist(&self, state: &State) -> repo::Result<()> {
        let Some(path) = &self.file else {
            return Ok(());
        };
        file::save(path, state).map_err(|err| {
            log::error!("Failed to save comments to {}: {err}", path.display());
            repo::Error::Other(err)
        })
    }
}

#[cfg(test)]
mod tests;
