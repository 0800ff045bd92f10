//! Domain trackers.
//!
//! Each tracker owns one collection behind the persistence port and performs a full
//! read-modify-write per operation. The pure list manipulation lives in free functions
//! next to each tracker so it can be tested without a store.
//!
//! Mutations take a shared write lock, so concurrent requests inside one process never
//! interleave their read and write. Several processes pointed at the same database are
//! still last-write-wins.

mod aggregator;
mod collection;
mod goals;
mod growth;
mod ideas;
mod streams;
mod theme;

pub use aggregator::*;
pub use collection::*;
pub use goals::*;
pub use growth::*;
pub use ideas::*;
pub use streams::*;
pub use theme::*;

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::store::KvStore;

/// Store plus the lock serializing read-modify-write cycles against it.
pub struct Shared<S> {
    store: S,
    write_lock: Mutex<()>,
}

impl<S: KvStore> Shared<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }
}

/// All trackers of one dashboard, sharing a single store.
pub struct Dashboard<S> {
    pub streams: StreamPlanner<S>,
    pub goals: GoalTracker<S>,
    pub ideas: IdeaBank<S>,
    pub growth: GrowthTracker<S>,
    pub aggregator: DashboardAggregator<S>,
    pub theme: ThemePreference<S>,
}

impl<S: KvStore> Dashboard<S> {
    pub fn new(store: S, history_limit: usize) -> Self {
        let shared = Arc::new(Shared::new(store));

        let streams = StreamPlanner::new(shared.clone());
        let growth = GrowthTracker::new(shared.clone(), history_limit);

        Self {
            aggregator: DashboardAggregator::new(streams.clone(), growth.clone()),
            goals: GoalTracker::new(shared.clone()),
            ideas: IdeaBank::new(shared.clone()),
            theme: ThemePreference::new(shared),
            streams,
            growth,
        }
    }
}
