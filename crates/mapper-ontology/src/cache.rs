//! Fill-on-miss catalog cache with single-flight fetching.
//!
//! The persisted catalog is authoritative once populated: a fill first reads
//! the store and only calls the [`CatalogSource`] when the store is empty.
//! Callers that arrive while a fill is running join it and receive the same
//! outcome, so one fill performs at most one fetch and one bulk replace.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};

use mapper_store::CatalogStore;

use crate::catalog::{Catalog, CatalogState};
use crate::error::Result;
use crate::source::CatalogSource;

type SharedFill = Shared<BoxFuture<'static, Result<Arc<Catalog>>>>;

/// Cloneable handle to the ontology catalog cache.
#[derive(Clone)]
pub struct OntologyCache {
    inner: Arc<CacheInner>,
}

struct CacheInner {
    store: CatalogStore,
    source: Arc<dyn CatalogSource>,
    slot: Mutex<SlotState>,
}

struct SlotState {
    /// Bumped whenever a fill starts or the cache is cleared; a fill only
    /// commits its outcome while its generation is current.
    generation: u64,
    slot: Slot,
}

enum Slot {
    Idle,
    InFlight(SharedFill),
    Ready(Arc<Catalog>),
    Failed(String),
}

impl std::fmt::Debug for OntologyCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OntologyCache")
            .field("source", &self.inner.source.name())
            .field("state", &self.state())
            .finish()
    }
}

impl OntologyCache {
    /// Creates a cache over the persisted catalog collection and a source
    /// used on a miss. Nothing is read until the first fill.
    pub fn new(store: CatalogStore, source: Arc<dyn CatalogSource>) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                store,
                source,
                slot: Mutex::new(SlotState {
                    generation: 0,
                    slot: Slot::Idle,
                }),
            }),
        }
    }

    /// Returns the catalog, filling the cache from the source if it is empty.
    ///
    /// A loaded catalog is returned without touching the store or the source.
    /// Overlapping calls share one in-flight fill. A failed fill is reported
    /// to every caller that joined it; the next call starts a new attempt.
    pub async fn fill_if_empty(&self) -> Result<Arc<Catalog>> {
        let fill = {
            let mut state = self.lock_slot();
            match &state.slot {
                Slot::Ready(catalog) => return Ok(Arc::clone(catalog)),
                Slot::InFlight(fill) => {
                    tracing::debug!("Joining in-flight catalog fill");
                    fill.clone()
                }
                Slot::Idle | Slot::Failed(_) => {
                    state.generation += 1;
                    let fill = Arc::clone(&self.inner)
                        .run_fill(state.generation)
                        .boxed()
                        .shared();
                    state.slot = Slot::InFlight(fill.clone());
                    fill
                }
            }
        };
        fill.await
    }

    /// Current availability of the catalog, without starting a fill.
    pub fn state(&self) -> CatalogState {
        match &self.lock_slot().slot {
            Slot::Idle => CatalogState::NotLoaded,
            Slot::InFlight(_) => CatalogState::Loading,
            Slot::Ready(catalog) => CatalogState::Ready(Arc::clone(catalog)),
            Slot::Failed(message) => CatalogState::Unavailable(message.clone()),
        }
    }

    /// Empties the persisted catalog and the in-memory state, so the next
    /// fill fetches from the source again.
    ///
    /// A fill that is still running when this is called does not update the
    /// in-memory state when it finishes.
    pub async fn clear(&self) -> Result<()> {
        {
            let mut state = self.lock_slot();
            state.generation += 1;
            state.slot = Slot::Idle;
        }
        self.inner.store.clear().await?;
        tracing::info!("Cleared ontology catalog cache");
        Ok(())
    }

    /// Name of the configured catalog source.
    pub fn source_name(&self) -> String {
        self.inner.source.name()
    }

    fn lock_slot(&self) -> MutexGuard<'_, SlotState> {
        self.inner.lock_slot()
    }
}

impl CacheInner {
    fn lock_slot(&self) -> MutexGuard<'_, SlotState> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn run_fill(self: Arc<Self>, generation: u64) -> Result<Arc<Catalog>> {
        let outcome = self.load_or_fetch().await;

        let mut state = self.lock_slot();
        if state.generation == generation {
            state.slot = match &outcome {
                Ok(catalog) => Slot::Ready(Arc::clone(catalog)),
                Err(e) => Slot::Failed(e.to_string()),
            };
        }
        outcome
    }

    async fn load_or_fetch(&self) -> Result<Arc<Catalog>> {
        let cached = self.store.load_all().await?;
        if !cached.is_empty() {
            tracing::info!(objects = cached.len(), "Using cached ontology catalog");
            return Ok(Arc::new(Catalog::new(cached)));
        }

        let source = self.source.name();
        tracing::info!(source = %source, "Catalog cache is empty, fetching");
        let fetched = match self.source.fetch_catalog().await {
            Ok(objects) => objects,
            Err(e) => {
                tracing::warn!(source = %source, error = %e, "Catalog fetch failed");
                return Err(e);
            }
        };

        let stored = self.store.replace_all(fetched).await?;
        tracing::info!(source = %source, objects = stored.len(), "Fetched ontology catalog");
        Ok(Arc::new(Catalog::new(stored)))
    }
}
