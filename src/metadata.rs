//! Best-effort metadata enrichment
//!
//! Fans lookups out over the catalog collaborator, bounded by a semaphore,
//! and waits for every one to settle. A failed lookup degrades that record to
//! bare; it never aborts or delays the rest. Completed lookups flow back over
//! one channel whose receive loop is the sole owner of the progress counter,
//! so counts are strictly monotonic regardless of completion order.

use crate::adb::PackageId;
use crate::catalog::{CatalogEntry, CatalogLookup};
use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc};

pub const DEFAULT_CONCURRENCY: usize = 16;

/// Catalog metadata, present as a whole or not at all
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppMeta {
    pub title: String,
    pub developer: String,
    pub summary: String,
}

impl From<CatalogEntry> for AppMeta {
    fn from(entry: CatalogEntry) -> Self {
        Self {
            title: entry.title,
            developer: entry.developer,
            summary: entry.summary,
        }
    }
}

/// One package with optional enrichment; `meta: None` is a bare record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    pub id: PackageId,
    pub meta: Option<AppMeta>,
}

impl PackageRecord {
    pub fn bare(id: PackageId) -> Self {
        Self { id, meta: None }
    }

    pub fn is_enriched(&self) -> bool {
        self.meta.is_some()
    }
}

/// Enrich every id, preserving input order in the output.
///
/// `on_progress(done, total)` fires once per settled lookup, in settle order.
pub async fn enrich<C>(
    catalog: Arc<C>,
    ids: &[PackageId],
    concurrency: usize,
    mut on_progress: impl FnMut(usize, usize),
) -> Vec<PackageRecord>
where
    C: CatalogLookup + ?Sized + 'static,
{
    let total = ids.len();
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let (tx, mut rx) = mpsc::unbounded_channel();

    for (idx, id) in ids.iter().cloned().enumerate() {
        let catalog = Arc::clone(&catalog);
        let semaphore = Arc::clone(&semaphore);
        let tx = tx.clone();
        tokio::spawn(async move {
            // The semaphore is never closed; a failed acquire just means
            // the lookup runs uncapped.
            let _permit = semaphore.acquire_owned().await.ok();
            let meta = catalog.lookup(id.as_str()).await.ok().map(AppMeta::from);
            let _ = tx.send((idx, PackageRecord { id, meta }));
        });
    }
    drop(tx);

    let mut slots: Vec<Option<PackageRecord>> = (0..total).map(|_| None).collect();
    let mut done = 0usize;
    while let Some((idx, record)) = rx.recv().await {
        slots[idx] = Some(record);
        done += 1;
        on_progress(done, total);
    }

    // A slot can only stay empty if its task panicked; degrade to bare
    // rather than shrinking the output.
    slots
        .into_iter()
        .zip(ids.iter())
        .map(|(slot, id)| slot.unwrap_or_else(|| PackageRecord::bare(id.clone())))
        .collect()
}
