use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use tokio::{sync::RwLock, time::Instant};
use tracing::info;

struct Entry<T> {
    page: Arc<T>,
    last_seen: Instant,
}

/// Mounted pages keyed by session id. A page lives from mount until it is
/// unmounted or sits idle past the sweep limit; nothing about it outlives the
/// session.
pub struct Sessions<T> {
    next_id: AtomicU64,
    pages: RwLock<HashMap<u64, Entry<T>>>,
}

impl<T> Default for Sessions<T> {
    fn default() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            pages: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> Sessions<T> {
    pub async fn mount(&self, page: T) -> (u64, Arc<T>) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let page = Arc::new(page);
        self.pages.write().await.insert(
            id,
            Entry {
                page: page.clone(),
                last_seen: Instant::now(),
            },
        );
        info!("mounted session {id}");
        (id, page)
    }

    /// Looks a page up and marks it as active.
    pub async fn get(&self, id: u64) -> Option<Arc<T>> {
        let mut pages = self.pages.write().await;
        let entry = pages.get_mut(&id)?;
        entry.last_seen = Instant::now();
        Some(entry.page.clone())
    }

    /// Returns false if the session was not mounted. Searches still in flight
    /// finish against their own `Arc` and are then dropped with it.
    pub async fn unmount(&self, id: u64) -> bool {
        let removed = self.pages.write().await.remove(&id).is_some();
        if removed {
            info!("unmounted session {id}");
        }
        removed
    }

    /// Drops pages nobody has touched for `idle`, e.g. browsers that closed
    /// without unmounting. Returns how many were dropped.
    pub async fn sweep(&self, idle: Duration) -> usize {
        let mut pages = self.pages.write().await;
        let before = pages.len();
        pages.retain(|_, entry| entry.last_seen.elapsed() < idle);
        let dropped = before - pages.len();
        if dropped > 0 {
            info!("expired {dropped} idle sessions");
        }
        dropped
    }

    /// Sweeps forever at half the idle limit.
    pub async fn expire_idle(self: Arc<Self>, idle: Duration) {
        let mut ticker = tokio::time::interval(idle / 2);
        loop {
            ticker.tick().await;
            self.sweep(idle).await;
        }
    }
}
