use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::FavoriteError;
use crate::model::{FavoriteSet, Id};
use crate::store::FavoriteStore;

/// Per-session favorites state with optimistic toggles.
///
/// The local set flips immediately on toggle and the remote call follows; a
/// rejected call rolls the flip back. State is scoped to the active user and
/// cleared when the session drops to anonymous. An epoch counter guards
/// against a slow response landing after the user context has changed.
pub struct FavoritesSynchronizer<S: FavoriteStore> {
    store: Arc<S>,
    state: RwLock<SessionState>,
}

#[derive(Default)]
struct SessionState {
    user: Option<Id>,
    favorites: HashSet<Id>,
    /// Bumped on every `load`/`set_anonymous`. A resolution whose epoch no
    /// longer matches belongs to a dead session and must not touch state.
    epoch: u64,
}

impl SessionState {
    fn apply(&mut self, product_id: &str, favorited: bool) {
        // Idempotent in both directions.
        if favorited {
            self.favorites.insert(product_id.to_string());
        } else {
            self.favorites.remove(product_id);
        }
    }
}

impl<S: FavoriteStore> FavoritesSynchronizer<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            state: RwLock::new(SessionState::default()),
        }
    }

    /// Activate a user session and fetch the authoritative set once.
    ///
    /// Fails open: if the remote call errors the session starts with nothing
    /// favorited rather than blocking the UI.
    pub async fn load(&self, user_id: &str) -> FavoriteSet {
        let epoch = {
            let mut state = self.state.write();
            state.user = Some(user_id.to_string());
            state.favorites.clear();
            state.epoch += 1;
            state.epoch
        };

        match self.store.get_favorites(&user_id.to_string()).await {
            Ok(products) => {
                let mut state = self.state.write();
                if state.epoch == epoch {
                    state.favorites = products.into_iter().map(|p| p.id).collect();
                }
            }
            Err(err) => {
                log::warn!("failed to load favorites for user {user_id}: {err:#}");
            }
        }

        self.snapshot_for(user_id)
    }

    /// Drop to anonymous: no user, nothing favorited, older in-flight
    /// resolutions are fenced off.
    pub fn set_anonymous(&self) {
        let mut state = self.state.write();
        state.user = None;
        state.favorites.clear();
        state.epoch += 1;
    }

    pub fn current_user(&self) -> Option<Id> {
        self.state.read().user.clone()
    }

    pub fn is_favorited(&self, product_id: &str) -> bool {
        self.state.read().favorites.contains(product_id)
    }

    /// Snapshot of the current session's set; empty for anonymous.
    pub fn favorite_set(&self) -> FavoriteSet {
        let state = self.state.read();
        FavoriteSet {
            user_id: state.user.clone().unwrap_or_default(),
            product_ids: state.favorites.clone(),
        }
    }

    /// Optimistically flip membership for `product_id` and reconcile with the
    /// remote store. Returns the membership after the flip on success.
    ///
    /// Anonymous sessions short-circuit with `Unauthenticated` before any
    /// network traffic. On remote failure the flip is reverted, unless a
    /// newer toggle or session change already moved the state on.
    pub async fn toggle(&self, product_id: &str) -> Result<bool, FavoriteError> {
        let (user_id, epoch, target) = {
            let mut state = self.state.write();
            let Some(user) = state.user.clone() else {
                return Err(FavoriteError::Unauthenticated);
            };
            let target = !state.favorites.contains(product_id);
            state.apply(product_id, target);
            (user, state.epoch, target)
        };

        let result = if target {
            self.store.add_favorite(&product_id.to_string(), &user_id).await
        } else {
            self.store.remove_favorite(&product_id.to_string(), &user_id).await
        };

        match result {
            // Success applies nothing further: the local set already holds
            // the target value, and re-applying a stale success would be a
            // no-op anyway.
            Ok(()) => Ok(target),
            Err(err) => {
                let mut state = self.state.write();
                // Revert only if this session is still live and no newer
                // toggle has already changed the membership again.
                if state.epoch == epoch && state.favorites.contains(product_id) == target {
                    state.apply(product_id, !target);
                }
                Err(FavoriteError::OperationFailed(err))
            }
        }
    }

    fn snapshot_for(&self, user_id: &str) -> FavoriteSet {
        let state = self.state.read();
        if state.user.as_deref() == Some(user_id) {
            FavoriteSet {
                user_id: user_id.to_string(),
                product_ids: state.favorites.clone(),
            }
        } else {
            FavoriteSet::empty(user_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use crate::model::Product;

    #[derive(Default)]
    struct MockFavoriteStore {
        remote: Mutex<HashSet<Id>>,
        fail_writes: AtomicBool,
        fail_reads: AtomicBool,
        write_calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl FavoriteStore for MockFavoriteStore {
        async fn get_favorites(&self, _user_id: &Id) -> anyhow::Result<Vec<Product>> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(anyhow!("remote unavailable"));
            }
            Ok(self
                .remote
                .lock()
                .iter()
                .map(|id| Product::new(id.clone(), "Honda", "Wave", 1.0))
                .collect())
        }

        async fn add_favorite(&self, product_id: &Id, _user_id: &Id) -> anyhow::Result<()> {
            self.write_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(anyhow!("rejected"));
            }
            self.remote.lock().insert(product_id.clone());
            Ok(())
        }

        async fn remove_favorite(&self, product_id: &Id, _user_id: &Id) -> anyhow::Result<()> {
            self.write_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(anyhow!("rejected"));
            }
            self.remote.lock().remove(product_id);
            Ok(())
        }
    }

    fn synchronizer() -> (Arc<MockFavoriteStore>, FavoritesSynchronizer<MockFavoriteStore>) {
        let store = Arc::new(MockFavoriteStore::default());
        let sync = FavoritesSynchronizer::new(store.clone());
        (store, sync)
    }

    #[tokio::test]
    async fn double_toggle_restores_original_state() {
        let (store, sync) = synchronizer();
        sync.load("user-1").await;

        assert!(sync.toggle("p1").await.unwrap());
        assert!(sync.is_favorited("p1"));
        assert!(!sync.toggle("p1").await.unwrap());
        assert!(!sync.is_favorited("p1"));
        assert!(store.remote.lock().is_empty());
    }

    #[tokio::test]
    async fn anonymous_toggle_is_rejected_without_network() {
        let (store, sync) = synchronizer();

        let err = sync.toggle("p1").await.unwrap_err();
        assert!(matches!(err, FavoriteError::Unauthenticated));
        assert_eq!(store.write_calls.load(Ordering::SeqCst), 0);
        assert!(!sync.is_favorited("p1"));
    }

    #[tokio::test]
    async fn rejected_toggle_rolls_back_the_optimistic_flip() {
        let (store, sync) = synchronizer();
        sync.load("user-1").await;
        store.fail_writes.store(true, Ordering::SeqCst);

        let err = sync.toggle("p1").await.unwrap_err();
        assert!(matches!(err, FavoriteError::OperationFailed(_)));
        assert!(!sync.is_favorited("p1"));
        assert!(store.remote.lock().is_empty());
    }

    #[tokio::test]
    async fn load_failure_fails_open_to_empty() {
        let (store, sync) = synchronizer();
        store.remote.lock().insert("p1".to_string());
        store.fail_reads.store(true, Ordering::SeqCst);

        let set = sync.load("user-1").await;
        assert_eq!(set.user_id, "user-1");
        assert!(set.is_empty());
        assert!(!sync.is_favorited("p1"));
    }

    #[tokio::test]
    async fn load_replaces_previous_session() {
        let (store, sync) = synchronizer();
        store.remote.lock().insert("p1".to_string());

        let set = sync.load("user-1").await;
        assert!(set.contains("p1"));

        // A different user's session must not inherit user-1's set.
        store.remote.lock().clear();
        let set = sync.load("user-2").await;
        assert!(set.is_empty());
        assert!(!sync.is_favorited("p1"));
    }

    #[tokio::test]
    async fn set_anonymous_clears_the_session() {
        let (store, sync) = synchronizer();
        store.remote.lock().insert("p1".to_string());
        sync.load("user-1").await;
        assert!(sync.is_favorited("p1"));

        sync.set_anonymous();
        assert!(sync.current_user().is_none());
        assert!(!sync.is_favorited("p1"));
        assert!(matches!(
            sync.toggle("p1").await.unwrap_err(),
            FavoriteError::Unauthenticated
        ));
    }

    #[tokio::test]
    async fn toggle_reports_resulting_membership() {
        let (_store, sync) = synchronizer();
        sync.load("user-1").await;
        assert!(sync.toggle("p9").await.unwrap());
        assert_eq!(sync.favorite_set().len(), 1);
    }
}
