//! Server-side credential storage
//!
//! The primary request flow is stateless (the browser carries its token), so
//! this store is only written on login/refresh and cleared on logout.
//! Expired credentials are pruned on every write, and redeeming a refresh
//! token retires the credential it was issued with.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::models::Credential;

/// Keyed credential storage that can be swapped for a test double or an
/// external store.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<Credential>;

    /// Insert or replace the credential stored under `key`
    async fn set(&self, key: &str, credential: Credential);

    /// Remove and return the credential stored under `key`
    async fn remove(&self, key: &str) -> Option<Credential>;

    /// Drop every credential issued with `refresh_token`, returning how many
    async fn retire_refresh_token(&self, refresh_token: &str) -> usize;
}

/// Process-local token store guarded by a single lock
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    tokens: RwLock<HashMap<String, Credential>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tokens.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.read().is_empty()
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn get(&self, key: &str) -> Option<Credential> {
        self.tokens.read().get(key).cloned()
    }

    async fn set(&self, key: &str, credential: Credential) {
        let stored = {
            let mut tokens = self.tokens.write();
            let now = Utc::now();
            tokens.retain(|_, c| !c.is_expired_at(now));
            tokens.insert(key.to_string(), credential);
            tokens.len()
        };
        tracing::debug!(stored, "Credential stored");
    }

    async fn remove(&self, key: &str) -> Option<Credential> {
        self.tokens.write().remove(key)
    }

    async fn retire_refresh_token(&self, refresh_token: &str) -> usize {
        let mut tokens = self.tokens.write();
        let before = tokens.len();
        tokens.retain(|_, c| c.refresh_token.as_deref() != Some(refresh_token));
        before - tokens.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::LoginResponse;

    #[tokio::test]
    async fn set_get_remove() {
        let store = InMemoryTokenStore::new();
        assert!(store.get("alice").await.is_none());

        store.set("alice", Credential::bearer("T1")).await;
        assert_eq!(store.get("alice").await.unwrap().access_token, "T1");

        let removed = store.remove("alice").await;
        assert_eq!(removed.unwrap().access_token, "T1");
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn set_replaces_existing_credential() {
        let store = InMemoryTokenStore::new();
        store.set("alice", Credential::bearer("T1")).await;
        store.set("alice", Credential::bearer("T2")).await;

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("alice").await.unwrap().access_token, "T2");
    }

    fn issued(access: &str, refresh: &str, expires_in: i64) -> Credential {
        Credential::issued(
            LoginResponse {
                access_token: access.to_string(),
                refresh_token: Some(refresh.to_string()),
                expires_in,
                token_type: "Bearer".to_string(),
            },
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn set_prunes_expired_credentials() {
        let store = InMemoryTokenStore::new();
        // Inside the expiry skew, so already expired
        store.set("stale", issued("T0", "R0", 60)).await;
        store.set("fresh", issued("T1", "R1", 3600)).await;

        assert_eq!(store.len(), 1);
        assert!(store.get("stale").await.is_none());
        assert!(store.get("fresh").await.is_some());
    }

    #[tokio::test]
    async fn retire_refresh_token_drops_matching_credentials() {
        let store = InMemoryTokenStore::new();
        store.set("T1", issued("T1", "R1", 3600)).await;
        store.set("T2", issued("T2", "R2", 3600)).await;
        store.set("bare", Credential::bearer("T3")).await;

        assert_eq!(store.retire_refresh_token("R1").await, 1);
        assert_eq!(store.retire_refresh_token("R1").await, 0);
        assert!(store.get("T1").await.is_none());
        assert_eq!(store.len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_writers() {
        let store: Arc<dyn TokenStore> = Arc::new(InMemoryTokenStore::new());

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .set(&format!("user-{i}"), Credential::bearer(format!("T{i}")))
                        .await;
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        for i in 0..32 {
            let credential = store.get(&format!("user-{i}")).await.unwrap();
            assert_eq!(credential.access_token, format!("T{i}"));
        }
    }
}
