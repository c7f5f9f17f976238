//! # In-Memory Provider Repository
//!
//! In-memory implementation of [`ProviderRepository`].
//!
//! Providers are held in insertion order, which is the tie-break order of
//! the ranking engine. The store can be seeded from a JSON array of
//! provider records.

use crate::domain::entities::provider::Provider;
use crate::infrastructure::persistence::traits::{
    ProviderRepository, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`ProviderRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryProviderRepository {
    storage: Arc<RwLock<Vec<Provider>>>,
}

impl InMemoryProviderRepository {
    /// Creates a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository holding `providers` in the given order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Duplicate` if two providers share a code.
    pub fn from_providers(providers: Vec<Provider>) -> RepositoryResult<Self> {
        let mut seen = HashSet::with_capacity(providers.len());
        for p in &providers {
            if !seen.insert(p.code()) {
                return Err(RepositoryError::duplicate(p.code()));
            }
        }
        Ok(Self {
            storage: Arc::new(RwLock::new(providers)),
        })
    }

    /// Creates a repository from a JSON array of provider records.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Serialization` if the JSON is malformed or
    /// a record fails validation, and `RepositoryError::Duplicate` if two
    /// records share a code.
    pub fn from_json(json: &str) -> RepositoryResult<Self> {
        let providers: Vec<Provider> = serde_json::from_str(json)
            .map_err(|e| RepositoryError::serialization(e.to_string()))?;
        Self::from_providers(providers)
    }

    /// Returns the number of providers in the repository.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage
            .try_read()
            .map(|guard| guard.len())
            .unwrap_or(0)
    }

    /// Returns true if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears all providers from the repository.
    pub async fn clear(&self) {
        let mut storage = self.storage.write().await;
        storage.clear();
    }
}

#[async_trait]
impl ProviderRepository for InMemoryProviderRepository {
    async fn save(&self, provider: &Provider) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        match storage.iter_mut().find(|p| p.code() == provider.code()) {
            Some(existing) => *existing = provider.clone(),
            None => storage.push(provider.clone()),
        }
        Ok(())
    }

    async fn get_by_code(&self, code: &str) -> RepositoryResult<Option<Provider>> {
        let storage = self.storage.read().await;
        Ok(storage.iter().find(|p| p.code() == code).cloned())
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Provider>> {
        let storage = self.storage.read().await;
        Ok(storage.clone())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let storage = self.storage.read().await;
        Ok(storage.len() as u64)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::entities::provider::{ProviderId, QualityMetrics};

    fn provider(id: u64, code: &str) -> Provider {
        Provider::new(ProviderId::new(id), code, code, "US")
    }

    #[tokio::test]
    async fn new_repository_is_empty() {
        let repo = InMemoryProviderRepository::new();
        assert!(repo.is_empty());
        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_and_get_by_code() {
        let repo = InMemoryProviderRepository::new();
        repo.save(&provider(1, "WISE")).await.unwrap();

        let found = repo.get_by_code("WISE").await.unwrap();
        assert_eq!(found.unwrap().id(), ProviderId::new(1));
        assert!(repo.get_by_code("NOPE").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_all_keeps_insertion_order() {
        let repo = InMemoryProviderRepository::new();
        for (i, code) in ["C", "A", "B"].iter().enumerate() {
            repo.save(&provider(i as u64, code)).await.unwrap();
        }
        let codes: Vec<String> = repo
            .list_all()
            .await
            .unwrap()
            .iter()
            .map(|p| p.code().to_string())
            .collect();
        assert_eq!(codes, vec!["C", "A", "B"]);
    }

    #[tokio::test]
    async fn save_replaces_in_place() {
        let repo = InMemoryProviderRepository::new();
        repo.save(&provider(1, "A")).await.unwrap();
        repo.save(&provider(2, "B")).await.unwrap();
        repo.save(&provider(1, "A").with_metrics(QualityMetrics::uniform(99.0)))
            .await
            .unwrap();

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].code(), "A");
        assert!((all[0].metrics().trust - 99.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn from_json_seeds_store() {
        let json = r#"[
            {"id": 1, "code": "WISE", "name": "Wise", "country": "GB",
             "fee_rules": [{"kind": "fixed", "amount": "4.14"}]},
            {"id": 2, "code": "WU", "name": "Western Union", "country": "US",
             "fee_rules": [{"kind": "fx_margin", "rate": "0.012"}]}
        ]"#;
        let repo = InMemoryProviderRepository::from_json(json).unwrap();
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.list_all().await.unwrap()[1].code(), "WU");
    }

    #[test]
    fn from_json_rejects_malformed_input() {
        let err = InMemoryProviderRepository::from_json("{not json").unwrap_err();
        assert!(matches!(err, RepositoryError::Serialization(_)));
    }

    #[test]
    fn from_json_rejects_invalid_fee_rule() {
        let json = r#"[{"id": 1, "code": "X", "name": "X", "country": "US",
                        "fee_rules": [{"kind": "fx_margin", "rate": "1.5"}]}]"#;
        assert!(InMemoryProviderRepository::from_json(json).is_err());
    }

    #[test]
    fn duplicate_codes_rejected() {
        let err =
            InMemoryProviderRepository::from_providers(vec![provider(1, "A"), provider(2, "A")])
                .unwrap_err();
        assert!(err.is_duplicate());
    }

    #[tokio::test]
    async fn clear() {
        let repo =
            InMemoryProviderRepository::from_providers(vec![provider(1, "A"), provider(2, "B")])
                .unwrap();
        assert_eq!(repo.count().await.unwrap(), 2);
        repo.clear().await;
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
