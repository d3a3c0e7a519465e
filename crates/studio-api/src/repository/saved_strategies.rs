//! 보관된 전략 저장소.

use async_trait::async_trait;
use chrono::Utc;
use studio_core::{NewSavedStrategy, SavedStrategy};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// 저장소 에러.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("전략을 찾을 수 없습니다: {0}")]
    NotFound(String),

    #[error("잘못된 저장 요청: {0}")]
    Invalid(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// 보관된 전략 저장소 계약.
#[async_trait]
pub trait StrategyStore: Send + Sync {
    /// 새 레코드를 저장하고 ID와 생성 시각이 채워진 레코드를 반환합니다.
    async fn create(&self, request: NewSavedStrategy) -> StoreResult<SavedStrategy>;

    /// 최신순 목록.
    async fn list(&self) -> StoreResult<Vec<SavedStrategy>>;

    async fn get(&self, id: &str) -> StoreResult<SavedStrategy>;

    /// 정확히 해당 ID의 레코드 하나만 삭제합니다.
    async fn delete(&self, id: &str) -> StoreResult<()>;
}

/// 프로세스 메모리 저장소.
///
/// 레코드는 생성 순서로 쌓이고, 목록은 역순(최신순)으로 돌려줍니다.
#[derive(Debug, Default)]
pub struct InMemoryStrategyStore {
    records: RwLock<Vec<SavedStrategy>>,
}

impl InMemoryStrategyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl StrategyStore for InMemoryStrategyStore {
    async fn create(&self, request: NewSavedStrategy) -> StoreResult<SavedStrategy> {
        request
            .validate_name()
            .map_err(|e| StoreError::Invalid(e.to_string()))?;

        let record = request.into_saved(Uuid::new_v4().to_string(), Utc::now());
        self.records.write().await.push(record.clone());

        info!(id = %record.id, name = %record.name, "전략 저장");
        Ok(record)
    }

    async fn list(&self) -> StoreResult<Vec<SavedStrategy>> {
        let records = self.records.read().await;
        Ok(records.iter().rev().cloned().collect())
    }

    async fn get(&self, id: &str) -> StoreResult<SavedStrategy> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut records = self.records.write().await;
        let position = records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        records.remove(position);

        debug!(id, remaining = records.len(), "전략 삭제");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_core::{fallback_config, BacktestResult, BacktestStats, SeriesPoint};

    fn request(name: &str) -> NewSavedStrategy {
        NewSavedStrategy::new(
            name,
            "",
            fallback_config(),
            BacktestResult::new(
                BacktestStats::new(15.4, 65.2, -12.5),
                vec![SeriesPoint::new("01-01", 100.0)],
            ),
        )
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamp() {
        let store = InMemoryStrategyStore::new();
        let first = store.create(request("첫 전략")).await.unwrap();
        let second = store.create(request("둘째 전략")).await.unwrap();

        assert_ne!(first.id, second.id);
        assert!(Uuid::parse_str(&first.id).is_ok());
        assert!(second.created_at >= first.created_at);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let store = InMemoryStrategyStore::new();
        let err = store.create(request("   ")).await.unwrap_err();
        assert!(matches!(err, StoreError::Invalid(_)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let store = InMemoryStrategyStore::new();
        for name in ["a", "b", "c"] {
            store.create(request(name)).await.unwrap();
        }
        let names: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        let store = InMemoryStrategyStore::new();
        let mut ids = Vec::new();
        for name in ["a", "b", "c", "d"] {
            ids.push(store.create(request(name)).await.unwrap().id);
        }

        store.delete(&ids[1]).await.unwrap();

        let remaining: Vec<String> = store.list().await.unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(remaining.len(), 3);
        assert!(!remaining.contains(&ids[1]));
        for id in [&ids[0], &ids[2], &ids[3]] {
            assert!(remaining.contains(id));
        }
    }

    #[tokio::test]
    async fn test_get_and_delete_unknown() {
        let store = InMemoryStrategyStore::new();
        let saved = store.create(request("a")).await.unwrap();
        assert_eq!(store.get(&saved.id).await.unwrap().name, "a");

        assert!(matches!(
            store.get("missing").await.unwrap_err(),
            StoreError::NotFound(_)
        ));
        assert!(matches!(
            store.delete("missing").await.unwrap_err(),
            StoreError::NotFound(_)
        ));
        assert_eq!(store.len().await, 1);
    }
}
