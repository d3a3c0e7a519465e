//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! Arc로 래핑되어 여러 요청 간에 안전하게 공유됩니다.

use std::sync::Arc;

use studio_core::{MockConfig, ParameterLibrary};

use crate::repository::{InMemoryStrategyStore, StrategyStore};

/// 애플리케이션 공유 상태.
///
/// Axum의 State extractor를 통해 핸들러에 주입됩니다.
#[derive(Clone)]
pub struct AppState {
    /// 보관된 전략 저장소
    pub store: Arc<dyn StrategyStore>,

    /// 모의 응답 지연 설정
    pub mock: MockConfig,

    /// 파라미터 라이브러리 (모의 파서와 카탈로그 엔드포인트가 공유)
    pub library: ParameterLibrary,

    /// 서버 시작 시간
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 주어진 저장소로 상태를 생성합니다.
    pub fn new(store: Arc<dyn StrategyStore>, mock: MockConfig) -> Self {
        Self {
            store,
            mock,
            library: ParameterLibrary::builtin(),
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 메모리 저장소를 사용하는 상태.
    pub fn in_memory(mock: MockConfig) -> Self {
        Self::new(Arc::new(InMemoryStrategyStore::new()), mock)
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> i64 {
        chrono::Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds()
    }
}

/// 테스트용 상태 (지연 없음, 빈 메모리 저장소).
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    AppState::in_memory(MockConfig::instant())
}
