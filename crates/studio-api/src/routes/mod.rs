//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `/api/ai` - AI 파싱/분석 (모의)
//! - `/api/backtest` - 백테스트 실행 (모의)
//! - `/api/strategies` - 보관된 전략
//! - `/api/library`, `/api/markets` - 카탈로그

pub mod ai;
pub mod backtest;
pub mod catalog;
pub mod health;
pub mod strategies;

pub use ai::{ai_router, AnalyzeRequest, AnalyzeResponse, ParseRequest};
pub use backtest::{backtest_router, BacktestRunRequest};
pub use catalog::{catalog_router, LibraryQuery};
pub use health::{health_router, ComponentHealth, ComponentStatus, HealthResponse};
pub use strategies::strategies_router;

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// 전체 API 라우터 생성.
///
/// 모든 서브 라우터를 조합하여 하나의 라우터로 반환합니다.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        // 헬스 체크 엔드포인트
        .nest("/health", health_router())
        .nest("/api/ai", ai_router())
        .nest("/api/backtest", backtest_router())
        .nest("/api/strategies", strategies_router())
        .nest("/api", catalog_router())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::create_test_state;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_router_mounts_all_sections() {
        let app = create_api_router().with_state(Arc::new(create_test_state()));

        for uri in [
            "/health",
            "/health/ready",
            "/api/strategies",
            "/api/library",
            "/api/markets",
        ] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        }

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/unknown")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
