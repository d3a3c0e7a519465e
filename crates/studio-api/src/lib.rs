//! 전략 스튜디오 모의 협력자 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API
//! - 키워드 기반 AI 파싱, 시나리오 백테스트, 분석 리포트 (모의)
//! - 보관된 전략 저장소 (`StrategyStore` 트레이트 + 메모리 구현)
//! - 헬스 체크 엔드포인트
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`mock`]: 모의 응답 생성
//! - [`repository`]: 전략 저장소

pub mod error;
pub mod mock;
pub mod repository;
pub mod routes;
pub mod state;

pub use error::{ApiErrorResponse, ApiResult};
pub use repository::{InMemoryStrategyStore, StoreError, StrategyStore};
pub use routes::*;
pub use state::AppState;

#[cfg(any(test, feature = "test-utils"))]
pub use state::create_test_state;
