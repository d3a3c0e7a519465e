//! 외부 협력자 계약.
//!
//! 워크벤치는 이 트레이트들에만 의존합니다. HTTP 구현은 `HttpCollaborator`이고,
//! 테스트는 메모리 구현을 주입합니다.

use async_trait::async_trait;
use serde_json::Value;
use studio_core::{BacktestResult, NewSavedStrategy, SavedStrategy, StrategyConfig};

use crate::error::ClientResult;

/// AI 파싱 협력자.
///
/// 응답은 검증 전의 원시 JSON입니다. 형식 검증은 워크벤치가 경계에서 수행합니다.
#[async_trait]
pub trait StrategyParser: Send + Sync {
    async fn parse(&self, prompt: &str) -> ClientResult<Value>;
}

/// 백테스트 협력자.
///
/// 결과가 제출한 파라미터를 반영한다는 보장은 없습니다.
#[async_trait]
pub trait BacktestRunner: Send + Sync {
    async fn run(&self, config: &StrategyConfig) -> ClientResult<BacktestResult>;
}

/// 분석 협력자. 응답은 그대로 표시하는 텍스트입니다.
#[async_trait]
pub trait StrategyAnalyst: Send + Sync {
    async fn analyze(&self, config: &StrategyConfig, result: &BacktestResult)
        -> ClientResult<String>;
}

/// 저장소 협력자.
#[async_trait]
pub trait StrategyArchive: Send + Sync {
    async fn create(&self, request: &NewSavedStrategy) -> ClientResult<SavedStrategy>;

    async fn list(&self) -> ClientResult<Vec<SavedStrategy>>;

    async fn delete(&self, id: &str) -> ClientResult<()>;
}

/// 네 협력자를 모두 구현한 타입.
pub trait Collaborators: StrategyParser + BacktestRunner + StrategyAnalyst + StrategyArchive {}

impl<T> Collaborators for T where T: StrategyParser + BacktestRunner + StrategyAnalyst + StrategyArchive
{}
