//! 저장소 계층.
//!
//! 보관된 전략의 저장 로직을 라우트 핸들러에서 분리합니다.
//! 핸들러는 `StrategyStore` 트레이트에만 의존하고 구현은 `AppState`에 주입됩니다.

pub mod saved_strategies;

pub use saved_strategies::{InMemoryStrategyStore, StoreError, StoreResult, StrategyStore};
