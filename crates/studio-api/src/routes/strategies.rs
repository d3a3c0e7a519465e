//! 보관된 전략 endpoint.
//!
//! # 엔드포인트
//!
//! - `GET /api/strategies` - 목록 조회 (최신순)
//! - `POST /api/strategies` - 저장
//! - `GET /api/strategies/{id}` - 단건 조회
//! - `DELETE /api/strategies/{id}` - 삭제

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use studio_core::{NewSavedStrategy, SavedStrategy};
use tracing::info;

use crate::error::{validation_error, ApiResult};
use crate::state::AppState;

/// 전략 목록.
///
/// GET /api/strategies
pub async fn list_strategies(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<SavedStrategy>>> {
    Ok(Json(state.store.list().await?))
}

/// 전략 저장.
///
/// POST /api/strategies
pub async fn create_strategy(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NewSavedStrategy>,
) -> ApiResult<(StatusCode, Json<SavedStrategy>)> {
    request
        .validate_name()
        .map_err(|e| validation_error(e.to_string()))?;

    let saved = state.store.create(request).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// 전략 단건 조회.
///
/// GET /api/strategies/{id}
pub async fn get_strategy(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<SavedStrategy>> {
    Ok(Json(state.store.get(&id).await?))
}

/// 전략 삭제.
///
/// DELETE /api/strategies/{id}
pub async fn delete_strategy(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.store.delete(&id).await?;
    info!(id = %id, "전략 삭제 요청 처리");
    Ok(StatusCode::NO_CONTENT)
}

/// 전략 라우터 생성.
pub fn strategies_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_strategies).post(create_strategy))
        .route("/{id}", get(get_strategy).delete(delete_strategy))
}
