//! 카탈로그 endpoint.
//!
//! - `GET /api/library` - 파라미터 라이브러리 (`?category=Trend` 필터 선택)
//! - `GET /api/markets` - 시장별 유효 섹터

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use studio_core::{CatalogEntry, MarketInfo, ParameterCategory, MARKETS};

use crate::error::{validation_error, ApiResult};
use crate::state::AppState;

/// 라이브러리 조회 쿼리.
#[derive(Debug, Deserialize)]
pub struct LibraryQuery {
    pub category: Option<String>,
}

/// 파라미터 라이브러리.
///
/// GET /api/library
pub async fn list_library(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LibraryQuery>,
) -> ApiResult<Json<Vec<CatalogEntry>>> {
    let entries = match query.category.as_deref() {
        None | Some("") => state.library.entries().to_vec(),
        Some(raw) => {
            let category: ParameterCategory = raw.parse().map_err(validation_error)?;
            state
                .library
                .by_category(category)
                .into_iter()
                .cloned()
                .collect()
        }
    };
    Ok(Json(entries))
}

/// 시장 카탈로그.
///
/// GET /api/markets
pub async fn list_markets() -> Json<Vec<MarketInfo>> {
    Json(MARKETS.to_vec())
}

/// 카탈로그 라우터 생성.
pub fn catalog_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/library", get(list_library))
        .route("/markets", get(list_markets))
}
