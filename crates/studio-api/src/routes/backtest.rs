//! 백테스트 endpoint (모의).
//!
//! - `POST /api/backtest/run` - 설정을 받아 시나리오 결과 하나를 반환
//!
//! 결과는 제출된 파라미터와 관계없이 무작위 시나리오에서 고릅니다.

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use studio_core::{BacktestResult, Market, Parameter, Period};
use tracing::info;
use validator::Validate;

use crate::error::{from_validation, validation_error, ApiResult};
use crate::mock::pick_random;
use crate::state::AppState;

/// 백테스트 실행 요청 (전략 설정 전체).
#[derive(Debug, Deserialize, Validate)]
pub struct BacktestRunRequest {
    #[serde(default)]
    pub period: Period,
    #[serde(default)]
    pub market: Market,
    #[serde(default)]
    #[validate(length(min = 1, message = "전략 파라미터가 없습니다. AI로 먼저 생성해주세요."))]
    pub parameters: Vec<Parameter>,
}

/// 백테스트 실행.
///
/// POST /api/backtest/run
pub async fn run_backtest(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BacktestRunRequest>,
) -> ApiResult<Json<BacktestResult>> {
    request.validate().map_err(|e| from_validation(&e))?;
    request
        .period
        .validate()
        .map_err(|e| validation_error(e.to_string()))?;

    tokio::time::sleep(state.mock.backtest_latency()).await;

    let scenario = pick_random();
    info!(
        market = %request.market.market_type,
        parameters = request.parameters.len(),
        scenario = scenario.id,
        "백테스트 완료"
    );

    Ok(Json(scenario.to_result()))
}

/// 백테스트 라우터 생성.
pub fn backtest_router() -> Router<Arc<AppState>> {
    Router::new().route("/run", post(run_backtest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::create_test_state;
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use studio_core::fallback_config;
    use tower::ServiceExt;

    async fn run(body: Value) -> (StatusCode, Value) {
        let app = Router::new()
            .nest("/api/backtest", backtest_router())
            .with_state(Arc::new(create_test_state()));
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/backtest/run")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_run_returns_scenario_result() {
        let (status, body) = run(serde_json::to_value(fallback_config()).unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["stats"]["totalReturn"].is_number());
        assert_eq!(body["chartData"].as_array().unwrap().len(), 12);

        let result: BacktestResult = serde_json::from_value(body).unwrap();
        assert!(result.is_renderable());
    }

    #[tokio::test]
    async fn test_run_without_parameters_rejected() {
        let (status, body) = run(json!({
            "period": {"startDate": "2023-01-01", "endDate": "2023-12-31"},
            "market": {"type": "KOSPI", "sectors": []},
            "parameters": []
        }))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(
            body["message"],
            "전략 파라미터가 없습니다. AI로 먼저 생성해주세요."
        );
        assert_eq!(
            body["details"],
            json!({"parameters": ["전략 파라미터가 없습니다. AI로 먼저 생성해주세요."]})
        );
    }

    #[tokio::test]
    async fn test_run_accepts_empty_market() {
        let mut config = fallback_config();
        config.market = Market::default();
        let (status, _) = run(serde_json::to_value(config).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_run_rejects_inverted_period() {
        let mut config = fallback_config();
        config.period = Period::new("2024-01-01", "2023-01-01");
        let (status, body) = run(serde_json::to_value(config).unwrap()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }
}
