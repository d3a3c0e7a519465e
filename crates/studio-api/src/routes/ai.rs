//! AI 협력자 endpoint (모의).
//!
//! # 엔드포인트
//!
//! - `POST /api/ai/parse` - 자연어 프롬프트를 후보 설정으로 변환
//! - `POST /api/ai/analyze` - 설정과 결과에 대한 분석 리포트

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use studio_core::{BacktestResult, CandidateConfig, StrategyConfig};
use tracing::info;
use validator::{Validate, ValidationError};

use crate::error::{from_validation, ApiResult};
use crate::mock::{analysis_report, parse_prompt};
use crate::state::AppState;

fn validate_prompt(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("prompt_blank")
            .with_message("프롬프트를 입력해주세요".into()));
    }
    Ok(())
}

/// 파싱 요청.
#[derive(Debug, Deserialize, Validate)]
pub struct ParseRequest {
    #[validate(custom(function = "validate_prompt"))]
    pub prompt: String,
}

/// 분석 요청.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub config: StrategyConfig,
    pub result: BacktestResult,
}

/// 분석 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub analysis: String,
}

/// 프롬프트 파싱.
///
/// POST /api/ai/parse
pub async fn parse_strategy(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ParseRequest>,
) -> ApiResult<Json<CandidateConfig>> {
    request.validate().map_err(|e| from_validation(&e))?;
    info!(prompt = %request.prompt, "AI 파싱 요청");

    tokio::time::sleep(state.mock.parse_latency()).await;

    let today = chrono::Utc::now().date_naive();
    Ok(Json(parse_prompt(&request.prompt, &state.library, today)))
}

/// 분석 리포트.
///
/// POST /api/ai/analyze
pub async fn analyze_strategy(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> ApiResult<Json<AnalyzeResponse>> {
    info!(
        market = %request.config.market.market_type,
        parameters = request.config.parameters.len(),
        "AI 분석 요청"
    );

    tokio::time::sleep(state.mock.analysis_latency()).await;

    Ok(Json(AnalyzeResponse {
        analysis: analysis_report(&request.config, &request.result),
    }))
}

/// AI 라우터 생성.
pub fn ai_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/parse", post(parse_strategy))
        .route("/analyze", post(analyze_strategy))
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

    fn app() -> Router {
        Router::new()
            .nest("/api/ai", ai_router())
            .with_state(Arc::new(create_test_state()))
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri(uri)
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
    async fn test_parse_returns_candidate() {
        let (status, body) = post_json(
            app(),
            "/api/ai/parse",
            json!({"prompt": "코스닥 RSI 25 이하 매수"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["market"]["type"], "KOSDAQ");
        assert_eq!(body["parameters"][0]["id"], "rsi_buy");
        assert_eq!(body["parameters"][0]["value"], 25.0);
        assert!(body.get("period").is_none());

        let candidate = CandidateConfig::from_json(&body).unwrap();
        assert_eq!(candidate.parameters.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_parse_blank_prompt_rejected() {
        let (status, body) = post_json(app(), "/api/ai/parse", json!({"prompt": "   "})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["message"], "프롬프트를 입력해주세요");
    }

    #[tokio::test]
    async fn test_analyze_returns_markdown() {
        let result = crate::mock::SCENARIOS[3].to_result();
        let (status, body) = post_json(
            app(),
            "/api/ai/analyze",
            json!({"config": fallback_config(), "result": result}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let analysis = body["analysis"].as_str().unwrap();
        assert!(analysis.starts_with("## 전략 분석 리포트"));
        assert!(analysis.contains("**경고**"));
    }
}
