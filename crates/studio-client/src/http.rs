//! reqwest 기반 협력자 구현.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use studio_core::{BacktestResult, ClientConfig, NewSavedStrategy, SavedStrategy, StrategyConfig};
use tracing::{debug, warn};

use crate::collaborator::{BacktestRunner, StrategyAnalyst, StrategyArchive, StrategyParser};
use crate::error::{ClientError, ClientResult};

#[derive(Debug, Deserialize)]
struct AnalysisResponse {
    analysis: String,
}

/// 협력자 서버 HTTP 클라이언트.
///
/// 엔드포인트:
/// - `POST /api/ai/parse`
/// - `POST /api/backtest/run`
/// - `POST /api/ai/analyze`
/// - `GET|POST /api/strategies`, `DELETE /api/strategies/{id}`
#[derive(Debug, Clone)]
pub struct HttpCollaborator {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCollaborator {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 2xx가 아니면 `ClientError::Status`로 변환합니다.
    ///
    /// 에러 본문이 `{message}` 형식이면 그 메시지를, 아니면 본문 전체를 사용합니다.
    async fn ensure_success(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
            .unwrap_or(body);

        warn!(status = status.as_u16(), %message, "collaborator returned error status");
        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl StrategyParser for HttpCollaborator {
    async fn parse(&self, prompt: &str) -> ClientResult<Value> {
        debug!(prompt_len = prompt.len(), "AI 파싱 요청");
        let response = self
            .client
            .post(self.url("/api/ai/parse"))
            .json(&json!({ "prompt": prompt }))
            .send()
            .await?;
        let body = Self::ensure_success(response).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl BacktestRunner for HttpCollaborator {
    async fn run(&self, config: &StrategyConfig) -> ClientResult<BacktestResult> {
        debug!(parameters = config.parameters.len(), "백테스트 요청");
        let response = self
            .client
            .post(self.url("/api/backtest/run"))
            .json(config)
            .send()
            .await?;
        let body = Self::ensure_success(response).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl StrategyAnalyst for HttpCollaborator {
    async fn analyze(
        &self,
        config: &StrategyConfig,
        result: &BacktestResult,
    ) -> ClientResult<String> {
        let response = self
            .client
            .post(self.url("/api/ai/analyze"))
            .json(&json!({ "config": config, "result": result }))
            .send()
            .await?;
        let body = Self::ensure_success(response).await?.text().await?;
        let parsed: AnalysisResponse = serde_json::from_str(&body)?;
        Ok(parsed.analysis)
    }
}

#[async_trait]
impl StrategyArchive for HttpCollaborator {
    async fn create(&self, request: &NewSavedStrategy) -> ClientResult<SavedStrategy> {
        let response = self
            .client
            .post(self.url("/api/strategies"))
            .json(request)
            .send()
            .await?;
        let body = Self::ensure_success(response).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn list(&self) -> ClientResult<Vec<SavedStrategy>> {
        let response = self.client.get(self.url("/api/strategies")).send().await?;
        let body = Self::ensure_success(response).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/api/strategies/{}", id)))
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use studio_core::{fallback_config, BacktestStats, SeriesPoint};

    fn collaborator(server: &mockito::ServerGuard) -> HttpCollaborator {
        HttpCollaborator::new(&ClientConfig::new(format!("{}/", server.url()))).unwrap()
    }

    #[tokio::test]
    async fn test_parse_returns_raw_json() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/ai/parse")
            .match_body(Matcher::PartialJson(json!({"prompt": "RSI 30 이하 매수"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"market":{"type":"KOSDAQ","sectors":["AI/로봇"]}}"#)
            .create_async()
            .await;

        let value = collaborator(&server).parse("RSI 30 이하 매수").await.unwrap();
        assert_eq!(value["market"]["type"], "KOSDAQ");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_parse_undecodable_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/ai/parse")
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let err = collaborator(&server).parse("x").await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
        assert!(err.substitutes_fallback());
    }

    #[tokio::test]
    async fn test_error_status_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/backtest/run")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"code":"VALIDATION_ERROR","message":"파라미터가 없습니다"}"#)
            .create_async()
            .await;

        let err = collaborator(&server)
            .run(&fallback_config())
            .await
            .unwrap_err();
        match err {
            ClientError::Status { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "파라미터가 없습니다");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_run_decodes_chart_data() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/backtest/run")
            .with_status(200)
            .with_body(
                r#"{"stats":{"totalReturn":6.5,"winRate":90.0,"mdd":-1.5},
                    "chartData":[{"date":"01-01","value":100},{"date":"02-01","value":100.5}]}"#,
            )
            .create_async()
            .await;

        let result = collaborator(&server).run(&fallback_config()).await.unwrap();
        assert_eq!(result.stats.win_rate, 90.0);
        assert_eq!(result.series[1].value, 100.5);
    }

    #[tokio::test]
    async fn test_analyze_and_delete() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/ai/analyze")
            .with_status(200)
            .with_body(r#"{"analysis":"1. 거시 경제 점검"}"#)
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", "/api/strategies/abc")
            .with_status(204)
            .create_async()
            .await;

        let client = collaborator(&server);
        let result = BacktestResult::new(
            BacktestStats::new(1.0, 50.0, -2.0),
            vec![SeriesPoint::new("01-01", 100.0)],
        );
        let text = client.analyze(&fallback_config(), &result).await.unwrap();
        assert_eq!(text, "1. 거시 경제 점검");

        client.delete("abc").await.unwrap();
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let config = ClientConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
        };
        let err = HttpCollaborator::new(&config)
            .unwrap()
            .list()
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }
}
