//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다.
//! 기본값 → 설정 파일(선택) → `STUDIO__` 접두사 환경 변수 순서로 덮어씁니다.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 모의 협력자 설정
    #[serde(default)]
    pub mock: MockConfig,
    /// 클라이언트 설정
    #[serde(default)]
    pub client: ClientConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 요청 타임아웃 (초)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ServerConfig {
    /// `host:port` 형식의 바인딩 주소.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// 모의 협력자 설정.
///
/// 모의 서버가 "생성 중..." 상태를 흉내 내기 위해 응답 전에 기다리는 시간입니다.
/// 0이면 지연 없이 바로 응답합니다.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MockConfig {
    /// AI 파싱 응답 지연 (밀리초)
    pub parse_latency_ms: u64,
    /// 백테스트 응답 지연 (밀리초)
    pub backtest_latency_ms: u64,
    /// 분석 응답 지연 (밀리초)
    pub analysis_latency_ms: u64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            parse_latency_ms: 1500,
            backtest_latency_ms: 2000,
            analysis_latency_ms: 1000,
        }
    }
}

impl MockConfig {
    /// 지연 없는 설정 (테스트용).
    pub fn instant() -> Self {
        Self {
            parse_latency_ms: 0,
            backtest_latency_ms: 0,
            analysis_latency_ms: 0,
        }
    }

    pub fn parse_latency(&self) -> Duration {
        Duration::from_millis(self.parse_latency_ms)
    }

    pub fn backtest_latency(&self) -> Duration {
        Duration::from_millis(self.backtest_latency_ms)
    }

    pub fn analysis_latency(&self) -> Duration {
        Duration::from_millis(self.analysis_latency_ms)
    }
}

/// 협력자 서버에 접속하는 클라이언트 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// 협력자 서버 기본 URL
    pub base_url: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.request_timeout_secs", 30)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            .set_default("mock.parse_latency_ms", 1500)?
            .set_default("mock.backtest_latency_ms", 2000)?
            .set_default("mock.analysis_latency_ms", 1000)?
            .set_default("client.base_url", "http://localhost:3000")?
            .set_default("client.timeout_secs", 30)?
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("STUDIO")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::load("config/default.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ports() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.client.base_url, "http://localhost:3000");
        assert_eq!(config.mock.parse_latency(), Duration::from_millis(1500));
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let config = AppConfig::load("does/not/exist.toml").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.mock.backtest_latency_ms, 2000);
    }

    #[test]
    fn test_instant_mock_has_no_latency() {
        let mock = MockConfig::instant();
        assert!(mock.parse_latency().is_zero());
        assert!(mock.backtest_latency().is_zero());
        assert!(mock.analysis_latency().is_zero());
    }
}
