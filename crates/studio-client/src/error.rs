//! 협력자 호출 에러.

use thiserror::Error;

/// 협력자(파싱/백테스트/분석/저장소) 호출 에러.
#[derive(Debug, Error)]
pub enum ClientError {
    /// 연결 실패, 타임아웃 등
    #[error("네트워크 에러: {0}")]
    Transport(String),

    /// 2xx가 아닌 응답
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// 응답 본문을 해석할 수 없음
    #[error("응답 디코딩 실패: {0}")]
    Decode(String),
}

/// 클라이언트 작업을 위한 Result 타입.
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// 파싱 실패 시 고정 설정으로 대체해야 하는지.
    ///
    /// 전송 실패와 해석할 수 없는 본문은 대체 대상이고, 서버가 보낸 에러 응답은 아닙니다.
    pub fn substitutes_fallback(&self) -> bool {
        matches!(self, ClientError::Transport(_) | ClientError::Decode(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}
