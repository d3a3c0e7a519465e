//! 전략 스튜디오의 에러 타입.
//!
//! 이 모듈은 설정 초안 편집, 후보 페이로드 디코딩, 결과 처리 전반에서
//! 사용되는 에러 타입을 정의합니다. 어떤 에러도 프로세스에 치명적이지 않으며,
//! 최악의 경우는 변경되지 않은 초안과 사용자 알림입니다.

use thiserror::Error;

/// 핵심 스튜디오 에러.
#[derive(Debug, Error)]
pub enum StudioError {
    /// 후보 페이로드 형식 오류 (필수 필드 누락 등)
    #[error("잘못된 페이로드: {0}")]
    InvalidPayload(String),

    /// 파라미터가 없는 상태에서 백테스트 요청
    #[error("전략 파라미터가 없습니다. AI로 먼저 생성해주세요.")]
    EmptyParameters,

    /// 존재하지 않는 행 키로 편집/삭제 요청
    #[error("파라미터를 찾을 수 없음: {0}")]
    UnknownParameter(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 찾을 수 없음
    #[error("찾을 수 없음: {0}")]
    NotFound(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),
}

/// 스튜디오 작업을 위한 Result 타입.
pub type StudioResult<T> = Result<T, StudioError>;

impl StudioError {
    /// 사용자에게 알림으로 보여줄 에러인지 확인합니다.
    ///
    /// 직렬화/설정 에러는 내부 문제이므로 로그로만 남깁니다.
    pub fn is_user_facing(&self) -> bool {
        !matches!(
            self,
            StudioError::Serialization(_) | StudioError::Config(_)
        )
    }

    /// 전송 전에 거부된 전제조건 위반인지 확인합니다.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            StudioError::EmptyParameters | StudioError::InvalidInput(_)
        )
    }
}

impl From<serde_json::Error> for StudioError {
    fn from(err: serde_json::Error) -> Self {
        StudioError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for StudioError {
    fn from(err: config::ConfigError) -> Self {
        StudioError::Config(err.to_string())
    }
}
