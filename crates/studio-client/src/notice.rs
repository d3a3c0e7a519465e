//! 사용자 알림.
//!
//! 협력자 실패와 전제조건 위반은 예외가 아니라 알림으로 표시됩니다.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// 알림 수준.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// 사용자에게 보여줄 알림 한 건.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }
}

// 알림 문구
pub const PARSE_FALLBACK: &str = "서버 연결에 실패했습니다. 기본 전략으로 대체합니다.";
pub const PARSE_FAILED: &str = "전략 생성 중 오류가 발생했습니다.";
pub const PARSE_MALFORMED: &str = "AI 응답 형식이 올바르지 않습니다";
pub const BACKTEST_FAILED: &str = "백테스팅 실행 실패";
pub const NO_RESULT: &str = "백테스팅 결과가 없습니다.";
pub const ANALYSIS_FAILED: &str = "분석 요청 중 오류가 발생했습니다.";
pub const SAVE_FAILED: &str = "전략 저장 실패";
pub const SAVED: &str = "전략이 저장되었습니다.";
pub const ARCHIVE_FAILED: &str = "서버 오류";
pub const DELETE_FAILED: &str = "삭제 실패";
pub const NOT_IN_ARCHIVE: &str = "보관된 전략을 찾을 수 없습니다";
