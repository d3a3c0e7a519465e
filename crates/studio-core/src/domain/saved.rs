//! 보관된 전략 레코드.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{BacktestResult, StrategyConfig};
use crate::error::{StudioError, StudioResult};

/// 저장소가 소유하는 전략 레코드 (설정 + 결과 + 메타데이터).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedStrategy {
    /// 불투명 ID (서버 발급)
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub config: StrategyConfig,
    pub result: BacktestResult,
    pub created_at: DateTime<Utc>,
}

/// 저장 요청.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSavedStrategy {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub config: StrategyConfig,
    pub result: BacktestResult,
}

impl NewSavedStrategy {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        config: StrategyConfig,
        result: BacktestResult,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            config,
            result,
        }
    }

    /// 이름이 비어 있지 않은지 검증합니다.
    pub fn validate_name(&self) -> StudioResult<()> {
        if self.name.trim().is_empty() {
            return Err(StudioError::InvalidInput(
                "전략 이름을 입력해주세요.".to_string(),
            ));
        }
        Ok(())
    }

    /// 서버가 발급한 ID와 생성 시각으로 레코드를 만듭니다.
    pub fn into_saved(self, id: impl Into<String>, created_at: DateTime<Utc>) -> SavedStrategy {
        SavedStrategy {
            id: id.into(),
            name: self.name,
            description: self.description,
            config: self.config,
            result: self.result,
            created_at,
        }
    }
}
