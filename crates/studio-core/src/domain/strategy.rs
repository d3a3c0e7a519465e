//! 전략 설정 초안과 후보 페이로드.
//!
//! - `Period` - 백테스트 기간
//! - `Market` - 대상 시장과 섹터
//! - `StrategyConfig` - 편집 중인 전체 설정
//! - `CandidateConfig` - AI 파싱 협력자가 보낸 (부분) 설정
//!
//! 후보 페이로드는 `CandidateConfig::from_json`에서 형식을 검증한 뒤에만
//! 조정(reconcile) 단계로 넘어갑니다.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Parameter, ParameterCategory};
use crate::error::{StudioError, StudioResult};

/// ISO 날짜 형식.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 백테스트 기간.
///
/// 입력 대기 중에는 빈 문자열일 수 있습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

impl Period {
    /// 기간 프리셋 (개월).
    pub const PRESET_MONTHS: [u32; 5] = [1, 3, 6, 12, 36];

    pub fn new(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }

    /// `today`로부터 `months`개월 전까지의 기간.
    pub fn last_months(today: NaiveDate, months: u32) -> Self {
        let start = today
            .checked_sub_months(Months::new(months))
            .unwrap_or(today);
        Self {
            start_date: start.format(DATE_FORMAT).to_string(),
            end_date: today.format(DATE_FORMAT).to_string(),
        }
    }

    /// 프리셋 버튼 라벨 (12개월 이상은 년 단위).
    pub fn preset_label(months: u32) -> String {
        if months >= 12 {
            format!("{}년", months / 12)
        } else {
            format!("{}개월", months)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start_date.is_empty() && self.end_date.is_empty()
    }

    /// 기간 형식을 검증합니다.
    ///
    /// 빈 값은 허용하고, 값이 있으면 `YYYY-MM-DD` 형식이어야 하며
    /// 둘 다 있으면 시작일이 종료일보다 늦을 수 없습니다.
    pub fn validate(&self) -> StudioResult<()> {
        let start = parse_optional_date("startDate", &self.start_date)?;
        let end = parse_optional_date("endDate", &self.end_date)?;

        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(StudioError::InvalidInput(format!(
                    "시작일({})이 종료일({})보다 늦습니다",
                    start, end
                )));
            }
        }
        Ok(())
    }
}

fn parse_optional_date(field: &str, raw: &str) -> StudioResult<Option<NaiveDate>> {
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(Some)
        .map_err(|e| StudioError::InvalidInput(format!("{} 날짜 형식 오류 ({}): {}", field, raw, e)))
}

/// 대상 시장과 섹터.
///
/// 섹터는 삽입 순서를 유지하는 집합이며, 시장에 상대적인 의미만 가집니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    #[serde(rename = "type", default)]
    pub market_type: String,
    #[serde(default)]
    pub sectors: Vec<String>,
}

impl Market {
    pub fn new<S: Into<String>>(market_type: impl Into<String>, sectors: impl IntoIterator<Item = S>) -> Self {
        let mut market = Self {
            market_type: market_type.into(),
            sectors: sectors.into_iter().map(Into::into).collect(),
        };
        market.dedup_sectors();
        market
    }

    /// 시장 유형을 변경합니다.
    ///
    /// 유형이 바뀌면 섹터를 비웁니다. 같은 유형을 다시 선택하면 아무것도 하지 않고
    /// `false`를 반환합니다.
    pub fn set_type(&mut self, market_type: impl Into<String>) -> bool {
        let market_type = market_type.into();
        if market_type == self.market_type {
            return false;
        }
        self.market_type = market_type;
        self.sectors.clear();
        true
    }

    /// 섹터를 추가하거나 제거합니다. 추가되었으면 `true`.
    pub fn toggle_sector(&mut self, sector: impl Into<String>) -> bool {
        let sector = sector.into();
        if let Some(pos) = self.sectors.iter().position(|s| *s == sector) {
            self.sectors.remove(pos);
            false
        } else {
            self.sectors.push(sector);
            true
        }
    }

    pub fn has_sector(&self, sector: &str) -> bool {
        self.sectors.iter().any(|s| s == sector)
    }

    /// 중복 섹터를 제거합니다 (처음 나온 순서 유지).
    pub fn dedup_sectors(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.sectors.retain(|s| seen.insert(s.clone()));
    }
}

/// 편집 중인 전략 설정.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    #[serde(default)]
    pub period: Period,
    #[serde(default)]
    pub market: Market,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl StrategyConfig {
    pub fn new(period: Period, market: Market, parameters: Vec<Parameter>) -> Self {
        Self {
            period,
            market,
            parameters,
        }
    }
}

/// AI 파싱 협력자가 보낸 후보 설정.
///
/// 모든 최상위 필드는 선택적이며, 존재하는 필드만 현재 설정을 통째로 대체합니다.
///
/// 직렬화 시 비어 있는 필드는 생략됩니다 (협력자 응답 형식).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CandidateConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market: Option<Market>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<Parameter>>,
}

impl CandidateConfig {
    /// 아무 필드도 없는 후보.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.period.is_none() && self.market.is_none() && self.parameters.is_none()
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    pub fn with_market(mut self, market: Market) -> Self {
        self.market = Some(market);
        self
    }

    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = Some(parameters);
        self
    }

    /// 경계에서 JSON 페이로드를 검증하고 디코딩합니다.
    ///
    /// `null` 필드는 없는 것으로 취급합니다. 파라미터는 각각 `id`, `category`,
    /// `label`, `value`가 필요하며, 누락 시 위치와 필드명을 담은
    /// `StudioError::InvalidPayload`를 반환합니다.
    pub fn from_json(payload: &Value) -> StudioResult<Self> {
        let object = payload.as_object().ok_or_else(|| {
            StudioError::InvalidPayload("후보 설정은 JSON 객체여야 합니다".to_string())
        })?;

        let period = match object.get("period") {
            None | Some(Value::Null) => None,
            Some(v) => Some(
                serde_json::from_value::<Period>(v.clone())
                    .map_err(|e| StudioError::InvalidPayload(format!("period: {}", e)))?,
            ),
        };

        let market = match object.get("market") {
            None | Some(Value::Null) => None,
            Some(v) => Some(
                serde_json::from_value::<Market>(v.clone())
                    .map_err(|e| StudioError::InvalidPayload(format!("market: {}", e)))?,
            ),
        };

        let parameters = match object.get("parameters") {
            None | Some(Value::Null) => None,
            Some(Value::Array(items)) => Some(
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| decode_parameter(index, item))
                    .collect::<StudioResult<Vec<_>>>()?,
            ),
            Some(_) => {
                return Err(StudioError::InvalidPayload(
                    "parameters는 배열이어야 합니다".to_string(),
                ))
            }
        };

        Ok(Self {
            period,
            market,
            parameters,
        })
    }
}

const REQUIRED_PARAMETER_FIELDS: [&str; 4] = ["id", "category", "label", "value"];

fn decode_parameter(index: usize, item: &Value) -> StudioResult<Parameter> {
    let object = item.as_object().ok_or_else(|| {
        StudioError::InvalidPayload(format!("parameters[{}]는 객체여야 합니다", index))
    })?;

    for field in REQUIRED_PARAMETER_FIELDS {
        if object.get(field).map_or(true, Value::is_null) {
            return Err(StudioError::InvalidPayload(format!(
                "parameters[{}].{} 누락",
                index, field
            )));
        }
    }

    if let Some(category) = object.get("category").and_then(Value::as_str) {
        category.parse::<ParameterCategory>().map_err(|e| {
            StudioError::InvalidPayload(format!("parameters[{}].category: {}", index, e))
        })?;
    }

    serde_json::from_value::<Parameter>(item.clone())
        .map_err(|e| StudioError::InvalidPayload(format!("parameters[{}]: {}", index, e)))
}

impl From<StrategyConfig> for CandidateConfig {
    fn from(config: StrategyConfig) -> Self {
        Self {
            period: Some(config.period),
            market: Some(config.market),
            parameters: Some(config.parameters),
        }
    }
}
