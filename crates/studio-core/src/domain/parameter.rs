//! 전략 파라미터 (튜닝 가능한 전략 입력값).
//!
//! 이 모듈은 파라미터 행과 관련된 타입을 정의합니다:
//! - `ParameterCategory` - 지표 카테고리 (추세, 오실레이터 등)
//! - `ParamValue` - 숫자 또는 문자열 값
//! - `UiKey` - 행 단위 합성 식별자
//! - `Parameter` - 파라미터 행 엔티티
//!
//! `semantic_id`는 도메인 의미("rsi_buy" 등)일 뿐 목록 안에서 유일하지 않습니다.
//! 행 식별은 항상 `UiKey`로 합니다.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 파라미터 카테고리.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterCategory {
    /// 추세 (이동평균, MACD 등)
    Trend,
    /// 오실레이터 (RSI, 스토캐스틱 등)
    Oscillator,
    /// 변동성 (볼린저, ATR 등)
    Volatility,
    /// 거래량 (OBV, MFI 등)
    Volume,
    /// 리스크 관리 (손절, 익절 등)
    Risk,
}

impl ParameterCategory {
    /// 화면 표시 순서대로 나열한 전체 카테고리.
    pub const ALL: [ParameterCategory; 5] = [
        ParameterCategory::Trend,
        ParameterCategory::Oscillator,
        ParameterCategory::Volatility,
        ParameterCategory::Volume,
        ParameterCategory::Risk,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterCategory::Trend => "Trend",
            ParameterCategory::Oscillator => "Oscillator",
            ParameterCategory::Volatility => "Volatility",
            ParameterCategory::Volume => "Volume",
            ParameterCategory::Risk => "Risk",
        }
    }
}

impl std::fmt::Display for ParameterCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParameterCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown parameter category: {}", s))
    }
}

/// 파라미터 값 (숫자 또는 문자열).
///
/// JSON에서는 태그 없이 숫자/문자열 그대로 표현됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Text(String),
}

impl ParamValue {
    /// 사용자 입력 문자열에서 값을 만듭니다.
    ///
    /// 숫자로 해석되는 입력은 숫자로 유지하고, 그 외(빈 문자열, "5일" 등)는 문자열로 둡니다.
    pub fn from_input(input: &str) -> Self {
        match input.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => ParamValue::Number(n),
            _ => ParamValue::Text(input.to_string()),
        }
    }

    /// 숫자 값 (문자열이면 파싱 시도).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Number(n) => Some(*n),
            ParamValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Number(f64::from(value))
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Number(n) => write!(f, "{}", n),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

const KEY_SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const KEY_SUFFIX_LEN: usize = 8;
const FALLBACK_PREFIX: &str = "fallback:";

/// 파라미터 행의 합성 식별자.
///
/// UI 상관관계 전용이며 외부 협력자와 주고받지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UiKey(String);

impl UiKey {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// 가져오기 시점의 목록 위치에서 파생한 키 (`fallback:<index>`).
    pub fn fallback(index: usize) -> Self {
        Self(format!("{}{}", FALLBACK_PREFIX, index))
    }

    /// 새로 추가되는 행을 위한 키 (밀리초 타임스탬프 + 랜덤 접미사).
    pub fn mint() -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        let mut rng = rand::thread_rng();
        let suffix: String = (0..KEY_SUFFIX_LEN)
            .map(|_| KEY_SUFFIX_ALPHABET[rng.gen_range(0..KEY_SUFFIX_ALPHABET.len())] as char)
            .collect();
        Self(format!("{}-{}", millis, suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 위치 기반 키인지 확인합니다.
    pub fn is_fallback(&self) -> bool {
        self.0.starts_with(FALLBACK_PREFIX)
    }
}

impl std::fmt::Display for UiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 튜닝 가능한 전략 입력 하나.
///
/// 직렬화 시 `semantic_id`는 `id`로 나가고, `ui_key`는 직렬화되지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// 도메인 의미 ID (예: "rsi_buy"). 목록 안에서 중복될 수 있음
    #[serde(rename = "id")]
    pub semantic_id: String,
    /// UI 행 식별자
    #[serde(skip)]
    pub ui_key: Option<UiKey>,
    /// 카테고리
    pub category: ParameterCategory,
    /// 표시 라벨
    pub label: String,
    /// 값
    pub value: ParamValue,
    /// 단위 (예: "일", "%")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// 설명
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Parameter {
    /// 키 없는 새 파라미터를 생성합니다.
    pub fn new(
        semantic_id: impl Into<String>,
        category: ParameterCategory,
        label: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Self {
        Self {
            semantic_id: semantic_id.into(),
            ui_key: None,
            category,
            label: label.into(),
            value: value.into(),
            unit: None,
            description: None,
        }
    }

    /// 단위를 설정합니다.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// 설명을 설정합니다.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn ui_key(&self) -> Option<&UiKey> {
        self.ui_key.as_ref()
    }

    /// 설명이 없을 때 보여줄 문구를 포함한 설명.
    pub fn description_or_default(&self) -> &str {
        self.description.as_deref().unwrap_or("설명 없음")
    }
}
