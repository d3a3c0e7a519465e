//! 파라미터 라이브러리 (수동 추가용 카탈로그).
//!
//! 카탈로그 항목을 선택하면 항상 새 키를 가진 행이 목록 끝에 추가됩니다.
//! 같은 `semantic_id`가 이미 있어도 상관없습니다.

use serde::Serialize;

use crate::domain::{ParamValue, Parameter, ParameterCategory, UiKey};
use crate::identity::append_fresh;

/// 카탈로그 항목.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub category: ParameterCategory,
    pub label: &'static str,
    #[serde(rename = "value")]
    pub default_value: f64,
    pub unit: &'static str,
    pub description: &'static str,
}

impl CatalogEntry {
    const fn new(
        id: &'static str,
        category: ParameterCategory,
        label: &'static str,
        default_value: f64,
        unit: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            id,
            category,
            label,
            default_value,
            unit,
            description,
        }
    }

    /// 키 없는 파라미터로 변환합니다.
    pub fn to_parameter(&self) -> Parameter {
        let mut param = Parameter::new(
            self.id,
            self.category,
            self.label,
            ParamValue::Number(self.default_value),
        )
        .with_description(self.description);
        if !self.unit.is_empty() {
            param = param.with_unit(self.unit);
        }
        param
    }
}

use crate::domain::ParameterCategory::{Oscillator, Risk, Trend, Volatility, Volume};

const BUILTIN: &[CatalogEntry] = &[
    CatalogEntry::new("ma_5", Trend, "5일 이동평균", 5.0, "일", "초단기 추세"),
    CatalogEntry::new("ma_20", Trend, "20일 이동평균", 20.0, "일", "한 달 추세 (생명선)"),
    CatalogEntry::new("ma_60", Trend, "60일 이동평균", 60.0, "일", "분기 추세 (수급선)"),
    CatalogEntry::new("ma_120", Trend, "120일 이동평균", 120.0, "일", "반기 추세 (경기선)"),
    CatalogEntry::new("macd_fast", Trend, "MACD 단기", 12.0, "일", "MACD 단기 지수이동평균"),
    CatalogEntry::new("macd_slow", Trend, "MACD 장기", 26.0, "일", "MACD 장기 지수이동평균"),
    CatalogEntry::new("cci", Trend, "CCI", 20.0, "일", "상품 채널 지수"),
    CatalogEntry::new("adx", Trend, "ADX", 14.0, "일", "추세 강도"),
    CatalogEntry::new("rsi", Oscillator, "RSI 기간", 14.0, "일", "RSI 계산 기간"),
    CatalogEntry::new("rsi_buy", Oscillator, "RSI 매수", 30.0, "이하", "과매도 구간 매수"),
    CatalogEntry::new("rsi_sell", Oscillator, "RSI 매도", 70.0, "이상", "과매수 구간 매도"),
    CatalogEntry::new("stoch_k", Oscillator, "스토캐스틱 %K", 14.0, "일", "스토캐스틱 기준 기간"),
    CatalogEntry::new("stoch_d", Oscillator, "스토캐스틱 %D", 3.0, "일", "%K 이동평균 기간"),
    CatalogEntry::new("williams", Oscillator, "Williams %R", 14.0, "일", "윌리엄스 %R 기간"),
    CatalogEntry::new("bb_len", Volatility, "볼린저 기간", 20.0, "일", "볼린저 밴드 중심선 기간"),
    CatalogEntry::new("bb_mult", Volatility, "볼린저 승수", 2.0, "배", "표준편차 승수"),
    CatalogEntry::new("atr", Volatility, "ATR", 14.0, "일", "평균 실제 범위"),
    CatalogEntry::new("keltner", Volatility, "켈트너 채널", 20.0, "일", "켈트너 채널 기간"),
    CatalogEntry::new("obv", Volume, "OBV", 20.0, "일", "누적 거래량 추세"),
    CatalogEntry::new("mfi", Volume, "MFI", 14.0, "일", "자금 흐름 지수"),
    CatalogEntry::new("volume_ratio", Volume, "거래량 비율", 150.0, "%", "평균 대비 거래량"),
    CatalogEntry::new("sl", Risk, "손절", 3.0, "%", "Stop Loss"),
    CatalogEntry::new("tp", Risk, "익절", 10.0, "%", "Take Profit"),
    CatalogEntry::new("trailing", Risk, "트레일링 스탑", 5.0, "%", "고점 대비 하락 시 청산"),
    CatalogEntry::new("max_alloc", Risk, "최대 비중", 20.0, "%", "종목당 최대 투자 비중"),
];

/// 파라미터 라이브러리.
#[derive(Debug, Clone)]
pub struct ParameterLibrary {
    entries: Vec<CatalogEntry>,
}

impl Default for ParameterLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ParameterLibrary {
    /// 내장 카탈로그.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN.to_vec(),
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// 카테고리별 항목.
    pub fn by_category(&self, category: ParameterCategory) -> Vec<&CatalogEntry> {
        self.entries.iter().filter(|e| e.category == category).collect()
    }

    /// ID로 항목을 찾습니다.
    pub fn find(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }
}

/// 카탈로그 항목을 새 행으로 목록 끝에 추가하고 발급된 키를 반환합니다.
pub fn add_from_catalog(parameters: &mut Vec<Parameter>, entry: &CatalogEntry) -> UiKey {
    append_fresh(parameters, entry.to_parameter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{import_parameters, keys_are_distinct};
    use proptest::prelude::*;

    #[test]
    fn test_builtin_catalog() {
        let library = ParameterLibrary::builtin();
        assert_eq!(library.entries().len(), 25);
        for category in ParameterCategory::ALL {
            assert!(!library.by_category(category).is_empty());
        }
        assert_eq!(library.by_category(ParameterCategory::Volume).len(), 3);
        assert_eq!(library.find("rsi_buy").unwrap().default_value, 30.0);
        assert!(library.find("rsi_threshold").is_none());
    }

    #[test]
    fn test_duplicate_semantic_ids_allowed() {
        let library = ParameterLibrary::builtin();
        let rsi = library.find("rsi_buy").unwrap();
        let mut params = Vec::new();

        let first = add_from_catalog(&mut params, rsi);
        let second = add_from_catalog(&mut params, rsi);

        assert_ne!(first, second);
        assert_eq!(params[0].semantic_id, params[1].semantic_id);
        assert_eq!(params[0].unit.as_deref(), Some("이하"));
    }

    proptest! {
        #[test]
        fn prop_library_merge_appends_in_call_order(
            picks in proptest::collection::vec(0usize..25, 0..12),
            existing in 0usize..6,
        ) {
            let library = ParameterLibrary::builtin();
            let mut params = import_parameters(
                (0..existing).map(|i| library.entries()[i].to_parameter()).collect(),
            );
            let before = params.clone();

            for &pick in &picks {
                add_from_catalog(&mut params, &library.entries()[pick]);
            }

            prop_assert_eq!(params.len(), existing + picks.len());
            prop_assert_eq!(&params[..existing], &before[..]);
            for (offset, &pick) in picks.iter().enumerate() {
                prop_assert_eq!(params[existing + offset].semantic_id.as_str(), library.entries()[pick].id);
            }
            prop_assert!(keys_are_distinct(&params));
        }
    }
}
