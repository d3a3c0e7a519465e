//! 백테스트 결과.
//!
//! 결과는 수신 후 변경되지 않으며, 설정이 다시 생성되면 폐기됩니다.

use serde::{Deserialize, Serialize};

/// 백테스트 성과 요약 (모두 백분율).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestStats {
    /// 총 수익률
    pub total_return: f64,
    /// 승률 (0~100)
    pub win_rate: f64,
    /// 최대 낙폭 (관례상 0 이하)
    pub mdd: f64,
}

impl BacktestStats {
    pub fn new(total_return: f64, win_rate: f64, mdd: f64) -> Self {
        Self {
            total_return,
            win_rate,
            mdd,
        }
    }

    /// 화면 표시용 문자열.
    pub fn display(&self) -> StatsDisplay {
        StatsDisplay {
            total_return: format!("{}%", self.total_return),
            win_rate: format!("{}%", self.win_rate),
            mdd: format!("{}%", self.mdd),
        }
    }
}

/// 성과 카드에 표시할 문자열.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsDisplay {
    pub total_return: String,
    pub win_rate: String,
    pub mdd: String,
}

impl StatsDisplay {
    /// 결과가 없을 때 표시.
    pub fn placeholder() -> Self {
        Self {
            total_return: "-".to_string(),
            win_rate: "-".to_string(),
            mdd: "-".to_string(),
        }
    }

    /// 결과 유무에 따른 표시 문자열.
    pub fn for_result(result: Option<&BacktestResult>) -> Self {
        result.map_or_else(Self::placeholder, |r| r.stats.display())
    }
}

/// 시계열 한 점.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: String,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(date: impl Into<String>, value: f64) -> Self {
        Self {
            date: date.into(),
            value,
        }
    }
}

/// 백테스트 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    pub stats: BacktestStats,
    /// 자산 곡선 (wire 이름 `chartData`)
    #[serde(rename = "chartData", default)]
    pub series: Vec<SeriesPoint>,
}

impl BacktestResult {
    pub fn new(stats: BacktestStats, series: Vec<SeriesPoint>) -> Self {
        Self { stats, series }
    }

    /// 차트를 그릴 수 있는지 (점이 하나 이상).
    pub fn is_renderable(&self) -> bool {
        !self.series.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_wire_shape() {
        let result: BacktestResult = serde_json::from_value(json!({
            "stats": {"totalReturn": 15.4, "winRate": 65.2, "mdd": -12.5},
            "chartData": [{"date": "01-01", "value": 100}, {"date": "02-01", "value": 102}]
        }))
        .unwrap();

        assert_eq!(result.stats.win_rate, 65.2);
        assert_eq!(result.series.len(), 2);
        assert!(result.is_renderable());

        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("chartData").is_some());
        assert!(json.get("series").is_none());
        assert_eq!(json["stats"]["totalReturn"], 15.4);
    }

    #[test]
    fn test_stats_display() {
        let stats = BacktestStats::new(15.4, 65.2, -12.5);
        let display = stats.display();
        assert_eq!(display.total_return, "15.4%");
        assert_eq!(display.mdd, "-12.5%");

        assert_eq!(StatsDisplay::for_result(None), StatsDisplay::placeholder());
        assert_eq!(StatsDisplay::placeholder().win_rate, "-");
    }

    #[test]
    fn test_empty_series_not_renderable() {
        let result = BacktestResult::new(BacktestStats::new(0.0, 0.0, 0.0), vec![]);
        assert!(!result.is_renderable());
    }
}
