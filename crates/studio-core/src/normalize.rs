//! 결과 시계열 정규화.
//!
//! 임의의 숫자 시계열을 막대 차트용 높이 비율(0~1)로 변환합니다.
//!
//! ```text
//! baseline = min > 0 ? min * 0.9 : min
//! range    = max - baseline
//! height   = clamp((value - baseline) / range * 0.8 + 0.05, 0, 1)
//! ```
//!
//! 모든 값이 같거나 `range == 0`이면 모든 막대는 0.5입니다.

use serde::Serialize;

use crate::domain::SeriesPoint;

/// 양수 최소값에 곱하는 기준선 계수.
pub const BASELINE_FACTOR: f64 = 0.9;
/// 높이 스케일.
pub const HEIGHT_SCALE: f64 = 0.8;
/// 최소 높이.
pub const HEIGHT_FLOOR: f64 = 0.05;
/// 퇴화 구간 높이.
pub const DEGENERATE_HEIGHT: f64 = 0.5;

/// 막대 하나.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub date: String,
    pub value: f64,
    /// 높이 비율 (0~1)
    pub height: f64,
}

impl Bar {
    /// CSS 스타일 백분율 높이.
    pub fn percent(&self) -> f64 {
        self.height * 100.0
    }
}

/// 정규화된 차트 스케일.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartScale {
    pub min: f64,
    pub max: f64,
    pub baseline: f64,
    pub range: f64,
    pub bars: Vec<Bar>,
}

impl ChartScale {
    /// 모든 막대가 중간 높이로 고정되었는지.
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max || self.range == 0.0
    }
}

/// 최소값에서 기준선을 계산합니다.
pub fn baseline_for(min: f64) -> f64 {
    if min > 0.0 {
        min * BASELINE_FACTOR
    } else {
        min
    }
}

/// 시계열을 정규화합니다. 빈 시계열이면 `None`.
pub fn normalize_series(series: &[SeriesPoint]) -> Option<ChartScale> {
    if series.is_empty() {
        return None;
    }

    let (min, max) = series.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        (lo.min(p.value), hi.max(p.value))
    });
    let baseline = baseline_for(min);
    let range = max - baseline;
    let degenerate = min == max || range == 0.0;
    // 구간 폭이 f64 범위를 넘으면 축소한 값으로 계산
    let magnitude = if range.is_finite() {
        1.0
    } else {
        max.abs().max(baseline.abs())
    };
    let scaled_range = max / magnitude - baseline / magnitude;

    let bars = series
        .iter()
        .map(|p| Bar {
            date: p.date.clone(),
            value: p.value,
            height: if degenerate {
                DEGENERATE_HEIGHT
            } else {
                let offset = p.value / magnitude - baseline / magnitude;
                ((offset / scaled_range) * HEIGHT_SCALE + HEIGHT_FLOOR).clamp(0.0, 1.0)
            },
        })
        .collect();

    Some(ChartScale {
        min,
        max,
        baseline,
        range,
        bars,
    })
}
