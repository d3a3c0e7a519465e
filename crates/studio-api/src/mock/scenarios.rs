//! 백테스트 시나리오 테이블.
//!
//! 실제 계산 없이 미리 정해 둔 10개 시나리오 중 하나를 돌려줍니다.
//! 결과는 제출된 파라미터와 아무 관계가 없습니다.

use rand::Rng;
use studio_core::{BacktestResult, BacktestStats, SeriesPoint};

/// 시계열 날짜 라벨 (월초).
const DATES: [&str; 12] = [
    "01-01", "02-01", "03-01", "04-01", "05-01", "06-01", "07-01", "08-01", "09-01", "10-01",
    "11-01", "12-01",
];

/// 시나리오 하나.
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub id: &'static str,
    pub label: &'static str,
    pub total_return: f64,
    pub win_rate: f64,
    pub mdd: f64,
    pub values: [f64; 12],
}

impl Scenario {
    pub fn to_result(&self) -> BacktestResult {
        let series = DATES
            .iter()
            .zip(self.values)
            .map(|(date, value)| SeriesPoint::new(*date, value))
            .collect();
        BacktestResult::new(
            BacktestStats::new(self.total_return, self.win_rate, self.mdd),
            series,
        )
    }
}

pub const SCENARIOS: [Scenario; 10] = [
    Scenario {
        id: "scenario_1",
        label: "상승장 골든크로스",
        total_return: 15.4,
        win_rate: 65.2,
        mdd: -12.5,
        values: [100.0, 102.0, 98.0, 105.0, 108.0, 115.0, 112.0, 120.0, 125.0, 115.0, 122.0, 130.0],
    },
    Scenario {
        id: "scenario_2",
        label: "횡보장 박스권",
        total_return: 3.2,
        win_rate: 51.5,
        mdd: -5.4,
        values: [100.0, 104.0, 101.0, 103.0, 99.0, 102.0, 105.0, 101.0, 103.0, 100.0, 104.0, 103.0],
    },
    Scenario {
        id: "scenario_3",
        label: "변동성 폭발",
        total_return: 45.3,
        win_rate: 42.1,
        mdd: -25.8,
        values: [100.0, 95.0, 90.0, 110.0, 140.0, 130.0, 160.0, 120.0, 145.0, 135.0, 150.0, 180.0],
    },
    Scenario {
        id: "scenario_4",
        label: "하락장 손절 실패",
        total_return: -22.1,
        win_rate: 35.0,
        mdd: -30.2,
        values: [100.0, 95.0, 90.0, 85.0, 88.0, 80.0, 75.0, 70.0, 72.0, 68.0, 65.0, 60.0],
    },
    Scenario {
        id: "scenario_5",
        label: "단타 계단식 상승",
        total_return: 8.4,
        win_rate: 71.0,
        mdd: -2.1,
        values: [100.0, 101.0, 101.0, 102.0, 102.0, 103.0, 104.0, 104.0, 105.0, 106.0, 106.0, 108.0],
    },
    Scenario {
        id: "scenario_6",
        label: "V자 반등",
        total_return: 5.5,
        win_rate: 48.0,
        mdd: -18.5,
        values: [100.0, 90.0, 85.0, 82.0, 88.0, 95.0, 100.0, 105.0, 102.0, 108.0, 110.0, 105.0],
    },
    Scenario {
        id: "scenario_7",
        label: "고점 물림",
        total_return: -5.0,
        win_rate: 40.0,
        mdd: -40.0,
        values: [100.0, 110.0, 130.0, 150.0, 140.0, 120.0, 100.0, 90.0, 85.0, 90.0, 92.0, 95.0],
    },
    Scenario {
        id: "scenario_8",
        label: "대세 상승",
        total_return: 88.2,
        win_rate: 60.5,
        mdd: -15.0,
        values: [100.0, 105.0, 110.0, 115.0, 125.0, 140.0, 160.0, 190.0, 180.0, 200.0, 210.0, 230.0],
    },
    Scenario {
        id: "scenario_9",
        label: "저위험 안정형",
        total_return: 6.5,
        win_rate: 90.0,
        mdd: -1.5,
        values: [100.0, 100.5, 101.0, 101.5, 102.0, 102.5, 103.0, 103.5, 104.0, 105.0, 105.5, 106.5],
    },
    Scenario {
        id: "scenario_10",
        label: "폭락장",
        total_return: -55.0,
        win_rate: 20.0,
        mdd: -60.0,
        values: [100.0, 80.0, 70.0, 60.0, 50.0, 45.0, 45.0, 44.0, 46.0, 45.0, 43.0, 45.0],
    },
];

/// 시나리오 하나를 무작위로 고릅니다.
pub fn pick_random() -> &'static Scenario {
    let index = rand::thread_rng().gen_range(0..SCENARIOS.len());
    &SCENARIOS[index]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_scenarios_are_renderable() {
        let ids: HashSet<_> = SCENARIOS.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), SCENARIOS.len());

        for scenario in &SCENARIOS {
            let result = scenario.to_result();
            assert!(result.is_renderable());
            assert_eq!(result.series.len(), 12);
            assert_eq!(result.series[0].date, "01-01");
            assert_eq!(result.series[11].date, "12-01");
            assert_eq!(result.series[0].value, 100.0);
        }
    }

    #[test]
    fn test_pick_random_returns_table_entry() {
        for _ in 0..50 {
            let picked = pick_random();
            assert!(SCENARIOS.iter().any(|s| s.id == picked.id));
        }
    }
}
