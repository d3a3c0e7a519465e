//! 분석 리포트 모의 구현.
//!
//! 설정과 결과로 마크다운 리포트를 조립합니다.

use std::fmt::Write;

use studio_core::{BacktestResult, ParameterCategory, StrategyConfig};

/// 이 값 이하의 MDD는 경고합니다.
pub const MDD_WARNING_THRESHOLD: f64 = -20.0;

/// 마크다운 분석 리포트를 만듭니다.
pub fn analysis_report(config: &StrategyConfig, result: &BacktestResult) -> String {
    let mut report = String::new();
    let stats = &result.stats;

    let _ = writeln!(report, "## 전략 분석 리포트\n");

    let period = if config.period.is_empty() {
        "미지정".to_string()
    } else {
        format!("{} ~ {}", config.period.start_date, config.period.end_date)
    };
    let market = if config.market.market_type.is_empty() {
        "미지정".to_string()
    } else if config.market.sectors.is_empty() {
        format!("{} (전체 섹터)", config.market.market_type)
    } else {
        format!(
            "{} ({})",
            config.market.market_type,
            config.market.sectors.join(", ")
        )
    };
    let _ = writeln!(report, "- **기간**: {}", period);
    let _ = writeln!(report, "- **시장**: {}", market);

    let _ = writeln!(report, "\n### 조건");
    if config.parameters.is_empty() {
        let _ = writeln!(report, "- (조건 없음)");
    }
    for parameter in &config.parameters {
        let _ = writeln!(
            report,
            "- {}: {}{}",
            parameter.label,
            parameter.value,
            parameter.unit.as_deref().unwrap_or("")
        );
    }

    let _ = writeln!(report, "\n### 성과 요약");
    let display = stats.display();
    let _ = writeln!(report, "- 총 수익률: {}", display.total_return);
    let _ = writeln!(report, "- 승률: {}", display.win_rate);
    let _ = writeln!(report, "- 최대 낙폭(MDD): {}", display.mdd);

    let _ = writeln!(report, "\n### 진단");
    let mut step = 1;
    let mut advise = |report: &mut String, text: &str| {
        let _ = writeln!(report, "{}. {}", step, text);
        step += 1;
    };

    if stats.total_return > 0.0 {
        advise(&mut report, "기간 수익이 플러스입니다. 다른 기간에서도 재현되는지 확인하세요.");
    } else {
        advise(&mut report, "기간 수익이 마이너스입니다. 진입 조건을 재검토하세요.");
    }
    if stats.win_rate < 45.0 {
        advise(&mut report, "승률이 낮습니다. 진입 필터(거래량, 추세 확인)를 추가해 보세요.");
    }
    if stats.mdd <= MDD_WARNING_THRESHOLD {
        advise(
            &mut report,
            "**경고**: 최대 낙폭이 20%를 넘었습니다. 손절 기준을 강화하거나 비중을 줄이세요.",
        );
    }
    let has_risk = config
        .parameters
        .iter()
        .any(|p| p.category == ParameterCategory::Risk);
    if !has_risk {
        advise(&mut report, "리스크 관리 조건(손절/익절)이 없습니다.");
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::scenarios::SCENARIOS;
    use studio_core::{fallback_config, Market, Period};

    #[test]
    fn test_report_lists_config_and_stats() {
        let report = analysis_report(&fallback_config(), &SCENARIOS[0].to_result());
        assert!(report.contains("2023-01-01 ~ 2023-12-31"));
        assert!(report.contains("- 총 수익률: 15.4%"));
        assert!(report.contains("- 최대 낙폭(MDD): -12.5%"));
        assert!(!report.contains("**경고**"));
    }

    #[test]
    fn test_mdd_warning_at_threshold() {
        let mut result = SCENARIOS[0].to_result();
        result.stats.mdd = -20.0;
        let report = analysis_report(&fallback_config(), &result);
        assert!(report.contains("**경고**"));

        // 시나리오 10: MDD -60
        let report = analysis_report(&fallback_config(), &SCENARIOS[9].to_result());
        assert!(report.contains("**경고**"));
        assert!(report.contains("마이너스"));
    }

    #[test]
    fn test_empty_config() {
        let config = StrategyConfig::new(Period::default(), Market::default(), Vec::new());
        let report = analysis_report(&config, &SCENARIOS[1].to_result());
        assert!(report.contains("- **기간**: 미지정"));
        assert!(report.contains("(조건 없음)"));
        assert!(report.contains("리스크 관리 조건"));
    }
}
