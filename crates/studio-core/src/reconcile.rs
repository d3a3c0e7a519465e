//! 후보 설정 조정.
//!
//! 최상위 필드 단위로 통째로 대체하거나 그대로 둡니다. 파라미터 행 단위 병합은 하지 않으며,
//! 새로 생성된 파라미터 목록은 새 초안으로 취급합니다.

use serde::Serialize;
use tracing::info;

use crate::domain::{CandidateConfig, StrategyConfig};
use crate::identity::import_parameters;

/// 대체된 최상위 필드.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplacedFields {
    pub period: bool,
    pub market: bool,
    pub parameters: bool,
}

impl ReplacedFields {
    /// 하나라도 대체되었는지.
    pub fn any(&self) -> bool {
        self.period || self.market || self.parameters
    }
}

/// 조정 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub config: StrategyConfig,
    pub replaced: ReplacedFields,
}

impl Reconciliation {
    /// 설정이 바뀌었으면 기존 백테스트 결과는 무효입니다.
    pub fn invalidates_result(&self) -> bool {
        self.replaced.any()
    }
}

/// 후보를 현재 설정에 조정합니다.
///
/// 후보는 경계에서 이미 검증되었다고 가정합니다. 파라미터가 대체되면 이전 키는
/// 모두 버리고 위치 기반 키를 새로 부여합니다.
pub fn reconcile(current: &StrategyConfig, candidate: CandidateConfig) -> Reconciliation {
    let mut replaced = ReplacedFields::default();

    let period = match candidate.period {
        Some(period) => {
            replaced.period = true;
            period
        }
        None => current.period.clone(),
    };

    let market = match candidate.market {
        Some(mut market) => {
            market.dedup_sectors();
            replaced.market = true;
            market
        }
        None => current.market.clone(),
    };

    let parameters = match candidate.parameters {
        Some(parameters) => {
            replaced.parameters = true;
            import_parameters(parameters)
        }
        None => current.parameters.clone(),
    };

    if replaced.any() {
        info!(
            period = replaced.period,
            market = replaced.market,
            parameters = replaced.parameters,
            parameter_count = parameters.len(),
            "설정 조정 완료"
        );
    }

    Reconciliation {
        config: StrategyConfig {
            period,
            market,
            parameters,
        },
        replaced,
    }
}
