//! 모의 협력자 로직.
//!
//! 실제 모델 추론이나 백테스트 계산 없이 그럴듯한 응답을 만듭니다.

pub mod analysis;
pub mod parser;
pub mod scenarios;

pub use analysis::{analysis_report, MDD_WARNING_THRESHOLD};
pub use parser::{fixed_response, parse_prompt};
pub use scenarios::{pick_random, Scenario, SCENARIOS};
