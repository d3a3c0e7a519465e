//! 전략 스튜디오 도메인 모델.

mod market;
mod parameter;
mod result;
mod saved;
mod strategy;

pub use market::*;
pub use parameter::*;
pub use result::*;
pub use saved::*;
pub use strategy::*;
