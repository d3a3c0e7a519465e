//! # Studio Core
//!
//! 전략 스튜디오의 핵심 도메인 모델과 설정 조정 로직을 제공합니다.
//!
//! - 파라미터 행 식별자 관리 (`identity`)
//! - 후보 설정 조정 (`reconcile`)
//! - 파라미터 라이브러리 (`library`)
//! - 결과 시계열 정규화 (`normalize`)
//! - 요청 세대를 가진 편집 초안 (`draft`)
//! - 설정 관리, 로깅 인프라
//!
//! 이 크레이트는 I/O를 하지 않습니다.

pub mod config;
pub mod domain;
pub mod draft;
pub mod error;
pub mod identity;
pub mod library;
pub mod logging;
pub mod normalize;
pub mod reconcile;

pub use config::*;
pub use domain::*;
pub use draft::*;
pub use error::*;
pub use library::*;
pub use logging::*;
pub use normalize::*;
pub use reconcile::*;
