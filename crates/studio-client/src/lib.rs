//! # Studio Client
//!
//! 전략 편집 세션과 협력자 클라이언트.
//!
//! - `collaborator` - 파싱/백테스트/분석/저장소 계약
//! - `http` - reqwest 기반 구현
//! - `workbench` - 초안, 알림, 진행 플래그, 보관 목록을 소유하는 세션
//!
//! # 예제
//!
//! ```no_run
//! use studio_client::{HttpCollaborator, Workbench};
//! use studio_core::ClientConfig;
//!
//! # async fn run() -> Result<(), studio_client::ClientError> {
//! let http = HttpCollaborator::new(&ClientConfig::default())?;
//! let mut workbench = Workbench::new(http);
//! workbench.generate("나스닥 반도체, RSI 30 이하 매수, 손절 3%").await;
//! workbench.run_backtest().await;
//! # Ok(())
//! # }
//! ```

pub mod collaborator;
pub mod error;
pub mod http;
pub mod notice;
pub mod workbench;

pub use collaborator::*;
pub use error::*;
pub use http::*;
pub use notice::{Notice, NoticeLevel};
pub use workbench::*;
