//! 편집 중인 전략 초안.
//!
//! 초안은 설정, 마지막 백테스트 결과, 요청 세대(generation) 카운터를 함께 가집니다.
//! 응답은 자신을 발생시킨 요청이 가장 최근 요청일 때만 적용됩니다 (나중 요청이 앞선 요청을 대체).
//!
//! - 파싱 응답: 최신 파싱 티켓일 때만 적용
//! - 백테스트 응답: 최신 백테스트 티켓이고, 티켓 발급 이후 조정이 없었을 때만 적용

use serde::Serialize;
use tracing::debug;

use crate::domain::{
    BacktestResult, CandidateConfig, Market, ParamValue, Parameter, ParameterCategory, Period,
    StrategyConfig, UiKey,
};
use crate::error::{StudioError, StudioResult};
use crate::identity;
use crate::library::{add_from_catalog, CatalogEntry};
use crate::reconcile::{reconcile, ReplacedFields};

/// 요청 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RequestKind {
    Parse,
    Backtest,
}

/// 발급된 요청 티켓.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub kind: RequestKind,
    pub generation: u64,
    /// 발급 시점의 조정 횟수
    pub epoch: u64,
}

/// 응답 적용 결과.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied<T> {
    Applied(T),
    /// 더 최근 요청이 있어 버려짐
    Superseded,
}

impl<T> Applied<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Applied::Applied(_))
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, Applied::Superseded)
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Applied::Applied(value) => Some(value),
            Applied::Superseded => None,
        }
    }
}

/// 새 행 추가 시 기본값.
pub const BLANK_PARAMETER_LABEL: &str = "새 조건";
pub const BLANK_PARAMETER_DESCRIPTION: &str = "사용자 추가 조건";

/// 시작 시 보여주는 기본 파라미터.
pub fn initial_parameters() -> Vec<Parameter> {
    vec![
        Parameter::new("ma_short", ParameterCategory::Trend, "단기 이동평균(MA)", 5)
            .with_unit("일")
            .with_description("골든크로스 진입용"),
        Parameter::new("ma_long", ParameterCategory::Trend, "장기 이동평균(MA)", 20)
            .with_unit("일")
            .with_description("추세 판단용"),
        Parameter::new("rsi", ParameterCategory::Oscillator, "RSI", 30)
            .with_unit("이하")
            .with_description("과매도 구간 매수"),
        Parameter::new("stop_loss", ParameterCategory::Risk, "손절", 3)
            .with_unit("%")
            .with_description("리스크 관리"),
    ]
}

/// 시작 시 시장 (KOSPI / 반도체).
pub fn initial_market() -> Market {
    Market::new("KOSPI", ["반도체"])
}

/// 파싱 협력자에 접근할 수 없을 때 대신 쓰는 고정 설정.
pub fn fallback_config() -> StrategyConfig {
    StrategyConfig::new(
        Period::new("2023-01-01", "2023-12-31"),
        initial_market(),
        initial_parameters(),
    )
}

/// 편집 중인 전략 초안.
#[derive(Debug, Clone)]
pub struct StrategyDraft {
    config: StrategyConfig,
    result: Option<BacktestResult>,
    parse_generation: u64,
    backtest_generation: u64,
    reconcile_epoch: u64,
}

impl Default for StrategyDraft {
    fn default() -> Self {
        Self::new(StrategyConfig::new(
            Period::default(),
            initial_market(),
            initial_parameters(),
        ))
    }
}

impl StrategyDraft {
    /// 주어진 설정으로 초안을 만듭니다. 키 없는 행에는 위치 기반 키를 부여합니다.
    pub fn new(mut config: StrategyConfig) -> Self {
        identity::assign_fallback_keys(&mut config.parameters);
        Self {
            config,
            result: None,
            parse_generation: 0,
            backtest_generation: 0,
            reconcile_epoch: 0,
        }
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    pub fn result(&self) -> Option<&BacktestResult> {
        self.result.as_ref()
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.config.parameters
    }

    pub fn has_parameters(&self) -> bool {
        !self.config.parameters.is_empty()
    }

    /// 화면 렌더링용 (키, 행) 쌍.
    pub fn parameter_rows(&self) -> impl Iterator<Item = (&UiKey, &Parameter)> {
        self.config
            .parameters
            .iter()
            .filter_map(|p| p.ui_key().map(|key| (key, p)))
    }

    pub fn parse_generation(&self) -> u64 {
        self.parse_generation
    }

    pub fn backtest_generation(&self) -> u64 {
        self.backtest_generation
    }

    pub fn reconcile_epoch(&self) -> u64 {
        self.reconcile_epoch
    }

    fn ticket(&self, kind: RequestKind, generation: u64) -> RequestTicket {
        RequestTicket {
            kind,
            generation,
            epoch: self.reconcile_epoch,
        }
    }

    /// 티켓이 아직 최신인지 확인합니다.
    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        match ticket.kind {
            RequestKind::Parse => ticket.generation == self.parse_generation,
            RequestKind::Backtest => {
                ticket.generation == self.backtest_generation && ticket.epoch == self.reconcile_epoch
            }
        }
    }

    /// 파싱 요청을 시작합니다. 이전 파싱 티켓은 무효가 됩니다.
    pub fn begin_parse(&mut self) -> RequestTicket {
        self.parse_generation += 1;
        self.ticket(RequestKind::Parse, self.parse_generation)
    }

    /// 파싱 응답(후보)을 적용합니다.
    ///
    /// 필드가 하나라도 대체되면 기존 결과를 지우고 조정 횟수를 올립니다.
    pub fn apply_candidate(
        &mut self,
        ticket: RequestTicket,
        candidate: CandidateConfig,
    ) -> Applied<ReplacedFields> {
        if ticket.kind != RequestKind::Parse || !self.is_current(&ticket) {
            debug!(
                generation = ticket.generation,
                latest = self.parse_generation,
                "superseded parse response dropped"
            );
            return Applied::Superseded;
        }

        let outcome = reconcile(&self.config, candidate);
        if outcome.invalidates_result() {
            self.config = outcome.config;
            self.result = None;
            self.reconcile_epoch += 1;
        }
        Applied::Applied(outcome.replaced)
    }

    /// 백테스트 요청을 시작합니다.
    ///
    /// 파라미터가 없거나 기간이 잘못되었으면 네트워크 호출 전에 거부합니다.
    /// 전송할 설정 스냅샷을 함께 반환합니다.
    pub fn begin_backtest(&mut self) -> StudioResult<(RequestTicket, StrategyConfig)> {
        if !self.has_parameters() {
            return Err(StudioError::EmptyParameters);
        }
        self.config.period.validate()?;

        self.backtest_generation += 1;
        Ok((
            self.ticket(RequestKind::Backtest, self.backtest_generation),
            self.config.clone(),
        ))
    }

    /// 백테스트 결과를 적용합니다.
    pub fn apply_result(&mut self, ticket: RequestTicket, result: BacktestResult) -> Applied<()> {
        if ticket.kind != RequestKind::Backtest || !self.is_current(&ticket) {
            debug!(
                generation = ticket.generation,
                latest = self.backtest_generation,
                epoch = ticket.epoch,
                current_epoch = self.reconcile_epoch,
                "superseded backtest result dropped"
            );
            return Applied::Superseded;
        }
        self.result = Some(result);
        Applied::Applied(())
    }

    // ===== 수동 편집 =====
    // 수동 편집은 기존 결과를 지우지 않습니다.

    pub fn set_period(&mut self, period: Period) {
        self.config.period = period;
    }

    /// 시장 유형을 바꿉니다. 바뀌었으면 섹터가 비워지고 `true`.
    pub fn set_market_type(&mut self, market_type: impl Into<String>) -> bool {
        self.config.market.set_type(market_type)
    }

    pub fn toggle_sector(&mut self, sector: impl Into<String>) -> bool {
        self.config.market.toggle_sector(sector)
    }

    pub fn edit_value(&mut self, key: &UiKey, value: ParamValue) -> StudioResult<()> {
        identity::edit_value(&mut self.config.parameters, key, value)
    }

    pub fn remove_parameter(&mut self, key: &UiKey) -> StudioResult<Parameter> {
        identity::remove(&mut self.config.parameters, key)
    }

    /// 빈 조건 행을 추가합니다.
    pub fn add_blank_parameter(&mut self) -> UiKey {
        let param = Parameter::new(
            "custom",
            ParameterCategory::Trend,
            BLANK_PARAMETER_LABEL,
            ParamValue::Number(0.0),
        )
        .with_description(BLANK_PARAMETER_DESCRIPTION);
        identity::append_fresh(&mut self.config.parameters, param)
    }

    pub fn add_from_library(&mut self, entry: &CatalogEntry) -> UiKey {
        add_from_catalog(&mut self.config.parameters, entry)
    }
}
