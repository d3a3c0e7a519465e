//! 단일 사용자 세션 (워크벤치).
//!
//! 초안, 알림 큐, 진행 중 플래그, 보관 목록, 분석 텍스트, 저장 폼 상태를 소유하고
//! 네 협력자를 통해 초안을 진행시킵니다.
//!
//! 요청은 `begin → 협력자 호출 → complete` 순서로 처리됩니다. UI 이벤트 루프가 호출을
//! 분리해서 실행할 수 있도록 `complete_*`는 공개되어 있으며, 최신 요청이 아닌 응답은
//! 알림 없이 버려집니다.

use serde_json::Value;
use studio_core::{
    draft_span, fallback_config, normalize_series, CandidateConfig, ChartScale, NewSavedStrategy,
    ParamValue, Parameter, ParameterLibrary, ReplacedFields, RequestTicket, SavedStrategy,
    StatsDisplay, StrategyDraft, StudioResult, UiKey,
};
use tracing::{debug, info, warn, Instrument};

use crate::collaborator::Collaborators;
use crate::error::ClientResult;
use crate::notice::{self, Notice};

/// 진행 중 플래그 (입력 비활성화용, 강제 잠금 아님).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusyFlags {
    pub generating: bool,
    pub running: bool,
    pub analyzing: bool,
}

/// 저장 대화상자 상태.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveForm {
    pub open: bool,
    pub name: String,
    pub description: String,
}

/// 전략 편집 세션.
pub struct Workbench<C> {
    collaborators: C,
    draft: StrategyDraft,
    library: ParameterLibrary,
    notices: Vec<Notice>,
    busy: BusyFlags,
    archive: Vec<SavedStrategy>,
    analysis: Option<String>,
    save_form: SaveForm,
}

impl<C: Collaborators> Workbench<C> {
    /// 기본 초안으로 세션을 시작합니다.
    pub fn new(collaborators: C) -> Self {
        Self::with_draft(collaborators, StrategyDraft::default())
    }

    pub fn with_draft(collaborators: C, draft: StrategyDraft) -> Self {
        Self {
            collaborators,
            draft,
            library: ParameterLibrary::builtin(),
            notices: Vec::new(),
            busy: BusyFlags::default(),
            archive: Vec::new(),
            analysis: None,
            save_form: SaveForm::default(),
        }
    }

    // ===== 조회 =====

    pub fn draft(&self) -> &StrategyDraft {
        &self.draft
    }

    /// 기간/시장/파라미터 수동 편집용.
    pub fn draft_mut(&mut self) -> &mut StrategyDraft {
        &mut self.draft
    }

    pub fn collaborators(&self) -> &C {
        &self.collaborators
    }

    pub fn library(&self) -> &ParameterLibrary {
        &self.library
    }

    pub fn busy(&self) -> BusyFlags {
        self.busy
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// 쌓인 알림을 꺼냅니다.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn archive(&self) -> &[SavedStrategy] {
        &self.archive
    }

    pub fn analysis(&self) -> Option<&str> {
        self.analysis.as_deref()
    }

    pub fn save_form(&self) -> &SaveForm {
        &self.save_form
    }

    /// 렌더링용 (키, 행) 쌍.
    pub fn parameter_rows(&self) -> Vec<(UiKey, &Parameter)> {
        self.draft
            .parameter_rows()
            .map(|(key, param)| (key.clone(), param))
            .collect()
    }

    /// `false`면 "파라미터 없음" 상태를 표시합니다.
    pub fn has_parameters(&self) -> bool {
        self.draft.has_parameters()
    }

    /// 현재 결과의 차트 스케일.
    pub fn chart(&self) -> Option<ChartScale> {
        self.draft
            .result()
            .and_then(|result| normalize_series(&result.series))
    }

    pub fn stats_display(&self) -> StatsDisplay {
        StatsDisplay::for_result(self.draft.result())
    }

    fn push(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    // ===== 수동 편집 =====

    pub fn edit_value(&mut self, key: &UiKey, input: &str) -> StudioResult<()> {
        self.draft.edit_value(key, ParamValue::from_input(input))
    }

    pub fn remove_parameter(&mut self, key: &UiKey) -> StudioResult<Parameter> {
        self.draft.remove_parameter(key)
    }

    pub fn add_blank_parameter(&mut self) -> UiKey {
        self.draft.add_blank_parameter()
    }

    /// 라이브러리 항목을 추가합니다. 알 수 없는 ID면 `None`.
    pub fn add_from_library(&mut self, id: &str) -> Option<UiKey> {
        let entry = self.library.find(id)?.clone();
        Some(self.draft.add_from_library(&entry))
    }

    // ===== AI 파싱 =====

    /// 프롬프트로 전략을 생성합니다. 빈 프롬프트는 무시합니다.
    pub async fn generate(&mut self, prompt: &str) -> Option<ReplacedFields> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return None;
        }

        let ticket = self.begin_generate();
        let outcome = self
            .collaborators
            .parse(prompt)
            .instrument(draft_span!("generate", ticket.generation))
            .await;
        self.complete_generate(ticket, outcome)
    }

    pub fn begin_generate(&mut self) -> RequestTicket {
        self.busy.generating = true;
        self.draft.begin_parse()
    }

    /// 파싱 응답을 처리합니다.
    ///
    /// - 전송 실패, 해석 불가 본문: 고정 설정으로 대체하고 경고
    /// - 형식이 잘못된 후보: 거부, 초안 유지
    /// - 에러 응답: 알림만, 초안 유지
    pub fn complete_generate(
        &mut self,
        ticket: RequestTicket,
        outcome: ClientResult<Value>,
    ) -> Option<ReplacedFields> {
        if !self.draft.is_current(&ticket) {
            debug!(generation = ticket.generation, "stale parse response ignored");
            return None;
        }
        self.busy.generating = false;

        let candidate = match outcome {
            Ok(payload) => match CandidateConfig::from_json(&payload) {
                Ok(candidate) => candidate,
                Err(e) => {
                    warn!(error = %e, "rejected candidate payload");
                    self.push(Notice::error(format!("{}: {}", notice::PARSE_MALFORMED, e)));
                    return None;
                }
            },
            Err(e) if e.substitutes_fallback() => {
                warn!(error = %e, "parse collaborator unavailable, using fallback config");
                self.push(Notice::warning(notice::PARSE_FALLBACK));
                CandidateConfig::from(fallback_config())
            }
            Err(e) => {
                warn!(error = %e, "parse collaborator failed");
                self.push(Notice::error(notice::PARSE_FAILED));
                return None;
            }
        };

        self.draft.apply_candidate(ticket, candidate).into_option()
    }

    // ===== 백테스트 =====

    /// 현재 설정으로 백테스트를 실행합니다. 적용되면 `true`.
    pub async fn run_backtest(&mut self) -> bool {
        let Some((ticket, snapshot)) = self.begin_backtest() else {
            return false;
        };
        let outcome = self
            .collaborators
            .run(&snapshot)
            .instrument(draft_span!("backtest", ticket.generation, snapshot.market.market_type))
            .await;
        self.complete_backtest(ticket, outcome)
    }

    /// 전제조건을 확인하고 요청을 시작합니다. 위반 시 알림을 남기고 `None`.
    pub fn begin_backtest(&mut self) -> Option<(RequestTicket, studio_core::StrategyConfig)> {
        match self.draft.begin_backtest() {
            Ok(started) => {
                self.busy.running = true;
                Some(started)
            }
            Err(e) => {
                self.push(Notice::warning(e.to_string()));
                None
            }
        }
    }

    pub fn complete_backtest(
        &mut self,
        ticket: RequestTicket,
        outcome: ClientResult<studio_core::BacktestResult>,
    ) -> bool {
        if ticket.generation == self.draft.backtest_generation() {
            self.busy.running = false;
        }

        match outcome {
            Ok(result) => {
                let applied = self.draft.apply_result(ticket, result).is_applied();
                if applied {
                    info!(generation = ticket.generation, "backtest result applied");
                }
                applied
            }
            Err(e) => {
                if self.draft.is_current(&ticket) {
                    warn!(error = %e, "backtest collaborator failed");
                    self.push(Notice::error(format!("{}: {}", notice::BACKTEST_FAILED, e)));
                }
                false
            }
        }
    }

    // ===== 분석 =====

    /// 현재 설정과 결과를 분석합니다.
    pub async fn analyze(&mut self) -> bool {
        let Some(result) = self.draft.result().cloned() else {
            self.push(Notice::warning(notice::NO_RESULT));
            return false;
        };
        let config = self.draft.config().clone();
        self.request_analysis(&config, &result).await
    }

    /// 보관된 전략을 분석합니다.
    pub async fn analyze_saved(&mut self, id: &str) -> bool {
        let Some(saved) = self.archive.iter().find(|s| s.id == id).cloned() else {
            self.push(Notice::warning(format!("{}: {}", notice::NOT_IN_ARCHIVE, id)));
            return false;
        };
        self.request_analysis(&saved.config, &saved.result).await
    }

    async fn request_analysis(
        &mut self,
        config: &studio_core::StrategyConfig,
        result: &studio_core::BacktestResult,
    ) -> bool {
        self.busy.analyzing = true;
        self.analysis = None;
        let outcome = self.collaborators.analyze(config, result).await;
        self.busy.analyzing = false;

        match outcome {
            Ok(text) => {
                self.analysis = Some(text);
                true
            }
            Err(e) => {
                warn!(error = %e, "analysis collaborator failed");
                self.analysis = Some(notice::ANALYSIS_FAILED.to_string());
                self.push(Notice::error(notice::ANALYSIS_FAILED));
                false
            }
        }
    }

    pub fn close_analysis(&mut self) {
        self.analysis = None;
    }

    // ===== 저장 =====

    /// 저장 대화상자를 엽니다. 결과가 없으면 열지 않습니다.
    pub fn open_save_form(&mut self) -> bool {
        if self.draft.result().is_none() {
            self.push(Notice::warning(notice::NO_RESULT));
            return false;
        }
        self.save_form.open = true;
        true
    }

    pub fn cancel_save(&mut self) {
        self.save_form = SaveForm::default();
    }

    /// 현재 설정과 결과를 보관합니다.
    ///
    /// 이름이 비어 있으면 네트워크 호출 없이 거부합니다. 성공하면 폼을 비우고
    /// 보관 목록 맨 앞에 추가합니다.
    pub async fn save(&mut self, name: &str, description: &str) -> Option<SavedStrategy> {
        self.save_form.name = name.to_string();
        self.save_form.description = description.to_string();

        let Some(result) = self.draft.result().cloned() else {
            self.push(Notice::warning(notice::NO_RESULT));
            return None;
        };
        let request = NewSavedStrategy::new(
            name.trim(),
            description.trim(),
            self.draft.config().clone(),
            result,
        );
        if let Err(e) = request.validate_name() {
            self.push(Notice::warning(e.to_string()));
            return None;
        }

        match self.collaborators.create(&request).await {
            Ok(saved) => {
                info!(id = %saved.id, name = %saved.name, "strategy saved");
                self.save_form = SaveForm::default();
                self.archive.insert(0, saved.clone());
                self.push(Notice::info(notice::SAVED));
                Some(saved)
            }
            Err(e) => {
                warn!(error = %e, "archive create failed");
                self.push(Notice::error(format!("{}: {}", notice::SAVE_FAILED, e)));
                None
            }
        }
    }

    // ===== 보관 목록 =====

    pub async fn refresh_archive(&mut self) -> bool {
        match self.collaborators.list().await {
            Ok(list) => {
                self.archive = list;
                true
            }
            Err(e) => {
                warn!(error = %e, "archive list failed");
                self.push(Notice::error(notice::ARCHIVE_FAILED));
                false
            }
        }
    }

    /// 보관된 전략을 삭제합니다. 성공하면 해당 레코드만 로컬 목록에서 제거합니다.
    pub async fn delete_saved(&mut self, id: &str) -> bool {
        match self.collaborators.delete(id).await {
            Ok(()) => {
                self.archive.retain(|s| s.id != id);
                info!(id, "strategy deleted");
                true
            }
            Err(e) => {
                warn!(error = %e, id, "archive delete failed");
                self.push(Notice::error(notice::DELETE_FAILED));
                false
            }
        }
    }
}
