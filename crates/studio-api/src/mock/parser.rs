//! 키워드 기반 AI 파싱 모의 구현.
//!
//! 프롬프트에서 시장, 섹터, 지표, 기간 키워드를 찾아 후보 설정을 만듭니다.
//! 파라미터는 항상 라이브러리 ID로, 섹터는 해당 시장의 유효 섹터로만 구성합니다.
//! 인식한 키워드가 하나도 없으면 고정 NASDAQ 응답을 돌려줍니다.

use chrono::NaiveDate;
use studio_core::{
    find_market, CandidateConfig, Market, ParamValue, Parameter, ParameterCategory,
    ParameterLibrary, Period,
};
use tracing::debug;

/// (시장 유형, 키워드)
const MARKET_KEYWORDS: &[(&str, &[&str])] = &[
    ("KOSPI", &["kospi", "코스피", "유가증권"]),
    ("KOSDAQ", &["kosdaq", "코스닥"]),
    ("NASDAQ", &["nasdaq", "나스닥", "미국", "미장"]),
    ("Crypto", &["crypto", "bitcoin", "코인", "비트코인", "가상자산", "암호화폐"]),
];

/// (시장 유형, 키워드, 섹터)
const SECTOR_ALIASES: &[(&str, &str, &str)] = &[
    ("KOSPI", "삼성전자", "반도체"),
    ("KOSPI", "하이닉스", "반도체"),
    ("KOSPI", "현대차", "자동차"),
    ("KOSPI", "배터리", "2차전지"),
    ("KOSDAQ", "로봇", "AI/로봇"),
    ("KOSDAQ", "ai", "AI/로봇"),
    ("NASDAQ", "반도체", "Semiconductor"),
    ("NASDAQ", "엔비디아", "Semiconductor"),
    ("NASDAQ", "빅테크", "Big Tech (MAGA)"),
    ("NASDAQ", "ai", "AI & BigData"),
    ("NASDAQ", "전기차", "EV (Electric Vehicle)"),
    ("Crypto", "비트코인", "Layer 1"),
    ("Crypto", "이더리움", "Layer 1"),
    ("Crypto", "밈", "Meme Coin"),
];

/// (키워드, 라이브러리 ID). ID가 하나인 규칙은 키워드 뒤의 숫자를 값으로 씁니다.
const INDICATOR_RULES: &[(&[&str], &[&str])] = &[
    (&["골든크로스", "golden cross"], &["ma_5", "ma_20"]),
    (&["이동평균", "이평", "ma"], &["ma_20", "ma_60"]),
    (&["macd"], &["macd_fast", "macd_slow"]),
    (&["cci"], &["cci"]),
    (&["adx"], &["adx"]),
    (&["rsi"], &["rsi_buy"]),
    (&["과매수"], &["rsi_sell"]),
    (&["스토캐스틱", "stochastic"], &["stoch_k", "stoch_d"]),
    (&["윌리엄스", "williams"], &["williams"]),
    (&["볼린저", "bollinger"], &["bb_len", "bb_mult"]),
    (&["atr"], &["atr"]),
    (&["켈트너", "keltner"], &["keltner"]),
    (&["obv"], &["obv"]),
    (&["mfi"], &["mfi"]),
    (&["거래량", "volume"], &["volume_ratio"]),
    (&["손절", "stop loss"], &["sl"]),
    (&["익절", "take profit"], &["tp"]),
    (&["트레일링", "trailing"], &["trailing"]),
    (&["비중", "allocation"], &["max_alloc"]),
];

/// 키워드와 숫자 사이에 허용하는 최대 문자 수.
const NUMBER_WINDOW: usize = 8;

/// 프롬프트를 후보 설정으로 변환합니다.
pub fn parse_prompt(prompt: &str, library: &ParameterLibrary, today: NaiveDate) -> CandidateConfig {
    let text = prompt.to_lowercase();

    let mut candidate = CandidateConfig::empty();
    if let Some(period) = detect_period(&text, today) {
        candidate = candidate.with_period(period);
    }
    if let Some(market) = detect_market(&text) {
        candidate = candidate.with_market(market);
    }
    let parameters = detect_parameters(&text, library);
    if !parameters.is_empty() {
        candidate = candidate.with_parameters(parameters);
    }

    if candidate.is_empty() {
        debug!("인식한 키워드 없음, 고정 응답 사용");
        return fixed_response();
    }
    candidate
}

/// 키워드를 찾지 못했을 때의 고정 응답.
pub fn fixed_response() -> CandidateConfig {
    CandidateConfig::empty()
        .with_period(Period::new("2023-01-01", "2023-12-31"))
        .with_market(Market::new("NASDAQ", ["반도체", "AI", "소프트웨어"]))
        .with_parameters(vec![
            Parameter::new("ma_short", ParameterCategory::Trend, "단기 이동평균(MA)", 5)
                .with_unit("일")
                .with_description("골든크로스 진입용"),
            Parameter::new("ma_long", ParameterCategory::Trend, "장기 이동평균(MA)", 60)
                .with_unit("일")
                .with_description("추세 판단용 (20->60 변경됨)"),
            Parameter::new("rsi_buy", ParameterCategory::Oscillator, "RSI 매수", 30)
                .with_unit("이하")
                .with_description("과매도 구간"),
            Parameter::new("stop_loss", ParameterCategory::Risk, "손절", 3)
                .with_unit("%")
                .with_description("타이트한 손절 관리"),
        ])
}

/// 키워드의 첫 출현 위치.
///
/// ASCII 키워드는 단어 단위로, 그 외는 부분 문자열로 찾습니다.
fn keyword_position(text: &str, keyword: &str) -> Option<usize> {
    if !keyword.chars().all(|c| c.is_ascii_alphanumeric()) {
        return text.find(keyword);
    }
    text.match_indices(keyword)
        .map(|(index, _)| index)
        .find(|&index| {
            let before = text[..index].chars().next_back();
            let after = text[index + keyword.len()..].chars().next();
            !before.is_some_and(|c| c.is_ascii_alphanumeric())
                && !after.is_some_and(|c| c.is_ascii_alphanumeric())
        })
}

fn mentions(text: &str, keyword: &str) -> bool {
    keyword_position(text, keyword).is_some()
}

/// 키워드 바로 뒤(공백 등 몇 글자 이내)에 나오는 숫자.
fn number_after(text: &str, keyword: &str) -> Option<f64> {
    let start = keyword_position(text, keyword)? + keyword.len();
    let rest = &text[start..];
    let digits: String = rest
        .chars()
        .enumerate()
        .skip_while(|(i, c)| *i < NUMBER_WINDOW && !c.is_ascii_digit())
        .map(|(_, c)| c)
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.trim_end_matches('.').parse().ok()
}

fn detect_period(text: &str, today: NaiveDate) -> Option<Period> {
    if let Some(months) = recent_months(text) {
        return Some(Period::last_months(today, months));
    }

    text.split(|c: char| !c.is_ascii_digit())
        .filter(|token| token.len() == 4)
        .filter_map(|token| token.parse::<i32>().ok())
        .find(|year| (2000..=2099).contains(year))
        .map(|year| Period::new(format!("{}-01-01", year), format!("{}-12-31", year)))
}

/// "최근 N년", "최근 N개월".
fn recent_months(text: &str) -> Option<u32> {
    let start = text.find("최근")? + "최근".len();
    let rest = text[start..].trim_start();
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    let count: u32 = digits.parse().ok()?;
    let unit = rest[digits.len()..].trim_start();
    if unit.starts_with("개월") {
        Some(count)
    } else if unit.starts_with('년') {
        count.checked_mul(12)
    } else {
        None
    }
}

fn detect_market(text: &str) -> Option<Market> {
    let market_type = MARKET_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| mentions(text, k)))
        .map(|(market_type, _)| *market_type)
        .or_else(|| {
            SECTOR_ALIASES
                .iter()
                .find(|(_, keyword, _)| mentions(text, keyword))
                .map(|(market_type, _, _)| *market_type)
        })?;
    let info = find_market(market_type)?;

    let mut sectors: Vec<&str> = info
        .sectors
        .iter()
        .copied()
        .filter(|sector| text.contains(&sector.to_lowercase()))
        .collect();
    sectors.extend(
        SECTOR_ALIASES
            .iter()
            .filter(|(m, keyword, _)| *m == market_type && mentions(text, keyword))
            .map(|(_, _, sector)| *sector)
            .filter(|sector| info.has_sector(sector)),
    );

    Some(Market::new(market_type, sectors))
}

fn detect_parameters(text: &str, library: &ParameterLibrary) -> Vec<Parameter> {
    let mut parameters: Vec<Parameter> = Vec::new();

    for (keywords, ids) in INDICATOR_RULES {
        let Some(keyword) = keywords.iter().find(|k| mentions(text, k)) else {
            continue;
        };
        let value = if ids.len() == 1 {
            number_after(text, keyword)
        } else {
            None
        };

        for id in *ids {
            if parameters.iter().any(|p| p.semantic_id == *id) {
                continue;
            }
            let Some(entry) = library.find(id) else {
                continue;
            };
            let mut parameter = entry.to_parameter();
            if let Some(value) = value {
                parameter.value = ParamValue::Number(value);
            }
            parameters.push(parameter);
        }
    }

    parameters
}
