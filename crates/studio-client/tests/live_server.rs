//! 모의 협력자 서버를 띄워 HTTP 클라이언트로 전체 흐름을 검증합니다.

use std::sync::Arc;

use studio_api::{create_api_router, create_test_state};
use studio_client::{HttpCollaborator, NoticeLevel, Workbench};
use studio_core::{ClientConfig, ParamValue};

async fn spawn_server() -> String {
    let app = create_api_router().with_state(Arc::new(create_test_state()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn workbench() -> Workbench<HttpCollaborator> {
    let base_url = spawn_server().await;
    let collaborator = HttpCollaborator::new(&ClientConfig::new(base_url)).unwrap();
    Workbench::new(collaborator)
}

#[tokio::test]
async fn test_prompt_to_archive_round() {
    let mut bench = workbench().await;
    let period_before = bench.draft().config().period.clone();

    let replaced = bench
        .generate("코스닥 RSI 25 이하 매수, 손절 4%")
        .await
        .expect("candidate applied");
    assert!(replaced.market);
    assert!(replaced.parameters);
    assert!(!replaced.period);
    assert_eq!(bench.draft().config().period, period_before);
    assert_eq!(bench.draft().config().market.market_type, "KOSDAQ");

    let rows = bench.parameter_rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].1.semantic_id, "rsi_buy");
    assert_eq!(rows[0].1.value, ParamValue::Number(25.0));
    let sl_key = rows[1].0.clone();
    bench.edit_value(&sl_key, "6").unwrap();

    assert!(bench.run_backtest().await);
    assert!(bench.chart().is_some());
    assert_ne!(bench.stats_display().total_return, "-");

    assert!(bench.analyze().await);
    assert!(bench.analysis().unwrap().contains("손절"));

    assert!(bench.open_save_form());
    let first = bench.save("코스닥 RSI", "").await.unwrap();
    let second = bench.save("코스닥 RSI 2", "").await.unwrap();
    let third = bench.save("코스닥 RSI 3", "").await.unwrap();

    assert!(bench.refresh_archive().await);
    let ids: Vec<&str> = bench.archive().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec![third.id.as_str(), second.id.as_str(), first.id.as_str()]);

    assert!(bench.delete_saved(&second.id).await);
    assert_eq!(bench.archive().len(), 2);
    assert!(bench.refresh_archive().await);
    let ids: Vec<&str> = bench.archive().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec![third.id.as_str(), first.id.as_str()]);

    assert!(bench
        .notices()
        .iter()
        .all(|n| n.level != NoticeLevel::Error));
}

#[tokio::test]
async fn test_unknown_delete_keeps_archive() {
    let mut bench = workbench().await;
    bench.generate("rsi 30").await.unwrap();
    assert!(bench.run_backtest().await);
    bench.save("하나", "").await.unwrap();

    assert!(!bench.delete_saved("missing").await);
    assert_eq!(bench.archive().len(), 1);
    assert_eq!(bench.notices().last().unwrap().level, NoticeLevel::Error);
}

#[tokio::test]
async fn test_unrecognised_prompt_applies_fixed_response() {
    let mut bench = workbench().await;
    let replaced = bench.generate("알아서 해줘").await.unwrap();
    assert!(replaced.period && replaced.market && replaced.parameters);

    let config = bench.draft().config();
    assert_eq!(config.market.market_type, "NASDAQ");
    assert_eq!(config.parameters.len(), 4);
    assert!(bench.parameter_rows().iter().all(|(key, _)| key.is_fallback()));
}
