use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use chairside::application::ports::{AuditExtractor, ExtractionError};
use chairside::infrastructure::llm::QwenAuditExtractor;

const DIALOGUE: &str = "【说话人 0】: 您好，请问您想咨询种植牙吗\n\n【说话人 1】: 好的，大概需要多少钱";

fn chat_response_with(content: &str) -> String {
    serde_json::json!({
        "choices": [{
            "message": {"role": "assistant", "content": content}
        }]
    })
    .to_string()
}

fn valid_report_content() -> String {
    r#"{
        "summary": "患者咨询种植牙，关注价格",
        "customer_intent": "高",
        "sales_score": 78,
        "pain_points": "嫌贵",
        "good_points": "方案讲解细致",
        "bad_points": "未确认预算",
        "next_step": "三天内电话回访"
    }"#
    .to_string()
}

async fn start_mock_model(
    response_status: u16,
    response_body: String,
) -> (String, Arc<AtomicUsize>, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_in_route = Arc::clone(&hits);

    let router = Router::new().route(
        "/chat/completions",
        post(move || {
            let hits = Arc::clone(&hits_in_route);
            let body = response_body.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                let status = axum::http::StatusCode::from_u16(response_status).unwrap();
                (status, body)
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, hits, shutdown_tx)
}

#[tokio::test]
async fn given_valid_model_output_when_extracting_then_typed_report_returned() {
    let (base_url, hits, shutdown_tx) =
        start_mock_model(200, chat_response_with(&valid_report_content())).await;

    let extractor = QwenAuditExtractor::new(&base_url, "test-key", "qwen-plus", 0.1);
    let report = extractor.extract(DIALOGUE).await.unwrap();

    assert_eq!(report.sales_score, 78);
    assert_eq!(report.customer_intent, "高");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_empty_transcript_when_extracting_then_rejected_without_a_model_call() {
    let (base_url, hits, shutdown_tx) =
        start_mock_model(200, chat_response_with(&valid_report_content())).await;

    let extractor = QwenAuditExtractor::new(&base_url, "test-key", "qwen-plus", 0.1);

    for input in ["", "   ", "\n\t "] {
        let result = extractor.extract(input).await;
        assert!(matches!(result, Err(ExtractionError::EmptyInput)));
    }
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_non_numeric_score_when_extracting_then_schema_mismatch_not_garbage_report() {
    let content = valid_report_content().replace("78", "\"NotANumber\"");
    let (base_url, _hits, shutdown_tx) = start_mock_model(200, chat_response_with(&content)).await;

    let extractor = QwenAuditExtractor::new(&base_url, "test-key", "qwen-plus", 0.1);
    let result = extractor.extract(DIALOGUE).await;

    assert!(matches!(result, Err(ExtractionError::SchemaMismatch(_))));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_out_of_range_score_when_extracting_then_schema_mismatch() {
    let content = valid_report_content().replace("78", "150");
    let (base_url, _hits, shutdown_tx) = start_mock_model(200, chat_response_with(&content)).await;

    let extractor = QwenAuditExtractor::new(&base_url, "test-key", "qwen-plus", 0.1);
    let result = extractor.extract(DIALOGUE).await;

    assert!(matches!(result, Err(ExtractionError::SchemaMismatch(_))));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_code_fenced_json_when_extracting_then_still_accepted() {
    let fenced = format!("```json\n{}\n```", valid_report_content());
    let (base_url, _hits, shutdown_tx) = start_mock_model(200, chat_response_with(&fenced)).await;

    let extractor = QwenAuditExtractor::new(&base_url, "test-key", "qwen-plus", 0.1);
    let report = extractor.extract(DIALOGUE).await.unwrap();

    assert_eq!(report.sales_score, 78);
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_model_api_error_when_extracting_then_api_request_failed() {
    let (base_url, _hits, shutdown_tx) =
        start_mock_model(500, "internal error".to_string()).await;

    let extractor = QwenAuditExtractor::new(&base_url, "test-key", "qwen-plus", 0.1);
    let result = extractor.extract(DIALOGUE).await;

    assert!(matches!(result, Err(ExtractionError::ApiRequestFailed(_))));
    shutdown_tx.send(()).ok();
}
