use std::env;
use std::path::Path;
use std::sync::Arc;

use chairside::application::ports::RecordStore;
use chairside::application::services::{AnalysisConfig, AnalysisService};
use chairside::config::{Environment, Settings};
use chairside::domain::{AudioAsset, ConsultationRecord};
use chairside::infrastructure::asr::ParaformerClient;
use chairside::infrastructure::llm::QwenAuditExtractor;
use chairside::infrastructure::observability::{TracingConfig, init_tracing};
use chairside::infrastructure::persistence::JsonlRecordStore;
use chairside::infrastructure::storage::OssBlobStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment: Environment = env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let settings = Settings::load(environment)?;

    init_tracing(TracingConfig {
        environment: environment.to_string(),
        json_format: settings.logging.enable_json,
    });

    let mut args = env::args().skip(1);
    let command = args.next().ok_or_else(|| {
        anyhow::anyhow!("usage: chairside <audio-file|history> [consultant] [patient] [deal-outcome]")
    })?;

    let record_store = JsonlRecordStore::new(&settings.records.path)?;

    if command == "history" {
        for record in record_store.load_all().await?.iter().rev() {
            println!(
                "{} | {} vs {} | {}分 | {}",
                record.recorded_at.format("%Y-%m-%d %H:%M"),
                record.consultant,
                record.patient,
                record.report.sales_score,
                record.report.summary,
            );
        }
        return Ok(());
    }

    let audio_path = command;
    let consultant = args.next().unwrap_or_else(|| "未登记".to_string());
    let patient = args.next().unwrap_or_else(|| "未登记".to_string());
    let deal_outcome = args.next().unwrap_or_else(|| "未知".to_string());

    let blob_store = Arc::new(OssBlobStore::new(
        &settings.oss.endpoint,
        &settings.oss.region,
        &settings.oss.bucket,
        &settings.oss.access_key_id,
        &settings.oss.access_key_secret,
        settings.url_ttl(),
    )?);
    let transcription = Arc::new(ParaformerClient::new(
        &settings.dashscope.base_url,
        &settings.dashscope.api_key,
        &settings.dashscope.asr_model,
    ));
    let extractor = Arc::new(QwenAuditExtractor::new(
        &settings.dashscope.compatible_base_url,
        &settings.dashscope.api_key,
        &settings.dashscope.chat_model,
        settings.dashscope.temperature,
    ));

    let service = AnalysisService::new(
        blob_store,
        transcription,
        extractor,
        AnalysisConfig {
            language_hints: settings.analysis.language_hints.clone(),
            speaker_count: settings.analysis.speaker_count,
            poll_interval: settings.poll_interval(),
            poll_timeout: settings.poll_timeout(),
            min_transcript_chars: settings.analysis.min_transcript_chars,
        },
    );

    let filename = Path::new(&audio_path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("recording")
        .to_string();
    let asset = AudioAsset::new(tokio::fs::read(&audio_path).await?, filename);
    tracing::info!(
        file = %audio_path,
        bytes = asset.bytes.len(),
        content_type = asset.content_type.as_mime(),
        "Starting consultation analysis"
    );

    let analysis = service.analyze(&asset.bytes, &asset.filename).await?;
    let dialogue_text = analysis.dialogue.render();

    println!("=== 对话实录 ===\n{}\n", dialogue_text);
    println!("=== 审计报告 ===");
    println!("摘要: {}", analysis.report.summary);
    println!("客户意向: {}", analysis.report.customer_intent);
    println!("评分: {}", analysis.report.sales_score);
    println!("痛点: {}", analysis.report.pain_points);
    println!("优点: {}", analysis.report.good_points);
    println!("失误点: {}", analysis.report.bad_points);
    println!("下一步建议: {}", analysis.report.next_step);

    let record = ConsultationRecord::new(
        consultant,
        patient,
        deal_outcome,
        analysis.report,
        dialogue_text,
    );
    record_store.append(&record).await?;
    tracing::info!(path = %settings.records.path, "Record saved");

    Ok(())
}
