use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{AuditExtractor, ExtractionError};
use crate::domain::ConsultationReport;

/// Fixed audit rubric. Strict scoring, mandatory objection identification,
/// actionable phrasing suggestions; the output field list keeps the model
/// on the report schema.
const AUDIT_SYSTEM_PROMPT: &str = "\
你是一名专业的口腔门诊运营督导（Supervisor）。
任务：根据咨询录音文本，对咨询师的专业性、沟通技巧和销售逻辑进行深度审计。
原则：
1. 评分严格：满分100，及格60。未挖掘出预算或病史的一律不及格。
2. 痛点精准：必须指出客户最担心的问题（如怕痛、嫌贵、不信任）。
3. 建议落地：给出具体的话术改进建议。
输出要求：仅输出一个 JSON 对象，字段为
summary（50字以内的对话摘要）、customer_intent（客户意向等级: 高/中/低）、
sales_score（销售评分 0-100，整数）、pain_points（客户核心痛点）、
good_points（咨询师做得好的地方）、bad_points（咨询师的失误点）、
next_step（下一步跟进建议）。";

/// Audit extractor backed by a DashScope chat model through the
/// OpenAI-compatible endpoint, with JSON-constrained output.
///
/// Temperature is pinned low so repeated audits of the same transcript
/// stay consistent.
pub struct QwenAuditExtractor {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl QwenAuditExtractor {
    pub fn new(base_url: &str, api_key: &str, model: &str, temperature: f32) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            temperature,
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    response_format: ResponseFormat<'a>,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Some models wrap the object in a markdown fence even when asked for
/// bare JSON; accept that without accepting free-form prose.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

#[async_trait]
impl AuditExtractor for QwenAuditExtractor {
    async fn extract(&self, dialogue_text: &str) -> Result<ConsultationReport, ExtractionError> {
        // Auditing silence is meaningless; reject before spending a call.
        if dialogue_text.trim().is_empty() {
            return Err(ExtractionError::EmptyInput);
        }

        let url = format!("{}/chat/completions", self.base_url);
        let user_content = format!("【录音文本】：\n{}", dialogue_text);
        let body = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            response_format: ResponseFormat { kind: "json_object" },
            messages: [
                ChatMessage {
                    role: "system",
                    content: AUDIT_SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_content,
                },
            ],
        };

        tracing::debug!(model = %self.model, chars = dialogue_text.len(), "Requesting audit");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ExtractionError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ExtractionError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| ExtractionError::ApiRequestFailed(format!("parse response: {}", e)))?;

        let content = chat
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| ExtractionError::SchemaMismatch("no choices returned".to_string()))?;

        let report: ConsultationReport = serde_json::from_str(strip_code_fence(content))
            .map_err(|e| ExtractionError::SchemaMismatch(e.to_string()))?;
        report
            .validate()
            .map_err(|e| ExtractionError::SchemaMismatch(e.to_string()))?;

        tracing::info!(sales_score = report.sales_score, "Audit report extracted");

        Ok(report)
    }
}
