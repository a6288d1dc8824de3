use serde::{Deserialize, Serialize};

/// Structured audit of one consultation, as produced by the extraction
/// step. Immutable after creation; ownership passes to the caller.
///
/// All seven fields are mandatory: a model response missing one, or
/// carrying a non-numeric score, fails deserialization instead of being
/// partially accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultationReport {
    /// 50字以内的对话摘要
    pub summary: String,
    /// 客户意向等级: 高/中/低
    pub customer_intent: String,
    /// 销售评分 0-100
    pub sales_score: i64,
    /// 客户核心痛点
    pub pain_points: String,
    /// 咨询师做得好的地方
    pub good_points: String,
    /// 咨询师的失误点
    pub bad_points: String,
    /// 下一步跟进建议
    pub next_step: String,
}

impl ConsultationReport {
    pub fn validate(&self) -> Result<(), ReportValidationError> {
        if !(0..=100).contains(&self.sales_score) {
            return Err(ReportValidationError::ScoreOutOfRange(self.sales_score));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReportValidationError {
    #[error("sales score {0} is outside 0-100")]
    ScoreOutOfRange(i64),
}
