mod qwen_auditor;

pub use qwen_auditor::QwenAuditExtractor;
