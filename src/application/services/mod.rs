mod analysis_service;

pub use analysis_service::{AnalysisConfig, AnalysisError, AnalysisService, ConsultationAnalysis};
