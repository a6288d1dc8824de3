mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AnalysisSettings, DashScopeSettings, LoggingSettings, OssSettings, RecordSettings, Settings,
    SettingsError,
};
