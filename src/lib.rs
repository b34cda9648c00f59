pub mod analyzer;
pub mod config;
pub mod error;
pub mod indicator;
pub mod model;
pub mod pattern;
pub mod series;
pub mod source;
pub mod strategy;

/// 설정 로더
pub mod config_loader;

pub use config::AnalysisConfig;
pub use config_loader::{ConfigError, ConfigFormat, ConfigLoader, ConfigResult, ConfigValidation};
pub use error::{AnalysisError, AnalysisResult};
pub use model::{Action, HistoricalPoint, TechnicalIndicators, TradingSuggestion};
pub use source::{Clock, FixedClock, HistoricalDataSource, SystemClock};
pub use strategy::SuggestionEngine;
