use common_test_utils::*;

use std::io::Write;
use tempfile::NamedTempFile;
use trading_analysis::indicator::macd::SignalLineMode;
use trading_analysis::{AnalysisConfig, ConfigError, ConfigFormat, ConfigLoader, SuggestionEngine};

fn write_config(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_partial_toml_config_keeps_defaults() {
    let file = write_config(
        ".toml",
        r#"
rsi_period = 7
signal_line = "single_point"
validity_hours = 4
"#,
    );
    let config: AnalysisConfig =
        ConfigLoader::load_from_file(file.path(), ConfigFormat::Auto).unwrap();
    assert_eq!(config.rsi_period, 7);
    assert_eq!(config.signal_line, SignalLineMode::SinglePoint);
    assert_eq!(config.macd_slow, 26);

    let engine = SuggestionEngine::new(config, fixed_clock()).unwrap();
    let suggestion = engine.analyze("CFG", &create_flat_points(10, 5.0, 1.0)).unwrap();
    assert_eq!(suggestion.valid_until, fixed_clock().0 + chrono::Duration::hours(4));
}

#[test]
fn test_json_config_validation_failure() {
    let file = write_config(".json", r#"{ "macd_fast": 30, "macd_slow": 26 }"#);
    let result: Result<AnalysisConfig, _> =
        ConfigLoader::load_from_file(file.path(), ConfigFormat::Auto);
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
fn test_missing_config_file() {
    let result: Result<AnalysisConfig, _> = ConfigLoader::load_from_file(
        std::path::Path::new("/nonexistent/analysis.toml"),
        ConfigFormat::Toml,
    );
    assert!(matches!(result, Err(ConfigError::FileError(_))));
}
