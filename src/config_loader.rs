use log::{debug, error, info, warn};
use serde::de::DeserializeOwned;
use std::path::Path;

/// 설정 로드 오류
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// 파일 오류
    #[error("설정 파일 오류: {0}")]
    FileError(String),
    /// 파싱 오류
    #[error("설정 파싱 오류: {0}")]
    ParseError(String),
    /// 유효성 검사 오류
    #[error("설정 유효성 검사 오류: {0}")]
    ValidationError(String),
}

/// 설정 로드 결과
pub type ConfigResult<T> = Result<T, ConfigError>;

/// 설정 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON 형식
    Json,
    /// TOML 형식
    Toml,
    /// 자동 감지 (파일 확장자로부터)
    Auto,
}

/// 설정 유효성 검사 트레이트
pub trait ConfigValidation {
    /// 설정 유효성 검사
    fn validate(&self) -> ConfigResult<()>;
}

/// 설정 파일 로더
#[derive(Debug)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// 파일에서 설정 로드
    ///
    /// # Arguments
    /// * `path` - 설정 파일 경로
    /// * `format` - 설정 파일 형식 (Auto면 확장자로 판단)
    ///
    /// # Returns
    /// * `ConfigResult<T>` - 설정 객체 또는 오류
    pub fn load_from_file<T>(path: &Path, format: ConfigFormat) -> ConfigResult<T>
    where
        T: DeserializeOwned + ConfigValidation,
    {
        debug!("설정 파일 로드 시작: {}", path.display());

        let format = match format {
            ConfigFormat::Auto => Self::detect_format(path)?,
            other => other,
        };

        let content = std::fs::read_to_string(path).map_err(|e| {
            error!("설정 파일 읽기 실패: {} - {}", path.display(), e);
            ConfigError::FileError(format!("파일 읽기 실패: {}", e))
        })?;

        let config = Self::load_from_string(&content, format)?;
        info!("설정 파일 로드 완료: {}", path.display());
        Ok(config)
    }

    /// 문자열에서 설정 로드
    ///
    /// # Arguments
    /// * `content` - 설정 문자열
    /// * `format` - 설정 형식 (Auto면 JSON을 먼저 시도)
    pub fn load_from_string<T>(content: &str, format: ConfigFormat) -> ConfigResult<T>
    where
        T: DeserializeOwned + ConfigValidation,
    {
        let config: T = match format {
            ConfigFormat::Json => Self::parse_json(content)?,
            ConfigFormat::Toml => Self::parse_toml(content)?,
            ConfigFormat::Auto => match Self::parse_json::<T>(content) {
                Ok(config) => config,
                Err(_) => Self::parse_toml(content)?,
            },
        };

        if let Err(e) = config.validate() {
            error!("설정 유효성 검사 실패: {}", e);
            return Err(e);
        }

        Ok(config)
    }

    /// JSON 파싱
    fn parse_json<T: DeserializeOwned>(content: &str) -> ConfigResult<T> {
        serde_json::from_str(content).map_err(|e| {
            warn!("JSON 파싱 실패: {}", e);
            ConfigError::ParseError(format!("JSON 파싱 실패: {}", e))
        })
    }

    /// TOML 파싱
    fn parse_toml<T: DeserializeOwned>(content: &str) -> ConfigResult<T> {
        toml::from_str(content).map_err(|e| {
            warn!("TOML 파싱 실패: {}", e);
            ConfigError::ParseError(format!("TOML 파싱 실패: {}", e))
        })
    }

    /// 파일 형식 감지
    fn detect_format(path: &Path) -> ConfigResult<ConfigFormat> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(ConfigFormat::Json),
            Some("toml") => Ok(ConfigFormat::Toml),
            _ => {
                warn!("지원되지 않는 파일 형식: {}", path.display());
                Err(ConfigError::FileError(format!(
                    "파일 형식을 감지할 수 없음: {}",
                    path.display()
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Deserialize)]
    struct TestConfig {
        pub name: String,
        pub period: i32,
    }

    impl ConfigValidation for TestConfig {
        fn validate(&self) -> ConfigResult<()> {
            if self.period <= 0 {
                return Err(ConfigError::ValidationError(
                    "period는 0보다 커야 합니다".to_string(),
                ));
            }
            Ok(())
        }
    }

    #[test]
    fn test_load_from_json_string() {
        let json = r#"{"name":"rsi","period":14}"#;
        let config =
            ConfigLoader::load_from_string::<TestConfig>(json, ConfigFormat::Json).unwrap();
        assert_eq!(config.name, "rsi");
        assert_eq!(config.period, 14);
    }

    #[test]
    fn test_load_auto_falls_back_to_toml() {
        let toml_str = r#"
            name = "macd"
            period = 26
        "#;
        let config =
            ConfigLoader::load_from_string::<TestConfig>(toml_str, ConfigFormat::Auto).unwrap();
        assert_eq!(config.name, "macd");
        assert_eq!(config.period, 26);
    }

    #[test]
    fn test_validation_error() {
        let json = r#"{"name":"rsi","period":0}"#;
        let result = ConfigLoader::load_from_string::<TestConfig>(json, ConfigFormat::Json);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "name: x").unwrap();
        let result = ConfigLoader::load_from_file::<TestConfig>(&path, ConfigFormat::Auto);
        assert!(matches!(result, Err(ConfigError::FileError(_))));
    }

    #[test]
    fn test_load_from_file_by_extension() {
        let dir = TempDir::new().unwrap();

        let json_path = dir.path().join("config.json");
        std::fs::write(&json_path, r#"{"name":"bband","period":20}"#).unwrap();
        let loaded =
            ConfigLoader::load_from_file::<TestConfig>(&json_path, ConfigFormat::Auto).unwrap();
        assert_eq!(loaded.period, 20);

        let toml_path = dir.path().join("config.toml");
        std::fs::write(&toml_path, "name = \"bband\"\nperiod = 20\n").unwrap();
        let loaded =
            ConfigLoader::load_from_file::<TestConfig>(&toml_path, ConfigFormat::Auto).unwrap();
        assert_eq!(loaded.name, "bband");
    }
}
