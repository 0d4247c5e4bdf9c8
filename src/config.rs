use std::str::FromStr;
use thiserror::Error;

/// 設定読み込みのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },
}

/// 起動時のカタログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// 1冊1行の一覧
    Summary,
    /// CatalogSnapshot の JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "summary" => Ok(OutputFormat::Summary),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

/// アプリケーション設定
///
/// 環境変数から読み込む。未設定の項目はデフォルト値を使う。
///
/// | 環境変数                   | デフォルト             |
/// |----------------------------|------------------------|
/// | `LIBRARY_LOG_FILTER`       | `library_catalog=info` |
/// | `LIBRARY_SEED_SAMPLE_DATA` | `true`                 |
/// | `LIBRARY_OUTPUT`           | `summary`              |
///
/// `RUST_LOG` が設定されている場合はそちらがログフィルタとして優先される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub log_filter: String,
    pub seed_sample_data: bool,
    pub output: OutputFormat,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let log_filter =
            lookup("LIBRARY_LOG_FILTER").unwrap_or_else(|| "library_catalog=info".into());

        let seed_sample_data = match lookup("LIBRARY_SEED_SAMPLE_DATA") {
            None => true,
            Some(value) => parse_bool(&value).ok_or(ConfigError::InvalidValue {
                var: "LIBRARY_SEED_SAMPLE_DATA",
                value,
            })?,
        };

        let output = match lookup("LIBRARY_OUTPUT") {
            None => OutputFormat::Summary,
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                var: "LIBRARY_OUTPUT",
                value,
            })?,
        };

        Ok(Self {
            log_filter,
            seed_sample_data,
            output,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.log_filter, "library_catalog=info");
        assert!(config.seed_sample_data);
        assert_eq!(config.output, OutputFormat::Summary);
    }

    #[test]
    fn test_overrides_from_env() {
        let config = config_from(&[
            ("LIBRARY_LOG_FILTER", "library_catalog=debug"),
            ("LIBRARY_SEED_SAMPLE_DATA", "off"),
            ("LIBRARY_OUTPUT", "json"),
        ])
        .unwrap();
        assert_eq!(config.log_filter, "library_catalog=debug");
        assert!(!config.seed_sample_data);
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let err = config_from(&[("LIBRARY_SEED_SAMPLE_DATA", "maybe")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                var: "LIBRARY_SEED_SAMPLE_DATA",
                value: "maybe".to_string(),
            }
        );

        let err = config_from(&[("LIBRARY_OUTPUT", "xml")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var: "LIBRARY_OUTPUT", .. }));
    }
}
