//! 环境变量配置

use std::{collections::HashMap, env, io::Read};

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_API_KEY: &str = "secret-api-key-123";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT value {value:?}: {source}")]
    InvalidPort {
        value: String,
        source: std::num::ParseIntError,
    },
}

/// 服务配置
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// 变更接口所需的共享密钥 (`x-api-key`)
    pub api_key: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            api_key: DEFAULT_API_KEY.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// 从进程环境读取配置，缺失的值使用默认值
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 同 `from_env`，另外读取 `.env` 文件；进程环境变量优先
    pub fn load() -> Result<Self, ConfigError> {
        let file_vars = dotenvy::dotenv_iter()
            .map(dotenv_vars)
            .unwrap_or_default();
        Self::from_lookup(|key| env::var(key).ok().or_else(|| file_vars.get(key).cloned()))
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        // 空字符串视为未设置
        let lookup = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => defaults.port,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            api_key: lookup("API_KEY").unwrap_or(defaults.api_key),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 无法解析的行被跳过
fn dotenv_vars<R: Read>(iter: dotenvy::Iter<R>) -> HashMap<String, String> {
    iter.filter_map(Result::ok).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.api_key, "secret-api-key-123");
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn reads_port_and_api_key() {
        let config =
            Config::from_lookup(lookup_from(&[("PORT", "8080"), ("API_KEY", "s3cret")])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.api_key, "s3cret");
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup_from(&[("PORT", ""), ("API_KEY", "")])).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.api_key, "secret-api-key-123");
    }

    #[test]
    fn reads_values_from_dotenv_contents() {
        let contents = "# local overrides\nPORT=4000\nAPI_KEY=from-file\n";
        let vars = dotenv_vars(dotenvy::from_read_iter(contents.as_bytes()));
        let config = Config::from_lookup(|key| vars.get(key).cloned()).unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(config.api_key, "from-file");
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn rejects_non_numeric_port() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
    }
}
