//! 内容配置加载，支持环境变量替换
//!
//! ```yaml
//! provider_chain: ${PROVIDER_CHAIN:altipla, hotelbeds}
//! ```

use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use dotenvy::dotenv;
use regex::{Captures, Regex};
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::debug;

use crate::chain::set_global_provider_chain;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
    #[error("Empty provider name at position {0}")]
    EmptyProvider(usize),
    #[error("Duplicate provider in chain: {0}")]
    DuplicateProvider(String),
}

/// 进程启动时读取的内容配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// 供应商优先级，靠前者优先
    #[serde(deserialize_with = "provider_list")]
    pub provider_chain: Vec<String>,
}

impl ContentConfig {
    pub fn new<I, S>(provider_chain: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            provider_chain: provider_chain.into_iter().map(Into::into).collect(),
        }
    }

    /// 检查供应商链：名称不能为空，也不能重复
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for (pos, name) in self.provider_chain.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(ConfigError::EmptyProvider(pos));
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::DuplicateProvider(name.clone()));
            }
        }
        Ok(())
    }

    /// 校验后写入全局供应商链
    pub fn apply(&self) -> Result<(), ConfigError> {
        self.validate()?;
        set_global_provider_chain(self.provider_chain.iter().cloned());
        Ok(())
    }
}

// 环境变量只能替换成字符串，所以同时接受 "a, b, c" 和 YAML 列表两种写法
fn provider_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Providers {
        List(Vec<String>),
        Joined(String),
        Empty(()),
    }

    Ok(match Providers::deserialize(deserializer)? {
        Providers::List(list) => list.into_iter().map(|s| s.trim().to_string()).collect(),
        Providers::Joined(joined) => joined
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        Providers::Empty(()) => Vec::new(),
    })
}

/// 替换 `${VAR}` 与 `${VAR:default}` 占位符
fn replace_vars(content: &str) -> String {
    // 生产环境可能没有 .env 文件
    let _ = dotenv();

    static VAR_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = VAR_REGEX.get_or_init(|| {
        Regex::new(r"\$\{([A-Z0-9_]+)(?::([^\}]*))?\}").expect("Invalid regex pattern")
    });

    re.replace_all(content, |caps: &Captures<'_>| {
        env::var(&caps[1])
            .ok()
            .or_else(|| caps.get(2).map(|m| m.as_str().to_string()))
            .unwrap_or_default()
    })
    .into_owned()
}

/// 从文件加载配置
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ContentConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let config = load_from_str(&content)?;
    debug!(path = %path.display(), chain = ?config.provider_chain, "Loaded content config");
    Ok(config)
}

/// 从字符串加载配置
pub fn load_from_str(content: &str) -> Result<ContentConfig, ConfigError> {
    let replaced = replace_vars(content);
    if replaced.trim().is_empty() {
        return Ok(ContentConfig::default());
    }
    let config: Option<ContentConfig> = serde_yaml::from_str(&replaced)?;
    Ok(config.unwrap_or_default())
}

/// 编译时嵌入配置文件
#[macro_export]
macro_rules! include_config {
    ($path:expr) => {
        $crate::config::load_from_str(include_str!($path))
    };
}

pub use crate::include_config;
