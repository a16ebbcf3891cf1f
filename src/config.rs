//! 图配置
//!
//! 节点命名规则等构图参数

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// 图配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// 拒绝空名称
    pub reject_empty_names: bool,
    /// 去除名称首尾空白
    pub trim_names: bool,
    /// 名称中不允许出现的字符
    pub reserved_chars: Vec<char>,
    /// 名称最大长度（字符数）
    pub max_name_len: Option<usize>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            reject_empty_names: true,
            trim_names: true,
            // 与 .gka 文本行语法的分隔符保持一致
            reserved_chars: vec![';', '(', ')', ':'],
            max_name_len: None,
        }
    }
}

impl GraphConfig {
    /// 不做任何校验的宽松配置
    pub fn permissive() -> Self {
        Self {
            reject_empty_names: false,
            trim_names: false,
            reserved_chars: Vec::new(),
            max_name_len: None,
        }
    }

    /// 从 JSON 字符串加载配置，缺省字段使用默认值
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 按命名规则规范化名称
    pub fn normalize_name<'a>(&self, name: &'a str) -> Result<&'a str> {
        let name = if self.trim_names { name.trim() } else { name };

        if self.reject_empty_names && name.is_empty() {
            return Err(Error::InvalidName(name.to_string()));
        }
        if name.chars().any(|c| self.reserved_chars.contains(&c)) {
            return Err(Error::InvalidName(name.to_string()));
        }
        if let Some(max) = self.max_name_len {
            if name.chars().count() > max {
                return Err(Error::InvalidName(name.to_string()));
            }
        }

        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let config = GraphConfig::default();

        assert_eq!(config.normalize_name("  Hamburg ").unwrap(), "Hamburg");
        assert!(matches!(
            config.normalize_name("   "),
            Err(Error::InvalidName(_))
        ));
        assert!(matches!(
            config.normalize_name("a;b"),
            Err(Error::InvalidName(_))
        ));
    }

    #[test]
    fn test_permissive() {
        let config = GraphConfig::permissive();
        assert_eq!(config.normalize_name("").unwrap(), "");
        assert_eq!(config.normalize_name(" x:y ").unwrap(), " x:y ");
    }

    #[test]
    fn test_from_json() {
        let config = GraphConfig::from_json(r#"{ "max_name_len": 3 }"#).unwrap();
        assert!(config.reject_empty_names);
        assert_eq!(config.max_name_len, Some(3));
        assert!(config.normalize_name("abcd").is_err());

        assert!(matches!(
            GraphConfig::from_json("{ not json"),
            Err(Error::ConfigError(_))
        ));
    }
}
