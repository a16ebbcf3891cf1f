//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("节点不存在: {0}")]
    NodeNotFound(String),

    #[error("无效的节点名称: {0:?}")]
    InvalidName(String),

    #[error("检测到负权环 (经过节点 {node})")]
    NegativeCycle { node: String },

    #[error("无效的容量: {from} -> {to} 的容量为 {capacity}, 容量必须大于 0")]
    InvalidCapacity {
        from: String,
        to: String,
        capacity: i64,
    },

    #[error("源点与汇点不能相同: {0}")]
    InvalidFlowEndpoints(String),

    #[error("算法错误: {0}")]
    AlgorithmError(String),

    #[error("配置错误: {0}")]
    ConfigError(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigError(err.to_string())
    }
}
