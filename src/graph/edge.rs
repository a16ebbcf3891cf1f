//! 边定义
//!
//! 有向或无向、可带名称和整数权重的边；允许平行边

use crate::graph::node::NodeId;
use serde::{Deserialize, Serialize};

/// 边 ID（按插入顺序递增）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub usize);

impl EdgeId {
    pub fn new(id: usize) -> Self {
        Self(id)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for EdgeId {
    fn from(id: usize) -> Self {
        Self(id)
    }
}

/// 边
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// 边 ID
    id: EdgeId,
    /// 源节点
    src: NodeId,
    /// 目标节点
    dst: NodeId,
    /// 是否有向
    directed: bool,
    /// 边名称
    name: Option<String>,
    /// 权重，缺省表示无权边
    weight: Option<i64>,
}

impl Edge {
    /// 创建新边
    pub fn new(
        id: EdgeId,
        src: NodeId,
        dst: NodeId,
        directed: bool,
        name: Option<String>,
        weight: Option<i64>,
    ) -> Self {
        Self {
            id,
            src,
            dst,
            directed,
            name,
            weight,
        }
    }

    /// 获取边 ID
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// 获取源节点
    pub fn src(&self) -> NodeId {
        self.src
    }

    /// 获取目标节点
    pub fn dst(&self) -> NodeId {
        self.dst
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// 获取边名称
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// 获取原始权重
    pub fn weight(&self) -> Option<i64> {
        self.weight
    }

    /// 最短路径算法使用的代价：无权边按 1 计
    pub fn cost(&self) -> i64 {
        self.weight.unwrap_or(1)
    }

    /// 能否沿此边从 `from` 走到 `to`
    pub fn leads(&self, from: NodeId, to: NodeId) -> bool {
        (self.src == from && self.dst == to)
            || (!self.directed && self.src == to && self.dst == from)
    }

    /// 从 `from` 出发沿此边到达的节点；不可通行时返回 None
    pub fn head_from(&self, from: NodeId) -> Option<NodeId> {
        if self.src == from {
            Some(self.dst)
        } else if !self.directed && self.dst == from {
            Some(self.src)
        } else {
            None
        }
    }
}
