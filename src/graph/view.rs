//! 只读图视图
//!
//! 算法只依赖这一组查询接口，不关心底层是邻接表还是邻接矩阵

use super::node::NodeId;
use crate::error::{Error, Result};

/// 图的只读查询接口
pub trait GraphView {
    /// 节点数量
    fn node_count(&self) -> usize;

    /// 按名称查找节点
    fn node_id(&self, name: &str) -> Option<NodeId>;

    /// 获取节点名称
    fn node_name(&self, id: NodeId) -> Option<&str>;

    /// 一步可达的邻居（每个邻居只出现一次）
    fn neighbors(&self, id: NodeId) -> Vec<NodeId>;

    /// `from -> to` 方向的最小代价；不相连时返回 None
    fn weight(&self, from: NodeId, to: NodeId) -> Option<i64>;

    /// `from -> to` 方向显式权重的最小值，用作流网络容量；无权边不提供容量
    ///
    /// 默认与 `weight` 相同，能区分无权边的后端应覆盖。
    fn capacity(&self, from: NodeId, to: NodeId) -> Option<i64> {
        self.weight(from, to)
    }

    fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.weight(from, to).is_some()
    }

    /// 按名称解析节点，不存在时返回 `NodeNotFound`
    fn resolve(&self, name: &str) -> Result<NodeId> {
        self.node_id(name)
            .ok_or_else(|| Error::NodeNotFound(name.to_string()))
    }

    /// 把节点序列转换为名称序列
    fn names_of(&self, ids: &[NodeId]) -> Vec<String> {
        ids.iter()
            .map(|&id| self.node_name(id).unwrap_or_default().to_string())
            .collect()
    }
}
