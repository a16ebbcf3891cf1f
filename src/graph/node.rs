//! 节点定义

use crate::graph::edge::EdgeId;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// 节点 ID，同时也是节点在图中的稠密下标（按创建顺序从 0 开始）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for NodeId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 节点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// 节点 ID
    id: NodeId,
    /// 节点名称（唯一，创建后不可变）
    name: String,
    /// 关联边（按插入顺序）
    edges: SmallVec<[EdgeId; 4]>,
}

impl Node {
    /// 创建新节点
    pub(crate) fn new(id: NodeId, name: String) -> Self {
        Self {
            id,
            name,
            edges: SmallVec::new(),
        }
    }

    /// 获取节点 ID
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// 获取节点下标
    pub fn index(&self) -> usize {
        self.id.index()
    }

    /// 获取节点名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 关联边，按插入顺序
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub(crate) fn attach(&mut self, edge: EdgeId) {
        self.edges.push(edge);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_basic() {
        let mut n = Node::new(NodeId::new(3), "Hamburg".to_string());
        assert_eq!(n.index(), 3);
        assert_eq!(n.name(), "Hamburg");
        assert!(n.edges().is_empty());

        n.attach(EdgeId::new(0));
        n.attach(EdgeId::new(5));
        assert_eq!(n.edges(), &[EdgeId::new(0), EdgeId::new(5)]);
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId::from(7).to_string(), "#7");
    }
}
