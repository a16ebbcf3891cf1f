//! 路径结果

use crate::graph::{GraphView, NodeId};
use serde::{Deserialize, Serialize};

/// 路径结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathResult {
    /// 路径上的节点序列（含起点和终点）
    pub nodes: Vec<NodeId>,
    /// 节点名称序列
    pub names: Vec<String>,
    /// 路径长度（边数）
    pub length: usize,
    /// 路径总代价（沿途每一步取最小权重，无权边按 1 计）
    pub total_cost: i64,
}

impl PathResult {
    /// 由节点序列构造，沿途累加代价
    pub(crate) fn from_nodes<G: GraphView + ?Sized>(graph: &G, nodes: Vec<NodeId>) -> Self {
        let total_cost = nodes
            .windows(2)
            .map(|pair| graph.weight(pair[0], pair[1]).unwrap_or(0))
            .fold(0i64, i64::saturating_add);

        Self {
            names: graph.names_of(&nodes),
            length: nodes.len().saturating_sub(1),
            nodes,
            total_cost,
        }
    }

    /// 只含起点的空路径
    pub(crate) fn single<G: GraphView + ?Sized>(graph: &G, start: NodeId) -> Self {
        Self::from_nodes(graph, vec![start])
    }

    pub fn start(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn end(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }
}
