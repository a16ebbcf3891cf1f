//! 邻接矩阵
//!
//! 由任意图视图物化出的稠密存储，供矩阵类算法使用；自身也实现 `GraphView`

use super::node::NodeId;
use super::view::GraphView;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// 稠密邻接矩阵：`weights[i][j]` 为 i -> j 的最小代价
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacencyMatrix {
    /// 节点名称，位置即节点下标
    names: IndexSet<String>,
    /// 权重矩阵，None 表示不相连
    weights: Vec<Vec<Option<i64>>>,
}

impl AdjacencyMatrix {
    /// 从图视图物化
    pub fn from_view<G: GraphView + ?Sized>(graph: &G) -> Self {
        let n = graph.node_count();
        let mut names = IndexSet::with_capacity(n);
        let mut weights = vec![vec![None; n]; n];

        for i in 0..n {
            let id = NodeId::new(i);
            names.insert(graph.node_name(id).unwrap_or_default().to_string());

            // 只需检查邻居即可得到整行
            for head in graph.neighbors(id) {
                weights[i][head.index()] = graph.weight(id, head);
            }
        }

        Self { names, weights }
    }

    /// 矩阵维度
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// 获取单元格
    pub fn get(&self, from: usize, to: usize) -> Option<i64> {
        self.weights.get(from)?.get(to).copied().flatten()
    }

    /// 按行访问
    pub fn rows(&self) -> &[Vec<Option<i64>>] {
        &self.weights
    }
}

impl GraphView for AdjacencyMatrix {
    fn node_count(&self) -> usize {
        self.names.len()
    }

    fn node_id(&self, name: &str) -> Option<NodeId> {
        self.names.get_index_of(name).map(NodeId::new)
    }

    fn node_name(&self, id: NodeId) -> Option<&str> {
        self.names.get_index(id.index()).map(String::as_str)
    }

    fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        self.weights
            .get(id.index())
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter(|(_, w)| w.is_some())
                    .map(|(j, _)| NodeId::new(j))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn weight(&self, from: NodeId, to: NodeId) -> Option<i64> {
        self.get(from.index(), to.index())
    }
}
