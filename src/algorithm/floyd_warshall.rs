//! Floyd–Warshall 全源最短路径
//!
//! 输出距离矩阵和中转矩阵；检测负权环；路径通过中转矩阵迭代还原

use super::path::PathResult;
use crate::error::{Error, Result};
use crate::graph::{AdjacencyMatrix, GraphView, NodeId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// 全源最短路径结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllPairs {
    /// 直接边的最小权重（同时提供名称解析）
    direct: AdjacencyMatrix,
    /// `distance[i][j]`：最短距离，None 表示不可达
    distance: Vec<Vec<Option<i64>>>,
    /// `transit[i][j]`：最短路径上记录的中转节点，None 表示直接相连
    transit: Vec<Vec<Option<usize>>>,
}

impl AllPairs {
    /// 节点数量
    pub fn len(&self) -> usize {
        self.distance.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distance.is_empty()
    }

    /// 距离矩阵
    pub fn distance_matrix(&self) -> &[Vec<Option<i64>>] {
        &self.distance
    }

    /// 中转矩阵
    pub fn transit_matrix(&self) -> &[Vec<Option<usize>>] {
        &self.transit
    }

    /// 按下标取最短距离
    pub fn distance_at(&self, from: NodeId, to: NodeId) -> Option<i64> {
        self.distance.get(from.index())?.get(to.index()).copied().flatten()
    }

    /// 按名称取最短距离；不可达时返回 None
    pub fn distance(&self, start: &str, end: &str) -> Result<Option<i64>> {
        let start = self.direct.resolve(start)?;
        let end = self.direct.resolve(end)?;
        Ok(self.distance_at(start, end))
    }

    /// 按名称还原最短路径；不可达时返回 None
    pub fn shortest_path(&self, start: &str, end: &str) -> Result<Option<PathResult>> {
        let start = self.direct.resolve(start)?;
        let end = self.direct.resolve(end)?;

        Ok(self
            .extract_path(start, end)?
            .map(|nodes| PathResult::from_nodes(&self.direct, nodes)))
    }

    /// 由中转矩阵还原 `start -> end` 的节点序列
    ///
    /// 使用显式工作栈逐段展开 `(i, j)` 请求：有中转节点 k 时拆成 `(i, k)` 与
    /// `(k, j)`，否则该段必须是一条直接边。
    pub fn extract_path(&self, start: NodeId, end: NodeId) -> Result<Option<Vec<NodeId>>> {
        let n = self.len();
        if start.index() >= n {
            return Err(Error::NodeNotFound(start.to_string()));
        }
        if end.index() >= n {
            return Err(Error::NodeNotFound(end.to_string()));
        }

        if self.distance_at(start, end).is_none() {
            return Ok(None);
        }
        if start == end {
            return Ok(Some(vec![start]));
        }

        let mut nodes = Vec::new();
        let mut stack = vec![(start.index(), end.index())];
        let mut budget = n * n + 1;

        while let Some((i, j)) = stack.pop() {
            if budget == 0 {
                return Err(Error::AlgorithmError(format!(
                    "中转链过长: {} -> {}",
                    start, end
                )));
            }
            budget -= 1;

            match self.transit[i][j] {
                Some(k) => {
                    // 先处理 (i, k)
                    stack.push((k, j));
                    stack.push((i, k));
                }
                None if self.direct.get(i, j).is_some() => nodes.push(NodeId::new(i)),
                None => {
                    return Err(Error::AlgorithmError(format!(
                        "中转矩阵不一致: #{} 与 #{} 之间没有直接边",
                        i, j
                    )));
                }
            }
        }
        nodes.push(end);

        Ok(Some(nodes))
    }
}

/// Floyd–Warshall 算法
pub struct FloydWarshall<'a, G: GraphView + ?Sized> {
    graph: &'a G,
}

impl<'a, G: GraphView + ?Sized> FloydWarshall<'a, G> {
    /// 创建算法实例
    pub fn new(graph: &'a G) -> Self {
        Self { graph }
    }

    /// 计算所有节点对的最短距离
    ///
    /// 出现负权环时返回 `NegativeCycle`，不产生任何距离。
    pub fn compute(&self) -> Result<AllPairs> {
        let direct = AdjacencyMatrix::from_view(self.graph);
        let n = direct.len();
        debug!(nodes = n, "Floyd-Warshall 开始");

        let mut distance = direct.rows().to_vec();
        let mut transit = vec![vec![None; n]; n];

        for (i, row) in distance.iter_mut().enumerate() {
            // 负自环本身就是负权环
            let self_loop = row[i].unwrap_or(0);
            row[i] = Some(self_loop.min(0));
        }
        self.check_negative_cycle(&direct, &distance)?;

        for k in 0..n {
            for i in 0..n {
                if i == k {
                    continue;
                }
                let Some(ik) = distance[i][k] else {
                    continue;
                };

                for j in 0..n {
                    if j == k {
                        continue;
                    }
                    let Some(kj) = distance[k][j] else {
                        continue;
                    };

                    let sum = ik.saturating_add(kj);
                    let better = match distance[i][j] {
                        Some(current) => sum < current,
                        None => true,
                    };
                    if better {
                        distance[i][j] = Some(sum);
                        transit[i][j] = Some(k);
                    }
                }
            }

            self.check_negative_cycle(&direct, &distance)?;
        }

        Ok(AllPairs {
            direct,
            distance,
            transit,
        })
    }

    fn check_negative_cycle(
        &self,
        direct: &AdjacencyMatrix,
        distance: &[Vec<Option<i64>>],
    ) -> Result<()> {
        for (i, row) in distance.iter().enumerate() {
            if matches!(row[i], Some(d) if d < 0) {
                let node = direct.node_name(NodeId::new(i)).unwrap_or_default();
                warn!(node, "Floyd-Warshall 检测到负权环");
                return Err(Error::NegativeCycle {
                    node: node.to_string(),
                });
            }
        }
        Ok(())
    }
}
