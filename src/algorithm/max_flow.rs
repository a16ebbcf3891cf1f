//! 最大流算法
//!
//! 在残量矩阵上反复寻找增广路径：
//! - Ford-Fulkerson：深度优先搜索找增广路径
//! - Edmonds-Karp：广度优先搜索找最短增广路径，O(V·E²)

use crate::error::{Error, Result};
use crate::graph::{GraphView, NodeId};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// 增广路径搜索策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowStrategy {
    /// 深度优先
    FordFulkerson,
    /// 广度优先
    EdmondsKarp,
}

impl FlowStrategy {
    /// 在残量矩阵中找一条 source -> sink 的增广路径
    fn augmenting_path(
        &self,
        residual: &[Vec<i64>],
        source: usize,
        sink: usize,
    ) -> Option<Vec<usize>> {
        match self {
            FlowStrategy::FordFulkerson => dfs_find_path(residual, source, sink),
            FlowStrategy::EdmondsKarp => bfs_find_path(residual, source, sink),
        }
    }
}

/// 单条边上的流量
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeFlow {
    pub from: NodeId,
    pub to: NodeId,
    pub flow: i64,
    pub capacity: i64,
}

impl EdgeFlow {
    /// 流量是否已达容量
    pub fn is_saturated(&self) -> bool {
        self.flow == self.capacity
    }
}

/// 最大流结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxFlow {
    /// 使用的策略
    pub strategy: FlowStrategy,
    /// 最大流量值
    pub value: i64,
    /// 流量分配（只保留正流量）
    pub flows: Vec<EdgeFlow>,
    /// 最小割的源侧节点集
    pub source_side: Vec<NodeId>,
    /// 增广次数
    pub augmentations: usize,
}

impl MaxFlow {
    /// 瓶颈边：流量等于容量的边
    pub fn saturated_edges(&self) -> Vec<&EdgeFlow> {
        self.flows.iter().filter(|f| f.is_saturated()).collect()
    }
}

/// 流网络：由图一次性物化出的容量矩阵，可重复用于多次查询
///
/// 平行边取该方向上的最小权重；无向边在两个方向上都提供容量；无权边不提供容量。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowNetwork {
    /// 节点名称，位置即节点下标
    nodes: IndexSet<String>,
    /// 容量矩阵
    capacity: Vec<Vec<i64>>,
}

impl FlowNetwork {
    /// 从图构建容量矩阵；任何非正的权重都会返回 `InvalidCapacity`
    pub fn from_graph<G: GraphView + ?Sized>(graph: &G) -> Result<Self> {
        let n = graph.node_count();
        let nodes: IndexSet<String> = (0..n)
            .map(|i| {
                graph
                    .node_name(NodeId::new(i))
                    .unwrap_or_default()
                    .to_string()
            })
            .collect();
        let mut capacity = vec![vec![0i64; n]; n];

        for src in 0..n {
            let from = NodeId::new(src);
            for to in graph.neighbors(from) {
                let Some(weight) = graph.capacity(from, to) else {
                    continue;
                };
                let dst = to.index();

                // 最小值非正说明至少有一条边的权重非正
                if weight <= 0 {
                    return Err(Error::InvalidCapacity {
                        from: nodes.get_index(src).cloned().unwrap_or_default(),
                        to: nodes.get_index(dst).cloned().unwrap_or_default(),
                        capacity: weight,
                    });
                }
                if src != dst {
                    capacity[src][dst] = weight;
                }
            }
        }

        Ok(Self { nodes, capacity })
    }

    /// 节点数量
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// 获取容量
    pub fn capacity(&self, from: NodeId, to: NodeId) -> i64 {
        self.capacity
            .get(from.index())
            .and_then(|row| row.get(to.index()))
            .copied()
            .unwrap_or(0)
    }

    /// 节点的出边容量总和
    pub fn outgoing_capacity(&self, id: NodeId) -> i64 {
        self.capacity
            .get(id.index())
            .map(|row| row.iter().fold(0i64, |acc, &c| acc.saturating_add(c)))
            .unwrap_or(0)
    }

    /// 节点的入边容量总和
    pub fn incoming_capacity(&self, id: NodeId) -> i64 {
        self.capacity
            .iter()
            .filter_map(|row| row.get(id.index()))
            .fold(0i64, |acc, &c| acc.saturating_add(c))
    }

    /// 按名称解析节点
    pub fn resolve(&self, name: &str) -> Result<NodeId> {
        self.nodes
            .get_index_of(name)
            .map(NodeId::new)
            .ok_or_else(|| Error::NodeNotFound(name.to_string()))
    }

    /// 获取节点名称
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        self.nodes.get_index(id.index()).map(String::as_str)
    }

    /// 计算从 source 到 sink 的最大流
    pub fn max_flow(&self, source: &str, sink: &str, strategy: FlowStrategy) -> Result<MaxFlow> {
        let s = self.resolve(source)?;
        let t = self.resolve(sink)?;
        self.max_flow_between(s, t, strategy)
    }

    /// 按下标计算从 s 到 t 的最大流
    pub fn max_flow_between(
        &self,
        s: NodeId,
        t: NodeId,
        strategy: FlowStrategy,
    ) -> Result<MaxFlow> {
        for id in [s, t] {
            if id.index() >= self.len() {
                return Err(Error::NodeNotFound(id.to_string()));
            }
        }
        if s == t {
            let name = self.node_name(s).unwrap_or_default();
            return Err(Error::InvalidFlowEndpoints(name.to_string()));
        }

        debug!(source = %s, sink = %t, ?strategy, "开始计算最大流");

        // 每次查询都在容量矩阵的副本上增广
        let mut residual = self.capacity.clone();
        let (value, augmentations) = augment(&mut residual, s.index(), t.index(), strategy);

        let n = self.len();
        let mut flows = Vec::new();
        for u in 0..n {
            for v in 0..n {
                let capacity = self.capacity[u][v];
                let flow = capacity - residual[u][v];
                if capacity > 0 && flow > 0 {
                    flows.push(EdgeFlow {
                        from: NodeId::new(u),
                        to: NodeId::new(v),
                        flow,
                        capacity,
                    });
                }
            }
        }

        let source_side = find_source_side(&residual, s.index())
            .into_iter()
            .map(NodeId::new)
            .collect();

        debug!(value, augmentations, "最大流计算完成");

        Ok(MaxFlow {
            strategy,
            value,
            flows,
            source_side,
            augmentations,
        })
    }

    /// 多源多汇最大流
    /// 通过添加超级源点和超级汇点实现
    pub fn max_flow_multi(
        &self,
        sources: &[&str],
        sinks: &[&str],
        strategy: FlowStrategy,
    ) -> Result<i64> {
        let sources = sources
            .iter()
            .map(|name| self.resolve(name))
            .collect::<Result<Vec<_>>>()?;
        let sinks = sinks
            .iter()
            .map(|name| self.resolve(name))
            .collect::<Result<Vec<_>>>()?;

        if let Some(shared) = sources.iter().find(|s| sinks.contains(s)) {
            let name = self.node_name(*shared).unwrap_or_default();
            return Err(Error::InvalidFlowEndpoints(name.to_string()));
        }

        let n = self.len();
        let (super_source, super_sink) = (n, n + 1);
        let mut residual = vec![vec![0i64; n + 2]; n + 2];
        for (u, row) in self.capacity.iter().enumerate() {
            residual[u][..n].copy_from_slice(row);
        }

        // 超级边容量取端点的容量总和，不会成为瓶颈
        for &s in &sources {
            residual[super_source][s.index()] = self.outgoing_capacity(s);
        }
        for &t in &sinks {
            residual[t.index()][super_sink] = self.incoming_capacity(t);
        }

        let (value, augmentations) = augment(&mut residual, super_source, super_sink, strategy);
        debug!(value, augmentations, "多源多汇最大流计算完成");

        Ok(value)
    }
}

/// Ford-Fulkerson 最大流（深度优先找增广路径）
pub struct FordFulkerson<'a, G: GraphView + ?Sized> {
    graph: &'a G,
}

impl<'a, G: GraphView + ?Sized> FordFulkerson<'a, G> {
    /// 创建算法实例
    pub fn new(graph: &'a G) -> Self {
        Self { graph }
    }

    /// 计算从 source 到 sink 的最大流
    pub fn max_flow(&self, source: &str, sink: &str) -> Result<MaxFlow> {
        max_flow(self.graph, source, sink, FlowStrategy::FordFulkerson)
    }
}

/// Edmonds-Karp 最大流（广度优先找最短增广路径）
pub struct EdmondsKarp<'a, G: GraphView + ?Sized> {
    graph: &'a G,
}

impl<'a, G: GraphView + ?Sized> EdmondsKarp<'a, G> {
    /// 创建算法实例
    pub fn new(graph: &'a G) -> Self {
        Self { graph }
    }

    /// 计算从 source 到 sink 的最大流
    pub fn max_flow(&self, source: &str, sink: &str) -> Result<MaxFlow> {
        max_flow(self.graph, source, sink, FlowStrategy::EdmondsKarp)
    }
}

/// 计算图上从 source 到 sink 的最大流；端点名称由图自身解析
pub fn max_flow<G: GraphView + ?Sized>(
    graph: &G,
    source: &str,
    sink: &str,
    strategy: FlowStrategy,
) -> Result<MaxFlow> {
    let s = graph.resolve(source)?;
    let t = graph.resolve(sink)?;
    FlowNetwork::from_graph(graph)?.max_flow_between(s, t, strategy)
}

/// 增广直到没有增广路径，返回 (总流量, 增广次数)
fn augment(
    residual: &mut [Vec<i64>],
    source: usize,
    sink: usize,
    strategy: FlowStrategy,
) -> (i64, usize) {
    let mut total = 0i64;
    let mut augmentations = 0;

    while let Some(path) = strategy.augmenting_path(residual, source, sink) {
        // 计算瓶颈
        let bottleneck = path
            .windows(2)
            .map(|pair| residual[pair[0]][pair[1]])
            .min()
            .unwrap_or(0);
        if bottleneck <= 0 {
            break;
        }

        // 沿路径增广，反向边记录可撤销的流量
        for pair in path.windows(2) {
            let (u, v) = (pair[0], pair[1]);
            residual[u][v] -= bottleneck;
            residual[v][u] = residual[v][u].saturating_add(bottleneck);
        }

        total = total.saturating_add(bottleneck);
        augmentations += 1;
        trace!(?path, bottleneck, total, "增广");
    }

    (total, augmentations)
}

/// DFS 找增广路径
///
/// 栈中始终保存从源点到栈顶的一条路径；到达汇点时栈即为增广路径，
/// 无未访问邻居时回溯。
fn dfs_find_path(residual: &[Vec<i64>], source: usize, sink: usize) -> Option<Vec<usize>> {
    let n = residual.len();
    let mut visited = vec![false; n];
    let mut stack = vec![source];
    visited[source] = true;

    while let Some(&current) = stack.last() {
        if current == sink {
            return Some(stack);
        }

        let next = (0..n).find(|&v| !visited[v] && residual[current][v] > 0);
        match next {
            Some(v) => {
                visited[v] = true;
                stack.push(v);
            }
            None => {
                stack.pop();
            }
        }
    }

    None
}

/// BFS 找增广路径（边数最少）
fn bfs_find_path(residual: &[Vec<i64>], source: usize, sink: usize) -> Option<Vec<usize>> {
    let n = residual.len();
    let mut parent: Vec<Option<usize>> = vec![None; n];
    let mut visited = vec![false; n];
    let mut queue = VecDeque::new();

    visited[source] = true;
    queue.push_back(source);

    'search: while let Some(u) = queue.pop_front() {
        for v in 0..n {
            if !visited[v] && residual[u][v] > 0 {
                visited[v] = true;
                parent[v] = Some(u);
                if v == sink {
                    break 'search;
                }
                queue.push_back(v);
            }
        }
    }

    if !visited[sink] {
        return None;
    }

    // 重构路径
    let mut path = vec![sink];
    let mut current = sink;
    while let Some(prev) = parent[current] {
        path.push(prev);
        current = prev;
    }
    path.reverse();

    Some(path)
}

/// 找最小割的源侧节点（残量图中从源点可达的节点）
fn find_source_side(residual: &[Vec<i64>], source: usize) -> Vec<usize> {
    let n = residual.len();
    let mut visited = vec![false; n];
    let mut queue = VecDeque::new();

    visited[source] = true;
    queue.push_back(source);

    while let Some(u) = queue.pop_front() {
        for v in 0..n {
            if !visited[v] && residual[u][v] > 0 {
                visited[v] = true;
                queue.push_back(v);
            }
        }
    }

    (0..n).filter(|&v| visited[v]).collect()
}
