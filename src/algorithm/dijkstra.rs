//! Dijkstra 单源最短路径
//!
//! 要求所有边权非负；负权边属于调用方违约，结果没有定义。

use super::path::PathResult;
use crate::error::Result;
use crate::graph::{GraphView, NodeId};
use priority_queue::PriorityQueue;
use std::cmp::Reverse;
use tracing::{debug, trace};

/// 单次运行状态，按节点下标存放
struct Run {
    /// 起点到各节点的暂定代价，None 表示无穷大
    cost: Vec<Option<i64>>,
    /// 前驱
    prev: Vec<Option<NodeId>>,
}

/// Dijkstra 最短路径
pub struct Dijkstra<'a, G: GraphView + ?Sized> {
    graph: &'a G,
}

impl<'a, G: GraphView + ?Sized> Dijkstra<'a, G> {
    /// 创建算法实例
    pub fn new(graph: &'a G) -> Self {
        Self { graph }
    }

    /// 代价最小的路径及其总代价；不可达时返回 None
    pub fn shortest_path(&self, start: &str, end: &str) -> Result<Option<PathResult>> {
        let start = self.graph.resolve(start)?;
        let end = self.graph.resolve(end)?;

        let run = self.run(start, Some(end));
        let Some(total) = run.cost[end.index()] else {
            debug!(start = %start, end = %end, "Dijkstra 未找到路径");
            return Ok(None);
        };

        let mut nodes = vec![end];
        let mut current = end;
        while let Some(prev) = run.prev[current.index()] {
            nodes.push(prev);
            current = prev;
        }
        nodes.reverse();

        let mut path = PathResult::from_nodes(self.graph, nodes);
        path.total_cost = total;
        Ok(Some(path))
    }

    /// 从 `start` 到所有节点的最小代价，按节点下标排列
    pub fn distances_from(&self, start: &str) -> Result<Vec<Option<i64>>> {
        let start = self.graph.resolve(start)?;
        Ok(self.run(start, None).cost)
    }

    /// 核心循环：取出 `target` 时提前结束
    fn run(&self, start: NodeId, target: Option<NodeId>) -> Run {
        let n = self.graph.node_count();
        let mut run = Run {
            cost: vec![None; n],
            prev: vec![None; n],
        };
        let mut visited = vec![false; n];

        // 优先级 (代价, 入队序号) 取反后成为最小堆；代价相同时先入队者先出
        let mut queue: PriorityQueue<NodeId, Reverse<(i64, u64)>> = PriorityQueue::new();
        let mut seq = 0u64;

        run.cost[start.index()] = Some(0);
        queue.push(start, Reverse((0, seq)));

        while let Some((current, Reverse((current_cost, _)))) = queue.pop() {
            visited[current.index()] = true;
            trace!(node = %current, cost = current_cost, "Dijkstra 取出节点");

            if Some(current) == target {
                break;
            }

            for neighbor in self.graph.neighbors(current) {
                if visited[neighbor.index()] {
                    continue;
                }
                let Some(weight) = self.graph.weight(current, neighbor) else {
                    continue;
                };

                let candidate = current_cost.saturating_add(weight);
                let better = match run.cost[neighbor.index()] {
                    Some(known) => candidate < known,
                    None => true,
                };

                if better {
                    run.cost[neighbor.index()] = Some(candidate);
                    run.prev[neighbor.index()] = Some(current);
                    seq += 1;
                    // 已在队列中时更新优先级
                    queue.push(neighbor, Reverse((candidate, seq)));
                }
            }
        }

        run
    }
}
