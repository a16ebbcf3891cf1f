//! 广度优先搜索
//!
//! 无权可达性、遍历顺序和最少边数的最短路径

use super::path::PathResult;
use crate::error::Result;
use crate::graph::{GraphView, NodeId};
use std::collections::VecDeque;
use tracing::debug;

/// 单次搜索的运行状态，按节点下标存放
struct Search {
    /// 首次发现顺序
    order: Vec<NodeId>,
    /// 发现该节点时所在的节点
    parent: Vec<Option<NodeId>>,
    /// 层数（边数）
    depth: Vec<Option<usize>>,
}

impl Search {
    fn new(n: usize, start: NodeId) -> Self {
        let mut depth = vec![None; n];
        depth[start.index()] = Some(0);
        Self {
            order: vec![start],
            parent: vec![None; n],
            depth,
        }
    }

    fn discovered(&self, id: NodeId) -> bool {
        self.depth[id.index()].is_some()
    }
}

/// 广度优先搜索
pub struct Bfs<'a, G: GraphView + ?Sized> {
    graph: &'a G,
}

impl<'a, G: GraphView + ?Sized> Bfs<'a, G> {
    /// 创建搜索实例
    pub fn new(graph: &'a G) -> Self {
        Self { graph }
    }

    /// 从 `start` 出发按层次遍历所有可达节点，返回首次发现顺序
    pub fn traverse(&self, start: &str) -> Result<Vec<NodeId>> {
        let start = self.graph.resolve(start)?;
        let search = self.explore(start, None, usize::MAX);
        debug!(visited = search.order.len(), "BFS 遍历完成");
        Ok(search.order)
    }

    /// 最少边数；不可达时返回 None
    pub fn distance(&self, start: &str, end: &str) -> Result<Option<usize>> {
        let start = self.graph.resolve(start)?;
        let end = self.graph.resolve(end)?;

        let search = self.explore(start, Some(end), usize::MAX);
        Ok(search.depth[end.index()])
    }

    /// 边数最少的路径；不可达时返回 None
    ///
    /// 每个节点记录首次发现它的前驱，路径由前驱链反转得到。
    pub fn shortest_path(&self, start: &str, end: &str) -> Result<Option<PathResult>> {
        let start = self.graph.resolve(start)?;
        let end = self.graph.resolve(end)?;

        if start == end {
            return Ok(Some(PathResult::single(self.graph, start)));
        }

        let search = self.explore(start, Some(end), usize::MAX);
        if !search.discovered(end) {
            debug!(start = %start, end = %end, "BFS 未找到路径");
            return Ok(None);
        }

        let mut nodes = vec![end];
        let mut current = end;
        while let Some(prev) = search.parent[current.index()] {
            nodes.push(prev);
            current = prev;
        }
        nodes.reverse();

        Ok(Some(PathResult::from_nodes(self.graph, nodes)))
    }

    /// 判断两点是否连通
    pub fn is_reachable(&self, start: &str, end: &str) -> Result<bool> {
        Ok(self.distance(start, end)?.is_some())
    }

    /// 恰好相距 `n` 层的节点，按发现顺序
    pub fn n_hop_neighbors(&self, start: &str, n: usize) -> Result<Vec<NodeId>> {
        let start = self.graph.resolve(start)?;
        let search = self.explore(start, None, n);

        Ok(search
            .order
            .into_iter()
            .filter(|id| search.depth[id.index()] == Some(n))
            .collect())
    }

    /// 核心搜索：发现 `target` 时立即停止，层数超过 `max_depth` 不再扩展
    fn explore(&self, start: NodeId, target: Option<NodeId>, max_depth: usize) -> Search {
        let mut search = Search::new(self.graph.node_count(), start);
        if target == Some(start) {
            return search;
        }

        let mut queue = VecDeque::new();
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            let depth = search.depth[current.index()].unwrap_or(0);
            if depth >= max_depth {
                continue;
            }

            for neighbor in self.graph.neighbors(current) {
                if search.discovered(neighbor) {
                    continue;
                }
                search.depth[neighbor.index()] = Some(depth + 1);
                search.parent[neighbor.index()] = Some(current);
                search.order.push(neighbor);

                if Some(neighbor) == target {
                    return search;
                }
                queue.push_back(neighbor);
            }
        }

        search
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::graph::Graph;

    fn create_test_graph() -> Graph {
        // 1 -> 2 -> 3 -> 4
        //  \-> 5 ------/
        let mut graph = Graph::new();
        graph.connect("1", "2", true, None).unwrap();
        graph.connect("2", "3", true, None).unwrap();
        graph.connect("3", "4", true, None).unwrap();
        graph.connect("1", "5", true, None).unwrap();
        graph.connect("5", "4", true, None).unwrap();
        graph
    }

    #[test]
    fn test_traverse() {
        let graph = create_test_graph();
        let bfs = Bfs::new(&graph);

        let order = bfs.traverse("1").unwrap();
        assert_eq!(graph.names_of(&order), vec!["1", "2", "5", "3", "4"]);

        // 有向边不能反向走
        let order = bfs.traverse("4").unwrap();
        assert_eq!(graph.names_of(&order), vec!["4"]);
    }

    #[test]
    fn test_shortest_path() {
        let graph = create_test_graph();
        let bfs = Bfs::new(&graph);

        let path = bfs.shortest_path("1", "4").unwrap().unwrap();
        assert_eq!(path.names, vec!["1", "5", "4"]);
        assert_eq!(path.length, 2);
        assert_eq!(bfs.distance("1", "4").unwrap(), Some(2));
        assert_eq!(bfs.distance("1", "1").unwrap(), Some(0));
    }

    #[test]
    fn test_first_predecessor_wins() {
        // a 和 b 都能一步到 t，先发现的 a 成为前驱
        let mut graph = Graph::new();
        graph.connect("s", "a", true, None).unwrap();
        graph.connect("s", "b", true, None).unwrap();
        graph.connect("b", "t", true, None).unwrap();
        graph.connect("a", "t", true, None).unwrap();

        let path = Bfs::new(&graph).shortest_path("s", "t").unwrap().unwrap();
        assert_eq!(path.names, vec!["s", "a", "t"]);
    }

    #[test]
    fn test_unreachable() {
        let mut graph = create_test_graph();
        graph.get_or_create_node("island").unwrap();
        let bfs = Bfs::new(&graph);

        assert_eq!(bfs.distance("1", "island").unwrap(), None);
        assert_eq!(bfs.shortest_path("1", "island").unwrap(), None);
        assert_eq!(bfs.distance("4", "1").unwrap(), None);
        assert!(!bfs.is_reachable("island", "1").unwrap());
        assert!(bfs.is_reachable("1", "3").unwrap());
    }

    #[test]
    fn test_undirected() {
        let mut graph = Graph::new();
        graph.connect("a", "b", false, None).unwrap();
        graph.connect("c", "b", false, None).unwrap();

        let bfs = Bfs::new(&graph);
        let path = bfs.shortest_path("c", "a").unwrap().unwrap();
        assert_eq!(path.names, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_node_not_found() {
        let graph = create_test_graph();
        let bfs = Bfs::new(&graph);

        assert!(matches!(bfs.traverse("x"), Err(Error::NodeNotFound(_))));
        assert!(matches!(
            bfs.shortest_path("1", "x"),
            Err(Error::NodeNotFound(_))
        ));
        assert!(matches!(bfs.distance("x", "1"), Err(Error::NodeNotFound(_))));
    }

    #[test]
    fn test_n_hop_neighbors() {
        let graph = create_test_graph();
        let bfs = Bfs::new(&graph);

        let one_hop = bfs.n_hop_neighbors("1", 1).unwrap();
        assert_eq!(graph.names_of(&one_hop), vec!["2", "5"]);

        let two_hop = bfs.n_hop_neighbors("1", 2).unwrap();
        assert_eq!(graph.names_of(&two_hop), vec!["3", "4"]);

        assert!(bfs.n_hop_neighbors("1", 5).unwrap().is_empty());
    }

    #[test]
    fn test_names_are_normalized() {
        let mut graph = Graph::new();
        graph.get_or_create_node(" a ").unwrap();
        graph.connect("a", "b", true, None).unwrap();

        let bfs = Bfs::new(&graph);
        let order = bfs.traverse(" a ").unwrap();
        assert_eq!(graph.names_of(&order), vec!["a", "b"]);
        assert_eq!(bfs.distance("a ", " b").unwrap(), Some(1));
    }
}
