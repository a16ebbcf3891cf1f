//! gka-graph - 图论算法引擎
//!
//! 在按名称索引的多重图上计算：
//! - 广度优先遍历与最少边数路径
//! - Dijkstra 单源最短路径
//! - Floyd–Warshall 全源最短路径与负权环检测
//! - 最大流（Ford-Fulkerson / Edmonds-Karp）
//!
//! # 示例
//!
//! ```
//! use gka_graph::{Dijkstra, Graph};
//!
//! let mut graph = Graph::new();
//! graph.connect("s", "a", true, Some(1)).unwrap();
//! graph.connect("a", "t", true, Some(1)).unwrap();
//! graph.connect("s", "t", true, Some(5)).unwrap();
//!
//! let path = Dijkstra::new(&graph).shortest_path("s", "t").unwrap().unwrap();
//! assert_eq!(path.names, vec!["s", "a", "t"]);
//! assert_eq!(path.total_cost, 2);
//! ```

pub mod algorithm;
pub mod config;
pub mod error;
pub mod graph;

// 重导出常用类型
pub use algorithm::{
    AllPairs, Bfs, Dijkstra, EdmondsKarp, FloydWarshall, FlowNetwork, FlowStrategy,
    FordFulkerson, MaxFlow, PathResult,
};
pub use config::GraphConfig;
pub use error::{Error, Result};
pub use graph::{AdjacencyMatrix, Edge, EdgeEntry, EdgeId, Graph, GraphView, Node, NodeId};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
