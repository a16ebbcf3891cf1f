//! 图算法模块
//!
//! 包含广度优先搜索、Dijkstra、Floyd–Warshall 和最大流算法。
//! 所有算法只读借用图，运行状态按节点下标保存在各自的单次运行中。

mod bfs;
mod dijkstra;
mod floyd_warshall;
mod max_flow;
mod path;

pub use bfs::Bfs;
pub use dijkstra::Dijkstra;
pub use floyd_warshall::{AllPairs, FloydWarshall};
pub use max_flow::{
    max_flow, EdgeFlow, EdmondsKarp, FlowNetwork, FlowStrategy, FordFulkerson, MaxFlow,
};
pub use path::PathResult;
