//! 图核心模块
//!
//! 定义节点、边、图以及算法依赖的只读视图

mod edge;
mod graph;
mod matrix;
mod node;
mod view;

pub use edge::{Edge, EdgeId};
pub use graph::{EdgeEntry, Graph};
pub use matrix::AdjacencyMatrix;
pub use node::{Node, NodeId};
pub use view::GraphView;
