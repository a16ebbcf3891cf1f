//! 图数据结构
//!
//! 按名称索引的多重图：节点名称唯一，节点下标按创建顺序稳定分配

use super::edge::{Edge, EdgeId};
use super::node::{Node, NodeId};
use super::view::GraphView;
use crate::config::GraphConfig;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// 一条构图输入：`(节点1, 节点2?, 是否有向, 边名?, 权重?)`
///
/// 没有第二个节点时只创建单个节点。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeEntry {
    pub from: String,
    pub to: Option<String>,
    pub directed: bool,
    pub name: Option<String>,
    pub weight: Option<i64>,
}

impl EdgeEntry {
    /// 单个节点
    pub fn node(name: impl Into<String>) -> Self {
        Self {
            from: name.into(),
            to: None,
            directed: false,
            name: None,
            weight: None,
        }
    }

    /// 有向边
    pub fn directed(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: Some(to.into()),
            directed: true,
            name: None,
            weight: None,
        }
    }

    /// 无向边
    pub fn undirected(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            directed: false,
            ..Self::directed(from, to)
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_weight(mut self, weight: i64) -> Self {
        self.weight = Some(weight);
        self
    }
}

/// 图
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// 构图配置
    config: GraphConfig,
    /// 名称 -> 节点，插入位置即节点下标
    nodes: IndexMap<String, Node>,
    /// 所有边，按插入顺序
    edges: Vec<Edge>,
}

impl Graph {
    /// 使用默认配置创建空图
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用指定配置创建空图
    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            config,
            nodes: IndexMap::new(),
            edges: Vec::new(),
        }
    }

    /// 由构图输入序列建图
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = EdgeEntry>,
    {
        Self::from_entries_with_config(GraphConfig::default(), entries)
    }

    /// 使用指定配置由构图输入序列建图
    pub fn from_entries_with_config<I>(config: GraphConfig, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = EdgeEntry>,
    {
        let mut graph = Self::with_config(config);
        for entry in entries {
            graph.insert_entry(&entry)?;
        }
        Ok(graph)
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    // ==================== 节点操作 ====================

    /// 按名称获取节点，不存在则创建
    pub fn get_or_create_node(&mut self, name: &str) -> Result<NodeId> {
        let name = self.config.normalize_name(name)?;

        if let Some(node) = self.nodes.get(name) {
            return Ok(node.id());
        }

        let id = NodeId::new(self.nodes.len());
        self.nodes
            .insert(name.to_string(), Node::new(id, name.to_string()));
        trace!(node = name, index = id.index(), "创建节点");

        Ok(id)
    }

    /// 查找用的规范化名称；不合法的名称不可能存在于图中
    fn lookup_key<'a>(&self, name: &'a str) -> Option<&'a str> {
        self.config.normalize_name(name).ok()
    }

    /// 获取节点
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get_index(id.index()).map(|(_, node)| node)
    }

    /// 按名称获取节点
    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.nodes.get(self.lookup_key(name)?)
    }

    /// 按下标获取节点
    pub fn node_at(&self, index: usize) -> Option<&Node> {
        self.node(NodeId::new(index))
    }

    /// 节点名称对应的下标
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.nodes.get_index_of(self.lookup_key(name)?)
    }

    /// 所有节点，按下标顺序
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// 所有节点名称，按下标顺序
    pub fn node_names(&self) -> Vec<String> {
        self.nodes.keys().cloned().collect()
    }

    /// 获取节点数量
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ==================== 边操作 ====================

    /// 添加边（不检查重复，允许平行边）
    pub fn add_edge(
        &mut self,
        src: NodeId,
        dst: NodeId,
        directed: bool,
        name: Option<&str>,
        weight: Option<i64>,
    ) -> Result<EdgeId> {
        if self.node(src).is_none() {
            return Err(Error::NodeNotFound(src.to_string()));
        }
        if self.node(dst).is_none() {
            return Err(Error::NodeNotFound(dst.to_string()));
        }

        let id = EdgeId::new(self.edges.len());
        self.edges.push(Edge::new(
            id,
            src,
            dst,
            directed,
            name.map(str::to_string),
            weight,
        ));

        if let Some((_, node)) = self.nodes.get_index_mut(src.index()) {
            node.attach(id);
        }
        if src != dst {
            if let Some((_, node)) = self.nodes.get_index_mut(dst.index()) {
                node.attach(id);
            }
        }

        Ok(id)
    }

    /// 按名称连接两个节点，节点不存在时自动创建
    pub fn connect(
        &mut self,
        from: &str,
        to: &str,
        directed: bool,
        weight: Option<i64>,
    ) -> Result<EdgeId> {
        let src = self.get_or_create_node(from)?;
        let dst = self.get_or_create_node(to)?;
        self.add_edge(src, dst, directed, None, weight)
    }

    /// 写入一条构图输入；只有单个节点时返回 None
    pub fn insert_entry(&mut self, entry: &EdgeEntry) -> Result<Option<EdgeId>> {
        let src = self.get_or_create_node(&entry.from)?;

        match &entry.to {
            Some(to) => {
                let dst = self.get_or_create_node(to)?;
                let id = self.add_edge(
                    src,
                    dst,
                    entry.directed,
                    entry.name.as_deref(),
                    entry.weight,
                )?;
                Ok(Some(id))
            }
            None => Ok(None),
        }
    }

    /// 获取边
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    /// 所有边，按插入顺序
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// 获取边数量
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// 所有已命名边的名称
    pub fn edge_names(&self) -> Vec<String> {
        self.edges
            .iter()
            .filter_map(|e| e.name().map(str::to_string))
            .collect()
    }

    /// 可从 `from` 走到 `to` 的所有边（含平行边）
    pub fn edges_between(&self, from: NodeId, to: NodeId) -> Vec<&Edge> {
        self.incident_edges(from)
            .filter(|e| e.leads(from, to))
            .collect()
    }

    fn incident_edges(&self, id: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.node(id)
            .map(|n| n.edges())
            .unwrap_or_default()
            .iter()
            .filter_map(|&e| self.edge(e))
    }

    // ==================== 邻居查询 ====================

    /// 度数（自环计两次）
    pub fn degree(&self, id: NodeId) -> usize {
        self.incident_edges(id)
            .map(|e| if e.src() == e.dst() { 2 } else { 1 })
            .sum()
    }

    /// 没有任何关联边的节点
    pub fn isolated_nodes(&self) -> Vec<NodeId> {
        self.nodes
            .values()
            .filter(|n| n.edges().is_empty())
            .map(Node::id)
            .collect()
    }
}

impl GraphView for Graph {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn node_id(&self, name: &str) -> Option<NodeId> {
        self.node_by_name(name).map(Node::id)
    }

    fn node_name(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(Node::name)
    }

    fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        let mut neighbors = Vec::new();
        for edge in self.incident_edges(id) {
            if let Some(head) = edge.head_from(id) {
                if !neighbors.contains(&head) {
                    neighbors.push(head);
                }
            }
        }
        neighbors
    }

    fn weight(&self, from: NodeId, to: NodeId) -> Option<i64> {
        self.incident_edges(from)
            .filter(|e| e.leads(from, to))
            .map(Edge::cost)
            .min()
    }

    fn capacity(&self, from: NodeId, to: NodeId) -> Option<i64> {
        self.incident_edges(from)
            .filter(|e| e.leads(from, to))
            .filter_map(Edge::weight)
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_basic() {
        let mut graph = Graph::new();

        let a = graph.get_or_create_node("a").unwrap();
        let b = graph.get_or_create_node("b").unwrap();
        assert_eq!(graph.get_or_create_node("a").unwrap(), a);
        assert_eq!(graph.node_count(), 2);

        let e1 = graph.add_edge(a, b, true, Some("ab"), Some(3)).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge(e1).unwrap().name(), Some("ab"));

        assert_eq!(graph.index_of("b"), Some(1));
        assert_eq!(graph.node_at(1).unwrap().name(), "b");
        assert_eq!(graph.node_names(), vec!["a", "b"]);

        assert!(graph.has_edge(a, b));
        assert!(!graph.has_edge(b, a));
        assert_eq!(graph.neighbors(a), vec![b]);
        assert!(graph.neighbors(b).is_empty());
    }

    #[test]
    fn test_parallel_edges_min_weight() {
        let mut graph = Graph::new();
        graph.connect("a", "b", true, Some(7)).unwrap();
        graph.connect("a", "b", true, Some(2)).unwrap();
        graph.connect("b", "a", true, Some(1)).unwrap();

        let a = graph.node_id("a").unwrap();
        let b = graph.node_id("b").unwrap();

        assert_eq!(graph.weight(a, b), Some(2));
        assert_eq!(graph.weight(b, a), Some(1));
        assert_eq!(graph.edges_between(a, b).len(), 2);
        // 平行边不产生重复邻居
        assert_eq!(graph.neighbors(a), vec![b]);
    }

    #[test]
    fn test_undirected_and_unweighted() {
        let mut graph = Graph::new();
        graph.connect("x", "y", false, None).unwrap();

        let x = graph.node_id("x").unwrap();
        let y = graph.node_id("y").unwrap();

        assert_eq!(graph.weight(x, y), Some(1));
        assert_eq!(graph.weight(y, x), Some(1));
        assert_eq!(graph.neighbors(y), vec![x]);
    }

    #[test]
    fn test_neighbor_order_is_insertion_order() {
        let mut graph = Graph::new();
        graph.connect("s", "c", true, None).unwrap();
        graph.connect("s", "a", true, None).unwrap();
        graph.connect("b", "s", false, None).unwrap();
        graph.connect("d", "s", true, None).unwrap();

        let s = graph.node_id("s").unwrap();
        let names = graph.names_of(&graph.neighbors(s));
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_degree_and_isolated() {
        let mut graph = Graph::new();
        graph.connect("a", "b", true, None).unwrap();
        graph.connect("a", "a", false, None).unwrap();
        let lonely = graph.get_or_create_node("lonely").unwrap();

        let a = graph.node_id("a").unwrap();
        assert_eq!(graph.degree(a), 3);
        assert_eq!(graph.degree(lonely), 0);
        assert_eq!(graph.isolated_nodes(), vec![lonely]);
        assert_eq!(graph.neighbors(a), vec![graph.node_id("b").unwrap(), a]);
    }

    #[test]
    fn test_entries() {
        let graph = Graph::from_entries(vec![
            EdgeEntry::directed("Hamburg", "Kiel")
                .with_name("A7")
                .with_weight(96),
            EdgeEntry::undirected("Hamburg", "Bremen").with_weight(119),
            EdgeEntry::node("Sylt"),
        ])
        .unwrap();

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edge_names(), vec!["A7"]);
        assert_eq!(
            graph.isolated_nodes(),
            vec![graph.node_id("Sylt").unwrap()]
        );
    }

    #[test]
    fn test_invalid_names() {
        let mut graph = Graph::new();
        assert!(matches!(
            graph.get_or_create_node(""),
            Err(Error::InvalidName(_))
        ));
        assert!(matches!(
            graph.connect("a", "b;", true, None),
            Err(Error::InvalidName(_))
        ));

        // 名称规范化后视为同一节点
        let a = graph.get_or_create_node(" a ").unwrap();
        assert_eq!(graph.get_or_create_node("a").unwrap(), a);
    }

    #[test]
    fn test_lookup_normalizes_names() {
        let mut graph = Graph::new();
        let a = graph.get_or_create_node(" a ").unwrap();

        assert_eq!(graph.node_id(" a "), Some(a));
        assert_eq!(graph.node_id("a"), Some(a));
        assert_eq!(graph.index_of("a\t"), Some(a.index()));
        assert_eq!(graph.node_by_name(" a").unwrap().name(), "a");
        // 不合法的名称按不存在处理
        assert_eq!(graph.node_id("a;"), None);
        assert!(matches!(graph.resolve(""), Err(Error::NodeNotFound(_))));
    }

    #[test]
    fn test_capacity_ignores_unweighted_edges() {
        let mut graph = Graph::new();
        graph.connect("a", "b", true, Some(5)).unwrap();
        graph.connect("a", "b", true, Some(3)).unwrap();
        graph.connect("a", "b", true, None).unwrap();
        graph.connect("b", "c", false, Some(4)).unwrap();
        graph.connect("c", "d", true, None).unwrap();

        let id = |name: &str| graph.node_id(name).unwrap();
        assert_eq!(graph.weight(id("a"), id("b")), Some(1));
        assert_eq!(graph.capacity(id("a"), id("b")), Some(3));
        assert_eq!(graph.capacity(id("b"), id("a")), None);
        assert_eq!(graph.capacity(id("c"), id("b")), Some(4));
        assert_eq!(graph.capacity(id("c"), id("d")), None);
    }

    #[test]
    fn test_entries_with_config() {
        let entries = vec![EdgeEntry::directed("a;1", "b").with_weight(2)];
        assert!(matches!(
            Graph::from_entries(entries.clone()),
            Err(Error::InvalidName(_))
        ));

        let graph = Graph::from_entries_with_config(GraphConfig::permissive(), entries).unwrap();
        assert_eq!(graph.node_names(), vec!["a;1", "b"]);
        assert!(!graph.config().trim_names);
    }

    #[test]
    fn test_add_edge_unknown_node() {
        let mut graph = Graph::new();
        let a = graph.get_or_create_node("a").unwrap();
        assert!(matches!(
            graph.add_edge(a, NodeId::new(9), true, None, None),
            Err(Error::NodeNotFound(_))
        ));
        assert_eq!(graph.edge_count(), 0);
    }
}
