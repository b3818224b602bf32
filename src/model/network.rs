use hashbrown::{HashMap, HashSet};

use crate::model::node::Node;
use crate::model::pipe::Pipe;

#[derive(Default)]
pub struct Network {
    pub nodes: Vec<Node>,
    pub pipes: Vec<Pipe>,

    pub node_map: HashMap<Box<str>, usize>,
    pub pipe_map: HashMap<Box<str>, usize>,

    /// Node ids listed in the [RESERVOIRS] section. A node's role is derived
    /// by membership test; reservoir membership takes precedence over junction.
    pub reservoirs: HashSet<Box<str>>,
    /// Intermediate pipe geometry from the [VERTICES] section, in encounter order.
    pub vertices: HashMap<Box<str>, Vec<(f64, f64)>>,
}

/// Network methods to add nodes, pipes and vertices
impl Network {
  /// Add a node. A duplicate id overwrites the earlier coordinate (last write wins).
  pub fn add_node(&mut self, node: Node) {
    if let Some(&index) = self.node_map.get(&node.id) {
      self.nodes[index] = node;
    } else {
      self.node_map.insert(node.id.clone(), self.nodes.len());
      self.nodes.push(node);
    }
  }

  /// Append a pipe. Pipe records are kept unconditionally in encounter
  /// order; a repeated id maps to its latest record.
  pub fn add_pipe(&mut self, pipe: Pipe) {
    self.pipe_map.insert(pipe.id.clone(), self.pipes.len());
    self.pipes.push(pipe);
  }

  /// Append an intermediate vertex to a pipe's geometry.
  /// Creates the vertex list if it does not exist, in the same way the
  /// parser accumulates curve points across re-entered sections.
  pub fn add_vertex(&mut self, pipe_id: &str, x: f64, y: f64) {
    if let Some(list) = self.vertices.get_mut(pipe_id) {
      list.push((x, y));
    } else {
      self.vertices.insert(pipe_id.into(), vec![(x, y)]);
    }
  }

  pub fn node(&self, id: &str) -> Option<&Node> {
    self.node_map.get(id).map(|&index| &self.nodes[index])
  }

  pub fn is_reservoir(&self, id: &str) -> bool {
    self.reservoirs.contains(id)
  }

  pub fn vertex_count(&self) -> usize {
    self.vertices.values().map(Vec::len).sum()
  }
}
