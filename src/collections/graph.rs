//! A weighted [graph] of unique values with traversal, cycle detection and
//! shortest paths.
//!
//! Nodes live in an arena of slots addressed by [`NodeId`]. Edges refer to
//! their destination by slot index and never own it. Removing a node scrubs
//! every edge pointing at its slot before the slot is recycled, so no edge can
//! outlive its destination.
//!
//! Every value is unique within a graph and doubles as the lookup key for the
//! value-based operations, through a [`HashTable`] index.
//!
//! [graph]: https://en.wikipedia.org/wiki/Graph_(abstract_data_type)

use core::cmp::Ordering;
use core::hash::Hash;

use tracing::{debug, trace};

use crate::array;
use crate::collections::{Array, HashTable, Heap, Queue, Stack};
use crate::error::{Error, Result};

/// Whether edges are one-way or two-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GraphKind {
    /// `add_edge(a, b)` only lets `a` reach `b`.
    #[default]
    Directed,
    /// `add_edge(a, b)` also stores the mirror edge `b -> a`.
    Undirected,
}

/// Handle to a node's slot in a [`Graph`].
///
/// Slots are recycled after removal, so a handle only identifies a node while
/// that node is still in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Slot index of the node.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Edge {
    to: NodeId,
    /// `None` costs nothing when computing distances.
    weight: Option<f64>,
}

impl Edge {
    #[inline]
    fn cost(&self) -> f64 {
        self.weight.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone)]
struct Vertex<V> {
    value: V,
    /// Outgoing edges in insertion order.
    edges: Array<Edge>,
}

/// A directed or undirected graph with optionally weighted edges.
///
/// # Examples
///
/// ```
/// use dsa_catalog::collections::Graph;
///
/// let mut graph = Graph::new();
/// for city in ["A", "B", "C"] {
///     graph.add_node(city);
/// }
///
/// graph.add_edge(&"A", &"B", Some(1.0));
/// graph.add_edge(&"B", &"C", Some(2.0));
/// graph.add_edge(&"A", &"C", Some(5.0));
///
/// assert_eq!(graph.shortest_path(&"A", &"C"), [&"A", &"B", &"C"]);
/// assert_eq!(graph.depth_first_search(&"A"), [&"A", &"B", &"C"]);
/// assert!(!graph.is_cyclic());
/// ```
#[derive(Debug, Clone)]
pub struct Graph<V> {
    /// `None` marks a vacated slot awaiting reuse.
    slots: Array<Option<Vertex<V>>>,
    /// Vacated slots, reused most recent first.
    free: Stack<NodeId>,
    /// Maps every value in the graph to its slot.
    index: HashTable<V, NodeId>,
    kind: GraphKind,
}

/// Cycle-detection state of a node.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    /// On the current depth-first path.
    Active,
    Finished,
}

/// Resumable depth-first position: the node and the next edge to follow.
struct Frame {
    id: NodeId,
    next: usize,
    /// Undirected only: the node this one was reached from, until the mirror
    /// of that edge has been skipped once.
    parent: Option<NodeId>,
}

/// Dijkstra frontier entry. Orders by distance, then by slot so equal
/// distances settle in slot order.
#[derive(Debug, Clone, Copy)]
struct Tentative {
    distance: f64,
    node: NodeId,
}

impl PartialEq for Tentative {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Tentative {}

impl PartialOrd for Tentative {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tentative {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.node.cmp(&other.node))
    }
}

impl<V> Graph<V> {
    /// Creates an empty directed graph.
    #[inline]
    pub const fn new() -> Self {
        Self::with_kind(GraphKind::Directed)
    }

    /// Creates an empty directed graph.
    #[inline]
    pub const fn directed() -> Self {
        Self::with_kind(GraphKind::Directed)
    }

    /// Creates an empty undirected graph.
    #[inline]
    pub const fn undirected() -> Self {
        Self::with_kind(GraphKind::Undirected)
    }

    /// Creates an empty graph of the given kind.
    #[inline]
    pub const fn with_kind(kind: GraphKind) -> Self {
        Self {
            slots: Array::new(),
            free: Stack::new(),
            index: HashTable::new(),
            kind,
        }
    }

    /// Returns whether the graph is directed or undirected.
    #[inline]
    pub const fn kind(&self) -> GraphKind {
        self.kind
    }

    /// Returns the number of nodes.
    #[inline]
    pub const fn node_count(&self) -> usize {
        self.index.len()
    }

    /// Returns the number of edges. An undirected edge counts once, although
    /// it is stored in both endpoints' edge lists.
    pub fn edge_count(&self) -> usize {
        let mut stored = 0;
        let mut self_loops = 0;

        for (id, vertex) in self.vertices() {
            stored += vertex.edges.len();
            self_loops += vertex.edges.iter().filter(|edge| edge.to == id).count();
        }

        match self.kind {
            GraphKind::Directed => stored,
            // Self-loops are stored once, every other edge twice.
            GraphKind::Undirected => (stored + self_loops) / 2,
        }
    }

    /// Returns `true` if the graph has no nodes.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the value stored in slot `id`, if it is occupied.
    #[inline]
    pub fn value(&self, id: NodeId) -> Option<&V> {
        self.vertex(id).map(|vertex| &vertex.value)
    }

    /// Iterates over all values in slot order.
    pub fn nodes(&self) -> impl Iterator<Item = &V> + '_ {
        self.vertices().map(|(_, vertex)| &vertex.value)
    }

    /// Removes every node and edge.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.index.clear();
    }

    #[inline]
    fn vertex(&self, id: NodeId) -> Option<&Vertex<V>> {
        self.slots.get(id.0)?.as_ref()
    }

    fn vertices(&self) -> impl Iterator<Item = (NodeId, &Vertex<V>)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|vertex| (NodeId(i), vertex)))
    }

    #[inline]
    fn edges_of(&self, id: NodeId) -> &[Edge] {
        self.vertex(id).map_or(&[][..], |vertex| &vertex.edges[..])
    }

    fn push_edge(&mut self, from: NodeId, to: NodeId, weight: Option<f64>) {
        if let Some(Some(vertex)) = self.slots.get_mut(from.0) {
            vertex.edges.push(Edge { to, weight });
        }
    }

    /// Drops every edge `from -> to`, returning how many there were.
    fn drop_edges(&mut self, from: NodeId, to: NodeId) -> usize {
        let Some(Some(vertex)) = self.slots.get_mut(from.0) else {
            return 0;
        };

        let before = vertex.edges.len();
        vertex.edges.retain(|edge| edge.to != to);
        before - vertex.edges.len()
    }
}

impl<V: Eq + Hash + Clone> Graph<V> {
    /// Adds a node holding `value`.
    ///
    /// Values are unique: if an equal value is already present the graph is
    /// left unchanged and `false` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::Graph;
    ///
    /// let mut graph = Graph::new();
    /// assert!(graph.add_node(1));
    /// assert!(!graph.add_node(1));
    /// assert_eq!(graph.node_count(), 1);
    /// ```
    #[inline]
    pub fn add_node(&mut self, value: V) -> bool {
        self.try_add_node(value).is_ok()
    }

    /// Adds a node holding `value` and returns its handle, or
    /// [`Error::DuplicateNode`] if an equal value is already present.
    pub fn try_add_node(&mut self, value: V) -> Result<NodeId> {
        if self.index.contains_key(&value) {
            return Err(Error::DuplicateNode);
        }

        let vertex = Vertex {
            value: value.clone(),
            edges: Array::new(),
        };

        let id = match self.free.pop() {
            Some(id) => {
                if let Some(slot) = self.slots.get_mut(id.0) {
                    *slot = Some(vertex);
                }
                id
            }
            None => {
                self.slots.push(Some(vertex));
                NodeId(self.slots.len() - 1)
            }
        };

        self.index.insert(value, id);

        Ok(id)
    }

    /// Returns the handle of the node holding `value`.
    #[inline]
    pub fn node_id(&self, value: &V) -> Option<NodeId> {
        self.index.get(value).copied()
    }

    /// Returns `true` if a node holds `value`.
    #[inline]
    pub fn contains_node(&self, value: &V) -> bool {
        self.index.contains_key(value)
    }

    /// Adds an edge from `source` to `destination`, plus the mirror edge in an
    /// undirected graph. Parallel edges are kept, and an undirected self-loop is
    /// stored once.
    ///
    /// Returns `false` without changing anything when either endpoint is
    /// missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::Graph;
    ///
    /// let mut graph = Graph::undirected();
    /// graph.add_node('a');
    /// graph.add_node('b');
    ///
    /// assert!(graph.add_edge(&'a', &'b', None));
    /// assert!(!graph.add_edge(&'a', &'z', None));
    ///
    /// assert_eq!(graph.edge_count(), 1);
    /// assert!(graph.has_edge(&'b', &'a'));
    /// ```
    #[inline]
    pub fn add_edge(&mut self, source: &V, destination: &V, weight: Option<f64>) -> bool {
        self.try_add_edge(source, destination, weight).is_ok()
    }

    /// Strict version of [`add_edge`](Graph::add_edge) returning
    /// [`Error::MissingNode`] when an endpoint is missing.
    pub fn try_add_edge(&mut self, source: &V, destination: &V, weight: Option<f64>) -> Result<()> {
        let from = self.node_id(source).ok_or(Error::MissingNode)?;
        let to = self.node_id(destination).ok_or(Error::MissingNode)?;

        self.push_edge(from, to, weight);
        if self.kind == GraphKind::Undirected && from != to {
            self.push_edge(to, from, weight);
        }

        Ok(())
    }

    /// Removes every edge from `source` to `destination`, and their mirrors
    /// in an undirected graph. Returns whether anything was removed.
    pub fn remove_edge(&mut self, source: &V, destination: &V) -> bool {
        let (Some(from), Some(to)) = (self.node_id(source), self.node_id(destination)) else {
            return false;
        };

        let mut removed = self.drop_edges(from, to);
        if self.kind == GraphKind::Undirected && from != to {
            removed += self.drop_edges(to, from);
        }

        removed > 0
    }

    /// Removes the node holding `value` along with every edge that starts or
    /// ends at it. Returns `false` if no node holds `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::Graph;
    ///
    /// let mut graph = Graph::new();
    /// for x in 1..=3 {
    ///     graph.add_node(x);
    /// }
    /// graph.add_edge(&1, &2, None);
    /// graph.add_edge(&3, &2, None);
    ///
    /// assert!(graph.remove_node(&2));
    /// assert_eq!(graph.edge_count(), 0);
    /// assert_eq!(graph.breadth_first_search(&1), [&1]);
    /// ```
    pub fn remove_node(&mut self, value: &V) -> bool {
        let Some(id) = self.index.remove(value) else {
            return false;
        };

        let outgoing = self
            .slots
            .get_mut(id.0)
            .and_then(Option::take)
            .map_or(0, |vertex| vertex.edges.len());

        let mut incoming = 0;
        for vertex in self.slots.iter_mut().flatten() {
            let before = vertex.edges.len();
            vertex.edges.retain(|edge| edge.to != id);
            incoming += before - vertex.edges.len();
        }

        self.free.push(id);

        debug!(node = id.index(), outgoing, incoming, "removed graph node");

        true
    }

    /// Iterates over the neighbors of `value` in edge insertion order, with
    /// each edge's weight. Empty if `value` is missing.
    pub fn neighbors(&self, value: &V) -> impl Iterator<Item = (&V, Option<f64>)> + '_ {
        let edges = self.node_id(value).map_or(&[][..], |id| self.edges_of(id));

        edges
            .iter()
            .filter_map(move |edge| Some((self.value(edge.to)?, edge.weight)))
    }

    /// Returns `true` if at least one edge leads from `source` to
    /// `destination`.
    pub fn has_edge(&self, source: &V, destination: &V) -> bool {
        self.first_edge(source, destination).is_some()
    }

    /// Cost of the first edge from `source` to `destination`, where an
    /// unweighted edge costs `0.0`. [`None`] if there is no such edge.
    pub fn edge_weight(&self, source: &V, destination: &V) -> Option<f64> {
        self.first_edge(source, destination).map(Edge::cost)
    }

    fn first_edge(&self, source: &V, destination: &V) -> Option<&Edge> {
        let from = self.node_id(source)?;
        let to = self.node_id(destination)?;

        self.edges_of(from).iter().find(|edge| edge.to == to)
    }

    /// Visits every node reachable from `start` depth first, following edges in
    /// insertion order, and returns the values in pre-order.
    ///
    /// Uses an explicit stack, so long paths cannot overflow the call stack.
    /// Returns an empty sequence if `start` is missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::Graph;
    ///
    /// let mut graph = Graph::new();
    /// for x in 1..=4 {
    ///     graph.add_node(x);
    /// }
    /// graph.add_edge(&1, &2, None);
    /// graph.add_edge(&1, &3, None);
    /// graph.add_edge(&2, &4, None);
    ///
    /// assert_eq!(graph.depth_first_search(&1), [&1, &2, &4, &3]);
    /// assert!(graph.depth_first_search(&9).is_empty());
    /// ```
    pub fn depth_first_search(&self, start: &V) -> Vec<&V> {
        let mut order = Vec::new();
        let Some(start) = self.node_id(start) else {
            return order;
        };

        let mut visited = array![false; self.slots.len()];
        let mut pending = Stack::new();
        pending.push(start);

        while let Some(id) = pending.pop() {
            if visited[id.0] {
                continue;
            }
            visited[id.0] = true;

            let Some(vertex) = self.vertex(id) else {
                continue;
            };
            order.push(&vertex.value);

            // Reversed, so the first edge is popped first.
            for edge in vertex.edges.iter().rev() {
                if !visited[edge.to.0] {
                    pending.push(edge.to);
                }
            }
        }

        order
    }

    /// Visits every node reachable from `start` in level order, following
    /// edges in insertion order. Returns an empty sequence if `start` is
    /// missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::Graph;
    ///
    /// let mut graph = Graph::new();
    /// for x in 1..=4 {
    ///     graph.add_node(x);
    /// }
    /// graph.add_edge(&1, &2, None);
    /// graph.add_edge(&1, &3, None);
    /// graph.add_edge(&2, &4, None);
    ///
    /// assert_eq!(graph.breadth_first_search(&1), [&1, &2, &3, &4]);
    /// ```
    pub fn breadth_first_search(&self, start: &V) -> Vec<&V> {
        let mut order = Vec::new();
        let Some(start) = self.node_id(start) else {
            return order;
        };

        let mut visited = array![false; self.slots.len()];
        let mut pending = Queue::new();

        visited[start.0] = true;
        pending.enqueue(start);

        while let Some(id) = pending.dequeue() {
            let Some(vertex) = self.vertex(id) else {
                continue;
            };
            order.push(&vertex.value);

            for edge in vertex.edges.iter() {
                if !visited[edge.to.0] {
                    visited[edge.to.0] = true;
                    pending.enqueue(edge.to);
                }
            }
        }

        order
    }

    /// Returns `true` if the graph contains a cycle. Every component is
    /// checked.
    ///
    /// A directed graph is cyclic when a depth-first search meets an edge back
    /// to a node on its current path. In an undirected graph, walking back
    /// along the single edge used to arrive is not a cycle, but any other edge
    /// to an already visited node is. Self-loops count as cycles in both
    /// kinds, while parallel edges only close a cycle in an undirected graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::Graph;
    ///
    /// let mut graph = Graph::new();
    /// for x in 1..=3 {
    ///     graph.add_node(x);
    /// }
    /// graph.add_edge(&1, &2, None);
    /// graph.add_edge(&2, &3, None);
    /// assert!(!graph.is_cyclic());
    ///
    /// graph.add_edge(&3, &1, None);
    /// assert!(graph.is_cyclic());
    /// ```
    pub fn is_cyclic(&self) -> bool {
        match self.kind {
            GraphKind::Directed => self.has_directed_cycle(),
            GraphKind::Undirected => self.has_undirected_cycle(),
        }
    }

    fn has_directed_cycle(&self) -> bool {
        let mut marks = array![Mark::Unvisited; self.slots.len()];
        let mut frames: Stack<Frame> = Stack::new();

        for (root, _) in self.vertices() {
            if marks[root.0] != Mark::Unvisited {
                continue;
            }

            marks[root.0] = Mark::Active;
            frames.push(Frame {
                id: root,
                next: 0,
                parent: None,
            });

            while let Some(frame) = frames.peek_mut() {
                let id = frame.id;

                let Some(edge) = self.edges_of(id).get(frame.next) else {
                    marks[id.0] = Mark::Finished;
                    frames.pop();
                    continue;
                };
                frame.next += 1;

                match marks[edge.to.0] {
                    Mark::Active => return true,
                    Mark::Finished => {}
                    Mark::Unvisited => {
                        marks[edge.to.0] = Mark::Active;
                        frames.push(Frame {
                            id: edge.to,
                            next: 0,
                            parent: None,
                        });
                    }
                }
            }
        }

        false
    }

    fn has_undirected_cycle(&self) -> bool {
        let mut visited = array![false; self.slots.len()];
        let mut frames: Stack<Frame> = Stack::new();

        for (root, _) in self.vertices() {
            if visited[root.0] {
                continue;
            }

            visited[root.0] = true;
            frames.push(Frame {
                id: root,
                next: 0,
                parent: None,
            });

            while let Some(frame) = frames.peek_mut() {
                let id = frame.id;

                let Some(edge) = self.edges_of(id).get(frame.next) else {
                    frames.pop();
                    continue;
                };
                frame.next += 1;

                if frame.parent == Some(edge.to) {
                    // The mirror of the edge we arrived by. Skipped once only,
                    // so a parallel edge is still seen.
                    frame.parent = None;
                    continue;
                }

                if visited[edge.to.0] {
                    return true;
                }

                visited[edge.to.0] = true;
                frames.push(Frame {
                    id: edge.to,
                    next: 0,
                    parent: Some(id),
                });
            }
        }

        false
    }

    /// Returns the cheapest path from `start` to `end`, both included, or an
    /// empty sequence if either is missing or `end` is unreachable.
    ///
    /// See [`shortest_path_with_distance`] for the cost model.
    ///
    /// [`shortest_path_with_distance`]: Graph::shortest_path_with_distance
    #[inline]
    pub fn shortest_path(&self, start: &V, end: &V) -> Vec<&V> {
        self.shortest_path_with_distance(start, end)
            .map(|(_, path)| path)
            .unwrap_or_default()
    }

    /// Runs Dijkstra's algorithm from `start` and returns the total cost and
    /// the path to `end`, or [`None`] if either is missing or `end` is
    /// unreachable.
    ///
    /// Unweighted edges cost `0.0`. Among frontier entries of equal distance
    /// the node in the lower slot settles first, which makes the chosen path
    /// deterministic. The search stops as soon as `end` is settled. Negative
    /// weights are not supported and are not checked.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::Graph;
    ///
    /// let mut graph = Graph::new();
    /// for x in ['A', 'B', 'C', 'D'] {
    ///     graph.add_node(x);
    /// }
    /// graph.add_edge(&'A', &'B', Some(1.0));
    /// graph.add_edge(&'B', &'C', Some(2.0));
    /// graph.add_edge(&'A', &'C', Some(5.0));
    ///
    /// let (distance, path) = graph.shortest_path_with_distance(&'A', &'C').unwrap();
    /// assert_eq!(distance, 3.0);
    /// assert_eq!(path, [&'A', &'B', &'C']);
    ///
    /// assert_eq!(graph.shortest_path_with_distance(&'A', &'D'), None);
    /// assert_eq!(graph.shortest_path_with_distance(&'A', &'A'), Some((0.0, vec![&'A'])));
    /// ```
    pub fn shortest_path_with_distance(&self, start: &V, end: &V) -> Option<(f64, Vec<&V>)> {
        let start = self.node_id(start)?;
        let end = self.node_id(end)?;

        let slots = self.slots.len();
        let mut distance = array![f64::INFINITY; slots];
        let mut previous: Array<Option<NodeId>> = array![None; slots];
        let mut settled = array![false; slots];
        let mut frontier = Heap::min();

        distance[start.0] = 0.0;
        frontier.push(Tentative {
            distance: 0.0,
            node: start,
        });

        while let Some(Tentative { distance: reached, node }) = frontier.pop() {
            // Stale entry left behind by a later, cheaper relaxation.
            if settled[node.0] {
                continue;
            }
            settled[node.0] = true;

            if node == end {
                break;
            }

            for edge in self.edges_of(node) {
                let candidate = reached + edge.cost();

                if !settled[edge.to.0] && candidate < distance[edge.to.0] {
                    trace!(
                        from = node.index(),
                        to = edge.to.index(),
                        distance = candidate,
                        "relaxed edge"
                    );

                    distance[edge.to.0] = candidate;
                    previous[edge.to.0] = Some(node);
                    frontier.push(Tentative {
                        distance: candidate,
                        node: edge.to,
                    });
                }
            }
        }

        if !settled[end.0] {
            debug!(
                start = start.index(),
                end = end.index(),
                "no route between nodes"
            );
            return None;
        }

        let mut path = Vec::new();
        let mut cursor = Some(end);
        while let Some(id) = cursor {
            path.push(self.value(id)?);
            cursor = previous[id.0];
        }
        path.reverse();

        Some((distance[end.0], path))
    }
}

impl<V> Default for Graph<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_of(kind: GraphKind, nodes: &[u32], edges: &[(u32, u32)]) -> Graph<u32> {
        let mut graph = Graph::with_kind(kind);
        for &node in nodes {
            graph.add_node(node);
        }
        for (from, to) in edges {
            assert!(graph.add_edge(from, to, None));
        }
        graph
    }

    fn stored_targets(graph: &Graph<u32>) -> Vec<NodeId> {
        graph
            .vertices()
            .flat_map(|(_, vertex)| vertex.edges.iter().map(|edge| edge.to))
            .collect()
    }

    #[test]
    fn test_duplicate_nodes_rejected() {
        let mut graph = Graph::new();

        assert!(graph.try_add_node("x").is_ok());
        assert_eq!(graph.try_add_node("x"), Err(Error::DuplicateNode));
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_missing_endpoints_are_no_ops() {
        let mut graph = graph_of(GraphKind::Directed, &[1, 2], &[]);

        assert!(!graph.add_edge(&1, &3, Some(1.0)));
        assert!(!graph.add_edge(&3, &1, Some(1.0)));
        assert_eq!(graph.try_add_edge(&3, &1, None), Err(Error::MissingNode));
        assert!(!graph.remove_edge(&1, &3));
        assert!(!graph.remove_node(&3));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_cycle_detection_directed() {
        let cyclic = graph_of(GraphKind::Directed, &[1, 2, 3], &[(1, 2), (2, 3), (3, 1)]);
        assert!(cyclic.is_cyclic());

        let acyclic = graph_of(GraphKind::Directed, &[1, 2, 3], &[(1, 2), (2, 3)]);
        assert!(!acyclic.is_cyclic());

        // Diamond: two paths into 4 but no back edge.
        let diamond = graph_of(
            GraphKind::Directed,
            &[1, 2, 3, 4],
            &[(1, 2), (1, 3), (2, 4), (3, 4)],
        );
        assert!(!diamond.is_cyclic());

        let self_loop = graph_of(GraphKind::Directed, &[1], &[(1, 1)]);
        assert!(self_loop.is_cyclic());

        // The repeated edge reaches a finished node, not one on the path.
        let parallel = graph_of(GraphKind::Directed, &[1, 2], &[(1, 2), (1, 2)]);
        assert_eq!(parallel.edge_count(), 2);
        assert!(!parallel.is_cyclic());
    }

    #[test]
    fn test_cycle_in_second_component() {
        let graph = graph_of(GraphKind::Directed, &[1, 2, 3, 4], &[(1, 2), (3, 4), (4, 3)]);
        assert!(graph.is_cyclic());
    }

    #[test]
    fn test_cycle_detection_undirected() {
        let path = graph_of(GraphKind::Undirected, &[1, 2, 3], &[(1, 2), (2, 3)]);
        assert!(!path.is_cyclic());

        let triangle = graph_of(GraphKind::Undirected, &[1, 2, 3], &[(1, 2), (2, 3), (3, 1)]);
        assert!(triangle.is_cyclic());

        let parallel = graph_of(GraphKind::Undirected, &[1, 2], &[(1, 2), (2, 1)]);
        assert!(parallel.is_cyclic());

        let self_loop = graph_of(GraphKind::Undirected, &[1, 2], &[(1, 2), (2, 2)]);
        assert!(self_loop.is_cyclic());
        assert_eq!(self_loop.edge_count(), 2);
    }

    #[test]
    fn test_traversal_follows_insertion_order() {
        let graph = graph_of(
            GraphKind::Directed,
            &[1, 2, 3, 4, 5],
            &[(1, 3), (1, 2), (3, 5), (2, 4), (4, 1)],
        );

        assert_eq!(graph.depth_first_search(&1), [&1, &3, &5, &2, &4]);
        assert_eq!(graph.breadth_first_search(&1), [&1, &3, &2, &5, &4]);
        assert_eq!(graph.depth_first_search(&5), [&5]);

        // Repeated calls see the same graph and give the same answer.
        assert_eq!(graph.depth_first_search(&1), graph.depth_first_search(&1));
    }

    #[test]
    fn test_dfs_matches_recursive_preorder() {
        // 2 is reached through 3 before the direct edge from 1 is followed.
        let graph = graph_of(
            GraphKind::Directed,
            &[1, 2, 3],
            &[(1, 3), (1, 2), (3, 2)],
        );

        assert_eq!(graph.depth_first_search(&1), [&1, &3, &2]);
    }

    #[test]
    fn test_shortest_path() {
        let mut graph = Graph::new();
        for x in ["A", "B", "C", "D"] {
            graph.add_node(x);
        }
        graph.add_edge(&"A", &"B", Some(1.0));
        graph.add_edge(&"B", &"C", Some(2.0));
        graph.add_edge(&"A", &"C", Some(5.0));

        assert_eq!(graph.shortest_path(&"A", &"C"), [&"A", &"B", &"C"]);
        assert!(graph.shortest_path(&"A", &"D").is_empty());
        assert!(graph.shortest_path(&"C", &"A").is_empty());
        assert!(graph.shortest_path(&"A", &"Z").is_empty());
        assert_eq!(graph.shortest_path(&"D", &"D"), [&"D"]);
    }

    #[test]
    fn test_unweighted_edges_cost_nothing() {
        let mut graph = graph_of(GraphKind::Directed, &[1, 2, 3], &[(1, 2), (2, 3)]);
        graph.add_edge(&1, &3, Some(0.5));

        assert_eq!(
            graph.shortest_path_with_distance(&1, &3),
            Some((0.0, vec![&1, &2, &3]))
        );
        assert_eq!(graph.edge_weight(&1, &2), Some(0.0));
        assert_eq!(graph.edge_weight(&1, &3), Some(0.5));
        assert_eq!(graph.edge_weight(&3, &1), None);
    }

    #[test]
    fn test_equal_distances_prefer_lower_slot() {
        let mut graph = Graph::new();
        for x in ['s', 'a', 'b', 't'] {
            graph.add_node(x);
        }
        graph.add_edge(&'s', &'b', Some(1.0));
        graph.add_edge(&'s', &'a', Some(1.0));
        graph.add_edge(&'b', &'t', Some(1.0));
        graph.add_edge(&'a', &'t', Some(1.0));

        // `a` occupies the lower slot, so it settles first and claims `t`.
        assert_eq!(graph.shortest_path(&'s', &'t'), [&'s', &'a', &'t']);
    }

    #[test]
    fn test_undirected_shortest_path_uses_mirrors() {
        let mut graph = Graph::undirected();
        for x in 1..=3 {
            graph.add_node(x);
        }
        graph.add_edge(&1, &2, Some(4.0));
        graph.add_edge(&2, &3, Some(1.0));

        assert_eq!(
            graph.shortest_path_with_distance(&3, &1),
            Some((5.0, vec![&3, &2, &1]))
        );
    }

    #[test]
    fn test_remove_node_cascades() {
        let mut graph = graph_of(
            GraphKind::Directed,
            &[1, 2, 3],
            &[(1, 2), (2, 3), (3, 2), (2, 2), (3, 1)],
        );
        let removed = graph.node_id(&2).unwrap();

        assert!(graph.remove_node(&2));
        assert!(!graph.contains_node(&2));
        assert!(!stored_targets(&graph).contains(&removed));
        assert_eq!(graph.edge_count(), 1);

        // The vacated slot is reused without inheriting any edges.
        assert!(graph.add_node(4));
        assert_eq!(graph.node_id(&4), Some(removed));
        assert_eq!(graph.neighbors(&1).count(), 0);
        assert_eq!(graph.depth_first_search(&3), [&3, &1]);
    }

    #[test]
    fn test_remove_edge_undirected() {
        let mut graph = graph_of(GraphKind::Undirected, &[1, 2, 3], &[(1, 2), (1, 2), (2, 3)]);
        assert_eq!(graph.edge_count(), 3);

        assert!(graph.remove_edge(&2, &1));
        assert!(!graph.has_edge(&1, &2));
        assert!(!graph.has_edge(&2, &1));
        assert_eq!(graph.edge_count(), 1);
        assert!(!graph.remove_edge(&1, &2));
    }

    #[test]
    fn test_neighbors_with_weights() {
        let mut graph = graph_of(GraphKind::Directed, &[1, 2, 3], &[]);
        graph.add_edge(&1, &3, Some(2.5));
        graph.add_edge(&1, &2, None);

        let neighbors: Vec<_> = graph.neighbors(&1).collect();
        assert_eq!(neighbors, [(&3, Some(2.5)), (&2, None)]);
        assert_eq!(graph.neighbors(&9).count(), 0);
    }

    #[test]
    fn test_clear() {
        let mut graph = graph_of(GraphKind::Undirected, &[1, 2], &[(1, 2)]);
        graph.clear();

        assert!(graph.is_empty());
        assert_eq!(graph.nodes().count(), 0);
        assert!(graph.add_node(1));
        assert_eq!(graph.node_id(&1), Some(NodeId(0)));
    }
}
