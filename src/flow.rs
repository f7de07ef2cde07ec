//! Flow projection: tasks as a directed dependency graph.
//!
//! Every task becomes a node and every dependency entry that resolves to
//! a live task becomes an edge from predecessor to dependent. Nodes are
//! first placed on a fixed-column grid in repository order; once placed,
//! a node's position is user-owned and survives data refreshes, with the
//! grid formula applying only to newly-appeared nodes. Edges are always
//! recomputed from scratch, so dangling dependency ids (left behind by
//! non-cascading deletes) simply produce no edge.

use crate::error::Result;
use crate::tasks::{Task, TaskRepository, TaskUpdate};
use std::collections::HashMap;

/// A 2D canvas position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    /// Horizontal offset in canvas units.
    pub x: f64,
    /// Vertical offset in canvas units.
    pub y: f64,
}

/// Fixed-column grid used for initial node placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    /// Number of grid columns. Values below 1 are treated as 1.
    pub columns: usize,
    /// Horizontal cell pitch.
    pub cell_width: f64,
    /// Vertical cell pitch.
    pub cell_height: f64,
    /// Horizontal offset of the first column.
    pub offset_x: f64,
    /// Vertical offset of the first row.
    pub offset_y: f64,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self { columns: 4, cell_width: 280.0, cell_height: 180.0, offset_x: 50.0, offset_y: 50.0 }
    }
}

impl GridLayout {
    /// Grid position for the node at sequence index `index`: column
    /// `index % columns`, row `index / columns`. Deterministic and
    /// collision-free regardless of dependency structure.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn position(&self, index: usize) -> Position {
        let columns = self.columns.max(1);
        Position {
            x: (index % columns) as f64 * self.cell_width + self.offset_x,
            y: (index / columns) as f64 * self.cell_height + self.offset_y,
        }
    }
}

/// A graph node: one task plus its canvas position.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowNode {
    /// Node id, equal to the task id.
    pub id: String,
    /// The task rendered by this node.
    pub task: Task,
    /// Current canvas position.
    pub position: Position,
}

/// A directed dependency edge from predecessor to dependent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowEdge {
    /// Edge id, `"{source}-{target}"`.
    pub id: String,
    /// Predecessor task id.
    pub source: String,
    /// Dependent task id.
    pub target: String,
}

impl FlowEdge {
    fn new(source: &str, target: &str) -> Self {
        Self { id: format!("{source}-{target}"), source: source.to_string(), target: target.to_string() }
    }
}

/// Derive the edge set for a task list.
///
/// Emits one edge `dep -> task` per dependency entry that names a task
/// present in the list; dangling ids yield no edge.
#[must_use]
pub fn task_edges(tasks: &[Task]) -> Vec<FlowEdge> {
    let mut edges = Vec::new();
    for task in tasks {
        let Some(deps) = &task.dependencies else {
            continue;
        };
        for dep in deps {
            if tasks.iter().any(|other| &other.id == dep) {
                edges.push(FlowEdge::new(dep, &task.id));
            }
        }
    }
    edges
}

/// The graph projection: nodes, edges, and the layout used for new
/// nodes.
///
/// Connection-in-progress state belongs to the rendering layer; the view
/// holds only the settled node and edge sets.
#[derive(Debug, Clone)]
pub struct FlowView {
    layout: GridLayout,
    nodes: Vec<FlowNode>,
    edges: Vec<FlowEdge>,
}

impl FlowView {
    /// Create a view of the repository with the default grid layout.
    #[must_use]
    pub fn new(repo: &TaskRepository) -> Self {
        Self::with_layout(repo, GridLayout::default())
    }

    /// Create a view of the repository with a custom grid layout.
    #[must_use]
    pub fn with_layout(repo: &TaskRepository, layout: GridLayout) -> Self {
        let mut view = Self { layout, nodes: Vec::new(), edges: Vec::new() };
        view.sync(repo);
        view
    }

    /// Nodes in repository order.
    #[must_use]
    pub fn nodes(&self) -> &[FlowNode] {
        &self.nodes
    }

    /// The current edge set.
    #[must_use]
    pub fn edges(&self) -> &[FlowEdge] {
        &self.edges
    }

    /// Get a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Rebuild nodes and edges from the current repository state.
    ///
    /// Existing node positions are preserved by id; nodes for
    /// newly-appeared tasks fall back to the grid formula. The edge set
    /// is replaced wholesale.
    pub fn sync(&mut self, repo: &TaskRepository) {
        let positions: HashMap<String, Position> =
            self.nodes.iter().map(|node| (node.id.clone(), node.position)).collect();

        self.nodes = repo
            .tasks()
            .iter()
            .enumerate()
            .map(|(index, task)| FlowNode {
                id: task.id.clone(),
                position: positions
                    .get(&task.id)
                    .copied()
                    .unwrap_or_else(|| self.layout.position(index)),
                task: task.clone(),
            })
            .collect();
        self.edges = task_edges(repo.tasks());
    }

    /// Move a node to a user-chosen position.
    ///
    /// The position is preserved across subsequent [`Self::sync`] calls.
    /// Returns `false` if no node has the given id.
    pub fn move_node(&mut self, id: &str, position: Position) -> bool {
        match self.nodes.iter_mut().find(|node| node.id == id) {
            Some(node) => {
                node.position = position;
                true
            }
            None => false,
        }
    }

    /// Draw a dependency edge from `source` to `target`.
    ///
    /// Rejected (returning `Ok(false)`, no error) when either end is
    /// empty, the ends are equal, or an edge already exists in the same
    /// direction. The reverse direction is a structurally distinct edge
    /// and is not checked. On acceptance the edge is added and `source`
    /// is appended to the target task's dependencies unless already
    /// present.
    ///
    /// # Errors
    ///
    /// Returns an error if the dependency update cannot be persisted.
    pub fn connect(
        &mut self,
        repo: &mut TaskRepository,
        source: &str,
        target: &str,
    ) -> Result<bool> {
        if source.is_empty() || target.is_empty() || source == target {
            return Ok(false);
        }
        if self.edges.iter().any(|edge| edge.source == source && edge.target == target) {
            return Ok(false);
        }

        self.edges.push(FlowEdge::new(source, target));

        if let Some(task) = repo.get_task(target) {
            if !task.depends_on(source) {
                let mut deps = task.dependencies.clone().unwrap_or_default();
                deps.push(source.to_string());
                repo.update_task(
                    target,
                    TaskUpdate { dependencies: Some(deps), ..Default::default() },
                )?;
            }
        }

        Ok(true)
    }

    /// Remove the edges with the given ids, individually or in bulk.
    ///
    /// For each removed edge the source id is dropped from the target
    /// task's dependencies; a dependency list emptied this way is stored
    /// as absent. Returns the number of edges removed.
    ///
    /// # Errors
    ///
    /// Returns an error if a dependency update cannot be persisted.
    pub fn remove_edges(&mut self, repo: &mut TaskRepository, edge_ids: &[&str]) -> Result<usize> {
        let removed: Vec<FlowEdge> = self
            .edges
            .iter()
            .filter(|edge| edge_ids.contains(&edge.id.as_str()))
            .cloned()
            .collect();

        for edge in &removed {
            if let Some(task) = repo.get_task(&edge.target) {
                let deps: Vec<String> = task
                    .dependencies
                    .clone()
                    .unwrap_or_default()
                    .into_iter()
                    .filter(|dep| dep != &edge.source)
                    .collect();
                repo.update_task(
                    &edge.target,
                    TaskUpdate { dependencies: Some(deps), ..Default::default() },
                )?;
            }
        }

        self.edges.retain(|edge| !edge_ids.contains(&edge.id.as_str()));
        Ok(removed.len())
    }
}
