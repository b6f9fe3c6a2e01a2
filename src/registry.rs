use crate::config::DEFAULT_GRID_UNIT;
use crate::error::CanvasError;
use crate::grid::GridPoint;
use crate::hit_test::SimpleNodeGeometry;
use crate::icon::{resolve_icon, Glyph};
use crate::palette::{Category, Template};
use crate::sync::sync_rows;
use slint::{SharedString, VecModel};
use std::fmt;

/// Identity of a placed node.
///
/// Ids come from a per-registry monotonic counter and are never reused, even
/// after the node they named is deleted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

/// A placed instance of a palette template.
///
/// Only the registry can change a node, and only its position.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    id: NodeId,
    category: Category,
    label: SharedString,
    icon_key: SharedString,
    position: GridPoint,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn label(&self) -> &SharedString {
        &self.label
    }

    pub fn icon_key(&self) -> &SharedString {
        &self.icon_key
    }

    /// Glyph for the node's icon key, falling back for unknown keys.
    pub fn glyph(&self) -> Glyph {
        resolve_icon(self.icon_key.as_str())
    }

    pub fn position(&self) -> GridPoint {
        self.position
    }

    /// Node rectangle for hit testing, given the rendered node size.
    pub fn geometry(&self, size: (f32, f32)) -> SimpleNodeGeometry {
        SimpleNodeGeometry {
            id: self.id,
            x: self.position.x as f32,
            y: self.position.y as f32,
            width: size.0,
            height: size.1,
        }
    }
}

/// Ordered collection of placed nodes.
///
/// Insertion order is kept and defines the connector chain. Every mutation
/// bumps [`revision`](Self::revision) so derived state knows when to rebuild.
#[derive(Debug)]
pub struct NodeRegistry {
    nodes: Vec<Node>,
    next_id: u64,
    revision: u64,
    grid_unit: i32,
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::with_grid_unit(DEFAULT_GRID_UNIT)
    }
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grid_unit(grid_unit: i32) -> Self {
        Self {
            nodes: Vec::new(),
            next_id: 1,
            revision: 0,
            grid_unit,
        }
    }

    pub fn grid_unit(&self) -> i32 {
        self.grid_unit
    }

    /// Append a node built from `template` at `position`.
    pub fn insert(&mut self, template: &Template, position: GridPoint) -> NodeId {
        debug_assert!(position.is_aligned(self.grid_unit), "unaligned position {:?}", position);
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.push(Node {
            id,
            category: template.category,
            label: SharedString::from(template.label.as_str()),
            icon_key: SharedString::from(template.icon_key.as_str()),
            position,
        });
        self.revision += 1;
        id
    }

    /// Remove a node, keeping the relative order of the rest.
    pub fn remove(&mut self, id: NodeId) -> Result<Node, CanvasError> {
        let index = self.index_of(id).ok_or(CanvasError::NodeNotFound(id))?;
        let node = self.nodes.remove(index);
        self.revision += 1;
        Ok(node)
    }

    /// Move a node. Returns whether the position actually changed.
    pub fn set_position(&mut self, id: NodeId, position: GridPoint) -> Result<bool, CanvasError> {
        debug_assert!(position.is_aligned(self.grid_unit), "unaligned position {:?}", position);
        let node = self
            .nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(CanvasError::NodeNotFound(id))?;
        if node.position == position {
            return Ok(false);
        }
        node.position = position;
        self.revision += 1;
        Ok(true)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Changes every time a node is added, removed or moved.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Hit-test rectangles for all nodes, in insertion order.
    pub fn geometries(&self, size: (f32, f32)) -> impl Iterator<Item = SimpleNodeGeometry> + '_ {
        self.nodes.iter().map(move |n| n.geometry(size))
    }

    /// Sync the nodes to a Slint `VecModel`, building each row with `constructor`.
    pub fn sync_to_model<P, F>(&self, model: &VecModel<P>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(&Node) -> P,
    {
        sync_rows(model, self.nodes.iter().map(constructor));
    }
}
