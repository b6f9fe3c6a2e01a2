use crate::registry::{Node, NodeId};
use slint::SharedString;

/// Default value of the inspector's priority field.
pub const DEFAULT_PRIORITY_INDEX: i32 = 1000;

/// Single-node selection.
///
/// Holds at most one id. The editor clears it when the selected node is
/// deleted, so it never points at a node that is gone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<NodeId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `id`, replacing any previous selection.
    ///
    /// Returns `true` if the selection changed.
    pub fn select(&mut self, id: NodeId) -> bool {
        if self.selected == Some(id) {
            return false;
        }
        self.selected = Some(id);
        true
    }

    /// Clear the current selection
    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// Check if an ID is selected
    pub fn contains(&self, id: NodeId) -> bool {
        self.selected == Some(id)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_none()
    }

    /// React to a node leaving the registry: only clears if it was selected.
    pub fn node_removed(&mut self, id: NodeId) {
        if self.contains(id) {
            self.selected = None;
        }
    }
}

/// Inspector panel bound to the selected node.
///
/// `id` and `label` mirror the node. The two draft fields are display state
/// only; editing them never changes the node registry.
#[derive(Clone, Debug, PartialEq)]
pub struct Inspector {
    id: NodeId,
    label: SharedString,
    custom_identifier: SharedString,
    priority_index: i32,
}

impl Inspector {
    /// Bind a fresh inspector to `node`, seeding the drafts.
    pub fn bind(node: &Node) -> Self {
        Self {
            id: node.id(),
            label: node.label().clone(),
            custom_identifier: default_identifier(node.label()).into(),
            priority_index: DEFAULT_PRIORITY_INDEX,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn label(&self) -> &SharedString {
        &self.label
    }

    pub fn custom_identifier(&self) -> &SharedString {
        &self.custom_identifier
    }

    pub fn set_custom_identifier(&mut self, value: impl Into<SharedString>) {
        self.custom_identifier = value.into();
    }

    pub fn priority_index(&self) -> i32 {
        self.priority_index
    }

    pub fn set_priority_index(&mut self, value: i32) {
        self.priority_index = value;
    }
}

/// Lower-case the label and replace each whitespace character with `_`.
pub fn default_identifier(label: &str) -> String {
    label
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .flat_map(char::to_lowercase)
        .collect()
}
