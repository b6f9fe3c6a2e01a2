//! Editor state: the single owner of everything the canvas mutates.
//!
//! Every input goes through one of the `handle_*` methods, each of which
//! commits its change to the registry before the connectors are rebuilt, so
//! derived state never sees a half-applied update.

use crate::canvas::CanvasFrame;
use crate::config::EditorConfig;
use crate::connectors::{Connector, ConnectorRouter};
use crate::drag::{
    DragController, DragState, ListenerHost, ListenerRegistry, PendingListenerEvents,
};
use crate::error::CanvasError;
use crate::grid::{generate_grid_dots, snap_point};
use crate::hit_test::find_node_at;
use crate::palette::{Category, Palette, Template};
use crate::payload::parse_payload;
use crate::registry::{Node, NodeId, NodeRegistry};
use crate::selection::{Inspector, Selection};
use crate::sync::{ConcreteModelSyncer, ModelSyncer};
use slint::VecModel;
use std::rc::Rc;

/// Radius of the background grid dots.
const GRID_DOT_RADIUS: f32 = 1.5;

/// Everything the canvas editor owns.
pub struct EditorState {
    config: EditorConfig,
    palette: Palette,
    frame: CanvasFrame,
    registry: NodeRegistry,
    selection: Selection,
    inspector: Option<Inspector>,
    drag: DragController,
    router: ConnectorRouter,
    node_syncer: Option<Box<dyn ModelSyncer<Node>>>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::build(EditorConfig::default(), Rc::new(ListenerRegistry::new()))
    }
}

impl EditorState {
    /// Create an empty editor. Pointer listeners are only counted.
    pub fn new(config: EditorConfig) -> Result<Self, CanvasError> {
        Self::with_listener_host(config, Rc::new(ListenerRegistry::new()))
    }

    /// Create an empty editor that reports listener attach/detach to `host`.
    ///
    /// Listener events are queued; see [`take_listener_events`](Self::take_listener_events).
    pub fn with_listener_host(
        config: EditorConfig,
        host: Rc<dyn ListenerHost>,
    ) -> Result<Self, CanvasError> {
        config.validate()?;
        Ok(Self::build(config, host))
    }

    fn build(config: EditorConfig, host: Rc<dyn ListenerHost>) -> Self {
        let mut state = Self {
            palette: Palette::default(),
            frame: CanvasFrame::from_config(&config),
            registry: NodeRegistry::with_grid_unit(config.grid_unit),
            selection: Selection::new(),
            inspector: None,
            drag: DragController::new(host),
            router: ConnectorRouter::new(config.source_anchor, config.target_anchor),
            node_syncer: None,
            config,
        };
        state.refresh();
        state
    }

    /// Seed the two-node sample chain and select its first node.
    pub fn seed_sample_graph(&mut self) {
        let unit = self.config.grid_unit;
        let samples = [
            (Template::new(Category::Network, "Firewall Rule", "ShieldCheck"), (300.0, 300.0)),
            (Template::new(Category::Network, "VPC Network", "Network"), (650.0, 400.0)),
        ];
        let mut first = None;
        for (template, (x, y)) in samples.iter() {
            let id = self.registry.insert(template, snap_point(*x, *y, unit));
            first.get_or_insert(id);
        }
        if let Some(id) = first {
            self.select(id);
        }
        self.refresh();
    }

    // === Accessors ===

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    pub fn frame(&self) -> &CanvasFrame {
        &self.frame
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub fn nodes(&self) -> &[Node] {
        self.registry.nodes()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.registry.get(id)
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selection.selected()
    }

    pub fn selected_node(&self) -> Option<&Node> {
        self.selection.selected().and_then(|id| self.registry.get(id))
    }

    pub fn inspector(&self) -> Option<&Inspector> {
        self.inspector.as_ref()
    }

    /// Inspector drafts can be edited; changes stay in the inspector.
    pub fn inspector_mut(&mut self) -> Option<&mut Inspector> {
        self.inspector.as_mut()
    }

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    pub fn connectors(&self) -> &[Connector] {
        self.router.connectors()
    }

    // === Canvas surface ===

    /// Update the canvas bounding rectangle, in client coordinates.
    pub fn set_canvas_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.frame.set_rect(x, y, width, height);
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.config.show_grid = show;
    }

    /// Background grid path commands, or an empty string when hidden.
    pub fn grid_commands(&self) -> String {
        if !self.config.show_grid {
            return String::new();
        }
        let (width, height) = self.frame.size();
        generate_grid_dots(width, height, self.config.grid_unit as f32, GRID_DOT_RADIUS)
    }

    /// Handle a drop of payload text at client coordinates.
    ///
    /// On success the new node is appended and selected. Malformed payloads
    /// are logged and leave the editor untouched.
    pub fn handle_drop(&mut self, client_x: f32, client_y: f32, payload: &str) -> Option<NodeId> {
        match self.try_drop(client_x, client_y, payload) {
            Ok(id) => Some(id),
            Err(err) => {
                tracing::warn!(%err, "drop rejected");
                None
            }
        }
    }

    fn try_drop(&mut self, client_x: f32, client_y: f32, payload: &str) -> Result<NodeId, CanvasError> {
        let template = parse_payload(payload)?;
        let position = self.frame.place(client_x, client_y, self.config.drop_offset);
        let id = self.registry.insert(&template, position);
        tracing::debug!(node = %id, label = %template.label, x = position.x, y = position.y, "node created");
        self.select(id);
        self.refresh();
        Ok(id)
    }

    /// Pointer-down at client coordinates: arms a drag on the topmost node
    /// under the pointer. Empty canvas is ignored.
    pub fn handle_pointer_down(&mut self, client_x: f32, client_y: f32) -> Option<NodeId> {
        let (x, y) = self.frame.to_local(client_x, client_y);
        let id = find_node_at(x, y, self.registry.geometries(self.config.node_size))?;
        self.handle_node_pointer_down(id, client_x, client_y).ok()?;
        Some(id)
    }

    /// Pointer-down on a specific node, for hosts that do their own hit testing.
    pub fn handle_node_pointer_down(
        &mut self,
        id: NodeId,
        client_x: f32,
        client_y: f32,
    ) -> Result<(), CanvasError> {
        let position = self.registry.get(id).ok_or(CanvasError::NodeNotFound(id))?.position();
        let (x, y) = self.frame.to_local(client_x, client_y);
        let grab_offset = (x - position.x as f32, y - position.y as f32);
        self.select(id);
        self.drag.begin(id, grab_offset);
        Ok(())
    }

    /// Pointer-move at client coordinates. Only has an effect during a drag.
    pub fn handle_pointer_move(&mut self, client_x: f32, client_y: f32) {
        if self
            .drag
            .pointer_move(client_x, client_y, &self.frame, &mut self.registry)
            .is_some()
        {
            self.refresh();
        }
    }

    /// Pointer-up: ends any drag session.
    pub fn handle_pointer_up(&mut self) {
        self.drag.end();
    }

    // === Selection ===

    /// Select a node and bind the inspector to it.
    ///
    /// Selecting the node that is already selected keeps the inspector drafts.
    pub fn select(&mut self, id: NodeId) -> bool {
        let Some(node) = self.registry.get(id) else {
            tracing::debug!(node = %id, "ignoring selection of unknown node");
            return false;
        };
        if self.selection.select(id) {
            self.inspector = Some(Inspector::bind(node));
        }
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.inspector = None;
    }

    /// Delete the selected node and clear the selection.
    pub fn delete_selected(&mut self) -> Result<Node, CanvasError> {
        let id = self.selection.selected().ok_or(CanvasError::NoSelection)?;
        let node = self.registry.remove(id)?;
        self.selection.node_removed(id);
        self.inspector = None;
        self.drag.node_removed(id);
        tracing::debug!(node = %id, "node deleted");
        self.refresh();
        Ok(node)
    }

    /// Listener attach/detach queued by earlier handlers.
    ///
    /// Deliver them once the editor is no longer borrowed, so the host can
    /// query it from inside [`ListenerHost`] callbacks.
    pub fn take_listener_events(&mut self) -> PendingListenerEvents {
        self.drag.take_pending()
    }

    // === Slint models ===

    /// Keep `model` in sync with the node list, building rows with `constructor`.
    pub fn bind_node_model<P, F>(&mut self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(&Node) -> P + 'static,
    {
        let syncer = ConcreteModelSyncer { model, constructor };
        ModelSyncer::<Node>::sync(&syncer, self.registry.nodes());
        self.node_syncer = Some(Box::new(syncer));
    }

    /// Keep `model` in sync with the connector list.
    pub fn bind_connector_model<P, F>(&mut self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(&Connector) -> P + 'static,
    {
        self.router.bind_model(model, constructor);
    }

    /// Rebuild derived state after a committed registry change.
    fn refresh(&mut self) {
        if self.router.update(&self.registry) {
            if let Some(syncer) = &self.node_syncer {
                syncer.sync(self.registry.nodes());
            }
        }
    }
}
