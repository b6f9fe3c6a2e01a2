//! High-level controller for the canvas editor.
//!
//! The [`EditorController`] wraps [`EditorState`] so that every UI callback can
//! hold its own handle, and turns editor operations into ready-made callbacks.
//!
//! # Example
//!
//! ```ignore
//! use policy_canvas::EditorController;
//!
//! slint::include_modules!();
//!
//! fn main() {
//!     let window = MainWindow::new().unwrap();
//!     let ctrl = EditorController::new();
//!
//!     // Canvas input
//!     window.on_canvas_drop(ctrl.drop_callback());
//!     window.on_canvas_pointer_down(ctrl.pointer_down_callback());
//!     window.on_pointer_move(ctrl.pointer_move_callback());
//!     window.on_pointer_up(ctrl.pointer_up_callback());
//!     window.on_delete_selected(ctrl.delete_selected_callback());
//!
//!     // Rendering
//!     let nodes = Rc::new(VecModel::<NodeData>::default());
//!     ctrl.bind_node_model(nodes.clone(), |n| NodeData {
//!         label: n.label().clone(),
//!         x: n.position().x as f32,
//!         y: n.position().y as f32,
//!     });
//!     window.set_nodes(ModelRc::from(nodes));
//!
//!     // Leaving the editor
//!     let w = window.as_weak();
//!     ctrl.on_proceed(move || {
//!         if let Some(w) = w.upgrade() {
//!             w.set_active_screen("Simulation Setup".into());
//!         }
//!     });
//!     window.on_proceed(ctrl.proceed_callback());
//!
//!     window.run().unwrap();
//! }
//! ```

use crate::config::EditorConfig;
use crate::connectors::Connector;
use crate::drag::{DragState, ListenerHost};
use crate::editor::EditorState;
use crate::error::CanvasError;
use crate::payload::DragPayload;
use crate::registry::{Node, NodeId};
use crate::selection::Inspector;
use slint::{SharedString, VecModel};
use std::cell::RefCell;
use std::rc::Rc;

/// Controller that owns the editor state and provides callback implementations.
///
/// Clone this controller to share it across callbacks.
#[derive(Clone)]
pub struct EditorController {
    state: Rc<RefCell<EditorState>>,
    proceed: Rc<RefCell<Option<Rc<dyn Fn()>>>>,
}

impl Default for EditorController {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorController {
    /// Create a controller with the default configuration and an empty canvas.
    pub fn new() -> Self {
        Self::from_state(EditorState::default())
    }

    /// Create a controller from a validated configuration.
    pub fn with_config(config: EditorConfig) -> Result<Self, CanvasError> {
        Ok(Self::from_state(EditorState::new(config)?))
    }

    /// Like [`with_config`](Self::with_config), reporting pointer listener
    /// attach/detach to `host`.
    ///
    /// The host is called after the editor state is released, so it may query
    /// the controller.
    pub fn with_listener_host(
        config: EditorConfig,
        host: Rc<dyn ListenerHost>,
    ) -> Result<Self, CanvasError> {
        Ok(Self::from_state(EditorState::with_listener_host(config, host)?))
    }

    /// Create a controller from JSON configuration text.
    pub fn from_config_json(text: &str) -> Result<Self, CanvasError> {
        Self::with_config(EditorConfig::from_json(text)?)
    }

    fn from_state(state: EditorState) -> Self {
        Self {
            state: Rc::new(RefCell::new(state)),
            proceed: Rc::new(RefCell::new(None)),
        }
    }

    /// Get access to the editor state.
    ///
    /// Mutating through this handle leaves listener events queued until the
    /// next controller handler runs.
    pub fn state(&self) -> Rc<RefCell<EditorState>> {
        self.state.clone()
    }

    /// Run `f` on the state, then deliver listener events with the state released.
    fn update<R>(&self, f: impl FnOnce(&mut EditorState) -> R) -> R {
        let (result, pending) = {
            let mut state = self.state.borrow_mut();
            let result = f(&mut *state);
            (result, state.take_listener_events())
        };
        pending.deliver();
        result
    }

    /// Seed the sample two-node chain.
    pub fn seed_sample_graph(&self) {
        self.update(|state| state.seed_sample_graph());
    }

    // === Queries ===

    pub fn nodes(&self) -> Vec<Node> {
        self.state.borrow().nodes().to_vec()
    }

    pub fn node(&self, id: NodeId) -> Option<Node> {
        self.state.borrow().node(id).cloned()
    }

    pub fn node_count(&self) -> usize {
        self.state.borrow().nodes().len()
    }

    pub fn connectors(&self) -> Vec<Connector> {
        self.state.borrow().connectors().to_vec()
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.state.borrow().selected()
    }

    pub fn inspector(&self) -> Option<Inspector> {
        self.state.borrow().inspector().cloned()
    }

    pub fn drag_state(&self) -> DragState {
        self.state.borrow().drag_state()
    }

    /// Background grid path commands (empty when the grid is hidden).
    pub fn grid_commands(&self) -> SharedString {
        self.state.borrow().grid_commands().into()
    }

    // === Direct handlers ===

    /// Update the canvas bounding rectangle, in client coordinates.
    pub fn set_canvas_rect(&self, x: f32, y: f32, width: f32, height: f32) {
        self.state.borrow_mut().set_canvas_rect(x, y, width, height);
    }

    pub fn set_show_grid(&self, show: bool) {
        self.state.borrow_mut().set_show_grid(show);
    }

    /// Build the drag payload for the palette entry labelled `label`.
    pub fn drag_payload(&self, label: &str) -> Option<DragPayload> {
        let state = self.state.borrow();
        let template = state.palette().find(label)?;
        match DragPayload::from_template(template) {
            Ok(payload) => Some(payload),
            Err(err) => {
                tracing::warn!(%err, label, "could not encode drag payload");
                None
            }
        }
    }

    pub fn handle_drop(&self, client_x: f32, client_y: f32, payload: &str) -> Option<NodeId> {
        self.update(|state| state.handle_drop(client_x, client_y, payload))
    }

    pub fn handle_pointer_down(&self, client_x: f32, client_y: f32) -> Option<NodeId> {
        self.update(|state| state.handle_pointer_down(client_x, client_y))
    }

    /// Pointer-down on a node the host already hit-tested. Unknown ids are ignored.
    pub fn handle_node_pointer_down(&self, id: NodeId, client_x: f32, client_y: f32) {
        if let Err(err) = self.update(|state| state.handle_node_pointer_down(id, client_x, client_y)) {
            tracing::debug!(%err, "pointer-down ignored");
        }
    }

    pub fn handle_pointer_move(&self, client_x: f32, client_y: f32) {
        self.update(|state| state.handle_pointer_move(client_x, client_y));
    }

    pub fn handle_pointer_up(&self) {
        self.update(|state| state.handle_pointer_up());
    }

    pub fn select(&self, id: NodeId) -> bool {
        self.update(|state| state.select(id))
    }

    pub fn clear_selection(&self) {
        self.state.borrow_mut().clear_selection();
    }

    /// Delete the selected node. Does nothing when nothing is selected.
    pub fn delete_selected(&self) -> Option<Node> {
        match self.update(|state| state.delete_selected()) {
            Ok(node) => Some(node),
            Err(err) => {
                tracing::debug!(%err, "delete ignored");
                None
            }
        }
    }

    /// Edit the inspector's identifier draft. Not written back to the node.
    pub fn set_inspector_identifier(&self, value: SharedString) {
        if let Some(inspector) = self.state.borrow_mut().inspector_mut() {
            inspector.set_custom_identifier(value);
        }
    }

    /// Edit the inspector's priority draft. Not written back to the node.
    pub fn set_inspector_priority(&self, value: i32) {
        if let Some(inspector) = self.state.borrow_mut().inspector_mut() {
            inspector.set_priority_index(value);
        }
    }

    // === Navigation ===

    /// Register the "proceed to next stage" handler.
    pub fn on_proceed(&self, handler: impl Fn() + 'static) {
        *self.proceed.borrow_mut() = Some(Rc::new(handler));
    }

    /// Notify the navigation host. Does nothing if no handler is registered.
    pub fn proceed(&self) {
        // Clone out so the handler may call back into the controller
        let handler = self.proceed.borrow().clone();
        if let Some(handler) = handler {
            tracing::debug!("proceeding to next stage");
            handler();
        }
    }

    // === Model binding ===

    pub fn bind_node_model<P, F>(&self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(&Node) -> P + 'static,
    {
        self.state.borrow_mut().bind_node_model(model, constructor);
    }

    pub fn bind_connector_model<P, F>(&self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(&Connector) -> P + 'static,
    {
        self.state.borrow_mut().bind_connector_model(model, constructor);
    }

    // === Callback factories ===

    /// Returns a callback for a drop on the canvas: `(client_x, client_y, payload)`.
    pub fn drop_callback(&self) -> impl Fn(f32, f32, SharedString) + Clone {
        let ctrl = self.clone();
        move |x, y, payload| {
            ctrl.handle_drop(x, y, payload.as_str());
        }
    }

    /// Returns a callback for pointer-down on the canvas.
    pub fn pointer_down_callback(&self) -> impl Fn(f32, f32) + Clone {
        let ctrl = self.clone();
        move |x, y| {
            ctrl.handle_pointer_down(x, y);
        }
    }

    /// Returns a callback for window-wide pointer-move.
    pub fn pointer_move_callback(&self) -> impl Fn(f32, f32) + Clone {
        let ctrl = self.clone();
        move |x, y| ctrl.handle_pointer_move(x, y)
    }

    /// Returns a callback for window-wide pointer-up.
    pub fn pointer_up_callback(&self) -> impl Fn() + Clone {
        let ctrl = self.clone();
        move || ctrl.handle_pointer_up()
    }

    /// Returns a callback for the delete button on the selected node.
    pub fn delete_selected_callback(&self) -> impl Fn() + Clone {
        let ctrl = self.clone();
        move || {
            ctrl.delete_selected();
        }
    }

    /// Returns a callback for the "proceed" button.
    pub fn proceed_callback(&self) -> impl Fn() + Clone {
        let ctrl = self.clone();
        move || ctrl.proceed()
    }
}
