//! Test harness wiring an [`EditorController`] the way a UI host would.
//!
//! Binds node and connector models, routes listeners and navigation into a
//! [`CallbackTracker`], and offers helpers for simulating user interactions.

#![allow(dead_code)]

use super::CallbackTracker;
use policy_canvas::{
    encode_template, EditorConfig, EditorController, NodeId, Palette, Template,
};
use slint::{Model, SharedString, VecModel};
use std::rc::Rc;

/// Canvas origin in client coordinates (sidebar width, header height).
pub const CANVAS_ORIGIN: (f32, f32) = (288.0, 72.0);

/// Row type the harness binds the node model with.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeRow {
    pub id: u64,
    pub label: SharedString,
    pub x: i32,
    pub y: i32,
}

/// Row type the harness binds the connector model with.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectorRow {
    pub from: u64,
    pub to: u64,
    pub path: SharedString,
}

pub struct EditorHarness {
    pub ctrl: EditorController,
    pub nodes: Rc<VecModel<NodeRow>>,
    pub connectors: Rc<VecModel<ConnectorRow>>,
    pub tracker: CallbackTracker,
}

impl EditorHarness {
    /// Empty canvas with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Canvas seeded with the two-node sample chain.
    pub fn seeded() -> Self {
        let harness = Self::new();
        harness.ctrl.seed_sample_graph();
        harness
    }

    pub fn with_config(config: EditorConfig) -> Self {
        let tracker = CallbackTracker::new();
        let ctrl = EditorController::with_listener_host(config, Rc::new(tracker.clone()))
            .expect("valid config");
        ctrl.set_canvas_rect(CANVAS_ORIGIN.0, CANVAS_ORIGIN.1, 1200.0, 800.0);

        let nodes = Rc::new(VecModel::<NodeRow>::default());
        ctrl.bind_node_model(nodes.clone(), |n| NodeRow {
            id: n.id().get(),
            label: n.label().clone(),
            x: n.position().x,
            y: n.position().y,
        });

        let connectors = Rc::new(VecModel::<ConnectorRow>::default());
        ctrl.bind_connector_model(connectors.clone(), |c| ConnectorRow {
            from: c.source().get(),
            to: c.target().get(),
            path: c.path_commands().into(),
        });

        ctrl.on_proceed({
            let proceed = tracker.proceed.clone();
            move || *proceed.borrow_mut() += 1
        });

        Self { ctrl, nodes, connectors, tracker }
    }

    /// Payload text for the palette entry labelled `label`.
    pub fn payload(label: &str) -> String {
        let palette = Palette::default();
        encode_template(palette.find(label).expect("palette entry")).expect("encodable")
    }

    pub fn template(label: &str) -> Template {
        Palette::default().find(label).expect("palette entry").clone()
    }

    /// Drop a palette entry with the pointer at canvas-local `x`/`y`.
    pub fn drop_at(&self, label: &str, x: f32, y: f32) -> Option<NodeId> {
        self.drop_raw(&Self::payload(label), x, y)
    }

    /// Drop raw payload text with the pointer at canvas-local `x`/`y`.
    pub fn drop_raw(&self, text: &str, x: f32, y: f32) -> Option<NodeId> {
        let (cx, cy) = to_client(x, y);
        self.ctrl.handle_drop(cx, cy, text)
    }

    /// Press on canvas-local `x`/`y`, move through `path`, release.
    pub fn drag(&self, from: (f32, f32), path: &[(f32, f32)]) {
        let (cx, cy) = to_client(from.0, from.1);
        (self.ctrl.pointer_down_callback())(cx, cy);
        let on_move = self.ctrl.pointer_move_callback();
        for &(x, y) in path {
            let (cx, cy) = to_client(x, y);
            on_move(cx, cy);
        }
        (self.ctrl.pointer_up_callback())();
    }

    pub fn press(&self, x: f32, y: f32) -> Option<NodeId> {
        let (cx, cy) = to_client(x, y);
        self.ctrl.handle_pointer_down(cx, cy)
    }

    pub fn move_to(&self, x: f32, y: f32) {
        let (cx, cy) = to_client(x, y);
        self.ctrl.handle_pointer_move(cx, cy);
    }

    pub fn release(&self) {
        self.ctrl.handle_pointer_up();
    }

    /// Position of a node as seen by the bound model.
    pub fn row_position(&self, id: NodeId) -> Option<(i32, i32)> {
        self.nodes
            .iter()
            .find(|row| row.id == id.get())
            .map(|row| (row.x, row.y))
    }

    pub fn position(&self, id: NodeId) -> (i32, i32) {
        let p = self.ctrl.node(id).expect("node exists").position();
        (p.x, p.y)
    }
}

/// Canvas-local to client coordinates.
pub fn to_client(x: f32, y: f32) -> (f32, f32) {
    (x + CANVAS_ORIGIN.0, y + CANVAS_ORIGIN.1)
}
