//! # Policy Canvas
//!
//! Headless core of a policy diagram editor: users drag templates from a
//! palette onto a grid-snapped canvas, move nodes around, and inspect the
//! selected one. Consecutive nodes are joined by bezier connectors.
//!
//! Rendering is left to the host. The crate exposes state, input handlers and
//! Slint models to bind against.
//!
//! ## Quick Start
//!
//! ```
//! use policy_canvas::{encode_template, parse_payload, Palette};
//!
//! let palette = Palette::default();
//! let template = palette.find("Firewall Rule").unwrap();
//! let text = encode_template(template).unwrap();
//! assert_eq!(parse_payload(&text).unwrap(), *template);
//! ```
//!
//! ## Core Pieces
//!
//! - [`EditorController`] - Shared handle with ready-made UI callbacks
//! - [`EditorState`] - Owns nodes, selection, drag session and connectors
//! - [`NodeRegistry`] - Ordered node list with stable ids
//! - [`DragController`] - Pointer drag state machine with scoped listeners
//! - [`ConnectorRouter`] - Derives the connector chain from node order
//!
//! ## Rust Helpers
//!
//! - [`snap_point`] - Snap canvas coordinates to the grid
//! - [`generate_grid_dots`] - SVG path for the dotted background grid
//! - [`generate_connector_path`] - SVG path for a connector curve
//! - [`find_node_at`] - Hit-test nodes at canvas coordinates

pub mod canvas;
pub mod config;
pub mod connectors;
pub mod controller;
pub mod drag;
pub mod editor;
pub mod error;
pub mod grid;
pub mod icon;
pub mod palette;
pub mod path;
pub mod payload;
pub mod registry;
pub mod selection;
mod sync;

pub use canvas::CanvasFrame;
pub use config::{EditorConfig, DEFAULT_GRID_UNIT};
pub use connectors::{route_connectors, Connector, ConnectorRouter};
pub use controller::EditorController;
pub use drag::{
    DragController, DragState, ListenerEvent, ListenerGuard, ListenerHost, ListenerId,
    ListenerRegistry, PendingListenerEvents,
};
pub use editor::EditorState;
pub use error::CanvasError;
pub use grid::{generate_grid_dots, snap_coordinate, snap_point, GridBounds, GridPoint};
pub use hit_test::{find_node_at, NodeGeometry, SimpleNodeGeometry};
pub use icon::{resolve_icon, Glyph};
pub use palette::{Category, Palette, PaletteGroup, Template};
pub use path::{generate_connector_path, CubicBezier};
pub use payload::{encode_template, parse_payload, DragPayload, PAYLOAD_MIME};
pub use registry::{Node, NodeId, NodeRegistry};
pub use selection::{default_identifier, Inspector, Selection, DEFAULT_PRIORITY_INDEX};
pub use sync::sync_rows;
