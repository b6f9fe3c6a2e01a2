//! Canvas coordinate frame.
//!
//! Pointer and drop events arrive in client (window) coordinates. The frame
//! converts them to canvas-local coordinates and into grid positions.

use crate::config::EditorConfig;
use crate::grid::{snap_point, GridBounds, GridPoint};

/// Coordinate frame anchored at the canvas bounding rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasFrame {
    origin: (f32, f32),
    size: (f32, f32),
    grid_unit: i32,
    bounds: Option<GridBounds>,
}

impl CanvasFrame {
    pub fn new(grid_unit: i32) -> Self {
        Self {
            origin: (0.0, 0.0),
            size: (0.0, 0.0),
            grid_unit,
            bounds: None,
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            bounds: config.bounds,
            ..Self::new(config.grid_unit)
        }
    }

    /// Update the canvas bounding rectangle, in client coordinates.
    pub fn set_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.origin = (x, y);
        self.size = (width, height);
    }

    pub fn origin(&self) -> (f32, f32) {
        self.origin
    }

    pub fn size(&self) -> (f32, f32) {
        self.size
    }

    pub fn grid_unit(&self) -> i32 {
        self.grid_unit
    }

    pub fn set_bounds(&mut self, bounds: Option<GridBounds>) {
        self.bounds = bounds;
    }

    /// Client coordinates to canvas-local coordinates.
    pub fn to_local(&self, client_x: f32, client_y: f32) -> (f32, f32) {
        (client_x - self.origin.0, client_y - self.origin.1)
    }

    /// Where a node's origin lands for a pointer at `client_x`/`client_y`.
    ///
    /// Subtracts `offset` (the pointer's distance from the node origin), snaps
    /// each axis to the grid and, when bounds are configured, clamps into them.
    pub fn place(&self, client_x: f32, client_y: f32, offset: (f32, f32)) -> GridPoint {
        let (x, y) = self.to_local(client_x, client_y);
        let snapped = snap_point(x - offset.0, y - offset.1, self.grid_unit);
        match &self.bounds {
            Some(bounds) => bounds.clamp(snapped, self.grid_unit),
            None => snapped,
        }
    }
}
