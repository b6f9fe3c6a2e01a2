/// Generate SVG path command for a connector between two anchors
///
/// Creates a symmetric S-curve: both control points sit at the horizontal
/// midpoint between the anchors, each keeping its own anchor's y.
///
/// # Arguments
/// * `start_x`, `start_y` - Source anchor (trailing edge of the source node)
/// * `end_x`, `end_y` - Target anchor (leading edge of the target node)
///
/// # Returns
/// SVG path command string (e.g., "M 420 340 C 510 340 510 490 600 490")
pub fn generate_connector_path(start_x: f32, start_y: f32, end_x: f32, end_y: f32) -> String {
    CubicBezier::from_anchors((start_x, start_y), (end_x, end_y)).to_path_commands()
}

/// Cubic bezier curve of a connector
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    pub p0: (f32, f32), // Start point
    pub p1: (f32, f32), // Control point 1
    pub p2: (f32, f32), // Control point 2
    pub p3: (f32, f32), // End point
}

impl CubicBezier {
    /// Build the connector curve between two anchors.
    pub fn from_anchors(start: (f32, f32), end: (f32, f32)) -> Self {
        let mid_x = start.0 + (end.0 - start.0) / 2.0;

        CubicBezier {
            p0: start,
            p1: (mid_x, start.1),
            p2: (mid_x, end.1),
            p3: end,
        }
    }

    /// SVG path commands: M (move to), C (cubic bezier)
    pub fn to_path_commands(&self) -> String {
        format!(
            "M {} {} C {} {} {} {} {} {}",
            self.p0.0, self.p0.1, self.p1.0, self.p1.1, self.p2.0, self.p2.1, self.p3.0, self.p3.1
        )
    }

    /// Point on the curve at `t` in `0.0..=1.0`.
    pub fn eval(&self, t: f32) -> (f32, f32) {
        let mt = 1.0 - t;
        // Bernstein weights
        let w = [mt * mt * mt, 3.0 * mt * mt * t, 3.0 * mt * t * t, t * t * t];
        let points = [self.p0, self.p1, self.p2, self.p3];
        points
            .iter()
            .zip(w)
            .fold((0.0, 0.0), |(x, y), (p, w)| (x + w * p.0, y + w * p.1))
    }
}
