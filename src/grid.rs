use serde::Deserialize;

/// A position on the canvas grid.
///
/// Positions produced by [`snap_point`] and [`GridBounds::clamp`] are always
/// multiples of the grid unit they were snapped with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are multiples of `unit`.
    pub fn is_aligned(&self, unit: i32) -> bool {
        unit > 0 && self.x.rem_euclid(unit) == 0 && self.y.rem_euclid(unit) == 0
    }
}

/// Snap a single coordinate to the nearest multiple of `unit`.
///
/// Exact halves round toward positive infinity, so `12.0` snaps to `24` and
/// `-12.0` snaps to `0` with a unit of 24.
///
/// Results saturate at the largest multiple of `unit` that fits in an `i32`.
/// A non-positive `unit` only truncates `value`.
pub fn snap_coordinate(value: f32, unit: i32) -> i32 {
    if unit <= 0 {
        return value as i32;
    }
    let max_steps = f64::from(i32::MAX / unit);
    let steps = (f64::from(value) / f64::from(unit) + 0.5)
        .floor()
        .clamp(-max_steps, max_steps);
    steps as i32 * unit
}

/// Snap both axes of a frame-local point independently.
pub fn snap_point(x: f32, y: f32, unit: i32) -> GridPoint {
    GridPoint {
        x: snap_coordinate(x, unit),
        y: snap_coordinate(y, unit),
    }
}

/// Inclusive rectangle that node origins may be clamped into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct GridBounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl GridBounds {
    /// Shrink the bounds to the grid-aligned positions they contain.
    ///
    /// Returns `None` when no aligned position fits on some axis.
    pub fn snapped(&self, unit: i32) -> Option<GridBounds> {
        if unit <= 0 {
            return None;
        }
        let ceil = |v: i32| -((-v).div_euclid(unit)) * unit;
        let floor = |v: i32| v.div_euclid(unit) * unit;
        let snapped = GridBounds {
            min_x: ceil(self.min_x),
            min_y: ceil(self.min_y),
            max_x: floor(self.max_x),
            max_y: floor(self.max_y),
        };
        if snapped.min_x > snapped.max_x || snapped.min_y > snapped.max_y {
            return None;
        }
        Some(snapped)
    }

    /// Clamp an aligned point into the aligned interior of these bounds.
    ///
    /// Points are returned unchanged if the bounds hold no aligned position.
    pub fn clamp(&self, point: GridPoint, unit: i32) -> GridPoint {
        match self.snapped(unit) {
            Some(b) => GridPoint {
                x: point.x.clamp(b.min_x, b.max_x),
                y: point.y.clamp(b.min_y, b.max_y),
            },
            None => point,
        }
    }
}

/// Generate SVG path commands for the dotted canvas background.
///
/// Emits one small circle (two arcs) at every grid intersection inside the
/// canvas, starting at the frame origin.
///
/// # Arguments
/// * `width` - Canvas width in pixels
/// * `height` - Canvas height in pixels
/// * `spacing` - Grid unit
/// * `radius` - Dot radius
///
/// # Returns
/// SVG path commands string (e.g., "M 0 0 m -1.5 0 a 1.5 1.5 0 1 0 3 0 a 1.5 1.5 0 1 0 -3 0 ...")
pub fn generate_grid_dots(width: f32, height: f32, spacing: f32, radius: f32) -> String {
    // Too dense to be useful and would explode the command string
    if spacing < 4.0 || radius <= 0.0 {
        return String::new();
    }

    let diameter = radius * 2.0;
    let mut commands = String::with_capacity(10000);

    let mut y = 0.0;
    while y <= height {
        let mut x = 0.0;
        while x <= width {
            if !commands.is_empty() {
                commands.push(' ');
            }
            commands.push_str(&format!(
                "M {} {} m -{} 0 a {} {} 0 1 0 {} 0 a {} {} 0 1 0 -{} 0",
                x, y, radius, radius, radius, diameter, radius, radius, diameter
            ));
            x += spacing;
        }
        y += spacing;
    }

    commands
}
