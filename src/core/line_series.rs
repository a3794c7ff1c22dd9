use serde::{Deserialize, Serialize};

use crate::core::LinearScale;

/// Projected point in plot-area pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
}

/// Projected line segment in plot-area pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Polyline geometry of one series, split into runs of drawable points.
///
/// A sample whose projection is not finite ends the current run, so a
/// value that failed to parse leaves a gap instead of a broken path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinePath {
    pub runs: Vec<Vec<PathPoint>>,
}

impl LinePath {
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.runs.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Adjacent segments inside each run.
    #[must_use]
    pub fn segments(&self) -> Vec<LineSegment> {
        let mut segments = Vec::with_capacity(self.point_count());
        for run in &self.runs {
            for pair in run.windows(2) {
                segments.push(LineSegment {
                    x1: pair[0].x,
                    y1: pair[0].y,
                    x2: pair[1].x,
                    y2: pair[1].y,
                });
            }
        }
        segments
    }

    /// SVG path data (`M`/`L` commands), one `M` per run.
    #[must_use]
    pub fn to_svg_path(&self) -> String {
        let mut out = String::new();
        for run in &self.runs {
            for (index, point) in run.iter().enumerate() {
                let command = if index == 0 { 'M' } else { 'L' };
                out.push(command);
                out.push_str(&format!("{},{}", point.x, point.y));
            }
        }
        out
    }
}

/// Projects `(tick, value)` samples through a horizontal and a vertical scale.
///
/// Sample order is preserved; the function is deterministic and side-effect
/// free so rendering and tests consume the same geometry.
pub fn project_line_path<I>(samples: I, x_scale: LinearScale, y_scale: LinearScale) -> LinePath
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut runs = Vec::new();
    let mut current = Vec::new();

    for (tick, value) in samples {
        let x = x_scale.map(tick);
        let y = y_scale.map(value);
        if x.is_finite() && y.is_finite() {
            current.push(PathPoint { x, y });
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }

    LinePath { runs }
}
