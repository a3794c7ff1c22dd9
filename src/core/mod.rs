pub mod extents;
pub mod line_series;
pub mod scale;
pub mod types;

pub use extents::Extents;
pub use line_series::{LinePath, LineSegment, PathPoint, project_line_path};
pub use scale::LinearScale;
pub use types::{Margins, PlotArea, Viewport};
