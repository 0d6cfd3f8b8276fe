pub mod columns;
pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod progress;

pub use columns::{detect_column, detect_lat_lon};
pub use constants::*;
pub use coordinates::parse_coordinate;
pub use filename::generate_default_output_path;
pub use progress::{ProgressReporter, RowStatus};
