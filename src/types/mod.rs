mod bounding_box;
mod geometry;
mod lon_lat;
mod map_point;
mod projection;

pub use bounding_box::*;
pub use geometry::*;
pub use lon_lat::*;
pub use map_point::*;
pub use projection::*;
