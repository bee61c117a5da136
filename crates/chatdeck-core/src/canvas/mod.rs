mod color;
mod raster;

pub use color::{parse_hex_color, Rgba};
pub use raster::Canvas;
