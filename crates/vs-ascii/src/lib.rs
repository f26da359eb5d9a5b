/// ASCII conversion engine for vidscii.
///
/// Converts decoded grayscale frames to newline-joined text frames.
pub mod raster;

pub use raster::rasterize;
