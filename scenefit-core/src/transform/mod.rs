/// Pixel and unit space conversion.
pub mod coords;
