//! Pixel-space to normalized-device-space mapping.

use gantry_core::DeviceCoord;

/// Map a pixel position to normalized device coordinates.
///
/// `x` maps `[0, width] → [-1, 1]` left-to-right; `y` maps
/// `[0, height] → [1, -1]`, flipping the axis so device-up is positive
/// while pixel rows grow downward. Positions outside the viewport map
/// outside `[-1, 1]` — the mapping is affine, not clamping.
pub fn device_coord(pixel_x: f64, pixel_y: f64, width: u32, height: u32) -> DeviceCoord {
    let x = (pixel_x / f64::from(width) - 0.5) * 2.0;
    let y = (pixel_y / f64::from(height) - 0.5) * -2.0;
    DeviceCoord::new(x, y)
}
