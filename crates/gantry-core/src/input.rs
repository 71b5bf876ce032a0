//! Input event value types crossing the coordinate boundary.

/// A position in normalized device space.
///
/// Both axes span `[-1, 1]` regardless of viewport size, with the origin
/// at the viewport center and device-up positive. The host performs the
/// pixel-to-device mapping before any scene sees an input event.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DeviceCoord {
    /// Horizontal position, `-1` at the left edge, `+1` at the right.
    pub x: f64,
    /// Vertical position, `-1` at the bottom edge, `+1` at the top.
    pub y: f64,
}

impl DeviceCoord {
    /// Construct a coordinate without range checking.
    ///
    /// Positions outside `[-1, 1]` are legal — they describe pointer
    /// locations outside the viewport (e.g. during a drag).
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Mouse button identity for click events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Middle button / wheel press.
    Middle,
    /// Secondary button.
    Right,
}

/// Button transition carried by a click event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonState {
    /// The button went down.
    Pressed,
    /// The button went up.
    Released,
}
