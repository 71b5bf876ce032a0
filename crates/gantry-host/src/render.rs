//! Offscreen render target plumbing.
//!
//! The framebuffer service itself is an external collaborator; the host
//! only needs the call points — bind before the scene draws, unbind
//! after, resize on reshape — and the current dimensions for the
//! coordinate boundary. [`OffscreenBuffer`] carries exactly that.

/// Offscreen render target bound around scene draw calls.
#[derive(Debug)]
pub struct OffscreenBuffer {
    width: u32,
    height: u32,
    bound: bool,
}

impl OffscreenBuffer {
    /// Create a target with the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bound: false,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the target is currently bound.
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Bind the target as the active draw surface.
    ///
    /// # Panics
    ///
    /// Panics if already bound — bind/unbind pairs must nest correctly.
    pub fn bind(&mut self) {
        assert!(!self.bound, "offscreen buffer already bound");
        self.bound = true;
    }

    /// Release the target.
    ///
    /// # Panics
    ///
    /// Panics if not bound.
    pub fn unbind(&mut self) {
        assert!(self.bound, "offscreen buffer not bound");
        self.bound = false;
    }

    /// Resize the target to match a new viewport.
    pub fn reshape(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}
