//! The render boundary.

use molt_agent::Sprite;
use molt_core::Frame;

/// Something agents can be drawn onto.
///
/// The loop hands over copies ([`Sprite`]s) only, so a surface can never
/// change simulation state.  Only `draw` is required.
pub trait Surface {
    /// Called once before the first sprite of a frame.
    fn begin_frame(&mut self, _frame: Frame) {}

    /// Draw one agent.  Called for every agent in collection order.
    fn draw(&mut self, sprite: &Sprite, frame: Frame);

    /// Called once after the last sprite of a frame.
    fn end_frame(&mut self, _frame: Frame) {}

    /// Release whatever the surface holds.  Called exactly once when the
    /// loop exits, including on cancellation.
    fn release(&mut self) {}
}

/// A [`Surface`] that draws nothing.
pub struct NullSurface;

impl Surface for NullSurface {
    fn draw(&mut self, _sprite: &Sprite, _frame: Frame) {}
}
