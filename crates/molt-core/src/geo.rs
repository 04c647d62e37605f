//! Canvas-space coordinates and straight-line stepping.
//!
//! The scene is a 128 × 128 pixel canvas with `y` growing downward, so
//! "toward the altar" means decreasing `y`.  Positions are continuous `f32`
//! values; a node's position is just where an agent snaps to on arrival.

/// A point on the canvas.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Result of moving a point toward a target by a fixed step length.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Step {
    /// The target was closer than one step; the point is now exactly on it.
    Arrived(Point),
    /// The point moved one full step.  `dx` is the horizontal offset to the
    /// target measured *before* the step (used for facing).
    Advanced { pos: Point, dx: f32 },
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Move `step` units along the straight line to `target`.
    ///
    /// Never overshoots: when the remaining distance is below `step` the
    /// result is `Step::Arrived(target)` with the target's exact coordinates.
    pub fn step_toward(self, target: Point, step: f32) -> Step {
        let dx = target.x - self.x;
        let dy = target.y - self.y;
        let dist = (dx * dx + dy * dy).sqrt();

        if dist < step {
            return Step::Arrived(target);
        }
        Step::Advanced {
            pos: Point::new(self.x + dx / dist * step, self.y + dy / dist * step),
            dx,
        }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}
