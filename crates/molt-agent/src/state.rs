//! Per-agent motion state.

/// Where an agent is in its movement cycle.
///
/// ```text
///            route non-empty, next node claimable
///   Idle ──────────────────────────────────────────▶ Moving ──┐
///    ▲  ╲                                                     │ arrived
///    │   ╲ next node taken                                    │
///    │    ▼                                                   │
///    │   Waiting ── (retry every frame) ──▶ Moving            │
///    │                                                        │
///    ├──────────── arrived / no target ◀──────────────────────┘
///    │
///    └──── arrived / no target ◀── Walking ◀── walk_to(point)
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MotionState {
    #[default]
    Idle,
    /// Route pending but the next node is occupied or reserved by another
    /// agent.
    Waiting,
    /// Stepping toward a reserved node.
    Moving,
    /// Stepping toward a free coordinate target; no occupancy involved.
    Walking,
}

impl MotionState {
    pub fn as_str(self) -> &'static str {
        match self {
            MotionState::Idle    => "idle",
            MotionState::Waiting => "waiting",
            MotionState::Moving  => "moving",
            MotionState::Walking => "walking",
        }
    }

    /// `true` for the two states that advance position each frame.
    #[inline]
    pub fn is_travelling(self) -> bool {
        matches!(self, MotionState::Moving | MotionState::Walking)
    }
}

impl std::fmt::Display for MotionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Horizontal facing of a sprite.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Facing implied by a horizontal offset; `None` when the offset is too
    /// small to count as sideways movement.
    pub fn from_dx(dx: f32) -> Option<Facing> {
        if dx.abs() <= 0.1 {
            None
        } else if dx > 0.0 {
            Some(Facing::Right)
        } else {
            Some(Facing::Left)
        }
    }

    /// `-1` or `+1`, for mirroring sprites.
    #[inline]
    pub fn sign(self) -> i8 {
        match self {
            Facing::Left  => -1,
            Facing::Right => 1,
        }
    }
}
