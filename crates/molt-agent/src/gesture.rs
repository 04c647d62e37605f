//! The claw pinch gesture.

use molt_core::Cue;
use molt_core::cue::cue_at;

/// Claw effect applied when a pinch cue fires.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pinch {
    Extend,
    Retract,
    /// Retract and end the gesture.
    Finish,
}

/// Three pinches then rest.  `Gesture::start` extends the claws at frame 0.
pub const PINCH_SEQUENCE: [Cue<Pinch>; 5] = [
    Cue::new(30,  Pinch::Retract),
    Cue::new(50,  Pinch::Extend),
    Cue::new(80,  Pinch::Retract),
    Cue::new(100, Pinch::Extend),
    Cue::new(130, Pinch::Finish),
];

/// Progress through [`PINCH_SEQUENCE`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gesture {
    pub active: bool,
    /// Frames since the gesture started.  Reset to 0 when it finishes.
    pub frame: u32,
}

impl Gesture {
    pub fn start(&mut self) {
        self.active = true;
        self.frame = 0;
    }

    /// Advance one frame.  Returns the new claw state when a cue fires.
    pub fn advance(&mut self) -> Option<bool> {
        if !self.active {
            return None;
        }
        self.frame += 1;
        match cue_at(&PINCH_SEQUENCE, self.frame)? {
            Pinch::Extend  => Some(true),
            Pinch::Retract => Some(false),
            Pinch::Finish  => {
                self.active = false;
                self.frame = 0;
                Some(false)
            }
        }
    }
}
