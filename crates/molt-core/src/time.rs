//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Frame` counter advanced once per
//! animation frame by the scheduler.  All ritual and gesture timing is
//! expressed in frames, so it stays exact no matter how fast frames are
//! actually delivered.  `FrameClock` only maps frames to nominal seconds for
//! reporting.

use std::fmt;

// ── Frame ─────────────────────────────────────────────────────────────────────

/// An absolute frame counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame(pub u64);

impl Frame {
    pub const ZERO: Frame = Frame(0);

    /// Frames elapsed from `earlier` to `self` (zero if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: Frame) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Frame {
    type Output = Frame;
    #[inline]
    fn add(self, rhs: u64) -> Frame {
        Frame(self.0 + rhs)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

// ── FrameClock ────────────────────────────────────────────────────────────────

/// The frame counter plus the nominal frame rate used for reporting.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameClock {
    /// Nominal frames per second (60 for a browser animation frame).
    pub frames_per_sec: u32,
    /// The current frame, advanced by [`FrameClock::advance`].
    pub current: Frame,
}

impl FrameClock {
    pub fn new(frames_per_sec: u32) -> Self {
        Self { frames_per_sec, current: Frame::ZERO }
    }

    /// Advance by one frame and return the new frame number.
    #[inline]
    pub fn advance(&mut self) -> Frame {
        self.current = self.current + 1;
        self.current
    }

    /// Nominal seconds elapsed since frame 0.
    pub fn elapsed_secs(&self) -> f64 {
        if self.frames_per_sec == 0 {
            return 0.0;
        }
        self.current.0 as f64 / self.frames_per_sec as f64
    }
}

impl fmt::Display for FrameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1} s)", self.current, self.elapsed_secs())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Frames simulated by a full run.
    pub total_frames: u64,

    /// Master RNG seed.  The same seed always picks the same ambient gestures.
    pub seed: u64,

    /// Distance an agent covers per frame, in canvas units.
    pub speed: f32,

    /// Nominal frame rate, used only for reporting elapsed time.
    pub frames_per_sec: u32,

    /// Emit an agent snapshot every N frames.  0 disables snapshots.
    pub snapshot_interval_frames: u64,
}

impl SimConfig {
    /// Movement speed of the chapel scene (half a pixel every two frames).
    pub const DEFAULT_SPEED: f32 = 0.25;

    /// The frame at which a `run` stops (inclusive: the last frame simulated).
    #[inline]
    pub fn end_frame(&self) -> Frame {
        Frame(self.total_frames)
    }

    pub fn make_clock(&self) -> FrameClock {
        FrameClock::new(self.frames_per_sec)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            total_frames:             3_600,
            seed:                     42,
            speed:                    Self::DEFAULT_SPEED,
            frames_per_sec:           60,
            snapshot_interval_frames: 0,
        }
    }
}
