//! Frame-threshold cue tables.
//!
//! Choreography timing is data: a list of `(at, effect)` pairs consulted
//! with a phase-local counter.  A cue fires on the single frame where the
//! counter equals `at`; counters that skip past a threshold never fire it.
//!
//! ```
//! use molt_core::{Cue, CueTable};
//!
//! let table = CueTable::new(vec![Cue::new(40, "open"), Cue::new(80, "close")]);
//! assert_eq!(table.at(40), Some(&"open"));
//! assert_eq!(table.at(41), None);
//! assert_eq!(table.last_at(), Some(80));
//! ```

/// One timed effect.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cue<E> {
    /// Counter value on which the effect fires.
    pub at: u32,
    pub effect: E,
}

impl<E> Cue<E> {
    pub const fn new(at: u32, effect: E) -> Self {
        Self { at, effect }
    }
}

/// Look up the effect scheduled for `counter` in a slice of cues.
///
/// Works on `'static` tables as well as on [`CueTable`]s.  When two cues
/// share a threshold the first one listed wins.
#[inline]
pub fn cue_at<E>(cues: &[Cue<E>], counter: u32) -> Option<&E> {
    cues.iter().find(|c| c.at == counter).map(|c| &c.effect)
}

/// An owned cue list, sorted by threshold.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CueTable<E> {
    cues: Vec<Cue<E>>,
}

impl<E> CueTable<E> {
    /// Build a table; cues are stably sorted by `at`.
    pub fn new(mut cues: Vec<Cue<E>>) -> Self {
        cues.sort_by_key(|c| c.at);
        Self { cues }
    }

    #[inline]
    pub fn at(&self, counter: u32) -> Option<&E> {
        cue_at(&self.cues, counter)
    }

    /// Threshold of the final cue, if any.
    pub fn last_at(&self) -> Option<u32> {
        self.cues.last().map(|c| c.at)
    }

    pub fn cues(&self) -> &[Cue<E>] {
        &self.cues
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }
}

impl<E: Clone> From<&[Cue<E>]> for CueTable<E> {
    fn from(cues: &[Cue<E>]) -> Self {
        Self::new(cues.to_vec())
    }
}
