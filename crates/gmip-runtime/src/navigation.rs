#![forbid(unsafe_code)]

//! Slide navigation state.
//!
//! A [`Navigator`] holds the current slide index, how many of its parts are
//! revealed, and a pending numeric multiplier typed before a command.
//!
//! # Invariants
//!
//! - `index < slide_count`
//! - `1 <= revealed <= part_count(index)`
//!
//! Every [`Intent`] except [`Intent::Digit`] consumes the multiplier;
//! [`Intent::Cancel`] only clears it.

use gmip_text::Document;
use tracing::debug;

/// A navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Append a decimal digit (0-9) to the multiplier.
    Digit(u8),
    /// Reveal `m` more parts, or go to the next slide.
    Advance,
    /// Hide `m` parts, or go to the previous slide fully revealed.
    Retreat,
    /// Jump to slide `m` (1-based, clamped).
    JumpTo,
    /// Jump to the last slide.
    JumpLast,
    /// Drop the pending multiplier.
    Cancel,
}

/// Current position in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigator {
    index: usize,
    revealed: usize,
    multiplier: usize,
}

impl Navigator {
    /// Start on the first slide with one part revealed.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            index: 0,
            revealed: 1,
            multiplier: 0,
        }
    }

    /// 0-based index of the current slide.
    #[inline]
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Number of revealed parts of the current slide.
    #[inline]
    #[must_use]
    pub const fn revealed(&self) -> usize {
        self.revealed
    }

    /// Pending multiplier, 0 when none was typed.
    #[inline]
    #[must_use]
    pub const fn multiplier(&self) -> usize {
        self.multiplier
    }

    /// Apply `intent` against `document`.
    pub fn apply(&mut self, intent: Intent, document: &Document) {
        if let Intent::Digit(digit) = intent {
            self.multiplier = self
                .multiplier
                .saturating_mul(10)
                .saturating_add(usize::from(digit));
            return;
        }

        let count = self.take_multiplier();
        let last = document.slide_count() - 1;
        let parts = |index: usize| document.slide(index).map_or(1, |s| s.part_count());

        match intent {
            Intent::Digit(_) | Intent::Cancel => {}
            Intent::Advance => {
                if self.revealed.saturating_add(count) <= parts(self.index) {
                    self.revealed += count;
                } else if self.index < last {
                    self.index += 1;
                    self.revealed = 1;
                }
            }
            Intent::Retreat => {
                if self.revealed > count {
                    self.revealed -= count;
                } else if self.index > 0 {
                    self.index -= 1;
                    self.revealed = parts(self.index);
                }
            }
            Intent::JumpTo => {
                self.index = count.min(last + 1) - 1;
                self.revealed = 1;
            }
            Intent::JumpLast => {
                self.index = last;
                self.revealed = 1;
            }
        }

        debug!(
            ?intent,
            count,
            index = self.index,
            revealed = self.revealed,
            "navigated"
        );
    }

    /// Take the pending multiplier, defaulting to 1.
    fn take_multiplier(&mut self) -> usize {
        let count = std::mem::take(&mut self.multiplier);
        if count == 0 { 1 } else { count }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
