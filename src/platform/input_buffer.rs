//=========================================================================
// Input Buffer
//
// Per-frame staging area on the platform thread. Holds input gathered
// between two RedrawRequested events until it is flushed to the core.
//
// - `discrete`: presses and releases, in arrival order
// - `continuous`: cursor movement, coalesced to the latest position
//
//=========================================================================

//=== Standard Library Imports ============================================
use std::collections::HashSet;

//=== Internal Modules ====================================================
use crate::core::input::InputEvent;

//=== InputBuffer =========================================================

pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: HashSet<InputEvent>,
}

impl InputBuffer {
    pub(crate) fn new() -> Self {
        Self {
            discrete: Vec::with_capacity(32),
            continuous: HashSet::with_capacity(2),
        }
    }

    //--- Continuous -------------------------------------------------------
    //
    // `MouseMoved` events compare equal regardless of coordinates, so
    // `replace` keeps only the newest position.
    //
    pub(crate) fn push_continuous(&mut self, event: InputEvent) {
        self.continuous.replace(event);
    }

    //--- Discrete ---------------------------------------------------------

    /// Appends a press or release. An exact repeat of the previous event
    /// is dropped.
    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    //--- Drain ------------------------------------------------------------

    /// Takes this frame's events as `(discrete, continuous)`, or `None`
    /// when nothing was buffered.
    pub(crate) fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }
        let discrete = std::mem::take(&mut self.discrete);
        let continuous = self.continuous.drain().collect();
        Some((discrete, continuous))
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
