//! Pointer interaction state.
//!
//! While a slider is being dragged the host echoes every write back to the
//! surface. Applying those echoes would fight the pointer, so pushes for the
//! dragged parameter are dropped until the drag ends; the local value wins.
//! Pushes for every other parameter are applied as usual.

use crate::param_key::ParamKey;

/// Whether a control is currently under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interaction {
    /// No drag in progress.
    #[default]
    Idle,
    /// The given parameter is being dragged.
    Dragging(ParamKey),
}

impl Interaction {
    /// Pointer down on `key`. Replaces any drag already in progress.
    pub fn begin_drag(&mut self, key: ParamKey) {
        *self = Interaction::Dragging(key);
    }

    /// Pointer up or pointer leave.
    pub fn end_drag(&mut self) {
        *self = Interaction::Idle;
    }

    /// Parameter being dragged, if any.
    pub fn dragging(&self) -> Option<ParamKey> {
        match *self {
            Interaction::Dragging(key) => Some(key),
            Interaction::Idle => None,
        }
    }

    /// Whether a host push for `key` should be applied.
    #[inline]
    pub fn accepts_remote(&self, key: ParamKey) -> bool {
        self.dragging() != Some(key)
    }
}
