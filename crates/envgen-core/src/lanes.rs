//! Lane management for the envelope section.
//!
//! The host pre-allocates eight lanes of 22 parameters. Only the first
//! `numLanes` of them are live; the rest keep whatever values they last held
//! and are never read. The host has no notion of gaps, so removing a lane
//! physically shifts every later lane down by one slot.
//!
//! Both edit operations write into the local [`ParamState`] and return the
//! writes in the order they were applied, for the caller to forward to the
//! host. A no-op returns an empty list.
//!
//! # Example
//!
//! ```rust
//! use envgen_core::{LaneField, LaneNumber, ParamKey, ParamState, add_lane, lane_count, remove_lane};
//!
//! let mut state = ParamState::new();
//! add_lane(&mut state);
//! add_lane(&mut state);
//! let second_attack = ParamKey::lane(LaneNumber::new(2).unwrap(), LaneField::Attack);
//! state.set(second_attack, 0.5);
//!
//! let writes = remove_lane(&mut state, 0);
//! assert_eq!(writes.len(), 22 + 1);
//! assert_eq!(lane_count(&state), 1);
//! assert_eq!(state.get(ParamKey::lane(LaneNumber::FIRST, LaneField::Attack)), 0.5);
//! ```

use alloc::vec;
use alloc::vec::Vec;

use crate::layout::param_meta;
use crate::param_key::{LANE_FIELD_COUNT, LaneField, LaneNumber, MAX_LANES, ParamKey};
use crate::state::{ParamChange, ParamState};

/// Number of live lanes: `numLanes` denormalized against \[0, 8\], rounded
/// and clamped.
pub fn lane_count(state: &ParamState) -> usize {
    let meta = param_meta(ParamKey::NumLanes);
    let real = libm::round(meta.normalized_to_real(state.get(ParamKey::NumLanes)));
    // NaN saturates to 0 in the cast.
    real.clamp(0.0, MAX_LANES as f64) as usize
}

/// Normalized `numLanes` value representing `count` lanes.
pub fn lane_count_to_normalized(count: usize) -> f64 {
    count.min(MAX_LANES) as f64 / MAX_LANES as f64
}

/// Lane numbers of the live lanes, in order.
pub fn live_lanes(state: &ParamState) -> impl Iterator<Item = LaneNumber> {
    LaneNumber::all().take(lane_count(state))
}

/// Appends a lane.
///
/// No-op at eight lanes. The new lane is not reset: its parameters keep
/// whatever values the slot last held.
pub fn add_lane(state: &mut ParamState) -> Vec<ParamChange> {
    let count = lane_count(state);
    if count >= MAX_LANES {
        return Vec::new();
    }

    let change = ParamChange::new(ParamKey::NumLanes, lane_count_to_normalized(count + 1));
    state.apply(change);
    #[cfg(feature = "tracing")]
    tracing::debug!("lane_add: {} -> {} lanes", count, count + 1);
    vec![change]
}

/// Removes the lane at 0-based `index` among the live lanes.
///
/// Every later lane moves down one slot, field by field in layout order,
/// ascending so each source lane is read before it is overwritten as a
/// destination. The vacated top slot is left as-is. No-op when `index` is
/// out of range or there are no lanes.
pub fn remove_lane(state: &mut ParamState, index: usize) -> Vec<ParamChange> {
    let count = lane_count(state);
    if count == 0 || index >= count {
        return Vec::new();
    }

    let mut changes = Vec::with_capacity((count - 1 - index) * LANE_FIELD_COUNT + 1);
    for position in index..count - 1 {
        let (Some(dest), Some(src)) = (
            LaneNumber::from_index(position),
            LaneNumber::from_index(position + 1),
        ) else {
            break;
        };
        for field in LaneField::ALL {
            let value = state.get(ParamKey::lane(src, field));
            let change = ParamChange::new(ParamKey::lane(dest, field), value);
            state.apply(change);
            changes.push(change);
        }
    }

    let change = ParamChange::new(ParamKey::NumLanes, lane_count_to_normalized(count - 1));
    state.apply(change);
    changes.push(change);
    #[cfg(feature = "tracing")]
    tracing::debug!(
        "lane_remove: position {index}, {} -> {} lanes, {} writes",
        count,
        count - 1,
        changes.len()
    );
    changes
}
