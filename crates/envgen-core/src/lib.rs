//! envgen Core - parameter mapping and lane management for the envelope
//! generator control surface.
//!
//! The surface mirrors a host-side parameter set and lets the user edit it.
//! This crate holds the parts of that job with real invariants; rendering and
//! host transport live in `envgen-editor` and `envgen-bridge`.
//!
//! # Core Abstractions
//!
//! ## Value Mapping
//!
//! - [`ParamMeta`] - Per-parameter descriptor with the normalized ↔ real ↔
//!   slider-position conversions
//! - [`ParamKind`] - Float (optionally skewed), Bool, or Choice
//!
//! ## Parameter Identity
//!
//! - [`ParamKey`] - Structured key; string ids only at the host boundary
//! - [`LaneNumber`], [`LaneField`] - Lane addressing
//! - [`param_meta`], [`param_meta_by_id`], [`all_params`] - The catalogue
//!
//! ## State and Editing
//!
//! - [`ParamState`] - Normalized value per key, `0.0` when absent
//! - [`add_lane`], [`remove_lane`] - Lane edits returning host writes
//! - [`Interaction`] - Drag state gating host pushes
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (it needs `alloc`). Disable the default
//! `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! envgen-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use envgen_core::{LaneField, LaneNumber, ParamKey, ParamState, add_lane, param_meta};
//!
//! let mut state = ParamState::new();
//! let writes = add_lane(&mut state);
//! assert_eq!(writes[0].key, ParamKey::NumLanes);
//!
//! let attack = param_meta(ParamKey::lane(LaneNumber::FIRST, LaneField::Attack));
//! state.set(attack.key, attack.real_to_normalized(0.25));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod display;
pub mod interaction;
pub mod lanes;
pub mod layout;
pub mod param_info;
pub mod param_key;
pub mod state;

pub use display::{DEFAULT_PRECISION, choice_index, format_value, is_on, toggled};
pub use interaction::Interaction;
pub use lanes::{add_lane, lane_count, lane_count_to_normalized, live_lanes, remove_lane};
pub use layout::{
    DESTINATION_CHOICES, LANE_COLOURS, PARAM_COUNT, RATE_CHOICES, SECTIONS, Section, SectionId,
    all_keys, all_params, lane_colour, param_meta, param_meta_by_id,
};
pub use param_info::{ParamKind, ParamMeta, ParamRange, ParamUnit};
pub use param_key::{
    LANE_FIELD_COUNT, LaneField, LaneNumber, LaneParam, MAX_LANES, ParamKey, ParseParamKeyError,
    STEPS_PER_LANE,
};
pub use state::{ParamChange, ParamState};
