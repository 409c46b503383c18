//! The parameter catalogue and surface layout.
//!
//! Mirrors the host's declared parameter layout one-to-one: three global
//! controls, the `numLanes` counter, and eight pre-allocated lanes of 22
//! parameters each. The host allocates all eight lanes whether or not they are
//! visible; `numLanes` decides how many the surface shows.
//!
//! # Example
//!
//! ```rust
//! use envgen_core::{PARAM_COUNT, all_params, param_meta_by_id};
//!
//! assert_eq!(all_params().count(), PARAM_COUNT);
//! assert_eq!(param_meta_by_id("lane4_decay").unwrap().label, "Decay");
//! assert!(param_meta_by_id("lane9_decay").is_none());
//! ```

use crate::param_info::{ParamKind, ParamMeta, ParamUnit};
use crate::param_key::{LANE_FIELD_COUNT, LaneField, LaneNumber, LaneParam, MAX_LANES, ParamKey};

/// Total number of host parameters.
pub const PARAM_COUNT: usize = ParamKey::GLOBALS.len() + MAX_LANES * LANE_FIELD_COUNT;

/// Step rate divisions, indexed by the `rate` choice.
pub const RATE_CHOICES: &[&str] = &["1/1", "1/2", "1/4", "1/8", "1/16", "1/32"];

/// Modulation destinations, indexed by the `destination` choice.
pub const DESTINATION_CHOICES: &[&str] = &["None", "Amplitude"];

const STEP_LABELS: [&str; 16] = [
    "Step 1", "Step 2", "Step 3", "Step 4", "Step 5", "Step 6", "Step 7", "Step 8", "Step 9",
    "Step 10", "Step 11", "Step 12", "Step 13", "Step 14", "Step 15", "Step 16",
];

/// Envelope segment times share one curve: 0.3 skew puts short times under
/// most of the slider travel.
const TIME_SKEW: f64 = 0.3;

/// Fixed lane palette, indexed by 0-based lane position.
///
/// Shared with the host's oscilloscope, which draws each lane's envelope in
/// the same colour.
pub const LANE_COLOURS: [&str; MAX_LANES] = [
    "#00ffaa", "#ff8c00", "#4da6ff", "#e040fb", "#ffeb3b", "#26a69a", "#ff7043", "#b39ddb",
];

/// Colour for the lane at 0-based `index`, falling back to the first entry.
pub fn lane_colour(index: usize) -> &'static str {
    LANE_COLOURS.get(index).copied().unwrap_or(LANE_COLOURS[0])
}

/// Descriptor for `key`. Every key has exactly one.
pub fn param_meta(key: ParamKey) -> ParamMeta {
    match key {
        ParamKey::InputGain => ParamMeta::new(key, "Input Gain", ParamKind::float(-24.0, 24.0))
            .with_unit(ParamUnit::Decibels)
            .with_step(0.1),
        ParamKey::OutputGain => ParamMeta::new(key, "Output Gain", ParamKind::float(-24.0, 24.0))
            .with_unit(ParamUnit::Decibels)
            .with_step(0.1),
        ParamKey::DryPass => ParamMeta::new(key, "Dry", ParamKind::Bool),
        ParamKey::NumLanes => {
            ParamMeta::new(key, "Lanes", ParamKind::float(0.0, MAX_LANES as f64))
                .with_default(1.0)
                .with_step(1.0)
        }
        ParamKey::Lane(LaneParam { field, .. }) => lane_field_meta(key, field),
    }
}

fn lane_field_meta(key: ParamKey, field: LaneField) -> ParamMeta {
    match field {
        LaneField::Step(step) => ParamMeta::new(key, STEP_LABELS[step as usize], ParamKind::Bool),
        LaneField::Attack => {
            ParamMeta::new(key, "Attack", ParamKind::skewed(0.001, 10.0, TIME_SKEW))
                .with_unit(ParamUnit::Seconds)
                .with_default(0.01)
                .with_step(0.001)
        }
        LaneField::Hold => ParamMeta::new(key, "Hold", ParamKind::skewed(0.0, 10.0, TIME_SKEW))
            .with_unit(ParamUnit::Seconds)
            .with_default(0.1)
            .with_step(0.001),
        LaneField::Decay => ParamMeta::new(key, "Decay", ParamKind::skewed(0.001, 10.0, TIME_SKEW))
            .with_unit(ParamUnit::Seconds)
            .with_default(0.5)
            .with_step(0.001),
        // 1/16
        LaneField::Rate => ParamMeta::new(key, "Rate", ParamKind::Choice(RATE_CHOICES))
            .with_default(4.0)
            .with_step(1.0),
        LaneField::Destination => {
            ParamMeta::new(key, "Assign", ParamKind::Choice(DESTINATION_CHOICES)).with_step(1.0)
        }
        LaneField::Amount => ParamMeta::new(key, "Amount", ParamKind::float(-1.0, 1.0))
            .with_default(1.0)
            .with_step(0.01),
    }
}

/// Descriptor for a host-side string id.
///
/// Returns `None` for ids outside the layout; callers drop those controls.
pub fn param_meta_by_id(id: &str) -> Option<ParamMeta> {
    id.parse::<ParamKey>().ok().map(param_meta)
}

/// Every parameter key in host layout order.
pub fn all_keys() -> impl Iterator<Item = ParamKey> {
    ParamKey::GLOBALS
        .into_iter()
        .chain(LaneNumber::all().flat_map(ParamKey::lane_block))
}

/// Every parameter descriptor in host layout order.
pub fn all_params() -> impl Iterator<Item = ParamMeta> {
    all_keys().map(param_meta)
}

/// Top-level surface sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    /// Input/output gain and dry pass-through.
    Gain,
    /// The dynamic lane list.
    Envelope,
}

impl SectionId {
    /// Stable upper-case name (`"GAIN"`, `"ENVELOPE"`).
    pub const fn name(&self) -> &'static str {
        match self {
            SectionId::Gain => "GAIN",
            SectionId::Envelope => "ENVELOPE",
        }
    }
}

/// One card on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Section {
    /// Identity.
    pub id: SectionId,
    /// Card title.
    pub title: &'static str,
    /// Fixed controls. The envelope section lists none; its lanes are dynamic.
    pub params: &'static [ParamKey],
}

/// Surface sections in display order.
pub const SECTIONS: [Section; 2] = [
    Section {
        id: SectionId::Gain,
        title: "Gain",
        params: &[ParamKey::InputGain, ParamKey::OutputGain, ParamKey::DryPass],
    },
    Section {
        id: SectionId::Envelope,
        title: "Envelope",
        params: &[],
    },
];
