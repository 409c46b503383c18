//! Render-ready description of the surface.
//!
//! [`build_view`] turns the current state into plain data a renderer can
//! walk top to bottom: sections, then controls or lanes, each control with
//! its readout already formatted. Nothing here talks to the backend.

use envgen_config::EditorConfig;
use envgen_core::{
    LaneField, LaneNumber, MAX_LANES, ParamKey, ParamKind, ParamMeta, ParamState, SECTIONS,
    STEPS_PER_LANE, SectionId, choice_index, format_value, is_on, live_lanes, param_meta,
};

/// How a control is drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    /// Horizontal slider.
    Slider {
        /// Thumb position in \[0, 1\], after skew.
        position: f64,
    },
    /// On/off switch.
    Switch {
        /// Whether the switch reads as on.
        on: bool,
    },
    /// Drop-down list.
    Choice {
        /// Selected entry.
        selected: usize,
        /// Entry labels.
        options: &'static [&'static str],
    },
}

/// One control with its current value.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlView {
    /// Parameter shown.
    pub key: ParamKey,
    /// Label, e.g. "Attack".
    pub label: &'static str,
    /// Unit suffix, empty for unitless controls.
    pub unit: &'static str,
    /// Normalized value.
    pub normalized: f64,
    /// Formatted readout.
    pub display: String,
    /// Widget and widget state.
    pub kind: ControlKind,
}

impl ControlView {
    /// View of `meta` at normalized value `n`.
    pub fn new(meta: &ParamMeta, n: f64, precision: usize) -> Self {
        let kind = match meta.kind {
            ParamKind::Bool => ControlKind::Switch { on: is_on(n) },
            ParamKind::Choice(options) => ControlKind::Choice {
                selected: choice_index(meta, n),
                options,
            },
            ParamKind::Float { .. } => ControlKind::Slider {
                position: meta.real_to_slider_position(meta.normalized_to_real(n)),
            },
        };
        Self {
            key: meta.key,
            label: meta.label,
            unit: meta.unit.suffix(),
            normalized: n,
            display: format_value(meta, n, precision),
            kind,
        }
    }
}

/// One live lane.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneView {
    /// 1-based lane number.
    pub number: LaneNumber,
    /// Accent colour, `#rrggbb`.
    pub colour: String,
    /// Step gates in sequence order.
    pub steps: [bool; STEPS_PER_LANE],
    /// Attack, hold, decay, rate, destination, amount.
    pub shape: Vec<ControlView>,
}

/// Contents of a section.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionBody {
    /// A fixed list of controls.
    Controls(Vec<ControlView>),
    /// The dynamic lane list.
    Lanes {
        /// Live lanes in order.
        lanes: Vec<LaneView>,
        /// Whether the add-lane action is enabled.
        can_add_lane: bool,
    },
}

/// One card on the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionView {
    /// Section identity.
    pub id: SectionId,
    /// Card title.
    pub title: &'static str,
    /// Card contents.
    pub body: SectionBody,
}

/// The whole surface.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorView {
    /// Sections in display order.
    pub sections: Vec<SectionView>,
}

impl EditorView {
    /// Section with the given id.
    pub fn section(&self, id: SectionId) -> Option<&SectionView> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Live lanes, empty if the envelope section is missing.
    pub fn lanes(&self) -> &[LaneView] {
        self.sections
            .iter()
            .find_map(|s| match &s.body {
                SectionBody::Lanes { lanes, .. } => Some(lanes.as_slice()),
                SectionBody::Controls(_) => None,
            })
            .unwrap_or(&[])
    }
}

fn lane_view(state: &ParamState, lane: LaneNumber, config: &EditorConfig) -> LaneView {
    let precision = config.view.precision;
    let mut steps = [false; STEPS_PER_LANE];
    for (step, on) in steps.iter_mut().enumerate() {
        if let Some(field) = LaneField::step(step) {
            *on = is_on(state.get(ParamKey::lane(lane, field)));
        }
    }
    let shape = LaneField::SHAPE
        .into_iter()
        .map(|field| {
            let meta = param_meta(ParamKey::lane(lane, field));
            ControlView::new(&meta, state.get(meta.key), precision)
        })
        .collect();
    LaneView {
        number: lane,
        colour: config.lane_colour(lane.index()).to_string(),
        steps,
        shape,
    }
}

/// Builds the view of `state`.
pub fn build_view(state: &ParamState, config: &EditorConfig) -> EditorView {
    let precision = config.view.precision;
    let sections = SECTIONS
        .iter()
        .map(|section| {
            let body = match section.id {
                SectionId::Gain => SectionBody::Controls(
                    section
                        .params
                        .iter()
                        .map(|&key| ControlView::new(&param_meta(key), state.get(key), precision))
                        .collect(),
                ),
                SectionId::Envelope => {
                    let lanes: Vec<LaneView> = live_lanes(state)
                        .map(|lane| lane_view(state, lane, config))
                        .collect();
                    SectionBody::Lanes {
                        can_add_lane: lanes.len() < MAX_LANES,
                        lanes,
                    }
                }
            };
            SectionView {
                id: section.id,
                title: section.title,
                body,
            }
        })
        .collect();
    EditorView { sections }
}
