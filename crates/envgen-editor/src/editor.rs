//! The control-surface model.
//!
//! [`Editor`] owns the surface's mirror of the parameter set and keeps it in
//! step with the backend:
//!
//! ```text
//! user edit ──► Editor::set_param ──► local state (optimistic)
//!                      └────────────► setParameter (fire and forget)
//!
//! backend push ──► channel ──► Editor::pump ──► local state
//!                                  (skipped for the dragged control)
//! ```
//!
//! Pushes arrive on whatever thread the backend uses; they only ever touch
//! the editor through the channel, so all state changes happen on the
//! thread that calls [`Editor::pump`].

use std::sync::Arc;

use crossbeam_channel::{Receiver, unbounded};
use envgen_bridge::{BackendClient, Bridge, BridgeError, PendingCall, decode_state};
use envgen_config::EditorConfig;
use envgen_core::{
    Interaction, LaneField, LaneNumber, ParamChange, ParamKey, ParamState, lane_count, lanes,
    param_meta, toggled,
};

use crate::view::{EditorView, build_view};

/// What one [`Editor::pump`] call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpReport {
    /// Whether a requested snapshot arrived and replaced the state.
    pub loaded: bool,
    /// Pushes written to the state.
    pub applied: usize,
    /// Pushes dropped because their control was being dragged.
    pub suppressed: usize,
    /// Pushes dropped because their id is not in the layout.
    pub unknown: usize,
}

/// Surface state plus its connection to the backend.
pub struct Editor {
    client: BackendClient,
    config: EditorConfig,
    state: ParamState,
    interaction: Interaction,
    pushes: Receiver<(String, f64)>,
    loading: Option<PendingCall>,
}

impl Editor {
    /// Connects to `bridge` and registers the push callback.
    ///
    /// The state starts empty; call [`load_state`](Self::load_state) to
    /// fetch it.
    pub fn connect(bridge: Arc<dyn Bridge>, config: EditorConfig) -> Self {
        let (tx, rx) = unbounded();
        bridge.register_callback(Arc::new(move |id: &str, value: f64| {
            // The editor may already be gone; late pushes are dropped.
            let _ = tx.send((id.to_string(), value));
        }));
        Self {
            client: BackendClient::new(bridge),
            config,
            state: ParamState::new(),
            interaction: Interaction::default(),
            pushes: rx,
            loading: None,
        }
    }

    /// Requests a full snapshot. It replaces the state on a later
    /// [`pump`](Self::pump).
    pub fn load_state(&mut self) -> Result<(), BridgeError> {
        self.loading = Some(self.client.request_state()?);
        Ok(())
    }

    /// Discards local state and any drag, then requests a fresh snapshot.
    pub fn refresh(&mut self) -> Result<(), BridgeError> {
        tracing::debug!("editor: refresh");
        self.state = ParamState::new();
        self.interaction = Interaction::default();
        self.loading = None;
        self.load_state()
    }

    /// Whether a requested snapshot has not arrived yet.
    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    /// Applies an arrived snapshot, then every queued push.
    pub fn pump(&mut self) -> PumpReport {
        let mut report = PumpReport::default();

        if let Some(call) = &self.loading {
            match call.try_result() {
                Ok(Some(result)) => {
                    let (state, dropped) = ParamState::from_ids(decode_state(&result));
                    if dropped > 0 {
                        tracing::warn!("editor: snapshot had {dropped} unknown ids");
                    }
                    tracing::debug!("editor: loaded {} parameters", state.len());
                    self.state = state;
                    self.loading = None;
                    report.loaded = true;
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!("editor: getState failed: {err}");
                    self.loading = None;
                }
            }
        }

        for (id, value) in self.pushes.try_iter() {
            let Ok(key) = id.parse::<ParamKey>() else {
                tracing::warn!("editor: push for unknown id {id}");
                report.unknown += 1;
                continue;
            };
            if self.interaction.accepts_remote(key) {
                self.state.set(key, value);
                report.applied += 1;
            } else {
                report.suppressed += 1;
            }
        }

        report
    }

    /// Writes a normalized value locally and forwards it to the backend.
    pub fn set_param(&mut self, key: ParamKey, n: f64) {
        self.state.set(key, n);
        self.dispatch(ParamChange::new(key, n));
    }

    /// Writes a value given in real units.
    pub fn set_real(&mut self, key: ParamKey, real: f64) {
        let n = param_meta(key).real_to_normalized(real);
        self.set_param(key, n);
    }

    /// Writes a value given as a slider position, snapped to the configured
    /// slider step. A non-positive step disables snapping.
    pub fn set_slider_position(&mut self, key: ParamKey, pos: f64) {
        let step = self.config.view.slider_step;
        let snapped = if step > 0.0 {
            (pos / step).round() * step
        } else {
            pos
        };
        let snapped = snapped.clamp(0.0, 1.0);
        let real = param_meta(key).slider_position_to_real(snapped);
        self.set_real(key, real);
    }

    /// Flips a switch or step.
    pub fn toggle(&mut self, key: ParamKey) {
        let n = toggled(self.state.get(key));
        self.set_param(key, n);
    }

    /// Flips step `step` (0-based) of `lane`. Returns `false` for steps past
    /// the sequence length.
    pub fn toggle_step(&mut self, lane: LaneNumber, step: usize) -> bool {
        let Some(field) = LaneField::step(step) else {
            return false;
        };
        self.toggle(ParamKey::lane(lane, field));
        true
    }

    /// Selects entry `index` of a choice. Returns `false` for non-choice
    /// keys and out-of-range indices.
    pub fn select_choice(&mut self, key: ParamKey, index: usize) -> bool {
        if index >= param_meta(key).choice_count() {
            return false;
        }
        self.set_real(key, index as f64);
        true
    }

    /// Pointer down on a control.
    pub fn begin_drag(&mut self, key: ParamKey) {
        self.interaction.begin_drag(key);
    }

    /// Pointer up or leave.
    pub fn end_drag(&mut self) {
        self.interaction.end_drag();
    }

    /// Appends a lane. Returns the lane count afterwards.
    pub fn add_lane(&mut self) -> usize {
        for change in lanes::add_lane(&mut self.state) {
            self.dispatch(change);
        }
        self.lane_count()
    }

    /// Removes the lane at 0-based `index`. Returns the lane count afterwards.
    pub fn remove_lane(&mut self, index: usize) -> usize {
        for change in lanes::remove_lane(&mut self.state, index) {
            self.dispatch(change);
        }
        self.lane_count()
    }

    /// Asks the backend to reset everything. The new values arrive as pushes.
    pub fn reset_all(&mut self) {
        if let Err(err) = self.client.reset_all_parameters() {
            tracing::warn!("editor: resetAllParameters failed: {err}");
        }
    }

    /// Number of live lanes.
    pub fn lane_count(&self) -> usize {
        lane_count(&self.state)
    }

    /// Render-ready view of the current state.
    pub fn view(&self) -> EditorView {
        build_view(&self.state, &self.config)
    }

    /// Current local state.
    pub fn state(&self) -> &ParamState {
        &self.state
    }

    /// Current interaction state.
    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    /// Settings in use.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    fn dispatch(&self, change: ParamChange) {
        match self.client.set_parameter(&change.key.to_string(), change.value) {
            Ok(call) => tracing::debug!(
                "editor: setParameter {} = {} (call {})",
                change.key,
                change.value,
                call.id()
            ),
            Err(err) => tracing::warn!("editor: setParameter {} failed: {err}", change.key),
        }
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("lanes", &self.lane_count())
            .field("params", &self.state.len())
            .field("interaction", &self.interaction)
            .field("loading", &self.is_loading())
            .finish_non_exhaustive()
    }
}
