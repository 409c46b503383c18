//! Integration tests for envgen-core.
//!
//! Exercises the catalogue, the value mapper and the lane manager together,
//! the way the editor drives them.

use envgen_core::{
    LaneField, LaneNumber, ParamKey, ParamKind, ParamMeta, ParamState, add_lane, all_keys,
    format_value, lane_count, lane_count_to_normalized, live_lanes, param_meta,
    param_meta_by_id, remove_lane,
};

fn lane(n: u8) -> LaneNumber {
    LaneNumber::new(n).unwrap()
}

fn attack() -> ParamMeta {
    param_meta(ParamKey::lane(LaneNumber::FIRST, LaneField::Attack))
}

// ============================================================================
// 1. Value mapping against the catalogue
// ============================================================================

#[test]
fn attack_slider_spans_its_range() {
    let meta = attack();
    assert_eq!(meta.slider_position_to_real(0.0), 0.001);
    assert!((meta.slider_position_to_real(1.0) - 10.0).abs() < 1e-12);

    let mut previous = meta.slider_position_to_real(0.0);
    for i in 1..=1000 {
        let real = meta.slider_position_to_real(f64::from(i) / 1000.0);
        assert!(real > previous, "not increasing at step {i}");
        previous = real;
    }
}

#[test]
fn degenerate_range_normalizes_to_zero() {
    let meta = ParamMeta::new(ParamKey::InputGain, "Fixed", ParamKind::float(5.0, 5.0));
    for value in [-5.0, 0.0, 5.0, 10.0] {
        assert_eq!(meta.real_to_normalized(value), 0.0);
    }
}

#[test]
fn six_way_choice() {
    let rate = param_meta(ParamKey::lane(LaneNumber::FIRST, LaneField::Rate));
    assert_eq!(rate.normalized_to_real(0.5), 3.0);
    assert!((rate.real_to_normalized(3.0) - 0.6).abs() < 1e-12);
}

#[test]
fn slider_drag_lands_on_normalized_value() {
    // Slider position -> real -> normalized, as a slider drag does.
    let meta = attack();
    let real = meta.slider_position_to_real(0.5);
    let n = meta.real_to_normalized(real);
    assert!((meta.normalized_to_real(n) - real).abs() < 1e-12);
    assert!((meta.real_to_slider_position(meta.normalized_to_real(n)) - 0.5).abs() < 1e-9);
}

#[test]
fn every_key_resolves_by_id() {
    for key in all_keys() {
        let meta = param_meta_by_id(&key.to_string()).expect("catalogue id");
        assert_eq!(meta.key, key);
    }
}

// ============================================================================
// 2. Lane management
// ============================================================================

#[test]
fn remove_first_of_three() {
    let mut state = ParamState::new();
    state.set(ParamKey::NumLanes, lane_count_to_normalized(3));
    state.set(ParamKey::lane(lane(2), LaneField::Attack), 0.5);
    state.set(ParamKey::lane(lane(3), LaneField::Attack), 0.8);

    remove_lane(&mut state, 0);

    assert_eq!(lane_count(&state), 2);
    assert_eq!(state.get(ParamKey::lane(lane(1), LaneField::Attack)), 0.5);
    assert_eq!(state.get(ParamKey::lane(lane(2), LaneField::Attack)), 0.8);
    let lanes_meta = param_meta(ParamKey::NumLanes);
    assert_eq!(lanes_meta.normalized_to_real(state.get(ParamKey::NumLanes)), 2.0);
}

#[test]
fn eight_adds_then_ceiling() {
    let mut state = ParamState::new();
    for _ in 0..8 {
        add_lane(&mut state);
    }
    assert_eq!(lane_count(&state), 8);
    assert!(add_lane(&mut state).is_empty());
    assert_eq!(lane_count(&state), 8);
}

#[test]
fn invalid_removals_leave_state_unchanged() {
    let mut empty = ParamState::new();
    assert!(remove_lane(&mut empty, 0).is_empty());
    assert_eq!(empty, ParamState::new());

    let mut state = ParamState::with_defaults();
    let before = state.clone();
    assert!(remove_lane(&mut state, 1).is_empty());
    assert_eq!(state, before);
}

#[test]
fn defaults_show_one_lane_with_readable_values() {
    let state = ParamState::with_defaults();
    let lanes: Vec<_> = live_lanes(&state).collect();
    assert_eq!(lanes, vec![LaneNumber::FIRST]);

    let rate = param_meta(ParamKey::lane(LaneNumber::FIRST, LaneField::Rate));
    assert_eq!(format_value(&rate, state.get(rate.key), 2), "1/16");
    let dest = param_meta(ParamKey::lane(LaneNumber::FIRST, LaneField::Destination));
    assert_eq!(format_value(&dest, state.get(dest.key), 2), "None");
}

#[test]
fn writes_replay_onto_a_mirror() {
    // Forwarding every returned write to a second copy keeps the two equal,
    // which is what keeps the host in step with the surface.
    let mut local = ParamState::with_defaults();
    let mut host = local.clone();
    for _ in 0..4 {
        for change in add_lane(&mut local) {
            host.apply(change);
        }
    }
    local.set(ParamKey::lane(lane(3), LaneField::Decay), 0.33);
    host.set(ParamKey::lane(lane(3), LaneField::Decay), 0.33);

    for change in remove_lane(&mut local, 1) {
        host.apply(change);
    }
    assert_eq!(local, host);
    assert_eq!(lane_count(&host), 4);
    assert_eq!(host.get(ParamKey::lane(lane(2), LaneField::Decay)), 0.33);
}
