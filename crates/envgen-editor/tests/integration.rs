//! Integration tests for envgen-editor.
//!
//! Drives the editor against a backend answering from another thread, so
//! snapshots and pushes arrive between pumps the way they do in a plugin.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Sender, unbounded};
use envgen_bridge::{JuceBridge, LoopbackHost, Transport};
use envgen_config::EditorConfig;
use envgen_core::{LaneField, LaneNumber, ParamKey, SectionId};
use envgen_editor::{ControlKind, Editor, SectionBody};
use serde_json::Value;

struct Threaded {
    tx: Sender<(String, Value)>,
}

impl Transport for Threaded {
    fn emit_event(&self, event: &str, payload: Value) {
        let _ = self.tx.send((event.to_string(), payload));
    }
}

fn threaded_editor(config: EditorConfig) -> (Arc<LoopbackHost>, Editor) {
    let bridge = JuceBridge::new();
    let host = Arc::new(LoopbackHost::new(bridge.inbound()));
    let (tx, rx) = unbounded::<(String, Value)>();
    let worker = Arc::clone(&host);
    thread::spawn(move || {
        for (event, payload) in rx {
            worker.emit_event(&event, payload);
        }
    });
    let bridge = bridge.with_transport(Arc::new(Threaded { tx }));
    (host, Editor::connect(Arc::new(bridge), config))
}

/// Pumps until `done` holds or five seconds pass.
fn pump_until(editor: &mut Editor, mut done: impl FnMut(&Editor) -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        editor.pump();
        if done(editor) {
            return;
        }
        assert!(Instant::now() < deadline, "timed out: {editor:?}");
        thread::sleep(Duration::from_millis(1));
    }
}

fn lane(n: u8) -> LaneNumber {
    LaneNumber::new(n).unwrap()
}

#[test]
fn snapshot_arrives_on_a_later_pump() {
    let (_host, mut editor) = threaded_editor(EditorConfig::default());
    editor.load_state().unwrap();
    pump_until(&mut editor, |e| !e.is_loading());
    assert_eq!(editor.lane_count(), 1);
    assert_eq!(editor.view().lanes().len(), 1);
}

#[test]
fn remove_lane_converges_with_backend() {
    let (host, mut editor) = threaded_editor(EditorConfig::default());
    editor.load_state().unwrap();
    pump_until(&mut editor, |e| !e.is_loading());

    editor.add_lane();
    editor.add_lane();
    editor.set_param(ParamKey::lane(lane(2), LaneField::Attack), 0.5);
    editor.set_param(ParamKey::lane(lane(3), LaneField::Attack), 0.8);
    assert_eq!(editor.remove_lane(0), 2);

    // Local state is already final; the backend catches up.
    assert_eq!(
        editor.state().get(ParamKey::lane(lane(1), LaneField::Attack)),
        0.5
    );
    pump_until(&mut editor, |e| {
        host.value(ParamKey::NumLanes) == 0.25 && e.state() == &host.snapshot()
    });
    assert_eq!(host.value(ParamKey::lane(lane(2), LaneField::Attack)), 0.8);
}

#[test]
fn automation_during_drag_is_held_off() {
    let (host, mut editor) = threaded_editor(EditorConfig::default());
    editor.load_state().unwrap();
    pump_until(&mut editor, |e| !e.is_loading());

    let decay = ParamKey::lane(lane(1), LaneField::Decay);
    editor.begin_drag(decay);
    editor.set_param(decay, 0.3);

    // Wait for the backend's echo of our own write; it is held off.
    let deadline = Instant::now() + Duration::from_secs(5);
    while editor.pump().suppressed == 0 {
        assert!(Instant::now() < deadline, "echo never arrived");
        thread::sleep(Duration::from_millis(1));
    }

    host.automate(decay, 0.95);
    host.automate(ParamKey::OutputGain, 0.25);
    let report = editor.pump();
    assert_eq!(report.suppressed, 1);
    assert_eq!(report.applied, 1);
    assert_eq!(editor.state().get(decay), 0.3);
    assert_eq!(editor.state().get(ParamKey::OutputGain), 0.25);

    editor.end_drag();
    host.automate(decay, 0.95);
    editor.pump();
    assert_eq!(editor.state().get(decay), 0.95);
}

#[test]
fn view_reflects_edits() {
    let mut config = EditorConfig::default();
    config.lanes.colours = vec!["#123456".to_string(), "#654321".to_string()];
    let (_host, mut editor) = threaded_editor(config);
    editor.load_state().unwrap();
    pump_until(&mut editor, |e| !e.is_loading());

    editor.toggle(ParamKey::DryPass);
    editor.add_lane();
    editor.toggle_step(lane(2), 7);
    editor.select_choice(ParamKey::lane(lane(2), LaneField::Destination), 1);

    let view = editor.view();
    let SectionBody::Controls(gain) = &view.section(SectionId::Gain).unwrap().body else {
        panic!("gain section holds lanes");
    };
    assert_eq!(gain[2].kind, ControlKind::Switch { on: true });
    assert_eq!(gain[2].display, "On");

    let lanes = view.lanes();
    assert_eq!(lanes.len(), 2);
    assert_eq!(lanes[1].colour, "#654321");
    assert!(lanes[1].steps[7]);
    assert_eq!(lanes[1].shape[4].display, "Amplitude");
}

#[test]
fn refresh_recovers_backend_truth() {
    let (host, mut editor) = threaded_editor(EditorConfig::default());
    editor.load_state().unwrap();
    pump_until(&mut editor, |e| !e.is_loading());

    host.automate(ParamKey::InputGain, 0.8);
    editor.refresh().unwrap();
    assert!(editor.state().is_empty());
    pump_until(&mut editor, |e| !e.is_loading());
    assert_eq!(editor.state().get(ParamKey::InputGain), 0.8);
}
