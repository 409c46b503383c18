//! Scripted session against a loopback backend.
//!
//! Connects an editor to an in-process backend, applies the given
//! operations in order, pumping after each one, and prints the resulting
//! surface. Operations:
//!
//! ```text
//! add                  append a lane
//! remove:INDEX         remove the lane at 0-based INDEX
//! set:ID=N             write a normalized value
//! real:ID=VALUE        write a real value
//! slider:ID=POS        write a slider position
//! toggle:ID            flip a switch or step
//! step:LANE:STEP       flip step STEP (0-based) of lane LANE (1-based)
//! choice:ID=INDEX      select a choice entry
//! drag:ID              begin dragging a control
//! release              end the drag
//! automate:ID=N        change a value from the backend side
//! reset                reset every parameter on the backend
//! refresh              discard local state and reload
//! ```

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use envgen_bridge::LoopbackHost;
use envgen_config::{EditorConfig, Snapshot};
use envgen_core::{LaneNumber, ParamKey};
use envgen_editor::{ControlKind, Editor, EditorView, LaneView, SectionBody};

#[derive(Args)]
pub struct SessionArgs {
    /// Operations to apply, in order
    #[arg(value_name = "OP")]
    ops: Vec<Op>,

    /// Backend state to start from (snapshot name or path)
    #[arg(long, value_name = "SNAPSHOT")]
    from: Option<String>,

    /// Save the final surface state as a JSON snapshot
    #[arg(long, value_name = "FILE")]
    save: Option<PathBuf>,
}

/// One scripted operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Add,
    Remove(usize),
    Set(ParamKey, f64),
    Real(ParamKey, f64),
    Slider(ParamKey, f64),
    Toggle(ParamKey),
    Step(LaneNumber, usize),
    Choice(ParamKey, usize),
    Drag(ParamKey),
    Release,
    Automate(ParamKey, f64),
    Reset,
    Refresh,
}

fn parse_key(id: &str) -> Result<ParamKey, String> {
    id.parse().map_err(|e| format!("{e}"))
}

fn parse_assignment<T: FromStr>(arg: &str) -> Result<(ParamKey, T), String> {
    let (id, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUE, got '{arg}'"))?;
    let value = value
        .parse()
        .map_err(|_| format!("invalid value '{value}' for {id}"))?;
    Ok((parse_key(id)?, value))
}

impl FromStr for Op {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, arg) = s.split_once(':').unwrap_or((s, ""));
        let op = match (name, arg) {
            ("add", "") => Op::Add,
            ("release", "") => Op::Release,
            ("reset", "") => Op::Reset,
            ("refresh", "") => Op::Refresh,
            ("remove", index) => Op::Remove(
                index
                    .parse()
                    .map_err(|_| format!("invalid lane index '{index}'"))?,
            ),
            ("set", arg) => {
                let (key, n) = parse_assignment(arg)?;
                Op::Set(key, n)
            }
            ("real", arg) => {
                let (key, real) = parse_assignment(arg)?;
                Op::Real(key, real)
            }
            ("slider", arg) => {
                let (key, pos) = parse_assignment(arg)?;
                Op::Slider(key, pos)
            }
            ("choice", arg) => {
                let (key, index) = parse_assignment(arg)?;
                Op::Choice(key, index)
            }
            ("automate", arg) => {
                let (key, n) = parse_assignment(arg)?;
                Op::Automate(key, n)
            }
            ("toggle", id) if !id.is_empty() => Op::Toggle(parse_key(id)?),
            ("drag", id) if !id.is_empty() => Op::Drag(parse_key(id)?),
            ("step", arg) => {
                let (lane, step) = arg
                    .split_once(':')
                    .ok_or_else(|| format!("expected step:LANE:STEP, got '{s}'"))?;
                let lane = lane
                    .parse::<u8>()
                    .ok()
                    .and_then(LaneNumber::new)
                    .ok_or_else(|| format!("invalid lane '{lane}'"))?;
                let step = step
                    .parse()
                    .map_err(|_| format!("invalid step '{step}'"))?;
                Op::Step(lane, step)
            }
            _ => return Err(format!("unknown operation '{s}'")),
        };
        Ok(op)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Add => f.write_str("add"),
            Op::Remove(index) => write!(f, "remove:{index}"),
            Op::Set(key, n) => write!(f, "set:{key}={n}"),
            Op::Real(key, real) => write!(f, "real:{key}={real}"),
            Op::Slider(key, pos) => write!(f, "slider:{key}={pos}"),
            Op::Toggle(key) => write!(f, "toggle:{key}"),
            Op::Step(lane, step) => write!(f, "step:{lane}:{step}"),
            Op::Choice(key, index) => write!(f, "choice:{key}={index}"),
            Op::Drag(key) => write!(f, "drag:{key}"),
            Op::Release => f.write_str("release"),
            Op::Automate(key, n) => write!(f, "automate:{key}={n}"),
            Op::Reset => f.write_str("reset"),
            Op::Refresh => f.write_str("refresh"),
        }
    }
}

fn apply(op: &Op, editor: &mut Editor, host: &LoopbackHost) -> anyhow::Result<()> {
    match *op {
        Op::Add => {
            editor.add_lane();
        }
        Op::Remove(index) => {
            editor.remove_lane(index);
        }
        Op::Set(key, n) => editor.set_param(key, n),
        Op::Real(key, real) => editor.set_real(key, real),
        Op::Slider(key, pos) => editor.set_slider_position(key, pos),
        Op::Toggle(key) => editor.toggle(key),
        Op::Step(lane, step) => {
            if !editor.toggle_step(lane, step) {
                anyhow::bail!("lane {lane} has no step {step}");
            }
        }
        Op::Choice(key, index) => {
            if !editor.select_choice(key, index) {
                anyhow::bail!("{key} has no choice {index}");
            }
        }
        Op::Drag(key) => editor.begin_drag(key),
        Op::Release => editor.end_drag(),
        Op::Automate(key, n) => host.automate(key, n),
        Op::Reset => editor.reset_all(),
        Op::Refresh => editor.refresh()?,
    }
    Ok(())
}

pub fn run(args: SessionArgs, config: EditorConfig) -> anyhow::Result<()> {
    let (host, bridge) = LoopbackHost::attach();

    if let Some(name) = &args.from {
        let (path, snapshot) = Snapshot::find(name)?;
        let unknown: Vec<&str> = snapshot.unknown_ids().collect();
        if !unknown.is_empty() {
            tracing::warn!("{}: ignoring unknown ids {}", path.display(), unknown.join(", "));
        }
        let (state, _) = snapshot.to_state();
        for (key, value) in state.iter() {
            host.automate(key, value);
        }
    }

    let mut editor = Editor::connect(Arc::new(bridge), config);
    editor.load_state()?;
    editor.pump();

    for op in &args.ops {
        tracing::debug!("session: {op}");
        apply(op, &mut editor, &host).with_context(|| format!("operation '{op}' failed"))?;
        let report = editor.pump();
        if report.suppressed > 0 {
            tracing::info!("{op}: {} pushes held off by drag", report.suppressed);
        }
    }

    print!("{}", render(&editor.view()));

    if let Some(path) = &args.save {
        Snapshot::from_state(editor.state()).save(path)?;
        println!();
        println!("Saved snapshot to {}", path.display());
    }
    Ok(())
}

fn render_lane(out: &mut String, lane: &LaneView) {
    let steps: String = lane
        .steps
        .iter()
        .map(|&on| if on { 'x' } else { '.' })
        .collect();
    out.push_str(&format!("  Lane {} {}  [{steps}]\n", lane.number, lane.colour));
    let shape: Vec<String> = lane
        .shape
        .iter()
        .map(|control| format!("{} {}", control.label, control.display))
        .collect();
    out.push_str(&format!("    {}\n", shape.join("  ")));
}

/// Plain-text rendering of the surface.
pub fn render(view: &EditorView) -> String {
    let mut out = String::new();
    for section in &view.sections {
        match &section.body {
            SectionBody::Controls(controls) => {
                out.push_str(&format!("{}\n", section.id.name()));
                for control in controls {
                    let marker = match control.kind {
                        ControlKind::Slider { position } => {
                            let filled = (position * 10.0).round().clamp(0.0, 10.0) as usize;
                            format!("[{}{}]", "#".repeat(filled), "-".repeat(10 - filled))
                        }
                        ControlKind::Switch { on } => {
                            (if on { "[on]" } else { "[off]" }).to_string()
                        }
                        ControlKind::Choice { .. } => String::new(),
                    };
                    out.push_str(&format!(
                        "  {:12} {:>8} {marker}\n",
                        control.label, control.display
                    ));
                }
            }
            SectionBody::Lanes {
                lanes,
                can_add_lane,
            } => {
                out.push_str(&format!(
                    "{} ({} lane{}{})\n",
                    section.id.name(),
                    lanes.len(),
                    if lanes.len() == 1 { "" } else { "s" },
                    if *can_add_lane { "" } else { ", full" }
                ));
                for lane in lanes {
                    render_lane(&mut out, lane);
                }
            }
        }
    }
    out
}
