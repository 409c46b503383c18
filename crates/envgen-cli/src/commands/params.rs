//! Parameter listing command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use clap::Args;
use envgen_core::{ParamKey, ParamKind, ParamMeta, all_params, format_value};

use super::lookup;

#[derive(Args)]
pub struct ParamsArgs {
    /// Show details for a single parameter id (e.g. lane1_attack)
    #[arg(value_name = "ID")]
    id: Option<String>,

    /// Include lanes 2-8, which repeat lane 1's layout
    #[arg(long)]
    all_lanes: bool,
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    if let Some(id) = &args.id {
        return show_param(&lookup(id)?);
    }

    println!("Parameters");
    println!("==========");
    println!();
    println!("  {:16}  {:12}  {:24}  {}", "Id", "Label", "Range", "Default");
    println!("  {:16}  {:12}  {:24}  {}", "--", "-----", "-----", "-------");

    let listed = all_params().filter(|meta| {
        args.all_lanes || meta.key.as_lane().is_none_or(|param| param.lane.get() == 1)
    });
    for meta in listed {
        println!(
            "  {:16}  {:12}  {:24}  {}",
            meta.key.to_string(),
            meta.label,
            describe_range(&meta),
            format_value(&meta, meta.default_normalized(), 3)
        );
    }

    if !args.all_lanes {
        println!();
        println!("  Lanes 2-8 repeat lane 1 (use --all-lanes to list them).");
    }
    Ok(())
}

fn describe_range(meta: &ParamMeta) -> String {
    match meta.kind {
        ParamKind::Bool => "on/off".to_string(),
        ParamKind::Choice(options) => options.join(", "),
        ParamKind::Float {
            range: Some(range),
            skew,
        } => {
            let unit = meta.unit.suffix();
            if skew == 1.0 {
                format!("{}{unit} .. {}{unit}", range.min, range.max)
            } else {
                format!("{}{unit} .. {}{unit} (skew {skew})", range.min, range.max)
            }
        }
        ParamKind::Float { range: None, .. } => "unbounded".to_string(),
    }
}

fn show_param(meta: &ParamMeta) -> anyhow::Result<()> {
    let id = meta.key.to_string();
    println!("{id}");
    println!("{}", "=".repeat(id.len()));
    println!();
    println!("Label:   {}", meta.label);
    println!("Range:   {}", describe_range(meta));
    println!(
        "Default: {} (normalized {:.6})",
        format_value(meta, meta.default_normalized(), 3),
        meta.default_normalized()
    );
    if meta.step > 0.0 {
        println!("Step:    {}", meta.step);
    }
    if let ParamKey::Lane(param) = meta.key {
        println!("Lane:    {}", param.lane);
    }
    Ok(())
}
