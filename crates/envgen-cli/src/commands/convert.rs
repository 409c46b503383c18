//! Value conversion command.

use clap::{ArgGroup, Args};
use envgen_config::EditorConfig;
use envgen_core::format_value;

use super::lookup;

#[derive(Args)]
#[command(group(ArgGroup::new("input").required(true).args(["normalized", "real", "slider"])))]
pub struct ConvertArgs {
    /// Parameter id (e.g. lane1_decay)
    #[arg(value_name = "ID")]
    id: String,

    /// Start from a normalized value in [0, 1]
    #[arg(short, long, allow_negative_numbers = true)]
    normalized: Option<f64>,

    /// Start from a real value (dB, seconds, choice index)
    #[arg(short, long, allow_negative_numbers = true)]
    real: Option<f64>,

    /// Start from a slider position in [0, 1]
    #[arg(short, long, allow_negative_numbers = true)]
    slider: Option<f64>,
}

pub fn run(args: ConvertArgs, config: &EditorConfig) -> anyhow::Result<()> {
    let meta = lookup(&args.id)?;

    let normalized = match (args.normalized, args.real, args.slider) {
        (Some(n), _, _) => n,
        (_, Some(real), _) => meta.real_to_normalized(real),
        (_, _, Some(pos)) => meta.real_to_normalized(meta.slider_position_to_real(pos)),
        (None, None, None) => anyhow::bail!("one of --normalized, --real or --slider is required"),
    };
    let real = meta.normalized_to_real(normalized);
    let slider = meta.real_to_slider_position(real);

    println!("{} ({})", meta.key, meta.label);
    println!("  normalized  {normalized:.6}");
    println!("  real        {real}");
    println!("  slider      {slider:.6}");
    println!(
        "  display     {}",
        format_value(&meta, normalized, config.view.precision)
    );
    Ok(())
}
