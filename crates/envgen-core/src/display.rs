//! Value readouts for controls.

use alloc::format;
use alloc::string::{String, ToString};

use crate::param_info::{ParamKind, ParamMeta};

/// Decimal places used for non-integer readouts unless configured otherwise.
pub const DEFAULT_PRECISION: usize = 2;

/// Switch and step threshold on the normalized value.
const ON_THRESHOLD: f64 = 0.5;

/// Whether a switch or step with normalized value `n` reads as on.
#[inline]
pub fn is_on(n: f64) -> bool {
    n >= ON_THRESHOLD
}

/// Normalized value a switch or step moves to when toggled.
#[inline]
pub fn toggled(n: f64) -> f64 {
    if is_on(n) { 0.0 } else { 1.0 }
}

/// Selected index of a choice, clamped into the valid range.
///
/// Returns `0` for non-choice parameters.
pub fn choice_index(meta: &ParamMeta, n: f64) -> usize {
    let count = meta.choice_count();
    if count == 0 {
        return 0;
    }
    let index = meta.normalized_to_real(n);
    // NaN lands on 0 through the saturating cast.
    index.clamp(0.0, (count - 1) as f64) as usize
}

/// Human-readable value for a control.
///
/// Switches read "On"/"Off", choices read their label, floats print the real
/// value (integers bare, otherwise with `precision` decimals) followed by the
/// unit suffix.
///
/// ```rust
/// use envgen_core::{ParamKey, format_value, param_meta};
///
/// let gain = param_meta(ParamKey::InputGain);
/// assert_eq!(format_value(&gain, 0.5, 2), "0dB");
/// assert_eq!(format_value(&gain, 0.6, 2), "4.80dB");
/// ```
pub fn format_value(meta: &ParamMeta, n: f64, precision: usize) -> String {
    match meta.kind {
        ParamKind::Bool => (if is_on(n) { "On" } else { "Off" }).to_string(),
        ParamKind::Choice(choices) => choices
            .get(choice_index(meta, n))
            .copied()
            .unwrap_or_default()
            .to_string(),
        ParamKind::Float { .. } => {
            let real = meta.normalized_to_real(n);
            let suffix = meta.unit.suffix();
            if real == libm::trunc(real) {
                // Collapse -0 so a centred bipolar control reads "0".
                format!("{:.0}{suffix}", real + 0.0)
            } else {
                format!("{real:.precision$}{suffix}")
            }
        }
    }
}
