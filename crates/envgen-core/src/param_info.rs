//! Parameter metadata and the value mapper.
//!
//! Every control on the surface is described by a [`ParamMeta`]. The metadata
//! carries enough information to move a value between its three
//! representations:
//!
//! - **Normalized** \[0.0, 1.0\]: the canonical value exchanged with the host
//! - **Real**: the value in its natural unit (dB, seconds, choice index)
//! - **Slider position** \[0.0, 1.0\]: a possibly skewed coordinate used to
//!   draw sliders with perceptual scaling
//!
//! # Mapping Rules
//!
//! | Kind | normalized → real | real → normalized |
//! |------|-------------------|-------------------|
//! | `Float` with range | `min + (max - min) * clamp(n)` | `clamp((v - min) / (max - min))` |
//! | `Choice(c)` | `floor(n * (c.len() - 1) + 0.5)` | `v / (c.len() - 1)` |
//! | `Bool`, unbounded `Float` | identity | identity |
//!
//! Slider positions apply `p.powf(skew)` on top of the linear proportion, so a
//! skew below 1.0 spends more of the slider travel near the minimum (short
//! attack times, for example).
//!
//! # Example
//!
//! ```rust
//! use envgen_core::{LaneField, LaneNumber, ParamKey, param_meta};
//!
//! let attack = param_meta(ParamKey::lane(LaneNumber::FIRST, LaneField::Attack));
//! let real = attack.slider_position_to_real(0.5);
//! let pos = attack.real_to_slider_position(real);
//! assert!((pos - 0.5).abs() < 1e-9);
//! ```

use crate::param_key::ParamKey;

/// Real-value bounds of a continuous parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    /// Lower bound (real units).
    pub min: f64,
    /// Upper bound (real units).
    pub max: f64,
}

impl ParamRange {
    /// Creates a range from `min` to `max`.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Width of the range. Zero for degenerate bounds.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Linear proportion of `value` within the range, clamped to \[0, 1\].
    ///
    /// Returns `0.0` for a zero-width range.
    #[inline]
    pub fn proportion(&self, value: f64) -> f64 {
        let width = self.width();
        if width == 0.0 {
            return 0.0;
        }
        ((value - self.min) / width).clamp(0.0, 1.0)
    }
}

/// The closed set of parameter kinds the surface knows how to render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamKind {
    /// Continuous value, rendered as a slider.
    Float {
        /// Real-value bounds. `None` means normalized and real coincide.
        range: Option<ParamRange>,
        /// Slider curve exponent. `1.0` is linear.
        skew: f64,
    },
    /// On/off switch. Normalized 0.0 or 1.0.
    Bool,
    /// Discrete list; the real value is an index into the labels.
    Choice(&'static [&'static str]),
}

impl ParamKind {
    /// Linear float over `min..=max`.
    pub const fn float(min: f64, max: f64) -> Self {
        ParamKind::Float {
            range: Some(ParamRange::new(min, max)),
            skew: 1.0,
        }
    }

    /// Skewed float over `min..=max`.
    pub const fn skewed(min: f64, max: f64, skew: f64) -> Self {
        ParamKind::Float {
            range: Some(ParamRange::new(min, max)),
            skew,
        }
    }

    /// Bounded range and skew of a float parameter, if any.
    #[inline]
    fn bounded(&self) -> Option<(ParamRange, f64)> {
        match *self {
            ParamKind::Float {
                range: Some(range),
                skew,
            } => Some((range, skew)),
            _ => None,
        }
    }
}

/// Unit suffix for value display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Decibels, for the gain stages.
    Decibels,
    /// Seconds, for envelope segment times.
    Seconds,
    /// Dimensionless.
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    ///
    /// ```rust
    /// use envgen_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Decibels.suffix(), "dB");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Decibels => "dB",
            ParamUnit::Seconds => "s",
            ParamUnit::None => "",
        }
    }
}

/// Static descriptor for one parameter.
///
/// Exactly one descriptor exists per [`ParamKey`]; look them up with
/// [`param_meta`](crate::param_meta) or
/// [`param_meta_by_id`](crate::param_meta_by_id).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamMeta {
    /// Structured identity. Its `Display` form is the host-side id.
    pub key: ParamKey,

    /// Display label (e.g., "Attack", "Step 3").
    pub label: &'static str,

    /// Rendering kind and mapping rules.
    pub kind: ParamKind,

    /// Display unit.
    pub unit: ParamUnit,

    /// Default value in real units (index for choices, 0/1 for switches).
    pub default: f64,

    /// Display step in real units.
    pub step: f64,
}

impl ParamMeta {
    /// Descriptor with a zero default and no unit.
    pub const fn new(key: ParamKey, label: &'static str, kind: ParamKind) -> Self {
        Self {
            key,
            label,
            kind,
            unit: ParamUnit::None,
            default: 0.0,
            step: 0.0,
        }
    }

    /// Sets the display unit.
    pub const fn with_unit(mut self, unit: ParamUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Sets the default real value.
    pub const fn with_default(mut self, default: f64) -> Self {
        self.default = default;
        self
    }

    /// Sets the display step.
    pub const fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Number of choices, or `0` for non-choice parameters.
    pub fn choice_count(&self) -> usize {
        match self.kind {
            ParamKind::Choice(choices) => choices.len(),
            _ => 0,
        }
    }

    /// Label of the choice at `index`, if this is a choice parameter.
    pub fn choice_label(&self, index: usize) -> Option<&'static str> {
        match self.kind {
            ParamKind::Choice(choices) => choices.get(index).copied(),
            _ => None,
        }
    }

    /// Default value expressed as a normalized value.
    pub fn default_normalized(&self) -> f64 {
        self.real_to_normalized(self.default)
    }

    /// Converts a normalized value to real units.
    ///
    /// Floats clamp `n` to \[0, 1\] first. Choices are *not* clamped and
    /// return a rounded index. Everything else passes through.
    ///
    /// ```rust
    /// use envgen_core::{LaneField, LaneNumber, ParamKey, param_meta};
    ///
    /// let rate = param_meta(ParamKey::lane(LaneNumber::FIRST, LaneField::Rate));
    /// assert_eq!(rate.normalized_to_real(0.5), 3.0);
    /// ```
    #[inline]
    pub fn normalized_to_real(&self, n: f64) -> f64 {
        match self.kind {
            ParamKind::Float {
                range: Some(range), ..
            } => range.min + range.width() * n.clamp(0.0, 1.0),
            // Halves round toward +inf, so -0.5 lands on 0 rather than -1.
            ParamKind::Choice(choices) if !choices.is_empty() => {
                libm::floor(n * (choices.len() - 1) as f64 + 0.5)
            }
            _ => n,
        }
    }

    /// Converts a real value to a normalized value.
    ///
    /// Inverse of [`normalized_to_real`](Self::normalized_to_real). A
    /// zero-width float range and a single-entry choice list both map to
    /// `0.0` rather than dividing by zero.
    #[inline]
    pub fn real_to_normalized(&self, value: f64) -> f64 {
        match self.kind {
            ParamKind::Float {
                range: Some(range), ..
            } => range.proportion(value),
            ParamKind::Choice(choices) if !choices.is_empty() => {
                if choices.len() <= 1 {
                    0.0
                } else {
                    value / (choices.len() - 1) as f64
                }
            }
            _ => value,
        }
    }

    /// Converts a real value to a slider position, applying the skew curve.
    ///
    /// Only bounded floats are skewed; other kinds return `real` unchanged.
    /// The curve is skipped at `p == 0` so non-integer exponents never see
    /// `0.powf(x)`.
    #[inline]
    pub fn real_to_slider_position(&self, real: f64) -> f64 {
        let Some((range, skew)) = self.kind.bounded() else {
            return real;
        };
        let proportion = range.proportion(real);
        if skew != 1.0 && proportion > 0.0 {
            libm::pow(proportion, skew)
        } else {
            proportion
        }
    }

    /// Converts a slider position back to a real value.
    ///
    /// Inverse of [`real_to_slider_position`](Self::real_to_slider_position):
    /// exact at skew 1, within floating-point error otherwise.
    #[inline]
    pub fn slider_position_to_real(&self, pos: f64) -> f64 {
        let Some((range, skew)) = self.kind.bounded() else {
            return pos;
        };
        let p = pos.clamp(0.0, 1.0);
        let mapped = if skew != 1.0 && p > 0.0 {
            libm::exp(libm::log(p) / skew)
        } else {
            p
        };
        range.min + range.width() * mapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param_key::{LaneField, LaneNumber};

    const RATES: &[&str] = &["1/1", "1/2", "1/4", "1/8", "1/16", "1/32"];

    fn float(min: f64, max: f64) -> ParamMeta {
        ParamMeta::new(ParamKey::InputGain, "Test", ParamKind::float(min, max))
    }

    fn skewed(min: f64, max: f64, skew: f64) -> ParamMeta {
        ParamMeta::new(
            ParamKey::lane(LaneNumber::FIRST, LaneField::Attack),
            "Test",
            ParamKind::skewed(min, max, skew),
        )
    }

    fn choice(choices: &'static [&'static str]) -> ParamMeta {
        ParamMeta::new(
            ParamKey::lane(LaneNumber::FIRST, LaneField::Rate),
            "Rate",
            ParamKind::Choice(choices),
        )
    }

    #[test]
    fn float_normalized_to_real_clamps() {
        let meta = float(-24.0, 24.0);
        assert_eq!(meta.normalized_to_real(0.0), -24.0);
        assert_eq!(meta.normalized_to_real(0.5), 0.0);
        assert_eq!(meta.normalized_to_real(1.0), 24.0);
        assert_eq!(meta.normalized_to_real(-3.0), -24.0);
        assert_eq!(meta.normalized_to_real(7.0), 24.0);
    }

    #[test]
    fn float_real_to_normalized_clamps() {
        let meta = float(-24.0, 24.0);
        assert_eq!(meta.real_to_normalized(12.0), 0.75);
        assert_eq!(meta.real_to_normalized(-100.0), 0.0);
        assert_eq!(meta.real_to_normalized(100.0), 1.0);
    }

    #[test]
    fn zero_range_never_divides() {
        let meta = float(5.0, 5.0);
        for v in [-10.0, 0.0, 5.0, 1e9] {
            assert_eq!(meta.real_to_normalized(v), 0.0);
            assert_eq!(meta.real_to_slider_position(v), 0.0);
        }
    }

    #[test]
    fn choice_maps_to_rounded_index() {
        let meta = choice(RATES);
        assert_eq!(meta.normalized_to_real(0.5), 3.0);
        assert_eq!(meta.normalized_to_real(0.0), 0.0);
        assert_eq!(meta.normalized_to_real(1.0), 5.0);
        assert!((meta.real_to_normalized(3.0) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn choice_is_not_pre_clamped() {
        let meta = choice(RATES);
        assert_eq!(meta.normalized_to_real(2.0), 10.0);
    }

    #[test]
    fn choice_halves_round_up() {
        let meta = choice(RATES);
        assert_eq!(meta.normalized_to_real(-0.1), 0.0);
        assert_eq!(meta.normalized_to_real(-0.3), -1.0);
        assert_eq!(meta.normalized_to_real(0.1), 1.0);
    }

    #[test]
    fn single_choice_normalizes_to_zero() {
        let meta = choice(&["Only"]);
        assert_eq!(meta.real_to_normalized(0.0), 0.0);
        assert_eq!(meta.real_to_normalized(4.0), 0.0);
        assert_eq!(meta.normalized_to_real(0.7), 0.0);
    }

    #[test]
    fn bool_and_unbounded_pass_through() {
        let switch = ParamMeta::new(ParamKey::DryPass, "Dry", ParamKind::Bool);
        assert_eq!(switch.normalized_to_real(1.0), 1.0);
        assert_eq!(switch.real_to_normalized(0.0), 0.0);
        assert_eq!(switch.real_to_slider_position(0.25), 0.25);
        assert_eq!(switch.slider_position_to_real(0.25), 0.25);

        let unbounded = ParamMeta::new(
            ParamKey::InputGain,
            "Free",
            ParamKind::Float {
                range: None,
                skew: 0.5,
            },
        );
        assert_eq!(unbounded.normalized_to_real(3.5), 3.5);
        assert_eq!(unbounded.real_to_normalized(-2.0), -2.0);
        assert_eq!(unbounded.real_to_slider_position(9.0), 9.0);
        assert_eq!(unbounded.slider_position_to_real(9.0), 9.0);
    }

    #[test]
    fn skewed_slider_endpoints() {
        let meta = skewed(0.001, 10.0, 0.3);
        assert_eq!(meta.slider_position_to_real(0.0), 0.001);
        assert!((meta.slider_position_to_real(1.0) - 10.0).abs() < 1e-12);
        assert_eq!(meta.real_to_slider_position(0.001), 0.0);
        assert!((meta.real_to_slider_position(10.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn skew_below_one_expands_low_end() {
        let meta = skewed(0.0, 10.0, 0.3);
        // Half the slider travel covers well under half the range.
        assert!(meta.slider_position_to_real(0.5) < 1.0);
        // 1 s of 10 s sits past the middle of the slider.
        assert!(meta.real_to_slider_position(1.0) > 0.5);
    }

    #[test]
    fn slider_position_clamps_input() {
        let meta = skewed(0.001, 10.0, 0.3);
        assert_eq!(meta.slider_position_to_real(-1.0), 0.001);
        assert!((meta.slider_position_to_real(2.0) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn default_normalized_follows_kind() {
        let gain = float(-24.0, 24.0).with_default(0.0);
        assert_eq!(gain.default_normalized(), 0.5);

        let rate = choice(RATES).with_default(4.0);
        assert!((rate.default_normalized() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn choice_labels() {
        let meta = choice(RATES);
        assert_eq!(meta.choice_count(), 6);
        assert_eq!(meta.choice_label(4), Some("1/16"));
        assert_eq!(meta.choice_label(6), None);
        assert_eq!(float(0.0, 1.0).choice_label(0), None);
    }
}
