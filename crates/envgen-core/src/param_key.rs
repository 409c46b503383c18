//! Structured parameter identity.
//!
//! The host addresses parameters by flat string ids (`inputGain`,
//! `lane3_attack`, `lane8_step15`). Inside the surface every parameter is a
//! [`ParamKey`] instead, so lane position and field are plain data rather than
//! substrings. The string form exists only at the bridge boundary:
//! [`Display`](core::fmt::Display) encodes, [`FromStr`] decodes.
//!
//! ```rust
//! use envgen_core::{LaneField, LaneNumber, ParamKey};
//!
//! let key: ParamKey = "lane3_attack".parse().unwrap();
//! assert_eq!(key, ParamKey::lane(LaneNumber::new(3).unwrap(), LaneField::Attack));
//! assert_eq!(key.to_string(), "lane3_attack");
//! ```

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

/// Maximum number of lanes the host allocates.
pub const MAX_LANES: usize = 8;

/// Number of sequencer steps per lane.
pub const STEPS_PER_LANE: usize = 16;

/// Number of parameters owned by one lane (16 steps + 6 shape fields).
pub const LANE_FIELD_COUNT: usize = STEPS_PER_LANE + 6;

/// 1-based lane number in `1..=8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LaneNumber(u8);

impl LaneNumber {
    /// Lane 1.
    pub const FIRST: Self = Self(1);

    /// Lane 8.
    pub const LAST: Self = Self(MAX_LANES as u8);

    /// Returns `None` outside `1..=8`.
    pub const fn new(number: u8) -> Option<Self> {
        if number >= 1 && number as usize <= MAX_LANES {
            Some(Self(number))
        } else {
            None
        }
    }

    /// Lane number for a 0-based position. `None` past the last lane.
    pub fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index)
            .ok()
            .and_then(|i| i.checked_add(1))
            .and_then(Self::new)
    }

    /// The 1-based number.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// The 0-based position.
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// All lane numbers in ascending order.
    pub fn all() -> impl Iterator<Item = LaneNumber> {
        (1..=MAX_LANES as u8).map(Self)
    }
}

impl fmt::Display for LaneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the 22 parameters a lane owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LaneField {
    /// Sequencer step gate, `0..16`.
    Step(u8),
    /// Envelope attack time.
    Attack,
    /// Envelope hold time.
    Hold,
    /// Envelope decay time.
    Decay,
    /// Step rate (note division).
    Rate,
    /// Modulation destination.
    Destination,
    /// Bipolar modulation amount.
    Amount,
}

impl LaneField {
    /// Every lane field in host layout order: `step0..15`, `attack`, `hold`,
    /// `decay`, `rate`, `destination`, `amount`.
    pub const ALL: [LaneField; LANE_FIELD_COUNT] = [
        LaneField::Step(0),
        LaneField::Step(1),
        LaneField::Step(2),
        LaneField::Step(3),
        LaneField::Step(4),
        LaneField::Step(5),
        LaneField::Step(6),
        LaneField::Step(7),
        LaneField::Step(8),
        LaneField::Step(9),
        LaneField::Step(10),
        LaneField::Step(11),
        LaneField::Step(12),
        LaneField::Step(13),
        LaneField::Step(14),
        LaneField::Step(15),
        LaneField::Attack,
        LaneField::Hold,
        LaneField::Decay,
        LaneField::Rate,
        LaneField::Destination,
        LaneField::Amount,
    ];

    /// The six envelope-shape fields, in layout order.
    pub const SHAPE: [LaneField; 6] = [
        LaneField::Attack,
        LaneField::Hold,
        LaneField::Decay,
        LaneField::Rate,
        LaneField::Destination,
        LaneField::Amount,
    ];

    /// Step field, or `None` for `step >= 16`.
    pub fn step(step: usize) -> Option<Self> {
        if step < STEPS_PER_LANE {
            Some(LaneField::Step(step as u8))
        } else {
            None
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "attack" => Some(LaneField::Attack),
            "hold" => Some(LaneField::Hold),
            "decay" => Some(LaneField::Decay),
            "rate" => Some(LaneField::Rate),
            "destination" => Some(LaneField::Destination),
            "amount" => Some(LaneField::Amount),
            _ => {
                let digits = s.strip_prefix("step")?;
                Self::step(parse_canonical_index(digits)?)
            }
        }
    }
}

impl fmt::Display for LaneField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaneField::Step(step) => write!(f, "step{step}"),
            LaneField::Attack => f.write_str("attack"),
            LaneField::Hold => f.write_str("hold"),
            LaneField::Decay => f.write_str("decay"),
            LaneField::Rate => f.write_str("rate"),
            LaneField::Destination => f.write_str("destination"),
            LaneField::Amount => f.write_str("amount"),
        }
    }
}

/// A lane-owned parameter: lane number plus field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LaneParam {
    /// Owning lane.
    pub lane: LaneNumber,
    /// Field within the lane.
    pub field: LaneField,
}

/// Identity of every parameter the host declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParamKey {
    /// `inputGain`
    InputGain,
    /// `outputGain`
    OutputGain,
    /// `dryPass`
    DryPass,
    /// `numLanes`: active lane count, normalized against \[0, 8\].
    NumLanes,
    /// `lane{n}_{field}`
    Lane(LaneParam),
}

impl ParamKey {
    /// The global (non-lane) keys in layout order.
    pub const GLOBALS: [ParamKey; 4] = [
        ParamKey::InputGain,
        ParamKey::OutputGain,
        ParamKey::DryPass,
        ParamKey::NumLanes,
    ];

    /// Key for `field` on `lane`.
    pub const fn lane(lane: LaneNumber, field: LaneField) -> Self {
        ParamKey::Lane(LaneParam { lane, field })
    }

    /// The 22 keys of one lane, in layout order.
    pub fn lane_block(lane: LaneNumber) -> impl Iterator<Item = ParamKey> {
        LaneField::ALL
            .into_iter()
            .map(move |field| ParamKey::lane(lane, field))
    }

    /// Lane and field, for lane-owned keys.
    pub const fn as_lane(&self) -> Option<LaneParam> {
        match *self {
            ParamKey::Lane(param) => Some(param),
            _ => None,
        }
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKey::InputGain => f.write_str("inputGain"),
            ParamKey::OutputGain => f.write_str("outputGain"),
            ParamKey::DryPass => f.write_str("dryPass"),
            ParamKey::NumLanes => f.write_str("numLanes"),
            ParamKey::Lane(LaneParam { lane, field }) => write!(f, "lane{lane}_{field}"),
        }
    }
}

/// A string id that does not name any host parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseParamKeyError {
    id: String,
}

impl ParseParamKeyError {
    /// The id that failed to parse.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for ParseParamKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown parameter id: {}", self.id)
    }
}

impl core::error::Error for ParseParamKeyError {}

impl FromStr for ParamKey {
    type Err = ParseParamKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = match s {
            "inputGain" => Some(ParamKey::InputGain),
            "outputGain" => Some(ParamKey::OutputGain),
            "dryPass" => Some(ParamKey::DryPass),
            "numLanes" => Some(ParamKey::NumLanes),
            _ => parse_lane_key(s),
        };
        parsed.ok_or_else(|| ParseParamKeyError { id: s.to_string() })
    }
}

fn parse_lane_key(s: &str) -> Option<ParamKey> {
    let rest = s.strip_prefix("lane")?;
    let (number, field) = rest.split_once('_')?;
    let lane = LaneNumber::new(u8::try_from(parse_canonical_index(number)?).ok()?)?;
    Some(ParamKey::lane(lane, LaneField::parse(field)?))
}

/// Decimal index with no sign and no leading zeros, so every key has exactly
/// one spelling.
fn parse_canonical_index(digits: &str) -> Option<usize> {
    if digits.is_empty()
        || !digits.bytes().all(|b| b.is_ascii_digit())
        || (digits.len() > 1 && digits.starts_with('0'))
    {
        return None;
    }
    digits.parse().ok()
}
