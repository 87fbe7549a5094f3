//! Time signature decoding and the signature → clock division table.
//!
//! The master oscillator runs at a multiple of the beat rate. Each meter
//! picks that multiple together with the wrap limits of the eighths,
//! quarters and bars counters.

use libm::Libm;
use serde::{Deserialize, Serialize};

/// A decoded time signature.
///
/// `bottom` holds the note value (2, 4, 8, 16), not the raw exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSignature {
    pub top: i32,
    pub bottom: i32,
}

impl TimeSignature {
    pub const fn new(top: i32, bottom: i32) -> Self {
        Self { top, bottom }
    }

    /// Decode raw panel values. Both are rounded half away from zero and
    /// the bottom exponent `n` becomes `2^(n + 1)`.
    pub fn from_controls(top_control: f64, bottom_control: f64) -> Self {
        let top = Libm::<f64>::round(top_control) as i32;
        let exponent = Libm::<f64>::round(bottom_control);
        let bottom = Libm::<f64>::pow(2.0, exponent + 1.0) as i32;
        Self { top, bottom }
    }

    /// Compound meters have an eighth-note bottom and a top divisible by three.
    pub fn is_compound(&self) -> bool {
        self.bottom == 8 && self.top % 3 == 0
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self::new(4, 4)
    }
}

impl core::fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.top, self.bottom)
    }
}

/// Oscillator multiplier and counter wrap limits for one meter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockDivision {
    /// Oscillator frequency as a multiple of the beat rate (tempo / 60)
    pub multiplier: i32,
    pub quarters_limit: i32,
    pub eighths_limit: i32,
    pub bars_limit: i32,
}

impl ClockDivision {
    pub const fn new(
        multiplier: i32,
        quarters_limit: i32,
        eighths_limit: i32,
        bars_limit: i32,
    ) -> Self {
        Self {
            multiplier,
            quarters_limit,
            eighths_limit,
            bars_limit,
        }
    }

    /// Division table. Returns `None` when the bottom is neither equal to
    /// the top, 4, nor 8.
    pub fn for_signature(sig: TimeSignature) -> Option<Self> {
        if sig.top == sig.bottom {
            return Some(Self::new(4, 4, 2, 16));
        }
        match sig.bottom {
            4 => Some(Self::new(4, 4, 2, sig.top.wrapping_mul(4))),
            8 if sig.top % 3 == 0 => Some(Self::new(6, 6, 2, (sig.top / 3).wrapping_mul(6))),
            8 => Some(Self::new(4, 4, 2, sig.top.wrapping_mul(2))),
            _ => None,
        }
    }

    /// Oscillator frequency in Hz for a tempo in BPM
    pub fn frequency(&self, tempo: i32) -> f64 {
        tempo as f64 / 60.0 * self.multiplier as f64
    }
}

impl Default for ClockDivision {
    fn default() -> Self {
        Self::new(4, 4, 2, 16)
    }
}

/// What the transport does with a signature the division table does not cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignaturePolicy {
    /// Keep the previous division and oscillator frequency
    #[default]
    RetainPrevious,

    /// Treat the signature as `top/4`
    Clamp,
}

impl SignaturePolicy {
    /// Resolve a signature to a division. `previous` is returned untouched
    /// under `RetainPrevious` when the signature is unsupported.
    pub fn resolve(&self, sig: TimeSignature, previous: ClockDivision) -> (ClockDivision, bool) {
        match ClockDivision::for_signature(sig) {
            Some(division) => (division, true),
            None => match self {
                SignaturePolicy::RetainPrevious => (previous, false),
                SignaturePolicy::Clamp => (
                    ClockDivision::new(4, 4, 2, sig.top.wrapping_mul(4)),
                    false,
                ),
            },
        }
    }
}
