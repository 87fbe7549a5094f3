//! Master clock oscillator
//!
//! A free-running phase accumulator whose square output drives every
//! subdivision counter in the transport.

/// Largest phase advance allowed in a single step, in cycles.
pub const MAX_PHASE_STEP: f64 = 0.5;

/// Free-running pulse oscillator.
///
/// `phase` lives in [0, 1). The square output is +1 while the phase is
/// below the pulse width and -1 otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseOscillator {
    phase: f64,
    pulse_width: f64,
    frequency: f64,
}

impl PhaseOscillator {
    pub fn new() -> Self {
        Self {
            phase: 0.0,
            pulse_width: 0.5,
            frequency: 1.0,
        }
    }

    pub fn with_pulse_width(mut self, pulse_width: f64) -> Self {
        self.pulse_width = pulse_width;
        self
    }

    /// Set the frequency in Hz used by subsequent steps. Zero and negative
    /// values are accepted and stall the phase.
    pub fn set_frequency(&mut self, frequency: f64) {
        self.frequency = frequency;
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn pulse_width(&self) -> f64 {
        self.pulse_width
    }

    /// Advance the phase by `frequency * dt` cycles, clamped to half a cycle.
    /// A negative or NaN advance is treated as no advance so the phase
    /// never leaves [0, 1).
    pub fn step(&mut self, dt: f64) {
        let delta = (self.frequency * dt).max(0.0).min(MAX_PHASE_STEP);
        self.phase += delta;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
    }

    /// Bipolar square output, +1.0 or -1.0
    pub fn square(&self) -> f64 {
        if self.phase < self.pulse_width {
            1.0
        } else {
            -1.0
        }
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

impl Default for PhaseOscillator {
    fn default() -> Self {
        Self::new()
    }
}
