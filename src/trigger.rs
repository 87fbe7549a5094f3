//! Rising-edge detection with hysteresis.

/// Internal state of a [`SchmittTrigger`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    /// No sample seen yet
    Unknown,
    Low,
    High,
}

/// Schmitt trigger: fires once when the input rises to the high threshold
/// and re-arms only after it falls back to the low threshold.
///
/// A signal that is already high on the very first sample settles the
/// trigger to `High` without firing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchmittTrigger {
    state: TriggerState,
    low: f64,
    high: f64,
}

impl SchmittTrigger {
    pub fn new() -> Self {
        Self {
            state: TriggerState::Unknown,
            low: 0.0,
            high: 1.0,
        }
    }

    pub fn with_thresholds(mut self, low: f64, high: f64) -> Self {
        self.low = low;
        self.high = high;
        self
    }

    /// Feed one sample; returns true on a rising edge.
    pub fn process(&mut self, input: f64) -> bool {
        match self.state {
            TriggerState::Low => {
                if input >= self.high {
                    self.state = TriggerState::High;
                    return true;
                }
            }
            TriggerState::High => {
                if input <= self.low {
                    self.state = TriggerState::Low;
                }
            }
            TriggerState::Unknown => {
                if input >= self.high {
                    self.state = TriggerState::High;
                } else if input <= self.low {
                    self.state = TriggerState::Low;
                }
            }
        }
        false
    }

    pub fn state(&self) -> TriggerState {
        self.state
    }

    pub fn is_high(&self) -> bool {
        self.state == TriggerState::High
    }

    pub fn reset(&mut self) {
        self.state = TriggerState::Unknown;
    }
}

impl Default for SchmittTrigger {
    fn default() -> Self {
        Self::new()
    }
}
