//! Signal Conventions and Port System
//!
//! Signal kinds, port and parameter definitions, and the type-erased module
//! interface a host uses to drive the sequencer once per sample.

use libm::Libm;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier for a port within a module
pub type PortId = u32;

/// Unique identifier for a parameter within a module
pub type ParamId = u32;

/// Full-scale level of gate, trigger and clock outputs
pub const GATE_HIGH: f64 = 10.0;

/// Semantic signal classification following hardware modular conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalKind {
    /// Unipolar control voltage, 0–10V
    CvUnipolar,

    /// Gate signal: 0V (low) or +10V (high)
    Gate,

    /// Trigger signal, a single-sample pulse at +10V
    Trigger,

    /// Clock signal, a square wave at the master rate
    Clock,
}

impl SignalKind {
    /// Returns the voltage range (min, max) for this signal type
    pub fn voltage_range(&self) -> (f64, f64) {
        match self {
            SignalKind::CvUnipolar => (0.0, 10.0),
            SignalKind::Gate | SignalKind::Trigger | SignalKind::Clock => (0.0, GATE_HIGH),
        }
    }

    /// Threshold voltage for high/low detection
    pub fn gate_threshold(&self) -> Option<f64> {
        match self {
            SignalKind::Gate | SignalKind::Trigger | SignalKind::Clock => Some(1.0),
            SignalKind::CvUnipolar => None,
        }
    }
}

/// Definition of a single port (input or output)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortDef {
    /// Unique identifier within the module
    pub id: PortId,

    /// Human-readable name (e.g., "bar", "beat", "reset")
    pub name: String,

    /// Signal type for validation and UI hints
    pub kind: SignalKind,

    /// Default value when no cable connected
    pub default: f64,
}

impl PortDef {
    pub fn new(id: PortId, name: impl Into<String>, kind: SignalKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            default: 0.0,
        }
    }

    pub fn with_default(mut self, default: f64) -> Self {
        self.default = default;
        self
    }
}

/// Specification of all ports for a module
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortSpec {
    pub inputs: Vec<PortDef>,
    pub outputs: Vec<PortDef>,
}

impl PortSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_by_name(&self, name: &str) -> Option<&PortDef> {
        self.inputs.iter().find(|p| p.name == name)
    }

    pub fn output_by_name(&self, name: &str) -> Option<&PortDef> {
        self.outputs.iter().find(|p| p.name == name)
    }

    pub fn output_by_id(&self, id: PortId) -> Option<&PortDef> {
        self.outputs.iter().find(|p| p.id == id)
    }
}

/// Runtime port values container
#[derive(Debug, Clone, Default)]
pub struct PortValues {
    pub values: HashMap<PortId, f64>,
}

impl PortValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: PortId) -> Option<f64> {
        self.values.get(&id).copied()
    }

    pub fn get_or(&self, id: PortId, default: f64) -> f64 {
        self.values.get(&id).copied().unwrap_or(default)
    }

    pub fn set(&mut self, id: PortId, value: f64) {
        self.values.insert(id, value);
    }

    pub fn has(&self, id: PortId) -> bool {
        self.values.contains_key(&id)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

/// How a panel control maps its travel onto a value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ParamRange {
    /// Continuous value between min and max
    Linear { min: f64, max: f64 },

    /// Integer steps between min and max (snapping knob)
    Stepped { min: f64, max: f64 },

    /// Momentary push button, 0 (released) or 1 (held)
    Button,
}

impl ParamRange {
    /// Map a normalized (0–1) knob position onto the control's value
    pub fn apply(&self, normalized: f64) -> f64 {
        let clamped = normalized.clamp(0.0, 1.0);
        match self {
            ParamRange::Linear { min, max } => min + clamped * (max - min),
            ParamRange::Stepped { min, max } => Libm::<f64>::round(min + clamped * (max - min)),
            ParamRange::Button => Libm::<f64>::round(clamped),
        }
    }

    /// (min, max) bounds of the control
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            ParamRange::Linear { min, max } | ParamRange::Stepped { min, max } => (*min, *max),
            ParamRange::Button => (0.0, 1.0),
        }
    }
}

/// Parameter definition for UI binding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamDef {
    pub id: ParamId,
    pub name: String,
    pub default: f64,
    pub range: ParamRange,
}

impl ParamDef {
    pub fn new(id: ParamId, name: impl Into<String>, default: f64, range: ParamRange) -> Self {
        Self {
            id,
            name: name.into(),
            default,
            range,
        }
    }
}

/// Type-erased module interface for host integration
pub trait GraphModule: Send {
    /// Returns the module's port specification
    fn port_spec(&self) -> &PortSpec;

    /// Process one sample given port values
    fn tick(&mut self, inputs: &PortValues, outputs: &mut PortValues);

    /// Reset internal state
    fn reset(&mut self);

    /// Set sample rate
    fn set_sample_rate(&mut self, sample_rate: f64);

    /// Get parameter definitions for UI binding
    fn params(&self) -> &[ParamDef] {
        &[]
    }

    /// Get a parameter value
    fn get_param(&self, _id: ParamId) -> Option<f64> {
        None
    }

    /// Set a parameter value
    fn set_param(&mut self, _id: ParamId, _value: f64) {}

    /// Get module type identifier for serialization
    fn type_id(&self) -> &'static str {
        "unknown"
    }

    /// Serialize module state (alloc feature only)
    #[cfg(feature = "alloc")]
    fn serialize_state(&self) -> Option<serde_json::Value> {
        None
    }

    /// Deserialize module state (alloc feature only)
    #[cfg(feature = "alloc")]
    fn deserialize_state(&mut self, _state: &serde_json::Value) -> Result<(), String> {
        Ok(())
    }
}
