//! Serialization and Persistence
//!
//! Presets capture the panel settings of a [`MetaSequencer`] so a host can
//! save and restore them alongside a patch.

use crate::sequencer::MetaSequencer;
use crate::signature::SignaturePolicy;
use crate::transport::Controls;
use log::info;
use serde::{Deserialize, Serialize};

/// Current preset schema version
pub const PRESET_VERSION: u32 = 1;

/// Error types for preset loading and validation
#[derive(Debug)]
pub enum ConfigError {
    Json(serde_json::Error),
    UnsupportedVersion(u32),
    InvalidValue { field: &'static str, value: f64 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Json(e) => write!(f, "Invalid preset JSON: {}", e),
            ConfigError::UnsupportedVersion(v) => {
                write!(f, "Unsupported preset version {} (expected <= {})", v, PRESET_VERSION)
            }
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value for {}: {}", field, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

/// Saved sequencer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencerPreset {
    /// Schema version for forward compatibility
    pub version: u32,
    pub name: String,
    /// Tempo in BPM
    pub tempo: f64,
    pub time_sig_top: f64,
    /// Note value exponent, see [`crate::signature::TimeSignature::from_controls`]
    pub time_sig_bottom: f64,
    pub running: bool,
    pub signature_policy: SignaturePolicy,
}

impl SequencerPreset {
    pub fn new(name: impl Into<String>) -> Self {
        let controls = Controls::default();
        Self {
            version: PRESET_VERSION,
            name: name.into(),
            tempo: controls.tempo,
            time_sig_top: controls.time_sig_top,
            time_sig_bottom: controls.time_sig_bottom,
            running: true,
            signature_policy: SignaturePolicy::default(),
        }
    }

    pub fn with_tempo(mut self, tempo: f64) -> Self {
        self.tempo = tempo;
        self
    }

    /// Set the signature from the top and the bottom exponent
    pub fn with_signature(mut self, top: f64, bottom_exponent: f64) -> Self {
        self.time_sig_top = top;
        self.time_sig_bottom = bottom_exponent;
        self
    }

    pub fn with_policy(mut self, policy: SignaturePolicy) -> Self {
        self.signature_policy = policy;
        self
    }

    /// Capture the current settings of a sequencer
    pub fn from_sequencer(seq: &MetaSequencer) -> Self {
        let controls = seq.controls();
        Self {
            version: PRESET_VERSION,
            name: String::from("Untitled"),
            tempo: controls.tempo,
            time_sig_top: controls.time_sig_top,
            time_sig_bottom: controls.time_sig_bottom,
            running: seq.transport().running(),
            signature_policy: seq.transport().policy(),
        }
    }

    /// Reject presets from newer schemas and non-finite values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version > PRESET_VERSION {
            return Err(ConfigError::UnsupportedVersion(self.version));
        }
        for (field, value) in [
            ("tempo", self.tempo),
            ("time_sig_top", self.time_sig_top),
            ("time_sig_bottom", self.time_sig_bottom),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }
        Ok(())
    }

    /// Validate and write the settings into a sequencer. Buttons and the
    /// reset jack are left untouched.
    pub fn apply_to(&self, seq: &mut MetaSequencer) -> Result<(), ConfigError> {
        self.validate()?;

        let mut controls = seq.controls();
        controls.tempo = self.tempo;
        controls.time_sig_top = self.time_sig_top;
        controls.time_sig_bottom = self.time_sig_bottom;
        seq.set_controls(controls);

        let transport = seq.transport_mut();
        transport.set_running(self.running);
        transport.set_policy(self.signature_policy);

        info!("loaded preset '{}'", self.name);
        Ok(())
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize and validate a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let preset: Self = serde_json::from_str(json)?;
        preset.validate()?;
        Ok(preset)
    }
}

impl Default for SequencerPreset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
