//! MetaSequencer Module
//!
//! Host-facing wrapper around [`Transport`]: panel parameters, the reset
//! jack, gate outputs, eight reserved sequencer outputs and two indicator
//! lights.

use crate::actions::BarActionHandler;
use crate::io::AtomicF64;
use crate::port::{
    GraphModule, ParamDef, ParamId, ParamRange, PortDef, PortSpec, PortValues, SignalKind,
};
use crate::signature::SignaturePolicy;
use crate::transport::{Controls, Lights, Transport, TransportOutputs, SEQUENCE_OUTPUTS};
use log::warn;
use std::sync::Arc;

pub const PARAM_RUN: ParamId = 0;
pub const PARAM_RESET: ParamId = 1;
pub const PARAM_TEMPO: ParamId = 2;
pub const PARAM_TIME_SIG_TOP: ParamId = 3;
pub const PARAM_TIME_SIG_BOTTOM: ParamId = 4;

pub const IN_RESET: u32 = 0;

pub const OUT_BAR: u32 = 10;
pub const OUT_BEAT: u32 = 11;
pub const OUT_EIGHTHS: u32 = 12;
pub const OUT_SIXTEENTHS: u32 = 13;
pub const OUT_RESET: u32 = 14;
/// First of the eight sequencer outputs (20–27)
pub const OUT_SEQ_BASE: u32 = 20;

/// Tempo-synced clock divider and transport.
///
/// Derives sixteenth, eighth, beat and bar clocks from a single master
/// oscillator. The run button starts and stops the transport; the reset
/// button or a rising edge on the reset jack zeroes every counter and
/// fires a one-sample pulse on the reset output.
pub struct MetaSequencer {
    transport: Transport,
    controls: Controls,
    lights: Lights,
    last: TransportOutputs,
    reset_source: Option<Arc<AtomicF64>>,
    params: Vec<ParamDef>,
    spec: PortSpec,
}

impl MetaSequencer {
    pub fn new(sample_rate: f64) -> Self {
        let mut outputs = vec![
            PortDef::new(OUT_BAR, "bar", SignalKind::Gate),
            PortDef::new(OUT_BEAT, "beat", SignalKind::Gate),
            PortDef::new(OUT_EIGHTHS, "eighths", SignalKind::Gate),
            PortDef::new(OUT_SIXTEENTHS, "sixteenths", SignalKind::Clock),
            PortDef::new(OUT_RESET, "reset", SignalKind::Trigger),
        ];
        for i in 0..SEQUENCE_OUTPUTS as u32 {
            outputs.push(PortDef::new(
                OUT_SEQ_BASE + i,
                format!("seq{}", i + 1),
                SignalKind::CvUnipolar,
            ));
        }

        let defaults = Controls::default();
        Self {
            transport: Transport::new(sample_rate),
            controls: defaults,
            lights: Lights::default(),
            last: TransportOutputs::default(),
            reset_source: None,
            params: vec![
                ParamDef::new(PARAM_RUN, "run", 0.0, ParamRange::Button),
                ParamDef::new(PARAM_RESET, "reset", 0.0, ParamRange::Button),
                ParamDef::new(
                    PARAM_TEMPO,
                    "tempo",
                    defaults.tempo,
                    ParamRange::Linear {
                        min: 40.0,
                        max: 250.0,
                    },
                ),
                ParamDef::new(
                    PARAM_TIME_SIG_TOP,
                    "time_sig_top",
                    defaults.time_sig_top,
                    ParamRange::Stepped {
                        min: 2.0,
                        max: 15.0,
                    },
                ),
                ParamDef::new(
                    PARAM_TIME_SIG_BOTTOM,
                    "time_sig_bottom",
                    defaults.time_sig_bottom,
                    ParamRange::Stepped { min: 0.0, max: 3.0 },
                ),
            ],
            spec: PortSpec {
                inputs: vec![PortDef::new(IN_RESET, "reset", SignalKind::Trigger)],
                outputs,
            },
        }
    }

    pub fn with_policy(mut self, policy: SignaturePolicy) -> Self {
        self.transport.set_policy(policy);
        self
    }

    /// Install the hook called whenever the bar counter advances
    pub fn set_bar_handler(&mut self, handler: Box<dyn BarActionHandler>) {
        self.transport.set_bar_handler(handler);
    }

    /// Feed the reset jack from a value written by another thread, e.g. a
    /// MIDI start message mapped to a gate. It is combined with the patched
    /// jack and the `reset_input` control; the highest voltage wins.
    pub fn set_reset_source(&mut self, source: Arc<AtomicF64>) {
        self.reset_source = Some(source);
    }

    pub fn clear_reset_source(&mut self) {
        self.reset_source = None;
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut Transport {
        &mut self.transport
    }

    /// Current panel control values
    pub fn controls(&self) -> Controls {
        self.controls
    }

    /// Replace all panel controls at once, e.g. from a [`crate::io::SharedControls`] snapshot
    pub fn set_controls(&mut self, controls: Controls) {
        self.controls = controls;
    }

    /// Indicator intensities after the last tick
    pub fn lights(&self) -> Lights {
        self.lights
    }

    /// Outputs of the last tick
    pub fn last_outputs(&self) -> &TransportOutputs {
        &self.last
    }

    /// Run one sample directly from typed controls
    pub fn process(&mut self, controls: &Controls) -> TransportOutputs {
        self.controls = *controls;
        self.step(controls)
    }

    fn step(&mut self, controls: &Controls) -> TransportOutputs {
        let out = self.transport.process(controls);
        self.lights = out.lights;
        self.last = out;
        out
    }
}

impl Default for MetaSequencer {
    fn default() -> Self {
        Self::new(44100.0)
    }
}

impl GraphModule for MetaSequencer {
    fn port_spec(&self) -> &PortSpec {
        &self.spec
    }

    fn tick(&mut self, inputs: &PortValues, outputs: &mut PortValues) {
        // The jack does not overwrite the stored control value
        let mut controls = self.controls;
        controls.reset_input = inputs.get_or(IN_RESET, 0.0).max(self.controls.reset_input);
        if let Some(source) = &self.reset_source {
            controls.reset_input = controls.reset_input.max(source.get());
        }

        let out = self.step(&controls);

        outputs.set(OUT_BAR, out.bar);
        outputs.set(OUT_BEAT, out.beat);
        outputs.set(OUT_EIGHTHS, out.eighths);
        outputs.set(OUT_SIXTEENTHS, out.sixteenths);
        outputs.set(OUT_RESET, out.reset);
        for (i, value) in out.sequence.iter().enumerate() {
            outputs.set(OUT_SEQ_BASE + i as u32, *value);
        }
    }

    fn reset(&mut self) {
        self.transport.reset();
        self.lights = Lights::default();
        self.last = TransportOutputs::default();
    }

    fn set_sample_rate(&mut self, sample_rate: f64) {
        self.transport.set_sample_rate(sample_rate);
    }

    fn params(&self) -> &[ParamDef] {
        &self.params
    }

    fn get_param(&self, id: ParamId) -> Option<f64> {
        match id {
            PARAM_RUN => Some(self.controls.run),
            PARAM_RESET => Some(self.controls.reset_button),
            PARAM_TEMPO => Some(self.controls.tempo),
            PARAM_TIME_SIG_TOP => Some(self.controls.time_sig_top),
            PARAM_TIME_SIG_BOTTOM => Some(self.controls.time_sig_bottom),
            _ => None,
        }
    }

    fn set_param(&mut self, id: ParamId, value: f64) {
        match id {
            PARAM_RUN => self.controls.run = value,
            PARAM_RESET => self.controls.reset_button = value,
            PARAM_TEMPO => self.controls.tempo = value,
            PARAM_TIME_SIG_TOP => self.controls.time_sig_top = value,
            PARAM_TIME_SIG_BOTTOM => self.controls.time_sig_bottom = value,
            _ => warn!("meta_sequencer: unknown param id {}", id),
        }
    }

    fn type_id(&self) -> &'static str {
        "meta_sequencer"
    }

    #[cfg(feature = "std")]
    fn serialize_state(&self) -> Option<serde_json::Value> {
        let preset = crate::serialize::SequencerPreset::from_sequencer(self);
        serde_json::to_value(preset).ok()
    }

    #[cfg(feature = "std")]
    fn deserialize_state(&mut self, state: &serde_json::Value) -> Result<(), String> {
        let preset: crate::serialize::SequencerPreset =
            serde_json::from_value(state.clone()).map_err(|e| e.to_string())?;
        preset.apply_to(self).map_err(|e| e.to_string())
    }
}
