//! Transport and Counter Hierarchy
//!
//! The transport owns the master oscillator and derives the musical
//! subdivisions from it. Per sample it:
//!
//! 1. toggles the run state on a rising edge of the run button
//! 2. decodes tempo and time signature from the raw controls
//! 3. zeroes every counter on a rising edge of the reset button or input
//! 4. decays the reset indicator
//! 5. picks the oscillator frequency and counter limits for the meter
//! 6. steps the oscillator and feeds its square output to three edge
//!    detectors (eighths, quarters, bars)
//! 7. advances and wraps each counter and derives the gate outputs
//! 8. hands the song position to the bar handler when the bar counter moved
//!
//! Counters use a two-phase update: an edge increments only while
//! `count <= limit`, and a separate check wraps `count >= limit` back to
//! zero. The gate for a subdivision is high on every sample its counter
//! sits at zero.

use crate::actions::{BarActionHandler, BarPosition};
use crate::oscillator::PhaseOscillator;
use crate::port::GATE_HIGH;
use crate::signature::{ClockDivision, SignaturePolicy, TimeSignature};
use crate::trigger::SchmittTrigger;
use libm::Libm;
use log::{debug, info, warn};

/// Decay constant of the reset indicator
pub const LIGHT_LAMBDA: f64 = 0.075;

/// Number of sequencer outputs exposed by the module
pub const SEQUENCE_OUTPUTS: usize = 8;

/// Rate used when a host hands over a non-positive or non-finite sample rate
pub const DEFAULT_SAMPLE_RATE: f64 = 44100.0;

fn valid_sample_rate(sample_rate: f64) -> bool {
    sample_rate.is_finite() && sample_rate > 0.0
}

/// Raw control values read at the top of each sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    /// Run button, 0 (released) or 1 (pressed)
    pub run: f64,
    /// Reset button, 0 (released) or 1 (pressed)
    pub reset_button: f64,
    /// External reset gate
    pub reset_input: f64,
    /// Tempo in BPM, rounded to an integer
    pub tempo: f64,
    /// Beats per bar, rounded to an integer
    pub time_sig_top: f64,
    /// Note value exponent `n`, decoded as `2^(n + 1)`
    pub time_sig_bottom: f64,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            run: 0.0,
            reset_button: 0.0,
            reset_input: 0.0,
            tempo: 120.0,
            time_sig_top: 4.0,
            time_sig_bottom: 1.0,
        }
    }
}

/// Indicator light intensities
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lights {
    /// 1.0 while running, 0.0 while stopped
    pub run: f64,
    /// Decaying reset flash in [0, 1]
    pub reset: f64,
}

/// Signals produced by one transport step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransportOutputs {
    /// Raw master square mapped to 0–10V
    pub sixteenths: f64,
    pub eighths: f64,
    pub beat: f64,
    pub bar: f64,
    /// Single-sample pulse on reset
    pub reset: f64,
    /// Reserved sequencer outputs, always 0V
    pub sequence: [f64; SEQUENCE_OUTPUTS],
    /// True when the bar counter advanced this sample
    pub bar_advanced: bool,
    pub lights: Lights,
}

/// Counter state of the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counters {
    pub eighths: i32,
    pub quarters: i32,
    pub bars: i32,
    /// Beats counted since the last reset
    pub beat: u64,
    /// Bar-counter advances since the last reset
    pub bar: u64,
}

impl Counters {
    fn clear_bounded(&mut self) {
        self.eighths = 0;
        self.quarters = 0;
        self.bars = 0;
    }
}

/// Edge-driven counter update. Returns true when the counter was incremented.
fn advance(count: &mut i32, limit: i32, edge: bool) -> bool {
    let incremented = edge && *count <= limit;
    if incremented {
        *count = count.saturating_add(1);
    }
    if *count >= limit {
        *count = 0;
    }
    incremented
}

fn gate(high: bool) -> f64 {
    if high {
        GATE_HIGH
    } else {
        0.0
    }
}

/// Musical clock divider with run/reset transport.
pub struct Transport {
    sample_rate: f64,
    clock: PhaseOscillator,

    eighths_trigger: SchmittTrigger,
    quarters_trigger: SchmittTrigger,
    bars_trigger: SchmittTrigger,
    run_trigger: SchmittTrigger,
    reset_button_trigger: SchmittTrigger,
    reset_input_trigger: SchmittTrigger,

    running: bool,
    reset_light: f64,
    counters: Counters,

    tempo: i32,
    signature: TimeSignature,
    division: ClockDivision,
    policy: SignaturePolicy,
    signature_supported: bool,

    bar_handler: Option<Box<dyn BarActionHandler>>,
}

impl Transport {
    /// Create a transport. An invalid sample rate falls back to
    /// [`DEFAULT_SAMPLE_RATE`].
    pub fn new(sample_rate: f64) -> Self {
        let sample_rate = if valid_sample_rate(sample_rate) {
            sample_rate
        } else {
            warn!(
                "invalid sample rate {}, using {}",
                sample_rate, DEFAULT_SAMPLE_RATE
            );
            DEFAULT_SAMPLE_RATE
        };
        Self {
            sample_rate,
            clock: PhaseOscillator::new(),
            eighths_trigger: SchmittTrigger::new(),
            quarters_trigger: SchmittTrigger::new(),
            bars_trigger: SchmittTrigger::new(),
            run_trigger: SchmittTrigger::new(),
            reset_button_trigger: SchmittTrigger::new(),
            reset_input_trigger: SchmittTrigger::new(),
            running: true,
            reset_light: 0.0,
            counters: Counters::default(),
            tempo: 0,
            signature: TimeSignature::default(),
            division: ClockDivision::default(),
            policy: SignaturePolicy::default(),
            signature_supported: true,
            bar_handler: None,
        }
    }

    pub fn with_policy(mut self, policy: SignaturePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn set_policy(&mut self, policy: SignaturePolicy) {
        self.policy = policy;
    }

    pub fn policy(&self) -> SignaturePolicy {
        self.policy
    }

    /// Non-positive or non-finite rates are ignored.
    pub fn set_sample_rate(&mut self, sample_rate: f64) {
        if !valid_sample_rate(sample_rate) {
            warn!(
                "ignoring invalid sample rate {}, keeping {}",
                sample_rate, self.sample_rate
            );
            return;
        }
        if sample_rate != self.sample_rate {
            info!("transport sample rate {} -> {}", self.sample_rate, sample_rate);
        }
        self.sample_rate = sample_rate;
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    pub fn division(&self) -> ClockDivision {
        self.division
    }

    pub fn tempo(&self) -> i32 {
        self.tempo
    }

    pub fn signature(&self) -> TimeSignature {
        self.signature
    }

    /// Whether the last running sample used a signature from the division table
    pub fn signature_supported(&self) -> bool {
        self.signature_supported
    }

    pub fn reset_light(&self) -> f64 {
        self.reset_light
    }

    pub fn oscillator(&self) -> &PhaseOscillator {
        &self.clock
    }

    pub fn set_bar_handler(&mut self, handler: Box<dyn BarActionHandler>) {
        self.bar_handler = Some(handler);
    }

    pub fn clear_bar_handler(&mut self) -> Option<Box<dyn BarActionHandler>> {
        self.bar_handler.take()
    }

    /// Restore the power-on state. Sample rate, policy and bar handler are kept.
    pub fn reset(&mut self) {
        let sample_rate = self.sample_rate;
        let policy = self.policy;
        let handler = self.bar_handler.take();
        *self = Self::new(sample_rate).with_policy(policy);
        self.bar_handler = handler;
    }

    /// Run one sample.
    pub fn process(&mut self, controls: &Controls) -> TransportOutputs {
        let mut out = TransportOutputs::default();

        if self.run_trigger.process(controls.run) {
            self.running = !self.running;
            debug!("transport {}", if self.running { "started" } else { "stopped" });
        }

        self.tempo = Libm::<f64>::round(controls.tempo) as i32;
        let signature = TimeSignature::from_controls(controls.time_sig_top, controls.time_sig_bottom);

        // Both detectors see every sample so neither misses its own edge.
        let reset_button = self.reset_button_trigger.process(controls.reset_button);
        let reset_input = self.reset_input_trigger.process(controls.reset_input);
        if reset_button || reset_input {
            self.counters = Counters::default();
            self.reset_light = 1.0;
            out.reset = GATE_HIGH;
            debug!("transport reset");
        }

        self.reset_light -= self.reset_light / LIGHT_LAMBDA / self.sample_rate;

        if self.running {
            self.apply_signature(signature);
        } else {
            self.counters.clear_bounded();
        }

        self.clock.step(1.0 / self.sample_rate);
        let square = self.clock.square();

        let eighths_edge = self.eighths_trigger.process(square);
        let quarters_edge = self.quarters_trigger.process(square);
        let bars_edge = self.bars_trigger.process(square);

        if self.running {
            out.sixteenths = (GATE_HIGH * square).clamp(0.0, GATE_HIGH);

            let division = self.division;
            let counters = &mut self.counters;

            advance(&mut counters.eighths, division.eighths_limit, eighths_edge);
            out.eighths = gate(counters.eighths == 0);

            if advance(&mut counters.quarters, division.quarters_limit, quarters_edge) {
                counters.beat = counters.beat.saturating_add(1);
            }
            out.beat = gate(counters.quarters == 0);

            if advance(&mut counters.bars, division.bars_limit, bars_edge) {
                counters.bar = counters.bar.saturating_add(1);
                out.bar_advanced = true;
            }
            out.bar = gate(counters.bars == 0);
        }

        if out.bar_advanced {
            let position = BarPosition {
                bar: self.counters.bar,
                beat: self.counters.beat,
            };
            if let Some(handler) = self.bar_handler.as_mut() {
                handler.on_bar(position);
            }
        }

        out.lights = Lights {
            run: if self.running { 1.0 } else { 0.0 },
            reset: self.reset_light,
        };
        out
    }

    fn apply_signature(&mut self, signature: TimeSignature) {
        let (division, supported) = self.policy.resolve(signature, self.division);

        if !supported && (self.signature_supported || signature != self.signature) {
            match self.policy {
                SignaturePolicy::RetainPrevious => warn!(
                    "unsupported time signature {}, keeping previous clock division",
                    signature
                ),
                SignaturePolicy::Clamp => {
                    warn!("unsupported time signature {}, treating as {}/4", signature, signature.top)
                }
            }
        }

        self.signature = signature;
        self.signature_supported = supported;
        self.division = division;

        if supported || self.policy != SignaturePolicy::RetainPrevious {
            self.clock.set_frequency(division.frequency(self.tempo));
        }
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new(44100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::sync::{Arc, Mutex};

    // 60 BPM in 4/4 runs the master clock at 4 Hz. At 64 Hz that is one
    // master cycle every 16 samples, with the first rising edge on sample 16.
    const SR: f64 = 64.0;
    const CYCLE: usize = 16;

    fn slow_controls() -> Controls {
        Controls {
            tempo: 60.0,
            ..Controls::default()
        }
    }

    fn run(transport: &mut Transport, controls: &Controls, samples: usize) -> Vec<TransportOutputs> {
        (0..samples).map(|_| transport.process(controls)).collect()
    }

    #[test]
    fn test_four_four_division() {
        let mut transport = Transport::new(44100.0);
        let controls = Controls {
            time_sig_top: 4.0,
            time_sig_bottom: 1.0,
            ..Controls::default()
        };
        transport.process(&controls);
        assert_eq!(transport.division(), ClockDivision::new(4, 4, 2, 16));
        assert_relative_eq!(transport.oscillator().frequency(), 8.0);
    }

    #[test]
    fn test_six_eight_compound_division() {
        let mut transport = Transport::new(44100.0);
        let controls = Controls {
            time_sig_top: 6.0,
            time_sig_bottom: 2.0,
            ..Controls::default()
        };
        transport.process(&controls);
        let div = transport.division();
        assert_eq!(div.multiplier, 6);
        assert_eq!(div.quarters_limit, 6);
        assert_eq!(div.eighths_limit, 2);
        assert_eq!(div.bars_limit, 12);
        assert_relative_eq!(transport.oscillator().frequency(), 12.0);
    }

    #[test]
    fn test_five_four_division() {
        let mut transport = Transport::new(44100.0);
        let controls = Controls {
            time_sig_top: 5.0,
            time_sig_bottom: 1.0,
            ..Controls::default()
        };
        transport.process(&controls);
        assert_eq!(transport.division(), ClockDivision::new(4, 4, 2, 20));
    }

    #[test]
    fn test_edges_arrive_once_per_master_cycle() {
        let mut transport = Transport::new(SR);
        let outs = run(&mut transport, &slow_controls(), CYCLE * 4);

        let edges: Vec<usize> = outs
            .iter()
            .enumerate()
            .filter(|(_, o)| o.bar_advanced)
            .map(|(i, _)| i + 1)
            .collect();
        assert_eq!(edges, vec![16, 32, 48, 64]);
    }

    #[test]
    fn test_sixteenths_follow_square() {
        let mut transport = Transport::new(SR);
        let outs = run(&mut transport, &slow_controls(), CYCLE);
        // phase 1/16 .. 7/16 is high, 8/16 .. 15/16 low, 16/16 wraps high
        for (i, out) in outs.iter().enumerate() {
            let sample = i + 1;
            let expected = if sample < 8 || sample == 16 { 10.0 } else { 0.0 };
            assert_eq!(out.sixteenths, expected, "sample {}", sample);
        }
    }

    #[test]
    fn test_beat_gate_on_quarter_wrap() {
        let mut transport = Transport::new(SR);
        let outs = run(&mut transport, &slow_controls(), CYCLE * 9);

        for (i, out) in outs.iter().enumerate() {
            let sample = i + 1;
            // counter: 0 until the first edge, then 1, 2, 3 and wraps on the 4th
            let edges = sample / CYCLE;
            let expected = if edges % 4 == 0 { 10.0 } else { 0.0 };
            assert_eq!(out.beat, expected, "sample {}", sample);
        }
        assert_eq!(outs[CYCLE * 4 - 2].beat, 0.0);
        assert_eq!(outs[CYCLE * 4 - 1].beat, 10.0);
        assert_eq!(transport.counters().beat, 9);
    }

    #[test]
    fn test_eighths_gate_alternates() {
        let mut transport = Transport::new(SR);
        let outs = run(&mut transport, &slow_controls(), CYCLE * 4);
        for (i, out) in outs.iter().enumerate() {
            let edges = (i + 1) / CYCLE;
            let expected = if edges % 2 == 0 { 10.0 } else { 0.0 };
            assert_eq!(out.eighths, expected);
        }
    }

    #[test]
    fn test_bar_gate_wraps_at_bars_limit() {
        let mut transport = Transport::new(SR);
        let outs = run(&mut transport, &slow_controls(), CYCLE * 16);
        assert_eq!(outs[0].bar, 10.0);
        assert_eq!(outs[CYCLE - 1].bar, 0.0);
        assert_eq!(outs[CYCLE * 15].bar, 0.0);
        assert_eq!(outs[CYCLE * 16 - 1].bar, 10.0);
        assert_eq!(transport.counters().bars, 0);
        assert_eq!(transport.counters().bar, 16);
    }

    #[test]
    fn test_stopped_transport_holds_everything_low() {
        let mut transport = Transport::new(SR);
        let mut controls = slow_controls();
        run(&mut transport, &controls, 20);
        assert_eq!(transport.counters().quarters, 1);

        controls.run = 1.0;
        let out = transport.process(&controls);
        assert!(!transport.running());
        assert_eq!(out.lights.run, 0.0);

        let before = transport.counters();
        for out in run(&mut transport, &controls, CYCLE * 8) {
            let c = transport.counters();
            assert_eq!((c.eighths, c.quarters, c.bars), (0, 0, 0));
            assert_eq!(out.sixteenths, 0.0);
            assert_eq!(out.eighths, 0.0);
            assert_eq!(out.beat, 0.0);
            assert_eq!(out.bar, 0.0);
            assert!(!out.bar_advanced);
        }
        assert_eq!(transport.counters().beat, before.beat);
        assert_eq!(transport.counters().bar, before.bar);
    }

    #[test]
    fn test_run_button_toggles_on_rising_edge() {
        let mut transport = Transport::new(SR);
        let mut controls = slow_controls();
        transport.process(&controls);

        controls.run = 1.0;
        transport.process(&controls);
        assert!(!transport.running());
        // held button does not toggle again
        transport.process(&controls);
        assert!(!transport.running());

        controls.run = 0.0;
        transport.process(&controls);
        controls.run = 1.0;
        let out = transport.process(&controls);
        assert!(transport.running());
        assert_eq!(out.lights.run, 1.0);
    }

    #[test]
    fn test_reset_zeroes_counters_and_pulses_once() {
        let mut transport = Transport::new(SR);
        let mut controls = slow_controls();
        run(&mut transport, &controls, 19);
        assert_ne!(transport.counters(), Counters::default());

        controls.reset_button = 1.0;
        let out = transport.process(&controls);
        assert_eq!(transport.counters(), Counters::default());
        assert_eq!(out.reset, 10.0);

        let out = transport.process(&controls);
        assert_eq!(out.reset, 0.0);

        controls.reset_button = 0.0;
        let out = transport.process(&controls);
        assert_eq!(out.reset, 0.0);
    }

    #[test]
    fn test_reset_input_drives_same_path() {
        let mut transport = Transport::new(SR);
        let mut controls = slow_controls();
        run(&mut transport, &controls, 19);

        controls.reset_input = 10.0;
        let out = transport.process(&controls);
        assert_eq!(out.reset, 10.0);
        assert_eq!(transport.counters(), Counters::default());
        assert_eq!(out.lights.reset, transport.reset_light());
        assert!(out.lights.reset > 0.0 && out.lights.reset < 1.0);
    }

    #[test]
    fn test_reset_light_fixed_fractional_decay() {
        let sample_rate = 44100.0;
        let mut transport = Transport::new(sample_rate);
        let mut controls = Controls::default();
        transport.process(&controls);
        controls.reset_button = 1.0;

        let mut expected = 1.0_f64;
        expected -= expected / LIGHT_LAMBDA / sample_rate;
        let out = transport.process(&controls);
        assert_relative_eq!(out.lights.reset, expected);

        let mut previous = out.lights.reset;
        for _ in 0..20000 {
            expected -= expected / LIGHT_LAMBDA / sample_rate;
            let out = transport.process(&controls);
            assert_relative_eq!(out.lights.reset, expected);
            assert!(out.lights.reset < previous);
            assert!(out.lights.reset > 0.0);
            previous = out.lights.reset;
        }
        assert!(previous < 0.01);
    }

    #[test]
    fn test_sequence_counters_are_monotonic_between_resets() {
        let mut transport = Transport::new(SR);
        let controls = slow_controls();
        let mut last = transport.counters();
        for _ in 0..CYCLE * 40 {
            let out = transport.process(&controls);
            let now = transport.counters();
            assert!(now.beat >= last.beat);
            assert!(now.bar >= last.bar);
            if now.bar > last.bar {
                assert!(out.bar_advanced);
                assert_eq!(now.bar, last.bar + 1);
            }
            last = now;
        }
        assert_eq!(last.bar, 40);
    }

    #[test]
    fn test_bar_handler_receives_positions() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut transport = Transport::new(SR);
        transport.set_bar_handler(Box::new(move |pos: BarPosition| {
            sink.lock().unwrap().push(pos);
        }));
        run(&mut transport, &slow_controls(), CYCLE * 4);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[0], BarPosition { bar: 1, beat: 1 });
        assert_eq!(seen[3], BarPosition { bar: 4, beat: 4 });
    }

    #[test]
    fn test_clear_bar_handler() {
        let mut transport = Transport::new(SR);
        assert!(transport.clear_bar_handler().is_none());
        transport.set_bar_handler(Box::new(|_: BarPosition| {}));
        assert!(transport.clear_bar_handler().is_some());
    }

    #[test]
    fn test_unsupported_signature_retains_previous() {
        let mut transport = Transport::new(SR);
        let mut controls = Controls {
            tempo: 120.0,
            time_sig_top: 6.0,
            time_sig_bottom: 2.0,
            ..Controls::default()
        };
        transport.process(&controls);
        assert_relative_eq!(transport.oscillator().frequency(), 12.0);

        // 3/2 is not in the table; tempo change is ignored too
        controls.tempo = 60.0;
        controls.time_sig_top = 3.0;
        controls.time_sig_bottom = 0.0;
        transport.process(&controls);
        assert!(!transport.signature_supported());
        assert_eq!(transport.division(), ClockDivision::new(6, 6, 2, 12));
        assert_relative_eq!(transport.oscillator().frequency(), 12.0);

        controls.time_sig_bottom = 1.0;
        transport.process(&controls);
        assert!(transport.signature_supported());
        assert_eq!(transport.division(), ClockDivision::new(4, 4, 2, 12));
    }

    #[test]
    fn test_unsupported_signature_clamp_policy() {
        let mut transport = Transport::new(SR).with_policy(SignaturePolicy::Clamp);
        let controls = Controls {
            tempo: 60.0,
            time_sig_top: 3.0,
            time_sig_bottom: 3.0,
            ..Controls::default()
        };
        transport.process(&controls);
        assert!(!transport.signature_supported());
        assert_eq!(transport.division(), ClockDivision::new(4, 4, 2, 12));
        assert_relative_eq!(transport.oscillator().frequency(), 4.0);
    }

    #[test]
    fn test_degenerate_inputs_do_not_panic() {
        let mut transport = Transport::new(SR);
        let controls = Controls {
            tempo: 0.0,
            time_sig_top: 0.0,
            time_sig_bottom: 1.0,
            ..Controls::default()
        };
        for out in run(&mut transport, &controls, 100) {
            assert!(!out.bar_advanced);
            // bars limit 0 keeps the counter pinned at zero
            assert_eq!(out.bar, 10.0);
        }
        assert_eq!(transport.oscillator().phase(), 0.0);

        let controls = Controls {
            tempo: -120.0,
            time_sig_top: -4.0,
            time_sig_bottom: 2.0,
            ..Controls::default()
        };
        run(&mut transport, &controls, 100);
        assert_eq!(transport.counters().bars, 0);
    }

    #[test]
    fn test_sequence_outputs_stay_silent() {
        let mut transport = Transport::new(SR);
        for out in run(&mut transport, &slow_controls(), CYCLE * 4) {
            assert_eq!(out.sequence, [0.0; SEQUENCE_OUTPUTS]);
        }
    }

    #[test]
    fn test_host_reset_restores_power_on_state() {
        let mut transport = Transport::new(SR).with_policy(SignaturePolicy::Clamp);
        let mut controls = slow_controls();
        run(&mut transport, &controls, 40);
        controls.run = 1.0;
        transport.process(&controls);
        assert!(!transport.running());

        transport.reset();
        assert!(transport.running());
        assert_eq!(transport.counters(), Counters::default());
        assert_eq!(transport.oscillator().phase(), 0.0);
        assert_eq!(transport.policy(), SignaturePolicy::Clamp);
        assert_eq!(transport.sample_rate(), SR);
    }

    #[test]
    fn test_shrinking_limit_wraps_in_same_sample() {
        let mut transport = Transport::new(SR);
        let mut controls = slow_controls();
        run(&mut transport, &controls, CYCLE * 14);
        assert_eq!(transport.counters().bars, 14);

        // 3/4 drops the bars limit to 12 below the current count
        controls.time_sig_top = 3.0;
        let out = transport.process(&controls);
        assert_eq!(transport.division().bars_limit, 12);
        assert_eq!(transport.counters().bars, 0);
        assert_eq!(out.bar, 10.0);
        assert!(!out.bar_advanced);
    }

    #[test]
    fn test_invalid_sample_rate_is_rejected() {
        let transport = Transport::new(0.0);
        assert_eq!(transport.sample_rate(), DEFAULT_SAMPLE_RATE);

        let mut transport = Transport::new(SR);
        transport.set_sample_rate(0.0);
        transport.set_sample_rate(-48000.0);
        transport.set_sample_rate(f64::NAN);
        assert_eq!(transport.sample_rate(), SR);

        let mut controls = slow_controls();
        transport.process(&controls);
        controls.reset_button = 1.0;
        for _ in 0..100 {
            let out = transport.process(&controls);
            assert!(out.lights.reset >= 0.0 && out.lights.reset <= 1.0);
        }
    }
}
