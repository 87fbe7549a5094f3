//! Lock-free control bridge
//!
//! A UI or MIDI thread writes control values into [`SharedControls`]; the
//! audio thread takes one [`Controls`] snapshot at the top of every sample.
//! A single [`AtomicF64`] can also feed the sequencer's reset jack directly
//! (see [`crate::sequencer::MetaSequencer::set_reset_source`]).
//! Each value is read atomically on its own. A snapshot may mix values from
//! two UI updates, which is harmless for panel controls.

use crate::transport::Controls;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Atomic f64 for lock-free communication between threads
///
/// Uses AtomicU64 internally since there's no native AtomicF64.
#[derive(Debug)]
pub struct AtomicF64(AtomicU64);

impl AtomicF64 {
    pub fn new(value: f64) -> Self {
        Self(AtomicU64::new(value.to_bits()))
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }

    pub fn set(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

impl Default for AtomicF64 {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Clone for AtomicF64 {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

/// Control values shared between a control thread and the audio thread
#[derive(Debug)]
pub struct SharedControls {
    pub run: AtomicF64,
    pub reset_button: AtomicF64,
    pub reset_input: AtomicF64,
    pub tempo: AtomicF64,
    pub time_sig_top: AtomicF64,
    pub time_sig_bottom: AtomicF64,
}

impl SharedControls {
    /// Shared controls initialised to the panel defaults
    pub fn new() -> Arc<Self> {
        Arc::new(Self::from_controls(&Controls::default()))
    }

    pub fn from_controls(controls: &Controls) -> Self {
        Self {
            run: AtomicF64::new(controls.run),
            reset_button: AtomicF64::new(controls.reset_button),
            reset_input: AtomicF64::new(controls.reset_input),
            tempo: AtomicF64::new(controls.tempo),
            time_sig_top: AtomicF64::new(controls.time_sig_top),
            time_sig_bottom: AtomicF64::new(controls.time_sig_bottom),
        }
    }

    /// Read every control once
    pub fn snapshot(&self) -> Controls {
        Controls {
            run: self.run.get(),
            reset_button: self.reset_button.get(),
            reset_input: self.reset_input.get(),
            tempo: self.tempo.get(),
            time_sig_top: self.time_sig_top.get(),
            time_sig_bottom: self.time_sig_bottom.get(),
        }
    }

    /// Publish a full set of controls
    pub fn store(&self, controls: &Controls) {
        self.run.set(controls.run);
        self.reset_button.set(controls.reset_button);
        self.reset_input.set(controls.reset_input);
        self.tempo.set(controls.tempo);
        self.time_sig_top.set(controls.time_sig_top);
        self.time_sig_bottom.set(controls.time_sig_bottom);
    }
}
