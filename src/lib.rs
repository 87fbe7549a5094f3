//! # Metaseq: Musical Clock Divider and Transport
//!
//! `metaseq` derives sample-accurate musical clocks (sixteenths, eighths,
//! beats and bars) from a single free-running oscillator, following a
//! tempo and time signature, with run/stop and reset transport controls.
//!
//! ## Architecture
//!
//! - **Oscillator** - a phase accumulator producing the master square clock
//! - **Transport** - edge detectors and nested counters that divide the master
//!   clock by meter, plus the run/reset state and indicator lights
//! - **Module** - [`MetaSequencer`] exposes the transport as a [`GraphModule`]
//!   with panel parameters, a reset jack and gate outputs
//!
//! ## Quick Start
//!
//! ```rust
//! use metaseq::prelude::*;
//!
//! let mut seq = MetaSequencer::new(44100.0);
//! seq.set_param(metaseq::sequencer::PARAM_TEMPO, 96.0);
//!
//! let inputs = PortValues::new();
//! let mut outputs = PortValues::new();
//! for _ in 0..44100 {
//!     seq.tick(&inputs, &mut outputs);
//! }
//! assert!(seq.transport().counters().beat > 0);
//! ```

pub mod actions;
pub mod io;
pub mod oscillator;
pub mod port;
pub mod sequencer;
#[cfg(feature = "std")]
pub mod serialize;
pub mod signature;
pub mod transport;
pub mod trigger;

/// Prelude module for convenient imports
pub mod prelude {
    // Port system
    pub use crate::port::{
        GraphModule, ParamDef, ParamId, ParamRange, PortDef, PortId, PortSpec, PortValues,
        SignalKind, GATE_HIGH,
    };

    // Clock core
    pub use crate::oscillator::PhaseOscillator;
    pub use crate::signature::{ClockDivision, SignaturePolicy, TimeSignature};
    pub use crate::trigger::SchmittTrigger;

    // Transport
    pub use crate::actions::{BarActionHandler, BarPosition};
    pub use crate::transport::{Controls, Counters, Lights, Transport, TransportOutputs};

    // Module
    pub use crate::sequencer::MetaSequencer;

    // External I/O
    pub use crate::io::{AtomicF64, SharedControls};

    // Serialization
    #[cfg(feature = "std")]
    pub use crate::serialize::{ConfigError, SequencerPreset};
}

// Re-export key types at crate root for convenience
pub use prelude::*;
