//! Per-bar action hook
//!
//! The transport calls a [`BarActionHandler`] once on every sample where the
//! bar counter advances. The crate ships no rule engine: hosts that want bar
//! triggered behaviour (rule evaluation, action queues, expiry) plug it in
//! here.

/// Song position handed to a bar handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BarPosition {
    /// Bars elapsed since the last reset, including the one just counted
    pub bar: u64,
    /// Beats elapsed since the last reset
    pub beat: u64,
}

/// Callback invoked when the bar counter advances.
///
/// Runs on the audio thread: implementations must not block or allocate.
pub trait BarActionHandler: Send {
    fn on_bar(&mut self, position: BarPosition);
}

impl<F> BarActionHandler for F
where
    F: FnMut(BarPosition) + Send,
{
    fn on_bar(&mut self, position: BarPosition) {
        self(position)
    }
}
