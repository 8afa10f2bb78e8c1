use crate::util::Trace;

/// The interpreter's entire tunable surface.
///
/// The dialect itself has nothing to configure (no reader macros, no
/// alternate numeric bases, no pluggable built-ins) — `Config` exists solely
/// to toggle the debug-only trace described in [`crate::util::Trace`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    pub trace: Trace,
}

impl Default for Trace {
    fn default() -> Self {
        Trace::Off
    }
}

impl Config {
    pub fn with_trace(trace: Trace) -> Self {
        Self { trace }
    }
}
