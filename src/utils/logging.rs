use log::{log_enabled, trace, Level};
use std::time::Instant;

/// Scoped timer reporting the duration of a damping pass at trace level.
pub struct ScopedTimer<'a> {
    label: &'a str,
    start: Option<Instant>,
}

impl<'a> ScopedTimer<'a> {
    pub fn new(label: &'a str) -> Self {
        let start = if log_enabled!(Level::Trace) {
            trace!("start {label}");
            Some(Instant::now())
        } else {
            None
        };
        Self { label, start }
    }
}

impl<'a> Drop for ScopedTimer<'a> {
    fn drop(&mut self) {
        if let Some(start) = self.start {
            trace!("end {} ({} µs)", self.label, start.elapsed().as_micros());
        }
    }
}
